use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::sync::mpsc;
use tracing::{info, warn};

use newsdash::app::App;
use newsdash::config::Config;
use newsdash::input::{self, Action};
use newsdash::model::Article;
use newsdash::repository::{ArticleRepository, FetchError};
use newsdash::saved::{FileStore, KvStore, SavedStore};
use newsdash::{logging, ui};

type FetchResult = Result<Vec<Article>, FetchError>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let data_dir = config.data_dir()?;
    if !config.no_log {
        logging::init(&data_dir, &config.log_level)?;
    }
    info!(backend = %config.backend_url, data_dir = %data_dir.display(), "starting newsdash");

    let repo = ArticleRepository::new(&config.backend_url, config.timeout())
        .context("building HTTP client")?;
    let saved = SavedStore::load(FileStore::new(&data_dir));
    let mut app = App::new(saved, config.initial_filter());

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app, repo).await;
    restore_terminal(&mut terminal)?;
    res
}

async fn run<S: KvStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
    repo: ArticleRepository,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<FetchResult>(1);

    start_fetch(app, &repo, &tx);

    loop {
        // Handle background fetch results
        while let Ok(msg) = rx.try_recv() {
            app.finish_load(msg, Utc::now());
        }

        terminal.draw(|f| ui::draw(f, app))?;

        let action = input::poll_action()?;
        if action.targets_main_pane() {
            app.close_sidebar();
        }

        match action {
            Action::Quit => break,
            Action::Down => app.move_down(),
            Action::Up => app.move_up(),
            Action::ToggleFull => app.show_full = !app.show_full,
            Action::Refresh => start_fetch(app, &repo, &tx),
            Action::ToggleSave => {
                app.toggle_save_selected();
            }
            Action::FilterButton(i) => app.press_filter_button(i, Utc::now()),
            Action::Navigate(view) => app.navigate(view, Utc::now()),
            Action::ToggleMenu => app.toggle_sidebar(),
            Action::CloseMenu => app.close_sidebar(),

            Action::OpenInBrowser => {
                if let Some(card) = app.selected_card() {
                    let link = card.link.clone();
                    if let Err(e) = open::that(&link) {
                        warn!(error = %e, link = %link, "could not open browser");
                        app.status = format!("Could not open browser: {}", e);
                    } else {
                        app.status = "Opened in browser.".to_string();
                    }
                }
            }

            Action::None => {}
        }
    }

    Ok(())
}

/// Runs one fetch in the background. Ignored while a fetch is in flight.
fn start_fetch<S: KvStore>(app: &mut App<S>, repo: &ArticleRepository, tx: &mpsc::Sender<FetchResult>) {
    if app.loading {
        return;
    }
    app.begin_load();
    let tx = tx.clone();
    let repo = repo.clone();
    tokio::spawn(async move {
        let out = repo.fetch_all().await;
        let _ = tx.send(out).await;
    });
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
