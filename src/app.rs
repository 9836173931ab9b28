use chrono::{DateTime, Local, Utc};
use tracing::{error, info, warn};

use crate::card::Card;
use crate::filter::{select, FilterSelector};
use crate::model::Article;
use crate::repository::{FailureKind, FetchError};
use crate::saved::{KvStore, SavedStore};

/// Terminals at least this wide always show the sidebar.
pub const WIDE_LAYOUT_COLUMNS: u16 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Saved,
}

impl View {
    pub fn heading(self) -> &'static str {
        match self {
            View::Dashboard => "Latest AI News",
            View::Saved => "Saved Articles",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NavEntry {
    pub view: View,
    pub label: &'static str,
    pub key: char,
}

pub const NAV_ENTRIES: [NavEntry; 2] = [
    NavEntry { view: View::Dashboard, label: "Dashboard", key: 'd' },
    NavEntry { view: View::Saved, label: "Saved", key: 'v' },
];

/// A source filter button, tagged with the category it selects.
#[derive(Clone, Copy, Debug)]
pub struct FilterButton {
    pub tag: &'static str,
    pub label: &'static str,
}

pub const FILTER_BUTTONS: [FilterButton; 4] = [
    FilterButton { tag: "all", label: "All Sources" },
    FilterButton { tag: "rundown", label: "The Rundown" },
    FilterButton { tag: "reddit", label: "Reddit" },
    FilterButton { tag: "bens", label: "Ben's Bites" },
];

/// Placeholder shown instead of cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    NoMatches,
    NoArticles,
    BackendError,
    NothingSaved,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::NoMatches => "No articles match your filter.",
            Notice::NoArticles => "No articles found.",
            Notice::BackendError => "Error loading articles. Please ensure backend is running.",
            Notice::NothingSaved => "No saved articles yet",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Notice::NothingSaved => Some("Press s on any article to save it for later."),
            _ => None,
        }
    }
}

/// What the article grid currently holds: cards, or a notice in their place.
#[derive(Debug, Default)]
pub struct Board {
    cards: Vec<Card>,
    notice: Option<Notice>,
}

impl Board {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.notice = None;
    }

    pub fn show_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.notice = None;
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.cards.clear();
        self.notice = Some(notice);
    }

    /// Drops one card, leaving the others untouched.
    pub fn remove_card(&mut self, link: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.link != link);
        self.cards.len() != before
    }

    pub fn card_mut(&mut self, link: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.link == link)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }
}

/// Dashboard state and the transitions between views.
#[derive(Debug)]
pub struct App<S: KvStore> {
    pub articles: Vec<Article>,
    pub saved: SavedStore<S>,
    pub current: FilterSelector,
    pub board: Board,
    pub selected: usize,
    pub show_full: bool,
    pub loading: bool,
    pub sidebar_open: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub status: String,
}

impl<S: KvStore> App<S> {
    pub fn new(saved: SavedStore<S>, initial: FilterSelector) -> Self {
        Self {
            articles: vec![],
            saved,
            current: initial,
            board: Board::default(),
            selected: 0,
            show_full: false,
            loading: false,
            sidebar_open: false,
            last_updated: None,
            status: "Press r to refresh. q to quit.".to_string(),
        }
    }

    pub fn view(&self) -> View {
        match self.current {
            FilterSelector::Saved => View::Saved,
            _ => View::Dashboard,
        }
    }

    pub fn heading(&self) -> &'static str {
        self.view().heading()
    }

    /// Tag of the highlighted filter button. None while viewing Saved.
    pub fn active_filter_tag(&self) -> Option<String> {
        match self.view() {
            View::Saved => None,
            View::Dashboard => Some(self.current.to_string()),
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.board.clear();
        self.selected = 0;
        self.status = "Refreshing…".to_string();
    }

    pub fn finish_load(&mut self, result: Result<Vec<Article>, FetchError>, now: DateTime<Utc>) {
        self.loading = false;
        self.last_updated = Some(now.with_timezone(&Local));

        match result {
            Ok(items) => {
                self.articles = items;
                self.render(now);
                self.status = format!("Loaded {} articles", self.articles.len());
            }
            Err(e) => {
                let notice = match e.kind() {
                    FailureKind::EmptyResult => {
                        warn!(error = %e, "backend returned no article list");
                        Notice::NoArticles
                    }
                    FailureKind::FetchFailed => {
                        error!(error = %e, "error fetching articles");
                        Notice::BackendError
                    }
                };
                self.board.show_notice(notice);
                self.status = format!("Refresh failed: {e}");
            }
        }
    }

    /// Rebuilds the board from the current selector.
    pub fn render(&mut self, now: DateTime<Utc>) {
        self.selected = 0;
        let items = select(&self.articles, &self.saved, &self.current);

        if items.is_empty() {
            let notice = match self.view() {
                View::Saved => Notice::NothingSaved,
                View::Dashboard => Notice::NoMatches,
            };
            self.board.show_notice(notice);
            return;
        }

        let cards = items
            .iter()
            .map(|a| Card::render(a, self.saved.contains(&a.link), now))
            .collect();
        self.board.show_cards(cards);
    }

    /// Applies a category filter. Always lands on the Dashboard view.
    pub fn select_filter(&mut self, selector: FilterSelector, now: DateTime<Utc>) {
        if selector == FilterSelector::Saved {
            self.navigate(View::Saved, now);
            return;
        }
        info!(filter = %selector, "filter selected");
        self.current = selector;
        self.render(now);
    }

    pub fn press_filter_button(&mut self, index: usize, now: DateTime<Utc>) {
        if let Some(button) = FILTER_BUTTONS.get(index) {
            self.select_filter(FilterSelector::from_tag(button.tag), now);
        }
    }

    /// Switches view and resets the category filter to its default.
    pub fn navigate(&mut self, view: View, now: DateTime<Utc>) {
        info!(?view, "navigate");
        self.current = match view {
            View::Dashboard => FilterSelector::All,
            View::Saved => FilterSelector::Saved,
        };
        self.render(now);
    }

    /// Flips the saved state of the article with `link`.
    ///
    /// Returns the new state, or None when no such article is known.
    pub fn toggle_save(&mut self, link: &str) -> Option<bool> {
        let article = self
            .articles
            .iter()
            .find(|a| a.link == link)
            .or_else(|| self.saved.get(link))
            .cloned();
        let Some(article) = article else {
            error!(link, "article not found");
            return None;
        };

        let now_saved = self.saved.toggle(&article);
        if let Some(card) = self.board.card_mut(link) {
            card.set_saved(now_saved);
        }

        if !now_saved && self.view() == View::Saved {
            self.board.remove_card(link);
            if self.saved.is_empty() {
                self.board.show_notice(Notice::NothingSaved);
            }
            self.clamp_selection();
        }

        self.status = if now_saved {
            "Saved for later.".to_string()
        } else {
            "Removed from Saved.".to_string()
        };
        Some(now_saved)
    }

    pub fn toggle_save_selected(&mut self) -> Option<bool> {
        let link = self.selected_card()?.link.clone();
        self.toggle_save(&link)
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.board.cards().get(self.selected)
    }

    pub fn move_down(&mut self) {
        let len = self.board.cards().len();
        if len == 0 { return; }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn move_up(&mut self) {
        if self.board.cards().is_empty() { return; }
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn sidebar_visible(&self, width: u16) -> bool {
        width >= WIDE_LAYOUT_COLUMNS || self.sidebar_open
    }

    fn clamp_selection(&mut self) {
        let len = self.board.cards().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
