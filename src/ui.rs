use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FILTER_BUTTONS, NAV_ENTRIES};
use crate::card::Card;
use crate::saved::KvStore;

const SIDEBAR_WIDTH: u16 = 24;

pub fn draw<S: KvStore>(f: &mut Frame, app: &App<S>) {
    let area = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    draw_top_bar(f, app, chunks[0]);

    let main = if app.sidebar_visible(area.width) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(chunks[1]);
        draw_sidebar(f, app, cols[0]);
        cols[1]
    } else {
        chunks[1]
    };

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main);
    draw_cards(f, app, panes[0]);
    draw_detail(f, app, panes[1]);

    let status = if app.loading {
        "Loading articles…".to_string()
    } else {
        app.status.clone()
    };
    f.render_widget(Paragraph::new(status), chunks[2]);
}

fn draw_top_bar<S: KvStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let updated = app
        .last_updated
        .map(|t| format!("Last updated: {}", t.format("%H:%M:%S")))
        .unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(app.heading(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  m:menu  s:save  o:open  r:refresh  q:quit"),
    ]);
    f.render_widget(Paragraph::new(line), area);
    f.render_widget(Paragraph::new(updated).alignment(Alignment::Right), area);
}

fn draw_sidebar<S: KvStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for entry in NAV_ENTRIES {
        let style = if entry.view == app.view() { active } else { Style::default() };
        lines.push(Line::styled(format!("{}  {}", entry.key, entry.label), style));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled("Sources", Style::default().add_modifier(Modifier::DIM)));

    let active_tag = app.active_filter_tag();
    for (i, button) in FILTER_BUTTONS.iter().enumerate() {
        let style = if active_tag.as_deref() == Some(button.tag) { active } else { Style::default() };
        lines.push(Line::styled(format!("{}  {}", i + 1, button.label), style));
    }

    let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("newsdash"));
    f.render_widget(sidebar, area);
}

fn draw_cards<S: KvStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(app.heading());

    if let Some(notice) = app.board.notice() {
        let mut text = Text::from(Line::styled(notice.text(), Style::default().add_modifier(Modifier::BOLD)));
        if let Some(hint) = notice.hint() {
            text.lines.push(Line::from(hint));
        }
        let body = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(body, area);
        return;
    }

    let items: Vec<ListItem> = app.board.cards().iter().enumerate().map(|(pos, card)| {
        let prefix = if pos == app.selected { "▶ " } else { "  " };
        let line = Line::from(vec![
            Span::raw(prefix),
            Span::raw(format!("{} ", card.marker())),
            Span::styled(format!("{:<14.14} ", card.source), badge_style(card)),
            Span::raw(format!("{:<15} ", card.age)),
            Span::raw(card.title.clone()),
        ]);
        ListItem::new(line)
    }).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    // The state keeps the selected row scrolled into view.
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_detail<S: KvStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let body = if let Some(card) = app.selected_card() {
        let mut text = Text::default();
        text.lines.push(Line::from(card.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)));
        text.lines.push(Line::from(vec![
            Span::styled(card.source.clone(), badge_style(card)),
            Span::raw(format!("    {}", card.age)),
        ]));
        if app.show_full {
            text.lines.push(Line::from(format!("Published: {}", card.published_full)));
        }
        text.lines.push(Line::from(format!("Link: {}", card.link)));
        text.lines.push(Line::from(card.tags.join(" ")));
        text.lines.push(Line::from(format!("[s] {}", card.toggle_label())));
        text.lines.push(Line::from(""));
        let content = if app.show_full { card.summary.clone() } else { truncate(&card.summary, 700) };
        text.lines.extend(Text::from(content).lines);
        text
    } else if app.loading {
        Text::from("Loading articles…")
    } else {
        Text::from("Nothing selected.")
    };

    let preview = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title("Article"))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, area);
}

fn badge_style(card: &Card) -> Style {
    let color = match card.source_class.as_str() {
        s if s.contains("rundown") => Color::Cyan,
        s if s.contains("reddit") || s.starts_with("r-") => Color::LightRed,
        s if s.contains("ben") => Color::Magenta,
        _ => Color::Gray,
    };
    Style::default().fg(color)
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
