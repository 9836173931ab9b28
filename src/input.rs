use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::{View, NAV_ENTRIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Down,
    Up,
    ToggleFull,
    Refresh,
    OpenInBrowser,
    ToggleSave,
    FilterButton(usize),
    Navigate(View),
    ToggleMenu,
    CloseMenu,
    None,
}

impl Action {
    /// Actions aimed at the article grid. These close an open menu.
    pub fn targets_main_pane(self) -> bool {
        matches!(
            self,
            Action::Down | Action::Up | Action::ToggleFull | Action::OpenInBrowser | Action::ToggleSave
        )
    }
}

pub fn poll_action() -> anyhow::Result<Action> {
    if !event::poll(Duration::from_millis(50))? {
        return Ok(Action::None);
    }

    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key)),
        _ => Ok(Action::None),
    }
}

pub fn map_key(KeyEvent { code, modifiers, .. }: KeyEvent) -> Action {
    if let KeyCode::Char(c) = code {
        if let Some(entry) = NAV_ENTRIES.iter().find(|e| e.key == c) {
            return Action::Navigate(entry.view);
        }
    }

    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => Action::Quit,
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Action::Down,
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Action::Up,
        (KeyCode::Enter, _) => Action::ToggleFull,
        (KeyCode::Char('r'), _) => Action::Refresh,
        (KeyCode::Char('o'), _) => Action::OpenInBrowser,
        (KeyCode::Char('s'), _) => Action::ToggleSave,
        (KeyCode::Char(c @ '1'..='9'), _) => Action::FilterButton(c as usize - '1' as usize),
        (KeyCode::Char('m'), _) => Action::ToggleMenu,
        (KeyCode::Esc, _) => Action::CloseMenu,
        _ => Action::None,
    }
}
