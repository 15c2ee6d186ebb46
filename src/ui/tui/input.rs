use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{DashboardEvent, Scroll};

/// Maps a terminal event to a dashboard event. Unbound keys map to `None`.
pub fn translate(event: Event) -> Option<DashboardEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(width, height) => Some(DashboardEvent::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<DashboardEvent> {
    // Windows reports both press and release.
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let event = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => DashboardEvent::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => DashboardEvent::Quit,
        KeyCode::Char('?') => DashboardEvent::ToggleHelp,
        KeyCode::Esc => DashboardEvent::DismissHelp,
        KeyCode::Up | KeyCode::Char('k') => DashboardEvent::Scroll(Scroll::LineUp),
        KeyCode::Down | KeyCode::Char('j') => DashboardEvent::Scroll(Scroll::LineDown),
        KeyCode::PageUp => DashboardEvent::Scroll(Scroll::PageUp),
        KeyCode::PageDown => DashboardEvent::Scroll(Scroll::PageDown),
        KeyCode::Home => DashboardEvent::Scroll(Scroll::Top),
        KeyCode::End => DashboardEvent::Scroll(Scroll::Bottom),
        _ => return None,
    };
    Some(event)
}
