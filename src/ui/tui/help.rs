use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BINDINGS: [(&str, &str); 6] = [
    ("q, Ctrl+C", "Quit"),
    ("?", "Toggle this help"),
    ("Esc", "Close help"),
    ("Up/Down", "Scroll one line"),
    ("PgUp/PgDn", "Scroll one page"),
    ("Home/End", "Oldest line / follow newest"),
];

/// Key bindings drawn over the middle of the dashboard.
pub fn draw_help_overlay(f: &mut Frame<'_>) {
    let area = overlay_area(f.size(), BINDINGS.len() as u16 + 2);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", keys), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    let overlay = Paragraph::new(lines).block(
        Block::default()
            .title("Help - Aperture Controls")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(Clear, area);
    f.render_widget(overlay, area);
}

/// Half the screen wide, tall enough for `rows`, centered and clipped to `screen`.
fn overlay_area(screen: Rect, rows: u16) -> Rect {
    let width = (screen.width / 2).max(44).min(screen.width);
    let height = rows.min(screen.height);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}
