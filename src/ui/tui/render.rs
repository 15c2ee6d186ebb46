use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::help::draw_help_overlay;
use super::state::{
    format_bytes, format_elapsed, Dashboard, DashboardStats, Phase, FOOTER_HEIGHT, HEADER_HEIGHT,
};

/// Width of the stats column, borders included.
pub const STATS_WIDTH: u16 = 34;

/// Text of the stats panel for `stats` after `elapsed` of capture.
pub fn stats_text(stats: &DashboardStats, elapsed: Duration) -> String {
    format!(
        "Time Elapsed: {}\n\
         Total Packets: {}\n\
         Packets/sec: {:.2}\n\
         Data Captured: {}\n\
         \n\
         Protocol Breakdown:\n\
         \x20 TCP: {}\n\
         \x20 UDP: {}\n\
         \x20 Other: {}",
        format_elapsed(elapsed),
        stats.packet_count,
        stats.packets_per_second(elapsed),
        format_bytes(stats.total_bytes),
        stats.tcp_count,
        stats.udp_count,
        stats.other_count,
    )
}

pub fn draw_dashboard(f: &mut Frame<'_>, dashboard: &Dashboard, elapsed: Duration) {
    let area = f.size();

    if dashboard.phase() == Phase::Initializing {
        let text = Paragraph::new("Initializing...").alignment(Alignment::Center);
        f.render_widget(text, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(STATS_WIDTH)])
        .split(rows[1]);

    draw_header(f, rows[0], dashboard);
    draw_packet_log(f, body[0], dashboard);
    draw_stats_panel(f, body[1], dashboard.stats(), elapsed);
    draw_footer(f, rows[2], dashboard);

    if dashboard.show_help() {
        draw_help_overlay(f);
    }
}

fn draw_header(f: &mut Frame<'_>, area: Rect, dashboard: &Dashboard) {
    let line = Line::from(vec![
        Span::styled(
            "Aperture Packet Capture",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  Device: "),
        Span::styled(dashboard.device_name(), Style::default().fg(Color::Yellow)),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_packet_log(f: &mut Frame<'_>, area: Rect, dashboard: &Dashboard) {
    let log = dashboard.log();
    let mut title = format!("Packet Log ({}/{})", log.len(), log.capacity());
    if log.evicted() > 0 {
        title.push_str(&format!(", {} older dropped", log.evicted()));
    }
    let block = Block::default().title(title).borders(Borders::ALL);

    if log.is_empty() {
        let waiting = Paragraph::new("Waiting for packets...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(waiting, area);
        return;
    }

    let lines: Vec<Line> = dashboard
        .visible_lines()
        .into_iter()
        .map(Line::from)
        .collect();

    let panel = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(block);
    f.render_widget(panel, area);
}

fn draw_stats_panel(f: &mut Frame<'_>, area: Rect, stats: &DashboardStats, elapsed: Duration) {
    let panel = Paragraph::new(stats_text(stats, elapsed))
        .style(Style::default().fg(Color::Green))
        .block(Block::default().title("Statistics").borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, dashboard: &Dashboard) {
    let mut spans = vec![Span::raw(
        "q: quit  ?: help  Up/Down PgUp/PgDn Home/End: scroll",
    )];
    if dashboard.scroll_back() > 0 {
        spans.push(Span::styled(
            format!("  [{} lines back, End to follow]", dashboard.scroll_back()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
