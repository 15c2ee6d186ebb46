use std::time::{Duration, Instant};

use crate::packet::{PacketSummary, Protocol};

use super::log::VisibleLog;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Ready,
    Terminating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Everything the dashboard reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    Packet(PacketSummary),
    Resize { width: u16, height: u16 },
    Scroll(Scroll),
    ToggleHelp,
    DismissHelp,
    Quit,
}

/// Running totals for the session. Counters only ever grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub start_time: Instant,
    pub packet_count: u64,
    pub tcp_count: u64,
    pub udp_count: u64,
    pub other_count: u64,
    pub total_bytes: u64,
}

impl DashboardStats {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start_time: Instant) -> Self {
        Self {
            start_time,
            packet_count: 0,
            tcp_count: 0,
            udp_count: 0,
            other_count: 0,
            total_bytes: 0,
        }
    }

    pub fn record(&mut self, summary: &PacketSummary) {
        self.packet_count += 1;
        self.total_bytes += summary.length as u64;
        match summary.protocol {
            Protocol::Tcp => self.tcp_count += 1,
            Protocol::Udp => self.udp_count += 1,
            Protocol::Other => self.other_count += 1,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Packets per second over `elapsed`; 0 when no time has passed.
    pub fn packets_per_second(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.packet_count as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Scales a byte count to B, KB or MB (1024 steps).
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = "B";
    if value > 1024.0 {
        value /= 1024.0;
        unit = "KB";
    }
    if value > 1024.0 {
        value /= 1024.0;
        unit = "MB";
    }
    format!("{:.2} {}", value, unit)
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Dashboard state. Owned and mutated by the rendering thread only.
#[derive(Debug)]
pub struct Dashboard {
    device_name: String,
    phase: Phase,
    stats: DashboardStats,
    log: VisibleLog,
    scroll_back: usize,
    show_help: bool,
    size: (u16, u16),
}

impl Dashboard {
    pub fn new(device_name: impl Into<String>, log_capacity: usize) -> Self {
        Self {
            device_name: device_name.into(),
            phase: Phase::Initializing,
            stats: DashboardStats::new(),
            log: VisibleLog::new(log_capacity),
            scroll_back: 0,
            show_help: false,
            size: (0, 0),
        }
    }

    pub fn handle(&mut self, event: DashboardEvent) {
        if self.phase == Phase::Terminating {
            return;
        }

        match event {
            DashboardEvent::Packet(summary) => {
                self.stats.record(&summary);
                self.log.push(summary.display_line);
                self.scroll_back = 0;
            }
            DashboardEvent::Resize { width, height } => {
                self.size = (width, height);
                if self.phase == Phase::Initializing {
                    self.phase = Phase::Ready;
                }
                self.scroll_back = self.scroll_back.min(self.max_scroll_back());
            }
            DashboardEvent::Scroll(scroll) => self.scroll(scroll),
            DashboardEvent::ToggleHelp => self.show_help = !self.show_help,
            DashboardEvent::DismissHelp => self.show_help = false,
            DashboardEvent::Quit => self.phase = Phase::Terminating,
        }
    }

    fn scroll(&mut self, scroll: Scroll) {
        let page = self.log_viewport_height().max(1);
        let target = match scroll {
            Scroll::LineUp => self.scroll_back + 1,
            Scroll::LineDown => self.scroll_back.saturating_sub(1),
            Scroll::PageUp => self.scroll_back + page,
            Scroll::PageDown => self.scroll_back.saturating_sub(page),
            Scroll::Top => usize::MAX,
            Scroll::Bottom => 0,
        };
        self.scroll_back = target.min(self.max_scroll_back());
    }

    fn max_scroll_back(&self) -> usize {
        self.log.len().saturating_sub(self.log_viewport_height())
    }

    /// Rows available for log lines inside the bordered log panel.
    pub fn log_viewport_height(&self) -> usize {
        self.size.1.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + 2) as usize
    }

    pub fn visible_lines(&self) -> Vec<&str> {
        self.log.window(self.scroll_back, self.log_viewport_height())
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn log(&self) -> &VisibleLog {
        &self.log
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn into_stats(self) -> DashboardStats {
        self.stats
    }
}
