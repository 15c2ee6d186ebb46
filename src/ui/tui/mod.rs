//! Terminal dashboard
//!
//! The dashboard thread owns all display state. Summaries arrive over the
//! hand-off channel and are drained in bounded batches each frame, then the
//! thread waits for terminal input for the rest of the frame budget.

pub mod help;
pub mod input;
pub mod log;
pub mod render;
pub mod state;

use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::packet::PacketSummary;

pub use log::DEFAULT_LOG_CAPACITY;
pub use state::{Dashboard, DashboardEvent, DashboardStats, Phase};

use input::translate;
use render::draw_dashboard;

pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(33);
pub const DEFAULT_MAX_BATCH: usize = 512;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub log_capacity: usize,
    pub frame_budget: Duration,
    /// Most summaries taken from the channel per frame.
    pub max_batch: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            frame_budget: DEFAULT_FRAME_BUDGET,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

/// Holds the terminal in raw mode on the alternate screen; restores it on drop.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                Err(e)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drained {
    pub count: usize,
    /// The sending side is gone; nothing more will arrive.
    pub disconnected: bool,
}

/// Feeds up to `max` pending summaries into `dashboard` without blocking.
pub fn drain_packets(
    rx: &Receiver<PacketSummary>,
    dashboard: &mut Dashboard,
    max: usize,
) -> Drained {
    let mut count = 0;
    while count < max {
        match rx.try_recv() {
            Ok(summary) => {
                dashboard.handle(DashboardEvent::Packet(summary));
                count += 1;
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                return Drained {
                    count,
                    disconnected: true,
                }
            }
        }
    }
    Drained {
        count,
        disconnected: false,
    }
}

/// Runs the dashboard on the real terminal until the user quits or `running`
/// is cleared. The terminal is restored before this returns.
pub fn run_dashboard(
    device_name: &str,
    rx: &Receiver<PacketSummary>,
    running: &AtomicBool,
    config: &DashboardConfig,
) -> Result<DashboardStats> {
    let mut guard = TerminalGuard::enter()?;
    let dashboard = Dashboard::new(device_name, config.log_capacity);
    let dashboard = run_loop(
        guard.terminal_mut(),
        dashboard,
        rx,
        running,
        config,
        poll_terminal_event,
    )?;
    drop(guard);

    Ok(dashboard.into_stats())
}

fn poll_terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// The frame loop, generic over the backend and the input source.
///
/// `next_event` waits up to the given budget for one terminal event.
pub fn run_loop<B, F>(
    terminal: &mut Terminal<B>,
    mut dashboard: Dashboard,
    rx: &Receiver<PacketSummary>,
    running: &AtomicBool,
    config: &DashboardConfig,
    mut next_event: F,
) -> io::Result<Dashboard>
where
    B: Backend,
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    let size = terminal.size()?;
    dashboard.handle(DashboardEvent::Resize {
        width: size.width,
        height: size.height,
    });
    info!(device = dashboard.device_name(), "dashboard ready");

    let mut sender_gone = false;

    loop {
        let drained = drain_packets(rx, &mut dashboard, config.max_batch);
        if drained.disconnected && !sender_gone {
            warn!("polling loop hung up; no further packets will arrive");
            sender_gone = true;
        }

        if !running.load(Ordering::SeqCst) {
            debug!("stop requested externally");
            dashboard.handle(DashboardEvent::Quit);
        }

        if dashboard.phase() == Phase::Terminating {
            break;
        }

        let elapsed = dashboard.stats().elapsed();
        terminal.draw(|f| draw_dashboard(f, &dashboard, elapsed))?;

        if let Some(event) = next_event(config.frame_budget)?.and_then(translate) {
            dashboard.handle(event);
        }
    }

    info!(
        packets = dashboard.stats().packet_count,
        bytes = dashboard.stats().total_bytes,
        "dashboard closed"
    );
    Ok(dashboard)
} // run_loop
