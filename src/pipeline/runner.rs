use std::io::{self, BufRead, Write};
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, info, warn};

use crate::capture::{CaptureEngine, Device, PcapEngine};
use crate::cli::CliArgs;
use crate::error::Result;
use crate::pipeline::capture_loop::spawn_polling_loop;
use crate::pipeline::session::SessionManager;
use crate::pipeline::signal::setup_ctrlc_handler;
use crate::ui::device::{find_device, print_device_list, prompt_device_selection, write_device_json};
use crate::ui::summary::write_final_summary;
use crate::ui::tui::{run_dashboard, DashboardStats};

/// Lists devices, picks one, runs the dashboard over a live session and
/// prints the totals once the terminal is restored.
pub fn run(args: &CliArgs) -> Result<()> {
    let engine: Arc<dyn CaptureEngine> = Arc::new(PcapEngine::new(args.capture_config()));
    let manager = SessionManager::new(engine);
    let devices = manager.list_devices()?;

    if args.list {
        let mut out = io::stdout().lock();
        if args.json {
            write_device_json(&devices, &mut out)?;
        } else {
            print_device_list(&devices, &mut out)?;
        }
        return Ok(());
    }

    let device = select_device(
        args.device.as_deref(),
        &devices,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;

    let stats = capture(&manager, device, args)?;
    write_final_summary(&mut io::stdout().lock(), &stats)?;
    Ok(())
}

/// Uses the device named on the command line, or asks for one.
pub fn select_device<R: BufRead, W: Write>(
    requested: Option<&str>,
    devices: &[Device],
    input: &mut R,
    out: &mut W,
) -> Result<Device> {
    match requested {
        Some(name) => find_device(devices, name),
        None => prompt_device_selection(devices, input, out),
    }
}

fn capture(manager: &SessionManager, device: Device, args: &CliArgs) -> Result<DashboardStats> {
    let session = Arc::new(manager.start(device)?);

    let (tx, rx) = mpsc::sync_channel(args.channel_capacity.max(1));
    let poller = spawn_polling_loop(Arc::clone(&session), tx, args.idle_backoff())?;

    let running = Arc::new(AtomicBool::new(true));
    if let Err(e) = setup_ctrlc_handler(Arc::clone(&running)) {
        warn!(error = %e, "could not install termination handler");
    }

    let outcome = run_dashboard(
        &session.device().name,
        &rx,
        &running,
        &args.dashboard_config(),
    );

    session.stop();
    debug!(
        session_active = session.is_active(),
        engine_busy = manager.has_active_session(),
        "capture stopped"
    );
    drop(rx);
    thread::sleep(args.grace_period());

    // The poller only notices the hang-up on its next send; an idle one is left behind.
    if poller.is_finished() {
        match poller.join() {
            Ok(delivered) => info!(delivered, "polling loop joined"),
            Err(_) => warn!("polling loop panicked"),
        }
    } else {
        debug!("polling loop still idle at exit");
    }

    outcome
} // capture
