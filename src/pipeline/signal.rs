use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::info;

/// Sets up a Ctrl+C / termination handler that clears the shared `running` flag.
///
/// # Arguments
///
/// * `running_flag` - Flag polled by the dashboard; `false` means quit
///
/// # Errors
///
/// Fails if a handler was already installed for this process.
pub fn setup_ctrlc_handler(running_flag: Arc<AtomicBool>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        info!("termination signal received");
        running_flag.store(false, Ordering::SeqCst);
    })
}
