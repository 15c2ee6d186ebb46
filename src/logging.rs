//! Diagnostics setup
//!
//! The dashboard owns the terminal, so diagnostics never go to stdout or
//! stderr. They are appended to `--log-file` when one is given and dropped
//! otherwise. `RUST_LOG` overrides the `-v` level.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "aperture=warn",
        1 => "aperture=info",
        2 => "aperture=debug",
        _ => "aperture=trace",
    }
}

pub fn init_logging(log_file: Option<&Path>, verbosity: u8) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_thread_names(true);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(io::sink).try_init(),
    };

    installed.map_err(io::Error::other)
}
