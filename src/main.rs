mod capture;
mod cli;
mod error;
mod logging;
mod packet;
mod pipeline;
mod ui;

use std::process;

use clap::Parser;
use tracing::error;

use crate::cli::CliArgs;
use crate::error::Error;
use crate::logging::init_logging;
use crate::pipeline::runner::run;

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = init_logging(args.log_file.as_deref(), args.verbose) {
        eprintln!("[Aperture] Could not set up logging: {}", e);
        process::exit(1);
    }

    match run(&args) {
        Ok(()) => {}
        Err(Error::SelectionCancelled) => println!("Quitting"),
        Err(e) => {
            error!(error = %e, "aperture exited with an error");
            eprintln!("[Aperture] Error: {}", e);
            process::exit(1);
        }
    }
}
