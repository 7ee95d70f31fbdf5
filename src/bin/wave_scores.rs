//! WAVE error counts for a URL list. Runs a visible browser; WAVE has to be
//! activated by hand on each page.
//!
//! Usage: `wave-scores [urls.txt] > wave_errors.csv`

use std::process::ExitCode;

use a11y_batch::cli::{self, WaveArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = WaveArgs::parse();
    match cli::run_wave(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
