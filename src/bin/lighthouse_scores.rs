//! Lighthouse accessibility scores for a URL list.
//!
//! Usage: `lighthouse-scores [urls.txt] > lighthouse_scores.csv`

use std::process::ExitCode;

use a11y_batch::cli::{self, LighthouseArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = LighthouseArgs::parse();
    match cli::run_lighthouse(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
