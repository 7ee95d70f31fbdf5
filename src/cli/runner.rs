use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::api::{BatchReport, LighthouseSession, WaveSession, run_batch};
use crate::core::input::load_urls;
use crate::error::Result;

use super::args::{LighthouseArgs, WaveArgs};

/// Logs go to stderr; stdout carries only CSV.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn run_lighthouse(args: LighthouseArgs) -> Result<BatchReport> {
    init_logging(args.log);

    let urls = load_urls(&args.input)?;
    let params = args.params()?;
    debug!(
        "Lighthouse parameters: {}",
        serde_json::to_string(&params).unwrap_or_default()
    );

    let session = LighthouseSession::acquire(params).await?;
    run_batch(session, &urls, std::io::stdout()).await
}

pub async fn run_wave(args: WaveArgs) -> Result<BatchReport> {
    init_logging(args.log);

    let urls = load_urls(&args.input)?;
    let params = args.params()?;
    debug!(
        "WAVE parameters: {}",
        serde_json::to_string(&params).unwrap_or_default()
    );

    let session = WaveSession::acquire(params).await?;
    run_batch(session, &urls, std::io::stdout()).await
}
