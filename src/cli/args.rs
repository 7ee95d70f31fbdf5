use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::params::{DEFAULT_INPUT, ExtensionSource, LighthouseParams, WaveParams};
use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "lighthouse-scores",
    version,
    about = "Lighthouse accessibility score for each URL in a list, as CSV"
)]
pub struct LighthouseArgs {
    /// File with one URL per line
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Lighthouse CLI executable
    #[arg(long, default_value = "lighthouse")]
    pub lighthouse: PathBuf,

    /// Chrome/Chromium executable (detected when omitted)
    #[arg(long)]
    pub chrome: Option<PathBuf>,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub nav_timeout: u64,

    /// Timeout for a whole Lighthouse run in seconds
    #[arg(long, default_value_t = 120)]
    pub audit_timeout: u64,

    /// Enable debug logging on stderr
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl LighthouseArgs {
    pub fn params(&self) -> Result<LighthouseParams> {
        Ok(LighthouseParams {
            binary: self.lighthouse.clone(),
            chrome: self.chrome.clone(),
            navigation_timeout: seconds("--nav-timeout", self.nav_timeout)?,
            audit_timeout: seconds("--audit-timeout", self.audit_timeout)?,
            ..LighthouseParams::default()
        })
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "wave-scores",
    version,
    about = "WAVE error count for each URL in a list, as CSV",
    long_about = "WAVE error count for each URL in a list, as CSV.\n\n\
        WAVE must be activated by hand on every page (toolbar icon or Ctrl+Shift+U); \
        pages not activated within --activation-timeout are reported as ERROR."
)]
pub struct WaveArgs {
    /// File with one URL per line
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Unpacked WAVE extension directory
    #[arg(long, conflicts_with = "extension_locator")]
    pub extension: Option<PathBuf>,

    /// Executable that prints the unpacked WAVE extension directory
    #[arg(long)]
    pub extension_locator: Option<PathBuf>,

    /// Chrome/Chromium executable (detected when omitted)
    #[arg(long)]
    pub chrome: Option<PathBuf>,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub nav_timeout: u64,

    /// Seconds to wait for WAVE to be activated on each page
    #[arg(long, default_value_t = 10)]
    pub activation_timeout: u64,

    /// Delay in milliseconds between the sidebar appearing and reading it
    #[arg(long, default_value_t = 1000)]
    pub settle_ms: u64,

    /// Enable debug logging on stderr
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl WaveArgs {
    pub fn params(&self) -> Result<WaveParams> {
        let extension = match (&self.extension, &self.extension_locator) {
            (Some(path), _) => ExtensionSource::Path(path.clone()),
            (None, Some(script)) => ExtensionSource::Locator(script.clone()),
            (None, None) => ExtensionSource::Discover,
        };

        Ok(WaveParams {
            extension,
            chrome: self.chrome.clone(),
            navigation_timeout: seconds("--nav-timeout", self.nav_timeout)?,
            activation_timeout: seconds("--activation-timeout", self.activation_timeout)?,
            settle_delay: Duration::from_millis(self.settle_ms),
            ..WaveParams::default()
        })
    }
}

/// Timeouts must be finite and non-zero.
fn seconds(arg: &'static str, value: u64) -> Result<Duration> {
    if value == 0 {
        return Err(Error::InvalidArgument {
            arg,
            value: value.to_string(),
        });
    }
    Ok(Duration::from_secs(value))
}
