use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT: &str = "urls.txt";

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115 Safari/537.36";

/// Device emulation applied by Lighthouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenEmulation {
    pub mobile: bool,
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub disabled: bool,
}

impl Default for ScreenEmulation {
    fn default() -> Self {
        Self {
            mobile: false,
            width: 1350,
            height: 940,
            device_scale_factor: 1.0,
            disabled: false,
        }
    }
}

/// Parameters for the Lighthouse score runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LighthouseParams {
    /// Lighthouse CLI executable, resolved through PATH when bare
    pub binary: PathBuf,
    /// Chrome executable; None lets the launcher detect one
    pub chrome: Option<PathBuf>,
    /// Page-load bound handed to Lighthouse
    pub navigation_timeout: Duration,
    /// Hard bound on a single Lighthouse run; the subprocess is killed on expiry
    pub audit_timeout: Duration,
    pub screen: ScreenEmulation,
    pub user_agent: String,
    pub categories: Vec<String>,
}

impl Default for LighthouseParams {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("lighthouse"),
            chrome: None,
            navigation_timeout: Duration::from_secs(30),
            audit_timeout: Duration::from_secs(120),
            screen: ScreenEmulation::default(),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            categories: vec!["accessibility".to_string()],
        }
    }
}

/// Where the unpacked WAVE extension comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionSource {
    /// An unpacked extension directory given directly
    Path(PathBuf),
    /// An executable that prints the extension directory on stdout
    Locator(PathBuf),
    /// Search the usual Chrome/Chromium profile directories
    Discover,
}

/// Parameters for the WAVE error-count runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveParams {
    pub extension: ExtensionSource,
    pub chrome: Option<PathBuf>,
    pub navigation_timeout: Duration,
    /// How long to wait for the operator to activate WAVE on a page
    pub activation_timeout: Duration,
    /// Pause after the sidebar appears, before reading counters
    pub settle_delay: Duration,
    pub poll_interval: Duration,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            extension: ExtensionSource::Discover,
            chrome: None,
            navigation_timeout: Duration::from_secs(30),
            activation_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(1),
            poll_interval: Duration::from_millis(250),
        }
    }
}
