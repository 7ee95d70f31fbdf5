//! Resolution of the unpacked WAVE extension directory.
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::core::params::ExtensionSource;
use crate::error::{Error, Result};

/// Chrome Web Store id of the WAVE Evaluation Tool.
pub const WAVE_EXTENSION_ID: &str = "jbbplnpkjmmeebjpijfedlgcdilocofh";

const PROFILE_EXTENSION_DIRS: &[&str] = &[
    ".config/google-chrome/Default/Extensions",
    ".config/chromium/Default/Extensions",
    "Library/Application Support/Google/Chrome/Default/Extensions",
    "Library/Application Support/Chromium/Default/Extensions",
    "AppData/Local/Google/Chrome/User Data/Default/Extensions",
];

pub fn resolve_extension(source: &ExtensionSource) -> Result<PathBuf> {
    let path = match source {
        ExtensionSource::Path(path) => path.clone(),
        ExtensionSource::Locator(script) => run_locator(script)?,
        ExtensionSource::Discover => {
            let home = std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(PathBuf::from)
                .ok_or_else(|| Error::Extension("home directory is not set".to_string()))?;
            let roots: Vec<PathBuf> = PROFILE_EXTENSION_DIRS
                .iter()
                .map(|d| home.join(d))
                .collect();
            discover_in(&roots)?
        }
    };

    if !path.join("manifest.json").is_file() {
        return Err(Error::Extension(format!(
            "{} is not an unpacked extension (no manifest.json)",
            path.display()
        )));
    }
    info!("Using WAVE extension at {:?}", path);
    Ok(path)
}

/// Run a locator executable directly (no shell) and take its trimmed stdout
/// as the extension directory.
fn run_locator(script: &Path) -> Result<PathBuf> {
    let output = Command::new(script)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::Extension(format!("cannot run {}: {}", script.display(), e)))?;

    if !output.status.success() {
        return Err(Error::Extension(format!(
            "{} exited with {}",
            script.display(),
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout.trim();
    if path.is_empty() {
        return Err(Error::Extension(format!(
            "{} printed no path",
            script.display()
        )));
    }
    Ok(PathBuf::from(path))
}

/// Find the newest installed WAVE version under any of `roots`.
pub fn discover_in(roots: &[PathBuf]) -> Result<PathBuf> {
    let mut best: Option<(Vec<u64>, PathBuf)> = None;

    for root in roots {
        let dir = root.join(WAVE_EXTENSION_ID);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            debug!("No WAVE install under {:?}", root);
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let key = version_key(&entry.file_name().to_string_lossy());
            if best.as_ref().is_none_or(|(k, _)| key > *k) {
                best = Some((key, path));
            }
        }
    }

    best.map(|(_, path)| path).ok_or_else(|| {
        Error::Extension(format!(
            "extension {} not found in any Chrome profile; pass --extension",
            WAVE_EXTENSION_ID
        ))
    })
}

/// Numeric ordering key for directory names like `3.2.7.1_0`.
fn version_key(name: &str) -> Vec<u64> {
    name.split(['.', '_'])
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}
