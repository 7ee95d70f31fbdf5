//! Chrome process lifecycle over CDP.
//!
//! A `BrowserSession` owns one launched Chrome and the task pumping its
//! CDP handler. It is created once per run and closed once, by value.
use std::path::Path;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let (browser, mut handler) = Browser::launch(config).await.map_err(Error::session)?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler: {}", e);
                }
            }
        });

        info!("Browser started at {}", browser.websocket_address());
        Ok(Self { browser, handler })
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Remote debugging port of the launched browser, for tools that attach
    /// by port rather than by websocket.
    pub fn debugging_port(&self) -> Result<u16> {
        let ws = self.browser.websocket_address();
        debugging_port(ws)
            .ok_or_else(|| Error::Session(format!("no debugging port in {}", ws)))
    }

    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            debug!("Waiting for browser exit: {}", e);
        }
        self.handler.abort();
        info!("Browser closed");
        closed.map(|_| ()).map_err(Error::session)
    }
}

/// Headless Chrome for the Lighthouse runner.
pub fn headless_config(chrome: Option<&Path>) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .arg("--no-first-run")
        .arg("--disable-gpu");
    if let Some(path) = chrome {
        builder = builder.chrome_executable(path);
    }
    builder.build().map_err(Error::session)
}

/// Headed Chrome with one unpacked extension loaded and everything else
/// disabled. Extensions do not run in headless mode.
pub fn extension_config(extension: &Path, chrome: Option<&Path>) -> Result<BrowserConfig> {
    let extension = extension.display();
    let mut builder = BrowserConfig::builder()
        .with_head()
        .viewport(None::<Viewport>)
        .disable_default_args()
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg(format!("--disable-extensions-except={}", extension))
        .arg(format!("--load-extension={}", extension));
    if let Some(path) = chrome {
        builder = builder.chrome_executable(path);
    }
    builder.build().map_err(Error::session)
}

/// Extract the port from a DevTools websocket URL such as
/// `ws://127.0.0.1:9222/devtools/browser/<id>`.
pub fn debugging_port(websocket: &str) -> Option<u16> {
    let rest = websocket
        .strip_prefix("ws://")
        .or_else(|| websocket.strip_prefix("wss://"))?;
    let authority = rest.split('/').next()?;
    let (_, port) = authority.rsplit_once(':')?;
    port.parse().ok()
}
