use crate::core::params::WaveParams;
use crate::error::Result;
use crate::io::browser::{BrowserSession, extension_config};
use crate::io::extension::resolve_extension;
use crate::io::wave::audit_page;
use crate::types::{AuditOutcome, Metric};

use super::AuditSession;

/// Headed Chrome with the WAVE extension loaded. Each audit waits for an
/// operator to activate WAVE on the page.
pub struct WaveSession {
    browser: BrowserSession,
    params: WaveParams,
}

impl WaveSession {
    pub async fn acquire(params: WaveParams) -> Result<Self> {
        let extension = resolve_extension(&params.extension)?;
        let config = extension_config(&extension, params.chrome.as_deref())?;
        let browser = BrowserSession::launch(config).await?;
        Ok(Self { browser, params })
    }
}

impl AuditSession for WaveSession {
    fn metric(&self) -> Metric {
        Metric::WaveErrors
    }

    async fn audit(&mut self, url: &str) -> AuditOutcome {
        audit_page(self.browser.browser(), &self.params, url).await
    }

    async fn release(self) -> Result<()> {
        self.browser.close().await
    }
}
