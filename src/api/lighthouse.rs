use tracing::{info, warn};

use crate::core::params::LighthouseParams;
use crate::error::Result;
use crate::io::browser::{BrowserSession, headless_config};
use crate::io::lighthouse::{check_available, run_audit};
use crate::types::{AuditOutcome, Metric};

use super::AuditSession;

/// Headless Chrome shared by every Lighthouse run in the batch.
pub struct LighthouseSession {
    browser: BrowserSession,
    port: u16,
    params: LighthouseParams,
}

impl LighthouseSession {
    pub async fn acquire(params: LighthouseParams) -> Result<Self> {
        let version = check_available(&params).await?;
        info!("Using Lighthouse {}", version);

        let browser = BrowserSession::launch(headless_config(params.chrome.as_deref())?).await?;
        let port = match browser.debugging_port() {
            Ok(port) => port,
            Err(e) => {
                if let Err(close) = browser.close().await {
                    warn!("Closing browser: {}", close);
                }
                return Err(e);
            }
        };

        Ok(Self {
            browser,
            port,
            params,
        })
    }
}

impl AuditSession for LighthouseSession {
    fn metric(&self) -> Metric {
        Metric::AccessibilityScore
    }

    async fn audit(&mut self, url: &str) -> AuditOutcome {
        let outcome = run_audit(&self.params, self.port, url).await;
        if let Err(failure) = &outcome {
            warn!("Lighthouse failed for {}: {}", url, failure);
        }
        outcome
    }

    async fn release(self) -> Result<()> {
        self.browser.close().await
    }
}
