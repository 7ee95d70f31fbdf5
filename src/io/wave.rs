//! WAVE sidebar scraping.
//!
//! WAVE cannot be triggered programmatically: after each page loads, an
//! operator has to activate the extension (toolbar icon or Ctrl+Shift+U).
//! The scraper waits, bounded, for the sidebar that activation injects and
//! then reads the error counter from the extension's frame. Pages nobody
//! activates in time are reported as failures.
use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::Page;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::params::WaveParams;
use crate::core::score::error_count;
use crate::types::{AuditFailure, AuditOutcome};

pub const SIDEBAR_SELECTOR: &str = "#wave_sidebar_container";

const EXTENSION_SCHEME: &str = "chrome-extension://";

const COUNTER_SCRIPT: &str = r#"(() => {
    const el = document.documentElement.querySelector('#error');
    return el ? { found: true, text: el.innerText } : { found: false, text: null };
})()"#;

#[derive(Debug, Deserialize)]
struct Counter {
    found: bool,
    text: Option<String>,
}

/// Audit `url` in a fresh tab. The tab is closed whatever the outcome.
pub async fn audit_page(browser: &Browser, params: &WaveParams, url: &str) -> AuditOutcome {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| AuditFailure::audit(format!("cannot open tab: {}", e)))?;

    let outcome = scrape(&page, params, url).await;

    if let Err(e) = page.close().await {
        debug!("Closing tab for {}: {}", url, e);
    }
    outcome
}

async fn scrape(page: &Page, params: &WaveParams, url: &str) -> AuditOutcome {
    match tokio::time::timeout(params.navigation_timeout, page.goto(url)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => return Err(AuditFailure::audit(format!("navigation failed: {}", e))),
        Err(_) => {
            return Err(AuditFailure::audit(format!(
                "navigation timed out after {:?}",
                params.navigation_timeout
            )));
        }
    }

    warn!(
        "Activate WAVE on {} (toolbar icon or Ctrl+Shift+U) within {:?}",
        url, params.activation_timeout
    );
    wait_for_selector(
        page,
        SIDEBAR_SELECTOR,
        params.activation_timeout,
        params.poll_interval,
    )
    .await?;

    // Counters render after the sidebar frame is attached.
    tokio::time::sleep(params.settle_delay).await;

    let counter = read_counter(page).await?;
    Ok(error_count(counter.as_deref()))
}

async fn wait_for_selector(
    page: &Page,
    selector: &str,
    within: Duration,
    poll: Duration,
) -> std::result::Result<(), AuditFailure> {
    let appeared = poll_until(within, poll, move || async move {
        page.find_element(selector).await.is_ok()
    })
    .await;

    if appeared {
        Ok(())
    } else {
        Err(AuditFailure::audit(format!(
            "{} did not appear within {:?}",
            selector, within
        )))
    }
}

/// Re-run `ready` every `poll` until it reports true. Gives up after
/// `within`, including while a check is still in flight.
pub async fn poll_until<F, Fut>(within: Duration, poll: Duration, mut ready: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    tokio::time::timeout(within, async {
        loop {
            if ready().await {
                break;
            }
            tokio::time::sleep(poll).await;
        }
    })
    .await
    .is_ok()
}

/// Text of the `#error` counter inside the extension frame; `None` when
/// the frame has no such element.
async fn read_counter(page: &Page) -> std::result::Result<Option<String>, AuditFailure> {
    let frames = page.frames().await.map_err(AuditFailure::audit)?;

    for frame in frames {
        let Some(frame_url) = page.frame_url(frame.clone()).await.map_err(AuditFailure::audit)?
        else {
            continue;
        };
        if !frame_url.starts_with(EXTENSION_SCHEME) {
            continue;
        }
        let Some(context) = page
            .frame_execution_context(frame)
            .await
            .map_err(AuditFailure::audit)?
        else {
            continue;
        };

        let evaluate = EvaluateParams::builder()
            .expression(COUNTER_SCRIPT)
            .context_id(context)
            .return_by_value(true)
            .build()
            .map_err(AuditFailure::audit)?;
        let counter: Counter = page
            .evaluate_expression(evaluate)
            .await
            .map_err(AuditFailure::audit)?
            .into_value()
            .map_err(AuditFailure::audit)?;

        debug!("WAVE counter in {}: {:?}", frame_url, counter);
        return Ok(counter.found.then(|| counter.text.unwrap_or_default()));
    }

    Err(AuditFailure::audit("WAVE sidebar frame not found"))
}
