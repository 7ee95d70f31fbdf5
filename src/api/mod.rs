//! Backend-agnostic batch driver.
//!
//! An `AuditSession` is one acquired audit resource (a browser plus
//! whatever drives the audit). `run_batch` takes ownership of it, audits
//! each URL strictly in order, streams one CSV row per URL, and releases
//! the session exactly once on every exit path.
use std::io::Write;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::io::csv::CsvEmitter;
use crate::types::{AuditOutcome, FailureKind, Metric, ResultRow};

pub mod lighthouse;
pub mod wave;

pub use lighthouse::LighthouseSession;
pub use wave::WaveSession;

/// One long-lived audit resource.
///
/// `audit` must not fail the batch: every failure is reported in the
/// returned outcome.
#[allow(async_fn_in_trait)]
pub trait AuditSession {
    /// The value column this session produces.
    fn metric(&self) -> Metric;

    async fn audit(&mut self, url: &str) -> AuditOutcome;

    /// Tear the session down. Called once, after the last audit.
    async fn release(self) -> Result<()>
    where
        Self: Sized;
}

/// Batch report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub scored: usize,
    pub errors: usize,
    pub parse_errors: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.scored + self.errors + self.parse_errors
    }

    fn record(&mut self, outcome: &AuditOutcome) {
        match outcome {
            Ok(_) => self.scored += 1,
            Err(failure) => match failure.kind {
                FailureKind::Audit => self.errors += 1,
                FailureKind::Parse => self.parse_errors += 1,
            },
        }
    }
}

/// Audit `urls` in order with `session`, writing CSV to `out`.
///
/// Only output-stream failures are returned as errors; the session is
/// released before they propagate.
pub async fn run_batch<S, W>(mut session: S, urls: &[String], out: W) -> Result<BatchReport>
where
    S: AuditSession,
    W: Write,
{
    let outcome = audit_all(&mut session, urls, out).await;

    if let Err(e) = session.release().await {
        warn!("Releasing audit session: {}", e);
    }
    outcome
}

async fn audit_all<S, W>(session: &mut S, urls: &[String], out: W) -> Result<BatchReport>
where
    S: AuditSession,
    W: Write,
{
    let mut csv = CsvEmitter::new(out);
    csv.header(session.metric())?;

    let mut report = BatchReport::default();
    for (i, url) in urls.iter().enumerate() {
        debug!("[{}/{}] Auditing {}", i + 1, urls.len(), url);
        let outcome = session.audit(url).await;
        if let Err(failure) = &outcome {
            debug!("{} -> {}", url, failure);
        }
        report.record(&outcome);
        csv.row(&ResultRow {
            url: url.as_str(),
            outcome,
        })?;
    }

    info!("Batch complete! {} rows written", csv.rows_written());
    info!("Scored: {}", report.scored);
    info!("Errors: {}", report.errors);
    info!("Parse errors: {}", report.parse_errors);
    Ok(report)
}
