//! Lighthouse CLI invocation and report parsing.
//!
//! Each audit is one `lighthouse` subprocess attached to the session's
//! Chrome by port. The URL is passed as its own argument, never through a
//! shell.
use std::ffi::OsString;
use std::process::Stdio;

use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::core::params::LighthouseParams;
use crate::core::score::normalize_fraction;
use crate::error::{Error, Result};
use crate::types::{AuditFailure, AuditOutcome};

/// Arguments following the URL for one run against Chrome on `port`.
pub fn audit_args(params: &LighthouseParams, port: u16) -> Vec<String> {
    let screen = &params.screen;
    vec![
        format!("--port={}", port),
        "--output=json".to_string(),
        "--output-path=stdout".to_string(),
        "--quiet".to_string(),
        format!("--only-categories={}", params.categories.join(",")),
        "--form-factor=desktop".to_string(),
        format!("--screenEmulation.mobile={}", screen.mobile),
        format!("--screenEmulation.width={}", screen.width),
        format!("--screenEmulation.height={}", screen.height),
        format!(
            "--screenEmulation.deviceScaleFactor={}",
            screen.device_scale_factor
        ),
        format!("--screenEmulation.disabled={}", screen.disabled),
        format!("--emulatedUserAgent={}", params.user_agent),
        format!(
            "--max-wait-for-load={}",
            params.navigation_timeout.as_millis()
        ),
    ]
}

/// Full argv (after the program name) for auditing `url`.
pub fn command_line(params: &LighthouseParams, port: u16, url: &str) -> Vec<OsString> {
    std::iter::once(OsString::from(url))
        .chain(audit_args(params, port).into_iter().map(OsString::from))
        .collect()
}

/// Confirm the Lighthouse binary can be executed at all.
pub async fn check_available(params: &LighthouseParams) -> Result<String> {
    let output = Command::new(&params.binary)
        .arg("--version")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| Error::Session(format!("cannot run {}: {}", params.binary.display(), e)))?;

    if !output.status.success() {
        return Err(Error::Session(format!(
            "{} --version exited with {}",
            params.binary.display(),
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run one audit and reduce it to a score or a tagged failure.
pub async fn run_audit(params: &LighthouseParams, port: u16, url: &str) -> AuditOutcome {
    let child = Command::new(&params.binary)
        .args(command_line(params, port, url))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(params.audit_timeout, child).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(AuditFailure::audit(format!(
                "failed to run lighthouse: {}",
                e
            )));
        }
        Err(_) => {
            return Err(AuditFailure::audit(format!(
                "lighthouse timed out after {:?}",
                params.audit_timeout
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let last = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("");
        return Err(AuditFailure::audit(format!(
            "lighthouse exited with {}: {}",
            output.status,
            last.trim()
        )));
    }

    debug!("Lighthouse report for {}: {} bytes", url, output.stdout.len());
    accessibility_score(&output.stdout)
}

/// Extract the accessibility category score from a JSON report.
/// Malformed JSON is a parse failure; a report without a numeric score is
/// an audit failure.
pub fn accessibility_score(report: &[u8]) -> AuditOutcome {
    let report: Value = serde_json::from_slice(report).map_err(AuditFailure::parse)?;

    let score = report
        .pointer("/categories/accessibility/score")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            let reason = report
                .pointer("/runtimeError/message")
                .and_then(Value::as_str)
                .unwrap_or("report has no accessibility score");
            AuditFailure::audit(reason)
        })?;

    normalize_fraction(score)
        .ok_or_else(|| AuditFailure::audit(format!("score {} outside 0..=1", score)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FailureKind;
    use std::time::Duration;

    #[test]
    fn score_from_report() {
        let report = br#"{"categories":{"accessibility":{"id":"accessibility","score":0.926}}}"#;
        assert_eq!(accessibility_score(report), Ok(93));
    }

    #[test]
    fn non_json_is_parse_error() {
        let err = accessibility_score(b"Runtime error encountered").unwrap_err();
        assert_eq!(err.kind, FailureKind::Parse);
    }

    #[test]
    fn null_score_is_audit_error() {
        let report = br#"{
            "runtimeError": {"code": "ERRORED_DOCUMENT_REQUEST", "message": "Lighthouse was unable to reliably load the page"},
            "categories": {"accessibility": {"score": null}}
        }"#;
        let err = accessibility_score(report).unwrap_err();
        assert_eq!(err.kind, FailureKind::Audit);
        assert!(err.reason.contains("unable to reliably load"));
    }

    #[test]
    fn missing_category_is_audit_error() {
        let err = accessibility_score(br#"{"categories":{}}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::Audit);
    }

    #[test]
    fn url_is_a_single_argument() {
        let params = LighthouseParams::default();
        let url = "https://a.test/?x=1;rm -rf ~ && echo $(id)";
        let argv = command_line(&params, 9222, url);
        assert_eq!(argv[0], OsString::from(url));
        assert!(argv.contains(&OsString::from("--port=9222")));
    }

    #[test]
    fn desktop_emulation_args() {
        let mut params = LighthouseParams::default();
        params.navigation_timeout = Duration::from_secs(30);
        let args = audit_args(&params, 1);
        assert!(args.contains(&"--only-categories=accessibility".to_string()));
        assert!(args.contains(&"--screenEmulation.width=1350".to_string()));
        assert!(args.contains(&"--screenEmulation.height=940".to_string()));
        assert!(args.contains(&"--screenEmulation.deviceScaleFactor=1".to_string()));
        assert!(args.contains(&"--screenEmulation.mobile=false".to_string()));
        assert!(args.contains(&"--max-wait-for-load=30000".to_string()));
        assert!(
            args.iter()
                .any(|a| a.starts_with("--emulatedUserAgent=Mozilla/5.0 (X11; Linux x86_64)"))
        );
    }

    #[tokio::test]
    async fn missing_binary_is_audit_error() {
        let params = LighthouseParams {
            binary: "/nonexistent/lighthouse".into(),
            ..LighthouseParams::default()
        };
        let err = run_audit(&params, 9222, "https://a.test").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Audit);
        assert!(check_available(&params).await.is_err());
    }

    /// Write an executable standing in for the Lighthouse CLI.
    #[cfg(unix)]
    fn fake_lighthouse(dir: &std::path::Path, body: &str) -> LighthouseParams {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("lighthouse");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        LighthouseParams {
            binary: path,
            audit_timeout: Duration::from_secs(10),
            ..LighthouseParams::default()
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn report_on_stdout_is_scored() {
        let dir = tempfile::tempdir().unwrap();
        let params = fake_lighthouse(
            dir.path(),
            r#"echo '{"categories":{"accessibility":{"score":0.926}}}'"#,
        );
        assert_eq!(run_audit(&params, 9222, "https://a.test").await, Ok(93));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_json_stdout_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let params = fake_lighthouse(dir.path(), "echo 'not json'");
        let err = run_audit(&params, 9222, "https://a.test").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Parse);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_audit_error() {
        let dir = tempfile::tempdir().unwrap();
        let params = fake_lighthouse(dir.path(), "echo 'Chrome prevented page load' >&2; exit 1");
        let err = run_audit(&params, 9222, "https://a.test").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Audit);
        assert!(err.reason.contains("Chrome prevented page load"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_run_is_killed_at_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let mut params = fake_lighthouse(dir.path(), "exec sleep 30");
        params.audit_timeout = Duration::from_secs(1);

        let started = std::time::Instant::now();
        let err = run_audit(&params, 9222, "https://a.test").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Audit);
        assert!(err.reason.contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn url_reaches_lighthouse_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://a.test/?q=1;echo pwned&&$(id)|`id`";
        let params = fake_lighthouse(
            dir.path(),
            &format!(
                r#"[ "$1" = '{}' ] && [ "$2" = '--port=9222' ] || exit 3
echo '{{"categories":{{"accessibility":{{"score":1}}}}}}'"#,
                url
            ),
        );
        assert_eq!(run_audit(&params, 9222, url).await, Ok(100));
    }
}
