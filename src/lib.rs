#![doc = r#"
a11y-batch: sequential accessibility audits over a URL list, as CSV.

Two runners share one driver:

- `lighthouse-scores` runs the Lighthouse CLI against one headless Chrome and
  reports the accessibility category as an integer percentage.
- `wave-scores` opens each URL in a visible Chrome with the WAVE extension
  loaded and reports the WAVE error count. WAVE cannot be activated
  programmatically, so an operator must activate it on every page; pages not
  activated in time are reported as `ERROR`.

Output is `URL,<Metric>` followed by exactly one `url,value` row per input
line, in input order. A failing URL yields a sentinel (`ERROR`, or
`PARSE_ERROR` when Lighthouse output is not JSON) and never stops the batch.
URLs are written unquoted, so a URL containing a comma produces an ambiguous
row.

Custom backends
---------------
Anything implementing [`api::AuditSession`] can be driven by [`run_batch`]:

```rust,no_run
use a11y_batch::{AuditOutcome, AuditSession, Metric, run_batch};

struct Fixed;

impl AuditSession for Fixed {
    fn metric(&self) -> Metric {
        Metric::AccessibilityScore
    }

    async fn audit(&mut self, _url: &str) -> AuditOutcome {
        Ok(100)
    }

    async fn release(self) -> a11y_batch::Result<()> {
        Ok(())
    }
}

# async fn demo() -> a11y_batch::Result<()> {
let urls = vec!["https://example.com".to_string()];
let report = run_batch(Fixed, &urls, std::io::stdout()).await?;
assert_eq!(report.scored, 1);
# Ok(())
# }
```

Error handling
--------------
Fatal conditions (unreadable or empty URL list, browser or Lighthouse not
available, WAVE extension not found, broken stdout) are [`Error`] values.
Per-URL failures are data: [`AuditOutcome`] is `Result<i64, AuditFailure>`.

Useful modules
--------------
- [`api`] — the `AuditSession` trait, `run_batch`, and the two sessions.
- [`core`] — URL list parsing, score normalization, run parameters.
- [`io`] — Chrome session, Lighthouse subprocess, WAVE scraping, CSV.
- [`cli`] — argument structs and entry flows used by the binaries.
"#]

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

pub use error::{Error, Result};
pub use types::{AuditFailure, AuditOutcome, FailureKind, Metric, ResultRow};

pub use api::{AuditSession, BatchReport, LighthouseSession, WaveSession, run_batch};
pub use crate::core::input::{load_urls, parse_url_list};
pub use crate::core::params::{ExtensionSource, LighthouseParams, ScreenEmulation, WaveParams};
pub use crate::core::score::normalize_fraction;
