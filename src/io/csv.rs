use std::io::Write;

use crate::types::{Metric, ResultRow};

/// Streams the two-column CSV: one header, then one row per URL, each
/// flushed as soon as it is written. URLs are not quoted or escaped, so a
/// URL containing a comma produces an ambiguous row.
pub struct CsvEmitter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> CsvEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    pub fn header(&mut self, metric: Metric) -> std::io::Result<()> {
        writeln!(self.out, "URL,{}", metric.column())?;
        self.out.flush()
    }

    pub fn row(&mut self, row: &ResultRow<'_>) -> std::io::Result<()> {
        writeln!(self.out, "{},{}", row.url, row.value())?;
        self.rows += 1;
        self.out.flush()
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuditFailure;

    #[test]
    fn header_then_rows() {
        let mut csv = CsvEmitter::new(Vec::new());
        csv.header(Metric::AccessibilityScore).unwrap();
        csv.row(&ResultRow {
            url: "https://a.test",
            outcome: Ok(50),
        })
        .unwrap();
        csv.row(&ResultRow {
            url: "https://b.test",
            outcome: Err(AuditFailure::audit("boom")),
        })
        .unwrap();
        assert_eq!(csv.rows_written(), 2);

        let text = String::from_utf8(csv.into_inner()).unwrap();
        assert_eq!(
            text,
            "URL,Accessibility_Score\nhttps://a.test,50\nhttps://b.test,ERROR\n"
        );
    }

    #[test]
    fn urls_are_written_verbatim() {
        let mut csv = CsvEmitter::new(Vec::new());
        csv.row(&ResultRow {
            url: "https://a.test/?q=1,2",
            outcome: Ok(3),
        })
        .unwrap();
        let text = String::from_utf8(csv.into_inner()).unwrap();
        assert_eq!(text, "https://a.test/?q=1,2,3\n");
    }
}
