//! URL list loading.
//!
//! The list is read once, split on any line-ending style, trimmed, and
//! stripped of blank lines. Order and duplicates are kept as written.
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Split raw text into an ordered list of non-empty, trimmed lines.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the URL list at `path`. Unreadable files and lists with no usable
/// lines are both fatal.
pub fn load_urls(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let urls = parse_url_list(&content);
    if urls.is_empty() {
        return Err(Error::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    debug!("Loaded {} URLs from {:?}", urls.len(), path);
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(parse_url_list("a\n\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn any_line_ending_and_whitespace() {
        let urls = parse_url_list("  https://a.test \r\nhttps://b.test\r\t\n\rhttps://c.test");
        assert_eq!(urls, vec!["https://a.test", "https://b.test", "https://c.test"]);
    }

    #[test]
    fn duplicates_and_order_preserved() {
        let urls = parse_url_list("z\na\nz\n");
        assert_eq!(urls, vec!["z", "a", "z"]);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "https://a.test\n\nhttps://b.test\n").unwrap();
        let urls = load_urls(file.path()).unwrap();
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn whitespace_only_file_is_empty_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, " \n\t\r\n").unwrap();
        match load_urls(file.path()) {
            Err(Error::EmptyInput { path }) => assert_eq!(path, file.path()),
            other => panic!("expected EmptyInput, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("urls.txt");
        let err = load_urls(&missing).unwrap_err();
        assert!(matches!(err, Error::ReadInput { .. }));
        assert!(err.to_string().starts_with("Failed to read file:"));
    }
}
