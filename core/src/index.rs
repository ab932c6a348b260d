//! Line indexing: map each distinct line of a file to the line numbers it occurs on.
//!
//! The first line of every file is a header and is never indexed, whatever it
//! contains. Lines are stripped of surrounding whitespace and blank lines are
//! dropped. Line numbers are 1-based and count the header and blank lines, so
//! they point back at the original file.

use crate::config::TextEncoding;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of leading lines treated as a header.
pub const HEADER_LINES: usize = 1;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid {encoding} text", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },
}

/// Mapping from stripped line content to the ascending line numbers it occurs on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: HashMap<String, Vec<usize>>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `content` at `line`. Callers push lines in ascending order.
    fn push(&mut self, content: &str, line: usize) {
        match self.lines.get_mut(content) {
            Some(numbers) => numbers.push(line),
            None => {
                self.lines.insert(content.to_owned(), vec![line]);
            }
        }
    }

    /// Line numbers for `content`, in read order.
    pub fn get(&self, content: &str) -> Option<&[usize]> {
        self.lines.get(content).map(Vec::as_slice)
    }

    /// Earliest line number for `content`.
    pub fn first_line(&self, content: &str) -> Option<usize> {
        self.get(content).and_then(|numbers| numbers.first().copied())
    }

    pub fn contains(&self, content: &str) -> bool {
        self.lines.contains_key(content)
    }

    /// Distinct contents, in no particular order.
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    /// All entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.lines
            .iter()
            .map(|(content, numbers)| (content.as_str(), numbers.as_slice()))
    }

    /// Entries whose content occurs more than once.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries().filter(|(_, numbers)| numbers.len() > 1)
    }

    /// Number of distinct contents.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of indexed (non-header, non-blank) lines.
    pub fn total_lines(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Terminators are not included, and a trailing terminator does not produce
/// an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                let line = &rest[..pos];
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Whitespace for stripping: Unicode whitespace plus the ASCII information
/// separators U+001C..=U+001F.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Build an index from already-decoded text.
pub fn index_text(text: &str) -> LineIndex {
    let mut index = LineIndex::new();
    for (number, line) in split_lines(text).enumerate().skip(HEADER_LINES) {
        let content = line.trim_matches(is_strippable);
        if !content.is_empty() {
            index.push(content, number + 1);
        }
    }
    index
}

/// Read and decode `path`, then index it.
pub fn index_file(path: &Path, encoding: TextEncoding) -> Result<LineIndex, IndexError> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            IndexError::NotFound(path.to_path_buf())
        } else {
            IndexError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let text = encoding.decode(&bytes).ok_or_else(|| IndexError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.name(),
    })?;

    let index = index_text(&text);
    log::debug!(
        "Indexed {}: {} lines, {} distinct",
        path.display(),
        index.total_lines(),
        index.len()
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_header_is_skipped() {
        let index = index_text("x\nx\ny\n");
        assert_eq!(index.get("x"), Some(&[2][..]));
        assert_eq!(index.get("y"), Some(&[3][..]));
        assert_eq!(index.total_lines(), 2);
    }

    #[test]
    fn test_header_only() {
        assert!(index_text("Line,Content\n").is_empty());
        assert!(index_text("").is_empty());
    }

    #[test]
    fn test_blank_and_whitespace_lines_are_dropped() {
        let index = index_text("header\n\n   \n\t\na\n");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a"), Some(&[5][..]));
    }

    #[test]
    fn test_information_separators_are_whitespace() {
        let index = index_text("h\n\x1f\n\x1ca\n\x1d \x1e\n");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a"), Some(&[3][..]));
    }

    #[test]
    fn test_content_is_stripped() {
        let index = index_text("h\n  a \na\t\n");
        assert_eq!(index.get("a"), Some(&[2, 3][..]));
        assert!(!index.contains("  a "));
    }

    #[test]
    fn test_line_numbers_ascend_in_read_order() {
        let index = index_text("h\nb\na\nb\nc\nb\n");
        assert_eq!(index.get("b"), Some(&[2, 4, 6][..]));
        assert_eq!(index.first_line("b"), Some(2));
    }

    #[test]
    fn test_mixed_line_endings() {
        let index = index_text("h\r\na\r\nb\rc\n");
        assert_eq!(index.get("a"), Some(&[2][..]));
        assert_eq!(index.get("b"), Some(&[3][..]));
        assert_eq!(index.get("c"), Some(&[4][..]));
    }

    #[test]
    fn test_missing_trailing_newline() {
        let index = index_text("h\na\nb");
        assert_eq!(index.get("b"), Some(&[3][..]));
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<&str> = split_lines("a\n\nb\r\n").collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_duplicates() {
        let index = index_text("h\nx\ny\nx\n");
        let dups: Vec<_> = index.duplicates().collect();
        assert_eq!(dups, vec![("x", &[2, 4][..])]);
    }

    #[test]
    fn test_index_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = index_file(&missing, TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, IndexError::NotFound(ref p) if p == &missing));
    }

    #[test]
    fn test_index_file_reads_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}id,name\n1,alpha\n2,beta\n1,alpha\n").unwrap();
        let index = index_file(file.path(), TextEncoding::utf8()).unwrap();
        assert_eq!(index.get("1,alpha"), Some(&[2, 4][..]));
        assert_eq!(index.get("2,beta"), Some(&[3][..]));
    }

    #[test]
    fn test_index_file_rejects_malformed_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"header\nok\n\xff\xfe\n").unwrap();
        let err = index_file(file.path(), TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, IndexError::Decode { encoding: "UTF-8", .. }));
    }

    #[test]
    fn test_index_file_with_legacy_encoding() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // "h\ncafé\n" in windows-1252
        file.write_all(b"h\ncaf\xe9\n").unwrap();
        let encoding = TextEncoding::for_label("windows-1252").unwrap();
        let index = index_file(file.path(), encoding).unwrap();
        assert_eq!(index.get("café"), Some(&[2][..]));
    }

    #[test]
    fn test_index_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = index_file(dir.path(), TextEncoding::utf8()).unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
    }
}
