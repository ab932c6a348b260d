//! Classification of two line indexes into only-in-first, only-in-second,
//! common and duplicated lines.
//!
//! Contents present in exactly one file are expanded to every line they occur
//! on. Contents present in both files are reported once, at their earliest
//! line in the first file. Duplicates are computed per file and are expanded.

use crate::index::LineIndex;
use serde::Serialize;
use std::collections::BTreeSet;

/// A single output row: a line number and the stripped content found there.
///
/// Ordering is by line number, then content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineEntry {
    pub line: usize,
    pub content: String,
}

impl LineEntry {
    pub fn new(line: usize, content: impl Into<String>) -> Self {
        Self {
            line,
            content: content.into(),
        }
    }
}

/// Partition of the distinct contents of two indexes.
///
/// Each list is sorted lexicographically. The three lists are disjoint and
/// together cover every content of either index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPartition<'a> {
    pub only_first: Vec<&'a str>,
    pub only_second: Vec<&'a str>,
    pub both: Vec<&'a str>,
}

/// Partition the contents of `first` and `second`.
pub fn partition<'a>(first: &'a LineIndex, second: &'a LineIndex) -> ContentPartition<'a> {
    let first_keys: BTreeSet<&str> = first.contents().collect();
    let second_keys: BTreeSet<&str> = second.contents().collect();

    ContentPartition {
        only_first: first_keys.difference(&second_keys).copied().collect(),
        only_second: second_keys.difference(&first_keys).copied().collect(),
        both: first_keys.intersection(&second_keys).copied().collect(),
    }
}

/// The five classified row lists, each sorted by line number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub only_in_first: Vec<LineEntry>,
    pub only_in_second: Vec<LineEntry>,
    pub in_both: Vec<LineEntry>,
    pub duplicates_in_first: Vec<LineEntry>,
    pub duplicates_in_second: Vec<LineEntry>,
}

/// Summary counts as shown to the user.
///
/// Duplicate counts are distinct duplicated contents, the only-in counts are
/// expanded rows, and `in_both` is the number of distinct common contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub duplicates_in_first: usize,
    pub duplicates_in_second: usize,
    pub only_in_first: usize,
    pub only_in_second: usize,
    pub in_both: usize,
}

impl ComparisonResult {
    pub fn counts(&self) -> Counts {
        Counts {
            duplicates_in_first: distinct_contents(&self.duplicates_in_first),
            duplicates_in_second: distinct_contents(&self.duplicates_in_second),
            only_in_first: self.only_in_first.len(),
            only_in_second: self.only_in_second.len(),
            in_both: self.in_both.len(),
        }
    }
}

fn distinct_contents(entries: &[LineEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.content.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// One row per occurrence of each of `contents` in `index`.
fn expand(index: &LineIndex, contents: &[&str]) -> Vec<LineEntry> {
    let mut rows: Vec<LineEntry> = contents
        .iter()
        .flat_map(|content| {
            index
                .get(content)
                .unwrap_or_default()
                .iter()
                .map(move |&line| LineEntry::new(line, *content))
        })
        .collect();
    rows.sort();
    rows
}

/// One row per occurrence of every content that occurs more than once.
fn duplicate_rows(index: &LineIndex) -> Vec<LineEntry> {
    let mut rows: Vec<LineEntry> = index
        .duplicates()
        .flat_map(|(content, lines)| lines.iter().map(move |&line| LineEntry::new(line, content)))
        .collect();
    rows.sort();
    rows
}

/// Compare two indexes.
///
/// `first` decides the representative line of common contents, so swapping
/// the arguments is not symmetric for `in_both`.
pub fn compare(first: &LineIndex, second: &LineIndex) -> ComparisonResult {
    let parts = partition(first, second);

    let mut in_both: Vec<LineEntry> = parts
        .both
        .iter()
        .filter_map(|content| {
            first
                .first_line(content)
                .map(|line| LineEntry::new(line, *content))
        })
        .collect();
    in_both.sort();

    ComparisonResult {
        only_in_first: expand(first, &parts.only_first),
        only_in_second: expand(second, &parts.only_second),
        in_both,
        duplicates_in_first: duplicate_rows(first),
        duplicates_in_second: duplicate_rows(second),
    }
}
