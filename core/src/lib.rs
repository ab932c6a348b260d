//! linecmp - compare two line-oriented text files by line content.
//!
//! This crate provides:
//! - Per-file line indexing, skipping a header line and blank lines (`index`)
//! - Classification into only-in-first, only-in-second, common and
//!   duplicated lines (`compare`)
//! - CSV persistence of the classification (`report`)
//! - Input encoding selection (`config`)
//!
//! Feature flags:
//! - `cli`: Command-line interface (enabled by default)

pub mod compare;
pub mod config;
pub mod error;
pub mod index;
pub mod report;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

pub use compare::{compare, ComparisonResult, Counts, LineEntry};
pub use config::TextEncoding;
pub use error::AppError;
pub use index::{index_file, LineIndex};

use std::path::Path;

/// Index `first`, then `second`, and compare them.
///
/// Fails on the first file that cannot be indexed; nothing is compared in
/// that case.
pub fn compare_files(
    first: &Path,
    second: &Path,
    encoding: TextEncoding,
) -> Result<ComparisonResult, AppError> {
    let first_index = index_file(first, encoding)?;
    let second_index = index_file(second, encoding)?;
    Ok(compare(&first_index, &second_index))
}
