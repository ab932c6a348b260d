//! Persisting a [`ComparisonResult`] as CSV files in an output directory.

use crate::compare::{ComparisonResult, LineEntry};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header row of every output file.
pub const CSV_HEADER: [&str; 2] = ["Line", "Content"];

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The five files written for a comparison, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFile {
    OnlyInBefore,
    OnlyInAfter,
    InBoth,
    DuplicatesInBefore,
    DuplicatesInAfter,
}

impl ReportFile {
    pub const ALL: [ReportFile; 5] = [
        ReportFile::OnlyInBefore,
        ReportFile::OnlyInAfter,
        ReportFile::InBoth,
        ReportFile::DuplicatesInBefore,
        ReportFile::DuplicatesInAfter,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportFile::OnlyInBefore => "only_in_before.csv",
            ReportFile::OnlyInAfter => "only_in_after.csv",
            ReportFile::InBoth => "in_both.csv",
            ReportFile::DuplicatesInBefore => "duplicates_in_before.csv",
            ReportFile::DuplicatesInAfter => "duplicates_in_after.csv",
        }
    }

    /// The rows of `result` that belong in this file.
    pub fn rows(self, result: &ComparisonResult) -> &[LineEntry] {
        match self {
            ReportFile::OnlyInBefore => &result.only_in_first,
            ReportFile::OnlyInAfter => &result.only_in_second,
            ReportFile::InBoth => &result.in_both,
            ReportFile::DuplicatesInBefore => &result.duplicates_in_first,
            ReportFile::DuplicatesInAfter => &result.duplicates_in_second,
        }
    }
}

/// Result of writing one report file. Failures are per file.
#[derive(Debug)]
pub struct WriteOutcome {
    pub file: ReportFile,
    pub path: PathBuf,
    pub result: Result<(), ReportError>,
}

impl WriteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Create `dir` and any missing parents. Returns true if it did not exist before.
pub fn ensure_output_dir(dir: &Path) -> Result<bool, ReportError> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;
    log::info!("Created output directory {}", dir.display());
    Ok(true)
}

/// Write `rows` to `path` as CSV, replacing any existing file.
pub fn write_rows(path: &Path, rows: &[LineEntry]) -> Result<(), ReportError> {
    write_csv(path, rows).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_csv(path: &Path, rows: &[LineEntry]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([row.line.to_string().as_str(), row.content.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every report file of `result` into `dir`.
///
/// `dir` must already exist (see [`ensure_output_dir`]). Every file is
/// attempted even if an earlier one fails.
pub fn write_report(dir: &Path, result: &ComparisonResult) -> Vec<WriteOutcome> {
    ReportFile::ALL
        .iter()
        .map(|&file| {
            let path = dir.join(file.file_name());
            let rows = file.rows(result);
            let outcome = write_rows(&path, rows);
            match &outcome {
                Ok(()) => log::debug!("Wrote {} rows to {}", rows.len(), path.display()),
                Err(e) => log::warn!("{e}"),
            }
            WriteOutcome {
                file,
                path,
                result: outcome,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComparisonResult {
        ComparisonResult {
            only_in_first: vec![LineEntry::new(2, "x"), LineEntry::new(4, "x")],
            only_in_second: vec![LineEntry::new(3, "z")],
            in_both: vec![LineEntry::new(3, "y")],
            duplicates_in_first: vec![LineEntry::new(2, "x"), LineEntry::new(4, "x")],
            duplicates_in_second: vec![],
        }
    }

    #[test]
    fn test_file_names() {
        let names: Vec<&str> = ReportFile::ALL.iter().map(|f| f.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "only_in_before.csv",
                "only_in_after.csv",
                "in_both.csv",
                "duplicates_in_before.csv",
                "duplicates_in_after.csv",
            ]
        );
    }

    #[test]
    fn test_write_rows_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_rows(&path, &[LineEntry::new(2, "x"), LineEntry::new(10, "y")]).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Line,Content\r\n2,x\r\n10,y\r\n");
    }

    #[test]
    fn test_empty_rows_write_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_rows(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Line,Content\r\n");
    }

    #[test]
    fn test_content_is_quoted_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");
        write_rows(
            &path,
            &[
                LineEntry::new(2, "1,alpha"),
                LineEntry::new(3, "say \"hi\""),
                LineEntry::new(4, "plain"),
            ],
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Line,Content\r\n2,\"1,alpha\"\r\n3,\"say \"\"hi\"\"\"\r\n4,plain\r\n"
        );
    }

    #[test]
    fn test_write_rows_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new file\n").unwrap();
        write_rows(&path, &[LineEntry::new(2, "x")]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Line,Content\r\n2,x\r\n");
    }

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        assert!(ensure_output_dir(&nested).unwrap());
        assert!(nested.is_dir());
        assert!(!ensure_output_dir(&nested).unwrap());
    }

    #[test]
    fn test_ensure_output_dir_fails_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();
        let err = ensure_output_dir(&file.join("sub")).unwrap_err();
        assert!(matches!(err, ReportError::CreateDir { .. }));
    }

    #[test]
    fn test_write_report_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = write_report(dir.path(), &sample());
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(WriteOutcome::is_ok));

        let in_both = fs::read_to_string(dir.path().join("in_both.csv")).unwrap();
        assert_eq!(in_both, "Line,Content\r\n3,y\r\n");
        let dups_after = fs::read_to_string(dir.path().join("duplicates_in_after.csv")).unwrap();
        assert_eq!(dups_after, "Line,Content\r\n");
    }

    #[test]
    fn test_write_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of in_both.csv makes that single write fail.
        fs::create_dir(dir.path().join("in_both.csv")).unwrap();

        let outcomes = write_report(dir.path(), &sample());
        let failed: Vec<ReportFile> = outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.file)
            .collect();
        assert_eq!(failed, vec![ReportFile::InBoth]);

        assert!(dir.path().join("duplicates_in_before.csv").is_file());
        assert!(dir.path().join("duplicates_in_after.csv").is_file());
        assert!(dir.path().join("only_in_before.csv").is_file());
    }
}
