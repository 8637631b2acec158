//! Text-level line diff with a persistent mismatch report.
//!
//! Lines are paired by position; the shorter file is padded with empty
//! lines. Pairs are compared with the raw-line equivalence, so blank and
//! all-marker lines match each other.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quadcheck_mem::{lines_equivalent, read_lines};
use tracing::{debug, info};

use crate::{Error, Result};

/// Width of the report header separator.
const SEPARATOR_WIDTH: usize = 70;

/// One differing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMismatch {
    /// 1-based line number.
    pub line: usize,
    /// Trimmed expected text.
    pub expected: String,
    /// Trimmed actual text.
    pub actual: String,
}

impl fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mismatch at line {}:", self.line)?;
        writeln!(f, "  Expected: {:?}", self.expected)?;
        write!(f, "  Sim output: {:?}", self.actual)
    }
}

/// Compare two sequences of raw lines.
pub fn diff_lines<E, A>(expected: &[E], actual: &[A]) -> Vec<LineMismatch>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let len = expected.len().max(actual.len());
    (0..len)
        .filter_map(|index| {
            let exp = expected.get(index).map_or("", AsRef::as_ref);
            let act = actual.get(index).map_or("", AsRef::as_ref);
            (!lines_equivalent(exp, act)).then(|| LineMismatch {
                line: index + 1,
                expected: exp.trim().to_owned(),
                actual: act.trim().to_owned(),
            })
        })
        .collect()
}

/// What [`LineDiff::sync_report`] did to the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    /// Report (re)written with the current mismatches.
    Written,
    /// Stale report from an earlier run deleted.
    Removed,
    /// Nothing to write and no stale report present.
    Absent,
}

/// Result of comparing two files line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    pub expected_path: PathBuf,
    pub actual_path: PathBuf,
    /// Number of line pairs compared.
    pub lines: usize,
    pub mismatches: Vec<LineMismatch>,
}

impl LineDiff {
    /// Check that every line pair matched.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Full report file text.
    #[must_use]
    pub fn report_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Comparison Results\n");
        out.push_str(&format!("Expected file: {}\n", self.expected_path.display()));
        out.push_str(&format!("Simulation file: {}\n", self.actual_path.display()));
        out.push_str(&format!("Total mismatches: {}\n", self.mismatches.len()));
        out.push_str(&"=".repeat(SEPARATOR_WIDTH));
        out.push_str("\n\n");
        for mismatch in &self.mismatches {
            out.push_str(&format!("{mismatch}\n\n"));
        }
        out
    }

    /// Bring the report file in line with this result.
    ///
    /// Failures rewrite the whole report; a pass deletes any stale report, so
    /// repeated passing runs never leave one behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written or removed.
    pub fn sync_report(&self, path: &Path) -> Result<ReportAction> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        if self.passed() {
            return match fs::remove_file(path) {
                Ok(()) => {
                    debug!(path = %path.display(), "removed stale report");
                    Ok(ReportAction::Removed)
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(ReportAction::Absent),
                Err(e) => Err(io_error(e)),
            };
        }

        fs::write(path, self.report_text()).map_err(io_error)?;
        info!(
            path = %path.display(),
            mismatches = self.mismatches.len(),
            "wrote mismatch report"
        );
        Ok(ReportAction::Written)
    }
}

/// Compare two files line by line.
///
/// # Errors
///
/// Returns an error if either file cannot be read.
pub fn compare_files(expected: impl AsRef<Path>, actual: impl AsRef<Path>) -> Result<LineDiff> {
    let (expected, actual) = (expected.as_ref(), actual.as_ref());
    let expected_lines = read_lines(expected)?;
    let actual_lines = read_lines(actual)?;
    let mismatches = diff_lines(&expected_lines, &actual_lines);
    debug!(
        expected = %expected.display(),
        actual = %actual.display(),
        mismatches = mismatches.len(),
        "compared files"
    );
    Ok(LineDiff {
        expected_path: expected.to_path_buf(),
        actual_path: actual.to_path_buf(),
        lines: expected_lines.len().max(actual_lines.len()),
        mismatches,
    })
}
