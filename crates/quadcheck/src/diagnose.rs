//! Root-cause hints for result mismatches.

use std::fmt;

/// Likely cause of a wrong result. Best effort, not exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    /// Result is zero or unknown: the slot was probably never written.
    Unwritten,
    /// Result equals operand A: only the first operand was copied.
    CopiedAOnly,
    /// Result equals operand B: only the second operand was copied.
    CopiedBOnly,
    /// Some other wrong value.
    ValueMismatch,
}

impl Diagnosis {
    /// Classify an actual result against the reconstructed operands.
    ///
    /// `actual` is `None` when the simulator reported the word as unknown.
    #[must_use]
    pub fn classify(actual: Option<u64>, operand_a: Option<u64>, operand_b: Option<u64>) -> Self {
        match actual {
            None | Some(0) => Self::Unwritten,
            Some(value) if Some(value) == operand_a => Self::CopiedAOnly,
            Some(value) if Some(value) == operand_b => Self::CopiedBOnly,
            Some(_) => Self::ValueMismatch,
        }
    }

    /// Short tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Unwritten => "unwritten",
            Self::CopiedAOnly => "copied-A-only",
            Self::CopiedBOnly => "copied-B-only",
            Self::ValueMismatch => "value-mismatch",
        }
    }

    /// One-line hint for console reports.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Unwritten => "result is zero - memory not written?",
            Self::CopiedAOnly => "result equals operand A - only copied?",
            Self::CopiedBOnly => "result equals operand B - only copied?",
            Self::ValueMismatch => "result differs from A + B",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_order() {
        assert_eq!(Diagnosis::classify(Some(0), Some(0), Some(1)), Diagnosis::Unwritten);
        assert_eq!(Diagnosis::classify(None, Some(1), Some(2)), Diagnosis::Unwritten);
        assert_eq!(Diagnosis::classify(Some(1), Some(1), Some(2)), Diagnosis::CopiedAOnly);
        assert_eq!(Diagnosis::classify(Some(2), Some(1), Some(2)), Diagnosis::CopiedBOnly);
        assert_eq!(Diagnosis::classify(Some(5), Some(5), Some(5)), Diagnosis::CopiedAOnly);
        assert_eq!(Diagnosis::classify(Some(9), Some(1), Some(2)), Diagnosis::ValueMismatch);
    }

    #[test]
    fn test_missing_operands() {
        assert_eq!(Diagnosis::classify(Some(1), None, None), Diagnosis::ValueMismatch);
        assert_eq!(Diagnosis::classify(Some(2), None, Some(2)), Diagnosis::CopiedBOnly);
    }

    #[test]
    fn test_tags() {
        assert_eq!(Diagnosis::CopiedAOnly.to_string(), "copied-A-only");
        assert_eq!(Diagnosis::ValueMismatch.tag(), "value-mismatch");
    }
}
