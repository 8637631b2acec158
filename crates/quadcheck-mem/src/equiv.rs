//! Raw-line equivalence for text-level comparison.
//!
//! Blank lines and all-marker lines both mean "uninitialized" and compare
//! equal to each other. Anything else compares by trimmed text, so an all-zero
//! word is a concrete value and not uninitialized.

use crate::is_unknown_marker;

/// Equivalence class of one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedLine<'a> {
    /// Blank, or nothing but unknown markers.
    Uninitialized,
    /// Trimmed text.
    Text(&'a str),
}

impl NormalizedLine<'_> {
    /// Check for the uninitialized class.
    #[must_use]
    pub const fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }
}

/// Classify a raw line.
#[must_use]
pub fn normalize(line: &str) -> NormalizedLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_unknown_marker(trimmed) {
        NormalizedLine::Uninitialized
    } else {
        NormalizedLine::Text(trimmed)
    }
}

/// Check whether two raw lines are equivalent.
#[must_use]
pub fn lines_equivalent(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn test_blank_and_marker_are_equivalent() {
        let marker = "x".repeat(32);
        assert!(lines_equivalent("", &marker));
        assert!(lines_equivalent("   \t", &marker));
        assert!(lines_equivalent(&"X".repeat(32), "  "));
        assert!(normalize(&marker).is_uninitialized());
    }

    #[test]
    fn test_text_compares_trimmed() {
        assert!(lines_equivalent(" 0101 ", "0101\r"));
        assert!(!lines_equivalent("0101", "0100"));
    }

    #[test]
    fn test_zero_word_is_concrete() {
        let zero = "0".repeat(32);
        assert_eq!(normalize(&zero), NormalizedLine::Text(&zero));
        assert!(!lines_equivalent(&zero, ""));
        assert!(!lines_equivalent(&zero, &"x".repeat(32)));
    }

    #[test]
    fn test_decoder_is_stricter_than_normalizer() {
        let marker = "x".repeat(32);
        assert!(decode(&marker).is_err());
        assert!(normalize(&marker).is_uninitialized());
    }
}
