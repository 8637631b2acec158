//! Three-valued word state.
//!
//! Simulators report don't-care memory with a marker character in every bit
//! position. The text layer collapses that to a whole-word `Unknown` state.

use std::fmt;

use crate::{CodecError, WORD_BITS, decode, encode_word, join64};

/// Marker character simulators use for uninitialized bits.
pub const UNKNOWN_MARKER: char = 'x';

/// Check whether `text` (already trimmed) is a non-empty run of unknown markers.
#[must_use]
pub fn is_unknown_marker(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.eq_ignore_ascii_case(&UNKNOWN_MARKER))
}

/// How unknown-marker words are treated when decoding an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Unknown words are a format error.
    #[default]
    Reject,
    /// Unknown words load as [`WordState::Unknown`].
    Tolerate,
}

impl UnknownPolicy {
    /// Policy from a `tolerate_unknown` flag.
    #[must_use]
    pub const fn from_tolerate(tolerate_unknown: bool) -> Self {
        if tolerate_unknown {
            Self::Tolerate
        } else {
            Self::Reject
        }
    }
}

/// State of one 32-bit memory word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordState {
    /// A concrete value.
    Known(u32),
    /// Every bit reported as don't-care.
    Unknown,
}

impl WordState {
    /// The all-zero word.
    pub const ZERO: Self = Self::Known(0);

    /// Parse one record under the given policy.
    ///
    /// # Errors
    ///
    /// Returns a codec error if the record is not a binary word, or if it is an
    /// unknown marker and the policy rejects those.
    pub fn parse(line: &str, policy: UnknownPolicy) -> Result<Self, CodecError> {
        let text = line.trim();
        if policy == UnknownPolicy::Tolerate && is_unknown_marker(text) {
            if text.len() > WORD_BITS {
                return Err(CodecError::TooWide(text.len()));
            }
            return Ok(Self::Unknown);
        }
        decode(text).map(Self::Known)
    }

    /// Concrete value, if known.
    #[must_use]
    pub const fn known(self) -> Option<u32> {
        match self {
            Self::Known(word) => Some(word),
            Self::Unknown => None,
        }
    }

    /// Check for the unknown state.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Join an (upper, lower) pair into a 64-bit value; unknown if either half is.
    #[must_use]
    pub const fn join(upper: Self, lower: Self) -> Option<u64> {
        match (upper, lower) {
            (Self::Known(upper), Self::Known(lower)) => Some(join64(upper, lower)),
            _ => None,
        }
    }
}

impl From<u32> for WordState {
    fn from(word: u32) -> Self {
        Self::Known(word)
    }
}

impl fmt::Display for WordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(word) => f.write_str(&encode_word(*word)),
            Self::Unknown => {
                for _ in 0..WORD_BITS {
                    write!(f, "{UNKNOWN_MARKER}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_detection() {
        assert!(is_unknown_marker("xxxx"));
        assert!(is_unknown_marker(&"X".repeat(32)));
        assert!(is_unknown_marker("xXxX"));
        assert!(!is_unknown_marker(""));
        assert!(!is_unknown_marker("x0x"));
    }

    #[test]
    fn test_parse_policies() {
        let marker = "x".repeat(32);
        assert!(WordState::parse(&marker, UnknownPolicy::Reject).is_err());
        assert_eq!(
            WordState::parse(&marker, UnknownPolicy::Tolerate),
            Ok(WordState::Unknown)
        );
        assert_eq!(
            WordState::parse(" 11 ", UnknownPolicy::Reject),
            Ok(WordState::Known(3))
        );
        assert_eq!(
            WordState::parse(&"x".repeat(40), UnknownPolicy::Tolerate),
            Err(CodecError::TooWide(40))
        );
    }

    #[test]
    fn test_join() {
        assert_eq!(
            WordState::join(WordState::Known(1), WordState::Known(2)),
            Some(0x1_0000_0002)
        );
        assert_eq!(WordState::join(WordState::Unknown, WordState::ZERO), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WordState::Unknown.to_string(), "x".repeat(32));
        assert_eq!(WordState::Known(1).to_string(), format!("{}1", "0".repeat(31)));
    }
}
