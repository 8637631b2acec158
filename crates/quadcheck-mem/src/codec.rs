//! Conversion between integers and their binary-text word form.

use crate::CodecError;

/// Width of one memory word in bits (and digits in its text form).
pub const WORD_BITS: usize = 32;

/// Mask for the low 32 bits of a 64-bit value.
pub const WORD_MASK: u64 = 0xFFFF_FFFF;

/// Encode a value as a 32-digit binary string, MSB first.
///
/// # Errors
///
/// Returns [`CodecError::OutOfRange`] if `value` does not fit in 32 bits.
pub fn encode(value: u64) -> Result<String, CodecError> {
    let word = u32::try_from(value).map_err(|_| CodecError::OutOfRange(value))?;
    Ok(encode_word(word))
}

/// Encode a 32-bit word. Zero-padded on the left, never truncated.
#[must_use]
pub fn encode_word(word: u32) -> String {
    format!("{word:032b}")
}

/// Decode a binary word, ignoring surrounding whitespace.
///
/// Accepts 1 to 32 digits. Unknown-marker characters are rejected here;
/// callers that tolerate them must classify the line first.
///
/// # Errors
///
/// Returns an error if the trimmed text is empty, too wide, or contains
/// anything other than `0` and `1`.
pub fn decode(line: &str) -> Result<u32, CodecError> {
    let digits = line.trim();
    if digits.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut value: u32 = 0;
    let mut width = 0usize;
    for (column, ch) in digits.chars().enumerate() {
        let bit = match ch {
            '0' => 0,
            '1' => 1,
            _ => {
                return Err(CodecError::InvalidDigit {
                    ch,
                    column: column + 1,
                });
            }
        };
        width += 1;
        if width > WORD_BITS {
            return Err(CodecError::TooWide(digits.chars().count()));
        }
        value = (value << 1) | bit;
    }

    Ok(value)
}

/// Split a 64-bit value into its (upper, lower) words.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn split64(value: u64) -> (u32, u32) {
    ((value >> 32) as u32, (value & WORD_MASK) as u32)
}

/// Join (upper, lower) words into a 64-bit value.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn join64(upper: u32, lower: u32) -> u64 {
    ((upper as u64) << 32) | lower as u64
}

/// Combined 64-digit binary form followed by the decimal value.
///
/// Used for human-readable trace files, e.g. `000...011 (3)`.
#[must_use]
pub fn trace_line(value: u64) -> String {
    let (upper, lower) = split64(value);
    format!("{}{} ({value})", encode_word(upper), encode_word(lower))
}
