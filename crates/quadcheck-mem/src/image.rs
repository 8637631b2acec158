//! Single-bank memory image files.
//!
//! Format: UTF-8 text, one word per line, address 0 first. Blank lines and
//! lines starting with `//` carry no address.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::{ImageError, Result, UnknownPolicy, WordState};

/// Prefix marking a comment line in an image file.
pub const COMMENT_PREFIX: &str = "//";

/// One bank of memory: a word per address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryImage {
    words: Vec<WordState>,
}

impl MemoryImage {
    /// Create an image from word states.
    #[must_use]
    pub const fn new(words: Vec<WordState>) -> Self {
        Self { words }
    }

    /// Create an all-zero image.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self::new(vec![WordState::ZERO; len])
    }

    /// Number of addresses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Check for an empty image.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `addr`, if in range.
    #[must_use]
    pub fn get(&self, addr: usize) -> Option<WordState> {
        self.words.get(addr).copied()
    }

    /// All words in address order.
    #[must_use]
    pub fn words(&self) -> &[WordState] {
        &self.words
    }

    /// Parse image text. `path` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Format`] with the 1-based line number of the
    /// first record that does not decode.
    pub fn parse(text: &str, path: &Path, policy: UnknownPolicy) -> Result<Self> {
        let mut words = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let word = WordState::parse(trimmed, policy).map_err(|source| ImageError::Format {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
            words.push(word);
        }
        Ok(Self::new(words))
    }

    /// Read an image file, rejecting unknown-marker words.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a record does not decode.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_with(path, UnknownPolicy::Reject)
    }

    /// Read an image file under the given unknown-word policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a record does not decode.
    pub fn read_with(path: impl AsRef<Path>, policy: UnknownPolicy) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ImageError::io(path, e))?;
        let image = Self::parse(&text, path, policy)?;
        debug!(path = %path.display(), words = image.len(), "read memory image");
        Ok(image)
    }

    /// Render the image as file text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 33);
        for word in &self.words {
            out.push_str(&word.to_string());
            out.push('\n');
        }
        out
    }

    /// Write the image, one word per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::File::create(path).map_err(|e| ImageError::io(path, e))?;
        file.write_all(self.to_text().as_bytes())
            .map_err(|e| ImageError::io(path, e))?;
        debug!(path = %path.display(), words = self.len(), "wrote memory image");
        Ok(())
    }
}

impl FromIterator<WordState> for MemoryImage {
    fn from_iter<I: IntoIterator<Item = WordState>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<u32> for MemoryImage {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        iter.into_iter().map(WordState::Known).collect()
    }
}

/// Read every raw line of a text file, blank lines included.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ImageError::io(path, e))?;
    Ok(text.lines().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodecError, encode_word};

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let text = format!(
            "// header\n{}\n\n   \n{}\n// trailing\n",
            encode_word(1),
            "0".repeat(32)
        );
        let image = MemoryImage::parse(&text, Path::new("mem.txt"), UnknownPolicy::Reject).unwrap();
        assert_eq!(image.words(), &[WordState::Known(1), WordState::ZERO]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = format!("{}\n\n{}2\n", encode_word(1), "0".repeat(31));
        let err = MemoryImage::parse(&text, Path::new("mem.txt"), UnknownPolicy::Reject).unwrap_err();
        match err {
            ImageError::Format { path, line, source } => {
                assert_eq!(path, Path::new("mem.txt"));
                assert_eq!(line, 3);
                assert_eq!(source, CodecError::InvalidDigit { ch: '2', column: 32 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_words_occupy_an_address() {
        let text = format!("{}\n{}\n", "x".repeat(32), encode_word(7));
        let image = MemoryImage::parse(&text, Path::new("mem.txt"), UnknownPolicy::Tolerate).unwrap();
        assert_eq!(image.len(), 2);
        assert_eq!(image.get(0), Some(WordState::Unknown));
        assert_eq!(image.get(1), Some(WordState::Known(7)));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        let image: MemoryImage = [0u32, 1, u32::MAX].into_iter().collect();
        image.write(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("1\n"));
        assert!(!text.ends_with("\n\n"));

        assert_eq!(MemoryImage::read(&path).unwrap(), image);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MemoryImage::read(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ImageError::NotFound { .. }));
    }

    #[test]
    fn test_read_lines_keeps_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.txt");
        fs::write(&path, "a\n\nb\n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["a", "", "b"]);
    }
}
