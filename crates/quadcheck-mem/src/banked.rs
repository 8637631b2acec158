//! Upper/lower bank pairs viewed as 64-bit memory.

use std::path::Path;

use crate::{MemoryImage, Result, UnknownPolicy, WordState, split64, trace_line};

/// Matched upper and lower banks sharing one address space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BankedImage {
    upper: MemoryImage,
    lower: MemoryImage,
}

impl BankedImage {
    /// Pair two banks. Their lengths may differ; see [`Self::len`].
    #[must_use]
    pub const fn new(upper: MemoryImage, lower: MemoryImage) -> Self {
        Self { upper, lower }
    }

    /// Build both banks from 64-bit values, address 0 first.
    pub fn from_quads(values: impl IntoIterator<Item = u64>) -> Self {
        let (upper, lower): (Vec<u32>, Vec<u32>) = values.into_iter().map(split64).unzip();
        Self::new(upper.into_iter().collect(), lower.into_iter().collect())
    }

    /// Upper-half bank.
    #[must_use]
    pub const fn upper(&self) -> &MemoryImage {
        &self.upper
    }

    /// Lower-half bank.
    #[must_use]
    pub const fn lower(&self) -> &MemoryImage {
        &self.lower
    }

    /// Number of addresses present in both banks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.upper.len().min(self.lower.len())
    }

    /// Check whether no address is present in both banks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper and lower words at `addr`, if both banks reach it.
    #[must_use]
    pub fn word_pair(&self, addr: usize) -> Option<(WordState, WordState)> {
        Some((self.upper.get(addr)?, self.lower.get(addr)?))
    }

    /// Known 64-bit value at `addr`.
    ///
    /// `None` if either bank is too short or either half is unknown.
    #[must_use]
    pub fn quad(&self, addr: usize) -> Option<u64> {
        let (upper, lower) = self.word_pair(addr)?;
        WordState::join(upper, lower)
    }

    /// Per-address 64-bit values; unknown halves give `None`.
    #[must_use]
    pub fn quads(&self) -> Vec<Option<u64>> {
        (0..self.len()).map(|addr| self.quad(addr)).collect()
    }

    /// Read both banks.
    ///
    /// # Errors
    ///
    /// Returns the first read or format error, upper bank first.
    pub fn read(
        upper: impl AsRef<Path>,
        lower: impl AsRef<Path>,
        policy: UnknownPolicy,
    ) -> Result<Self> {
        Ok(Self::new(
            MemoryImage::read_with(upper, policy)?,
            MemoryImage::read_with(lower, policy)?,
        ))
    }

    /// Write both banks.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn write(&self, upper: impl AsRef<Path>, lower: impl AsRef<Path>) -> Result<()> {
        self.upper.write(upper)?;
        self.lower.write(lower)
    }

    /// Human-readable trace: 64 binary digits and the decimal value per address.
    #[must_use]
    pub fn trace_text(&self) -> String {
        let mut out = String::new();
        for addr in 0..self.len() {
            match self.quad(addr) {
                Some(value) => out.push_str(&trace_line(value)),
                None => {
                    if let Some((upper, lower)) = self.word_pair(addr) {
                        out.push_str(&format!("{upper}{lower} (x)"));
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
