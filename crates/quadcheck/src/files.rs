//! Conventional file names shared by the generator, simulator, and verifier.

use std::path::{Path, PathBuf};

use quadcheck_mem::{BankedImage, UnknownPolicy};

pub const PRE_STATE_UPPER: &str = "memory_pre_state_upper.txt";
pub const PRE_STATE_LOWER: &str = "memory_pre_state_lower.txt";
pub const POST_STATE_UPPER: &str = "memory_post_state_upper.txt";
pub const POST_STATE_LOWER: &str = "memory_post_state_lower.txt";
pub const SIM_POST_STATE_UPPER: &str = "sim_memory_post_state_upper.txt";
pub const SIM_POST_STATE_LOWER: &str = "sim_memory_post_state_lower.txt";
pub const PRE_STATE_TRACE: &str = "memory_pre_state_dbg.txt";
pub const POST_STATE_TRACE: &str = "memory_post_state_dbg.txt";

/// Default comparator report file.
pub const MISMATCH_REPORT: &str = "mismatches.txt";

/// Paths of an upper/lower bank file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankPaths {
    pub upper: PathBuf,
    pub lower: PathBuf,
}

impl BankPaths {
    /// Read both banks.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing or malformed.
    pub fn read(&self, policy: UnknownPolicy) -> crate::Result<BankedImage> {
        Ok(BankedImage::read(&self.upper, &self.lower, policy)?)
    }

    /// Write both banks.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn write(&self, image: &BankedImage) -> crate::Result<()> {
        Ok(image.write(&self.upper, &self.lower)?)
    }
}

/// The image files of one test run, all in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFiles {
    dir: PathBuf,
}

impl StateFiles {
    /// Files under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn pair(&self, upper: &str, lower: &str) -> BankPaths {
        BankPaths {
            upper: self.dir.join(upper),
            lower: self.dir.join(lower),
        }
    }

    /// Generated pre-state (simulator input).
    #[must_use]
    pub fn pre_state(&self) -> BankPaths {
        self.pair(PRE_STATE_UPPER, PRE_STATE_LOWER)
    }

    /// Generated expected post-state.
    #[must_use]
    pub fn expected_post_state(&self) -> BankPaths {
        self.pair(POST_STATE_UPPER, POST_STATE_LOWER)
    }

    /// Simulator post-state.
    #[must_use]
    pub fn actual_post_state(&self) -> BankPaths {
        self.pair(SIM_POST_STATE_UPPER, SIM_POST_STATE_LOWER)
    }

    /// Combined binary+decimal trace of the pre-state.
    #[must_use]
    pub fn pre_state_trace(&self) -> PathBuf {
        self.dir.join(PRE_STATE_TRACE)
    }

    /// Combined binary+decimal trace of the expected post-state.
    #[must_use]
    pub fn post_state_trace(&self) -> PathBuf {
        self.dir.join(POST_STATE_TRACE)
    }
}
