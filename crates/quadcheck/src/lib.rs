//! quadcheck - verification harness for a banked 64-bit adder.
//!
//! Generates pre-state memory images and the post-state an adder should
//! produce, then checks a simulator's post-state against it, either line by
//! line or as 64-bit values with mismatch diagnosis.
//!
//! # Example
//!
//! ```ignore
//! use quadcheck::{Scenario, StateFiles, VerifyConfig, verify_files};
//!
//! let files = StateFiles::new(".");
//! let outcome = verify_files(&files, &Scenario::Split.address_map(), &VerifyConfig::default())?;
//! assert!(outcome.passed());
//! ```

// Re-export from sub-crates
pub use quadcheck_layout::{AddressMap, LayoutError, Pairing, Region, RegionKind, Scenario};
pub use quadcheck_mem::{
    BankedImage, CodecError, ImageError, MemoryImage, NormalizedLine, UnknownPolicy, WordState,
    decode, encode, encode_word, join64, lines_equivalent, normalize, split64,
};

mod diagnose;
mod files;
mod generate;
mod linediff;
mod report;
mod verify;

pub use diagnose::*;
pub use files::*;
pub use generate::*;
pub use linediff::*;
pub use report::*;
pub use verify::*;

use std::path::PathBuf;

use thiserror::Error;

/// Harness errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Check whether an input file was missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Image(ImageError::NotFound { .. }))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
