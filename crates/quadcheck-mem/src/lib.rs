//! Memory model for the 64-bit adder verification harness.
//!
//! The device under test sees memory as two parallel banks of 32-bit words.
//! Each 64-bit value lives at one address: its upper half in the upper bank and
//! its lower half in the lower bank. Banks are persisted as text files holding
//! one 32-digit binary word per line.
//!
//! # Example
//!
//! ```ignore
//! use quadcheck_mem::{BankedImage, UnknownPolicy};
//!
//! let image = BankedImage::read("upper.txt", "lower.txt", UnknownPolicy::Reject)?;
//! let value = image.quad(768);
//! ```

mod banked;
mod codec;
mod equiv;
mod image;
mod word;

pub use banked::*;
pub use codec::*;
pub use equiv::*;
pub use image::*;
pub use word::*;

use std::path::PathBuf;

use thiserror::Error;

/// Word codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("value {0:#x} does not fit in a 32-bit word")]
    OutOfRange(u64),
    #[error("empty word")]
    Empty,
    #[error("invalid digit {ch:?} at column {column}")]
    InvalidDigit { ch: char, column: usize },
    #[error("word has {0} digits, at most 32 allowed")]
    TooWide(usize),
}

/// Memory image file errors.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {source}", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        #[source]
        source: CodecError,
    },
}

impl ImageError {
    /// Wrap an I/O error, mapping `NotFound` to its own variant.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
