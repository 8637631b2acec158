//! Address maps for 64-bit adder test memories.
//!
//! An [`AddressMap`] partitions a memory into operand, padding, and result
//! regions and fixes which operand addresses feed each result slot. The same
//! map drives both result generation and mismatch diagnosis.

mod map;
mod region;
mod scenario;

pub use map::*;
pub use region::*;
pub use scenario::*;

use thiserror::Error;

/// Address map validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{kind} region {region} is inverted")]
    Inverted { kind: RegionKind, region: Region },
    #[error("{kind} region {region} extends past memory size {size}")]
    OutOfBounds {
        kind: RegionKind,
        region: Region,
        size: usize,
    },
    #[error("{first} and {second} regions overlap")]
    Overlap {
        first: RegionKind,
        second: RegionKind,
    },
    #[error("addresses {0} are not covered by any region")]
    Gap(Region),
    #[error("{0} region declared more than once")]
    Duplicate(RegionKind),
    #[error("no {0} region declared")]
    Missing(RegionKind),
    #[error("operand layout mixes interleaved and split operand regions")]
    MixedOperands,
    #[error("result slot {slot} pairs address {addr}, which is not an operand address")]
    PairingOutsideOperands { slot: usize, addr: usize },
    #[error("result slot {slot} pairs an address past the end of memory")]
    PairingOverflow { slot: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
