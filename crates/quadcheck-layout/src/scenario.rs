//! Built-in memory layouts.
//!
//! Each scenario fixes its own layout and pairing; they are not
//! interchangeable. The scenario that generated a set of images must also be
//! used to verify it.

use std::fmt;
use std::str::FromStr;

use crate::{AddressMap, Pairing, Region, RegionKind};

/// Built-in test memory layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scenario {
    /// 1024 words: A at `[0,256)`, B at `[256,512)`, padding, results at
    /// `[768,1024)`. Slot `i` adds `i` and `i + 256`.
    #[default]
    Split,
    /// 512 words: operand pairs interleaved in `[0,256)`, padding, results at
    /// `[384,512)`. Slot `i` adds `2i` and `2i + 1`.
    Interleaved,
}

impl Scenario {
    /// All built-in scenarios.
    pub const ALL: [Self; 2] = [Self::Split, Self::Interleaved];

    /// Scenario name as used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Interleaved => "interleaved",
        }
    }

    /// Address map for this scenario.
    #[must_use]
    pub fn address_map(self) -> AddressMap {
        match self {
            Self::Split => AddressMap::from_sorted_parts(
                1024,
                vec![
                    (RegionKind::OperandA, Region::new(0, 256)),
                    (RegionKind::OperandB, Region::new(256, 512)),
                    (RegionKind::Padding, Region::new(512, 768)),
                    (RegionKind::Results, Region::new(768, 1024)),
                ],
                Pairing::Offset(256),
            ),
            Self::Interleaved => AddressMap::from_sorted_parts(
                512,
                vec![
                    (RegionKind::Operands, Region::new(0, 256)),
                    (RegionKind::Padding, Region::new(256, 384)),
                    (RegionKind::Results, Region::new(384, 512)),
                ],
                Pairing::Interleaved,
            ),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "split" | "x" => Ok(Self::Split),
            "interleaved" | "y" => Ok(Self::Interleaved),
            _ => Err(format!("unknown scenario: {s}")),
        }
    }
}
