//! Named half-open address intervals.

use std::fmt;
use std::ops::Range;

/// Half-open address interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    /// Create a region.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of addresses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check for an empty region.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether `addr` lies in the region.
    #[must_use]
    pub const fn contains(&self, addr: usize) -> bool {
        addr >= self.start && addr < self.end
    }

    /// Addresses as a range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check whether two regions share an address.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

impl From<Range<usize>> for Region {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Role of a region in the test memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKind {
    /// First operands, one per result slot.
    OperandA,
    /// Second operands, one per result slot.
    OperandB,
    /// Both operands interleaved as consecutive address pairs.
    Operands,
    /// Unused space.
    Padding,
    /// Addition results.
    Results,
}

impl RegionKind {
    /// Check whether the region holds operand inputs.
    #[must_use]
    pub const fn is_operand(self) -> bool {
        matches!(self, Self::OperandA | Self::OperandB | Self::Operands)
    }

    /// Short name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OperandA => "operand-a",
            Self::OperandB => "operand-b",
            Self::Operands => "operands",
            Self::Padding => "padding",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_basics() {
        let region = Region::new(768, 1024);
        assert_eq!(region.len(), 256);
        assert!(region.contains(768));
        assert!(region.contains(1023));
        assert!(!region.contains(1024));
        assert_eq!(region.to_string(), "[768, 1024)");
        assert_eq!(Region::from(0..4), Region::new(0, 4));
    }

    #[test]
    fn test_overlap() {
        let a = Region::new(0, 256);
        assert!(a.overlaps(&Region::new(255, 300)));
        assert!(!a.overlaps(&Region::new(256, 300)));
        assert!(!a.overlaps(&Region::new(10, 10)));
    }

    #[test]
    fn test_operand_kinds() {
        assert!(RegionKind::OperandA.is_operand());
        assert!(RegionKind::Operands.is_operand());
        assert!(!RegionKind::Padding.is_operand());
        assert!(!RegionKind::Results.is_operand());
    }
}
