//! Validated address maps and operand pairing.

use crate::{LayoutError, Region, RegionKind, Result};

/// Rule mapping a result slot to the two operand addresses it sums.
///
/// Addresses are relative to the start of the lowest operand region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Slot `i` reads `(i, i + offset)`.
    Offset(usize),
    /// Slot `i` reads `(2i, 2i + 1)`.
    Interleaved,
}

impl Pairing {
    /// Operand addresses for `slot`, or `None` on address overflow.
    #[must_use]
    pub const fn operands(self, base: usize, slot: usize) -> Option<(usize, usize)> {
        let (a, b) = match self {
            Self::Offset(offset) => match slot.checked_add(offset) {
                Some(b) => (slot, b),
                None => return None,
            },
            Self::Interleaved => match slot.checked_mul(2) {
                Some(a) => (a, a + 1),
                None => return None,
            },
        };
        match (base.checked_add(a), base.checked_add(b)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// Partition of a memory into named regions, plus the pairing rule.
///
/// Regions are disjoint and cover `[0, size)` exactly. Every result slot pairs
/// two addresses inside operand regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMap {
    size: usize,
    /// Sorted by start address.
    regions: Vec<(RegionKind, Region)>,
    results: Region,
    operand_base: usize,
    pairing: Pairing,
}

impl AddressMap {
    /// Validate and build an address map.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if regions are malformed, overlap, leave gaps,
    /// or if the pairing reaches outside the operand regions.
    pub fn new(
        size: usize,
        regions: impl IntoIterator<Item = (RegionKind, Region)>,
        pairing: Pairing,
    ) -> Result<Self> {
        let mut regions: Vec<_> = regions.into_iter().collect();

        for &(kind, region) in &regions {
            if region.start > region.end {
                return Err(LayoutError::Inverted { kind, region });
            }
            if region.end > size {
                return Err(LayoutError::OutOfBounds { kind, region, size });
            }
        }

        let mut kinds: Vec<RegionKind> = regions.iter().map(|&(kind, _)| kind).collect();
        kinds.sort_unstable();
        if let Some(pair) = kinds.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(LayoutError::Duplicate(pair[0]));
        }
        let has = |kind| kinds.contains(&kind);
        if !has(RegionKind::Results) {
            return Err(LayoutError::Missing(RegionKind::Results));
        }
        let interleaved = has(RegionKind::Operands);
        if interleaved && (has(RegionKind::OperandA) || has(RegionKind::OperandB)) {
            return Err(LayoutError::MixedOperands);
        }
        if !interleaved {
            for kind in [RegionKind::OperandA, RegionKind::OperandB] {
                if !has(kind) {
                    return Err(LayoutError::Missing(kind));
                }
            }
        }

        regions.sort_by_key(|&(kind, region)| (region.start, region.end, kind));
        let mut cursor = 0;
        let mut previous = None;
        // empty regions hold no addresses and cannot overlap or fill gaps
        for &(kind, region) in regions.iter().filter(|(_, region)| !region.is_empty()) {
            if let Some(first) = previous {
                if region.start < cursor {
                    return Err(LayoutError::Overlap {
                        first,
                        second: kind,
                    });
                }
            }
            if region.start > cursor {
                return Err(LayoutError::Gap(Region::new(cursor, region.start)));
            }
            cursor = region.end;
            previous = Some(kind);
        }
        if cursor < size {
            return Err(LayoutError::Gap(Region::new(cursor, size)));
        }

        let map = Self::from_sorted_parts(size, regions, pairing);
        for slot in 0..map.result_slots() {
            let (a, b) = map
                .result_slot_to_operand_addresses(slot)
                .ok_or(LayoutError::PairingOverflow { slot })?;
            for addr in [a, b] {
                if !map.kind_of(addr).is_some_and(RegionKind::is_operand) {
                    return Err(LayoutError::PairingOutsideOperands { slot, addr });
                }
            }
        }

        Ok(map)
    }

    /// Build from regions already known to be valid and sorted by start.
    pub(crate) fn from_sorted_parts(
        size: usize,
        regions: Vec<(RegionKind, Region)>,
        pairing: Pairing,
    ) -> Self {
        let results = regions
            .iter()
            .find(|(kind, _)| *kind == RegionKind::Results)
            .map_or(Region::new(size, size), |&(_, region)| region);
        let operand_base = regions
            .iter()
            .filter(|(kind, _)| kind.is_operand())
            .map(|(_, region)| region.start)
            .min()
            .unwrap_or(0);
        Self {
            size,
            regions,
            results,
            operand_base,
            pairing,
        }
    }

    /// Declared memory size in words.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// All regions, sorted by start address.
    #[must_use]
    pub fn regions(&self) -> &[(RegionKind, Region)] {
        &self.regions
    }

    /// Interval of the named region, if declared.
    #[must_use]
    pub fn region(&self, kind: RegionKind) -> Option<Region> {
        self.regions
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, region)| region)
    }

    /// Result region.
    #[must_use]
    pub const fn results(&self) -> Region {
        self.results
    }

    /// Operand regions in address order.
    pub fn operand_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions
            .iter()
            .filter(|(kind, _)| kind.is_operand())
            .map(|&(_, region)| region)
    }

    /// Region kind containing `addr`.
    #[must_use]
    pub fn kind_of(&self, addr: usize) -> Option<RegionKind> {
        self.regions
            .iter()
            .find(|(_, region)| region.contains(addr))
            .map(|&(kind, _)| kind)
    }

    /// Pairing rule.
    #[must_use]
    pub const fn pairing(&self) -> Pairing {
        self.pairing
    }

    /// Number of result slots.
    #[must_use]
    pub const fn result_slots(&self) -> usize {
        self.results.len()
    }

    /// Address of result slot `slot`.
    #[must_use]
    pub const fn result_address(&self, slot: usize) -> Option<usize> {
        if slot < self.result_slots() {
            Some(self.results.start + slot)
        } else {
            None
        }
    }

    /// Result slot stored at `addr`.
    #[must_use]
    pub const fn result_slot(&self, addr: usize) -> Option<usize> {
        if self.results.contains(addr) {
            Some(addr - self.results.start)
        } else {
            None
        }
    }

    /// Operand addresses summed into result slot `slot`.
    ///
    /// This is the pairing used both to generate expected results and to
    /// reconstruct operands when diagnosing a mismatch.
    #[must_use]
    pub const fn result_slot_to_operand_addresses(&self, slot: usize) -> Option<(usize, usize)> {
        if slot >= self.result_slots() {
            return None;
        }
        self.pairing.operands(self.operand_base, slot)
    }
}
