//! PmaTable owns the fixed physical memory map, resolving a query address to
//! the attribute set of the region covering it. Membership is tested against
//! every region independently; the selection step afterwards keys on the shape
//! of the resulting match vector, so region order never decides a lookup.
use ahash::AHashMap;
use smallvec::SmallVec;

use crate::{
    attrs::PmaAttrs,
    error::{PmaConfigError, PmaResult},
    region::PmaRegion,
};

/// Outcome of one resolution. `attrs` carries a region's flags only on an
/// unambiguous hit; on a miss or a multi-region match it is all-clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub hit: bool,
    pub attrs: PmaAttrs,
}

impl Resolution {
    pub const MISS: Resolution = Resolution {
        hit: false,
        attrs: PmaAttrs::empty(),
    };
}

/// Immutable, ordered table of physical memory regions.
///
/// Built once at startup and never mutated; `resolve` borrows it shared, so a
/// table behind an `Arc` serves any number of concurrent callers.
#[derive(Debug)]
pub struct PmaTable {
    regions: SmallVec<[PmaRegion; 8]>,
    // Name -> position in `regions`, for diagnostic lookups.
    by_name: AHashMap<String, usize>,
    address_bits: u32,
}

impl PmaTable {
    /// Builds a table from a literal `(low, high, attrs)` list, naming the
    /// regions `region0`, `region1`, ... in listed order.
    pub fn from_spec(address_bits: u32, spec: &[(u64, u64, PmaAttrs)]) -> PmaResult<Self> {
        let mut builder = PmaTableBuilder::new(address_bits);
        for &(low, high, attrs) in spec {
            builder = builder.region(low, high, attrs);
        }
        builder.build()
    }

    pub fn builder(address_bits: u32) -> PmaTableBuilder {
        PmaTableBuilder::new(address_bits)
    }

    /// Resolves a physical address against the whole table.
    ///
    /// Every region is tested; the match vector then selects the result:
    /// - one match: hit with that region's attributes;
    /// - no match: clean miss, all attributes clear;
    /// - several matches (an overlapping table, which a well-formed
    ///   configuration never contains): `hit` is the OR of the match bits and
    ///   stays asserted, but the attribute mux falls through to the all-clear
    ///   default. This mirrors the hardware one-hot selector, whose case
    ///   statement has no branch for two set bits; it is kept bit-exact
    ///   rather than replaced with first-match-wins.
    pub fn resolve(&self, address: u64) -> Resolution {
        let matched = self.matches(address);
        match matched.as_slice() {
            [] => Resolution::MISS,
            &[index] => Resolution {
                hit: true,
                attrs: self.regions[index].attrs,
            },
            _ => Resolution {
                hit: true,
                attrs: PmaAttrs::empty(),
            },
        }
    }

    /// The multi-hot match vector for an address: indices of every region
    /// containing it. `resolve` is a selection over this.
    pub fn matches(&self, address: u64) -> SmallVec<[usize; 8]> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.contains(address))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn region_named(&self, name: &str) -> Option<&PmaRegion> {
        self.by_name.get(name).map(|&index| &self.regions[index])
    }

    pub fn regions(&self) -> &[PmaRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn address_bits(&self) -> u32 {
        self.address_bits
    }
}

/// Accumulates regions for a [`PmaTable`]; all validation happens in
/// [`build`](PmaTableBuilder::build).
pub struct PmaTableBuilder {
    address_bits: u32,
    regions: SmallVec<[PmaRegion; 8]>,
}

impl PmaTableBuilder {
    pub fn new(address_bits: u32) -> Self {
        Self {
            address_bits,
            regions: SmallVec::new(),
        }
    }

    /// Adds an anonymous region, named after its position in the table.
    pub fn region(self, low: u64, high: u64, attrs: PmaAttrs) -> Self {
        let name = format!("region{}", self.regions.len());
        self.named_region(name, low, high, attrs)
    }

    pub fn named_region(
        mut self,
        name: impl Into<String>,
        low: u64,
        high: u64,
        attrs: PmaAttrs,
    ) -> Self {
        self.regions.push(PmaRegion::new(name, low, high, attrs));
        self
    }

    /// Validates the accumulated regions and freezes them into a table.
    ///
    /// Overlap between regions is not checked here: the non-overlap invariant
    /// is the configurator's responsibility, and a violation degrades to the
    /// ambiguous-match result at resolve time.
    pub fn build(self) -> PmaResult<PmaTable> {
        if self.address_bits == 0 || self.address_bits > 64 {
            return Err(PmaConfigError::WidthOutOfRange {
                address_bits: self.address_bits,
            });
        }

        let mut by_name = AHashMap::with_capacity(self.regions.len());
        for (index, region) in self.regions.iter().enumerate() {
            if region.low >= region.high {
                return Err(PmaConfigError::EmptyRegion {
                    name: region.name.clone(),
                    low: region.low,
                    high: region.high,
                });
            }
            if !end_fits(region.high, self.address_bits) {
                return Err(PmaConfigError::BoundsExceedWidth {
                    name: region.name.clone(),
                    high: region.high,
                    address_bits: self.address_bits,
                });
            }
            if by_name.insert(region.name.clone(), index).is_some() {
                return Err(PmaConfigError::DuplicateName {
                    name: region.name.clone(),
                });
            }
        }

        Ok(PmaTable {
            regions: self.regions,
            by_name,
            address_bits: self.address_bits,
        })
    }
}

// `high` is exclusive, so it may equal 2^bits exactly.
fn end_fits(high: u64, address_bits: u32) -> bool {
    address_bits >= 64 || high <= 1u64 << address_bits
}
