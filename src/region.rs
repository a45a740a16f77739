use std::fmt;

use crate::attrs::PmaAttrs;

/// One contiguous physical address range with a fixed attribute set.
///
/// Bounds are half-open: `low` is inside the region, `high` is the first
/// address past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PmaRegion {
    pub name: String,
    pub low: u64,
    pub high: u64,
    pub attrs: PmaAttrs,
}

impl PmaRegion {
    pub fn new(name: impl Into<String>, low: u64, high: u64, attrs: PmaAttrs) -> Self {
        Self {
            name: name.into(),
            low,
            high,
            attrs,
        }
    }

    pub fn contains(&self, address: u64) -> bool {
        self.low <= address && address < self.high
    }

    pub fn overlaps(&self, other: &PmaRegion) -> bool {
        self.low < other.high && other.low < self.high
    }

    pub fn len(&self) -> u64 {
        self.high - self.low
    }

    pub fn is_empty(&self) -> bool {
        self.low == self.high
    }
}

impl fmt::Display for PmaRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 0x{:010X}..0x{:010X} [{}]",
            self.name, self.low, self.high, self.attrs
        )
    }
}
