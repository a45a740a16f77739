//! Physical memory attribute (PMA) resolver.
//!
//! A [`PmaTable`] is a fixed set of half-open physical address regions, each
//! carrying read/write/execute/access-valid/cacheable flags. Given a physical
//! address, [`PmaTable::resolve`] reports whether any region covers it and,
//! on an unambiguous hit, that region's attributes. The table is built once
//! and immutable afterwards; the pipeline stage or bus model consulting it is
//! expected to enforce (or ignore) the returned flags itself.

pub mod attrs;
pub mod error;
pub mod region;
pub mod table;

pub use attrs::PmaAttrs;
pub use error::{PmaConfigError, PmaResult};
pub use region::PmaRegion;
pub use table::{PmaTable, PmaTableBuilder, Resolution};
