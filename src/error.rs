use std::{error::Error, fmt};

pub type PmaResult<T> = Result<T, PmaConfigError>;

/// Construction-time failures. Resolution itself is infallible; a table that
/// would produce one of these is never built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PmaConfigError {
    EmptyRegion {
        name: String,
        low: u64,
        high: u64,
    },
    BoundsExceedWidth {
        name: String,
        high: u64,
        address_bits: u32,
    },
    WidthOutOfRange {
        address_bits: u32,
    },
    DuplicateName {
        name: String,
    },
}

impl fmt::Display for PmaConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PmaConfigError::EmptyRegion { name, low, high } => write!(
                f,
                "region '{name}' is empty or inverted: low 0x{low:010X} >= high 0x{high:010X}"
            ),
            PmaConfigError::BoundsExceedWidth {
                name,
                high,
                address_bits,
            } => write!(
                f,
                "region '{name}' end 0x{high:010X} does not fit in a {address_bits}-bit address"
            ),
            PmaConfigError::WidthOutOfRange { address_bits } => {
                write!(f, "address width {address_bits} is outside 1..=64 bits")
            }
            PmaConfigError::DuplicateName { name } => {
                write!(f, "region name '{name}' registered twice")
            }
        }
    }
}

impl Error for PmaConfigError {}
