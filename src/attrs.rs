use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Physical memory attributes attached to a region.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PmaAttrs: u8 {
        /// Loads are permitted.
        const READ = 1 << 0;
        /// Stores are permitted.
        const WRITE = 1 << 1;
        /// Instruction fetches are permitted.
        const EXEC = 1 << 2;
        /// The region backs real memory; accesses are valid at all.
        const ACCESS = 1 << 3;
        /// Accesses may be cached.
        const CACHEABLE = 1 << 4;
    }
}

impl PmaAttrs {
    pub fn readable(&self) -> bool {
        self.contains(PmaAttrs::READ)
    }

    pub fn writable(&self) -> bool {
        self.contains(PmaAttrs::WRITE)
    }

    pub fn executable(&self) -> bool {
        self.contains(PmaAttrs::EXEC)
    }

    pub fn access_valid(&self) -> bool {
        self.contains(PmaAttrs::ACCESS)
    }

    pub fn cacheable(&self) -> bool {
        self.contains(PmaAttrs::CACHEABLE)
    }
}

impl fmt::Display for PmaAttrs {
    /// Compact `rwxac` summary, one dash per cleared flag.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, ch) in [
            (PmaAttrs::READ, 'r'),
            (PmaAttrs::WRITE, 'w'),
            (PmaAttrs::EXEC, 'x'),
            (PmaAttrs::ACCESS, 'a'),
            (PmaAttrs::CACHEABLE, 'c'),
        ] {
            let ch = if self.contains(flag) { ch } else { '-' };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
