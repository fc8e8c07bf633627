//! Native operation identifiers

use std::fmt;

/// Stable identifier of one native operation in the external runtime.
///
/// The upper 32 bits are the namespace component, the lower 32 bits the
/// function hash. Identifiers are constant per call site:
///
/// ```ignore
/// const ADD_BLIP_FOR_COORD: NativeId = NativeId::new(0x00000000, 0xc6f43d0e);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeId(u64);

impl NativeId {
    pub const fn new(namespace: u32, hash: u32) -> Self {
        Self(((namespace as u64) << 32) | hash as u64)
    }

    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn namespace(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn hash(self) -> u32 {
        self.0 as u32
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}:0x{:08x}", self.namespace(), self.hash())
    }
}

impl From<u64> for NativeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
