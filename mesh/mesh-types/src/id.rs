//! Fragment identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque 128-bit identifier the scanner attaches to each fragment.
///
/// Scanners re-report a fragment under the same identifier every time its
/// geometry is refined. The exporter never looks at it; it only matters to
/// bookkeeping that keeps the latest snapshot per fragment.
///
/// # Example
///
/// ```
/// use mesh_types::FragmentId;
///
/// let id = FragmentId::from_u128(0xdead_beef);
/// assert_eq!(id.to_string(), "000000000000000000000000deadbeef");
/// assert_eq!(FragmentId::from_bytes(id.to_bytes()), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FragmentId(u128);

impl FragmentId {
    /// Creates an identifier from its integer value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Creates an identifier from 16 big-endian bytes (UUID byte order).
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Returns the integer value.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Returns the identifier as 16 big-endian bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl From<u128> for FragmentId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}
