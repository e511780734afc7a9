//! Player identification.
//!
//! ## PlayerId
//!
//! Opaque, type-safe player identifier. The id carries no layout meaning:
//! it is not a seat index and not tied to a screen region. The player
//! collection allocates ids; everything else only compares and hashes them.

use serde::{Deserialize, Serialize};

/// Opaque unique player identifier.
///
/// ```
/// use lifetap::core::PlayerId;
///
/// let a = PlayerId::new(7);
/// let b = PlayerId::new(7);
/// assert_eq!(a, b);
/// assert_eq!(a.raw(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
