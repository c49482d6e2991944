//! Entity identities.
//!
//! Every entity instance is named by a 128-bit globally unique value that
//! stays stable for the instance's whole lifetime, regardless of where its
//! data currently sits in component storage.

use std::fmt;

use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 128-bit globally unique entity identity.
///
/// Identities are generated once at entity creation and never reused.
/// Physical storage slots move as other entities are destroyed; the
/// identity is the stable name that survives those moves.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identity(u128);

impl Identity {
    /// Generates a fresh identity from UUID v4 randomness.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().as_u128())
    }

    /// Returns the nil sentinel, representing "no entity".
    ///
    /// The all-zero value is never produced by [`Identity::generate`].
    #[must_use]
    pub const fn nil() -> Self {
        Self(0)
    }

    /// Returns true if this is the nil sentinel.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw 128-bit value.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Splits the identity into its (low, high) 64-bit halves.
    ///
    /// Used by the hash table to mix each half independently.
    #[must_use]
    pub const fn halves(self) -> (u64, u64) {
        (self.0 as u64, (self.0 >> 64) as u64)
    }

    /// Reconstructs an identity from a raw 128-bit value.
    ///
    /// Useful for tests and for deserializing external references.
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "Identity(nil)")
        } else {
            // Short hex prefix is enough to tell instances apart in logs.
            write!(f, "Identity({:08x}..)", (self.0 >> 96) as u32)
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "nil")
        } else {
            write!(f, "{:032x}", self.0)
        }
    }
}
