//! Loam - handle-based structure-of-arrays object system
//!
//! This crate re-exports all layers of the loam workspace for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: loam_storage    — GrowArray, HashTable, EntityStore
//! Layer 0: loam_foundation — Identity, Error, Result
//! ```

pub use loam_foundation as foundation;
pub use loam_storage as storage;
