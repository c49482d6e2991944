//! Growable arrays, open-addressing hash tables, and the entity/component
//! store for loam.
//!
//! This crate provides:
//! - [`GrowArray`] - Capacity-doubling sequence, the base primitive
//! - [`HashTable`] - Linear-probing map over the three key kinds in use
//! - [`EntityStore`] - Schema registry plus structure-of-arrays populations
//!
//! Everything here is single-threaded; one simulate/render step
//! owns each container exclusively.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod array;
mod column;
mod store;
mod table;

pub use array::GrowArray;
pub use column::Component;
pub use store::{Entity, EntityStore};
pub use table::{HashTable, TableKey, TableLookup};
