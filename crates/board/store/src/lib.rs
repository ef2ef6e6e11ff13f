//! Entity storage seam for the workflow engine
//!
//! The engine assumes an ordinary relational store reachable through a
//! small record interface: read a batch of snapshots, patch one record,
//! or commit a batch of patches as one atomic unit. Durability and
//! consistency are guaranteed within one atomic call; the engine never
//! assumes atomicity across calls.
//!
//! `run_atomically` is conditional on each patch's `expected_version`, so
//! two overlapping batches that both validated against the same snapshots
//! cannot silently clobber each other: the second commit fails with
//! [`StoreError::Conflict`] and nothing from it is applied.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryEntityStore;
pub use traits::{EntityPatch, EntityStore};
