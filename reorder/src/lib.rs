//! A headless fractional-index reordering engine for drag-and-drop lists
//! and boards.
//!
//! For interaction-layer utilities (drag payloads, closest-edge hitboxes,
//! drag sessions), see the `reorder-adapter` crate.
//!
//! This crate focuses on the core of a sections-and-posts wall: ordering
//! keys with gaps ([`allocate`]), a collection model with lazily memoized
//! sorted views ([`Board`]), and the reorder operations that turn a drop
//! gesture into one atomic position update ([`Board::reorder_item`] and
//! friends).
//!
//! It is UI-agnostic. A GUI/TUI layer is expected to provide:
//! - drag gesture capture and hit-testing
//! - the resolved `(moving, anchor, relative position)` of each drop
//! - rendering of the sorted views
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod allocator;
mod engine;
mod error;
mod model;
mod types;

#[cfg(test)]
mod tests;

pub use allocator::{allocate, allocation_collides, spaced_key};
pub use error::ReorderError;
pub use model::{Board, BoardOptions, BoardSnapshot};
pub use types::{Group, GroupId, Item, ItemId, RelativePosition, SortKey};
