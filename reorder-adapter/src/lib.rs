//! Drag-and-drop interaction helpers for the `reorder` crate.
//!
//! The `reorder` crate is UI-agnostic and focuses on the ordering model and
//! the reorder engine. This crate provides the small, framework-neutral
//! pieces every adapter needs on top of it:
//!
//! - Tagged drag payloads ([`DragPayload`]) validated at the boundary
//! - Closest-edge hitbox math ([`closest_edge`]) and edge → insertion-side
//!   mapping
//! - A drag-session state machine ([`DragSession`]) with sticky targeting
//!   that resolves a completed gesture into exactly one engine call
//!
//! This crate is intentionally framework-agnostic (no DOM/winit bindings):
//! the UI layer supplies element bounds and pointer positions, and applies
//! the board's sorted views after a committed drop.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod hitbox;
mod payload;
mod session;


pub use hitbox::{Bounds, Edge, Point, closest_edge};
pub use payload::{DragPayload, PayloadKind};
pub use session::{DragSession, DropOutcome, DropTarget};
