// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_dnd --heading-base-level=0

//! Thicket DnD: a deterministic drag-and-drop coordinator.
//!
//! Participants register an element, a [`ParticipantConfig`], and a [`DragHandler`].
//! A participant can be a drag source, a drop target, or both. The
//! [`DragCoordinator`] consumes raw pointer input, decides when a press becomes a
//! drag, works out which targets the drag is over, and tells everyone involved.
//!
//! The coordinator never reads the element tree, a clock, or a scroll position on its
//! own. It asks a host through the [`GeometryProvider`], [`PointerCapture`], and
//! [`ScrollHost`] traits, and takes timestamps as plain `u64` milliseconds.
//!
//! ## Groups
//!
//! Every participant belongs to one or more [`Group`]s. A drag only interacts with
//! targets that share at least one group with the dragged participant.
//!
//! ## Target resolution
//!
//! Candidates are ranked by effective z-index (the element's own, else the nearest
//! ancestor's, else `-1`), highest first; ties go to the participant registered first.
//! In [`MatchMode::Point`] a candidate matches when the pointer is inside its padded
//! region, in [`MatchMode::Intersect`] when the dragged element overlaps it. Only the
//! topmost match is reported unless [`CoordinatorConfig::notify_occluded`] is set.
//!
//! Target bounds are measured once when a drag starts and cached for its duration.
//! Call [`DragCoordinator::invalidate_region`], [`DragCoordinator::refresh_cache`], or
//! [`DragCoordinator::on_resize`] when layout changes under a drag. Auto-scroll
//! invalidates the contents of the scrolled container itself.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use kurbo::Point;
//! use thicket_dnd::{
//!     DragCoordinator, DragEvent, DragHandler, DropOutcome, GeometryProvider, NoopHandler,
//!     ParticipantConfig, PointerButton, PointerCapture, Region, ScrollHost,
//! };
//!
//! #[derive(Default)]
//! struct Board {
//!     regions: HashMap<u32, Region>,
//! }
//!
//! impl GeometryProvider<u32> for Board {
//!     fn region_of(&self, id: &u32) -> Option<Region> {
//!         self.regions.get(id).copied()
//!     }
//! }
//!
//! impl PointerCapture for Board {
//!     fn capture_pointer(&mut self) {}
//!     fn release_pointer(&mut self) {}
//! }
//!
//! impl ScrollHost<u32> for Board {}
//!
//! struct Column;
//!
//! impl DragHandler<u32> for Column {
//!     fn notify_drop(&mut self, _: &DragEvent<'_, u32>, card: &u32) -> bool {
//!         // Columns take every card except #13.
//!         *card != 13
//!     }
//! }
//!
//! # fn main() -> Result<(), thicket_dnd::ConfigError> {
//! let mut board = Board::default();
//! board.regions.insert(1, Region::from_xywh(0.0, 0.0, 80.0, 30.0));
//! board.regions.insert(2, Region::from_xywh(200.0, 0.0, 100.0, 400.0));
//!
//! let mut dnd = DragCoordinator::new(board);
//! dnd.register(1, ParticipantConfig::in_group("cards").drag_only(), NoopHandler)?;
//! dnd.register(2, ParticipantConfig::in_group("cards").target_only(), Column)?;
//!
//! assert!(dnd.pointer_down(&1, PointerButton::Primary, Point::new(10.0, 10.0), 0));
//! dnd.pointer_move(Point::new(250.0, 100.0), 16);
//! assert_eq!(dnd.over_targets(), [2]);
//!
//! let outcome = dnd.pointer_up(Point::new(250.0, 100.0), 32);
//! assert_eq!(
//!     outcome,
//!     DropOutcome::Dropped {
//!         targets: vec![2],
//!         accepted: vec![2],
//!     }
//! );
//! # Ok(())
//! # }
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod config;
mod coordinator;
mod error;
mod host;
mod participant;
mod registry;
mod resolve;
mod scroll;
mod session;
mod types;

#[cfg(test)]
mod test_util;

pub use config::{AxisConstraint, CoordinatorConfig, ParticipantConfig, ScrollConfig};
pub use coordinator::DragCoordinator;
pub use error::ConfigError;
pub use host::{
    DragHost, GeometryProvider, PointerCapture, ScrollHost, is_ancestor, resolve_z_index,
};
pub use participant::{DragHandler, NoopHandler, Participant};
pub use registry::Registry;
pub use scroll::AutoScroller;
pub use types::{
    Capabilities, DragEvent, DragState, DropOutcome, ElementId, Group, MatchMode,
    ScrollDirection, StalePolicy,
};

pub use thicket_drag_tracker::{PointerButton, Threshold};
pub use thicket_region::Region;
