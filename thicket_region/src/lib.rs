// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_region --heading-base-level=0

//! Thicket Region: axis-aligned page regions for drag-and-drop hit testing.
//!
//! A [`Region`] is a rectangle in page coordinates described by its four edges
//! (`top`, `right`, `bottom`, `left`). It is a plain `Copy` value: every operation
//! returns a new region and never mutates the receiver.
//!
//! The operations are the ones a drag-and-drop engine needs on its hot path:
//!
//! - [`Region::contains`] / [`Region::contains_point`]: inclusive containment.
//! - [`Region::intersect`]: the overlap of two regions, or `None` when the overlap has
//!   no area. Regions that only share an edge do **not** intersect.
//! - [`Region::union`]: the smallest region enclosing both inputs.
//! - [`Region::translate_by`] and [`Region::expand`]: moving a cached region by the pointer
//!   delta, and growing a target by its hit-test padding.
//! - [`Region::constrain_to`]: clamp a region into a bound, moving it (rather than shrinking
//!   it) whenever it fits.
//! - [`Region::is_out_of_bound`] / [`Region::out_of_bound_offset`]: edge tests used by
//!   auto-scrolling and constrained dragging.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use thicket_region::Region;
//!
//! let target = Region::from_xywh(0.0, 0.0, 100.0, 100.0);
//! let dragged = Region::from_xywh(90.0, 90.0, 20.0, 20.0);
//!
//! let overlap = target.intersect(&dragged).unwrap();
//! assert_eq!(overlap, Region::new(90.0, 100.0, 100.0, 90.0));
//!
//! // Touching edges is not an overlap.
//! let neighbour = Region::from_xywh(100.0, 0.0, 50.0, 50.0);
//! assert!(target.intersect(&neighbour).is_none());
//!
//! // Moving the dragged region back inside the target keeps its size.
//! let moved = dragged.translate_by(Vec2::new(5.0, 5.0)).constrain_to(&target);
//! assert_eq!(moved.width(), 20.0);
//! assert!(target.contains(&moved));
//! assert!(target.contains_point(Point::new(100.0, 100.0)));
//! ```
//!
//! ## Float semantics
//!
//! Comparisons are exact; there is no epsilon. Coordinates are assumed to be finite.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: `no_std` builds relying on `libm` through `kurbo`.
//! - `serde`: `Serialize`/`Deserialize` for [`Region`] and [`Axis`].
//!
//! This crate is `no_std`.

#![no_std]

mod region;

pub use region::{Axis, Region};
