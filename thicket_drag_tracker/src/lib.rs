// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_drag_tracker --heading-base-level=0

//! Thicket Drag Tracker: tell clicks from drags and compute constrained drag offsets.
//!
//! This crate is the low-level half of Thicket's drag support. It knows nothing about
//! drop targets, groups, or z-order. It binds to one pointer press at a time and answers
//! two questions:
//!
//! - Has this press become a drag? A press is promoted once the pointer moves further
//!   than a distance [`Threshold`] on either axis, or once an optional hold delay elapses.
//! - How far has the drag moved? [`DragTracker::offset`] reports the pointer offset since
//!   the press, optionally clamped to a constraint [`Region`](thicket_region::Region).
//!
//! Time is passed in explicitly as millisecond timestamps, so the tracker never reads a
//! clock or owns a timer. Hosts call [`DragTracker::on_tick`] when
//! [`DragTracker::next_deadline`] is due.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use thicket_drag_tracker::{DragTracker, Gesture, PointerButton, TrackerConfig, TrackerHandler};
//!
//! #[derive(Default)]
//! struct Splitter {
//!     moved: Vec2,
//! }
//!
//! impl TrackerHandler<u32> for Splitter {
//!     fn on_drag(&mut self, ev: &thicket_drag_tracker::TrackerEvent<'_, u32>) {
//!         self.moved = ev.offset;
//!     }
//! }
//!
//! let mut tracker = DragTracker::new(TrackerConfig::default(), Splitter::default());
//! tracker.on_down(7, PointerButton::Primary, Point::new(10.0, 10.0), 0, None);
//!
//! // Within the default 5px tolerance: still a potential click.
//! tracker.on_move(Point::new(12.0, 11.0), 10);
//! assert!(!tracker.is_active());
//!
//! tracker.on_move(Point::new(30.0, 10.0), 20);
//! assert!(tracker.is_active());
//! assert_eq!(tracker.handler().moved, Vec2::new(20.0, 0.0));
//!
//! assert_eq!(tracker.on_up(Point::new(30.0, 10.0), 30), Gesture::Drag);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod threshold;
mod tracker;

pub use threshold::Threshold;
pub use tracker::{
    ConstrainMode, DragTracker, Gesture, PointerButton, TrackerConfig, TrackerConfigError,
    TrackerEvent, TrackerHandler,
};
