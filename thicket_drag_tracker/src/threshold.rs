// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Promotion rules for turning a press into a drag.

use kurbo::Point;

/// Distance and hold-time rules that promote a press into a drag.
///
/// The distance rule is measured per axis: the press is promoted once the pointer
/// has moved strictly more than `distance` pixels horizontally or vertically from
/// where it went down. The hold rule promotes the press once `hold` milliseconds
/// have elapsed, regardless of movement.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    /// Pixels of movement on either axis before the press becomes a drag.
    pub distance: f64,
    /// Milliseconds after which a held press becomes a drag, if any.
    pub hold: Option<u64>,
}

impl Threshold {
    /// Create a threshold.
    pub const fn new(distance: f64, hold: Option<u64>) -> Self {
        Self { distance, hold }
    }

    /// Whether moving from `start` to `current` crosses the distance rule.
    #[inline]
    pub fn exceeded(&self, start: Point, current: Point) -> bool {
        let d = current - start;
        d.x > self.distance || -d.x > self.distance || d.y > self.distance || -d.y > self.distance
    }

    /// The timestamp at which the hold rule fires for a press made at `down_time`.
    #[inline]
    pub fn deadline(&self, down_time: u64) -> Option<u64> {
        self.hold.map(|h| down_time.saturating_add(h))
    }

    /// Whether the hold rule has fired at `now` for a press made at `down_time`.
    #[inline]
    pub fn hold_elapsed(&self, down_time: u64, now: u64) -> bool {
        self.deadline(down_time).is_some_and(|d| now >= d)
    }
}
