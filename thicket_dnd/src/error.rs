// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration validation errors.

use kurbo::Vec2;

/// A configuration value that the coordinator cannot work with.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The drag threshold distance is negative or not finite.
    #[error("drag threshold must be a finite, non-negative distance, got {0}")]
    Threshold(f64),
    /// An axis constraint has a negative or non-finite extent.
    #[error("axis constraint extents must be finite and non-negative, got {before} before and {after} after")]
    ConstraintRange {
        /// Pixels allowed toward the origin.
        before: f64,
        /// Pixels allowed away from the origin.
        after: f64,
    },
    /// A tick interval is zero, negative, or not finite.
    #[error("tick size must be a finite, positive distance, got {0}")]
    TickSize(f64),
    /// The auto-scroll step is zero, negative, or not finite.
    #[error("auto-scroll increment must be a finite, positive distance, got {0}")]
    ScrollIncrement(f64),
    /// The auto-scroll repeat interval is zero.
    #[error("auto-scroll frequency must be at least one millisecond")]
    ScrollFrequency,
    /// The auto-scroll edge zone is negative or not finite.
    #[error("auto-scroll edge thresholds must be finite and non-negative, got {0:?}")]
    EdgeThreshold(Vec2),
}
