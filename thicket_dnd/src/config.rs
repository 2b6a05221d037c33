// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator, participant, and auto-scroll settings.

use kurbo::{Insets, Vec2};
use smallvec::SmallVec;
use thicket_drag_tracker::Threshold;
use thicket_region::Region;

use crate::error::ConfigError;
use crate::types::{Capabilities, Group, MatchMode, StalePolicy};

fn finite_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// Coordinator-wide settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoordinatorConfig {
    /// When a press becomes a drag. Defaults to 3px or 350ms.
    pub threshold: Threshold,
    /// How targets are matched.
    pub mode: MatchMode,
    /// Notify every matching target instead of only the nearest one.
    pub notify_occluded: bool,
    /// Reuse target regions measured at drag start instead of measuring on
    /// every move.
    pub use_cache: bool,
    /// Keep the dragged element inside the host viewport when the participant
    /// has no bound of its own.
    pub constrain_to_viewport: bool,
    /// Skip targets that contain the dragged element.
    pub exclude_ancestors: bool,
    /// Skip targets inside the dragged element.
    pub exclude_descendants: bool,
    /// How a drag left live by a lost release is finished.
    pub stale_policy: StalePolicy,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::new(3.0, Some(350)),
            mode: MatchMode::Point,
            notify_occluded: false,
            use_cache: true,
            constrain_to_viewport: false,
            exclude_ancestors: false,
            exclude_descendants: true,
            stale_policy: StalePolicy::Cancel,
        }
    }
}

impl CoordinatorConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !finite_non_negative(self.threshold.distance) {
            return Err(ConfigError::Threshold(self.threshold.distance));
        }
        Ok(())
    }
}

/// Limits on how far a participant may travel along one axis.
///
/// `before` and `after` are measured from the element's position when the drag
/// starts. With a `tick`, the position snaps to the nearest multiple of `tick`
/// away from that start position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisConstraint {
    /// Pixels allowed toward the origin (left or up).
    pub before: f64,
    /// Pixels allowed away from the origin (right or down).
    pub after: f64,
    /// Snap interval, if any.
    pub tick: Option<f64>,
}

impl AxisConstraint {
    /// Constrain to `before`/`after` pixels around the start position.
    pub const fn new(before: f64, after: f64) -> Self {
        Self {
            before,
            after,
            tick: None,
        }
    }

    /// Forbid movement on this axis.
    pub const fn locked() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Snap to multiples of `tick` from the start position.
    pub const fn with_tick(mut self, tick: f64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !finite_non_negative(self.before) || !finite_non_negative(self.after) {
            return Err(ConfigError::ConstraintRange {
                before: self.before,
                after: self.after,
            });
        }
        match self.tick {
            Some(t) if !(t.is_finite() && t > 0.0) => Err(ConfigError::TickSize(t)),
            _ => Ok(()),
        }
    }

    /// Resolve against the element's start coordinate on this axis.
    pub(crate) fn resolve(&self, start: f64) -> ResolvedAxis {
        let tick = self.tick.filter(|t| t.is_finite() && *t > 0.0);
        let (steps_before, steps_after) = match tick {
            Some(t) => (whole_steps(self.before / t), whole_steps(self.after / t)),
            None => (0, 0),
        };
        ResolvedAxis {
            start,
            min: start - self.before,
            max: start + self.after,
            tick,
            steps_before,
            steps_after,
        }
    }
}

/// `floor(x)` as a step count, saturating, and zero for negative or NaN input.
fn whole_steps(x: f64) -> i64 {
    // Float-to-int casts truncate and saturate; NaN becomes zero.
    (x as i64).max(0)
}

/// An [`AxisConstraint`] pinned to absolute coordinates for one drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ResolvedAxis {
    start: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
    tick: Option<f64>,
    /// Whole ticks that fit between `min` and `start`.
    steps_before: i64,
    /// Whole ticks that fit between `start` and `max`.
    steps_after: i64,
}

impl ResolvedAxis {
    /// Clamp `v` into range, then snap to the nearest tick.
    ///
    /// Ticks sit at `start + k * tick` for every `k` that stays in range. A
    /// value exactly halfway between two ticks snaps to the lower one.
    pub(crate) fn apply(&self, v: f64) -> f64 {
        let v = v.max(self.min).min(self.max);
        let Some(tick) = self.tick else {
            return v;
        };
        let q = (v - self.start) / tick;
        let mut k = q as i64;
        if k as f64 > q {
            k = k.saturating_sub(1);
        }
        if q - k as f64 > 0.5 {
            k = k.saturating_add(1);
        }
        let k = k.max(-self.steps_before).min(self.steps_after);
        self.start + k as f64 * tick
    }
}

/// Per-participant settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticipantConfig {
    /// Interaction groups. Defaults to [`Group::DEFAULT`].
    pub groups: SmallVec<[Group; 2]>,
    /// Whether the participant can be dragged, be a target, or both.
    pub capabilities: Capabilities,
    /// Locked participants neither start drags nor receive target notifications.
    pub locked: bool,
    /// Grows (or with negative values shrinks) the region used for matching.
    pub padding: Insets,
    /// Only the primary button starts a drag.
    pub primary_button_only: bool,
    /// Allow presses on handles outside the element's own region.
    pub has_outer_handles: bool,
    /// Move without consulting any target.
    pub move_only: bool,
    /// Let the dragged participant match itself as a target.
    pub match_self: bool,
    /// Horizontal travel limits.
    pub x_constraint: Option<AxisConstraint>,
    /// Vertical travel limits.
    pub y_constraint: Option<AxisConstraint>,
    /// Keep the dragged element inside this region.
    pub constrain_to: Option<Region>,
}

impl Default for ParticipantConfig {
    fn default() -> Self {
        Self {
            groups: SmallVec::from_iter([Group::DEFAULT]),
            capabilities: Capabilities::default(),
            locked: false,
            padding: Insets::ZERO,
            primary_button_only: true,
            has_outer_handles: false,
            move_only: false,
            match_self: false,
            x_constraint: None,
            y_constraint: None,
            constrain_to: None,
        }
    }
}

impl ParticipantConfig {
    /// A drag source and target in a single group.
    pub fn in_group(group: impl Into<Group>) -> Self {
        Self {
            groups: SmallVec::from_iter([group.into()]),
            ..Self::default()
        }
    }

    /// Join another group.
    pub fn with_group(mut self, group: impl Into<Group>) -> Self {
        let group = group.into();
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
        self
    }

    /// Replace the capabilities.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Only accept drops.
    pub fn target_only(self) -> Self {
        self.with_capabilities(Capabilities::TARGET)
    }

    /// Only start drags.
    pub fn drag_only(self) -> Self {
        self.with_capabilities(Capabilities::DRAG)
    }

    /// Set the matching padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Start locked.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Move without consulting targets.
    pub fn move_only(mut self) -> Self {
        self.move_only = true;
        self
    }

    /// Allow presses on handles outside the element.
    pub fn with_outer_handles(mut self) -> Self {
        self.has_outer_handles = true;
        self
    }

    /// Set the horizontal travel limits.
    pub fn with_x_constraint(mut self, c: AxisConstraint) -> Self {
        self.x_constraint = Some(c);
        self
    }

    /// Set the vertical travel limits.
    pub fn with_y_constraint(mut self, c: AxisConstraint) -> Self {
        self.y_constraint = Some(c);
        self
    }

    /// Keep the dragged element inside `bound`.
    pub fn with_constrain_to(mut self, bound: Region) -> Self {
        self.constrain_to = Some(bound);
        self
    }

    /// Whether the participant can be dragged.
    pub fn can_drag(&self) -> bool {
        self.capabilities.contains(Capabilities::DRAG)
    }

    /// Whether the participant can receive target notifications.
    pub fn can_target(&self) -> bool {
        self.capabilities.contains(Capabilities::TARGET)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(c) = &self.x_constraint {
            c.validate()?;
        }
        if let Some(c) = &self.y_constraint {
            c.validate()?;
        }
        Ok(())
    }
}

/// Settings for one auto-scroll container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Width of the edge zones, horizontally (`x`) and vertically (`y`).
    pub edge_threshold: Vec2,
    /// Pixels scrolled per step.
    pub increment: f64,
    /// Milliseconds between repeated steps.
    pub frequency: u64,
    /// Only scroll for drags that belong to this group.
    pub group: Option<Group>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            edge_threshold: Vec2::new(25.0, 25.0),
            increment: 100.0,
            frequency: 500,
            group: None,
        }
    }
}

impl ScrollConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !finite_non_negative(self.edge_threshold.x)
            || !finite_non_negative(self.edge_threshold.y)
        {
            return Err(ConfigError::EdgeThreshold(self.edge_threshold));
        }
        if !(self.increment.is_finite() && self.increment > 0.0) {
            return Err(ConfigError::ScrollIncrement(self.increment));
        }
        if self.frequency == 0 {
            return Err(ConfigError::ScrollFrequency);
        }
        Ok(())
    }
}
