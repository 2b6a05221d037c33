// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`DragTracker`] state machine.
//!
//! ## States
//!
//! - **Idle**: no press is tracked.
//! - **Pressed**: a press was accepted by [`DragTracker::on_down`]; movement is measured
//!   against the tolerance and the optional auto-start delay is pending.
//! - **Active**: the press became a drag. [`TrackerHandler::on_start`] fired once and
//!   [`TrackerHandler::on_drag`] fires for every subsequent move.
//!
//! [`DragTracker::on_up`] and [`DragTracker::cancel`] always return to Idle.
//!
//! ## Constraining
//!
//! With [`TrackerConfig::constrain_to`] set, [`DragTracker::offset`] can clamp the
//! reported offset:
//!
//! - [`ConstrainMode::Point`]: the pointer itself is kept inside the region.
//! - [`ConstrainMode::DragTarget`]: the dragged element's start region, moved by the
//!   offset, is kept inside the region. This needs the element region passed to
//!   `on_down`; without it the tracker falls back to `Point`.

use kurbo::{Point, Vec2};
use thicket_region::Region;

use crate::threshold::Threshold;

/// Pointer button that produced a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Usually the left mouse button, or a touch/pen contact.
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Usually the middle mouse button.
    Auxiliary,
    /// Any other button, by platform index.
    Other(u8),
}

/// How [`DragTracker::offset`] applies [`TrackerConfig::constrain_to`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstrainMode {
    /// Keep the pointer position inside the constraint region.
    #[default]
    Point,
    /// Keep the dragged element's region inside the constraint region.
    DragTarget,
}

/// Configuration for a [`DragTracker`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerConfig {
    /// Pixels the pointer must travel on either axis before a drag starts (default 5).
    pub tolerance: f64,
    /// Start the drag after this many milliseconds even without movement.
    pub auto_start: Option<u64>,
    /// Optional region the drag offset is clamped to.
    pub constrain_to: Option<Region>,
    /// How `constrain_to` is applied.
    pub constrain_mode: ConstrainMode,
    /// Ignore presses from buttons other than [`PointerButton::Primary`] (default `true`).
    pub primary_button_only: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tolerance: 5.0,
            auto_start: None,
            constrain_to: None,
            constrain_mode: ConstrainMode::Point,
            primary_button_only: true,
        }
    }
}

/// Invalid [`TrackerConfig`] values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TrackerConfigError {
    /// The tolerance was negative or not finite.
    #[error("drag tolerance must be a finite, non-negative number of pixels (got {0})")]
    Tolerance(f64),
    /// The constraint region has no area.
    #[error("constraint region has no area: {0:?}")]
    EmptyConstraint(Region),
}

impl TrackerConfig {
    /// Check the configuration for values the tracker cannot honor.
    pub fn validate(&self) -> Result<(), TrackerConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(TrackerConfigError::Tolerance(self.tolerance));
        }
        if let Some(r) = self.constrain_to
            && r.is_empty()
        {
            return Err(TrackerConfigError::EmptyConstraint(r));
        }
        Ok(())
    }

    fn threshold(&self) -> Threshold {
        Threshold::new(self.tolerance, self.auto_start)
    }
}

/// What a completed press turned out to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// No press was being tracked.
    None,
    /// The press ended before it became a drag.
    Click,
    /// The press became a drag.
    Drag,
}

/// Event passed to [`TrackerHandler`] callbacks.
#[derive(Clone, Debug)]
pub struct TrackerEvent<'a, K> {
    /// The element the press started on.
    pub target: &'a K,
    /// Current pointer position.
    pub position: Point,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Offset from the press position, after constraints.
    pub offset: Vec2,
}

/// Callbacks driven by a [`DragTracker`]. Every method has a no-op default.
pub trait TrackerHandler<K> {
    /// Called on an accepted press, before tracking starts. Return `false` to ignore
    /// the press entirely.
    fn on_before_start(&mut self, ev: &TrackerEvent<'_, K>) -> bool {
        let _ = ev;
        true
    }

    /// Called once tracking of a press begins.
    fn on_pointer_down(&mut self, ev: &TrackerEvent<'_, K>) {
        let _ = ev;
    }

    /// Called once when the press becomes a drag.
    fn on_start(&mut self, ev: &TrackerEvent<'_, K>) {
        let _ = ev;
    }

    /// Called for every move while dragging.
    fn on_drag(&mut self, ev: &TrackerEvent<'_, K>) {
        let _ = ev;
    }

    /// Called once when a drag ends, by release or cancellation.
    fn on_end(&mut self, ev: &TrackerEvent<'_, K>) {
        let _ = ev;
    }

    /// Called on release of a tracked press, after `on_end` if it was a drag.
    fn on_pointer_up(&mut self, ev: &TrackerEvent<'_, K>) {
        let _ = ev;
    }
}

#[derive(Clone, Debug)]
struct Press<K> {
    target: K,
    start: Point,
    start_time: u64,
    last: Point,
    active: bool,
    drag_region: Option<Region>,
}

/// Tracks a single press and decides when it becomes a drag.
pub struct DragTracker<K, H> {
    config: TrackerConfig,
    delegate: Option<fn(&K) -> bool>,
    handler: H,
    press: Option<Press<K>>,
}

impl<K: core::fmt::Debug, H> core::fmt::Debug for DragTracker<K, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragTracker")
            .field("config", &self.config)
            .field("press", &self.press)
            .finish_non_exhaustive()
    }
}

impl<K: Clone, H: TrackerHandler<K>> DragTracker<K, H> {
    /// Create a tracker with the given configuration and handler.
    pub fn new(config: TrackerConfig, handler: H) -> Self {
        Self {
            config,
            delegate: None,
            handler,
            press: None,
        }
    }

    /// Only accept presses whose target satisfies `delegate`.
    pub fn set_delegate(&mut self, delegate: Option<fn(&K) -> bool>) {
        self.delegate = delegate;
    }

    /// The tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Replace the constraint region, for example after a window resize.
    pub fn set_constrain_to(&mut self, region: Option<Region>) {
        self.config.constrain_to = region;
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the tracked press has become a drag.
    pub fn is_active(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.active)
    }

    /// Begin tracking a press.
    ///
    /// `drag_region` is the region of the element being dragged, used by
    /// [`ConstrainMode::DragTarget`]. Returns `true` if the press is now tracked.
    /// A press arriving while another is tracked replaces it; a drag in progress is
    /// ended first.
    pub fn on_down(
        &mut self,
        target: K,
        button: PointerButton,
        position: Point,
        timestamp: u64,
        drag_region: Option<Region>,
    ) -> bool {
        if self.press.is_some() {
            self.cancel(timestamp);
        }
        if self.config.primary_button_only && button != PointerButton::Primary {
            return false;
        }
        if let Some(delegate) = self.delegate
            && !delegate(&target)
        {
            return false;
        }
        let ev = TrackerEvent {
            target: &target,
            position,
            timestamp,
            offset: Vec2::ZERO,
        };
        if !self.handler.on_before_start(&ev) {
            return false;
        }
        self.handler.on_pointer_down(&ev);
        self.press = Some(Press {
            target,
            start: position,
            start_time: timestamp,
            last: position,
            active: false,
            drag_region,
        });
        true
    }

    /// Feed a pointer move. Returns `true` while a drag is active.
    pub fn on_move(&mut self, position: Point, timestamp: u64) -> bool {
        let threshold = self.config.threshold();
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        press.last = position;
        if !press.active {
            if !threshold.exceeded(press.start, position)
                && !threshold.hold_elapsed(press.start_time, timestamp)
            {
                return false;
            }
            self.start(timestamp);
        }
        self.emit(timestamp, |h, ev| h.on_drag(ev));
        true
    }

    /// Fire the auto-start delay if it is due.
    pub fn on_tick(&mut self, now: u64) {
        let threshold = self.config.threshold();
        let due = self
            .press
            .as_ref()
            .is_some_and(|p| !p.active && threshold.hold_elapsed(p.start_time, now));
        if due {
            self.start(now);
        }
    }

    /// The next timestamp at which [`on_tick`](Self::on_tick) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        let press = self.press.as_ref().filter(|p| !p.active)?;
        self.config.threshold().deadline(press.start_time)
    }

    /// Release the press and report whether it was a click or a drag.
    pub fn on_up(&mut self, position: Point, timestamp: u64) -> Gesture {
        let Some(press) = self.press.as_mut() else {
            return Gesture::None;
        };
        press.last = position;
        let was_active = press.active;
        if was_active {
            self.emit(timestamp, |h, ev| h.on_end(ev));
        }
        self.emit(timestamp, |h, ev| h.on_pointer_up(ev));
        self.press = None;
        if was_active {
            tracing::debug!(x = position.x, y = position.y, "drag tracker ended drag");
            Gesture::Drag
        } else {
            Gesture::Click
        }
    }

    /// Abandon the tracked press. A drag in progress receives `on_end`.
    ///
    /// Returns `true` if a press was being tracked.
    pub fn cancel(&mut self, timestamp: u64) -> bool {
        let Some(press) = self.press.as_ref() else {
            return false;
        };
        if press.active {
            self.emit(timestamp, |h, ev| h.on_end(ev));
        }
        self.press = None;
        true
    }

    /// Offset of the pointer since the press, optionally clamped by
    /// [`TrackerConfig::constrain_to`].
    pub fn offset(&self, constrained: bool) -> Vec2 {
        let Some(press) = self.press.as_ref() else {
            return Vec2::ZERO;
        };
        constrained_offset(&self.config, press, constrained)
    }

    fn start(&mut self, timestamp: u64) {
        if let Some(press) = self.press.as_mut() {
            press.active = true;
        }
        tracing::debug!(timestamp, "drag tracker started drag");
        self.emit(timestamp, |h, ev| h.on_start(ev));
    }

    fn emit(&mut self, timestamp: u64, f: impl FnOnce(&mut H, &TrackerEvent<'_, K>)) {
        let Some(press) = self.press.as_ref() else {
            return;
        };
        let ev = TrackerEvent {
            target: &press.target,
            position: press.last,
            timestamp,
            offset: constrained_offset(&self.config, press, true),
        };
        f(&mut self.handler, &ev);
    }
}

fn constrained_offset<K>(config: &TrackerConfig, press: &Press<K>, constrained: bool) -> Vec2 {
    let raw = press.last - press.start;
    let Some(bound) = config.constrain_to.filter(|_| constrained) else {
        return raw;
    };
    match (config.constrain_mode, press.drag_region) {
        (ConstrainMode::DragTarget, Some(region)) => {
            let moved = region.translate_by(raw).constrain_to(&bound);
            moved.origin() - region.origin()
        }
        _ => bound.constrain_point(press.last) - press.start,
    }
}
