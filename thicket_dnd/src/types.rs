// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types shared by the registry, the coordinator, and handlers.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use kurbo::{Point, Vec2};
use thicket_drag_tracker::PointerButton;
use thicket_region::Region;

/// Bounds required of element keys.
///
/// Elements are whatever the host uses to name a node: a widget id, an arena
/// index, a string. The coordinator only compares, hashes, and clones them.
pub trait ElementId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> ElementId for T {}

/// Name of an interaction group.
///
/// A dragged participant only interacts with targets that share at least one
/// group with it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Group(Cow<'static, str>);

impl Group {
    /// The group every participant joins when no other group is given.
    pub const DEFAULT: Self = Self(Cow::Borrowed("default"));

    /// Create a group from a static or owned name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The group name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<&'static str> for Group {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Group {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags::bitflags! {
    /// What a participant can do in a drag.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// Can be picked up and dragged.
        const DRAG = 1 << 0;
        /// Can receive enter/over/out/drop notifications.
        const TARGET = 1 << 1;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::DRAG | Self::TARGET
    }
}

/// How a target is matched against the drag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchMode {
    /// The pointer position must lie inside the target's padded region.
    #[default]
    Point,
    /// The dragged element's region must overlap the target's padded region
    /// with non-zero area.
    Intersect,
}

/// What to do with a drag that is still live when a new press arrives.
///
/// This happens when the release was lost, for example because it landed
/// outside the window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StalePolicy {
    /// Abort the old drag: out notifications, then invalid drop, then end.
    #[default]
    Cancel,
    /// Finish the old drag as if it had been released at its last position.
    DropAtLastPosition,
}

/// The coordinator's lifecycle phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragState {
    /// No pointer interaction in progress.
    Quiescent,
    /// A participant is pressed but the drag threshold has not been met.
    AwaitingThreshold,
    /// A drag is in progress.
    Dragging,
}

/// Direction of an auto-scroll step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward the top edge.
    Up,
    /// Toward the bottom edge.
    Down,
    /// Toward the left edge.
    Left,
    /// Toward the right edge.
    Right,
}

impl ScrollDirection {
    /// The scroll delta for a step of `increment` pixels in this direction.
    pub fn delta(self, increment: f64) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -increment),
            Self::Down => Vec2::new(0.0, increment),
            Self::Left => Vec2::new(-increment, 0.0),
            Self::Right => Vec2::new(increment, 0.0),
        }
    }
}

/// Snapshot of a drag passed to every handler callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEvent<'a, K> {
    /// The dragged participant.
    pub source: &'a K,
    /// Pointer position in page coordinates.
    pub position: Point,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Button that started the press.
    pub button: PointerButton,
    /// Where the dragged element is now, after constraints.
    pub region: Region,
    /// Pointer offset from the dragged element's top-left at press time.
    pub delta: Vec2,
}

/// Result of releasing the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome<K> {
    /// No press was being tracked.
    Idle,
    /// The press was released before it became a drag.
    Click,
    /// A move-only drag ended. Targets were never consulted.
    Moved,
    /// The drag ended over no target.
    Invalid,
    /// The drag ended over one or more targets.
    Dropped {
        /// Every matched target, nearest first.
        targets: alloc::vec::Vec<K>,
        /// The subset of `targets` whose handler accepted the drop.
        accepted: alloc::vec::Vec<K>,
    },
}

impl<K> DropOutcome<K> {
    /// Whether at least one target accepted the drop.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Dropped { accepted, .. } if !accepted.is_empty())
    }
}
