// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integration points.
//!
//! The coordinator never touches a real element tree. Everything it needs to
//! know about layout, stacking, and scrolling comes through these traits, and
//! the host implements them over whatever tree it has.
//!
//! Ancestry is walked with [`GeometryProvider::parent_of`]; the caller ensures
//! it is acyclic.

use kurbo::Vec2;
use thicket_region::Region;

use crate::types::ScrollDirection;

/// Layout, stacking, and visibility queries.
pub trait GeometryProvider<K> {
    /// Page-space bounds of an element, or `None` if it is not in the tree.
    fn region_of(&self, id: &K) -> Option<Region>;

    /// The z-index an element declares itself, if it establishes a stacking
    /// context (for example by being absolutely positioned).
    fn z_index_of(&self, id: &K) -> Option<i32> {
        let _ = id;
        None
    }

    /// Parent element, or `None` at the root.
    fn parent_of(&self, id: &K) -> Option<K> {
        let _ = id;
        None
    }

    /// Whether the element is currently shown.
    fn is_visible(&self, id: &K) -> bool {
        let _ = id;
        true
    }

    /// Page-space bounds of the visible viewport, if known.
    fn viewport(&self) -> Option<Region> {
        None
    }
}

/// Routing of all pointer input to the coordinator while a press is live.
pub trait PointerCapture {
    /// Begin routing pointer moves and releases to the coordinator.
    fn capture_pointer(&mut self);
    /// Stop routing pointer input to the coordinator.
    fn release_pointer(&mut self);
}

/// Scrollable containers used by auto-scroll.
pub trait ScrollHost<K> {
    /// Whether `id` has room to scroll in `direction`.
    fn can_scroll(&self, id: &K, direction: ScrollDirection) -> bool {
        let _ = (id, direction);
        false
    }

    /// Scroll `id` by `delta`. Returns whether anything moved.
    fn scroll_by(&mut self, id: &K, delta: Vec2) -> bool {
        let _ = (id, delta);
        false
    }
}

/// Everything the coordinator needs from its host.
pub trait DragHost<K>: GeometryProvider<K> + PointerCapture + ScrollHost<K> {}

impl<K, T: GeometryProvider<K> + PointerCapture + ScrollHost<K>> DragHost<K> for T {}

/// Effective z-index of `id`: its own, or the nearest ancestor's, or `-1`
/// when nothing in the chain declares one.
pub fn resolve_z_index<K, G: GeometryProvider<K> + ?Sized>(host: &G, id: &K) -> i32 {
    if let Some(z) = host.z_index_of(id) {
        return z;
    }
    let mut cur = host.parent_of(id);
    while let Some(el) = cur {
        if let Some(z) = host.z_index_of(&el) {
            return z;
        }
        cur = host.parent_of(&el);
    }
    -1
}

/// Whether `ancestor` is a strict ancestor of `node`.
pub fn is_ancestor<K: PartialEq, G: GeometryProvider<K> + ?Sized>(
    host: &G,
    ancestor: &K,
    node: &K,
) -> bool {
    let mut cur = host.parent_of(node);
    while let Some(el) = cur {
        if el == *ancestor {
            return true;
        }
        cur = host.parent_of(&el);
    }
    false
}
