// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State of one press, from pointer down to teardown.

use core::ops::{Deref, DerefMut};

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use thicket_drag_tracker::PointerButton;
use thicket_region::Region;

use crate::config::{ParticipantConfig, ResolvedAxis};
use crate::coordinator::DragCoordinator;
use crate::host::{DragHost, GeometryProvider, resolve_z_index};
use crate::types::{DragEvent, ElementId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    AwaitingThreshold,
    Dragging,
}

/// A target's measured bounds and effective z-index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CachedTarget {
    pub(crate) region: Region,
    pub(crate) z: i32,
}

impl CachedTarget {
    pub(crate) fn measure<K, G: GeometryProvider<K> + ?Sized>(host: &G, id: &K) -> Option<Self> {
        let region = host.region_of(id)?;
        Some(Self {
            region,
            z: resolve_z_index(host, id),
        })
    }
}

#[derive(Debug)]
pub(crate) struct Session<K> {
    pub(crate) phase: Phase,
    pub(crate) dragged: K,
    pub(crate) button: PointerButton,
    pub(crate) pointer_start: Point,
    pub(crate) down_time: u64,
    pub(crate) last_position: Point,
    pub(crate) last_time: u64,
    /// Dragged element bounds at press time.
    pub(crate) start_region: Region,
    /// Dragged element bounds after the latest move.
    pub(crate) region: Region,
    /// Pointer offset from the element's top-left at press time.
    pub(crate) delta: Vec2,
    pub(crate) x_axis: Option<ResolvedAxis>,
    pub(crate) y_axis: Option<ResolvedAxis>,
    /// Targets the drag is over, nearest first.
    pub(crate) over: SmallVec<[K; 4]>,
    pub(crate) cache: HashMap<K, CachedTarget>,
}

impl<K: ElementId> Session<K> {
    pub(crate) fn new(
        dragged: K,
        button: PointerButton,
        position: Point,
        timestamp: u64,
        region: Region,
    ) -> Self {
        Self {
            phase: Phase::AwaitingThreshold,
            dragged,
            button,
            pointer_start: position,
            down_time: timestamp,
            last_position: position,
            last_time: timestamp,
            start_region: region,
            region,
            delta: position - region.origin(),
            x_axis: None,
            y_axis: None,
            over: SmallVec::new(),
            cache: HashMap::new(),
        }
    }

    /// Build the event handlers see. The event borrows `source`, not the session.
    pub(crate) fn event<'a>(
        &self,
        source: &'a K,
        position: Point,
        timestamp: u64,
    ) -> DragEvent<'a, K> {
        DragEvent {
            source,
            position,
            timestamp,
            button: self.button,
            region: self.region,
            delta: self.delta,
        }
    }

    /// Pin the participant's axis constraints to where the element started.
    pub(crate) fn resolve_axes(&mut self, config: &ParticipantConfig) {
        self.x_axis = config.x_constraint.map(|c| c.resolve(self.start_region.left));
        self.y_axis = config.y_constraint.map(|c| c.resolve(self.start_region.top));
    }

    /// Move the dragged element to follow `pointer`, honoring axis constraints
    /// and then `bound`.
    pub(crate) fn place(&mut self, pointer: Point, bound: Option<Region>) {
        let raw = self.start_region.translate_by(pointer - self.pointer_start);
        let left = self.x_axis.as_ref().map_or(raw.left, |a| a.apply(raw.left));
        let top = self.y_axis.as_ref().map_or(raw.top, |a| a.apply(raw.top));
        let region = Region::from_xywh(left, top, raw.width(), raw.height());
        self.region = match bound {
            Some(b) => region.constrain_to(&b),
            None => region,
        };
    }

    /// Cached bounds for `id`, measuring on a miss. With `use_cache` off the
    /// cache is bypassed entirely.
    pub(crate) fn target<G: GeometryProvider<K> + ?Sized>(
        &mut self,
        host: &G,
        id: &K,
        use_cache: bool,
    ) -> Option<CachedTarget> {
        if !use_cache {
            return CachedTarget::measure(host, id);
        }
        if let Some(c) = self.cache.get(id) {
            return Some(*c);
        }
        let c = CachedTarget::measure(host, id)?;
        self.cache.insert(id.clone(), c);
        Some(c)
    }

    /// Drop every trace of `id` without notifying anyone.
    pub(crate) fn forget(&mut self, id: &K) {
        self.over.retain(|o| *o != *id);
        self.cache.remove(id);
    }
}

/// Tears the session down when dropped.
///
/// Every path that ends a session runs its handlers through this guard, so
/// pointer capture is released and the coordinator returns to quiescent even if
/// a handler panics.
pub(crate) struct SessionGuard<'a, K: ElementId, H: DragHost<K>> {
    coord: &'a mut DragCoordinator<K, H>,
}

impl<'a, K: ElementId, H: DragHost<K>> SessionGuard<'a, K, H> {
    pub(crate) fn new(coord: &'a mut DragCoordinator<K, H>) -> Self {
        Self { coord }
    }
}

impl<K: ElementId, H: DragHost<K>> Drop for SessionGuard<'_, K, H> {
    fn drop(&mut self) {
        self.coord.finish_session();
    }
}

impl<K: ElementId, H: DragHost<K>> Deref for SessionGuard<'_, K, H> {
    type Target = DragCoordinator<K, H>;

    fn deref(&self) -> &Self::Target {
        self.coord
    }
}

impl<K: ElementId, H: DragHost<K>> DerefMut for SessionGuard<'_, K, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.coord
    }
}
