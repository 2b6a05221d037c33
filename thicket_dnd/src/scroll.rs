// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scroll of containers while a drag hovers near their edges.
//!
//! Containers are checked in registration order. The first one whose region
//! holds the pointer within an edge zone, and which can scroll that way, wins.
//! Edges are checked bottom, top, right, left. Entering a zone scrolls once
//! immediately, then again every `frequency` milliseconds via
//! [`AutoScroller::on_tick`] until the pointer leaves the zone or the drag ends.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;
use thicket_region::Region;

use crate::config::ScrollConfig;
use crate::error::ConfigError;
use crate::host::{GeometryProvider, ScrollHost};
use crate::types::{ElementId, Group, ScrollDirection};

#[derive(Clone, Debug)]
struct Container {
    config: ScrollConfig,
    /// Bounds measured by the last refresh.
    region: Option<Region>,
}

#[derive(Clone, Debug)]
struct Active<K> {
    container: K,
    direction: ScrollDirection,
    next_tick: u64,
}

/// Drives edge scrolling for registered containers.
#[derive(Clone, Debug)]
pub struct AutoScroller<K> {
    containers: HashMap<K, Container>,
    order: Vec<K>,
    active: Option<Active<K>>,
}

impl<K> Default for AutoScroller<K> {
    fn default() -> Self {
        Self {
            containers: HashMap::new(),
            order: Vec::new(),
            active: None,
        }
    }
}

impl<K: ElementId> AutoScroller<K> {
    /// Create a scroller with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or reconfigure) a scrollable container.
    ///
    /// An invalid `config` is rejected and leaves any existing registration
    /// of `id` untouched.
    pub fn register(&mut self, id: K, config: ScrollConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            tracing::warn!(container = ?id, %err, "scroll container rejected");
            return Err(err);
        }
        if self
            .containers
            .insert(
                id.clone(),
                Container {
                    config,
                    region: None,
                },
            )
            .is_none()
        {
            self.order.push(id);
        }
        Ok(())
    }

    /// Forget a container, stopping it if it is scrolling.
    pub fn unregister(&mut self, id: &K) -> bool {
        if self.containers.remove(id).is_none() {
            return false;
        }
        self.order.retain(|o| o != id);
        if self.active.as_ref().is_some_and(|a| a.container == *id) {
            self.stop();
        }
        true
    }

    /// Remove every container.
    pub fn clear(&mut self) {
        self.containers.clear();
        self.order.clear();
        self.active = None;
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.containers.contains_key(id)
    }

    /// The container currently scrolling, and which way.
    pub fn active(&self) -> Option<(&K, ScrollDirection)> {
        self.active.as_ref().map(|a| (&a.container, a.direction))
    }

    /// Re-measure every container.
    pub fn refresh<G: GeometryProvider<K> + ?Sized>(&mut self, host: &G) {
        for (id, c) in &mut self.containers {
            c.region = host.region_of(id);
        }
    }

    /// React to the pointer moving during a drag of a participant in `groups`.
    ///
    /// Returns the container that scrolled, if one did.
    pub fn on_drag_move<H>(
        &mut self,
        host: &mut H,
        pointer: Point,
        groups: &[Group],
        now: u64,
    ) -> Option<K>
    where
        H: GeometryProvider<K> + ScrollHost<K> + ?Sized,
    {
        let Some((id, direction)) = self.find_zone(&*host, pointer, groups) else {
            self.stop();
            return None;
        };
        if self
            .active
            .as_ref()
            .is_some_and(|a| a.container == id && a.direction == direction)
        {
            // Already repeating for this zone.
            return None;
        }
        let config = self.containers.get(&id)?.config.clone();
        tracing::trace!(container = ?id, ?direction, "auto-scroll engaged");
        self.active = Some(Active {
            container: id.clone(),
            direction,
            next_tick: now.saturating_add(config.frequency),
        });
        host.scroll_by(&id, direction.delta(config.increment)).then_some(id)
    }

    /// Repeat the active scroll if its interval has elapsed.
    ///
    /// Returns the container that scrolled, if one did.
    pub fn on_tick<H>(&mut self, host: &mut H, now: u64) -> Option<K>
    where
        H: ScrollHost<K> + ?Sized,
    {
        let active = self.active.as_mut()?;
        if now < active.next_tick {
            return None;
        }
        let Some(container) = self.containers.get(&active.container) else {
            self.active = None;
            return None;
        };
        active.next_tick = now.saturating_add(container.config.frequency);
        let id = active.container.clone();
        host.scroll_by(&id, active.direction.delta(container.config.increment))
            .then_some(id)
    }

    /// When [`Self::on_tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.next_tick)
    }

    /// Stop scrolling.
    pub fn stop(&mut self) {
        if let Some(a) = self.active.take() {
            tracing::trace!(container = ?a.container, "auto-scroll stopped");
        }
    }

    fn find_zone<H>(
        &self,
        host: &H,
        pointer: Point,
        groups: &[Group],
    ) -> Option<(K, ScrollDirection)>
    where
        H: GeometryProvider<K> + ScrollHost<K> + ?Sized,
    {
        for id in &self.order {
            let Some(c) = self.containers.get(id) else {
                continue;
            };
            if c.config.group.as_ref().is_some_and(|g| !groups.contains(g)) {
                continue;
            }
            let Some(r) = c.region.or_else(|| host.region_of(id)) else {
                continue;
            };
            if !r.contains_point(pointer) {
                continue;
            }
            let t = c.config.edge_threshold;
            let candidates = [
                (r.bottom - pointer.y <= t.y, ScrollDirection::Down),
                (pointer.y - r.top <= t.y, ScrollDirection::Up),
                (r.right - pointer.x <= t.x, ScrollDirection::Right),
                (pointer.x - r.left <= t.x, ScrollDirection::Left),
            ];
            for (near, direction) in candidates {
                if near && host.can_scroll(id, direction) {
                    return Some((id.clone(), direction));
                }
            }
        }
        None
    }
}
