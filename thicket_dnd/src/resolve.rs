// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target resolution.
//!
//! ## Candidates
//!
//! Every participant sharing a group with the dragged one, minus:
//! the dragged participant itself (unless it opts in), participants that
//! cannot be targets, locked or hidden participants, participants without
//! bounds, and optionally the dragged element's ancestors or descendants.
//!
//! ## Ordering
//!
//! Candidates are ranked by effective z-index, highest first. Equal z-index
//! ties go to the participant registered first.
//!
//! ## Matching
//!
//! Walking the ranking, a candidate matches when the pointer lies in its padded
//! region ([`MatchMode::Point`]) or the dragged region overlaps it with
//! non-zero area ([`MatchMode::Intersect`]). Unless occluded targets are
//! notified, the first match ends the walk.

use hashbrown::HashSet;
use kurbo::Point;
use smallvec::SmallVec;
use thicket_region::Region;

use crate::config::CoordinatorConfig;
use crate::host::{GeometryProvider, is_ancestor};
use crate::registry::Registry;
use crate::session::Session;
use crate::types::{ElementId, MatchMode};

/// Targets for one resolution, nearest first.
pub(crate) type Targets<K> = SmallVec<[K; 4]>;

/// Split the previous and current match sets into transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Transitions<K> {
    /// In the previous set only, in previous order.
    pub(crate) out: Targets<K>,
    /// In the current set only, in current order.
    pub(crate) enter: Targets<K>,
    /// In both, in current order.
    pub(crate) over: Targets<K>,
}

pub(crate) fn diff<K: Clone + PartialEq>(prev: &[K], next: &[K]) -> Transitions<K> {
    let mut t = Transitions {
        out: SmallVec::new(),
        enter: SmallVec::new(),
        over: SmallVec::new(),
    };
    t.out.extend(prev.iter().filter(|k| !next.contains(k)).cloned());
    for k in next {
        if prev.contains(k) {
            t.over.push(k.clone());
        } else {
            t.enter.push(k.clone());
        }
    }
    t
}

/// Rank and match the candidates for the session's dragged participant.
///
/// `session.region` must already reflect `pointer`.
pub(crate) fn find_targets<K, G>(
    registry: &Registry<K>,
    host: &G,
    config: &CoordinatorConfig,
    session: &mut Session<K>,
    pointer: Point,
) -> Targets<K>
where
    K: ElementId,
    G: GeometryProvider<K> + ?Sized,
{
    let mut matched = Targets::new();
    let Some(dragged) = registry.get(&session.dragged) else {
        return matched;
    };

    let mut seen: HashSet<&K> = HashSet::new();
    let mut ranked: SmallVec<[(i32, u64, &K, Region); 8]> = SmallVec::new();
    for group in dragged.groups() {
        for id in registry.get_by_group(group) {
            if !seen.insert(id) {
                continue;
            }
            let Some(p) = registry.get(id) else {
                continue;
            };
            if *id == session.dragged && !dragged.config().match_self {
                continue;
            }
            if !p.config().can_target() || p.is_locked() || !host.is_visible(id) {
                continue;
            }
            if config.exclude_descendants && is_ancestor(host, &session.dragged, id) {
                continue;
            }
            if config.exclude_ancestors && is_ancestor(host, id, &session.dragged) {
                continue;
            }
            let Some(t) = session.target(host, id, config.use_cache) else {
                continue;
            };
            ranked.push((t.z, p.seq(), id, t.region.expand(p.config().padding)));
        }
    }

    // Sequence numbers are unique, so the order is total.
    ranked.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    for (_, _, id, region) in ranked {
        let hit = match config.mode {
            MatchMode::Point => region.contains_point(pointer),
            MatchMode::Intersect => session.region.intersect(&region).is_some(),
        };
        if hit {
            matched.push(id.clone());
            if !config.notify_occluded {
                break;
            }
        }
    }
    matched
}
