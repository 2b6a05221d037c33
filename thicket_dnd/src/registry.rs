// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Participant registry.
//!
//! The registry owns every [`Participant`] and keeps two indices in step with
//! them: group name to members (in registration order) and handle element to
//! owning participant.
//!
//! - Registering an id that is already present replaces it. The replacement
//!   keeps the old participant's handles and takes a fresh registration number.
//! - Unregistering is idempotent and leaves no trace of the id in any index.
//! - Group membership lists are handed out as borrowed slices, so they cannot
//!   change while a caller iterates them.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::config::ParticipantConfig;
use crate::participant::{DragHandler, Participant};
use crate::types::{ElementId, Group};

/// Every registered participant, indexed by element, group, and handle.
pub struct Registry<K> {
    participants: HashMap<K, Participant<K>>,
    groups: HashMap<Group, Vec<K>>,
    handles: HashMap<K, K>,
    next_seq: u64,
}

impl<K: core::fmt::Debug> core::fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("participants", &self.participants.len())
            .field("groups", &self.groups.len())
            .field("handles", &self.handles.len())
            .finish_non_exhaustive()
    }
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            participants: HashMap::new(),
            groups: HashMap::new(),
            handles: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: ElementId> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`, replacing any participant already registered for it.
    ///
    /// Returns the replaced participant.
    pub fn register(
        &mut self,
        id: K,
        config: ParticipantConfig,
        handler: Box<dyn DragHandler<K>>,
    ) -> Option<Participant<K>> {
        let seq = self.next_seq;
        self.next_seq += 1;
        let previous = self.participants.remove(&id);
        if let Some(prev) = &previous {
            self.unindex_groups(prev);
        }
        let mut p = Participant::new(id.clone(), config, handler, seq);
        if let Some(prev) = &previous {
            p.handles = prev.handles.clone();
            p.invalid_handles = prev.invalid_handles.clone();
        }
        for g in &p.config.groups {
            self.groups.entry(g.clone()).or_default().push(id.clone());
        }
        self.participants.insert(id, p);
        previous
    }

    /// Remove `id` and every index entry that refers to it.
    ///
    /// Unknown ids are ignored.
    pub fn unregister(&mut self, id: &K) -> Option<Participant<K>> {
        let p = self.participants.remove(id)?;
        self.unindex_groups(&p);
        self.handles.retain(|_, owner| *owner != *id);
        Some(p)
    }

    /// Remove every participant.
    pub fn clear(&mut self) {
        self.participants.clear();
        self.groups.clear();
        self.handles.clear();
    }

    /// Make `handle` start drags of `participant`.
    ///
    /// A handle belongs to one participant; registering it again moves it.
    /// Returns `false` if `participant` is not registered.
    pub fn register_handle(&mut self, participant: &K, handle: K) -> bool {
        if !self.participants.contains_key(participant) {
            return false;
        }
        if let Some(prev) = self.handles.insert(handle.clone(), participant.clone()) {
            if prev != *participant {
                if let Some(old) = self.participants.get_mut(&prev) {
                    old.handles.retain(|h| *h != handle);
                }
            }
        }
        if let Some(p) = self.participants.get_mut(participant) {
            if !p.handles.contains(&handle) {
                p.handles.push(handle);
            }
        }
        true
    }

    /// Stop `handle` from starting drags. Returns whether it was registered.
    pub fn unregister_handle(&mut self, handle: &K) -> bool {
        let Some(owner) = self.handles.remove(handle) else {
            return false;
        };
        if let Some(p) = self.participants.get_mut(&owner) {
            p.handles.retain(|h| *h != *handle);
        }
        true
    }

    /// The participant that `handle` belongs to.
    pub fn owner_of_handle(&self, handle: &K) -> Option<&K> {
        self.handles.get(handle)
    }

    /// Mark `el` as never starting a drag of `participant`.
    pub fn add_invalid_handle(&mut self, participant: &K, el: K) -> bool {
        self.participants
            .get_mut(participant)
            .is_some_and(|p| p.add_invalid_handle(el))
    }

    /// Undo [`Self::add_invalid_handle`].
    pub fn remove_invalid_handle(&mut self, participant: &K, el: &K) -> bool {
        self.participants
            .get_mut(participant)
            .is_some_and(|p| p.remove_invalid_handle(el))
    }

    /// Add `id` to `group`. Returns `false` if `id` is unknown or already a member.
    pub fn add_to_group(&mut self, id: &K, group: impl Into<Group>) -> bool {
        let group = group.into();
        let Some(p) = self.participants.get_mut(id) else {
            return false;
        };
        if p.config.groups.contains(&group) {
            return false;
        }
        p.config.groups.push(group.clone());
        self.groups.entry(group).or_default().push(id.clone());
        true
    }

    /// Remove `id` from `group`. Returns whether it was a member.
    pub fn remove_from_group(&mut self, id: &K, group: &Group) -> bool {
        let Some(p) = self.participants.get_mut(id) else {
            return false;
        };
        let before = p.config.groups.len();
        p.config.groups.retain(|g| g != group);
        if p.config.groups.len() == before {
            return false;
        }
        self.remove_member(group, id);
        true
    }

    /// Edit a participant's settings in place, keeping the group index current.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn configure(&mut self, id: &K, f: impl FnOnce(&mut ParticipantConfig)) -> bool {
        let Some(p) = self.participants.get_mut(id) else {
            return false;
        };
        let old_groups = p.config.groups.clone();
        f(&mut p.config);
        let new_groups = p.config.groups.clone();
        for g in old_groups.iter().filter(|g| !new_groups.contains(*g)) {
            self.remove_member(g, id);
        }
        for g in new_groups.iter().filter(|g| !old_groups.contains(*g)) {
            self.groups.entry(g.clone()).or_default().push(id.clone());
        }
        true
    }

    /// Look up a participant.
    pub fn get(&self, id: &K) -> Option<&Participant<K>> {
        self.participants.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &K) -> Option<&mut Participant<K>> {
        self.participants.get_mut(id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.participants.contains_key(id)
    }

    /// Members of `group` in registration order. Empty for unknown groups.
    pub fn get_by_group(&self, group: &Group) -> &[K] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every group with at least one member.
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.keys()
    }

    /// Every registered participant, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant<K>> + '_ {
        self.participants.values()
    }

    /// Number of registered participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn unindex_groups(&mut self, p: &Participant<K>) {
        for g in &p.config.groups {
            self.remove_member(g, &p.id);
        }
    }

    fn remove_member(&mut self, group: &Group, id: &K) {
        if let Some(members) = self.groups.get_mut(group) {
            members.retain(|m| m != id);
            if members.is_empty() {
                self.groups.remove(group);
            }
        }
    }
}
