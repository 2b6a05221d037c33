// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Participants and their behavior hooks.
//!
//! A participant is an element that takes part in drag-and-drop. It may be a
//! source (it can be dragged), a target (others can be dropped on it), or both.
//! Its behavior lives in a [`DragHandler`]; every hook has an empty default,
//! so a handler only implements what it cares about.
//!
//! Hooks come in two families:
//!
//! - Source hooks run on the dragged participant: `start_drag`, `on_drag`,
//!   the batched `on_drag_enter`/`on_drag_over`/`on_drag_out`, and finally one
//!   of `on_drag_drop` or `on_invalid_drop`, then `end_drag`.
//! - Target hooks run on each matched target: `notify_enter`, `notify_over`,
//!   `notify_out`, and `notify_drop`.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::config::ParticipantConfig;
use crate::types::{DragEvent, Group};

/// Behavior attached to a participant.
///
/// Handlers run synchronously inside the coordinator's pointer entry points.
pub trait DragHandler<K> {
    /// A press landed on this participant. Runs before the press is armed.
    fn on_pointer_down(&mut self, ev: &DragEvent<'_, K>) {
        let _ = ev;
    }

    /// The press is about to become a drag. Return `false` to abandon it.
    fn before_start(&mut self, ev: &DragEvent<'_, K>) -> bool {
        let _ = ev;
        true
    }

    /// The drag started at the press position.
    fn start_drag(&mut self, ev: &DragEvent<'_, K>) {
        let _ = ev;
    }

    /// The pointer moved during the drag.
    fn on_drag(&mut self, ev: &DragEvent<'_, K>) {
        let _ = ev;
    }

    /// The drag entered these targets, nearest first.
    fn on_drag_enter(&mut self, ev: &DragEvent<'_, K>, targets: &[K]) {
        let _ = (ev, targets);
    }

    /// The drag is still over these targets.
    fn on_drag_over(&mut self, ev: &DragEvent<'_, K>, targets: &[K]) {
        let _ = (ev, targets);
    }

    /// The drag left these targets.
    fn on_drag_out(&mut self, ev: &DragEvent<'_, K>, targets: &[K]) {
        let _ = (ev, targets);
    }

    /// The drag was released over these targets.
    fn on_drag_drop(&mut self, ev: &DragEvent<'_, K>, targets: &[K]) {
        let _ = (ev, targets);
    }

    /// The drag was released over no target, or was aborted.
    fn on_invalid_drop(&mut self, ev: &DragEvent<'_, K>) {
        let _ = ev;
    }

    /// The drag is over. Runs exactly once per started drag.
    fn end_drag(&mut self, ev: &DragEvent<'_, K>) {
        let _ = ev;
    }

    /// The press was released, whether or not it became a drag.
    fn on_pointer_up(&mut self, ev: &DragEvent<'_, K>) {
        let _ = ev;
    }

    /// `source` is now over this target.
    fn notify_enter(&mut self, ev: &DragEvent<'_, K>, source: &K) {
        let _ = (ev, source);
    }

    /// `source` is still over this target.
    fn notify_over(&mut self, ev: &DragEvent<'_, K>, source: &K) {
        let _ = (ev, source);
    }

    /// `source` left this target.
    fn notify_out(&mut self, ev: &DragEvent<'_, K>, source: &K) {
        let _ = (ev, source);
    }

    /// `source` was dropped on this target. Return whether the drop is accepted.
    fn notify_drop(&mut self, ev: &DragEvent<'_, K>, source: &K) -> bool {
        let _ = (ev, source);
        true
    }
}

/// A handler with no behavior, for pure targets or passive sources.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopHandler;

impl<K> DragHandler<K> for NoopHandler {}

/// Which target transition a notification reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    Enter,
    Over,
    Out,
}

impl<K> dyn DragHandler<K> + '_ {
    /// Source-side hook for a batch of targets.
    pub(crate) fn source_transition(
        &mut self,
        t: Transition,
        ev: &DragEvent<'_, K>,
        targets: &[K],
    ) {
        match t {
            Transition::Enter => self.on_drag_enter(ev, targets),
            Transition::Over => self.on_drag_over(ev, targets),
            Transition::Out => self.on_drag_out(ev, targets),
        }
    }

    /// Target-side hook for one source.
    pub(crate) fn target_transition(
        &mut self,
        t: Transition,
        ev: &DragEvent<'_, K>,
        source: &K,
    ) {
        match t {
            Transition::Enter => self.notify_enter(ev, source),
            Transition::Over => self.notify_over(ev, source),
            Transition::Out => self.notify_out(ev, source),
        }
    }
}

/// A registered participant: its element, settings, handles, and handler.
pub struct Participant<K> {
    pub(crate) id: K,
    pub(crate) config: ParticipantConfig,
    pub(crate) handles: SmallVec<[K; 2]>,
    pub(crate) invalid_handles: SmallVec<[K; 2]>,
    pub(crate) seq: u64,
    pub(crate) handler: Box<dyn DragHandler<K>>,
}

impl<K: fmt::Debug> fmt::Debug for Participant<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("handles", &self.handles)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl<K: PartialEq> Participant<K> {
    pub(crate) fn new(
        id: K,
        config: ParticipantConfig,
        handler: Box<dyn DragHandler<K>>,
        seq: u64,
    ) -> Self {
        Self {
            id,
            config,
            handles: SmallVec::new(),
            invalid_handles: SmallVec::new(),
            seq,
            handler,
        }
    }

    /// The participant's element.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Current settings.
    pub fn config(&self) -> &ParticipantConfig {
        &self.config
    }

    /// Interaction groups.
    pub fn groups(&self) -> &[Group] {
        &self.config.groups
    }

    /// Explicit drag handles. Empty means the element itself is the handle.
    pub fn handles(&self) -> &[K] {
        &self.handles
    }

    /// Elements inside the participant that never start a drag.
    pub fn invalid_handles(&self) -> &[K] {
        &self.invalid_handles
    }

    /// Registration order; lower registered earlier.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Whether the participant is locked.
    pub fn is_locked(&self) -> bool {
        self.config.locked
    }

    /// Mark an element as unable to start a drag. Returns `false` if it already was.
    pub(crate) fn add_invalid_handle(&mut self, el: K) -> bool {
        if self.invalid_handles.contains(&el) {
            return false;
        }
        self.invalid_handles.push(el);
        true
    }

    /// Undo [`Self::add_invalid_handle`].
    pub(crate) fn remove_invalid_handle(&mut self, el: &K) -> bool {
        let before = self.invalid_handles.len();
        self.invalid_handles.retain(|h| *h != *el);
        self.invalid_handles.len() != before
    }
}
