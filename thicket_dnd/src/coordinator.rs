// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-drop state machine.
//!
//! ## Lifecycle
//!
//! ```text
//! Quiescent --pointer_down on a draggable handle--> AwaitingThreshold
//! AwaitingThreshold --moved past threshold, or held--> Dragging
//! AwaitingThreshold --pointer_up--> Quiescent (a click)
//! Dragging --pointer_up / cancel--> Quiescent
//! ```
//!
//! Pointer capture is requested when a press is armed and released when the
//! session ends, on every path out of the session.
//!
//! ## Notifications
//!
//! On each move during a drag the dragged participant gets `on_drag`, then the
//! match set is recomputed (see [Target resolution](crate#target-resolution)) and diffed against
//! the previous one. Transitions go out in this order: out, enter, over. For
//! each kind, every affected target is notified first, then the dragged
//! participant receives the whole batch.
//!
//! On release, targets that are no longer matched get `notify_out`, every
//! matched target gets `notify_drop`, and the dragged participant gets
//! `on_drag_drop` (or `on_invalid_drop` when nothing matched), then `end_drag`.
//!
//! ## Lost releases
//!
//! If a press arrives while a session is still live, its release was lost.
//! The stale session is finished first according to
//! [`StalePolicy`](crate::StalePolicy), so the new press always starts
//! from a clean slate.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Point;
use thicket_drag_tracker::PointerButton;
use thicket_region::Region;

use crate::config::{AxisConstraint, CoordinatorConfig, ParticipantConfig, ScrollConfig};
use crate::error::ConfigError;
use crate::host::{DragHost, is_ancestor};
use crate::participant::{DragHandler, Participant, Transition};
use crate::registry::Registry;
use crate::resolve::{self, Transitions};
use crate::scroll::AutoScroller;
use crate::session::{CachedTarget, Phase, Session, SessionGuard};
use crate::types::{DragEvent, DragState, DropOutcome, ElementId, Group, StalePolicy};

/// Coordinates one pointer's drags across every registered participant.
///
/// ## Usage
///
/// - Build with [`DragCoordinator::new`] (default settings) or
///   [`DragCoordinator::try_new`] (validated settings) over a [`DragHost`].
/// - [`register`](Self::register) participants with a [`ParticipantConfig`]
///   and a [`DragHandler`].
/// - Feed pointer input: [`pointer_down`](Self::pointer_down),
///   [`pointer_move`](Self::pointer_move), [`pointer_up`](Self::pointer_up).
/// - Call [`on_tick`](Self::on_tick) when [`next_deadline`](Self::next_deadline)
///   is due, to drive hold-to-drag and auto-scroll.
pub struct DragCoordinator<K, H> {
    config: CoordinatorConfig,
    host: H,
    registry: Registry<K>,
    scroller: AutoScroller<K>,
    session: Option<Session<K>>,
    capturing: bool,
    locked: bool,
}

impl<K: core::fmt::Debug, H> core::fmt::Debug for DragCoordinator<K, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("session", &self.session)
            .field("capturing", &self.capturing)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl<K: ElementId, H: DragHost<K>> DragCoordinator<K, H> {
    /// Create a coordinator with default settings.
    pub fn new(host: H) -> Self {
        Self::with_config(CoordinatorConfig::default(), host)
    }

    /// Create a coordinator without validating `config`.
    pub fn with_config(config: CoordinatorConfig, host: H) -> Self {
        Self {
            config,
            host,
            registry: Registry::new(),
            scroller: AutoScroller::new(),
            session: None,
            capturing: false,
            locked: false,
        }
    }

    /// Create a coordinator, rejecting unusable settings.
    pub fn try_new(config: CoordinatorConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config, host))
    }

    /// Current settings.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Replace the settings. Takes effect from the next event.
    pub fn set_config(&mut self, config: CoordinatorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Registered participants.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// The auto-scroller.
    pub fn auto_scroller(&self) -> &AutoScroller<K> {
        &self.scroller
    }

    /// Lifecycle phase.
    pub fn state(&self) -> DragState {
        match self.session.as_ref().map(|s| s.phase) {
            None => DragState::Quiescent,
            Some(Phase::AwaitingThreshold) => DragState::AwaitingThreshold,
            Some(Phase::Dragging) => DragState::Dragging,
        }
    }

    /// The pressed or dragged participant.
    pub fn dragged(&self) -> Option<&K> {
        self.session.as_ref().map(|s| &s.dragged)
    }

    /// Where the dragged element is, after constraints.
    pub fn dragged_region(&self) -> Option<Region> {
        self.session.as_ref().map(|s| s.region)
    }

    /// Targets the drag is currently over, nearest first.
    pub fn over_targets(&self) -> &[K] {
        self.session.as_ref().map(|s| s.over.as_slice()).unwrap_or(&[])
    }

    /// Whether pointer capture is held.
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    // Registration ----------------------------------------------------------

    /// Register a participant, replacing any previous registration of `id`.
    ///
    /// Replacing the dragged participant aborts the drag first. Returns whether
    /// a previous registration was replaced. An invalid `config` is rejected
    /// before anything changes, leaving any existing registration in place.
    pub fn register(
        &mut self,
        id: K,
        config: ParticipantConfig,
        handler: impl DragHandler<K> + 'static,
    ) -> Result<bool, ConfigError> {
        if let Err(err) = config.validate() {
            tracing::warn!(?id, %err, "participant registration rejected");
            return Err(err);
        }
        self.detach(&id);
        Ok(self.registry.register(id, config, Box::new(handler)).is_some())
    }

    /// Remove a participant. Unknown ids are ignored.
    ///
    /// Removing the dragged participant aborts the drag: its handler still
    /// receives `on_invalid_drop` and `end_drag`. Removing a target the drag is
    /// over drops it from the match set without notifying it.
    pub fn unregister(&mut self, id: &K) -> Option<Participant<K>> {
        self.detach(id);
        self.registry.unregister(id)
    }

    /// Remove every participant and scroll container, aborting any drag.
    pub fn unregister_all(&mut self) {
        self.abort_session();
        self.registry.clear();
        self.scroller.clear();
    }

    /// Return to a freshly constructed state, keeping settings and host.
    pub fn reset(&mut self) {
        self.unregister_all();
        self.locked = false;
    }

    /// See [`Registry::register_handle`].
    pub fn register_handle(&mut self, participant: &K, handle: K) -> bool {
        self.registry.register_handle(participant, handle)
    }

    /// See [`Registry::unregister_handle`].
    pub fn unregister_handle(&mut self, handle: &K) -> bool {
        self.registry.unregister_handle(handle)
    }

    /// See [`Registry::add_invalid_handle`].
    pub fn add_invalid_handle(&mut self, participant: &K, el: K) -> bool {
        self.registry.add_invalid_handle(participant, el)
    }

    /// See [`Registry::remove_invalid_handle`].
    pub fn remove_invalid_handle(&mut self, participant: &K, el: &K) -> bool {
        self.registry.remove_invalid_handle(participant, el)
    }

    /// See [`Registry::add_to_group`].
    pub fn add_to_group(&mut self, id: &K, group: impl Into<Group>) -> bool {
        self.registry.add_to_group(id, group)
    }

    /// See [`Registry::remove_from_group`].
    pub fn remove_from_group(&mut self, id: &K, group: &Group) -> bool {
        self.registry.remove_from_group(id, group)
    }

    /// Edit a participant's settings. Constraint changes apply from the next drag.
    ///
    /// The edited settings are not validated.
    pub fn configure(&mut self, id: &K, f: impl FnOnce(&mut ParticipantConfig)) -> bool {
        self.registry.configure(id, f)
    }

    /// Lock or unlock one participant.
    pub fn set_participant_locked(&mut self, id: &K, locked: bool) -> bool {
        self.configure(id, |c| c.locked = locked)
    }

    /// Limit horizontal travel to `left` pixels left and `right` pixels right of
    /// the drag start, snapping to `tick` if given.
    pub fn set_x_constraint(&mut self, id: &K, left: f64, right: f64, tick: Option<f64>) -> bool {
        let c = AxisConstraint {
            before: left,
            after: right,
            tick,
        };
        self.configure(id, |p| p.x_constraint = Some(c))
    }

    /// Limit vertical travel to `up` pixels above and `down` pixels below the
    /// drag start, snapping to `tick` if given.
    pub fn set_y_constraint(&mut self, id: &K, up: f64, down: f64, tick: Option<f64>) -> bool {
        let c = AxisConstraint {
            before: up,
            after: down,
            tick,
        };
        self.configure(id, |p| p.y_constraint = Some(c))
    }

    /// Remove both axis constraints.
    pub fn clear_constraints(&mut self, id: &K) -> bool {
        self.configure(id, |p| {
            p.x_constraint = None;
            p.y_constraint = None;
        })
    }

    /// Keep both axis constraints but stop snapping.
    pub fn clear_ticks(&mut self, id: &K) -> bool {
        self.configure(id, |p| {
            for c in [&mut p.x_constraint, &mut p.y_constraint].into_iter().flatten() {
                c.tick = None;
            }
        })
    }

    /// Register an auto-scroll container. See [`AutoScroller::register`].
    pub fn register_scroll_container(
        &mut self,
        id: K,
        config: ScrollConfig,
    ) -> Result<(), ConfigError> {
        self.scroller.register(id, config)?;
        if self.state() == DragState::Dragging {
            self.scroller.refresh(&self.host);
        }
        Ok(())
    }

    /// Remove an auto-scroll container.
    pub fn unregister_scroll_container(&mut self, id: &K) -> bool {
        self.scroller.unregister(id)
    }

    // Global lock ------------------------------------------------------------

    /// Stop new presses from arming. A drag already in progress continues.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Undo [`Self::lock`].
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Whether new presses are blocked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // Region cache -----------------------------------------------------------

    /// Re-measure every target in `groups` for the current drag.
    ///
    /// Does nothing outside a drag; the cache lives only as long as a session.
    pub fn refresh_cache(&mut self, groups: &[Group]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for group in groups {
            for id in self.registry.get_by_group(group) {
                match CachedTarget::measure(&self.host, id) {
                    Some(t) => {
                        session.cache.insert(id.clone(), t);
                    }
                    None => {
                        session.cache.remove(id);
                    }
                }
            }
        }
    }

    /// Forget the cached bounds of one target; it is measured again on next use.
    pub fn invalidate_region(&mut self, id: &K) {
        if let Some(session) = self.session.as_mut() {
            session.cache.remove(id);
        }
    }

    /// The viewport or layout changed: re-measure targets and scroll containers.
    pub fn on_resize(&mut self) {
        if self.state() != DragState::Dragging {
            return;
        }
        self.refresh_dragged_groups();
        self.scroller.refresh(&self.host);
    }

    // Pointer input ----------------------------------------------------------

    /// A press on `target`. Returns whether it armed a participant.
    ///
    /// The press arms the innermost participant, walking up from `target`, for
    /// which the element is a handle: an explicitly registered handle, or the
    /// participant's own element when it has none. The participant must be
    /// draggable and unlocked, the button must pass its filter, the target must
    /// not be an invalid handle, and unless it has outer handles the press must
    /// land inside its region.
    pub fn pointer_down(
        &mut self,
        target: &K,
        button: PointerButton,
        position: Point,
        timestamp: u64,
    ) -> bool {
        if self.session.is_some() {
            tracing::warn!(
                dragged = ?self.dragged(),
                "press while a session is live; release was lost"
            );
            self.recover_stale(timestamp);
        }
        if self.locked {
            tracing::trace!("press ignored: coordinator locked");
            return false;
        }
        let Some((id, region)) = self.find_press_owner(target, button, position) else {
            return false;
        };

        let session = Session::new(id.clone(), button, position, timestamp, region);
        if let Some(p) = self.registry.get_mut(&id) {
            p.handler.on_pointer_down(&session.event(&id, position, timestamp));
        }
        tracing::debug!(dragged = ?id, ?position, "press armed");
        self.session = Some(session);
        self.host.capture_pointer();
        self.capturing = true;
        true
    }

    /// The pointer moved.
    pub fn pointer_move(&mut self, position: Point, timestamp: u64) {
        let threshold = self.config.threshold;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.last_position = position;
        session.last_time = timestamp;
        if session.phase == Phase::AwaitingThreshold {
            let met = threshold.exceeded(session.pointer_start, position)
                || threshold.hold_elapsed(session.down_time, timestamp);
            if !met || !self.begin_drag(timestamp) {
                return;
            }
        }
        self.drag_to(position, timestamp);
    }

    /// The pointer was released.
    pub fn pointer_up(&mut self, position: Point, timestamp: u64) -> DropOutcome<K> {
        let Some(session) = self.session.take() else {
            return DropOutcome::Idle;
        };
        let mut guard = SessionGuard::new(self);
        guard.release(session, position, timestamp)
    }

    /// Advance timers to `now`: hold-to-drag and auto-scroll repeats.
    pub fn on_tick(&mut self, now: u64) {
        let threshold = self.config.threshold;
        match self.session.as_ref() {
            Some(s) if s.phase == Phase::AwaitingThreshold => {
                if threshold.hold_elapsed(s.down_time, now) {
                    self.begin_drag(now);
                }
            }
            Some(_) => {
                if let Some(container) = self.scroller.on_tick(&mut self.host, now) {
                    self.invalidate_within(&container);
                }
            }
            None => {}
        }
    }

    /// When [`Self::on_tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        let session = self.session.as_ref()?;
        match session.phase {
            Phase::AwaitingThreshold => self.config.threshold.deadline(session.down_time),
            Phase::Dragging => self.scroller.next_deadline(),
        }
    }

    /// Abort the current press or drag.
    ///
    /// A started drag notifies `notify_out`/`on_drag_out` for every target it
    /// was over, then `on_invalid_drop` and `end_drag`. Returns whether there
    /// was anything to cancel.
    pub fn cancel(&mut self) -> bool {
        let had_session = self.session.is_some();
        self.abort_session();
        had_session
    }

    // Internals --------------------------------------------------------------

    /// Clear session state and release capture. Safe to call repeatedly.
    pub(crate) fn finish_session(&mut self) {
        self.session = None;
        self.scroller.stop();
        if self.capturing {
            self.capturing = false;
            self.host.release_pointer();
        }
    }

    /// Make `id` safe to remove or replace.
    fn detach(&mut self, id: &K) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.dragged == *id {
            tracing::warn!(dragged = ?id, "dragged participant removed; aborting drag");
            self.abort_session();
        } else {
            session.forget(id);
        }
    }

    fn abort_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let timestamp = session.last_time;
        let mut guard = SessionGuard::new(self);
        guard.abort(session, timestamp);
    }

    fn recover_stale(&mut self, timestamp: u64) {
        let Some(session) = self.session.take() else {
            return;
        };
        let policy = self.config.stale_policy;
        let mut guard = SessionGuard::new(self);
        match (policy, session.phase) {
            (StalePolicy::DropAtLastPosition, Phase::Dragging) => {
                let mut session = session;
                let position = session.last_position;
                let outcome = guard.complete_drop(&mut session, position, timestamp);
                tracing::debug!(?outcome, "stale drag dropped at last position");
            }
            _ => guard.abort(session, timestamp),
        }
    }

    fn find_press_owner(
        &self,
        target: &K,
        button: PointerButton,
        position: Point,
    ) -> Option<(K, Region)> {
        let mut cur = Some(target.clone());
        while let Some(el) = cur {
            let owner = match self.registry.owner_of_handle(&el) {
                Some(o) => Some(o.clone()),
                None => self
                    .registry
                    .get(&el)
                    .filter(|p| p.handles().is_empty())
                    .map(|p| p.id().clone()),
            };
            if let Some(id) = owner {
                if let Some(region) = self.can_arm(&id, target, &el, button, position) {
                    return Some((id, region));
                }
            }
            cur = self.host.parent_of(&el);
        }
        None
    }

    /// Check one candidate owner of a press whose handle is `handle`.
    fn can_arm(
        &self,
        id: &K,
        target: &K,
        handle: &K,
        button: PointerButton,
        position: Point,
    ) -> Option<Region> {
        let p = self.registry.get(id)?;
        let config = p.config();
        if !config.can_drag() || config.locked {
            return None;
        }
        if config.primary_button_only && button != PointerButton::Primary {
            return None;
        }
        if !p.invalid_handles().is_empty() {
            // The target, or anything between it and the handle, may be invalid.
            let mut cur = Some(target.clone());
            while let Some(el) = cur {
                if p.invalid_handles().contains(&el) {
                    tracing::trace!(participant = ?id, invalid = ?el, "press on invalid handle");
                    return None;
                }
                if el == *handle {
                    break;
                }
                cur = self.host.parent_of(&el);
            }
        }
        let region = self.host.region_of(id)?;
        if !config.has_outer_handles && !region.contains_point(position) {
            return None;
        }
        Some(region)
    }

    /// Promote the armed press to a drag. Returns `false` if it was vetoed.
    fn begin_drag(&mut self, timestamp: u64) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let dragged = session.dragged.clone();
        let ev = session.event(&dragged, session.pointer_start, timestamp);
        let allowed = match self.registry.get_mut(&dragged) {
            Some(p) => p.handler.before_start(&ev),
            None => false,
        };
        if !allowed {
            tracing::debug!(?dragged, "drag start vetoed");
            self.finish_session();
            return false;
        }

        if let Some(p) = self.registry.get(&dragged) {
            session.resolve_axes(p.config());
        }
        session.phase = Phase::Dragging;
        if let Some(p) = self.registry.get_mut(&dragged) {
            p.handler.start_drag(&ev);
        }
        self.refresh_dragged_groups();
        self.scroller.refresh(&self.host);
        tracing::debug!(?dragged, "drag started");
        true
    }

    /// Clear the cache and re-measure everything in the dragged participant's groups.
    fn refresh_dragged_groups(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.cache.clear();
        let Some(groups) = self.registry.get(&session.dragged).map(|p| p.config().groups.clone())
        else {
            return;
        };
        self.refresh_cache(&groups);
    }

    /// Where the participant's element is clamped to, if anywhere.
    fn bound_for(&self, config: &ParticipantConfig) -> Option<Region> {
        config.constrain_to.or_else(|| {
            if self.config.constrain_to_viewport {
                self.host.viewport()
            } else {
                None
            }
        })
    }

    fn drag_to(&mut self, position: Point, timestamp: u64) {
        let Some(dragged) = self.session.as_ref().map(|s| s.dragged.clone()) else {
            return;
        };
        let Some(p) = self.registry.get(&dragged) else {
            return;
        };
        let move_only = p.config().move_only;
        let groups = p.config().groups.clone();
        let bound = self.bound_for(p.config());

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.place(position, bound);
        let ev = session.event(&dragged, position, timestamp);
        if let Some(p) = self.registry.get_mut(&dragged) {
            p.handler.on_drag(&ev);
        }

        if !move_only {
            let matched =
                resolve::find_targets(&self.registry, &self.host, &self.config, session, position);
            let transitions = resolve::diff(&session.over, &matched);
            // Bookkeeping first, so a panicking handler cannot desync it.
            session.over = matched;
            dispatch(&mut self.registry, &dragged, &ev, &transitions);
        }

        let scrolled = self
            .scroller
            .on_drag_move(&mut self.host, position, &groups, timestamp);
        if let Some(container) = scrolled {
            self.invalidate_within(&container);
        }
    }

    /// A container scrolled: forget the cached bounds of everything inside it.
    fn invalidate_within(&mut self, container: &K) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let host = &self.host;
        session.cache.retain(|id, _| !is_ancestor(host, container, id));
        tracing::trace!(?container, "target cache invalidated after scroll");
    }

    /// Finish a released session. Runs under a [`SessionGuard`].
    fn release(
        &mut self,
        mut session: Session<K>,
        position: Point,
        timestamp: u64,
    ) -> DropOutcome<K> {
        session.last_position = position;
        session.last_time = timestamp;
        let dragged = session.dragged.clone();
        let outcome = match session.phase {
            Phase::AwaitingThreshold => DropOutcome::Click,
            Phase::Dragging => self.complete_drop(&mut session, position, timestamp),
        };
        if let Some(p) = self.registry.get_mut(&dragged) {
            p.handler.on_pointer_up(&session.event(&dragged, position, timestamp));
        }
        tracing::debug!(?dragged, ?outcome, "press released");
        outcome
    }

    /// Resolve and dispatch the drop of a started drag, then end it.
    fn complete_drop(
        &mut self,
        session: &mut Session<K>,
        position: Point,
        timestamp: u64,
    ) -> DropOutcome<K> {
        let dragged = session.dragged.clone();
        let Some(p) = self.registry.get(&dragged) else {
            return DropOutcome::Invalid;
        };
        let move_only = p.config().move_only;
        let bound = self.bound_for(p.config());
        session.place(position, bound);
        let ev = session.event(&dragged, position, timestamp);

        if move_only {
            if let Some(p) = self.registry.get_mut(&dragged) {
                p.handler.end_drag(&ev);
            }
            return DropOutcome::Moved;
        }

        let matched =
            resolve::find_targets(&self.registry, &self.host, &self.config, session, position);
        let left = resolve::diff(&session.over, &matched).out;
        session.over.clear();
        notify(&mut self.registry, Transition::Out, &dragged, &ev, &left);

        let mut accepted = Vec::new();
        for id in &matched {
            if let Some(p) = self.registry.get_mut(id) {
                if p.handler.notify_drop(&ev, &dragged) {
                    accepted.push(id.clone());
                }
            }
        }
        if let Some(p) = self.registry.get_mut(&dragged) {
            if matched.is_empty() {
                p.handler.on_invalid_drop(&ev);
            } else {
                p.handler.on_drag_drop(&ev, &matched);
            }
            p.handler.end_drag(&ev);
        }

        if matched.is_empty() {
            DropOutcome::Invalid
        } else {
            DropOutcome::Dropped {
                targets: matched.into_vec(),
                accepted,
            }
        }
    }

    /// Abort a session without a drop. Runs under a [`SessionGuard`].
    fn abort(&mut self, mut session: Session<K>, timestamp: u64) {
        if session.phase != Phase::Dragging {
            return;
        }
        let dragged = session.dragged.clone();
        let ev = session.event(&dragged, session.last_position, timestamp);
        let over = core::mem::take(&mut session.over);
        notify(&mut self.registry, Transition::Out, &dragged, &ev, &over);
        if let Some(p) = self.registry.get_mut(&dragged) {
            p.handler.on_invalid_drop(&ev);
            p.handler.end_drag(&ev);
        }
        tracing::debug!(?dragged, "drag aborted");
    }
}

/// Send one kind of transition: each target first, then the dragged participant.
fn notify<K: ElementId>(
    registry: &mut Registry<K>,
    kind: Transition,
    dragged: &K,
    ev: &DragEvent<'_, K>,
    targets: &[K],
) {
    if targets.is_empty() {
        return;
    }
    for id in targets {
        if let Some(p) = registry.get_mut(id) {
            p.handler.target_transition(kind, ev, dragged);
        }
    }
    if let Some(p) = registry.get_mut(dragged) {
        p.handler.source_transition(kind, ev, targets);
    }
}

fn dispatch<K: ElementId>(
    registry: &mut Registry<K>,
    dragged: &K,
    ev: &DragEvent<'_, K>,
    t: &Transitions<K>,
) {
    notify(registry, Transition::Out, dragged, ev, &t.out);
    notify(registry, Transition::Enter, dragged, ev, &t.enter);
    notify(registry, Transition::Over, dragged, ev, &t.over);
}

#[cfg(test)]
mod tests;
