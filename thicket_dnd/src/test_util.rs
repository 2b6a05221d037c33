// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host and recording handler shared by the unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;
use kurbo::Vec2;
use thicket_region::Region;

use crate::host::{GeometryProvider, PointerCapture, ScrollHost, is_ancestor};
use crate::participant::DragHandler;
use crate::types::{DragEvent, ScrollDirection};

pub(crate) type Id = &'static str;

/// A flat element tree with explicit bounds.
#[derive(Debug, Default)]
pub(crate) struct TestHost {
    pub(crate) regions: HashMap<Id, Region>,
    pub(crate) z: HashMap<Id, i32>,
    pub(crate) parents: HashMap<Id, Id>,
    pub(crate) hidden: Vec<Id>,
    pub(crate) viewport: Option<Region>,
    pub(crate) scrollable: Vec<(Id, ScrollDirection)>,
    pub(crate) scrolled: Vec<(Id, Vec2)>,
    pub(crate) captures: u32,
    pub(crate) releases: u32,
}

impl TestHost {
    pub(crate) fn with(mut self, id: Id, region: Region) -> Self {
        self.regions.insert(id, region);
        self
    }

    pub(crate) fn z_index(mut self, id: Id, z: i32) -> Self {
        self.z.insert(id, z);
        self
    }

    pub(crate) fn child(mut self, id: Id, parent: Id) -> Self {
        self.parents.insert(id, parent);
        self
    }

    pub(crate) fn scrollable(mut self, id: Id, direction: ScrollDirection) -> Self {
        self.scrollable.push((id, direction));
        self
    }

    pub(crate) fn is_capturing(&self) -> bool {
        self.captures > self.releases
    }
}

impl GeometryProvider<Id> for TestHost {
    fn region_of(&self, id: &Id) -> Option<Region> {
        self.regions.get(id).copied()
    }

    fn z_index_of(&self, id: &Id) -> Option<i32> {
        self.z.get(id).copied()
    }

    fn parent_of(&self, id: &Id) -> Option<Id> {
        self.parents.get(id).copied()
    }

    fn is_visible(&self, id: &Id) -> bool {
        !self.hidden.contains(id)
    }

    fn viewport(&self) -> Option<Region> {
        self.viewport
    }
}

impl PointerCapture for TestHost {
    fn capture_pointer(&mut self) {
        self.captures += 1;
    }

    fn release_pointer(&mut self) {
        self.releases += 1;
    }
}

impl ScrollHost<Id> for TestHost {
    fn can_scroll(&self, id: &Id, direction: ScrollDirection) -> bool {
        self.scrollable.contains(&(*id, direction))
    }

    // Content moves opposite to the scroll.
    fn scroll_by(&mut self, id: &Id, delta: Vec2) -> bool {
        self.scrolled.push((*id, delta));
        let host: &Self = self;
        let inside: Vec<Id> = host
            .regions
            .keys()
            .copied()
            .filter(|el| is_ancestor(host, id, el))
            .collect();
        for el in inside {
            if let Some(r) = self.regions.get_mut(&el) {
                *r = r.translate_by(-delta);
            }
        }
        true
    }
}

/// One handler callback, as seen by a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    PointerDown,
    BeforeStart,
    Start,
    Drag,
    Enter(Vec<Id>),
    Over(Vec<Id>),
    Out(Vec<Id>),
    Drop(Vec<Id>),
    InvalidDrop,
    End,
    PointerUp,
    NotifyEnter(Id),
    NotifyOver(Id),
    NotifyOut(Id),
    NotifyDrop(Id),
}

pub(crate) type Log = Rc<RefCell<Vec<(Id, Call)>>>;

/// Appends every callback to a shared log, tagged with the participant id.
#[derive(Debug)]
pub(crate) struct Recorder {
    pub(crate) id: Id,
    pub(crate) log: Log,
    pub(crate) accept: bool,
    pub(crate) allow_start: bool,
    pub(crate) panic_on_drop: bool,
}

impl Recorder {
    pub(crate) fn new(id: Id, log: &Log) -> Self {
        Self {
            id,
            log: log.clone(),
            accept: true,
            allow_start: true,
            panic_on_drop: false,
        }
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push((self.id, call));
    }
}

/// Calls recorded for `id`, in order.
pub(crate) fn calls(log: &Log, id: Id) -> Vec<Call> {
    log.borrow()
        .iter()
        .filter(|(who, _)| *who == id)
        .map(|(_, c)| c.clone())
        .collect()
}

impl DragHandler<Id> for Recorder {
    fn on_pointer_down(&mut self, _: &DragEvent<'_, Id>) {
        self.push(Call::PointerDown);
    }

    fn before_start(&mut self, _: &DragEvent<'_, Id>) -> bool {
        self.push(Call::BeforeStart);
        self.allow_start
    }

    fn start_drag(&mut self, _: &DragEvent<'_, Id>) {
        self.push(Call::Start);
    }

    fn on_drag(&mut self, _: &DragEvent<'_, Id>) {
        self.push(Call::Drag);
    }

    fn on_drag_enter(&mut self, _: &DragEvent<'_, Id>, targets: &[Id]) {
        self.push(Call::Enter(targets.to_vec()));
    }

    fn on_drag_over(&mut self, _: &DragEvent<'_, Id>, targets: &[Id]) {
        self.push(Call::Over(targets.to_vec()));
    }

    fn on_drag_out(&mut self, _: &DragEvent<'_, Id>, targets: &[Id]) {
        self.push(Call::Out(targets.to_vec()));
    }

    fn on_drag_drop(&mut self, _: &DragEvent<'_, Id>, targets: &[Id]) {
        self.push(Call::Drop(targets.to_vec()));
    }

    fn on_invalid_drop(&mut self, _: &DragEvent<'_, Id>) {
        self.push(Call::InvalidDrop);
    }

    fn end_drag(&mut self, _: &DragEvent<'_, Id>) {
        self.push(Call::End);
    }

    fn on_pointer_up(&mut self, _: &DragEvent<'_, Id>) {
        self.push(Call::PointerUp);
    }

    fn notify_enter(&mut self, _: &DragEvent<'_, Id>, source: &Id) {
        self.push(Call::NotifyEnter(*source));
    }

    fn notify_over(&mut self, _: &DragEvent<'_, Id>, source: &Id) {
        self.push(Call::NotifyOver(*source));
    }

    fn notify_out(&mut self, _: &DragEvent<'_, Id>, source: &Id) {
        self.push(Call::NotifyOut(*source));
    }

    fn notify_drop(&mut self, _: &DragEvent<'_, Id>, source: &Id) -> bool {
        self.push(Call::NotifyDrop(*source));
        assert!(!self.panic_on_drop, "drop handler failed");
        self.accept
    }
}
