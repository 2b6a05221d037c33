// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Vec2;

use super::*;
use crate::test_util::{Call, Id, Log, Recorder, TestHost, calls};
use crate::types::{MatchMode, ScrollDirection};

// "card" is the draggable. Targets "a" and "b" sit to its right.
fn board() -> TestHost {
    TestHost::default()
        .with("card", Region::from_xywh(0.0, 0.0, 40.0, 20.0))
        .with("a", Region::from_xywh(100.0, 0.0, 100.0, 100.0))
        .with("b", Region::from_xywh(300.0, 0.0, 100.0, 100.0))
}

fn setup_with(host: TestHost, config: CoordinatorConfig) -> (DragCoordinator<Id, TestHost>, Log) {
    let log = Log::default();
    let mut c = DragCoordinator::with_config(config, host);
    for id in ["card", "a", "b"] {
        c.register(id, ParticipantConfig::in_group("cards"), Recorder::new(id, &log)).unwrap();
    }
    (c, log)
}

fn setup() -> (DragCoordinator<Id, TestHost>, Log) {
    setup_with(board(), CoordinatorConfig::default())
}

fn press(c: &mut DragCoordinator<Id, TestHost>, target: Id, t: u64) -> bool {
    c.pointer_down(&target, PointerButton::Primary, Point::new(10.0, 10.0), t)
}

fn without_drag(calls: Vec<Call>) -> Vec<Call> {
    calls.into_iter().filter(|c| *c != Call::Drag).collect()
}

fn assert_capture_balanced(c: &DragCoordinator<Id, TestHost>) {
    assert!(!c.is_capturing());
    assert!(!c.host().is_capturing());
    assert_eq!(c.host().captures, c.host().releases);
}

#[test]
fn release_below_threshold_is_click() {
    let (mut c, log) = setup();
    assert!(press(&mut c, "card", 0));
    assert!(c.is_capturing());
    c.pointer_move(Point::new(12.0, 12.0), 10);
    assert_eq!(c.state(), DragState::AwaitingThreshold);

    assert_eq!(c.pointer_up(Point::new(12.0, 12.0), 20), DropOutcome::Click);
    assert_eq!(calls(&log, "card"), [Call::PointerDown, Call::PointerUp]);
    assert_eq!(c.state(), DragState::Quiescent);
    assert_capture_balanced(&c);
}

#[test]
fn crossing_threshold_starts_drag_once() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(14.0, 10.0), 10);
    assert_eq!(c.state(), DragState::Dragging);
    c.pointer_move(Point::new(20.0, 10.0), 20);
    c.pointer_move(Point::new(30.0, 10.0), 30);

    let card = calls(&log, "card");
    assert_eq!(card.iter().filter(|c| **c == Call::Start).count(), 1);
    assert_eq!(
        card,
        [
            Call::PointerDown,
            Call::BeforeStart,
            Call::Start,
            Call::Drag,
            Call::Drag,
            Call::Drag
        ]
    );
    assert_eq!(c.dragged_region(), Some(Region::from_xywh(20.0, 0.0, 40.0, 20.0)));
}

#[test]
fn holding_starts_drag_on_tick() {
    let (mut c, log) = setup();
    press(&mut c, "card", 1000);
    assert_eq!(c.next_deadline(), Some(1350));
    c.on_tick(1349);
    assert_eq!(c.state(), DragState::AwaitingThreshold);
    c.on_tick(1350);
    assert_eq!(c.state(), DragState::Dragging);
    assert_eq!(
        calls(&log, "card"),
        [Call::PointerDown, Call::BeforeStart, Call::Start]
    );
}

#[test]
fn before_start_can_veto() {
    let log = Log::default();
    let mut c = DragCoordinator::new(board());
    let mut card = Recorder::new("card", &log);
    card.allow_start = false;
    c.register("card", ParticipantConfig::default(), card).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(50.0, 10.0), 10);
    assert_eq!(c.state(), DragState::Quiescent);
    assert_eq!(calls(&log, "card"), [Call::PointerDown, Call::BeforeStart]);
    assert_capture_balanced(&c);
}

#[test]
fn enter_over_out_sequence() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    c.pointer_move(Point::new(151.0, 50.0), 20);
    c.pointer_move(Point::new(152.0, 50.0), 30);
    c.pointer_move(Point::new(250.0, 50.0), 40);

    assert_eq!(
        calls(&log, "a"),
        [
            Call::NotifyEnter("card"),
            Call::NotifyOver("card"),
            Call::NotifyOver("card"),
            Call::NotifyOut("card"),
        ]
    );
    assert!(calls(&log, "b").is_empty());

    assert_eq!(c.pointer_up(Point::new(250.0, 50.0), 50), DropOutcome::Invalid);
    assert_eq!(
        without_drag(calls(&log, "card")),
        [
            Call::PointerDown,
            Call::BeforeStart,
            Call::Start,
            Call::Enter(vec!["a"]),
            Call::Over(vec!["a"]),
            Call::Over(vec!["a"]),
            Call::Out(vec!["a"]),
            Call::InvalidDrop,
            Call::End,
            Call::PointerUp,
        ]
    );
    // Nothing reached "a" after it was left.
    assert_eq!(calls(&log, "a").len(), 4);
}

#[test]
fn moving_between_targets_sends_out_before_enter() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    c.pointer_move(Point::new(350.0, 50.0), 20);
    let tail: Vec<(Id, Call)> = log
        .borrow()
        .iter()
        .filter(|(_, c)| *c != Call::Drag)
        .cloned()
        .collect();
    assert_eq!(
        tail[tail.len() - 4..],
        [
            ("a", Call::NotifyOut("card")),
            ("card", Call::Out(vec!["a"])),
            ("b", Call::NotifyEnter("card")),
            ("card", Call::Enter(vec!["b"])),
        ]
    );
    assert_eq!(c.over_targets(), ["b"]);
}

#[test]
fn drop_on_target_notifies_both_sides_once() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    let outcome = c.pointer_up(Point::new(150.0, 50.0), 20);

    assert_eq!(
        outcome,
        DropOutcome::Dropped {
            targets: vec!["a"],
            accepted: vec!["a"],
        }
    );
    assert!(outcome.is_accepted());
    assert_eq!(
        calls(&log, "a"),
        [Call::NotifyEnter("card"), Call::NotifyDrop("card")]
    );
    let card = without_drag(calls(&log, "card"));
    assert_eq!(
        card[3..],
        [
            Call::Enter(vec!["a"]),
            Call::Drop(vec!["a"]),
            Call::End,
            Call::PointerUp,
        ]
    );
    assert_capture_balanced(&c);
}

#[test]
fn drop_resolves_at_release_position() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    // Released over "b" without a move there first.
    let outcome = c.pointer_up(Point::new(350.0, 50.0), 20);
    assert_eq!(
        outcome,
        DropOutcome::Dropped {
            targets: vec!["b"],
            accepted: vec!["b"],
        }
    );
    assert_eq!(
        calls(&log, "a"),
        [Call::NotifyEnter("card"), Call::NotifyOut("card")]
    );
    assert_eq!(calls(&log, "b"), [Call::NotifyDrop("card")]);
}

#[test]
fn drop_on_nothing_is_invalid() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(50.0, 300.0), 10);
    assert_eq!(c.pointer_up(Point::new(50.0, 300.0), 20), DropOutcome::Invalid);

    let card = calls(&log, "card");
    assert_eq!(card.iter().filter(|c| **c == Call::InvalidDrop).count(), 1);
    assert_eq!(card.iter().filter(|c| **c == Call::End).count(), 1);
    assert!(calls(&log, "a").is_empty());
    assert!(calls(&log, "b").is_empty());
}

#[test]
fn target_can_reject_drop() {
    let log = Log::default();
    let mut c = DragCoordinator::new(board());
    c.register("card", ParticipantConfig::in_group("cards"), Recorder::new("card", &log)).unwrap();
    let mut b = Recorder::new("b", &log);
    b.accept = false;
    c.register("b", ParticipantConfig::in_group("cards"), b).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(350.0, 50.0), 10);
    let outcome = c.pointer_up(Point::new(350.0, 50.0), 20);
    assert_eq!(
        outcome,
        DropOutcome::Dropped {
            targets: vec!["b"],
            accepted: vec![],
        }
    );
    assert!(!outcome.is_accepted());
}

#[test]
fn only_topmost_target_is_notified() {
    let host = board()
        .with("low", Region::from_xywh(500.0, 0.0, 100.0, 100.0))
        .with("high", Region::from_xywh(500.0, 0.0, 100.0, 100.0))
        .z_index("high", 5);
    let (mut c, log) = setup_with(host, CoordinatorConfig::default());
    c.register("low", ParticipantConfig::in_group("cards"), Recorder::new("low", &log)).unwrap();
    c.register("high", ParticipantConfig::in_group("cards"), Recorder::new("high", &log)).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(550.0, 50.0), 10);
    assert_eq!(calls(&log, "high"), [Call::NotifyEnter("card")]);
    assert!(calls(&log, "low").is_empty());
    assert_eq!(c.over_targets(), ["high"]);
}

#[test]
fn occluded_targets_notified_when_enabled() {
    let host = board()
        .with("low", Region::from_xywh(500.0, 0.0, 100.0, 100.0))
        .with("high", Region::from_xywh(500.0, 0.0, 100.0, 100.0))
        .z_index("high", 5);
    let config = CoordinatorConfig {
        notify_occluded: true,
        ..CoordinatorConfig::default()
    };
    let (mut c, log) = setup_with(host, config);
    c.register("low", ParticipantConfig::in_group("cards"), Recorder::new("low", &log)).unwrap();
    c.register("high", ParticipantConfig::in_group("cards"), Recorder::new("high", &log)).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(550.0, 50.0), 10);
    assert_eq!(calls(&log, "low"), [Call::NotifyEnter("card")]);
    assert!(
        without_drag(calls(&log, "card")).contains(&Call::Enter(vec!["high", "low"]))
    );
}

#[test]
fn groups_isolate_drags() {
    let (mut c, log) = setup();
    c.remove_from_group(&"a", &Group::from("cards"));
    c.add_to_group(&"a", "files");

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert!(calls(&log, "a").is_empty());

    // Joining the group mid-drag takes effect on the next move.
    c.add_to_group(&"a", "cards");
    c.pointer_move(Point::new(151.0, 50.0), 20);
    assert_eq!(calls(&log, "a"), [Call::NotifyEnter("card")]);
}

#[test]
fn stale_session_is_cancelled_by_next_press() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert_eq!(c.over_targets(), ["a"]);

    // The release was lost; a new press arrives.
    assert!(press(&mut c, "card", 100));
    assert_eq!(c.state(), DragState::AwaitingThreshold);
    assert!(c.over_targets().is_empty());
    assert_eq!(
        calls(&log, "a"),
        [Call::NotifyEnter("card"), Call::NotifyOut("card")]
    );
    let card = without_drag(calls(&log, "card"));
    assert_eq!(
        card[4..],
        [
            Call::Out(vec!["a"]),
            Call::InvalidDrop,
            Call::End,
            Call::PointerDown,
        ]
    );
    assert_eq!(c.host().captures, 2);
    assert_eq!(c.host().releases, 1);

    // The new drag starts from an empty over set.
    c.pointer_move(Point::new(350.0, 50.0), 110);
    assert_eq!(c.over_targets(), ["b"]);
    assert_eq!(calls(&log, "a").len(), 2);
    c.pointer_up(Point::new(350.0, 50.0), 120);
    assert_capture_balanced(&c);
}

#[test]
fn stale_session_ends_before_another_participant_starts() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert_eq!(c.over_targets(), ["a"]);

    // The release was lost; the next press lands on "b".
    assert!(c.pointer_down(&"b", PointerButton::Primary, Point::new(310.0, 10.0), 100));
    assert_eq!(c.state(), DragState::AwaitingThreshold);
    assert!(c.over_targets().is_empty());
    assert_eq!(calls(&log, "b"), [Call::PointerDown]);

    c.pointer_move(Point::new(150.0, 50.0), 110);
    assert_eq!(c.state(), DragState::Dragging);
    assert_eq!(c.over_targets(), ["a"]);

    let entries = log.borrow();
    let position = |id: Id, call: Call| entries.iter().position(|e| e.0 == id && e.1 == call);
    let card_end = position("card", Call::End).unwrap();
    let b_start = position("b", Call::Start).unwrap();
    assert!(card_end < b_start);
    // "a" saw the stale drag leave before the new one arrived.
    assert!(position("a", Call::NotifyOut("card")).unwrap() < card_end);
    assert!(b_start < position("a", Call::NotifyEnter("b")).unwrap());
    drop(entries);

    c.pointer_up(Point::new(150.0, 50.0), 120);
    assert_capture_balanced(&c);
}

#[test]
fn stale_session_can_drop_at_last_position() {
    let config = CoordinatorConfig {
        stale_policy: StalePolicy::DropAtLastPosition,
        ..CoordinatorConfig::default()
    };
    let (mut c, log) = setup_with(board(), config);
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    press(&mut c, "card", 100);

    assert_eq!(
        calls(&log, "a"),
        [Call::NotifyEnter("card"), Call::NotifyDrop("card")]
    );
    assert!(calls(&log, "card").contains(&Call::Drop(vec!["a"])));
}

#[test]
fn capture_is_released_on_every_path() {
    let (mut c, _log) = setup();

    // Click.
    press(&mut c, "card", 0);
    c.pointer_up(Point::new(10.0, 10.0), 1);
    // Drop.
    press(&mut c, "card", 10);
    c.pointer_move(Point::new(150.0, 50.0), 11);
    c.pointer_up(Point::new(150.0, 50.0), 12);
    // Cancel.
    press(&mut c, "card", 20);
    c.pointer_move(Point::new(150.0, 50.0), 21);
    assert!(c.cancel());
    assert!(!c.cancel());
    // Stale press, then release.
    press(&mut c, "card", 30);
    press(&mut c, "card", 40);
    c.pointer_up(Point::new(10.0, 10.0), 41);
    // Release with nothing pressed.
    assert_eq!(c.pointer_up(Point::new(10.0, 10.0), 50), DropOutcome::Idle);

    assert_eq!(c.host().captures, 5);
    assert_capture_balanced(&c);
}

#[test]
fn cancel_notifies_out_then_invalid_drop() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert!(c.cancel());
    assert_eq!(c.state(), DragState::Quiescent);
    assert_eq!(
        calls(&log, "a"),
        [Call::NotifyEnter("card"), Call::NotifyOut("card")]
    );
    let card = without_drag(calls(&log, "card"));
    assert_eq!(
        card[card.len() - 3..],
        [Call::Out(vec!["a"]), Call::InvalidDrop, Call::End]
    );
}

#[test]
fn unregistering_target_mid_drag_purges_it() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert!(c.unregister(&"a").is_some());
    assert!(c.unregister(&"a").is_none());
    assert!(c.over_targets().is_empty());

    c.pointer_move(Point::new(151.0, 50.0), 20);
    assert_eq!(c.pointer_up(Point::new(151.0, 50.0), 30), DropOutcome::Invalid);
    // No out for the removed target, on either side.
    assert_eq!(calls(&log, "a"), [Call::NotifyEnter("card")]);
    assert!(!calls(&log, "card").contains(&Call::Out(vec!["a"])));
}

#[test]
fn unregistering_dragged_participant_aborts() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert!(c.unregister(&"card").is_some());

    assert_eq!(c.state(), DragState::Quiescent);
    assert_capture_balanced(&c);
    let card = without_drag(calls(&log, "card"));
    assert_eq!(
        card[card.len() - 3..],
        [Call::Out(vec!["a"]), Call::InvalidDrop, Call::End]
    );
    assert_eq!(c.pointer_up(Point::new(150.0, 50.0), 20), DropOutcome::Idle);
}

#[test]
fn unregister_all_and_reset_clear_everything() {
    let (mut c, log) = setup();
    c.register_scroll_container("a", ScrollConfig::default()).unwrap();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(50.0, 50.0), 10);
    c.lock();
    c.reset();

    assert!(c.registry().is_empty());
    assert!(!c.auto_scroller().contains(&"a"));
    assert!(!c.is_locked());
    assert_eq!(c.state(), DragState::Quiescent);
    assert!(calls(&log, "card").contains(&Call::End));
    assert_capture_balanced(&c);
}

#[test]
fn explicit_handles_replace_the_element() {
    let host = board()
        .with("grip", Region::from_xywh(0.0, 0.0, 10.0, 20.0))
        .with("label", Region::from_xywh(2.0, 2.0, 6.0, 6.0))
        .child("grip", "card")
        .child("label", "grip");
    let (mut c, _log) = setup_with(host, CoordinatorConfig::default());
    assert!(c.register_handle(&"card", "grip"));

    // The element itself no longer starts a drag.
    assert!(!press(&mut c, "card", 0));
    assert!(press(&mut c, "grip", 10));
    assert_eq!(c.dragged(), Some(&"card"));
    c.pointer_up(Point::new(10.0, 10.0), 11);

    // Presses bubble up from inside a handle.
    assert!(press(&mut c, "label", 20));
    c.pointer_up(Point::new(10.0, 10.0), 21);

    assert!(c.unregister_handle(&"grip"));
    assert!(press(&mut c, "card", 30));
}

#[test]
fn invalid_handles_block_presses() {
    let host = board()
        .with("button", Region::from_xywh(0.0, 0.0, 20.0, 20.0))
        .with("icon", Region::from_xywh(5.0, 5.0, 10.0, 10.0))
        .child("button", "card")
        .child("icon", "button");
    let (mut c, _log) = setup_with(host, CoordinatorConfig::default());
    assert!(c.add_invalid_handle(&"card", "button"));

    assert!(!press(&mut c, "button", 0));
    assert!(!press(&mut c, "icon", 0));
    assert!(press(&mut c, "card", 0));
    c.pointer_up(Point::new(10.0, 10.0), 1);

    assert!(c.remove_invalid_handle(&"card", &"button"));
    assert!(press(&mut c, "icon", 2));
}

#[test]
fn outer_handles_need_opt_in() {
    let host = board().with("remote", Region::from_xywh(900.0, 900.0, 20.0, 20.0));
    let (mut c, _log) = setup_with(host, CoordinatorConfig::default());
    c.register_handle(&"card", "remote");
    let at = Point::new(905.0, 905.0);

    assert!(!c.pointer_down(&"remote", PointerButton::Primary, at, 0));
    c.configure(&"card", |p| p.has_outer_handles = true);
    assert!(c.pointer_down(&"remote", PointerButton::Primary, at, 1));
}

#[test]
fn locks_block_new_presses() {
    let (mut c, _log) = setup();
    c.lock();
    assert!(c.is_locked());
    assert!(!press(&mut c, "card", 0));
    c.unlock();

    c.set_participant_locked(&"card", true);
    assert!(!press(&mut c, "card", 1));
    c.set_participant_locked(&"card", false);
    assert!(press(&mut c, "card", 2));
    c.pointer_up(Point::new(10.0, 10.0), 3);
    assert_capture_balanced(&c);
}

#[test]
fn locked_target_is_skipped() {
    let (mut c, log) = setup();
    c.set_participant_locked(&"a", true);
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert!(calls(&log, "a").is_empty());
}

#[test]
fn secondary_button_is_filtered() {
    let (mut c, _log) = setup();
    let at = Point::new(10.0, 10.0);
    assert!(!c.pointer_down(&"card", PointerButton::Secondary, at, 0));
    c.configure(&"card", |p| p.primary_button_only = false);
    assert!(c.pointer_down(&"card", PointerButton::Secondary, at, 1));
}

#[test]
fn target_only_participant_cannot_be_dragged() {
    let (mut c, _log) = setup();
    c.configure(&"a", |p| *p = ParticipantConfig::in_group("cards").target_only());
    let at = Point::new(150.0, 50.0);
    assert!(!c.pointer_down(&"a", PointerButton::Primary, at, 0));
}

#[test]
fn axis_lock_and_ticks_shape_the_drag() {
    let (mut c, _log) = setup();
    assert!(c.set_y_constraint(&"card", 0.0, 0.0, None));
    assert!(c.set_x_constraint(&"card", 0.0, 200.0, Some(50.0)));

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(130.0, 80.0), 10);
    // Raw left would be 120; the nearest tick is 100. Vertical travel is locked.
    assert_eq!(c.dragged_region(), Some(Region::from_xywh(100.0, 0.0, 40.0, 20.0)));
    c.pointer_move(Point::new(900.0, 80.0), 20);
    assert_eq!(c.dragged_region().map(|r| r.left), Some(200.0));
    c.pointer_up(Point::new(900.0, 80.0), 30);

    assert!(c.clear_ticks(&"card"));
    press(&mut c, "card", 40);
    c.pointer_move(Point::new(130.0, 80.0), 50);
    assert_eq!(c.dragged_region().map(|r| r.left), Some(120.0));
    c.pointer_up(Point::new(130.0, 80.0), 60);

    assert!(c.clear_constraints(&"card"));
    press(&mut c, "card", 70);
    c.pointer_move(Point::new(130.0, 80.0), 80);
    assert_eq!(c.dragged_region().map(|r| r.origin()), Some(Point::new(120.0, 70.0)));
}

#[test]
fn viewport_clamps_when_enabled() {
    let mut host = board();
    host.viewport = Some(Region::from_xywh(0.0, 0.0, 300.0, 200.0));
    let config = CoordinatorConfig {
        constrain_to_viewport: true,
        ..CoordinatorConfig::default()
    };
    let (mut c, _log) = setup_with(host, config);
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(1000.0, 10.0), 10);
    assert_eq!(c.dragged_region(), Some(Region::from_xywh(260.0, 0.0, 40.0, 20.0)));
}

#[test]
fn participant_bound_overrides_viewport() {
    let (mut c, _log) = setup();
    let bound = Region::from_xywh(0.0, 0.0, 100.0, 100.0);
    c.configure(&"card", |p| p.constrain_to = Some(bound));
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(500.0, 500.0), 10);
    assert_eq!(c.dragged_region(), Some(Region::from_xywh(60.0, 80.0, 40.0, 20.0)));
}

#[test]
fn intersect_mode_matches_by_overlap() {
    let config = CoordinatorConfig {
        mode: MatchMode::Intersect,
        ..CoordinatorConfig::default()
    };
    let (mut c, log) = setup_with(board(), config);
    press(&mut c, "card", 0);
    // Pointer at x=95 is left of "a", but the card spans 85..125.
    c.pointer_move(Point::new(95.0, 50.0), 10);
    assert_eq!(calls(&log, "a"), [Call::NotifyEnter("card")]);
}

#[test]
fn move_only_never_consults_targets() {
    let (mut c, log) = setup();
    c.configure(&"card", |p| p.move_only = true);
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    assert_eq!(c.pointer_up(Point::new(150.0, 50.0), 20), DropOutcome::Moved);
    assert!(calls(&log, "a").is_empty());
    let card = without_drag(calls(&log, "card"));
    assert!(!card.contains(&Call::InvalidDrop));
    assert_eq!(card[card.len() - 2..], [Call::End, Call::PointerUp]);
}

#[test]
fn descendants_are_excluded_by_default() {
    let host = board()
        .with("badge", Region::from_xywh(600.0, 0.0, 50.0, 50.0))
        .child("badge", "card");
    let (mut c, log) = setup_with(host, CoordinatorConfig::default());
    c.register("badge", ParticipantConfig::in_group("cards"), Recorder::new("badge", &log)).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(610.0, 10.0), 10);
    assert!(calls(&log, "badge").is_empty());
    c.cancel();

    let mut config = c.config().clone();
    config.exclude_descendants = false;
    c.set_config(config).unwrap();
    press(&mut c, "card", 20);
    c.pointer_move(Point::new(610.0, 10.0), 30);
    assert_eq!(calls(&log, "badge"), [Call::NotifyEnter("card")]);
}

#[test]
fn ancestors_can_be_excluded() {
    let host = board()
        .with("column", Region::from_xywh(0.0, 0.0, 1000.0, 1000.0))
        .child("card", "column");
    let (mut c, log) = setup_with(host, CoordinatorConfig::default());
    c.register("column", ParticipantConfig::in_group("cards"), Recorder::new("column", &log)).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(50.0, 500.0), 10);
    assert_eq!(calls(&log, "column"), [Call::NotifyEnter("card")]);
    c.cancel();

    let mut config = c.config().clone();
    config.exclude_ancestors = true;
    c.set_config(config).unwrap();
    press(&mut c, "card", 20);
    c.pointer_move(Point::new(50.0, 500.0), 30);
    assert_eq!(calls(&log, "column").len(), 2);
}

#[test]
fn cache_refreshes_on_demand() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(20.0, 300.0), 10);

    // Layout changes under the drag; the cached region still wins.
    c.host_mut()
        .regions
        .insert("b", Region::from_xywh(0.0, 280.0, 100.0, 100.0));
    c.pointer_move(Point::new(21.0, 300.0), 20);
    assert!(calls(&log, "b").is_empty());

    c.invalidate_region(&"b");
    c.pointer_move(Point::new(22.0, 300.0), 30);
    assert_eq!(calls(&log, "b"), [Call::NotifyEnter("card")]);

    c.host_mut()
        .regions
        .insert("a", Region::from_xywh(0.0, 280.0, 10.0, 10.0));
    c.on_resize();
    c.pointer_move(Point::new(5.0, 285.0), 40);
    assert_eq!(c.over_targets(), ["a"]);

    c.host_mut()
        .regions
        .insert("b", Region::from_xywh(700.0, 0.0, 10.0, 10.0));
    c.refresh_cache(&[Group::from("cards")]);
    c.pointer_move(Point::new(705.0, 5.0), 50);
    assert_eq!(c.over_targets(), ["b"]);
}

#[test]
fn uncached_mode_tracks_layout_live() {
    let config = CoordinatorConfig {
        use_cache: false,
        ..CoordinatorConfig::default()
    };
    let (mut c, log) = setup_with(board(), config);
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(20.0, 300.0), 10);
    c.host_mut()
        .regions
        .insert("b", Region::from_xywh(0.0, 280.0, 100.0, 100.0));
    c.pointer_move(Point::new(21.0, 300.0), 20);
    assert_eq!(calls(&log, "b"), [Call::NotifyEnter("card")]);
}

#[test]
fn auto_scroll_moves_targets_and_repeats() {
    let host = TestHost::default()
        .with("card", Region::from_xywh(500.0, 500.0, 40.0, 20.0))
        .with("list", Region::from_xywh(0.0, 0.0, 200.0, 400.0))
        .with("slot", Region::from_xywh(0.0, 300.0, 200.0, 100.0))
        .child("slot", "list")
        .scrollable("list", ScrollDirection::Down);
    let log = Log::default();
    let mut c = DragCoordinator::new(host);
    c.register("card", ParticipantConfig::default(), Recorder::new("card", &log)).unwrap();
    c.register("slot", ParticipantConfig::default(), Recorder::new("slot", &log)).unwrap();
    c.register_scroll_container("list", ScrollConfig::default()).unwrap();

    let at = Point::new(510.0, 510.0);
    c.pointer_down(&"card", PointerButton::Primary, at, 0);
    c.pointer_move(Point::new(100.0, 390.0), 100);
    assert_eq!(c.host().scrolled, [("list", Vec2::new(0.0, 100.0))]);
    assert_eq!(c.over_targets(), ["slot"]);
    assert_eq!(c.next_deadline(), Some(600));

    // The slot scrolled out from under the pointer; its cached region was dropped.
    c.pointer_move(Point::new(100.0, 391.0), 200);
    assert!(c.over_targets().is_empty());
    assert_eq!(c.host().scrolled.len(), 1);

    c.on_tick(600);
    assert_eq!(c.host().scrolled.len(), 2);
    assert_eq!(c.next_deadline(), Some(1100));

    c.pointer_up(Point::new(100.0, 391.0), 700);
    assert_eq!(c.next_deadline(), None);
    assert!(c.auto_scroller().active().is_none());
    assert_eq!(
        calls(&log, "slot"),
        [Call::NotifyEnter("card"), Call::NotifyOut("card")]
    );
}

#[test]
fn panicking_handler_still_tears_down() {
    let log = Log::default();
    let mut c = DragCoordinator::new(board());
    c.register("card", ParticipantConfig::in_group("cards"), Recorder::new("card", &log)).unwrap();
    let mut a = Recorder::new("a", &log);
    a.panic_on_drop = true;
    c.register("a", ParticipantConfig::in_group("cards"), a).unwrap();

    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        c.pointer_up(Point::new(150.0, 50.0), 20)
    }));
    assert!(result.is_err());

    assert_eq!(c.state(), DragState::Quiescent);
    assert_capture_balanced(&c);
    assert!(press(&mut c, "card", 30));
}

#[test]
fn try_new_rejects_bad_threshold() {
    let mut config = CoordinatorConfig::default();
    config.threshold.distance = f64::NAN;
    let err = DragCoordinator::try_new(config, board()).unwrap_err();
    assert!(matches!(err, ConfigError::Threshold(d) if d.is_nan()));
}

#[test]
fn reregistering_dragged_participant_aborts_first() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(50.0, 50.0), 10);
    let replaced = c
        .register("card", ParticipantConfig::in_group("cards"), Recorder::new("card", &log))
        .unwrap();
    assert!(replaced);
    assert_eq!(c.state(), DragState::Quiescent);
    assert!(calls(&log, "card").ends_with(&[Call::InvalidDrop, Call::End]));
    assert_capture_balanced(&c);
}

#[test]
fn register_rejects_invalid_config_without_touching_the_drag() {
    let (mut c, log) = setup();
    press(&mut c, "card", 0);
    c.pointer_move(Point::new(150.0, 50.0), 10);

    let bad = ParticipantConfig::in_group("elsewhere")
        .with_x_constraint(AxisConstraint::new(0.0, 100.0).with_tick(0.0));
    let err = c.register("card", bad, Recorder::new("card", &log)).unwrap_err();
    assert_eq!(err, ConfigError::TickSize(0.0));

    assert_eq!(c.state(), DragState::Dragging);
    assert_eq!(c.over_targets(), ["a"]);
    let card = c.registry().get(&"card").unwrap();
    assert_eq!(card.groups(), [Group::from("cards")]);
    assert!(!calls(&log, "card").contains(&Call::End));

    let bad = ParticipantConfig::default().with_y_constraint(AxisConstraint::new(-1.0, 0.0));
    assert!(c.register("new", bad, Recorder::new("new", &log)).is_err());
    assert!(!c.registry().contains(&"new"));

    c.pointer_up(Point::new(150.0, 50.0), 20);
    assert_capture_balanced(&c);
}

#[test]
fn register_scroll_container_rejects_invalid_config() {
    let (mut c, _log) = setup();
    let config = ScrollConfig {
        increment: f64::INFINITY,
        ..ScrollConfig::default()
    };
    assert_eq!(
        c.register_scroll_container("a", config),
        Err(ConfigError::ScrollIncrement(f64::INFINITY))
    );
    assert!(!c.auto_scroller().contains(&"a"));
    assert_eq!(c.next_deadline(), None);
}
