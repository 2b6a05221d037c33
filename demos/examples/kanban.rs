// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted kanban board driven through `thicket_dnd`.
//!
//! Three columns hold cards. Cards are dragged by a grip, dropped onto columns, and
//! the middle column scrolls when a drag hovers near its bottom edge. The "done"
//! column refuses cards while it is full.
//!
//! Run:
//! - `cargo run -p thicket_demos --example kanban`
//! - `RUST_LOG=thicket_dnd=trace cargo run -p thicket_demos --example kanban` for
//!   the coordinator's own logging.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use thicket_dnd::{
    ConfigError, DragCoordinator, DragEvent, DragHandler, GeometryProvider, ParticipantConfig,
    PointerButton, PointerCapture, Region, ScrollConfig, ScrollDirection, ScrollHost,
};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum El {
    Column(u8),
    Card(u8),
    Grip(u8),
}

/// Element tree with fixed layout, plus a per-column scroll offset.
#[derive(Debug, Default)]
struct Board {
    bounds: HashMap<El, Region>,
    parents: HashMap<El, El>,
    scroll: HashMap<El, f64>,
    content_height: HashMap<El, f64>,
}

impl Board {
    fn column(&mut self, n: u8, x: f64) {
        let col = El::Column(n);
        self.bounds.insert(col, Region::from_xywh(x, 0.0, 200.0, 300.0));
        self.scroll.insert(col, 0.0);
        self.content_height.insert(col, 300.0);
    }

    fn card(&mut self, n: u8, column: u8) {
        let col = El::Column(column);
        let slot = self
            .parents
            .values()
            .filter(|p| **p == col)
            .count() as f64;
        let x = self.bounds[&col].left + 10.0;
        let region = Region::from_xywh(x, 10.0 + slot * 60.0, 180.0, 50.0);
        self.bounds.insert(El::Card(n), region);
        self.bounds.insert(
            El::Grip(n),
            Region::from_xywh(region.left, region.top, 20.0, region.height()),
        );
        self.parents.insert(El::Card(n), col);
        self.parents.insert(El::Grip(n), El::Card(n));
        let h = self.content_height.entry(col).or_default();
        *h = h.max(region.bottom + 10.0);
    }

    fn column_of(&self, el: El) -> Option<El> {
        let mut cur = self.parents.get(&el).copied();
        while let Some(p) = cur {
            if matches!(p, El::Column(_)) {
                return Some(p);
            }
            cur = self.parents.get(&p).copied();
        }
        None
    }
}

impl GeometryProvider<El> for Board {
    fn region_of(&self, id: &El) -> Option<Region> {
        let r = *self.bounds.get(id)?;
        let offset = self
            .column_of(*id)
            .and_then(|c| self.scroll.get(&c))
            .copied()
            .unwrap_or(0.0);
        Some(r.translate_by(Vec2::new(0.0, -offset)))
    }

    fn z_index_of(&self, id: &El) -> Option<i32> {
        matches!(id, El::Column(_)).then_some(0)
    }

    fn parent_of(&self, id: &El) -> Option<El> {
        self.parents.get(id).copied()
    }

    fn viewport(&self) -> Option<Region> {
        Some(Region::from_xywh(0.0, 0.0, 700.0, 300.0))
    }
}

impl PointerCapture for Board {
    fn capture_pointer(&mut self) {
        tracing::debug!("pointer captured");
    }

    fn release_pointer(&mut self) {
        tracing::debug!("pointer released");
    }
}

impl ScrollHost<El> for Board {
    fn can_scroll(&self, id: &El, direction: ScrollDirection) -> bool {
        let (Some(offset), Some(content)) = (self.scroll.get(id), self.content_height.get(id))
        else {
            return false;
        };
        let visible = self.bounds.get(id).map_or(0.0, |r| r.height());
        match direction {
            ScrollDirection::Down => offset + visible < *content,
            ScrollDirection::Up => *offset > 0.0,
            ScrollDirection::Left | ScrollDirection::Right => false,
        }
    }

    fn scroll_by(&mut self, id: &El, delta: Vec2) -> bool {
        let (Some(offset), Some(content)) = (self.scroll.get(id), self.content_height.get(id))
        else {
            return false;
        };
        let visible = self.bounds.get(id).map_or(0.0, |r| r.height());
        let next = (offset + delta.y).clamp(0.0, (content - visible).max(0.0));
        let moved = next != *offset;
        self.scroll.insert(*id, next);
        tracing::info!(column = ?id, offset = next, "column scrolled");
        moved
    }
}

/// Shared board model the handlers update.
type Cards = Rc<RefCell<HashMap<u8, u8>>>;

struct ColumnTarget {
    n: u8,
    cards: Cards,
    capacity: usize,
}

impl DragHandler<El> for ColumnTarget {
    fn notify_enter(&mut self, _: &DragEvent<'_, El>, source: &El) {
        tracing::info!(column = self.n, ?source, "highlight on");
    }

    fn notify_out(&mut self, _: &DragEvent<'_, El>, source: &El) {
        tracing::info!(column = self.n, ?source, "highlight off");
    }

    fn notify_drop(&mut self, _: &DragEvent<'_, El>, source: &El) -> bool {
        let El::Card(card) = *source else {
            return false;
        };
        let mut cards = self.cards.borrow_mut();
        let held = cards.values().filter(|c| **c == self.n).count();
        if held >= self.capacity {
            tracing::warn!(column = self.n, card, "column full; drop refused");
            return false;
        }
        cards.insert(card, self.n);
        true
    }
}

struct CardSource {
    n: u8,
}

impl DragHandler<El> for CardSource {
    fn start_drag(&mut self, ev: &DragEvent<'_, El>) {
        tracing::info!(card = self.n, at = ?ev.position, "picked up");
    }

    fn on_drag_drop(&mut self, ev: &DragEvent<'_, El>, targets: &[El]) {
        tracing::info!(card = self.n, ?targets, region = ?ev.region, "dropped");
    }

    fn on_invalid_drop(&mut self, _: &DragEvent<'_, El>) {
        tracing::info!(card = self.n, "snapped back");
    }
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut board = Board::default();
    for (n, x) in [(0, 0.0), (1, 250.0), (2, 500.0)] {
        board.column(n, x);
    }
    let cards: Cards = Rc::default();
    for (card, column) in [(0, 0), (1, 0), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1), (7, 2)] {
        board.card(card, column);
        cards.borrow_mut().insert(card, column);
    }

    let mut dnd = DragCoordinator::new(board);
    for n in 0..3 {
        let capacity = if n == 2 { 1 } else { usize::MAX };
        dnd.register(
            El::Column(n),
            ParticipantConfig::in_group("cards").target_only(),
            ColumnTarget {
                n,
                cards: cards.clone(),
                capacity,
            },
        )?;
    }
    for n in 0..8 {
        dnd.register(
            El::Card(n),
            ParticipantConfig::in_group("cards").drag_only(),
            CardSource { n },
        )?;
        dnd.register_handle(&El::Card(n), El::Grip(n));
    }
    dnd.register_scroll_container(
        El::Column(1),
        ScrollConfig {
            group: Some("cards".into()),
            ..ScrollConfig::default()
        },
    )?;

    // Grab card 0 by the body: cards only drag by their grip.
    let body = Point::new(100.0, 30.0);
    let armed = dnd.pointer_down(&El::Card(0), PointerButton::Primary, body, 0);
    tracing::info!(armed, "press on card body");

    // Card 0 to the middle column, pausing near its bottom edge to scroll it.
    let grip = Point::new(15.0, 30.0);
    dnd.pointer_down(&El::Grip(0), PointerButton::Primary, grip, 100);
    let mut t = 100;
    for p in [(40.0, 40.0), (150.0, 100.0), (300.0, 150.0), (300.0, 290.0)] {
        t += 16;
        dnd.pointer_move(Point::new(p.0, p.1), t);
    }
    while let Some(deadline) = dnd.next_deadline() {
        if deadline > 1500 {
            break;
        }
        dnd.on_tick(deadline);
        t = deadline;
    }
    dnd.pointer_move(Point::new(300.0, 150.0), t + 16);
    let outcome = dnd.pointer_up(Point::new(300.0, 150.0), t + 32);
    tracing::info!(?outcome, "card 0 released");

    // Card 1 to the full "done" column.
    let grip = Point::new(15.0, 90.0);
    dnd.pointer_down(&El::Grip(1), PointerButton::Primary, grip, 2000);
    dnd.pointer_move(Point::new(550.0, 150.0), 2016);
    let outcome = dnd.pointer_up(Point::new(550.0, 150.0), 2032);
    tracing::info!(?outcome, accepted = outcome.is_accepted(), "card 1 released");

    // Card 7 dropped between columns.
    let grip = Point::new(515.0, 30.0);
    dnd.pointer_down(&El::Grip(7), PointerButton::Primary, grip, 3000);
    dnd.pointer_move(Point::new(225.0, 150.0), 3016);
    let outcome = dnd.pointer_up(Point::new(225.0, 150.0), 3032);
    tracing::info!(?outcome, "card 7 released");

    let mut layout: Vec<_> = cards.borrow().iter().map(|(c, col)| (*c, *col)).collect();
    layout.sort_unstable();
    tracing::info!(?layout, "final board");
    Ok(())
}
