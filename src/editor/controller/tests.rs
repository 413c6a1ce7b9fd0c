//! Unit tests for the drag controller.

use bevy::prelude::*;

use super::{DragSession, InteractionState, resize_axis};
use crate::bubble::PanelBounds;
use crate::comic::{Overlay, OverlayId, OverlayUpdate, Tail};
use crate::common::{Corner, DragHandle};
use crate::constants::{MIN_HEIGHT_PERCENT, MIN_WIDTH_PERCENT, TAIL_OFFSET_LIMIT};

const EPS: f32 = 1e-3;

/// 400x200 px panel at (100, 50): 1% is 4 px across and 2 px down.
fn bounds() -> Option<PanelBounds> {
    PanelBounds::new(Vec2::new(100.0, 50.0), Vec2::new(400.0, 200.0))
}

fn overlay() -> Overlay {
    let mut overlay = Overlay::new_manual(1, String::new());
    overlay.x = 20.0;
    overlay.y = 20.0;
    overlay.w = 60.0;
    overlay.h = 30.0;
    overlay.tail = Some(Tail::new(50.0, 65.0, 0.0));
    overlay
}

/// Drag `handle` by a panel-percent delta and apply the result.
fn drag(overlay: &mut Overlay, handle: DragHandle, percent: Vec2) -> Option<OverlayUpdate> {
    let start = Vec2::new(300.0, 150.0);
    let pointer = start + percent * Vec2::new(4.0, 2.0);
    let session = DragSession::begin(overlay, handle, start, bounds())?;
    let update = session.update(pointer, bounds())?;
    update.clone().apply(overlay);
    Some(update)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {} got {}",
        expected,
        actual
    );
}

// Move

#[test]
fn test_move_translates_box() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Move, Vec2::new(10.0, -5.0));
    assert_close(o.x, 30.0);
    assert_close(o.y, 15.0);
    assert_close(o.w, 60.0);
}

#[test]
fn test_move_clamps_to_panel() {
    let mut o = overlay();
    let update = drag(&mut o, DragHandle::Move, Vec2::new(90.0, -90.0)).unwrap();
    assert_eq!(update.w, None);
    assert_close(o.x, 40.0);
    assert_close(o.y, 0.0);
}

#[test]
fn test_move_leaves_tail_alone() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Move, Vec2::new(5.0, 5.0));
    assert_eq!(o.tail, Some(Tail::new(50.0, 65.0, 0.0)));
}

// Resize

#[test]
fn test_resize_se_grows_far_edges() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Se), Vec2::new(10.0, 20.0));
    assert_close(o.x, 20.0);
    assert_close(o.y, 20.0);
    assert_close(o.w, 70.0);
    assert_close(o.h, 50.0);
}

#[test]
fn test_resize_se_stops_at_panel_edge() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Se), Vec2::new(50.0, 80.0));
    assert_close(o.w, 80.0);
    assert_close(o.h, 80.0);
}

#[test]
fn test_resize_nw_pins_opposite_corner() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Nw), Vec2::new(-10.0, 5.0));
    assert_close(o.x, 10.0);
    assert_close(o.w, 70.0);
    assert_close(o.y, 25.0);
    assert_close(o.h, 25.0);
    assert_close(o.x + o.w, 80.0);
    assert_close(o.y + o.h, 50.0);
}

#[test]
fn test_resize_nw_past_panel_origin() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Nw), Vec2::new(-30.0, -40.0));
    assert_close(o.x, 0.0);
    assert_close(o.w, 80.0);
    assert_close(o.y, 0.0);
    assert_close(o.h, 50.0);
}

#[test]
fn test_resize_nw_minimum_size_keeps_bottom_right() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Nw), Vec2::new(80.0, 50.0));
    assert_close(o.w, MIN_WIDTH_PERCENT);
    assert_close(o.h, MIN_HEIGHT_PERCENT);
    assert_close(o.x + o.w, 80.0);
    assert_close(o.y + o.h, 50.0);
}

#[test]
fn test_resize_se_minimum_size_keeps_origin() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Se), Vec2::new(-90.0, -90.0));
    assert_close(o.x, 20.0);
    assert_close(o.y, 20.0);
    assert_close(o.w, MIN_WIDTH_PERCENT);
    assert_close(o.h, MIN_HEIGHT_PERCENT);
}

#[test]
fn test_resize_ne_and_sw_mix_edges() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Ne), Vec2::new(5.0, -10.0));
    assert_close(o.x, 20.0);
    assert_close(o.w, 65.0);
    assert_close(o.y, 10.0);
    assert_close(o.h, 40.0);

    let mut o = overlay();
    drag(&mut o, DragHandle::Resize(Corner::Sw), Vec2::new(-5.0, 10.0));
    assert_close(o.x, 15.0);
    assert_close(o.w, 65.0);
    assert_close(o.y, 20.0);
    assert_close(o.h, 40.0);
}

#[test]
fn test_resize_axis_rules() {
    assert_eq!(resize_axis(20.0, 60.0, 10.0, false, 10.0), (20.0, 70.0));
    assert_eq!(resize_axis(20.0, 60.0, 10.0, true, 10.0), (30.0, 50.0));
    assert_eq!(resize_axis(20.0, 60.0, 70.0, true, 10.0), (70.0, 10.0));
    assert_eq!(resize_axis(20.0, 60.0, -70.0, false, 10.0), (20.0, 10.0));
    assert_eq!(resize_axis(95.0, 10.0, 0.0, false, 10.0), (90.0, 10.0));
}

#[test]
fn test_move_then_resize_round_trip() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Move, Vec2::new(-10.0, 10.0));
    drag(&mut o, DragHandle::Resize(Corner::Se), Vec2::new(15.0, 10.0));
    assert_close(o.x, 10.0);
    assert_close(o.y, 30.0);
    assert_close(o.w, 75.0);
    assert_close(o.h, 40.0);
    assert!(o.is_normalized());
}

#[test]
fn test_move_then_resize_se_scenario() {
    let mut o = overlay();
    o.x = 15.0;
    o.y = 10.0;
    o.w = 50.0;
    o.h = 25.0;
    o.tail = Some(Tail::new(40.0, 80.0, 0.0));

    drag(&mut o, DragHandle::Move, Vec2::new(10.0, 5.0));
    assert_close(o.x, 25.0);
    assert_close(o.y, 15.0);
    assert_close(o.w, 50.0);
    assert_close(o.h, 25.0);
    assert_eq!(o.tail, Some(Tail::new(40.0, 80.0, 0.0)));

    drag(&mut o, DragHandle::Resize(Corner::Se), Vec2::new(-20.0, 0.0));
    assert_close(o.w, 30.0);
    assert_close(o.x, 25.0);
    assert_close(o.h, 25.0);
}

#[test]
fn test_resize_nw_minimum_size_scenario() {
    let mut o = overlay();
    o.x = 10.0;
    o.y = 10.0;
    o.w = 15.0;
    o.h = 15.0;

    drag(&mut o, DragHandle::Resize(Corner::Nw), Vec2::new(20.0, 20.0));
    assert_close(o.w, MIN_WIDTH_PERCENT);
    assert_close(o.h, MIN_HEIGHT_PERCENT);
    assert_close(o.x + o.w, 25.0);
    assert_close(o.y + o.h, 25.0);
}

#[test]
fn test_box_stays_inside_panel_over_drag_sequence() {
    let handles = [
        DragHandle::Move,
        DragHandle::Resize(Corner::Nw),
        DragHandle::Resize(Corner::Se),
        DragHandle::Resize(Corner::Ne),
        DragHandle::Resize(Corner::Sw),
    ];
    let deltas = [
        Vec2::new(37.0, -12.0),
        Vec2::new(-85.0, 64.0),
        Vec2::new(120.0, 120.0),
        Vec2::new(-3.5, 0.25),
        Vec2::new(-140.0, -140.0),
        Vec2::new(66.0, -9.0),
    ];

    let mut o = overlay();
    for (i, delta) in deltas.iter().cycle().take(60).enumerate() {
        let handle = handles[i % handles.len()];
        drag(&mut o, handle, *delta);
        assert!(o.x >= 0.0 && o.y >= 0.0, "step {}: {:?}", i, o);
        assert!(o.x + o.w <= 100.0 + EPS, "step {}: {:?}", i, o);
        assert!(o.y + o.h <= 100.0 + EPS, "step {}: {:?}", i, o);
        assert!(o.w >= MIN_WIDTH_PERCENT - EPS && o.h >= MIN_HEIGHT_PERCENT - EPS);
    }
}

// Tail

#[test]
fn test_tail_drag_moves_tip() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Tail, Vec2::new(-20.0, 10.0));
    let tail = o.tail.unwrap();
    assert_close(tail.x, 30.0);
    assert_close(tail.y, 75.0);
    assert_close(o.x, 20.0);
}

#[test]
fn test_tail_drag_clamps_to_panel() {
    let mut o = overlay();
    drag(&mut o, DragHandle::Tail, Vec2::new(80.0, 80.0));
    let tail = o.tail.unwrap();
    assert_close(tail.x, 100.0);
    assert_close(tail.y, 100.0);
}

#[test]
fn test_tail_drag_without_tail() {
    let mut o = overlay();
    o.tail = None;
    assert!(drag(&mut o, DragHandle::Tail, Vec2::new(5.0, 5.0)).is_none());
}

// Tail base

#[test]
fn test_tail_base_bottom_edge_follows_horizontal_motion() {
    let mut o = overlay();
    // Half of the horizontal panel delta feeds the offset, whatever the bubble width
    drag(&mut o, DragHandle::TailBase, Vec2::new(6.0, 40.0));
    let tail = o.tail.unwrap();
    assert_close(tail.offset, 3.0);
    assert_close(tail.x, 50.0);
    assert_close(tail.y, 65.0);
}

#[test]
fn test_tail_base_side_edge_follows_vertical_motion() {
    let mut o = overlay();
    o.tail = Some(Tail::new(95.0, 35.0, 0.0));
    drag(&mut o, DragHandle::TailBase, Vec2::new(50.0, 3.0));
    assert_close(o.tail.unwrap().offset, 1.5);
}

#[test]
fn test_tail_base_rate_ignores_bubble_size() {
    let mut narrow = overlay();
    narrow.w = 12.0;
    narrow.x = 44.0;
    let mut wide = overlay();
    drag(&mut narrow, DragHandle::TailBase, Vec2::new(6.0, 0.0));
    drag(&mut wide, DragHandle::TailBase, Vec2::new(6.0, 0.0));
    assert_close(narrow.tail.unwrap().offset, 3.0);
    assert_close(wide.tail.unwrap().offset, 3.0);
}

#[test]
fn test_bounds_are_read_on_every_update() {
    let o = overlay();
    let start = Vec2::new(300.0, 150.0);
    let session = DragSession::begin(&o, DragHandle::Move, start, bounds()).unwrap();
    let pointer = start + Vec2::new(40.0, 20.0);

    // 400x200: 40 px is 10%, 20 px is 10%
    let update = session.update(pointer, bounds()).unwrap();
    assert_close(update.x.unwrap(), 30.0);
    assert_close(update.y.unwrap(), 30.0);

    // The panel doubled in size mid-drag: the same pixels are now 5%
    let resized = PanelBounds::new(Vec2::new(100.0, 50.0), Vec2::new(800.0, 400.0));
    let update = session.update(pointer, resized).unwrap();
    assert_close(update.x.unwrap(), 25.0);
    assert_close(update.y.unwrap(), 25.0);
}

#[test]
fn test_tail_base_offset_clamped_over_sequence() {
    let mut o = overlay();
    for step in 0..20 {
        let dx = if step % 3 == 0 { -40.0 } else { 25.0 };
        drag(&mut o, DragHandle::TailBase, Vec2::new(dx, 0.0));
        let offset = o.tail.unwrap().offset;
        assert!(offset.abs() <= TAIL_OFFSET_LIMIT + EPS, "step {}: {}", step, offset);
    }
    drag(&mut o, DragHandle::TailBase, Vec2::new(500.0, 0.0));
    assert_close(o.tail.unwrap().offset, TAIL_OFFSET_LIMIT);
}

#[test]
fn test_tail_base_skipped_for_zero_size_box() {
    let mut o = overlay();
    o.w = 0.0;
    let session = DragSession::begin(&o, DragHandle::TailBase, Vec2::ZERO, bounds()).unwrap();
    assert!(session.update(Vec2::new(40.0, 0.0), bounds()).is_none());
}

// Session

#[test]
fn test_begin_requires_panel_bounds() {
    let o = overlay();
    assert!(DragSession::begin(&o, DragHandle::Move, Vec2::ZERO, None).is_none());
    let zero = PanelBounds::new(Vec2::ZERO, Vec2::ZERO);
    assert!(DragSession::begin(&o, DragHandle::Move, Vec2::ZERO, zero).is_none());
}

#[test]
fn test_begin_tail_handles_need_a_tail() {
    let mut o = overlay();
    o.tail = None;
    assert!(DragSession::begin(&o, DragHandle::Tail, Vec2::ZERO, bounds()).is_none());
    assert!(DragSession::begin(&o, DragHandle::TailBase, Vec2::ZERO, bounds()).is_none());
    assert!(DragSession::begin(&o, DragHandle::Move, Vec2::ZERO, bounds()).is_some());
}

#[test]
fn test_no_bounds_means_no_update() {
    let o = overlay();
    let session = DragSession::begin(&o, DragHandle::Move, Vec2::ZERO, bounds()).unwrap();
    assert!(session.update(Vec2::new(40.0, 0.0), None).is_none());
}

#[test]
fn test_update_is_measured_from_start() {
    let o = overlay();
    let session =
        DragSession::begin(&o, DragHandle::Move, Vec2::new(300.0, 150.0), bounds()).unwrap();
    let first = session.update(Vec2::new(340.0, 150.0), bounds()).unwrap();
    let _ = session.update(Vec2::new(900.0, 900.0), bounds());
    let again = session.update(Vec2::new(340.0, 150.0), bounds()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_revert_restores_snapshot() {
    let original = overlay();
    let mut o = original.clone();
    let session =
        DragSession::begin(&o, DragHandle::Resize(Corner::Nw), Vec2::ZERO, bounds()).unwrap();
    if let Some(update) = session.update(Vec2::new(80.0, 40.0), bounds()) {
        update.apply(&mut o);
    }
    assert_ne!(o, original);

    session.revert().apply(&mut o);
    assert_eq!(o, original);
}

#[test]
fn test_interaction_state_accessors() {
    let mut state = InteractionState::default();
    assert!(state.is_idle());
    assert!(state.overlay_id().is_none());

    let o = overlay();
    let session = DragSession::begin(&o, DragHandle::Tail, Vec2::ZERO, bounds()).unwrap();
    state = InteractionState::Dragging(session);
    assert_eq!(state.overlay_id(), Some(&o.id));
    assert_eq!(state.session().map(|s| s.handle()), Some(DragHandle::Tail));

    state = InteractionState::EditingText {
        overlay_id: OverlayId("overlay-1".to_string()),
        buffer: String::new(),
    };
    assert!(state.is_editing_text());
    assert!(state.session().is_none());
}
