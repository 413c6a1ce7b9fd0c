//! Drag controller: turns pointer movement into overlay updates.
//!
//! A drag starts with [`DragSession::begin`], which snapshots the overlay.
//! Every later pointer position is measured against that snapshot, so the
//! result never accumulates rounding from earlier frames, and
//! [`DragSession::revert`] can restore it exactly.
//!
//! ## Key Types
//!
//! - [`InteractionState`] - Idle, dragging, or editing text
//! - [`DragSession`] - One drag in progress
//!
//! All geometry stays inside the panel: boxes keep `x + w <= 100`,
//! `y + h <= 100` and the minimum size, tails stay within `0..=100`, and
//! tail offsets within the offset limit.

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::bubble::{PanelBounds, TailEdge, clamp_span};
use crate::comic::{Overlay, OverlayId, OverlayUpdate, Tail};
use crate::common::{Corner, DragHandle};
use crate::constants::{
    MIN_HEIGHT_PERCENT, MIN_WIDTH_PERCENT, TAIL_OFFSET_DRAG_FACTOR, TAIL_OFFSET_LIMIT,
};

/// What the pointer is currently doing to the overlays.
#[derive(Resource, Default, Debug)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
    EditingText {
        overlay_id: OverlayId,
        buffer: String,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(self, InteractionState::EditingText { .. })
    }

    /// The overlay being dragged or edited, if any.
    pub fn overlay_id(&self) -> Option<&OverlayId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging(session) => Some(session.overlay_id()),
            InteractionState::EditingText { overlay_id, .. } => Some(overlay_id),
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            InteractionState::Dragging(session) => Some(session),
            _ => None,
        }
    }
}

/// One drag of one handle, measured from where it started.
#[derive(Debug, Clone)]
pub struct DragSession {
    overlay_id: OverlayId,
    handle: DragHandle,
    start_pointer: Vec2,
    snapshot: Overlay,
}

impl DragSession {
    /// Start dragging `handle` of `overlay` from screen position `pointer`.
    ///
    /// `None` while the overlay's panel has no usable bounds, and for tail
    /// handles on a bubble without a tail. No drag starts in either case.
    pub fn begin(
        overlay: &Overlay,
        handle: DragHandle,
        pointer: Vec2,
        bounds: Option<PanelBounds>,
    ) -> Option<Self> {
        bounds?;
        if matches!(handle, DragHandle::Tail | DragHandle::TailBase) && overlay.tail.is_none() {
            return None;
        }
        Some(Self {
            overlay_id: overlay.id.clone(),
            handle,
            start_pointer: pointer,
            snapshot: overlay.clone(),
        })
    }

    pub fn overlay_id(&self) -> &OverlayId {
        &self.overlay_id
    }

    pub fn handle(&self) -> DragHandle {
        self.handle
    }

    pub fn snapshot(&self) -> &Overlay {
        &self.snapshot
    }

    /// The update for the pointer now at `pointer`. `None` when the panel
    /// has no bounds yet or the handle has nothing to move.
    pub fn update(&self, pointer: Vec2, bounds: Option<PanelBounds>) -> Option<OverlayUpdate> {
        let delta = bounds?.delta_to_percent(pointer - self.start_pointer);
        if !delta.is_finite() {
            return None;
        }

        match self.handle {
            DragHandle::Move => Some(self.moved(delta)),
            DragHandle::Resize(corner) => Some(self.resized(corner, delta)),
            DragHandle::Tail => self.tail_moved(delta),
            DragHandle::TailBase => self.tail_base_moved(delta),
        }
    }

    /// The update that puts the overlay back where the drag started.
    pub fn revert(&self) -> OverlayUpdate {
        let s = &self.snapshot;
        let mut update = OverlayUpdate::bounds(s.x, s.y, s.w, s.h);
        update.tail = Some(s.tail);
        update
    }

    fn moved(&self, delta: Vec2) -> OverlayUpdate {
        let s = &self.snapshot;
        OverlayUpdate::position(
            clamp_span(s.x + delta.x, 0.0, 100.0 - s.w),
            clamp_span(s.y + delta.y, 0.0, 100.0 - s.h),
        )
    }

    fn resized(&self, corner: Corner, delta: Vec2) -> OverlayUpdate {
        let s = &self.snapshot;
        let (x, w) = resize_axis(s.x, s.w, delta.x, corner.touches_west(), MIN_WIDTH_PERCENT);
        let (y, h) = resize_axis(s.y, s.h, delta.y, corner.touches_north(), MIN_HEIGHT_PERCENT);
        OverlayUpdate::bounds(x, y, w, h)
    }

    fn tail_moved(&self, delta: Vec2) -> Option<OverlayUpdate> {
        let tail = self.snapshot.tail?;
        Some(OverlayUpdate::tail(Some(Tail::new(
            (tail.x + delta.x).clamp(0.0, 100.0),
            (tail.y + delta.y).clamp(0.0, 100.0),
            tail.offset,
        ))))
    }

    fn tail_base_moved(&self, delta: Vec2) -> Option<OverlayUpdate> {
        let tail = self.snapshot.tail?;
        let rect = self.snapshot.rect();
        // Shape space only picks the edge; the offset follows the panel delta
        let start_tip = rect.panel_to_local(tail.tip())?;

        let along = TailEdge::from_tip(start_tip).offset_axis().component(delta);
        let offset = (tail.offset + along * TAIL_OFFSET_DRAG_FACTOR)
            .clamp(-TAIL_OFFSET_LIMIT, TAIL_OFFSET_LIMIT);

        Some(OverlayUpdate::tail(Some(Tail::new(tail.x, tail.y, offset))))
    }
}

/// Resize one axis of a box. `near` is true when the low edge (west or
/// north) is the one being dragged; the other edge stays put.
pub fn resize_axis(pos: f32, len: f32, delta: f32, near: bool, min_len: f32) -> (f32, f32) {
    let (mut pos, mut len) = if near {
        let (mut p, mut l) = (pos + delta, len - delta);
        if p < 0.0 {
            l += p;
            p = 0.0;
        }
        (p, l)
    } else {
        let l = len + delta;
        (pos, l.min(100.0 - pos))
    };

    if len < min_len {
        if near {
            // Keep the far edge where it was
            pos = pos + len - min_len;
        }
        len = min_len;
    }

    len = len.min(100.0);
    pos = clamp_span(pos, 0.0, 100.0 - len);
    (pos, len)
}
