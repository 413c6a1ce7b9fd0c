//! Tail routing: which edge a tail leaves from and where its notch sits.
//!
//! The tip is bucketed by its angle around [`BODY_CENTER`]. The notch then
//! slides along that edge, following the tip at [`TAIL_DAMPING`] strength
//! plus the user's manual offset, and is kept inside the straight part of
//! the edge.

use bevy::math::Vec2;

use super::{
    BODY_BOTTOM, BODY_CENTER, BODY_LEFT, BODY_RIGHT, BODY_TOP, ShapeRecipe, TAIL_DAMPING,
    TAIL_WIDTH, clamp_span,
};

/// Tail tip and notch offset in shape-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailLocal {
    pub tip: Vec2,
    pub offset: f32,
}

impl TailLocal {
    pub fn new(tip: Vec2, offset: f32) -> Self {
        Self { tip, offset }
    }

    /// A tail can only be routed from a finite tip outside the body.
    pub fn is_routable(&self) -> bool {
        self.tip.is_finite() && self.offset.is_finite() && !is_inside_body(self.tip)
    }
}

/// Closed body rectangle test. Points on the border count as inside.
pub fn is_inside_body(p: Vec2) -> bool {
    p.x >= BODY_LEFT && p.x <= BODY_RIGHT && p.y >= BODY_TOP && p.y <= BODY_BOTTOM
}

/// Angle of the tip around the body center, in degrees within `[-180, 180]`.
/// Positive angles point down (screen y grows downward).
pub fn tail_angle(tip: Vec2) -> f32 {
    (tip.y - BODY_CENTER.y)
        .atan2(tip.x - BODY_CENTER.x)
        .to_degrees()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TailEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl TailEdge {
    /// Bucket an angle into an edge. Every angle maps somewhere; anything
    /// outside the right/bottom/top ranges (including NaN) goes left.
    pub fn from_angle(degrees: f32) -> TailEdge {
        if (-45.0..45.0).contains(&degrees) {
            TailEdge::Right
        } else if (45.0..135.0).contains(&degrees) {
            TailEdge::Bottom
        } else if (-135.0..-45.0).contains(&degrees) {
            TailEdge::Top
        } else {
            TailEdge::Left
        }
    }

    pub fn from_tip(tip: Vec2) -> TailEdge {
        Self::from_angle(tail_angle(tip))
    }

    /// Left and right edges run vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, TailEdge::Left | TailEdge::Right)
    }

    /// The pointer axis that slides a notch along this edge.
    pub fn offset_axis(self) -> OffsetAxis {
        if self.is_vertical() {
            OffsetAxis::Vertical
        } else {
            OffsetAxis::Horizontal
        }
    }

    /// Clockwise outlines walk the top and right edges toward increasing
    /// coordinates, and the bottom and left edges toward decreasing ones.
    fn runs_forward(self) -> bool {
        matches!(self, TailEdge::Top | TailEdge::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetAxis {
    Horizontal,
    Vertical,
}

impl OffsetAxis {
    /// Pick the component of `delta` along this axis.
    pub fn component(self, delta: Vec2) -> f32 {
        match self {
            OffsetAxis::Horizontal => delta.x,
            OffsetAxis::Vertical => delta.y,
        }
    }
}

/// Straight stretch of an edge that a notch may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpan {
    pub edge: TailEdge,
    /// x for vertical edges, y for horizontal ones
    pub fixed: f32,
    pub lo: f32,
    pub hi: f32,
}

impl EdgeSpan {
    /// Span of an outline edge between its corner arcs.
    pub fn outline(edge: TailEdge, rx: f32, ry: f32) -> Self {
        match edge {
            TailEdge::Top => Self::new(edge, BODY_TOP, BODY_LEFT + rx, BODY_RIGHT - rx),
            TailEdge::Bottom => Self::new(edge, BODY_BOTTOM, BODY_LEFT + rx, BODY_RIGHT - rx),
            TailEdge::Right => Self::new(edge, BODY_RIGHT, BODY_TOP + ry, BODY_BOTTOM - ry),
            TailEdge::Left => Self::new(edge, BODY_LEFT, BODY_TOP + ry, BODY_BOTTOM - ry),
        }
    }

    /// Anchor span of the cloud arc the notch replaces part of.
    pub fn cloud(edge: TailEdge) -> Self {
        match edge {
            TailEdge::Left => Self::new(edge, 16.0, 40.0, 65.0),
            TailEdge::Top => Self::new(edge, 12.0, 30.0, 55.0),
            TailEdge::Right => Self::new(edge, 84.0, 30.0, 70.0),
            TailEdge::Bottom => Self::new(edge, 85.0, 35.0, 60.0),
        }
    }

    /// Span for `edge` under `recipe`, if the recipe takes tails at all.
    pub fn for_recipe(recipe: &ShapeRecipe, edge: TailEdge) -> Option<Self> {
        match *recipe {
            ShapeRecipe::Outline { rx, ry } => Some(Self::outline(edge, rx, ry)),
            ShapeRecipe::Cloud => Some(Self::cloud(edge)),
            ShapeRecipe::Burst | ShapeRecipe::Boxed(_) => None,
        }
    }

    fn new(edge: TailEdge, fixed: f32, lo: f32, hi: f32) -> Self {
        Self { edge, fixed, lo, hi }
    }

    /// Point on the edge at coordinate `along`.
    pub fn point_at(&self, along: f32) -> Vec2 {
        if self.edge.is_vertical() {
            Vec2::new(self.fixed, along)
        } else {
            Vec2::new(along, self.fixed)
        }
    }

    pub fn extent(&self) -> f32 {
        (self.hi - self.lo).max(0.0)
    }
}

/// The three points a tail adds to an edge, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notch {
    pub start: Vec2,
    pub tip: Vec2,
    pub end: Vec2,
}

impl Notch {
    /// Where the tail meets the body.
    pub fn base(&self) -> Vec2 {
        (self.start + self.end) / 2.0
    }
}

/// Place a notch for `tip` on `span`.
pub fn route_tail(span: &EdgeSpan, tip: Vec2, offset: f32) -> Notch {
    let (axis_center, tip_coord) = if span.edge.is_vertical() {
        (BODY_CENTER.y, tip.y)
    } else {
        (BODY_CENTER.x, tip.x)
    };

    let center = axis_center + (tip_coord - axis_center) * TAIL_DAMPING + offset;
    let width = TAIL_WIDTH.min(span.extent());
    let low = clamp_span(center - width / 2.0, span.lo, span.hi - width);
    let high = low + width;

    let (from, to) = if span.edge.runs_forward() {
        (low, high)
    } else {
        (high, low)
    };

    Notch {
        start: span.point_at(from),
        tip,
        end: span.point_at(to),
    }
}

/// Notch for a tail under `recipe`, with its edge. `None` when the recipe
/// has no tail or the tip can't be routed.
pub fn notch_for(recipe: &ShapeRecipe, tail: TailLocal) -> Option<(TailEdge, Notch)> {
    if !tail.is_routable() {
        return None;
    }
    let edge = TailEdge::from_tip(tail.tip);
    let span = EdgeSpan::for_recipe(recipe, edge)?;
    Some((edge, route_tail(&span, tail.tip, tail.offset)))
}

/// Location of the tail-base handle in shape space.
pub fn tail_base_anchor(recipe: &ShapeRecipe, tail: TailLocal) -> Option<Vec2> {
    notch_for(recipe, tail).map(|(_, notch)| notch.base())
}
