//! Speech-bubble geometry engine.
//!
//! Everything in here is pure: no Bevy systems, no I/O, and no hidden state.
//! The editor calls into it every frame, so the same inputs always produce the
//! same outline.
//!
//! ## Module Structure
//!
//! - [`design`] - The closed set of bubble designs and the shape recipe each maps to
//! - [`path`] - SVG-style path commands, string output, and polyline flattening
//! - [`tail`] - Edge selection and notch placement for bubble tails
//! - [`generator`] - Builds closed outlines for the path-based designs
//! - [`coords`] - Screen / panel-percentage / shape-local conversions
//!
//! ## Shape Space
//!
//! Path-based bubbles are drawn inside a fixed 100x100 canvas that is stretched
//! over the bubble's box. The body occupies `x 5..95, y 5..85`, leaving room
//! below and around it for the tail notch.

pub mod coords;
pub mod design;
pub mod generator;
pub mod path;
pub mod tail;

use bevy::math::Vec2;

pub use coords::{BubbleRect, PanelBounds};
pub use design::{BodyDimensions, BoxStyle, BubbleDesign, ShapeRecipe};
pub use generator::generate_path;
pub use path::{BubblePath, PathCommand};
pub use tail::{TailEdge, TailLocal, tail_base_anchor};

/// Left edge of the body inside the shape canvas
pub const BODY_LEFT: f32 = 5.0;
/// Top edge of the body inside the shape canvas
pub const BODY_TOP: f32 = 5.0;
/// Right edge of the body inside the shape canvas
pub const BODY_RIGHT: f32 = 95.0;
/// Bottom edge of the body inside the shape canvas
pub const BODY_BOTTOM: f32 = 85.0;

/// Reference point for tail angles. Sits above the canvas center because the
/// body is shifted up to make room for a downward tail.
pub const BODY_CENTER: Vec2 = Vec2::new(50.0, 45.0);

/// Width of the notch a tail cuts into the body edge
pub const TAIL_WIDTH: f32 = 18.0;

/// How far the notch follows the tail tip along the edge (0 = pinned to the
/// edge center, 1 = directly under the tip)
pub const TAIL_DAMPING: f32 = 0.3;

/// Clamp that tolerates inverted ranges: when `lo > hi`, `lo` wins.
///
/// `f32::clamp` panics on an inverted range, which a degenerate bubble (or a
/// box wider than its panel) can produce.
pub fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_span_inside_range() {
        assert_eq!(clamp_span(5.0, 0.0, 10.0), 5.0);
    }

    #[test]
    fn test_clamp_span_limits() {
        assert_eq!(clamp_span(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_span(13.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_span_inverted_range_prefers_low() {
        assert_eq!(clamp_span(5.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_body_center_inside_body() {
        assert!(BODY_CENTER.x > BODY_LEFT && BODY_CENTER.x < BODY_RIGHT);
        assert!(BODY_CENTER.y > BODY_TOP && BODY_CENTER.y < BODY_BOTTOM);
    }
}
