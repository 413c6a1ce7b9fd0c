//! Bubble designs and the shape recipe each one maps to.

use serde::{Deserialize, Serialize};

use super::{BODY_BOTTOM, BODY_LEFT, BODY_RIGHT, BODY_TOP};

/// Corner radius of the `standard` design, in shape-space units
pub const STANDARD_CORNER_RADIUS: f32 = 18.0;

/// Radius used by `rounded` when the overlay style does not set one
pub const DEFAULT_BORDER_RADIUS: f32 = 12.0;

/// Scale from a style border radius to shape-space units
const ROUNDED_RADIUS_SCALE: f32 = 1.2;

/// Keeps `rounded` corners from meeting in the middle of an edge
const ROUNDED_RADIUS_DIVISOR: f32 = 2.1;

const PICKABLE_DESIGNS: &[BubbleDesign] = &[
    BubbleDesign::Standard,
    BubbleDesign::Rounded,
    BubbleDesign::Rectangle,
    BubbleDesign::Cloud,
    BubbleDesign::Spiky,
    BubbleDesign::Webtoon,
    BubbleDesign::Narration,
    BubbleDesign::Cinematic,
    BubbleDesign::Simple,
];

/// Visual design of an overlay.
///
/// The first five variants are drawn as generated outlines; the rest are
/// plain boxes. Tags this build does not know about load as `Unknown`,
/// render nothing, and are written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BubbleDesign {
    #[default]
    Standard,
    Rounded,
    Rectangle,
    Cloud,
    Spiky,
    Webtoon,
    Narration,
    Cinematic,
    Simple,
    Unknown(String),
}

impl From<String> for BubbleDesign {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "standard" => BubbleDesign::Standard,
            "rounded" => BubbleDesign::Rounded,
            "rectangle" => BubbleDesign::Rectangle,
            "cloud" => BubbleDesign::Cloud,
            "spiky" => BubbleDesign::Spiky,
            "webtoon" => BubbleDesign::Webtoon,
            "narration" => BubbleDesign::Narration,
            "cinematic" => BubbleDesign::Cinematic,
            "simple" => BubbleDesign::Simple,
            _ => BubbleDesign::Unknown(tag),
        }
    }
}

impl From<BubbleDesign> for String {
    fn from(design: BubbleDesign) -> Self {
        match design {
            BubbleDesign::Unknown(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl BubbleDesign {
    /// Every design a user can pick, in picker order.
    pub fn all() -> &'static [BubbleDesign] {
        PICKABLE_DESIGNS
    }

    /// The tag stored in comic files.
    pub fn tag(&self) -> &str {
        match self {
            BubbleDesign::Standard => "standard",
            BubbleDesign::Rounded => "rounded",
            BubbleDesign::Rectangle => "rectangle",
            BubbleDesign::Cloud => "cloud",
            BubbleDesign::Spiky => "spiky",
            BubbleDesign::Webtoon => "webtoon",
            BubbleDesign::Narration => "narration",
            BubbleDesign::Cinematic => "cinematic",
            BubbleDesign::Simple => "simple",
            BubbleDesign::Unknown(tag) => tag,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BubbleDesign::Standard => "Speech",
            BubbleDesign::Rounded => "Rounded",
            BubbleDesign::Rectangle => "Square",
            BubbleDesign::Cloud => "Cloud",
            BubbleDesign::Spiky => "Spiky",
            BubbleDesign::Webtoon => "Webtoon",
            BubbleDesign::Narration => "Narration",
            BubbleDesign::Cinematic => "Cinematic",
            BubbleDesign::Simple => "Simple",
            BubbleDesign::Unknown(_) => "Unknown",
        }
    }

    /// Whether this design is drawn from a generated outline.
    pub fn is_path_based(&self) -> bool {
        matches!(
            self,
            BubbleDesign::Standard
                | BubbleDesign::Rounded
                | BubbleDesign::Rectangle
                | BubbleDesign::Cloud
                | BubbleDesign::Spiky
        )
    }

    /// Whether the outline grows a notch toward the tail tip.
    pub fn supports_tail(&self) -> bool {
        self.is_path_based() && *self != BubbleDesign::Spiky
    }

    /// Map the design to its drawing recipe. `None` for unknown designs.
    pub fn recipe(&self, body: BodyDimensions) -> Option<ShapeRecipe> {
        let recipe = match self {
            BubbleDesign::Spiky => ShapeRecipe::Burst,
            BubbleDesign::Rectangle => ShapeRecipe::Outline { rx: 0.0, ry: 0.0 },
            BubbleDesign::Standard => ShapeRecipe::Outline {
                rx: STANDARD_CORNER_RADIUS,
                ry: STANDARD_CORNER_RADIUS,
            },
            BubbleDesign::Rounded => {
                let (rx, ry) = rounded_radii(body);
                ShapeRecipe::Outline { rx, ry }
            }
            BubbleDesign::Cloud => ShapeRecipe::Cloud,
            BubbleDesign::Webtoon => ShapeRecipe::Boxed(BoxStyle::Webtoon),
            BubbleDesign::Narration => ShapeRecipe::Boxed(BoxStyle::Narration),
            BubbleDesign::Cinematic => ShapeRecipe::Boxed(BoxStyle::Cinematic),
            BubbleDesign::Simple => ShapeRecipe::Boxed(BoxStyle::Simple),
            BubbleDesign::Unknown(_) => return None,
        };
        Some(recipe)
    }
}

/// Box-rendered designs. These never use the path generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    /// White box with a thick border and a hard drop shadow
    Webtoon,
    /// Translucent caption box with a dark header strip
    Narration,
    /// No box at all, just outlined text
    Cinematic,
    /// White box with a faint border
    Simple,
}

/// How a design is drawn. One payload shape per drawing strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeRecipe {
    /// Fixed star polygon, ignores tail and aspect ratio
    Burst,
    /// Body rectangle with elliptical corners of radii `rx`/`ry`
    Outline { rx: f32, ry: f32 },
    /// Fixed ring of arcs
    Cloud,
    /// Styled box, no path
    Boxed(BoxStyle),
}

/// The inputs of the outline that depend on the overlay rather than the design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDimensions {
    /// Overlay width in panel-percentage units
    pub width: f32,
    /// Overlay height in panel-percentage units
    pub height: f32,
    /// Style corner radius, used by `rounded`
    pub border_radius: Option<f32>,
}

impl BodyDimensions {
    pub fn new(width: f32, height: f32, border_radius: Option<f32>) -> Self {
        Self {
            width,
            height,
            border_radius,
        }
    }

    /// Width over height, or 1 when either side is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width != 0.0 && self.height != 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Corner radii for `rounded`, compensated for the canvas stretch.
///
/// The shape canvas is stretched non-uniformly over the bubble, so a circular
/// corner in canvas space would turn into an ellipse on screen. Shrinking the
/// radius along the stretched axis keeps the visible curvature round.
fn rounded_radii(body: BodyDimensions) -> (f32, f32) {
    let base = body.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS).max(0.0);
    let aspect = body.aspect_ratio();

    let rx = base / aspect.max(1.0) * ROUNDED_RADIUS_SCALE;
    let ry = base * aspect.min(1.0) * ROUNDED_RADIUS_SCALE;

    let body_width = BODY_RIGHT - BODY_LEFT;
    let body_height = BODY_BOTTOM - BODY_TOP;
    let half_shorter = body_width.min(body_height) / 2.0;

    (
        rx.min(body_width / ROUNDED_RADIUS_DIVISOR).min(half_shorter),
        ry.min(body_height / ROUNDED_RADIUS_DIVISOR).min(half_shorter),
    )
}
