use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::bubble::{BodyDimensions, BubbleDesign, BubbleRect, TailLocal, clamp_span};
use crate::constants::{
    MIN_HEIGHT_PERCENT, MIN_WIDTH_PERCENT, TAIL_OFFSET_LIMIT, default_font_family,
};

use super::Dialogue;

/// Disambiguates overlays created within the same millisecond
static NEXT_OVERLAY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Stable identifier of an overlay, unique across the comic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(pub String);

impl OverlayId {
    pub fn generate(panel_idx: u32) -> Self {
        let seq = NEXT_OVERLAY_SEQ.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("overlay-{}-{}-{}", panel_idx, seq, millis))
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    #[default]
    Balloon,
    Narration,
}

impl OverlayKind {
    pub fn all() -> &'static [OverlayKind] {
        &[OverlayKind::Balloon, OverlayKind::Narration]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OverlayKind::Balloon => "Balloon",
            OverlayKind::Narration => "Narration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn all() -> &'static [TextAlign] {
        &[TextAlign::Left, TextAlign::Center, TextAlign::Right]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TextAlign::Left => "Left",
            TextAlign::Center => "Center",
            TextAlign::Right => "Right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub font_size: f32,
    #[serde(default)]
    pub text_align: TextAlign,
    pub font_family: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Corner radius for the `rounded` design. Unset means the design default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
}

fn default_stroke_width() -> f32 {
    2.5
}

fn default_line_height() -> f32 {
    1.4
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            text_align: TextAlign::Center,
            font_family: default_font_family().to_string(),
            stroke_width: default_stroke_width(),
            line_height: default_line_height(),
            border_radius: Some(12.0),
        }
    }
}

/// Tail tip in panel percent, plus the notch offset along its edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tail {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub offset: f32,
}

impl Tail {
    pub fn new(x: f32, y: f32, offset: f32) -> Self {
        Self { x, y, offset }
    }

    pub fn tip(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A speech bubble or caption placed on a panel.
///
/// Geometry is in panel percent: `x + w <= 100`, `y + h <= 100`, and the box
/// never shrinks below the minimum bubble size. [`Overlay::normalize`]
/// restores that after any outside edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: OverlayId,
    pub panel_id: u32,
    #[serde(default)]
    pub kind: OverlayKind,
    #[serde(default)]
    pub design: BubbleDesign,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default)]
    pub tail: Option<Tail>,
}

impl Overlay {
    /// Bubble added by hand from the panels panel.
    pub fn new_manual(panel_idx: u32, speaker: String) -> Self {
        Self {
            id: OverlayId::generate(panel_idx),
            panel_id: panel_idx,
            kind: OverlayKind::Balloon,
            design: BubbleDesign::Standard,
            x: 20.0,
            y: 20.0,
            w: 60.0,
            h: 30.0,
            text: "New line".to_string(),
            speaker,
            style: OverlayStyle::default(),
            tail: Some(Tail::new(50.0, 65.0, 0.0)),
        }
    }

    /// Bubble laid out for dialogue line `index`, cascading down the panel.
    pub fn for_dialogue(panel_idx: u32, index: usize, line: &Dialogue) -> Self {
        let step = index as f32;
        let (x, y, w, h) = (15.0 + step * 5.0, 10.0 + step * 25.0, 70.0, 30.0);

        let mut overlay = Self {
            id: OverlayId::generate(panel_idx),
            panel_id: panel_idx,
            kind: OverlayKind::Balloon,
            design: BubbleDesign::Standard,
            x,
            y,
            w,
            h,
            text: line.text.clone(),
            speaker: line.by.clone(),
            style: OverlayStyle::default(),
            tail: Some(Tail::new(x + w / 2.0, y + h + 15.0, 0.0)),
        };
        overlay.normalize();
        overlay
    }

    pub fn rect(&self) -> BubbleRect {
        BubbleRect::new(self.x, self.y, self.w, self.h)
    }

    pub fn body(&self) -> BodyDimensions {
        BodyDimensions::new(self.w, self.h, self.style.border_radius)
    }

    /// The tail in this bubble's shape space, if it has one and a usable size.
    pub fn tail_local(&self) -> Option<TailLocal> {
        let tail = self.tail?;
        let tip = self.rect().panel_to_local(tail.tip())?;
        Some(TailLocal::new(tip, tail.offset))
    }

    /// Whether the geometry is inside the panel and above the minimum size.
    pub fn is_normalized(&self) -> bool {
        let box_ok = self.x >= 0.0
            && self.y >= 0.0
            && self.w >= MIN_WIDTH_PERCENT
            && self.h >= MIN_HEIGHT_PERCENT
            && self.x + self.w <= 100.0 + 1e-3
            && self.y + self.h <= 100.0 + 1e-3;
        let tail_ok = self.tail.is_none_or(|t| {
            (0.0..=100.0).contains(&t.x)
                && (0.0..=100.0).contains(&t.y)
                && t.offset.abs() <= TAIL_OFFSET_LIMIT
        });
        box_ok && tail_ok
    }

    /// Clamp geometry back into the panel. Idempotent.
    pub fn normalize(&mut self) {
        self.w = finite_or(self.w, MIN_WIDTH_PERCENT).clamp(MIN_WIDTH_PERCENT, 100.0);
        self.h = finite_or(self.h, MIN_HEIGHT_PERCENT).clamp(MIN_HEIGHT_PERCENT, 100.0);
        self.x = clamp_span(finite_or(self.x, 0.0), 0.0, 100.0 - self.w);
        self.y = clamp_span(finite_or(self.y, 0.0), 0.0, 100.0 - self.h);

        if let Some(tail) = self.tail.as_mut() {
            tail.x = finite_or(tail.x, 50.0).clamp(0.0, 100.0);
            tail.y = finite_or(tail.y, 100.0).clamp(0.0, 100.0);
            tail.offset =
                finite_or(tail.offset, 0.0).clamp(-TAIL_OFFSET_LIMIT, TAIL_OFFSET_LIMIT);
        }

        self.style.font_size = finite_or(self.style.font_size, 16.0).max(1.0);
        self.style.stroke_width = finite_or(self.style.stroke_width, 0.0).max(0.0);
        self.style.line_height = finite_or(self.style.line_height, 1.4).max(0.5);
    }

    /// Tail placed just below the bubble, used when the tail is toggled on.
    pub fn default_tail(&self) -> Tail {
        Tail::new(
            self.x + self.w / 2.0,
            (self.y + self.h + 15.0).min(100.0),
            0.0,
        )
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Partial edit of an overlay. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
    /// `Some(None)` removes the tail
    pub tail: Option<Option<Tail>>,
    pub text: Option<String>,
    pub speaker: Option<String>,
    pub kind: Option<OverlayKind>,
    pub design: Option<BubbleDesign>,
    pub style: Option<OverlayStyle>,
}

impl OverlayUpdate {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn bounds(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn tail(tail: Option<Tail>) -> Self {
        Self {
            tail: Some(tail),
            ..Self::default()
        }
    }

    pub fn text(text: String) -> Self {
        Self {
            text: Some(text),
            ..Self::default()
        }
    }

    pub fn design(design: BubbleDesign) -> Self {
        Self {
            design: Some(design),
            ..Self::default()
        }
    }

    pub fn style(style: OverlayStyle) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the set fields into `overlay`, then normalize it.
    pub fn apply(self, overlay: &mut Overlay) {
        if let Some(x) = self.x {
            overlay.x = x;
        }
        if let Some(y) = self.y {
            overlay.y = y;
        }
        if let Some(w) = self.w {
            overlay.w = w;
        }
        if let Some(h) = self.h {
            overlay.h = h;
        }
        if let Some(tail) = self.tail {
            overlay.tail = tail;
        }
        if let Some(text) = self.text {
            overlay.text = text;
        }
        if let Some(speaker) = self.speaker {
            overlay.speaker = speaker;
        }
        if let Some(kind) = self.kind {
            overlay.kind = kind;
        }
        if let Some(design) = self.design {
            overlay.design = design;
        }
        if let Some(style) = self.style {
            overlay.style = style;
        }
        overlay.normalize();
    }
}
