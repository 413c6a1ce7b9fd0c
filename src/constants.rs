//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Maximum number of recent comic files to remember in config
pub const MAX_RECENT_COMICS: usize = 5;

/// Smallest bubble width, in panel-percentage units
pub const MIN_WIDTH_PERCENT: f32 = 10.0;

/// Smallest bubble height, in panel-percentage units
pub const MIN_HEIGHT_PERCENT: f32 = 5.0;

/// Largest lateral displacement of a tail notch along its edge
pub const TAIL_OFFSET_LIMIT: f32 = 35.0;

/// How much of the pointer delta feeds the tail offset during a tail-base drag
pub const TAIL_OFFSET_DRAG_FACTOR: f32 = 0.5;

/// Width of panels in world units (height follows the aspect ratio)
pub const PANEL_WORLD_WIDTH: f32 = 600.0;

/// Vertical gap between stacked panels in world units
pub const PANEL_WORLD_GAP: f32 = 40.0;

/// Pick radius around drag handles, in screen pixels
pub const HANDLE_PICK_RADIUS: f32 = 8.0;

/// Two presses on the same bubble within this window count as a double-click
pub const DOUBLE_CLICK_SECONDS: f64 = 0.35;

/// Polyline tolerance used when flattening bubble outlines (shape-space units)
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// Font presets offered in the properties window: (display name, CSS family)
pub const FONT_PRESETS: &[(&str, &str)] = &[
    (
        "Pretendard",
        "Pretendard, -apple-system, BlinkMacSystemFont, system-ui, Roboto, sans-serif",
    ),
    ("Noto Sans KR", "'Noto Sans KR', sans-serif"),
    ("Do Hyeon", "'Do Hyeon', sans-serif"),
    ("Black Han Sans", "'Black Han Sans', sans-serif"),
    ("Nanum Pen Script", "'Nanum Pen Script', cursive"),
    ("Gothic A1", "'Gothic A1', sans-serif"),
];

/// The font family new bubbles start with
pub fn default_font_family() -> &'static str {
    FONT_PRESETS[0].1
}
