//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI, bubble
//! rendering and SVG export. Modify values here to change the look.

use bevy::prelude::Color;

// ============================================================================
// Page Colors
// ============================================================================

/// Canvas behind the panels
pub const PAGE_BACKGROUND: Color = Color::srgb(0.16, 0.16, 0.18);

/// Panel frame outline
pub const PANEL_FRAME: Color = Color::srgb(0.55, 0.55, 0.6);

/// Panels without a background image
pub const BLANK_PANEL: Color = Color::srgb(0.96, 0.96, 0.94);

// ============================================================================
// Bubble Colors
// ============================================================================

/// Bubble outline stroke
pub const BUBBLE_STROKE: Color = Color::BLACK;

/// Bubble fill
pub const BUBBLE_FILL: Color = Color::WHITE;

/// Drop shadow behind webtoon boxes
pub const WEBTOON_SHADOW: Color = Color::BLACK;

/// Narration box fill (slightly translucent white)
pub const NARRATION_FILL: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);

/// Faint border around simple boxes
pub const SIMPLE_BORDER: Color = Color::srgba(0.0, 0.0, 0.0, 0.2);

// ============================================================================
// Selection Colors
// ============================================================================

/// Dashed outline around the selected bubble
pub const SELECTION_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

/// Resize handles on the selected bubble's corners (purple)
pub const RESIZE_HANDLE: Color = Color::srgb(0.66, 0.33, 0.97);

/// Tail tip handle (emerald)
pub const TAIL_TIP_HANDLE: Color = Color::srgb(0.06, 0.73, 0.51);

/// Tail base handle (sky blue)
pub const TAIL_BASE_HANDLE: Color = Color::srgb(0.05, 0.65, 0.91);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Yellow marker for unsaved changes
    pub const DIRTY_MARKER: egui::Color32 = egui::Color32::from_rgb(230, 200, 90);

    /// Bubble text
    pub const BUBBLE_TEXT: egui::Color32 = egui::Color32::BLACK;

    /// Cinematic captions are white with a dark outline
    pub const CINEMATIC_TEXT: egui::Color32 = egui::Color32::WHITE;
    pub const CINEMATIC_OUTLINE: egui::Color32 = egui::Color32::BLACK;
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// SVG paint for a color: `#rrggbb` when opaque, `rgba(...)` otherwise.
pub fn svg_paint(color: Color) -> String {
    let srgba = color.to_srgba();
    let [r, g, b] = [srgba.red, srgba.green, srgba.blue].map(|c| (c * 255.0).round() as u8);
    if srgba.alpha >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("rgba({},{},{},{})", r, g, b, srgba.alpha)
    }
}
