//! SVG document for one panel's overlays.

use bevy::prelude::*;
use svg::Document;
use svg::node::element::{Group, Path, Rectangle, SVG, Text};

use crate::bubble::BoxStyle;
use crate::comic::{Overlay, Panel, TextAlign};
use crate::constants::PANEL_WORLD_WIDTH;
use crate::editor::render::{BubbleShape, RenderMode, render_overlay, text_region};
use crate::theme;

/// Drop shadow offset of webtoon boxes, in document units
const SHADOW_OFFSET: f32 = 3.0;

/// Height of the narration header strip as a fraction of the box
const NARRATION_HEADER: f32 = 0.08;

/// Document size for a panel: fixed width, height from the aspect ratio.
pub fn document_size(panel: &Panel) -> Vec2 {
    Vec2::new(PANEL_WORLD_WIDTH, PANEL_WORLD_WIDTH / panel.aspect_ratio.ratio())
}

pub fn panel_document(panel: &Panel) -> Document {
    let size = document_size(panel);
    let mut document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", size.x)
        .set("height", size.y)
        .set("viewBox", (0.0, 0.0, size.x, size.y));

    for overlay in &panel.overlays {
        document = document.add(overlay_group(overlay, size));
    }
    document
}

fn overlay_group(overlay: &Overlay, size: Vec2) -> Group {
    let origin = Vec2::new(overlay.x, overlay.y) / 100.0 * size;
    let extent = Vec2::new(overlay.w, overlay.h) / 100.0 * size;

    let group = Group::new().set("data-overlay-id", overlay.id.0.as_str());
    let group = match render_overlay(overlay, RenderMode::Export).shape {
        BubbleShape::Path(path) => group.add(
            SVG::new()
                .set("x", origin.x)
                .set("y", origin.y)
                .set("width", extent.x)
                .set("height", extent.y)
                .set("viewBox", (0, 0, 100, 100))
                .set("preserveAspectRatio", "none")
                .set("overflow", "visible")
                .add(
                    Path::new()
                        .set("d", path.to_string())
                        .set("fill", theme::svg_paint(theme::BUBBLE_FILL))
                        .set("stroke", theme::svg_paint(theme::BUBBLE_STROKE))
                        .set("stroke-width", overlay.style.stroke_width)
                        .set("stroke-linejoin", "round")
                        .set("vector-effect", "non-scaling-stroke"),
                ),
        ),
        BubbleShape::Boxed(style) => add_box(group, style, origin, extent, overlay),
        BubbleShape::Nothing => group,
    };

    add_text(group, overlay, size)
}

fn rect(origin: Vec2, extent: Vec2) -> Rectangle {
    Rectangle::new()
        .set("x", origin.x)
        .set("y", origin.y)
        .set("width", extent.x)
        .set("height", extent.y)
}

fn add_box(group: Group, style: BoxStyle, origin: Vec2, extent: Vec2, overlay: &Overlay) -> Group {
    let stroke_width = overlay.style.stroke_width;
    match style {
        BoxStyle::Webtoon => group
            .add(
                rect(origin + Vec2::splat(SHADOW_OFFSET), extent)
                    .set("fill", theme::svg_paint(theme::WEBTOON_SHADOW)),
            )
            .add(
                rect(origin, extent)
                    .set("fill", theme::svg_paint(theme::BUBBLE_FILL))
                    .set("stroke", theme::svg_paint(theme::BUBBLE_STROKE))
                    .set("stroke-width", stroke_width.max(3.0)),
            ),
        BoxStyle::Narration => group
            .add(
                rect(origin, extent)
                    .set("fill", theme::svg_paint(theme::NARRATION_FILL))
                    .set("stroke", theme::svg_paint(theme::BUBBLE_STROKE))
                    .set("stroke-width", stroke_width),
            )
            .add(
                rect(origin, Vec2::new(extent.x, extent.y * NARRATION_HEADER))
                    .set("fill", theme::svg_paint(theme::BUBBLE_STROKE)),
            ),
        BoxStyle::Simple => group.add(
            rect(origin, extent)
                .set("fill", theme::svg_paint(theme::BUBBLE_FILL))
                .set("stroke", theme::svg_paint(theme::SIMPLE_BORDER))
                .set("stroke-width", 1.0),
        ),
        BoxStyle::Cinematic => group,
    }
}

fn add_text(mut group: Group, overlay: &Overlay, size: Vec2) -> Group {
    let lines: Vec<&str> = overlay.text.lines().collect();
    if lines.is_empty() {
        return group;
    }

    let region = text_region(overlay);
    let min = region.min / 100.0 * size;
    let max = region.max / 100.0 * size;
    let (anchor, x) = match overlay.style.text_align {
        TextAlign::Left => ("start", min.x),
        TextAlign::Center => ("middle", (min.x + max.x) / 2.0),
        TextAlign::Right => ("end", max.x),
    };

    let cinematic = overlay.design == crate::bubble::BubbleDesign::Cinematic;
    let step = overlay.style.font_size * overlay.style.line_height;
    let first_y = (min.y + max.y) / 2.0 - step * (lines.len() as f32 - 1.0) / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let content = if cinematic {
            line.to_uppercase()
        } else {
            line.to_string()
        };
        let mut text = Text::new(content)
            .set("x", x)
            .set("y", first_y + step * i as f32)
            .set("text-anchor", anchor)
            .set("dominant-baseline", "central")
            .set("font-family", overlay.style.font_family.as_str())
            .set("font-size", overlay.style.font_size);
        text = if cinematic {
            text.set("fill", "#ffffff")
                .set("stroke", "#000000")
                .set("stroke-width", 1.5)
                .set("paint-order", "stroke")
                .set("font-weight", "bold")
        } else {
            text.set("fill", "#000000")
        };
        group = group.add(text);
    }
    group
}
