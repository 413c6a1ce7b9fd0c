//! Bubble text, drawn as egui areas over the panels.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bubble::BubbleDesign;
use crate::comic::{ComicData, Overlay, TextAlign};
use crate::constants::PANEL_WORLD_WIDTH;
use crate::editor::controller::InteractionState;
use crate::editor::layout::PanelLayout;
use crate::theme;

use super::text_region;

/// Screen rect of an overlay's text region, if its panel is on screen.
pub fn text_screen_rect(overlay: &Overlay, layout: &PanelLayout) -> Option<egui::Rect> {
    let bounds = layout.bounds(overlay.panel_id)?;
    let region = text_region(overlay);
    let min = bounds.percent_to_screen(region.min);
    let max = bounds.percent_to_screen(region.max);
    Some(egui::Rect::from_min_max(
        egui::pos2(min.x, min.y),
        egui::pos2(max.x, max.y),
    ))
}

/// Pixels per style unit for the panel's current on-screen width.
pub fn text_scale(overlay: &Overlay, layout: &PanelLayout) -> f32 {
    layout
        .bounds(overlay.panel_id)
        .map(|b| b.size().x / PANEL_WORLD_WIDTH)
        .unwrap_or(1.0)
}

pub fn egui_align(align: TextAlign) -> egui::Align {
    match align {
        TextAlign::Left => egui::Align::Min,
        TextAlign::Center => egui::Align::Center,
        TextAlign::Right => egui::Align::Max,
    }
}

/// The styled text of an overlay at `scale` pixels per unit.
pub fn overlay_rich_text(overlay: &Overlay, text: &str, scale: f32) -> egui::RichText {
    let size = overlay.style.font_size * scale;
    let cinematic = overlay.design == BubbleDesign::Cinematic;
    let (content, color) = if cinematic {
        (text.to_uppercase(), theme::ui::CINEMATIC_TEXT)
    } else {
        (text.to_string(), theme::ui::BUBBLE_TEXT)
    };

    let rich = egui::RichText::new(content)
        .size(size)
        .line_height(Some(size * overlay.style.line_height))
        .color(color);
    if cinematic {
        rich.strong()
            .background_color(theme::ui::CINEMATIC_OUTLINE.gamma_multiply(0.35))
    } else {
        rich
    }
}

pub fn draw_overlay_text(
    mut contexts: EguiContexts,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    interaction: Res<InteractionState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let editing = match &*interaction {
        InteractionState::EditingText { overlay_id, .. } => Some(overlay_id),
        _ => None,
    };

    for (_, overlay) in comic.overlays() {
        if overlay.text.is_empty() || editing == Some(&overlay.id) {
            continue;
        }
        let Some(rect) = text_screen_rect(overlay, &layout) else {
            continue;
        };
        let scale = text_scale(overlay, &layout);
        let align = egui_align(overlay.style.text_align);

        egui::Area::new(egui::Id::new(("overlay_text", overlay.id.0.as_str())))
            .fixed_pos(rect.min)
            .order(egui::Order::Background)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_width(rect.width());
                ui.allocate_ui_with_layout(
                    rect.size(),
                    egui::Layout::top_down(align).with_main_align(egui::Align::Center),
                    |ui| {
                        ui.add(
                            egui::Label::new(overlay_rich_text(overlay, &overlay.text, scale))
                                .wrap(),
                        );
                    },
                );
            });
    }

    Ok(())
}
