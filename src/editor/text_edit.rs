//! In-place text editing of a bubble.
//!
//! Clicking away or Ctrl+Enter commits the buffer; Escape discards it.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::comic::{ComicData, OverlayId, OverlayUpdate, OverlayUpdateRequest};

use super::controller::InteractionState;
use super::layout::PanelLayout;
use super::render::{egui_align, overlay_rich_text, text_scale, text_screen_rect};

pub fn overlay_text_editor_ui(
    mut contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    mut interaction: ResMut<InteractionState>,
    mut updates: MessageWriter<OverlayUpdateRequest>,
    mut focused: Local<Option<OverlayId>>,
) -> Result {
    let InteractionState::EditingText { overlay_id, buffer } = &mut *interaction else {
        *focused = None;
        return Ok(());
    };

    let Some(overlay) = comic.overlay(overlay_id) else {
        debug!("Edited overlay {} is gone", overlay_id);
        *interaction = InteractionState::Idle;
        return Ok(());
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        debug!("Discarded text edit on {}", overlay_id);
        *interaction = InteractionState::Idle;
        return Ok(());
    }

    let Some(rect) = text_screen_rect(overlay, &layout) else {
        return Ok(());
    };
    let scale = text_scale(overlay, &layout);
    let font_size = overlay.style.font_size * scale;

    let ctx = contexts.ctx_mut()?;
    let mut commit = false;

    egui::Area::new(egui::Id::new("overlay_text_editor"))
        .fixed_pos(rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_width(rect.width());
            let response = ui.add(
                egui::TextEdit::multiline(buffer)
                    .font(egui::FontId::proportional(font_size))
                    .horizontal_align(egui_align(overlay.style.text_align))
                    .desired_width(rect.width())
                    .desired_rows(1)
                    .min_size(egui::vec2(rect.width(), rect.height()))
                    .frame(true),
            );

            // Focus once; afterwards losing focus means the user clicked away
            if focused.as_ref() != Some(&overlay.id) {
                response.request_focus();
                *focused = Some(overlay.id.clone());
            } else if response.lost_focus() {
                commit = true;
            }

            if response.has_focus()
                && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter))
            {
                commit = true;
            }

            if buffer.is_empty() {
                ui.label(overlay_rich_text(overlay, "(empty bubble)", scale * 0.8).weak());
            }
        });

    if commit {
        debug!("Committed text edit on {}", overlay.id);
        if *buffer != overlay.text {
            updates.write(OverlayUpdateRequest {
                overlay_id: overlay.id.clone(),
                update: OverlayUpdate::text(buffer.clone()),
            });
        }
        *interaction = InteractionState::Idle;
    }

    Ok(())
}
