use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bubble::BubbleDesign;
use crate::bubble::design::DEFAULT_BORDER_RADIUS;
use crate::comic::{
    ComicData, DeleteOverlayRequest, Overlay, OverlayKind, OverlayUpdate, OverlayUpdateRequest,
    TextAlign,
};
use crate::constants::FONT_PRESETS;
use crate::editor::SelectedOverlay;
use crate::theme;

/// The fields that differ between `before` and `after`, as one update.
pub fn diff_update(before: &Overlay, after: &Overlay) -> OverlayUpdate {
    OverlayUpdate {
        text: (before.text != after.text).then(|| after.text.clone()),
        speaker: (before.speaker != after.speaker).then(|| after.speaker.clone()),
        kind: (before.kind != after.kind).then_some(after.kind),
        design: (before.design != after.design).then(|| after.design.clone()),
        style: (before.style != after.style).then(|| after.style.clone()),
        tail: (before.tail != after.tail).then_some(after.tail),
        ..OverlayUpdate::default()
    }
}

fn font_label(family: &str) -> &str {
    FONT_PRESETS
        .iter()
        .find(|(_, css)| *css == family)
        .map(|(name, _)| *name)
        .unwrap_or(family)
}

pub fn properties_panel_ui(
    mut contexts: EguiContexts,
    comic: Res<ComicData>,
    selected: Res<SelectedOverlay>,
    mut updates: MessageWriter<OverlayUpdateRequest>,
    mut delete_events: MessageWriter<DeleteOverlayRequest>,
) -> Result {
    let Some(overlay) = selected.id().and_then(|id| comic.overlay(id)) else {
        return Ok(());
    };
    let mut edited = overlay.clone();
    let mut delete = false;

    egui::Window::new("Properties")
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .resizable(false)
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(
                egui::RichText::new(format!("Panel {} bubble", overlay.panel_id))
                    .color(theme::ui::LABEL_TEXT),
            );
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Design:");
                egui::ComboBox::from_id_salt("overlay_design")
                    .selected_text(edited.design.display_name())
                    .show_ui(ui, |ui| {
                        for design in BubbleDesign::all() {
                            let is_selected = edited.design == *design;
                            if ui.selectable_label(is_selected, design.display_name()).clicked() {
                                edited.design = design.clone();
                            }
                        }
                    });
            });

            if edited.design == BubbleDesign::Rounded {
                let mut radius = edited.style.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS);
                ui.horizontal(|ui| {
                    ui.label("Corner radius:");
                    if ui
                        .add(egui::Slider::new(&mut radius, 0.0..=50.0))
                        .changed()
                    {
                        edited.style.border_radius = Some(radius);
                    }
                });
            }

            ui.horizontal(|ui| {
                ui.label("Kind:");
                egui::ComboBox::from_id_salt("overlay_kind")
                    .selected_text(edited.kind.display_name())
                    .show_ui(ui, |ui| {
                        for kind in OverlayKind::all() {
                            let is_selected = edited.kind == *kind;
                            if ui.selectable_label(is_selected, kind.display_name()).clicked() {
                                edited.kind = *kind;
                            }
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Speaker:");
                ui.text_edit_singleline(&mut edited.speaker);
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Font:");
                egui::ComboBox::from_id_salt("overlay_font")
                    .selected_text(font_label(&edited.style.font_family).to_string())
                    .show_ui(ui, |ui| {
                        for (name, css) in FONT_PRESETS {
                            let is_selected = edited.style.font_family == *css;
                            if ui.selectable_label(is_selected, *name).clicked() {
                                edited.style.font_family = css.to_string();
                            }
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Size:");
                ui.add(
                    egui::DragValue::new(&mut edited.style.font_size)
                        .speed(0.5)
                        .range(6.0..=96.0),
                );
                ui.label("Line height:");
                ui.add(
                    egui::DragValue::new(&mut edited.style.line_height)
                        .speed(0.05)
                        .range(0.8..=3.0),
                );
            });

            ui.horizontal(|ui| {
                ui.label("Align:");
                for align in TextAlign::all() {
                    if ui
                        .selectable_label(edited.style.text_align == *align, align.display_name())
                        .clicked()
                    {
                        edited.style.text_align = *align;
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Stroke:");
                ui.add(
                    egui::DragValue::new(&mut edited.style.stroke_width)
                        .speed(0.1)
                        .range(0.0..=10.0),
                );
            });

            ui.separator();

            if edited.design.supports_tail() {
                let mut has_tail = edited.tail.is_some();
                if ui.checkbox(&mut has_tail, "Tail").changed() {
                    edited.tail = has_tail.then(|| overlay.default_tail());
                }
            } else {
                ui.label(
                    egui::RichText::new("This design has no tail").color(theme::ui::HINT_TEXT),
                );
            }

            ui.label(
                egui::RichText::new("Double-click the bubble to edit its text")
                    .small()
                    .color(theme::ui::HINT_TEXT),
            );

            ui.separator();

            if ui.button("Delete (Del)").clicked() {
                delete = true;
            }
        });

    if delete {
        delete_events.write(DeleteOverlayRequest {
            overlay_id: overlay.id.clone(),
        });
        return Ok(());
    }

    let update = diff_update(overlay, &edited);
    if !update.is_empty() {
        updates.write(OverlayUpdateRequest {
            overlay_id: overlay.id.clone(),
            update,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> Overlay {
        Overlay::new_manual(1, "Mina".to_string())
    }

    #[test]
    fn test_diff_of_identical_overlays_is_empty() {
        let a = overlay();
        assert!(diff_update(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_diff_carries_only_changed_fields() {
        let before = overlay();
        let mut after = before.clone();
        after.design = BubbleDesign::Cloud;
        after.style.font_size = 20.0;

        let update = diff_update(&before, &after);
        assert_eq!(update.design, Some(BubbleDesign::Cloud));
        assert_eq!(update.style.map(|s| s.font_size), Some(20.0));
        assert!(update.text.is_none());
        assert!(update.tail.is_none());
    }

    #[test]
    fn test_diff_removes_tail() {
        let before = overlay();
        let mut after = before.clone();
        after.tail = None;
        assert_eq!(diff_update(&before, &after).tail, Some(None));
    }

    #[test]
    fn test_font_label_for_preset_and_custom() {
        assert_eq!(font_label(FONT_PRESETS[1].1), "Noto Sans KR");
        assert_eq!(font_label("Comic Sans MS"), "Comic Sans MS");
    }
}
