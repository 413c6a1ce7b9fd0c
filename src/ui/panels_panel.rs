//! Left side panel: comic title, panels, and each panel's script.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::comic::{
    AddOverlayRequest, ComicData, ComicDirtyState, PanelAspect, RegenerateOverlaysRequest,
};
use crate::config::AppConfig;
use crate::export::ExportOverlaysRequest;
use crate::paths;
use crate::theme;

/// An edit made in the panels panel, applied after the UI pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEdit {
    SetTitle(String),
    SetAspect { panel: u32, aspect: PanelAspect },
    SetSpeaker { panel: u32, line: usize, by: String },
    SetLineText { panel: u32, line: usize, text: String },
    AddLine { panel: u32 },
    RemoveLine { panel: u32, line: usize },
    SetImage { panel: u32, path: Option<PathBuf> },
    AddPanel,
    RemoveLastPanel,
}

/// Apply `edit` to the comic. Returns false when it changed nothing.
pub fn apply_panel_edit(comic: &mut ComicData, edit: PanelEdit) -> bool {
    match edit {
        PanelEdit::SetTitle(title) => {
            comic.title = title;
            true
        }
        PanelEdit::SetAspect { panel, aspect } => comic
            .panel_mut(panel)
            .map(|p| p.aspect_ratio = aspect)
            .is_some(),
        PanelEdit::SetSpeaker { panel, line, by } => comic
            .panel_mut(panel)
            .and_then(|p| p.dialogue.get_mut(line))
            .map(|d| d.by = by)
            .is_some(),
        PanelEdit::SetLineText { panel, line, text } => comic
            .panel_mut(panel)
            .is_some_and(|p| p.set_dialogue_text(line, text)),
        PanelEdit::AddLine { panel } => {
            let speaker = comic.first_speaker();
            comic
                .panel_mut(panel)
                .map(|p| p.add_dialogue_line(speaker, String::new()))
                .is_some()
        }
        PanelEdit::RemoveLine { panel, line } => comic
            .panel_mut(panel)
            .and_then(|p| p.remove_dialogue_line(line))
            .is_some(),
        PanelEdit::SetImage { panel, path } => comic
            .panel_mut(panel)
            .map(|p| p.image_path = path)
            .is_some(),
        PanelEdit::AddPanel => {
            comic.add_panel();
            true
        }
        PanelEdit::RemoveLastPanel => comic.remove_last_panel().is_some(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn panels_panel_ui(
    mut contexts: EguiContexts,
    mut comic: ResMut<ComicData>,
    mut dirty_state: ResMut<ComicDirtyState>,
    config: Res<AppConfig>,
    mut add_events: MessageWriter<AddOverlayRequest>,
    mut regenerate_events: MessageWriter<RegenerateOverlaysRequest>,
    mut export_events: MessageWriter<ExportOverlaysRequest>,
) -> Result {
    let mut edits: Vec<PanelEdit> = Vec::new();

    egui::SidePanel::left("panels_panel")
        .default_width(280.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Comic");

            let mut title = comic.title.clone();
            ui.horizontal(|ui| {
                ui.label("Title:");
                if ui.text_edit_singleline(&mut title).changed() {
                    edits.push(PanelEdit::SetTitle(title.clone()));
                }
            });
            ui.label(
                egui::RichText::new(format!("Format: {}", comic.format.display_name()))
                    .color(theme::ui::HINT_TEXT),
            );

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for panel in &comic.panels {
                    let idx = panel.idx;
                    egui::CollapsingHeader::new(format!(
                        "Panel {} ({} bubbles)",
                        idx,
                        panel.overlays.len()
                    ))
                    .id_salt(("panel", idx))
                    .default_open(idx == 1)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label("Aspect:");
                            egui::ComboBox::from_id_salt(("panel_aspect", idx))
                                .selected_text(panel.aspect_ratio.display_name())
                                .show_ui(ui, |ui| {
                                    for aspect in PanelAspect::all() {
                                        let is_selected = panel.aspect_ratio == *aspect;
                                        if ui
                                            .selectable_label(is_selected, aspect.display_name())
                                            .clicked()
                                            && !is_selected
                                        {
                                            edits.push(PanelEdit::SetAspect {
                                                panel: idx,
                                                aspect: *aspect,
                                            });
                                        }
                                    }
                                });
                        });

                        if !panel.scene.is_empty() {
                            ui.label(
                                egui::RichText::new(&panel.scene)
                                    .small()
                                    .color(theme::ui::LABEL_TEXT),
                            );
                        }

                        ui.label("Dialogue:");
                        for (line, dialogue) in panel.dialogue.iter().enumerate() {
                            ui.horizontal(|ui| {
                                let mut by = dialogue.by.clone();
                                if ui
                                    .add(egui::TextEdit::singleline(&mut by).desired_width(70.0))
                                    .changed()
                                {
                                    edits.push(PanelEdit::SetSpeaker {
                                        panel: idx,
                                        line,
                                        by,
                                    });
                                }
                                let mut text = dialogue.text.clone();
                                if ui
                                    .add(egui::TextEdit::singleline(&mut text).desired_width(140.0))
                                    .changed()
                                {
                                    edits.push(PanelEdit::SetLineText {
                                        panel: idx,
                                        line,
                                        text,
                                    });
                                }
                                if ui.small_button("x").on_hover_text("Remove line").clicked() {
                                    edits.push(PanelEdit::RemoveLine { panel: idx, line });
                                }
                            });
                        }
                        if ui.small_button("+ Line").clicked() {
                            edits.push(PanelEdit::AddLine { panel: idx });
                        }

                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            if ui.button("Add Bubble").clicked() {
                                add_events.write(AddOverlayRequest { panel_idx: idx });
                            }
                            if ui
                                .add_enabled(!panel.dialogue.is_empty(), egui::Button::new("Regenerate"))
                                .on_hover_text("Replace this panel's bubbles with one per dialogue line")
                                .clicked()
                            {
                                regenerate_events.write(RegenerateOverlaysRequest { panel_idx: idx });
                            }
                        });

                        ui.horizontal(|ui| {
                            if ui.button("Background...").clicked()
                                && let Some(path) = rfd::FileDialog::new()
                                    .add_filter(
                                        "Images",
                                        &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"],
                                    )
                                    .set_title("Panel Background")
                                    .pick_file()
                            {
                                edits.push(PanelEdit::SetImage {
                                    panel: idx,
                                    path: Some(path),
                                });
                            }
                            if panel.image_path.is_some() && ui.button("Clear").clicked() {
                                edits.push(PanelEdit::SetImage {
                                    panel: idx,
                                    path: None,
                                });
                            }
                        });

                        if ui.button("Export SVG...").clicked() {
                            let start_dir = config
                                .data
                                .export_dir
                                .clone()
                                .unwrap_or_else(paths::exports_dir);
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("SVG", &["svg"])
                                .set_directory(start_dir)
                                .set_file_name(format!("panel-{}-overlays.svg", idx))
                                .set_title("Export Bubbles")
                                .save_file()
                            {
                                export_events.write(ExportOverlaysRequest {
                                    panel_idx: idx,
                                    path,
                                });
                            }
                        }
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Add Panel").clicked() {
                        edits.push(PanelEdit::AddPanel);
                    }
                    if ui
                        .add_enabled(comic.panels.len() > 1, egui::Button::new("Remove Last"))
                        .clicked()
                    {
                        edits.push(PanelEdit::RemoveLastPanel);
                    }
                });
            });
        });

    for edit in edits {
        debug!("Panel edit: {:?}", edit);
        if apply_panel_edit(&mut comic, edit) {
            dirty_state.is_dirty = true;
        }
    }

    Ok(())
}
