use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::comic::{
    AsyncComicOperation, ComicData, ComicDirtyState, ComicFormat, ComicLoadError,
    ComicSaveError, CurrentComicFile, LoadComicRequest, NewComicRequest, SaveComicRequest,
};
use crate::comic::persistence::file_label;
use crate::config::{AppConfig, ConfigResetNotification, MissingComicWarning, SaveConfigRequest};
use crate::export::{ExportError, ExportNotification};
use crate::paths;
use crate::theme;

#[derive(Resource, Default)]
pub struct FileMenuState {
    pub show_new_dialog: bool,
    pub new_format: ComicFormat,
    /// Set by the menu or Ctrl+S on an unsaved comic; consumed by [`file_menu_ui`]
    pub save_as_requested: bool,
}

/// Top bar with the File menu and the current file name.
pub fn menu_bar_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut save_events: MessageWriter<SaveComicRequest>,
    mut load_events: MessageWriter<LoadComicRequest>,
    config: Res<AppConfig>,
    current_file: Res<CurrentComicFile>,
    dirty_state: Res<ComicDirtyState>,
) -> Result {
    egui::TopBottomPanel::top("menu_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Comic...").clicked() {
                    menu_state.show_new_dialog = true;
                    ui.close();
                }

                if ui.button("Open...").clicked() {
                    if let Some(path) = pick_comic_file(&config) {
                        load_events.write(LoadComicRequest { path });
                    }
                    ui.close();
                }

                ui.menu_button("Open Recent", |ui| {
                    if config.data.recent_comics.is_empty() {
                        ui.label(egui::RichText::new("No recent comics").weak());
                    }
                    for path in &config.data.recent_comics {
                        if ui
                            .button(file_label(path, "comic"))
                            .on_hover_text(path.to_string_lossy())
                            .clicked()
                        {
                            load_events.write(LoadComicRequest { path: path.clone() });
                            ui.close();
                        }
                    }
                });

                ui.separator();

                if ui.button("Save (Ctrl+S)").clicked() {
                    match &current_file.path {
                        Some(path) => {
                            save_events.write(SaveComicRequest { path: path.clone() });
                        }
                        None => menu_state.save_as_requested = true,
                    }
                    ui.close();
                }

                if ui.button("Save As...").clicked() {
                    menu_state.save_as_requested = true;
                    ui.close();
                }
            });

            ui.separator();
            ui.label(current_file.display_name());
            if dirty_state.is_dirty {
                ui.colored_label(theme::ui::DIRTY_MARKER, "●")
                    .on_hover_text("Unsaved changes");
            }
        });
    });

    Ok(())
}

/// Dialogs for file operations triggered from the menu bar.
pub fn file_menu_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut save_events: MessageWriter<SaveComicRequest>,
    mut new_events: MessageWriter<NewComicRequest>,
    comic: Res<ComicData>,
    dirty_state: Res<ComicDirtyState>,
) -> Result {
    if menu_state.save_as_requested {
        menu_state.save_as_requested = false;
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Comic Files", &["json"])
            .set_directory(paths::comics_dir())
            .set_file_name(format!("{}.json", sanitize_filename(&comic.title)))
            .set_title("Save Comic")
            .save_file()
        {
            save_events.write(SaveComicRequest { path });
        }
    }

    if menu_state.show_new_dialog {
        egui::Window::new("New Comic")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                if dirty_state.is_dirty {
                    ui.label("Create a new comic? Unsaved changes will be lost.");
                    ui.add_space(5.0);
                }
                ui.horizontal(|ui| {
                    ui.label("Format:");
                    egui::ComboBox::from_id_salt("new_comic_format")
                        .selected_text(menu_state.new_format.display_name())
                        .show_ui(ui, |ui| {
                            for format in ComicFormat::all() {
                                let is_selected = menu_state.new_format == *format;
                                if ui.selectable_label(is_selected, format.display_name()).clicked() {
                                    menu_state.new_format = *format;
                                }
                            }
                        });
                });
                ui.horizontal(|ui| {
                    if ui.button("Create New").clicked() {
                        new_events.write(NewComicRequest {
                            format: menu_state.new_format,
                        });
                        menu_state.show_new_dialog = false;
                    }
                    if ui.button("Cancel").clicked() {
                        menu_state.show_new_dialog = false;
                    }
                });
            });
    }

    Ok(())
}

fn pick_comic_file(config: &AppConfig) -> Option<PathBuf> {
    let start_dir = config
        .data
        .last_comic_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::comics_dir);
    rfd::FileDialog::new()
        .add_filter("Comic Files", &["json"])
        .set_directory(start_dir)
        .set_title("Open Comic")
        .pick_file()
}

fn sanitize_filename(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string();
    if cleaned.is_empty() {
        "comic".to_string()
    } else {
        cleaned
    }
}

fn error_window(ctx: &egui::Context, title: &str, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, message);
            });
            ui.add_space(5.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

/// Load, save and export failures.
pub fn error_dialogs_ui(
    mut contexts: EguiContexts,
    mut load_error: ResMut<ComicLoadError>,
    mut save_error: ResMut<ComicSaveError>,
    mut export_error: ResMut<ExportError>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(error) = &load_error.message
        && error_window(ctx, "Load Error", error)
    {
        load_error.message = None;
    }
    if let Some(error) = &save_error.message
        && error_window(ctx, "Save Error", error)
    {
        save_error.message = None;
    }
    if let Some(error) = &export_error.message
        && error_window(ctx, "Export Error", error)
    {
        export_error.message = None;
    }

    Ok(())
}

/// Blocks the editor while a save or load runs in the background.
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncComicOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    egui::Window::new("Working")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    async_op
                        .operation_description
                        .as_deref()
                        .unwrap_or("Working..."),
                );
            });
        });

    Ok(())
}

/// Shown at startup if the last comic no longer exists.
pub fn missing_comic_warning_ui(
    mut contexts: EguiContexts,
    mut warning: ResMut<MissingComicWarning>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    if !warning.show {
        return Ok(());
    }

    egui::Window::new("Comic Not Found")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The last opened comic file no longer exists:");

            if let Some(ref path) = warning.path {
                ui.add_space(5.0);
                let path_str = path.to_string_lossy();
                let display_path = if path_str.chars().count() > 50 {
                    let tail: String = path_str.chars().rev().take(47).collect();
                    format!("...{}", tail.chars().rev().collect::<String>())
                } else {
                    path_str.to_string()
                };
                ui.label(egui::RichText::new(display_path).weak())
                    .on_hover_text(path_str.as_ref());
                ui.add_space(10.0);
            }

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    warning.show = false;
                }

                if ui.button("Clear from history").clicked() {
                    if let Some(path) = &warning.path {
                        config.data.recent_comics.retain(|p| p != path);
                    }
                    config.data.last_comic_path = None;
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                    warning.show = false;
                }
            });
        });

    Ok(())
}

pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be read and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.label(egui::RichText::new(reason).weak());
            }
            if ui.button("OK").clicked() {
                notification.show = false;
            }
        });

    Ok(())
}

/// Non-modal note after a successful export.
pub fn export_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ExportNotification>,
) -> Result {
    let Some(message) = notification.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Export")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                notification.message = None;
            }
        });

    Ok(())
}
