pub mod file_menu;
mod panels_panel;
mod properties;

pub use file_menu::FileMenuState;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::comic::{AsyncComicOperation, ComicLoadError, ComicSaveError};
use crate::config::{ConfigResetNotification, MissingComicWarning};
use crate::export::ExportError;

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
#[allow(clippy::too_many_arguments)]
fn update_dialog_state(
    file_menu: Res<FileMenuState>,
    missing_comic: Res<MissingComicWarning>,
    config_reset: Res<ConfigResetNotification>,
    save_error: Res<ComicSaveError>,
    load_error: Res<ComicLoadError>,
    export_error: Res<ExportError>,
    async_op: Res<AsyncComicOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = file_menu.show_new_dialog
        || missing_comic.show
        || config_reset.show
        || save_error.message.is_some()
        || load_error.message.is_some()
        || export_error.message.is_some()
        || async_op.is_busy();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<FileMenuState>()
            // Top bar spans the window; the side panel fits below it
            .add_systems(
                EguiPrimaryContextPass,
                (
                    file_menu::menu_bar_ui,
                    panels_panel::panels_panel_ui,
                    properties::properties_panel_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs
                    file_menu::file_menu_ui,
                    file_menu::missing_comic_warning_ui,
                    file_menu::async_operation_modal_ui,
                    file_menu::error_dialogs_ui,
                    file_menu::config_reset_notification_ui,
                    file_menu::export_notification_ui,
                )
                    .after(properties::properties_panel_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
