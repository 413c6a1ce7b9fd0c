mod camera;
pub mod conditions;
pub mod controller;
pub mod input;
pub mod layout;
pub mod params;
pub mod render;
pub mod selection;
mod text_edit;

pub use camera::EditorCamera;
pub use controller::InteractionState;
pub use layout::PanelLayout;
pub use selection::SelectedOverlay;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::comic::ComicEdits;

/// Editor phases within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorSet {
    /// Camera and screen layout of the panels
    Layout,
    /// Pointer and keyboard handling; writes edit requests
    Input,
    /// Selection bookkeeping after edits were applied
    Selection,
    Render,
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelLayout>()
            .init_resource::<SelectedOverlay>()
            .init_resource::<InteractionState>()
            .init_resource::<input::ClickTracker>()
            .init_gizmo_group::<render::BubbleGizmoGroup>()
            .configure_sets(
                Update,
                (
                    EditorSet::Layout,
                    EditorSet::Input,
                    ComicEdits,
                    EditorSet::Selection,
                    EditorSet::Render,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (camera::spawn_camera, render::configure_bubble_gizmos),
            )
            .add_systems(
                Update,
                (
                    camera::fit_camera_to_page,
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    layout::update_panel_layout,
                )
                    .chain()
                    .in_set(EditorSet::Layout),
            )
            .add_systems(
                Update,
                (
                    input::handle_pointer_press,
                    input::handle_pointer_drag,
                    input::handle_pointer_release,
                    input::handle_escape,
                    input::handle_deletion.run_if(conditions::not_editing_text),
                    input::handle_save_shortcut.run_if(conditions::not_editing_text),
                    input::update_cursor_icon,
                )
                    .chain()
                    .in_set(EditorSet::Input)
                    .run_if(conditions::no_dialog_open),
            )
            .add_systems(
                Update,
                (
                    selection::reset_on_comic_replaced,
                    selection::select_added_overlays,
                    selection::prune_stale_selection,
                )
                    .chain()
                    .in_set(EditorSet::Selection),
            )
            .add_systems(
                Update,
                (
                    render::sync_panel_backgrounds,
                    render::sync_bubble_fills,
                    render::draw_panel_frames,
                    render::draw_overlays,
                )
                    .in_set(EditorSet::Render),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (render::draw_overlay_text, text_edit::overlay_text_editor_ui).chain(),
            );
    }
}
