mod comic_data;
mod messages;
mod overlay;
mod panel;
pub mod persistence;
mod systems;

pub use comic_data::{COMIC_FILE_VERSION, ComicData, ComicFormat, SavedComic};
pub use messages::{
    AddOverlayRequest, DeleteOverlayRequest, OverlayAdded, OverlayUpdateRequest,
    RegenerateOverlaysRequest,
};
pub use overlay::{Overlay, OverlayId, OverlayKind, OverlayStyle, OverlayUpdate, Tail, TextAlign};
pub use panel::{Dialogue, Panel, PanelAspect};
pub use persistence::{
    AsyncComicOperation, ComicDirtyState, ComicLoadError, ComicReplaced, ComicSaveError,
    CurrentComicFile, LoadComicRequest, NewComicRequest, SaveComicRequest,
};

use bevy::prelude::*;

use crate::config::ConfigLoaded;

/// Systems that mutate [`ComicData`]. Editor systems that read overlays run
/// after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComicEdits;

pub struct ComicPlugin;

impl Plugin for ComicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ComicData>()
            .init_resource::<ComicLoadError>()
            .init_resource::<ComicSaveError>()
            .init_resource::<CurrentComicFile>()
            .init_resource::<ComicDirtyState>()
            .init_resource::<AsyncComicOperation>()
            .add_message::<OverlayUpdateRequest>()
            .add_message::<AddOverlayRequest>()
            .add_message::<DeleteOverlayRequest>()
            .add_message::<RegenerateOverlaysRequest>()
            .add_message::<OverlayAdded>()
            .add_message::<SaveComicRequest>()
            .add_message::<LoadComicRequest>()
            .add_message::<NewComicRequest>()
            .add_message::<ComicReplaced>()
            .add_systems(
                Startup,
                (
                    persistence::ensure_comics_directory,
                    persistence::open_last_comic.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    systems::apply_overlay_updates.run_if(on_message::<OverlayUpdateRequest>),
                    systems::add_overlays.run_if(on_message::<AddOverlayRequest>),
                    systems::delete_overlays.run_if(on_message::<DeleteOverlayRequest>),
                    systems::regenerate_overlays.run_if(on_message::<RegenerateOverlaysRequest>),
                    persistence::save_comic_system.run_if(on_message::<SaveComicRequest>),
                    persistence::load_comic_system.run_if(on_message::<LoadComicRequest>),
                    persistence::new_comic_system.run_if(on_message::<NewComicRequest>),
                    persistence::poll_save_tasks,
                    persistence::poll_load_tasks,
                )
                    .in_set(ComicEdits),
            );
    }
}
