//! Comic load system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::comic::ComicData;
use crate::config::{AddRecentComicRequest, AppConfig};

use super::helpers::{decode_comic, file_label};
use super::messages::{ComicReplaced, LoadComicRequest};
use super::resources::{
    AsyncComicOperation, ComicDirtyState, ComicLoadError, CurrentComicFile, LoadComicTask,
};
use super::results::LoadResult;

/// Starts an async load operation (file I/O and parsing)
pub fn load_comic_system(
    mut commands: Commands,
    mut events: MessageReader<LoadComicRequest>,
    mut async_op: ResMut<AsyncComicOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Load operation already in progress");
            continue;
        }

        let path = event.path.clone();
        async_op.start(false, format!("Loading {}...", file_label(&path, "comic")));

        let task = IoTaskPool::get().spawn(async move {
            let json = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    return LoadResult {
                        path,
                        comic: None,
                        error: Some(format!("Failed to read file: {}", e)),
                    };
                }
            };

            match decode_comic(&json) {
                Ok(comic) => LoadResult {
                    path,
                    comic: Some(comic),
                    error: None,
                },
                Err(e) => LoadResult {
                    path,
                    comic: None,
                    error: Some(e),
                },
            }
        });

        commands.spawn(LoadComicTask(task));
    }
}

/// Polls load tasks and swaps the loaded comic in
#[allow(clippy::too_many_arguments)]
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadComicTask)>,
    mut async_op: ResMut<AsyncComicOperation>,
    mut comic: ResMut<ComicData>,
    mut load_error: ResMut<ComicLoadError>,
    mut current_file: ResMut<CurrentComicFile>,
    mut config_events: MessageWriter<AddRecentComicRequest>,
    mut dirty_state: ResMut<ComicDirtyState>,
    mut replaced: MessageWriter<ComicReplaced>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        async_op.finish();
        load_error.message = None;
        commands.entity(entity).despawn();

        if let Some(error) = result.error {
            error!("{}", error);
            load_error.message = Some(error);
            continue;
        }

        let Some(loaded) = result.comic else {
            continue;
        };

        info!(
            "Comic loaded from {:?} ({} panels, {} overlays)",
            result.path,
            loaded.panels.len(),
            loaded.overlays().count()
        );

        *comic = loaded;
        current_file.path = Some(result.path.clone());
        config_events.write(AddRecentComicRequest { path: result.path });
        dirty_state.is_dirty = false;
        replaced.write(ComicReplaced);
    }
}

/// Reopen the comic from the previous session, if it still exists.
pub fn open_last_comic(
    config: Res<AppConfig>,
    mut load_events: MessageWriter<LoadComicRequest>,
) {
    if let Some(path) = &config.data.last_comic_path
        && path.exists()
    {
        info!("Reopening last comic {:?}", path);
        load_events.write(LoadComicRequest { path: path.clone() });
    }
}
