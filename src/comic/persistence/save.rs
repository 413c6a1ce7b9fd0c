//! Comic save system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::comic::ComicData;
use crate::config::AddRecentComicRequest;

use super::helpers::{encode_comic, file_label};
use super::messages::SaveComicRequest;
use super::resources::{
    AsyncComicOperation, ComicDirtyState, ComicSaveError, CurrentComicFile, SaveComicTask,
};
use super::results::SaveResult;

/// Starts an async save operation
pub fn save_comic_system(
    mut commands: Commands,
    mut events: MessageReader<SaveComicRequest>,
    comic: Res<ComicData>,
    mut async_op: ResMut<AsyncComicOperation>,
    mut save_error: ResMut<ComicSaveError>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Save operation already in progress");
            continue;
        }

        // Serialize on the main thread so the task owns a consistent snapshot
        let json = match encode_comic(&comic) {
            Ok(json) => json,
            Err(e) => {
                error!("{}", e);
                save_error.message = Some(e);
                continue;
            }
        };

        let path = event.path.clone();
        async_op.start(true, format!("Saving {}...", file_label(&path, "comic")));

        let task = IoTaskPool::get().spawn(async move {
            match std::fs::write(&path, json) {
                Ok(()) => SaveResult {
                    path,
                    success: true,
                    error: None,
                },
                Err(e) => SaveResult {
                    path,
                    success: false,
                    error: Some(format!("Failed to write file: {}", e)),
                },
            }
        });

        commands.spawn(SaveComicTask(task));
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveComicTask)>,
    mut async_op: ResMut<AsyncComicOperation>,
    mut current_file: ResMut<CurrentComicFile>,
    mut config_events: MessageWriter<AddRecentComicRequest>,
    mut dirty_state: ResMut<ComicDirtyState>,
    mut save_error: ResMut<ComicSaveError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        async_op.finish();

        if result.success {
            info!("Comic saved to {:?}", result.path);
            save_error.message = None;
            current_file.path = Some(result.path.clone());
            config_events.write(AddRecentComicRequest { path: result.path });
            dirty_state.is_dirty = false;
        } else if let Some(error) = result.error {
            error!("{}", error);
            save_error.message = Some(error);
        }

        commands.entity(entity).despawn();
    }
}
