//! Starting a fresh comic.

use bevy::prelude::*;

use crate::comic::ComicData;

use super::messages::{ComicReplaced, NewComicRequest};
use super::resources::{ComicDirtyState, CurrentComicFile};

pub fn new_comic_system(
    mut events: MessageReader<NewComicRequest>,
    mut comic: ResMut<ComicData>,
    mut current_file: ResMut<CurrentComicFile>,
    mut dirty_state: ResMut<ComicDirtyState>,
    mut replaced: MessageWriter<ComicReplaced>,
) {
    for event in events.read() {
        *comic = ComicData::new(event.format);
        current_file.path = None;
        dirty_state.is_dirty = false;
        replaced.write(ComicReplaced);

        info!("Created new {} comic", event.format.display_name());
    }
}
