//! Systems that apply edit requests to [`ComicData`].

use bevy::prelude::*;

use crate::config::AppConfig;

use super::ComicData;
use super::messages::{
    AddOverlayRequest, DeleteOverlayRequest, OverlayAdded, OverlayUpdateRequest,
    RegenerateOverlaysRequest,
};
use super::persistence::ComicDirtyState;

pub fn apply_overlay_updates(
    mut events: MessageReader<OverlayUpdateRequest>,
    mut comic: ResMut<ComicData>,
    mut dirty_state: ResMut<ComicDirtyState>,
) {
    for event in events.read() {
        if event.update.is_empty() {
            continue;
        }
        if comic.apply_update(&event.overlay_id, event.update.clone()) {
            dirty_state.is_dirty = true;
        } else {
            debug!("Dropped update for missing overlay {}", event.overlay_id);
        }
    }
}

pub fn add_overlays(
    mut events: MessageReader<AddOverlayRequest>,
    mut comic: ResMut<ComicData>,
    mut dirty_state: ResMut<ComicDirtyState>,
    mut added: MessageWriter<OverlayAdded>,
    config: Option<Res<AppConfig>>,
) {
    let font_family = config.and_then(|c| c.data.default_font_family.clone());

    for event in events.read() {
        match comic.add_overlay(event.panel_idx) {
            Some(overlay_id) => {
                if let Some(family) = &font_family
                    && let Some(overlay) = comic.overlay_mut(&overlay_id)
                {
                    overlay.style.font_family = family.clone();
                }
                info!("Added overlay {} to panel {}", overlay_id, event.panel_idx);
                dirty_state.is_dirty = true;
                added.write(OverlayAdded { overlay_id });
            }
            None => warn!("Cannot add overlay: panel {} does not exist", event.panel_idx),
        }
    }
}

pub fn delete_overlays(
    mut events: MessageReader<DeleteOverlayRequest>,
    mut comic: ResMut<ComicData>,
    mut dirty_state: ResMut<ComicDirtyState>,
) {
    for event in events.read() {
        if comic.delete_overlay(&event.overlay_id) {
            info!("Deleted overlay {}", event.overlay_id);
            dirty_state.is_dirty = true;
        }
    }
}

pub fn regenerate_overlays(
    mut events: MessageReader<RegenerateOverlaysRequest>,
    mut comic: ResMut<ComicData>,
    mut dirty_state: ResMut<ComicDirtyState>,
) {
    for event in events.read() {
        if let Some(count) = comic.regenerate_overlays(event.panel_idx) {
            info!(
                "Regenerated {} overlays for panel {}",
                count, event.panel_idx
            );
            dirty_state.is_dirty = true;
        }
    }
}
