//! Panel background images.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::comic::ComicData;
use crate::editor::layout::PanelLayout;
use crate::theme;

/// Sprite behind a panel: its background image, or a blank page.
#[derive(Component)]
pub struct PanelBackground;

/// Respawn background sprites when a panel's image or placement changes.
pub fn sync_panel_backgrounds(
    mut commands: Commands,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    asset_server: Res<AssetServer>,
    existing: Query<Entity, With<PanelBackground>>,
    mut shown: Local<Vec<(Option<PathBuf>, Rect)>>,
) {
    let wanted: Vec<(Option<PathBuf>, Rect)> = comic
        .panels
        .iter()
        .filter_map(|panel| {
            let rect = layout.world_rect(panel.idx)?.rect;
            Some((panel.image_path.clone(), rect))
        })
        .collect();

    if *shown == wanted {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    for (path, rect) in &wanted {
        let sprite = match path {
            Some(path) => Sprite {
                image: asset_server.load(path.clone()),
                custom_size: Some(rect.size()),
                ..default()
            },
            None => Sprite::from_color(theme::BLANK_PANEL, rect.size()),
        };
        commands.spawn((
            sprite,
            Transform::from_translation(rect.center().extend(0.0)),
            PanelBackground,
        ));
    }

    debug!(
        "Showing {} panel backgrounds ({} images)",
        wanted.len(),
        wanted.iter().filter(|(path, _)| path.is_some()).count()
    );
    *shown = wanted;
}
