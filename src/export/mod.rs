//! SVG export of a panel's overlays.

mod document;

pub use document::{document_size, panel_document};

use std::path::PathBuf;

use bevy::prelude::*;

use crate::comic::ComicData;
use crate::config::SetExportDirRequest;

#[derive(Message)]
pub struct ExportOverlaysRequest {
    pub panel_idx: u32,
    pub path: PathBuf,
}

/// Last export failure, shown in a dialog until dismissed.
#[derive(Resource, Default)]
pub struct ExportError {
    pub message: Option<String>,
}

/// Last successful export, shown as a notification.
#[derive(Resource, Default)]
pub struct ExportNotification {
    pub message: Option<String>,
}

pub fn export_overlays_system(
    mut events: MessageReader<ExportOverlaysRequest>,
    comic: Res<ComicData>,
    mut export_error: ResMut<ExportError>,
    mut notification: ResMut<ExportNotification>,
    mut export_dir_events: MessageWriter<SetExportDirRequest>,
) {
    for event in events.read() {
        let Some(panel) = comic.panel(event.panel_idx) else {
            warn!("Cannot export: panel {} does not exist", event.panel_idx);
            continue;
        };

        let document = panel_document(panel);
        match std::fs::write(&event.path, document.to_string()) {
            Ok(()) => {
                info!(
                    "Exported {} overlays of panel {} to {:?}",
                    panel.overlays.len(),
                    panel.idx,
                    event.path
                );
                notification.message = Some(format!(
                    "Exported panel {} to {}",
                    panel.idx,
                    event.path.display()
                ));
                if let Some(dir) = event.path.parent() {
                    export_dir_events.write(SetExportDirRequest {
                        path: dir.to_path_buf(),
                    });
                }
            }
            Err(e) => {
                error!("Failed to export panel {}: {}", panel.idx, e);
                export_error.message = Some(format!("Failed to write SVG: {}", e));
            }
        }
    }
}

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportError>()
            .init_resource::<ExportNotification>()
            .add_message::<ExportOverlaysRequest>()
            .add_systems(
                Update,
                export_overlays_system.run_if(on_message::<ExportOverlaysRequest>),
            );
    }
}
