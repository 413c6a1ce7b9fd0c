//! Message types for editing the comic model.

use bevy::prelude::*;

use super::{OverlayId, OverlayUpdate};

/// Partial edit of one overlay (drag, property change, text edit).
#[derive(Message, Debug, Clone)]
pub struct OverlayUpdateRequest {
    pub overlay_id: OverlayId,
    pub update: OverlayUpdate,
}

#[derive(Message)]
pub struct AddOverlayRequest {
    pub panel_idx: u32,
}

#[derive(Message)]
pub struct DeleteOverlayRequest {
    pub overlay_id: OverlayId,
}

/// Replace a panel's overlays with one bubble per dialogue line.
#[derive(Message)]
pub struct RegenerateOverlaysRequest {
    pub panel_idx: u32,
}

/// Sent after an overlay was added so the editor can select it.
#[derive(Message)]
pub struct OverlayAdded {
    pub overlay_id: OverlayId,
}
