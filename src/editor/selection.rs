//! The selected overlay. At most one bubble is selected across the comic.

use bevy::prelude::*;

use crate::comic::{ComicData, ComicReplaced, OverlayAdded, OverlayId};

use super::controller::InteractionState;

#[derive(Resource, Default, Debug)]
pub struct SelectedOverlay(pub Option<OverlayId>);

impl SelectedOverlay {
    pub fn id(&self) -> Option<&OverlayId> {
        self.0.as_ref()
    }

    pub fn is(&self, id: &OverlayId) -> bool {
        self.0.as_ref() == Some(id)
    }

    pub fn select(&mut self, id: OverlayId) {
        if !self.is(&id) {
            debug!("Selected overlay {}", id);
            self.0 = Some(id);
        }
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Newly added bubbles start selected.
pub fn select_added_overlays(
    mut events: MessageReader<OverlayAdded>,
    mut selected: ResMut<SelectedOverlay>,
) {
    if let Some(event) = events.read().last() {
        selected.select(event.overlay_id.clone());
    }
}

/// Drop selection and interaction that point at overlays that are gone.
pub fn prune_stale_selection(
    comic: Res<ComicData>,
    mut selected: ResMut<SelectedOverlay>,
    mut interaction: ResMut<InteractionState>,
) {
    if let Some(id) = selected.id()
        && comic.overlay(id).is_none()
    {
        selected.clear();
    }

    if let Some(id) = interaction.overlay_id()
        && comic.overlay(id).is_none()
    {
        debug!("Interaction target {} disappeared", id);
        *interaction = InteractionState::Idle;
    }
}

/// A new or loaded comic starts with nothing selected.
pub fn reset_on_comic_replaced(
    mut events: MessageReader<ComicReplaced>,
    mut selected: ResMut<SelectedOverlay>,
    mut interaction: ResMut<InteractionState>,
) {
    if events.read().next().is_some() {
        selected.clear();
        *interaction = InteractionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_clear() {
        let mut selected = SelectedOverlay::default();
        let id = OverlayId("overlay-1-0-0".to_string());
        assert!(!selected.is(&id));
        selected.select(id.clone());
        assert!(selected.is(&id));
        selected.clear();
        assert!(selected.id().is_none());
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut selected = SelectedOverlay::default();
        let a = OverlayId("a".to_string());
        let b = OverlayId("b".to_string());
        selected.select(a.clone());
        selected.select(b.clone());
        assert!(selected.is(&b));
        assert!(!selected.is(&a));
    }
}
