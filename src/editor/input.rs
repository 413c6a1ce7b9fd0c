//! Pointer and keyboard input for bubbles.
//!
//! A press picks, in order: a handle of the selected bubble, the topmost
//! bubble body under the pointer, then empty panel space. Drags are read
//! from the window cursor every frame, so they keep going when the pointer
//! leaves the bubble or the panel.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::comic::{
    ComicData, CurrentComicFile, DeleteOverlayRequest, OverlayId, OverlayUpdate,
    OverlayUpdateRequest, SaveComicRequest,
};
use crate::common::DragHandle;
use crate::constants::{DOUBLE_CLICK_SECONDS, HANDLE_PICK_RADIUS};
use crate::ui::FileMenuState;

use super::controller::{DragSession, InteractionState};
use super::layout::PanelLayout;
use super::params::{CameraParams, egui_wants_keyboard, is_cursor_over_ui};
use super::render::{RenderMode, render_overlay, text_region};
use super::selection::SelectedOverlay;

/// What a press at a screen position lands on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Handle(OverlayId, DragHandle),
    Body(OverlayId),
    /// Inside a panel but on no bubble
    EmptyPanel(u32),
    Outside,
}

pub fn pick_target(
    comic: &ComicData,
    layout: &PanelLayout,
    selected: Option<&OverlayId>,
    screen: Vec2,
) -> PointerTarget {
    if let Some(overlay) = selected.and_then(|id| comic.overlay(id))
        && let Some(bounds) = layout.bounds(overlay.panel_id)
    {
        let rendered = render_overlay(
            overlay,
            RenderMode::Interactive {
                selected: true,
                editing: false,
            },
        );
        let hit = rendered
            .handles
            .iter()
            .find(|marker| bounds.percent_to_screen(marker.at).distance(screen) <= HANDLE_PICK_RADIUS);
        if let Some(marker) = hit {
            return PointerTarget::Handle(overlay.id.clone(), marker.handle);
        }
    }

    let Some((idx, bounds)) = layout.panel_at(screen) else {
        return PointerTarget::Outside;
    };
    let Some(panel) = comic.panel(idx) else {
        return PointerTarget::Outside;
    };

    let percent = bounds.screen_to_percent(screen);
    panel
        .overlays
        .iter()
        .rev()
        .find(|overlay| overlay.rect().contains(percent))
        .map(|overlay| PointerTarget::Body(overlay.id.clone()))
        .unwrap_or(PointerTarget::EmptyPanel(idx))
}

/// Remembers the last press on a bubble to detect double-clicks.
#[derive(Resource, Default)]
pub struct ClickTracker {
    last: Option<(OverlayId, f64)>,
}

impl ClickTracker {
    /// Record a press on `id` at `now` seconds. True when it completes a
    /// double-click; the pair is then consumed.
    pub fn register(&mut self, id: &OverlayId, now: f64) -> bool {
        let is_double = self
            .last
            .as_ref()
            .is_some_and(|(last_id, at)| last_id == id && now - at <= DOUBLE_CLICK_SECONDS);
        self.last = if is_double {
            None
        } else {
            Some((id.clone(), now))
        };
        is_double
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_pointer_press(
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    camera: CameraParams,
    mut contexts: EguiContexts,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    mut selected: ResMut<SelectedOverlay>,
    mut interaction: ResMut<InteractionState>,
    mut clicks: ResMut<ClickTracker>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Text editing ends when the editor loses focus, not here
    if interaction.is_editing_text() || is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(pointer) = camera.cursor_screen_pos() else {
        return;
    };

    match pick_target(&comic, &layout, selected.id(), pointer) {
        PointerTarget::Handle(id, handle) => {
            let session = comic.overlay(&id).and_then(|overlay| {
                DragSession::begin(overlay, handle, pointer, layout.bounds(overlay.panel_id))
            });
            if let Some(session) = session {
                debug!("Start {:?} drag on {}", handle, id);
                *interaction = InteractionState::Dragging(session);
            }
            clicks.clear();
        }
        PointerTarget::Body(id) => {
            let was_selected = selected.is(&id);
            let is_double = clicks.register(&id, time.elapsed_secs_f64());

            let Some(overlay) = comic.overlay(&id) else {
                return;
            };
            let bounds = layout.bounds(overlay.panel_id);
            let on_text = bounds.is_some_and(|b| {
                text_region(overlay).contains(b.screen_to_percent(pointer))
            });
            if was_selected && is_double && on_text {
                debug!("Editing text of {}", id);
                *interaction = InteractionState::EditingText {
                    overlay_id: id,
                    buffer: overlay.text.clone(),
                };
            } else {
                let session = DragSession::begin(overlay, DragHandle::Move, pointer, bounds);
                if let Some(session) = session {
                    *interaction = InteractionState::Dragging(session);
                }
                selected.select(id);
            }
        }
        PointerTarget::EmptyPanel(_) => {
            selected.clear();
            clicks.clear();
        }
        PointerTarget::Outside => {}
    }
}

pub fn handle_pointer_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    layout: Res<PanelLayout>,
    interaction: Res<InteractionState>,
    mut updates: MessageWriter<OverlayUpdateRequest>,
    mut last_sent: Local<Option<OverlayUpdate>>,
) {
    let InteractionState::Dragging(session) = &*interaction else {
        *last_sent = None;
        return;
    };
    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }
    let Some(pointer) = camera.cursor_screen_pos() else {
        return;
    };

    let bounds = layout.bounds(session.snapshot().panel_id);
    let Some(update) = session.update(pointer, bounds) else {
        return;
    };
    if last_sent.as_ref() == Some(&update) {
        return;
    }

    *last_sent = Some(update.clone());
    updates.write(OverlayUpdateRequest {
        overlay_id: session.overlay_id().clone(),
        update,
    });
}

pub fn handle_pointer_release(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut interaction: ResMut<InteractionState>,
) {
    if let InteractionState::Dragging(session) = &*interaction
        && !mouse_button.pressed(MouseButton::Left)
    {
        debug!("End {:?} drag on {}", session.handle(), session.overlay_id());
        *interaction = InteractionState::Idle;
    }
}

/// Escape reverts a drag in progress, or clears the selection when idle.
pub fn handle_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut interaction: ResMut<InteractionState>,
    mut selected: ResMut<SelectedOverlay>,
    mut updates: MessageWriter<OverlayUpdateRequest>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    match &*interaction {
        InteractionState::Dragging(session) => {
            debug!("Reverted drag on {}", session.overlay_id());
            updates.write(OverlayUpdateRequest {
                overlay_id: session.overlay_id().clone(),
                update: session.revert(),
            });
            *interaction = InteractionState::Idle;
        }
        InteractionState::Idle if !egui_wants_keyboard(&mut contexts) => selected.clear(),
        _ => {}
    }
}

pub fn handle_deletion(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    interaction: Res<InteractionState>,
    selected: Res<SelectedOverlay>,
    mut delete_events: MessageWriter<DeleteOverlayRequest>,
) {
    if !keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        return;
    }
    if !interaction.is_idle() || egui_wants_keyboard(&mut contexts) {
        return;
    }
    if let Some(id) = selected.id() {
        delete_events.write(DeleteOverlayRequest {
            overlay_id: id.clone(),
        });
    }
}

/// Ctrl+S saves to the current file. Unsaved comics go through Save As.
pub fn handle_save_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_file: Res<CurrentComicFile>,
    mut save_events: MessageWriter<SaveComicRequest>,
    mut file_menu: ResMut<FileMenuState>,
) {
    let ctrl_held =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl_held || !keyboard.just_pressed(KeyCode::KeyS) {
        return;
    }

    match &current_file.path {
        Some(path) => {
            save_events.write(SaveComicRequest { path: path.clone() });
        }
        None => file_menu.save_as_requested = true,
    }
}

/// Cursor shape for the handle or bubble under the pointer.
#[allow(clippy::too_many_arguments)]
pub fn update_cursor_icon(
    window_query: Query<Entity, With<PrimaryWindow>>,
    camera: CameraParams,
    mut contexts: EguiContexts,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    selected: Res<SelectedOverlay>,
    interaction: Res<InteractionState>,
    mut commands: Commands,
) {
    let Ok(window_entity) = window_query.single() else {
        return;
    };

    let icon = if let InteractionState::Dragging(session) = &*interaction {
        session.handle().cursor_icon()
    } else if interaction.is_editing_text() || is_cursor_over_ui(&mut contexts) {
        CursorIcon::System(SystemCursorIcon::Default)
    } else {
        match camera
            .cursor_screen_pos()
            .map(|pointer| pick_target(&comic, &layout, selected.id(), pointer))
        {
            Some(PointerTarget::Handle(_, handle)) => handle.cursor_icon(),
            Some(PointerTarget::Body(_)) => CursorIcon::System(SystemCursorIcon::Pointer),
            _ => CursorIcon::System(SystemCursorIcon::Default),
        }
    };

    commands.entity(window_entity).insert(icon);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::PanelBounds;
    use crate::comic::{ComicFormat, Tail};
    use crate::common::Corner;

    /// One 400x400 px panel at the window origin: 1% is 4 px.
    fn setup() -> (ComicData, PanelLayout, OverlayId, OverlayId) {
        let mut comic = ComicData::new(ComicFormat::Continuous);
        let lower = comic.add_overlay(1).unwrap();
        let upper = comic.add_overlay(1).unwrap();
        if let Some(o) = comic.overlay_mut(&upper) {
            o.x = 40.0;
            o.y = 40.0;
            o.w = 40.0;
            o.h = 20.0;
            o.tail = Some(Tail::new(60.0, 80.0, 0.0));
        }
        let mut layout = PanelLayout::default();
        layout.set_bounds(1, PanelBounds::new(Vec2::ZERO, Vec2::splat(400.0)).unwrap());
        (comic, layout, lower, upper)
    }

    #[test]
    fn test_pick_topmost_body() {
        let (comic, layout, lower, upper) = setup();
        // (45%, 45%) is inside both bubbles
        assert_eq!(
            pick_target(&comic, &layout, None, Vec2::new(180.0, 180.0)),
            PointerTarget::Body(upper)
        );
        // (25%, 25%) only hits the lower one
        assert_eq!(
            pick_target(&comic, &layout, None, Vec2::new(100.0, 100.0)),
            PointerTarget::Body(lower)
        );
    }

    #[test]
    fn test_pick_empty_panel_and_outside() {
        let (comic, layout, _, _) = setup();
        assert_eq!(
            pick_target(&comic, &layout, None, Vec2::new(8.0, 390.0)),
            PointerTarget::EmptyPanel(1)
        );
        assert_eq!(
            pick_target(&comic, &layout, None, Vec2::new(500.0, 10.0)),
            PointerTarget::Outside
        );
    }

    #[test]
    fn test_pick_handles_of_selected_only() {
        let (comic, layout, _, upper) = setup();
        // South-east corner of the upper bubble is at (80%, 60%)
        let corner = Vec2::new(322.0, 242.0);
        assert_eq!(
            pick_target(&comic, &layout, Some(&upper), corner),
            PointerTarget::Handle(upper.clone(), DragHandle::Resize(Corner::Se))
        );
        assert_ne!(
            pick_target(&comic, &layout, None, corner),
            PointerTarget::Handle(upper, DragHandle::Resize(Corner::Se))
        );
    }

    #[test]
    fn test_pick_tail_handle() {
        let (comic, layout, _, upper) = setup();
        assert_eq!(
            pick_target(&comic, &layout, Some(&upper), Vec2::new(240.0, 320.0)),
            PointerTarget::Handle(upper, DragHandle::Tail)
        );
    }

    #[test]
    fn test_pick_without_bounds() {
        let (comic, _, _, upper) = setup();
        let layout = PanelLayout::default();
        assert_eq!(
            pick_target(&comic, &layout, Some(&upper), Vec2::new(180.0, 180.0)),
            PointerTarget::Outside
        );
    }

    #[test]
    fn test_double_click_window() {
        let mut clicks = ClickTracker::default();
        let a = OverlayId("a".to_string());
        let b = OverlayId("b".to_string());

        assert!(!clicks.register(&a, 1.0));
        assert!(clicks.register(&a, 1.2));
        // Consumed: a third press starts over
        assert!(!clicks.register(&a, 1.3));

        assert!(!clicks.register(&b, 1.4));
        assert!(!clicks.register(&a, 1.5));
        assert!(!clicks.register(&a, 2.0));
    }
}
