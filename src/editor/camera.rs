use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::comic::{ComicData, ComicReplaced};

use super::layout::page_world_rect;

/// Margin around the page when framing it
const FIT_MARGIN: f32 = 1.1;

#[derive(Component)]
pub struct EditorCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Zoom that fits `page` into a viewport of `viewport` pixels, with margin.
pub fn fit_scale(page: Rect, viewport: Vec2) -> f32 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return 1.0;
    }
    let size = page.size();
    ((size.x / viewport.x).max(size.y / viewport.y) * FIT_MARGIN).clamp(0.1, 10.0)
}

/// Frame the whole page: at startup and whenever the comic is replaced.
pub fn fit_camera_to_page(
    mut replaced: MessageReader<ComicReplaced>,
    mut fitted_once: Local<bool>,
    comic: Res<ComicData>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    let was_replaced = replaced.read().count() > 0;
    if *fitted_once && !was_replaced {
        return;
    }

    let (Ok(window), Ok((mut transform, mut zoom))) = (window.single(), camera_query.single_mut())
    else {
        return;
    };
    let Some(page) = page_world_rect(&comic) else {
        return;
    };

    let center = page.center();
    transform.translation.x = center.x;
    transform.translation.y = center.y;
    zoom.scale = fit_scale(page, window.size());
    *fitted_once = true;
    debug!("Camera framed page at scale {:.2}", zoom.scale);
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<EditorCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        zoom.scale = (zoom.scale - scroll_amount).clamp(0.1, 10.0);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<EditorCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}
