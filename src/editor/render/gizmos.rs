//! Gizmo drawing for panels and bubbles (editor view only). Bodies are
//! filled by [`super::fills`] underneath.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::bubble::{BoxStyle, BubbleRect};
use crate::comic::ComicData;
use crate::constants::{FLATTEN_TOLERANCE, HANDLE_PICK_RADIUS};
use crate::editor::controller::InteractionState;
use crate::editor::layout::{PanelLayout, PanelRect};
use crate::editor::params::CameraParams;
use crate::editor::selection::SelectedOverlay;
use crate::theme;

use super::{BubbleShape, RenderMode, render_overlay};

/// Narration header strip height, as a fraction of the box height
const NARRATION_HEADER: f32 = 0.08;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct BubbleGizmoGroup;

pub fn configure_bubble_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<BubbleGizmoGroup>();
    config.line.width = 2.0;
}

pub fn draw_panel_frames(mut gizmos: Gizmos<BubbleGizmoGroup>, layout: Res<PanelLayout>) {
    for panel in layout.world_rects() {
        gizmos.rect_2d(
            Isometry2d::from_translation(panel.rect.center()),
            panel.rect.size(),
            theme::PANEL_FRAME,
        );
    }
}

pub fn draw_overlays(
    mut gizmos: Gizmos<BubbleGizmoGroup>,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    selected: Res<SelectedOverlay>,
    interaction: Res<InteractionState>,
    camera: CameraParams,
) {
    let pixel = camera.zoom_scale();

    for (panel, overlay) in comic.overlays() {
        let Some(panel_rect) = layout.world_rect(panel.idx) else {
            continue;
        };

        let is_selected = selected.is(&overlay.id);
        let editing = is_selected && interaction.is_editing_text();
        let rendered = render_overlay(
            overlay,
            RenderMode::Interactive {
                selected: is_selected,
                editing,
            },
        );
        let rect = overlay.rect();

        match &rendered.shape {
            BubbleShape::Path(path) => {
                for subpath in path.flatten(FLATTEN_TOLERANCE) {
                    let points = subpath
                        .into_iter()
                        .map(|local| panel_rect.percent_to_world(rect.local_to_panel(local)));
                    gizmos.linestrip_2d(points, theme::BUBBLE_STROKE);
                }
            }
            BubbleShape::Boxed(style) => draw_box(&mut gizmos, panel_rect, &rect, *style),
            BubbleShape::Nothing => {}
        }

        if rendered.selection_outline {
            let (min, max) = world_box(panel_rect, &rect);
            let pad = Vec2::splat(3.0 * pixel);
            let outline = Rect::from_corners(min - pad, max + pad);
            gizmos.rect_2d(
                Isometry2d::from_translation(outline.center()),
                outline.size(),
                theme::SELECTION_COLOR,
            );
        }

        for marker in &rendered.handles {
            gizmos.circle_2d(
                Isometry2d::from_translation(panel_rect.percent_to_world(marker.at)),
                HANDLE_PICK_RADIUS * 0.75 * pixel,
                marker.color(),
            );
        }
    }
}

/// World-space corners (min, max) of a bubble box.
fn world_box(panel_rect: &PanelRect, rect: &BubbleRect) -> (Vec2, Vec2) {
    let a = panel_rect.percent_to_world(rect.origin());
    let b = panel_rect.percent_to_world(rect.origin() + rect.size());
    (a.min(b), a.max(b))
}

fn draw_box(
    gizmos: &mut Gizmos<BubbleGizmoGroup>,
    panel_rect: &PanelRect,
    rect: &BubbleRect,
    style: BoxStyle,
) {
    let (min, max) = world_box(panel_rect, rect);
    let center = (min + max) / 2.0;
    let size = max - min;

    match style {
        // The drop shadow is part of the fill
        BoxStyle::Webtoon => {
            gizmos.rect_2d(Isometry2d::from_translation(center), size, theme::BUBBLE_STROKE);
        }
        BoxStyle::Narration => {
            gizmos.rect_2d(Isometry2d::from_translation(center), size, theme::BUBBLE_STROKE);
            let strip_y = max.y - size.y * NARRATION_HEADER;
            gizmos.line_2d(
                Vec2::new(min.x, strip_y),
                Vec2::new(max.x, strip_y),
                theme::BUBBLE_STROKE,
            );
        }
        BoxStyle::Simple => {
            gizmos.rect_2d(Isometry2d::from_translation(center), size, theme::SIMPLE_BORDER);
        }
        // Text only
        BoxStyle::Cinematic => {}
    }
}
