//! Where panels sit in the world and on screen.
//!
//! Panels are stacked top to bottom, centered on x = 0, each
//! [`PANEL_WORLD_WIDTH`] wide with a height from its aspect ratio. The
//! screen box of every panel is recomputed each frame from the camera so
//! drags and hit tests always use the live zoom and pan.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::bubble::PanelBounds;
use crate::comic::ComicData;
use crate::constants::{PANEL_WORLD_GAP, PANEL_WORLD_WIDTH};

use super::EditorCamera;

/// World-space box of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub idx: u32,
    pub rect: Rect,
}

impl PanelRect {
    /// Panel-percent point to world space (y flips: panel y grows down).
    pub fn percent_to_world(&self, percent: Vec2) -> Vec2 {
        let size = self.rect.size();
        Vec2::new(
            self.rect.min.x + percent.x / 100.0 * size.x,
            self.rect.max.y - percent.y / 100.0 * size.y,
        )
    }
}

/// World rects for every panel, in panel order.
pub fn panel_world_rects(comic: &ComicData) -> Vec<PanelRect> {
    let mut top = 0.0;
    comic
        .panels
        .iter()
        .map(|panel| {
            let height = PANEL_WORLD_WIDTH / panel.aspect_ratio.ratio();
            let rect = Rect::new(
                -PANEL_WORLD_WIDTH / 2.0,
                top - height,
                PANEL_WORLD_WIDTH / 2.0,
                top,
            );
            top -= height + PANEL_WORLD_GAP;
            PanelRect {
                idx: panel.idx,
                rect,
            }
        })
        .collect()
}

/// Bounding box of the whole page, or `None` for a comic without panels.
pub fn page_world_rect(comic: &ComicData) -> Option<Rect> {
    panel_world_rects(comic)
        .into_iter()
        .map(|p| p.rect)
        .reduce(|a, b| a.union(b))
}

/// Screen boxes of the panels for the current frame.
#[derive(Resource, Default)]
pub struct PanelLayout {
    world: Vec<PanelRect>,
    screen: HashMap<u32, PanelBounds>,
}

impl PanelLayout {
    pub fn world_rects(&self) -> &[PanelRect] {
        &self.world
    }

    pub fn world_rect(&self, idx: u32) -> Option<&PanelRect> {
        self.world.iter().find(|p| p.idx == idx)
    }

    /// `None` until the camera has produced a usable box for this panel.
    pub fn bounds(&self, idx: u32) -> Option<PanelBounds> {
        self.screen.get(&idx).copied()
    }

    pub fn set_bounds(&mut self, idx: u32, bounds: PanelBounds) {
        self.screen.insert(idx, bounds);
    }

    /// The panel under a screen position. Panels never overlap on screen.
    pub fn panel_at(&self, screen: Vec2) -> Option<(u32, PanelBounds)> {
        self.screen
            .iter()
            .find(|(_, bounds)| bounds.contains(screen))
            .map(|(&idx, &bounds)| (idx, bounds))
    }
}

pub fn update_panel_layout(
    comic: Res<ComicData>,
    camera: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    mut layout: ResMut<PanelLayout>,
) {
    let world = panel_world_rects(&comic);
    layout.screen.clear();

    let Ok((camera, camera_transform)) = camera.single() else {
        layout.world = world;
        return;
    };

    for panel in &world {
        let top_left = Vec2::new(panel.rect.min.x, panel.rect.max.y);
        let bottom_right = Vec2::new(panel.rect.max.x, panel.rect.min.y);
        let (Ok(tl), Ok(br)) = (
            camera.world_to_viewport(camera_transform, top_left.extend(0.0)),
            camera.world_to_viewport(camera_transform, bottom_right.extend(0.0)),
        ) else {
            continue;
        };
        if let Some(bounds) = PanelBounds::new(tl, br - tl) {
            layout.set_bounds(panel.idx, bounds);
        }
    }
    layout.world = world;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comic::{ComicFormat, PanelAspect};

    #[test]
    fn test_panels_stack_downward() {
        let comic = ComicData::new(ComicFormat::FourCut);
        let rects = panel_world_rects(&comic);
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0].rect.max.y, 0.0);
        assert_eq!(rects[0].rect.min.y, -PANEL_WORLD_WIDTH);
        assert_eq!(rects[1].rect.max.y, -PANEL_WORLD_WIDTH - PANEL_WORLD_GAP);
    }

    #[test]
    fn test_panel_height_follows_aspect() {
        let mut comic = ComicData::new(ComicFormat::Continuous);
        comic.panels[0].aspect_ratio = PanelAspect::Wide;
        let rect = panel_world_rects(&comic)[0].rect;
        assert_eq!(rect.width(), PANEL_WORLD_WIDTH);
        assert!((rect.height() - PANEL_WORLD_WIDTH * 9.0 / 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_percent_to_world_corners() {
        let comic = ComicData::new(ComicFormat::Continuous);
        let panel = panel_world_rects(&comic)[0];
        assert_eq!(panel.percent_to_world(Vec2::ZERO), Vec2::new(-300.0, 0.0));
        assert_eq!(
            panel.percent_to_world(Vec2::splat(100.0)),
            Vec2::new(300.0, -PANEL_WORLD_WIDTH)
        );
    }

    #[test]
    fn test_page_rect_covers_all_panels() {
        let comic = ComicData::new(ComicFormat::FourCut);
        let page = page_world_rect(&comic).unwrap();
        assert_eq!(page.max.y, 0.0);
        assert_eq!(page.min.y, -(4.0 * PANEL_WORLD_WIDTH + 3.0 * PANEL_WORLD_GAP));

        let empty = ComicData {
            panels: Vec::new(),
            ..ComicData::default()
        };
        assert!(page_world_rect(&empty).is_none());
    }

    #[test]
    fn test_panel_at_uses_screen_bounds() {
        let mut layout = PanelLayout::default();
        let top = PanelBounds::new(Vec2::new(0.0, 0.0), Vec2::new(300.0, 300.0)).unwrap();
        let bottom = PanelBounds::new(Vec2::new(0.0, 320.0), Vec2::new(300.0, 300.0)).unwrap();
        layout.set_bounds(1, top);
        layout.set_bounds(2, bottom);
        assert_eq!(layout.panel_at(Vec2::new(10.0, 400.0)).map(|(idx, _)| idx), Some(2));
        assert!(layout.panel_at(Vec2::new(10.0, 310.0)).is_none());
    }

    #[test]
    fn test_layout_without_camera_has_no_bounds() {
        let layout = PanelLayout::default();
        assert!(layout.bounds(1).is_none());
        assert!(layout.panel_at(Vec2::new(10.0, 10.0)).is_none());
    }
}
