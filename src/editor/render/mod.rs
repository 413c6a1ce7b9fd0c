//! Bubble rendering.
//!
//! [`render_overlay`] decides what an overlay looks like, independent of
//! where it is drawn. The editor draws the result with gizmos and egui; the
//! SVG export draws the same result without handles.
//!
//! ## Module Structure
//!
//! - [`gizmos`] - Panel frames, bubble outlines, selection and handles
//! - [`fills`] - Bubble bodies tessellated into meshes under the outlines
//! - [`text`] - Bubble text drawn as egui areas
//! - [`backgrounds`] - Panel background image sprites

mod backgrounds;
mod fills;
mod gizmos;
mod text;

pub use backgrounds::sync_panel_backgrounds;
pub use fills::sync_bubble_fills;
pub use gizmos::{BubbleGizmoGroup, configure_bubble_gizmos, draw_overlays, draw_panel_frames};
pub use text::{draw_overlay_text, egui_align, overlay_rich_text, text_scale, text_screen_rect};

use bevy::prelude::*;

use crate::bubble::{
    BODY_BOTTOM, BODY_LEFT, BODY_RIGHT, BODY_TOP, BoxStyle, BubblePath, ShapeRecipe,
    generate_path, tail_base_anchor,
};
use crate::comic::Overlay;
use crate::common::{Corner, DragHandle};
use crate::theme;

/// Where an overlay is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Interactive { selected: bool, editing: bool },
    Export,
}

/// The body of an overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleShape {
    /// Outline in shape space (`0..100` across the bubble's box)
    Path(BubblePath),
    /// Styled rectangle filling the bubble's box
    Boxed(BoxStyle),
    /// Unknown design: draw nothing
    Nothing,
}

/// A drag handle to draw, in panel percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    pub handle: DragHandle,
    pub at: Vec2,
}

impl HandleMarker {
    pub fn color(&self) -> Color {
        match self.handle {
            DragHandle::Tail => theme::TAIL_TIP_HANDLE,
            DragHandle::TailBase => theme::TAIL_BASE_HANDLE,
            DragHandle::Resize(_) | DragHandle::Move => theme::RESIZE_HANDLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOverlay {
    pub shape: BubbleShape,
    pub handles: Vec<HandleMarker>,
    pub selection_outline: bool,
}

pub fn render_overlay(overlay: &Overlay, mode: RenderMode) -> RenderedOverlay {
    let body = overlay.body();
    let shape = match overlay.design.recipe(body) {
        None => BubbleShape::Nothing,
        Some(ShapeRecipe::Boxed(style)) => BubbleShape::Boxed(style),
        Some(_) => generate_path(&overlay.design, body, overlay.tail_local())
            .map(BubbleShape::Path)
            .unwrap_or(BubbleShape::Nothing),
    };

    let (show_handles, selection_outline) = match mode {
        RenderMode::Interactive { selected, editing } => (selected && !editing, selected),
        RenderMode::Export => (false, false),
    };

    let handles = if show_handles {
        handle_markers(overlay)
    } else {
        Vec::new()
    };

    RenderedOverlay {
        shape,
        handles,
        selection_outline,
    }
}

/// Every handle of `overlay`, in pick priority order.
fn handle_markers(overlay: &Overlay) -> Vec<HandleMarker> {
    let rect = overlay.rect();
    let mut handles: Vec<HandleMarker> = Corner::all()
        .iter()
        .map(|&corner| HandleMarker {
            handle: DragHandle::Resize(corner),
            at: Vec2::new(
                if corner.touches_west() { rect.x } else { rect.x + rect.w },
                if corner.touches_north() { rect.y } else { rect.y + rect.h },
            ),
        })
        .collect();

    if !overlay.design.supports_tail() {
        return handles;
    }
    let Some(tail) = overlay.tail else {
        return handles;
    };

    handles.push(HandleMarker {
        handle: DragHandle::Tail,
        at: tail.tip(),
    });

    let anchor = overlay
        .design
        .recipe(overlay.body())
        .zip(overlay.tail_local())
        .and_then(|(recipe, local)| tail_base_anchor(&recipe, local));
    if let Some(anchor) = anchor {
        handles.push(HandleMarker {
            handle: DragHandle::TailBase,
            at: rect.local_to_panel(anchor),
        });
    }

    handles
}

/// Panel-percent box the text is laid out in.
pub fn text_region(overlay: &Overlay) -> Rect {
    let rect = overlay.rect();
    if overlay.design.is_path_based() {
        Rect::from_corners(
            rect.local_to_panel(Vec2::new(BODY_LEFT, BODY_TOP)),
            rect.local_to_panel(Vec2::new(BODY_RIGHT, BODY_BOTTOM)),
        )
    } else {
        Rect::new(rect.x, rect.y, rect.x + rect.w, rect.y + rect.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::BubbleDesign;
    use crate::comic::Tail;

    const SELECTED: RenderMode = RenderMode::Interactive {
        selected: true,
        editing: false,
    };

    fn overlay(design: BubbleDesign) -> Overlay {
        let mut overlay = Overlay::new_manual(1, String::new());
        overlay.design = design;
        overlay.x = 20.0;
        overlay.y = 20.0;
        overlay.w = 60.0;
        overlay.h = 30.0;
        overlay.tail = Some(Tail::new(50.0, 65.0, 0.0));
        overlay
    }

    fn handle_kinds(rendered: &RenderedOverlay) -> Vec<DragHandle> {
        rendered.handles.iter().map(|h| h.handle).collect()
    }

    #[test]
    fn test_export_matches_interactive_shape() {
        for design in BubbleDesign::all() {
            let o = overlay(design.clone());
            let interactive = render_overlay(&o, SELECTED);
            let export = render_overlay(&o, RenderMode::Export);
            assert_eq!(interactive.shape, export.shape, "{:?}", design);
            assert!(export.handles.is_empty());
            assert!(!export.selection_outline);
        }
    }

    #[test]
    fn test_unselected_has_no_handles() {
        let o = overlay(BubbleDesign::Standard);
        let rendered = render_overlay(
            &o,
            RenderMode::Interactive {
                selected: false,
                editing: false,
            },
        );
        assert!(rendered.handles.is_empty());
        assert!(!rendered.selection_outline);
    }

    #[test]
    fn test_editing_hides_handles_keeps_outline() {
        let o = overlay(BubbleDesign::Standard);
        let rendered = render_overlay(
            &o,
            RenderMode::Interactive {
                selected: true,
                editing: true,
            },
        );
        assert!(rendered.handles.is_empty());
        assert!(rendered.selection_outline);
    }

    #[test]
    fn test_selected_standard_has_all_handles() {
        let rendered = render_overlay(&overlay(BubbleDesign::Standard), SELECTED);
        let kinds = handle_kinds(&rendered);
        assert_eq!(kinds.len(), 6);
        assert_eq!(kinds[4], DragHandle::Tail);
        assert_eq!(kinds[5], DragHandle::TailBase);

        // Tail base sits on the bottom edge of the body
        let base = rendered.handles[5].at;
        assert!((base.y - (20.0 + 0.85 * 30.0)).abs() < 1e-3);
    }

    #[test]
    fn test_corner_handles_at_box_corners() {
        let rendered = render_overlay(&overlay(BubbleDesign::Rectangle), SELECTED);
        let se = rendered
            .handles
            .iter()
            .find(|h| h.handle == DragHandle::Resize(Corner::Se))
            .unwrap();
        assert_eq!(se.at, Vec2::new(80.0, 50.0));
    }

    #[test]
    fn test_box_designs_have_only_resize_handles() {
        let rendered = render_overlay(&overlay(BubbleDesign::Webtoon), SELECTED);
        assert_eq!(rendered.shape, BubbleShape::Boxed(BoxStyle::Webtoon));
        assert!(rendered.handles.iter().all(|h| h.handle.is_resize()));
    }

    #[test]
    fn test_spiky_ignores_tail_handles() {
        let rendered = render_overlay(&overlay(BubbleDesign::Spiky), SELECTED);
        assert_eq!(rendered.handles.len(), 4);
    }

    #[test]
    fn test_tail_inside_body_hides_base_handle() {
        let mut o = overlay(BubbleDesign::Standard);
        // Body center in panel space
        o.tail = Some(Tail::new(50.0, 20.0 + 0.45 * 30.0, 0.0));
        let rendered = render_overlay(&o, SELECTED);
        let kinds = handle_kinds(&rendered);
        assert!(kinds.contains(&DragHandle::Tail));
        assert!(!kinds.contains(&DragHandle::TailBase));

        let BubbleShape::Path(path) = rendered.shape else {
            panic!("expected a path");
        };
        let tailless = generate_path(&BubbleDesign::Standard, o.body(), None).unwrap();
        assert_eq!(path, tailless);
    }

    #[test]
    fn test_unknown_design_renders_nothing() {
        let rendered = render_overlay(&overlay(BubbleDesign::Unknown("thought".to_string())), SELECTED);
        assert_eq!(rendered.shape, BubbleShape::Nothing);
        assert_eq!(rendered.handles.len(), 4);
    }

    #[test]
    fn test_text_region_inside_path_body() {
        let region = text_region(&overlay(BubbleDesign::Cloud));
        assert!((region.min.x - 23.0).abs() < 1e-3);
        assert!((region.max.y - 45.5).abs() < 1e-3);

        let boxed = text_region(&overlay(BubbleDesign::Simple));
        assert_eq!(boxed, Rect::new(20.0, 20.0, 80.0, 50.0));
    }

    #[test]
    fn test_handle_colors() {
        let tail = HandleMarker {
            handle: DragHandle::Tail,
            at: Vec2::ZERO,
        };
        assert_eq!(tail.color(), theme::TAIL_TIP_HANDLE);
    }
}
