//! Filled bubble bodies (editor view only).
//!
//! Gizmos only draw lines, so each bubble body is tessellated into a flat
//! mesh and drawn under its outline. Panels with a background image then
//! show the bubble the same way the SVG export does.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use lyon::geom::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};

use crate::bubble::{BoxStyle, BubbleRect};
use crate::comic::ComicData;
use crate::constants::FLATTEN_TOLERANCE;
use crate::editor::layout::{PanelLayout, PanelRect};
use crate::theme;

use super::{BubbleShape, RenderMode, render_overlay};

/// Webtoon drop shadow offset in world units (matches the export)
const SHADOW_OFFSET: f32 = 3.0;

/// Narration header strip height, as a fraction of the box height
const NARRATION_HEADER: f32 = 0.08;

/// Fills sit above panel backgrounds (z 0) and below the next overlay.
const FILL_Z: f32 = 0.1;
const FILL_Z_STEP: f32 = 0.001;

/// Mesh entity filling one bubble body.
#[derive(Component)]
pub struct BubbleFill;

/// One closed region to fill, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRegion {
    pub outlines: Vec<Vec<Vec2>>,
    pub color: Color,
}

impl FillRegion {
    fn polygon(points: Vec<Vec2>, color: Color) -> Self {
        Self {
            outlines: vec![points],
            color,
        }
    }

    fn rect(min: Vec2, max: Vec2, color: Color) -> Self {
        Self::polygon(
            vec![
                min,
                Vec2::new(max.x, min.y),
                max,
                Vec2::new(min.x, max.y),
            ],
            color,
        )
    }
}

/// The regions that fill `shape`, back to front.
pub fn fill_regions(shape: &BubbleShape, panel_rect: &PanelRect, rect: &BubbleRect) -> Vec<FillRegion> {
    let to_world = |local: Vec2| panel_rect.percent_to_world(rect.local_to_panel(local));

    match shape {
        BubbleShape::Path(path) => {
            let outlines: Vec<Vec<Vec2>> = path
                .flatten(FLATTEN_TOLERANCE)
                .into_iter()
                .map(|subpath| subpath.into_iter().map(to_world).collect())
                .collect();
            vec![FillRegion {
                outlines,
                color: theme::BUBBLE_FILL,
            }]
        }
        BubbleShape::Boxed(style) => {
            let a = to_world(Vec2::ZERO);
            let b = to_world(Vec2::splat(100.0));
            let (min, max) = (a.min(b), a.max(b));
            match style {
                BoxStyle::Webtoon => {
                    let shadow = Vec2::new(SHADOW_OFFSET, -SHADOW_OFFSET);
                    vec![
                        FillRegion::rect(min + shadow, max + shadow, theme::WEBTOON_SHADOW),
                        FillRegion::rect(min, max, theme::BUBBLE_FILL),
                    ]
                }
                BoxStyle::Narration => {
                    let strip = Vec2::new(min.x, max.y - (max.y - min.y) * NARRATION_HEADER);
                    vec![
                        FillRegion::rect(min, max, theme::NARRATION_FILL),
                        FillRegion::rect(strip, max, theme::BUBBLE_STROKE),
                    ]
                }
                BoxStyle::Simple => vec![FillRegion::rect(min, max, theme::BUBBLE_FILL)],
                BoxStyle::Cinematic => Vec::new(),
            }
        }
        BubbleShape::Nothing => Vec::new(),
    }
}

/// Triangulate closed outlines into a flat mesh. `None` when there is
/// nothing to fill or the outline can't be tessellated.
pub fn fill_mesh(outlines: &[Vec<Vec2>]) -> Option<Mesh> {
    let mut builder = Path::builder();
    let mut any = false;
    for outline in outlines.iter().filter(|o| o.len() >= 3) {
        let mut points = outline.iter().filter(|p| p.is_finite());
        let Some(first) = points.next() else {
            continue;
        };
        builder.begin(point(first.x, first.y));
        for p in points {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
        any = true;
    }
    if !any {
        return None;
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 3], u32> = VertexBuffers::new();
    let result = FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::default().with_fill_rule(FillRule::NonZero),
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
            [vertex.position().x, vertex.position().y, 0.0]
        }),
    );
    if let Err(e) = result {
        warn!("Failed to tessellate bubble fill: {:?}", e);
        return None;
    }
    if buffers.indices.is_empty() {
        return None;
    }

    let vertex_count = buffers.vertices.len();
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, buffers.vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; vertex_count]);
    mesh.insert_indices(Indices::U32(buffers.indices));
    Some(mesh)
}

/// Rebuild the fill meshes when any bubble body changes shape or place.
pub fn sync_bubble_fills(
    mut commands: Commands,
    comic: Res<ComicData>,
    layout: Res<PanelLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    existing: Query<Entity, With<BubbleFill>>,
    mut shown: Local<Vec<FillRegion>>,
) {
    let wanted: Vec<FillRegion> = comic
        .overlays()
        .filter_map(|(panel, overlay)| {
            let panel_rect = layout.world_rect(panel.idx)?;
            let rendered = render_overlay(overlay, RenderMode::Export);
            Some(fill_regions(&rendered.shape, panel_rect, &overlay.rect()))
        })
        .flatten()
        .collect();

    if *shown == wanted {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let mut spawned = 0;
    for (i, region) in wanted.iter().enumerate() {
        let Some(mesh) = fill_mesh(&region.outlines) else {
            continue;
        };
        commands.spawn((
            Mesh2d(meshes.add(mesh)),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(region.color))),
            Transform::from_xyz(0.0, 0.0, FILL_Z + i as f32 * FILL_Z_STEP),
            BubbleFill,
        ));
        spawned += 1;
    }

    debug!("Rebuilt {} bubble fills", spawned);
    *shown = wanted;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::{BodyDimensions, BubbleDesign, TailLocal, generate_path};

    fn panel_rect() -> PanelRect {
        PanelRect {
            idx: 1,
            rect: Rect::new(0.0, -300.0, 400.0, 0.0),
        }
    }

    fn bubble_rect() -> BubbleRect {
        BubbleRect::new(20.0, 20.0, 60.0, 30.0)
    }

    fn body() -> BodyDimensions {
        BodyDimensions::new(60.0, 30.0, None)
    }

    fn triangle_count(mesh: &Mesh) -> usize {
        mesh.indices().map_or(0, |indices| indices.len() / 3)
    }

    #[test]
    fn test_square_fills_with_two_triangles() {
        let square = vec![
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mesh = fill_mesh(&[square]).unwrap();
        assert_eq!(triangle_count(&mesh), 2);
    }

    #[test]
    fn test_nothing_to_fill() {
        assert!(fill_mesh(&[]).is_none());
        assert!(fill_mesh(&[vec![Vec2::ZERO, Vec2::X]]).is_none());
    }

    #[test]
    fn test_bubble_fills_with_and_without_tail() {
        let tails = [None, Some(TailLocal::new(Vec2::new(50.0, 120.0), 0.0))];
        for design in [BubbleDesign::Standard, BubbleDesign::Cloud, BubbleDesign::Spiky] {
            for tail in tails {
                let path = generate_path(&design, body(), tail).unwrap();
                let regions = fill_regions(&BubbleShape::Path(path), &panel_rect(), &bubble_rect());
                assert_eq!(regions.len(), 1);
                assert_eq!(regions[0].color, theme::BUBBLE_FILL);
                let mesh = fill_mesh(&regions[0].outlines);
                assert!(mesh.is_some_and(|m| triangle_count(&m) > 0), "{:?}", design);
            }
        }
    }

    #[test]
    fn test_path_fill_lies_in_bubble_box() {
        let path = generate_path(&BubbleDesign::Rectangle, body(), None).unwrap();
        let regions = fill_regions(&BubbleShape::Path(path), &panel_rect(), &bubble_rect());
        // Box spans x 80..320 and y -60..-150 in this panel
        for p in regions[0].outlines.iter().flatten() {
            assert!(p.x >= 80.0 - 1e-3 && p.x <= 320.0 + 1e-3, "{:?}", p);
            assert!(p.y <= -60.0 + 1e-3 && p.y >= -150.0 - 1e-3, "{:?}", p);
        }
    }

    #[test]
    fn test_box_styles() {
        let webtoon = fill_regions(&BubbleShape::Boxed(BoxStyle::Webtoon), &panel_rect(), &bubble_rect());
        assert_eq!(webtoon.len(), 2);
        assert_eq!(webtoon[0].color, theme::WEBTOON_SHADOW);
        assert_eq!(webtoon[1].color, theme::BUBBLE_FILL);

        let narration =
            fill_regions(&BubbleShape::Boxed(BoxStyle::Narration), &panel_rect(), &bubble_rect());
        assert_eq!(narration[0].color, theme::NARRATION_FILL);

        assert!(
            fill_regions(&BubbleShape::Boxed(BoxStyle::Cinematic), &panel_rect(), &bubble_rect())
                .is_empty()
        );
        assert!(fill_regions(&BubbleShape::Nothing, &panel_rect(), &bubble_rect()).is_empty());
    }
}
