//! Outline generation for the path-based designs.

use bevy::math::Vec2;

use super::tail::{Notch, TailEdge, notch_for};
use super::{
    BODY_BOTTOM, BODY_LEFT, BODY_RIGHT, BODY_TOP, BodyDimensions, BubbleDesign, BubblePath,
    ShapeRecipe, TailLocal,
};

/// Vertices of the spiky burst, clockwise from the top point.
const BURST_POINTS: [(f32, f32); 24] = [
    (50.0, 5.0),
    (55.0, 20.0),
    (70.0, 15.0),
    (65.0, 30.0),
    (85.0, 30.0),
    (80.0, 45.0),
    (95.0, 50.0),
    (80.0, 55.0),
    (85.0, 70.0),
    (65.0, 70.0),
    (70.0, 85.0),
    (55.0, 80.0),
    (50.0, 95.0),
    (45.0, 80.0),
    (30.0, 85.0),
    (35.0, 70.0),
    (15.0, 70.0),
    (20.0, 55.0),
    (5.0, 50.0),
    (20.0, 45.0),
    (15.0, 30.0),
    (35.0, 30.0),
    (30.0, 15.0),
    (45.0, 20.0),
];

const CLOUD_START: Vec2 = Vec2::new(25.0, 65.0);

/// One puff of the cloud outline: circular arc radius, end point, and the
/// tail edge whose notch is drawn just before it.
struct CloudPuff {
    radius: f32,
    to: Vec2,
    notch_before: Option<TailEdge>,
}

const CLOUD_PUFFS: [CloudPuff; 8] = [
    // left
    CloudPuff {
        radius: 20.0,
        to: Vec2::new(15.0, 40.0),
        notch_before: Some(TailEdge::Left),
    },
    // top-left
    CloudPuff {
        radius: 15.0,
        to: Vec2::new(30.0, 15.0),
        notch_before: None,
    },
    // top
    CloudPuff {
        radius: 15.0,
        to: Vec2::new(55.0, 10.0),
        notch_before: Some(TailEdge::Top),
    },
    // top-right
    CloudPuff {
        radius: 25.0,
        to: Vec2::new(85.0, 30.0),
        notch_before: None,
    },
    // right
    CloudPuff {
        radius: 20.0,
        to: Vec2::new(80.0, 70.0),
        notch_before: Some(TailEdge::Right),
    },
    // bottom-right
    CloudPuff {
        radius: 15.0,
        to: Vec2::new(60.0, 85.0),
        notch_before: None,
    },
    // bottom
    CloudPuff {
        radius: 20.0,
        to: Vec2::new(35.0, 85.0),
        notch_before: Some(TailEdge::Bottom),
    },
    // bottom-left
    CloudPuff {
        radius: 15.0,
        to: Vec2::new(25.0, 65.0),
        notch_before: None,
    },
];

/// Generate the outline for `design`.
///
/// Returns `None` for box-rendered and unknown designs. The tail is ignored
/// when it can't be routed (tip inside the body or not finite) and for the
/// spiky burst.
pub fn generate_path(
    design: &BubbleDesign,
    body: BodyDimensions,
    tail: Option<TailLocal>,
) -> Option<BubblePath> {
    let recipe = design.recipe(body)?;
    let notch = tail.and_then(|tail| notch_for(&recipe, tail));

    match recipe {
        ShapeRecipe::Burst => Some(burst_path()),
        ShapeRecipe::Outline { rx, ry } => Some(outline_path(rx, ry, notch)),
        ShapeRecipe::Cloud => Some(cloud_path(notch)),
        ShapeRecipe::Boxed(_) => None,
    }
}

fn burst_path() -> BubblePath {
    let mut path = BubblePath::new();
    for (i, &(x, y)) in BURST_POINTS.iter().enumerate() {
        let point = Vec2::new(x, y);
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path.close();
    path
}

/// Body rectangle with elliptical corners, drawn clockwise from the end of
/// the top-left corner.
fn outline_path(rx: f32, ry: f32, notch: Option<(TailEdge, Notch)>) -> BubblePath {
    let radii = Vec2::new(rx, ry);
    let notch_on = |edge: TailEdge| notch.filter(|(e, _)| *e == edge).map(|(_, n)| n);

    let mut path = BubblePath::new();
    path.move_to(Vec2::new(BODY_LEFT + rx, BODY_TOP));

    if let Some(n) = notch_on(TailEdge::Top) {
        path.horizontal(n.start.x).line_to(n.tip).line_to(n.end);
    }
    path.horizontal(BODY_RIGHT - rx);
    corner(&mut path, radii, Vec2::new(BODY_RIGHT, BODY_TOP + ry));

    if let Some(n) = notch_on(TailEdge::Right) {
        path.vertical(n.start.y).line_to(n.tip).line_to(n.end);
    }
    path.vertical(BODY_BOTTOM - ry);
    corner(&mut path, radii, Vec2::new(BODY_RIGHT - rx, BODY_BOTTOM));

    if let Some(n) = notch_on(TailEdge::Bottom) {
        path.horizontal(n.start.x).line_to(n.tip).line_to(n.end);
    }
    path.horizontal(BODY_LEFT + rx);
    corner(&mut path, radii, Vec2::new(BODY_LEFT, BODY_BOTTOM - ry));

    if let Some(n) = notch_on(TailEdge::Left) {
        path.vertical(n.start.y).line_to(n.tip).line_to(n.end);
    }
    path.vertical(BODY_TOP + ry);
    corner(&mut path, radii, Vec2::new(BODY_LEFT + rx, BODY_TOP));

    path.close();
    path
}

/// Square corners need no arc; the edges already meet.
fn corner(path: &mut BubblePath, radii: Vec2, to: Vec2) {
    if radii.x > 0.0 && radii.y > 0.0 {
        path.arc(radii, to);
    }
}

fn cloud_path(notch: Option<(TailEdge, Notch)>) -> BubblePath {
    let mut path = BubblePath::new();
    path.move_to(CLOUD_START);

    for puff in &CLOUD_PUFFS {
        if let Some((edge, n)) = notch
            && puff.notch_before == Some(edge)
        {
            path.line_to(n.start).line_to(n.tip).line_to(n.end);
        }
        path.arc(Vec2::splat(puff.radius), puff.to);
    }

    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::BODY_CENTER;
    use crate::bubble::path::PathCommand;

    fn dims() -> BodyDimensions {
        BodyDimensions::new(60.0, 30.0, Some(12.0))
    }

    fn tail(x: f32, y: f32) -> Option<TailLocal> {
        Some(TailLocal::new(Vec2::new(x, y), 0.0))
    }

    fn path_designs() -> Vec<BubbleDesign> {
        BubbleDesign::all()
            .iter()
            .filter(|d| d.is_path_based())
            .cloned()
            .collect()
    }

    #[test]
    fn test_box_designs_have_no_path() {
        for design in [
            BubbleDesign::Webtoon,
            BubbleDesign::Narration,
            BubbleDesign::Cinematic,
            BubbleDesign::Simple,
            BubbleDesign::Unknown("thought".to_string()),
        ] {
            assert!(generate_path(&design, dims(), tail(50.0, 120.0)).is_none());
        }
    }

    #[test]
    fn test_every_path_design_is_closed() {
        let tails = [
            None,
            tail(50.0, 120.0),
            tail(50.0, -20.0),
            tail(130.0, 45.0),
            tail(-30.0, 45.0),
            tail(50.0, 45.0),
        ];
        for design in path_designs() {
            for t in tails {
                let path = generate_path(&design, dims(), t).unwrap();
                assert!(path.is_closed(), "{design:?} with {t:?} not closed");
                let polylines = path.flatten(0.25);
                assert_eq!(polylines.len(), 1);
                assert_eq!(polylines[0].first(), polylines[0].last());
            }
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        for design in path_designs() {
            let a = generate_path(&design, dims(), tail(80.0, 110.0));
            let b = generate_path(&design, dims(), tail(80.0, 110.0));
            assert_eq!(a, b);
            assert_eq!(a.map(|p| p.to_string()), b.map(|p| p.to_string()));
        }
    }

    #[test]
    fn test_standard_without_tail() {
        let path = generate_path(&BubbleDesign::Standard, dims(), None).unwrap();
        assert_eq!(
            path.to_string(),
            "M 23,5 H 77 A 18,18 0 0 1 95,23 V 67 A 18,18 0 0 1 77,85 \
             H 23 A 18,18 0 0 1 5,67 V 23 A 18,18 0 0 1 23,5 Z"
        );
    }

    #[test]
    fn test_standard_tail_below_notches_bottom_edge() {
        let path = generate_path(&BubbleDesign::Standard, dims(), tail(50.0, 120.0)).unwrap();
        assert_eq!(
            path.to_string(),
            "M 23,5 H 77 A 18,18 0 0 1 95,23 V 67 A 18,18 0 0 1 77,85 \
             H 59 L 50,120 L 41,85 H 23 A 18,18 0 0 1 5,67 V 23 A 18,18 0 0 1 23,5 Z"
        );
    }

    #[test]
    fn test_top_notch_is_drawn_on_top_edge() {
        let path = generate_path(&BubbleDesign::Rectangle, dims(), tail(50.0, -20.0)).unwrap();
        let commands = path.commands();
        // Notch comes right after the starting point, before the corner
        assert_eq!(commands[1], PathCommand::Horizontal(41.0));
        assert_eq!(commands[2], PathCommand::LineTo(Vec2::new(50.0, -20.0)));
        assert_eq!(commands[3], PathCommand::LineTo(Vec2::new(59.0, BODY_TOP)));
    }

    #[test]
    fn test_rectangle_has_no_arcs() {
        let path = generate_path(&BubbleDesign::Rectangle, dims(), None).unwrap();
        assert!(
            !path
                .commands()
                .iter()
                .any(|c| matches!(c, PathCommand::Arc { .. }))
        );
        assert_eq!(path.to_string(), "M 5,5 H 95 V 85 H 5 V 5 Z");
    }

    #[test]
    fn test_tail_inside_body_falls_back_to_plain_body() {
        let plain = generate_path(&BubbleDesign::Standard, dims(), None);
        let inside = generate_path(
            &BubbleDesign::Standard,
            dims(),
            Some(TailLocal::new(BODY_CENTER, 0.0)),
        );
        assert_eq!(plain, inside);
    }

    #[test]
    fn test_non_finite_tail_falls_back_to_plain_body() {
        let plain = generate_path(&BubbleDesign::Cloud, dims(), None);
        let broken = generate_path(&BubbleDesign::Cloud, dims(), tail(f32::NAN, 120.0));
        assert_eq!(plain, broken);
    }

    #[test]
    fn test_spiky_ignores_tail() {
        let plain = generate_path(&BubbleDesign::Spiky, dims(), None).unwrap();
        let tailed = generate_path(&BubbleDesign::Spiky, dims(), tail(50.0, 120.0)).unwrap();
        assert_eq!(plain, tailed);
        assert!(plain.to_string().starts_with("M 50,5 L 55,20 L 70,15"));
        assert!(plain.to_string().ends_with("L 30,15 L 45,20 Z"));
    }

    #[test]
    fn test_cloud_without_tail_is_literal() {
        let path = generate_path(&BubbleDesign::Cloud, dims(), None).unwrap();
        assert_eq!(
            path.to_string(),
            "M 25,65 A 20,20 0 0 1 15,40 A 15,15 0 0 1 30,15 A 15,15 0 0 1 55,10 \
             A 25,25 0 0 1 85,30 A 20,20 0 0 1 80,70 A 15,15 0 0 1 60,85 \
             A 20,20 0 0 1 35,85 A 15,15 0 0 1 25,65 Z"
        );
    }

    #[test]
    fn test_cloud_bottom_notch_spliced_before_bottom_arc() {
        let path = generate_path(&BubbleDesign::Cloud, dims(), tail(50.0, 120.0)).unwrap();
        let text = path.to_string();
        // Notch 41..59 fits the 35..60 anchor span, drawn right to left
        assert!(text.contains("A 15,15 0 0 1 60,85 L 59,85 L 50,120 L 41,85 A 20,20 0 0 1 35,85"));
    }

    #[test]
    fn test_cloud_left_notch_spliced_before_left_arc() {
        let path = generate_path(&BubbleDesign::Cloud, dims(), tail(-30.0, 45.0)).unwrap();
        let commands = path.commands();
        assert_eq!(commands[0], PathCommand::MoveTo(CLOUD_START));
        assert!(matches!(commands[1], PathCommand::LineTo(p) if p.x == 16.0));
        assert_eq!(commands[2], PathCommand::LineTo(Vec2::new(-30.0, 45.0)));
        assert!(matches!(commands[4], PathCommand::Arc { to, .. } if to == Vec2::new(15.0, 40.0)));
    }

    #[test]
    fn test_rounded_uses_aspect_radii() {
        let path = generate_path(&BubbleDesign::Rounded, dims(), None).unwrap();
        // aspect 2: rx = 12 / 2 * 1.2 = 7.2, ry = 12 * 1.2 = 14.4
        assert!(path.to_string().starts_with("M 12.2,5 H 87.8 A 7.2,14.4"));
    }
}
