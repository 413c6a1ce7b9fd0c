//! SVG-style path commands for bubble outlines.
//!
//! A [`BubblePath`] prints as an SVG `d` attribute and can be flattened into
//! polylines for gizmo drawing. Arcs are converted through `kurbo`, which
//! applies the SVG radius correction when an arc's endpoints have been moved
//! (the cloud design relies on that after a tail notch is spliced in).

use std::fmt;

use bevy::math::Vec2;
use kurbo::{BezPath, PathEl, Point, SvgArc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Horizontal line to an absolute x
    Horizontal(f32),
    /// Vertical line to an absolute y
    Vertical(f32),
    /// Elliptical arc with no x-axis rotation
    Arc {
        radii: Vec2,
        large_arc: bool,
        sweep: bool,
        to: Vec2,
    },
    Close,
}

/// A bubble outline in shape space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BubblePath {
    commands: Vec<PathCommand>,
}

impl BubblePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn horizontal(&mut self, x: f32) -> &mut Self {
        self.commands.push(PathCommand::Horizontal(x));
        self
    }

    pub fn vertical(&mut self, y: f32) -> &mut Self {
        self.commands.push(PathCommand::Vertical(y));
        self
    }

    /// Clockwise arc (sweep flag set), the direction every bubble is drawn in.
    pub fn arc(&mut self, radii: Vec2, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::Arc {
            radii,
            large_arc: false,
            sweep: true,
            to,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Absolute points visited by the path, one per command (a close returns
    /// to the subpath start).
    pub fn points(&self) -> Vec<Vec2> {
        let mut points = Vec::with_capacity(self.commands.len());
        let mut current = Vec2::ZERO;
        let mut start = Vec2::ZERO;

        for command in &self.commands {
            current = match *command {
                PathCommand::MoveTo(p) => {
                    start = p;
                    p
                }
                PathCommand::LineTo(p) => p,
                PathCommand::Horizontal(x) => Vec2::new(x, current.y),
                PathCommand::Vertical(y) => Vec2::new(current.x, y),
                PathCommand::Arc { to, .. } => to,
                PathCommand::Close => start,
            };
            points.push(current);
        }
        points
    }

    /// True when the contour ends with `Z` or comes back to its start point.
    pub fn is_closed(&self) -> bool {
        match self.commands.last() {
            None => false,
            Some(PathCommand::Close) => true,
            Some(_) => {
                let points = self.points();
                match (points.first(), points.last()) {
                    (Some(first), Some(last)) => first.distance(*last) < 1e-3,
                    _ => false,
                }
            }
        }
    }

    /// Convert to a kurbo path, turning arcs into cubic segments.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut bez = BezPath::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    current = to_point(p);
                    start = current;
                    bez.move_to(current);
                }
                PathCommand::LineTo(p) => {
                    current = to_point(p);
                    bez.line_to(current);
                }
                PathCommand::Horizontal(x) => {
                    current = Point::new(x as f64, current.y);
                    bez.line_to(current);
                }
                PathCommand::Vertical(y) => {
                    current = Point::new(current.x, y as f64);
                    bez.line_to(current);
                }
                PathCommand::Arc {
                    radii,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let end = to_point(to);
                    let svg_arc = SvgArc {
                        from: current,
                        to: end,
                        radii: kurbo::Vec2::new(radii.x as f64, radii.y as f64),
                        x_rotation: 0.0,
                        large_arc,
                        sweep,
                    };
                    match kurbo::Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => {
                            for el in arc.append_iter(tolerance) {
                                bez.push(el);
                            }
                        }
                        // Zero radii or coincident endpoints degrade to a line
                        None => bez.line_to(end),
                    }
                    current = end;
                }
                PathCommand::Close => {
                    bez.close_path();
                    current = start;
                }
            }
        }
        bez
    }

    /// Flatten into polylines (one per subpath). Closed subpaths repeat their
    /// first point at the end.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<Vec2>> {
        let bez = self.to_bez_path(tolerance);
        let mut polylines: Vec<Vec<Vec2>> = Vec::new();

        kurbo::flatten(bez.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => polylines.push(vec![to_vec2(p)]),
            PathEl::LineTo(p) => {
                if let Some(line) = polylines.last_mut() {
                    line.push(to_vec2(p));
                }
            }
            PathEl::ClosePath => {
                if let Some(line) = polylines.last_mut()
                    && let Some(&first) = line.first()
                {
                    line.push(first);
                }
            }
            _ => {}
        });

        polylines.retain(|line| line.len() >= 2);
        polylines
    }
}

impl fmt::Display for BubblePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *command {
                PathCommand::MoveTo(p) => write!(f, "M {},{}", num(p.x), num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {},{}", num(p.x), num(p.y))?,
                PathCommand::Horizontal(x) => write!(f, "H {}", num(x))?,
                PathCommand::Vertical(y) => write!(f, "V {}", num(y))?,
                PathCommand::Arc {
                    radii,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A {},{} 0 {} {} {},{}",
                    num(radii.x),
                    num(radii.y),
                    u8::from(large_arc),
                    u8::from(sweep),
                    num(to.x),
                    num(to.y)
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Round to 3 decimals so float noise doesn't leak into the path string.
fn num(value: f32) -> f32 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

fn to_vec2(p: Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> BubblePath {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(5.0, 10.0))
            .close();
        path
    }

    #[test]
    fn test_display_formats_commands() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(23.0, 5.0))
            .horizontal(77.0)
            .arc(Vec2::new(18.0, 18.0), Vec2::new(95.0, 23.0))
            .vertical(67.0)
            .close();
        assert_eq!(path.to_string(), "M 23,5 H 77 A 18,18 0 0 1 95,23 V 67 Z");
    }

    #[test]
    fn test_display_rounds_float_noise() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(23.399_998, -0.000_01));
        assert_eq!(path.to_string(), "M 23.4,0");
    }

    #[test]
    fn test_empty_path_is_not_closed() {
        assert!(!BubblePath::new().is_closed());
    }

    #[test]
    fn test_close_command_closes_path() {
        assert!(triangle().is_closed());
    }

    #[test]
    fn test_returning_to_start_closes_path() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(0.0, 0.0));
        assert!(path.is_closed());
    }

    #[test]
    fn test_open_path_is_not_closed() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(0.0, 0.0)).line_to(Vec2::new(10.0, 0.0));
        assert!(!path.is_closed());
    }

    #[test]
    fn test_points_resolve_relative_axes() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(1.0, 2.0)).horizontal(5.0).vertical(9.0).close();
        assert_eq!(
            path.points(),
            vec![
                Vec2::new(1.0, 2.0),
                Vec2::new(5.0, 2.0),
                Vec2::new(5.0, 9.0),
                Vec2::new(1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_flatten_closed_triangle_repeats_start() {
        let lines = triangle().flatten(0.1);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.first(), line.last());
        assert!(line.len() >= 4);
    }

    #[test]
    fn test_flatten_arc_stays_near_circle() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(0.0, 10.0))
            .arc(Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0));
        let lines = path.flatten(0.05);
        assert_eq!(lines.len(), 1);
        // Quarter circle around (10, 10)
        for p in &lines[0] {
            let radius = p.distance(Vec2::new(10.0, 10.0));
            assert!((radius - 10.0).abs() < 0.2, "point {p:?} off the arc");
        }
        assert!(lines[0].len() > 2);
    }

    #[test]
    fn test_zero_radius_arc_degrades_to_line() {
        let mut path = BubblePath::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .arc(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let lines = path.flatten(0.1);
        assert_eq!(lines[0].last(), Some(&Vec2::new(10.0, 0.0)));
    }
}
