//! Drawing of points and proximity lines onto an abstract 2-D surface.
//!
//! The core never talks to a real canvas. Anything that can clear itself,
//! fill a circle and stroke a line implements [`Surface`]; [`DrawList`] is
//! the in-memory implementation used by the viewer and by tests.

use crate::{
    config::FieldConfig,
    point::Point,
    pointer::PointerState,
    types::{Color, Stroke},
};
use glam::DVec2;

/// Immediate-mode 2-D drawing target.
pub trait Surface {
    /// Clears the rectangle `[0, width) x [0, height)`.
    fn clear(&mut self, width: f64, height: f64);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke);
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Circle { center: DVec2, radius: f64, color: Color },
    Line { from: DVec2, to: DVec2, stroke: Stroke },
}

/// A [`Surface`] that records commands for later replay.
///
/// `clear` drops everything recorded so far before recording itself, so
/// after a full frame the list holds exactly that frame.
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Strokes of every recorded line, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2, Stroke)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }
}

/// Paints `point` as a filled circle of its own radius.
pub fn draw_point(surface: &mut impl Surface, point: &Point, cfg: &FieldConfig) {
    surface.fill_circle(point.pos, point.radius, cfg.point_color);
}

/// Draws the proximity lines of one frame.
///
/// For each point `a` in order:
///
/// 1. Every later point `b` closer than `cfg.link_distance` is joined to `a`
///    with opacity `1 - d / link_distance`.
/// 2. If the pointer is known and closer than its influence radius, `a` is
///    joined to the pointer with opacity `1 - d / influence_radius`, using
///    the heavier pointer line style.
///
/// Both thresholds are exclusive, so a line never starts fully transparent.
/// The scan is O(n²) in the number of points.
pub fn draw_connections(
    surface: &mut impl Surface,
    points: &[Point],
    pointer: &PointerState,
    cfg: &FieldConfig,
) {
    let link = cfg.link_distance;

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.pos.distance(b.pos);
            if d < link {
                surface.stroke_line(a.pos, b.pos, cfg.link_style.stroke(1.0 - d / link));
            }
        }

        if let Some(target) = pointer.position() {
            let d = a.pos.distance(target);
            if d < pointer.influence_radius {
                let opacity = 1.0 - d / pointer.influence_radius;
                surface.stroke_line(a.pos, target, cfg.pointer_link_style.stroke(opacity));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Point {
        Point::new(DVec2::new(x, y), 2.0, 10.0)
    }

    fn connect(points: &[Point], pointer: &PointerState) -> DrawList {
        let mut list = DrawList::new();
        draw_connections(&mut list, points, pointer, &FieldConfig::default());
        list
    }

    #[test]
    fn draw_point_fills_circle_with_point_radius() {
        let cfg = FieldConfig::default();
        let mut list = DrawList::new();

        draw_point(&mut list, &at(3.0, 4.0), &cfg);

        assert_eq!(
            list.commands,
            vec![DrawCommand::Circle {
                center: DVec2::new(3.0, 4.0),
                radius: 2.0,
                color: Color::WHITE,
            }]
        );
    }

    #[test]
    fn link_opacity_fades_linearly_with_distance() {
        let pointer = PointerState::new(150.0);

        for d in [0.0, 12.5, 50.0, 99.0, 99.999] {
            let list = connect(&[at(0.0, 0.0), at(d, 0.0)], &pointer);
            let lines: Vec<_> = list.lines().collect();

            assert_eq!(lines.len(), 1, "distance {d}");
            let (_, _, stroke) = lines[0];
            assert!((stroke.opacity - (1.0 - d / 100.0)).abs() < 1e-12);
            assert_eq!(stroke.color, Color::WHITE);
            assert_eq!(stroke.width, 0.5);
        }
    }

    #[test]
    fn points_exactly_at_link_distance_are_not_joined() {
        let pointer = PointerState::new(150.0);
        let list = connect(&[at(0.0, 0.0), at(60.0, 80.0)], &pointer);
        assert_eq!(list.lines().count(), 0);

        let list = connect(&[at(0.0, 0.0), at(150.0, 0.0)], &pointer);
        assert_eq!(list.lines().count(), 0);
    }

    #[test]
    fn each_close_pair_is_drawn_once() {
        let pointer = PointerState::new(150.0);
        let points = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0), at(500.0, 500.0)];

        let list = connect(&points, &pointer);
        let lines: Vec<_> = list.lines().map(|(from, to, _)| (from, to)).collect();

        assert_eq!(
            lines,
            vec![
                (DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)),
                (DVec2::new(0.0, 0.0), DVec2::new(20.0, 0.0)),
                (DVec2::new(10.0, 0.0), DVec2::new(20.0, 0.0)),
            ]
        );
    }

    #[test]
    fn absent_pointer_draws_no_pointer_lines() {
        let pointer = PointerState::new(150.0);
        let list = connect(&[at(0.0, 0.0)], &pointer);
        assert_eq!(list.lines().count(), 0);
    }

    #[test]
    fn pointer_lines_use_accent_style_and_fade() {
        let mut pointer = PointerState::new(150.0);
        pointer.move_to(DVec2::new(0.0, 0.0));

        let list = connect(&[at(30.0, 40.0), at(300.0, 0.0)], &pointer);
        let lines: Vec<_> = list.lines().collect();

        assert_eq!(lines.len(), 1);
        let (from, to, stroke) = lines[0];
        assert_eq!(from, DVec2::new(30.0, 40.0));
        assert_eq!(to, DVec2::new(0.0, 0.0));
        assert_eq!(stroke.color, Color::RED);
        assert!((stroke.opacity - (1.0 - 50.0 / 150.0)).abs() < 1e-12);
        assert!(stroke.width > FieldConfig::default().link_style.width);
    }

    #[test]
    fn point_exactly_at_influence_radius_gets_no_pointer_line() {
        let mut pointer = PointerState::new(150.0);
        pointer.move_to(DVec2::new(0.0, 0.0));

        let list = connect(&[at(90.0, 120.0)], &pointer);
        assert_eq!(list.lines().count(), 0);

        let list = connect(&[at(89.0, 120.0)], &pointer);
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn pointer_line_follows_links_of_the_same_point() {
        let mut pointer = PointerState::new(150.0);
        pointer.move_to(DVec2::new(0.0, 50.0));

        let list = connect(&[at(0.0, 0.0), at(10.0, 0.0)], &pointer);
        let colors: Vec<_> = list.lines().map(|(_, _, s)| s.color).collect();

        // a-b link, a-pointer, then b-pointer.
        assert_eq!(colors, vec![Color::WHITE, Color::RED, Color::RED]);
    }

    #[test]
    fn clear_resets_recorded_frame() {
        let mut list = DrawList::new();
        list.fill_circle(DVec2::ZERO, 1.0, Color::WHITE);

        list.clear(800.0, 600.0);

        assert_eq!(
            list.commands,
            vec![DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }]
        );
        assert_eq!(list.circle_count(), 0);
    }
}
