//! Per-frame motion of points.
//!
//! Each frame a point does exactly one of two things:
//! 1. **Repel**: if the pointer is known and closer than its influence
//!    radius, the point is pushed directly away from it.
//! 2. **Relax**: otherwise each axis moves a fixed fraction of the way
//!    back to the rest position (exponential decay, never an overshoot).

use crate::{config::FieldConfig, field::Field, point::Point, pointer::PointerState};

/// Advances one point by a single frame.
///
/// Repulsion applies when the pointer has a position and the distance to it
/// is strictly below `pointer.influence_radius`:
///
/// - `force = (influence_radius - distance) / influence_radius`, in `(0, 1]`.
/// - The point moves by `unit * force * point.responsiveness`, where `unit`
///   points from the point toward the pointer, and the move is subtracted.
/// - A pointer sitting exactly on the point has no direction, so the
///   displacement is zero.
///
/// Otherwise each axis that is off its rest coordinate moves
/// `1 / cfg.relax_divisor` of the residual back toward it. The point is never
/// clamped to the surface.
///
/// ### Parameters
/// - `point` - Point to move; only `pos` is written.
/// - `pointer` - Current pointer state.
/// - `cfg` - Provides the relax divisor.
pub fn advance(point: &mut Point, pointer: &PointerState, cfg: &FieldConfig) {
    if let Some(target) = pointer.position() {
        let delta = target - point.pos;
        let distance = delta.length();

        if distance < pointer.influence_radius {
            let unit = delta.normalize_or_zero();
            let force = (pointer.influence_radius - distance) / pointer.influence_radius;
            point.pos -= unit * force * point.responsiveness;
            return;
        }
    }

    relax(point, cfg.relax_divisor);
}

fn relax(point: &mut Point, divisor: f64) {
    let rest = point.rest();
    if point.pos.x != rest.x {
        point.pos.x -= (point.pos.x - rest.x) / divisor;
    }
    if point.pos.y != rest.y {
        point.pos.y -= (point.pos.y - rest.y) / divisor;
    }
}

/// Advances every point of the field in sequence order.
///
/// Used by hosts that run the physics pass separately from drawing; the
/// frame loop interleaves [`advance`] with drawing instead.
pub fn advance_all(field: &mut Field, pointer: &PointerState, cfg: &FieldConfig) {
    for point in field.points.iter_mut() {
        advance(point, pointer, cfg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn displaced_point() -> Point {
        let mut p = Point::new(DVec2::new(100.0, 100.0), 2.0, 15.0);
        p.pos = DVec2::new(160.0, 40.0);
        p
    }

    #[test]
    fn absent_pointer_relaxes_monotonically_without_overshoot() {
        let cfg = FieldConfig::default();
        let pointer = PointerState::new(cfg.influence_radius);
        let mut p = displaced_point();
        let rest = p.rest();

        let mut prev = p.offset_from_rest();
        for _ in 0..50 {
            advance(&mut p, &pointer, &cfg);
            let off = p.offset_from_rest();
            assert!(off < prev, "offset did not shrink: {prev} -> {off}");
            // Started right of and above rest; must never cross it.
            assert!(p.pos.x > rest.x);
            assert!(p.pos.y < rest.y);
            prev = off;
        }

        for _ in 0..500 {
            advance(&mut p, &pointer, &cfg);
        }
        assert!(p.offset_from_rest() < 1e-9);
    }

    #[test]
    fn relax_step_removes_a_tenth_of_the_offset() {
        let cfg = FieldConfig::default();
        let pointer = PointerState::new(cfg.influence_radius);
        let mut p = displaced_point();

        advance(&mut p, &pointer, &cfg);

        assert!((p.pos.x - 154.0).abs() < 1e-12);
        assert!((p.pos.y - 46.0).abs() < 1e-12);
    }

    #[test]
    fn point_at_rest_stays_put_without_pointer() {
        let cfg = FieldConfig::default();
        let pointer = PointerState::new(cfg.influence_radius);
        let mut p = Point::new(DVec2::new(5.0, 5.0), 1.0, 1.0);

        advance(&mut p, &pointer, &cfg);

        assert_eq!(p.pos, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn pointer_inside_radius_always_repels() {
        let cfg = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut pointer = PointerState::new(cfg.influence_radius);
        pointer.move_to(DVec2::new(200.0, 200.0));

        for _ in 0..200 {
            let angle = rng.random_range(0.0..std::f64::consts::TAU);
            let radius = rng.random_range(0.5..149.0);
            let start = DVec2::new(200.0, 200.0) + DVec2::from_angle(angle) * radius;
            let mut p = Point::random_at(start, &cfg, &mut rng);
            let dist = pointer.distance_to(p.pos).unwrap();

            advance(&mut p, &pointer, &cfg);

            let after = pointer.distance_to(p.pos).unwrap();
            assert!(after > dist, "moved toward pointer: {dist} -> {after}");
        }
    }

    #[test]
    fn repulsion_magnitude_scales_with_proximity_and_responsiveness() {
        let cfg = FieldConfig::default();
        let mut pointer = PointerState::new(150.0);
        pointer.move_to(DVec2::ZERO);

        // 50 units right of the pointer: force = 100 / 150.
        let mut p = Point::new(DVec2::new(50.0, 0.0), 1.0, 30.0);
        advance(&mut p, &pointer, &cfg);

        let expected = 50.0 + (100.0 / 150.0) * 30.0;
        assert!((p.pos.x - expected).abs() < 1e-12);
        assert_eq!(p.pos.y, 0.0);
    }

    #[test]
    fn pointer_on_the_point_gives_zero_displacement() {
        let cfg = FieldConfig::default();
        let mut pointer = PointerState::new(cfg.influence_radius);
        pointer.move_to(DVec2::new(42.0, 17.0));
        let mut p = Point::new(DVec2::new(42.0, 17.0), 1.0, 20.0);

        advance(&mut p, &pointer, &cfg);

        assert!(p.pos.is_finite());
        assert_eq!(p.pos, DVec2::new(42.0, 17.0));
    }

    #[test]
    fn pointer_outside_radius_lets_point_relax() {
        let cfg = FieldConfig::default();
        let mut pointer = PointerState::new(cfg.influence_radius);
        pointer.move_to(DVec2::new(1000.0, 1000.0));
        let mut p = displaced_point();

        advance(&mut p, &pointer, &cfg);

        assert!((p.pos.x - 154.0).abs() < 1e-12);
    }

    #[test]
    fn pointer_exactly_at_radius_does_not_repel() {
        let cfg = FieldConfig::default();
        let mut pointer = PointerState::new(150.0);
        pointer.move_to(DVec2::ZERO);
        let mut p = Point::new(DVec2::new(150.0, 0.0), 1.0, 30.0);

        advance(&mut p, &pointer, &cfg);

        assert_eq!(p.pos, DVec2::new(150.0, 0.0));
    }

    #[test]
    fn advance_all_moves_every_point() {
        let cfg = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = Field::generate(600.0, 400.0, &cfg, &mut rng);
        for p in field.points.iter_mut() {
            p.pos += DVec2::new(10.0, -10.0);
        }
        let pointer = PointerState::new(cfg.influence_radius);

        advance_all(&mut field, &pointer, &cfg);

        for p in &field.points {
            assert!((p.offset_from_rest() - 18.0).abs() < 1e-9);
        }
    }
}
