use crate::config::{FieldConfig, SampleRange};
use glam::DVec2;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// Anchor the point relaxes toward; fixed at creation.
    rest: DVec2,
    pub pos: DVec2,
    pub radius: f64,
    pub responsiveness: f64,
}

impl Point {
    pub fn new(rest: DVec2, radius: f64, responsiveness: f64) -> Self {
        Self {
            rest,
            pos: rest,
            radius,
            responsiveness,
        }
    }

    /// Creates a point resting at `rest` with radius and responsiveness
    /// drawn from the ranges in `cfg`.
    pub fn random_at(rest: DVec2, cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let radius = sample(cfg.radius_range, rng);
        let responsiveness = sample(cfg.responsiveness_range, rng);
        Self::new(rest, radius, responsiveness)
    }

    pub fn rest(&self) -> DVec2 {
        self.rest
    }

    /// Manhattan distance between the current and the rest position.
    pub fn offset_from_rest(&self) -> f64 {
        let d = self.pos - self.rest;
        d.x.abs() + d.y.abs()
    }
}

fn sample(range: SampleRange, rng: &mut impl Rng) -> f64 {
    rng.random_range(range.min..range.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn new_point_starts_at_rest() {
        let p = Point::new(DVec2::new(3.0, 4.0), 2.0, 10.0);
        assert_eq!(p.pos, p.rest());
        assert_eq!(p.offset_from_rest(), 0.0);
    }

    #[test]
    fn random_parameters_stay_in_configured_ranges() {
        let cfg = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let p = Point::random_at(DVec2::ZERO, &cfg, &mut rng);
            assert!((1.0..4.0).contains(&p.radius), "radius {}", p.radius);
            assert!(
                (1.0..31.0).contains(&p.responsiveness),
                "responsiveness {}",
                p.responsiveness
            );
        }
    }

    #[test]
    fn offset_from_rest_is_manhattan() {
        let mut p = Point::new(DVec2::new(1.0, 1.0), 1.0, 1.0);
        p.pos = DVec2::new(4.0, -3.0);
        assert_eq!(p.offset_from_rest(), 7.0);
    }
}
