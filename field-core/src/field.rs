use crate::{config::FieldConfig, point::Point};
use glam::DVec2;
use rand::Rng;
use tracing::{debug, warn};

/// The full set of points generated for one surface size.
///
/// Point order only matters for the pairwise connection scan; the field is
/// always rebuilt wholesale, never patched.
#[derive(Debug, Default)]
pub struct Field {
    pub points: Vec<Point>,
    width: f64,
    height: f64,
}

/// Upper bound on the number of points in one field.
///
/// The connection pass is O(n²); past this count a frame stops being
/// interactive, and a tiny density would otherwise overflow the allocation.
pub const MAX_POPULATION: usize = 20_000;

/// Number of points for a `width` x `height` surface, capped at
/// [`MAX_POPULATION`].
///
/// Non-positive (or NaN) dimensions give an empty field.
pub fn population(width: f64, height: f64, density: f64) -> usize {
    if !(width > 0.0 && height > 0.0 && density > 0.0) {
        return 0;
    }
    let count = (width * height / density).floor();
    if count >= MAX_POPULATION as f64 {
        warn!(width, height, density, "population capped at {MAX_POPULATION}");
        return MAX_POPULATION;
    }
    count as usize
}

impl Field {
    /// Generates a fresh field sized for `width` x `height`.
    pub fn generate(width: f64, height: f64, cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let mut field = Self::default();
        field.regenerate(width, height, cfg, rng);
        field
    }

    /// Discards every point and fills the field for the new dimensions.
    ///
    /// Each point rests where it is spawned, uniformly in
    /// `[0, width) x [0, height)`.
    pub fn regenerate(&mut self, width: f64, height: f64, cfg: &FieldConfig, rng: &mut impl Rng) {
        let count = population(width, height, cfg.density);

        self.width = width;
        self.height = height;
        self.points.clear();
        self.points.reserve(count);
        for _ in 0..count {
            let rest = DVec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
            self.points.push(Point::random_at(rest, cfg, rng));
        }

        debug!(width, height, count, "regenerated particle field");
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
