//! Frame driver tying field, pointer, simulation and drawing together.
//!
//! A frame ([`FrameLoop::tick`]) is:
//! 1. Clear the whole surface.
//! 2. For every point in field order: [`simulate::advance`], then
//!    [`render::draw_point`].
//! 3. [`render::draw_connections`] over the whole field.
//! 4. Ask the [`FrameScheduler`] for the next frame.
//!
//! Resize and pointer events are plain `&mut self` methods, so they can only
//! run between two ticks, never during one.

use crate::{
    config::FieldConfig,
    error::ConfigError,
    field::Field,
    pointer::PointerState,
    render::{self, Surface},
    simulate,
};
use glam::DVec2;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{info, trace};

/// Host hook that runs the loop once more before the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Cloneable handle that stops a [`FrameLoop`] from rescheduling itself.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Stops the loop. Returns `true` if this call stopped a running loop.
    pub fn cancel(&self) -> bool {
        let was_cancelled = self.cancelled.swap(true, Ordering::Relaxed);
        if !was_cancelled {
            info!("particle loop cancelled");
        }
        !was_cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}

/// Owns all state of one particle field animation.
///
/// ### Fields
/// - `field` - Points for the current surface size.
/// - `pointer` - Last known pointer position and influence radius.
/// - `cfg` - Generation, force and style parameters.
/// - `rng` - Source for field generation; seeded from `cfg.seed` if set.
/// - `scheduler` - Host frame scheduler.
/// - `cancel` - Shared stop flag, see [`FrameLoop::cancel_handle`].
/// - `frames` - Number of completed ticks.
pub struct FrameLoop<S: FrameScheduler> {
    field: Field,
    pointer: PointerState,
    cfg: FieldConfig,
    rng: StdRng,
    scheduler: S,
    cancel: CancelHandle,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    /// Creates a loop with a field generated for `width` x `height`.
    ///
    /// The loop is idle until [`FrameLoop::start`] requests the first frame.
    ///
    /// ### Errors
    /// Returns [`ConfigError::Invalid`] if `cfg` fails [`FieldConfig::validate`].
    pub fn new(
        cfg: FieldConfig,
        width: f64,
        height: f64,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut rng = make_rng(cfg.seed);
        let field = Field::generate(width, height, &cfg, &mut rng);
        let pointer = PointerState::new(cfg.influence_radius);

        Ok(Self {
            field,
            pointer,
            cfg,
            rng,
            scheduler,
            cancel: CancelHandle::default(),
            frames: 0,
        })
    }

    /// Clears any previous cancellation and requests the first frame.
    pub fn start(&mut self) {
        self.cancel.reset();
        info!(points = self.field.len(), "particle loop started");
        self.scheduler.request_frame();
    }

    /// Runs one frame onto `surface` and schedules the next one.
    ///
    /// Does nothing once the loop has been cancelled.
    pub fn tick(&mut self, surface: &mut impl Surface) {
        if self.cancel.is_cancelled() {
            trace!("tick skipped, loop cancelled");
            return;
        }

        surface.clear(self.field.width(), self.field.height());

        for point in self.field.points.iter_mut() {
            simulate::advance(point, &self.pointer, &self.cfg);
            render::draw_point(surface, point, &self.cfg);
        }

        render::draw_connections(surface, &self.field.points, &self.pointer, &self.cfg);

        self.frames += 1;
        trace!(frame = self.frames, "tick");

        self.scheduler.request_frame();
    }

    /// Rebuilds the field for a new surface size; the next tick uses it.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.field.regenerate(width, height, &self.cfg, &mut self.rng);
    }

    /// Records a pointer-move event in surface coordinates.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.move_to(DVec2::new(x, y));
    }

    /// Replaces the configuration and regenerates the field at its current size.
    ///
    /// A changed seed reseeds the generator; the known pointer position is kept.
    /// An invalid `cfg` is rejected and the current one stays in place.
    pub fn set_config(&mut self, cfg: FieldConfig) -> Result<(), ConfigError> {
        cfg.validate()?;
        if cfg.seed != self.cfg.seed {
            self.rng = make_rng(cfg.seed);
        }
        self.pointer.influence_radius = cfg.influence_radius;
        self.cfg = cfg;
        let (width, height) = (self.field.width(), self.field.height());
        self.on_resize(width, height);
        Ok(())
    }

    /// Returns a handle that can stop the loop from anywhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
