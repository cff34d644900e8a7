use glam::DVec2;

/// Pointer position as seen by the simulation.
///
/// The position is `None` until the first pointer-move event arrives; until
/// then no point is repelled and no pointer lines are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    position: Option<DVec2>,
    pub influence_radius: f64,
}

impl PointerState {
    pub fn new(influence_radius: f64) -> Self {
        Self {
            position: None,
            influence_radius,
        }
    }

    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    pub fn move_to(&mut self, pos: DVec2) {
        self.position = Some(pos);
    }

    /// Distance from `p` to the pointer, if the pointer has been seen.
    pub fn distance_to(&self, p: DVec2) -> Option<f64> {
        self.position.map(|pointer| pointer.distance(p))
    }
}
