use serde::{Deserialize, Serialize};

/// Opaque RGB color used for points and lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Line style for a stroked segment.
///
/// `opacity` is kept apart from [`Color`] so the distance fade of a
/// connection stays an exact `f64` instead of a quantized alpha channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Line width in surface units.
    pub width: f64,
}
