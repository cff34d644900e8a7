use crate::{
    error::ConfigError,
    types::{Color, Stroke},
};
use serde::{Deserialize, Serialize};
use std::{io::ErrorKind, path::Path};

/// Half-open range `[min, max)` a per-point parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Color and width of one family of connection lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

impl LineStyle {
    /// Builds the [`Stroke`] for a line faded to `opacity`.
    pub fn stroke(&self, opacity: f64) -> Stroke {
        Stroke {
            color: self.color,
            opacity,
            width: self.width,
        }
    }
}

/// Tunable parameters for field generation, forces and drawing.
///
/// Every field has a default, so a config document only needs to list the
/// values it overrides:
///
/// ```json
/// { "density": 8000.0, "influence_radius": 200.0, "seed": 7 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface units per point; population is `floor(width * height / density)`.
    pub density: f64,
    /// Pointer repulsion radius, also the reach of pointer connection lines.
    pub influence_radius: f64,
    /// Points closer than this are joined by a line (exclusive).
    pub link_distance: f64,
    /// Each relax step removes `1 / relax_divisor` of the offset from rest.
    pub relax_divisor: f64,
    pub radius_range: SampleRange,
    pub responsiveness_range: SampleRange,
    pub point_color: Color,
    pub link_style: LineStyle,
    pub pointer_link_style: LineStyle,
    /// Seed for field generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 15_000.0,
            influence_radius: 150.0,
            link_distance: 100.0,
            relax_divisor: 10.0,
            radius_range: SampleRange::new(1.0, 4.0),
            responsiveness_range: SampleRange::new(1.0, 31.0),
            point_color: Color::WHITE,
            link_style: LineStyle {
                color: Color::WHITE,
                width: 0.5,
            },
            pointer_link_style: LineStyle {
                color: Color::RED,
                width: 1.5,
            },
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: FieldConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Like [`FieldConfig::load`], but a missing file yields `Ok(None)`.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        match Self::load(path) {
            Ok(cfg) => Ok(Some(cfg)),
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Checks that every value keeps the simulation well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("density", self.density)?;
        positive("influence_radius", self.influence_radius)?;
        positive("link_distance", self.link_distance)?;
        if !(self.relax_divisor >= 1.0 && self.relax_divisor.is_finite()) {
            return Err(invalid(
                "relax_divisor",
                format!("must be a finite number >= 1, got {}", self.relax_divisor),
            ));
        }
        sample_range("radius_range", self.radius_range)?;
        sample_range("responsiveness_range", self.responsiveness_range)?;
        positive("link_style.width", self.link_style.width)?;
        positive("pointer_link_style.width", self.pointer_link_style.width)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("must be a finite number > 0, got {value}"),
        ))
    }
}

fn sample_range(field: &'static str, range: SampleRange) -> Result<(), ConfigError> {
    positive(field, range.min)?;
    if range.max > range.min && range.max.is_finite() {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("empty range [{}, {})", range.min, range.max),
        ))
    }
}
