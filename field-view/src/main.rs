//! Application entry point for the particle field viewer.
//!
//! This binary sets up logging, loads the optional configuration file and
//! hands the window over to [`Viewer`] from the `viewer` module.

mod viewer;

use anyhow::Context;
use field_core::config::FieldConfig;
use viewer::Viewer;

/// Configuration file read from the working directory, if present.
const CONFIG_PATH: &str = "particle_field.json";

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the window was closed normally.
/// - `Err` if the configuration file is invalid or eframe fails to create
///   the native window or event loop.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = match FieldConfig::load_optional(CONFIG_PATH)
        .with_context(|| format!("failed to load {CONFIG_PATH}"))?
    {
        Some(cfg) => {
            tracing::info!(path = CONFIG_PATH, "loaded configuration");
            cfg
        }
        None => {
            tracing::info!("no {CONFIG_PATH} found, using default configuration");
            FieldConfig::default()
        }
    };

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(
            move |cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
                let viewer = Viewer::new(cc.egui_ctx.clone(), cfg)?;
                Ok(Box::new(viewer))
            },
        ),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
