//! Interactive particle field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`FrameLoop`] and implements
//! [`eframe::App`] to host it: the central panel is the drawing surface, its
//! size drives field regeneration, the hovered position is the pointer and
//! egui repaint requests are the frame scheduler.

use eframe::App;
use field_core::{
    config::FieldConfig,
    error::ConfigError,
    frame_loop::{FrameLoop, FrameScheduler},
    render::{DrawCommand, DrawList},
    types::Color,
};
use glam::DVec2;

/// [`FrameScheduler`] backed by egui repaint requests.
///
/// A request marks a frame as pending and asks egui for another repaint; the
/// viewer runs at most one tick per pending request, so extra repaints caused
/// by input do not speed the animation up.
pub struct RepaintScheduler {
    ctx: egui::Context,
    pending: bool,
}

impl RepaintScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            pending: false,
        }
    }

    /// Returns whether a frame was requested, clearing the request.
    fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.ctx.request_repaint();
    }
}

/// Main application state for the viewer.
///
/// ### Fields
/// - `frame_loop` - The particle field animation.
/// - `frame` - Last recorded frame, replayed onto the painter every repaint.
/// - `cfg_draft` - Configuration being edited in the side panel.
/// - `cfg_error` - Validation message from the last rejected edit.
/// - `surface_size` - Size of the central panel at the last regeneration.
pub struct Viewer {
    frame_loop: FrameLoop<RepaintScheduler>,
    frame: DrawList,
    cfg_draft: FieldConfig,
    cfg_error: Option<String>,
    surface_size: egui::Vec2,
}

impl Viewer {
    /// Creates a running viewer; the field is sized on the first repaint.
    pub fn new(ctx: egui::Context, cfg: FieldConfig) -> Result<Self, ConfigError> {
        let mut frame_loop = FrameLoop::new(cfg.clone(), 0.0, 0.0, RepaintScheduler::new(ctx))?;
        frame_loop.start();

        Ok(Self {
            frame_loop,
            frame: DrawList::new(),
            cfg_draft: cfg,
            cfg_error: None,
            surface_size: egui::Vec2::ZERO,
        })
    }

    /// Regenerates the field if the drawing surface changed size.
    fn sync_surface(&mut self, size: egui::Vec2) -> bool {
        if size == self.surface_size {
            return false;
        }
        self.surface_size = size;
        self.frame_loop.on_resize(size.x as f64, size.y as f64);
        true
    }

    /// Runs one tick if the loop asked for a frame since the last one.
    fn step_if_scheduled(&mut self) -> bool {
        if !self.frame_loop.scheduler_mut().take_pending() {
            return false;
        }
        self.frame_loop.tick(&mut self.frame);
        true
    }

    fn toggle_running(&mut self) {
        if self.frame_loop.is_running() {
            self.frame_loop.cancel_handle().cancel();
        } else {
            self.frame_loop.start();
        }
    }

    /// Validates the edited configuration and hands it to the loop.
    fn apply_config(&mut self) {
        match self.frame_loop.set_config(self.cfg_draft.clone()) {
            Ok(()) => {
                self.cfg_error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "rejected configuration edit");
                self.cfg_error = Some(err.to_string());
            }
        }
    }

    /// Helper to draw a labeled `f64` [`egui::DragValue`].
    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (run control, regeneration).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let running = self.frame_loop.is_running();
                if ui.button(if running { "⏸ Pause" } else { "▶ Run" }).clicked() {
                    self.toggle_running();
                }

                if ui.button("Regenerate").clicked() {
                    let size = self.surface_size;
                    self.frame_loop.on_resize(size.x as f64, size.y as f64);
                }
            });
        });
    }

    /// Builds the bottom status bar (frame rate, counts, pointer).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dt = ctx.input(|i| i.stable_dt) as f64;
                if dt > 0.0 {
                    ui.label(format!("{:.0} fps", 1.0 / dt));
                }
                ui.separator();
                ui.label(format!("frames = {}", self.frame_loop.frame_count()));
                ui.label(format!("points = {}", self.frame_loop.field().len()));
                match self.frame_loop.pointer().position() {
                    Some(p) => ui.label(format!("pointer = ({:.0}, {:.0})", p.x, p.y)),
                    None => ui.label("pointer = none"),
                };
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Field");
                Self::labeled_drag_f64(
                    ui,
                    "density:",
                    &mut self.cfg_draft.density,
                    500.0..=100_000.0,
                    100.0,
                );

                let mut fixed_seed = self.cfg_draft.seed.is_some();
                if ui.checkbox(&mut fixed_seed, "fixed seed").changed() {
                    self.cfg_draft.seed = fixed_seed.then_some(0);
                }
                if let Some(seed) = self.cfg_draft.seed.as_mut() {
                    ui.add(egui::DragValue::new(seed).prefix("seed = "));
                }

                ui.separator();
                ui.label("Forces");
                Self::labeled_drag_f64(
                    ui,
                    "influence_radius:",
                    &mut self.cfg_draft.influence_radius,
                    1.0..=1000.0,
                    1.0,
                );
                Self::labeled_drag_f64(
                    ui,
                    "relax_divisor:",
                    &mut self.cfg_draft.relax_divisor,
                    1.0..=100.0,
                    0.1,
                );

                ui.separator();
                ui.label("Point parameters");
                Self::labeled_drag_f64(
                    ui,
                    "radius min:",
                    &mut self.cfg_draft.radius_range.min,
                    0.1..=20.0,
                    0.1,
                );
                Self::labeled_drag_f64(
                    ui,
                    "radius max:",
                    &mut self.cfg_draft.radius_range.max,
                    0.1..=20.0,
                    0.1,
                );
                Self::labeled_drag_f64(
                    ui,
                    "responsiveness min:",
                    &mut self.cfg_draft.responsiveness_range.min,
                    0.1..=100.0,
                    0.5,
                );
                Self::labeled_drag_f64(
                    ui,
                    "responsiveness max:",
                    &mut self.cfg_draft.responsiveness_range.max,
                    0.1..=100.0,
                    0.5,
                );

                ui.separator();
                ui.label("Lines");
                Self::labeled_drag_f64(
                    ui,
                    "link_distance:",
                    &mut self.cfg_draft.link_distance,
                    1.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f64(
                    ui,
                    "link width:",
                    &mut self.cfg_draft.link_style.width,
                    0.1..=10.0,
                    0.1,
                );
                Self::labeled_drag_f64(
                    ui,
                    "pointer link width:",
                    &mut self.cfg_draft.pointer_link_style.width,
                    0.1..=10.0,
                    0.1,
                );

                ui.separator();
                if ui.button("Apply").clicked() {
                    self.apply_config();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg_draft = FieldConfig::default();
                    self.apply_config();
                }
                if let Some(err) = &self.cfg_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
    }

    /// Builds the central panel: the drawing surface and pointer source.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                self.sync_surface(rect.size());

                if let Some(p) = response.hover_pos() {
                    let local = to_surface(p, rect);
                    self.frame_loop.on_pointer_move(local.x, local.y);
                }

                self.step_if_scheduled();
                self.paint(&painter, rect);
            });
    }

    /// Replays the last recorded frame onto `painter`.
    fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        for cmd in self.frame.iter() {
            match *cmd {
                DrawCommand::Clear { width, height } => {
                    let area =
                        egui::Rect::from_min_size(rect.min, egui::vec2(width as f32, height as f32));
                    painter.rect_filled(area, 0.0, egui::Color32::BLACK);
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    painter.circle_filled(
                        to_screen(center, rect),
                        radius as f32,
                        to_color32(color, 1.0),
                    );
                }
                DrawCommand::Line { from, to, stroke } => {
                    painter.line_segment(
                        [to_screen(from, rect), to_screen(to, rect)],
                        egui::Stroke::new(
                            stroke.width as f32,
                            to_color32(stroke.color, stroke.opacity),
                        ),
                    );
                }
            }
        }
    }
}

/// Converts a surface position to egui screen space.
///
/// Surface coordinates start at the top-left corner of `rect` with y
/// growing downward, the same orientation egui uses.
fn to_screen(p: DVec2, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x as f32, rect.min.y + p.y as f32)
}

/// Inverse of [`to_screen`].
fn to_surface(p: egui::Pos2, rect: egui::Rect) -> DVec2 {
    DVec2::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64)
}

fn to_color32(color: Color, opacity: f64) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

impl App for Viewer {
    /// eframe callback that builds all panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
