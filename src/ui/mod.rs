//! egui application shell for the grid widget.
//!
//! # Module Organization
//!
//! - `state` - Application state and the `GridEditApp` struct
//! - `canvas` - Grid surface display, resize wiring and drag panning
//! - `sidebar` - Controls for visibility, spacing, widths, colors and scrolling

mod canvas;
mod sidebar;
mod state;

pub use state::GridEditApp;

use crate::error::GridError;
use crate::types::Color;
use eframe::egui;
use std::time::Duration;

/// Converts a grid color to an egui color.
pub(crate) fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Converts an egui color to a grid color.
pub(crate) fn from_color32(color: egui::Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::rgba(r, g, b, a)
}

/// Logs a setter result the UI could not apply; the previous value stays in effect.
fn report_rejected(result: Result<(), GridError>) {
    if let Err(err) = result {
        log::warn!("rejected grid setting: {err}");
    }
}

impl eframe::App for GridEditApp {
    /// Main update function called by egui for each frame.
    ///
    /// Advances the auto-pan driver, then lays out the controls sidebar and the grid
    /// canvas, and schedules the next repaint while panning is running.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());

        let dt = ctx.input(|i| i.stable_dt);
        self.tick(Duration::try_from_secs_f32(dt).unwrap_or_default());

        egui::SidePanel::right("grid_controls")
            .resizable(true)
            .default_width(self.sidebar.width)
            .show(ctx, |ui| {
                self.sidebar.width = ui.available_width();
                self.draw_sidebar(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        if let Some(wait) = self.auto_pan.until_next_tick() {
            ctx.request_repaint_after(wait);
        }
    }
}
