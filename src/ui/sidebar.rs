//! Sidebar controls for every grid parameter and the auto-pan driver.

use super::state::GridEditApp;
use super::{from_color32, report_rejected, to_color32};
use crate::types::TierKind;
use eframe::egui;

impl GridEditApp {
    /// Draws the controls sidebar.
    pub(super) fn draw_sidebar(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Grid");
                ui.separator();
                self.draw_visibility_section(ui);
                self.draw_spacing_section(ui);
                self.draw_line_width_section(ui);
                self.draw_color_section(ui);
                self.draw_scrolling_section(ui);
            });
    }

    fn draw_visibility_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Visibility")
            .default_open(true)
            .show(ui, |ui| {
                let mut show = self.grid.show_grid();
                if ui.checkbox(&mut show, "Show Grid").changed() {
                    self.grid.set_show_grid(show);
                }
                for (kind, label) in [
                    (TierKind::Minor, "Show Minor Grid"),
                    (TierKind::Major, "Show Major Grid"),
                ] {
                    let mut show = self.grid.show_tier(kind);
                    if ui.checkbox(&mut show, label).changed() {
                        self.grid.set_show_tier(kind, show);
                    }
                }
            });
    }

    fn draw_spacing_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Grid Spacing")
            .default_open(true)
            .show(ui, |ui| {
                let mut spacing = self.grid.grid_spacing();
                let slider = egui::Slider::new(&mut spacing, 5.0..=50.0).text("Minor spacing");
                if ui.add(slider).changed() {
                    report_rejected(self.grid.set_grid_spacing(spacing));
                }

                let mut interval = self.grid.major_interval();
                let slider = egui::Slider::new(&mut interval, 1..=10).text("Major interval");
                if ui.add(slider).changed() {
                    report_rejected(self.grid.set_major_interval(interval));
                }
            });
    }

    fn draw_line_width_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Line Width")
            .default_open(true)
            .show(ui, |ui| {
                for (kind, range, label) in [
                    (TierKind::Minor, 0.1..=2.0, "Minor width"),
                    (TierKind::Major, 0.5..=3.0, "Major width"),
                ] {
                    let mut width = self.grid.line_width(kind);
                    if ui.add(egui::Slider::new(&mut width, range).text(label)).changed() {
                        report_rejected(self.grid.set_line_width(kind, width));
                    }
                }
            });
    }

    fn draw_color_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Colors")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mut color = to_color32(self.grid.background_color());
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        self.grid.set_background_color(from_color32(color));
                    }
                    ui.label("Background");
                });
                for (kind, label) in [
                    (TierKind::Minor, "Minor lines"),
                    (TierKind::Major, "Major lines"),
                ] {
                    ui.horizontal(|ui| {
                        let mut color = to_color32(self.grid.line_stroke(kind));
                        if ui.color_edit_button_srgba(&mut color).changed() {
                            self.grid.set_line_stroke(kind, from_color32(color));
                        }
                        ui.label(label);
                    });
                }
            });
    }

    fn draw_scrolling_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Scrolling")
            .default_open(true)
            .show(ui, |ui| {
                let mut horizontal = self.auto_pan.horizontal.is_running();
                if ui.checkbox(&mut horizontal, "Scroll Horizontally").changed() {
                    self.auto_pan.horizontal.set_running(horizontal);
                }
                let mut vertical = self.auto_pan.vertical.is_running();
                if ui.checkbox(&mut vertical, "Scroll Vertically").changed() {
                    self.auto_pan.vertical.set_running(vertical);
                }

                let mut speed = self.auto_pan.speed();
                if ui
                    .add(egui::Slider::new(&mut speed, 0.1..=5.0).text("Speed"))
                    .changed()
                {
                    report_rejected(self.auto_pan.set_speed(speed));
                }

                ui.separator();
                let offset = self.grid.offset();
                ui.label(format!("Offset: ({:.1}, {:.1})", offset.x, offset.y));
                if ui.button("Reset offset").clicked() {
                    report_rejected(self.grid.set_offset(0.0, 0.0));
                }
                if self.is_panning() {
                    ui.label("Panning…");
                }
            });
    }
}
