//! Grid canvas display and navigation.
//!
//! This module keeps the widget sized to the central panel, uploads the grid surface to an
//! egui texture whenever it was redrawn, and pans the viewport on drag.

use super::state::GridEditApp;
use eframe::egui;

impl GridEditApp {
    /// Draws the grid canvas into all remaining space of `ui`.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let pixels_per_point = ui.ctx().pixels_per_point();

        self.sync_canvas_size(response.rect.size(), pixels_per_point);
        self.handle_canvas_panning(&response, pixels_per_point);
        self.upload_grid_texture(ui.ctx());

        let painter = painter.with_clip_rect(response.rect);
        if let Some(texture) = &self.canvas.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), response.rect, uv, egui::Color32::WHITE);
        }

        let offset = self.grid.offset();
        painter.text(
            response.rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            format!("x: {:.1}  y: {:.1}", offset.x, offset.y),
            egui::FontId::monospace(12.0),
            egui::Color32::from_gray(96),
        );
    }

    /// Resizes the widget when the canvas area changed size.
    ///
    /// # Arguments
    ///
    /// * `size` - Canvas size in points
    /// * `pixels_per_point` - Display scale used to convert points to device pixels
    pub fn sync_canvas_size(&mut self, size: egui::Vec2, pixels_per_point: f32) {
        let device = |points: f32| (points * pixels_per_point).round().max(0.0) as u32;
        let requested = [device(size.x), device(size.y)];
        if self.canvas.last_size == Some(requested) {
            return;
        }
        self.canvas.last_size = Some(requested);
        if let Err(err) = self
            .grid
            .resize(f64::from(requested[0]), f64::from(requested[1]))
        {
            log::warn!("canvas resize failed: {err}");
        }
    }

    /// Pans the viewport while the canvas is being dragged.
    ///
    /// # Arguments
    ///
    /// * `response` - The response from the canvas widget
    /// * `pixels_per_point` - Display scale used to convert points to device pixels
    pub fn handle_canvas_panning(&mut self, response: &egui::Response, pixels_per_point: f32) {
        self.canvas.is_panning = response.dragged();
        if self.canvas.is_panning {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                self.pan_by_screen_delta(delta, pixels_per_point);
            }
        }
    }

    /// Moves the viewport so content follows a pointer movement of `delta` points.
    pub fn pan_by_screen_delta(&mut self, delta: egui::Vec2, pixels_per_point: f32) {
        let dx = -f64::from(delta.x * pixels_per_point);
        let dy = -f64::from(delta.y * pixels_per_point);
        if let Err(err) = self.grid.pan_by(dx, dy) {
            log::warn!("pan rejected: {err}");
        }
    }

    /// Copies the grid surface into the canvas texture if it was redrawn since the last upload.
    pub fn upload_grid_texture(&mut self, ctx: &egui::Context) {
        let generation = self.grid.generation();
        if self.canvas.uploaded_generation == Some(generation) {
            return;
        }
        self.canvas.uploaded_generation = Some(generation);

        let surface = self.grid.surface();
        if surface.is_empty() {
            self.canvas.texture = None;
            return;
        }
        let size = [surface.width() as usize, surface.height() as usize];
        let image = egui::ColorImage::from_rgba_premultiplied(size, surface.data());
        match &mut self.canvas.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.canvas.texture =
                    Some(ctx.load_texture("grid_surface", image, egui::TextureOptions::NEAREST));
            }
        }
    }
}
