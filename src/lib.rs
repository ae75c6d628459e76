//! # Grid Edit
//!
//! An infinite, pannable grid background composited beneath a freely editable content
//! layer, with a small egui application shell.
//!
//! The grid has two tiers of lines:
//! - **Minor**: fine lines every `grid_spacing` logical units
//! - **Major**: coarser lines every `grid_spacing * major_interval` units, drawn on top
//!
//! ## Features
//! - Unbounded viewport offset; only the lines inside the visible bounds are drawn
//! - Live-mutable spacing, stroke width, color and visibility per tier
//! - Layout coordination keeping the grid surface and the oversized content layer in
//!   step with the widget size
//! - Fixed-interval auto-pan and drag panning
//! - JSON configuration with documented defaults

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
mod config;
mod error;
mod grid;
mod scroll;
mod surface;
mod types;
mod ui;
mod widget;

// Re-export public types and functions
pub use config::*;
pub use error::*;
pub use grid::*;
pub use scroll::*;
pub use surface::*;
pub use types::*;
pub use ui::GridEditApp;
pub use widget::*;

/// Runs the grid editor with the default configuration.
///
/// # Example
///
/// ```no_run
/// use grid_edit::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    run_app_with(GridEditConfig::default())
}

/// Runs the grid editor with the given configuration.
///
/// A configuration the widget rejects is logged and replaced by the defaults.
pub fn run_app_with(config: GridEditConfig) -> Result<(), eframe::Error> {
    let app = GridEditApp::new_or_default(&config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Grid Edit")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Grid Edit", options, Box::new(|_cc| Ok(Box::new(app))))
}
