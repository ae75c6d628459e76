//! Application state structures.
//!
//! The shell keeps the widget and its auto-pan driver alongside the small amount of
//! egui-specific state needed to display the grid surface.

use crate::config::GridEditConfig;
use crate::error::GridError;
use crate::scroll::AutoPan;
use crate::widget::GridEdit;
use eframe::egui;
use std::time::Duration;

/// Default width of the controls sidebar, in points.
const SIDEBAR_WIDTH: f32 = 250.0;

/// State related to displaying the grid surface.
#[derive(Default)]
pub struct CanvasState {
    /// GPU copy of the grid surface
    pub(super) texture: Option<egui::TextureHandle>,
    /// Widget generation the texture was last uploaded from
    pub(super) uploaded_generation: Option<u64>,
    /// Last size requested from the layout coordinator, in device pixels
    pub(super) last_size: Option<[u32; 2]>,
    /// Whether a drag pan is in progress
    pub(super) is_panning: bool,
}

/// State of the controls sidebar.
pub struct SidebarState {
    /// Remembered panel width
    pub(super) width: f32,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            width: SIDEBAR_WIDTH,
        }
    }
}

/// The grid editor application: the widget, its pan driver and the egui shell state.
pub struct GridEditApp {
    /// The composite grid widget
    pub grid: GridEdit,
    /// Automatic panning driver
    pub auto_pan: AutoPan,
    pub(super) canvas: CanvasState,
    pub(super) sidebar: SidebarState,
}

impl Default for GridEditApp {
    fn default() -> Self {
        let mut grid = GridEdit::new();
        grid.attach();
        Self {
            grid,
            auto_pan: AutoPan::drift(),
            canvas: CanvasState::default(),
            sidebar: SidebarState::default(),
        }
    }
}

impl GridEditApp {
    /// Builds the application from a configuration.
    pub fn new(config: &GridEditConfig) -> Result<Self, GridError> {
        let mut grid = GridEdit::from_config(config)?;
        let auto_pan = AutoPan::from_config(&config.auto_pan)?;
        grid.attach();
        Ok(Self {
            grid,
            auto_pan,
            canvas: CanvasState::default(),
            sidebar: SidebarState::default(),
        })
    }

    /// Builds the application from a configuration, falling back to defaults when it is rejected.
    pub fn new_or_default(config: &GridEditConfig) -> Self {
        Self::new(config).unwrap_or_else(|err| {
            log::warn!("invalid configuration, using defaults: {err}");
            Self::default()
        })
    }

    /// Advances the auto-pan driver by one frame's worth of time.
    pub fn tick(&mut self, dt: Duration) {
        if let Err(err) = self.auto_pan.advance(dt, &mut self.grid) {
            log::warn!("auto-pan stopped: {err}");
            self.auto_pan.horizontal.stop();
            self.auto_pan.vertical.stop();
        }
    }

    /// Whether the user is dragging the viewport.
    pub fn is_panning(&self) -> bool {
        self.canvas.is_panning
    }
}
