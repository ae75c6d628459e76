//! The composite grid widget and its layout coordination.
//!
//! [`GridEdit`] stacks the grid surface beneath a transparent, oversized content layer and
//! clips both to the widget bounds. Every mutation goes through a setter that updates the
//! state and then redraws, which replaces the implicit change notification a retained-mode
//! toolkit would provide.

use crate::config::GridEditConfig;
use crate::constants;
use crate::error::GridError;
use crate::grid::GridRenderer;
use crate::surface::Surface;
use crate::types::*;

/// Whether the widget is currently shown by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Not shown; mutations update state but nothing is rasterised
    Detached,
    /// Shown; every mutation and resize redraws synchronously
    Attached,
}

/// Visible bounds of the widget. Both layers are composited inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clip {
    /// Width of the clip rectangle
    pub width: f64,
    /// Height of the clip rectangle
    pub height: f64,
}

impl Clip {
    /// True when `(x, y)` lies inside the clip rectangle anchored at the origin.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

/// The transparent layer stacked above the grid for host content.
///
/// It is kept larger than the visible bounds so content beyond the viewport edge
/// does not force a resize while panning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentLayer {
    /// Preferred width of the layer
    pub width: f64,
    /// Preferred height of the layer
    pub height: f64,
}

/// Infinite grid background with a content layer on top.
#[derive(Debug, Clone)]
pub struct GridEdit {
    renderer: GridRenderer,
    surface: Surface,
    content: ContentLayer,
    clip: Clip,
    grid_spacing: f64,
    major_interval: u32,
    oversize_factor: f64,
    state: LayoutState,
    generation: u64,
}

impl Default for GridEdit {
    fn default() -> Self {
        Self {
            renderer: GridRenderer::default(),
            surface: Surface::empty(),
            content: ContentLayer::default(),
            clip: Clip::default(),
            grid_spacing: constants::GRID_SPACING,
            major_interval: constants::MAJOR_INTERVAL,
            oversize_factor: constants::OVERSIZE_FACTOR,
            state: LayoutState::Detached,
            generation: 0,
        }
    }
}

/// Rounds a requested size to whole device pixels; NaN and negative sizes become zero.
fn device_extent(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

impl GridEdit {
    /// Creates a detached widget with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached widget from a configuration, validating every value.
    pub fn from_config(config: &GridEditConfig) -> Result<Self, GridError> {
        config.validate()?;
        let mut renderer = GridRenderer::new();
        renderer.set_viewport(config.offset_x, config.offset_y)?;
        renderer.set_background(config.background_color);
        renderer.set_show_grid(config.show_grid);
        renderer.set_scale(config.grid_scale)?;
        renderer.set_tier(
            TierKind::Minor,
            GridTier {
                spacing: config.grid_spacing,
                line_width: config.minor_line_width,
                stroke: config.minor_line_stroke,
                visible: config.show_minor_grid,
            },
        )?;
        renderer.set_tier(
            TierKind::Major,
            GridTier {
                spacing: config.grid_spacing * f64::from(config.major_interval),
                line_width: config.major_line_width,
                stroke: config.major_line_stroke,
                visible: config.show_major_grid,
            },
        )?;
        Ok(Self {
            renderer,
            grid_spacing: config.grid_spacing,
            major_interval: config.major_interval,
            oversize_factor: config.oversize_factor,
            ..Self::default()
        })
    }

    // Lifecycle

    /// Current layout state.
    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Marks the widget as shown and renders immediately.
    pub fn attach(&mut self) {
        self.state = LayoutState::Attached;
        self.render();
    }

    /// Marks the widget as hidden; later mutations skip rasterisation until re-attached.
    pub fn detach(&mut self) {
        self.state = LayoutState::Detached;
    }

    /// Number of completed renders. Hosts re-upload pixels when this changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The grid pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The renderer state.
    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    /// Content layer dimensions.
    pub fn content(&self) -> ContentLayer {
        self.content
    }

    /// Clip rectangle dimensions.
    pub fn clip(&self) -> Clip {
        self.clip
    }

    // Layout

    /// Lays the widget out at a new size.
    ///
    /// The grid surface takes the visible size exactly, the content layer takes it
    /// multiplied by the oversize factor, and the grid is redrawn. A surface above the
    /// maximum side is left empty and the error returned; the rest of the layout still
    /// applies.
    ///
    /// # Arguments
    ///
    /// * `width` - New width in device pixels
    /// * `height` - New height in device pixels
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), GridError> {
        let (w, h) = (device_extent(width), device_extent(height));
        log::debug!("resize to {w}x{h}");
        self.clip = Clip {
            width: f64::from(w),
            height: f64::from(h),
        };
        self.layout_content();
        let resized = self.surface.resize(w, h);
        if let Err(err) = &resized {
            log::warn!("grid surface left empty: {err}");
        }
        self.redraw();
        resized
    }

    fn layout_content(&mut self) {
        self.content = ContentLayer {
            width: self.clip.width * self.oversize_factor,
            height: self.clip.height * self.oversize_factor,
        };
    }

    /// Oversize factor of the content layer.
    pub fn oversize_factor(&self) -> f64 {
        self.oversize_factor
    }

    /// Sets the content layer's oversize factor and re-lays it out.
    pub fn set_oversize_factor(&mut self, factor: f64) -> Result<(), GridError> {
        if !(factor.is_finite() && factor >= 1.0) {
            return Err(GridError::InvalidOversizeFactor(factor));
        }
        self.oversize_factor = factor;
        self.layout_content();
        Ok(())
    }

    // Rendering

    /// Rasterises the grid into the surface now, regardless of the layout state.
    pub fn render(&mut self) {
        self.renderer.render(&mut self.surface);
        self.generation += 1;
    }

    fn redraw(&mut self) {
        if self.state == LayoutState::Attached {
            self.render();
        }
    }

    // Viewport

    /// Current viewport offset.
    pub fn offset(&self) -> Viewport {
        self.renderer.viewport()
    }

    /// Moves the viewport to `(x, y)` in logical units.
    pub fn set_offset(&mut self, x: f64, y: f64) -> Result<(), GridError> {
        if self.offset() == (Viewport { x, y }) {
            return Ok(());
        }
        self.renderer.set_viewport(x, y)?;
        self.redraw();
        Ok(())
    }

    /// Moves the viewport horizontally.
    pub fn set_offset_x(&mut self, x: f64) -> Result<(), GridError> {
        self.set_offset(x, self.offset().y)
    }

    /// Moves the viewport vertically.
    pub fn set_offset_y(&mut self, y: f64) -> Result<(), GridError> {
        self.set_offset(self.offset().x, y)
    }

    /// Shifts the viewport by a delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Result<(), GridError> {
        let current = self.offset();
        self.set_offset(current.x + dx, current.y + dy)
    }

    // Spacing bindings

    /// Base spacing; the minor tier uses it directly.
    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    /// Sets the base spacing and recomputes both tiers.
    pub fn set_grid_spacing(&mut self, spacing: f64) -> Result<(), GridError> {
        self.apply_spacing(spacing, self.major_interval)
    }

    /// Minor cells per major cell.
    pub fn major_interval(&self) -> u32 {
        self.major_interval
    }

    /// Sets the major interval and recomputes the major tier.
    pub fn set_major_interval(&mut self, interval: u32) -> Result<(), GridError> {
        self.apply_spacing(self.grid_spacing, interval)
    }

    fn apply_spacing(&mut self, spacing: f64, interval: u32) -> Result<(), GridError> {
        if interval == 0 {
            return Err(GridError::InvalidMajorInterval(interval));
        }
        let minor = validate_spacing(spacing)?;
        let major = validate_spacing(spacing * f64::from(interval))?;
        if minor == self.grid_spacing && interval == self.major_interval {
            return Ok(());
        }
        self.renderer.set_spacing(TierKind::Minor, minor)?;
        self.renderer.set_spacing(TierKind::Major, major)?;
        self.grid_spacing = minor;
        self.major_interval = interval;
        self.redraw();
        Ok(())
    }

    // Appearance

    /// Master visibility switch.
    pub fn show_grid(&self) -> bool {
        self.renderer.show_grid()
    }

    /// Shows or hides all grid lines.
    pub fn set_show_grid(&mut self, show: bool) {
        if self.show_grid() != show {
            self.renderer.set_show_grid(show);
            self.redraw();
        }
    }

    /// Whether a tier is drawn.
    pub fn show_tier(&self, kind: TierKind) -> bool {
        self.renderer.tier(kind).visible
    }

    /// Shows or hides one tier.
    pub fn set_show_tier(&mut self, kind: TierKind, show: bool) {
        if self.show_tier(kind) != show {
            self.renderer.set_visible(kind, show);
            self.redraw();
        }
    }

    /// Whether minor lines are drawn.
    pub fn show_minor_grid(&self) -> bool {
        self.show_tier(TierKind::Minor)
    }

    /// Shows or hides minor lines.
    pub fn set_show_minor_grid(&mut self, show: bool) {
        self.set_show_tier(TierKind::Minor, show);
    }

    /// Whether major lines are drawn.
    pub fn show_major_grid(&self) -> bool {
        self.show_tier(TierKind::Major)
    }

    /// Shows or hides major lines.
    pub fn set_show_major_grid(&mut self, show: bool) {
        self.set_show_tier(TierKind::Major, show);
    }

    /// Background fill.
    pub fn background_color(&self) -> Color {
        self.renderer.background()
    }

    /// Sets the background fill.
    pub fn set_background_color(&mut self, color: Color) {
        if self.background_color() != color {
            self.renderer.set_background(color);
            self.redraw();
        }
    }

    /// Stroke width of a tier.
    pub fn line_width(&self, kind: TierKind) -> f64 {
        self.renderer.tier(kind).line_width
    }

    /// Sets the stroke width of a tier.
    pub fn set_line_width(&mut self, kind: TierKind, width: f64) -> Result<(), GridError> {
        if self.line_width(kind) != width {
            self.renderer.set_line_width(kind, width)?;
            self.redraw();
        }
        Ok(())
    }

    /// Minor stroke width.
    pub fn minor_line_width(&self) -> f64 {
        self.line_width(TierKind::Minor)
    }

    /// Sets the minor stroke width.
    pub fn set_minor_line_width(&mut self, width: f64) -> Result<(), GridError> {
        self.set_line_width(TierKind::Minor, width)
    }

    /// Major stroke width.
    pub fn major_line_width(&self) -> f64 {
        self.line_width(TierKind::Major)
    }

    /// Sets the major stroke width.
    pub fn set_major_line_width(&mut self, width: f64) -> Result<(), GridError> {
        self.set_line_width(TierKind::Major, width)
    }

    /// Stroke color of a tier.
    pub fn line_stroke(&self, kind: TierKind) -> Color {
        self.renderer.tier(kind).stroke
    }

    /// Sets the stroke color of a tier.
    pub fn set_line_stroke(&mut self, kind: TierKind, color: Color) {
        if self.line_stroke(kind) != color {
            self.renderer.set_stroke(kind, color);
            self.redraw();
        }
    }

    /// Minor stroke color.
    pub fn minor_line_stroke(&self) -> Color {
        self.line_stroke(TierKind::Minor)
    }

    /// Sets the minor stroke color.
    pub fn set_minor_line_stroke(&mut self, color: Color) {
        self.set_line_stroke(TierKind::Minor, color);
    }

    /// Major stroke color.
    pub fn major_line_stroke(&self) -> Color {
        self.line_stroke(TierKind::Major)
    }

    /// Sets the major stroke color.
    pub fn set_major_line_stroke(&mut self, color: Color) {
        self.set_line_stroke(TierKind::Major, color);
    }

    /// Stored scale multiplier (not applied to geometry).
    pub fn grid_scale(&self) -> f64 {
        self.renderer.scale()
    }

    /// Sets the scale multiplier.
    pub fn set_grid_scale(&mut self, scale: f64) -> Result<(), GridError> {
        if self.grid_scale() != scale {
            self.renderer.set_scale(scale)?;
            self.redraw();
        }
        Ok(())
    }
}
