//! Grid rendering: visible-line math and rasterisation.
//!
//! The renderer owns the viewport offset and the appearance of both grid tiers.
//! Rendering is split in two steps so the geometry can be inspected on its own:
//! [`GridRenderer::plan`] computes which lines are visible for a surface size, and
//! [`GridRenderer::render`] fills the surface and strokes those lines.

use crate::constants::{GRID_SCALE, MAX_LINES_PER_AXIS, MIN_GRID_SPACING};
use crate::error::GridError;
use crate::surface::Surface;
use crate::types::*;
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Logical coordinate of the first grid line at or before `offset`.
///
/// Satisfies `first <= offset < first + spacing` whenever the magnitudes involved
/// are representable at `spacing` resolution.
pub fn first_visible_line(offset: f64, spacing: f64) -> f64 {
    let first = spacing * (offset / spacing).floor();
    // The division can round across an integer boundary.
    if first > offset {
        first - spacing
    } else if first + spacing <= offset {
        first + spacing
    } else {
        first
    }
}

/// Device coordinates of every visible line along one axis, ascending.
///
/// Lines are placed at `first + k * spacing` for `k = 0, 1, ...` while the logical
/// coordinate stays within `offset + extent`, and each is mapped to the device via
/// `logical - offset`. The first line sits at or just before device zero so there is
/// never a gap at the leading edge.
///
/// The count is computed up front and capped at [`MAX_LINES_PER_AXIS`], so this
/// terminates for every input. Invalid spacing, non-finite offsets and negative
/// extents produce no lines. Lines that collapse onto the same device coordinate
/// (possible only at extreme offsets) are emitted once.
///
/// # Arguments
///
/// * `offset` - Viewport offset along this axis, in logical units
/// * `spacing` - Logical distance between adjacent lines
/// * `extent` - Surface size along this axis, in device pixels
pub fn visible_lines(offset: f64, spacing: f64, extent: f64) -> Vec<f64> {
    let valid = spacing.is_finite()
        && spacing >= MIN_GRID_SPACING
        && offset.is_finite()
        && extent.is_finite()
        && extent >= 0.0;
    if !valid {
        return Vec::new();
    }

    let first = first_visible_line(offset, spacing);
    let end = offset + extent;
    let span = ((end - first) / spacing).floor();
    if span.is_nan() || span < 0.0 {
        return Vec::new();
    }
    // `as` saturates, so the cap also covers spans beyond usize.
    let count = (span as usize).saturating_add(1).min(MAX_LINES_PER_AXIS);

    let mut lines: Vec<f64> = Vec::with_capacity(count);
    for k in 0..count {
        let logical = first + k as f64 * spacing;
        if logical > end {
            break;
        }
        let device = logical - offset;
        if lines.last().is_some_and(|&prev| device <= prev) {
            continue;
        }
        lines.push(device);
    }
    lines
}

/// All lines of one tier along one axis, with the stroke they are drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    /// Tier the lines belong to
    pub tier: TierKind,
    /// Orientation of the lines
    pub axis: Axis,
    /// Stroke color
    pub stroke: Color,
    /// Stroke width in device pixels
    pub line_width: f64,
    /// Device coordinates, ascending
    pub positions: Vec<f64>,
}

/// Everything a render draws, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    /// Fill for the whole surface
    pub background: Color,
    /// Line batches; minor batches precede major ones
    pub batches: Vec<LineBatch>,
}

/// Viewport and appearance state of the infinite grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRenderer {
    viewport: Viewport,
    background: Color,
    minor: GridTier,
    major: GridTier,
    show_grid: bool,
    scale: f64,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            background: Color::WHITE,
            minor: GridTier::minor(),
            major: GridTier::major(),
            show_grid: true,
            scale: GRID_SCALE,
        }
    }
}

impl GridRenderer {
    /// Creates a renderer with the default tiers and a white background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current viewport offset.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Moves the viewport. Non-finite offsets are rejected.
    pub fn set_viewport(&mut self, x: f64, y: f64) -> Result<(), GridError> {
        self.viewport = Viewport::new(x, y)?;
        Ok(())
    }

    /// Background fill color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Sets the background fill color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Master visibility switch for both tiers.
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Turns all grid lines on or off.
    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Stored scale multiplier. It is not applied to line geometry.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the scale multiplier.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), GridError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(GridError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// Configuration of one tier.
    pub fn tier(&self, kind: TierKind) -> &GridTier {
        match kind {
            TierKind::Minor => &self.minor,
            TierKind::Major => &self.major,
        }
    }

    fn tier_mut(&mut self, kind: TierKind) -> &mut GridTier {
        match kind {
            TierKind::Minor => &mut self.minor,
            TierKind::Major => &mut self.major,
        }
    }

    /// Replaces a whole tier after validating it.
    pub fn set_tier(&mut self, kind: TierKind, tier: GridTier) -> Result<(), GridError> {
        tier.validate()?;
        *self.tier_mut(kind) = tier;
        Ok(())
    }

    /// Sets a tier's spacing. Spacing below [`MIN_GRID_SPACING`] is rejected.
    pub fn set_spacing(&mut self, kind: TierKind, spacing: f64) -> Result<(), GridError> {
        self.tier_mut(kind).spacing = validate_spacing(spacing)?;
        Ok(())
    }

    /// Sets a tier's stroke width.
    pub fn set_line_width(&mut self, kind: TierKind, width: f64) -> Result<(), GridError> {
        validate_line_width(width)?;
        self.tier_mut(kind).line_width = width;
        Ok(())
    }

    /// Sets a tier's stroke color.
    pub fn set_stroke(&mut self, kind: TierKind, color: Color) {
        self.tier_mut(kind).stroke = color;
    }

    /// Shows or hides one tier.
    pub fn set_visible(&mut self, kind: TierKind, visible: bool) {
        self.tier_mut(kind).visible = visible;
    }

    /// Computes the lines visible on a `width` x `height` surface.
    ///
    /// With the master switch off the plan holds only the background.
    pub fn plan(&self, width: u32, height: u32) -> RenderPlan {
        let mut batches = Vec::new();
        if self.show_grid {
            for kind in TierKind::DRAW_ORDER {
                let tier = self.tier(kind);
                if !tier.visible {
                    continue;
                }
                let axes = [
                    (Axis::Vertical, self.viewport.x, f64::from(width)),
                    (Axis::Horizontal, self.viewport.y, f64::from(height)),
                ];
                for (axis, offset, extent) in axes {
                    let positions = visible_lines(offset, tier.spacing, extent);
                    log::trace!("{kind:?} {axis:?}: {} lines", positions.len());
                    batches.push(LineBatch {
                        tier: kind,
                        axis,
                        stroke: tier.stroke,
                        line_width: tier.line_width,
                        positions,
                    });
                }
            }
        }
        RenderPlan {
            background: self.background,
            batches,
        }
    }

    /// Redraws the whole surface: background fill, then minor lines, then major lines.
    ///
    /// Rendering an empty surface does nothing. Repeated calls with unchanged state
    /// produce identical pixels.
    pub fn render(&self, surface: &mut Surface) {
        let (width, height) = (surface.width(), surface.height());
        let Some(pixmap) = surface.pixmap_mut() else {
            return;
        };
        let plan = self.plan(width, height);
        pixmap.fill(plan.background.into());
        for batch in &plan.batches {
            stroke_batch(pixmap, batch);
        }
        log::debug!(
            "rendered {width}x{height} grid at ({}, {}), {} batches",
            self.viewport.x,
            self.viewport.y,
            plan.batches.len()
        );
    }
}

/// Strokes every line of a batch as one path spanning the full surface.
fn stroke_batch(pixmap: &mut Pixmap, batch: &LineBatch) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    let mut builder = PathBuilder::new();
    for &position in &batch.positions {
        let p = position as f32;
        match batch.axis {
            Axis::Vertical => {
                builder.move_to(p, 0.0);
                builder.line_to(p, height);
            }
            Axis::Horizontal => {
                builder.move_to(0.0, p);
                builder.line_to(width, p);
            }
        }
    }
    // No lines (or only degenerate ones) yields no path.
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    let c = batch.stroke;
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = true;
    let stroke = Stroke {
        width: batch.line_width as f32,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    fn channel_close(actual: Color, expected: Color) -> bool {
        let near = |a: u8, b: u8| a.abs_diff(b) <= 2;
        near(actual.r, expected.r) && near(actual.g, expected.g) && near(actual.b, expected.b)
    }

    #[test]
    fn test_first_visible_line_examples() {
        assert_eq!(first_visible_line(25.0, 20.0), 20.0);
        assert_eq!(first_visible_line(0.0, 20.0), 0.0);
        assert_eq!(first_visible_line(40.0, 20.0), 40.0);
        assert_eq!(first_visible_line(-5.0, 20.0), -20.0);
        assert_eq!(first_visible_line(-40.0, 20.0), -40.0);
    }

    #[test]
    fn test_visible_lines_worked_example() {
        // spacing 20, offset 25, extent 100: logical 20..=120 fall within offset + extent.
        let lines = visible_lines(25.0, 20.0, 100.0);
        assert_close(&lines, &[-5.0, 15.0, 35.0, 55.0, 75.0, 95.0]);
    }

    #[test]
    fn test_visible_lines_includes_both_edges_when_aligned() {
        let lines = visible_lines(0.0, 20.0, 100.0);
        assert_close(&lines, &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_visible_lines_negative_offset() {
        let lines = visible_lines(-30.0, 20.0, 50.0);
        assert_close(&lines, &[-10.0, 10.0, 30.0, 50.0]);
    }

    #[test]
    fn test_visible_lines_zero_extent() {
        assert_close(&visible_lines(25.0, 20.0, 0.0), &[-5.0]);
        assert_close(&visible_lines(40.0, 20.0, 0.0), &[0.0]);
    }

    #[test]
    fn test_visible_lines_rejects_degenerate_input() {
        assert!(visible_lines(0.0, 0.0, 100.0).is_empty());
        assert!(visible_lines(0.0, -5.0, 100.0).is_empty());
        assert!(visible_lines(0.0, 1e-12, 100.0).is_empty());
        assert!(visible_lines(f64::NAN, 20.0, 100.0).is_empty());
        assert!(visible_lines(0.0, 20.0, f64::INFINITY).is_empty());
        assert!(visible_lines(0.0, 20.0, -1.0).is_empty());
    }

    #[test]
    fn test_visible_lines_is_capped() {
        let lines = visible_lines(0.0, MIN_GRID_SPACING, 1e12);
        assert_eq!(lines.len(), MAX_LINES_PER_AXIS);
    }

    #[test]
    fn test_densest_grid_on_largest_surface_keeps_last_line() {
        let extent = f64::from(crate::constants::MAX_SURFACE_DIMENSION);
        let lines = visible_lines(0.1, MIN_GRID_SPACING, extent);
        assert!(lines.len() < MAX_LINES_PER_AXIS);
        assert_eq!(lines.len(), 65_537);
        let last = lines[lines.len() - 1];
        assert!((last - 16_383.9).abs() < 1e-9, "last line at {last}");
    }

    #[test]
    fn test_visible_lines_at_extreme_offset_terminates_without_duplicates() {
        let lines = visible_lines(1e300, 20.0, 100.0);
        assert!(lines.len() <= MAX_LINES_PER_AXIS);
        assert!(lines.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_panning_by_one_spacing_is_stationary() {
        let before = visible_lines(37.5, 20.0, 300.0);
        let after = visible_lines(57.5, 20.0, 300.0);
        assert_close(&before, &after);
    }

    #[test]
    fn test_plan_orders_minor_before_major() {
        let renderer = GridRenderer::new();
        let plan = renderer.plan(200, 100);
        let order: Vec<_> = plan.batches.iter().map(|b| (b.tier, b.axis)).collect();
        assert_eq!(
            order,
            vec![
                (TierKind::Minor, Axis::Vertical),
                (TierKind::Minor, Axis::Horizontal),
                (TierKind::Major, Axis::Vertical),
                (TierKind::Major, Axis::Horizontal),
            ]
        );
        assert_eq!(plan.batches[0].positions.len(), 11);
        assert_eq!(plan.batches[1].positions.len(), 6);
        assert_close(&plan.batches[2].positions, &[0.0, 100.0, 200.0]);
        assert_close(&plan.batches[3].positions, &[0.0, 100.0]);
    }

    #[test]
    fn test_plan_respects_visibility_switches() {
        let mut renderer = GridRenderer::new();
        renderer.set_visible(TierKind::Minor, false);
        let plan = renderer.plan(100, 100);
        assert!(plan.batches.iter().all(|b| b.tier == TierKind::Major));

        renderer.set_visible(TierKind::Minor, true);
        renderer.set_show_grid(false);
        let plan = renderer.plan(100, 100);
        assert!(plan.batches.is_empty());
        assert_eq!(plan.background, Color::WHITE);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut renderer = GridRenderer::new();
        assert_eq!(
            renderer.set_spacing(TierKind::Minor, 0.0),
            Err(GridError::InvalidSpacing(0.0))
        );
        assert_eq!(renderer.tier(TierKind::Minor).spacing, 20.0);
        assert!(renderer.set_line_width(TierKind::Major, -1.0).is_err());
        assert!(renderer.set_scale(0.0).is_err());
        assert!(renderer.set_viewport(f64::NAN, 0.0).is_err());
        assert_eq!(renderer.viewport(), Viewport::default());
    }

    #[test]
    fn test_scale_does_not_change_geometry() {
        let mut renderer = GridRenderer::new();
        let before = renderer.plan(120, 80);
        renderer.set_scale(7.0).unwrap();
        assert_eq!(renderer.plan(120, 80), before);
        assert_eq!(renderer.scale(), 7.0);
    }

    #[test]
    fn test_render_without_grid_fills_background_only() {
        let mut renderer = GridRenderer::new();
        renderer.set_background(Color::rgb(10, 20, 30));
        renderer.set_show_grid(false);
        let mut surface = Surface::new(50, 40).unwrap();
        renderer.render(&mut surface);

        for y in 0..40 {
            for x in 0..50 {
                assert_eq!(surface.pixel(x, y), Some(Color::rgb(10, 20, 30)));
            }
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut renderer = GridRenderer::new();
        renderer.set_viewport(13.25, -7.5).unwrap();
        let mut surface = Surface::new(120, 90).unwrap();
        renderer.render(&mut surface);
        let first = surface.data().to_vec();
        renderer.render(&mut surface);
        assert_eq!(surface.data(), &first[..]);
    }

    #[test]
    fn test_major_lines_draw_over_minor_lines() {
        let mut renderer = GridRenderer::new();
        renderer
            .set_tier(
                TierKind::Major,
                GridTier {
                    spacing: 20.0,
                    line_width: 4.0,
                    stroke: Color::rgb(200, 0, 0),
                    visible: true,
                },
            )
            .unwrap();
        renderer
            .set_tier(
                TierKind::Minor,
                GridTier {
                    spacing: 20.0,
                    line_width: 4.0,
                    stroke: Color::rgb(0, 0, 200),
                    visible: true,
                },
            )
            .unwrap();
        let mut surface = Surface::new(100, 100).unwrap();
        renderer.render(&mut surface);

        // Both tiers share x = 20; the major stroke covers pixels 18..22 completely.
        let shared = surface.pixel(19, 50).unwrap();
        assert!(channel_close(shared, Color::rgb(200, 0, 0)), "{shared:?}");
        // Midway between lines only the background shows.
        assert_eq!(surface.pixel(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_render_draws_default_minor_lines() {
        let renderer = GridRenderer::new();
        let mut surface = Surface::new(100, 100).unwrap();
        renderer.render(&mut surface);

        assert_eq!(surface.pixel(10, 10), Some(Color::WHITE));
        // A half-pixel minor stroke at x = 20 tints its neighbouring pixel column.
        let on_line = surface.pixel(19, 10).unwrap();
        assert_ne!(on_line, Color::WHITE);
    }

    #[test]
    fn test_render_on_empty_surface_is_noop() {
        let renderer = GridRenderer::new();
        let mut surface = Surface::empty();
        renderer.render(&mut surface);
        assert!(surface.is_empty());
    }

    proptest! {
        #[test]
        fn prop_first_line_brackets_offset(offset in -1e6f64..1e6, spacing in 0.25f64..500.0) {
            let first = first_visible_line(offset, spacing);
            prop_assert!(first <= offset);
            prop_assert!(offset < first + spacing);
        }

        #[test]
        fn prop_lines_are_ascending_evenly_spaced_and_cover_extent(
            offset in -1e6f64..1e6,
            spacing in 0.25f64..500.0,
            extent in 0.0f64..4000.0,
        ) {
            let lines = visible_lines(offset, spacing, extent);
            prop_assert!(!lines.is_empty());
            prop_assert!(lines[0] <= 0.0 && lines[0] > -spacing - 1e-9);
            for pair in lines.windows(2) {
                prop_assert!((pair[1] - pair[0] - spacing).abs() < 1e-6);
            }
            let last = lines[lines.len() - 1];
            prop_assert!(last <= extent + 1e-6);
            prop_assert!(last + spacing > extent - 1e-6);
        }

        #[test]
        fn prop_tiny_or_invalid_spacing_terminates(spacing in -1.0f64..0.25, extent in 0.0f64..1e9) {
            prop_assert!(visible_lines(0.0, spacing, extent).len() <= MAX_LINES_PER_AXIS);
        }
    }
}
