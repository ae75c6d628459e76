//! Shared application-wide constants.
//! Centralizes the documented defaults of the grid widget and the numeric guards
//! used by the renderer.

// Grid tiers
/// Default base spacing (in logical units) between minor grid lines.
pub const GRID_SPACING: f64 = 20.0;
/// Default number of minor cells between major grid lines.
pub const MAJOR_INTERVAL: u32 = 5;
/// Default minor line stroke width (in device pixels).
pub const MINOR_LINE_WIDTH: f64 = 0.5;
/// Default major line stroke width (in device pixels).
pub const MAJOR_LINE_WIDTH: f64 = 1.0;
/// Scale multiplier used by the composite widget's default wiring.
pub const GRID_SCALE: f64 = 3.0;

// Guards
/// Smallest accepted grid spacing. Anything below is rejected at configuration time.
pub const MIN_GRID_SPACING: f64 = 0.25;
/// Upper bound on the number of lines emitted per axis per tier in one render.
///
/// Covers the densest accepted grid on the largest surface, plus the leading line
/// before device zero and the trailing line on the far edge.
pub const MAX_LINES_PER_AXIS: usize = (MAX_SURFACE_DIMENSION as f64 / MIN_GRID_SPACING) as usize + 2;
/// Largest surface side (in device pixels) the coordinator will allocate.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

// Layout
/// Default oversize factor applied to the content layer relative to the visible bounds.
pub const OVERSIZE_FACTOR: f64 = 3.0;

// Auto-pan
/// Tick interval of the drifting pan the composite widget starts with.
pub const DRIFT_INTERVAL_MS: u64 = 1_000;
/// Offset increment per drift tick (in logical units).
pub const DRIFT_STEP: f64 = 16.0;
/// Tick interval of the smooth pan (roughly one tick per frame at 60 Hz).
pub const SMOOTH_INTERVAL_MS: u64 = 16;
/// Offset increment per smooth tick (in logical units).
pub const SMOOTH_STEP: f64 = 1.0;
