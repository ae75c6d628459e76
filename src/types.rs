//! Core data types for the grid widget.
//!
//! This module defines the value types shared by the renderer, the layout coordinator
//! and the configuration layer: colors, the viewport offset and the grid tiers.

use crate::constants;
use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGBA color with 8 bits per channel (straight, not premultiplied, alpha).
///
/// Serialized as a `#rrggbb` or `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque light gray (211, 211, 211).
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    /// Opaque gray (128, 128, 128).
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(text: &str) -> Result<Self, GridError> {
        let invalid = || GridError::InvalidColor(text.to_string());
        let trimmed = text.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(color: Color) -> Self {
        tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Top-left corner of the visible window into the unbounded logical plane.
///
/// Offsets are unbounded; any finite value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal offset in logical units
    pub x: f64,
    /// Vertical offset in logical units
    pub y: f64,
}

impl Viewport {
    /// Creates a viewport, rejecting NaN and infinite offsets.
    pub fn new(x: f64, y: f64) -> Result<Self, GridError> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(GridError::NonFiniteOffset { x, y })
        }
    }
}

/// Which of the two grid-line groups a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierKind {
    /// Fine lines, drawn first
    Minor,
    /// Coarse lines, drawn on top of the minor tier
    Major,
}

impl TierKind {
    /// Tiers in drawing order.
    pub const DRAW_ORDER: [TierKind; 2] = [TierKind::Minor, TierKind::Major];
}

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// A full-height line at a device X coordinate
    Vertical,
    /// A full-width line at a device Y coordinate
    Horizontal,
}

/// Appearance and spacing of one grid tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTier {
    /// Logical units between adjacent lines
    pub spacing: f64,
    /// Stroke width in device pixels
    pub line_width: f64,
    /// Stroke color
    pub stroke: Color,
    /// Whether this tier is drawn
    pub visible: bool,
}

impl GridTier {
    /// Default minor tier: every [`constants::GRID_SPACING`] units, thin light-gray lines.
    pub fn minor() -> Self {
        Self {
            spacing: constants::GRID_SPACING,
            line_width: constants::MINOR_LINE_WIDTH,
            stroke: Color::LIGHT_GRAY,
            visible: true,
        }
    }

    /// Default major tier: every `GRID_SPACING * MAJOR_INTERVAL` units, gray lines.
    pub fn major() -> Self {
        Self {
            spacing: constants::GRID_SPACING * f64::from(constants::MAJOR_INTERVAL),
            line_width: constants::MAJOR_LINE_WIDTH,
            stroke: Color::GRAY,
            visible: true,
        }
    }

    /// Checks spacing and line width.
    pub fn validate(&self) -> Result<(), GridError> {
        validate_spacing(self.spacing)?;
        validate_line_width(self.line_width)
    }
}

/// Rejects non-finite spacing and spacing below [`constants::MIN_GRID_SPACING`].
pub fn validate_spacing(spacing: f64) -> Result<f64, GridError> {
    if spacing.is_finite() && spacing >= constants::MIN_GRID_SPACING {
        Ok(spacing)
    } else {
        Err(GridError::InvalidSpacing(spacing))
    }
}

/// Rejects non-finite and non-positive line widths.
pub fn validate_line_width(width: f64) -> Result<(), GridError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidLineWidth(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#d3d3d3").unwrap();
        assert_eq!(color, Color::LIGHT_GRAY);
        assert_eq!(color.to_hex(), "#d3d3d3");

        let translucent = Color::from_hex("80808040").unwrap();
        assert_eq!(translucent, Color::rgba(128, 128, 128, 64));
        assert_eq!(translucent.to_hex(), "#80808040");
    }

    #[test]
    fn test_color_rejects_malformed_hex() {
        assert!(matches!(Color::from_hex("#fff"), Err(GridError::InvalidColor(_))));
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ééé").is_err());
        assert!(Color::from_hex("##ffffff").is_err());
        assert!(Color::from_hex("#ffffff#").is_err());
        assert_eq!(Color::from_hex("ffffff"), Ok(Color::WHITE));
    }

    #[test]
    fn test_color_serializes_as_string() {
        let json = serde_json::to_string(&Color::GRAY).unwrap();
        assert_eq!(json, "\"#808080\"");
        let back: Color = serde_json::from_str("\"#ffffff\"").unwrap();
        assert_eq!(back, Color::WHITE);
    }

    #[test]
    fn test_viewport_rejects_non_finite() {
        assert!(Viewport::new(-1e12, 3.5).is_ok());
        assert!(matches!(
            Viewport::new(f64::NAN, 0.0),
            Err(GridError::NonFiniteOffset { .. })
        ));
        assert!(Viewport::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_tiers() {
        let minor = GridTier::minor();
        let major = GridTier::major();
        assert_eq!(minor.spacing, 20.0);
        assert_eq!(major.spacing, 100.0);
        assert_eq!(minor.line_width, 0.5);
        assert_eq!(major.line_width, 1.0);
        assert!(minor.validate().is_ok());
        assert!(major.validate().is_ok());
    }

    #[test]
    fn test_spacing_guard() {
        assert!(validate_spacing(0.0).is_err());
        assert!(validate_spacing(-20.0).is_err());
        assert!(validate_spacing(1e-9).is_err());
        assert!(validate_spacing(f64::NAN).is_err());
        assert_eq!(validate_spacing(0.25), Ok(0.25));
    }
}
