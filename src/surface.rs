//! The canvas surface the grid is rasterised into.
//!
//! A surface is a premultiplied RGBA pixel buffer backed by [`tiny_skia::Pixmap`].
//! A zero-sized surface has no buffer at all, and every drawing operation on it is a no-op.

use crate::constants::MAX_SURFACE_DIMENSION;
use crate::error::GridError;
use crate::types::Color;
use tiny_skia::Pixmap;

/// A resizable 2D drawable region measured in device pixels.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    pixmap: Option<Pixmap>,
}

impl Surface {
    /// Creates a surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let mut surface = Self::empty();
        surface.resize(width, height)?;
        Ok(surface)
    }

    /// Creates a zero-sized surface.
    pub fn empty() -> Self {
        Self { pixmap: None }
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    /// True when the surface has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixmap.is_none()
    }

    /// Resizes the surface, discarding its contents when the size changes.
    ///
    /// A side of zero leaves the surface empty. A side above
    /// [`MAX_SURFACE_DIMENSION`] is rejected and also leaves the surface empty.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        if self.width() == width && self.height() == height {
            return Ok(());
        }
        self.pixmap = None;
        if width == 0 || height == 0 {
            return Ok(());
        }
        if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
            return Err(GridError::SurfaceTooLarge { width, height });
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(GridError::SurfaceTooLarge { width, height })?;
        self.pixmap = Some(pixmap);
        Ok(())
    }

    /// Underlying pixel buffer, if any.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Mutable access to the underlying pixel buffer, if any.
    pub fn pixmap_mut(&mut self) -> Option<&mut Pixmap> {
        self.pixmap.as_mut()
    }

    /// Premultiplied RGBA bytes, row-major. Empty for a zero-sized surface.
    pub fn data(&self) -> &[u8] {
        self.pixmap.as_ref().map_or(&[][..], |pixmap| pixmap.data())
    }

    /// Reads one pixel as a straight-alpha color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }
}
