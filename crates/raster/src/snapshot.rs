//! PNG output of a [`RasterSurface`].
//!
//! Feature-gated behind `png` (default on) so that consumers who only need
//! the in-memory buffer do not pull in the `image` crate.

use std::path::Path;

use nodefield_core::FieldError;

use crate::surface::RasterSurface;

/// Writes the surface's backing buffer as an RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` for an empty surface, or
/// `FieldError::Io` on encode or write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), FieldError> {
    let (w, h) = (surface.width(), surface.height());
    if w == 0 || h == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    let img = image::RgbaImage::from_raw(w, h, surface.pixels().to_rgba8())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))
}
