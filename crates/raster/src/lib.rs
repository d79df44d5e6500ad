#![deny(unsafe_code)]
//! CPU rendering for nodefield.
//!
//! [`RasterSurface`] implements the core `Surface` port over an in-memory
//! pixel buffer so a `ParticleField` can be drawn without a browser. The CLI
//! uses it to write PNG snapshots; tests use it to check what actually lands
//! on pixels.

pub mod pixel;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::PixelBuffer;
pub use surface::RasterSurface;
