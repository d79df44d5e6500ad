//! CPU implementation of the [`Surface`] port.
//!
//! Lines and circles use distance-based coverage for a one-pixel soft edge.
//! The canvas shadow-blur glow is approximated by a radial halo whose alpha
//! falls off quadratically over `blur` pixels outside the circle.

use glam::DVec2;
use nodefield_core::{FieldError, GradientSpec, Glow, Rgba, Surface};
use tracing::trace;

use crate::pixel::PixelBuffer;

pub struct RasterSurface {
    pixels: PixelBuffer,
    css_size: (f64, f64),
    node_style: Option<(GradientSpec, Glow)>,
}

impl RasterSurface {
    /// Creates a transparent surface of `width` x `height` device pixels.
    ///
    /// Returns `FieldError::InvalidDimensions` if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        Ok(Self {
            pixels: PixelBuffer::new(width, height),
            css_size: (width as f64, height as f64),
            node_style: None,
        })
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// On-screen size last set through [`Surface::set_size`].
    pub fn css_size(&self) -> (f64, f64) {
        self.css_size
    }

    /// Pixel-centre bounding box of a disc, clamped to the buffer.
    fn bounds(&self, center: DVec2, reach: f64) -> Option<(i64, i64, i64, i64)> {
        let x0 = ((center.x - reach).floor() as i64).max(0);
        let y0 = ((center.y - reach).floor() as i64).max(0);
        let x1 = ((center.x + reach).ceil() as i64).min(self.width() as i64 - 1);
        let y1 = ((center.y + reach).ceil() as i64).min(self.height() as i64 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }
}

impl Surface for RasterSurface {
    fn set_size(&mut self, width: u32, height: u32, css_width: f64, css_height: f64) {
        if (width, height) != (self.width(), self.height()) {
            self.pixels.resize(width, height);
        }
        self.css_size = (css_width, css_height);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.pixels
            .clear_rect(width.max(0.0).ceil() as u32, height.max(0.0).ceil() as u32);
        self.node_style = None;
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        let half = width.max(0.0) / 2.0;
        let mid = (from + to) / 2.0;
        let reach = from.distance(to) / 2.0 + half + 1.0;
        let Some((x0, y0, x1, y1)) = self.bounds(mid, reach) else {
            return;
        };
        let seg = to - from;
        let len_sq = seg.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + seg * t);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.pixels.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn begin_nodes(&mut self, fill: &GradientSpec, glow: &Glow) {
        self.node_style = Some((fill.clone(), *glow));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) {
        let Some((fill, glow)) = &self.node_style else {
            trace!("fill_circle before begin_nodes, skipped");
            return;
        };
        let blur = glow.blur.max(0.0);
        let Some((x0, y0, x1, y1)) = self.bounds(center, radius + blur + 1.0) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = p.distance(center);
                if blur > 0.0 && d > radius && d < radius + blur {
                    let falloff = 1.0 - (d - radius) / blur;
                    self.pixels.blend(x, y, glow.color, falloff * falloff);
                }
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.pixels.blend(x, y, fill.sample(p), coverage);
                }
            }
        }
    }
}
