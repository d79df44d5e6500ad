//! Straight-alpha pixel buffer with source-over blending.
//!
//! Always available (no feature gate) so both the PNG snapshot path and any
//! in-memory consumer share the same conversion to RGBA8.

use nodefield_core::Rgba;

/// Float RGBA pixels, row-major, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<[f64; 4]>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates to a new size, discarding contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Clears the pixels inside `[0, w) x [0, h)` to transparent.
    pub fn clear_rect(&mut self, w: u32, h: u32) {
        let w = w.min(self.width) as usize;
        let h = h.min(self.height) as usize;
        let stride = self.width as usize;
        for row in self.data.chunks_mut(stride.max(1)).take(h) {
            row[..w].fill([0.0; 4]);
        }
    }

    /// Source-over composite of `color` at `coverage` (0..=1) onto (x, y).
    /// Out-of-range coordinates are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgba, coverage: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let [sr, sg, sb, _] = color.to_unit();
        let idx = y as usize * self.width as usize + x as usize;
        let [dr, dg, db, da] = self.data[idx];

        let keep = da * (1.0 - sa);
        let out_a = sa + keep;
        let mix = |s: f64, d: f64| (s * sa + d * keep) / out_a;
        self.data[idx] = [mix(sr, dr), mix(sg, dg), mix(sb, db), out_a];
    }

    /// RGBA8 at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(to_rgba8(self.data[y as usize * self.width as usize + x as usize]))
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|&px| to_rgba8(px)).collect()
    }
}

fn to_rgba8(px: [f64; 4]) -> [u8; 4] {
    px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
