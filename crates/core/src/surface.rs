//! The drawing port a host implements for [`ParticleField`](crate::ParticleField).
//!
//! The trait mirrors the handful of 2D immediate-mode calls the field needs:
//! sizing, clearing, stroking a line, and filling glowing circles with a
//! linear gradient. It is object-safe so hosts can hand the field a
//! `&mut dyn Surface`.

use glam::DVec2;

use crate::color::Rgba;
use crate::gradient::GradientSpec;

/// Soft halo drawn around each node (a canvas shadow with zero offset).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    /// Blur radius in backing-buffer pixels.
    pub blur: f64,
}

pub trait Surface {
    /// Sets the backing buffer to `width` x `height` device pixels and the
    /// on-screen size to `css_width` x `css_height`.
    fn set_size(&mut self, width: u32, height: u32, css_width: f64, css_height: f64);

    /// Clears `[0, width] x [0, height]` to transparent and resets any glow
    /// left over from the previous frame.
    fn clear(&mut self, width: f64, height: f64);

    /// Strokes a straight segment. `color.a` is the final stroke alpha.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64);

    /// Sets the fill and glow for subsequent [`Surface::fill_circle`] calls.
    fn begin_nodes(&mut self, fill: &GradientSpec, glow: &Glow);

    fn fill_circle(&mut self, center: DVec2, radius: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSurface {
        lines: usize,
        circles: usize,
    }

    impl Surface for CountingSurface {
        fn set_size(&mut self, _: u32, _: u32, _: f64, _: f64) {}
        fn clear(&mut self, _: f64, _: f64) {}
        fn stroke_line(&mut self, _: DVec2, _: DVec2, _: Rgba, _: f64) {
            self.lines += 1;
        }
        fn begin_nodes(&mut self, _: &GradientSpec, _: &Glow) {}
        fn fill_circle(&mut self, _: DVec2, _: f64) {
            self.circles += 1;
        }
    }

    #[test]
    fn surface_is_object_safe() {
        let mut counting = CountingSurface::default();
        {
            let surface: &mut dyn Surface = &mut counting;
            surface.stroke_line(DVec2::ZERO, DVec2::ONE, Rgba::new(0, 0, 0, 1.0), 1.0);
            surface.fill_circle(DVec2::ONE, 2.0);
        }
        assert_eq!(counting.lines, 1);
        assert_eq!(counting.circles, 1);
    }

    #[test]
    fn boxed_surface_works() {
        let mut boxed: Box<dyn Surface> = Box::new(CountingSurface::default());
        boxed.clear(10.0, 10.0);
    }
}
