//! Linear gradient used to fill nodes.
//!
//! The gradient spans the canvas diagonal, so its endpoints depend on the
//! current backing size. [`compute_gradient`] is pure and is called once per
//! frame with the field's current dimensions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// One colour stop at `offset` in [0, 1] along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A linear gradient from `start` to `end` with ascending stops.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub start: DVec2,
    pub end: DVec2,
    pub stops: Vec<ColorStop>,
}

/// Builds the node gradient spanning (0, 0) to (width, height).
pub fn compute_gradient(width: f64, height: f64, stops: &[ColorStop]) -> GradientSpec {
    GradientSpec {
        start: DVec2::ZERO,
        end: DVec2::new(width, height),
        stops: stops.to_vec(),
    }
}

impl GradientSpec {
    /// Colour at `point`, projected onto the gradient axis.
    ///
    /// Points before the first stop take its colour, points past the last
    /// take the last. A degenerate axis (start == end) yields the last stop,
    /// which is what a canvas 2D context paints for a zero-length gradient.
    pub fn sample(&self, point: DVec2) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::new(0, 0, 0, 0.0);
        };
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        if len_sq == 0.0 {
            return last.color;
        }
        let t = (point - self.start).dot(axis) / len_sq;
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        self.stops
            .windows(2)
            .find(|pair| t <= pair[1].offset)
            .map(|pair| {
                let span = pair[1].offset - pair[0].offset;
                let local = if span > 0.0 {
                    (t - pair[0].offset) / span
                } else {
                    1.0
                };
                pair[0].color.lerp(pair[1].color, local)
            })
            .unwrap_or(last.color)
    }
}
