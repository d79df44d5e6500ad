//! Point-in-time snapshot of the host window.

use serde::{Deserialize, Serialize};

/// Window size in CSS pixels, device pixel ratio, and the reduced-motion
/// preference, as read by the host at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
    pub reduced_motion: bool,
}

impl Viewport {
    /// Builds a normalised snapshot.
    ///
    /// Negative or non-finite sizes become 0. A ratio that is not a positive
    /// finite number becomes 1.0, matching a browser without
    /// `devicePixelRatio`.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width: non_negative(css_width),
            css_height: non_negative(css_height),
            device_pixel_ratio: if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
                device_pixel_ratio
            } else {
                1.0
            },
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Backing-buffer size: `floor(css * dpr)` per axis.
    pub fn backing_size(&self) -> (u32, u32) {
        let dpr = self.device_pixel_ratio;
        (
            (self.css_width * dpr).floor() as u32,
            (self.css_height * dpr).floor() as u32,
        )
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
