//! Visual and density parameters for a [`ParticleField`](crate::ParticleField).
//!
//! Defaults reproduce the portfolio background: 70 nodes per 1920x1080 of
//! backing pixels (35 under reduced motion), connections within 8% of the
//! shorter side, cyan lines, and a cyan/violet diagonal gradient with a soft
//! glow. Pixel-valued settings (`line_width`, `glow_blur`, speed, radius) are
//! in CSS pixels and get multiplied by the device pixel ratio.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::color::Rgba;
use crate::error::FieldError;
use crate::gradient::ColorStop;
use crate::params::{param_bool, param_f64, param_usize};

const DEFAULT_BASE_COUNT: usize = 70;
const DEFAULT_REDUCED_BASE_COUNT: usize = 35;
const DEFAULT_REFERENCE_WIDTH: f64 = 1920.0;
const DEFAULT_REFERENCE_HEIGHT: f64 = 1080.0;
const DEFAULT_CONNECTION_RATIO: f64 = 0.08;
const DEFAULT_SPEED: f64 = 0.15;
const DEFAULT_RADIUS_MIN: f64 = 0.6;
const DEFAULT_RADIUS_SPAN: f64 = 1.2;
const DEFAULT_LINE_ALPHA: f64 = 0.15;
const DEFAULT_LINE_WIDTH: f64 = 1.0;
const DEFAULT_GLOW_BLUR: f64 = 10.0;

/// Largest `base_count` / `reduced_base_count` accepted by
/// [`FieldConfig::validate`].
pub const MAX_BASE_COUNT: usize = 1_000;

const CYAN: Rgba = Rgba::new(0, 229, 255, 1.0);

/// Tunables for node density, motion, and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Nodes per reference area under normal motion.
    pub base_count: usize,
    /// Nodes per reference area when the user prefers reduced motion.
    pub reduced_base_count: usize,
    /// When false, the reduced-motion preference is ignored.
    pub respect_reduced_motion: bool,
    pub reference_width: f64,
    pub reference_height: f64,
    /// Connection threshold as a fraction of `min(width, height)`.
    pub connection_ratio: f64,
    /// Full span of each velocity component, centred on zero.
    pub speed: f64,
    pub radius_min: f64,
    pub radius_span: f64,
    /// Line colour; its alpha is ignored in favour of `line_alpha`.
    pub line_color: Rgba,
    /// Line alpha at distance zero.
    pub line_alpha: f64,
    pub line_width: f64,
    pub glow_color: Rgba,
    pub glow_blur: f64,
    pub gradient: Vec<ColorStop>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_count: DEFAULT_BASE_COUNT,
            reduced_base_count: DEFAULT_REDUCED_BASE_COUNT,
            respect_reduced_motion: true,
            reference_width: DEFAULT_REFERENCE_WIDTH,
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            connection_ratio: DEFAULT_CONNECTION_RATIO,
            speed: DEFAULT_SPEED,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_span: DEFAULT_RADIUS_SPAN,
            line_color: CYAN,
            line_alpha: DEFAULT_LINE_ALPHA,
            line_width: DEFAULT_LINE_WIDTH,
            glow_color: CYAN.with_alpha(0.35),
            glow_blur: DEFAULT_GLOW_BLUR,
            gradient: vec![
                ColorStop::new(0.0, CYAN.with_alpha(0.9)),
                ColorStop::new(0.5, Rgba::new(124, 77, 255, 0.9)),
                ColorStop::new(1.0, Rgba::new(0, 209, 255, 0.9)),
            ],
        }
    }
}

impl FieldConfig {
    /// Applies scalar overrides from a JSON object on top of the defaults.
    ///
    /// Unknown keys and wrong types are ignored. Colours may be given as
    /// `"#rrggbb"` for `line_color` and `glow_color`; the default alpha of
    /// each is kept. Call [`FieldConfig::validate`] on the result.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let d = Self::default();
        let color = |key: &str, fallback: Rgba| match params.get(key).and_then(Value::as_str) {
            Some(hex) => Rgba::from_hex(hex, fallback.a),
            None => Ok(fallback),
        };
        Ok(Self {
            base_count: param_usize(params, "base_count", d.base_count),
            reduced_base_count: param_usize(params, "reduced_base_count", d.reduced_base_count),
            respect_reduced_motion: param_bool(
                params,
                "respect_reduced_motion",
                d.respect_reduced_motion,
            ),
            reference_width: param_f64(params, "reference_width", d.reference_width),
            reference_height: param_f64(params, "reference_height", d.reference_height),
            connection_ratio: param_f64(params, "connection_ratio", d.connection_ratio),
            speed: param_f64(params, "speed", d.speed),
            radius_min: param_f64(params, "radius_min", d.radius_min),
            radius_span: param_f64(params, "radius_span", d.radius_span),
            line_color: color("line_color", d.line_color)?,
            line_alpha: param_f64(params, "line_alpha", d.line_alpha),
            line_width: param_f64(params, "line_width", d.line_width),
            glow_color: color("glow_color", d.glow_color)?,
            glow_blur: param_f64(params, "glow_blur", d.glow_blur),
            gradient: d.gradient,
        })
    }

    /// Area against which backing-buffer area is normalised.
    pub fn reference_area(&self) -> f64 {
        self.reference_width * self.reference_height
    }

    /// Base node count for the given reduced-motion preference.
    pub fn base_for(&self, reduced_motion: bool) -> usize {
        if reduced_motion && self.respect_reduced_motion {
            self.reduced_base_count
        } else {
            self.base_count
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        fn positive(name: &str, v: f64) -> Result<(), FieldError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(FieldError::InvalidConfig(format!("{name} must be > 0, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> Result<(), FieldError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(FieldError::InvalidConfig(format!("{name} must be >= 0, got {v}")))
            }
        }
        fn unit(name: &str, v: f64) -> Result<(), FieldError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(FieldError::InvalidConfig(format!("{name} must be in [0, 1], got {v}")))
            }
        }

        for (name, count) in [
            ("base_count", self.base_count),
            ("reduced_base_count", self.reduced_base_count),
        ] {
            if count > MAX_BASE_COUNT {
                return Err(FieldError::InvalidConfig(format!(
                    "{name} must be <= {MAX_BASE_COUNT}, got {count}"
                )));
            }
        }
        positive("reference_width", self.reference_width)?;
        positive("reference_height", self.reference_height)?;
        non_negative("connection_ratio", self.connection_ratio)?;
        non_negative("speed", self.speed)?;
        non_negative("radius_min", self.radius_min)?;
        non_negative("radius_span", self.radius_span)?;
        non_negative("line_width", self.line_width)?;
        non_negative("glow_blur", self.glow_blur)?;
        unit("line_alpha", self.line_alpha)?;
        unit("glow_color.a", self.glow_color.a)?;

        if self.gradient.is_empty() {
            return Err(FieldError::InvalidConfig("gradient needs at least one stop".into()));
        }
        for stop in &self.gradient {
            unit("gradient offset", stop.offset)?;
            unit("gradient alpha", stop.color.a)?;
        }
        if self.gradient.windows(2).any(|w| w[1].offset < w[0].offset) {
            return Err(FieldError::InvalidConfig(
                "gradient offsets must be ascending".into(),
            ));
        }
        Ok(())
    }

    /// Schema of every scalar override accepted by [`FieldConfig::from_json`].
    pub fn param_schema() -> Value {
        json!({
            "base_count": {
                "type": "integer",
                "default": DEFAULT_BASE_COUNT,
                "min": 0,
                "max": MAX_BASE_COUNT,
                "description": "Nodes per reference area"
            },
            "reduced_base_count": {
                "type": "integer",
                "default": DEFAULT_REDUCED_BASE_COUNT,
                "min": 0,
                "max": MAX_BASE_COUNT,
                "description": "Nodes per reference area under reduced motion"
            },
            "respect_reduced_motion": {
                "type": "boolean",
                "default": true,
                "description": "Use reduced_base_count when the user prefers reduced motion"
            },
            "reference_width": {
                "type": "number",
                "default": DEFAULT_REFERENCE_WIDTH,
                "description": "Width of the reference area in device pixels"
            },
            "reference_height": {
                "type": "number",
                "default": DEFAULT_REFERENCE_HEIGHT,
                "description": "Height of the reference area in device pixels"
            },
            "connection_ratio": {
                "type": "number",
                "default": DEFAULT_CONNECTION_RATIO,
                "min": 0.0,
                "max": 1.0,
                "description": "Connection threshold as a fraction of the shorter canvas side"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": 5.0,
                "description": "Velocity span per axis in CSS pixels per frame"
            },
            "radius_min": {
                "type": "number",
                "default": DEFAULT_RADIUS_MIN,
                "min": 0.0,
                "description": "Smallest node radius in CSS pixels"
            },
            "radius_span": {
                "type": "number",
                "default": DEFAULT_RADIUS_SPAN,
                "min": 0.0,
                "description": "Random radius added on top of radius_min"
            },
            "line_color": {
                "type": "string",
                "default": "#00e5ff",
                "description": "Connection colour as #rrggbb"
            },
            "line_alpha": {
                "type": "number",
                "default": DEFAULT_LINE_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Connection alpha at distance zero"
            },
            "line_width": {
                "type": "number",
                "default": DEFAULT_LINE_WIDTH,
                "min": 0.0,
                "description": "Connection width in CSS pixels"
            },
            "glow_color": {
                "type": "string",
                "default": "#00e5ff",
                "description": "Node glow colour as #rrggbb"
            },
            "glow_blur": {
                "type": "number",
                "default": DEFAULT_GLOW_BLUR,
                "min": 0.0,
                "description": "Node glow blur radius in CSS pixels"
            }
        })
    }
}
