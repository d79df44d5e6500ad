//! [`Surface`] over an `HtmlCanvasElement` and its 2D context.

use glam::DVec2;
use nodefield_core::{FieldError, GradientSpec, Glow, Rgba, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks up `#id` and acquires its 2D context.
    ///
    /// Returns `FieldError::SurfaceUnavailable` if the element is missing,
    /// is not a canvas, or has no 2D context.
    pub fn from_document(document: &Document, id: &str) -> Result<Self, FieldError> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| FieldError::SurfaceUnavailable(format!("no #{id} element")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::SurfaceUnavailable(format!("#{id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| FieldError::SurfaceUnavailable(format!("getContext failed: {e:?}")))?
            .ok_or_else(|| FieldError::SurfaceUnavailable("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::SurfaceUnavailable("unexpected context type".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, width: u32, height: u32, css_width: f64, css_height: f64) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{css_width}px")).ok();
        style.set_property("height", &format!("{css_height}px")).ok();
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn begin_nodes(&mut self, fill: &GradientSpec, glow: &Glow) {
        let gradient = self
            .ctx
            .create_linear_gradient(fill.start.x, fill.start.y, fill.end.x, fill.end.y);
        for stop in &fill.stops {
            gradient
                .add_color_stop(stop.offset as f32, &stop.color.to_css())
                .ok();
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.set_shadow_color(&glow.color.to_css());
        self.ctx.set_shadow_blur(glow.blur);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}
