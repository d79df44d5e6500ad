//! A [`Surface`] that records draw calls instead of drawing.

use glam::DVec2;

use crate::color::Rgba;
use crate::gradient::GradientSpec;
use crate::surface::{Glow, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetSize {
        width: u32,
        height: u32,
        css_width: f64,
        css_height: f64,
    },
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
    },
    BeginNodes {
        fill: GradientSpec,
        glow: Glow,
    },
    Circle {
        center: DVec2,
        radius: f64,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns everything recorded so far and empties the log.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn set_size(&mut self, width: u32, height: u32, css_width: f64, css_height: f64) {
        self.commands.push(DrawCommand::SetSize {
            width,
            height,
            css_width,
            css_height,
        });
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn begin_nodes(&mut self, fill: &GradientSpec, glow: &Glow) {
        self.commands.push(DrawCommand::BeginNodes {
            fill: fill.clone(),
            glow: *glow,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }
}
