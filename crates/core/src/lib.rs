#![deny(unsafe_code)]
//! Core types for the nodefield particle background.
//!
//! Provides [`ParticleField`] (the animated node field), its [`FieldConfig`]
//! and [`Viewport`] inputs, the [`Surface`] and [`FrameScheduler`] ports a
//! host implements, headless [`RecordingSurface`] / [`ManualScheduler`]
//! adapters, the pure density and gradient formulas, the `Xorshift64` PRNG,
//! and the reproducible [`Scene`].

pub mod color;
pub mod config;
pub mod density;
pub mod error;
pub mod field;
pub mod gradient;
pub mod node;
pub mod params;
pub mod prng;
pub mod recording;
pub mod scene;
pub mod scheduler;
pub mod surface;
pub mod viewport;

pub use color::Rgba;
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::ParticleField;
pub use gradient::{compute_gradient, ColorStop, GradientSpec};
pub use node::Node;
pub use prng::Xorshift64;
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::Scene;
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{Glow, Surface};
pub use viewport::Viewport;
