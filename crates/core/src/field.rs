//! The animated node field.
//!
//! A [`ParticleField`] owns everything the animation needs: config, the
//! current viewport snapshot and backing size, the node set, its PRNG, and
//! the handle of the pending frame. Hosts drive it through four calls:
//!
//! - [`ParticleField::start`] once the page is ready,
//! - [`ParticleField::tick`] from the frame callback,
//! - [`ParticleField::resize`] from the window resize handler,
//! - [`ParticleField::stop`] when the page is hidden or torn down.
//!
//! Nothing here touches an event system; the browser adapter lives in the
//! wasm crate.

use glam::DVec2;
use tracing::{debug, trace};

use crate::config::FieldConfig;
use crate::density::{connection_threshold, falloff_alpha, node_count};
use crate::error::FieldError;
use crate::gradient::compute_gradient;
use crate::node::Node;
use crate::prng::Xorshift64;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{Glow, Surface};
use crate::viewport::Viewport;

#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    width: u32,
    height: u32,
    nodes: Vec<Node>,
    rng: Xorshift64,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl ParticleField {
    /// Creates a field sized for `viewport` and spawns its nodes.
    ///
    /// Does not touch any surface or schedule anything; call
    /// [`ParticleField::size_surface`] and [`ParticleField::start`] next.
    ///
    /// Returns `FieldError::InvalidConfig` if `config` fails validation.
    pub fn new(config: FieldConfig, viewport: Viewport, seed: u64) -> Result<Self, FieldError> {
        config.validate()?;
        let mut field = Self {
            config,
            viewport,
            width: 0,
            height: 0,
            nodes: Vec::new(),
            rng: Xorshift64::new(seed),
            pending: None,
            frames: 0,
        };
        field.apply_viewport(viewport);
        Ok(field)
    }

    /// Pushes the current backing and CSS size to `surface`.
    pub fn size_surface(&self, surface: &mut dyn Surface) {
        surface.set_size(
            self.width,
            self.height,
            self.viewport.css_width,
            self.viewport.css_height,
        );
    }

    /// Requests the first frame. No-op if a frame is already pending.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), FieldError> {
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame()?);
            debug!(nodes = self.nodes.len(), "particle field started");
        }
        Ok(())
    }

    /// Cancels the pending frame, if any.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            debug!(frames = self.frames, "particle field stopped");
        }
    }

    /// Adopts a new viewport: cancel, resize, regenerate, restart.
    ///
    /// The pending frame is cancelled before the surface or node set change
    /// so no frame can draw a node set against a buffer of another size.
    /// All nodes are discarded and respawned with fresh randomness, even
    /// when `viewport` equals the current one.
    pub fn resize(
        &mut self,
        viewport: Viewport,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<(), FieldError> {
        let was_running = self.is_running();
        self.stop(scheduler);
        self.apply_viewport(viewport);
        self.size_surface(surface);
        if was_running {
            self.start(scheduler)?;
        }
        Ok(())
    }

    /// Frame callback: draws one frame and schedules the next.
    ///
    /// A tick that arrives while no frame is pending (the host fired a frame
    /// that was already cancelled) is ignored.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<(), FieldError> {
        if self.pending.take().is_none() {
            trace!("ignoring tick with no pending frame");
            return Ok(());
        }
        self.step(surface);
        self.pending = Some(scheduler.request_frame()?);
        Ok(())
    }

    /// Advances every node one frame and draws the result.
    pub fn step(&mut self, surface: &mut dyn Surface) {
        let (w, h) = (self.width as f64, self.height as f64);
        surface.clear(w, h);

        let bounds = DVec2::new(w, h);
        for node in &mut self.nodes {
            node.advance(bounds);
        }

        self.draw_connections(surface);
        self.draw_nodes(surface);
        self.frames += 1;
        trace!(frame = self.frames, nodes = self.nodes.len(), "frame drawn");
    }

    /// Every unordered pair `(i, j)`, `i < j`, closer than the threshold,
    /// with its distance. O(n²) in the node count.
    pub fn connections(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let threshold = self.threshold();
        let nodes = &self.nodes;
        (0..nodes.len()).flat_map(move |i| {
            ((i + 1)..nodes.len()).filter_map(move |j| {
                let d = nodes[i].pos.distance(nodes[j].pos);
                (d < threshold).then_some((i, j, d))
            })
        })
    }

    /// Current node set, in spawn order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of live nodes; fixed between resizes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Connection threshold in backing pixels for the current size.
    pub fn threshold(&self) -> f64 {
        connection_threshold(
            self.width as f64,
            self.height as f64,
            self.config.connection_ratio,
        )
    }

    /// Backing-buffer size in device pixels, `floor(css * dpr)`.
    pub fn backing_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Viewport the node set was last sized for.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The validated config this field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// `true` while a frame is pending with the scheduler.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames drawn since construction, across stops and resizes.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (w, h) = viewport.backing_size();
        self.width = w;
        self.height = h;

        let base = self.config.base_for(viewport.reduced_motion);
        let count = node_count(base, w, h, self.config.reference_area());
        let bounds = DVec2::new(w as f64, h as f64);
        let dpr = viewport.device_pixel_ratio;
        let config = &self.config;
        let rng = &mut self.rng;
        self.nodes = (0..count)
            .map(|_| Node::spawn(rng, bounds, dpr, config))
            .collect();

        debug!(
            width = w,
            height = h,
            dpr,
            reduced_motion = viewport.reduced_motion,
            nodes = count,
            threshold = self.threshold(),
            "particle field sized"
        );
    }

    fn draw_connections(&self, surface: &mut dyn Surface) {
        let threshold = self.threshold();
        let width = self.config.line_width * self.viewport.device_pixel_ratio;
        for (i, j, d) in self.connections() {
            let alpha = falloff_alpha(d, threshold, self.config.line_alpha);
            surface.stroke_line(
                self.nodes[i].pos,
                self.nodes[j].pos,
                self.config.line_color.with_alpha(alpha),
                width,
            );
        }
    }

    fn draw_nodes(&self, surface: &mut dyn Surface) {
        if self.nodes.is_empty() {
            return;
        }
        let fill = compute_gradient(
            self.width as f64,
            self.height as f64,
            &self.config.gradient,
        );
        let glow = Glow {
            color: self.config.glow_color,
            blur: self.config.glow_blur * self.viewport.device_pixel_ratio,
        };
        surface.begin_nodes(&fill, &glow);
        for node in &self.nodes {
            surface.fill_circle(node.pos, node.radius);
        }
    }
}
