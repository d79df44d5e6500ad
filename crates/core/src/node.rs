//! A single drifting point of the field.

use glam::DVec2;

use crate::config::FieldConfig;
use crate::prng::Xorshift64;

/// Position, velocity (pixels per frame), and radius, all in backing-buffer
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Node {
    /// Spawns a node uniformly inside `bounds` with a small symmetric
    /// velocity and a radius in `[radius_min, radius_min + radius_span) * dpr`.
    pub fn spawn(rng: &mut Xorshift64, bounds: DVec2, dpr: f64, config: &FieldConfig) -> Self {
        let pos = DVec2::new(rng.next_f64() * bounds.x, rng.next_f64() * bounds.y);
        let span = config.speed * dpr;
        let vel = DVec2::new(rng.next_centered(span), rng.next_centered(span));
        let radius = (rng.next_f64() * config.radius_span + config.radius_min) * dpr;
        Self { pos, vel, radius }
    }

    /// Moves by one frame of velocity, then reflects.
    ///
    /// The reflection test uses the position after the move, so a node that
    /// crosses an edge is drawn one frame outside `[0, bounds]` before it
    /// turns back.
    pub fn advance(&mut self, bounds: DVec2) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64, vx: f64, vy: f64) -> Node {
        Node {
            pos: DVec2::new(x, y),
            vel: DVec2::new(vx, vy),
            radius: 1.0,
        }
    }

    #[test]
    fn spawn_respects_bounds_speed_and_radius() {
        let config = FieldConfig::default();
        let mut rng = Xorshift64::new(3);
        let bounds = DVec2::new(640.0, 480.0);
        let dpr = 2.0;
        for _ in 0..2_000 {
            let n = Node::spawn(&mut rng, bounds, dpr, &config);
            assert!((0.0..640.0).contains(&n.pos.x));
            assert!((0.0..480.0).contains(&n.pos.y));
            assert!(n.vel.x.abs() <= 0.075 * dpr && n.vel.y.abs() <= 0.075 * dpr);
            assert!(n.radius >= 0.6 * dpr && n.radius < 1.8 * dpr, "radius {}", n.radius);
        }
    }

    #[test]
    fn advance_moves_by_velocity_inside_bounds() {
        let mut n = node(10.0, 20.0, 0.5, -0.25);
        n.advance(DVec2::new(100.0, 100.0));
        assert_eq!(n.pos, DVec2::new(10.5, 19.75));
        assert_eq!(n.vel, DVec2::new(0.5, -0.25));
    }

    #[test]
    fn reflection_is_one_step_late() {
        let bounds = DVec2::new(100.0, 100.0);
        let mut n = node(99.9, 50.0, 0.2, 0.0);
        n.advance(bounds);
        // Past the edge this frame, already turned around for the next one.
        assert!(n.pos.x > 100.0);
        assert!(n.vel.x < 0.0);
        n.advance(bounds);
        assert!(n.pos.x < 100.0);
        assert!(n.vel.x < 0.0);
    }

    #[test]
    fn landing_exactly_on_the_edge_does_not_reflect() {
        let mut n = node(0.5, 50.0, -0.5, 0.0);
        n.advance(DVec2::new(100.0, 100.0));
        assert_eq!(n.pos.x, 0.0);
        assert_eq!(n.vel.x, -0.5);
    }

    #[test]
    fn both_axes_reflect_in_a_corner() {
        let mut n = node(0.05, 0.05, -0.1, -0.1);
        n.advance(DVec2::new(10.0, 10.0));
        assert_eq!(n.vel, DVec2::new(0.1, 0.1));
    }
}
