//! Scrolling obstacles: spawning, movement, culling, and collision.

use crate::color::Rgba;
use crate::command::DrawCall;
use crate::geometry;
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;

const OBSTACLE_COLOR: Rgba = Rgba::RED;
const OBSTACLE_SEGMENTS: u32 = 20;

/// A circular obstacle moving left at a constant per-tick speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
}

impl Obstacle {
    /// Draws a new obstacle at `config.spawn_x` with random lane, radius, and speed.
    pub fn spawn(config: &GameConfig, rng: &mut Xorshift64) -> Self {
        let [y_lo, y_hi] = config.lane_range;
        let [r_lo, r_hi] = config.radius_range;
        let [s_lo, s_hi] = config.speed_range;
        Self {
            x: config.spawn_x,
            y: rng.next_range(y_lo, y_hi),
            radius: rng.next_range(r_lo, r_hi),
            speed: rng.next_range(s_lo, s_hi),
        }
    }

    /// Moves one tick to the left.
    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    /// Whether the obstacle's right edge has reached `left_boundary`.
    pub fn is_past(&self, left_boundary: f32) -> bool {
        self.x + self.radius <= left_boundary
    }

    /// Circle-circle overlap test against a body at `center` with `radius`.
    ///
    /// Touching circles (distance equal to the radius sum) do not collide.
    pub fn collides_with(&self, center: [f32; 2], radius: f32) -> bool {
        let dx = center[0] - self.x;
        let dy = center[1] - self.y;
        (dx * dx + dy * dy).sqrt() < radius + self.radius
    }

    pub fn draw_call(&self) -> DrawCall {
        DrawCall::triangles_2d(
            geometry::circle(self.x, self.y, self.radius, OBSTACLE_SEGMENTS),
            OBSTACLE_COLOR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, radius: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            radius,
            speed: 0.02,
        }
    }

    #[test]
    fn spawn_uses_configured_x_and_ranges() {
        let config = GameConfig::default();
        let mut rng = Xorshift64::new(42);
        for _ in 0..1000 {
            let o = Obstacle::spawn(&config, &mut rng);
            assert_eq!(o.x, 1.2);
            assert!((-0.3_f32..1.3).contains(&o.y), "lane {}", o.y);
            assert_eq!(o.radius, 0.05, "degenerate radius range yields its min");
            assert!((0.01_f32..0.03).contains(&o.speed), "speed {}", o.speed);
        }
    }

    #[test]
    fn spawn_draws_radius_from_configured_range() {
        let config = GameConfig {
            radius_range: [0.02, 0.1],
            ..GameConfig::default()
        };
        let mut rng = Xorshift64::new(3);
        let radii: Vec<f32> = (0..100)
            .map(|_| Obstacle::spawn(&config, &mut rng).radius)
            .collect();
        assert!(radii.iter().all(|r| (0.02_f32..0.1).contains(r)));
        assert!(radii.windows(2).any(|w| w[0] != w[1]), "radii never varied");
    }

    #[test]
    fn advance_moves_left_by_speed() {
        let mut o = at(0.5, 0.0, 0.05);
        o.advance();
        assert!((o.x - 0.48).abs() < 1e-6);
    }

    #[test]
    fn obstacle_wholly_past_left_boundary_is_culled() {
        assert!(at(-1.1, 0.0, 0.05).is_past(-1.0));
        assert!(at(-1.0 - 0.06, 0.3, 0.05).is_past(-1.0));
    }

    #[test]
    fn obstacle_partially_on_screen_is_kept() {
        assert!(!at(-0.9, 0.0, 0.05).is_past(-1.0));
        assert!(!at(-1.04, 0.0, 0.05).is_past(-1.0));
    }

    #[test]
    fn edge_exactly_on_boundary_is_culled() {
        assert!(at(-1.0, 0.0, 0.0).is_past(-1.0));
    }

    #[test]
    fn collision_inside_radius_sum() {
        // distance 0.25 < 0.25 + 0.05
        assert!(at(0.0, 0.0, 0.05).collides_with([-0.25, 0.0], 0.25));
    }

    #[test]
    fn no_collision_when_far_apart() {
        // distance 0.75 > 0.30
        assert!(!at(0.5, 0.0, 0.05).collides_with([-0.25, 0.0], 0.25));
    }

    #[test]
    fn collision_is_euclidean_not_per_axis() {
        // dx = dy = 0.2, distance ~0.283 < 0.30
        assert!(at(0.2, 0.2, 0.05).collides_with([0.0, 0.0], 0.25));
        // dx = dy = 0.22, distance ~0.311 > 0.30 although each axis is within 0.30
        assert!(!at(0.22, 0.22, 0.05).collides_with([0.0, 0.0], 0.25));
    }

    #[test]
    fn draw_call_is_red_twenty_slice_fan() {
        let call = at(0.0, 0.0, 0.05).draw_call();
        assert_eq!(call.triangle_count(), 20);
        assert_eq!(call.color, Rgba::RED);
    }
}
