//! Tunables for the obstacle game.

use crate::params::{param_f32, param_f64, param_pair};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_SPAWN_INTERVAL_MS: f64 = 2000.0;
const DEFAULT_SPAWN_X: f32 = 1.2;
const DEFAULT_LANE_RANGE: [f32; 2] = [-0.3, 1.3];
const DEFAULT_RADIUS_RANGE: [f32; 2] = [0.05, 0.05];
const DEFAULT_SPEED_RANGE: [f32; 2] = [0.01, 0.03];
const DEFAULT_LEFT_BOUNDARY: f32 = -1.0;
const DEFAULT_DUCK_START: [f32; 2] = [-0.2, 0.0];
const DEFAULT_DUCK_Y_RANGE: [f32; 2] = [-0.3, 1.0];
const DEFAULT_DUCK_STEP: f32 = 0.03;
const DEFAULT_DUCK_RADIUS: f32 = 0.25;
const DEFAULT_BODY_OFFSET: [f32; 2] = [-0.05, 0.0];
/// Score per millisecond survived.
const DEFAULT_SCORE_RATE: f64 = 0.01;

/// Immutable game configuration.
///
/// Ranges are `[min, max)` pairs. Distances are in NDC units, times in
/// milliseconds. Obstacle speed is NDC units per tick, not per millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum time between obstacle spawns.
    pub spawn_interval_ms: f64,
    /// x coordinate new obstacles appear at.
    pub spawn_x: f32,
    /// Range new obstacle y coordinates are drawn from.
    pub lane_range: [f32; 2],
    /// Range new obstacle radii are drawn from.
    pub radius_range: [f32; 2],
    /// Range new obstacle speeds are drawn from.
    pub speed_range: [f32; 2],
    /// Obstacles whose right edge reaches this x are removed.
    pub left_boundary: f32,
    /// Duck position after `start`.
    pub duck_start: [f32; 2],
    /// Inclusive clamp range for the duck's y coordinate.
    pub duck_y_range: [f32; 2],
    /// Vertical distance one key press moves the duck.
    pub duck_step: f32,
    /// Collision radius of the duck's body, independent of how it is drawn.
    pub duck_radius: f32,
    /// Offset from the duck position to its body center.
    pub body_offset: [f32; 2],
    /// Score accrued per millisecond while running.
    pub score_rate: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            spawn_x: DEFAULT_SPAWN_X,
            lane_range: DEFAULT_LANE_RANGE,
            radius_range: DEFAULT_RADIUS_RANGE,
            speed_range: DEFAULT_SPEED_RANGE,
            left_boundary: DEFAULT_LEFT_BOUNDARY,
            duck_start: DEFAULT_DUCK_START,
            duck_y_range: DEFAULT_DUCK_Y_RANGE,
            duck_step: DEFAULT_DUCK_STEP,
            duck_radius: DEFAULT_DUCK_RADIUS,
            body_offset: DEFAULT_BODY_OFFSET,
            score_rate: DEFAULT_SCORE_RATE,
        }
    }
}

impl GameConfig {
    /// Reads overrides from a JSON object, falling back to defaults for
    /// missing or mistyped keys. Ranges given as `[max, min]` are reordered.
    pub fn from_json(params: &Value) -> Self {
        Self {
            spawn_interval_ms: param_f64(params, "spawn_interval_ms", DEFAULT_SPAWN_INTERVAL_MS),
            spawn_x: param_f32(params, "spawn_x", DEFAULT_SPAWN_X),
            lane_range: ordered(param_pair(params, "lane_range", DEFAULT_LANE_RANGE)),
            radius_range: ordered(param_pair(params, "radius_range", DEFAULT_RADIUS_RANGE)),
            speed_range: ordered(param_pair(params, "speed_range", DEFAULT_SPEED_RANGE)),
            left_boundary: param_f32(params, "left_boundary", DEFAULT_LEFT_BOUNDARY),
            duck_start: param_pair(params, "duck_start", DEFAULT_DUCK_START),
            duck_y_range: ordered(param_pair(params, "duck_y_range", DEFAULT_DUCK_Y_RANGE)),
            duck_step: param_f32(params, "duck_step", DEFAULT_DUCK_STEP),
            duck_radius: param_f32(params, "duck_radius", DEFAULT_DUCK_RADIUS),
            body_offset: param_pair(params, "body_offset", DEFAULT_BODY_OFFSET),
            score_rate: param_f64(params, "score_rate", DEFAULT_SCORE_RATE),
        }
    }

    /// Effective values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "spawn_interval_ms": self.spawn_interval_ms,
            "spawn_x": self.spawn_x,
            "lane_range": self.lane_range,
            "radius_range": self.radius_range,
            "speed_range": self.speed_range,
            "left_boundary": self.left_boundary,
            "duck_start": self.duck_start,
            "duck_y_range": self.duck_y_range,
            "duck_step": self.duck_step,
            "duck_radius": self.duck_radius,
            "body_offset": self.body_offset,
            "score_rate": self.score_rate,
        })
    }

    /// Describes every parameter: type, default, and meaning.
    pub fn param_schema() -> Value {
        json!({
            "spawn_interval_ms": {
                "type": "number", "default": DEFAULT_SPAWN_INTERVAL_MS,
                "description": "Minimum milliseconds between obstacle spawns"
            },
            "spawn_x": {
                "type": "number", "default": DEFAULT_SPAWN_X,
                "description": "x coordinate where obstacles appear"
            },
            "lane_range": {
                "type": "range", "default": DEFAULT_LANE_RANGE,
                "description": "[min, max) for obstacle y"
            },
            "radius_range": {
                "type": "range", "default": DEFAULT_RADIUS_RANGE,
                "description": "[min, max) for obstacle radius"
            },
            "speed_range": {
                "type": "range", "default": DEFAULT_SPEED_RANGE,
                "description": "[min, max) for obstacle speed, NDC units per tick"
            },
            "left_boundary": {
                "type": "number", "default": DEFAULT_LEFT_BOUNDARY,
                "description": "Obstacles are removed once x + radius reaches this"
            },
            "duck_start": {
                "type": "point", "default": DEFAULT_DUCK_START,
                "description": "Duck position after start"
            },
            "duck_y_range": {
                "type": "range", "default": DEFAULT_DUCK_Y_RANGE,
                "description": "Inclusive clamp for duck y"
            },
            "duck_step": {
                "type": "number", "default": DEFAULT_DUCK_STEP,
                "description": "Vertical distance per key press"
            },
            "duck_radius": {
                "type": "number", "default": DEFAULT_DUCK_RADIUS,
                "description": "Collision radius of the duck body"
            },
            "body_offset": {
                "type": "point", "default": DEFAULT_BODY_OFFSET,
                "description": "Offset from duck position to body center"
            },
            "score_rate": {
                "type": "number", "default": DEFAULT_SCORE_RATE,
                "description": "Score per millisecond survived"
            }
        })
    }
}

/// Puts a `[lo, hi]` pair in ascending order.
fn ordered([a, b]: [f32; 2]) -> [f32; 2] {
    if b < a {
        [b, a]
    } else {
        [a, b]
    }
}
