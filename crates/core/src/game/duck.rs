//! The player: position, keyboard movement, and the drawn figure.

use crate::color::Rgba;
use crate::command::{DrawCall, Frame};
use crate::geometry;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;

/// Vertical movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.code` to a movement key.
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Player position. x never changes during play; y is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Duck {
    pub x: f32,
    pub y: f32,
}

impl Duck {
    pub fn new(position: [f32; 2]) -> Self {
        Self {
            x: position[0],
            y: position[1],
        }
    }

    /// Moves one step for `key`, clamping y to `config.duck_y_range`.
    pub fn press(&mut self, key: Key, config: &GameConfig) {
        let [a, b] = config.duck_y_range;
        let (lo, hi) = (a.min(b), a.max(b));
        let dy = match key {
            Key::Up => config.duck_step,
            Key::Down => -config.duck_step,
        };
        self.y = (self.y + dy).clamp(lo, hi);
    }

    /// Center of the collision circle.
    pub fn body_center(&self, config: &GameConfig) -> [f32; 2] {
        [self.x + config.body_offset[0], self.y + config.body_offset[1]]
    }

    /// Draw calls for the duck figure at its current position.
    pub fn figure(&self) -> Vec<DrawCall> {
        figure_at(self.x, self.y)
    }
}

const YELLOW: Rgba = Rgba::opaque(1.0, 0.95, 0.3);
const WING: Rgba = Rgba::opaque(0.9, 0.85, 0.1);
const BEAK: Rgba = Rgba::opaque(1.0, 0.55, 0.0);
const FEET: Rgba = Rgba::opaque(1.0, 0.6, 0.2);
/// Water strip behind the game and portrait.
pub const WATER: Rgba = Rgba::opaque(0.1, 0.45, 0.8);

/// One ellipse of the figure, offset from the duck position.
struct Part {
    dx: f32,
    dy: f32,
    rx: f32,
    ry: f32,
    color: Rgba,
    segments: u32,
}

/// Ellipses in paint order: body, tail, head, beak, eye, eye highlight, wing.
const PARTS: [Part; 7] = [
    Part { dx: -0.05, dy: 0.0, rx: 0.4, ry: 0.25, color: YELLOW, segments: 80 },
    Part { dx: -0.5, dy: 0.1, rx: 0.15, ry: 0.1, color: YELLOW, segments: 60 },
    Part { dx: 0.1, dy: 0.35, rx: 0.17, ry: 0.17, color: YELLOW, segments: 60 },
    Part { dx: 0.25, dy: 0.35, rx: 0.08, ry: 0.04, color: BEAK, segments: 40 },
    Part { dx: 0.07, dy: 0.4, rx: 0.03, ry: 0.03, color: Rgba::BLACK, segments: 20 },
    Part { dx: 0.08, dy: 0.42, rx: 0.01, ry: 0.01, color: Rgba::WHITE, segments: 10 },
    Part { dx: -0.05, dy: 0.05, rx: 0.25, ry: 0.12, color: WING, segments: 40 },
];

/// Foot triangles as offsets from the duck position.
const FEET_TRIANGLES: [[f32; 6]; 2] = [
    [0.05, -0.2, 0.1, -0.2, 0.08, -0.35],
    [-0.05, -0.2, 0.0, -0.2, -0.03, -0.35],
];

/// Draw calls for the duck figure with its origin at `(x, y)`.
pub fn figure_at(x: f32, y: f32) -> Vec<DrawCall> {
    let body = PARTS.iter().map(|p| {
        DrawCall::triangles_2d(
            geometry::ellipse(x + p.dx, y + p.dy, p.rx, p.ry, p.segments),
            p.color,
        )
    });
    let feet = FEET_TRIANGLES.iter().map(|t| {
        DrawCall::triangles_2d(
            geometry::triangle([
                x + t[0],
                y + t[1],
                x + t[2],
                y + t[3],
                x + t[4],
                y + t[5],
            ]),
            FEET,
        )
    });
    body.chain(feet).collect()
}

/// The water strip along the bottom of the surface.
pub fn water() -> DrawCall {
    DrawCall::triangles_2d(geometry::rectangle(-1.0, -1.0, 1.0, -0.3), WATER)
}

/// Static picture of the duck at the origin above the water.
pub fn portrait() -> Frame {
    let mut frame = Frame::new(Rgba::BLACK);
    frame.push(water());
    frame.extend(figure_at(0.0, 0.0));
    frame
}
