//! Drawable shapes and their conversion to draw calls.

use crate::color::Rgba;
use crate::command::DrawCall;
use crate::error::SketchError;
use crate::geometry::{self, CubeFace, SIZE_TO_NDC};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The shape type a pointer click creates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Point,
    Triangle,
    Circle,
}

impl ShapeKind {
    /// Names accepted by [`ShapeKind::from_str`].
    pub const NAMES: [&'static str; 3] = ["point", "triangle", "circle"];
}

impl FromStr for ShapeKind {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(ShapeKind::Point),
            "triangle" => Ok(ShapeKind::Triangle),
            "circle" => Ok(ShapeKind::Circle),
            _ => Err(SketchError::UnknownShape(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Point => "point",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
        };
        f.write_str(name)
    }
}

/// Current pen settings applied to newly created shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub kind: ShapeKind,
    pub color: Rgba,
    /// Point size in pixels; triangle/circle extent in slider units.
    pub size: f32,
    pub segments: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Point,
            color: Rgba::WHITE,
            size: 5.0,
            segments: 10,
        }
    }
}

/// A drawable shape with its per-variant payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Point {
        position: [f32; 2],
        color: Rgba,
        size: f32,
    },
    Triangle {
        position: [f32; 2],
        color: Rgba,
        size: f32,
    },
    Circle {
        position: [f32; 2],
        color: Rgba,
        size: f32,
        segments: u32,
    },
    Cube {
        color: Rgba,
        model: Transform,
    },
}

impl Shape {
    /// Builds the shape a click at `position` (NDC) produces with `brush`.
    pub fn from_brush(brush: &Brush, position: [f32; 2]) -> Self {
        match brush.kind {
            ShapeKind::Point => Shape::Point {
                position,
                color: brush.color,
                size: brush.size,
            },
            ShapeKind::Triangle => Shape::Triangle {
                position,
                color: brush.color,
                size: brush.size,
            },
            ShapeKind::Circle => Shape::Circle {
                position,
                color: brush.color,
                size: brush.size,
                segments: brush.segments,
            },
        }
    }

    /// Unit cube with the given base color and model matrix.
    pub fn cube(color: Rgba, model: Transform) -> Self {
        Shape::Cube { color, model }
    }

    /// Base color of the shape.
    pub fn color(&self) -> Rgba {
        match self {
            Shape::Point { color, .. }
            | Shape::Triangle { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Cube { color, .. } => *color,
        }
    }

    /// Converts the shape into the draw calls that render it.
    ///
    /// Cubes emit one call per face so each face can carry its own shade.
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        match self {
            Shape::Point {
                position,
                color,
                size,
            } => vec![DrawCall::points(position.to_vec(), *color, *size)],
            Shape::Triangle {
                position,
                color,
                size,
            } => vec![DrawCall::triangles_2d(
                geometry::right_triangle(position[0], position[1], *size),
                *color,
            )],
            Shape::Circle {
                position,
                color,
                size,
                segments,
            } => vec![DrawCall::triangles_2d(
                geometry::circle(position[0], position[1], size * SIZE_TO_NDC, *segments),
                *color,
            )],
            Shape::Cube { color, model } => CubeFace::ALL
                .iter()
                .map(|face| {
                    DrawCall::triangles_3d(
                        face.vertices().to_vec(),
                        color.shade(face.shade()),
                        *model,
                    )
                })
                .collect(),
        }
    }
}
