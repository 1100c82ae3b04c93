//! Vertex generators for the drawable primitives.
//!
//! Every generator returns a flat, non-indexed list of coordinates forming
//! whole triangles: two floats per vertex for 2D shapes, three for the cube.
//! 2D output is in normalized device coordinates; the cube is in object space
//! `[0, 1]^3` and relies on a model matrix to be placed.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Smallest segment count a fan can be built with.
pub const MIN_SEGMENTS: u32 = 3;
/// Segment count used when a caller does not specify one.
pub const DEFAULT_SEGMENTS: u32 = 60;
/// Click sizes are in slider units; this maps them to NDC lengths.
pub const SIZE_TO_NDC: f32 = 1.0 / 200.0;

/// A single triangle from six explicit 2D coordinates.
pub fn triangle(coords: [f32; 6]) -> Vec<f32> {
    coords.to_vec()
}

/// Right triangle anchored at `(x, y)` with legs of `size * SIZE_TO_NDC`
/// running along +x and +y.
pub fn right_triangle(x: f32, y: f32, size: f32) -> Vec<f32> {
    let d = size * SIZE_TO_NDC;
    triangle([x, y, x + d, y, x, y + d])
}

/// Axis-aligned rectangle spanning `(x1, y1)`..`(x2, y2)` as two triangles.
pub fn rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<f32> {
    vec![x1, y1, x2, y1, x2, y2, x1, y1, x2, y2, x1, y2]
}

/// Triangle fan approximating an ellipse centered at `(cx, cy)`.
///
/// Slice `i` spans angles `i * 2π/n` to `(i + 1) * 2π/n`, so consecutive
/// slices share an edge and the last slice closes on the first. `segments`
/// below [`MIN_SEGMENTS`] is raised to it.
pub fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32, segments: u32) -> Vec<f32> {
    let n = segments.max(MIN_SEGMENTS);
    let step = TAU / f64::from(n);
    let rim = |i: u32| {
        let angle = f64::from(i) * step;
        (
            cx + rx * angle.cos() as f32,
            cy + ry * angle.sin() as f32,
        )
    };

    let mut out = Vec::with_capacity(n as usize * 6);
    let mut prev = rim(0);
    for i in 1..=n {
        let next = rim(i);
        out.extend_from_slice(&[cx, cy, prev.0, prev.1, next.0, next.1]);
        prev = next;
    }
    out
}

/// Circular fan of the given radius. See [`ellipse`].
pub fn circle(cx: f32, cy: f32, radius: f32, segments: u32) -> Vec<f32> {
    ellipse(cx, cy, radius, radius, segments)
}

/// One face of the unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeFace {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl CubeFace {
    /// All faces in draw order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Top,
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Bottom,
        CubeFace::Back,
    ];

    /// Brightness multiplier applied to the base color of this face.
    pub fn shade(self) -> f32 {
        match self {
            CubeFace::Front => 1.0,
            CubeFace::Top => 0.9,
            CubeFace::Right | CubeFace::Left => 0.8,
            CubeFace::Bottom => 0.7,
            CubeFace::Back => 0.6,
        }
    }

    /// The two triangles of this face in object space `[0, 1]^3`.
    pub fn vertices(self) -> [f32; 18] {
        match self {
            CubeFace::Front => [
                0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0,
            ],
            CubeFace::Back => [
                0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, //
                0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
            ],
            CubeFace::Top => [
                0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, //
                0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0,
            ],
            CubeFace::Bottom => [
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, //
                0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0,
            ],
            CubeFace::Left => [
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, //
                0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0,
            ],
            CubeFace::Right => [
                1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, //
                1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0,
            ],
        }
    }
}

/// All 36 cube vertices (6 faces x 2 triangles x 3 vertices) in face draw order.
pub fn cube() -> Vec<f32> {
    CubeFace::ALL
        .iter()
        .flat_map(|face| face.vertices())
        .collect()
}
