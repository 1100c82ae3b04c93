//! Render commands: the data handed from the scene composer and game loop to
//! the draw-call layer.
//!
//! A [`Frame`] is a complete description of one animation tick's output. It
//! holds no GPU handles, so frames can be built, inspected, and serialized
//! without a display surface.

use crate::color::Rgba;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Primitive assembly mode for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// One point sprite per vertex, sized by the call's `point_size`.
    Points,
    /// Every three vertices form a triangle.
    Triangles,
}

/// One draw call: a vertex list plus the uniform values bound while drawing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub mode: DrawMode,
    /// Floats per vertex: 2 for NDC shapes, 3 for object-space shapes.
    pub components: u8,
    pub vertices: Vec<f32>,
    pub color: Rgba,
    pub point_size: f32,
    pub model: Transform,
}

impl DrawCall {
    /// 2D triangles in NDC with an identity model matrix.
    pub fn triangles_2d(vertices: Vec<f32>, color: Rgba) -> Self {
        Self {
            mode: DrawMode::Triangles,
            components: 2,
            vertices,
            color,
            point_size: 1.0,
            model: Transform::IDENTITY,
        }
    }

    /// 3D triangles in object space, placed by `model`.
    pub fn triangles_3d(vertices: Vec<f32>, color: Rgba, model: Transform) -> Self {
        Self {
            mode: DrawMode::Triangles,
            components: 3,
            vertices,
            color,
            point_size: 1.0,
            model,
        }
    }

    /// 2D point sprites of `size` pixels.
    pub fn points(vertices: Vec<f32>, color: Rgba, size: f32) -> Self {
        Self {
            mode: DrawMode::Points,
            components: 2,
            vertices,
            color,
            point_size: size,
            model: Transform::IDENTITY,
        }
    }

    /// Number of vertices in this call.
    pub fn vertex_count(&self) -> usize {
        match self.components {
            0 => 0,
            n => self.vertices.len() / n as usize,
        }
    }

    /// Number of triangles this call rasterizes (0 for point calls).
    pub fn triangle_count(&self) -> usize {
        match self.mode {
            DrawMode::Triangles => self.vertex_count() / 3,
            DrawMode::Points => 0,
        }
    }
}

/// Text surfaced to the UI alongside a frame.
///
/// `None` leaves the corresponding UI element untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Score line, e.g. `"Score: 12"`.
    pub score: Option<String>,
    /// Terminal banner shown when the game ends.
    pub game_over: Option<String>,
}

/// Everything needed to draw one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Color the surface is cleared to (color and depth are both cleared).
    pub clear_color: Rgba,
    /// Shared rotation applied to every call in the frame.
    pub global_rotation: Transform,
    /// Calls in painter's order.
    pub commands: Vec<DrawCall>,
    pub overlay: Overlay,
}

impl Frame {
    /// An empty frame cleared to `clear_color`.
    pub fn new(clear_color: Rgba) -> Self {
        Self {
            clear_color,
            global_rotation: Transform::IDENTITY,
            commands: Vec::new(),
            overlay: Overlay::default(),
        }
    }

    /// Returns the frame with the given global rotation.
    pub fn with_global_rotation(mut self, rotation: Transform) -> Self {
        self.global_rotation = rotation;
        self
    }

    /// Appends a draw call.
    pub fn push(&mut self, call: DrawCall) {
        self.commands.push(call);
    }

    /// Appends every call from `calls`, keeping their order.
    pub fn extend(&mut self, calls: impl IntoIterator<Item = DrawCall>) {
        self.commands.extend(calls);
    }

    /// Total vertex count across all calls.
    pub fn vertex_count(&self) -> usize {
        self.commands.iter().map(DrawCall::vertex_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;

    #[test]
    fn triangles_2d_counts_vertices_by_pairs() {
        let call = DrawCall::triangles_2d(geometry::rectangle(0.0, 0.0, 1.0, 1.0), Rgba::RED);
        assert_eq!(call.vertex_count(), 6);
        assert_eq!(call.triangle_count(), 2);
        assert_eq!(call.model, Transform::IDENTITY);
    }

    #[test]
    fn triangles_3d_counts_vertices_by_triples() {
        let call = DrawCall::triangles_3d(geometry::cube(), Rgba::RED, Transform::IDENTITY);
        assert_eq!(call.vertex_count(), 36);
        assert_eq!(call.triangle_count(), 12);
    }

    #[test]
    fn point_calls_rasterize_no_triangles() {
        let call = DrawCall::points(vec![0.0, 0.0], Rgba::WHITE, 10.0);
        assert_eq!(call.vertex_count(), 1);
        assert_eq!(call.triangle_count(), 0);
        assert_eq!(call.point_size, 10.0);
    }

    #[test]
    fn frame_preserves_push_order() {
        let mut frame = Frame::new(Rgba::BLACK);
        frame.push(DrawCall::points(vec![0.0, 0.0], Rgba::RED, 1.0));
        frame.push(DrawCall::points(vec![0.5, 0.5], Rgba::YELLOW, 1.0));
        assert_eq!(frame.commands[0].color, Rgba::RED);
        assert_eq!(frame.commands[1].color, Rgba::YELLOW);
        assert_eq!(frame.vertex_count(), 2);
    }

    #[test]
    fn frame_serializes_to_json_with_expected_keys() {
        let mut frame = Frame::new(Rgba::BLACK);
        frame.push(DrawCall::triangles_2d(geometry::triangle([0.0; 6]), Rgba::RED));
        let v = serde_json::to_value(&frame).unwrap();
        assert!(v.get("clear_color").is_some());
        assert!(v.get("global_rotation").is_some());
        assert_eq!(v["commands"][0]["mode"], "triangles");
        assert_eq!(v["commands"][0]["components"], 2);
    }
}
