//! Scene composer: turns UI state into one frame per animation tick.
//!
//! The sketch view replays every clicked shape in click order. The rig view
//! builds a three-cube hierarchy whose children are placed from snapshots of
//! their parent's transform, then orbits the whole scene by the global angle.

use crate::color::Rgba;
use crate::command::Frame;
use crate::game::duck;
use crate::input::{UiState, View};
use crate::shape::{Brush, Shape};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Shapes accumulated from pointer input, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    shapes: Vec<Shape>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the shape `brush` produces at `position` (NDC).
    pub fn paint(&mut self, brush: &Brush, position: [f32; 2]) {
        self.shapes.push(Shape::from_brush(brush, position));
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// All shapes in painter's order; later clicks draw on top.
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::new(Rgba::BLACK);
        for shape in &self.shapes {
            frame.extend(shape.draw_calls());
        }
        frame
    }
}

/// Joint angles of the cube rig, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RigPose {
    pub yellow: f32,
    pub magenta: f32,
}

impl RigPose {
    /// Angles for time `seconds`: animated joints swing on a sine, the rest
    /// hold their slider value.
    pub fn at(ui: &UiState, seconds: f64) -> Self {
        let yellow = if ui.animate_yellow {
            (45.0 * seconds.sin()) as f32
        } else {
            ui.yellow_angle
        };
        let magenta = if ui.animate_magenta {
            (45.0 * (3.0 * seconds).sin()) as f32
        } else {
            ui.magenta_angle
        };
        Self { yellow, magenta }
    }

    /// Body, upper arm, and forearm cubes, in draw order.
    pub fn shapes(&self) -> [Shape; 3] {
        let mut body = Transform::identity();
        body.translate(-0.25, -0.75, 0.0)
            .rotate(-5.0, 1.0, 0.0, 0.0)
            .scale(0.5, 0.3, 0.5);

        let mut arm = Transform::identity();
        arm.translate(0.0, -0.5, 0.0)
            .rotate(-5.0, 1.0, 0.0, 0.0)
            .rotate(-self.yellow, 0.0, 0.0, 1.0);
        let elbow = arm.snapshot();
        arm.scale(0.25, 0.7, 0.5).translate(-0.5, 0.0, 0.0);

        let mut forearm = elbow;
        forearm
            .translate(0.0, 0.65, 0.0)
            .rotate(self.magenta, 0.0, 0.0, 1.0)
            .scale(0.3, 0.3, 0.3)
            .translate(-0.5, 0.0, -0.001);

        [
            Shape::cube(Rgba::RED, body),
            Shape::cube(Rgba::YELLOW, arm),
            Shape::cube(Rgba::MAGENTA, forearm),
        ]
    }
}

/// Rotation about the y axis shared by every call in a rig frame.
pub fn global_rotation(degrees: f32) -> Transform {
    let mut m = Transform::identity();
    m.rotate(degrees, 0.0, 1.0, 0.0);
    m
}

/// The cube rig posed for `seconds`, orbited by the UI's global angle.
pub fn rig_frame(ui: &UiState, seconds: f64) -> Frame {
    let mut frame = Frame::new(Rgba::BLACK).with_global_rotation(global_rotation(ui.global_angle));
    for shape in RigPose::at(ui, seconds).shapes() {
        frame.extend(shape.draw_calls());
    }
    frame
}

/// Builds the frame for the UI's current view.
pub fn compose(ui: &UiState, sketch: &Sketch, seconds: f64) -> Frame {
    match ui.view {
        View::Sketch => sketch.frame(),
        View::Rig => rig_frame(ui, seconds),
        View::Portrait => duck::portrait(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DrawMode;
    use crate::shape::ShapeKind;
    use glam::Vec3;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    fn model_of(shape: &Shape) -> Transform {
        match shape {
            Shape::Cube { model, .. } => *model,
            other => panic!("expected cube, got {other:?}"),
        }
    }

    #[test]
    fn sketch_replays_shapes_in_click_order() {
        let mut sketch = Sketch::new();
        let mut brush = Brush::default();
        sketch.paint(&brush, [0.0, 0.0]);
        brush.kind = ShapeKind::Circle;
        brush.color = Rgba::RED;
        sketch.paint(&brush, [0.5, 0.5]);

        let frame = sketch.frame();
        assert_eq!(sketch.len(), 2);
        assert_eq!(frame.commands.len(), 2);
        assert_eq!(frame.commands[0].mode, DrawMode::Points);
        assert_eq!(frame.commands[1].color, Rgba::RED);
    }

    #[test]
    fn clearing_the_sketch_empties_the_frame() {
        let mut sketch = Sketch::new();
        sketch.paint(&Brush::default(), [0.1, 0.1]);
        sketch.clear();
        assert!(sketch.is_empty());
        assert!(sketch.frame().commands.is_empty());
    }

    #[test]
    fn sketch_frame_has_no_global_rotation() {
        let mut sketch = Sketch::new();
        sketch.paint(&Brush::default(), [0.1, 0.1]);
        assert_eq!(sketch.frame().global_rotation, Transform::IDENTITY);
    }

    #[test]
    fn global_rotation_quarter_turn_maps_x_to_negative_z() {
        let p = global_rotation(90.0).transform_point(Vec3::X);
        assert!(close(p, Vec3::NEG_Z), "got {p}");
    }

    #[test]
    fn rig_frame_draws_three_cubes_of_six_faces() {
        let frame = rig_frame(&UiState::default(), 0.0);
        assert_eq!(frame.commands.len(), 18);
        assert_eq!(frame.commands[0].color, Rgba::RED);
        assert_eq!(frame.commands[6].color, Rgba::YELLOW);
        assert_eq!(frame.commands[12].color, Rgba::MAGENTA);
    }

    #[test]
    fn rig_frame_uses_ui_global_angle() {
        let ui = UiState {
            global_angle: 30.0,
            ..UiState::default()
        };
        assert_eq!(rig_frame(&ui, 0.0).global_rotation, global_rotation(30.0));
    }

    #[test]
    fn forearm_follows_upper_arm_rotation() {
        let rest = RigPose { yellow: 0.0, magenta: 0.0 }.shapes();
        let bent = RigPose { yellow: 40.0, magenta: 0.0 }.shapes();
        let origin_rest = model_of(&rest[2]).transform_point(Vec3::ZERO);
        let origin_bent = model_of(&bent[2]).transform_point(Vec3::ZERO);
        assert!(!close(origin_rest, origin_bent), "forearm did not move with the arm");
        assert_eq!(model_of(&rest[0]), model_of(&bent[0]), "body is independent");
    }

    #[test]
    fn forearm_angle_does_not_move_upper_arm() {
        let a = RigPose { yellow: 10.0, magenta: 0.0 }.shapes();
        let b = RigPose { yellow: 10.0, magenta: 60.0 }.shapes();
        assert_eq!(model_of(&a[1]), model_of(&b[1]));
        assert_ne!(model_of(&a[2]), model_of(&b[2]));
    }

    #[test]
    fn elbow_sits_at_top_of_upper_arm() {
        let pose = RigPose::default();
        let [_, arm, forearm] = pose.shapes();
        // Both local points land on (0, 0.65, 0) in the elbow frame.
        let arm_top = model_of(&arm).transform_point(Vec3::new(0.5, 0.65 / 0.7, 0.0));
        let forearm_base = model_of(&forearm).transform_point(Vec3::new(0.5, 0.0, 0.001));
        assert!(close(arm_top, forearm_base), "{arm_top} vs {forearm_base}");
    }

    #[test]
    fn animated_joints_follow_sine_curves() {
        let ui = UiState {
            animate_yellow: true,
            animate_magenta: true,
            yellow_angle: 10.0,
            magenta_angle: 20.0,
            ..UiState::default()
        };
        let t = std::f64::consts::FRAC_PI_2;
        let pose = RigPose::at(&ui, t);
        assert!((pose.yellow - 45.0).abs() < 1e-4);
        assert!((pose.magenta - -45.0).abs() < 1e-4, "sin(3π/2) = -1");
    }

    #[test]
    fn static_joints_use_slider_angles() {
        let ui = UiState {
            yellow_angle: 12.0,
            magenta_angle: -7.0,
            ..UiState::default()
        };
        let pose = RigPose::at(&ui, 123.0);
        assert_eq!(pose, RigPose { yellow: 12.0, magenta: -7.0 });
    }

    #[test]
    fn compose_dispatches_on_view() {
        let mut ui = UiState::default();
        let mut sketch = Sketch::new();
        sketch.paint(&ui.brush, [0.0, 0.0]);

        assert_eq!(compose(&ui, &sketch, 0.0).commands.len(), 1);
        ui.view = View::Rig;
        assert_eq!(compose(&ui, &sketch, 0.0).commands.len(), 18);
        ui.view = View::Portrait;
        assert_eq!(compose(&ui, &sketch, 0.0), duck::portrait());
    }
}
