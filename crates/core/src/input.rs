//! UI-facing state: what the sliders, buttons, and pointer have selected.
//!
//! Hosts translate DOM (or CLI) input into [`Control`] values and pointer
//! positions; the composer reads [`UiState`] each tick. Nothing here touches
//! the DOM.

pub use crate::color::Channel;
use crate::error::SketchError;
use crate::geometry::MIN_SEGMENTS;
use crate::shape::{Brush, ShapeKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which scene the composer draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Click-accumulated points, triangles, and circles.
    #[default]
    Sketch,
    /// The animated cube hierarchy.
    Rig,
    /// The static duck picture.
    Portrait,
}

impl FromStr for View {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sketch" => Ok(View::Sketch),
            "rig" => Ok(View::Rig),
            "portrait" => Ok(View::Portrait),
            _ => Err(SketchError::UnknownView(s.to_string())),
        }
    }
}

/// One UI control change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum Control {
    SelectShape(ShapeKind),
    SelectView(View),
    /// Color slider position in [0, 100].
    Color(Channel, f32),
    Size(f32),
    Segments(u32),
    /// Scene orbit angle in degrees.
    GlobalAngle(f32),
    YellowAngle(f32),
    MagentaAngle(f32),
    AnimateYellow(bool),
    AnimateMagenta(bool),
}

/// Everything the UI has selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub view: View,
    pub brush: Brush,
    pub global_angle: f32,
    pub yellow_angle: f32,
    pub magenta_angle: f32,
    pub animate_yellow: bool,
    pub animate_magenta: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            view: View::Sketch,
            brush: Brush::default(),
            global_angle: 0.0,
            yellow_angle: 0.0,
            magenta_angle: 0.0,
            animate_yellow: false,
            animate_magenta: false,
        }
    }
}

impl UiState {
    /// Applies one control change.
    ///
    /// Slider values are trusted to be in their documented ranges, except the
    /// segment count, which is raised to the fan minimum.
    pub fn apply(&mut self, control: Control) {
        match control {
            Control::SelectShape(kind) => self.brush.kind = kind,
            Control::SelectView(view) => self.view = view,
            Control::Color(channel, percent) => {
                self.brush.color = self.brush.color.with_percent(channel, percent);
            }
            Control::Size(size) => self.brush.size = size,
            Control::Segments(n) => {
                if n < MIN_SEGMENTS {
                    log::warn!("segment count {n} raised to {MIN_SEGMENTS}");
                }
                self.brush.segments = n.max(MIN_SEGMENTS);
            }
            Control::GlobalAngle(deg) => self.global_angle = deg,
            Control::YellowAngle(deg) => self.yellow_angle = deg,
            Control::MagentaAngle(deg) => self.magenta_angle = deg,
            Control::AnimateYellow(on) => self.animate_yellow = on,
            Control::AnimateMagenta(on) => self.animate_magenta = on,
        }
    }
}

/// Bounding box of the canvas in client pixels plus its drawing-buffer size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    /// Returns `SketchError::InvalidDimensions` for a zero or negative size.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, SketchError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(SketchError::InvalidDimensions);
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Converts client pixel coordinates to NDC, flipping y so up is positive.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> [f32; 2] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        [
            (client_x - self.left - half_w) / half_w,
            (half_h - (client_y - self.top)) / half_h,
        ]
    }
}

/// Pointer event kinds the sketch reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
}

/// Whether a pointer event should paint a shape: every press, and every move
/// while exactly the primary button is held.
pub fn paints(kind: PointerKind, buttons: u16) -> bool {
    match kind {
        PointerKind::Down => true,
        PointerKind::Move => buttons == 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn color_sliders_update_one_channel_each() {
        let mut ui = UiState::default();
        ui.apply(Control::Color(Channel::Red, 25.0));
        ui.apply(Control::Color(Channel::Blue, 0.0));
        let c = ui.brush.color;
        assert!(approx(c.r, 0.25));
        assert!(approx(c.g, 1.0), "green untouched");
        assert!(approx(c.b, 0.0));
    }

    #[test]
    fn segment_slider_is_raised_to_minimum() {
        let mut ui = UiState::default();
        ui.apply(Control::Segments(1));
        assert_eq!(ui.brush.segments, 3);
        ui.apply(Control::Segments(40));
        assert_eq!(ui.brush.segments, 40);
    }

    #[test]
    fn shape_and_view_selection() {
        let mut ui = UiState::default();
        ui.apply(Control::SelectShape(ShapeKind::Circle));
        ui.apply(Control::SelectView(View::Rig));
        assert_eq!(ui.brush.kind, ShapeKind::Circle);
        assert_eq!(ui.view, View::Rig);
    }

    #[test]
    fn angle_sliders_and_toggles() {
        let mut ui = UiState::default();
        ui.apply(Control::GlobalAngle(90.0));
        ui.apply(Control::YellowAngle(30.0));
        ui.apply(Control::MagentaAngle(-15.0));
        ui.apply(Control::AnimateYellow(true));
        assert_eq!(ui.global_angle, 90.0);
        assert_eq!(ui.yellow_angle, 30.0);
        assert_eq!(ui.magenta_angle, -15.0);
        assert!(ui.animate_yellow);
        assert!(!ui.animate_magenta);
    }

    #[test]
    fn view_parses_known_names() {
        assert_eq!("Rig".parse::<View>().unwrap(), View::Rig);
        assert!(matches!("orbit".parse::<View>(), Err(SketchError::UnknownView(_))));
    }

    #[test]
    fn control_deserializes_from_tagged_json() {
        let c: Control = serde_json::from_str(r#"{"control":"color","value":["green",50.0]}"#).unwrap();
        assert_eq!(c, Control::Color(Channel::Green, 50.0));
        let c: Control = serde_json::from_str(r#"{"control":"select_shape","value":"triangle"}"#).unwrap();
        assert_eq!(c, Control::SelectShape(ShapeKind::Triangle));
    }

    #[test]
    fn canvas_rect_rejects_zero_size() {
        assert!(CanvasRect::new(0.0, 0.0, 0.0, 400.0).is_err());
        assert!(CanvasRect::new(0.0, 0.0, 400.0, -1.0).is_err());
    }

    #[test]
    fn ndc_maps_center_and_corners() {
        let rect = CanvasRect::new(10.0, 20.0, 400.0, 400.0).unwrap();
        assert_eq!(rect.to_ndc(210.0, 220.0), [0.0, 0.0]);
        assert_eq!(rect.to_ndc(10.0, 20.0), [-1.0, 1.0], "top-left");
        assert_eq!(rect.to_ndc(410.0, 420.0), [1.0, -1.0], "bottom-right");
    }

    #[test]
    fn ndc_y_points_up() {
        let rect = CanvasRect::new(0.0, 0.0, 200.0, 100.0).unwrap();
        let [_, upper] = rect.to_ndc(100.0, 10.0);
        let [_, lower] = rect.to_ndc(100.0, 90.0);
        assert!(upper > lower);
    }

    #[test]
    fn pointer_paints_on_press_and_primary_drag_only() {
        assert!(paints(PointerKind::Down, 0));
        assert!(paints(PointerKind::Move, 1));
        assert!(!paints(PointerKind::Move, 0));
        assert!(!paints(PointerKind::Move, 2));
        assert!(!paints(PointerKind::Move, 3), "primary plus secondary is not a drag");
    }
}
