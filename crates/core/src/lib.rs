#![deny(unsafe_code)]
//! Core of the duck-dodge sketchpad.
//!
//! Geometry builders, the `Transform` model-matrix stack, `Shape`s and the
//! `Frame`/`DrawCall` command list, the scene composer, UI state, and the
//! obstacle game. Everything here is host-independent; the optional `render`
//! feature adds a glow-backed draw-call layer that executes frames.

pub mod color;
pub mod command;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod params;
pub mod prng;
pub mod scene;
pub mod shape;
pub mod timing;
pub mod transform;

#[cfg(feature = "render")]
pub mod render;

pub use color::Rgba;
pub use command::{DrawCall, DrawMode, Frame, Overlay};
pub use error::SketchError;
pub use game::{Game, GameConfig, Key, Phase};
pub use input::{CanvasRect, Control, UiState, View};
pub use prng::Xorshift64;
pub use scene::{compose, Sketch};
pub use shape::{Brush, Shape, ShapeKind};
pub use timing::FrameTiming;
pub use transform::Transform;
