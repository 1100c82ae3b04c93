//! Error types for the duck-dodge core.

use thiserror::Error;

/// Errors produced by core operations.
///
/// Renderer setup failures live in [`crate::render::SetupError`] (behind the
/// `render` feature); everything here is GPU-independent.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Width or height was zero when describing the drawing surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A shape selector name was not recognized.
    #[error("unknown shape: {0} (expected point, triangle, or circle)")]
    UnknownShape(String),

    /// A view selector name was not recognized.
    #[error("unknown view: {0} (expected sketch, rig, or portrait)")]
    UnknownView(String),
}
