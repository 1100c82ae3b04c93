//! WebGL2 draw-call layer.
//!
//! Only available with the `render` feature. Executes the host-independent
//! [`Frame`](crate::command::Frame)s built by the scene composer and the game.
//!
//! - [`shader`] -- bundled GLSL sources, compilation, and error formatting.
//! - [`pipeline`] -- linked program, resolved locations, vertex buffer.
//! - [`renderer`] -- context owner that degrades to no-ops on setup failure.

pub mod pipeline;
pub mod renderer;
pub mod shader;

pub use pipeline::{Pipeline, SetupError};
pub use renderer::Renderer;
pub use shader::{compile_program, compile_shader, format_shader_error, link_program, ShaderError, Stage};
