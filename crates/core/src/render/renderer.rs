//! `Renderer` owns the GL context and executes frames.
//!
//! Setup failure is logged once and leaves the renderer without a pipeline;
//! every later draw returns immediately instead of erroring each frame.

use super::pipeline::{Pipeline, SetupError};
use crate::command::{DrawCall, Frame};

pub struct Renderer {
    gl: glow::Context,
    pipeline: Option<Pipeline>,
}

impl Renderer {
    /// Sets up the pipeline, or logs why it could not and keeps a renderer
    /// whose draws are no-ops.
    pub fn new(gl: glow::Context) -> Self {
        let pipeline = match Pipeline::new(&gl) {
            Ok(pipeline) => Some(pipeline),
            Err(e) => {
                log::error!("renderer setup failed, drawing disabled: {e}");
                None
            }
        };
        Self { gl, pipeline }
    }

    /// Builds a renderer from a context lookup. A failed lookup is logged
    /// once and yields `None`, leaving the host to run without drawing.
    pub fn attach(context: Result<glow::Context, SetupError>) -> Option<Self> {
        match context {
            Ok(gl) => Some(Self::new(gl)),
            Err(e) => {
                log::error!("no drawing context, drawing disabled: {e}");
                None
            }
        }
    }

    /// Whether setup succeeded and draws reach the GPU.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Sets the viewport to cover a `width` by `height` drawing buffer.
    /// Sizes beyond `i32::MAX` saturate.
    #[allow(unsafe_code)]
    pub fn resize(&self, width: u32, height: u32) {
        use glow::HasContext;

        let (w, h) = viewport_extent(width, height);
        // SAFETY: plain state call on the owned context.
        unsafe { self.gl.viewport(0, 0, w, h) };
    }

    /// Draws one call with whatever global rotation is currently bound.
    pub fn draw(&self, call: &DrawCall) {
        if let Some(pipeline) = &self.pipeline {
            pipeline.draw(&self.gl, call);
        }
    }

    /// Clears, binds the frame's global rotation, and draws every call in order.
    pub fn execute(&self, frame: &Frame) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        pipeline.begin(&self.gl, frame.clear_color.to_array(), &frame.global_rotation);
        for call in &frame.commands {
            pipeline.draw(&self.gl, call);
        }
    }
}

fn viewport_extent(width: u32, height: u32) -> (i32, i32) {
    (
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    )
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            pipeline.delete(&self.gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_exposes_expected_api() {
        fn _assert_api(r: &Renderer, frame: &Frame) {
            let _: bool = r.is_ready();
            let _: &glow::Context = r.gl();
            r.execute(frame);
            r.resize(400, 400);
        }
    }

    #[test]
    fn attach_without_context_is_none() {
        let missing = Err(SetupError::ContextUnavailable("webgl2 disabled".into()));
        assert!(Renderer::attach(missing).is_none());
    }

    #[test]
    fn viewport_extent_saturates_oversized_buffers() {
        assert_eq!(viewport_extent(400, 300), (400, 300));
        assert_eq!(viewport_extent(u32::MAX, 1), (i32::MAX, 1));
    }

    #[test]
    #[ignore = "requires GL context"]
    fn execute_draws_every_command() {
        // Would test: a rig frame renders 18 calls without GL errors.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn failed_setup_makes_draws_no_ops() {
        // Would test: a context that rejects the program yields
        // is_ready() == false and execute() returns without GL calls.
    }
}
