//! The linked program, its resolved locations, and the shared vertex buffer.

use super::shader::{
    compile_program, ShaderError, A_POSITION, FRAGMENT_SHADER, U_COLOR, U_GLOBAL_ROTATION, U_MODEL,
    U_SIZE, VERTEX_SHADER,
};
use crate::command::{DrawCall, DrawMode};
use crate::transform::Transform;
use thiserror::Error;

/// Why the draw-call layer could not be set up.
#[derive(Debug, Clone, Error)]
pub enum SetupError {
    #[error("WebGL2 context unavailable: {0}")]
    ContextUnavailable(String),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("attribute `{0}` not found in linked program")]
    MissingAttribute(String),
    #[error("uniform `{0}` not found in linked program")]
    MissingUniform(String),
    #[error("failed to create GPU resource: {0}")]
    Resource(String),
}

/// GL primitive for a draw mode.
pub fn gl_mode(mode: DrawMode) -> u32 {
    match mode {
        DrawMode::Points => glow::POINTS,
        DrawMode::Triangles => glow::TRIANGLES,
    }
}

/// Program, vertex array, and one dynamic buffer reused for every call.
pub struct Pipeline {
    program: glow::Program,
    vao: glow::VertexArray,
    buffer: glow::Buffer,
    a_position: u32,
    u_model: glow::UniformLocation,
    u_global_rotation: glow::UniformLocation,
    u_size: glow::UniformLocation,
    u_color: glow::UniformLocation,
}

impl Pipeline {
    /// Compiles the bundled shaders, resolves every location, and allocates
    /// the vertex buffer. Enables depth testing for the cube faces.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, SetupError> {
        use glow::HasContext;

        let program = compile_program(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let locations = resolve_locations(gl, program);

        // SAFETY: `program` was linked on this context. Every handle created
        // below is released if a later step fails.
        unsafe {
            let (a_position, [u_model, u_global_rotation, u_size, u_color]) = match locations {
                Ok(found) => found,
                Err(e) => {
                    gl.delete_program(program);
                    return Err(e);
                }
            };

            let vao = match gl.create_vertex_array() {
                Ok(vao) => vao,
                Err(e) => {
                    gl.delete_program(program);
                    return Err(SetupError::Resource(e));
                }
            };
            let buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    gl.delete_program(program);
                    return Err(SetupError::Resource(e));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.enable_vertex_attrib_array(a_position);
            gl.enable(glow::DEPTH_TEST);

            Ok(Self {
                program,
                vao,
                buffer,
                a_position,
                u_model,
                u_global_rotation,
                u_size,
                u_color,
            })
        }
    }

    /// Clears color and depth and binds the frame's global rotation.
    #[allow(unsafe_code)]
    pub fn begin(&self, gl: &glow::Context, clear: [f32; 4], global_rotation: &Transform) {
        use glow::HasContext;

        // SAFETY: the program and locations belong to this context.
        unsafe {
            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vao));
            gl.clear_color(clear[0], clear[1], clear[2], clear[3]);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.uniform_matrix_4_f32_slice(
                Some(&self.u_global_rotation),
                false,
                &global_rotation.to_cols_array(),
            );
        }
    }

    /// Uploads `call`'s vertices and issues one draw.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context, call: &DrawCall) {
        use glow::HasContext;

        let count = call.vertex_count();
        if count == 0 {
            return;
        }
        let color = call.color.to_array();

        // SAFETY: the buffer and locations belong to this context; the
        // attribute reads `components` floats per vertex from a tightly
        // packed f32 buffer of exactly `count` vertices.
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&call.vertices),
                glow::DYNAMIC_DRAW,
            );
            gl.vertex_attrib_pointer_f32(
                self.a_position,
                i32::from(call.components),
                glow::FLOAT,
                false,
                0,
                0,
            );
            gl.uniform_matrix_4_f32_slice(Some(&self.u_model), false, &call.model.to_cols_array());
            gl.uniform_4_f32(Some(&self.u_color), color[0], color[1], color[2], color[3]);
            gl.uniform_1_f32(Some(&self.u_size), call.point_size);
            gl.draw_arrays(gl_mode(call.mode), 0, count as i32);
        }
    }

    /// Releases the GL objects. The pipeline must not be used afterwards.
    #[allow(unsafe_code)]
    pub fn delete(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: handles were created on this context in `new`.
        unsafe {
            gl.delete_buffer(self.buffer);
            gl.delete_vertex_array(self.vao);
            gl.delete_program(self.program);
        }
    }
}

#[allow(unsafe_code)]
fn resolve_locations(
    gl: &glow::Context,
    program: glow::Program,
) -> Result<(u32, [glow::UniformLocation; 4]), SetupError> {
    use glow::HasContext;

    // SAFETY: location queries on a program linked on this context.
    let a_position = unsafe { gl.get_attrib_location(program, A_POSITION) }
        .ok_or_else(|| SetupError::MissingAttribute(A_POSITION.to_string()))?;
    let uniform = |name: &str| {
        unsafe { gl.get_uniform_location(program, name) }
            .ok_or_else(|| SetupError::MissingUniform(name.to_string()))
    };
    Ok((
        a_position,
        [
            uniform(U_MODEL)?,
            uniform(U_GLOBAL_ROTATION)?,
            uniform(U_SIZE)?,
            uniform(U_COLOR)?,
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_modes_map_to_gl_primitives() {
        assert_eq!(gl_mode(DrawMode::Points), glow::POINTS);
        assert_eq!(gl_mode(DrawMode::Triangles), glow::TRIANGLES);
    }

    #[test]
    fn setup_error_messages_name_the_missing_location() {
        let msg = SetupError::MissingUniform(U_COLOR.into()).to_string();
        assert!(msg.contains("u_color"), "{msg}");
        let msg = SetupError::MissingAttribute(A_POSITION.into()).to_string();
        assert!(msg.contains("a_position"), "{msg}");
    }

    #[test]
    fn shader_errors_convert_into_setup_errors() {
        let err: SetupError = ShaderError::LinkError("varying mismatch".into()).into();
        assert!(matches!(err, SetupError::Shader(_)));
        assert!(err.to_string().contains("varying mismatch"));
    }

    #[test]
    fn vertex_upload_is_byte_exact() {
        let vertices = [0.5_f32, -0.25];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &0.5_f32.to_ne_bytes());
    }

    #[test]
    #[ignore = "requires GL context"]
    fn pipeline_resolves_all_locations() {
        // Would test: Pipeline::new(gl) is Ok for the bundled shaders.
    }
}
