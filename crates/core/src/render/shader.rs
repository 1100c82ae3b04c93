//! Shader sources plus compile and link helpers for WebGL2.
//!
//! One program draws everything: 2D shapes in NDC, point sprites, and cube
//! faces. The vertex stage multiplies `a_position` by the per-call model
//! matrix and the per-frame global rotation; the fragment stage writes the
//! call's flat color.

use thiserror::Error;

/// Name of the position attribute in [`VERTEX_SHADER`].
pub const A_POSITION: &str = "a_position";
/// Uniform names the pipeline resolves after linking.
pub const U_MODEL: &str = "u_model";
pub const U_GLOBAL_ROTATION: &str = "u_global_rotation";
pub const U_SIZE: &str = "u_size";
pub const U_COLOR: &str = "u_color";

/// GLSL ES 3.0 vertex shader.
///
/// 2D calls bind a two-component attribute; GL fills `z = 0, w = 1`, so the
/// same program handles both vertex layouts.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec4 a_position;
uniform mat4 u_model;
uniform mat4 u_global_rotation;
uniform float u_size;
void main() {
    gl_Position = u_global_rotation * u_model * a_position;
    gl_PointSize = u_size;
}
"#;

/// GLSL ES 3.0 fragment shader writing a uniform color.
pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 frag_color;
void main() {
    frag_color = u_color;
}
"#;

/// Errors from compiling a stage or linking the program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError { stage: String, log: String },
    #[error("shader link error:\n{0}")]
    LinkError(String),
}

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }

    /// The GL enum passed to `create_shader`.
    pub fn gl_type(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// Numbers each source line (right-aligned) and appends the driver log, so
/// `0:LINE` references in the log can be matched by eye.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();
    let numbered = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, _) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles one stage, deleting the shader object if compilation fails.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: Stage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    let compile_error = |log: String| ShaderError::CompileError {
        stage: stage.name().to_string(),
        log,
    };

    // SAFETY: glow marks raw GL calls unsafe. The shader handle comes from
    // create_shader on this context and is deleted on the failure path.
    unsafe {
        let shader = gl.create_shader(stage.gl_type()).map_err(compile_error)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if gl.get_shader_compile_status(shader) {
            Ok(shader)
        } else {
            let info_log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            Err(compile_error(format_shader_error(source, &info_log)))
        }
    }
}

/// Links two compiled stages. Shaders are detached afterwards either way.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: handles come from this context; the program is deleted if
    // linking fails.
    unsafe {
        let program = gl.create_program().map_err(ShaderError::LinkError)?;
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);

        if gl.get_program_link_status(program) {
            Ok(program)
        } else {
            let info_log = gl.get_program_info_log(program);
            gl.delete_program(program);
            Err(ShaderError::LinkError(info_log))
        }
    }
}

/// Compiles both sources and links them. Intermediate shader objects are
/// always released.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vert = compile_shader(gl, Stage::Vertex, vertex_src)?;
    let frag = match compile_shader(gl, Stage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: `vert` was created by compile_shader on this context.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    let result = link_program(gl, vert, frag);

    // SAFETY: the linked program keeps its own reference to the stages.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    result
}
