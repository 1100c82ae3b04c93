//! CLI errors and their exit codes.
//!
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: sketch error (bad dimensions, color, shape, or view)
//! - 11: I/O error (writing a frame file)
//! - 12: input error (bad JSON params, bad key script)
//! - 13: serialization error

use duck_dodge_core::SketchError;
use std::fmt;

/// Failures of a CLI run; each kind exits with its own code.
pub enum CliError {
    /// Rejected sketch input (dimensions, color, shape, or view).
    Sketch(SketchError),
    /// Writing the frame file failed.
    Io(String),
    /// Malformed `--params` JSON, key script, or point.
    Input(String),
    /// Encoding output as JSON failed.
    Serialization(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sketch(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sketch(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl From<SketchError> for CliError {
    fn from(e: SketchError) -> Self {
        CliError::Sketch(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
