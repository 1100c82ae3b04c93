//! Frame-time readout shown under the canvas.

use std::fmt;

/// Wall-clock duration of one composed frame, optionally with the number of
/// shapes it drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    pub duration_ms: f64,
    pub shape_count: Option<usize>,
}

impl FrameTiming {
    /// Timing for a frame that started at `start_ms` and ended at `end_ms`.
    /// A clock that runs backwards yields a zero duration.
    pub fn between(start_ms: f64, end_ms: f64) -> Self {
        Self {
            duration_ms: (end_ms - start_ms).max(0.0),
            shape_count: None,
        }
    }

    pub fn with_shape_count(mut self, count: usize) -> Self {
        self.shape_count = Some(count);
        self
    }

    /// Whole milliseconds, truncated.
    pub fn whole_ms(&self) -> u64 {
        self.duration_ms.floor() as u64
    }

    /// Frames per second implied by the duration, truncated.
    ///
    /// Sub-millisecond frames count as one millisecond, so the readout tops
    /// out at 1000 instead of dividing by zero.
    pub fn fps(&self) -> u64 {
        (1000.0 / self.duration_ms.max(1.0)).floor() as u64
    }
}

impl fmt::Display for FrameTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.shape_count {
            write!(f, "numdot: {n} ")?;
        }
        write!(f, "ms: {} fps: {}", self.whole_ms(), self.fps())
    }
}
