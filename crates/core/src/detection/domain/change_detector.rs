use thiserror::Error;

use crate::shared::frame::Frame;

/// Outcome of observing one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    /// First frame of the stream; always starts the first slide.
    Initial,
    /// Frame differs from the last slide by the given mean intensity score.
    Accepted(f64),
    /// Frame is a duplicate of, or too close in time to, the last slide.
    Skipped,
}

impl Decision {
    /// True for decisions that start a new slide.
    pub fn is_new_slide(&self) -> bool {
        !matches!(self, Decision::Skipped)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DetectionError {
    #[error(
        "frame {frame_index} is {}x{} but the comparison baseline is {}x{}",
        .actual.0,
        .actual.1,
        .expected.0,
        .expected.1
    )]
    DimensionMismatch {
        frame_index: usize,
        /// Baseline `(width, height)`.
        expected: (u32, u32),
        /// Incoming frame `(width, height)`.
        actual: (u32, u32),
    },
}

/// Domain interface for deciding which frames of a stream start a new slide.
///
/// Implementations are stateful and expect frames in presentation order,
/// hence `&mut self`.
pub trait ChangeDetector: Send {
    fn observe(&mut self, frame: &Frame) -> Result<Decision, DetectionError>;
}
