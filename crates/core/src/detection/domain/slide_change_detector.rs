use ndarray::Array2;

use crate::detection::domain::change_detector::{ChangeDetector, Decision, DetectionError};
use crate::shared::frame::Frame;

/// Mutable comparison state, created from the first observed frame.
struct DetectorState {
    /// Intensity of the last accepted slide, not of the last frame seen.
    last_compared: Array2<u8>,
    last_accepted_index: usize,
    current_index: usize,
}

/// Debounced slide-change detector.
///
/// Each frame after the first is compared against the last *accepted* slide
/// by mean absolute intensity difference. Frames within `min_frame_interval`
/// of the last accepted slide are skipped without comparison. Because the
/// baseline only moves on acceptance, slow drift that stays under the
/// threshold frame-to-frame still triggers once the total exceeds it.
pub struct SlideChangeDetector {
    min_frame_interval: usize,
    diff_threshold: f64,
    state: Option<DetectorState>,
}

impl SlideChangeDetector {
    pub fn new(min_frame_interval: usize, diff_threshold: f64) -> Self {
        Self {
            min_frame_interval,
            diff_threshold,
            state: None,
        }
    }

    /// Builds a detector whose debounce window spans `min_interval_secs`
    /// of video at the given frame rate.
    pub fn from_fps(fps: f64, min_interval_secs: f64, diff_threshold: f64) -> Self {
        Self::new(min_frame_interval(fps, min_interval_secs), diff_threshold)
    }

    pub fn min_frame_interval(&self) -> usize {
        self.min_frame_interval
    }

    pub fn diff_threshold(&self) -> f64 {
        self.diff_threshold
    }

    /// True once the first frame has been observed.
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// Counter of the most recently observed frame (0 for the first).
    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.current_index)
    }

    pub fn last_accepted_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.last_accepted_index)
    }
}

impl ChangeDetector for SlideChangeDetector {
    fn observe(&mut self, frame: &Frame) -> Result<Decision, DetectionError> {
        let Some(state) = self.state.as_mut() else {
            self.state = Some(DetectorState {
                last_compared: frame.to_intensity(),
                last_accepted_index: 0,
                current_index: 0,
            });
            return Ok(Decision::Initial);
        };

        state.current_index += 1;
        if state.current_index - state.last_accepted_index < self.min_frame_interval {
            return Ok(Decision::Skipped);
        }

        let intensity = frame.to_intensity();
        if intensity.dim() != state.last_compared.dim() {
            let (h, w) = state.last_compared.dim();
            return Err(DetectionError::DimensionMismatch {
                frame_index: state.current_index,
                expected: (w as u32, h as u32),
                actual: frame.dimensions(),
            });
        }

        let score = mean_absolute_difference(&state.last_compared, &intensity);
        if score > self.diff_threshold {
            state.last_compared = intensity;
            state.last_accepted_index = state.current_index;
            Ok(Decision::Accepted(score))
        } else {
            Ok(Decision::Skipped)
        }
    }
}

/// Number of frames spanning `min_interval_secs` at `fps`, rounded down.
///
/// Non-positive or non-finite products yield 0 (no debounce).
pub fn min_frame_interval(fps: f64, min_interval_secs: f64) -> usize {
    let frames = (fps * min_interval_secs).floor();
    if frames.is_finite() && frames > 0.0 {
        frames as usize
    } else {
        0
    }
}

/// Mean over all positions of `|a - b|`. Both matrices must have the same shape.
///
/// Returns 0.0 for empty matrices.
pub fn mean_absolute_difference(a: &Array2<u8>, b: &Array2<u8>) -> f64 {
    debug_assert_eq!(a.dim(), b.dim(), "intensity matrices must match in shape");
    if a.is_empty() {
        return 0.0;
    }
    let total: u64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| x.abs_diff(y) as u64)
        .sum();
    total as f64 / a.len() as f64
}
