use std::path::PathBuf;

/// Stream properties reported by a frame source when it is opened.
///
/// `total_frames` is the container's estimate and may be 0 when unknown;
/// it is only used for progress reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Duration in seconds implied by the frame count, if the rate is known.
    pub fn duration_secs(&self) -> Option<f64> {
        (self.fps > 0.0 && self.total_frames > 0).then(|| self.total_frames as f64 / self.fps)
    }
}
