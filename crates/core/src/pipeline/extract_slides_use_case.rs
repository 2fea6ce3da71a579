use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;

use crate::cropping::domain::frame_cropper::FrameCropper;
use crate::cropping::infrastructure::border_cropper::BorderCropper;
use crate::detection::domain::change_detector::{ChangeDetector, Decision, DetectionError};
use crate::detection::domain::slide_change_detector::SlideChangeDetector;
use crate::pipeline::extraction_config::{ConfigError, ExtractionConfig};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

#[derive(Error, Debug)]
pub enum ExtractSlidesError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("video source produced no frames")]
    EmptySource,
    #[error("failed to decode frame {frame}: {message}")]
    Decode { frame: usize, message: String },
    #[error(transparent)]
    Detection(#[from] DetectionError),
}

/// Why a frame became a slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlideTrigger {
    Initial,
    Diff(f64),
}

impl fmt::Display for SlideTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideTrigger::Initial => write!(f, "initial frame"),
            SlideTrigger::Diff(score) => write!(f, "diff score: {score:.2}"),
        }
    }
}

/// A slide that was cropped and written.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideRecord {
    /// 1-based slide number, also used in the file name.
    pub ordinal: usize,
    /// Position of the source frame in the stream (0-based).
    pub frame_index: usize,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub trigger: SlideTrigger,
}

/// A slide that was detected but could not be written.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkFailure {
    pub ordinal: usize,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractionReport {
    pub frames_seen: usize,
    pub slides: Vec<SlideRecord>,
    pub failures: Vec<SinkFailure>,
}

impl ExtractionReport {
    /// Number of slides emitted, including ones whose write failed.
    pub fn slide_count(&self) -> usize {
        self.slides.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Slide extraction pipeline: read → detect change → crop → write, one
/// frame at a time in presentation order.
///
/// Write failures are logged and recorded in the report without stopping
/// the run; decode errors and resolution changes abort it.
pub struct ExtractSlidesUseCase {
    reader: Box<dyn VideoReader>,
    detector: Box<dyn ChangeDetector>,
    cropper: Box<dyn FrameCropper>,
    image_writer: Box<dyn ImageWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl ExtractSlidesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        detector: Box<dyn ChangeDetector>,
        cropper: Box<dyn FrameCropper>,
        image_writer: Box<dyn ImageWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            detector,
            cropper,
            image_writer,
            logger,
        }
    }

    /// Consumes the already-opened reader and writes every detected slide
    /// under `config.output_dir`.
    pub fn execute(
        &mut self,
        metadata: &VideoMetadata,
        config: &ExtractionConfig,
    ) -> Result<ExtractionReport, ExtractSlidesError> {
        config.validate()?;

        let Self {
            reader,
            detector,
            cropper,
            image_writer,
            logger,
        } = self;

        let total = metadata.total_frames;
        let mut report = ExtractionReport::default();

        for result in reader.frames() {
            let frame = result.map_err(|e| ExtractSlidesError::Decode {
                frame: report.frames_seen,
                message: e.to_string(),
            })?;
            let frame_index = report.frames_seen;
            report.frames_seen += 1;

            let started = Instant::now();
            let decision = detector.observe(&frame)?;
            logger.timing("decide", elapsed_ms(started));

            let trigger = match decision {
                Decision::Skipped => {
                    logger.progress(report.frames_seen, total);
                    continue;
                }
                Decision::Initial => SlideTrigger::Initial,
                Decision::Accepted(score) => {
                    logger.metric("diff_score", score);
                    SlideTrigger::Diff(score)
                }
            };

            let ordinal = report.slide_count() + 1;
            let path = config.slide_path(ordinal);

            let started = Instant::now();
            let cropped = cropper.crop(&frame);
            logger.timing("crop", elapsed_ms(started));

            let started = Instant::now();
            match image_writer.write(&path, &cropped) {
                Ok(()) => {
                    logger.info(&format!("Saved {} ({trigger})", path.display()));
                    report.slides.push(SlideRecord {
                        ordinal,
                        frame_index,
                        path,
                        width: cropped.width(),
                        height: cropped.height(),
                        trigger,
                    });
                }
                Err(e) => {
                    logger.warn(&format!("Failed to save {}: {e}", path.display()));
                    report.failures.push(SinkFailure {
                        ordinal,
                        path,
                        message: e.to_string(),
                    });
                }
            }
            logger.timing("write", elapsed_ms(started));
            logger.progress(report.frames_seen, total);
        }

        reader.close();

        if report.frames_seen == 0 {
            return Err(ExtractSlidesError::EmptySource);
        }

        logger.info(&format!(
            "Extraction complete: {} frames, {} slides, {} failed writes",
            report.frames_seen,
            report.slide_count(),
            report.failures.len()
        ));
        logger.summary();

        Ok(report)
    }
}

/// Runs slide extraction over an opened frame source with the stock
/// detector and border cropper built from `config`.
///
/// The debounce window is derived from the source's nominal frame rate.
pub fn process_video(
    reader: Box<dyn VideoReader>,
    metadata: &VideoMetadata,
    config: &ExtractionConfig,
    image_writer: Box<dyn ImageWriter>,
    logger: Box<dyn PipelineLogger>,
) -> Result<ExtractionReport, ExtractSlidesError> {
    config.validate()?;

    let detector = SlideChangeDetector::from_fps(
        metadata.fps,
        config.min_interval_secs,
        config.diff_threshold,
    );
    log::debug!(
        "Debounce window: {} frames at {:.3} fps",
        detector.min_frame_interval(),
        metadata.fps
    );
    let cropper = BorderCropper::new(config.black_threshold);

    let mut use_case = ExtractSlidesUseCase::new(
        reader,
        Box::new(detector),
        Box::new(cropper),
        image_writer,
        logger,
    );
    use_case.execute(metadata, config)
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
