use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use slide_extract_core::cropping::infrastructure::border_cropper::BorderCropper;
use slide_extract_core::pipeline::crop_image_use_case::CropImageUseCase;
use slide_extract_core::pipeline::extract_slides_use_case::{process_video, ExtractionReport};
use slide_extract_core::pipeline::extraction_config::ExtractionConfig;
use slide_extract_core::pipeline::pipeline_logger::ConsolePipelineLogger;
use slide_extract_core::shared::constants::{
    DEFAULT_BLACK_THRESHOLD, DEFAULT_DIFF_THRESHOLD, DEFAULT_JPEG_QUALITY,
    DEFAULT_MIN_INTERVAL_SECS, DEFAULT_OUTPUT_DIR, IMAGE_EXTENSIONS,
};
use slide_extract_core::video::domain::video_reader::VideoReader;
use slide_extract_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use slide_extract_core::video::infrastructure::image_file_reader::ImageFileReader;
use slide_extract_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Extract distinct, border-cropped slides from a slideshow video.
///
/// Given an image instead of a video, crops its border and writes it to OUTPUT.
#[derive(Parser)]
#[command(name = "slide-extract")]
struct Cli {
    /// Input video (or a single image to crop).
    input: PathBuf,

    /// Output directory for slides, or output file when cropping an image.
    output: Option<PathBuf>,

    /// Mean intensity difference (0-255) above which a frame is a new slide.
    #[arg(long, default_value_t = DEFAULT_DIFF_THRESHOLD)]
    diff_threshold: f64,

    /// Minimum seconds of video between two slides.
    #[arg(long, default_value_t = DEFAULT_MIN_INTERVAL_SECS)]
    min_interval: f64,

    /// Highest intensity (0-255) treated as black border. Raise it if borders
    /// survive cropping; lower it if dark slide content gets cut.
    #[arg(long, default_value_t = DEFAULT_BLACK_THRESHOLD)]
    black_threshold: u8,

    /// JPEG quality for written slides (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let writer = ImageFileWriter::new().with_jpeg_quality(cli.quality);

    if is_image(&cli.input) {
        let output = cli
            .output
            .as_deref()
            .ok_or("Output file is required when cropping an image")?;
        run_image_crop(&cli.input, output, cli.black_threshold, writer)
    } else {
        let config = ExtractionConfig {
            diff_threshold: cli.diff_threshold,
            min_interval_secs: cli.min_interval,
            black_threshold: cli.black_threshold,
            output_dir: cli
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        };
        run_slide_extraction(&cli.input, &config, writer)
    }
}

fn run_image_crop(
    input: &Path,
    output: &Path,
    black_threshold: u8,
    writer: ImageFileWriter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = CropImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(writer),
        Box::new(BorderCropper::new(black_threshold)),
    );
    let cropped = use_case.execute(input, output)?;
    log::info!(
        "Cropped image ({}x{}) written to {}",
        cropped.width(),
        cropped.height(),
        output.display()
    );
    Ok(())
}

fn run_slide_extraction(
    input: &Path,
    config: &ExtractionConfig,
    writer: ImageFileWriter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let metadata = reader.open(input)?;
    log::info!(
        "Opened {} ({}x{}, {:.2} fps, {})",
        input.display(),
        metadata.width,
        metadata.height,
        metadata.fps,
        metadata.codec
    );
    if let Some(secs) = metadata.duration_secs() {
        log::info!("Estimated duration: {secs:.1}s ({} frames)", metadata.total_frames);
    }
    if metadata.fps <= 0.0 {
        log::warn!("Source reports no frame rate; minimum slide interval is disabled");
    }

    let report = process_video(
        reader,
        &metadata,
        config,
        Box::new(writer),
        Box::new(ConsolePipelineLogger::default()),
    )?;

    print_report(&report, &config.output_dir);

    if !report.is_complete() {
        return Err(format!(
            "{} of {} slides could not be written",
            report.failures.len(),
            report.slide_count()
        )
        .into());
    }
    Ok(())
}

fn print_report(report: &ExtractionReport, output_dir: &Path) {
    eprintln!(
        "Frames seen: {}  Slides emitted: {}  Failed writes: {}",
        report.frames_seen,
        report.slide_count(),
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!(
            "  slide {} -> {}: {}",
            failure.ordinal,
            failure.path.display(),
            failure.message
        );
    }
    log::info!("Slides written to {}", output_dir.display());
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !cli.diff_threshold.is_finite() || !(0.0..=255.0).contains(&cli.diff_threshold) {
        return Err(format!(
            "Diff threshold must be between 0 and 255, got {}",
            cli.diff_threshold
        )
        .into());
    }
    if !cli.min_interval.is_finite() || cli.min_interval < 0.0 {
        return Err(format!(
            "Minimum interval must be a non-negative number of seconds, got {}",
            cli.min_interval
        )
        .into());
    }
    if !(1..=100).contains(&cli.quality) {
        return Err(format!("Quality must be between 1 and 100, got {}", cli.quality).into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
