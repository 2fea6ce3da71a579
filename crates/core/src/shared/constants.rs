/// Mean intensity difference above which a frame counts as a new slide.
pub const DEFAULT_DIFF_THRESHOLD: f64 = 15.0;

/// Minimum spacing between two accepted slides, in seconds of video.
pub const DEFAULT_MIN_INTERVAL_SECS: f64 = 2.0;

/// Highest intensity still treated as letterbox border.
pub const DEFAULT_BLACK_THRESHOLD: u8 = 15;

pub const DEFAULT_OUTPUT_DIR: &str = "slides_cropped_output";

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

pub const SLIDE_FILE_PREFIX: &str = "slide_";
pub const SLIDE_FILE_EXTENSION: &str = "jpg";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
