use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageFormat, RgbImage};

use crate::shared::constants::DEFAULT_JPEG_QUALITY;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes a single frame to an image file using the `image` crate.
///
/// JPEG output uses the configured quality (1-100); other formats are
/// encoded with the crate defaults.
pub struct ImageFileWriter {
    jpeg_quality: u8,
}

impl ImageFileWriter {
    pub fn new() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let color_type = match frame.channels() {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            n => return Err(format!("Unsupported channel count for image output: {n}").into()),
        };

        if ImageFormat::from_path(path).ok() == Some(ImageFormat::Jpeg) {
            let file = BufWriter::new(File::create(path)?);
            let mut encoder = JpegEncoder::new_with_quality(file, self.jpeg_quality);
            encoder.encode(frame.data(), frame.width(), frame.height(), color_type)?;
            return Ok(());
        }

        let img = to_dynamic_image(frame).ok_or("Failed to create image from frame data")?;
        img.save(path)?;
        Ok(())
    }
}

fn to_dynamic_image(frame: &Frame) -> Option<DynamicImage> {
    let data = frame.data().to_vec();
    match frame.channels() {
        1 => GrayImage::from_raw(frame.width(), frame.height(), data).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(frame.width(), frame.height(), data).map(DynamicImage::ImageRgb8),
        _ => None,
    }
}
