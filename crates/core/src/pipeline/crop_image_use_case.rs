use std::path::Path;

use crate::cropping::domain::frame_cropper::FrameCropper;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Single-image border removal: read → crop → write.
pub struct CropImageUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    cropper: Box<dyn FrameCropper>,
}

impl CropImageUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        cropper: Box<dyn FrameCropper>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            cropper,
        }
    }

    /// Crops the image at `input_path` and writes it to `output_path`.
    ///
    /// Returns the cropped frame so callers can report its size.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let metadata = self.reader.open(input_path)?;

        let frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let cropped = self.cropper.crop(&frame);
        log::debug!(
            "Cropped {}x{} image to {}x{}",
            metadata.width,
            metadata.height,
            cropped.width(),
            cropped.height()
        );

        self.image_writer.write(output_path, &cropped)?;
        Ok(cropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cropping::infrastructure::border_cropper::BorderCropper;
    use crate::shared::video_metadata::VideoMetadata;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageReader {
        frame: Option<Frame>,
    }

    impl VideoReader for StubImageReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            let frame = self.frame.as_ref().ok_or("missing")?;
            Ok(VideoMetadata {
                width: frame.width(),
                height: frame.height(),
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frame.take().into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.frame = None;
        }
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame)>>>,
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    struct FailingWriter;

    impl ImageWriter for FailingWriter {
        fn write(&self, _path: &Path, _frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            Err("read-only filesystem".into())
        }
    }

    /// 10x10 black frame with a white 4x2 block at rows 3-4, columns 2-5.
    fn letterboxed_frame() -> Frame {
        let mut data = vec![0u8; 10 * 10 * 3];
        for row in 3..5 {
            for col in 2..6 {
                let offset = (row * 10 + col) * 3;
                data[offset..offset + 3].fill(255);
            }
        }
        Frame::new(data, 10, 10, 3, 0)
    }

    #[test]
    fn test_crops_and_writes_to_output_path() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut use_case = CropImageUseCase::new(
            Box::new(StubImageReader {
                frame: Some(letterboxed_frame()),
            }),
            Box::new(StubImageWriter {
                written: written.clone(),
            }),
            Box::new(BorderCropper::new(15)),
        );

        let cropped = use_case
            .execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();
        assert_eq!(cropped.dimensions(), (4, 2));

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("out.png"));
        assert_eq!(written[0].1, cropped);
    }

    #[test]
    fn test_open_failure_is_propagated() {
        let mut use_case = CropImageUseCase::new(
            Box::new(StubImageReader { frame: None }),
            Box::new(FailingWriter),
            Box::new(BorderCropper::new(15)),
        );
        assert!(use_case
            .execute(Path::new("in.png"), Path::new("out.png"))
            .is_err());
    }

    #[test]
    fn test_write_failure_is_propagated() {
        let mut use_case = CropImageUseCase::new(
            Box::new(StubImageReader {
                frame: Some(letterboxed_frame()),
            }),
            Box::new(FailingWriter),
            Box::new(BorderCropper::new(15)),
        );
        let err = use_case
            .execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap_err();
        assert_eq!(err.to_string(), "read-only filesystem");
    }
}
