use ndarray::s;

use crate::cropping::domain::frame_cropper::FrameCropper;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Removes letterbox padding by cropping to the tightest box around all
/// pixels brighter than `black_threshold`.
///
/// Background is not required to be connected to the frame edge: any pixel
/// at or below the threshold counts as background, so dark content touching
/// the edge is trimmed along with the border.
pub struct BorderCropper {
    black_threshold: u8,
}

impl BorderCropper {
    pub fn new(black_threshold: u8) -> Self {
        Self { black_threshold }
    }

    pub fn black_threshold(&self) -> u8 {
        self.black_threshold
    }
}

impl FrameCropper for BorderCropper {
    fn crop(&self, frame: &Frame) -> Frame {
        crop_to_content(frame, self.black_threshold)
    }
}

/// Finds the inclusive bounds of every pixel whose intensity is strictly
/// greater than `black_threshold`. Returns `None` if there is no such pixel.
pub fn content_bounds(frame: &Frame, black_threshold: u8) -> Option<BoundingBox> {
    let intensity = frame.to_intensity();
    let mut bounds: Option<BoundingBox> = None;

    for ((row, col), &value) in intensity.indexed_iter() {
        if value <= black_threshold {
            continue;
        }
        bounds = Some(match bounds {
            None => BoundingBox {
                top: row,
                bottom: row,
                left: col,
                right: col,
            },
            Some(b) => BoundingBox {
                top: b.top.min(row),
                bottom: b.bottom.max(row),
                left: b.left.min(col),
                right: b.right.max(col),
            },
        });
    }

    bounds
}

/// Crops `frame` to its content bounds, keeping channel count and index.
///
/// A frame with no content (e.g. fully black) comes back as an unmodified copy.
pub fn crop_to_content(frame: &Frame, black_threshold: u8) -> Frame {
    let Some(bbox) = content_bounds(frame, black_threshold) else {
        log::warn!(
            "Frame {} is entirely at or below intensity {black_threshold}, skipping crop",
            frame.index()
        );
        return frame.clone();
    };

    if bbox.covers(frame.width() as usize, frame.height() as usize) {
        return frame.clone();
    }

    let pixels = frame.as_ndarray();
    let data: Vec<u8> = pixels
        .slice(s![bbox.top..=bbox.bottom, bbox.left..=bbox.right, ..])
        .iter()
        .copied()
        .collect();

    Frame::new(
        data,
        bbox.width() as u32,
        bbox.height() as u32,
        frame.channels(),
        frame.index(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Gray RGB frame filled with `fill`, with the given `(row, col, value)` pixels set.
    fn gray_frame(width: u32, height: u32, fill: u8, pixels: &[(usize, usize, u8)]) -> Frame {
        let mut data = vec![fill; (width * height * 3) as usize];
        for &(row, col, v) in pixels {
            let offset = (row * width as usize + col) * 3;
            data[offset..offset + 3].copy_from_slice(&[v, v, v]);
        }
        Frame::new(data, width, height, 3, 0)
    }

    /// `width` x `height` frame of black border around a filled content rectangle.
    fn letterboxed(
        width: u32,
        height: u32,
        bbox: BoundingBox,
        content: u8,
        border: u8,
    ) -> Frame {
        let mut pixels = Vec::new();
        for row in bbox.top..=bbox.bottom {
            for col in bbox.left..=bbox.right {
                pixels.push((row, col, content));
            }
        }
        gray_frame(width, height, border, &pixels)
    }

    #[test]
    fn test_all_black_frame_is_returned_unchanged() {
        let frame = gray_frame(8, 6, 0, &[]);
        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped, frame);
    }

    #[test]
    fn test_all_background_below_threshold_is_returned_unchanged() {
        // Compression noise just under the threshold is still background
        let frame = gray_frame(8, 6, 12, &[(2, 3, 15), (4, 1, 9)]);
        assert_eq!(crop_to_content(&frame, 15), frame);
        assert_eq!(content_bounds(&frame, 15), None);
    }

    #[test]
    fn test_empty_frame_is_returned_unchanged() {
        let frame = Frame::new(Vec::new(), 0, 0, 3, 4);
        assert_eq!(crop_to_content(&frame, 15), frame);
    }

    #[rstest]
    #[case::top_left(0, 0)]
    #[case::center(3, 4)]
    #[case::bottom_right(5, 7)]
    fn test_single_content_pixel_crops_to_one_by_one(#[case] row: usize, #[case] col: usize) {
        let frame = gray_frame(8, 6, 0, &[(row, col, 200)]);

        assert_eq!(
            content_bounds(&frame, 15),
            Some(BoundingBox {
                top: row,
                bottom: row,
                left: col,
                right: col
            })
        );

        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.width(), 1);
        assert_eq!(cropped.height(), 1);
        assert_eq!(cropped.data(), &[200, 200, 200]);
    }

    #[test]
    fn test_single_colored_pixel_keeps_original_channels() {
        let mut data = vec![0u8; 4 * 4 * 3];
        let offset = (2 * 4 + 1) * 3;
        data[offset..offset + 3].copy_from_slice(&[10, 220, 40]);
        let frame = Frame::new(data, 4, 4, 3, 0);

        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.data(), &[10, 220, 40]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // A pixel exactly at the threshold is background; one above is content
        let frame = gray_frame(5, 5, 0, &[(0, 0, 15), (2, 2, 16)]);
        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.width(), 1);
        assert_eq!(cropped.height(), 1);
        assert_eq!(cropped.data(), &[16, 16, 16]);
    }

    #[test]
    fn test_letterbox_is_removed() {
        let bbox = BoundingBox {
            top: 2,
            bottom: 7,
            left: 3,
            right: 12,
        };
        let frame = letterboxed(16, 10, bbox, 180, 5);

        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.width(), 10);
        assert_eq!(cropped.height(), 6);
        assert!(cropped.data().iter().all(|&p| p == 180));
    }

    #[test]
    fn test_bounds_span_scattered_content() {
        let frame = gray_frame(10, 8, 0, &[(1, 6, 90), (5, 2, 90), (3, 8, 90)]);
        assert_eq!(
            content_bounds(&frame, 15),
            Some(BoundingBox {
                top: 1,
                bottom: 5,
                left: 2,
                right: 8
            })
        );
        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.dimensions(), (7, 5));
    }

    #[test]
    fn test_crop_preserves_pixel_layout() {
        // Distinct values in the content area must come out row-major
        let frame = gray_frame(4, 4, 0, &[(1, 1, 20), (1, 2, 30), (2, 1, 40), (2, 2, 50)]);
        let cropped = crop_to_content(&frame, 15);
        let intensity = cropped.to_intensity();
        assert_eq!(intensity.dim(), (2, 2));
        assert_eq!(intensity[[0, 0]], 20);
        assert_eq!(intensity[[0, 1]], 30);
        assert_eq!(intensity[[1, 0]], 40);
        assert_eq!(intensity[[1, 1]], 50);
    }

    #[test]
    fn test_crop_is_idempotent() {
        let bbox = BoundingBox {
            top: 1,
            bottom: 4,
            left: 2,
            right: 6,
        };
        let frame = letterboxed(9, 7, bbox, 77, 0);
        let once = crop_to_content(&frame, 15);
        let twice = crop_to_content(&once, 15);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_frame_without_border_is_unchanged() {
        let frame = gray_frame(6, 4, 100, &[]);
        assert_eq!(crop_to_content(&frame, 15), frame);
    }

    #[test]
    fn test_crop_does_not_modify_input() {
        let frame = gray_frame(6, 6, 0, &[(2, 2, 255)]);
        let before = frame.clone();
        let _ = crop_to_content(&frame, 15);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_crop_keeps_frame_index() {
        let mut data = vec![0u8; 3 * 3 * 3];
        data[12..15].copy_from_slice(&[99, 99, 99]);
        let frame = Frame::new(data, 3, 3, 3, 42);
        assert_eq!(crop_to_content(&frame, 15).index(), 42);
    }

    #[test]
    fn test_single_channel_frames_are_cropped() {
        let frame = Frame::new(vec![0, 0, 0, 0, 80, 90, 0, 0, 0], 3, 3, 1, 0);
        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.channels(), 1);
        assert_eq!(cropped.dimensions(), (2, 1));
        assert_eq!(cropped.data(), &[80, 90]);
    }

    #[test]
    fn test_dark_content_touching_edge_is_trimmed_with_border() {
        // Columns 1-2 are dark content, indistinguishable from the border
        let frame = gray_frame(
            6,
            2,
            0,
            &[
                (0, 1, 10),
                (0, 2, 10),
                (1, 1, 10),
                (1, 2, 10),
                (0, 3, 200),
                (0, 4, 200),
                (1, 3, 200),
                (1, 4, 200),
            ],
        );
        let cropped = crop_to_content(&frame, 15);
        assert_eq!(cropped.dimensions(), (2, 2));
    }

    #[test]
    fn test_border_cropper_uses_configured_threshold() {
        let frame = gray_frame(5, 5, 0, &[(1, 1, 30), (3, 3, 120)]);

        let lenient = BorderCropper::new(15);
        assert_eq!(lenient.crop(&frame).dimensions(), (3, 3));

        let strict = BorderCropper::new(50);
        assert_eq!(strict.black_threshold(), 50);
        assert_eq!(strict.crop(&frame).dimensions(), (1, 1));
    }
}
