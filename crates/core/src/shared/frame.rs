use ndarray::{Array2, ArrayView3};

/// Fixed-point BT.601 luma weights (14-bit), matching the rounding used by
/// common RGB-to-gray conversions so that a gray pixel `(v, v, v)` maps to `v`.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// A single decoded frame: contiguous pixel bytes in row-major order.
///
/// Color frames carry 3 channels (RGB, as produced by the readers);
/// intensity frames carry 1. Format conversion happens at I/O boundaries,
/// except for the intensity view the slide logic compares on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Builds a single-channel frame from an intensity matrix of shape `(height, width)`.
    pub fn from_intensity(intensity: &Array2<u8>, index: usize) -> Self {
        let (height, width) = intensity.dim();
        let data: Vec<u8> = intensity.iter().copied().collect();
        Self::new(data, width as u32, height as u32, 1, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Returns the per-pixel intensity as a `(height, width)` matrix.
    ///
    /// Single-channel frames are copied as-is. Frames with 3 or more channels
    /// are treated as RGB and reduced with BT.601 luma weights; any channel
    /// beyond the third (e.g. alpha) is ignored.
    pub fn to_intensity(&self) -> Array2<u8> {
        let (h, w, c) = self.shape();
        if c == 1 {
            return Array2::from_shape_vec((h, w), self.data.clone())
                .expect("Frame data length must match dimensions");
        }

        let pixels = self.as_ndarray();
        Array2::from_shape_fn((h, w), |(row, col)| {
            let r = pixels[[row, col, 0]] as u32;
            let g = pixels[[row, col, 1]] as u32;
            let b = pixels[[row, col, 2]] as u32;
            ((LUMA_R * r + LUMA_G * g + LUMA_B * b + LUMA_ROUND) >> LUMA_SHIFT) as u8
        })
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    fn rgb_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let data = rgb.repeat((width * height) as usize);
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.dimensions(), (2, 2));
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGB: set pixel (row=1, col=0) to red
        let mut data = vec![0u8; 12];
        data[6] = 255;
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }

    #[rstest]
    #[case::black(0)]
    #[case::dark(15)]
    #[case::mid(128)]
    #[case::white(255)]
    fn test_gray_rgb_maps_to_same_intensity(#[case] v: u8) {
        let frame = rgb_frame(3, 2, [v, v, v]);
        let intensity = frame.to_intensity();
        assert_eq!(intensity.dim(), (2, 3));
        assert!(intensity.iter().all(|&p| p == v));
    }

    #[rstest]
    #[case::red([255, 0, 0], 76)]
    #[case::green([0, 255, 0], 150)]
    #[case::blue([0, 0, 255], 29)]
    fn test_primary_colors_use_luma_weights(#[case] rgb: [u8; 3], #[case] expected: u8) {
        let frame = rgb_frame(1, 1, rgb);
        assert_eq!(frame.to_intensity()[[0, 0]], expected);
    }

    #[test]
    fn test_single_channel_intensity_is_copied() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 3, 2, 1, 0);
        assert_eq!(frame.to_intensity(), array![[1, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn test_from_intensity_round_trips_layout() {
        let m = array![[10u8, 20], [30, 40], [50, 60]];
        let frame = Frame::from_intensity(&m, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.channels(), 1);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Frame::new(Vec::new(), 0, 4, 3, 0).is_empty());
        assert!(!rgb_frame(1, 1, [0, 0, 0]).is_empty());
    }
}
