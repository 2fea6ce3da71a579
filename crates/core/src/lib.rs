//! Slide extraction for slideshow-style video recordings.
//!
//! Frames are pulled from a [`video::domain::video_reader::VideoReader`],
//! a [`detection::domain::slide_change_detector::SlideChangeDetector`]
//! decides which of them start a new slide, and each slide is trimmed of
//! letterbox borders by a
//! [`cropping::infrastructure::border_cropper::BorderCropper`] before being
//! written as an image.

pub mod cropping;
pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod video;
