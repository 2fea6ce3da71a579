use crate::shared::frame::Frame;

/// Domain interface for trimming a frame before it is saved as a slide.
///
/// Implementations never modify the input and never fail: a frame they
/// cannot trim is returned as an unmodified copy.
pub trait FrameCropper: Send {
    fn crop(&self, frame: &Frame) -> Frame;
}
