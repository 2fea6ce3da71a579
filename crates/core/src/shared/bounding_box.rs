/// Inclusive pixel bounds of the content area within a frame.
///
/// Row indices run `top..=bottom`, column indices `left..=right`, so a
/// single pixel at `(r, c)` is `BoundingBox { top: r, bottom: r, left: c, right: c }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// True if the box spans the whole `width` x `height` frame.
    pub fn covers(&self, width: usize, height: usize) -> bool {
        self.top == 0 && self.left == 0 && self.bottom + 1 == height && self.right + 1 == width
    }
}
