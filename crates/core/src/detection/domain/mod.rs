pub mod change_detector;
pub mod slide_change_detector;
