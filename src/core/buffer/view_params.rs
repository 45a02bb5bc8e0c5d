use crate::core::filmview::types::Float;

/// Fractional render border inside the film, (min_x, max_x, min_y, max_y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub min_x: Float,
    pub max_x: Float,
    pub min_y: Float,
    pub max_y: Float,
}

impl Border {
    pub fn full() -> Self {
        Border {
            min_x: 0.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 1.0,
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Border::full()
    }
}

/// The viewing parameters a preview buffer was built for.
///
/// This is the staleness key: a buffer only ever matches the exact
/// parameters captured at its construction, and any change means the host
/// must discard it and build a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    pub width: usize,
    pub height: usize,
    pub border: Border,
    pub offset_x: i32,
    pub offset_y: i32,
    pub pixel_size: u32,
    pub transparent: bool,
}

impl ViewParams {
    pub fn new(width: usize, height: usize) -> Self {
        ViewParams {
            width,
            height,
            border: Border::full(),
            offset_x: 0,
            offset_y: 0,
            pixel_size: 1,
            transparent: false,
        }
    }
}
