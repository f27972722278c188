//! Pure calculation functions for image geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// A rectangular region of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the largest centered square inside a `width` x `height` image.
///
/// The excess on the long axis is split evenly. When the excess is odd the
/// extra pixel is trimmed from the trailing side (right or bottom), so the
/// leading offset is always `excess / 2` rounded down.
///
/// # Examples
/// ```
/// # use favicon_kit::imaging::{CropWindow, center_square};
/// // 5x3 landscape: two excess columns, one trimmed from each side
/// assert_eq!(center_square(5, 3), CropWindow { x: 1, y: 0, width: 3, height: 3 });
///
/// // 4x7 portrait: three excess rows, one leading, two trailing
/// assert_eq!(center_square(4, 7), CropWindow { x: 0, y: 1, width: 4, height: 4 });
/// ```
pub fn center_square(width: u32, height: u32) -> CropWindow {
    let edge = width.min(height);
    CropWindow {
        x: (width - edge) / 2,
        y: (height - edge) / 2,
        width: edge,
        height: edge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_input_is_untouched() {
        assert_eq!(
            center_square(512, 512),
            CropWindow {
                x: 0,
                y: 0,
                width: 512,
                height: 512
            }
        );
    }

    #[test]
    fn one_by_one_is_untouched() {
        assert_eq!(
            center_square(1, 1),
            CropWindow {
                x: 0,
                y: 0,
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn landscape_even_excess_splits_evenly() {
        let w = center_square(1920, 1080);
        assert_eq!(w.width, 1080);
        assert_eq!(w.height, 1080);
        assert_eq!(w.x, 420);
        assert_eq!(w.y, 0);
        // 420 trimmed on the left, 420 on the right
        assert_eq!(1920 - w.x - w.width, 420);
    }

    #[test]
    fn portrait_odd_excess_trims_trailing_side() {
        let w = center_square(10, 15);
        assert_eq!(w.width, 10);
        assert_eq!(w.y, 2);
        // 2 rows from the top, 3 from the bottom
        assert_eq!(15 - w.y - w.height, 3);
    }

    #[test]
    fn thin_strip_reduces_to_single_pixel_edge() {
        let w = center_square(1, 100);
        assert_eq!(w.width, 1);
        assert_eq!(w.height, 1);
        assert_eq!(w.x, 0);
        assert_eq!(w.y, 49);
    }
}
