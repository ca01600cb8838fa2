//! Shared operator plumbing
//!
//! Every morphological operator computes output only where the whole
//! structuring element lies inside the image. Pixels outside that range
//! stay at zero.

use crate::MorphResult;
use pixops_core::Pix;
use std::ops::RangeInclusive;

/// A configured morphological operator
///
/// Operators are immutable once built and may be applied to any number of
/// images.
pub trait MorphOp {
    /// Short operator name, used in log output.
    fn name(&self) -> &'static str;

    /// Apply the operator, producing a new image of the same geometry.
    fn filter(&self, pix: &Pix) -> MorphResult<Pix>;
}

/// Inclusive pixel range over which an element can be placed safely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    /// First valid column
    pub x_min: u32,
    /// Last valid column
    pub x_max: u32,
    /// First valid row
    pub y_min: u32,
    /// Last valid row
    pub y_max: u32,
}

impl ScanRange {
    /// Valid columns.
    pub fn xs(&self) -> RangeInclusive<u32> {
        self.x_min..=self.x_max
    }

    /// Valid rows.
    pub fn ys(&self) -> RangeInclusive<u32> {
        self.y_min..=self.y_max
    }

    /// Number of positions in the range; never zero.
    pub(crate) fn len(&self) -> usize {
        (self.x_max - self.x_min + 1) as usize * (self.y_max - self.y_min + 1) as usize
    }
}

/// Compute the positions at which a `sel_width x sel_height` element with
/// the given origin lies entirely inside a `width x height` image.
///
/// The range is `x in [max(ox, 0), min(W-1, ox+W-w)]` and likewise for `y`.
/// Returns `None` when no such position exists.
pub fn scan_range(
    width: u32,
    height: u32,
    sel_width: u32,
    sel_height: u32,
    origin: (i32, i32),
) -> Option<ScanRange> {
    let axis = |n: u32, size: u32, o: i32| -> Option<(u32, u32)> {
        let lo = i64::from(o).max(0);
        let hi = (i64::from(n) - 1).min(i64::from(o) + i64::from(n) - i64::from(size));
        (lo <= hi).then_some((lo as u32, hi as u32))
    };
    let (x_min, x_max) = axis(width, sel_width, origin.0)?;
    let (y_min, y_max) = axis(height, sel_height, origin.1)?;
    Some(ScanRange {
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_origin() {
        let r = scan_range(20, 10, 3, 5, (1, 2)).unwrap();
        assert_eq!((r.x_min, r.x_max, r.y_min, r.y_max), (1, 18, 2, 7));
        assert_eq!(r.len(), 18 * 6);
    }

    #[test]
    fn test_corner_and_outside_origins() {
        let r = scan_range(10, 10, 3, 3, (0, 0)).unwrap();
        assert_eq!((r.x_min, r.x_max), (0, 7));
        let r = scan_range(10, 10, 3, 3, (2, 2)).unwrap();
        assert_eq!((r.x_min, r.x_max), (2, 9));
        // Origin left of the element shifts the range right.
        let r = scan_range(10, 10, 3, 3, (-2, 1)).unwrap();
        assert_eq!((r.x_min, r.x_max), (0, 5));
    }

    #[test]
    fn test_element_larger_than_image() {
        assert!(scan_range(4, 4, 5, 1, (2, 0)).is_none());
        assert!(scan_range(4, 4, 4, 4, (1, 1)).is_some());
    }
}
