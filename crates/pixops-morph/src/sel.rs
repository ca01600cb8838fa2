//! Structuring elements for morphological operations
//!
//! A structuring element is a small `width x height` grid of weights with an
//! origin, the cell that is aligned with the image pixel being computed. The
//! origin is stored relative to the top-left corner and need not lie inside
//! the grid.
//!
//! Two variants exist:
//!
//! - [`BinarySel`]: weights in {0, 1}, probed with [`fits`](BinarySel::fits),
//!   [`fits_complement`](BinarySel::fits_complement) and
//!   [`hits`](BinarySel::hits)
//! - [`GreySel`]: arbitrary integer weights, probed with
//!   [`below`](GreySel::below) and [`above`](GreySel::above)
//!
//! [`Sel`] is the tagged union of both.
//!
//! # Probing
//!
//! All probes align the origin with `(x, y)`, so cell `(j, k)` of the element
//! lands on image pixel `(x - ox + j, y - oy + k)`. Probes do not check
//! bounds; callers restrict `(x, y)` to the range returned by
//! [`scan_range`](crate::scan_range).

use crate::{MorphError, MorphResult};
use pixops_core::Pix;
use std::fmt;

/// Canonical binary structuring element shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelShape {
    /// 3x3 plus sign
    Cross3x3,
    /// 5x5 plus sign
    Cross5x5,
    /// 5x5 diamond
    Diamond5x5,
    /// 7x7 diamond
    Diamond7x7,
    /// 5x5 disk
    Disk5x5,
    /// 7x7 disk
    Disk7x7,
}

impl SelShape {
    /// All canonical shapes.
    pub const ALL: [SelShape; 6] = [
        SelShape::Cross3x3,
        SelShape::Cross5x5,
        SelShape::Diamond5x5,
        SelShape::Diamond7x7,
        SelShape::Disk5x5,
        SelShape::Disk7x7,
    ];

    /// Side length of the (square) shape.
    pub fn size(self) -> u32 {
        match self {
            SelShape::Cross3x3 => 3,
            SelShape::Cross5x5 | SelShape::Diamond5x5 | SelShape::Disk5x5 => 5,
            SelShape::Diamond7x7 | SelShape::Disk7x7 => 7,
        }
    }

    /// Row-major `0`/`1` pattern of the shape.
    pub fn pattern(self) -> &'static str {
        match self {
            SelShape::Cross3x3 => "010111010",
            SelShape::Cross5x5 => "0010000100111110010000100",
            SelShape::Diamond5x5 => "0010001110111110111000100",
            SelShape::Diamond7x7 => "0001000001110001111101111111011111000111000001000",
            SelShape::Disk5x5 => "0111011111111111111101110",
            SelShape::Disk7x7 => "0011100011111011111111111111111111101111100011100",
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> MorphResult<()> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidSel(format!(
            "dimensions must be at least 1x1, got {width}x{height}"
        )));
    }
    Ok(())
}

fn check_len(width: u32, height: u32, len: usize) -> MorphResult<()> {
    let expected = width as usize * height as usize;
    if len != expected {
        return Err(MorphError::InvalidSel(format!(
            "expected {expected} values for {width}x{height}, got {len}"
        )));
    }
    Ok(())
}

/// Sample the first band at the raster position covered by cell (j, k).
#[inline]
fn sample_under(pix: &Pix, x: u32, y: u32, ox: i32, oy: i32, j: u32, k: u32) -> i32 {
    let px = x as i32 - ox + j as i32;
    let py = y as i32 - oy + k as i32;
    pix.get_pixel_unchecked(px as u32, py as u32) as i32
}

/// Binary structuring element
///
/// Weights are 0 or 1. Equality compares dimensions, origin and weights.
///
/// # Examples
///
/// ```
/// use pixops_morph::{BinarySel, SelShape};
///
/// let cross = BinarySel::from_shape(SelShape::Cross3x3);
/// assert_eq!(cross.hit_count(), 5);
/// assert_eq!(cross.origin(), (1, 1));
/// assert_eq!(cross.rotated().rotated(), cross);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySel {
    width: u32,
    height: u32,
    origin_x: i32,
    origin_y: i32,
    data: Vec<u8>,
}

impl BinarySel {
    /// Create a rectangular element with every weight set to 1.
    ///
    /// The origin is placed at `(width / 2, height / 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if either dimension is 0.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            origin_x: (width / 2) as i32,
            origin_y: (height / 2) as i32,
            data: vec![1; width as usize * height as usize],
        })
    }

    /// Build an element from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] for zero dimensions, a wrong
    /// number of values, or any value other than 0 or 1.
    pub fn from_values(width: u32, height: u32, values: &[u8]) -> MorphResult<Self> {
        check_dimensions(width, height)?;
        check_len(width, height, values.len())?;
        if let Some(&bad) = values.iter().find(|&&v| v > 1) {
            return Err(MorphError::InvalidSel(format!(
                "binary weight must be 0 or 1, got {bad}"
            )));
        }
        let mut sel = Self::new(width, height)?;
        sel.data.copy_from_slice(values);
        Ok(sel)
    }

    /// Build an element from a string of `0`/`1` digits in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if the string length is not
    /// `width * height` or it contains anything other than `0` and `1`.
    pub fn from_pattern(width: u32, height: u32, pattern: &str) -> MorphResult<Self> {
        let values = pattern
            .chars()
            .map(|c| match c.to_digit(2) {
                Some(d) => Ok(d as u8),
                None => Err(MorphError::InvalidSel(format!(
                    "invalid binary weight {c:?}"
                ))),
            })
            .collect::<MorphResult<Vec<u8>>>()?;
        Self::from_values(width, height, &values)
    }

    /// Build one of the canonical shapes, with a centred origin.
    pub fn from_shape(shape: SelShape) -> Self {
        let size = shape.size();
        let data = shape.pattern().bytes().map(|b| b - b'0').collect();
        Self {
            width: size,
            height: size,
            origin_x: (size / 2) as i32,
            origin_y: (size / 2) as i32,
            data,
        }
    }

    /// Return the element with its origin moved to `(x, y)`.
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.set_origin(x, y);
        self
    }

    /// Width of the element.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the element.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Origin `(x, y)` relative to the top-left cell.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Move the origin.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Weight at cell `(x, y)`, or `None` outside the element.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    fn put(&mut self, x: u32, y: u32, value: u8) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "cell ({x}, {y}) outside {}x{} element",
                self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = value;
        Ok(())
    }

    /// Set the weight of cell `(x, y)` to 1.
    pub fn set_pixel(&mut self, x: u32, y: u32) -> MorphResult<()> {
        self.put(x, y, 1)
    }

    /// Set the weight of cell `(x, y)` to 0.
    pub fn clear_pixel(&mut self, x: u32, y: u32) -> MorphResult<()> {
        self.put(x, y, 0)
    }

    /// Set every weight to 1.
    pub fn set_all(&mut self) {
        self.data.fill(1);
    }

    /// Row-major weights.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of cells with weight 1.
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// Iterate over weight-1 cells as offsets from the origin.
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let ox = self.origin_x;
        let oy = self.origin_y;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &v)| {
                if v == 1 {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - ox, y - oy))
                } else {
                    None
                }
            })
    }

    /// Iterate over weight-1 cells as `(j, k)` grid coordinates.
    fn hit_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 1)
            .map(move |(idx, _)| (idx as u32 % width, idx as u32 / width))
    }

    /// True if every weight-1 cell covers a non-zero sample.
    ///
    /// # Panics
    ///
    /// Panics if a covered position falls outside `pix`.
    pub fn fits(&self, pix: &Pix, x: u32, y: u32) -> bool {
        let (ox, oy) = self.origin();
        self.hit_cells()
            .all(|(j, k)| sample_under(pix, x, y, ox, oy, j, k) != 0)
    }

    /// True if every weight-1 cell covers a zero sample.
    ///
    /// # Panics
    ///
    /// Panics if a covered position falls outside `pix`.
    pub fn fits_complement(&self, pix: &Pix, x: u32, y: u32) -> bool {
        let (ox, oy) = self.origin();
        self.hit_cells()
            .all(|(j, k)| sample_under(pix, x, y, ox, oy, j, k) == 0)
    }

    /// True if any weight-1 cell covers a non-zero sample.
    ///
    /// # Panics
    ///
    /// Panics if a covered position falls outside `pix`.
    pub fn hits(&self, pix: &Pix, x: u32, y: u32) -> bool {
        let (ox, oy) = self.origin();
        self.hit_cells()
            .any(|(j, k)| sample_under(pix, x, y, ox, oy, j, k) != 0)
    }

    /// Element rotated through 180 degrees about its centre.
    ///
    /// Dimensions and origin are unchanged.
    pub fn rotated(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            data: self.data.iter().rev().copied().collect(),
        }
    }
}

impl fmt::Display for BinarySel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinarySel: size {}x{}, origin ({},{})",
            self.width, self.height, self.origin_x, self.origin_y
        )
    }
}

/// Grey structuring element
///
/// Weights are arbitrary integers interpreted as height offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreySel {
    width: u32,
    height: u32,
    origin_x: i32,
    origin_y: i32,
    data: Vec<i32>,
}

impl GreySel {
    /// Create a rectangular element with every weight set to `value`.
    ///
    /// The origin is placed at `(width / 2, height / 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if either dimension is 0.
    pub fn new(width: u32, height: u32, value: i32) -> MorphResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            origin_x: (width / 2) as i32,
            origin_y: (height / 2) as i32,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Build an element from row-major weights.
    pub fn from_values(width: u32, height: u32, values: &[i32]) -> MorphResult<Self> {
        check_len(width, height, values.len())?;
        let mut sel = Self::new(width, height, 0)?;
        sel.data.copy_from_slice(values);
        Ok(sel)
    }

    /// Build an element from whitespace-separated integers in row-major
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if a token is not an integer or the
    /// token count is not `width * height`.
    pub fn from_pattern(width: u32, height: u32, pattern: &str) -> MorphResult<Self> {
        let values = pattern
            .split_whitespace()
            .map(|tok| {
                tok.parse::<i32>()
                    .map_err(|_| MorphError::InvalidSel(format!("invalid grey weight {tok:?}")))
            })
            .collect::<MorphResult<Vec<i32>>>()?;
        Self::from_values(width, height, &values)
    }

    /// Return the element with its origin moved to `(x, y)`.
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.set_origin(x, y);
        self
    }

    /// Width of the element.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the element.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Origin `(x, y)` relative to the top-left cell.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Move the origin.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Weight at cell `(x, y)`, or `None` outside the element.
    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set the weight of cell `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: i32) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "cell ({x}, {y}) outside {}x{} element",
                self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = value;
        Ok(())
    }

    /// Set every weight to `value`.
    pub fn set_all(&mut self, value: i32) {
        self.data.fill(value);
    }

    /// Row-major weights.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Minimum of `sample - weight` over every cell.
    ///
    /// This is the grey erosion value at `(x, y)`. The result is widened to
    /// `i64` so any `i32` weight is exact.
    ///
    /// # Panics
    ///
    /// Panics if a covered position falls outside `pix`.
    pub fn below(&self, pix: &Pix, x: u32, y: u32) -> i64 {
        let (ox, oy) = self.origin();
        let mut min = i64::MAX;
        for k in 0..self.height {
            for j in 0..self.width {
                let w = i64::from(self.data[(k * self.width + j) as usize]);
                min = min.min(i64::from(sample_under(pix, x, y, ox, oy, j, k)) - w);
            }
        }
        min
    }

    /// Maximum of `sample + weight` with the weights taken in reverse
    /// order, i.e. from the 180-degree rotated element.
    ///
    /// This is the grey dilation value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if a covered position falls outside `pix`.
    pub fn above(&self, pix: &Pix, x: u32, y: u32) -> i64 {
        let (ox, oy) = self.origin();
        let last = self.data.len() - 1;
        let mut max = i64::MIN;
        for k in 0..self.height {
            for j in 0..self.width {
                let w = i64::from(self.data[last - (k * self.width + j) as usize]);
                max = max.max(i64::from(sample_under(pix, x, y, ox, oy, j, k)) + w);
            }
        }
        max
    }

    /// Element rotated through 180 degrees about its centre.
    ///
    /// Dimensions and origin are unchanged.
    pub fn rotated(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            data: self.data.iter().rev().copied().collect(),
        }
    }
}

impl fmt::Display for GreySel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GreySel: size {}x{}, origin ({},{})",
            self.width, self.height, self.origin_x, self.origin_y
        )
    }
}

/// Structuring element of either variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sel {
    /// Binary weights
    Binary(BinarySel),
    /// Integer weights
    Grey(GreySel),
}

impl Sel {
    /// Width of the element.
    pub fn width(&self) -> u32 {
        match self {
            Sel::Binary(s) => s.width(),
            Sel::Grey(s) => s.width(),
        }
    }

    /// Height of the element.
    pub fn height(&self) -> u32 {
        match self {
            Sel::Binary(s) => s.height(),
            Sel::Grey(s) => s.height(),
        }
    }

    /// Origin `(x, y)` relative to the top-left cell.
    pub fn origin(&self) -> (i32, i32) {
        match self {
            Sel::Binary(s) => s.origin(),
            Sel::Grey(s) => s.origin(),
        }
    }

    /// Element rotated through 180 degrees.
    pub fn rotated(&self) -> Self {
        match self {
            Sel::Binary(s) => Sel::Binary(s.rotated()),
            Sel::Grey(s) => Sel::Grey(s.rotated()),
        }
    }

    /// Borrow the binary variant, if this is one.
    pub fn as_binary(&self) -> Option<&BinarySel> {
        match self {
            Sel::Binary(s) => Some(s),
            Sel::Grey(_) => None,
        }
    }

    /// Borrow the grey variant, if this is one.
    pub fn as_grey(&self) -> Option<&GreySel> {
        match self {
            Sel::Grey(s) => Some(s),
            Sel::Binary(_) => None,
        }
    }
}

impl From<BinarySel> for Sel {
    fn from(sel: BinarySel) -> Self {
        Sel::Binary(sel)
    }
}

impl From<GreySel> for Sel {
    fn from(sel: GreySel) -> Self {
        Sel::Grey(sel)
    }
}

impl fmt::Display for Sel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sel::Binary(s) => fmt::Display::fmt(s, f),
            Sel::Grey(s) => fmt::Display::fmt(s, f),
        }
    }
}
