//! Binary morphological operations
//!
//! Implements dilation, erosion, opening and closing with a [`BinarySel`].
//!
//! Accepted inputs are single-band images that hold at most one non-zero
//! value: `Bit1` images (foreground written as 1) and `Bit8` images whose
//! histogram has at most one occupied non-zero bin (foreground written as
//! 255). Output has the depth of the input.

use crate::ops::{MorphOp, scan_range};
use crate::sel::BinarySel;
use crate::{MorphError, MorphResult};
use log::trace;
use pixops_core::{Pix, PixMut, PixelDepth};

/// Validate a binary source image and return its foreground output value.
///
/// # Errors
///
/// - [`MorphError::UnsupportedDepth`] for multi-band images
/// - [`MorphError::InvalidImage`] for a `Bit8` image with more than one
///   distinct non-zero value
pub fn check_binary_image(pix: &Pix) -> MorphResult<u32> {
    if pix.spp() != 1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "single-band binary",
            actual: pix.depth().bits() * pix.spp(),
        });
    }
    match pix.depth() {
        PixelDepth::Bit1 => Ok(1),
        PixelDepth::Bit8 => {
            let levels = pix.count_nonzero_levels()?;
            if levels > 1 {
                return Err(MorphError::InvalidImage(format!(
                    "not a binary image: {levels} distinct non-zero values"
                )));
            }
            Ok(255)
        }
    }
}

/// Write `value` wherever `keep` holds inside the element's scan range.
fn binary_scan<F>(pix: &Pix, sel: &BinarySel, op: &str, keep: F) -> MorphResult<Pix>
where
    F: Fn(&BinarySel, &Pix, u32, u32) -> bool,
{
    let value = check_binary_image(pix)?;
    trace!(
        "{op}: {}x{} image, {}x{} sel",
        pix.width(),
        pix.height(),
        sel.width(),
        sel.height()
    );

    let mut out = PixMut::new(pix.width(), pix.height(), pix.depth())?;
    let range = scan_range(
        pix.width(),
        pix.height(),
        sel.width(),
        sel.height(),
        sel.origin(),
    );
    if let Some(range) = range {
        for y in range.ys() {
            for x in range.xs() {
                if keep(sel, pix, x, y) {
                    out.set_pixel_unchecked(x, y, value);
                }
            }
        }
    }
    Ok(out.into())
}

/// Binary dilation
///
/// A pixel becomes foreground if any weight-1 cell of the element covers
/// foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryDilate {
    sel: BinarySel,
}

impl BinaryDilate {
    /// Create a dilation with `sel`.
    pub fn new(sel: BinarySel) -> Self {
        Self { sel }
    }

    /// Structuring element in use.
    pub fn sel(&self) -> &BinarySel {
        &self.sel
    }

    /// Dilate `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        binary_scan(pix, &self.sel, "binary dilate", BinarySel::hits)
    }
}

/// Binary erosion
///
/// A pixel stays foreground only if every weight-1 cell of the element
/// covers foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryErode {
    sel: BinarySel,
}

impl BinaryErode {
    /// Create an erosion with `sel`.
    pub fn new(sel: BinarySel) -> Self {
        Self { sel }
    }

    /// Structuring element in use.
    pub fn sel(&self) -> &BinarySel {
        &self.sel
    }

    /// Erode `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        binary_scan(pix, &self.sel, "binary erode", BinarySel::fits)
    }
}

/// Binary opening: erosion followed by dilation with the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOpen {
    erode: BinaryErode,
    dilate: BinaryDilate,
}

impl BinaryOpen {
    /// Create an opening with `sel`.
    pub fn new(sel: BinarySel) -> Self {
        Self {
            erode: BinaryErode::new(sel.clone()),
            dilate: BinaryDilate::new(sel),
        }
    }

    /// Open `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        let eroded = self.erode.filter(pix)?;
        self.dilate.filter(&eroded)
    }
}

/// Binary closing: dilation followed by erosion, both with the element
/// rotated through 180 degrees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryClose {
    dilate: BinaryDilate,
    erode: BinaryErode,
}

impl BinaryClose {
    /// Create a closing with `sel`; the rotation is done once, here.
    pub fn new(sel: BinarySel) -> Self {
        let rotated = sel.rotated();
        Self {
            dilate: BinaryDilate::new(rotated.clone()),
            erode: BinaryErode::new(rotated),
        }
    }

    /// Rotated element applied by both passes.
    pub fn rotated_sel(&self) -> &BinarySel {
        self.dilate.sel()
    }

    /// Close `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        let dilated = self.dilate.filter(pix)?;
        self.erode.filter(&dilated)
    }
}

macro_rules! impl_morph_op {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl MorphOp for $ty {
                fn name(&self) -> &'static str {
                    $name
                }

                fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
                    <$ty>::filter(self, pix)
                }
            }
        )*
    };
}

impl_morph_op!(
    BinaryDilate => "binary dilate",
    BinaryErode => "binary erode",
    BinaryOpen => "binary open",
    BinaryClose => "binary close",
);

/// Dilate a binary image.
///
/// # Example
///
/// ```
/// use pixops_core::{Pix, PixelDepth};
/// use pixops_morph::{BinarySel, dilate};
///
/// let mut pm = Pix::new(20, 20, PixelDepth::Bit1).unwrap().to_mut();
/// pm.set_pixel(5, 5, 1).unwrap();
/// let pix: Pix = pm.into();
/// let out = dilate(&pix, &BinarySel::new(3, 3).unwrap()).unwrap();
/// assert_eq!(out.count_pixels(), 9);
/// ```
pub fn dilate(pix: &Pix, sel: &BinarySel) -> MorphResult<Pix> {
    BinaryDilate::new(sel.clone()).filter(pix)
}

/// Erode a binary image.
pub fn erode(pix: &Pix, sel: &BinarySel) -> MorphResult<Pix> {
    BinaryErode::new(sel.clone()).filter(pix)
}

/// Open a binary image.
pub fn open(pix: &Pix, sel: &BinarySel) -> MorphResult<Pix> {
    BinaryOpen::new(sel.clone()).filter(pix)
}

/// Close a binary image.
pub fn close(pix: &Pix, sel: &BinarySel) -> MorphResult<Pix> {
    BinaryClose::new(sel.clone()).filter(pix)
}
