//! Grayscale morphological operations
//!
//! Grey dilation and erosion are max-plus / min-minus convolutions with a
//! [`GreySel`]:
//!
//! - dilation stores [`GreySel::above`] at each pixel
//! - erosion stores [`GreySel::below`] at each pixel
//!
//! Results are either clamped to [0, 255] or, with `rescale`, mapped
//! linearly so that the smallest computed value becomes 0 and the largest
//! 255. Only 8-bpp single-band images are accepted.

use crate::ops::{MorphOp, scan_range};
use crate::sel::GreySel;
use crate::{MorphError, MorphResult};
use log::{debug, trace};
use pixops_core::{Pix, PixMut, PixelDepth};

fn check_grayscale(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 || pix.spp() != 1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8-bpp single-band grey",
            actual: pix.depth().bits() * pix.spp(),
        });
    }
    Ok(())
}

/// Evaluate `probe` over the element's scan range and store the results.
fn grey_scan<F>(pix: &Pix, sel: &GreySel, rescale: bool, op: &str, probe: F) -> MorphResult<Pix>
where
    F: Fn(&GreySel, &Pix, u32, u32) -> i64,
{
    check_grayscale(pix)?;
    trace!(
        "{op}: {}x{} image, {}x{} sel, rescale={rescale}",
        pix.width(),
        pix.height(),
        sel.width(),
        sel.height()
    );

    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)?;
    let Some(range) = scan_range(
        pix.width(),
        pix.height(),
        sel.width(),
        sel.height(),
        sel.origin(),
    ) else {
        return Ok(out.into());
    };

    if !rescale {
        for y in range.ys() {
            for x in range.xs() {
                let v = probe(sel, pix, x, y).clamp(0, 255);
                out.set_pixel_unchecked(x, y, v as u32);
            }
        }
        return Ok(out.into());
    }

    // All values must be known before the output range can be normalised.
    let mut values = Vec::with_capacity(range.len());
    for y in range.ys() {
        for x in range.xs() {
            values.push(probe(sel, pix, x, y));
        }
    }
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    debug!("{op}: rescaling [{min}, {max}] to [0, 255]");

    // Values come from u8 samples and i32 weights, so the span fits in i64.
    let scale = if max > min {
        255.0 / (max - min) as f64
    } else {
        0.0
    };
    let mut it = values.into_iter();
    for y in range.ys() {
        for x in range.xs() {
            let v = it.next().unwrap_or(min);
            let scaled = (scale * (v - min) as f64).round() as u32;
            out.set_pixel_unchecked(x, y, scaled.min(255));
        }
    }
    Ok(out.into())
}

/// Grey dilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyDilate {
    sel: GreySel,
    rescale: bool,
}

impl GreyDilate {
    /// Create a dilation with `sel`; `rescale` selects min/max
    /// normalisation instead of clamping.
    pub fn new(sel: GreySel, rescale: bool) -> Self {
        Self { sel, rescale }
    }

    /// Structuring element in use.
    pub fn sel(&self) -> &GreySel {
        &self.sel
    }

    /// Whether output is rescaled.
    pub fn rescale(&self) -> bool {
        self.rescale
    }

    /// Dilate `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        grey_scan(pix, &self.sel, self.rescale, "grey dilate", GreySel::above)
    }
}

/// Grey erosion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyErode {
    sel: GreySel,
    rescale: bool,
}

impl GreyErode {
    /// Create an erosion with `sel`; `rescale` selects min/max
    /// normalisation instead of clamping.
    pub fn new(sel: GreySel, rescale: bool) -> Self {
        Self { sel, rescale }
    }

    /// Structuring element in use.
    pub fn sel(&self) -> &GreySel {
        &self.sel
    }

    /// Whether output is rescaled.
    pub fn rescale(&self) -> bool {
        self.rescale
    }

    /// Erode `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        grey_scan(pix, &self.sel, self.rescale, "grey erode", GreySel::below)
    }
}

/// Grey opening: erosion followed by dilation with the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyOpen {
    erode: GreyErode,
    dilate: GreyDilate,
}

impl GreyOpen {
    /// Create an opening; both passes share `rescale`.
    pub fn new(sel: GreySel, rescale: bool) -> Self {
        Self {
            erode: GreyErode::new(sel.clone(), rescale),
            dilate: GreyDilate::new(sel, rescale),
        }
    }

    /// Open `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        let eroded = self.erode.filter(pix)?;
        self.dilate.filter(&eroded)
    }
}

/// Grey closing: dilation followed by erosion, both with the element
/// rotated through 180 degrees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreyClose {
    dilate: GreyDilate,
    erode: GreyErode,
}

impl GreyClose {
    /// Create a closing; both passes share `rescale`.
    pub fn new(sel: GreySel, rescale: bool) -> Self {
        let rotated = sel.rotated();
        Self {
            dilate: GreyDilate::new(rotated.clone(), rescale),
            erode: GreyErode::new(rotated, rescale),
        }
    }

    /// Rotated element applied by both passes.
    pub fn rotated_sel(&self) -> &GreySel {
        self.dilate.sel()
    }

    /// Close `pix`.
    pub fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        let dilated = self.dilate.filter(pix)?;
        self.erode.filter(&dilated)
    }
}

impl MorphOp for GreyDilate {
    fn name(&self) -> &'static str {
        "grey dilate"
    }

    fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        GreyDilate::filter(self, pix)
    }
}

impl MorphOp for GreyErode {
    fn name(&self) -> &'static str {
        "grey erode"
    }

    fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        GreyErode::filter(self, pix)
    }
}

impl MorphOp for GreyOpen {
    fn name(&self) -> &'static str {
        "grey open"
    }

    fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        GreyOpen::filter(self, pix)
    }
}

impl MorphOp for GreyClose {
    fn name(&self) -> &'static str {
        "grey close"
    }

    fn filter(&self, pix: &Pix) -> MorphResult<Pix> {
        GreyClose::filter(self, pix)
    }
}

/// Dilate an 8-bpp image, clamping results to [0, 255].
pub fn dilate_gray(pix: &Pix, sel: &GreySel) -> MorphResult<Pix> {
    GreyDilate::new(sel.clone(), false).filter(pix)
}

/// Erode an 8-bpp image, clamping results to [0, 255].
pub fn erode_gray(pix: &Pix, sel: &GreySel) -> MorphResult<Pix> {
    GreyErode::new(sel.clone(), false).filter(pix)
}

/// Open an 8-bpp image, clamping results to [0, 255].
pub fn open_gray(pix: &Pix, sel: &GreySel) -> MorphResult<Pix> {
    GreyOpen::new(sel.clone(), false).filter(pix)
}

/// Close an 8-bpp image, clamping results to [0, 255].
pub fn close_gray(pix: &Pix, sel: &GreySel) -> MorphResult<Pix> {
    GreyClose::new(sel.clone(), false).filter(pix)
}
