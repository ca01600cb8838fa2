//! Neighbourhood scanning with border policies
//!
//! A [`Neighbourhood`] is an odd-sized `width x height` window centred on
//! the pixel being computed. When the window overhangs the image edge, the
//! [`BorderPolicy`] decides what happens:
//!
//! | Policy | Border output | Out-of-range coordinate |
//! |---|---|---|
//! | `NoOp` | left at 0 | never sampled |
//! | `CopyBorder` | copied from the source | never sampled |
//! | `Reflect` | computed | `i<0 -> -i-1`, `i>=n -> 2n-i-1` |
//! | `Circular` | computed | `i<0 -> i+n`, `i>=n -> i-n` |
//!
//! For `NoOp` and `CopyBorder` the computed region is the interior
//! `[w/2, W-w/2) x [h/2, H-h/2)`.

use crate::{FilterError, FilterResult};
use log::trace;
use pixops_core::{Pix, PixMut, PixelDepth};

/// Strategy for pixels whose window extends past the image edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPolicy {
    /// Leave border pixels of the output at zero
    #[default]
    NoOp,
    /// Copy border pixels verbatim from the source
    CopyBorder,
    /// Sample out-of-range coordinates by reflection about the edge
    Reflect,
    /// Sample out-of-range coordinates by wrapping around the image
    Circular,
}

/// Map an out-of-range index back into `[0, n)` by reflection.
///
/// A single reflection is applied, so `i` must lie in `[-n, 2n)`.
#[inline]
pub fn reflect_index(i: i32, n: i32) -> i32 {
    if i < 0 {
        -i - 1
    } else if i >= n {
        2 * n - i - 1
    } else {
        i
    }
}

/// Map an out-of-range index back into `[0, n)` by wrapping.
///
/// A single wrap is applied, so `i` must lie in `[-n, 2n)`.
#[inline]
pub fn circular_index(i: i32, n: i32) -> i32 {
    if i < 0 {
        i + n
    } else if i >= n {
        i - n
    } else {
        i
    }
}

/// Odd-sized sliding window with a border policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbourhood {
    width: u32,
    height: u32,
    policy: BorderPolicy,
}

impl Neighbourhood {
    /// Create a neighbourhood of `width x height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidNeighbourhood`] unless both dimensions
    /// are odd (and therefore at least 1).
    pub fn new(width: u32, height: u32, policy: BorderPolicy) -> FilterResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::InvalidNeighbourhood { width, height });
        }
        Ok(Self {
            width,
            height,
            policy,
        })
    }

    /// Window width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Window height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the window.
    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Border policy in effect.
    pub fn policy(&self) -> BorderPolicy {
        self.policy
    }

    /// Run `f` over the window of every computed pixel.
    ///
    /// The window samples are gathered row by row, left to right, into a
    /// scratch buffer that `f` may reorder. The value `f` returns is clamped
    /// to 255 and stored in the output.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnsupportedDepth`] unless `pix` is 8-bit single band
    /// - [`FilterError::InvalidParameters`] if a reflected or circular
    ///   window is wider than the image (one reflection or wrap must land
    ///   back inside it)
    pub fn apply<F>(&self, pix: &Pix, mut f: F) -> FilterResult<Pix>
    where
        F: FnMut(&mut [u32]) -> u32,
    {
        check_8bpp_gray(pix)?;

        let w = pix.width() as i32;
        let h = pix.height() as i32;
        let m = (self.width / 2) as i32;
        let n = (self.height / 2) as i32;
        trace!(
            "neighbourhood {}x{} {:?} over {}x{} image",
            self.width, self.height, self.policy, w, h
        );

        let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)?;
        let mut window = vec![0u32; self.num_pixels()];

        match self.policy {
            BorderPolicy::Reflect | BorderPolicy::Circular => {
                if m > w || n > h {
                    return Err(FilterError::InvalidParameters(format!(
                        "{}x{} window too large for {}x{} image under {:?}",
                        self.width, self.height, w, h, self.policy
                    )));
                }
                let map: fn(i32, i32) -> i32 = if self.policy == BorderPolicy::Reflect {
                    reflect_index
                } else {
                    circular_index
                };
                for y in 0..h {
                    for x in 0..w {
                        let mut i = 0;
                        for k in -n..=n {
                            let sy = map(y + k, h) as u32;
                            for j in -m..=m {
                                let sx = map(x + j, w) as u32;
                                window[i] = pix.get_pixel_unchecked(sx, sy);
                                i += 1;
                            }
                        }
                        out.set_pixel_unchecked(x as u32, y as u32, f(&mut window).min(255));
                    }
                }
            }
            BorderPolicy::CopyBorder | BorderPolicy::NoOp => {
                if self.policy == BorderPolicy::CopyBorder {
                    self.copy_borders(pix, &mut out);
                }
                for y in n..h - n {
                    for x in m..w - m {
                        let mut i = 0;
                        for k in -n..=n {
                            for j in -m..=m {
                                window[i] = pix.get_pixel_unchecked((x + j) as u32, (y + k) as u32);
                                i += 1;
                            }
                        }
                        out.set_pixel_unchecked(x as u32, y as u32, f(&mut window).min(255));
                    }
                }
            }
        }

        Ok(out.into())
    }

    /// Copy the band of border pixels that the interior scan never reaches.
    fn copy_borders(&self, src: &Pix, dest: &mut PixMut) {
        let w = src.width();
        let h = src.height();
        let m = (self.width / 2).min(w);
        let n = (self.height / 2).min(h);

        for x in 0..w {
            for y in (0..n).chain(h - n..h) {
                dest.set_pixel_unchecked(x, y, src.get_pixel_unchecked(x, y));
            }
        }
        for y in 0..h {
            for x in (0..m).chain(w - m..w) {
                dest.set_pixel_unchecked(x, y, src.get_pixel_unchecked(x, y));
            }
        }
    }
}

/// Validate that the input image is 8 bpp single band.
pub(crate) fn check_8bpp_gray(pix: &Pix) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 || pix.spp() != 1 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bpp single-band grey",
            actual: pix.depth().bits() * pix.spp(),
        });
    }
    Ok(())
}
