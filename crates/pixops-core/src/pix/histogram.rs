//! Histogram generation for Pix images

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Get the grey-level histogram of a single-band image.
    ///
    /// The histogram size depends on the image depth:
    /// - 1-bit: 2 bins (0 and 1)
    /// - 8-bit: 256 bins (0-255)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpp`] if the image has more than one band.
    ///
    /// # Example
    ///
    /// ```
    /// use pixops_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram().unwrap();
    /// assert_eq!(hist.len(), 256);
    /// assert_eq!(hist[0], 100);
    /// ```
    pub fn gray_histogram(&self) -> Result<Vec<u32>> {
        if self.spp() != 1 {
            return Err(Error::InvalidSpp {
                spp: self.spp(),
                depth: self.depth().bits(),
            });
        }
        let bins = match self.depth() {
            PixelDepth::Bit1 => 2,
            PixelDepth::Bit8 => 256,
        };
        let mut hist = vec![0u32; bins];
        for &s in self.data() {
            hist[s as usize] += 1;
        }
        Ok(hist)
    }

    /// Count the distinct non-zero levels present in a single-band image.
    pub fn count_nonzero_levels(&self) -> Result<usize> {
        let hist = self.gray_histogram()?;
        Ok(hist.iter().skip(1).filter(|&&n| n > 0).count())
    }
}
