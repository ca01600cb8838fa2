//! Sample access functions
//!
//! Low-level functions for getting and setting individual samples.
//! Checked accessors return `Option`/`Result`; the `_unchecked` variants
//! panic on out-of-range coordinates and are meant for scan loops whose
//! range has already been validated.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Get the first-band value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.get_sample(x, y, 0)
    }

    /// Get the first-band value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the sample index falls outside the data buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.get_sample_unchecked(x, y, 0)
    }

    /// Get the sample of `band` at (x, y).
    ///
    /// Returns `None` if coordinates or band are out of bounds.
    pub fn get_sample(&self, x: u32, y: u32, band: u32) -> Option<u32> {
        if self.inner.in_bounds(x, y, band) {
            Some(self.get_sample_unchecked(x, y, band))
        } else {
            None
        }
    }

    /// Get the sample of `band` at (x, y) without bounds checking.
    #[inline]
    pub fn get_sample_unchecked(&self, x: u32, y: u32, band: u32) -> u32 {
        u32::from(self.inner.data[self.inner.index(x, y, band)])
    }

    /// Copy every band of pixel (x, y) into `out`.
    ///
    /// `out` must hold at least `spp` entries.
    #[inline]
    pub fn get_samples_unchecked(&self, x: u32, y: u32, out: &mut [u32]) {
        let start = self.inner.index(x, y, 0);
        let spp = self.inner.spp as usize;
        for (dst, &src) in out[..spp]
            .iter_mut()
            .zip(&self.inner.data[start..start + spp])
        {
            *dst = u32::from(src);
        }
    }
}

impl PixMut {
    /// Get the first-band value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if self.inner.in_bounds(x, y, 0) {
            Some(self.get_pixel_unchecked(x, y))
        } else {
            None
        }
    }

    /// Get the first-band value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        u32::from(self.inner.data[self.inner.index(x, y, 0)])
    }

    /// Set the first-band value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds,
    /// or [`Error::SampleOutOfRange`] if `val` does not fit the depth.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        self.set_sample(x, y, 0, val)
    }

    /// Set the first-band value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the sample index falls outside the data buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        self.set_sample_unchecked(x, y, 0, val);
    }

    /// Set the sample of `band` at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates or band are out of
    /// bounds, or [`Error::SampleOutOfRange`] if `val` does not fit the depth.
    pub fn set_sample(&mut self, x: u32, y: u32, band: u32, val: u32) -> Result<()> {
        if !self.inner.in_bounds(x, y, band) {
            return Err(Error::IndexOutOfBounds {
                index: self.inner.index(x, y, band),
                len: self.inner.data.len(),
            });
        }
        if val > self.inner.depth.max_value() {
            return Err(Error::SampleOutOfRange {
                value: val,
                depth: self.inner.depth.bits(),
            });
        }
        self.set_sample_unchecked(x, y, band, val);
        Ok(())
    }

    /// Set the sample of `band` at (x, y) without bounds checking.
    ///
    /// The value is truncated to the depth's range.
    #[inline]
    pub fn set_sample_unchecked(&mut self, x: u32, y: u32, band: u32, val: u32) {
        let idx = self.inner.index(x, y, band);
        self.inner.data[idx] = (val & self.inner.depth.max_value()) as u8;
    }
}
