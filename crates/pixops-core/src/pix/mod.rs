//! PIX - The raster container
//!
//! `Pix` is the 2-D sample grid consumed and produced by every operator in
//! pixops. It is addressable by `(x, y, band)`.
//!
//! # Sample layout
//!
//! - One byte per sample, rows stored top to bottom
//! - Bands of a pixel are interleaved (`[b0, b1, b2, b0, b1, b2, ...]`)
//! - `Bit1` images carry a single band with samples in {0, 1}
//! - `Bit8` images carry 1 to 4 bands with samples in [0, 255]
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify sample data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
mod histogram;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Maximum number of bands in a `Bit8` image.
pub const MAX_SPP: u32 = 4;

/// Pixel depth (bits per sample)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 8-bit grey image (optionally multi-band)
    Bit8 = 8,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1 or 8.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per sample.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum sample value representable at this depth.
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per sample
    depth: PixelDepth,
    /// Samples per pixel (bands)
    spp: u32,
    /// Interleaved samples, one byte each
    data: Vec<u8>,
}

impl PixData {
    fn zeroed(width: u32, height: u32, depth: PixelDepth, spp: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        check_spp(depth, spp)?;
        let len = width as usize * height as usize * spp as usize;
        Ok(PixData {
            width,
            height,
            depth,
            spp,
            data: vec![0u8; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32, band: u32) -> usize {
        ((y as usize * self.width as usize + x as usize) * self.spp as usize) + band as usize
    }

    #[inline]
    fn in_bounds(&self, x: u32, y: u32, band: u32) -> bool {
        x < self.width && y < self.height && band < self.spp
    }
}

fn check_spp(depth: PixelDepth, spp: u32) -> Result<()> {
    let ok = match depth {
        PixelDepth::Bit1 => spp == 1,
        PixelDepth::Bit8 => (1..=MAX_SPP).contains(&spp),
    };
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidSpp {
            spp,
            depth: depth.bits(),
        })
    }
}

/// PIX - Immutable raster
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use pixops_core::{Pix, PixelDepth};
///
/// // Create a new 8-bit grey image
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.spp(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new single-band PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Self::new_with_spp(width, height, depth, 1)
    }

    /// Create a new PIX with `spp` bands per pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpp`] if `spp` is not 1 for `Bit1`, or not in
    /// `1..=4` for `Bit8`.
    pub fn new_with_spp(width: u32, height: u32, depth: PixelDepth, spp: u32) -> Result<Self> {
        let inner = PixData::zeroed(width, height, depth, spp)?;
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Build a PIX from interleaved samples in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not equal
    /// `width * height * spp`, or if any sample exceeds the depth's range.
    pub fn from_samples(
        width: u32,
        height: u32,
        depth: PixelDepth,
        spp: u32,
        samples: Vec<u8>,
    ) -> Result<Self> {
        let mut inner = PixData::zeroed(width, height, depth, spp)?;
        if samples.len() != inner.data.len() {
            return Err(Error::BufferLength {
                expected: inner.data.len(),
                actual: samples.len(),
            });
        }
        let max = depth.max_value();
        if let Some(&bad) = samples.iter().find(|&&s| u32::from(s) > max) {
            return Err(Error::SampleOutOfRange {
                value: u32::from(bad),
                depth: depth.bits(),
            });
        }
        inner.data = samples;
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get raw access to the interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a new zeroed PIX with the same dimensions, depth and band count.
    pub fn create_template(&self) -> Self {
        let inner = PixData {
            width: self.inner.width,
            height: self.inner.height,
            depth: self.inner.depth,
            spp: self.inner.spp,
            data: vec![0u8; self.inner.data.len()],
        };
        Pix {
            inner: Arc::new(inner),
        }
    }

    /// Check if two PIX have the same width, height, depth and band count.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
            && self.inner.spp == other.inner.spp
    }

    /// Check if two PIX have the same geometry and identical samples.
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }

    /// Count the pixels whose first band is non-zero.
    pub fn count_pixels(&self) -> u64 {
        let spp = self.inner.spp as usize;
        self.inner
            .data
            .iter()
            .step_by(spp)
            .filter(|&&s| s != 0)
            .count() as u64
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.copy_data()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.copy_data(),
        }
    }

    fn copy_data(&self) -> PixData {
        PixData {
            width: self.inner.width,
            height: self.inner.height,
            depth: self.inner.depth,
            spp: self.inner.spp,
            data: self.inner.data.clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug, Clone)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed, single-band mutable image.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::zeroed(width, height, depth, 1)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get raw access to the interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the interleaved samples.
    ///
    /// Callers writing through this slice must keep samples within the
    /// depth's range.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
