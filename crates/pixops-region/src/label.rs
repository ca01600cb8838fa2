//! Connected-component labeling
//!
//! Foreground pixels (sample > 0) are grouped into components under 4- or
//! 8-connectivity. Components are numbered from 1 in the order their first
//! pixel is met in a raster scan. Labels are stored in one byte, so at most
//! [`MAX_LABELS`] components are labeled; foreground pixels of any later
//! component are left at 0.

use crate::connectivity::Connectivity;
use crate::{RegionError, RegionResult};
use log::{debug, trace};
use pixops_core::{Pix, PixMut, PixelDepth};

/// Maximum number of labels in a [`LabelMap`]
pub const MAX_LABELS: u32 = 255;

/// Labels produced by [`RegionLabeler::label`]
#[derive(Debug, Clone)]
pub struct LabelMap {
    pix: Pix,
    num_labels: u32,
    sizes: Vec<u32>,
}

impl LabelMap {
    /// 8-bpp label image: 0 for background, otherwise the component label.
    pub fn pix(&self) -> &Pix {
        &self.pix
    }

    /// Consume the map, returning the label image.
    pub fn into_pix(self) -> Pix {
        self.pix
    }

    /// Number of components labeled.
    pub fn num_labels(&self) -> u32 {
        self.num_labels
    }

    /// Label at `(x, y)`, or `None` outside the image.
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        self.pix.get_pixel(x, y)
    }

    /// Pixel count of each component; entry `i` belongs to label `i + 1`.
    pub fn component_sizes(&self) -> &[u32] {
        &self.sizes
    }
}

/// Connected-component labeler
///
/// # Example
///
/// ```
/// use pixops_region::RegionLabeler;
/// use pixops_core::{Pix, PixelDepth};
///
/// let pix = Pix::from_samples(3, 3, PixelDepth::Bit1, 1,
///     vec![1, 0, 0,
///          0, 1, 0,
///          0, 0, 1]).unwrap();
/// assert_eq!(RegionLabeler::new(4).unwrap().label(&pix).unwrap().num_labels(), 3);
/// assert_eq!(RegionLabeler::new(8).unwrap().label(&pix).unwrap().num_labels(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLabeler {
    connectivity: Connectivity,
}

impl RegionLabeler {
    /// Create a labeler from a connectivity value.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] unless `connectivity` is
    /// 4 or 8.
    pub fn new(connectivity: u32) -> RegionResult<Self> {
        Ok(Self::with_connectivity(Connectivity::from_value(connectivity)?))
    }

    /// Create a labeler with the given connectivity.
    pub fn with_connectivity(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }

    /// Connectivity in use.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Label the connected components of a single-band image.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnsupportedDepth`] for multi-band images.
    pub fn label(&self, pix: &Pix) -> RegionResult<LabelMap> {
        if pix.spp() != 1 {
            return Err(RegionError::UnsupportedDepth {
                expected: "single-band image",
                actual: pix.depth().bits() * pix.spp(),
            });
        }

        let width = pix.width();
        let height = pix.height();
        trace!(
            "labeling {}x{} image, {}-connected",
            width,
            height,
            self.connectivity.value()
        );

        // Working copy: pixels are cleared as they are labeled.
        let mut foreground: Vec<bool> = pix.data().iter().map(|&s| s > 0).collect();
        let mut out = PixMut::new(width, height, PixelDepth::Bit8)?;
        let mut sizes = Vec::new();
        let mut stack = Vec::new();

        'scan: for y in 0..height {
            for x in 0..width {
                if !foreground[(y * width + x) as usize] {
                    continue;
                }
                if sizes.len() as u32 == MAX_LABELS {
                    debug!("label limit of {MAX_LABELS} reached at ({x}, {y}); stopping");
                    break 'scan;
                }
                let label = sizes.len() as u32 + 1;
                let mut size = 0u32;

                foreground[(y * width + x) as usize] = false;
                stack.push((x, y));
                while let Some((px, py)) = stack.pop() {
                    out.set_pixel_unchecked(px, py, label);
                    size += 1;
                    for (nx, ny) in self.connectivity.neighbours(px, py, width, height) {
                        let idx = (ny * width + nx) as usize;
                        if foreground[idx] {
                            foreground[idx] = false;
                            stack.push((nx, ny));
                        }
                    }
                }
                sizes.push(size);
            }
        }

        Ok(LabelMap {
            pix: out.into(),
            num_labels: sizes.len() as u32,
            sizes,
        })
    }
}
