//! Seeded region growing
//!
//! Each seed pixel starts a region. A call to [`RegionGrower::grow`] scans
//! the image in raster order; every pixel on a region's active border tries
//! to claim its unassigned neighbours. A neighbour is claimed when the
//! squared distance between its sample vector and the region's current mean
//! is below the squared threshold.
//!
//! # Growth semantics
//!
//! A single pass works in place:
//!
//! - a claimed pixel is marked assigned immediately, so a border pixel later
//!   in the same scan cannot claim it again
//! - the region's mean is updated after every claim, so later claims in the
//!   same scan are judged against the updated mean
//! - claimed pixels form the next active border, which replaces the current
//!   one wholesale at the end of the pass; border pixels that claimed nothing
//!   become inactive
//!
//! Growth therefore advances one ring of pixels per call, and contested
//! pixels go to whichever border pixel comes first in raster order.
//!
//! Growing stops (state [`GrowerState::Converged`]) after the first call
//! that claims nothing.

use crate::connectivity::Connectivity;
use crate::{RegionError, RegionResult};
use log::{debug, trace};
use pixops_core::{MAX_SPP, Pix, PixMut, PixelDepth};

/// Maximum number of seeds; region ids are stored in one byte.
pub const MAX_REGIONS: usize = 255;

/// Options for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowerOptions {
    /// Neighbourhood considered around each border pixel
    pub connectivity: Connectivity,
    /// Maximum distance (exclusive) from a region's mean
    pub threshold: u32,
}

impl Default for GrowerOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            threshold: 1,
        }
    }
}

impl GrowerOptions {
    /// Create options with the given connectivity and threshold.
    pub fn new(connectivity: Connectivity, threshold: u32) -> Self {
        Self {
            connectivity,
            threshold,
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the threshold
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Progress of a [`RegionGrower`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowerState {
    /// Seeds placed, no growth step run yet
    Initialized,
    /// At least one growth step has claimed pixels
    Growing,
    /// The last growth step claimed nothing
    Converged,
}

/// Role of a pixel in the growing process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelStatus {
    /// Not part of any region
    Unassigned,
    /// Inside a region and no longer growing
    Assigned,
    /// On a region's active border
    Border,
}

impl PixelStatus {
    /// Sample value used in [`RegionGrower::status_map`].
    pub fn value(self) -> u32 {
        match self {
            PixelStatus::Unassigned => 0,
            PixelStatus::Assigned => 1,
            PixelStatus::Border => 2,
        }
    }
}

/// Running statistics of one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: u32,
    size: u32,
    sum: Vec<u64>,
    mean: Vec<u32>,
}

impl Region {
    fn new(id: u32, samples: &[u32]) -> Self {
        Self {
            id,
            size: 1,
            sum: samples.iter().map(|&s| u64::from(s)).collect(),
            mean: samples.to_vec(),
        }
    }

    fn add(&mut self, samples: &[u32]) {
        self.size += 1;
        for ((sum, mean), &s) in self.sum.iter_mut().zip(self.mean.iter_mut()).zip(samples) {
            *sum += u64::from(s);
            *mean = (*sum / u64::from(self.size)) as u32;
        }
    }

    fn squared_distance(&self, samples: &[u32]) -> u64 {
        self.mean
            .iter()
            .zip(samples)
            .map(|(&m, &s)| {
                let d = i64::from(s) - i64::from(m);
                (d * d) as u64
            })
            .sum()
    }

    /// Region id (1-based, equal to the seed's position in the seed list
    /// plus one).
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Number of pixels claimed so far, seed included.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Per-band sum of claimed samples.
    pub fn sum(&self) -> &[u64] {
        &self.sum
    }

    /// Per-band mean, truncated to an integer.
    pub fn mean(&self) -> &[u32] {
        &self.mean
    }
}

/// Seeded, iterative region grower
///
/// # Example
///
/// ```
/// use pixops_core::{Pix, PixelDepth};
/// use pixops_region::{Connectivity, GrowerOptions, RegionGrower};
///
/// let pix = Pix::from_samples(5, 5, PixelDepth::Bit8, 1, vec![100; 25]).unwrap();
/// let options = GrowerOptions::new(Connectivity::Eight, 1);
/// let mut grower = RegionGrower::new(&pix, &[(2, 2)], options).unwrap();
/// grower.grow();
/// assert_eq!(grower.region_size(1), Some(9));
/// grower.grow_to_completion();
/// assert_eq!(grower.unassigned_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct RegionGrower {
    source: Pix,
    connectivity: Connectivity,
    squared_threshold: u64,
    labels: PixMut,
    assigned: Vec<bool>,
    border: Vec<u8>,
    regions: Vec<Region>,
    unassigned: u64,
    iterations: u32,
    state: GrowerState,
}

impl RegionGrower {
    /// Place one region on each seed.
    ///
    /// Region `i + 1` is grown from `seeds[i]`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidParameters`] for an empty seed list, more
    ///   than [`MAX_REGIONS`] seeds, or a zero threshold
    /// - [`RegionError::InvalidSeed`] for a seed outside the image or a
    ///   repeated seed
    pub fn new(pix: &Pix, seeds: &[(u32, u32)], options: GrowerOptions) -> RegionResult<Self> {
        if seeds.is_empty() {
            return Err(RegionError::InvalidParameters(
                "at least one seed is required".to_string(),
            ));
        }
        if seeds.len() > MAX_REGIONS {
            return Err(RegionError::InvalidParameters(format!(
                "at most {MAX_REGIONS} seeds are supported, got {}",
                seeds.len()
            )));
        }
        if options.threshold == 0 {
            return Err(RegionError::InvalidParameters(
                "threshold must be positive".to_string(),
            ));
        }

        let width = pix.width();
        let height = pix.height();
        let npix = width as usize * height as usize;
        let mut labels = PixMut::new(width, height, PixelDepth::Bit8)?;
        let mut assigned = vec![false; npix];
        let mut border = vec![0u8; npix];
        let mut regions = Vec::with_capacity(seeds.len());
        let mut samples = [0u32; MAX_SPP as usize];
        let spp = pix.spp() as usize;

        for (i, &(x, y)) in seeds.iter().enumerate() {
            if x >= width || y >= height {
                return Err(RegionError::InvalidSeed { x, y });
            }
            let idx = (y * width + x) as usize;
            if assigned[idx] {
                return Err(RegionError::InvalidSeed { x, y });
            }
            let id = i as u32 + 1;
            assigned[idx] = true;
            border[idx] = id as u8;
            labels.set_pixel_unchecked(x, y, id);
            pix.get_samples_unchecked(x, y, &mut samples);
            regions.push(Region::new(id, &samples[..spp]));
        }

        let threshold = u64::from(options.threshold);
        Ok(Self {
            source: pix.clone(),
            connectivity: options.connectivity,
            squared_threshold: threshold * threshold,
            labels,
            assigned,
            border,
            regions,
            unassigned: (npix - seeds.len()) as u64,
            iterations: 0,
            state: GrowerState::Initialized,
        })
    }

    /// Run one growth step.
    ///
    /// Returns `true` if any pixel was claimed. Once converged this is a
    /// no-op returning `false`.
    pub fn grow(&mut self) -> bool {
        if self.state == GrowerState::Converged {
            return false;
        }

        let width = self.source.width();
        let height = self.source.height();
        let spp = self.source.spp() as usize;
        let mut next_border = vec![0u8; self.border.len()];
        let mut samples = [0u32; MAX_SPP as usize];
        let mut claimed = 0u64;

        for y in 0..height {
            for x in 0..width {
                let id = self.border[(y * width + x) as usize];
                if id == 0 {
                    continue;
                }
                let region = &mut self.regions[id as usize - 1];
                for (nx, ny) in self.connectivity.neighbours(x, y, width, height) {
                    let nidx = (ny * width + nx) as usize;
                    if self.assigned[nidx] {
                        continue;
                    }
                    self.source.get_samples_unchecked(nx, ny, &mut samples);
                    if region.squared_distance(&samples[..spp]) < self.squared_threshold {
                        region.add(&samples[..spp]);
                        self.labels.set_pixel_unchecked(nx, ny, u32::from(id));
                        self.assigned[nidx] = true;
                        next_border[nidx] = id;
                        claimed += 1;
                    }
                }
            }
        }

        self.border = next_border;
        self.unassigned -= claimed;
        self.iterations += 1;
        trace!(
            "region grower pass {}: claimed {claimed}, {} unassigned",
            self.iterations, self.unassigned
        );

        if claimed == 0 {
            self.state = GrowerState::Converged;
            debug!(
                "region grower converged after {} passes, {} pixels unassigned",
                self.iterations, self.unassigned
            );
            false
        } else {
            self.state = GrowerState::Growing;
            true
        }
    }

    /// Grow until a step claims nothing.
    ///
    /// Returns the number of [`grow`](Self::grow) calls made, including the
    /// final one that claimed nothing.
    pub fn grow_to_completion(&mut self) -> u32 {
        let mut calls = 0;
        while self.state != GrowerState::Converged {
            self.grow();
            calls += 1;
        }
        calls
    }

    /// Current state.
    pub fn state(&self) -> GrowerState {
        self.state
    }

    /// True once growing has converged.
    pub fn is_finished(&self) -> bool {
        self.state == GrowerState::Converged
    }

    /// Number of growth steps run so far.
    pub fn num_iterations(&self) -> u32 {
        self.iterations
    }

    /// Number of regions (one per seed).
    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Region with the given 1-based id.
    pub fn region(&self, id: u32) -> Option<&Region> {
        (id as usize).checked_sub(1).and_then(|i| self.regions.get(i))
    }

    /// All regions, ordered by id.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Pixel count of region `id`.
    pub fn region_size(&self, id: u32) -> Option<u32> {
        self.region(id).map(Region::size)
    }

    /// Per-band mean of region `id`.
    pub fn region_mean(&self, id: u32) -> Option<&[u32]> {
        self.region(id).map(Region::mean)
    }

    /// Number of pixels not yet in any region.
    pub fn unassigned_count(&self) -> u64 {
        self.unassigned
    }

    /// Label image: 0 for unassigned pixels, otherwise the region id.
    pub fn label_map(&self) -> Pix {
        self.labels.clone().into()
    }

    /// Status of pixel `(x, y)`, or `None` outside the image.
    pub fn status(&self, x: u32, y: u32) -> Option<PixelStatus> {
        let width = self.source.width();
        if x >= width || y >= self.source.height() {
            return None;
        }
        let idx = (y * width + x) as usize;
        Some(if self.border[idx] != 0 {
            PixelStatus::Border
        } else if self.assigned[idx] {
            PixelStatus::Assigned
        } else {
            PixelStatus::Unassigned
        })
    }

    /// Status image with [`PixelStatus::value`] at each pixel.
    pub fn status_map(&self) -> Pix {
        let mut pm = self.labels.clone();
        for y in 0..pm.height() {
            for x in 0..pm.width() {
                let status = self.status(x, y).unwrap_or(PixelStatus::Unassigned);
                pm.set_pixel_unchecked(x, y, status.value());
            }
        }
        pm.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: u32, h: u32, v: u8) -> Pix {
        Pix::from_samples(w, h, PixelDepth::Bit8, 1, vec![v; (w * h) as usize]).unwrap()
    }

    #[test]
    fn test_seed_validation() {
        let pix = uniform(4, 4, 10);
        let opts = GrowerOptions::default();
        assert!(RegionGrower::new(&pix, &[], opts).is_err());
        assert!(matches!(
            RegionGrower::new(&pix, &[(4, 0)], opts),
            Err(RegionError::InvalidSeed { x: 4, y: 0 })
        ));
        assert!(matches!(
            RegionGrower::new(&pix, &[(1, 1), (1, 1)], opts),
            Err(RegionError::InvalidSeed { x: 1, y: 1 })
        ));
        assert!(RegionGrower::new(&pix, &[(0, 0)], opts.with_threshold(0)).is_err());
    }

    #[test]
    fn test_initial_state() {
        let pix = uniform(4, 3, 42);
        let grower = RegionGrower::new(&pix, &[(0, 0), (3, 2)], GrowerOptions::default()).unwrap();
        assert_eq!(grower.state(), GrowerState::Initialized);
        assert_eq!(grower.num_regions(), 2);
        assert_eq!(grower.unassigned_count(), 10);
        assert_eq!(grower.region_mean(2), Some(&[42][..]));
        assert_eq!(grower.region(0), None);
        assert_eq!(grower.region(3), None);
        assert_eq!(grower.status(3, 2), Some(PixelStatus::Border));
        assert_eq!(grower.status(1, 1), Some(PixelStatus::Unassigned));
        assert_eq!(grower.label_map().get_pixel(3, 2), Some(2));
    }

    #[test]
    fn test_four_connected_ring() {
        let pix = uniform(5, 5, 100);
        let opts = GrowerOptions::new(Connectivity::Four, 1);
        let mut grower = RegionGrower::new(&pix, &[(2, 2)], opts).unwrap();
        assert!(grower.grow());
        assert_eq!(grower.region_size(1), Some(5));
        assert_eq!(grower.status(2, 2), Some(PixelStatus::Assigned));
        assert_eq!(grower.status(2, 1), Some(PixelStatus::Border));
        assert_eq!(grower.state(), GrowerState::Growing);
    }

    #[test]
    fn test_threshold_blocks_growth() {
        let samples = vec![10, 10, 50, 10, 10, 50];
        let pix = Pix::from_samples(3, 2, PixelDepth::Bit8, 1, samples).unwrap();
        let opts = GrowerOptions::new(Connectivity::Eight, 5);
        let mut grower = RegionGrower::new(&pix, &[(0, 0)], opts).unwrap();
        let calls = grower.grow_to_completion();
        assert_eq!(grower.region_size(1), Some(4));
        assert_eq!(grower.unassigned_count(), 2);
        assert!(grower.is_finished());
        assert_eq!(calls, grower.num_iterations());
        assert!(!grower.grow());
        assert_eq!(grower.label_map().get_pixel(2, 0), Some(0));
    }

    #[test]
    fn test_multiband_distance() {
        // Two bands: distance is the sum of per-band squared differences.
        let samples = vec![100, 100, 103, 104, 100, 120];
        let pix = Pix::from_samples(3, 1, PixelDepth::Bit8, 2, samples).unwrap();
        let opts = GrowerOptions::new(Connectivity::Four, 6);
        let mut grower = RegionGrower::new(&pix, &[(0, 0)], opts).unwrap();
        grower.grow_to_completion();
        // (1,0): 9 + 16 = 25 < 36, claimed; mean becomes (101, 102)
        // (2,0): 1 + 324 >= 36, rejected
        assert_eq!(grower.region_size(1), Some(2));
        assert_eq!(grower.region_mean(1), Some(&[101, 102][..]));
        assert_eq!(grower.region(1).unwrap().sum(), &[203, 204]);
    }

    #[test]
    fn test_status_map_values() {
        let pix = uniform(3, 3, 0);
        let mut grower = RegionGrower::new(&pix, &[(0, 0)], GrowerOptions::default()).unwrap();
        grower.grow();
        let status = grower.status_map();
        assert_eq!(status.get_pixel(0, 0), Some(1));
        assert_eq!(status.get_pixel(1, 1), Some(2));
        assert_eq!(status.get_pixel(2, 2), Some(0));
    }
}
