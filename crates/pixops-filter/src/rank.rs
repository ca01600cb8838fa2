//! Rank filtering operations
//!
//! Order-statistic filters over a [`Neighbourhood`]. A rank of 1 selects the
//! window minimum and a rank equal to the window size selects the maximum.

use crate::neighbourhood::{BorderPolicy, Neighbourhood};
use crate::{FilterError, FilterResult};
use log::debug;
use pixops_core::Pix;

/// Rank (order-statistic) filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankFilter {
    rank: usize,
    neighbourhood: Neighbourhood,
}

impl RankFilter {
    /// Create a rank filter selecting the `rank`-th smallest window sample.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidNeighbourhood`] for even or zero dimensions
    /// - [`FilterError::InvalidParameters`] if `rank` is outside
    ///   `1..=width*height`
    pub fn new(rank: usize, width: u32, height: u32, policy: BorderPolicy) -> FilterResult<Self> {
        let neighbourhood = Neighbourhood::new(width, height, policy)?;
        let size = neighbourhood.num_pixels();
        if rank == 0 || rank > size {
            return Err(FilterError::InvalidParameters(format!(
                "rank {rank} outside 1..={size}"
            )));
        }
        Ok(Self {
            rank,
            neighbourhood,
        })
    }

    /// Selected rank (1-based).
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Underlying neighbourhood.
    pub fn neighbourhood(&self) -> &Neighbourhood {
        &self.neighbourhood
    }

    /// Apply the filter to an 8-bit single-band image.
    pub fn filter(&self, pix: &Pix) -> FilterResult<Pix> {
        debug!(
            "rank filter: rank {} of {}x{}",
            self.rank,
            self.neighbourhood.width(),
            self.neighbourhood.height()
        );
        let idx = self.rank - 1;
        self.neighbourhood.apply(pix, |window| {
            let (_, v, _) = window.select_nth_unstable(idx);
            *v
        })
    }
}

/// Apply a minimum filter (rank 1).
pub fn min_filter(pix: &Pix, width: u32, height: u32, policy: BorderPolicy) -> FilterResult<Pix> {
    RankFilter::new(1, width, height, policy)?.filter(pix)
}

/// Apply a maximum filter (rank = window size).
pub fn max_filter(pix: &Pix, width: u32, height: u32, policy: BorderPolicy) -> FilterResult<Pix> {
    let size = width as usize * height as usize;
    RankFilter::new(size, width, height, policy)?.filter(pix)
}

/// Apply a median filter.
pub fn median_filter(
    pix: &Pix,
    width: u32,
    height: u32,
    policy: BorderPolicy,
) -> FilterResult<Pix> {
    let size = width as usize * height as usize;
    RankFilter::new(size.div_ceil(2), width, height, policy)?.filter(pix)
}
