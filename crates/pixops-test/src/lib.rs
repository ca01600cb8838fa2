//! pixops-test - Regression test framework for pixops
//!
//! This crate provides the regression harness used by the `tests/*_reg.rs`
//! files of every pixops crate. Two modes are supported:
//!
//! - **Compare**: Record and report every mismatching value (default)
//! - **Display**: Run the same checks, additionally printing each compared
//!   value for visual inspection
//!
//! # Usage
//!
//! ```
//! use pixops_test::RegParams;
//!
//! let count = 4452;
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(4452.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use pixops_core::{Pix, PixelDepth};

/// Build a single-band image from rows of samples.
///
/// Every row must have the same length; this is test scaffolding, so a
/// malformed literal panics.
pub fn pix_from_rows(depth: PixelDepth, rows: &[&[u8]]) -> Pix {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let samples: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Pix::from_samples(width, height, depth, 1, samples).expect("valid test image")
}

/// Build a single-band image from an ASCII picture.
///
/// `'#'` or `'x'` marks a foreground pixel (`fg`), anything else is 0.
/// Lines are separated by `'\n'`; leading/trailing blank lines are ignored.
pub fn pix_from_picture(depth: PixelDepth, fg: u8, picture: &str) -> Pix {
    let rows: Vec<Vec<u8>> = picture
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.chars()
                .map(|c| if c == '#' || c == 'x' { fg } else { 0 })
                .collect()
        })
        .collect();
    let refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
    pix_from_rows(depth, &refs)
}

/// Deterministic pseudo-random binary image for property checks.
///
/// Uses a linear congruential generator so results are reproducible from
/// `seed`. Roughly `density_percent` of the pixels are set to `fg`.
pub fn random_binary_pix(
    width: u32,
    height: u32,
    depth: PixelDepth,
    fg: u8,
    density_percent: u32,
    seed: u32,
) -> Pix {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let samples: Vec<u8> = (0..width * height)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (state >> 16) % 100 < density_percent {
                fg
            } else {
                0
            }
        })
        .collect();
    Pix::from_samples(width, height, depth, 1, samples).expect("valid test image")
}
