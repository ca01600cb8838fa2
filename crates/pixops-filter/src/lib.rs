//! pixops-filter - Neighbourhood filtering framework
//!
//! This crate provides:
//!
//! - Border policies deciding how a sliding window treats coordinates that
//!   fall outside the image ([`BorderPolicy`])
//! - A validated odd-sized window ([`Neighbourhood`]) that scans an image
//!   under a border policy
//! - Rank filtering (median, min, max filters) built on that window

mod error;
pub mod neighbourhood;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use neighbourhood::{BorderPolicy, Neighbourhood, circular_index, reflect_index};

// Re-export commonly used functions
pub use rank::{RankFilter, max_filter, median_filter, min_filter};
