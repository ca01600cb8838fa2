//! pixops-core - Raster container for neighbourhood operators
//!
//! This crate provides the fundamental data structure used throughout
//! pixops:
//!
//! - [`Pix`] / [`PixMut`] - The raster container (immutable / mutable)
//! - [`PixelDepth`] - Sample depth (binary or 8-bit)
//!
//! Image decoding and encoding are not part of pixops; callers build
//! rasters from decoded samples with [`Pix::from_samples`].

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{MAX_SPP, Pix, PixMut, PixelDepth};
