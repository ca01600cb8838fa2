//! pixops-morph - Morphological operations for image processing
//!
//! This crate provides:
//!
//! - Structuring elements ([`BinarySel`], [`GreySel`], [`Sel`]) with the
//!   canonical cross, diamond and disk shapes ([`SelShape`])
//! - A plain-text format for reading and writing structuring elements
//! - Binary morphology: erosion, dilation, opening, closing
//! - Grayscale morphology: erosion, dilation, opening, closing for 8-bpp
//!   images, with optional min/max rescaling
//!
//! Operators only compute pixels at which the whole structuring element
//! lies inside the image (see [`scan_range`]); all other output pixels are
//! zero.

pub mod binary;
mod error;
pub mod grayscale;
pub mod ops;
pub mod sel;
mod selio;

pub use error::{MorphError, MorphResult};
pub use ops::{MorphOp, ScanRange, scan_range};
pub use sel::{BinarySel, GreySel, Sel, SelShape};

// Re-export binary morphology
pub use binary::{
    BinaryClose, BinaryDilate, BinaryErode, BinaryOpen, check_binary_image, close, dilate, erode,
    open,
};

// Re-export grayscale morphology
pub use grayscale::{
    GreyClose, GreyDilate, GreyErode, GreyOpen, close_gray, dilate_gray, erode_gray, open_gray,
};
