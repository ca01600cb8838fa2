//! pixops - Neighbourhood image operators
//!
//! Operators that compute each output pixel from a window of input pixels,
//! plus two segmentation algorithms built on pixel adjacency:
//!
//! - Border policies and rank filters over a sliding window ([`filter`])
//! - Binary and grey structuring elements with dilation, erosion, opening
//!   and closing ([`morph`])
//! - Seeded region growing and connected-component labeling ([`region`])
//!
//! # Example
//!
//! ```
//! use pixops::{Pix, PixelDepth};
//! use pixops::morph::{BinarySel, dilate};
//! use pixops::region::RegionLabeler;
//!
//! let mut pm = Pix::new(16, 16, PixelDepth::Bit1).unwrap().to_mut();
//! pm.set_pixel(4, 4, 1).unwrap();
//! pm.set_pixel(6, 4, 1).unwrap();
//! let pix: Pix = pm.into();
//!
//! // Two isolated pixels merge into one blob after a 3x3 dilation.
//! let grown = dilate(&pix, &BinarySel::new(3, 3).unwrap()).unwrap();
//! let labels = RegionLabeler::new(4).unwrap().label(&grown).unwrap();
//! assert_eq!(labels.num_labels(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixops_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixops_filter as filter;
pub use pixops_morph as morph;
pub use pixops_region as region;
