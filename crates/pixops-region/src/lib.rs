//! pixops-region - Region segmentation for pixops
//!
//! This crate provides two segmentation algorithms:
//!
//! - **Region growing** - Seeded, iterative pixel claiming against each
//!   region's running mean ([`RegionGrower`])
//! - **Connected-component labeling** - Grouping foreground pixels into
//!   4- or 8-connected components ([`RegionLabeler`])
//!
//! # Examples
//!
//! ## Labeling components
//!
//! ```
//! use pixops_region::RegionLabeler;
//! use pixops_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(100, 100, PixelDepth::Bit1).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! // Set some pixels to create components
//! pix_mut.set_pixel(10, 10, 1).unwrap();
//! pix_mut.set_pixel(11, 10, 1).unwrap();
//! pix_mut.set_pixel(50, 50, 1).unwrap();
//!
//! let pix: Pix = pix_mut.into();
//! let labels = RegionLabeler::new(4).unwrap().label(&pix).unwrap();
//! assert_eq!(labels.num_labels(), 2);
//! assert_eq!(labels.component_sizes(), &[2, 1]);
//! ```
//!
//! ## Growing regions
//!
//! ```
//! use pixops_region::{Connectivity, GrowerOptions, RegionGrower};
//! use pixops_core::{Pix, PixelDepth};
//!
//! let pix = Pix::from_samples(4, 1, PixelDepth::Bit8, 1, vec![10, 12, 200, 203]).unwrap();
//! let options = GrowerOptions::default()
//!     .with_connectivity(Connectivity::Four)
//!     .with_threshold(5);
//! let mut grower = RegionGrower::new(&pix, &[(0, 0), (3, 0)], options).unwrap();
//! grower.grow_to_completion();
//! let labels = grower.label_map();
//! assert_eq!(labels.get_pixel(1, 0), Some(1));
//! assert_eq!(labels.get_pixel(2, 0), Some(2));
//! ```

pub mod connectivity;
mod error;
pub mod grower;
pub mod label;

pub use connectivity::Connectivity;
pub use error::{RegionError, RegionResult};
pub use grower::{GrowerOptions, GrowerState, MAX_REGIONS, PixelStatus, Region, RegionGrower};
pub use label::{LabelMap, MAX_LABELS, RegionLabeler};
