//! # Rayon Utilities
//!
//! [`rayon`] powered wrappers for parallel batch conversion.

mod rayon_converter;

pub use rayon_converter::ParallelRayonConverter;
