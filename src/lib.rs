//! Raydiance path tracer
//!
//! A CPU path tracer for sphere scenes: stochastic sampling with
//! per-pixel random streams, three material models (diffuse, metal,
//! dielectric), bounding-box accelerated intersection, and a thin-lens
//! camera with depth of field.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aabb;
pub mod camera;
pub mod interval;
pub mod material;
pub mod random;
pub mod ray;
pub mod scene;
pub mod sphere;
