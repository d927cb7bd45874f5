//! Core data structures for cloudframe
//!
//! This crate provides the fundamental types the framing pipeline operates
//! on: points, point clouds, axis-aligned bounds, bounding spheres, and the
//! placement transform applied to a framed model.

pub mod point;
pub mod point_cloud;
pub mod bounds;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use bounds::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Common result type for cloudframe operations
pub type Result<T> = std::result::Result<T, Error>;
