//! # cloudframe-framing
//!
//! The geometric framing pipeline for a point-cloud viewer: given the raw
//! coordinates of a loaded model, compute an outlier-trimmed bounding
//! volume, a bounding sphere, a dominant-axis estimate, a display scale,
//! and a camera placement that reliably frames the cloud at any scale,
//! then sanity-check the placed result.
//!
//! The stages run strictly in order and each consumes explicit values from
//! the previous one; there is no shared mutable state between loads.

pub mod config;
pub mod sampling;
pub mod bounds_estimator;
pub mod principal_axis;
pub mod scale;
pub mod camera;
pub mod view;
pub mod guard;
pub mod pipeline;

// Re-export commonly used items
pub use config::*;
pub use sampling::*;
pub use bounds_estimator::*;
pub use principal_axis::*;
pub use scale::*;
pub use camera::*;
pub use view::*;
pub use guard::*;
pub use pipeline::*;
