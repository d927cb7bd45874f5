//! Scale planning
//!
//! Models arrive at wildly different scales, from sub-millimeter sensor
//! output to hundred-meter scans. A fixed step function maps the effective
//! size to a normalized target display size; larger models end up
//! relatively smaller so every size class fits the viewport comfortably.

use cloudframe_core::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// Target display size and the uniform scale that achieves it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePlan {
    pub target_size: f32,
    /// target_size / sphere radius
    pub factor: f32,
}

/// Map the effective max dimension to a display scale
///
/// Fails on a zero or non-finite sphere radius rather than dividing into
/// an infinite or NaN factor.
pub fn plan_scale(effective_max_dim: f32, sphere_radius: f32) -> Result<ScalePlan> {
    if !sphere_radius.is_finite() || sphere_radius <= 0.0 {
        return Err(Error::DegenerateInput(format!(
            "bounding sphere radius {} cannot be framed",
            sphere_radius
        )));
    }

    let target_size = if effective_max_dim > 100.0 {
        2.5
    } else if effective_max_dim > 10.0 {
        2.0
    } else if effective_max_dim < 0.1 {
        0.8
    } else if effective_max_dim < 1.0 {
        1.2
    } else {
        1.5
    };

    let factor = target_size / sphere_radius;
    info!(
        "target display size {:.2}, scale factor {:.4}",
        target_size, factor
    );

    Ok(ScalePlan {
        target_size,
        factor,
    })
}
