//! Framing configuration
//!
//! Every empirically-chosen constant of the pipeline lives here as a
//! tunable field. The defaults are the values the viewer shipped with;
//! none of them is a correctness requirement.

use cloudframe_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunable parameters for one framing pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Point count above which a model is classified as "large"
    pub large_model_threshold: usize,

    /// Point count above which bounding-volume analysis sub-samples
    pub bounds_sample_threshold: usize,
    /// Stride used when bounding-volume analysis sub-samples (20% rate)
    pub bounds_stride: usize,

    /// Point count above which principal-axis analysis sub-samples
    pub axis_sample_threshold: usize,
    /// Stride used when principal-axis analysis sub-samples (10% rate)
    pub axis_stride: usize,

    /// Per-axis quantile trimmed from each end for normal models
    pub trim_ratio: f32,
    /// Per-axis quantile trimmed from each end for large models
    pub large_trim_ratio: f32,
    /// Minimum acceptable inclusion fraction for the trimmed box
    pub min_inclusion: f32,
    /// Per-side shrink applied to the full box on fallback
    pub safety_margin: f32,
    /// Nominal inclusion reported for the fallback box
    pub fallback_inclusion: f32,
    /// Below this point count, trimming is skipped and the exact box used
    pub exact_bounds_limit: usize,

    /// Factor by which one variance must exceed both others to win
    pub variance_ratio: f32,
    /// Off-diagonal ratio above which tilt is flagged significant
    pub tilt_threshold: f32,

    /// Vertical field of view, radians
    pub fov_y: f32,
    /// Fraction of the vertical FOV the sphere should fill
    pub fill_ratio: f32,
    /// Fill ratio used for large models
    pub large_fill_ratio: f32,
    /// Camera never ends up closer than max(this, 2 * radius)
    pub min_camera_distance: f32,

    /// Skip trimming and axis analysis, trading precision for latency
    pub fast_mode: bool,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            large_model_threshold: 2_200_000,
            bounds_sample_threshold: 500_000,
            bounds_stride: 5,
            axis_sample_threshold: 200_000,
            axis_stride: 10,
            trim_ratio: 0.01,
            large_trim_ratio: 0.02,
            min_inclusion: 0.75,
            safety_margin: 0.05,
            fallback_inclusion: 0.90,
            exact_bounds_limit: 100,
            variance_ratio: 1.5,
            tilt_threshold: 0.3,
            fov_y: 60.0f32.to_radians(),
            fill_ratio: 0.7,
            large_fill_ratio: 0.6,
            min_camera_distance: 5.0,
            fast_mode: false,
        }
    }
}

impl FramingConfig {
    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.bounds_stride == 0 || self.axis_stride == 0 {
            return Err(Error::InvalidData(
                "sampling strides must be at least 1".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.trim_ratio) || !(0.0..0.5).contains(&self.large_trim_ratio) {
            return Err(Error::InvalidData(
                "trim ratios must lie in [0, 0.5)".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_inclusion) {
            return Err(Error::InvalidData(
                "min_inclusion must lie in [0, 1]".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.safety_margin) {
            return Err(Error::InvalidData(
                "safety_margin must lie in [0, 0.5)".to_string(),
            ));
        }
        if self.fov_y <= 0.0 || self.fov_y >= std::f32::consts::PI {
            return Err(Error::InvalidData(
                "fov_y must lie in (0, pi)".to_string(),
            ));
        }
        if self.fill_ratio <= 0.0
            || self.fill_ratio > 1.0
            || self.large_fill_ratio <= 0.0
            || self.large_fill_ratio > 1.0
        {
            return Err(Error::InvalidData(
                "fill ratios must lie in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a model of `n` points is classified as large
    pub fn is_large_model(&self, n: usize) -> bool {
        n > self.large_model_threshold
    }

    /// Trim ratio for a model of the given classification
    pub fn trim_ratio_for(&self, large_model: bool) -> f32 {
        if large_model {
            self.large_trim_ratio
        } else {
            self.trim_ratio
        }
    }
}
