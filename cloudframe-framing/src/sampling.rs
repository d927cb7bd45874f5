//! Coordinate sampling
//!
//! Analysis cost is bounded by visiting a strided subset of a large
//! buffer instead of every point. Stride selection is a pure function of
//! the point count and the analysis kind; small clouds always run at full
//! density.

use crate::config::FramingConfig;
use cloudframe_core::Point3f;

/// The two analyses with distinct sampling budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    BoundingVolume,
    PrincipalAxis,
}

/// Stride for visiting a buffer of `n` points
///
/// Always at least 1; exactly 1 below the per-kind threshold.
pub fn sample_stride(n: usize, kind: AnalysisKind, config: &FramingConfig) -> usize {
    let (threshold, stride) = match kind {
        AnalysisKind::BoundingVolume => (config.bounds_sample_threshold, config.bounds_stride),
        AnalysisKind::PrincipalAxis => (config.axis_sample_threshold, config.axis_stride),
    };
    if n > threshold {
        stride.max(1)
    } else {
        1
    }
}

/// Strided view over a point slice
///
/// The sample set exists only for the duration of one analysis call and is
/// never retained.
pub fn sampled(points: &[Point3f], stride: usize) -> impl Iterator<Item = &Point3f> {
    debug_assert!(stride >= 1);
    points.iter().step_by(stride.max(1))
}

/// Number of points a strided pass will visit
pub fn sample_count(n: usize, stride: usize) -> usize {
    if n == 0 {
        0
    } else {
        (n - 1) / stride.max(1) + 1
    }
}
