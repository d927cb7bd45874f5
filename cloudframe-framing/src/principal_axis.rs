//! Principal axis estimation
//!
//! Camera placement only needs an approximate "long axis" of the model, so
//! a full eigendecomposition of the covariance matrix is unnecessary: the
//! diagonal variances decide the axis and the off-diagonal entries provide
//! a tilt signal. Substituting true PCA would be a compatible upgrade; the
//! contract (direction, confidence, tilt) stays the same.

use crate::config::FramingConfig;
use crate::sampling::{sample_count, sample_stride, sampled, AnalysisKind};
use cloudframe_core::{Point3f, Vector3f};
use log::debug;

/// Off-diagonal covariance ratios for each axis pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTilt {
    pub xy: f32,
    pub xz: f32,
    pub yz: f32,
    /// Any ratio exceeded the configured threshold
    pub significant: bool,
}

/// Dominant orientation estimate for a cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxis {
    /// Unit direction of greatest coordinate spread
    pub direction: Vector3f,
    /// Confidence in [0, 1]
    pub confidence: f32,
    pub tilt: AxisTilt,
}

impl PrincipalAxis {
    /// Fixed diagonal direction used when axis analysis is skipped
    pub fn fallback() -> Self {
        Self {
            direction: Vector3f::new(1.0, 1.0, 1.0).normalize(),
            confidence: 0.1,
            tilt: AxisTilt {
                xy: 0.0,
                xz: 0.0,
                yz: 0.0,
                significant: false,
            },
        }
    }
}

/// Estimate the dominant axis of a cloud from sampled coordinates
///
/// One axis wins with confidence 0.7 when its variance exceeds each of the
/// other two by the configured factor; otherwise the default is Y with
/// confidence 0.3. An empty buffer yields the fallback axis.
pub fn principal_axis(points: &[Point3f], config: &FramingConfig) -> PrincipalAxis {
    let n = points.len();
    if n == 0 {
        return PrincipalAxis::fallback();
    }

    let stride = sample_stride(n, AnalysisKind::PrincipalAxis, config);
    if stride > 1 {
        debug!(
            "principal axis analysis visiting {} of {} points at stride {}",
            sample_count(n, stride),
            n,
            stride
        );
    }

    // Mean of the sample, accumulated in f64 to keep large clouds stable
    let mut mean = [0.0f64; 3];
    let mut count = 0usize;
    for p in sampled(points, stride) {
        mean[0] += p.x as f64;
        mean[1] += p.y as f64;
        mean[2] += p.z as f64;
        count += 1;
    }
    let inv = 1.0 / count as f64;
    let mean = [mean[0] * inv, mean[1] * inv, mean[2] * inv];

    // Symmetric second moments of deviations from the mean
    let mut xx = 0.0f64;
    let mut yy = 0.0f64;
    let mut zz = 0.0f64;
    let mut xy = 0.0f64;
    let mut xz = 0.0f64;
    let mut yz = 0.0f64;
    for p in sampled(points, stride) {
        let dx = p.x as f64 - mean[0];
        let dy = p.y as f64 - mean[1];
        let dz = p.z as f64 - mean[2];
        xx += dx * dx;
        yy += dy * dy;
        zz += dz * dz;
        xy += dx * dy;
        xz += dx * dz;
        yz += dy * dz;
    }
    let var_x = xx * inv;
    let var_y = yy * inv;
    let var_z = zz * inv;
    let cov_xy = xy * inv;
    let cov_xz = xz * inv;
    let cov_yz = yz * inv;

    let ratio = config.variance_ratio as f64;
    let (direction, confidence) = if var_x > var_y * ratio && var_x > var_z * ratio {
        (Vector3f::x(), 0.7)
    } else if var_y > var_x * ratio && var_y > var_z * ratio {
        (Vector3f::y(), 0.7)
    } else if var_z > var_x * ratio && var_z > var_y * ratio {
        (Vector3f::z(), 0.7)
    } else {
        // No clearly dominant spread
        (Vector3f::y(), 0.3)
    };

    let tilt_xy = tilt_ratio(cov_xy, var_x, var_y);
    let tilt_xz = tilt_ratio(cov_xz, var_x, var_z);
    let tilt_yz = tilt_ratio(cov_yz, var_y, var_z);
    let threshold = config.tilt_threshold;
    let tilt = AxisTilt {
        xy: tilt_xy,
        xz: tilt_xz,
        yz: tilt_yz,
        significant: tilt_xy > threshold || tilt_xz > threshold || tilt_yz > threshold,
    };

    debug!(
        "principal axis {:?} (confidence {}), variances ({:.3e}, {:.3e}, {:.3e})",
        direction, confidence, var_x, var_y, var_z
    );

    PrincipalAxis {
        direction,
        confidence,
        tilt,
    }
}

fn tilt_ratio(cov: f64, var_a: f64, var_b: f64) -> f32 {
    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 {
        (cov.abs() / denom) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Axis-aligned cloud with the given standard deviations, built from a
    /// fixed symmetric pattern so the variances are exact
    fn scaled_cloud(sx: f32, sy: f32, sz: f32) -> Vec<Point3f> {
        let mut points = Vec::new();
        for i in -10..=10 {
            let t = i as f32 / 10.0;
            points.push(Point3f::new(t * sx, 0.0, 0.0));
            points.push(Point3f::new(0.0, t * sy, 0.0));
            points.push(Point3f::new(0.0, 0.0, t * sz));
        }
        points
    }

    #[test]
    fn test_dominant_x_axis() {
        let config = FramingConfig::default();
        // variance on X is 4x the others: 2x the std deviation
        let points = scaled_cloud(2.0, 1.0, 1.0);
        let result = principal_axis(&points, &config);
        assert_eq!(result.direction, Vector3f::x());
        assert_relative_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_double_variance_is_dominant() {
        let config = FramingConfig::default();
        // variance ratio exactly 2, above the 1.5 threshold
        let points = scaled_cloud(2.0f32.sqrt(), 1.0, 1.0);
        let result = principal_axis(&points, &config);
        assert_eq!(result.direction, Vector3f::x());
        assert_relative_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_equal_variances_default_to_y() {
        let config = FramingConfig::default();
        let points = scaled_cloud(1.0, 1.0, 1.0);
        let result = principal_axis(&points, &config);
        assert_eq!(result.direction, Vector3f::y());
        assert_relative_eq!(result.confidence, 0.3);
        assert!(!result.tilt.significant);
    }

    #[test]
    fn test_tilted_cloud_flags_significant_tilt() {
        let config = FramingConfig::default();
        // Points along the x = y diagonal correlate the two axes fully
        let points: Vec<Point3f> = (-50..=50)
            .map(|i| Point3f::new(i as f32, i as f32, 0.0))
            .collect();
        let result = principal_axis(&points, &config);
        assert!(result.tilt.significant);
        assert_relative_eq!(result.tilt.xy, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_empty_cloud_falls_back() {
        let config = FramingConfig::default();
        let result = principal_axis(&[], &config);
        assert_relative_eq!(result.confidence, 0.1);
        assert_relative_eq!(result.direction.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fallback_direction_is_diagonal() {
        let axis = PrincipalAxis::fallback();
        let expected = 1.0 / 3.0f32.sqrt();
        assert_relative_eq!(axis.direction.x, expected, epsilon = 1e-6);
        assert_relative_eq!(axis.direction.y, expected, epsilon = 1e-6);
        assert_relative_eq!(axis.direction.z, expected, epsilon = 1e-6);
    }
}
