//! Robust bounding volume estimation
//!
//! Sensor noise puts stray points far outside the real model; an exact
//! bounding box of such a cloud can be orders of magnitude larger than the
//! geometry the user cares about. The estimator trims extreme per-axis
//! quantiles instead: sort the sampled X, Y and Z coordinates
//! independently and take the box spanned by the trimmed order statistics.
//! The trim is intentionally conservative and cheap (O(m log m) per axis),
//! not a joint outlier test.

use crate::config::FramingConfig;
use crate::sampling::{sample_count, sample_stride, sampled, AnalysisKind};
use cloudframe_core::{Aabb, Error, Point3f, Result};
use log::{debug, warn};
use rayon::prelude::*;

/// Outlier-trimmed bounds plus the fraction of points they retain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveBounds {
    pub aabb: Aabb,
    /// Fraction of (sampled) points inside the box on all three axes, in [0, 1]
    pub inclusion: f32,
    /// The trimmed box was discarded for the shrunk full box
    pub fallback: bool,
}

/// Compute the outlier-trimmed bounding box of a cloud
///
/// Small clouds are returned exactly. If the trimmed box retains fewer
/// than `min_inclusion` of the points, it is discarded for the full box
/// shrunk by `safety_margin` per side; this guards against distributions
/// where one axis's trim invalidates the box for the others.
pub fn effective_bounds(
    points: &[Point3f],
    large_model: bool,
    config: &FramingConfig,
) -> Result<EffectiveBounds> {
    let n = points.len();
    if n == 0 {
        return Err(Error::DegenerateInput(
            "cannot bound an empty point buffer".to_string(),
        ));
    }

    // Too few points for quantiles to mean anything
    if n < config.exact_bounds_limit {
        let aabb = Aabb::from_points(points.iter()).unwrap();
        return Ok(EffectiveBounds {
            aabb,
            inclusion: 1.0,
            fallback: false,
        });
    }

    let stride = sample_stride(n, AnalysisKind::BoundingVolume, config);
    if stride > 1 {
        debug!(
            "bounding volume analysis visiting {} of {} points at stride {}",
            sample_count(n, stride),
            n,
            stride
        );
    }

    let mut xs: Vec<f32> = sampled(points, stride).map(|p| p.x).collect();
    let mut ys: Vec<f32> = sampled(points, stride).map(|p| p.y).collect();
    let mut zs: Vec<f32> = sampled(points, stride).map(|p| p.z).collect();

    xs.par_sort_unstable_by(f32::total_cmp);
    ys.par_sort_unstable_by(f32::total_cmp);
    zs.par_sort_unstable_by(f32::total_cmp);

    let m = xs.len();
    let ratio = config.trim_ratio_for(large_model);
    let lower = (m as f32 * ratio).floor() as usize;
    let upper = ((m as f32 * (1.0 - ratio)).floor() as usize).min(m - 1);

    // Sortedness and lower <= upper give min <= max on every axis
    let trimmed = Aabb::new(
        Point3f::new(xs[lower], ys[lower], zs[lower]),
        Point3f::new(xs[upper], ys[upper], zs[upper]),
    );

    // Fraction of points inside on all three axes at once; exact scan when
    // the analysis ran at full density, sampled scan otherwise
    let inclusion = if stride == 1 {
        inclusion_fraction(points.iter(), &trimmed)
    } else {
        inclusion_fraction(sampled(points, stride), &trimmed)
    };

    if inclusion < config.min_inclusion {
        warn!(
            "trimmed box retains only {:.1}% of points, falling back to shrunk full bounds",
            inclusion * 100.0
        );
        let full = Aabb::from_points(points.iter()).unwrap();
        return Ok(EffectiveBounds {
            aabb: full.shrunk(config.safety_margin),
            inclusion: config.fallback_inclusion,
            fallback: true,
        });
    }

    debug!(
        "effective bounds retain {:.1}% of points (trim ratio {})",
        inclusion * 100.0,
        ratio
    );

    Ok(EffectiveBounds {
        aabb: trimmed,
        inclusion,
        fallback: false,
    })
}

fn inclusion_fraction<'a, I>(points: I, aabb: &Aabb) -> f32
where
    I: Iterator<Item = &'a Point3f>,
{
    let mut total = 0usize;
    let mut inside = 0usize;
    for p in points {
        total += 1;
        if aabb.contains(p) {
            inside += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        inside as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_cloud(side: usize, spacing: f32) -> Vec<Point3f> {
        let mut points = Vec::new();
        for i in 0..side {
            for j in 0..side {
                for k in 0..side {
                    points.push(Point3f::new(
                        i as f32 * spacing,
                        j as f32 * spacing,
                        k as f32 * spacing,
                    ));
                }
            }
        }
        points
    }

    #[test]
    fn test_empty_cloud_is_degenerate() {
        let config = FramingConfig::default();
        assert!(effective_bounds(&[], false, &config).is_err());
    }

    #[test]
    fn test_small_cloud_returns_exact_box() {
        let config = FramingConfig::default();
        let points = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 2.0, 3.0),
            Point3f::new(-1.0, 0.5, 0.5),
        ];
        let result = effective_bounds(&points, false, &config).unwrap();
        assert_eq!(result.inclusion, 1.0);
        assert!(!result.fallback);
        assert_eq!(result.aabb, Aabb::from_points(points.iter()).unwrap());
    }

    #[test]
    fn test_box_invariant_and_inclusion_range() {
        let config = FramingConfig::default();
        let points = grid_cloud(12, 0.5); // 1728 points
        let result = effective_bounds(&points, false, &config).unwrap();
        let aabb = result.aabb;
        assert!(aabb.min.x <= aabb.max.x);
        assert!(aabb.min.y <= aabb.max.y);
        assert!(aabb.min.z <= aabb.max.z);
        assert!(aabb.is_finite());
        assert!((0.0..=1.0).contains(&result.inclusion));
    }

    #[test]
    fn test_outlier_cluster_is_trimmed() {
        let config = FramingConfig::default();
        let mut points = grid_cloud(12, 0.1); // 1728 points in [0, 1.1]^3
        // 1% per-end trim removes a 10-point cluster at x = 1000
        for i in 0..10 {
            points.push(Point3f::new(1000.0 + i as f32, 0.5, 0.5));
        }
        let result = effective_bounds(&points, false, &config).unwrap();
        assert!(result.aabb.max.x < 10.0);
        assert!(result.inclusion < 1.0);
        assert!(result.inclusion >= config.min_inclusion);
    }

    #[test]
    fn test_sparse_coverage_falls_back_to_shrunk_full_box() {
        // A strict inclusion floor forces the fallback path; the returned
        // box must equal the 5%-per-side shrunk full box exactly
        let config = FramingConfig {
            min_inclusion: 0.995,
            ..Default::default()
        };
        let mut points = grid_cloud(10, 0.1); // 1000 points
        for i in 0..50 {
            points.push(Point3f::new(500.0 + i as f32, 0.5, 0.5));
        }
        let result = effective_bounds(&points, false, &config).unwrap();
        assert!(result.fallback);
        assert_relative_eq!(result.inclusion, config.fallback_inclusion);
        let expected = Aabb::from_points(points.iter())
            .unwrap()
            .shrunk(config.safety_margin);
        assert_eq!(result.aabb, expected);
    }

    #[test]
    fn test_large_model_uses_wider_trim() {
        // Same cloud, both classifications; the large-model box can only
        // be equal or tighter
        let config = FramingConfig::default();
        let points = grid_cloud(14, 1.0); // 2744 points
        let normal = effective_bounds(&points, false, &config).unwrap();
        let large = effective_bounds(&points, true, &config).unwrap();
        assert!(large.aabb.min.x >= normal.aabb.min.x);
        assert!(large.aabb.max.x <= normal.aabb.max.x);
    }
}
