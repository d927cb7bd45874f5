//! Camera framing
//!
//! Turns the bounding sphere and the principal axis into a camera
//! direction, distance and clip planes. Near and far both scale with the
//! computed distance so depth precision and coverage track the model's own
//! scale at any zoom level.

use crate::config::FramingConfig;
use crate::principal_axis::PrincipalAxis;
use cloudframe_core::{Point3f, Vector3f};
use log::info;
use serde::{Deserialize, Serialize};

/// A complete camera placement for the initial view
///
/// All four fields are set by one constructor call; a plan is never
/// partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPlan {
    /// Unit direction from the target toward the camera
    pub direction: Vector3f,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraPlan {
    /// Camera position implied by the plan, looking at the origin
    pub fn position(&self) -> Point3f {
        Point3f::origin() + self.direction * self.distance
    }
}

/// Compute the camera placement that frames a sphere of `scaled_radius`
///
/// With a confident axis estimate the view is biased obliquely around the
/// axis: a sideways-and-up direction when the axis is near-vertical,
/// otherwise the axis with an added upward component. Low confidence or a
/// degenerate direction falls back to the (1, 1, 1) diagonal.
pub fn plan_camera(
    axis: &PrincipalAxis,
    scaled_radius: f32,
    large_model: bool,
    config: &FramingConfig,
) -> CameraPlan {
    let mut direction = if axis.confidence > 0.5 {
        if axis.direction.y.abs() > 0.9 {
            // Near-vertical axis: view from the side and above
            Vector3f::new(0.7, 0.7, 0.0)
        } else {
            Vector3f::new(
                axis.direction.x,
                axis.direction.y + 1.0,
                axis.direction.z,
            )
        }
    } else {
        Vector3f::new(1.0, 1.0, 1.0)
    };

    if direction.norm() < 1e-6 {
        direction = Vector3f::new(1.0, 1.0, 1.0);
    }
    let direction = direction.normalize();

    let fill_ratio = if large_model {
        config.large_fill_ratio
    } else {
        config.fill_ratio
    };

    // distance at which the sphere fills `fill_ratio` of the vertical FOV
    let optimal = scaled_radius / (config.fov_y / 2.0 * fill_ratio).sin();
    // keep the camera outside the sphere even for tiny radii
    let minimum = config.min_camera_distance.max(scaled_radius * 2.0);
    let distance = optimal.max(minimum);

    let near = (distance * 0.01).max(0.001);
    let far = distance * 100.0;

    info!(
        "camera distance {:.2} (optimal {:.2}, minimum {:.2}), near {:.4}, far {:.2}",
        distance, optimal, minimum, near, far
    );

    CameraPlan {
        direction,
        distance,
        near,
        far,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_never_below_minimum() {
        let config = FramingConfig::default();
        let axis = PrincipalAxis::fallback();
        for radius in [0.001f32, 0.1, 1.0, 2.0, 10.0, 500.0] {
            let plan = plan_camera(&axis, radius, false, &config);
            assert!(plan.distance >= 5.0f32.max(radius * 2.0));
        }
    }

    #[test]
    fn test_near_below_far_and_scales_with_distance() {
        let config = FramingConfig::default();
        let axis = PrincipalAxis::fallback();
        let small = plan_camera(&axis, 1.0, false, &config);
        let big = plan_camera(&axis, 1000.0, false, &config);
        assert!(small.near < small.far);
        assert!(big.near < big.far);
        assert_relative_eq!(big.near, big.distance * 0.01, epsilon = 1e-3);
        assert_relative_eq!(big.far, big.distance * 100.0, epsilon = 1e-1);
    }

    #[test]
    fn test_low_confidence_uses_diagonal() {
        let config = FramingConfig::default();
        let mut axis = PrincipalAxis::fallback();
        axis.confidence = 0.3;
        let plan = plan_camera(&axis, 1.0, false, &config);
        let expected = Vector3f::new(1.0, 1.0, 1.0).normalize();
        assert_relative_eq!(plan.direction.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(plan.direction.y, expected.y, epsilon = 1e-6);
    }

    #[test]
    fn test_vertical_axis_views_from_side() {
        let config = FramingConfig::default();
        let mut axis = PrincipalAxis::fallback();
        axis.direction = Vector3f::y();
        axis.confidence = 0.7;
        let plan = plan_camera(&axis, 1.0, false, &config);
        let expected = Vector3f::new(0.7, 0.7, 0.0).normalize();
        assert_relative_eq!(plan.direction.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(plan.direction.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_horizontal_axis_gets_upward_component() {
        let config = FramingConfig::default();
        let mut axis = PrincipalAxis::fallback();
        axis.direction = Vector3f::x();
        axis.confidence = 0.7;
        let plan = plan_camera(&axis, 1.0, false, &config);
        let expected = Vector3f::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(plan.direction.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(plan.direction.y, expected.y, epsilon = 1e-6);
    }

    #[test]
    fn test_downward_axis_also_views_from_side() {
        let config = FramingConfig::default();
        let mut axis = PrincipalAxis::fallback();
        axis.direction = Vector3f::new(0.0, -1.0, 0.0);
        axis.confidence = 0.7;
        let plan = plan_camera(&axis, 1.0, false, &config);
        let expected = Vector3f::new(0.7, 0.7, 0.0).normalize();
        assert_relative_eq!(plan.direction.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(plan.direction.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_large_model_sits_further_back() {
        let config = FramingConfig::default();
        let axis = PrincipalAxis::fallback();
        let radius = 100.0;
        let normal = plan_camera(&axis, radius, false, &config);
        let large = plan_camera(&axis, radius, true, &config);
        assert!(large.distance > normal.distance);
    }
}
