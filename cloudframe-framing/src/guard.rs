//! Post-placement visibility guard
//!
//! The analysis stages work on pre-transform geometry; floating-point
//! accumulation or an unusual placement can still leave the final frame
//! unusable. This runs once after the scene is populated and nudges the
//! configuration if the result is degenerate: a model too small to see, or
//! a camera absurdly far from it.

use crate::view::Camera;
use cloudframe_core::Aabb;
use log::warn;

/// Corrective action the guard had to take; informational, never fatal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisibilityCorrection {
    /// The placed model was pathologically small; its scale must be
    /// multiplied by this factor
    RescaledModel { factor: f32 },
    /// The camera was repositioned to this distance from the model center
    RepositionedCamera { distance: f32 },
}

/// Check the placed geometry against the camera and intervene if degenerate
///
/// `placed` is the bounding box of the geometry after scale and transform.
/// Checks run in order: a non-finite or empty box aborts; a box smaller
/// than 1/1000th of a unit requests a 100x rescale (no recursion); a camera
/// more than 50 box-lengths away is brought to 10 box-lengths along its
/// current direction and retargeted at the center.
pub fn ensure_visible(placed: &Aabb, camera: &mut Camera) -> Option<VisibilityCorrection> {
    if !placed.is_finite() {
        warn!("placed geometry has no finite bounds, nothing to guard");
        return None;
    }

    let max_dim = placed.max_dimension();
    if max_dim <= 0.0 {
        return None;
    }

    if max_dim < 0.001 {
        warn!(
            "placed model max dimension {:.6} is below visibility, requesting 100x rescale",
            max_dim
        );
        return Some(VisibilityCorrection::RescaledModel { factor: 100.0 });
    }

    let center = placed.center();
    let cam_to_model = camera.distance_to(&center);
    if cam_to_model > max_dim * 50.0 {
        let new_distance = max_dim * 10.0;
        warn!(
            "camera is {:.2} from the model ({}x its size), repositioning to {:.2}",
            cam_to_model,
            (cam_to_model / max_dim) as u32,
            new_distance
        );

        let direction = (camera.position - center).normalize();
        camera.position = center + direction * new_distance;
        camera.near = (new_distance * 0.01).max(0.001);
        camera.far = new_distance * 100.0;
        camera.target = center;

        return Some(VisibilityCorrection::RepositionedCamera {
            distance: new_distance,
        });
    }

    None
}
