//! Render-facing camera state
//!
//! The thin surface handed to the rendering collaborator: a perspective
//! camera with a look-at target. The framing pipeline writes it through
//! [`Camera::apply_plan`]; the orbit controller and the visibility guard
//! mutate it afterwards.

use crate::camera::CameraPlan;
use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// A 3D camera for viewing point clouds
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Place the camera according to a framing plan, looking at the origin
    pub fn apply_plan(&mut self, plan: &CameraPlan) {
        self.position = plan.position();
        self.target = Point3::origin();
        self.near = plan.near;
        self.far = plan.far;
    }

    /// Distance from the camera to a point
    pub fn distance_to(&self, point: &Point3<f32>) -> f32 {
        (self.position - point).norm()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 2.0),
            Point3::origin(),
            Vector3::y(),
            60.0f32.to_radians(),
            16.0 / 9.0,
            0.001,
            10000.0,
        )
    }
}
