//! Axis-aligned bounds and bounding spheres
//!
//! The bounding sphere, not the box, is what all downstream scale and
//! camera math depends on: the model may be rotated at view time and the
//! sphere is rotation-invariant.

use crate::point::Point3f;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
///
/// Invariant: `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Exact bounding box of a point set, `None` for an empty set
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;

        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Center of the box
    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Per-axis extents
    pub fn size(&self) -> [f32; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    /// Largest extent across the three axes
    pub fn max_dimension(&self) -> f32 {
        let [sx, sy, sz] = self.size();
        sx.max(sy).max(sz)
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Point3f; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3f::new(a.x, a.y, a.z),
            Point3f::new(a.x, a.y, b.z),
            Point3f::new(a.x, b.y, a.z),
            Point3f::new(a.x, b.y, b.z),
            Point3f::new(b.x, a.y, a.z),
            Point3f::new(b.x, a.y, b.z),
            Point3f::new(b.x, b.y, a.z),
            Point3f::new(b.x, b.y, b.z),
        ]
    }

    /// Whether a point lies inside the box on all three axes
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// All six bounds are finite
    pub fn is_finite(&self) -> bool {
        self.min.coords.iter().all(|c| c.is_finite())
            && self.max.coords.iter().all(|c| c.is_finite())
    }

    /// Shrink the box by interpolating each corner toward the opposite one
    ///
    /// `margin` is the per-side fraction removed; 0.05 keeps the central
    /// 90% range on every axis. This is the safety-fallback shape used when
    /// quantile trimming rejects too many points.
    pub fn shrunk(&self, margin: f32) -> Self {
        let lerp = |a: f32, b: f32| a * (1.0 - margin) + b * margin;
        Self {
            min: Point3f::new(
                lerp(self.min.x, self.max.x),
                lerp(self.min.y, self.max.y),
                lerp(self.min.z, self.max.z),
            ),
            max: Point3f::new(
                lerp(self.max.x, self.min.x),
                lerp(self.max.y, self.min.y),
                lerp(self.max.z, self.min.z),
            ),
        }
    }

    /// Box of the transformed corners
    ///
    /// Exact for the scale-and-translate placements this crate produces.
    pub fn transformed(&self, transform: &Transform3D) -> Self {
        let corners = self.corners().map(|c| transform.transform_point(&c));
        Self::from_points(corners.iter()).unwrap()
    }
}

/// A bounding sphere derived from a box
///
/// Not the true minimal enclosing sphere: center is the box midpoint and
/// the radius is the exact maximum corner distance, which is all the
/// framing math needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Point3f,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere enclosing all eight corners of a box
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let center = aabb.center();
        let radius = aabb
            .corners()
            .iter()
            .map(|c| (c - center).norm())
            .fold(0.0f32, f32::max);
        Self { center, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_empty() {
        let points: Vec<Point3f> = Vec::new();
        assert!(Aabb::from_points(points.iter()).is_none());
    }

    #[test]
    fn test_from_points_min_max() {
        let points = vec![
            Point3f::new(1.0, -2.0, 3.0),
            Point3f::new(-1.0, 4.0, 0.0),
            Point3f::new(0.5, 0.0, -5.0),
        ];
        let aabb = Aabb::from_points(points.iter()).unwrap();
        assert_eq!(aabb.min, Point3f::new(-1.0, -2.0, -5.0));
        assert_eq!(aabb.max, Point3f::new(1.0, 4.0, 3.0));
        assert!(aabb.min.x <= aabb.max.x && aabb.min.y <= aabb.max.y && aabb.min.z <= aabb.max.z);
    }

    #[test]
    fn test_center_and_max_dimension() {
        let aabb = Aabb::new(Point3f::new(-1.0, 0.0, 0.0), Point3f::new(3.0, 2.0, 1.0));
        assert_eq!(aabb.center(), Point3f::new(1.0, 1.0, 0.5));
        assert_eq!(aabb.max_dimension(), 4.0);
    }

    #[test]
    fn test_contains() {
        let aabb = Aabb::new(Point3f::origin(), Point3f::new(1.0, 1.0, 1.0));
        assert!(aabb.contains(&Point3f::new(0.5, 0.5, 0.5)));
        assert!(aabb.contains(&Point3f::new(0.0, 1.0, 0.0)));
        assert!(!aabb.contains(&Point3f::new(0.5, 0.5, 1.1)));
    }

    #[test]
    fn test_shrunk_keeps_central_range() {
        let aabb = Aabb::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(10.0, 20.0, 30.0));
        let safe = aabb.shrunk(0.05);
        assert_relative_eq!(safe.min.x, 0.5);
        assert_relative_eq!(safe.max.x, 9.5);
        assert_relative_eq!(safe.min.y, 1.0);
        assert_relative_eq!(safe.max.y, 19.0);
        assert_relative_eq!(safe.min.z, 1.5);
        assert_relative_eq!(safe.max.z, 28.5);
    }

    #[test]
    fn test_unit_cube_sphere_radius() {
        let aabb = Aabb::new(
            Point3f::new(-0.5, -0.5, -0.5),
            Point3f::new(0.5, 0.5, 0.5),
        );
        let sphere = BoundingSphere::from_aabb(&aabb);
        assert_eq!(sphere.center, Point3f::origin());
        assert_relative_eq!(sphere.radius, 3.0f32.sqrt() / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_box_sphere() {
        let aabb = Aabb::new(Point3f::new(2.0, 2.0, 2.0), Point3f::new(2.0, 2.0, 2.0));
        let sphere = BoundingSphere::from_aabb(&aabb);
        assert_eq!(sphere.radius, 0.0);
    }

    #[test]
    fn test_transformed_scale_translate() {
        let aabb = Aabb::new(Point3f::origin(), Point3f::new(1.0, 1.0, 1.0));
        let transform = Transform3D::uniform_scaling(2.0)
            .compose(Transform3D::translation(nalgebra::Vector3::new(-0.5, -0.5, -0.5)));
        let placed = aabb.transformed(&transform);
        assert_relative_eq!(placed.min.x, -1.0);
        assert_relative_eq!(placed.max.x, 1.0);
    }
}
