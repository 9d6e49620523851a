//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box defined by two corner points.
///
/// Used to bound the visible trace of a resection plane; if the box misses
/// the plane, the host draws no trace.
///
/// # Example
///
/// ```
/// use implant_types::Aabb;
/// use nalgebra::{Point3, Vector3};
///
/// let aabb = Aabb::from_half_extents(Point3::origin(), Vector3::new(25.0, 25.0, 25.0));
/// assert!(aabb.contains(&Point3::new(10.0, -10.0, 24.0)));
/// assert_eq!(aabb.center(), Point3::origin());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a box from two corners, corrected per axis so `min <= max`.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Creates a box centered at `center` with the given half extents.
    #[must_use]
    pub fn from_half_extents(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// True when `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// The box shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_corrects_corners() {
        let aabb = Aabb::new(Point3::new(5.0, -1.0, 0.0), Point3::new(-5.0, 1.0, 2.0));
        assert_eq!(aabb.min, Point3::new(-5.0, -1.0, 0.0));
        assert_eq!(aabb.max, Point3::new(5.0, 1.0, 2.0));
    }

    #[test]
    fn test_half_extents_center_and_size() {
        let aabb = Aabb::from_half_extents(Point3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        assert_relative_eq!(aabb.center().coords, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.size(), Vector3::new(8.0, 10.0, 12.0), epsilon = 1e-12);
    }

    #[test]
    fn test_contains_boundary() {
        let aabb = Aabb::from_half_extents(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains(&Point3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains(&Point3::new(1.0, 1.0, 1.1)));
    }
}
