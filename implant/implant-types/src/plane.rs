//! Plane representation for resection planes.

use nalgebra::{Point3, Unit, Vector3};

use crate::RigidTransform;

/// An oriented plane: a point on the plane and its unit normal.
///
/// # Example
///
/// ```
/// use implant_types::Plane3;
/// use nalgebra::{Point3, Vector3};
///
/// let plane = Plane3::new(Point3::origin(), Vector3::y());
/// assert!((plane.signed_distance(&Point3::new(0.0, 2.5, 0.0)) - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3 {
    /// A point on the plane.
    pub point: Point3<f64>,
    /// Unit normal.
    pub normal: Unit<Vector3<f64>>,
}

impl Plane3 {
    /// Creates a plane through `point` with the given (not necessarily unit)
    /// normal.
    #[must_use]
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal: Unit::new_normalize(normal),
        }
    }

    /// The plane carried through a rigid transform.
    #[must_use]
    pub fn transformed(&self, transform: &RigidTransform) -> Self {
        Self {
            point: transform.transform_point(&self.point),
            normal: Unit::new_unchecked(transform.rotation * self.normal.into_inner()),
        }
    }

    /// The plane shifted by `distance` along its normal.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            point: self.point + self.normal.into_inner() * distance,
            normal: self.normal,
        }
    }

    /// Signed distance of `p` from the plane (positive on the normal side).
    #[must_use]
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        (p - self.point).dot(&self.normal)
    }
}
