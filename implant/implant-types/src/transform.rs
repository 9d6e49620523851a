//! Rigid transformation type.

use nalgebra::{Matrix4, Point3, Unit, UnitQuaternion, Vector3};

/// A rigid transformation: rotation followed by translation.
///
/// # Example
///
/// ```
/// use implant_types::RigidTransform;
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
/// use std::f64::consts::PI;
///
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
/// let transform = RigidTransform::new(rotation, Vector3::new(1.0, 2.0, 3.0));
///
/// let p = transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
/// assert!((p.x - 1.0).abs() < 1e-12);
/// assert!((p.y - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// Rotation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
    /// Translation vector.
    pub translation: Vector3<f64>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Creates a transform from rotation and translation.
    #[must_use]
    pub const fn new(rotation: UnitQuaternion<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation,
        }
    }

    /// A pure rotation.
    #[must_use]
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            rotation,
            translation: Vector3::zeros(),
        }
    }

    /// Transforms a 3D point (rotate, then translate).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * point.coords + self.translation)
    }

    /// Transforms a direction vector (rotation only).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector
    }

    /// Composes this transform with another (`self * other`).
    ///
    /// The result applies `other` first, then `self` - standard
    /// left-to-right matrix multiplication with the rightmost factor applied
    /// first to a point.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * other.translation,
        }
    }

    /// The inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            rotation: inv_rotation,
            translation: inv_rotation * (-self.translation),
        }
    }

    /// Converts to a 4x4 homogeneous matrix for the CAD host.
    #[must_use]
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut mat = Matrix4::identity();
        let rot = self.rotation.to_rotation_matrix();
        for i in 0..3 {
            for j in 0..3 {
                mat[(i, j)] = rot[(i, j)];
            }
        }
        mat[(0, 3)] = self.translation.x;
        mat[(1, 3)] = self.translation.y;
        mat[(2, 3)] = self.translation.z;
        mat
    }

    /// True when this transform is approximately the identity.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.rotation.angle().abs() < epsilon && self.translation.norm() < epsilon
    }
}

/// A rotation of `degrees` about `axis`.
///
/// The calibration sheets specify all orientations in degrees; this is the
/// single conversion point.
#[must_use]
pub fn axis_angle_deg(axis: &Unit<Vector3<f64>>, degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(axis, degrees.to_radians())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let t = RigidTransform::identity();
        assert_relative_eq!(t.transform_point(&p).coords, p.coords, epsilon = 1e-12);
        assert!(t.is_identity(1e-12));
    }

    #[test]
    fn test_translation_only() {
        let t = RigidTransform::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let p = t.transform_point(&Point3::origin());
        assert_relative_eq!(p.coords, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_90_degrees_z() {
        let t = RigidTransform::from_rotation(axis_angle_deg(&Vector3::z_axis(), 90.0));
        let p = t.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_applies_rightmost_first() {
        let rot = RigidTransform::from_rotation(axis_angle_deg(&Vector3::z_axis(), 90.0));
        let shift = RigidTransform::from_translation(Vector3::new(1.0, 0.0, 0.0));

        // rot ∘ shift: translate then rotate.
        let p = rot.compose(&shift).transform_point(&Point3::origin());
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);

        // shift ∘ rot: rotate (no-op on the origin) then translate.
        let q = shift.compose(&rot).transform_point(&Point3::origin());
        assert_relative_eq!(q.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = RigidTransform::new(
            axis_angle_deg(&Vector3::y_axis(), -45.0),
            Vector3::new(3.0, -1.0, 2.0),
        );
        let p = Point3::new(0.5, 0.25, -4.0);
        let back = t.inverse().transform_point(&t.transform_point(&p));
        assert_relative_eq!(back.coords, p.coords, epsilon = 1e-10);
    }

    #[test]
    fn test_to_matrix4_translation_column() {
        let t = RigidTransform::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let m = t.to_matrix4();
        assert_relative_eq!(m[(0, 3)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[(1, 3)], 2.0, epsilon = 1e-12);
        assert_relative_eq!(m[(2, 3)], 3.0, epsilon = 1e-12);
        assert_relative_eq!(m[(3, 3)], 1.0, epsilon = 1e-12);
    }
}
