//! Calibrated landmark points per stem size.

use nalgebra::Point3;

/// The calibrated landmark points of one stem size, in the component's local
/// frame (millimeters).
///
/// These are fixed calibration constants supplied by the manufacturer's data
/// sheets, looked up by label only; nothing in the engine derives them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    /// Neck origin (calibration id `RES_01`): the rotation/placement anchor.
    pub neck_origin: Point3<f64>,
    /// Distal reference point (`RES_02`): used for family-to-family
    /// alignment when swapping stem variants.
    pub distal_ref: Point3<f64>,
    /// Head target point (`TPR_01`): where the modular head attaches.
    pub head_target: Point3<f64>,
}

impl LandmarkSet {
    /// Builds a landmark set from raw `[x, y, z]` calibration rows.
    #[must_use]
    pub fn from_rows(neck_origin: [f64; 3], distal_ref: [f64; 3], head_target: [f64; 3]) -> Self {
        Self {
            neck_origin: Point3::new(neck_origin[0], neck_origin[1], neck_origin[2]),
            distal_ref: Point3::new(distal_ref[0], distal_ref[1], distal_ref[2]),
            head_target: Point3::new(head_target[0], head_target[1], head_target[2]),
        }
    }

    /// The all-zero landmark set.
    ///
    /// Returned for labels inside a declared family but outside the authored
    /// calibration rows; documented fallback, not an error.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            neck_origin: Point3::origin(),
            distal_ref: Point3::origin(),
            head_target: Point3::origin(),
        }
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let set = LandmarkSet::from_rows([-11.07, 0.0, 11.07], [-19.5, 0.0, 2.64], [-38.29, 0.0, 38.29]);
        assert_eq!(set.neck_origin, Point3::new(-11.07, 0.0, 11.07));
        assert_eq!(set.distal_ref, Point3::new(-19.5, 0.0, 2.64));
        assert_eq!(set.head_target, Point3::new(-38.29, 0.0, 38.29));
    }

    #[test]
    fn test_zero_default() {
        assert_eq!(LandmarkSet::default(), LandmarkSet::zero());
        assert_eq!(LandmarkSet::zero().neck_origin, Point3::origin());
    }
}
