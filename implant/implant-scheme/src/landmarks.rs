//! Calibration landmark lookup.

use implant_types::{LandmarkSet, ShapeLabel};

use crate::classify::LabelClassifier;
use crate::definition::ProductDefinition;
use crate::error::SchemeResult;

/// Fallback neck-shaft angle when a product publishes no table.
const DEFAULT_SHAFT_ANGLE_DEG: f64 = 45.0;

/// Pure (sub-range, offset) lookup into the calibration tables.
#[derive(Debug, Clone, Copy)]
pub struct LandmarkTable<'a> {
    def: &'a ProductDefinition,
}

impl<'a> LandmarkTable<'a> {
    /// Creates a lookup over `def`.
    #[must_use]
    pub fn new(def: &'a ProductDefinition) -> Self {
        Self { def }
    }

    /// The landmark set of a stem label.
    ///
    /// Labels inside a declared family but beyond the authored calibration
    /// rows yield [`LandmarkSet::zero`]; that fallback is part of the
    /// published contract, not a failure.
    pub fn landmarks(&self, label: ShapeLabel) -> SchemeResult<LandmarkSet> {
        let stem = LabelClassifier::new(self.def).require_stem(label)?;
        Ok(self
            .def
            .landmarks
            .rows
            .get(stem.range_index)
            .and_then(|rows| rows.get(stem.offset as usize))
            .copied()
            .unwrap_or_else(LandmarkSet::zero))
    }

    /// The neck-shaft angle of a stem label's family, degrees.
    pub fn shaft_angle(&self, label: ShapeLabel) -> SchemeResult<f64> {
        let stem = LabelClassifier::new(self.def).require_stem(label)?;
        Ok(self
            .def
            .landmarks
            .shaft_angles
            .get(stem.range_index)
            .copied()
            .unwrap_or(DEFAULT_SHAFT_ANGLE_DEG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::tests_fixture::two_family_product;
    use approx::assert_relative_eq;

    #[test]
    fn test_lookup_is_per_offset() {
        let def = two_family_product();
        let table = LandmarkTable::new(&def);
        let std = &def.sub_ranges[0];

        let first = table.landmarks(std.label_at(0)).unwrap();
        let third = table.landmarks(std.label_at(2)).unwrap();
        assert_relative_eq!(first.neck_origin.x, -11.0, epsilon = 1e-12);
        assert_relative_eq!(third.neck_origin.x, -13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_stem_is_precondition_violation() {
        let def = two_family_product();
        let table = LandmarkTable::new(&def);
        assert!(table.landmarks(def.default_head).is_err());
        assert!(table.landmarks(def.cutplane_label).is_err());
    }

    #[test]
    fn test_shaft_angle_per_family() {
        let def = two_family_product();
        let table = LandmarkTable::new(&def);
        assert_relative_eq!(
            table.shaft_angle(def.sub_ranges[0].label0).unwrap(),
            45.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            table.shaft_angle(def.sub_ranges[1].label0).unwrap(),
            55.0,
            epsilon = 1e-12
        );
    }
}
