//! Rigid transform composition.
//!
//! Every transform here is rotation + translation only; composition is
//! standard left-to-right matrix multiplication with the rightmost factor
//! applied first to a point.

use implant_types::{
    Aabb, ImplantConfiguration, LandmarkSet, Plane3, Point3, RigidTransform, ShapeLabel, Vector3,
};
use nalgebra::Unit;

use crate::classify::LabelClassifier;
use crate::definition::{ChainAnchor, FfOffsetRule, ProductDefinition, StemShiftRule};
use crate::error::SchemeResult;
use crate::landmarks::LandmarkTable;
use crate::similar::SimilarLabelResolver;

/// Builds the rigid transforms placing components into the shared anatomical
/// frame.
#[derive(Debug, Clone, Copy)]
pub struct TransformComposer<'a> {
    def: &'a ProductDefinition,
}

impl<'a> TransformComposer<'a> {
    /// Creates a composer over `def`.
    #[must_use]
    pub fn new(def: &'a ProductDefinition) -> Self {
        Self { def }
    }

    fn classifier(&self) -> LabelClassifier<'a> {
        LabelClassifier::new(self.def)
    }

    fn landmarks(&self) -> LandmarkTable<'a> {
        LandmarkTable::new(self.def)
    }

    /// The transform seating a head component on a stem.
    ///
    /// The head's local origin maps onto the head target point shifted along
    /// the neck axis by the head label's seating length (plus any
    /// family-dependent correction), expressed in the stem's frame.
    pub fn head_to_stem(
        &self,
        head_label: ShapeLabel,
        stem_label: ShapeLabel,
    ) -> SchemeResult<RigidTransform> {
        let stem = self.classifier().require_stem(stem_label)?;
        self.classifier().require_head(head_label)?;

        let lm = self.landmarks().landmarks(stem_label)?;
        let marker = self.def.sub_ranges[stem.range_index].marker;
        let length = self.def.head_seating.length_for(head_label, marker);
        let seat = lm.head_target.coords + neck_axis(&lm) * length;

        Ok(RigidTransform::new(
            self.def.frame_spin,
            self.def.frame_spin * seat,
        ))
    }

    /// The resection plane of a stem, in the component frame.
    ///
    /// A plane through the neck origin with the product's fixed orientation;
    /// collared families are nudged along the plane normal by the product's
    /// collar offset so the plane stays aligned with the resection line.
    pub fn cut_plane(&self, stem_label: ShapeLabel) -> SchemeResult<Plane3> {
        let stem = self.classifier().require_stem(stem_label)?;
        let lm = self.landmarks().landmarks(stem_label)?;

        let carry = RigidTransform::new(
            self.def.cut_plane.orientation,
            self.def.frame_spin * lm.neck_origin.coords,
        );
        let plane = Plane3::new(Point3::origin(), Vector3::y()).transformed(&carry);

        if self.def.sub_ranges[stem.range_index].collared {
            Ok(plane.offset(self.def.cut_plane.collar_offset))
        } else {
            Ok(plane)
        }
    }

    /// The box bounding the visible trace of the resection plane.
    pub fn cut_plane_bbox(&self, stem_label: ShapeLabel) -> SchemeResult<Aabb> {
        self.classifier().require_stem(stem_label)?;

        let center = if self.def.cut_bbox.at_neck_origin {
            let lm = self.landmarks().landmarks(stem_label)?;
            Point3::from(self.def.frame_spin * lm.neck_origin.coords)
        } else {
            Point3::origin()
        };
        Ok(Aabb::from_half_extents(center, self.def.cut_bbox.half_extents))
    }

    /// The transform repositioning a planned stem onto another variant.
    ///
    /// Marker pairs with a directly authored relationship translate by their
    /// rule; pairs listed in the chain table compose the direct transforms
    /// of each hop, resolving intermediate sizes from the endpoint the chain
    /// anchors them to. The chain table is shared with the similar-size
    /// resolver - same pairs, same intermediates.
    pub fn stem_to_stem(
        &self,
        origin: &ImplantConfiguration,
        target: &ImplantConfiguration,
    ) -> SchemeResult<RigidTransform> {
        self.shift_between(origin.stem_label, target.stem_label)
    }

    /// Stem-to-stem repositioning by raw labels.
    pub fn shift_between(
        &self,
        origin: ShapeLabel,
        target: ShapeLabel,
    ) -> SchemeResult<RigidTransform> {
        let origin_stem = self.classifier().require_stem(origin)?;
        let target_stem = self.classifier().require_stem(target)?;
        let origin_marker = self.def.sub_ranges[origin_stem.range_index].marker;
        let target_marker = self.def.sub_ranges[target_stem.range_index].marker;

        if self.def.stem_shift.has_direct(origin_marker, target_marker) {
            let rule = self.def.stem_shift.direct(origin_marker, target_marker);
            return self.apply_shift(rule, origin, target);
        }

        if let Some(chain) = self.def.chain(origin_marker, target_marker) {
            let resolver = SimilarLabelResolver::new(self.def);
            let mut stops = Vec::with_capacity(chain.hops.len() + 2);
            stops.push(origin);
            for hop in &chain.hops {
                let anchor = match hop.anchor {
                    ChainAnchor::Origin => origin,
                    ChainAnchor::Target => target,
                };
                stops.push(resolver.similar_label(anchor, hop.range)?);
            }
            stops.push(target);

            let mut carried = RigidTransform::identity();
            for pair in stops.windows(2) {
                let segment = self.direct_shift(pair[0], pair[1])?;
                carried = segment.compose(&carried);
            }
            return Ok(carried);
        }

        self.apply_shift(&self.def.stem_shift.fallback, origin, target)
    }

    /// The fixed rotation into the canonical normal frame, used only for
    /// first-time, un-anchored placement.
    pub fn normal_trf(&self, stem_label: ShapeLabel) -> SchemeResult<RigidTransform> {
        let stem = self.classifier().require_stem(stem_label)?;
        let side = self.def.sub_ranges[stem.range_index].side;
        let orientation = match side {
            implant_types::AnatomSide::Left => self.def.normal_frame.orientation_left,
            _ => self.def.normal_frame.orientation_right,
        };
        let translation = if self.def.normal_frame.center_neck_origin {
            let lm = self.landmarks().landmarks(stem_label)?;
            orientation * (-lm.neck_origin.coords)
        } else {
            Vector3::zeros()
        };
        Ok(RigidTransform::new(orientation, translation))
    }

    /// The anatomical fine-adjustment vector in the canonical frame.
    ///
    /// Side-independent: `x > 0` medial, `y > 0` posterior, `z > 0`
    /// superior.
    pub fn offset_ff(&self, stem_label: ShapeLabel) -> SchemeResult<Vector3<f64>> {
        let stem = self.classifier().require_stem(stem_label)?;
        match &self.def.ff_offset {
            FfOffsetRule::Constant(v) => Ok(*v),
            FfOffsetRule::FromNeckOrigin { spin, shaft_point } => {
                let lm = self.landmarks().landmarks(stem_label)?;
                let d = spin * (lm.neck_origin - shaft_point);
                Ok(Vector3::new(d.x, 0.0, 0.0))
            }
            FfOffsetRule::PerOffset(rows) => Ok(rows
                .get(stem.offset as usize)
                .copied()
                .unwrap_or_else(Vector3::zeros)),
        }
    }

    /// The direct (non-chained) shift between two stems: the authored pair
    /// rule, or the product fallback.
    fn direct_shift(&self, origin: ShapeLabel, target: ShapeLabel) -> SchemeResult<RigidTransform> {
        let origin_stem = self.classifier().require_stem(origin)?;
        let target_stem = self.classifier().require_stem(target)?;
        let origin_marker = self.def.sub_ranges[origin_stem.range_index].marker;
        let target_marker = self.def.sub_ranges[target_stem.range_index].marker;
        let rule = self.def.stem_shift.direct(origin_marker, target_marker);
        self.apply_shift(rule, origin, target)
    }

    fn apply_shift(
        &self,
        rule: &StemShiftRule,
        origin: ShapeLabel,
        target: ShapeLabel,
    ) -> SchemeResult<RigidTransform> {
        let table = self.landmarks();
        match rule {
            StemShiftRule::AlignDistalRef => {
                let from = table.landmarks(origin)?;
                let to = table.landmarks(target)?;
                Ok(RigidTransform::from_translation(
                    from.distal_ref - to.distal_ref,
                ))
            }
            StemShiftRule::AlignNeckOrigin => {
                let from = table.landmarks(origin)?;
                let to = table.landmarks(target)?;
                Ok(RigidTransform::from_translation(
                    from.neck_origin - to.neck_origin,
                ))
            }
            StemShiftRule::AxialShift { axis, by_offset } => {
                let origin_stem = self.classifier().require_stem(origin)?;
                let magnitude = by_offset
                    .get(origin_stem.offset as usize)
                    .copied()
                    .unwrap_or(0.0);
                Ok(RigidTransform::from_translation(axis * magnitude))
            }
            StemShiftRule::Identity => Ok(RigidTransform::identity()),
        }
    }
}

/// Unit neck axis from neck origin toward the head target.
///
/// Zero-landmark rows (labels beyond the authored tables) have no neck
/// direction; they yield the zero vector rather than a NaN axis.
fn neck_axis(lm: &LandmarkSet) -> Vector3<f64> {
    Unit::try_new(lm.head_target - lm.neck_origin, 1e-9)
        .map_or_else(Vector3::zeros, Unit::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::tests_fixture::two_family_product;
    use approx::assert_relative_eq;

    #[test]
    fn test_head_to_stem_seats_along_neck_axis() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let table = LandmarkTable::new(&def);
        let std = &def.sub_ranges[0];
        let p4 = def.default_head.next(1);

        let stem = std.label_at(5);
        let lm = table.landmarks(stem).unwrap();
        let axis = (lm.head_target - lm.neck_origin).normalize();

        let t = composer.head_to_stem(p4, stem).unwrap();
        assert_relative_eq!(
            t.translation,
            lm.head_target.coords + axis * 3.5,
            epsilon = 1e-12
        );
        assert!(t.rotation.angle() < 1e-12);
    }

    #[test]
    fn test_head_to_stem_family_correction() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let table = LandmarkTable::new(&def);
        let lat = &def.sub_ranges[1];
        let p0 = def.default_head;

        let stem = lat.label_at(3);
        let lm = table.landmarks(stem).unwrap();
        let axis = (lm.head_target - lm.neck_origin).normalize();

        // P0 seats at zero plus the LAT family correction of 1.0.
        let t = composer.head_to_stem(p0, stem).unwrap();
        assert_relative_eq!(
            t.translation,
            lm.head_target.coords + axis * 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_head_to_stem_preconditions() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let stem = def.sub_ranges[0].label0;
        assert!(composer.head_to_stem(stem, stem).is_err());
        assert!(composer.head_to_stem(def.default_head, def.default_head).is_err());
    }

    #[test]
    fn test_cut_plane_through_neck_origin() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let table = LandmarkTable::new(&def);
        let stem = def.sub_ranges[0].label_at(4);
        let lm = table.landmarks(stem).unwrap();

        let plane = composer.cut_plane(stem).unwrap();
        assert_relative_eq!(plane.point.coords, lm.neck_origin.coords, epsilon = 1e-12);
        assert_relative_eq!(plane.normal.norm(), 1.0, epsilon = 1e-12);
        // rotY(-45) * rotX(90) carries +Y onto (-sin 45, 0, cos 45).
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(plane.normal.into_inner(), Vector3::new(-s, 0.0, s), epsilon = 1e-12);
    }

    #[test]
    fn test_cut_plane_collar_offset() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let table = LandmarkTable::new(&def);
        let lat_stem = def.sub_ranges[1].label_at(2);
        let lm = table.landmarks(lat_stem).unwrap();

        let plane = composer.cut_plane(lat_stem).unwrap();
        // The collared family sits 0.1 behind the neck origin.
        assert_relative_eq!(plane.signed_distance(&lm.neck_origin), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_cut_plane_bbox_centered_on_neck_origin() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let table = LandmarkTable::new(&def);
        let stem = def.sub_ranges[0].label_at(7);
        let lm = table.landmarks(stem).unwrap();

        let bbox = composer.cut_plane_bbox(stem).unwrap();
        assert_relative_eq!(bbox.center().coords, lm.neck_origin.coords, epsilon = 1e-12);
        assert_relative_eq!(bbox.size(), Vector3::new(50.0, 50.0, 50.0), epsilon = 1e-12);

        // The box must contain the plane point it is meant to trace.
        let plane = composer.cut_plane(stem).unwrap();
        assert!(bbox.contains(&plane.point));
    }

    #[test]
    fn test_stem_to_stem_aligns_neck_origins() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let table = LandmarkTable::new(&def);
        let std = &def.sub_ranges[0];

        let a = std.label_at(2);
        let b = std.label_at(6);
        let t = composer.shift_between(a, b).unwrap();
        let la = table.landmarks(a).unwrap();
        let lb = table.landmarks(b).unwrap();
        assert_relative_eq!(
            t.translation,
            la.neck_origin - lb.neck_origin,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_stem_to_stem_axial_shift_by_origin_offset() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let std = &def.sub_ranges[0];
        let lat = &def.sub_ranges[1];

        let t = composer
            .shift_between(std.label_at(5), lat.label_at(4))
            .unwrap();
        assert_relative_eq!(t.translation, Vector3::new(0.0, 0.0, 5.8), epsilon = 1e-12);
    }

    #[test]
    fn test_stem_to_stem_chain_composes_direct_hops() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let lat = &def.sub_ranges[1];
        let sn = &def.sub_ranges[2];

        let origin = sn.label_at(5);
        let target = lat.label_at(4);
        let via = resolver.similar_label(origin, std.marker).unwrap();

        let chained = composer.shift_between(origin, target).unwrap();
        let manual = composer
            .shift_between(via, target)
            .unwrap()
            .compose(&composer.shift_between(origin, via).unwrap());
        assert_relative_eq!(chained.translation, manual.translation, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_trf_is_fixed_rotation() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let t = composer.normal_trf(def.default_stem).unwrap();
        assert_relative_eq!(t.translation.norm(), 0.0, epsilon = 1e-12);
        let p = t.transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p.coords, Vector3::new(-1.0, -2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_offset_ff_constant() {
        let def = two_family_product();
        let composer = TransformComposer::new(&def);
        let v = composer.offset_ff(def.default_stem).unwrap();
        assert_relative_eq!(v, Vector3::new(12.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
