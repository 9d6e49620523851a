//! MYS OPTIMYS: standard and lateralized families, fourteen sizes each.
//!
//! The component is calibrated in a frame rotated -45° about Z relative to
//! the stem frame; the head column sits at a fixed medial distance per
//! family and climbs by the published head-top elevation per size. Both
//! families count the same sizes, so all cross-family requests resolve by
//! identity.

use implant_scheme::{
    CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating, LandmarkData, NormalFrameRule,
    ProductDefinition, ProductScheme, SideRequirement, SideStamp, StemShiftRule, StemShiftTable,
};
use implant_types::{axis_angle_deg, AnatomSide, LandmarkSet, Point3, ShapeLabel, SubRange, Vector3};

/// First label of the OPTIMYS block within the MYS company range.
const BASE: u32 = 130_000 + 500;

const fn s3(offset: u32) -> ShapeLabel {
    ShapeLabel::new(BASE + offset)
}

/// First size ("1") of the standard family.
pub const STEM_STD_1: ShapeLabel = s3(0);
/// First size of the lateralized family.
pub const STEM_LAT_1: ShapeLabel = s3(14);
/// Cutplane marker.
pub const CUTPLANE: ShapeLabel = s3(28);
/// Head, -8 mm from the reference seat.
pub const HEAD_M4: ShapeLabel = s3(29);
/// Head, -4 mm from the reference seat.
pub const HEAD_P0: ShapeLabel = s3(30);
/// Head, reference seat.
pub const HEAD_P4: ShapeLabel = s3(31);
/// Head, +4 mm from the reference seat.
pub const HEAD_P8: ShapeLabel = s3(32);
/// Sub-range marker of the standard family.
pub const RANGE_STD: ShapeLabel = s3(33);
/// Sub-range marker of the lateralized family.
pub const RANGE_LAT: ShapeLabel = s3(34);

/// Medial distance of the neck column per family.
const STD_MEDIAL_X: f64 = -12.5;
const LAT_MEDIAL_X: f64 = -8.5;

/// Head-top elevation above the component origin for size index `k`.
///
/// The catalog steps by 1.05 mm over the small sizes, 1.15 mm over the
/// middle band and 1.25 mm over the large sizes.
fn head_top(base: f64, k: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let k_f = k as f64;
    let step = match k {
        0..=5 => 1.05,
        6..=8 => 1.15,
        _ => 1.25,
    };
    base + k_f * step
}

/// Builds the OPTIMYS scheme.
#[must_use]
pub fn scheme() -> ProductScheme {
    ProductScheme::new(definition())
}

fn definition() -> ProductDefinition {
    let sub_ranges = vec![
        SubRange {
            marker: RANGE_STD,
            label0: STEM_STD_1,
            max_offset: 13,
            name: "STD",
            collared: false,
            side: AnatomSide::None,
        },
        SubRange {
            marker: RANGE_LAT,
            label0: STEM_LAT_1,
            max_offset: 13,
            name: "LAT",
            collared: false,
            side: AnatomSide::None,
        },
    ];

    // Landmarks in the calibration frame: the neck column foot is the neck
    // origin, the head target climbs the head-top column above it.
    let family_rows = |medial_x: f64, top_base: f64| -> Vec<LandmarkSet> {
        (0..14)
            .map(|k| LandmarkSet {
                neck_origin: Point3::new(medial_x, 0.0, 0.0),
                distal_ref: Point3::origin(),
                head_target: Point3::new(medial_x, head_top(top_base, k), 0.0),
            })
            .collect()
    };

    ProductDefinition {
        company_name: "MYS",
        product_name: "MYS OPTIMYS",
        revision: 1,
        label_block: (STEM_STD_1, RANGE_LAT),
        sub_ranges,
        head_block: (HEAD_M4, HEAD_P8),
        cutplane_label: CUTPLANE,
        marker_block: Some((RANGE_STD, RANGE_LAT)),
        default_stem: STEM_STD_1.next(6),
        default_stem_left: None,
        default_head: HEAD_P0,
        side_requirement: SideRequirement::Required,
        side_stamp: SideStamp::None,
        landmarks: LandmarkData {
            rows: vec![
                family_rows(STD_MEDIAL_X, 27.0),
                family_rows(LAT_MEDIAL_X, 31.0),
            ],
            shaft_angles: Vec::new(),
        },
        similar_rules: Vec::new(),
        chains: Vec::new(),
        frame_spin: axis_angle_deg(&Vector3::z_axis(), -45.0),
        head_seating: HeadSeating {
            lengths: vec![
                (HEAD_M4, -8.0),
                (HEAD_P0, -4.0),
                (HEAD_P4, 0.0),
                (HEAD_P8, 4.0),
            ],
            family_corrections: Vec::new(),
        },
        cut_plane: CutPlaneRule {
            orientation: axis_angle_deg(&Vector3::z_axis(), -45.0),
            collar_offset: 0.0,
        },
        cut_bbox: CutBboxRule {
            half_extents: Vector3::new(30.0, 25.0, 25.0),
            at_neck_origin: true,
        },
        stem_shift: StemShiftTable::uniform(StemShiftRule::Identity),
        normal_frame: NormalFrameRule::fixed(axis_angle_deg(&Vector3::x_axis(), 90.0)),
        ff_offset: FfOffsetRule::Constant(Vector3::zeros()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_configuration() {
        let scheme = scheme();
        let config = scheme.default_configuration(AnatomSide::Left);
        assert!(config.valid_assembly);
        assert_eq!(config.stem_label, STEM_STD_1.next(6));
        assert_eq!(config.stem_product_name, "MYS OPTIMYS");
    }

    #[test]
    fn test_families_correspond_by_identity() {
        let scheme = scheme();
        for offset in 0..=13 {
            assert_eq!(
                scheme
                    .similar_label(STEM_STD_1.next(offset), RANGE_LAT)
                    .unwrap(),
                STEM_LAT_1.next(offset)
            );
        }
    }

    #[test]
    fn test_head_seat_is_rotated_into_the_stem_frame() {
        let scheme = scheme();
        // Size 7 (offset 6) enters the 1.15 mm band: top = 27 + 6 * 1.15.
        let stem = STEM_STD_1.next(6);
        let t = scheme.head_to_stem(HEAD_P0, stem).unwrap();

        let spin = axis_angle_deg(&Vector3::z_axis(), -45.0);
        let seat = Vector3::new(STD_MEDIAL_X, 27.0 + 6.0 * 1.15 - 4.0, 0.0);
        assert_relative_eq!(t.translation, spin * seat, epsilon = 1e-9);
        assert_relative_eq!(t.rotation.angle(), 45.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_lateralized_column_sits_higher_and_closer() {
        let scheme = scheme();
        let table = scheme.landmark_table();
        let std = table.landmarks(STEM_STD_1).unwrap();
        let lat = table.landmarks(STEM_LAT_1).unwrap();
        assert_relative_eq!(std.neck_origin.x, -12.5, epsilon = 1e-12);
        assert_relative_eq!(lat.neck_origin.x, -8.5, epsilon = 1e-12);
        assert_relative_eq!(std.head_target.y, 27.0, epsilon = 1e-12);
        assert_relative_eq!(lat.head_target.y, 31.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cut_plane_anchor_is_the_rotated_neck_origin() {
        let scheme = scheme();
        let plane = scheme.cut_plane(STEM_STD_1.next(3)).unwrap();

        let spin = axis_angle_deg(&Vector3::z_axis(), -45.0);
        let anchor = spin * Vector3::new(STD_MEDIAL_X, 0.0, 0.0);
        assert_relative_eq!(plane.point.coords, anchor, epsilon = 1e-9);
        assert_relative_eq!(
            plane.normal.into_inner(),
            spin * Vector3::y(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_stem_to_stem_is_identity() {
        let scheme = scheme();
        let origin = scheme.default_configuration(AnatomSide::Right);
        let mut target = origin.clone();
        target.stem_label = STEM_LAT_1.next(9);
        let t = scheme.stem_to_stem(&origin, &target).unwrap();
        assert!(t.is_identity(1e-12));
    }

    #[test]
    fn test_head_top_bands() {
        assert_relative_eq!(head_top(27.0, 0), 27.0, epsilon = 1e-12);
        assert_relative_eq!(head_top(27.0, 5), 27.0 + 5.0 * 1.05, epsilon = 1e-12);
        assert_relative_eq!(head_top(27.0, 8), 27.0 + 8.0 * 1.15, epsilon = 1e-12);
        assert_relative_eq!(head_top(27.0, 13), 27.0 + 13.0 * 1.25, epsilon = 1e-12);
    }
}
