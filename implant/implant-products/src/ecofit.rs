//! ICAST ECOFIT STEMLESS: five families across three neck-shaft angles.
//!
//! The 133° families ship twelve sizes; the 138° and coxa-vara families
//! ship ten, skipping the 17.5 and 18.75 shaft diameters. Crossing between
//! the groups therefore remaps the two largest shared sizes instead of
//! shifting uniformly. Landmarks are constant per family: the neck origin
//! is the component origin and only the distal reference and head target
//! differ between families.

use implant_scheme::{
    CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating, LandmarkData, NormalFrameRule,
    OffsetRule, ProductDefinition, ProductScheme, SideRequirement, SideStamp, SimilarRule,
    StemShiftRule, StemShiftTable,
};
use implant_types::{axis_angle_deg, AnatomSide, ShapeLabel, SubRange, Vector3};
use nalgebra::UnitQuaternion;

use crate::support::constant_landmark_rows;

/// First label of the ECOFIT block within the ICAST company range.
const BASE: u32 = 310_000 + 750 + 90;

const fn s3(offset: u32) -> ShapeLabel {
    ShapeLabel::new(BASE + offset)
}

/// First size of the 133° standard family.
pub const STEM_STD_133_0: ShapeLabel = s3(0);
/// First size of the 133° lateralized family.
pub const STEM_LAT_133_0: ShapeLabel = s3(12);
/// First size of the 138° standard family.
pub const STEM_STD_138_0: ShapeLabel = s3(24);
/// First size of the 138° lateralized family.
pub const STEM_LAT_138_0: ShapeLabel = s3(34);
/// First size of the coxa-vara family.
pub const STEM_CV_0: ShapeLabel = s3(44);
/// Cutplane marker.
pub const CUTPLANE: ShapeLabel = s3(54);
/// Head, -3.53 mm seat.
pub const HEAD_M4: ShapeLabel = s3(55);
/// Head, reference seat.
pub const HEAD_P0: ShapeLabel = s3(56);
/// Head, +3.53 mm seat.
pub const HEAD_P4: ShapeLabel = s3(57);
/// Head, +7.1 mm seat.
pub const HEAD_P8: ShapeLabel = s3(58);
/// Sub-range marker of the 133° standard family.
pub const RANGE_STD_133: ShapeLabel = s3(59);
/// Sub-range marker of the 133° lateralized family.
pub const RANGE_LAT_133: ShapeLabel = s3(60);
/// Sub-range marker of the 138° standard family.
pub const RANGE_STD_138: ShapeLabel = s3(61);
/// Sub-range marker of the 138° lateralized family.
pub const RANGE_LAT_138: ShapeLabel = s3(62);
/// Sub-range marker of the coxa-vara family.
pub const RANGE_CV: ShapeLabel = s3(63);

const MARKERS_133: [ShapeLabel; 2] = [RANGE_STD_133, RANGE_LAT_133];
const MARKERS_OTHER: [ShapeLabel; 3] = [RANGE_STD_138, RANGE_LAT_138, RANGE_CV];

/// Builds the ECOFIT scheme.
#[must_use]
pub fn scheme() -> ProductScheme {
    ProductScheme::new(definition())
}

fn definition() -> ProductDefinition {
    let family = |marker, label0, max_offset, name| SubRange {
        marker,
        label0,
        max_offset,
        name,
        collared: false,
        side: AnatomSide::None,
    };

    let sub_ranges = vec![
        family(RANGE_STD_133, STEM_STD_133_0, 11, "133 STD"),
        family(RANGE_LAT_133, STEM_LAT_133_0, 11, "133 LAT"),
        family(RANGE_STD_138, STEM_STD_138_0, 9, "138 STD"),
        family(RANGE_LAT_138, STEM_LAT_138_0, 9, "138 LAT"),
        family(RANGE_CV, STEM_CV_0, 9, "123 STD"),
    ];

    let origin = [0.0, 0.0, 0.0];
    let rows = vec![
        constant_landmark_rows(12, origin, [10.69, -9.21, 0.0], [25.09, 23.39, 0.0]),
        constant_landmark_rows(12, origin, [6.55, -5.9, 0.0], [29.25, 27.28, 0.0]),
        constant_landmark_rows(10, origin, [10.5, -9.45, 0.0], [23.02, 25.56, 0.0]),
        constant_landmark_rows(10, origin, [6.54, -5.89, 0.0], [26.77, 29.74, 0.0]),
        constant_landmark_rows(10, origin, [10.27, -9.93, 0.0], [27.12, 17.61, 0.0]),
    ];

    ProductDefinition {
        company_name: "ICAST",
        product_name: "ECOFIT STEMLESS",
        revision: 1,
        label_block: (STEM_STD_133_0, RANGE_CV),
        sub_ranges,
        head_block: (HEAD_M4, HEAD_P8),
        cutplane_label: CUTPLANE,
        marker_block: Some((RANGE_STD_133, RANGE_CV)),
        default_stem: STEM_STD_133_0.next(5),
        default_stem_left: None,
        default_head: HEAD_P0,
        side_requirement: SideRequirement::Required,
        side_stamp: SideStamp::None,
        landmarks: LandmarkData {
            rows,
            shaft_angles: vec![45.0, 45.0, 45.0, 45.0, 45.0],
        },
        similar_rules: similar_rules(),
        chains: Vec::new(),
        frame_spin: UnitQuaternion::identity(),
        head_seating: HeadSeating {
            lengths: vec![
                (HEAD_M4, -3.53),
                (HEAD_P0, 0.0),
                (HEAD_P4, 3.53),
                (HEAD_P8, 7.1),
            ],
            family_corrections: Vec::new(),
        },
        cut_plane: CutPlaneRule {
            orientation: axis_angle_deg(&Vector3::z_axis(), -42.0),
            collar_offset: 0.0,
        },
        cut_bbox: CutBboxRule {
            half_extents: Vector3::new(25.0, 25.0, 25.0),
            at_neck_origin: true,
        },
        stem_shift: StemShiftTable::uniform(StemShiftRule::AlignDistalRef),
        normal_frame: NormalFrameRule::fixed(axis_angle_deg(&Vector3::x_axis(), 90.0)),
        ff_offset: FfOffsetRule::Constant(Vector3::new(15.0, 0.0, 10.0)),
    }
}

/// Crossing between the 12-size 133° group and the 10-size families remaps
/// the top shared sizes; everything else matches by position.
fn similar_rules() -> Vec<SimilarRule> {
    let mut rules = Vec::new();

    for source in MARKERS_OTHER {
        for target in MARKERS_133 {
            rules.push(SimilarRule {
                source,
                target,
                rule: OffsetRule::Remap(vec![(8, 9), (9, 11)]),
                barred: Vec::new(),
            });
        }
    }
    for source in MARKERS_133 {
        for target in MARKERS_OTHER {
            rules.push(SimilarRule {
                source,
                target,
                rule: OffsetRule::Remap(vec![(9, 8), (11, 9)]),
                barred: Vec::new(),
            });
        }
    }

    rules
}
