//! MDCA AMISTEM-P: standard and lateralized families, with and without a
//! standard neck.
//!
//! The calibration sheets only relate STD to STD SN by neck origin and STD
//! to LAT (per group) by a Z-shift column; the remaining family jumps are
//! deduced by chaining through those known transforms. The size tables are
//! offset by one between STD and LAT, and the STD extremes (00 and 9) have
//! no lateralized counterpart at all - resolving them reports "no similar
//! size" by returning the source label.

use implant_scheme::{
    ChainAnchor, ChainHop, ChainRule, CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating,
    LandmarkData, NormalFrameRule, OffsetRule, ProductDefinition, ProductScheme, SideRequirement,
    SideStamp, SimilarRule, StemShiftRule, StemShiftTable,
};
use implant_types::{axis_angle_deg, AnatomSide, ShapeLabel, SubRange, Vector3};
use nalgebra::UnitQuaternion;

use crate::support::landmark_rows;

/// First label of the AMISTEM block within the MDCA company range.
const BASE: u32 = 100_000 + 750 + 50;

const fn s3(offset: u32) -> ShapeLabel {
    ShapeLabel::new(BASE + offset)
}

/// First size ("STD 00") of the standard family.
pub const STEM_STD_0: ShapeLabel = s3(0);
/// First size of the lateralized family.
pub const STEM_LAT_0: ShapeLabel = s3(11);
/// First size of the standard-neck standard family.
pub const STEM_STD_SN_0: ShapeLabel = s3(20);
/// First size of the standard-neck lateralized family.
pub const STEM_LAT_SN_0: ShapeLabel = s3(31);
/// Cutplane marker.
pub const CUTPLANE: ShapeLabel = s3(40);
/// Head, two steps below the reference cone.
pub const HEAD_M4: ShapeLabel = s3(41);
/// Head, one step below the reference cone.
pub const HEAD_P0: ShapeLabel = s3(42);
/// Head, reference cone.
pub const HEAD_P4: ShapeLabel = s3(43);
/// Head, one step above the reference cone.
pub const HEAD_P8: ShapeLabel = s3(44);
/// Head, two steps above the reference cone.
pub const HEAD_P12: ShapeLabel = s3(45);
/// Sub-range marker of the standard family.
pub const RANGE_STD: ShapeLabel = s3(46);
/// Sub-range marker of the lateralized family.
pub const RANGE_LAT: ShapeLabel = s3(47);
/// Sub-range marker of the standard-neck standard family.
pub const RANGE_STD_SN: ShapeLabel = s3(48);
/// Sub-range marker of the standard-neck lateralized family.
pub const RANGE_LAT_SN: ShapeLabel = s3(49);

/// Neck cone step along the neck axis; computed from the neck points of the
/// calibration sheet.
const CONE_STEP: f64 = 3.535_5;

// Calibration columns; the sheet publishes the YZ plane only.

const STD_RES01: [[f64; 3]; 11] = [
    [0.0, 14.52, 14.52],
    [0.0, 14.78, 14.78],
    [0.0, 15.49, 15.49],
    [0.0, 16.19, 16.19],
    [0.0, 16.90, 16.90],
    [0.0, 17.54, 17.54],
    [0.0, 18.17, 18.17],
    [0.0, 18.80, 18.80],
    [0.0, 19.37, 19.37],
    [0.0, 20.07, 20.07],
    [0.0, 20.78, 20.78],
];

const STD_TPR01: [[f64; 3]; 11] = [
    [0.0, 41.50, 41.50],
    [0.0, 41.95, 41.95],
    [0.0, 43.19, 43.19],
    [0.0, 44.44, 44.44],
    [0.0, 45.70, 45.70],
    [0.0, 46.84, 46.84],
    [0.0, 48.00, 48.00],
    [0.0, 49.18, 49.18],
    [0.0, 50.25, 50.25],
    [0.0, 51.48, 51.48],
    [0.0, 52.87, 52.87],
];

const LAT_RES01: [[f64; 3]; 9] = [
    [0.0, 13.99, 10.54],
    [0.0, 14.70, 11.08],
    [0.0, 15.40, 11.61],
    [0.0, 16.35, 12.32],
    [0.0, 16.76, 12.63],
    [0.0, 17.38, 13.1],
    [0.0, 17.88, 13.55],
    [0.0, 18.59, 14.01],
    [0.0, 19.2, 14.47],
];

const LAT_TPR01: [[f64; 3]; 9] = [
    [0.0, 43.73, 32.96],
    [0.0, 45.13, 34.01],
    [0.0, 46.54, 35.07],
    [0.0, 47.94, 36.13],
    [0.0, 49.3, 37.15],
    [0.0, 50.61, 38.14],
    [0.0, 51.91, 39.12],
    [0.0, 53.26, 40.13],
    [0.0, 54.41, 41.00],
];

const STD_SN_RES01: [[f64; 3]; 11] = [
    [0.0, 14.51, 14.51],
    [0.0, 14.77, 14.77],
    [0.0, 15.48, 15.48],
    [0.0, 16.19, 16.19],
    [0.0, 16.9, 16.9],
    [0.0, 17.53, 17.53],
    [0.0, 18.17, 18.17],
    [0.0, 18.8, 18.8],
    [0.0, 19.36, 19.36],
    [0.0, 20.07, 20.07],
    [0.0, 20.78, 20.78],
];

const STD_SN_TPR01: [[f64; 3]; 11] = [
    [0.0, 37.96, 37.96],
    [0.0, 38.42, 38.42],
    [0.0, 39.65, 39.65],
    [0.0, 40.91, 40.91],
    [0.0, 42.16, 42.16],
    [0.0, 43.30, 43.30],
    [0.0, 44.46, 44.46],
    [0.0, 45.64, 45.64],
    [0.0, 46.72, 46.72],
    [0.0, 47.94, 47.94],
    [0.0, 49.33, 49.33],
];

const LAT_SN_RES01: [[f64; 3]; 9] = [
    [0.0, 13.99, 10.54],
    [0.0, 14.7, 11.08],
    [0.0, 15.4, 11.61],
    [0.0, 16.35, 12.32],
    [0.0, 16.76, 12.63],
    [0.0, 17.38, 13.1],
    [0.0, 17.98, 13.55],
    [0.0, 18.59, 14.01],
    [0.0, 19.2, 14.47],
];

const LAT_SN_TPR01: [[f64; 3]; 9] = [
    [0.0, 43.73, 32.96],
    [0.0, 45.13, 34.01],
    [0.0, 45.64, 35.07],
    [0.0, 47.94, 36.13],
    [0.0, 49.3, 37.15],
    [0.0, 50.61, 38.14],
    [0.0, 51.91, 39.12],
    [0.0, 53.26, 40.13],
    [0.0, 54.41, 41.00],
];

// Z-shift columns between the standard and lateralized variants, indexed by
// the origin stem's offset.

const STD_TO_LAT_Z: [f64; 11] = [
    0.0, 5.89, 6.03, 6.22, 6.39, 6.55, 6.71, 6.85, 7.0, 7.26, 0.0,
];
const LAT_TO_STD_Z: [f64; 9] = [5.89, 6.03, 6.22, 6.39, 6.55, 6.71, 6.85, 7.0, 7.26];
const STD_SN_TO_LAT_SN_Z: [f64; 11] = [
    0.0, 5.01, 5.19, 5.38, 5.58, 5.69, 5.87, 6.07, 6.13, 6.48, 0.0,
];
const LAT_SN_TO_STD_SN_Z: [f64; 9] = [5.01, 5.19, 5.38, 5.58, 5.69, 5.87, 6.07, 6.13, 6.48];

/// Builds the AMISTEM-P scheme.
#[must_use]
pub fn scheme() -> ProductScheme {
    ProductScheme::new(definition())
}

fn definition() -> ProductDefinition {
    let sub_ranges = vec![
        SubRange {
            marker: RANGE_STD,
            label0: STEM_STD_0,
            max_offset: 10,
            name: "STD(135°)",
            collared: false,
            side: AnatomSide::None,
        },
        SubRange {
            marker: RANGE_LAT,
            label0: STEM_LAT_0,
            max_offset: 8,
            name: "LAT(127°)",
            collared: false,
            side: AnatomSide::None,
        },
        SubRange {
            marker: RANGE_STD_SN,
            label0: STEM_STD_SN_0,
            max_offset: 10,
            name: "SN STD(135°)",
            collared: false,
            side: AnatomSide::None,
        },
        SubRange {
            marker: RANGE_LAT_SN,
            label0: STEM_LAT_SN_0,
            max_offset: 8,
            name: "SN LAT(127°)",
            collared: false,
            side: AnatomSide::None,
        },
    ];

    // The sheet gives no distal reference points; stems reposition via the
    // neck origin and the Z-shift columns instead.
    let zero3 = [0.0, 0.0, 0.0];
    let zeros = |n: usize| vec![zero3; n];

    let rows = vec![
        landmark_rows(&STD_RES01, &zeros(11), &STD_TPR01),
        landmark_rows(&LAT_RES01, &zeros(9), &LAT_TPR01),
        landmark_rows(&STD_SN_RES01, &zeros(11), &STD_SN_TPR01),
        landmark_rows(&LAT_SN_RES01, &zeros(9), &LAT_SN_TPR01),
    ];

    ProductDefinition {
        company_name: "MDCA",
        product_name: "AMISTEM-P",
        revision: 1,
        label_block: (STEM_STD_0, RANGE_LAT_SN),
        sub_ranges,
        head_block: (HEAD_M4, HEAD_P12),
        cutplane_label: CUTPLANE,
        marker_block: Some((RANGE_STD, RANGE_LAT_SN)),
        default_stem: STEM_STD_0.next(5),
        default_stem_left: None,
        default_head: HEAD_P0,
        side_requirement: SideRequirement::Required,
        side_stamp: SideStamp::None,
        landmarks: LandmarkData {
            rows,
            shaft_angles: vec![45.0, 45.0, 45.0, 45.0],
        },
        similar_rules: similar_rules(),
        chains: chains(),
        frame_spin: UnitQuaternion::identity(),
        head_seating: HeadSeating {
            lengths: vec![
                (HEAD_M4, -2.0 * CONE_STEP),
                (HEAD_P0, -CONE_STEP),
                (HEAD_P4, 0.0),
                (HEAD_P8, CONE_STEP),
                (HEAD_P12, 2.0 * CONE_STEP),
            ],
            // The sheet's lateralized coordinates are off by a cone step
            // plus 0.9 mm; the collarless LAT family alone needs it.
            family_corrections: vec![(RANGE_LAT, 0.9 + CONE_STEP)],
        },
        cut_plane: CutPlaneRule {
            orientation: axis_angle_deg(&Vector3::x_axis(), 45.0),
            collar_offset: 0.0,
        },
        cut_bbox: CutBboxRule {
            half_extents: Vector3::new(40.0, 80.0, 40.0),
            at_neck_origin: true,
        },
        stem_shift: stem_shift(),
        normal_frame: NormalFrameRule::fixed(axis_angle_deg(&Vector3::z_axis(), -90.0)),
        ff_offset: FfOffsetRule::Constant(Vector3::new(12.0, 0.0, 0.0)),
    }
}

fn similar_rules() -> Vec<SimilarRule> {
    let mut rules = Vec::new();

    for source in [RANGE_STD, RANGE_STD_SN] {
        for target in [RANGE_STD, RANGE_STD_SN] {
            if source == target {
                continue;
            }
            rules.push(SimilarRule {
                source,
                target,
                rule: OffsetRule::Identity,
                barred: Vec::new(),
            });
        }
        for target in [RANGE_LAT, RANGE_LAT_SN] {
            // STD 00 and STD 9 have no lateralized counterpart.
            rules.push(SimilarRule {
                source,
                target,
                rule: OffsetRule::Shift(-1),
                barred: vec![0, 10],
            });
        }
    }

    for source in [RANGE_LAT, RANGE_LAT_SN] {
        for target in [RANGE_STD, RANGE_STD_SN] {
            rules.push(SimilarRule::shift(source, target, 1));
        }
    }

    rules
}

/// The family jumps the sheet does not publish directly, deduced through
/// the known STD <-> STD SN and STD <-> LAT transforms. The deduction
/// resolves intermediates from different endpoints per direction; that
/// anchoring is part of the shipped behavior.
fn chains() -> Vec<ChainRule> {
    let hop = |range, anchor| ChainHop { range, anchor };
    vec![
        ChainRule {
            source: RANGE_STD,
            target: RANGE_LAT_SN,
            hops: vec![hop(RANGE_STD_SN, ChainAnchor::Origin)],
        },
        ChainRule {
            source: RANGE_LAT_SN,
            target: RANGE_STD,
            hops: vec![hop(RANGE_STD_SN, ChainAnchor::Target)],
        },
        ChainRule {
            source: RANGE_LAT_SN,
            target: RANGE_LAT,
            hops: vec![
                hop(RANGE_STD_SN, ChainAnchor::Origin),
                hop(RANGE_STD, ChainAnchor::Target),
            ],
        },
        ChainRule {
            source: RANGE_STD_SN,
            target: RANGE_LAT,
            hops: vec![hop(RANGE_STD, ChainAnchor::Origin)],
        },
        ChainRule {
            source: RANGE_LAT,
            target: RANGE_STD_SN,
            hops: vec![hop(RANGE_STD, ChainAnchor::Origin)],
        },
        ChainRule {
            source: RANGE_LAT,
            target: RANGE_LAT_SN,
            hops: vec![
                hop(RANGE_STD, ChainAnchor::Origin),
                hop(RANGE_STD_SN, ChainAnchor::Target),
            ],
        },
    ]
}

fn stem_shift() -> StemShiftTable {
    let axial = |values: &[f64], up: bool| StemShiftRule::AxialShift {
        axis: if up { Vector3::z() } else { -Vector3::z() },
        by_offset: values.to_vec(),
    };

    StemShiftTable {
        pairs: vec![
            // Jumps within the STD group match the neck origin.
            (RANGE_STD, RANGE_STD, StemShiftRule::AlignNeckOrigin),
            (RANGE_STD, RANGE_STD_SN, StemShiftRule::AlignNeckOrigin),
            (RANGE_STD_SN, RANGE_STD, StemShiftRule::AlignNeckOrigin),
            (RANGE_STD_SN, RANGE_STD_SN, StemShiftRule::AlignNeckOrigin),
            (RANGE_LAT, RANGE_LAT, StemShiftRule::AlignNeckOrigin),
            (RANGE_LAT_SN, RANGE_LAT_SN, StemShiftRule::AlignNeckOrigin),
            // STD <-> LAT per group: Z-shift columns.
            (RANGE_STD, RANGE_LAT, axial(&STD_TO_LAT_Z, true)),
            (RANGE_LAT, RANGE_STD, axial(&LAT_TO_STD_Z, false)),
            (RANGE_STD_SN, RANGE_LAT_SN, axial(&STD_SN_TO_LAT_SN_Z, true)),
            (RANGE_LAT_SN, RANGE_STD_SN, axial(&LAT_SN_TO_STD_SN_Z, false)),
        ],
        fallback: StemShiftRule::Identity,
    }
}
