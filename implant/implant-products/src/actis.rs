//! JNJ ACTIS: standard and high-offset families, thirteen sizes each.
//!
//! The two families correspond size for size, so the resolver table is
//! empty and every cross-family request resolves by identity. Unlike the
//! straight-stem products, a validated ACTIS assembly carries the requested
//! side.

use implant_scheme::{
    CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating, LandmarkData, NormalFrameRule,
    ProductDefinition, ProductScheme, SideRequirement, SideStamp, StemShiftRule, StemShiftTable,
};
use implant_types::{axis_angle_deg, AnatomSide, ShapeLabel, SubRange, Vector3};
use nalgebra::UnitQuaternion;

use crate::support::landmark_rows;

/// First label of the ACTIS block within the JNJ company range.
const BASE: u32 = 160_000 + 1_250 + 90;

const fn s3(offset: u32) -> ShapeLabel {
    ShapeLabel::new(BASE + offset)
}

/// First size of the standard family.
pub const STEM_STD_0: ShapeLabel = s3(0);
/// First size of the high-offset family.
pub const STEM_HO_0: ShapeLabel = s3(13);
/// Cutplane marker.
pub const CUTPLANE: ShapeLabel = s3(26);
/// Head, -3.5 mm seat.
pub const HEAD_M4: ShapeLabel = s3(27);
/// Head, reference seat.
pub const HEAD_P0: ShapeLabel = s3(28);
/// Head, +3.5 mm seat.
pub const HEAD_P4: ShapeLabel = s3(29);
/// Head, +7.0 mm seat.
pub const HEAD_P8: ShapeLabel = s3(30);
/// Sub-range marker of the standard family.
pub const RANGE_STD: ShapeLabel = s3(31);
/// Sub-range marker of the high-offset family.
pub const RANGE_HO: ShapeLabel = s3(32);

const STD_RES01: [[f64; 3]; 13] = [
    [11.94, 0.0, 10.02],
    [12.47, 0.0, 10.46],
    [13.27, 0.0, 11.14],
    [13.05, 0.0, 10.95],
    [13.56, 0.0, 11.38],
    [13.58, 0.0, 11.4],
    [14.12, 0.0, 11.85],
    [14.14, 0.0, 11.87],
    [14.68, 0.0, 12.32],
    [14.7, 0.0, 12.34],
    [15.29, 0.0, 12.83],
    [15.64, 0.0, 13.12],
    [16.04, 0.0, 13.46],
];

const STD_RES02: [[f64; 3]; 13] = [
    [20.01, 0.0, 3.17],
    [21.01, 0.0, 3.3],
    [21.81, 0.0, 3.98],
    [22.51, 0.0, 3.01],
    [23.3, 0.0, 3.21],
    [24.1, 0.0, 2.57],
    [24.81, 0.0, 2.89],
    [25.61, 0.0, 2.25],
    [26.31, 0.0, 2.57],
    [27.11, 0.0, 1.93],
    [27.91, 0.0, 2.24],
    [28.61, 0.0, 2.24],
    [29.41, 0.0, 2.24],
];

const STD_TPR01: [[f64; 3]; 13] = [
    [36.29, 0.0, 30.45],
    [36.44, 0.0, 30.58],
    [38.44, 0.0, 32.26],
    [38.24, 0.0, 32.09],
    [39.85, 0.0, 33.44],
    [39.66, 0.0, 33.28],
    [41.66, 0.0, 34.96],
    [41.66, 0.0, 34.96],
    [43.66, 0.0, 36.64],
    [43.66, 0.0, 36.64],
    [45.66, 0.0, 38.32],
    [45.66, 0.0, 38.32],
    [45.66, 0.0, 38.32],
];

const HO_RES01: [[f64; 3]; 13] = [
    [15.1, 0.0, 12.67],
    [15.47, 0.0, 12.98],
    [16.27, 0.0, 13.65],
    [16.05, 0.0, 13.46],
    [17.57, 0.0, 14.74],
    [17.58, 0.0, 14.76],
    [18.12, 0.0, 15.21],
    [18.14, 0.0, 15.22],
    [18.68, 0.0, 15.68],
    [18.7, 0.0, 15.69],
    [19.29, 0.0, 16.19],
    [19.64, 0.0, 16.48],
    [20.04, 0.0, 16.82],
];

const HO_RES02: [[f64; 3]; 13] = [
    [20.21, 0.0, 8.39],
    [21.01, 0.0, 8.33],
    [21.81, 0.0, 9.01],
    [22.51, 0.0, 8.04],
    [23.31, 0.0, 9.92],
    [24.11, 0.0, 9.28],
    [24.82, 0.0, 9.59],
    [25.61, 0.0, 8.96],
    [26.31, 0.0, 9.28],
    [27.11, 0.0, 8.64],
    [27.91, 0.0, 8.96],
    [28.61, 0.0, 8.96],
    [29.41, 0.0, 8.96],
];

const HO_TPR01: [[f64; 3]; 13] = [
    [42.44, 0.0, 35.61],
    [42.44, 0.0, 35.61],
    [44.44, 0.0, 37.29],
    [44.24, 0.0, 37.12],
    [47.85, 0.0, 40.15],
    [47.66, 0.0, 39.99],
    [49.66, 0.0, 41.67],
    [49.66, 0.0, 41.67],
    [51.66, 0.0, 43.35],
    [51.66, 0.0, 43.35],
    [53.66, 0.0, 45.03],
    [53.66, 0.0, 45.03],
    [53.66, 0.0, 45.03],
];

/// Builds the ACTIS scheme.
#[must_use]
pub fn scheme() -> ProductScheme {
    ProductScheme::new(definition())
}

fn definition() -> ProductDefinition {
    let sub_ranges = vec![
        SubRange {
            marker: RANGE_STD,
            label0: STEM_STD_0,
            max_offset: 12,
            name: "STD",
            collared: false,
            side: AnatomSide::None,
        },
        SubRange {
            marker: RANGE_HO,
            label0: STEM_HO_0,
            max_offset: 12,
            name: "HIGH OFFSET",
            collared: false,
            side: AnatomSide::None,
        },
    ];

    ProductDefinition {
        company_name: "JNJ",
        product_name: "ACTIS",
        revision: 1,
        label_block: (STEM_STD_0, RANGE_HO),
        sub_ranges,
        head_block: (HEAD_M4, HEAD_P8),
        cutplane_label: CUTPLANE,
        marker_block: Some((RANGE_STD, RANGE_HO)),
        default_stem: STEM_STD_0.next(6),
        default_stem_left: None,
        default_head: HEAD_P0,
        side_requirement: SideRequirement::Required,
        side_stamp: SideStamp::Requested,
        landmarks: LandmarkData {
            rows: vec![
                landmark_rows(&STD_RES01, &STD_RES02, &STD_TPR01),
                landmark_rows(&HO_RES01, &HO_RES02, &HO_TPR01),
            ],
            shaft_angles: Vec::new(),
        },
        similar_rules: Vec::new(),
        chains: Vec::new(),
        frame_spin: UnitQuaternion::identity(),
        head_seating: HeadSeating {
            lengths: vec![
                (HEAD_M4, -3.5),
                (HEAD_P0, 0.0),
                (HEAD_P4, 3.5),
                (HEAD_P8, 7.0),
            ],
            family_corrections: Vec::new(),
        },
        cut_plane: CutPlaneRule {
            orientation: axis_angle_deg(&Vector3::y_axis(), 40.0)
                * axis_angle_deg(&Vector3::x_axis(), 90.0),
            collar_offset: 0.0,
        },
        cut_bbox: CutBboxRule {
            half_extents: Vector3::new(50.0, 25.0, 25.0),
            at_neck_origin: true,
        },
        stem_shift: StemShiftTable::uniform(StemShiftRule::AlignDistalRef),
        // The component frame already matches the normal frame.
        normal_frame: NormalFrameRule::fixed(UnitQuaternion::identity()),
        ff_offset: FfOffsetRule::Constant(Vector3::new(15.0, 0.0, 5.0)),
    }
}
