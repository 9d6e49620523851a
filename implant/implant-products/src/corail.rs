//! JNJ CORAIL: nine stem families across three neck-shaft styles.
//!
//! The largest catalog of the registry: standard 135°, high-offset 135°,
//! lateralized 125°, short 125° and short-neck 135° families, each in
//! collarless and collared variants where the vendor ships both. Collared
//! variants mirror their collarless twins size for size but remain distinct
//! families throughout.

use implant_scheme::{
    CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating, LandmarkData, NormalFrameRule,
    ProductDefinition, ProductScheme, SideRequirement, SideStamp, SimilarRule, StemShiftRule,
    StemShiftTable,
};
use implant_types::{axis_angle_deg, AnatomSide, Point3, ShapeLabel, SubRange, Vector3};
use nalgebra::UnitQuaternion;

use crate::support::landmark_rows;

/// First label of the CORAIL block within the JNJ company range.
const BASE: u32 = 160_000 + 90;

const fn s3(offset: u32) -> ShapeLabel {
    ShapeLabel::new(BASE + offset)
}

/// First size of the collared high-offset 135° family.
pub const STEM_KHO_A_135_0: ShapeLabel = s3(0);
/// First size of the standard 135° family.
pub const STEM_KS_STD135_0: ShapeLabel = s3(10);
/// First size of the collared standard 135° family.
pub const STEM_KA_STD135_0: ShapeLabel = s3(21);
/// First size of the high-offset 135° family.
pub const STEM_KHO_S_135_0: ShapeLabel = s3(32);
/// First size of the lateralized 125° family.
pub const STEM_KLA_125_0: ShapeLabel = s3(42);
/// First size of the short 125° family.
pub const STEM_STD125_S_0: ShapeLabel = s3(52);
/// First size of the collared short 125° family.
pub const STEM_STD125_A_0: ShapeLabel = s3(56);
/// First size of the short-neck 135° family.
pub const STEM_SN_S_0: ShapeLabel = s3(64);
/// First size of the collared short-neck 135° family.
pub const STEM_SN_A_0: ShapeLabel = s3(68);

/// Cutplane marker.
pub const CUTPLANE: ShapeLabel = s3(76);
/// Head, -3.5 mm seat.
pub const HEAD_M4: ShapeLabel = s3(77);
/// Head, reference seat.
pub const HEAD_P0: ShapeLabel = s3(78);
/// Head, +3.5 mm seat.
pub const HEAD_P4: ShapeLabel = s3(79);
/// Head, +7.0 mm seat.
pub const HEAD_P8: ShapeLabel = s3(80);

/// Sub-range marker of the standard 135° family.
pub const RANGE_KS_STD135: ShapeLabel = s3(81);
/// Sub-range marker of the collared standard 135° family.
pub const RANGE_KA_STD135: ShapeLabel = s3(82);
/// Sub-range marker of the high-offset 135° family.
pub const RANGE_KHO_S_135: ShapeLabel = s3(83);
/// Sub-range marker of the collared high-offset 135° family.
pub const RANGE_KHO_A_135: ShapeLabel = s3(84);
/// Sub-range marker of the lateralized 125° family.
pub const RANGE_KLA_125: ShapeLabel = s3(85);
/// Sub-range marker of the short 125° family.
pub const RANGE_STD125_S: ShapeLabel = s3(86);
/// Sub-range marker of the collared short 125° family.
pub const RANGE_STD125_A: ShapeLabel = s3(87);
/// Sub-range marker of the short-neck 135° family.
pub const RANGE_SN_S: ShapeLabel = s3(88);
/// Sub-range marker of the collared short-neck 135° family.
pub const RANGE_SN_A: ShapeLabel = s3(89);

// Calibration columns, millimeters. The collared twins (KA, KHO_A) share
// the collarless geometry; SN_S carries its own first row.

const KS_RES01: [[f64; 3]; 11] = [
    [-11.07, 0.0, 11.07],
    [-11.57, 0.0, 11.57],
    [-12.32, 0.0, 12.32],
    [-13.07, 0.0, 13.07],
    [-13.8, 0.0, 13.8],
    [-14.44, 0.0, 14.44],
    [-15.07, 0.0, 15.07],
    [-15.82, 0.0, 15.82],
    [-16.57, 0.0, 16.57],
    [-17.57, 0.0, 17.57],
    [-18.57, 0.0, 18.57],
];

const KS_RES02: [[f64; 3]; 11] = [
    [-19.5, 0.0, 2.64],
    [-20.0, 0.0, 3.14],
    [-20.75, 0.0, 3.89],
    [-21.5, 0.0, 4.64],
    [-22.25, 0.0, 5.36],
    [-22.87, 0.0, 6.01],
    [-23.5, 0.0, 6.64],
    [-24.25, 0.0, 7.39],
    [-25.0, 0.0, 8.14],
    [-26.0, 0.0, 9.14],
    [-27.0, 0.0, 10.14],
];

const KS_TPR01: [[f64; 3]; 11] = [
    [-38.29, 0.0, 38.29],
    [-38.79, 0.0, 38.79],
    [-39.54, 0.0, 39.54],
    [-40.29, 0.0, 40.29],
    [-41.03, 0.0, 41.03],
    [-41.67, 0.0, 41.67],
    [-42.29, 0.0, 42.29],
    [-43.04, 0.0, 43.04],
    [-43.79, 0.0, 43.79],
    [-44.78, 0.0, 44.78],
    [-45.79, 0.0, 45.79],
];

const KHO_RES01: [[f64; 3]; 10] = [
    [-15.1, 0.0, 15.1],
    [-15.85, 0.0, 15.85],
    [-16.6, 0.0, 16.6],
    [-17.35, 0.0, 17.35],
    [-17.98, 0.0, 17.98],
    [-18.6, 0.0, 18.6],
    [-19.35, 0.0, 19.35],
    [-20.1, 0.0, 20.1],
    [-21.1, 0.0, 21.1],
    [-22.1, 0.0, 22.1],
];

const KHO_RES02: [[f64; 3]; 10] = [
    [-20.0, 0.0, 10.21],
    [-20.75, 0.0, 10.96],
    [-21.5, 0.0, 11.71],
    [-22.25, 0.0, 12.46],
    [-22.87, 0.0, 13.08],
    [-23.5, 0.0, 13.71],
    [-24.25, 0.0, 14.46],
    [-25.0, 0.0, 15.21],
    [-26.0, 0.0, 16.21],
    [-27.0, 0.0, 17.21],
];

const KHO_TPR01: [[f64; 3]; 10] = [
    [-45.65, 0.0, 45.65],
    [-46.4, 0.0, 46.4],
    [-47.15, 0.0, 47.15],
    [-47.9, 0.0, 47.9],
    [-48.53, 0.0, 48.53],
    [-49.15, 0.0, 49.15],
    [-49.9, 0.0, 49.9],
    [-50.65, 0.0, 50.65],
    [-51.83, 0.0, 51.83],
    [-52.86, 0.0, 52.86],
];

const KLA_RES01: [[f64; 3]; 10] = [
    [-12.62, 0.0, 8.84],
    [-13.37, 0.0, 9.36],
    [-14.12, 0.0, 9.89],
    [-14.86, 0.0, 10.4],
    [-15.5, 0.0, 10.85],
    [-16.12, 0.0, 11.29],
    [-16.87, 0.0, 11.81],
    [-17.62, 0.0, 12.34],
    [-18.58, 0.0, 13.01],
    [-19.59, 0.0, 13.72],
];

const KLA_RES02: [[f64; 3]; 10] = [
    [-19.99, 0.0, 1.46],
    [-20.74, 0.0, 1.99],
    [-21.5, 0.0, 2.51],
    [-22.26, 0.0, 3.0],
    [-22.88, 0.0, 3.47],
    [-23.49, 0.0, 3.92],
    [-24.21, 0.0, 4.47],
    [-24.96, 0.0, 5.01],
    [-25.85, 0.0, 5.74],
    [-26.78, 0.0, 6.53],
];

const KLA_TPR01: [[f64; 3]; 10] = [
    [-45.59, 0.0, 31.92],
    [-46.35, 0.0, 32.45],
    [-47.09, 0.0, 32.98],
    [-47.83, 0.0, 33.49],
    [-48.46, 0.0, 33.93],
    [-49.08, 0.0, 34.37],
    [-49.83, 0.0, 34.89],
    [-50.58, 0.0, 35.41],
    [-51.78, 0.0, 36.26],
    [-52.79, 0.0, 36.97],
];

const STD125_RES01: [[f64; 3]; 8] = [
    [-8.76, 0.0, 6.13],
    [-9.26, 0.0, 6.48],
    [-9.76, 0.0, 6.83],
    [-10.51, 0.0, 7.36],
    [-11.26, 0.0, 7.88],
    [-12.01, 0.0, 8.41],
    [-12.63, 0.0, 8.84],
    [-13.26, 0.0, 9.28],
];

const STD125_RES02: [[f64; 3]; 8] = [
    [-19.0, 0.0, -4.11],
    [-19.5, 0.0, -3.76],
    [-20.0, 0.0, -3.41],
    [-20.75, 0.0, -2.89],
    [-21.5, 0.0, -2.36],
    [-22.25, 0.0, -1.84],
    [-22.87, 0.0, -1.4],
    [-23.5, 0.0, -0.96],
];

const STD125_TPR01: [[f64; 3]; 8] = [
    [-37.87, 0.0, 26.52],
    [-38.37, 0.0, 26.87],
    [-38.87, 0.0, 27.22],
    [-39.62, 0.0, 27.74],
    [-40.37, 0.0, 28.27],
    [-41.12, 0.0, 28.79],
    [-41.74, 0.0, 29.23],
    [-42.37, 0.0, 29.67],
];

// The collarless short-neck family publishes its own first row.
const SN_S_RES01: [[f64; 3]; 4] = [
    [-10.22, 0.0, 10.22],
    [-10.71, 0.0, 10.71],
    [-11.21, 0.0, 11.21],
    [-11.96, 0.0, 11.96],
];

const SN_A_RES01: [[f64; 3]; 8] = [
    [-10.21, 0.0, 10.21],
    [-10.71, 0.0, 10.71],
    [-11.21, 0.0, 11.21],
    [-11.96, 0.0, 11.96],
    [-12.71, 0.0, 12.71],
    [-13.46, 0.0, 13.46],
    [-14.09, 0.0, 14.09],
    [-14.71, 0.0, 14.71],
];

const SN_RES02: [[f64; 3]; 8] = [
    [-19.0, 0.0, 1.43],
    [-19.5, 0.0, 1.93],
    [-20.0, 0.0, 2.43],
    [-20.75, 0.0, 3.18],
    [-21.5, 0.0, 3.93],
    [-22.25, 0.0, 4.68],
    [-22.87, 0.0, 5.3],
    [-23.5, 0.0, 5.93],
];

const SN_TPR01: [[f64; 3]; 8] = [
    [-32.49, 0.0, 32.49],
    [-32.99, 0.0, 32.99],
    [-33.49, 0.0, 33.49],
    [-34.24, 0.0, 34.24],
    [-34.99, 0.0, 34.99],
    [-35.74, 0.0, 35.74],
    [-36.36, 0.0, 36.36],
    [-36.99, 0.0, 36.99],
];

/// Builds the CORAIL scheme.
#[must_use]
pub fn scheme() -> ProductScheme {
    ProductScheme::new(definition())
}

fn definition() -> ProductDefinition {
    let family = |marker, label0, max_offset, name, collared| SubRange {
        marker,
        label0,
        max_offset,
        name,
        collared,
        side: AnatomSide::None,
    };

    let sub_ranges = vec![
        family(RANGE_KHO_A_135, STEM_KHO_A_135_0, 9, "135 KHO COLLAR", true),
        family(RANGE_KS_STD135, STEM_KS_STD135_0, 10, "135 STD", false),
        family(RANGE_KA_STD135, STEM_KA_STD135_0, 10, "135 STD COLLAR", true),
        family(RANGE_KHO_S_135, STEM_KHO_S_135_0, 9, "135 KHO", false),
        family(RANGE_KLA_125, STEM_KLA_125_0, 9, "125 KLA", true),
        family(RANGE_STD125_S, STEM_STD125_S_0, 3, "125 STD", false),
        family(RANGE_STD125_A, STEM_STD125_A_0, 7, "125 STD COLLAR", true),
        family(RANGE_SN_S, STEM_SN_S_0, 3, "135 SN", false),
        family(RANGE_SN_A, STEM_SN_A_0, 7, "135 SN COLLAR", true),
    ];

    // Row order parallels `sub_ranges`.
    let rows = vec![
        landmark_rows(&KHO_RES01, &KHO_RES02, &KHO_TPR01),
        landmark_rows(&KS_RES01, &KS_RES02, &KS_TPR01),
        landmark_rows(&KS_RES01, &KS_RES02, &KS_TPR01),
        landmark_rows(&KHO_RES01, &KHO_RES02, &KHO_TPR01),
        landmark_rows(&KLA_RES01, &KLA_RES02, &KLA_TPR01),
        landmark_rows(&STD125_RES01[..4], &STD125_RES02[..4], &STD125_TPR01[..4]),
        landmark_rows(&STD125_RES01, &STD125_RES02, &STD125_TPR01),
        landmark_rows(&SN_S_RES01, &SN_RES02[..4], &SN_TPR01[..4]),
        landmark_rows(&SN_A_RES01, &SN_RES02, &SN_TPR01),
    ];

    ProductDefinition {
        company_name: "JNJ",
        product_name: "CORAIL",
        revision: 1,
        label_block: (s3(0), RANGE_SN_A),
        sub_ranges,
        head_block: (HEAD_M4, HEAD_P8),
        cutplane_label: CUTPLANE,
        marker_block: Some((RANGE_KS_STD135, RANGE_SN_A)),
        default_stem: STEM_KA_STD135_0.next(5),
        default_stem_left: None,
        default_head: HEAD_P0,
        side_requirement: SideRequirement::Required,
        side_stamp: SideStamp::None,
        landmarks: LandmarkData {
            rows,
            shaft_angles: vec![45.0, 45.0, 45.0, 45.0, 55.0, 45.0, 45.0, 45.0, 45.0],
        },
        similar_rules: similar_rules(),
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
            // Femoral-axis cut angle; unrelated to the neck-shaft angle.
            orientation: axis_angle_deg(&Vector3::y_axis(), -45.0)
                * axis_angle_deg(&Vector3::x_axis(), 90.0),
            collar_offset: -0.1,
        },
        cut_bbox: CutBboxRule {
            half_extents: Vector3::new(25.0, 25.0, 25.0),
            at_neck_origin: false,
        },
        stem_shift: StemShiftTable::uniform(StemShiftRule::AlignDistalRef),
        normal_frame: NormalFrameRule::fixed(axis_angle_deg(&Vector3::z_axis(), 180.0)),
        ff_offset: FfOffsetRule::FromNeckOrigin {
            spin: axis_angle_deg(&Vector3::z_axis(), 180.0),
            shaft_point: Point3::new(0.0, 0.0, -25.0),
        },
    }
}

/// The cross-family size correspondence matrix.
///
/// Same-count pairs (e.g. the two standard 135° families) have no entry and
/// resolve by identity. Some straight/collared pairings among the short
/// families exist in one direction only; the gaps reproduce the calibration
/// data and must not be filled in.
fn similar_rules() -> Vec<SimilarRule> {
    let mut rules = Vec::new();
    let shift = SimilarRule::shift;

    for source in [RANGE_KS_STD135, RANGE_KA_STD135] {
        for target in [RANGE_KHO_S_135, RANGE_KHO_A_135, RANGE_KLA_125] {
            rules.push(shift(source, target, -1));
        }
        for target in [RANGE_STD125_S, RANGE_STD125_A, RANGE_SN_S, RANGE_SN_A] {
            rules.push(shift(source, target, 1));
        }
    }

    for source in [RANGE_KHO_S_135, RANGE_KHO_A_135, RANGE_KLA_125] {
        for target in [RANGE_KS_STD135, RANGE_KA_STD135] {
            rules.push(shift(source, target, 1));
        }
        for target in [RANGE_STD125_S, RANGE_STD125_A, RANGE_SN_S, RANGE_SN_A] {
            rules.push(shift(source, target, 2));
        }
    }

    for source in [RANGE_STD125_S, RANGE_STD125_A, RANGE_SN_S, RANGE_SN_A] {
        for target in [RANGE_KS_STD135, RANGE_KA_STD135] {
            rules.push(shift(source, target, -1));
        }
        for target in [RANGE_KHO_S_135, RANGE_KHO_A_135, RANGE_KLA_125] {
            rules.push(shift(source, target, -2));
        }
    }

    rules.push(shift(RANGE_STD125_S, RANGE_STD125_A, 0));
    rules.push(shift(RANGE_STD125_S, RANGE_SN_A, 0));
    rules.push(shift(RANGE_STD125_A, RANGE_STD125_S, 0));
    rules.push(shift(RANGE_STD125_A, RANGE_SN_S, 0));
    rules.push(shift(RANGE_SN_S, RANGE_STD125_A, 0));
    rules.push(shift(RANGE_SN_S, RANGE_SN_A, 0));
    rules.push(shift(RANGE_SN_A, RANGE_STD125_S, 0));
    rules.push(shift(RANGE_SN_A, RANGE_SN_S, 0));

    rules
}
