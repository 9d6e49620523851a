//! LC FIT: a side-specific short stem, seven sizes per side.
//!
//! The only side-specific product of the registry: right and left stems are
//! distinct catalog parts with their own label families, the default size
//! follows the planning side, and the normal frame tilts by five degrees
//! toward the planned canal. The cut anchor walks distally with size, so
//! the per-size tables drive the cut plane, the normal frame and the
//! anatomical offset alike.

use implant_scheme::{
    CutBboxRule, CutPlaneRule, FfOffsetRule, HeadSeating, LandmarkData, NormalFrameRule,
    ProductDefinition, ProductScheme, SideRequirement, SideStamp, StemShiftRule, StemShiftTable,
};
use implant_types::{axis_angle_deg, AnatomSide, LandmarkSet, Point3, ShapeLabel, SubRange, Vector3};
use nalgebra::UnitQuaternion;

/// First label of the FIT block within the LC company range.
const BASE: u32 = 60_000 + 750;

const fn s3(offset: u32) -> ShapeLabel {
    ShapeLabel::new(BASE + offset)
}

/// First size of the right-side family.
pub const STEM_1_R: ShapeLabel = s3(0);
/// First size of the left-side family.
pub const STEM_1_L: ShapeLabel = s3(7);
/// Cutplane marker.
pub const CUTPLANE: ShapeLabel = s3(14);
/// Head, -8 mm seat.
pub const HEAD_M4: ShapeLabel = s3(15);
/// Head, -4 mm seat.
pub const HEAD_P0: ShapeLabel = s3(16);
/// Head, reference seat.
pub const HEAD_P4: ShapeLabel = s3(17);
/// Head, +4.3 mm seat.
pub const HEAD_P8: ShapeLabel = s3(18);

/// Distal cut-anchor distance per size, millimeters along the stem axis.
const CUT_ANCHOR_X: [f64; 7] = [-34.4, -36.5, -38.0, -39.5, -41.5, -43.4, -45.6];

/// Medial fine-adjustment heuristic per size.
const FF_MEDIAL_X: [f64; 7] = [15.0, 16.1, 16.6, 17.1, 18.1, 19.0, 20.2];

/// Builds the FIT scheme.
#[must_use]
pub fn scheme() -> ProductScheme {
    ProductScheme::new(definition())
}

fn definition() -> ProductDefinition {
    let sub_ranges = vec![
        SubRange {
            marker: STEM_1_R,
            label0: STEM_1_R,
            max_offset: 6,
            name: "FIT RIGHT",
            collared: false,
            side: AnatomSide::Right,
        },
        SubRange {
            marker: STEM_1_L,
            label0: STEM_1_L,
            max_offset: 6,
            name: "FIT LEFT",
            collared: false,
            side: AnatomSide::Left,
        },
    ];

    let rows: Vec<LandmarkSet> = CUT_ANCHOR_X
        .iter()
        .map(|&x| LandmarkSet {
            neck_origin: Point3::new(x, 0.0, 0.0),
            distal_ref: Point3::origin(),
            head_target: Point3::origin(),
        })
        .collect();

    let normal_orientation = |tilt_deg: f64| {
        axis_angle_deg(&Vector3::y_axis(), 4.0)
            * axis_angle_deg(&Vector3::x_axis(), tilt_deg)
            * axis_angle_deg(&Vector3::y_axis(), -45.0)
            * axis_angle_deg(&Vector3::x_axis(), 90.0)
    };

    ProductDefinition {
        company_name: "LC",
        product_name: "LC FIT",
        revision: 1,
        label_block: (STEM_1_R, HEAD_P8),
        sub_ranges,
        head_block: (HEAD_M4, HEAD_P8),
        cutplane_label: CUTPLANE,
        marker_block: None,
        default_stem: STEM_1_R.next(6),
        default_stem_left: Some(STEM_1_L.next(6)),
        default_head: HEAD_P0,
        side_requirement: SideRequirement::Required,
        side_stamp: SideStamp::Requested,
        landmarks: LandmarkData {
            rows: vec![rows.clone(), rows],
            shaft_angles: Vec::new(),
        },
        similar_rules: Vec::new(),
        chains: Vec::new(),
        frame_spin: UnitQuaternion::identity(),
        head_seating: HeadSeating {
            lengths: vec![
                (HEAD_M4, -8.0),
                (HEAD_P0, -4.0),
                (HEAD_P4, 0.0),
                (HEAD_P8, 4.3),
            ],
            family_corrections: Vec::new(),
        },
        cut_plane: CutPlaneRule {
            orientation: axis_angle_deg(&Vector3::z_axis(), -90.0),
            collar_offset: 0.0,
        },
        cut_bbox: CutBboxRule {
            half_extents: Vector3::new(25.0, 25.0, 25.0),
            at_neck_origin: true,
        },
        // No cross-side repositioning data is published.
        stem_shift: StemShiftTable::uniform(StemShiftRule::Identity),
        normal_frame: NormalFrameRule {
            orientation_right: normal_orientation(5.0),
            orientation_left: normal_orientation(-5.0),
            center_neck_origin: true,
        },
        ff_offset: FfOffsetRule::PerOffset(
            FF_MEDIAL_X
                .iter()
                .map(|&x| Vector3::new(x, 0.0, 0.0))
                .collect(),
        ),
    }
}
