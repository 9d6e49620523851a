//! Product-line definitions: the data a scheme is parameterized by.
//!
//! A [`ProductDefinition`] bundles everything that distinguishes one product
//! line from another - label allocation, sub-range table, calibration
//! landmarks, similar-size rules, chain table and transform parameters - as
//! plain data. One shared engine evaluates these tables; there is no
//! per-product subtype.

use implant_types::{
    AnatomSide, LandmarkSet, Point3, ShapeLabel, SubRange, UnitQuaternion, Vector3,
};

/// How an offset is carried from a source sub-range into a target sub-range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffsetRule {
    /// Same offset in both families.
    Identity,
    /// Constant shift, clamped into the target family afterwards.
    Shift(i32),
    /// Explicit pairs `(source offset, target offset)`; offsets not listed
    /// map unchanged.
    Remap(Vec<(u32, u32)>),
}

/// One authored correspondence between two sub-ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarRule {
    /// Source sub-range marker.
    pub source: ShapeLabel,
    /// Target sub-range marker.
    pub target: ShapeLabel,
    /// Offset adjustment.
    pub rule: OffsetRule,
    /// Source offsets with no correspondent in the target family; resolving
    /// one of these returns the source label unchanged ("no similar size").
    pub barred: Vec<u32>,
}

impl SimilarRule {
    /// A shift rule with no barred offsets.
    #[must_use]
    pub fn shift(source: ShapeLabel, target: ShapeLabel, delta: i32) -> Self {
        Self {
            source,
            target,
            rule: OffsetRule::Shift(delta),
            barred: Vec::new(),
        }
    }
}

/// Which endpoint of a chained pair an intermediate label is resolved from.
///
/// The calibration data resolves some hops from the origin component and
/// some from the target component; the difference is observable when a
/// caller chains non-corresponding sizes, so it is kept as authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAnchor {
    /// Resolve the hop label from the origin stem.
    Origin,
    /// Resolve the hop label from the target stem.
    Target,
}

/// One intermediate stop of a chained correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainHop {
    /// Sub-range marker of the intermediate family.
    pub range: ShapeLabel,
    /// Endpoint the intermediate size is resolved from.
    pub anchor: ChainAnchor,
}

/// An authored 2-3-hop path between two sub-ranges with no direct rule.
///
/// Chains are a fixed, enumerated table per product line - never a graph
/// search - and the same table drives both similar-size resolution and
/// stem-to-stem transform composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRule {
    /// Source sub-range marker.
    pub source: ShapeLabel,
    /// Target sub-range marker.
    pub target: ShapeLabel,
    /// Intermediate families, in travel order.
    pub hops: Vec<ChainHop>,
}

/// Head seating parameters for `head_to_stem`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadSeating {
    /// Offset length along the neck axis per head label, millimeters.
    pub lengths: Vec<(ShapeLabel, f64)>,
    /// Extra length applied when the stem belongs to the keyed sub-range;
    /// corrects family-specific calibration offsets.
    pub family_corrections: Vec<(ShapeLabel, f64)>,
}

impl HeadSeating {
    /// Seating length for `head`, including the correction for the stem's
    /// sub-range marker. Heads missing from the table seat at length zero.
    #[must_use]
    pub fn length_for(&self, head: ShapeLabel, stem_range_marker: ShapeLabel) -> f64 {
        let base = self
            .lengths
            .iter()
            .find(|(label, _)| *label == head)
            .map_or(0.0, |(_, len)| *len);
        let correction = self
            .family_corrections
            .iter()
            .find(|(marker, _)| *marker == stem_range_marker)
            .map_or(0.0, |(_, c)| *c);
        base + correction
    }
}

/// Resection-plane parameters for `cut_plane`.
#[derive(Debug, Clone, PartialEq)]
pub struct CutPlaneRule {
    /// Fixed plane orientation: the base plane (origin, +Y normal) is
    /// rotated by this before being carried to the neck origin.
    pub orientation: UnitQuaternion<f64>,
    /// Offset along the plane normal applied to collared sub-ranges.
    pub collar_offset: f64,
}

/// Bounding-box parameters for `cut_plane_bbox`.
#[derive(Debug, Clone, PartialEq)]
pub struct CutBboxRule {
    /// Half extents of the box, millimeters.
    pub half_extents: Vector3<f64>,
    /// Anchor the box at the neck origin; otherwise at the component origin.
    pub at_neck_origin: bool,
}

/// How one stem variant is repositioned onto another.
#[derive(Debug, Clone, PartialEq)]
pub enum StemShiftRule {
    /// Translate so the distal reference points (RES_02) coincide.
    AlignDistalRef,
    /// Translate so the neck origins (RES_01) coincide.
    AlignNeckOrigin,
    /// Translate along `axis` by the table entry for the origin stem's
    /// offset; offsets beyond the table shift by zero.
    AxialShift {
        /// Shift direction.
        axis: Vector3<f64>,
        /// Shift magnitude per origin offset.
        by_offset: Vec<f64>,
    },
    /// No repositioning.
    Identity,
}

/// The stem-to-stem transform table of one product line.
#[derive(Debug, Clone, PartialEq)]
pub struct StemShiftTable {
    /// Directly authored `(source marker, target marker)` rules.
    pub pairs: Vec<(ShapeLabel, ShapeLabel, StemShiftRule)>,
    /// Rule applied to pairs with neither a direct entry nor a chain.
    pub fallback: StemShiftRule,
}

impl StemShiftTable {
    /// A table with no direct pairs, everything handled by `fallback`.
    #[must_use]
    pub fn uniform(fallback: StemShiftRule) -> Self {
        Self {
            pairs: Vec::new(),
            fallback,
        }
    }

    /// The direct rule for a marker pair, or the fallback.
    #[must_use]
    pub fn direct(&self, source: ShapeLabel, target: ShapeLabel) -> &StemShiftRule {
        self.pairs
            .iter()
            .find(|(s, t, _)| *s == source && *t == target)
            .map_or(&self.fallback, |(_, _, rule)| rule)
    }

    /// Whether the pair has a directly authored rule.
    #[must_use]
    pub fn has_direct(&self, source: ShapeLabel, target: ShapeLabel) -> bool {
        self.pairs
            .iter()
            .any(|(s, t, _)| *s == source && *t == target)
    }
}

/// Canonical "normal frame" orientation used for first-time placement.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalFrameRule {
    /// Orientation for right-side (and side-free) stems.
    pub orientation_right: UnitQuaternion<f64>,
    /// Orientation for left-side stems; equals `orientation_right` on
    /// symmetric products.
    pub orientation_left: UnitQuaternion<f64>,
    /// Map the neck origin onto the frame origin (side-specific stems whose
    /// geometry is not centered on the canal axis).
    pub center_neck_origin: bool,
}

impl NormalFrameRule {
    /// A symmetric rule with one fixed orientation.
    #[must_use]
    pub fn fixed(orientation: UnitQuaternion<f64>) -> Self {
        Self {
            orientation_right: orientation,
            orientation_left: orientation,
            center_neck_origin: false,
        }
    }
}

/// Anatomical fine-adjustment vector in the canonical frame.
///
/// Components are side-independent: `x > 0` moves the component medially,
/// `y > 0` posteriorly, `z > 0` superiorly.
#[derive(Debug, Clone, PartialEq)]
pub enum FfOffsetRule {
    /// One vector for every stem size.
    Constant(Vector3<f64>),
    /// Derived from the neck origin: the medial component of
    /// `spin * (neck_origin - shaft_point)`.
    FromNeckOrigin {
        /// Rotation into the canonical frame.
        spin: UnitQuaternion<f64>,
        /// Reference point on the femoral shaft axis.
        shaft_point: Point3<f64>,
    },
    /// One vector per stem offset; offsets beyond the table get zero.
    PerOffset(Vec<Vector3<f64>>),
}

/// Whether validation demands a concrete requested side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideRequirement {
    /// The requested side is ignored.
    Free,
    /// A non-`None` requested side is required for a valid assembly.
    Required,
}

/// Which side is stamped on a validated assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideStamp {
    /// Straight stems: the implant itself is side-free.
    None,
    /// The requested side carries over onto the implant.
    Requested,
}

/// Calibration landmark rows and scalar parameters of one product line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkData {
    /// Landmark rows per sub-range (outer index parallels
    /// `ProductDefinition::sub_ranges`), per offset (inner index).
    pub rows: Vec<Vec<LandmarkSet>>,
    /// Neck-shaft angle in degrees per sub-range; empty when the product
    /// does not publish one.
    pub shaft_angles: Vec<f64>,
}

/// Everything that defines one product line, built once at startup and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDefinition {
    /// Registry company name, e.g. `"JNJ"`.
    pub company_name: &'static str,
    /// Registry product name, e.g. `"CORAIL"`.
    pub product_name: &'static str,
    /// Scheme revision.
    pub revision: u32,
    /// Inclusive label block owned by this product line.
    pub label_block: (ShapeLabel, ShapeLabel),
    /// Stem families; disjoint, contiguous, fixed at definition time.
    pub sub_ranges: Vec<SubRange>,
    /// Inclusive head label block.
    pub head_block: (ShapeLabel, ShapeLabel),
    /// Cutplane marker label.
    pub cutplane_label: ShapeLabel,
    /// Inclusive sub-range marker block, when the product allocates one.
    pub marker_block: Option<(ShapeLabel, ShapeLabel)>,
    /// Default stem label (right side / side-free).
    pub default_stem: ShapeLabel,
    /// Default stem label for left-side planning on side-specific products.
    pub default_stem_left: Option<ShapeLabel>,
    /// Default head label.
    pub default_head: ShapeLabel,
    /// Side requirement for validation.
    pub side_requirement: SideRequirement,
    /// Side stamped on validated assemblies.
    pub side_stamp: SideStamp,
    /// Calibration landmark tables.
    pub landmarks: LandmarkData,
    /// Authored similar-size rules.
    pub similar_rules: Vec<SimilarRule>,
    /// Authored chain table, shared by resolver and composer.
    pub chains: Vec<ChainRule>,
    /// Orientation of the component's stem frame; identity for products
    /// calibrated directly in the component frame.
    pub frame_spin: UnitQuaternion<f64>,
    /// Head seating parameters.
    pub head_seating: HeadSeating,
    /// Resection-plane parameters.
    pub cut_plane: CutPlaneRule,
    /// Cutplane bounding-box parameters.
    pub cut_bbox: CutBboxRule,
    /// Stem-to-stem transform table.
    pub stem_shift: StemShiftTable,
    /// Normal-frame orientation.
    pub normal_frame: NormalFrameRule,
    /// Anatomical fine-adjustment rule.
    pub ff_offset: FfOffsetRule,
}

impl ProductDefinition {
    /// Index into `sub_ranges` of the family with the given marker.
    #[must_use]
    pub fn range_index_of_marker(&self, marker: ShapeLabel) -> Option<usize> {
        self.sub_ranges.iter().position(|r| r.marker == marker)
    }

    /// The sub-range with the given marker.
    #[must_use]
    pub fn sub_range_by_marker(&self, marker: ShapeLabel) -> Option<&SubRange> {
        self.sub_ranges.iter().find(|r| r.marker == marker)
    }

    /// The authored similar rule for a marker pair.
    #[must_use]
    pub fn similar_rule(&self, source: ShapeLabel, target: ShapeLabel) -> Option<&SimilarRule> {
        self.similar_rules
            .iter()
            .find(|r| r.source == source && r.target == target)
    }

    /// The authored chain for a marker pair.
    #[must_use]
    pub fn chain(&self, source: ShapeLabel, target: ShapeLabel) -> Option<&ChainRule> {
        self.chains
            .iter()
            .find(|c| c.source == source && c.target == target)
    }

    /// Default stem label for the given planning side.
    #[must_use]
    pub fn default_stem_for(&self, side: AnatomSide) -> ShapeLabel {
        match side {
            AnatomSide::Left => self.default_stem_left.unwrap_or(self.default_stem),
            AnatomSide::None | AnatomSide::Right => self.default_stem,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests_fixture {
    //! A synthetic three-family product line exercising every rule variant.

    use implant_types::{axis_angle_deg, LandmarkSet, Point3, Vector3};
    use nalgebra::UnitQuaternion;

    use super::*;

    const BASE: u32 = 1_000;

    /// STD: 11 sizes, LAT: 9 sizes (collared), SN: 11 sizes.
    ///
    /// Rules: STD->LAT shift -1 with barred extremes, LAT->STD shift +1,
    /// STD<->SN remap on the top sizes; LAT<->SN have no direct rule and
    /// chain through STD. Stem shifts mirror the same pairing.
    pub(crate) fn two_family_product() -> ProductDefinition {
        let s3 = |i: u32| ShapeLabel::new(BASE + i);

        let std = SubRange {
            marker: s3(36),
            label0: s3(0),
            max_offset: 10,
            name: "STD",
            collared: false,
            side: AnatomSide::None,
        };
        let lat = SubRange {
            marker: s3(37),
            label0: s3(11),
            max_offset: 8,
            name: "LAT",
            collared: true,
            side: AnatomSide::None,
        };
        let sn = SubRange {
            marker: s3(38),
            label0: s3(20),
            max_offset: 10,
            name: "SN",
            collared: false,
            side: AnatomSide::None,
        };

        let rows_for = |count: u32, base: f64| -> Vec<LandmarkSet> {
            (0..count)
                .map(|k| {
                    let v = base + f64::from(k);
                    LandmarkSet {
                        neck_origin: Point3::new(-v, 0.0, v),
                        distal_ref: Point3::new(-v - 10.0, 0.0, v - 8.0),
                        head_target: Point3::new(-v - 25.0, 0.0, v + 25.0),
                    }
                })
                .collect()
        };

        let similar_rules = vec![
            SimilarRule {
                source: std.marker,
                target: lat.marker,
                rule: OffsetRule::Shift(-1),
                barred: vec![0, 10],
            },
            SimilarRule::shift(lat.marker, std.marker, 1),
            SimilarRule {
                source: std.marker,
                target: sn.marker,
                rule: OffsetRule::Remap(vec![(9, 10)]),
                barred: vec![],
            },
            SimilarRule {
                source: sn.marker,
                target: std.marker,
                rule: OffsetRule::Remap(vec![(10, 9)]),
                barred: vec![],
            },
        ];

        let chains = vec![
            ChainRule {
                source: sn.marker,
                target: lat.marker,
                hops: vec![ChainHop {
                    range: std.marker,
                    anchor: ChainAnchor::Origin,
                }],
            },
            ChainRule {
                source: lat.marker,
                target: sn.marker,
                hops: vec![ChainHop {
                    range: std.marker,
                    anchor: ChainAnchor::Target,
                }],
            },
        ];

        let z_up: Vec<f64> = vec![0.0, 5.0, 5.2, 5.4, 5.6, 5.8, 6.0, 6.2, 6.4, 6.6, 0.0];
        let z_down: Vec<f64> = vec![5.0, 5.2, 5.4, 5.6, 5.8, 6.0, 6.2, 6.4, 6.6];
        let stem_shift = StemShiftTable {
            pairs: vec![
                (std.marker, std.marker, StemShiftRule::AlignNeckOrigin),
                (std.marker, sn.marker, StemShiftRule::AlignNeckOrigin),
                (sn.marker, std.marker, StemShiftRule::AlignNeckOrigin),
                (sn.marker, sn.marker, StemShiftRule::AlignNeckOrigin),
                (lat.marker, lat.marker, StemShiftRule::AlignNeckOrigin),
                (
                    std.marker,
                    lat.marker,
                    StemShiftRule::AxialShift {
                        axis: Vector3::z(),
                        by_offset: z_up,
                    },
                ),
                (
                    lat.marker,
                    std.marker,
                    StemShiftRule::AxialShift {
                        axis: -Vector3::z(),
                        by_offset: z_down,
                    },
                ),
            ],
            fallback: StemShiftRule::AlignDistalRef,
        };

        ProductDefinition {
            company_name: "ACME",
            product_name: "TESTSTEM",
            revision: 1,
            label_block: (s3(0), s3(38)),
            sub_ranges: vec![std.clone(), lat.clone(), sn],
            head_block: (s3(32), s3(35)),
            cutplane_label: s3(31),
            marker_block: Some((s3(36), s3(38))),
            default_stem: s3(5),
            default_stem_left: None,
            default_head: s3(33),
            side_requirement: SideRequirement::Required,
            side_stamp: SideStamp::None,
            landmarks: LandmarkData {
                rows: vec![rows_for(11, 11.0), rows_for(9, 15.0), rows_for(11, 9.0)],
                shaft_angles: vec![45.0, 55.0, 45.0],
            },
            similar_rules,
            chains,
            frame_spin: UnitQuaternion::identity(),
            head_seating: HeadSeating {
                lengths: vec![
                    (s3(32), -3.5),
                    (s3(33), 0.0),
                    (s3(34), 3.5),
                    (s3(35), 7.0),
                ],
                family_corrections: vec![(lat.marker, 1.0)],
            },
            cut_plane: CutPlaneRule {
                orientation: axis_angle_deg(&Vector3::y_axis(), -45.0)
                    * axis_angle_deg(&Vector3::x_axis(), 90.0),
                collar_offset: -0.1,
            },
            cut_bbox: CutBboxRule {
                half_extents: Vector3::new(25.0, 25.0, 25.0),
                at_neck_origin: true,
            },
            stem_shift,
            normal_frame: NormalFrameRule::fixed(axis_angle_deg(&Vector3::z_axis(), 180.0)),
            ff_offset: FfOffsetRule::Constant(Vector3::new(12.0, 0.0, 0.0)),
        }
    }
}
