//! Shared helpers for authoring product definitions.

use implant_types::LandmarkSet;

/// Zips parallel calibration columns into landmark rows.
///
/// # Panics
///
/// Panics at product construction when the columns disagree in length -
/// a defect in the authored tables, caught before any scheme is handed out.
#[must_use]
pub(crate) fn landmark_rows(
    neck_origin: &[[f64; 3]],
    distal_ref: &[[f64; 3]],
    head_target: &[[f64; 3]],
) -> Vec<LandmarkSet> {
    assert_eq!(neck_origin.len(), distal_ref.len());
    assert_eq!(neck_origin.len(), head_target.len());
    neck_origin
        .iter()
        .zip(distal_ref)
        .zip(head_target)
        .map(|((n, d), h)| LandmarkSet::from_rows(*n, *d, *h))
        .collect()
}

/// Landmark rows where every offset shares the same calibration points.
#[must_use]
pub(crate) fn constant_landmark_rows(
    count: usize,
    neck_origin: [f64; 3],
    distal_ref: [f64; 3],
    head_target: [f64; 3],
) -> Vec<LandmarkSet> {
    vec![LandmarkSet::from_rows(neck_origin, distal_ref, head_target); count]
}
