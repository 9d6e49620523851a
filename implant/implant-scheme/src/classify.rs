//! Label classification.
//!
//! Classification is the construction-time gate for every other operation:
//! callers classify a raw label first and branch on the returned variant,
//! instead of tripping an assertion deep inside a lookup.

use implant_types::{ShapeLabel, SubRange};

use crate::definition::ProductDefinition;
use crate::error::{SchemeError, SchemeResult};

/// A label proven to be a stem of one product line, together with its
/// sub-range index and zero-based offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StemLabel {
    /// The underlying label.
    pub label: ShapeLabel,
    /// Index into the product's sub-range table.
    pub range_index: usize,
    /// Zero-based offset within the sub-range.
    pub offset: u32,
}

/// What a raw label names within one product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// A stem size, with its classification witness.
    Stem(StemLabel),
    /// A head size.
    Head,
    /// The cutplane marker.
    CutPlane,
    /// A sub-range marker.
    RangeMarker,
    /// Not a label of this product line.
    Foreign,
}

/// Pure predicates over one product line's label intervals.
#[derive(Debug, Clone, Copy)]
pub struct LabelClassifier<'a> {
    def: &'a ProductDefinition,
}

impl<'a> LabelClassifier<'a> {
    /// Creates a classifier over `def`.
    #[must_use]
    pub fn new(def: &'a ProductDefinition) -> Self {
        Self { def }
    }

    /// Classifies a raw label.
    #[must_use]
    pub fn classify(&self, label: ShapeLabel) -> LabelKind {
        let (lower, upper) = self.def.label_block;
        if !label.in_closed_range(lower, upper) {
            return LabelKind::Foreign;
        }
        for (range_index, range) in self.def.sub_ranges.iter().enumerate() {
            if let Some(offset) = range.offset_of(label) {
                return LabelKind::Stem(StemLabel {
                    label,
                    range_index,
                    offset,
                });
            }
        }
        let (head_lower, head_upper) = self.def.head_block;
        if label.in_closed_range(head_lower, head_upper) {
            return LabelKind::Head;
        }
        if label == self.def.cutplane_label {
            return LabelKind::CutPlane;
        }
        if let Some((marker_lower, marker_upper)) = self.def.marker_block {
            if label.in_closed_range(marker_lower, marker_upper) {
                return LabelKind::RangeMarker;
            }
        }
        LabelKind::Foreign
    }

    /// True when `label` names a stem size.
    #[must_use]
    pub fn is_stem(&self, label: ShapeLabel) -> bool {
        matches!(self.classify(label), LabelKind::Stem(_))
    }

    /// True when `label` names a head size.
    #[must_use]
    pub fn is_head(&self, label: ShapeLabel) -> bool {
        matches!(self.classify(label), LabelKind::Head)
    }

    /// True when `label` is the cutplane marker.
    #[must_use]
    pub fn is_cutplane(&self, label: ShapeLabel) -> bool {
        matches!(self.classify(label), LabelKind::CutPlane)
    }

    /// True when `label` is a sub-range marker.
    #[must_use]
    pub fn is_range_marker(&self, label: ShapeLabel) -> bool {
        matches!(self.classify(label), LabelKind::RangeMarker)
    }

    /// The sub-range containing a stem label.
    #[must_use]
    pub fn sub_range_of(&self, label: ShapeLabel) -> Option<&'a SubRange> {
        match self.classify(label) {
            LabelKind::Stem(stem) => self.def.sub_ranges.get(stem.range_index),
            _ => None,
        }
    }

    /// Classifies `label` as a stem, or reports the precondition violation.
    pub fn require_stem(&self, label: ShapeLabel) -> SchemeResult<StemLabel> {
        match self.classify(label) {
            LabelKind::Stem(stem) => Ok(stem),
            _ => Err(SchemeError::NotAStem { label }),
        }
    }

    /// Checks that `label` names a head, or reports the precondition
    /// violation.
    pub fn require_head(&self, label: ShapeLabel) -> SchemeResult<ShapeLabel> {
        if self.is_head(label) {
            Ok(label)
        } else {
            Err(SchemeError::NotAHead { label })
        }
    }

    /// Steps a stem label one offset forward or back within its own
    /// sub-range.
    ///
    /// Stepping past a boundary returns the label unchanged - families are
    /// never crossed implicitly; crossing requires an explicit similar-size
    /// resolution.
    pub fn next_prev_stem(&self, label: ShapeLabel, forward: bool) -> SchemeResult<ShapeLabel> {
        let stem = self.require_stem(label)?;
        let range = &self.def.sub_ranges[stem.range_index];
        let stepped = label.next(if forward { 1 } else { -1 });
        if range.contains(stepped) {
            Ok(stepped)
        } else {
            Ok(label)
        }
    }
}
