//! The caller-owned implant configuration record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AnatomSide, ShapeLabel};

/// The mutable planning record the engine validates and transforms.
///
/// Built by a product scheme's default-configuration factory, mutated by the
/// next/previous-size and fill-and-validate operations, and owned by the
/// caller throughout - the engine never retains a reference beyond a single
/// operation, and storage belongs to the planning application.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImplantConfiguration {
    /// The side the surgeon requested the plan for.
    pub requested_side: AnatomSide,
    /// The side stamped on the assembled implant (`None` for straight stems).
    pub implant_side: AnatomSide,
    /// Stem size label.
    pub stem_label: ShapeLabel,
    /// Head size label.
    pub head_label: ShapeLabel,
    /// Modular neck label; always unset for mono-block product lines.
    pub neck_label: Option<ShapeLabel>,
    /// Cutplane marker label.
    pub cutplane_label: Option<ShapeLabel>,
    /// Product name stamped on the stem part.
    pub stem_product_name: String,
    /// Product name stamped on the distal shaft part.
    pub distal_shaft_product_name: String,
    /// Product name stamped on the head part.
    pub head_product_name: String,
    /// Product name stamped on the neck part.
    pub neck_product_name: String,
    /// Whether the record passed the product's structural checks.
    pub valid_assembly: bool,
}

impl ImplantConfiguration {
    /// Creates a configuration with the given side and part labels; all
    /// other fields start empty and validity false.
    #[must_use]
    pub fn new(requested_side: AnatomSide, stem_label: ShapeLabel, head_label: ShapeLabel) -> Self {
        Self {
            requested_side,
            stem_label,
            head_label,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_invalid() {
        let cfg = ImplantConfiguration::new(
            AnatomSide::Right,
            ShapeLabel::new(100),
            ShapeLabel::new(200),
        );
        assert!(!cfg.valid_assembly);
        assert_eq!(cfg.implant_side, AnatomSide::None);
        assert!(cfg.neck_label.is_none());
        assert!(cfg.cutplane_label.is_none());
        assert!(cfg.stem_product_name.is_empty());
    }
}
