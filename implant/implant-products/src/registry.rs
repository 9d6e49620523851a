//! The product registry: every supported scheme behind one label lookup.

use implant_scheme::ProductScheme;
use implant_types::ShapeLabel;
use tracing::debug;

use crate::{actis, amistem, corail, ecofit, fit, optimys};

/// Owns one scheme per supported product line and dispatches raw labels to
/// the product whose block contains them.
///
/// Label blocks never overlap across vendors - each company owns a fixed
/// integer range - so the first match is the only match.
///
/// # Example
///
/// ```
/// use implant_products::{corail, ProductRegistry};
///
/// let registry = ProductRegistry::standard();
/// let scheme = registry.find(corail::STEM_KS_STD135_0).unwrap();
/// assert_eq!(scheme.product_name(), "CORAIL");
/// ```
#[derive(Debug)]
pub struct ProductRegistry {
    schemes: Vec<ProductScheme>,
}

impl ProductRegistry {
    /// Builds the registry of every supported product line.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            schemes: vec![
                amistem::scheme(),
                optimys::scheme(),
                corail::scheme(),
                actis::scheme(),
                ecofit::scheme(),
                fit::scheme(),
            ],
        }
    }

    /// The scheme whose label block contains `label`.
    #[must_use]
    pub fn find(&self, label: ShapeLabel) -> Option<&ProductScheme> {
        let hit = self.schemes.iter().find(|s| s.in_range(label));
        if hit.is_none() {
            debug!(label = %label, "label matches no registered product");
        }
        hit
    }

    /// All registered schemes.
    pub fn iter(&self) -> impl Iterator<Item = &ProductScheme> {
        self.schemes.iter()
    }

    /// Number of registered product lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// True when no product is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
