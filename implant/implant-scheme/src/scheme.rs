//! The per-product-line façade.

use implant_types::{
    Aabb, AnatomSide, ImplantConfiguration, Plane3, RigidTransform, ShapeLabel, Vector3,
};
use tracing::debug;

use crate::classify::{LabelClassifier, LabelKind};
use crate::compose::TransformComposer;
use crate::definition::{ProductDefinition, SideRequirement, SideStamp};
use crate::error::SchemeResult;
use crate::landmarks::LandmarkTable;
use crate::similar::SimilarLabelResolver;

/// The stable contract every product line implements identically.
///
/// A scheme owns its [`ProductDefinition`] - immutable, read-only data built
/// once at startup - and composes the classifier, landmark table, resolver
/// and transform composer over it. All operations are synchronous pure
/// functions; a scheme is safely shared across threads.
///
/// # Example
///
/// ```no_run
/// use implant_scheme::ProductScheme;
/// use implant_types::AnatomSide;
///
/// fn plan(scheme: &ProductScheme) {
///     let config = scheme.default_configuration(AnatomSide::Right);
///     assert!(config.valid_assembly);
///
///     let bigger = scheme.next_prev(&config, true);
///     let plane = scheme.cut_plane(bigger.stem_label).unwrap();
///     println!("resection plane through {:?}", plane.point);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProductScheme {
    def: ProductDefinition,
}

impl ProductScheme {
    /// Wraps a product definition.
    #[must_use]
    pub fn new(def: ProductDefinition) -> Self {
        Self { def }
    }

    /// The underlying definition.
    #[must_use]
    pub fn definition(&self) -> &ProductDefinition {
        &self.def
    }

    /// Scheme revision.
    #[must_use]
    pub fn rev(&self) -> u32 {
        self.def.revision
    }

    /// Registry product name.
    #[must_use]
    pub fn product_name(&self) -> &'static str {
        self.def.product_name
    }

    /// Registry company name.
    #[must_use]
    pub fn company_name(&self) -> &'static str {
        self.def.company_name
    }

    /// True when `label` belongs to this product's label block.
    #[must_use]
    pub fn in_range(&self, label: ShapeLabel) -> bool {
        let (lower, upper) = self.def.label_block;
        label.in_closed_range(lower, upper)
    }

    /// The label classifier.
    #[must_use]
    pub fn classifier(&self) -> LabelClassifier<'_> {
        LabelClassifier::new(&self.def)
    }

    /// The landmark table.
    #[must_use]
    pub fn landmark_table(&self) -> LandmarkTable<'_> {
        LandmarkTable::new(&self.def)
    }

    /// The similar-size resolver.
    #[must_use]
    pub fn resolver(&self) -> SimilarLabelResolver<'_> {
        SimilarLabelResolver::new(&self.def)
    }

    /// The transform composer.
    #[must_use]
    pub fn composer(&self) -> TransformComposer<'_> {
        TransformComposer::new(&self.def)
    }

    /// Classifies a raw label.
    #[must_use]
    pub fn classify(&self, label: ShapeLabel) -> LabelKind {
        self.classifier().classify(label)
    }

    /// The most similar label in the given target sub-range.
    pub fn similar_label(
        &self,
        label: ShapeLabel,
        target_marker: ShapeLabel,
    ) -> SchemeResult<ShapeLabel> {
        self.resolver().similar_label(label, target_marker)
    }

    /// See [`TransformComposer::head_to_stem`].
    pub fn head_to_stem(
        &self,
        head_label: ShapeLabel,
        stem_label: ShapeLabel,
    ) -> SchemeResult<RigidTransform> {
        self.composer().head_to_stem(head_label, stem_label)
    }

    /// See [`TransformComposer::cut_plane`].
    pub fn cut_plane(&self, stem_label: ShapeLabel) -> SchemeResult<Plane3> {
        self.composer().cut_plane(stem_label)
    }

    /// See [`TransformComposer::cut_plane_bbox`].
    pub fn cut_plane_bbox(&self, stem_label: ShapeLabel) -> SchemeResult<Aabb> {
        self.composer().cut_plane_bbox(stem_label)
    }

    /// See [`TransformComposer::stem_to_stem`].
    pub fn stem_to_stem(
        &self,
        origin: &ImplantConfiguration,
        target: &ImplantConfiguration,
    ) -> SchemeResult<RigidTransform> {
        debug!(
            product = self.def.product_name,
            origin = %origin.stem_label,
            target = %target.stem_label,
            "composing stem-to-stem transform"
        );
        self.composer().stem_to_stem(origin, target)
    }

    /// See [`TransformComposer::normal_trf`].
    pub fn normal_trf(&self, stem_label: ShapeLabel) -> SchemeResult<RigidTransform> {
        self.composer().normal_trf(stem_label)
    }

    /// See [`TransformComposer::offset_ff`].
    pub fn offset_ff(&self, stem_label: ShapeLabel) -> SchemeResult<Vector3<f64>> {
        self.composer().offset_ff(stem_label)
    }

    /// Builds the product's default configuration for a planning side and
    /// validates it.
    #[must_use]
    pub fn default_configuration(&self, side: AnatomSide) -> ImplantConfiguration {
        let mut config = ImplantConfiguration::new(
            side,
            self.def.default_stem_for(side),
            self.def.default_head,
        );
        config.cutplane_label = Some(self.def.cutplane_label);
        config.stem_product_name = self.def.product_name.to_owned();
        config.distal_shaft_product_name = self.def.product_name.to_owned();
        config.head_product_name = self.def.product_name.to_owned();
        config.neck_product_name = String::new();
        config.implant_side = AnatomSide::None;
        config.valid_assembly = false;

        self.fill_and_validate(&config)
    }

    /// Fills derivable fields and re-checks structural validity.
    ///
    /// Validity requires the side rule to pass, the stem and head labels to
    /// classify as stem and head, and no neck label (this family is
    /// exclusively mono-block). On success the per-part product names and
    /// the implant side are stamped; on failure every name field is left
    /// untouched and validity stays false. Pure function of the input and
    /// the product's static tables.
    #[must_use]
    pub fn fill_and_validate(&self, config: &ImplantConfiguration) -> ImplantConfiguration {
        let mut filled = config.clone();
        filled.valid_assembly = false;

        let side_ok = match self.def.side_requirement {
            SideRequirement::Free => true,
            SideRequirement::Required => filled.requested_side.is_set(),
        };
        if !side_ok {
            return filled;
        }

        if filled.cutplane_label.is_none() {
            filled.cutplane_label = Some(self.def.cutplane_label);
        }

        let classifier = self.classifier();
        let stem_ok = classifier.is_stem(filled.stem_label);
        let head_ok = classifier.is_head(filled.head_label);
        let mono_block = filled.neck_label.is_none();

        if stem_ok && head_ok && mono_block {
            filled.stem_product_name = self.def.product_name.to_owned();
            filled.distal_shaft_product_name = String::new();
            filled.head_product_name = self.def.product_name.to_owned();
            filled.neck_product_name = String::new();
            filled.implant_side = match self.def.side_stamp {
                SideStamp::None => AnatomSide::None,
                SideStamp::Requested => filled.requested_side,
            };
            filled.valid_assembly = true;
        } else {
            debug!(
                product = self.def.product_name,
                stem_ok, head_ok, mono_block, "configuration failed validation"
            );
        }

        filled
    }

    /// Steps the configuration's stem one size forward or back within its
    /// sub-range.
    ///
    /// Does **not** re-validate the result; whether the new combination is
    /// a valid assembly is the caller's question to ask.
    #[must_use]
    pub fn next_prev(&self, config: &ImplantConfiguration, forward: bool) -> ImplantConfiguration {
        let mut stepped = config.clone();
        if let Ok(label) = self.classifier().next_prev_stem(stepped.stem_label, forward) {
            stepped.stem_label = label;
        }
        stepped
    }
}
