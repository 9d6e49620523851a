//! Similar-size resolution across sub-ranges.

use implant_types::ShapeLabel;

use crate::classify::{LabelClassifier, LabelKind};
use crate::definition::{OffsetRule, ProductDefinition};
use crate::error::{SchemeError, SchemeResult};

/// Resolves the "equivalent size" of a stem in another sub-range.
///
/// Resolution is rule-table driven: identity, clamped shift or explicit
/// remap per authored `(source, target)` pair. Pairs without a rule but with
/// an entry in the product's chain table resolve recursively through the
/// enumerated intermediate families; everything else falls back to keeping
/// the offset, clamped into the target family.
///
/// When the exact size has no correspondent in the target family (barred
/// extremes), the source label is returned unchanged - the explicit "no
/// similar size exists" signal. That case is policy, not an error.
#[derive(Debug, Clone, Copy)]
pub struct SimilarLabelResolver<'a> {
    def: &'a ProductDefinition,
}

impl<'a> SimilarLabelResolver<'a> {
    /// Creates a resolver over `def`.
    #[must_use]
    pub fn new(def: &'a ProductDefinition) -> Self {
        Self { def }
    }

    /// The most similar label to `label` within the sub-range named by
    /// `target_marker`.
    ///
    /// `label` must name a stem or a sub-range marker of this product line;
    /// `target_marker` must name one of its sub-ranges.
    pub fn similar_label(
        &self,
        label: ShapeLabel,
        target_marker: ShapeLabel,
    ) -> SchemeResult<ShapeLabel> {
        let target_index = self
            .def
            .range_index_of_marker(target_marker)
            .ok_or(SchemeError::UnknownSubRange {
                marker: target_marker,
            })?;
        let target = &self.def.sub_ranges[target_index];

        let classifier = LabelClassifier::new(self.def);
        let (source_index, offset) = match classifier.classify(label) {
            LabelKind::Stem(stem) => (stem.range_index, stem.offset),
            // A sub-range marker stands for its family at offset 0.
            LabelKind::RangeMarker => match self.def.range_index_of_marker(label) {
                Some(index) => (index, 0),
                None => return Err(SchemeError::NotAStem { label }),
            },
            _ => return Err(SchemeError::NotAStem { label }),
        };
        let source_marker = self.def.sub_ranges[source_index].marker;

        if let Some(rule) = self.def.similar_rule(source_marker, target_marker) {
            if rule.barred.contains(&offset) {
                return Ok(label);
            }
            let adjusted = match &rule.rule {
                OffsetRule::Identity => i64::from(offset),
                OffsetRule::Shift(delta) => i64::from(offset) + i64::from(*delta),
                OffsetRule::Remap(map) => map
                    .iter()
                    .find(|(from, _)| *from == offset)
                    .map_or(i64::from(offset), |(_, to)| i64::from(*to)),
            };
            return Ok(target.label_at(clamp_offset(adjusted, target.max_offset)));
        }

        if let Some(chain) = self.def.chain(source_marker, target_marker) {
            // Walk the enumerated intermediates; each hop is itself a
            // direct rule of the product. Chain anchors matter only for
            // transform composition - size resolution always advances from
            // the source end.
            let mut current = label;
            for hop in &chain.hops {
                current = self.similar_label(current, hop.range)?;
            }
            return self.similar_label(current, target_marker);
        }

        Ok(target.label_at(clamp_offset(i64::from(offset), target.max_offset)))
    }
}

fn clamp_offset(offset: i64, max_offset: u32) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        offset.clamp(0, i64::from(max_offset)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::tests_fixture::two_family_product;

    #[test]
    fn test_self_mapping_is_identity() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        for range in &def.sub_ranges {
            for offset in 0..=range.max_offset {
                let label = range.label_at(offset);
                assert_eq!(resolver.similar_label(label, range.marker).unwrap(), label);
            }
        }
    }

    #[test]
    fn test_shift_rule_with_clamp() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let lat = &def.sub_ranges[1];

        // STD size 5 -> LAT size 4.
        assert_eq!(
            resolver.similar_label(std.label_at(5), lat.marker).unwrap(),
            lat.label_at(4)
        );
        // LAT size 8 -> STD size 9.
        assert_eq!(
            resolver.similar_label(lat.label_at(8), std.marker).unwrap(),
            std.label_at(9)
        );
    }

    #[test]
    fn test_barred_extremes_return_source() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let lat = &def.sub_ranges[1];

        for barred in [0, 10] {
            let source = std.label_at(barred);
            assert_eq!(resolver.similar_label(source, lat.marker).unwrap(), source);
        }
    }

    #[test]
    fn test_remap_rule() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let sn = &def.sub_ranges[2];

        assert_eq!(
            resolver.similar_label(std.label_at(9), sn.marker).unwrap(),
            sn.label_at(10)
        );
        // Unmapped offsets carry over unchanged.
        assert_eq!(
            resolver.similar_label(std.label_at(4), sn.marker).unwrap(),
            sn.label_at(4)
        );
    }

    #[test]
    fn test_round_trip_does_not_drift() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let lat = &def.sub_ranges[1];

        for offset in 1..=9 {
            let there = resolver.similar_label(std.label_at(offset), lat.marker).unwrap();
            let back = resolver.similar_label(there, std.marker).unwrap();
            assert_eq!(back, std.label_at(offset));
        }
    }

    #[test]
    fn test_chained_resolution_through_intermediate() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let lat = &def.sub_ranges[1];
        let sn = &def.sub_ranges[2];

        // SN -> LAT has no direct rule: SN 5 -> STD 5 -> LAT 4.
        assert_eq!(
            resolver.similar_label(sn.label_at(5), lat.marker).unwrap(),
            lat.label_at(4)
        );
        // And the remap propagates through: SN 10 -> STD 9 -> LAT 8.
        assert_eq!(
            resolver.similar_label(sn.label_at(10), lat.marker).unwrap(),
            lat.label_at(8)
        );
    }

    #[test]
    fn test_range_marker_resolves_at_offset_zero() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let sn = &def.sub_ranges[2];

        assert_eq!(
            resolver.similar_label(std.marker, sn.marker).unwrap(),
            sn.label_at(0)
        );
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let std = &def.sub_ranges[0];
        let err = resolver
            .similar_label(std.label_at(0), ShapeLabel::new(1))
            .unwrap_err();
        assert_eq!(err, SchemeError::UnknownSubRange { marker: ShapeLabel::new(1) });
    }

    #[test]
    fn test_head_label_source_is_an_error() {
        let def = two_family_product();
        let resolver = SimilarLabelResolver::new(&def);
        let err = resolver
            .similar_label(def.default_head, def.sub_ranges[0].marker)
            .unwrap_err();
        assert_eq!(
            err,
            SchemeError::NotAStem {
                label: def.default_head
            }
        );
    }
}
