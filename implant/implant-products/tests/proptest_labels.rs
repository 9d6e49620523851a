//! Property-based tests over randomly drawn labels and families.
//!
//! Run with: cargo test -p implant-products --test proptest_labels

use implant_products::ProductRegistry;
use implant_types::ShapeLabel;
use proptest::prelude::*;

fn registry() -> ProductRegistry {
    ProductRegistry::standard()
}

/// A random label drawn from a window around every product's block,
/// deliberately including foreign integers.
fn arb_label() -> impl Strategy<Value = ShapeLabel> {
    let blocks = [
        60_000u32..61_000,
        100_700..101_000,
        130_400..130_700,
        160_000..161_500,
        310_700..311_000,
    ];
    prop::sample::select(blocks.to_vec())
        .prop_flat_map(|range| range)
        .prop_map(ShapeLabel::new)
}

proptest! {
    /// Classification is a pure function: repeated calls agree, and the
    /// predicate views match the classified kind.
    #[test]
    fn classification_is_stable(label in arb_label()) {
        let registry = registry();
        for scheme in registry.iter() {
            let first = scheme.classify(label);
            let second = scheme.classify(label);
            prop_assert_eq!(first, second);
            prop_assert_eq!(
                scheme.classifier().is_stem(label),
                matches!(first, implant_scheme::LabelKind::Stem(_))
            );
        }
    }

    /// Stepping forward then back returns to the start unless a family
    /// boundary clamped the first step.
    #[test]
    fn next_then_prev_returns_or_clamps(label in arb_label()) {
        let registry = registry();
        for scheme in registry.iter() {
            let classifier = scheme.classifier();
            if !classifier.is_stem(label) {
                continue;
            }
            let stepped = classifier.next_prev_stem(label, true)?;
            let back = classifier.next_prev_stem(stepped, false)?;
            if stepped == label {
                // Clamped at the top of the family; stepping back may move.
                let range = classifier.sub_range_of(label).unwrap();
                prop_assert!(range.contains(back));
            } else {
                prop_assert_eq!(back, label);
            }
        }
    }

    /// Similar-size resolution never fails for stem sources and in-product
    /// targets, and never invents labels outside the product block.
    #[test]
    fn similar_label_stays_inside_the_product(label in arb_label(), pick in 0usize..8) {
        let registry = registry();
        for scheme in registry.iter() {
            if !scheme.classifier().is_stem(label) {
                continue;
            }
            let ranges = &scheme.definition().sub_ranges;
            let target = &ranges[pick % ranges.len()];
            let resolved = scheme.similar_label(label, target.marker)?;
            prop_assert!(scheme.in_range(resolved));
        }
    }

    /// The registry finds at most one owner per label, and ownership is
    /// consistent with the owner's own block test.
    #[test]
    fn registry_ownership_is_consistent(label in arb_label()) {
        let registry = registry();
        let owners = registry.iter().filter(|s| s.in_range(label)).count();
        prop_assert!(owners <= 1);
        match registry.find(label) {
            Some(scheme) => prop_assert!(scheme.in_range(label)),
            None => prop_assert_eq!(owners, 0),
        }
    }
}
