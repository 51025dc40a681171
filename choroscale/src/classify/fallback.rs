//! Pre-baked classifications for when the data-driven path cannot run.
//!
//! A legend must always render, even when the field cannot be resolved or
//! the provider is unreachable. This module produces a fixed seven-class
//! result from compiled-in range tables, selected by the field's fallback
//! family and styled with the fill palette.

use tracing::debug;

use crate::classify::result::{ClassDescriptor, ClassificationResult, Provenance};
use crate::format::{range_label, FallbackFamily, FieldSemantics};
use crate::style::fill_entry;

/// Number of classes every fallback result contains.
pub const FALLBACK_CLASS_COUNT: usize = 7;

/// Dollar-denominated ranges, shaped for household income and home values.
const CURRENCY_RANGES: [(f64, f64); FALLBACK_CLASS_COUNT] = [
    (0.0, 35_000.0),
    (35_000.0, 50_000.0),
    (50_000.0, 75_000.0),
    (75_000.0, 100_000.0),
    (100_000.0, 150_000.0),
    (150_000.0, 200_000.0),
    (200_000.0, 500_000.0),
];

/// Percentage ranges over the 0-100 domain, denser at the low end where
/// rates and growth figures cluster.
const PERCENT_RANGES: [(f64, f64); FALLBACK_CLASS_COUNT] = [
    (0.0, 5.0),
    (5.0, 10.0),
    (10.0, 15.0),
    (15.0, 25.0),
    (25.0, 50.0),
    (50.0, 75.0),
    (75.0, 100.0),
];

/// Count-shaped ranges for populations, households, and everything else.
const COUNT_RANGES: [(f64, f64); FALLBACK_CLASS_COUNT] = [
    (0.0, 100.0),
    (100.0, 500.0),
    (500.0, 1_000.0),
    (1_000.0, 2_500.0),
    (2_500.0, 5_000.0),
    (5_000.0, 10_000.0),
    (10_000.0, 50_000.0),
];

fn ranges_for(family: FallbackFamily) -> &'static [(f64, f64); FALLBACK_CLASS_COUNT] {
    match family {
        FallbackFamily::Currency => &CURRENCY_RANGES,
        FallbackFamily::Percent => &PERCENT_RANGES,
        FallbackFamily::Count => &COUNT_RANGES,
    }
}

/// Builds the seven fallback classes for a field with the given semantics.
///
/// Labels use the field's detected value format, colors come from the fill
/// palette, and sizes are left unset.
pub fn fallback_classes(semantics: FieldSemantics) -> Vec<ClassDescriptor> {
    let format = semantics.value_format();
    let ranges = ranges_for(semantics.fallback_family());

    ranges
        .iter()
        .enumerate()
        .map(|(index, &(min_value, max_value))| ClassDescriptor {
            min_value,
            max_value,
            label: range_label(min_value, max_value, index, FALLBACK_CLASS_COUNT, &format),
            color: fill_entry(index).rgba(),
            size: None,
        })
        .collect()
}

/// Assembles a complete fallback result tagged with the reason it was taken.
///
/// The field name is whatever the engine had in hand, resolved or requested,
/// so the legend still says which column it stands in for.
pub fn fallback_result(
    field: &str,
    semantics: FieldSemantics,
    reason: impl Into<String>,
    spatially_filtered: bool,
) -> ClassificationResult {
    let reason = reason.into();
    debug!(family = ?semantics.fallback_family(), %reason, "building fallback classification");
    let classes = fallback_classes(semantics);
    ClassificationResult::new(
        classes,
        Provenance::fallback(field, reason, spatially_filtered),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn currency_fallback_formats_dollar_labels() {
        let classes = fallback_classes(FieldSemantics::Income);

        assert_eq!(classes.len(), FALLBACK_CLASS_COUNT);
        assert_eq!(classes[0].label, "Less than $35,000");
        assert_eq!(classes[2].label, "$50,000 - $75,000");
        assert_eq!(classes[6].label, "$200,000 or more");
        assert_eq!(classes[0].min_value, 0.0);
        assert_eq!(classes[6].max_value, 500_000.0);
    }

    #[test]
    fn percent_fallback_spans_the_full_percentage_domain() {
        let classes = fallback_classes(FieldSemantics::Growth);

        assert_eq!(classes[0].label, "Less than 5.0%");
        assert_eq!(classes[4].label, "25.0% - 50.0%");
        assert_eq!(classes[6].label, "75.0% or more");
        assert_eq!(classes[0].min_value, 0.0);
        assert_eq!(classes[6].max_value, 100.0);
    }

    #[test]
    fn count_fallback_uses_the_detected_format() {
        let general = fallback_classes(FieldSemantics::General);
        assert_eq!(general[0].label, "Less than 100.00");
        assert_eq!(general[6].label, "10,000.00 or more");

        let density = fallback_classes(FieldSemantics::Density);
        assert_eq!(density[0].label, "Less than 100/sq mi");
        assert_eq!(density[6].label, "10,000/sq mi or more");
    }

    #[test]
    fn ranges_are_contiguous_with_distinct_colors() {
        for semantics in [
            FieldSemantics::Income,
            FieldSemantics::Rate,
            FieldSemantics::Count,
        ] {
            let classes = fallback_classes(semantics);
            for pair in classes.windows(2) {
                assert_eq!(pair[0].max_value, pair[1].min_value);
            }

            let distinct: HashSet<String> = classes
                .iter()
                .map(|class| class.color.to_css())
                .collect();
            assert_eq!(distinct.len(), FALLBACK_CLASS_COUNT);
        }
    }

    #[test]
    fn fallback_result_carries_reason_and_zero_samples() {
        let result = fallback_result(
            "medhinc_cy",
            FieldSemantics::Income,
            "insufficient variation",
            true,
        );

        assert_eq!(result.len(), FALLBACK_CLASS_COUNT);
        assert!(result.provenance().source.is_fallback());
        assert_eq!(
            result.provenance().reason.as_deref(),
            Some("insufficient variation")
        );
        assert_eq!(result.provenance().sample_count, 0);
        assert!(result.provenance().spatially_filtered);
        assert_eq!(
            result.provenance().field_used.as_deref(),
            Some("medhinc_cy")
        );
    }
}
