//! Classification results and their provenance.
//!
//! A [`ClassificationResult`] is computed fresh per request and is immutable:
//! accessors only, no mutation, no caching inside the engine. Renderers
//! consume it directly or via [`ClassificationResult::to_json`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::Rgba;

/// How a classification was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationSource {
    /// Breaks computed from the field's own distribution.
    DataDriven,
    /// Pre-baked ranges used because the data-driven path could not proceed.
    Fallback,
}

impl ClassificationSource {
    /// True for results computed from the field's distribution.
    pub fn is_data_driven(&self) -> bool {
        matches!(self, Self::DataDriven)
    }

    /// True for pre-baked fallback results.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Records how a result came to be, so callers can render an honest legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Which path produced the classes.
    pub source: ClassificationSource,
    /// The schema field the classification actually used, when one resolved.
    pub field_used: Option<String>,
    /// Rows behind the classification. Zero on the fallback path.
    pub sample_count: u64,
    /// True when a viewport filter restricted the rows considered.
    pub spatially_filtered: bool,
    /// Why the fallback path was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Provenance {
    /// Provenance for a data-driven result.
    pub fn data_driven(field_used: impl Into<String>, sample_count: u64, filtered: bool) -> Self {
        Self {
            source: ClassificationSource::DataDriven,
            field_used: Some(field_used.into()),
            sample_count,
            spatially_filtered: filtered,
            reason: None,
        }
    }

    /// Provenance for a fallback result with the reason it was taken.
    pub fn fallback(field_used: impl Into<String>, reason: impl Into<String>, filtered: bool) -> Self {
        Self {
            source: ClassificationSource::Fallback,
            field_used: Some(field_used.into()),
            sample_count: 0,
            spatially_filtered: filtered,
            reason: Some(reason.into()),
        }
    }
}

/// One renderable class: a value range, its legend label, and its styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Lower bound of the class range.
    pub min_value: f64,
    /// Upper bound of the class range.
    pub max_value: f64,
    /// Legend label, already formatted.
    pub label: String,
    /// Render color.
    pub color: Rgba,
    /// Marker size in pixels. `None` for fill styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// An ordered set of 1-10 classes plus the provenance that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    classes: Vec<ClassDescriptor>,
    provenance: Provenance,
}

impl ClassificationResult {
    pub(crate) fn new(classes: Vec<ClassDescriptor>, provenance: Provenance) -> Self {
        Self {
            classes,
            provenance,
        }
    }

    /// The classes in ascending range order.
    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    /// How this result was produced.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always false in practice; both paths produce at least one class.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Renders the result as pretty-printed JSON for hand-off to a renderer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ClassificationResult {
        let classes = vec![
            ClassDescriptor {
                min_value: 0.0,
                max_value: 50.0,
                label: "Less than 50".to_string(),
                color: Rgba::new(25, 118, 210, 0.8),
                size: Some(8),
            },
            ClassDescriptor {
                min_value: 50.0,
                max_value: 100.0,
                label: "50 or more".to_string(),
                color: Rgba::new(229, 57, 53, 0.8),
                size: Some(32),
            },
        ];
        ClassificationResult::new(classes, Provenance::data_driven("medhinc_cy", 120, false))
    }

    #[test]
    fn accessors_expose_classes_and_provenance() {
        let result = sample_result();
        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.classes()[0].label, "Less than 50");
        assert_eq!(
            result.provenance().field_used.as_deref(),
            Some("medhinc_cy")
        );
        assert!(result.provenance().source.is_data_driven());
    }

    #[test]
    fn source_serializes_kebab_case() {
        let json = sample_result().to_json().unwrap();
        assert!(json.contains("\"source\": \"data-driven\""));

        let fallback = ClassificationResult::new(
            vec![],
            Provenance::fallback("medhinc_cy", "field not found", false),
        );
        let json = fallback.to_json().unwrap();
        assert!(json.contains("\"source\": \"fallback\""));
        assert!(json.contains("\"reason\": \"field not found\""));
    }

    #[test]
    fn absent_reason_and_size_are_omitted_from_json() {
        let json = sample_result().to_json().unwrap();
        assert!(!json.contains("\"reason\""));

        let mut classes = sample_result().classes().to_vec();
        for class in &mut classes {
            class.size = None;
        }
        let result =
            ClassificationResult::new(classes, Provenance::data_driven("medhinc_cy", 120, false));
        assert!(!result.to_json().unwrap().contains("\"size\""));
    }

    #[test]
    fn json_round_trips() {
        let result = sample_result();
        let json = result.to_json().unwrap();
        let parsed: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
