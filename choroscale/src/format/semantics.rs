//! Field-semantics detection from field names.
//!
//! Dataset fields rarely announce their meaning; names like `medhinc_cy` or
//! `unemprt_cy` have to be recognized by pattern. Detection runs an ordered,
//! first-match-wins rule chain over the lower-cased name, so earlier families
//! win ties ("percentage" is a rate, not an age; "average_income" is an
//! income, not an age).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValueFormat;

/// Semantic family of a dataset field, detected from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldSemantics {
    /// Incomes, earnings, wages, per-capita income.
    Income,
    /// Home and property values.
    HomeValue,
    /// Growth and period-over-period change rates.
    Growth,
    /// Percentages, rates, and shares.
    Rate,
    /// Per-area densities.
    Density,
    /// Ages.
    Age,
    /// Dimensionless index scores (diversity, Gini, ...).
    IndexScore,
    /// Ratios and dependency measures.
    Ratio,
    /// Population, household, and housing-unit counts.
    Count,
    /// Anything unrecognized.
    General,
}

/// Which pre-baked fallback range table fits a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackFamily {
    /// Dollar-denominated fields.
    Currency,
    /// Percentage-shaped fields.
    Percent,
    /// Everything else, shaped like counts.
    Count,
}

/// Name patterns for each semantic family, compiled once.
struct SemanticPatterns {
    income: Regex,
    home_value: Regex,
    growth: Regex,
    rate: Regex,
    density: Regex,
    age: Regex,
    index_score: Regex,
    ratio: Regex,
    count: Regex,
}

impl SemanticPatterns {
    fn new() -> Self {
        Self {
            income: Regex::new(r"income|hinc|earn|wage|salar|(^|_)pci($|_)").unwrap(),
            home_value: Regex::new(r"home.?val|property.?val|house.?val|medval|avgval").unwrap(),
            growth: Regex::new(r"growth|grw|cagr|chang|chg").unwrap(),
            rate: Regex::new(r"percent|pct|rate|rt($|_|\d)").unwrap(),
            density: Regex::new(r"dens|per.?sq|sq.?mi").unwrap(),
            age: Regex::new(r"age").unwrap(),
            index_score: Regex::new(r"index|indx|idx|divers|gini").unwrap(),
            ratio: Regex::new(r"ratio|depend").unwrap(),
            count: Regex::new(r"pop($|_|\d)|population|household|hh($|_|\d)|housing|(^|_)hu($|_|\d)|units")
                .unwrap(),
        }
    }
}

static PATTERNS: Lazy<SemanticPatterns> = Lazy::new(SemanticPatterns::new);

/// Detects the semantic family of a field from its name.
///
/// Total function: unrecognized names yield [`FieldSemantics::General`].
///
/// # Examples
///
/// ```
/// use choroscale::format::{detect_semantics, FieldSemantics};
///
/// assert_eq!(detect_semantics("MEDHINC_CY"), FieldSemantics::Income);
/// assert_eq!(detect_semantics("unemprt_cy"), FieldSemantics::Rate);
/// assert_eq!(detect_semantics("mystery_column"), FieldSemantics::General);
/// ```
pub fn detect_semantics(field_name: &str) -> FieldSemantics {
    let name = field_name.to_lowercase();
    let patterns = &*PATTERNS;

    // Rule order is load-bearing: see the module docs.
    if patterns.income.is_match(&name) {
        FieldSemantics::Income
    } else if patterns.home_value.is_match(&name) {
        FieldSemantics::HomeValue
    } else if patterns.growth.is_match(&name) {
        FieldSemantics::Growth
    } else if patterns.rate.is_match(&name) {
        FieldSemantics::Rate
    } else if patterns.density.is_match(&name) {
        FieldSemantics::Density
    } else if patterns.age.is_match(&name) {
        FieldSemantics::Age
    } else if patterns.index_score.is_match(&name) {
        FieldSemantics::IndexScore
    } else if patterns.ratio.is_match(&name) {
        FieldSemantics::Ratio
    } else if patterns.count.is_match(&name) {
        FieldSemantics::Count
    } else {
        FieldSemantics::General
    }
}

/// Detects a field's display format from its name.
pub fn detect_format(field_name: &str) -> ValueFormat {
    detect_semantics(field_name).value_format()
}

impl FieldSemantics {
    /// The display format conventionally used for this family.
    pub fn value_format(&self) -> ValueFormat {
        match self {
            Self::Income | Self::HomeValue => ValueFormat::currency(),
            Self::Growth | Self::Rate => ValueFormat::percent(),
            Self::Density => ValueFormat::suffixed("/sq mi", 0),
            Self::Age => ValueFormat::suffixed(" yrs", 1),
            Self::IndexScore | Self::Count => ValueFormat::plain(0),
            Self::Ratio => ValueFormat::plain(2),
            Self::General => ValueFormat::default(),
        }
    }

    /// Which canned fallback range table to use for this family.
    pub fn fallback_family(&self) -> FallbackFamily {
        match self {
            Self::Income | Self::HomeValue => FallbackFamily::Currency,
            Self::Growth | Self::Rate => FallbackFamily::Percent,
            _ => FallbackFamily::Count,
        }
    }

    /// Natural upper bound of the value domain, when the family has one.
    ///
    /// Percentage-shaped fields and ages top out at 100; other families are
    /// open-ended.
    pub fn domain_ceiling(&self) -> Option<f64> {
        match self {
            Self::Growth | Self::Rate | Self::Age => Some(100.0),
            _ => None,
        }
    }
}
