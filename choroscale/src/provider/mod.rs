//! Data providers for field statistics and value listings.
//!
//! The classification engine never reads data itself. It consumes summary
//! statistics and ordered value samples through the [`FieldStatsProvider`]
//! trait, so the same engine runs against an in-process DataFusion table, a
//! remote feature service, or a test double. [`DataFusionProvider`] is the
//! concrete implementation shipped with this crate.
//!
//! Field resolution lives outside the trait: [`resolve_field`] is a pure
//! function over the schema's field names, so every provider shares the same
//! matching behavior.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classify::GeographyContext;
use crate::error::Result;

pub mod sql;

mod datafusion;

pub use self::datafusion::{DataFusionProvider, DataFusionProviderBuilder};

/// Summary statistics for one numeric field, computed over non-null rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
    /// Number of non-null rows.
    pub count: u64,
    /// Arithmetic mean.
    pub avg: f64,
    /// Sample standard deviation. `None` when fewer than two rows exist.
    pub stddev: Option<f64>,
}

impl FieldStatistics {
    /// Returns true when the field has enough spread to classify: at least
    /// two rows, finite extremes, and a non-degenerate range.
    pub fn has_variation(&self) -> bool {
        self.count >= 2 && self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// A bounding box restricting statistics and value listings to features
/// whose centroid falls inside it. Coordinates are in the dataset's own
/// spatial reference, typically lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportFilter {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl ViewportFilter {
    /// Creates a bounding box, reordering the corners if they arrive swapped.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin: xmin.min(xmax),
            ymin: ymin.min(ymax),
            xmax: xmax.max(xmin),
            ymax: ymax.max(ymin),
        }
    }
}

/// Supplies field metadata, statistics, and value samples for one or more
/// registered datasets.
///
/// Implementations must be cheap to call repeatedly: the engine issues one
/// `field_names` call, one `field_statistics` call, and at most one
/// `field_values` call per classification request.
#[async_trait]
pub trait FieldStatsProvider: std::fmt::Debug + Send + Sync {
    /// Lists the field names available in the geography's dataset, in
    /// schema order.
    async fn field_names(&self, geography: &GeographyContext) -> Result<Vec<String>>;

    /// Computes min/max/count/avg/stddev for one numeric field, optionally
    /// restricted to a viewport.
    async fn field_statistics(
        &self,
        geography: &GeographyContext,
        field: &str,
        viewport: Option<&ViewportFilter>,
    ) -> Result<FieldStatistics>;

    /// Lists the field's non-null values in ascending order, up to the
    /// provider's row cap, optionally restricted to a viewport.
    async fn field_values(
        &self,
        geography: &GeographyContext,
        field: &str,
        viewport: Option<&ViewportFilter>,
    ) -> Result<Vec<f64>>;
}

/// Vintage suffixes that demographic schemas append to field names, as in
/// `MEDHINC_CY` (current year) and `MEDHINC_FY` (forecast year).
const VINTAGE_SUFFIXES: &[&str] = &["_cy", "_fy"];

fn strip_vintage(lower: &str) -> &str {
    for suffix in VINTAGE_SUFFIXES {
        if let Some(stripped) = lower.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped;
            }
        }
    }
    lower
}

/// Matches a requested field name against a schema's available names.
///
/// Matching runs in two passes: an exact case-insensitive comparison, then a
/// fuzzy pass that strips vintage suffixes from both sides and accepts a
/// substring match in either direction. The first hit in schema order wins,
/// and the returned name preserves the schema's casing.
///
/// ```
/// use choroscale::provider::resolve_field;
///
/// let schema = vec!["OBJECTID".to_string(), "MEDHINC_CY".to_string()];
/// assert_eq!(resolve_field("medhinc_cy", &schema).as_deref(), Some("MEDHINC_CY"));
/// assert_eq!(resolve_field("MEDHINC", &schema).as_deref(), Some("MEDHINC_CY"));
/// assert_eq!(resolve_field("totpop_cy", &schema), None);
/// ```
pub fn resolve_field(requested: &str, available: &[String]) -> Option<String> {
    let requested_lower = requested.trim().to_ascii_lowercase();
    if requested_lower.is_empty() {
        return None;
    }

    if let Some(name) = available
        .iter()
        .find(|name| name.eq_ignore_ascii_case(&requested_lower))
    {
        return Some(name.clone());
    }

    let requested_base = strip_vintage(&requested_lower).to_string();
    for name in available {
        let candidate_lower = name.to_ascii_lowercase();
        let candidate_base = strip_vintage(&candidate_lower);
        if candidate_base.is_empty() {
            continue;
        }
        if candidate_base.contains(&requested_base) || requested_base.contains(candidate_base) {
            return Some(name.clone());
        }
    }

    None
}
