//! Break computation: value ranges, class counts, and rounding.
//!
//! A "break" is one bucket of a classification. This module owns the numeric
//! half of the engine: deciding how many breaks a sample supports
//! ([`optimal_break_count`]), rounding boundary values to human-legible
//! numbers ([`rounding`]), and carving a sorted sample into contiguous
//! ranges ([`quantile_breaks`]).
//!
//! ```text
//! sample ──► optimal_break_count ──► quantile_breaks ──► Vec<BreakRange>
//!                                        │
//!                              round_break_value / round_legend_value
//! ```
//!
//! Everything here is pure and panic-free; the orchestrator in
//! [`crate::classify`] decides when these functions may be called and what
//! happens when they cannot (the fallback path).

use serde::{Deserialize, Serialize};

pub mod count;
pub mod quantile;
pub mod rounding;

pub use count::optimal_break_count;
pub use quantile::quantile_breaks;
pub use rounding::{round_break_value, round_legend_value};

use crate::format::FieldSemantics;
use rounding::round_legend_value as legend;

/// Hard ceiling on the number of classes a legend can carry.
pub const MAX_BREAK_COUNT: usize = 10;

/// Multiplier applied to the observed maximum when a field has no semantic
/// ceiling of its own.
pub const DEFAULT_DOMAIN_HEADROOM: f64 = 2.0;

/// One classification bucket: a closed numeric interval.
///
/// Consecutive ranges produced by this crate share boundaries
/// (`ranges[i].max == ranges[i + 1].min`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl BreakRange {
    /// Creates a range from its bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the range has collapsed to a single value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Whether `value` falls inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The absolute value domain a classification must cover.
///
/// The floor and ceiling are resolved once per request (see
/// [`resolve_domain`]) and are never themselves rounded afterwards: the first
/// range is pinned to the floor and the last to the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Lowest value the first range must start at.
    pub floor: f64,
    /// Highest value the last range must end at.
    pub ceiling: f64,
}

impl Domain {
    /// Creates a domain from its bounds.
    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    /// Total span of the domain.
    pub fn range(&self) -> f64 {
        self.ceiling - self.floor
    }
}

/// Resolves the absolute domain for a field from its observed extremes.
///
/// The floor is 0 unless the data dips below it. The ceiling is the field's
/// semantic cap when one applies and covers the data (100 for percentages,
/// growth rates, and ages), 0 when every observation is non-positive, and
/// otherwise a legible multiple of the observed maximum: `headroom` times the
/// maximum, legend-rounded, never below the maximum itself.
pub fn resolve_domain(
    observed_min: f64,
    observed_max: f64,
    semantics: FieldSemantics,
    headroom: f64,
) -> Domain {
    let floor = observed_min.min(0.0);
    let ceiling = if observed_max <= 0.0 {
        0.0
    } else {
        match semantics.domain_ceiling() {
            Some(cap) if observed_max <= cap => cap,
            _ => legend(observed_max * headroom).max(observed_max),
        }
    };
    Domain { floor, ceiling }
}
