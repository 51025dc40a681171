//! # Choroscale - Data-Driven Map Classification for Rust
//!
//! Choroscale turns a numeric field in a tabular dataset into a renderable
//! map legend: class break ranges, human-readable labels, colors, and
//! optional marker sizes. It computes quantile breaks over the live data
//! through DataFusion, rounds them to values people can read, and formats
//! them according to what the field means (currency, percent, years, density).
//!
//! ## Overview
//!
//! Choropleth and graduated-marker maps need their data partitioned into a
//! small number of classes before they can be drawn. Choroscale owns that
//! whole pipeline, and it never leaves the caller without a legend: when the
//! field cannot be resolved, the backend errors out, or the data has no
//! variation, it serves a pre-baked fallback classification and records why
//! in the result's provenance.
//!
//! ## Quick Start
//!
//! ```rust
//! use choroscale::prelude::*;
//! use datafusion::prelude::SessionContext;
//!
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! // Register your dataset with DataFusion however you normally would.
//! let ctx = SessionContext::new();
//! // ... register a "tracts" table ...
//!
//! let provider = DataFusionProvider::new(ctx);
//! let engine = ClassificationEngine::new();
//!
//! let request = ClassificationRequest::new(
//!     "medhinc_cy",
//!     GeographyContext::new("tracts", AreaType::Tract),
//! );
//!
//! // Classification is infallible: errors route to the fallback tables.
//! let result = engine.classify(&provider, &request).await;
//! for class in result.classes() {
//!     println!("{:>24}  {}", class.label, class.color.to_css());
//! }
//! println!("{}", result.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! Values already in memory skip the provider entirely:
//!
//! ```rust
//! use choroscale::prelude::*;
//!
//! let engine = ClassificationEngine::new();
//! let values: Vec<f64> = (1..=30).map(f64::from).collect();
//! let ranges = engine.classify_local_dataset(&values, None).unwrap();
//! assert!(!ranges.is_empty() && ranges.len() <= 10);
//! ```
//!
//! ## Key Features
//!
//! ### Quantile Classification
//!
//! Breaks come from evenly spaced cuts through the sorted sample, so each
//! class holds roughly the same number of features. Interior breaks are
//! rounded by magnitude, duplicates collapse, and the count is repaired back
//! to the target by bisecting the widest class. The class count itself
//! adapts to how many features are being classified.
//!
//! ### Semantic Formatting
//!
//! Field names like `medhinc_cy` or `unemprt_cy` carry meaning. Choroscale
//! detects it and formats labels accordingly:
//!
//! - **Currency**: `"$50,000 - $75,000"`
//! - **Percent**: `"Less than 5.0%"`
//! - **Age**: `"35 - 45 years"`
//! - **Density**: `"10,000/sq mi or more"`
//!
//! ### Never-Fail Fallback
//!
//! Every classification ends in a usable legend. Transport failures,
//! unresolvable fields, and flat data all route to fixed seven-class tables
//! chosen by the field's semantics, with the reason preserved in
//! [`classify::Provenance`].
//!
//! ### Viewport Filtering
//!
//! An optional bounding box restricts statistics and sampling to the
//! features currently on screen, so the legend matches what the user sees.
//!
//! ### Pluggable Providers
//!
//! The engine talks to data through the [`provider::FieldStatsProvider`]
//! trait. The bundled [`provider::DataFusionProvider`] serves any table
//! DataFusion can register (CSV, Parquet, JSON, in-memory batches); tests
//! script their own implementations.
//!
//! ## Architecture
//!
//! - **`breaks`**: break-count selection, smart rounding, and quantile
//!   break computation
//! - **`classify`**: the orchestrating engine, geography model, fallback
//!   tables, and result types
//! - **`format`**: field semantics detection and legend label formatting
//! - **`provider`**: the data access trait, field-name resolution, and the
//!   DataFusion implementation
//! - **`style`**: color palettes and marker size interpolation
//! - **`logging`**: tracing subscriber configuration presets
//! - **`error`**: the crate-wide [`error::ClassifyError`] type
//!
//! The `test-utils` feature exposes deterministic synthetic tract fixtures
//! from `test_fixtures` for downstream integration tests.

pub mod breaks;
pub mod classify;
pub mod error;
pub mod format;
pub mod logging;
pub mod prelude;
pub mod provider;
pub mod style;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
