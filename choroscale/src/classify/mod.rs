//! Field classification: the orchestrator and everything it assembles.
//!
//! [`ClassificationEngine::classify`] drives the full pipeline: resolve the
//! requested field against the provider's schema, fetch statistics, compute
//! quantile breaks sized by the sample count, then label and style each
//! class. When any step cannot proceed the engine swaps in the pre-baked
//! [`fallback`] tables instead of failing, so a legend always renders.
//!
//! [`ClassificationEngine::classify_local_dataset`] is the direct path for
//! caller-supplied values, returning bare [`BreakRange`]s with no styling.
//!
//! [`BreakRange`]: crate::breaks::BreakRange

pub mod engine;
pub mod fallback;
pub mod geography;
pub mod result;

pub use engine::{
    ClassificationEngine, ClassificationEngineBuilder, ClassificationRequest, StyleKind,
};
pub use fallback::{fallback_classes, fallback_result, FALLBACK_CLASS_COUNT};
pub use geography::{AreaType, GeographyContext};
pub use result::{ClassDescriptor, ClassificationResult, ClassificationSource, Provenance};
