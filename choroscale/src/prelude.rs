//! Prelude for commonly used types and traits in choroscale.

pub use crate::breaks::{BreakRange, Domain};
pub use crate::classify::{
    AreaType, ClassificationEngine, ClassificationRequest, ClassificationResult, GeographyContext,
    StyleKind,
};
pub use crate::error::{ClassifyError, Result};
pub use crate::format::FieldSemantics;
pub use crate::logging::LoggingConfig;
pub use crate::provider::{DataFusionProvider, FieldStatsProvider, ViewportFilter};
pub use crate::style::{Rgba, SizeScale};
