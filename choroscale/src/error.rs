//! Error types for the classification engine and its data providers.

use thiserror::Error;

/// Result type for provider and classification operations.
pub type Result<T> = std::result::Result<T, ClassifyError>;

/// Errors that can occur while resolving fields, querying a provider, or
/// preparing classification inputs.
///
/// None of these surface from [`classify`](crate::classify::ClassificationEngine::classify):
/// the engine absorbs every variant into the fallback path and preserves the
/// display text in the result's provenance. They are returned directly only
/// by provider implementations and serialization helpers.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The requested field has no match in the dataset schema.
    #[error("Field '{requested}' not found in dataset schema")]
    FieldNotFound {
        /// The field name as the caller supplied it.
        requested: String,
    },

    /// DataFusion query execution error.
    #[error("Query execution failed: {0}")]
    QueryExecution(#[from] datafusion::error::DataFusionError),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    ArrowComputation(#[from] arrow::error::ArrowError),

    /// An identifier destined for SQL interpolation failed validation.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The provider returned no usable numeric values.
    #[error("No numeric data available for field '{field}'")]
    NoData {
        /// The resolved field the query ran against.
        field: String,
    },

    /// A query returned a result shape the provider could not interpret.
    #[error("Malformed query result: {0}")]
    MalformedResult(String),

    /// Serialization error when rendering results as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with a custom message.
    #[error("{0}")]
    Custom(String),
}

impl ClassifyError {
    /// Creates a field resolution error for the given requested name.
    pub fn field_not_found(requested: impl Into<String>) -> Self {
        Self::FieldNotFound {
            requested: requested.into(),
        }
    }

    /// Creates a no-data error for the given field.
    pub fn no_data(field: impl Into<String>) -> Self {
        Self::NoData {
            field: field.into(),
        }
    }

    /// Creates a malformed-result error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResult(msg.into())
    }

    /// Creates a custom error with the given message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}
