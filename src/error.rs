//! Error types for querygen.

use thiserror::Error;

/// The main error type for query generation.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The operator has no mapping for the active dialect.
    #[error("Unsupported operator for {dialect}: {operator}")]
    UnsupportedOperator {
        operator: String,
        dialect: &'static str,
    },

    /// The requested clause or option cannot be expressed in the active dialect.
    #[error("Unsupported feature for {dialect}: {feature}")]
    UnsupportedFeature {
        feature: String,
        dialect: &'static str,
    },

    /// The descriptor has a malformed shape.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Create an unsupported operator error.
    pub fn operator(operator: impl Into<String>, dialect: &'static str) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
            dialect,
        }
    }

    /// Create an unsupported feature error.
    pub fn feature(feature: impl Into<String>, dialect: &'static str) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            dialect,
        }
    }

    /// Create an invalid descriptor error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }
}

/// Result type alias for query generation.
pub type QueryResult<T> = Result<T, QueryError>;
