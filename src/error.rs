//! Error types for ipa-atlas.

use thiserror::Error;

/// ipa-atlas error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtlasError {
    /// Referenced phoneme symbol does not exist in the catalog
    #[error("phoneme not found in catalog: '{symbol}'")]
    NotFound { symbol: char },

    /// A filter referenced an unknown feature field name
    #[error("unknown feature field: '{field}'")]
    InvalidFeature { field: String },

    /// A numeric parameter is outside its valid domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for ipa-atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
