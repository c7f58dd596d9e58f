//! Typed error handling for estate-views
//!
//! View evaluation itself never fails: missing fields resolve to empty
//! values and an unknown viewer resolves to an empty view. Errors only
//! surface where something is *configured* (a view referencing a field the
//! schema does not have) or where the data store is involved.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: malformed screen configuration or view specification
//! - [`StoreError`]: failures reported by a collection store
//!
//! # Example
//!
//! ```rust,ignore
//! use estate::prelude::*;
//!
//! match ViewSpec::builder(catalog::accounts()).sort_by("nubmer", SortDirection::Ascending).build() {
//!     Err(ConfigError::UnknownField { field, .. }) => eprintln!("typo in {}", field),
//!     Err(e) => eprintln!("Other error: {}", e),
//!     Ok(spec) => { /* ... */ }
//! }
//! ```

use std::fmt;

/// The main error type for estate-views
#[derive(Debug)]
pub enum EstateError {
    /// Configuration errors
    Config(ConfigError),

    /// Collection store errors
    Store(StoreError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for EstateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstateError::Config(e) => write!(f, "{}", e),
            EstateError::Store(e) => write!(f, "{}", e),
            EstateError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for EstateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstateError::Config(e) => Some(e),
            EstateError::Store(e) => Some(e),
            EstateError::Internal(_) => None,
        }
    }
}

impl EstateError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            EstateError::Config(e) => e.error_code(),
            EstateError::Store(e) => e.error_code(),
            EstateError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to screen configuration and view specifications
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// A view references a field the entity schema does not declare
    UnknownField {
        entity_type: String,
        field: String,
        context: String,
    },

    /// A filter was addressed by a name the view does not define
    UnknownFilter { name: String },

    /// A screen references a collection with no known schema
    UnknownCollection { collection: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::UnknownField {
                entity_type,
                field,
                context,
            } => {
                write!(
                    f,
                    "Unknown field '{}' on {} (referenced by {})",
                    field, entity_type, context
                )
            }
            ConfigError::UnknownFilter { name } => {
                write!(f, "Unknown filter: {}", name)
            }
            ConfigError::UnknownCollection { collection } => {
                write!(f, "Unknown collection: {}", collection)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::UnknownField { .. } => "UNKNOWN_FIELD",
            ConfigError::UnknownFilter { .. } => "UNKNOWN_FILTER",
            ConfigError::UnknownCollection { .. } => "UNKNOWN_COLLECTION",
        }
    }
}

impl From<ConfigError> for EstateError {
    fn from(err: ConfigError) -> Self {
        EstateError::Config(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors reported by a collection store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store has no collection with this name
    UnknownCollection { collection: String },

    /// No record with this id in the collection
    NotFound { collection: String, id: String },

    /// A lock guarding the store was poisoned by a panicking writer
    LockPoisoned { message: String },

    /// The record cannot be stored as given
    InvalidRecord { collection: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownCollection { collection } => {
                write!(f, "Unknown collection: {}", collection)
            }
            StoreError::NotFound { collection, id } => {
                write!(f, "{} with id '{}' not found", collection, id)
            }
            StoreError::LockPoisoned { message } => {
                write!(f, "Store lock poisoned: {}", message)
            }
            StoreError::InvalidRecord {
                collection,
                message,
            } => {
                write!(f, "Invalid record for {}: {}", collection, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::UnknownCollection { .. } => "UNKNOWN_COLLECTION",
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::LockPoisoned { .. } => "STORE_LOCK_POISONED",
            StoreError::InvalidRecord { .. } => "INVALID_RECORD",
        }
    }
}

impl From<StoreError> for EstateError {
    fn from(err: StoreError) -> Self {
        EstateError::Store(err)
    }
}

/// Result alias using [`EstateError`]
pub type EstateResult<T> = std::result::Result<T, EstateError>;
