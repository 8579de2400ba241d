// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the expansion crate.
//!
//! This module defines the error types that can occur while parsing a document,
//! expanding its variable references, or decoding the expanded result.
//! All errors use `thiserror` for proper error handling and conversion.

use thiserror::Error;

/// The main error type for expansion operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use cfgexpand::domain::errors::ExpandError;
///
/// fn require_host() -> Result<String, ExpandError> {
///     Err(ExpandError::RequiredVariable {
///         name: "DB_HOST".to_string(),
///         message: "is not set or empty".to_string(),
///     })
/// }
///
/// assert!(require_host().unwrap_err().to_string().contains("DB_HOST"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExpandError {
    /// The raw text could not be parsed into a document tree.
    #[error("Failed to parse document: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A `${NAME:?message}` reference was unset or empty.
    #[error("environment variable \"{name}\" {message}")]
    RequiredVariable {
        /// The variable that was required
        name: String,
        /// The message supplied in the reference, or the default one
        message: String,
    },

    /// A `${NAME:=default}` reference could not write its default back.
    #[error("failed to set env var {name}: {message}")]
    EnvironmentWrite {
        /// The variable being assigned
        name: String,
        /// Why the write was rejected
        message: String,
    },

    /// References were still present once the resolution budget was spent.
    ///
    /// Only raised when the expander runs in strict mode.
    #[error("unresolved variable reference after {passes} passes: {text}")]
    UnresolvedReference {
        /// The scalar text as it stood when the budget ran out
        text: String,
        /// The number of passes performed
        passes: usize,
    },

    /// The input exceeded the maximum accepted document size.
    #[error("Configuration document too large: {size} bytes (max {max} bytes)")]
    InputTooLarge {
        /// The size of the rejected input
        size: u64,
        /// The maximum accepted size
        max: u64,
    },

    /// The expanded document did not fit the destination type.
    #[error("Failed to decode document: {0}")]
    DecodeError(#[from] serde_yaml::Error),

    /// An I/O error occurred while reading input.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExpandError {
    /// Creates a `ParseError` wrapping an underlying parser error.
    pub fn parse<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ExpandError::ParseError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Returns the variable name this error is about, if any.
    pub fn variable(&self) -> Option<&str> {
        match self {
            ExpandError::RequiredVariable { name, .. }
            | ExpandError::EnvironmentWrite { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A specialized Result type for expansion operations.
pub type Result<T> = std::result::Result<T, ExpandError>;
