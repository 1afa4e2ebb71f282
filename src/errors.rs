/*!
 * Error types for the yaptwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the remote translation API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Request exceeded its deadline
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while translating a single catalog entry
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The service returned nothing usable
    #[error("Empty response from translation service")]
    EmptyResponse,

    /// The candidate translation was rejected by the response validator
    #[error("Response rejected: {0}")]
    Rejected(String),

    /// The numbered response did not cover every requested fragment
    #[error("Incomplete batch response: expected {expected} fragments, got {received}")]
    IncompleteBatch {
        /// Number of fragments sent
        expected: usize,
        /// Number of fragments recovered from the response
        received: usize,
    },

    /// Markup could not be parsed or serialized
    #[error("Markup error: {0}")]
    Markup(String),

    /// A placeholder token survived reintegration
    #[error("Untranslated placeholder left in output: {0}")]
    ResidualToken(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translating an entry
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
