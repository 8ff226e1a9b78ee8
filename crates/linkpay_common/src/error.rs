use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error object returned by the bank-linking provider.
///
/// Plaid returns this shape as the body of any non-2xx response. It is kept
/// intact end to end so the HTTP layer can forward it to the caller verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderError {
    pub error_type: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub display_message: Option<String>,
    pub request_id: Option<String>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.error_code.as_deref().unwrap_or("UNKNOWN"),
            self.error_message.as_deref().unwrap_or("no message")
        )
    }
}

/// The base error type shared across all linkpay crates.
///
/// Gateway crates define their own error enums and convert them into this
/// type at the service boundary via `From` impls.
#[derive(Error, Debug)]
pub enum LinkpayError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Structured error returned by the bank-linking provider
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LinkpayError {
    /// The provider error object, when this error carries one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            LinkpayError::Provider(err) => Some(err),
            _ => None,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for LinkpayError {
    fn status_code(&self) -> u16 {
        match self {
            LinkpayError::HttpError(_) => 500,
            LinkpayError::ParseError(_) => 400,
            LinkpayError::ConfigError(_) => 500,
            LinkpayError::Provider(_) => 502,
            LinkpayError::ExternalServiceError { .. } => 502,
            LinkpayError::InternalError(_) => 500,
        }
    }
}

/// Creates an external service error.
pub fn external_service_error(
    service_name: impl Into<String>,
    message: impl Into<String>,
) -> LinkpayError {
    LinkpayError::ExternalServiceError {
        service_name: service_name.into(),
        message: message.into(),
    }
}

// Common error conversions
impl From<reqwest::Error> for LinkpayError {
    fn from(err: reqwest::Error) -> Self {
        LinkpayError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LinkpayError {
    fn from(err: serde_json::Error) -> Self {
        LinkpayError::ParseError(err.to_string())
    }
}
