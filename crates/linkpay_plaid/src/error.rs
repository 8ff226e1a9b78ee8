use linkpay_common::{HttpStatusCode, LinkpayError, ProviderError};
use thiserror::Error;

/// Plaid-specific error types.
#[derive(Error, Debug)]
pub enum PlaidError {
    /// Error occurred during a Plaid API request
    #[error("Plaid API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Structured error returned by the Plaid API
    #[error("Plaid API returned an error: {0}")]
    Api(ProviderError),

    /// Error parsing a Plaid API response
    #[error("Failed to parse Plaid API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Plaid configuration
    #[error("Plaid configuration missing or incomplete")]
    ConfigError,

    /// Environment tier not one of sandbox/development/production
    #[error("Unknown Plaid environment tier: {0}")]
    UnknownEnvironment(String),
}

/// Convert PlaidError to LinkpayError
impl From<PlaidError> for LinkpayError {
    fn from(err: PlaidError) -> Self {
        match err {
            PlaidError::RequestError(e) => {
                LinkpayError::HttpError(format!("Plaid request error: {}", e))
            }
            PlaidError::Api(provider) => LinkpayError::Provider(provider),
            PlaidError::ParseError(e) => {
                LinkpayError::ParseError(format!("Plaid response parse error: {}", e))
            }
            PlaidError::ConfigError => {
                LinkpayError::ConfigError("Plaid configuration missing or incomplete".to_string())
            }
            PlaidError::UnknownEnvironment(tier) => {
                LinkpayError::ConfigError(format!("Unknown Plaid environment tier: {}", tier))
            }
        }
    }
}

impl HttpStatusCode for PlaidError {
    fn status_code(&self) -> u16 {
        match self {
            PlaidError::RequestError(_) => 500,
            PlaidError::Api(_) => 502,
            PlaidError::ParseError(_) => 400,
            PlaidError::ConfigError => 500,
            PlaidError::UnknownEnvironment(_) => 500,
        }
    }
}
