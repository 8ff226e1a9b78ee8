//! Service abstractions for the external gateways.
//!
//! These traits decouple the HTTP layer from the concrete Plaid and Stripe
//! clients, which allows dependency injection and mock services in tests.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Result of exchanging a Link public token for an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExchange {
    /// Credential authorizing API calls against the linked item.
    pub access_token: String,
    /// Provider-side handle for the linked institution login.
    pub item_id: String,
}

/// Metadata for one linked item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDetails {
    pub item_id: String,
    pub institution_id: Option<String>,
}

/// A payment-provider-specific representation of a bank account, derived from
/// an access token and an account id. Single use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccountToken {
    pub token: String,
}

/// Result of creating a payment-provider customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResult {
    /// The ID of the customer record.
    pub id: String,
    /// The description stored on the customer, if any.
    pub description: Option<String>,
}

/// A trait for bank-linking service operations.
///
/// Covers the three calls this application makes against the linking
/// provider: token exchange, item metadata fetch, and minting a
/// payment-provider bank-account token.
pub trait BankLinkService: Send + Sync {
    /// Error type returned by bank-linking operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Exchange a Link public token for an access token and item id.
    fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> BoxFuture<'_, TokenExchange, Self::Error>;

    /// Fetch metadata for the item behind an access token.
    fn get_item(&self, access_token: &str) -> BoxFuture<'_, ItemDetails, Self::Error>;

    /// Mint a payment-provider bank-account token for one account under the
    /// item behind the access token.
    fn create_bank_account_token(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> BoxFuture<'_, BankAccountToken, Self::Error>;
}

/// A trait for payment service operations.
pub trait PaymentService: Send + Sync {
    /// Error type returned by payment service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a customer funded by a bank-account token.
    fn create_customer(
        &self,
        description: &str,
        bank_account_token: &str,
    ) -> BoxFuture<'_, CustomerResult, Self::Error>;
}
