use std::sync::Arc;

use linkpay_common::services::{BankLinkService, PaymentService};
use linkpay_common::LinkpayError;
use linkpay_config::AppConfig;
use linkpay_plaid::PlaidBankLinkService;
use linkpay_stripe::StripePaymentService;

use crate::token_store::TokenStore;

/// Application state shared across all routes.
///
/// Gateway services are held as trait objects so tests can inject mocks
/// through [`AppState::with_services`].
#[derive(Clone)]
pub struct AppState {
    /// The application configuration.
    pub config: Arc<AppConfig>,

    /// Bank-linking gateway. None when the plaid config section is absent;
    /// routes that need it then report a configuration error at call time.
    pub bank_link: Option<Arc<dyn BankLinkService<Error = LinkpayError>>>,

    /// Payment gateway. Always constructed; its secret key is read from the
    /// environment at call time, so a missing key fails on first use.
    pub payments: Arc<dyn PaymentService<Error = LinkpayError>>,

    /// Process-local store for the current linking session.
    pub tokens: Arc<TokenStore>,
}

impl AppState {
    /// Create a new AppState backed by the real Plaid and Stripe gateways.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let bank_link = config.plaid.clone().map(|plaid_config| {
            Arc::new(PlaidBankLinkService::new(plaid_config))
                as Arc<dyn BankLinkService<Error = LinkpayError>>
        });

        let payments = Arc::new(StripePaymentService::new(
            config.stripe.clone().unwrap_or_default(),
        )) as Arc<dyn PaymentService<Error = LinkpayError>>;

        Self {
            config,
            bank_link,
            payments,
            tokens: Arc::new(TokenStore::default()),
        }
    }

    /// Create an AppState with explicit service instances. Used by tests.
    pub fn with_services(
        config: Arc<AppConfig>,
        bank_link: Arc<dyn BankLinkService<Error = LinkpayError>>,
        payments: Arc<dyn PaymentService<Error = LinkpayError>>,
    ) -> Self {
        Self {
            config,
            bank_link: Some(bank_link),
            payments,
            tokens: Arc::new(TokenStore::default()),
        }
    }
}
