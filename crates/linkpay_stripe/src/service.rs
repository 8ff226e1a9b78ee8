use linkpay_common::services::{BoxFuture, CustomerResult, PaymentService};
use linkpay_common::LinkpayError;
use linkpay_config::StripeConfig;

use crate::logic;

/// Stripe implementation of the payment service.
pub struct StripePaymentService {
    #[allow(dead_code)]
    config: StripeConfig,
}

impl StripePaymentService {
    /// Create a new Stripe payment service.
    pub fn new(config: StripeConfig) -> Self {
        Self { config }
    }
}

impl PaymentService for StripePaymentService {
    type Error = LinkpayError;

    fn create_customer(
        &self,
        description: &str,
        bank_account_token: &str,
    ) -> BoxFuture<'_, CustomerResult, Self::Error> {
        let description = description.to_string();
        let bank_account_token = bank_account_token.to_string();
        Box::pin(async move {
            logic::create_customer(&description, &bank_account_token)
                .await
                .map_err(Into::into)
        })
    }
}
