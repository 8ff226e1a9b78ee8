use linkpay_common::services::{BankAccountToken, BankLinkService, BoxFuture, ItemDetails, TokenExchange};
use linkpay_common::LinkpayError;
use linkpay_config::PlaidConfig;

use crate::logic;

/// Plaid implementation of the bank-linking service.
pub struct PlaidBankLinkService {
    config: PlaidConfig,
}

impl PlaidBankLinkService {
    /// Create a new Plaid bank-linking service.
    pub fn new(config: PlaidConfig) -> Self {
        Self { config }
    }
}

impl BankLinkService for PlaidBankLinkService {
    type Error = LinkpayError;

    fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> BoxFuture<'_, TokenExchange, Self::Error> {
        // Clone so the future does not borrow the argument
        let public_token = public_token.to_string();
        Box::pin(async move {
            logic::exchange_public_token(&self.config, &public_token)
                .await
                .map_err(Into::into)
        })
    }

    fn get_item(&self, access_token: &str) -> BoxFuture<'_, ItemDetails, Self::Error> {
        let access_token = access_token.to_string();
        Box::pin(async move {
            logic::get_item(&self.config, &access_token)
                .await
                .map_err(Into::into)
        })
    }

    fn create_bank_account_token(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> BoxFuture<'_, BankAccountToken, Self::Error> {
        let access_token = access_token.to_string();
        let account_id = account_id.to_string();
        Box::pin(async move {
            logic::create_bank_account_token(&self.config, &access_token, &account_id)
                .await
                .map_err(Into::into)
        })
    }
}
