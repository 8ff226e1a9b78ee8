use linkpay_config::PlaidConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::env;
use tracing::{error, info};

use crate::error::PlaidError;
use linkpay_common::services::{BankAccountToken, ItemDetails, TokenExchange};
use linkpay_common::{ProviderError, HTTP_CLIENT};

// --- Data Structures ---

#[derive(Serialize, Debug)]
struct ExchangePublicTokenRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    public_token: &'a str,
}

#[derive(Deserialize, Debug)]
struct ExchangePublicTokenResponse {
    pub access_token: String,
    pub item_id: String,
    #[allow(dead_code)]
    pub request_id: Option<String>,
}

#[derive(Serialize, Debug)]
struct GetItemRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    access_token: &'a str,
}

#[derive(Deserialize, Debug)]
struct PlaidItem {
    pub item_id: String,
    pub institution_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GetItemResponse {
    pub item: PlaidItem,
    #[allow(dead_code)]
    pub request_id: Option<String>,
}

#[derive(Serialize, Debug)]
struct CreateProcessorTokenRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    access_token: &'a str,
    account_id: &'a str,
}

#[derive(Deserialize, Debug)]
struct CreateProcessorTokenResponse {
    pub stripe_bank_account_token: String,
    #[allow(dead_code)]
    pub request_id: Option<String>,
}

// --- Core Logic Functions ---

/// Resolves the API host for an environment tier.
pub fn api_host(environment: &str) -> Result<String, PlaidError> {
    match environment {
        "sandbox" | "development" | "production" => {
            Ok(format!("https://{}.plaid.com", environment))
        }
        other => Err(PlaidError::UnknownEnvironment(other.to_string())),
    }
}

/// The API secret is read at call time so a missing value surfaces at first
/// use, not at startup.
fn plaid_secret() -> Result<String, PlaidError> {
    env::var("PLAID_SECRET").map_err(|_| PlaidError::ConfigError)
}

/// POSTs a JSON body to the Plaid API and decodes the response.
///
/// Non-2xx bodies carry Plaid's error object; it is parsed and kept intact so
/// callers can forward it.
async fn post_plaid<B, R>(url: &str, body: &B) -> Result<R, PlaidError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let response = HTTP_CLIENT.post(url).json(body).send().await?;

    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        Ok(serde_json::from_str(&body_text)?)
    } else {
        let provider_error = parse_provider_error(status.as_u16(), &body_text);
        error!(status = status.as_u16(), error = ?provider_error, "[Plaid] API request failed");
        Err(PlaidError::Api(provider_error))
    }
}

/// Decodes a Plaid error body, falling back to a synthesized object when the
/// body is not the documented shape.
fn parse_provider_error(status: u16, body_text: &str) -> ProviderError {
    serde_json::from_str(body_text).unwrap_or_else(|_| ProviderError {
        error_type: None,
        error_code: Some(format!("HTTP_{}", status)),
        error_message: Some(body_text.to_string()),
        display_message: None,
        request_id: None,
    })
}

/// Exchanges a Link public token for an access token and item id.
pub async fn exchange_public_token(
    config: &PlaidConfig,
    public_token: &str,
) -> Result<TokenExchange, PlaidError> {
    let secret = plaid_secret()?;
    let url = format!("{}/item/public_token/exchange", api_host(&config.environment)?);

    let request = ExchangePublicTokenRequest {
        client_id: &config.client_id,
        secret: &secret,
        public_token,
    };

    let response: ExchangePublicTokenResponse = post_plaid(&url, &request).await?;
    info!(item_id = %response.item_id, "[Plaid] Public token exchanged");

    Ok(TokenExchange {
        access_token: response.access_token,
        item_id: response.item_id,
    })
}

/// Fetches metadata for the item behind an access token.
pub async fn get_item(
    config: &PlaidConfig,
    access_token: &str,
) -> Result<ItemDetails, PlaidError> {
    let secret = plaid_secret()?;
    let url = format!("{}/item/get", api_host(&config.environment)?);

    let request = GetItemRequest {
        client_id: &config.client_id,
        secret: &secret,
        access_token,
    };

    let response: GetItemResponse = post_plaid(&url, &request).await?;
    Ok(ItemDetails {
        item_id: response.item.item_id,
        institution_id: response.item.institution_id,
    })
}

/// Mints a Stripe bank-account token for one account under the linked item.
pub async fn create_bank_account_token(
    config: &PlaidConfig,
    access_token: &str,
    account_id: &str,
) -> Result<BankAccountToken, PlaidError> {
    let secret = plaid_secret()?;
    let url = format!(
        "{}/processor/stripe/bank_account_token/create",
        api_host(&config.environment)?
    );

    let request = CreateProcessorTokenRequest {
        client_id: &config.client_id,
        secret: &secret,
        access_token,
        account_id,
    };

    let response: CreateProcessorTokenResponse = post_plaid(&url, &request).await?;
    info!(account_id = %account_id, "[Plaid] Bank-account token minted");

    Ok(BankAccountToken {
        token: response.stripe_bank_account_token,
    })
}
