use serde::Deserialize;
use std::env;
use tracing::{error, info};

use crate::error::StripeError;
use linkpay_common::services::CustomerResult;
use linkpay_common::HTTP_CLIENT;

const CUSTOMERS_API_URL: &str = "https://api.stripe.com/v1/customers";

// --- Data Structures ---

/// Customer object returned by the Stripe API. Only the fields this
/// application reads are decoded.
#[derive(Deserialize, Debug)]
struct StripeCustomerApiResponse {
    pub id: String,
    #[allow(dead_code)]
    pub object: String, // "customer"
    pub description: Option<String>,
    #[allow(dead_code)]
    pub default_source: Option<String>,
}

// --- Core Logic Function ---

/// The secret key is read at call time so a missing value surfaces at first
/// use, not at startup.
fn stripe_secret_key() -> Result<String, StripeError> {
    env::var("STRIPE_SECRET_KEY").map_err(|_| StripeError::ConfigError)
}

/// Creates a Stripe customer funded by a bank-account token.
pub async fn create_customer(
    description: &str,
    bank_account_token: &str,
) -> Result<CustomerResult, StripeError> {
    let stripe_secret_key = stripe_secret_key()?;

    let form_body: Vec<(&str, &str)> = vec![
        ("description", description),
        ("source", bank_account_token),
    ];

    let response = HTTP_CLIENT
        .post(CUSTOMERS_API_URL)
        .basic_auth(stripe_secret_key, None::<&str>)
        .form(&form_body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        let customer: StripeCustomerApiResponse = serde_json::from_str(&body_text)?;
        info!(customer_id = %customer.id, "[Stripe] Customer created");
        Ok(CustomerResult {
            id: customer.id,
            description: customer.description,
        })
    } else {
        let error_message = extract_error_message(&body_text);
        error!(
            status = status.as_u16(),
            message = %error_message,
            "[Stripe] Customer creation failed"
        );
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message: error_message,
        })
    }
}

/// Pulls `error.message` out of a Stripe error body, falling back to the raw
/// body.
fn extract_error_message(body_text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or(body_text)
            .to_string(),
        Err(_) => body_text.to_string(),
    }
}
