use axum::{
    extract::State,
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use linkpay_common::{IntoHttpResponse, LinkpayError};

use crate::app_state::AppState;
use crate::pages;

/// Description stored on customers when none is configured.
const DEFAULT_CUSTOMER_DESCRIPTION: &str = "Customer created using Stripe + Plaid integration";

// --- Request Payloads ---

#[derive(Deserialize, Debug)]
pub struct GetAccessTokenRequest {
    pub public_token: String,
    pub account_id: String,
}

#[derive(Deserialize, Debug)]
pub struct SetAccessTokenRequest {
    pub access_token: String,
}

// --- Handlers ---

/// GET / - static landing page.
pub async fn index_handler() -> Html<&'static str> {
    Html(pages::INDEX_PAGE)
}

/// GET /billing - Link widget page with public key and environment injected.
pub async fn billing_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.config.plaid.as_ref() {
        Some(plaid) => Html(pages::render_billing(&plaid.public_key, &plaid.environment))
            .into_response(),
        None => LinkpayError::ConfigError("Plaid configuration not loaded".to_string())
            .into_http_response(),
    }
}

/// POST /get_access_token - exchange token flow.
///
/// Exchanges a Link public token for an access token, stores the session
/// bundle, then mints a bank-account token and creates a payment customer in
/// a spawned task whose result is logged but never surfaced: the JSON
/// response does not wait on it.
///
/// A failed exchange answers 200 with `{"error": ...}` and no token fields,
/// matching what Link's client-side callback expects.
pub async fn get_access_token_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GetAccessTokenRequest>,
) -> Response {
    let Some(bank_link) = state.bank_link.clone() else {
        return Json(json!({ "error": "bank-linking service not configured" })).into_response();
    };

    let exchange = match bank_link.exchange_public_token(&payload.public_token).await {
        Ok(exchange) => exchange,
        Err(err) => {
            error!(error = ?err, "Public token exchange failed");
            return Json(json!({ "error": error_body(&err) })).into_response();
        }
    };

    info!(item_id = %exchange.item_id, "Public token exchanged");
    state.tokens.store_exchange(
        &payload.public_token,
        &payload.account_id,
        &exchange.access_token,
        &exchange.item_id,
    );

    // Fire and forget: the response must not wait on the payment sub-flow.
    let payments = state.payments.clone();
    let description = state
        .config
        .stripe
        .as_ref()
        .and_then(|stripe| stripe.customer_description.clone())
        .unwrap_or_else(|| DEFAULT_CUSTOMER_DESCRIPTION.to_string());
    let access_token = exchange.access_token.clone();
    let account_id = payload.account_id.clone();
    tokio::spawn(async move {
        match bank_link
            .create_bank_account_token(&access_token, &account_id)
            .await
        {
            Ok(bank_token) => {
                match payments.create_customer(&description, &bank_token.token).await {
                    Ok(customer) => {
                        info!(customer_id = %customer.id, "Payment customer created")
                    }
                    Err(err) => error!(error = ?err, "Customer creation failed"),
                }
            }
            Err(err) => error!(error = ?err, "Bank-account token mint failed"),
        }
    });

    Json(json!({
        "access_token": exchange.access_token,
        "item_id": exchange.item_id,
        "error": null,
    }))
    .into_response()
}

/// POST /set_access_token - register a previously obtained access token.
///
/// Stores the token, then fetches item metadata. A fetch failure fails
/// closed with a status-coded JSON error body.
pub async fn set_access_token_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetAccessTokenRequest>,
) -> Response {
    let Some(bank_link) = state.bank_link.clone() else {
        return LinkpayError::ConfigError("bank-linking service not configured".to_string())
            .into_http_response();
    };

    state.tokens.store_access_token(&payload.access_token);

    match bank_link.get_item(&payload.access_token).await {
        Ok(item) => Json(json!({ "item_id": item.item_id, "error": false })).into_response(),
        Err(err) => {
            error!(error = ?err, "Item metadata fetch failed");
            err.into_http_response()
        }
    }
}

/// Provider errors are forwarded structurally, everything else as a message.
fn error_body(err: &LinkpayError) -> serde_json::Value {
    match err.provider_error() {
        Some(provider) => json!(provider),
        None => json!(err.to_string()),
    }
}
