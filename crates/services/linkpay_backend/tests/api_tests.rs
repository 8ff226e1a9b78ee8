//! Route-level tests driving the router with mock gateway services.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tower::ServiceExt;

use linkpay_backend::{routes, AppState};
use linkpay_common::services::{
    BankAccountToken, BankLinkService, BoxFuture, CustomerResult, ItemDetails, PaymentService,
    TokenExchange,
};
use linkpay_common::{LinkpayError, ProviderError};
use linkpay_config::{AppConfig, PlaidConfig, ServerConfig, StripeConfig};

// --- Mock services ---

/// Shared call log used to observe mock service activity from tests.
type CallLog = Arc<Mutex<Vec<String>>>;

fn sample_provider_error() -> ProviderError {
    ProviderError {
        error_type: Some("INVALID_INPUT".to_string()),
        error_code: Some("INVALID_PUBLIC_TOKEN".to_string()),
        error_message: Some("provided public token is expired".to_string()),
        display_message: None,
        request_id: Some("req-test".to_string()),
    }
}

/// Mock bank-linking gateway.
///
/// Exchanges succeed with tokens derived from the public token, so
/// `access-{pt}` / `item-{pt}` shapes are easy to assert on. Public tokens
/// starting with "slow" incur an artificial exchange delay for the
/// interleaving test.
struct MockBankLink {
    fail_exchange: bool,
    mint_delay: Duration,
    calls: CallLog,
}

impl MockBankLink {
    fn new(calls: CallLog) -> Self {
        Self {
            fail_exchange: false,
            mint_delay: Duration::ZERO,
            calls,
        }
    }

    fn failing(calls: CallLog) -> Self {
        Self {
            fail_exchange: true,
            mint_delay: Duration::ZERO,
            calls,
        }
    }

    fn with_mint_delay(calls: CallLog, mint_delay: Duration) -> Self {
        Self {
            fail_exchange: false,
            mint_delay,
            calls,
        }
    }
}

impl BankLinkService for MockBankLink {
    type Error = LinkpayError;

    fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> BoxFuture<'_, TokenExchange, Self::Error> {
        let public_token = public_token.to_string();
        Box::pin(async move {
            if public_token.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            self.calls
                .lock()
                .unwrap()
                .push(format!("exchange:{}", public_token));
            if self.fail_exchange {
                return Err(LinkpayError::Provider(sample_provider_error()));
            }
            Ok(TokenExchange {
                access_token: format!("access-{}", public_token),
                item_id: format!("item-{}", public_token),
            })
        })
    }

    fn get_item(&self, access_token: &str) -> BoxFuture<'_, ItemDetails, Self::Error> {
        let access_token = access_token.to_string();
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(format!("get_item:{}", access_token));
            Ok(ItemDetails {
                item_id: access_token.replacen("access-", "item-", 1),
                institution_id: Some("ins_109508".to_string()),
            })
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
            tokio::time::sleep(self.mint_delay).await;
            self.calls
                .lock()
                .unwrap()
                .push(format!("mint:{}:{}", access_token, account_id));
            Ok(BankAccountToken {
                token: format!("btok-{}", account_id),
            })
        })
    }
}

/// Mock payment gateway recording created customers.
struct MockPayments {
    calls: CallLog,
}

impl PaymentService for MockPayments {
    type Error = LinkpayError;

    fn create_customer(
        &self,
        description: &str,
        bank_account_token: &str,
    ) -> BoxFuture<'_, CustomerResult, Self::Error> {
        let description = description.to_string();
        let bank_account_token = bank_account_token.to_string();
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(format!("customer:{}", bank_account_token));
            Ok(CustomerResult {
                id: "cus_test".to_string(),
                description: Some(description),
            })
        })
    }
}

// --- Fixtures ---

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        plaid: Some(PlaidConfig {
            client_id: "test_client_id".to_string(),
            public_key: "test_public_key".to_string(),
            environment: "sandbox".to_string(),
        }),
        stripe: Some(StripeConfig {
            customer_description: None,
        }),
    })
}

fn build_app(bank_link: MockBankLink, calls: CallLog) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_services(
        test_config(),
        Arc::new(bank_link),
        Arc::new(MockPayments { calls }),
    ));
    (routes(state.clone()), state)
}

async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// --- Tests ---

#[tokio::test]
async fn index_renders() {
    let calls: CallLog = Arc::default();
    let (app, _) = build_app(MockBankLink::new(calls.clone()), calls);

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
    assert!(body.contains("<html"));
}

#[tokio::test]
async fn billing_renders_public_key_and_environment() {
    let calls: CallLog = Arc::default();
    let (app, _) = build_app(MockBankLink::new(calls.clone()), calls);

    let (status, body) = get(app, "/billing").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("test_public_key"));
    assert!(body.contains("sandbox"));
}

#[tokio::test]
async fn successful_exchange_returns_tokens_and_stores_them() {
    let calls: CallLog = Arc::default();
    let (app, state) = build_app(MockBankLink::new(calls.clone()), calls);

    let (status, body) = post_json(
        app,
        "/get_access_token",
        json!({"public_token": "public-1", "account_id": "acct-1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "access_token": "access-public-1",
            "item_id": "item-public-1",
            "error": null,
        })
    );

    let bundle = state.tokens.snapshot();
    assert_eq!(bundle.access_token.as_deref(), Some("access-public-1"));
    assert_eq!(bundle.item_id.as_deref(), Some("item-public-1"));
    assert_eq!(bundle.public_token.as_deref(), Some("public-1"));
    assert_eq!(bundle.account_id.as_deref(), Some("acct-1"));
}

#[tokio::test]
async fn failed_exchange_forwards_provider_error_and_leaves_store_untouched() {
    let calls: CallLog = Arc::default();
    let (app, state) = build_app(MockBankLink::failing(calls.clone()), calls);

    let before = state.tokens.snapshot();
    let (status, body) = post_json(
        app,
        "/get_access_token",
        json!({"public_token": "public-bad", "account_id": "acct-1"}),
    )
    .await;

    // Transport-level success; the payload shape is the only failure signal.
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("access_token").is_none());
    assert_eq!(body["error"]["error_code"], "INVALID_PUBLIC_TOKEN");
    assert_eq!(body["error"]["error_type"], "INVALID_INPUT");

    assert_eq!(state.tokens.snapshot(), before);
}

#[tokio::test]
async fn set_access_token_returns_item_id() {
    let calls: CallLog = Arc::default();
    let (app, state) = build_app(MockBankLink::new(calls.clone()), calls);

    let (_, exchange_body) = post_json(
        app.clone(),
        "/get_access_token",
        json!({"public_token": "public-1", "account_id": "acct-1"}),
    )
    .await;
    let access_token = exchange_body["access_token"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        app,
        "/set_access_token",
        json!({"access_token": access_token}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"item_id": "item-public-1", "error": false}));
    assert_eq!(
        state.tokens.snapshot().access_token.as_deref(),
        Some("access-public-1")
    );
}

#[tokio::test]
async fn overlapping_exchanges_last_continuation_wins() {
    let calls: CallLog = Arc::default();
    let (app, state) = build_app(MockBankLink::new(calls.clone()), calls);

    // The "slow" exchange resolves after the fast one, so its bundle must be
    // the one left in the store.
    let slow = post_json(
        app.clone(),
        "/get_access_token",
        json!({"public_token": "slow-a", "account_id": "acct-a"}),
    );
    let fast = post_json(
        app,
        "/get_access_token",
        json!({"public_token": "public-b", "account_id": "acct-b"}),
    );

    let ((slow_status, _), (fast_status, _)) = tokio::join!(slow, fast);
    assert_eq!(slow_status, StatusCode::OK);
    assert_eq!(fast_status, StatusCode::OK);

    assert_eq!(
        state.tokens.snapshot().access_token.as_deref(),
        Some("access-slow-a")
    );
}

#[tokio::test]
async fn response_does_not_wait_for_payment_subflow() {
    let calls: CallLog = Arc::default();
    let (app, _state) = build_app(
        MockBankLink::with_mint_delay(calls.clone(), Duration::from_millis(400)),
        calls.clone(),
    );

    let started = Instant::now();
    let (status, body) = post_json(
        app,
        "/get_access_token",
        json!({"public_token": "public-1", "account_id": "acct-1"}),
    )
    .await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], Value::Null);
    assert!(
        elapsed < Duration::from_millis(300),
        "response waited on the payment sub-flow: {:?}",
        elapsed
    );
    assert!(!calls.lock().unwrap().iter().any(|c| c.starts_with("customer:")));

    // The spawned task still completes and creates the customer.
    tokio::time::sleep(Duration::from_millis(700)).await;
    let recorded = calls.lock().unwrap().clone();
    assert!(recorded.contains(&"mint:access-public-1:acct-1".to_string()));
    assert!(recorded.contains(&"customer:btok-acct-1".to_string()));
}
