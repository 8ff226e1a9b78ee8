use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Plaid Config ---
// Holds non-secret Plaid settings. The API secret is loaded directly from the
// PLAID_SECRET env var at call time.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlaidConfig {
    pub client_id: String,
    /// Public key handed to the client-side Link widget.
    pub public_key: String,
    /// Environment tier: "sandbox", "development" or "production".
    #[serde(default = "default_plaid_environment")]
    pub environment: String,
}

fn default_plaid_environment() -> String {
    "sandbox".to_string()
}

// --- Stripe Config ---
// The secret key is loaded directly from the STRIPE_SECRET_KEY env var.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StripeConfig {
    /// Description stored on customers created from a bank-account token.
    pub customer_description: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Optional Gateway Configurations ---
    #[serde(default)]
    pub plaid: Option<PlaidConfig>,
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
}
