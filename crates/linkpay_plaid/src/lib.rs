pub mod error;
pub mod logic;
pub mod service;

// Re-export for the main backend
pub use error::PlaidError;
pub use logic::{api_host, create_bank_account_token, exchange_public_token, get_item};
pub use service::PlaidBankLinkService;
