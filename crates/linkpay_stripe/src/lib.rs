pub mod error;
pub mod logic;
pub mod service;

// Re-export for the main backend
pub use error::StripeError;
pub use logic::create_customer;
pub use service::StripePaymentService;
