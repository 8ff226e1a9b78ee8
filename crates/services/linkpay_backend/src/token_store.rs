//! Process-local storage for the most recently linked session.
//!
//! The original design holds one token bundle per process with no isolation
//! between callers: a second linking flow overwrites the first, last write
//! wins. That behavior is kept, but behind a mutex instead of bare globals.

use std::sync::Mutex;

/// The four slots tracked for the current linking session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBundle {
    pub access_token: Option<String>,
    pub public_token: Option<String>,
    pub item_id: Option<String>,
    pub account_id: Option<String>,
}

/// Mutex-guarded single-slot token store.
#[derive(Debug, Default)]
pub struct TokenStore {
    inner: Mutex<TokenBundle>,
}

impl TokenStore {
    /// Records a completed public-token exchange, replacing all four slots.
    pub fn store_exchange(
        &self,
        public_token: &str,
        account_id: &str,
        access_token: &str,
        item_id: &str,
    ) {
        let mut bundle = self.inner.lock().expect("token store mutex poisoned");
        *bundle = TokenBundle {
            access_token: Some(access_token.to_string()),
            public_token: Some(public_token.to_string()),
            item_id: Some(item_id.to_string()),
            account_id: Some(account_id.to_string()),
        };
    }

    /// Records a caller-supplied access token, leaving the other slots as-is.
    pub fn store_access_token(&self, access_token: &str) {
        let mut bundle = self.inner.lock().expect("token store mutex poisoned");
        bundle.access_token = Some(access_token.to_string());
    }

    /// Returns a copy of the current bundle.
    pub fn snapshot(&self) -> TokenBundle {
        self.inner
            .lock()
            .expect("token store mutex poisoned")
            .clone()
    }
}
