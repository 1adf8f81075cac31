//! Client configuration shared by the API clients.

use std::sync::Arc;

use crate::token::{DiskTokenStore, TokenStore};

/// Default API base path when nothing else is configured.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Connection settings and token storage for the API clients.
///
/// Cloning is cheap: the reqwest client and token store are shared.
#[derive(Clone)]
pub struct Configuration {
    pub base_path: String,
    pub client: reqwest::Client,
    pub tokens: Arc<dyn TokenStore>,
}

impl Configuration {
    /// Create a configuration from the environment.
    ///
    /// Environment variables:
    /// - `REZEPTBUCH_API_URL`: overrides the API base path
    pub fn new() -> Self {
        let base_path =
            std::env::var("REZEPTBUCH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_PATH.to_string());
        Self::with_base_path(base_path)
    }

    /// Create a configuration for a specific base path.
    pub fn with_base_path(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            client: reqwest::Client::new(),
            tokens: Arc::new(DiskTokenStore::default()),
        }
    }

    /// Replace the token store. Useful for tests and ephemeral sessions.
    pub fn with_token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = tokens;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
