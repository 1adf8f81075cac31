//! HTTP clients for the backend API.
//!
//! One operation per backend endpoint. Uniform contract: attach the
//! bearer token when one is stored; on a non-success status resolve the
//! JSON error body's message, falling back to a fixed localized default
//! per operation; on success parse and return the JSON body. Mock
//! implementations live alongside each trait for tests.

mod auth;
mod catalog;
mod recipes;

pub use auth::{AuthApi, HttpAuthApi, MockAuthApi};
pub use catalog::{CatalogApi, HttpCatalogApi, MockCatalogApi};
pub use recipes::{HttpRecipeApi, MockRecipeApi, RecipeApi};

use crate::config::Configuration;
use crate::error::ApiError;

/// Resolve the error for a non-success response.
///
/// Prefers the `message` field of a JSON error body, then `error`,
/// falling back to the operation's default string.
pub(crate) async fn error_from_response(response: reqwest::Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Api { status, message }
}

/// Attach the stored bearer token, when present.
pub(crate) fn with_auth(
    builder: reqwest::RequestBuilder,
    config: &Configuration,
) -> reqwest::RequestBuilder {
    match config.tokens.get() {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}
