//! Authentication, profile, and user-administration endpoints.
//!
//! The bearer token is owned here: `login` persists it to the configured
//! token store, `logout` clears it. Nothing outside this module writes
//! the token.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::Configuration;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, User};
use crate::token::{MemoryTokenStore, TokenStore};

use super::{error_from_response, with_auth};

const LOGIN_FAILED: &str = "E-Mail-Adresse oder Passwort ist falsch.";
const NOT_AUTHENTICATED: &str = "Not authenticated";
const LOAD_USERS_FAILED: &str = "Fehler beim Laden der Benutzer.";
const CREATE_USER_FAILED: &str = "Fehler beim Erstellen des Benutzers.";
const SAVE_PROFILE_FAILED: &str = "Fehler beim Speichern des Profils.";
const SAVE_USER_FAILED: &str = "Fehler beim Speichern des Benutzers.";
// The backend sends these two transliterated, unlike the catalog messages.
const DELETE_USER_FAILED: &str = "Fehler beim Loeschen des Benutzers.";
const RESET_REQUEST_FAILED: &str = "Fehler beim Anfordern des Passwort-Reset.";
const RESET_FAILED: &str = "Der Link ist ungueltig oder abgelaufen.";

/// Auth endpoints, as a trait for mockability in tests.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login` — exchange credentials for a token and user
    /// record. The token is persisted on success.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Drop the persisted token. Purely local; there is no server call.
    fn logout(&self);

    /// Whether a token is currently stored (e.g. from a prior session).
    fn has_token(&self) -> bool;

    /// `GET /auth/me` — re-validate the stored token.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// `PUT /auth/me`.
    async fn update_profile(&self, update: &UpdateUserRequest) -> Result<User, ApiError>;

    /// `GET /auth/users` (admin).
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `POST /auth/register` (admin).
    async fn register_user(&self, request: &RegisterRequest) -> Result<User, ApiError>;

    /// `PUT /auth/users/{id}` (admin).
    async fn update_user(&self, id: i64, update: &UpdateUserRequest) -> Result<User, ApiError>;

    /// `DELETE /auth/users/{id}` (admin).
    async fn delete_user(&self, id: i64) -> Result<(), ApiError>;

    /// `POST /auth/password-reset` — request a reset mail (unauthenticated).
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// `POST /auth/reset-password` — redeem a reset token (unauthenticated).
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError>;
}

/// Production client talking to the backend over HTTP.
pub struct HttpAuthApi {
    config: Configuration,
}

impl HttpAuthApi {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_path, path)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .config
            .client
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, LOGIN_FAILED).await);
        }
        let login: LoginResponse = response.json().await?;
        self.config.tokens.set(&login.token);
        Ok(login)
    }

    fn logout(&self) {
        self.config.tokens.clear();
    }

    fn has_token(&self) -> bool {
        self.config.tokens.get().is_some()
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let request = with_auth(self.config.client.get(self.url("/auth/me")), &self.config);
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, NOT_AUTHENTICATED).await);
        }
        Ok(response.json().await?)
    }

    async fn update_profile(&self, update: &UpdateUserRequest) -> Result<User, ApiError> {
        let request = with_auth(
            self.config.client.put(self.url("/auth/me")).json(update),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SAVE_PROFILE_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let request = with_auth(self.config.client.get(self.url("/auth/users")), &self.config);
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, LOAD_USERS_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn register_user(&self, body: &RegisterRequest) -> Result<User, ApiError> {
        let request = with_auth(
            self.config.client.post(self.url("/auth/register")).json(body),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, CREATE_USER_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn update_user(&self, id: i64, update: &UpdateUserRequest) -> Result<User, ApiError> {
        let request = with_auth(
            self.config
                .client
                .put(self.url(&format!("/auth/users/{id}")))
                .json(update),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SAVE_USER_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let request = with_auth(
            self.config
                .client
                .delete(self.url(&format!("/auth/users/{id}"))),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, DELETE_USER_FAILED).await);
        }
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .config
            .client
            .post(self.url("/auth/password-reset"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, RESET_REQUEST_FAILED).await);
        }
        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let response = self
            .config
            .client
            .post(self.url("/auth/reset-password"))
            .json(&serde_json::json!({ "token": token, "newPassword": new_password }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, RESET_FAILED).await);
        }
        Ok(())
    }
}

/// In-memory auth backend for tests.
///
/// One known account; logging in with its credentials stores a token in
/// the given store. `expire_token` makes the stored token stop
/// validating, simulating a server-side expiry after a reload.
pub struct MockAuthApi {
    tokens: std::sync::Arc<MemoryTokenStore>,
    account: Mutex<User>,
    password: String,
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
    token_valid: AtomicBool,
}

impl MockAuthApi {
    pub fn new(account: User, password: &str) -> Self {
        let next_id = account.id + 1;
        Self {
            tokens: std::sync::Arc::new(MemoryTokenStore::new()),
            users: Mutex::new(vec![account.clone()]),
            account: Mutex::new(account),
            password: password.to_string(),
            next_id: AtomicI64::new(next_id),
            token_valid: AtomicBool::new(true),
        }
    }

    /// Make the stored token stop validating.
    pub fn expire_token(&self) {
        self.token_valid.store(false, Ordering::Relaxed);
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let account = self.account.lock().unwrap().clone();
        if email == account.email && password == self.password {
            self.tokens.set("mock-token");
            self.token_valid.store(true, Ordering::Relaxed);
            Ok(LoginResponse {
                token: "mock-token".to_string(),
                user: account,
            })
        } else {
            Err(ApiError::Api {
                status: 401,
                message: LOGIN_FAILED.to_string(),
            })
        }
    }

    fn logout(&self) {
        self.tokens.clear();
    }

    fn has_token(&self) -> bool {
        self.tokens.get().is_some()
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        if self.has_token() && self.token_valid.load(Ordering::Relaxed) {
            Ok(self.account.lock().unwrap().clone())
        } else {
            Err(ApiError::Api {
                status: 401,
                message: NOT_AUTHENTICATED.to_string(),
            })
        }
    }

    async fn update_profile(&self, update: &UpdateUserRequest) -> Result<User, ApiError> {
        let mut account = self.account.lock().unwrap();
        if let Some(vorname) = &update.vorname {
            account.vorname = Some(vorname.clone());
        }
        if let Some(nachname) = &update.nachname {
            account.nachname = Some(nachname.clone());
        }
        if update.password.is_some() {
            account.must_change_password = false;
        }
        Ok(account.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn register_user(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            vorname: request.vorname.clone(),
            nachname: request.nachname.clone(),
            email: request.email.clone(),
            role: request.role,
            must_change_password: true,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i64, update: &UpdateUserRequest) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::Api {
                status: 404,
                message: SAVE_USER_FAILED.to_string(),
            })?;
        if let Some(vorname) = &update.vorname {
            user.vorname = Some(vorname.clone());
        }
        if let Some(nachname) = &update.nachname {
            user.nachname = Some(nachname.clone());
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: DELETE_USER_FAILED.to_string(),
            });
        }
        Ok(())
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn reset_password(&self, _token: &str, _new_password: &str) -> Result<(), ApiError> {
        Ok(())
    }
}
