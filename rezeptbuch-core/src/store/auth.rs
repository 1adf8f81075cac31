//! Session state and user administration.

use std::sync::Arc;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::models::{RegisterRequest, Role, UpdateUserRequest, User};

pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    user: Option<User>,
    is_authenticated: bool,
    loading: bool,
    error: Option<String>,
}

impl AuthStore {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            user: None,
            is_authenticated: false,
            loading: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.role.can_manage_users())
            .unwrap_or(false)
    }

    pub fn is_user(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.role == Role::User)
            .unwrap_or(false)
    }

    /// Display name of the signed-in user, empty when signed out.
    pub fn full_name(&self) -> String {
        self.user.as_ref().map(User::full_name).unwrap_or_default()
    }

    /// Whether the user still has to complete their profile (missing
    /// name part or forced password change).
    pub fn needs_profile_setup(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| {
                u.vorname.as_deref().unwrap_or("").is_empty()
                    || u.nachname.as_deref().unwrap_or("").is_empty()
                    || u.must_change_password
            })
            .unwrap_or(false)
    }

    /// Whether a token is stored, e.g. left over from a prior session.
    pub fn has_token(&self) -> bool {
        self.api.has_token()
    }

    /// Exchange credentials for a session. Returns a success flag
    /// instead of an error so route guards can branch without exception
    /// handling; the message is latched for display either way.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.loading = true;
        self.error = None;
        let result = self.api.login(email, password).await;
        self.loading = false;
        match result {
            Ok(response) => {
                self.user = Some(response.user);
                self.is_authenticated = true;
                true
            }
            Err(e) => {
                self.error = Some(e.message());
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.api.logout();
        self.user = None;
        self.is_authenticated = false;
    }

    /// Re-validate an existing token by fetching the current user. Any
    /// failure clears the session.
    pub async fn check_auth(&mut self) -> bool {
        if !self.api.has_token() {
            self.is_authenticated = false;
            return false;
        }
        match self.api.current_user().await {
            Ok(user) => {
                self.user = Some(user);
                self.is_authenticated = true;
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "token validation failed, clearing session");
                self.logout();
                false
            }
        }
    }

    pub async fn update_profile(&mut self, update: &UpdateUserRequest) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.update_profile(update).await;
        self.loading = false;
        match result {
            Ok(user) => {
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    pub async fn fetch_users(&mut self) -> Result<Vec<User>, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.list_users().await;
        self.loading = false;
        result.map_err(|e| {
            self.error = Some(e.message());
            e
        })
    }

    pub async fn create_user(&mut self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.register_user(request).await;
        self.loading = false;
        result.map_err(|e| {
            self.error = Some(e.message());
            e
        })
    }

    pub async fn update_user(
        &mut self,
        id: i64,
        update: &UpdateUserRequest,
    ) -> Result<User, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.update_user(id, update).await;
        self.loading = false;
        result.map_err(|e| {
            self.error = Some(e.message());
            e
        })
    }

    pub async fn delete_user(&mut self, id: i64) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.delete_user(id).await;
        self.loading = false;
        result.map_err(|e| {
            self.error = Some(e.message());
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAuthApi;

    fn admin() -> User {
        User {
            id: 1,
            vorname: Some("Anna".to_string()),
            nachname: Some("Admin".to_string()),
            email: "anna@example.com".to_string(),
            role: Role::Admin,
            must_change_password: false,
        }
    }

    #[tokio::test]
    async fn test_login_success_sets_session() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api);

        assert!(store.login("anna@example.com", "geheim").await);
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        assert!(!store.is_user());
        assert_eq!(store.full_name(), "Anna Admin");
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_login_failure_returns_false_and_latches_message() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api);

        assert!(!store.login("anna@example.com", "falsch").await);
        assert!(!store.is_authenticated());
        assert_eq!(store.error(), Some("E-Mail-Adresse oder Passwort ist falsch."));
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_session() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api.clone());

        store.login("anna@example.com", "geheim").await;
        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_check_auth_without_token() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api);
        assert!(!store.check_auth().await);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth_revalidates_existing_token() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut first = AuthStore::new(api.clone());
        first.login("anna@example.com", "geheim").await;

        // New store, same token store: a fresh process after reload
        let mut second = AuthStore::new(api);
        assert!(second.check_auth().await);
        assert!(second.is_authenticated());
        assert_eq!(second.full_name(), "Anna Admin");
    }

    #[tokio::test]
    async fn test_check_auth_failure_clears_session() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api.clone());
        store.login("anna@example.com", "geheim").await;

        api.expire_token();
        assert!(!store.check_auth().await);
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn test_needs_profile_setup() {
        let mut account = admin();
        account.vorname = None;
        let api = Arc::new(MockAuthApi::new(account, "geheim"));
        let mut store = AuthStore::new(api);

        store.login("anna@example.com", "geheim").await;
        assert!(store.needs_profile_setup());

        store
            .update_profile(&UpdateUserRequest {
                vorname: Some("Anna".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!store.needs_profile_setup());
    }

    #[tokio::test]
    async fn test_user_admin_roundtrip() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api);
        store.login("anna@example.com", "geheim").await;

        let created = store
            .create_user(&RegisterRequest {
                vorname: None,
                nachname: None,
                email: "neu@example.com".to_string(),
                password: "start123".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();
        assert!(created.must_change_password);

        let users = store.fetch_users().await.unwrap();
        assert_eq!(users.len(), 2);

        store.delete_user(created.id).await.unwrap();
        assert_eq!(store.fetch_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_failure_message_matches_backend() {
        let api = Arc::new(MockAuthApi::new(admin(), "geheim"));
        let mut store = AuthStore::new(api);
        store.login("anna@example.com", "geheim").await;

        let err = store.delete_user(999).await.unwrap_err();
        // Transliterated on the wire, no umlaut.
        assert_eq!(err.message(), "Fehler beim Loeschen des Benutzers.");
        assert_eq!(
            store.error(),
            Some("Fehler beim Loeschen des Benutzers.")
        );
    }
}
