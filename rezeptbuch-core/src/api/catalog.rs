//! Ingredient reference catalog endpoints.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::Configuration;
use crate::error::ApiError;
use crate::models::IngredientCatalogEntry;

use super::{error_from_response, with_auth};

const LOAD_FAILED: &str = "Fehler beim Laden der Zutaten.";
const CREATE_FAILED: &str = "Fehler beim Erstellen des Eintrags.";
const SAVE_FAILED: &str = "Fehler beim Speichern des Eintrags.";
const DELETE_FAILED: &str = "Fehler beim Löschen des Eintrags.";

/// Ingredient catalog endpoints, as a trait for mockability in tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /ingredient-catalog`.
    async fn list(&self) -> Result<Vec<IngredientCatalogEntry>, ApiError>;

    /// `POST /ingredient-catalog`.
    async fn create(&self, entry: &IngredientCatalogEntry)
        -> Result<IngredientCatalogEntry, ApiError>;

    /// `PUT /ingredient-catalog/{id}`.
    async fn update(
        &self,
        id: i64,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError>;

    /// `DELETE /ingredient-catalog/{id}`.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// Production client talking to the backend over HTTP.
pub struct HttpCatalogApi {
    config: Configuration,
}

impl HttpCatalogApi {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_path, path)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self) -> Result<Vec<IngredientCatalogEntry>, ApiError> {
        let request = with_auth(
            self.config.client.get(self.url("/ingredient-catalog")),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, LOAD_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn create(
        &self,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError> {
        let request = with_auth(
            self.config
                .client
                .post(self.url("/ingredient-catalog"))
                .json(entry),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, CREATE_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        id: i64,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError> {
        let request = with_auth(
            self.config
                .client
                .put(self.url(&format!("/ingredient-catalog/{id}")))
                .json(entry),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SAVE_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let request = with_auth(
            self.config
                .client
                .delete(self.url(&format!("/ingredient-catalog/{id}"))),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, DELETE_FAILED).await);
        }
        Ok(())
    }
}

/// In-memory catalog backend for tests.
#[derive(Default)]
pub struct MockCatalogApi {
    entries: Mutex<Vec<IngredientCatalogEntry>>,
    next_id: AtomicI64,
    failure: Mutex<Option<String>>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<IngredientCatalogEntry>) -> Self {
        let next_id = entries.iter().filter_map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            entries: Mutex::new(entries),
            next_id: AtomicI64::new(next_id),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(ApiError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn list(&self) -> Result<Vec<IngredientCatalogEntry>, ApiError> {
        self.check_failure()?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn create(
        &self,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError> {
        self.check_failure()?;
        let mut saved = entry.clone();
        saved.id = Some(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn update(
        &self,
        id: i64,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError> {
        self.check_failure()?;
        let mut entries = self.entries.lock().unwrap();
        let slot = entries
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or(ApiError::Api {
                status: 404,
                message: SAVE_FAILED.to_string(),
            })?;
        let mut saved = entry.clone();
        saved.id = Some(id);
        *slot = saved.clone();
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != Some(id));
        if entries.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: DELETE_FAILED.to_string(),
            });
        }
        Ok(())
    }
}
