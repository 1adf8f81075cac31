//! Recipe CRUD, search, and image-scan endpoints.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::Configuration;
use crate::error::ApiError;
use crate::models::{Recipe, RecipeSummary, ScanImage, ScanResult};

use super::{error_from_response, with_auth};

const LOAD_LIST_FAILED: &str = "Fehler beim Laden der Rezepte.";
const LOAD_RECIPE_FAILED: &str = "Fehler beim Laden des Rezepts.";
const SAVE_RECIPE_FAILED: &str = "Fehler beim Speichern des Rezepts.";
const DELETE_RECIPE_FAILED: &str = "Fehler beim Löschen des Rezepts.";
const SEARCH_FAILED: &str = "Fehler bei der Rezeptsuche.";
const SCAN_FAILED: &str = "Fehler beim Scannen des Rezepts.";

/// Recipe endpoints, as a trait for mockability in tests.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /recipes` — list summaries for the overview.
    async fn list(&self) -> Result<Vec<RecipeSummary>, ApiError>;

    /// `GET /recipes/{id}` — fetch one full record.
    async fn get(&self, id: i64) -> Result<Recipe, ApiError>;

    /// `POST /recipes` — create; returns the saved record with its id.
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, ApiError>;

    /// `PUT /recipes/{id}` — replace; returns the saved record.
    async fn update(&self, id: i64, recipe: &Recipe) -> Result<Recipe, ApiError>;

    /// `DELETE /recipes/{id}`.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;

    /// `GET /recipes/search?q=` — server-side search over full records.
    async fn search(&self, query: &str) -> Result<Vec<Recipe>, ApiError>;

    /// `POST /recipes/scan` — extract recipe fields from page images.
    async fn scan(&self, images: &[ScanImage]) -> Result<ScanResult, ApiError>;
}

/// Production client talking to the backend over HTTP.
pub struct HttpRecipeApi {
    config: Configuration,
}

impl HttpRecipeApi {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_path, path)
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        let request = with_auth(self.config.client.get(self.url("/recipes")), &self.config);
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, LOAD_LIST_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn get(&self, id: i64) -> Result<Recipe, ApiError> {
        let request = with_auth(
            self.config.client.get(self.url(&format!("/recipes/{id}"))),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, LOAD_RECIPE_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn create(&self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        let request = with_auth(
            self.config.client.post(self.url("/recipes")).json(recipe),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SAVE_RECIPE_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn update(&self, id: i64, recipe: &Recipe) -> Result<Recipe, ApiError> {
        let request = with_auth(
            self.config
                .client
                .put(self.url(&format!("/recipes/{id}")))
                .json(recipe),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SAVE_RECIPE_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let request = with_auth(
            self.config
                .client
                .delete(self.url(&format!("/recipes/{id}"))),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, DELETE_RECIPE_FAILED).await);
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, ApiError> {
        let request = with_auth(
            self.config
                .client
                .get(self.url("/recipes/search"))
                .query(&[("q", query)]),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SEARCH_FAILED).await);
        }
        Ok(response.json().await?)
    }

    async fn scan(&self, images: &[ScanImage]) -> Result<ScanResult, ApiError> {
        let request = with_auth(
            self.config
                .client
                .post(self.url("/recipes/scan"))
                .json(images),
            &self.config,
        );
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, SCAN_FAILED).await);
        }
        Ok(response.json().await?)
    }
}

/// In-memory recipe backend for tests.
///
/// Holds full records and serves projections from them; ids are assigned
/// on create. `fail_with` makes every subsequent call fail until
/// `succeed` is called.
#[derive(Default)]
pub struct MockRecipeApi {
    recipes: Mutex<Vec<Recipe>>,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl MockRecipeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        let next_id = recipes
            .iter()
            .filter_map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            recipes: Mutex::new(recipes),
            next_id: AtomicI64::new(next_id),
            list_calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Restore normal behavior after `fail_with`.
    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Number of `list` calls that reached this backend.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
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
impl RecipeApi for MockRecipeApi {
    async fn list(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes.iter().map(RecipeSummary::from_record).collect())
    }

    async fn get(&self, id: i64) -> Result<Recipe, ApiError> {
        self.check_failure()?;
        let recipes = self.recipes.lock().unwrap();
        recipes
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or(ApiError::Api {
                status: 404,
                message: LOAD_RECIPE_FAILED.to_string(),
            })
    }

    async fn create(&self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        self.check_failure()?;
        let mut saved = recipe.clone();
        saved.id = Some(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.recipes.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: i64, recipe: &Recipe) -> Result<Recipe, ApiError> {
        self.check_failure()?;
        let mut recipes = self.recipes.lock().unwrap();
        let slot = recipes
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or(ApiError::Api {
                status: 404,
                message: SAVE_RECIPE_FAILED.to_string(),
            })?;
        let mut saved = recipe.clone();
        saved.id = Some(id);
        *slot = saved.clone();
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.check_failure()?;
        let mut recipes = self.recipes.lock().unwrap();
        let before = recipes.len();
        recipes.retain(|r| r.id != Some(id));
        if recipes.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: DELETE_RECIPE_FAILED.to_string(),
            });
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Recipe>, ApiError> {
        self.check_failure()?;
        let q = query.to_lowercase();
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }

    async fn scan(&self, images: &[ScanImage]) -> Result<ScanResult, ApiError> {
        self.check_failure()?;
        if images.is_empty() {
            return Err(ApiError::Api {
                status: 400,
                message: "Mindestens ein Bild ist erforderlich".to_string(),
            });
        }
        Ok(ScanResult::default())
    }
}
