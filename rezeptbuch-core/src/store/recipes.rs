//! Recipe list cache and filtering.
//!
//! The cached list holds summaries only; full records live in a separate
//! "current recipe" slot and never enter the list. A fetch within the
//! freshness window is a no-op unless an invalidation is pending, so
//! navigating back and forth does not refetch. List refresh failures
//! degrade to showing the stale cache; single-record operations also
//! return the error so callers can react.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::api::RecipeApi;
use crate::error::ApiError;
use crate::models::{Recipe, RecipeSummary};
use crate::search::filter_recipes;

/// How long a fetched list stays fresh before `fetch_all` refetches.
const FRESHNESS_WINDOW_SECS: i64 = 2 * 60;

pub struct RecipeStore {
    api: Arc<dyn RecipeApi>,
    recipes: Vec<RecipeSummary>,
    current: Option<Recipe>,
    loading: bool,
    error: Option<String>,
    search_terms: Vec<String>,
    last_fetched: Option<DateTime<Utc>>,
    force_refresh: bool,
}

impl RecipeStore {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self {
            api,
            recipes: Vec::new(),
            current: None,
            loading: false,
            error: None,
            search_terms: Vec::new(),
            last_fetched: None,
            force_refresh: false,
        }
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn current(&self) -> Option<&Recipe> {
        self.current.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn is_stale(&self) -> bool {
        match self.last_fetched {
            Some(at) => Utc::now().signed_duration_since(at)
                > Duration::seconds(FRESHNESS_WINDOW_SECS),
            None => true,
        }
    }

    /// Fetch the recipe list unless the cache is still fresh.
    ///
    /// `background` suppresses the loading flag (the caller refreshes
    /// silently); success and failure handling are otherwise identical.
    /// Failures never propagate: the previous list is retained and the
    /// error message latched for display.
    pub async fn fetch_all(&mut self, background: bool) {
        if !self.recipes.is_empty() && !self.is_stale() && !self.force_refresh {
            return;
        }
        self.force_refresh = false;
        if !background {
            self.loading = true;
        }
        self.error = None;
        match self.api.list().await {
            Ok(recipes) => {
                self.recipes = recipes;
                self.last_fetched = Some(Utc::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch recipes");
                self.error = Some(e.message());
            }
        }
        self.loading = false;
    }

    /// Force the next `fetch_all` to bypass the staleness check.
    pub fn invalidate(&mut self) {
        self.force_refresh = true;
    }

    /// Fetch one full record into the current-recipe slot.
    ///
    /// Unlike `fetch_all` this also returns the error, so a detail view
    /// can react instead of silently showing stale data.
    pub async fn fetch_by_id(&mut self, id: i64) -> Result<Recipe, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.get(id).await;
        self.loading = false;
        match result {
            Ok(recipe) => {
                self.current = Some(recipe.clone());
                Ok(recipe)
            }
            Err(e) => {
                tracing::warn!(recipe_id = id, error = %e, "failed to fetch recipe");
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Create a recipe; the saved record's summary goes to the FRONT of
    /// the cached list (newest first is a product choice, not a sort).
    pub async fn create(&mut self, recipe: &Recipe) -> Result<Recipe, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.create(recipe).await;
        self.loading = false;
        match result {
            Ok(saved) => {
                self.recipes.insert(0, RecipeSummary::from_record(&saved));
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create recipe");
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Update a recipe in place, preserving its list position. The
    /// current-recipe slot is refreshed when it holds the same id.
    pub async fn update(&mut self, id: i64, recipe: &Recipe) -> Result<Recipe, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.update(id, recipe).await;
        self.loading = false;
        match result {
            Ok(saved) => {
                if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == id) {
                    *slot = RecipeSummary::from_record(&saved);
                }
                if self.current.as_ref().and_then(|c| c.id) == Some(id) {
                    self.current = Some(saved.clone());
                }
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!(recipe_id = id, error = %e, "failed to update recipe");
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Delete a recipe, removing its summary and clearing the
    /// current-recipe slot iff it held that id.
    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.delete(id).await;
        self.loading = false;
        match result {
            Ok(()) => {
                self.recipes.retain(|r| r.id != id);
                if self.current.as_ref().and_then(|c| c.id) == Some(id) {
                    self.current = None;
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(recipe_id = id, error = %e, "failed to delete recipe");
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    pub fn set_search_terms(&mut self, terms: Vec<String>) {
        self.search_terms = terms;
    }

    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    /// The term set as one display string.
    pub fn search_query(&self) -> String {
        self.search_terms.join(", ")
    }

    /// The cached list filtered by the current term set. Pure; never
    /// mutates the cache.
    pub fn filtered_recipes(&self) -> Vec<&RecipeSummary> {
        filter_recipes(&self.recipes, &self.search_terms)
    }

    pub fn get_recipe_by_id(&self, id: i64) -> Option<&RecipeSummary> {
        self.recipes.iter().find(|r| r.id == id)
    }
}
