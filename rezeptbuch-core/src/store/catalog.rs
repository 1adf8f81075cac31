//! Ingredient reference catalog state.

use std::sync::Arc;

use crate::api::CatalogApi;
use crate::error::ApiError;
use crate::models::IngredientCatalogEntry;

pub struct CatalogStore {
    api: Arc<dyn CatalogApi>,
    entries: Vec<IngredientCatalogEntry>,
    loading: bool,
    error: Option<String>,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            entries: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn entries(&self) -> &[IngredientCatalogEntry] {
        &self.entries
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the catalog. Failures are latched only, like the recipe
    /// list: the view keeps whatever it had.
    pub async fn fetch_all(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.list().await {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch ingredient catalog");
                self.error = Some(e.message());
            }
        }
        self.loading = false;
    }

    pub async fn create(
        &mut self,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.create(entry).await;
        self.loading = false;
        match result {
            Ok(saved) => {
                self.entries.push(saved.clone());
                Ok(saved)
            }
            Err(e) => {
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    pub async fn update(
        &mut self,
        id: i64,
        entry: &IngredientCatalogEntry,
    ) -> Result<IngredientCatalogEntry, ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.update(id, entry).await;
        self.loading = false;
        match result {
            Ok(saved) => {
                if let Some(slot) = self.entries.iter_mut().find(|e| e.id == Some(id)) {
                    *slot = saved.clone();
                }
                Ok(saved)
            }
            Err(e) => {
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.delete(id).await;
        self.loading = false;
        match result {
            Ok(()) => {
                self.entries.retain(|e| e.id != Some(id));
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCatalogApi;

    fn entry(name: &str) -> IngredientCatalogEntry {
        IngredientCatalogEntry {
            id: None,
            name: name.to_string(),
            unit: Some("g".to_string()),
            nutrition_kcal: None,
            nutrition_fat: None,
            nutrition_protein: None,
            nutrition_carbs: None,
            nutrition_fiber: None,
        }
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let api = Arc::new(MockCatalogApi::new());
        let mut store = CatalogStore::new(api);

        let mehl = store.create(&entry("Mehl")).await.unwrap();
        store.create(&entry("Zucker")).await.unwrap();
        assert_eq!(store.entries().len(), 2);

        let mut changed = entry("Weizenmehl");
        changed.nutrition_kcal = Some(348.0);
        let id = mehl.id.unwrap();
        store.update(id, &changed).await.unwrap();
        assert_eq!(store.entries()[0].name, "Weizenmehl");

        store.delete(id).await.unwrap();
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].name, "Zucker");
    }

    #[tokio::test]
    async fn test_fetch_failure_latches_error_and_keeps_entries() {
        let api = Arc::new(MockCatalogApi::new());
        let mut store = CatalogStore::new(api.clone());
        store.create(&entry("Mehl")).await.unwrap();

        api.fail_with("Keine Verbindung");
        store.fetch_all().await;
        assert_eq!(store.error(), Some("Keine Verbindung"));
        assert_eq!(store.entries().len(), 1);
    }
}
