//! Client SDK for the Rezeptbuch recipe-management backend.
//!
//! Thin typed HTTP clients for the auth, recipe, and ingredient-catalog
//! endpoints, plus state containers that cache the recipe overview,
//! filter it client-side, and track the session. The backend and its
//! API contract are external: JSON over HTTP under a configurable base
//! path with bearer-token authorization.

pub mod api;
pub mod changelog;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod search;
pub mod store;
pub mod token;

pub use api::{
    AuthApi, CatalogApi, HttpAuthApi, HttpCatalogApi, HttpRecipeApi, MockAuthApi, MockCatalogApi,
    MockRecipeApi, RecipeApi,
};
pub use config::Configuration;
pub use error::ApiError;
pub use models::{
    Ingredient, IngredientCatalogEntry, LoginRequest, LoginResponse, Recipe, RecipeSummary,
    RegisterRequest, Role, ScanImage, ScanResult, UpdateUserRequest, User,
};
pub use routes::{guard, resolve, GuardDecision, RouteDef, RouteMatch, RouteName, ROUTES};
pub use search::{filter_recipes, SearchTerm};
pub use store::{AuthStore, CatalogStore, RecipeStore, UiStore};
pub use token::{DiskTokenStore, MemoryTokenStore, TokenStore};
