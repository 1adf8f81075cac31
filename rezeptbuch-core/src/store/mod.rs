//! State containers backing the views.
//!
//! Each store owns one slice of client state and mediates all backend
//! calls for it through an injected API client. Stores are created at
//! app start and torn down with the session; they are plain values, not
//! ambient singletons, and take `&mut self` for every mutation so
//! single-writer discipline is enforced by the borrow checker.

mod auth;
mod catalog;
mod recipes;
mod ui;

pub use auth::AuthStore;
pub use catalog::CatalogStore;
pub use recipes::RecipeStore;
pub use ui::UiStore;
