//! Data shapes exchanged with the backend.
//!
//! The backend serializes camelCase JSON. Optional fields tolerate being
//! absent so older server versions keep working.

use serde::{Deserialize, Serialize};

/// Account role. The backend serializes it as `"ADMIN"` / `"USER"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Whether this role may manage user accounts.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role may edit the ingredient reference catalog.
    pub fn can_edit_catalog(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A user account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub vorname: Option<String>,
    #[serde(default)]
    pub nachname: Option<String>,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub must_change_password: bool,
}

impl User {
    /// Display name: first and last name joined, falling back to the
    /// email address when both are absent.
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.vorname.as_deref(), self.nachname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// A single recipe ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Full recipe record, including ingredients and steps.
///
/// `id` is absent on records that have not been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub base_servings: Option<u32>,
    #[serde(default)]
    pub servings_to: Option<u32>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub ingredient_names: Option<String>,
    #[serde(default)]
    pub ingredient_count: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Projected list-display shape of a recipe.
///
/// The overview endpoint returns these directly; records obtained from
/// single-recipe operations are projected via [`RecipeSummary::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub base_servings: Option<u32>,
    #[serde(default)]
    pub servings_to: Option<u32>,
    #[serde(default)]
    pub ingredient_count: u32,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub ingredient_names: String,
}

impl RecipeSummary {
    /// Project a full record into the list-display shape.
    ///
    /// `ingredient_count` falls back to the length of the ingredient
    /// list when the backend did not supply it separately.
    pub fn from_record(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.unwrap_or_default(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            image_url: recipe.image_url.clone(),
            prep_time_minutes: recipe.prep_time_minutes,
            base_servings: recipe.base_servings,
            servings_to: recipe.servings_to,
            ingredient_count: recipe
                .ingredient_count
                .unwrap_or(recipe.ingredients.len() as u32),
            author: recipe.author.clone().unwrap_or_default(),
            source: recipe.source.clone().unwrap_or_default(),
            created_by: recipe.created_by.clone().unwrap_or_default(),
            ingredient_names: recipe.ingredient_names.clone().unwrap_or_default(),
        }
    }
}

/// Entry in the ingredient reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub nutrition_kcal: Option<f64>,
    #[serde(default)]
    pub nutrition_fat: Option<f64>,
    #[serde(default)]
    pub nutrition_protein: Option<f64>,
    #[serde(default)]
    pub nutrition_carbs: Option<f64>,
    #[serde(default)]
    pub nutrition_fiber: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Payload for creating a user account (admin only).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vorname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nachname: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Payload for updating the current user's profile or another account.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vorname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nachname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// One page image submitted to the recipe scanner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanImage {
    /// Base64-encoded image bytes.
    pub image_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Recipe fields extracted by the server-side scanner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(vorname: Option<&str>, nachname: Option<&str>) -> User {
        User {
            id: 1,
            vorname: vorname.map(String::from),
            nachname: nachname.map(String::from),
            email: "koch@example.com".to_string(),
            role: Role::User,
            must_change_password: false,
        }
    }

    #[test]
    fn test_full_name_joins_parts() {
        assert_eq!(user(Some("Anna"), Some("Muster")).full_name(), "Anna Muster");
    }

    #[test]
    fn test_full_name_single_part() {
        assert_eq!(user(Some("Anna"), None).full_name(), "Anna");
        assert_eq!(user(None, Some("Muster")).full_name(), "Muster");
    }

    #[test]
    fn test_full_name_falls_back_to_email() {
        assert_eq!(user(None, None).full_name(), "koch@example.com");
        assert_eq!(user(Some(""), Some("")).full_name(), "koch@example.com");
    }

    #[test]
    fn test_role_predicates() {
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Admin.can_edit_catalog());
        assert!(!Role::User.can_manage_users());
        assert!(!Role::User.can_edit_catalog());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_summary_projection_counts_ingredients() {
        let recipe = Recipe {
            id: Some(7),
            title: "Linsensuppe".to_string(),
            description: Some("Deftig".to_string()),
            image_url: None,
            prep_time_minutes: Some(45),
            base_servings: Some(4),
            servings_to: None,
            author: None,
            source: None,
            page: None,
            created_by: Some("anna".to_string()),
            ingredient_names: None,
            ingredient_count: None,
            ingredients: vec![
                Ingredient {
                    id: None,
                    name: "Linsen".to_string(),
                    amount: Some("250".to_string()),
                    unit: Some("g".to_string()),
                },
                Ingredient {
                    id: None,
                    name: "Karotten".to_string(),
                    amount: None,
                    unit: None,
                },
            ],
            instructions: vec![],
        };

        let summary = RecipeSummary::from_record(&recipe);
        assert_eq!(summary.id, 7);
        assert_eq!(summary.ingredient_count, 2);
        assert_eq!(summary.author, "");
        assert_eq!(summary.created_by, "anna");
    }

    #[test]
    fn test_summary_projection_prefers_supplied_count() {
        let recipe = Recipe {
            id: Some(1),
            title: "Brot".to_string(),
            description: None,
            image_url: None,
            prep_time_minutes: None,
            base_servings: None,
            servings_to: None,
            author: None,
            source: None,
            page: None,
            created_by: None,
            ingredient_names: None,
            ingredient_count: Some(9),
            ingredients: vec![],
            instructions: vec![],
        };

        assert_eq!(RecipeSummary::from_record(&recipe).ingredient_count, 9);
    }

    #[test]
    fn test_summary_deserializes_sparse_json() {
        let summary: RecipeSummary =
            serde_json::from_str(r#"{"id": 3, "title": "Pfannkuchen"}"#).unwrap();
        assert_eq!(summary.id, 3);
        assert_eq!(summary.ingredient_count, 0);
        assert_eq!(summary.ingredient_names, "");
        assert_eq!(summary.prep_time_minutes, None);
    }
}
