//! Client-side recipe search.
//!
//! Search terms are user-entered strings kept in insertion order. A term
//! of the form `< 30` or `> 45` filters on preparation time; anything
//! else is a case-insensitive substring match across the searchable
//! fields. A recipe is kept only when every term matches.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::RecipeSummary;

/// A term is a time filter when it is `<` or `>` followed by an integer,
/// even if the digits would also match a text field.
static TIME_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([<>])\s*(\d+)$").expect("Invalid time filter regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOp {
    Below,
    Above,
}

/// A parsed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Numeric comparison against the recipe's preparation time.
    Time { op: TimeOp, minutes: u32 },
    /// Case-insensitive substring matcher (stored lowercased).
    Text(String),
}

impl SearchTerm {
    pub fn parse(raw: &str) -> Self {
        if let Some(caps) = TIME_FILTER.captures(raw) {
            if let Ok(minutes) = caps[2].parse::<u32>() {
                let op = if &caps[1] == "<" {
                    TimeOp::Below
                } else {
                    TimeOp::Above
                };
                return SearchTerm::Time { op, minutes };
            }
        }
        SearchTerm::Text(raw.to_lowercase())
    }

    /// Whether a recipe matches this single term.
    ///
    /// Time terms never match a recipe without a preparation time. Text
    /// terms match when ANY searchable field contains the term.
    pub fn matches(&self, recipe: &RecipeSummary) -> bool {
        match self {
            SearchTerm::Time { op, minutes } => {
                let Some(prep) = recipe.prep_time_minutes else {
                    return false;
                };
                match op {
                    TimeOp::Below => prep < *minutes,
                    TimeOp::Above => prep > *minutes,
                }
            }
            SearchTerm::Text(q) => {
                let fields = [
                    Some(recipe.title.as_str()),
                    recipe.description.as_deref(),
                    Some(recipe.author.as_str()),
                    Some(recipe.source.as_str()),
                    Some(recipe.created_by.as_str()),
                    Some(recipe.ingredient_names.as_str()),
                ];
                fields
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(q))
            }
        }
    }
}

/// Filter recipes against a term set: AND across terms, OR across fields
/// within a text term. An empty term set keeps everything.
pub fn filter_recipes<'a>(
    recipes: &'a [RecipeSummary],
    terms: &[String],
) -> Vec<&'a RecipeSummary> {
    if terms.is_empty() {
        return recipes.iter().collect();
    }
    let parsed: Vec<SearchTerm> = terms.iter().map(|t| SearchTerm::parse(t)).collect();
    recipes
        .iter()
        .filter(|recipe| parsed.iter().all(|term| term.matches(recipe)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, prep: Option<u32>) -> RecipeSummary {
        RecipeSummary {
            id: 1,
            title: title.to_string(),
            description: None,
            image_url: None,
            prep_time_minutes: prep,
            base_servings: None,
            servings_to: None,
            ingredient_count: 0,
            author: String::new(),
            source: String::new(),
            created_by: String::new(),
            ingredient_names: String::new(),
        }
    }

    #[test]
    fn test_parse_time_terms() {
        assert_eq!(
            SearchTerm::parse("< 30"),
            SearchTerm::Time {
                op: TimeOp::Below,
                minutes: 30
            }
        );
        assert_eq!(
            SearchTerm::parse(">45"),
            SearchTerm::Time {
                op: TimeOp::Above,
                minutes: 45
            }
        );
    }

    #[test]
    fn test_parse_text_terms() {
        assert_eq!(
            SearchTerm::parse("Suppe"),
            SearchTerm::Text("suppe".to_string())
        );
        // Operator without digits is plain text
        assert_eq!(SearchTerm::parse("<"), SearchTerm::Text("<".to_string()));
        // Digits alone are plain text, not a time filter
        assert_eq!(SearchTerm::parse("30"), SearchTerm::Text("30".to_string()));
    }

    #[test]
    fn test_time_filter_excludes_missing_prep_time() {
        let no_prep = summary("Salat", None);
        assert!(!SearchTerm::parse("< 30").matches(&no_prep));
        // Even a lower bound never matches a recipe without a prep time
        assert!(!SearchTerm::parse("> 1").matches(&no_prep));
    }

    #[test]
    fn test_time_filter_is_strict() {
        let thirty = summary("Auflauf", Some(30));
        assert!(!SearchTerm::parse("< 30").matches(&thirty));
        assert!(!SearchTerm::parse("> 30").matches(&thirty));
        assert!(SearchTerm::parse("< 31").matches(&thirty));
        assert!(SearchTerm::parse("> 29").matches(&thirty));
    }

    #[test]
    fn test_text_matches_any_field() {
        let mut recipe = summary("Linsensuppe", None);
        recipe.description = Some("Deftiger Eintopf".to_string());
        recipe.author = "Tim Mälzer".to_string();
        recipe.source = "Kochbuch Klassiker".to_string();
        recipe.created_by = "anna".to_string();
        recipe.ingredient_names = "Linsen, Karotten, Sellerie".to_string();

        for term in ["linsensuppe", "EINTOPF", "mälzer", "klassiker", "Anna", "sellerie"] {
            assert!(
                SearchTerm::parse(term).matches(&recipe),
                "term {:?} should match",
                term
            );
        }
        assert!(!SearchTerm::parse("kartoffel").matches(&recipe));
    }

    #[test]
    fn test_filter_ands_terms() {
        let mut quick = summary("Tomatensuppe", Some(20));
        quick.ingredient_names = "Tomaten, Basilikum".to_string();
        let slow = summary("Tomatenbraten", Some(90));

        let recipes = vec![quick, slow];

        let hits = filter_recipes(&recipes, &["tomaten".to_string(), "< 30".to_string()]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tomatensuppe");

        let none = filter_recipes(&recipes, &["tomaten".to_string(), "basilikum".to_string(), "> 30".to_string()]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_empty_term_set_keeps_everything() {
        let recipes = vec![summary("A", None), summary("B", Some(5))];
        assert_eq!(filter_recipes(&recipes, &[]).len(), 2);
    }
}
