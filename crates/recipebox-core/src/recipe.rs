// ABOUTME: Defines the Recipe record stored in the collection and its persisted JSON shape.
// ABOUTME: Ids are stable ULIDs; optional fields serialize as null so the shape stays fixed.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Categories offered when creating a recipe. The store accepts any
/// category text since imported recipes pass theirs through unchecked.
pub const KNOWN_CATEGORIES: &[&str] = &["Entrée", "Plat", "Dessert", "Boisson", "Snack"];

/// A single recipe. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default = "Ulid::new")]
    pub id: Ulid,
    pub title: String,
    pub category: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl Recipe {
    /// One-line summary used by list views: category, ingredient and step counts.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &self.category {
            parts.push(category.clone());
        }
        parts.push(format!("{} ingredients", self.ingredients.len()));
        parts.push(format!("{} steps", self.steps.len()));
        parts.join(" • ")
    }

    /// Sum of preparation and cooking time, if either is known.
    pub fn total_time(&self) -> Option<u32> {
        match (self.prep_time, self.cook_time) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crepes() -> Recipe {
        Recipe {
            id: Ulid::new(),
            title: "Crêpes".to_string(),
            category: Some("Dessert".to_string()),
            prep_time: Some(10),
            cook_time: None,
            ingredients: vec!["250 g farine".to_string(), "3 oeufs".to_string()],
            steps: vec!["Mélanger".to_string()],
        }
    }

    #[test]
    fn serializes_absent_fields_as_null() {
        let json = serde_json::to_value(crepes()).unwrap();
        assert_eq!(json["prepTime"], 10);
        assert!(json["cookTime"].is_null());
        assert_eq!(json["category"], "Dessert");
        assert!(json["id"].is_string());
    }

    #[test]
    fn deserializes_legacy_entry_without_id() {
        let raw = r#"{"title":"Soupe","category":null,"prepTime":null,"cookTime":20,
                      "ingredients":["eau"],"steps":["chauffer"]}"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.title, "Soupe");
        assert_eq!(recipe.cook_time, Some(20));
        assert!(recipe.category.is_none());
    }

    #[test]
    fn summary_lists_category_and_counts() {
        assert_eq!(crepes().summary(), "Dessert • 2 ingredients • 1 steps");
    }

    #[test]
    fn total_time_adds_known_parts() {
        let mut recipe = crepes();
        assert_eq!(recipe.total_time(), Some(10));
        recipe.cook_time = Some(15);
        assert_eq!(recipe.total_time(), Some(25));
        recipe.prep_time = None;
        recipe.cook_time = None;
        assert_eq!(recipe.total_time(), None);
    }
}
