// ABOUTME: Query-string hand-off from a list view to the edit form.
// ABOUTME: Carries every field as text, with ingredients and steps encoded as JSON arrays.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

use crate::input::RecipeInput;
use crate::recipe::Recipe;

#[derive(Debug, Error)]
pub enum EditLinkError {
    #[error("invalid query string: {0}")]
    Query(#[from] serde_urlencoded::de::Error),

    #[error("failed to encode query string: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid recipe id: {0:?}")]
    InvalidId(String),

    #[error("invalid position: {0:?}")]
    InvalidPosition(String),
}

/// Raw edit parameters exactly as they travel in the URL. Absent values are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditLink {
    pub id: String,
    pub position: String,
    pub title: String,
    pub category: String,
    pub prep_time: String,
    pub cook_time: String,
    pub ingredients: String,
    pub steps: String,
}

/// A decoded edit link: which recipe is being edited and the form prefill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditForm {
    pub recipe_id: Option<Ulid>,
    pub position: Option<usize>,
    pub input: RecipeInput,
}

impl EditForm {
    pub fn is_editing(&self) -> bool {
        self.recipe_id.is_some() || self.position.is_some()
    }
}

impl EditLink {
    pub fn from_recipe(recipe: &Recipe, position: usize) -> Result<Self, EditLinkError> {
        Ok(Self {
            id: recipe.id.to_string(),
            position: position.to_string(),
            title: recipe.title.clone(),
            category: recipe.category.clone().unwrap_or_default(),
            prep_time: recipe.prep_time.map(|m| m.to_string()).unwrap_or_default(),
            cook_time: recipe.cook_time.map(|m| m.to_string()).unwrap_or_default(),
            ingredients: serde_json::to_string(&recipe.ingredients)?,
            steps: serde_json::to_string(&recipe.steps)?,
        })
    }

    pub fn to_query(&self) -> Result<String, EditLinkError> {
        Ok(serde_urlencoded::to_string(self)?)
    }

    /// Parse a query string, with or without its leading `?`.
    pub fn from_query(query: &str) -> Result<Self, EditLinkError> {
        Ok(serde_urlencoded::from_str(query.trim_start_matches('?'))?)
    }

    /// Decode into a form prefill. If either list is not a JSON string array,
    /// both fall back to a single blank row. Non-numeric times are left empty.
    pub fn into_form(self) -> Result<EditForm, EditLinkError> {
        let recipe_id = match self.id.trim() {
            "" => None,
            raw => Some(
                raw.parse::<Ulid>()
                    .map_err(|_| EditLinkError::InvalidId(raw.to_string()))?,
            ),
        };

        let position = match self.position.trim() {
            "" => None,
            raw => Some(
                raw.parse::<usize>()
                    .map_err(|_| EditLinkError::InvalidPosition(raw.to_string()))?,
            ),
        };

        let lists = parse_rows(&self.ingredients).zip(parse_rows(&self.steps));
        let (ingredients, steps) = match lists {
            Some(lists) => lists,
            None => {
                tracing::debug!("edit link lists are malformed, using blank rows");
                (vec![String::new()], vec![String::new()])
            }
        };

        let category = Some(self.category).filter(|c| !c.is_empty());

        Ok(EditForm {
            recipe_id,
            position,
            input: RecipeInput {
                title: self.title,
                category,
                prep_time: self.prep_time.trim().parse().ok(),
                cook_time: self.cook_time.trim().parse().ok(),
                ingredients,
                steps,
            },
        })
    }
}

/// An empty parameter means no rows; otherwise it must be a JSON string array.
fn parse_rows(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    serde_json::from_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: Ulid::new(),
            title: "Pain & beurre".to_string(),
            category: Some("Snack".to_string()),
            prep_time: Some(2),
            cook_time: None,
            ingredients: vec!["pain".to_string(), "beurre, doux".to_string()],
            steps: vec!["Tartiner = fini".to_string()],
        }
    }

    #[test]
    fn link_recovers_the_form() {
        let recipe = recipe();
        let query = EditLink::from_recipe(&recipe, 4).unwrap().to_query().unwrap();

        let form = EditLink::from_query(&format!("?{}", query))
            .unwrap()
            .into_form()
            .unwrap();

        assert!(form.is_editing());
        assert_eq!(form.recipe_id, Some(recipe.id));
        assert_eq!(form.position, Some(4));
        assert_eq!(form.input, RecipeInput::from(&recipe));
    }

    #[test]
    fn lists_are_json_inside_the_query() {
        let link = EditLink::from_recipe(&recipe(), 0).unwrap();
        assert_eq!(link.ingredients, r#"["pain","beurre, doux"]"#);
        assert_eq!(link.cook_time, "");
    }

    #[test]
    fn malformed_lists_fall_back_to_blank_rows() {
        let form = EditLink::from_query("title=Soupe&ingredients=%5Bbroken&steps=%5B%22a%22%5D")
            .unwrap()
            .into_form()
            .unwrap();

        assert_eq!(form.input.title, "Soupe");
        assert_eq!(form.input.ingredients, vec![""]);
        assert_eq!(form.input.steps, vec![""]);
    }

    #[test]
    fn empty_query_is_a_new_recipe_form() {
        let form = EditLink::from_query("").unwrap().into_form().unwrap();
        assert!(!form.is_editing());
        assert!(form.input.category.is_none());
        assert!(form.input.prep_time.is_none());
    }

    #[test]
    fn bad_id_is_rejected() {
        let err = EditLink::from_query("id=42").unwrap().into_form().unwrap_err();
        assert!(matches!(err, EditLinkError::InvalidId(_)));
    }
}
