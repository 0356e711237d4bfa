// ABOUTME: Form input for creating or editing a recipe, and its validation into a Recipe.
// ABOUTME: Blank ingredient and step rows are dropped before the non-empty checks run.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::StoreError;
use crate::recipe::Recipe;

/// Raw recipe fields as submitted by a form, CLI or API caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeInput {
    pub title: String,
    pub category: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeInput {
    /// Validate and normalize into a Recipe carrying the given id.
    ///
    /// Title, category and every row are trimmed; empty rows are dropped and an
    /// empty category becomes None. Title, ingredients and steps must remain
    /// non-empty afterwards.
    pub fn into_recipe(self, id: Ulid) -> Result<Recipe, StoreError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::Validation("title is required".to_string()));
        }

        let ingredients = non_blank_rows(self.ingredients);
        if ingredients.is_empty() {
            return Err(StoreError::Validation(
                "at least one ingredient is required".to_string(),
            ));
        }

        let steps = non_blank_rows(self.steps);
        if steps.is_empty() {
            return Err(StoreError::Validation(
                "at least one step is required".to_string(),
            ));
        }

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Recipe {
            id,
            title,
            category,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            ingredients,
            steps,
        })
    }
}

impl From<&Recipe> for RecipeInput {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            category: recipe.category.clone(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
        }
    }
}

fn non_blank_rows(rows: Vec<String>) -> Vec<String> {
    rows.into_iter()
        .map(|row| row.trim().to_string())
        .filter(|row| !row.is_empty())
        .collect()
}
