// ABOUTME: Text and category filtering over the recipe collection.
// ABOUTME: Text matches case-insensitively on title or any ingredient; category matches exactly.

use serde::Deserialize;

use crate::recipe::Recipe;

/// Search criteria. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecipeFilter {
    #[serde(rename = "q")]
    pub query: String,
    pub category: String,
}

impl RecipeFilter {
    pub fn new(query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    /// True when the filter keeps every recipe.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.category.is_empty()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        Matcher::new(self).matches(recipe)
    }

    /// Keep the matching recipes in collection order.
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        let matcher = Matcher::new(self);
        recipes.iter().filter(|r| matcher.matches(r)).collect()
    }
}

struct Matcher<'f> {
    query: String,
    category: &'f str,
}

impl<'f> Matcher<'f> {
    fn new(filter: &'f RecipeFilter) -> Self {
        Self {
            query: filter.query.trim().to_lowercase(),
            category: filter.category.as_str(),
        }
    }

    fn matches(&self, recipe: &Recipe) -> bool {
        let text = self.query.is_empty()
            || recipe.title.to_lowercase().contains(&self.query)
            || recipe
                .ingredients
                .iter()
                .any(|i| i.to_lowercase().contains(&self.query));

        let category =
            self.category.is_empty() || recipe.category.as_deref() == Some(self.category);

        text && category
    }
}
