// ABOUTME: The recipe store: an ordered in-memory collection mirrored to key-value storage.
// ABOUTME: Each successful mutation re-serializes the whole collection and overwrites the stored value.

use serde_json::Value;
use ulid::Ulid;

use crate::error::StoreError;
use crate::filter::RecipeFilter;
use crate::import::{parse_import, recipe_from_value};
use crate::input::RecipeInput;
use crate::recipe::Recipe;
use crate::storage::Storage;

/// Storage key holding the serialized collection.
pub const RECIPES_KEY: &str = "recipes";

/// Ordered recipe collection backed by a Storage.
///
/// Positions are zero-based indexes that shift on every insert or delete;
/// ids are stable for the lifetime of a recipe. A mutation builds the next
/// collection, writes it, and only then replaces the in-memory copy, so a
/// failed write leaves both memory and storage at the previous value.
pub struct RecipeStore<S> {
    storage: S,
    recipes: Vec<Recipe>,
}

impl<S: Storage> RecipeStore<S> {
    /// Load the collection from storage. A missing value yields an empty
    /// collection, and so does a value that is not a JSON array. Entries
    /// lacking a title, ingredients or steps are skipped.
    ///
    /// Entries stored without an id are given one and the collection is
    /// written back immediately, so ids stay stable across reopens.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let decoded = match storage.get(RECIPES_KEY)? {
            Some(raw) => decode_collection(&raw),
            None => Decoded::default(),
        };

        let mut store = Self {
            storage,
            recipes: decoded.recipes,
        };
        tracing::debug!("loaded {} recipes", store.recipes.len());

        if decoded.assigned_ids > 0 {
            match store.write_current() {
                Ok(()) => {
                    tracing::info!("assigned ids to {} stored recipes", decoded.assigned_ids)
                }
                Err(e) => tracing::warn!(
                    "could not persist ids for {} stored recipes: {}",
                    decoded.assigned_ids,
                    e
                ),
            }
        }

        Ok(store)
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes matching `query` (title or ingredient, case-insensitive) and
    /// `category` (exact). Empty arguments match everything.
    pub fn filter(&self, query: &str, category: &str) -> Vec<&Recipe> {
        RecipeFilter::new(query, category).apply(&self.recipes)
    }

    pub fn get_at(&self, position: usize) -> Option<&Recipe> {
        self.recipes.get(position)
    }

    pub fn get(&self, id: Ulid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Current position of the recipe with the given id.
    pub fn position_of(&self, id: Ulid) -> Option<usize> {
        self.recipes.iter().position(|r| r.id == id)
    }

    /// Validate `input`, append it with a fresh id, and persist.
    pub fn create(&mut self, input: RecipeInput) -> Result<&Recipe, StoreError> {
        let recipe = input.into_recipe(Ulid::new())?;
        let mut next = self.recipes.clone();
        next.push(recipe);
        self.replace(next)?;

        let created = &self.recipes[self.recipes.len() - 1];
        tracing::info!(recipe_id = %created.id, "created recipe {:?}", created.title);
        Ok(created)
    }

    /// Replace the recipe at `position`, keeping its id.
    pub fn update_at(&mut self, position: usize, input: RecipeInput) -> Result<&Recipe, StoreError> {
        let existing = self.checked_position(position)?;
        let recipe = input.into_recipe(self.recipes[existing].id)?;
        let mut next = self.recipes.clone();
        next[existing] = recipe;
        self.replace(next)?;

        let updated = &self.recipes[existing];
        tracing::info!(recipe_id = %updated.id, position, "updated recipe");
        Ok(updated)
    }

    /// Replace the recipe with the given id.
    pub fn update(&mut self, id: Ulid, input: RecipeInput) -> Result<&Recipe, StoreError> {
        let position = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        self.update_at(position, input)
    }

    /// Remove the recipe at `position`; later recipes shift down by one.
    /// Callers are expected to have confirmed the deletion with the user.
    pub fn delete_at(&mut self, position: usize) -> Result<Recipe, StoreError> {
        let position = self.checked_position(position)?;
        let mut next = self.recipes.clone();
        let removed = next.remove(position);
        self.replace(next)?;

        tracing::info!(recipe_id = %removed.id, position, "deleted recipe");
        Ok(removed)
    }

    pub fn delete(&mut self, id: Ulid) -> Result<Recipe, StoreError> {
        let position = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        self.delete_at(position)
    }

    /// Parse `raw` as a JSON array of recipes and append every valid entry.
    /// Returns the number imported. Nothing changes on error.
    pub fn import_merge(&mut self, raw: &str) -> Result<usize, StoreError> {
        let imported = parse_import(raw)?;
        let count = imported.len();

        let mut next = self.recipes.clone();
        next.extend(imported);
        self.replace(next)?;

        tracing::info!("imported {} recipes", count);
        Ok(count)
    }

    /// The collection as pretty JSON in the import format.
    pub fn export(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.recipes)?)
    }

    fn checked_position(&self, position: usize) -> Result<usize, StoreError> {
        if position < self.recipes.len() {
            Ok(position)
        } else {
            Err(StoreError::PositionOutOfRange {
                position,
                len: self.recipes.len(),
            })
        }
    }

    fn write_current(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.recipes)?;
        self.storage.set(RECIPES_KEY, &json)?;
        Ok(())
    }

    fn replace(&mut self, next: Vec<Recipe>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)?;
        self.storage.set(RECIPES_KEY, &json)?;
        self.recipes = next;
        Ok(())
    }
}

#[derive(Default)]
struct Decoded {
    recipes: Vec<Recipe>,
    assigned_ids: usize,
}

fn decode_collection(raw: &str) -> Decoded {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => {
            let mut decoded = Decoded::default();
            for entry in &entries {
                if let Some(recipe) = recipe_from_value(entry) {
                    if !has_stored_id(entry) {
                        decoded.assigned_ids += 1;
                    }
                    decoded.recipes.push(recipe);
                }
            }
            if decoded.recipes.len() < entries.len() {
                tracing::warn!(
                    "skipped {} malformed stored recipes",
                    entries.len() - decoded.recipes.len()
                );
            }
            decoded
        }
        Ok(_) => {
            tracing::warn!("stored recipes are not a JSON array, starting empty");
            Decoded::default()
        }
        Err(e) => {
            tracing::warn!("stored recipes are not valid JSON, starting empty: {}", e);
            Decoded::default()
        }
    }
}

fn has_stored_id(entry: &Value) -> bool {
    entry
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| id.parse::<Ulid>().is_ok())
}
