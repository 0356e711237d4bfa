// ABOUTME: Lenient conversion from arbitrary JSON into recipes for file import and legacy loads.
// ABOUTME: Entries need a non-empty title and array ingredients/steps; other fields pass through loosely.

use serde_json::Value;
use ulid::Ulid;

use crate::error::StoreError;
use crate::recipe::Recipe;

/// Parse import text into the recipes it contains.
///
/// Fails with `Parse` if the text is not JSON or not an array, and with
/// `Validation` if no entry qualifies. Every accepted entry gets a fresh id
/// so importing an export never duplicates ids already in the collection.
pub fn parse_import(raw: &str) -> Result<Vec<Recipe>, StoreError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| StoreError::Parse(format!("invalid JSON: {}", e)))?;

    let Value::Array(entries) = value else {
        return Err(StoreError::Parse(
            "import file must contain a JSON array".to_string(),
        ));
    };

    let total = entries.len();
    let recipes: Vec<Recipe> = entries
        .iter()
        .filter_map(recipe_from_value)
        .map(|mut recipe| {
            recipe.id = Ulid::new();
            recipe
        })
        .collect();

    if recipes.is_empty() {
        return Err(StoreError::Validation("no valid recipes found".to_string()));
    }

    if recipes.len() < total {
        tracing::warn!(
            "import skipped {} of {} entries without title, ingredients or steps",
            total - recipes.len(),
            total
        );
    }

    Ok(recipes)
}

/// Convert one JSON value into a Recipe, or None if it lacks the required shape.
/// An existing `id` is kept when it parses as a ULID; otherwise a new one is assigned.
pub fn recipe_from_value(value: &Value) -> Option<Recipe> {
    let obj = value.as_object()?;

    let title = obj.get("title")?.as_str().filter(|t| !t.is_empty())?;
    let ingredients = text_rows(obj.get("ingredients")?)?;
    let steps = text_rows(obj.get("steps")?)?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Ulid>().ok())
        .unwrap_or_else(Ulid::new);

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Some(Recipe {
        id,
        title: title.to_string(),
        category,
        prep_time: obj.get("prepTime").and_then(minutes),
        cook_time: obj.get("cookTime").and_then(minutes),
        ingredients,
        steps,
    })
}

fn text_rows(value: &Value) -> Option<Vec<String>> {
    let rows = value.as_array()?;
    Some(
        rows.iter()
            .map(|row| match row {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Numbers and numeric strings become whole minutes; anything else is dropped.
fn minutes(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|m| u32::try_from(m).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_entry() {
        let recipes = parse_import(r#"[{"title":"A","ingredients":["x"],"steps":["y"]}]"#).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "A");
        assert_eq!(recipes[0].ingredients, vec!["x"]);
        assert!(recipes[0].prep_time.is_none());
    }

    #[test]
    fn rejects_non_json() {
        let err = parse_import("not json").unwrap_err();
        assert!(matches!(err, StoreError::Parse(ref m) if m.contains("invalid JSON")));
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_import("{}").unwrap_err();
        assert!(matches!(err, StoreError::Parse(ref m) if m.contains("array")));
    }

    #[test]
    fn rejects_when_nothing_qualifies() {
        let raw = r#"[{"title":"","ingredients":[],"steps":[]},
                      {"title":"B","ingredients":"x","steps":[]},
                      {"ingredients":[],"steps":[]},
                      42]"#;
        let err = parse_import(raw).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ref m) if m.contains("no valid")));
    }

    #[test]
    fn keeps_only_qualifying_entries() {
        let raw = r#"[{"title":"Keep","ingredients":[],"steps":[]},
                      {"title":"Drop","steps":[]}]"#;
        let recipes = parse_import(raw).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Keep");
    }

    #[test]
    fn optional_fields_pass_through_loosely() {
        let value = json!({
            "title": "Loose",
            "category": "Inconnue",
            "prepTime": "15",
            "cookTime": "soon",
            "ingredients": ["sel", 2],
            "steps": [true],
            "extra": "ignored"
        });
        let recipe = recipe_from_value(&value).unwrap();
        assert_eq!(recipe.category.as_deref(), Some("Inconnue"));
        assert_eq!(recipe.prep_time, Some(15));
        assert_eq!(recipe.cook_time, None);
        assert_eq!(recipe.ingredients, vec!["sel", "2"]);
        assert_eq!(recipe.steps, vec!["true"]);
    }

    #[test]
    fn negative_minutes_are_dropped() {
        let value = json!({"title":"T","prepTime":-5,"cookTime":12.0,"ingredients":[],"steps":[]});
        let recipe = recipe_from_value(&value).unwrap();
        assert_eq!(recipe.prep_time, None);
        assert_eq!(recipe.cook_time, Some(12));
    }

    #[test]
    fn import_assigns_fresh_ids() {
        let id = Ulid::new();
        let raw = format!(
            r#"[{{"id":"{}","title":"A","ingredients":[],"steps":[]}}]"#,
            id
        );
        let recipes = parse_import(&raw).unwrap();
        assert_ne!(recipes[0].id, id);
    }

    #[test]
    fn value_conversion_keeps_valid_id() {
        let id = Ulid::new();
        let value = json!({"id": id.to_string(), "title":"A","ingredients":[],"steps":[]});
        assert_eq!(recipe_from_value(&value).unwrap().id, id);
    }
}
