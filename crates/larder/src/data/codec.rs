//! Favorites document codec
//!
//! Converts an ordered set of recipes to and from the JSON stored in the
//! favorites slot.

use crate::config::storage::FAVORITES_VERSION;
use crate::data::types::Recipe;
use crate::error::{LarderError, Result};
use serde::{Deserialize, Serialize};

/// Favorites document as written
#[derive(Debug, Serialize)]
struct FavoritesDocument<'a> {
    version: u32,
    favorites: &'a [Recipe],
}

/// Any favorites document we know how to read
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredFavorites {
    Versioned { version: u32, favorites: Vec<Recipe> },
    /// Bare array written by the browser client
    Legacy(Vec<Recipe>),
}

/// Serialize recipes into a versioned JSON document
pub fn encode(recipes: &[Recipe]) -> Result<String> {
    let document = FavoritesDocument {
        version: FAVORITES_VERSION,
        favorites: recipes,
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| LarderError::Encode(format!("Failed to serialize favorites: {}", e)))
}

/// Parse a favorites document
///
/// Accepts the versioned document and the legacy bare array. Order is kept
/// as stored. Duplicate identifiers are not removed here.
pub fn decode(content: &str) -> Result<Vec<Recipe>> {
    let stored: StoredFavorites = serde_json::from_str(content)
        .map_err(|e| LarderError::Decode(format!("Failed to parse favorites: {}", e)))?;

    match stored {
        StoredFavorites::Versioned { version, favorites } => {
            if version > FAVORITES_VERSION {
                return Err(LarderError::Decode(format!(
                    "Favorites version {} is newer than supported version {}",
                    version, FAVORITES_VERSION
                )));
            }
            Ok(favorites)
        }
        StoredFavorites::Legacy(favorites) => Ok(favorites),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_encode_then_decode_keeps_order() {
        let recipes = vec![
            Recipe::new("3", "Chicken Caesar Salad")
                .with_ready_in_minutes(15)
                .with_ingredients(["chicken", "lettuce"]),
            Recipe::new("1", "Spaghetti Bolognese").with_summary("A classic Italian dish."),
            Recipe::new("2", "Tomato Soup").with_source_url("http://soup.example"),
        ];

        let decoded = decode(&encode(&recipes).unwrap()).unwrap();
        assert_eq!(ids(&decoded), vec!["3", "1", "2"]);
        assert_eq!(decoded, recipes);
    }

    #[test]
    fn test_encode_writes_version() {
        let content = encode(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["version"], FAVORITES_VERSION);
        assert!(value["favorites"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decode_legacy_array() {
        let content = r#"[
            {"id": "5", "title": "Egg Fried Rice", "image": "", "readyInMinutes": 12,
             "ingredients": ["rice", "egg"], "instructions": ["Cook rice"], "sourceUrl": ""},
            {"id": "6", "title": "Pancakes", "image": "", "readyInMinutes": 20,
             "ingredients": [], "instructions": []}
        ]"#;

        let decoded = decode(content).unwrap();
        assert_eq!(ids(&decoded), vec!["5", "6"]);
        assert_eq!(decoded[0].ready_in_minutes, 12);
        assert!(decoded[0].source_url.is_none());
    }

    #[test]
    fn test_decode_keeps_duplicates() {
        let content = r#"[{"id": "1", "title": "A"}, {"id": "1", "title": "B"}]"#;
        assert_eq!(decode(content).unwrap().len(), 2);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("{ invalid json }"), Err(LarderError::Decode(_))));
        assert!(matches!(decode(r#"{"favorites": 3}"#), Err(LarderError::Decode(_))));
        assert!(matches!(decode(""), Err(LarderError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let content = r#"{"version": 99, "favorites": []}"#;
        let err = decode(content).unwrap_err().to_string();
        assert!(err.contains("99"));
    }

    #[test]
    fn test_unicode_survives() {
        let recipes = vec![Recipe::new("日本", "Soupe à l'oignon").with_ingredients(["oignon", "gruyère"])];
        assert_eq!(decode(&encode(&recipes).unwrap()).unwrap(), recipes);
    }
}
