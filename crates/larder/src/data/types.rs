//! Common data types for persistence
//!
//! Shared types used across the data module.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

// =============================================================================
// Recipe - the record users browse and favorite
// =============================================================================

/// A recipe with its display and preparation details
///
/// Field names on the wire follow the browser client's format
/// (`readyInMinutes`, `sourceUrl`), so favorites saved by either side
/// can be read by the other. The favorites store treats a recipe as an
/// opaque value keyed by `id` and never validates the other fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    // === Identity ===
    /// Identifier, unique within a session
    pub id: String,
    /// Display title
    pub title: String,
    /// Image URL
    #[serde(default)]
    pub image: String,

    // === Preparation ===
    /// Preparation time in minutes
    #[serde(default)]
    pub ready_in_minutes: u32,
    /// Ingredients in display order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Instruction steps in order
    #[serde(default)]
    pub instructions: Vec<String>,

    // === Optional ===
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Where the recipe came from
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_url: Option<String>,
}

impl Recipe {
    /// Create a new recipe with minimal info
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: String::new(),
            ready_in_minutes: 0,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            summary: None,
            source_url: None,
        }
    }

    pub fn with_ready_in_minutes(mut self, minutes: u32) -> Self {
        self.ready_in_minutes = minutes;
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the source URL. An empty string is stored as absent.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.source_url = if url.is_empty() { None } else { Some(url) };
        self
    }

    /// Whether any ingredient contains `needle` (case-insensitive)
    pub fn mentions_ingredient(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(&needle))
    }
}

/// Read an optional string, treating `""` the same as a missing field
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// =============================================================================
// Sorting and Filtering
// =============================================================================

/// Sort criteria for favorites
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSort {
    /// Insertion order
    #[default]
    Added,
    /// Alphabetical by title, ignoring case
    Title,
    /// Quickest first
    ReadyTime,
}

impl RecipeSort {
    /// Compare two recipes under this ordering
    ///
    /// `Added` compares everything equal so a stable sort keeps insertion order.
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            RecipeSort::Added => Ordering::Equal,
            RecipeSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            RecipeSort::ReadyTime => a.ready_in_minutes.cmp(&b.ready_in_minutes),
        }
    }
}

/// Filter criteria for favorites
#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    /// Search in title and ingredients
    pub search: Option<String>,
    /// Only recipes ready within this many minutes
    pub max_minutes: Option<u32>,
}

impl RecipeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn max_minutes(mut self, minutes: u32) -> Self {
        self.max_minutes = Some(minutes);
        self
    }

    /// Check if a recipe matches this filter
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(ref search) = self.search {
            let term = search.trim().to_lowercase();
            if !term.is_empty()
                && !recipe.title.to_lowercase().contains(&term)
                && !recipe.mentions_ingredient(&term)
            {
                return false;
            }
        }

        if let Some(max) = self.max_minutes {
            if recipe.ready_in_minutes > max {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> Recipe {
        Recipe::new("2", "Tomato Soup")
            .with_ready_in_minutes(20)
            .with_ingredients(["tomato", "onion", "garlic"])
            .with_instructions(["Chop veggies", "Boil", "Blend"])
            .with_summary("Simple and delicious tomato soup.")
    }

    #[test]
    fn test_recipe_json_uses_client_field_names() {
        let json = serde_json::to_string(&soup().with_source_url("http://soup.example")).unwrap();
        assert!(json.contains("\"readyInMinutes\":20"));
        assert!(json.contains("\"sourceUrl\":\"http://soup.example\""));
        assert!(!json.contains("ready_in_minutes"));
    }

    #[test]
    fn test_optional_fields_skip_none() {
        let json = serde_json::to_string(&Recipe::new("1", "Plain")).unwrap();
        assert!(!json.contains("summary"));
        assert!(!json.contains("sourceUrl"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": "7", "title": "Bare"}"#).unwrap();
        assert_eq!(recipe.ready_in_minutes, 0);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
        assert!(recipe.summary.is_none());
    }

    #[test]
    fn test_empty_source_url_is_none() {
        let recipe = Recipe::new("1", "Pasta").with_source_url("");
        assert!(recipe.source_url.is_none());
    }

    #[test]
    fn test_empty_source_url_decodes_as_none() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": "1", "title": "Pasta", "sourceUrl": ""}"#).unwrap();
        assert!(recipe.source_url.is_none());

        let recipe: Recipe =
            serde_json::from_str(r#"{"id": "1", "title": "Pasta", "sourceUrl": null}"#).unwrap();
        assert!(recipe.source_url.is_none());

        let recipe: Recipe =
            serde_json::from_str(r#"{"id": "1", "title": "Pasta", "sourceUrl": "http://x.example"}"#)
                .unwrap();
        assert_eq!(recipe.source_url.as_deref(), Some("http://x.example"));

        // Re-encoding drops the empty value entirely
        let json = serde_json::to_string(&recipe.with_source_url("")).unwrap();
        assert!(!json.contains("sourceUrl"));
    }

    #[test]
    fn test_mentions_ingredient_case_insensitive() {
        let recipe = soup();
        assert!(recipe.mentions_ingredient("GARL"));
        assert!(!recipe.mentions_ingredient("beef"));
    }

    #[test]
    fn test_filter_matches_title_or_ingredient() {
        let recipe = soup();
        assert!(RecipeFilter::new().search("soup").matches(&recipe));
        assert!(RecipeFilter::new().search("Onion").matches(&recipe));
        assert!(!RecipeFilter::new().search("pancake").matches(&recipe));
    }

    #[test]
    fn test_filter_blank_search_matches_all() {
        assert!(RecipeFilter::new().search("   ").matches(&soup()));
        assert!(RecipeFilter::new().matches(&soup()));
    }

    #[test]
    fn test_filter_max_minutes() {
        assert!(RecipeFilter::new().max_minutes(20).matches(&soup()));
        assert!(!RecipeFilter::new().max_minutes(19).matches(&soup()));
    }

    #[test]
    fn test_sort_compare() {
        let quick = Recipe::new("a", "zucchini fritters").with_ready_in_minutes(5);
        let slow = Recipe::new("b", "Apple Pie").with_ready_in_minutes(60);

        assert_eq!(RecipeSort::Title.compare(&quick, &slow), Ordering::Greater);
        assert_eq!(RecipeSort::ReadyTime.compare(&quick, &slow), Ordering::Less);
        assert_eq!(RecipeSort::Added.compare(&quick, &slow), Ordering::Equal);
    }
}
