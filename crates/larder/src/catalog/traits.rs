//! Recipe source trait
//!
//! Defines the interface every recipe catalog implements.

use crate::data::types::Recipe;
use crate::error::Result;

use super::types::IngredientQuery;

/// A source of recipe listings
pub trait RecipeSource: Send + Sync {
    /// Display name for the source (e.g., "Sample recipes")
    fn name(&self) -> &'static str;

    /// Machine-readable identifier (e.g., "sample")
    fn id(&self) -> &'static str;

    /// Find recipes for the given ingredients
    fn search(&self, query: &IngredientQuery) -> Result<Vec<Recipe>>;

    /// Look up a single recipe by its ID
    fn get_recipe(&self, id: &str) -> Result<Option<Recipe>>;
}
