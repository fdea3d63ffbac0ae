//! Built-in sample catalog
//!
//! Twenty everyday recipes bundled with the crate, so the app has something
//! to browse without a backend.

use crate::data::types::Recipe;
use crate::error::{LarderError, Result};

use super::traits::RecipeSource;
use super::types::IngredientQuery;

const SAMPLE_RECIPES: &str = include_str!("../../assets/sample_recipes.json");

/// Catalog backed by an in-memory recipe list
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    recipes: Vec<Recipe>,
}

impl SampleCatalog {
    /// Load the bundled recipes
    pub fn new() -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(SAMPLE_RECIPES)
            .map_err(|e| LarderError::Decode(format!("Bundled recipes are invalid: {}", e)))?;
        Ok(Self::from_recipes(recipes))
    }

    /// Serve a caller-provided list
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeSource for SampleCatalog {
    fn name(&self) -> &'static str {
        "Sample recipes"
    }

    fn id(&self) -> &'static str {
        "sample"
    }

    /// Every recipe, in catalog order
    ///
    /// The ingredients are not used to narrow or rank results; the query
    /// only has to be non-empty.
    fn search(&self, query: &IngredientQuery) -> Result<Vec<Recipe>> {
        if query.is_empty() {
            return Err(LarderError::InvalidInput(
                "Enter at least one ingredient to search".to_string(),
            ));
        }
        tracing::debug!(ingredients = %query.to_param(), results = self.recipes.len(), "catalog search");
        Ok(self.recipes.clone())
    }

    fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}
