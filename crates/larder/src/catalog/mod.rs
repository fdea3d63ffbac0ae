//! Recipe catalogs
//!
//! Sources of recipes to browse and pick favorites from.

pub mod sample;
pub mod traits;
pub mod types;

// Re-exports
pub use sample::SampleCatalog;
pub use traits::RecipeSource;
pub use types::IngredientQuery;
