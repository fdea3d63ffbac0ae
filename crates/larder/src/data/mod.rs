//! Data persistence
//!
//! Handles the recipe model, favorites, and the storage slots behind them.

pub mod codec;
pub mod favorites;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::{FavoritesEvent, FavoritesStore, SharedFavorites, SubscriptionId};
pub use storage::{data_dir, FileStorage, MemoryStorage, Storage};
pub use types::{Recipe, RecipeFilter, RecipeSort};
