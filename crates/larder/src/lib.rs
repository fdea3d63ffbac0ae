//! Larder
//!
//! Recipe favorites that survive restarts, plus a built-in recipe catalog
//! to browse them from.

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;

pub use data::{FavoritesStore, Recipe};
pub use error::{LarderError, Result};
