//! Favorites management
//!
//! The set of recipes a user has marked favorite, kept in insertion order
//! and mirrored to a single storage slot after every change.

use crate::config::storage::FAVORITES_KEY;
use crate::data::codec;
use crate::data::storage::Storage;
use crate::data::types::{Recipe, RecipeFilter, RecipeSort};
use crate::error::Result;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// What changed in a completed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEvent {
    /// A recipe was appended
    Added(String),
    /// A recipe was removed
    Removed(String),
}

impl FavoritesEvent {
    /// Identifier of the recipe the event is about
    pub fn id(&self) -> &str {
        match self {
            FavoritesEvent::Added(id) | FavoritesEvent::Removed(id) => id,
        }
    }
}

/// Handle returned by [`FavoritesStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer called after each completed mutation with the new list
pub type Subscriber = Box<dyn Fn(&FavoritesEvent, &[Recipe]) + Send>;

/// A store shared between threads; hold the lock across each
/// read-modify-write sequence.
pub type SharedFavorites<S> = Arc<Mutex<FavoritesStore<S>>>;

/// Manages favorites in memory and keeps the storage slot in step
///
/// The only constructor is [`FavoritesStore::initialize`], so a store is
/// always loaded before it can be queried or mutated.
pub struct FavoritesStore<S: Storage> {
    storage: S,
    key: String,
    /// Favorites in insertion order
    favorites: Vec<Recipe>,
    /// Identifiers present in `favorites`
    ids: HashSet<String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    /// False while the last write attempt has failed
    synced: bool,
}

impl<S: Storage> FavoritesStore<S> {
    /// Load favorites from the default slot of `storage`
    ///
    /// Never fails: a missing, empty, unreadable, or corrupt slot gives an
    /// empty store. A corrupt value is left in place until the next mutation
    /// overwrites it.
    pub fn initialize(storage: S) -> Self {
        Self::initialize_with_key(storage, FAVORITES_KEY)
    }

    /// Load favorites from a specific slot of `storage`
    pub fn initialize_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut store = Self {
            storage,
            key,
            favorites: Vec::new(),
            ids: HashSet::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            synced: true,
        };

        let content = match store.storage.get(&store.key) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(key = %store.key, "Failed to read favorites, starting empty: {}", e);
                None
            }
        };

        // Empty slot is treated as non-existent
        let Some(content) = content.filter(|c| !c.trim().is_empty()) else {
            tracing::debug!(key = %store.key, "No saved favorites");
            return store;
        };

        match codec::decode(&content) {
            Ok(recipes) => {
                for recipe in recipes {
                    if store.ids.insert(recipe.id.clone()) {
                        store.favorites.push(recipe);
                    } else {
                        tracing::debug!(id = %recipe.id, "Skipping duplicate saved favorite");
                    }
                }
                tracing::debug!(key = %store.key, count = store.favorites.len(), "Loaded favorites");
            }
            Err(e) => {
                tracing::warn!(key = %store.key, "Ignoring unreadable favorites: {}", e);
            }
        }

        store
    }

    /// All favorites in insertion order
    pub fn list(&self) -> &[Recipe] {
        &self.favorites
    }

    /// Check if a recipe is favorited (O(1))
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Get a favorite by ID
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        if !self.is_favorite(id) {
            return None;
        }
        self.favorites.iter().find(|r| r.id == id)
    }

    /// Append a favorite
    ///
    /// Returns `false` without touching storage if a recipe with the same
    /// ID is already present. Write failures are logged, not returned.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        if self.ids.contains(&recipe.id) {
            return false;
        }

        let id = recipe.id.clone();
        self.ids.insert(id.clone());
        self.favorites.push(recipe);

        self.persist();
        self.notify(&FavoritesEvent::Added(id));
        true
    }

    /// Remove a favorite by ID
    ///
    /// Removing an absent ID is a no-op. The remaining favorites keep their
    /// relative order.
    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        if !self.ids.remove(id) {
            return None;
        }

        let index = self.favorites.iter().position(|r| r.id == id)?;
        let recipe = self.favorites.remove(index);

        self.persist();
        self.notify(&FavoritesEvent::Removed(recipe.id.clone()));
        Some(recipe)
    }

    /// Toggle favorite status for a recipe
    /// Returns true if it is now a favorite
    pub fn toggle(&mut self, recipe: Recipe) -> bool {
        if self.is_favorite(&recipe.id) {
            self.remove(&recipe.id);
            false
        } else {
            self.add(recipe)
        }
    }

    /// Get filtered and sorted favorites
    pub fn query(&self, filter: &RecipeFilter, sort: RecipeSort) -> Vec<&Recipe> {
        let mut favorites: Vec<_> = self
            .favorites
            .iter()
            .filter(|r| filter.matches(r))
            .collect();

        // Stable, so ties keep insertion order
        favorites.sort_by(|a, b| sort.compare(a, b));
        favorites
    }

    /// Get number of favorites
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Register an observer for completed mutations
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&FavoritesEvent, &[Recipe]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Whether the last write reached storage
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Rewrite the slot now, returning any storage error
    pub fn flush(&mut self) -> Result<()> {
        let result = self.write();
        self.synced = result.is_ok();
        result
    }

    /// Slot key this store reads and writes
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Wrap for sharing between threads
    pub fn into_shared(self) -> SharedFavorites<S> {
        Arc::new(Mutex::new(self))
    }

    fn write(&mut self) -> Result<()> {
        let content = codec::encode(&self.favorites)?;
        self.storage.set(&self.key, &content)
    }

    /// Best-effort rewrite after a mutation; never retried
    fn persist(&mut self) {
        match self.write() {
            Ok(()) => self.synced = true,
            Err(e) => {
                self.synced = false;
                tracing::warn!(key = %self.key, "Failed to save favorites: {}", e);
            }
        }
    }

    fn notify(&self, event: &FavoritesEvent) {
        for (_, callback) in &self.subscribers {
            callback(event, &self.favorites);
        }
    }
}
