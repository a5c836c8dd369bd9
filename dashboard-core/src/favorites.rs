use crate::{
    error::{DashboardError, Result, StorageError},
    storage::KeyValueStore,
};

/// Storage key holding the JSON-encoded favorites list.
pub const FAVORITES_KEY: &str = "weather-favorites";

/// Case-insensitive set of favorite cities, kept in insertion order and
/// written through to storage on every change.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    cities: Vec<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load the persisted list. A missing key means no favorites yet.
    pub fn open(storage: S) -> Result<Self> {
        let cities = match storage.get(FAVORITES_KEY)? {
            Some(raw) => decode(&raw)?,
            None => Vec::new(),
        };
        tracing::debug!(count = cities.len(), "favorites loaded");

        Ok(Self { storage, cities })
    }

    pub fn list(&self) -> &[String] {
        &self.cities
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        let needle = city.trim().to_lowercase();
        !needle.is_empty() && self.cities.contains(&needle)
    }

    /// Add `city` if absent, remove it otherwise, then persist.
    ///
    /// Returns whether the city is a favorite afterwards. The in-memory set is
    /// left untouched if persisting fails.
    pub fn toggle(&mut self, city: &str) -> Result<bool> {
        let city = city.trim().to_lowercase();
        if city.is_empty() {
            return Err(DashboardError::EmptyCity);
        }

        let mut next = self.cities.clone();
        let added = match next.iter().position(|c| *c == city) {
            Some(idx) => {
                next.remove(idx);
                false
            }
            None => {
                next.push(city.clone());
                true
            }
        };

        let encoded = serde_json::to_string(&next).map_err(|source| StorageError::Encode {
            key: FAVORITES_KEY.to_string(),
            source,
        })?;
        self.storage.set(FAVORITES_KEY, &encoded)?;
        self.cities = next;

        tracing::debug!(%city, added, "favorites updated");
        Ok(added)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Lowercase and drop duplicates from a stored list, keeping first
/// occurrences, so hand-edited files still uphold the set invariant.
fn decode(raw: &str) -> Result<Vec<String>, StorageError> {
    let stored: Vec<String> = serde_json::from_str(raw).map_err(|source| StorageError::Decode {
        key: FAVORITES_KEY.to_string(),
        source,
    })?;

    let mut cities: Vec<String> = Vec::with_capacity(stored.len());
    for city in stored {
        let city = city.trim().to_lowercase();
        if !city.is_empty() && !cities.contains(&city) {
            cities.push(city);
        }
    }
    Ok(cities)
}
