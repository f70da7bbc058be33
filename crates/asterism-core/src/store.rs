//! Saved constellations, persisted as one JSON array under a single key.
//!
//! Every mutation rewrites the whole collection. Reads never fail: a missing
//! or unreadable value is an empty collection.

use crate::color::Color;
use crate::constants::{ID_SUFFIX_LEN, MIN_CONSTELLATION_STARS, STORAGE_KEY};
use crate::error::{SaveError, StorageError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Durable string key-value storage (`localStorage` in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage, used headless and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constellation {
    pub id: String,
    pub name: String,
    pub star_indices: Vec<usize>,
    pub color: Color,
}

impl Constellation {
    /// List entry text, e.g. `Orion (7 stars)`.
    pub fn label(&self) -> String {
        format!("{} ({} stars)", self.name, self.star_indices.len())
    }
}

/// `con_<millis>_<7 base36 chars>`. Unique enough for one browser profile,
/// not guaranteed.
pub fn generate_id<R: Rng + ?Sized>(timestamp_ms: u64, rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("con_{}_{}", timestamp_ms, suffix)
}

pub struct ConstellationStore<S> {
    backend: S,
    items: Vec<Constellation>,
}

impl<S: KeyValueStore> ConstellationStore<S> {
    /// Open the store and read whatever is already persisted.
    pub fn open(backend: S) -> Self {
        let mut store = Self {
            backend,
            items: Vec::new(),
        };
        store.load_all();
        store
    }

    /// Re-read the collection from storage.
    pub fn load_all(&mut self) -> &[Constellation] {
        self.items = match self.backend.get(STORAGE_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Constellation>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("[store] ignoring unreadable saved constellations: {}", e);
                    Vec::new()
                }
            },
        };
        &self.items
    }

    pub fn all(&self) -> &[Constellation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Constellation> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn name_taken(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.items.iter().any(|c| c.name.to_lowercase() == lower)
    }

    /// Validate and append a new constellation, then persist. Nothing is
    /// changed when validation fails.
    pub fn save<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        star_indices: &[usize],
        color: Color,
        timestamp_ms: u64,
        rng: &mut R,
    ) -> Result<Constellation, SaveError> {
        let name = name.trim();
        if star_indices.len() < MIN_CONSTELLATION_STARS || name.is_empty() {
            return Err(SaveError::InvalidInput);
        }
        if self.name_taken(name) {
            return Err(SaveError::DuplicateName(name.to_string()));
        }
        let constellation = Constellation {
            id: generate_id(timestamp_ms, rng),
            name: name.to_string(),
            star_indices: star_indices.to_vec(),
            color,
        };
        self.items.push(constellation.clone());
        self.persist();
        log::info!(
            "[store] saved '{}' ({} stars) as {}",
            constellation.name,
            constellation.star_indices.len(),
            constellation.id
        );
        Ok(constellation)
    }

    /// Remove `id` if present. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
            log::info!("[store] deleted {}", id);
        }
        removed
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(j) => j,
            Err(e) => {
                log::error!("[store] serialize failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.set(STORAGE_KEY, &json) {
            log::warn!("[store] {}", e);
        }
    }
}
