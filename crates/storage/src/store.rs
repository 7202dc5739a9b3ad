// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indexed local mirror of watched objects
//!
//! The store is the materialized view of the watch feed. Deleted objects
//! stay behind as tombstones (`exists == false`) so a worker that picks up
//! the key later still sees the last observed state. `compact` drops
//! tombstones once they are old enough.

use recon_core::{Clock, KeyError, Object, ResourceKey, SystemClock, WatchEvent};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::watch;

/// Name of the index every store maintains
pub const NAMESPACE_INDEX: &str = "namespace";

/// Errors from store lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),
    #[error("index not found: {0}")]
    IndexNotFound(String),
    #[error("index already registered: {0}")]
    IndexExists(String),
}

/// Last observed state of one key
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub object: T,
    /// False once a delete was observed
    pub exists: bool,
    pub observed_at: Instant,
}

type IndexFn<T> = Arc<dyn Fn(&T) -> Vec<String> + Send + Sync>;

struct Inner<T> {
    entries: HashMap<ResourceKey, CacheEntry<T>>,
    indexers: HashMap<String, IndexFn<T>>,
    /// index name -> index value -> live keys
    indices: HashMap<String, HashMap<String, HashSet<ResourceKey>>>,
}

impl<T: Object> Inner<T> {
    fn unindex(&mut self, key: &ResourceKey, object: &T) {
        for (name, indexer) in &self.indexers {
            let Some(index) = self.indices.get_mut(name) else {
                continue;
            };
            for value in indexer(object) {
                if let Some(keys) = index.get_mut(&value) {
                    keys.remove(key);
                    if keys.is_empty() {
                        index.remove(&value);
                    }
                }
            }
        }
    }

    fn index(&mut self, key: &ResourceKey, object: &T) {
        for (name, indexer) in &self.indexers {
            let index = self.indices.entry(name.clone()).or_default();
            for value in indexer(object) {
                index.entry(value).or_default().insert(key.clone());
            }
        }
    }

    fn upsert(&mut self, key: &ResourceKey, object: T, now: Instant) {
        if let Some(previous) = self.entries.remove(key) {
            if previous.exists {
                self.unindex(key, &previous.object);
            }
        }
        self.index(key, &object);
        self.entries.insert(
            key.clone(),
            CacheEntry {
                object,
                exists: true,
                observed_at: now,
            },
        );
    }

    fn tombstone(&mut self, key: &ResourceKey, last_seen: T, now: Instant) {
        if let Some(previous) = self.entries.remove(key) {
            if previous.exists {
                self.unindex(key, &previous.object);
            }
        }
        self.entries.insert(
            key.clone(),
            CacheEntry {
                object: last_seen,
                exists: false,
                observed_at: now,
            },
        );
    }
}

/// Thread-safe indexed cache of one resource type
pub struct Store<T, C = SystemClock> {
    inner: Arc<RwLock<Inner<T>>>,
    synced: Arc<watch::Sender<bool>>,
    clock: C,
}

impl<T, C: Clone> Clone for Store<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            synced: Arc::clone(&self.synced),
            clock: self.clock.clone(),
        }
    }
}

impl<T: Object> Store<T> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T: Object> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Object, C: Clock> Store<T, C> {
    pub fn with_clock(clock: C) -> Self {
        let mut indexers: HashMap<String, IndexFn<T>> = HashMap::new();
        indexers.insert(
            NAMESPACE_INDEX.to_string(),
            Arc::new(|object: &T| vec![object.meta().namespace.clone().unwrap_or_default()]),
        );
        let (synced, _) = watch::channel(false);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: HashMap::new(),
                indexers,
                indices: HashMap::new(),
            })),
            synced: Arc::new(synced),
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a secondary index and build it from the live objects
    pub fn add_indexer<F>(&self, name: &str, indexer: F) -> Result<(), StoreError>
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'static,
    {
        let mut inner = self.write();
        if inner.indexers.contains_key(name) {
            return Err(StoreError::IndexExists(name.to_string()));
        }
        let mut index: HashMap<String, HashSet<ResourceKey>> = HashMap::new();
        for (key, entry) in inner.entries.iter().filter(|(_, e)| e.exists) {
            for value in indexer(&entry.object) {
                index.entry(value).or_default().insert(key.clone());
            }
        }
        inner.indices.insert(name.to_string(), index);
        inner.indexers.insert(name.to_string(), Arc::new(indexer));
        Ok(())
    }

    /// Apply one watch event and return the keys it touched
    ///
    /// Every returned key must be enqueued exactly once by the caller. A
    /// listing marks the store synced once all of it has been applied.
    /// Objects whose key cannot be looked up again are skipped with a
    /// warning and never cached.
    pub fn apply(&self, event: WatchEvent<T>) -> Vec<ResourceKey> {
        let now = self.clock.now();
        let mut inner = self.write();
        match event {
            WatchEvent::Added(object) | WatchEvent::Modified(object) => {
                let Some(key) = valid_key(&object) else {
                    return Vec::new();
                };
                inner.upsert(&key, object, now);
                vec![key]
            }
            WatchEvent::Deleted(object) => {
                let Some(key) = valid_key(&object) else {
                    return Vec::new();
                };
                inner.tombstone(&key, object, now);
                vec![key]
            }
            WatchEvent::Listed(objects) => {
                let mut touched = Vec::with_capacity(objects.len());
                let mut listed = HashSet::with_capacity(objects.len());
                for object in objects {
                    let Some(key) = valid_key(&object) else {
                        continue;
                    };
                    inner.upsert(&key, object, now);
                    listed.insert(key.clone());
                    touched.push(key);
                }
                let vanished: Vec<_> = inner
                    .entries
                    .iter()
                    .filter(|(key, entry)| entry.exists && !listed.contains(*key))
                    .map(|(key, entry)| (key.clone(), entry.object.clone()))
                    .collect();
                for (key, last_seen) in vanished {
                    inner.tombstone(&key, last_seen, now);
                    touched.push(key);
                }
                drop(inner);
                self.synced.send_replace(true);
                touched
            }
        }
    }

    /// Look up the last observed state of `key`
    ///
    /// `Ok(None)` means the key was never observed, or its tombstone has been
    /// compacted away.
    pub fn get(&self, key: &ResourceKey) -> Result<Option<CacheEntry<T>>, StoreError> {
        key.split()?;
        Ok(self.read().entries.get(key).cloned())
    }

    /// Live objects whose index `index` contains `value`
    pub fn by_index(&self, index: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let inner = self.read();
        if !inner.indexers.contains_key(index) {
            return Err(StoreError::IndexNotFound(index.to_string()));
        }
        let Some(keys) = inner.indices.get(index).and_then(|values| values.get(value)) else {
            return Ok(Vec::new());
        };
        let mut objects: Vec<T> = keys
            .iter()
            .filter_map(|key| inner.entries.get(key))
            .filter(|entry| entry.exists)
            .map(|entry| entry.object.clone())
            .collect();
        objects.sort_by_key(|object| object.key());
        Ok(objects)
    }

    /// All live objects, ordered by key
    pub fn list(&self) -> Vec<T> {
        let inner = self.read();
        let mut entries: Vec<_> = inner.entries.iter().filter(|(_, e)| e.exists).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, e)| e.object.clone()).collect()
    }

    /// Keys of all live objects, ordered
    pub fn keys(&self) -> Vec<ResourceKey> {
        let inner = self.read();
        let mut keys: Vec<_> = inner
            .entries
            .iter()
            .filter(|(_, e)| e.exists)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.read().entries.values().filter(|e| e.exists).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop tombstones observed more than `retention` ago; returns how many
    pub fn compact(&self, retention: Duration) -> usize {
        let mut inner = self.write();
        let before = inner.entries.len();
        let clock = &self.clock;
        inner
            .entries
            .retain(|_, entry| entry.exists || clock.since(entry.observed_at) <= retention);
        before - inner.entries.len()
    }

    /// True once a complete listing has been applied
    pub fn has_synced(&self) -> bool {
        *self.synced.borrow()
    }

    /// Receiver that flips to `true` when the store becomes synced
    pub fn synced(&self) -> watch::Receiver<bool> {
        self.synced.subscribe()
    }
}

fn valid_key<T: Object>(object: &T) -> Option<ResourceKey> {
    let key = object.key();
    match key.split() {
        Ok(_) => Some(key),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "skipping object with malformed key");
            None
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
