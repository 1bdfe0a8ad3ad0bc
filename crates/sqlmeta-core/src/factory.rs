// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity factory and metadata cache.
//!
//! [`EntityFactory`] resolves each [`Persistent`] type once and hands out the
//! same [`Arc<Entity>`] afterwards. Concurrent first lookups race on a
//! [`DashMap`] entry: exactly one caller builds, the others observe its
//! result.
//!
//! ```text
//! get::<Person>() ──► cache hit? ──yes──► Arc<Entity>
//!                         │
//!                         no
//!                         ▼
//!                  entry(TypeId) (shard locked)
//!                         │
//!          occupied ◄─────┴─────► vacant: Entity::of::<Person>(config)
//! ```
//!
//! Entries are never evicted; [`EntityFactory::clear`] exists for test
//! isolation.

use std::{
    any::TypeId,
    fmt,
    sync::{Arc, OnceLock}
};

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;

use crate::{
    config::{ConfigSource, EnvConfig},
    error::Result,
    metadata::{Entity, Persistent}
};

static GLOBAL: OnceLock<EntityFactory> = OnceLock::new();

/// Caching entity metadata factory.
pub struct EntityFactory {
    config: Arc<dyn ConfigSource>,
    cache:  DashMap<TypeId, Arc<Entity>>
}

impl EntityFactory {
    /// Factory reading configuration from `config`.
    pub fn new(config: impl ConfigSource + 'static) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    /// Factory over an already shared configuration source.
    pub fn with_shared_config(config: Arc<dyn ConfigSource>) -> Self {
        Self {
            config,
            cache: DashMap::new()
        }
    }

    /// Process-wide factory.
    ///
    /// Initialized on first use from [`EnvConfig`] unless
    /// [`EntityFactory::init_global`] ran first.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(EnvConfig::default()))
    }

    /// Initialize the process-wide factory with explicit configuration.
    ///
    /// Returns `false` when the global factory already exists; the existing
    /// instance is kept.
    pub fn init_global(config: impl ConfigSource + 'static) -> bool {
        GLOBAL.set(Self::new(config)).is_ok()
    }

    /// Metadata of `T`, resolving and caching it on first use.
    ///
    /// # Errors
    ///
    /// Resolution errors from [`Entity::resolve`]. Failed resolutions are not
    /// cached.
    pub fn get<T: Persistent>(&self) -> Result<Arc<Entity>> {
        let key = TypeId::of::<T>();
        if let Some(entity) = self.cache.get(&key) {
            return Ok(Arc::clone(entity.value()));
        }

        match self.cache.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let entity = Arc::new(Entity::of::<T>(self.config.as_ref())?);
                debug!(entity = %entity.name(), "cached entity metadata");
                Ok(Arc::clone(entry.insert(entity).value()))
            }
        }
    }

    /// Configuration used for resolution.
    pub fn config(&self) -> &dyn ConfigSource {
        self.config.as_ref()
    }

    /// Check if `T` is already cached.
    pub fn contains<T: Persistent>(&self) -> bool {
        self.cache.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached entities.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached entity.
    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityFactory")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
