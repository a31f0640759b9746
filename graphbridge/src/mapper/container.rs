// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plain view over a native node or relationship

use crate::engine::NativeEntity;
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Mapped graph entity with identity, labels and lazily fetched properties
///
/// Properties are fetched from the engine in one go on the first call to
/// [`properties`](Self::properties) and cached for the lifetime of the
/// container. The cache is filled at most once; concurrent first readers wait
/// for the single fetch.
///
/// The synonym peer is not stored as a container. Only the native handle is
/// kept, and [`synonym`](Self::synonym) wraps it on demand, so containers never
/// own each other.
#[derive(Clone)]
pub struct MappedContainer {
    native: Arc<dyn NativeEntity>,
    properties: Arc<OnceCell<HashMap<String, Value>>>,
}

impl MappedContainer {
    /// Wrap a native entity handle
    pub fn new(native: Arc<dyn NativeEntity>) -> Self {
        Self {
            native,
            properties: Arc::new(OnceCell::new()),
        }
    }

    /// Native identifier rendered as text
    pub fn id(&self) -> String {
        self.native.id().to_string()
    }

    /// Labels as reported by the engine
    pub fn labels(&self) -> Vec<String> {
        self.native.labels()
    }

    /// Check if the entity carries a label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels().iter().any(|l| l == label)
    }

    /// Get a property value
    ///
    /// Served from the cache when the full property map has been fetched and
    /// contains `name`, otherwise asked from the engine.
    pub fn property(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.cached(name) {
            return Some(value);
        }
        self.native.property(name)
    }

    /// Get a property value, letting the engine fall back to `default`
    pub fn property_or(&self, name: &str, default: Value) -> Value {
        if let Some(value) = self.cached(name) {
            return value;
        }
        self.native.property_or(name, default)
    }

    /// All properties, fetched on first use
    pub fn properties(&self) -> &HashMap<String, Value> {
        self.properties.get_or_init(|| {
            log::trace!("Materializing properties of entity {}", self.native.id());
            self.native.properties().into_iter().collect()
        })
    }

    /// Whether the property map has been fetched yet
    pub fn is_materialized(&self) -> bool {
        self.properties.get().is_some()
    }

    pub fn has_property(&self, name: &str) -> bool {
        match self.properties.get() {
            Some(properties) => properties.contains_key(name),
            None => self.native.has_property(name),
        }
    }

    /// The engine's equivalent peer entity, if any
    pub fn synonym(&self) -> Option<MappedContainer> {
        self.native.synonym().map(MappedContainer::new)
    }

    /// Identifier of the peer entity, if any
    pub fn synonym_id(&self) -> Option<String> {
        self.native.synonym().map(|peer| peer.id().to_string())
    }

    /// Snapshot as `{"id": .., "labels": [..], "properties": {..}}`
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        serde_json::json!({
            "id": self.id(),
            "labels": self.labels(),
            "properties": properties,
        })
    }

    fn cached(&self, name: &str) -> Option<Value> {
        self.properties
            .get()
            .and_then(|properties| properties.get(name).cloned())
    }
}

impl fmt::Debug for MappedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedContainer")
            .field("id", &self.native.id())
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

impl PartialEq for MappedContainer {
    fn eq(&self, other: &Self) -> bool {
        self.native.id() == other.native.id()
    }
}
