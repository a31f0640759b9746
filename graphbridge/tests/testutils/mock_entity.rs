//! In-memory native entities

use graphbridge::{NativeCollection, NativeEntity, NativeValue};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Node-like entity with fixed labels and properties
#[derive(Debug, Default)]
pub struct MockEntity {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, Value>,
    pub synonym: Option<Arc<dyn NativeEntity>>,
    pub bulk_fetches: AtomicUsize,
}

impl MockEntity {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.labels.push(label.to_string());
        self
    }

    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn with_synonym(mut self, peer: MockEntity) -> Self {
        self.synonym = Some(Arc::new(peer));
        self
    }

    pub fn bulk_fetches(&self) -> usize {
        self.bulk_fetches.load(Ordering::SeqCst)
    }
}

impl NativeEntity for MockEntity {
    fn id(&self) -> i64 {
        self.id
    }

    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn properties(&self) -> Vec<(String, Value)> {
        self.bulk_fetches.fetch_add(1, Ordering::SeqCst);
        self.properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn synonym(&self) -> Option<Arc<dyn NativeEntity>> {
        self.synonym.clone()
    }
}

/// Engine-side bulk collection
#[derive(Debug)]
pub struct MockCollection(pub Vec<NativeValue>);

impl NativeCollection for MockCollection {
    fn to_vec(&self) -> Vec<NativeValue> {
        self.0.clone()
    }
}

/// A `User` node with a `name` property
pub fn user(id: i64, name: &str) -> MockEntity {
    MockEntity::new(id)
        .with_label("User")
        .with_property("name", name)
}
