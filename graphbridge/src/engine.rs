// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph engine interface
//!
//! The engine itself (storage, transactions, Cypher execution) lives outside
//! this crate. Everything graphbridge needs from it is declared here:
//!
//! - [`GraphEngine`]: the asynchronous query entry point the executor calls
//! - [`BlockingGraphEngine`]: the same operation as a blocking call, which is
//!   what embedded engines usually provide
//! - [`AsyncEngine`]: runs a [`BlockingGraphEngine`] on tokio's blocking pool
//!   so it can be used as a [`GraphEngine`]
//! - [`NativeEntity`] / [`NativeCollection`]: raw handles returned in rows

use crate::error::EngineError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Bound query parameters
pub type Params = HashMap<String, Value>;

/// A node or relationship handle owned by the engine
pub trait NativeEntity: fmt::Debug + Send + Sync {
    /// Native identifier
    fn id(&self) -> i64;

    /// Labels attached to the entity, in engine order
    fn labels(&self) -> Vec<String>;

    /// Single property lookup
    fn property(&self, name: &str) -> Option<Value>;

    /// Single property lookup with a fallback supplied to the engine
    fn property_or(&self, name: &str, default: Value) -> Value {
        self.property(name).unwrap_or(default)
    }

    /// All properties as `(name, value)` pairs
    fn properties(&self) -> Vec<(String, Value)>;

    /// Existence check for a property
    fn has_property(&self, name: &str) -> bool;

    /// Peer entity the engine considers equivalent to this one
    fn synonym(&self) -> Option<Arc<dyn NativeEntity>> {
        None
    }
}

/// A bulk collection handle owned by the engine
pub trait NativeCollection: fmt::Debug + Send + Sync {
    /// Copy the collection out into a plain sequence
    fn to_vec(&self) -> Vec<NativeValue>;
}

/// A raw column value as returned by the engine
#[derive(Debug, Clone)]
pub enum NativeValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<NativeValue>),
    Entity(Arc<dyn NativeEntity>),
    Collection(Arc<dyn NativeCollection>),
}

impl NativeValue {
    /// Wrap an entity handle
    pub fn entity<E: NativeEntity + 'static>(entity: E) -> Self {
        NativeValue::Entity(Arc::new(entity))
    }

    /// Wrap a collection handle
    pub fn collection<C: NativeCollection + 'static>(collection: C) -> Self {
        NativeValue::Collection(Arc::new(collection))
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Boolean(b)
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        NativeValue::Integer(n)
    }
}

impl From<f64> for NativeValue {
    fn from(n: f64) -> Self {
        NativeValue::Float(n)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::String(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::String(s)
    }
}

impl<T: Into<NativeValue>> From<Vec<T>> for NativeValue {
    fn from(items: Vec<T>) -> Self {
        NativeValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Raw response to a query
#[derive(Debug, Clone, Default)]
pub struct QueryResponse {
    /// Declared return columns, in order
    pub column_names: Vec<String>,
    /// One entry per record, positionally aligned with `column_names`
    pub rows: Vec<Vec<NativeValue>>,
}

impl QueryResponse {
    /// Create an empty response with the given columns
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            rows: Vec::new(),
        }
    }

    /// Append a record
    pub fn with_row(mut self, row: Vec<NativeValue>) -> Self {
        self.rows.push(row);
        self
    }
}

/// Asynchronous query interface consumed by the executor
#[async_trait]
pub trait GraphEngine: Send + Sync {
    /// Run a query with bound parameters
    async fn run_query(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError>;
}

/// Blocking query interface, as exposed by embedded engines
pub trait BlockingGraphEngine: Send + Sync + 'static {
    /// Run a query with bound parameters, blocking the calling thread
    fn run_query(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError>;
}

/// Async wrapper around a [`BlockingGraphEngine`]
///
/// Each call is moved onto tokio's blocking thread pool. A panic inside the
/// engine call comes back as an [`EngineError`].
pub struct AsyncEngine<E> {
    inner: Arc<E>,
}

impl<E: BlockingGraphEngine> AsyncEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Arc::new(engine),
        }
    }
}

impl<E> Clone for AsyncEngine<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<E: BlockingGraphEngine> GraphEngine for AsyncEngine<E> {
    async fn run_query(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError> {
        let engine = Arc::clone(&self.inner);
        let text = text.to_string();
        let params = params.clone();

        tokio::task::spawn_blocking(move || {
            BlockingGraphEngine::run_query(&*engine, &text, &params)
        })
        .await
        .map_err(|e| EngineError::new(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl<T: GraphEngine + ?Sized> GraphEngine for Arc<T> {
    async fn run_query(&self, text: &str, params: &Params) -> Result<QueryResponse, EngineError> {
        (**self).run_query(text, params).await
    }
}
