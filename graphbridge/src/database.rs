// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query executor
//!
//! [`Database`] is the handle applications hold. It sends query text and
//! parameters to the engine, waits for the response, and maps every record
//! into a [`ResultRow`]. Engine failures are classified before they reach the
//! caller.

use crate::builder::{BuilderParams, QueryBuilder};
use crate::config::DatabaseConfig;
use crate::engine::{AsyncEngine, BlockingGraphEngine, GraphEngine, Params};
use crate::error::{classify, Result};
use crate::result::ResultRow;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Handle to a graph engine
///
/// Cheap to clone; clones share the engine.
///
/// # Examples
///
/// ```no_run
/// use graphbridge::{Database, Params};
///
/// # async fn run(engine: impl graphbridge::GraphEngine + 'static) -> graphbridge::Result<()> {
/// let database = Database::new(engine);
/// let rows = database
///     .query("MATCH (user:User) RETURN user", &Params::new())
///     .await?;
///
/// for row in &rows {
///     if let Some(user) = row.get("user").and_then(|v| v.as_container()) {
///         println!("{:?}", user.property("name"));
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Database {
    engine: Arc<dyn GraphEngine>,
    config: DatabaseConfig,
}

impl Database {
    /// Create a database handle with configuration taken from the environment
    pub fn new(engine: impl GraphEngine + 'static) -> Self {
        Self::with_config(engine, DatabaseConfig::from_env())
    }

    pub fn with_config(engine: impl GraphEngine + 'static, config: DatabaseConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }

    /// Create a database handle over a blocking engine
    ///
    /// Every query runs on tokio's blocking thread pool.
    pub fn from_blocking(engine: impl BlockingGraphEngine) -> Self {
        Self::new(AsyncEngine::new(engine))
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run a query and map the returned records
    pub async fn query(&self, text: &str, params: &Params) -> Result<Vec<ResultRow>> {
        let debug = self.config.debug;
        let start = Instant::now();

        if debug {
            log::debug!("sending query: {}", text);
            if self.config.log_params && !params.is_empty() {
                match serde_json::to_string(params) {
                    Ok(json) => log::debug!("with params: {}", json),
                    Err(e) => log::warn!("could not serialize params for logging: {}", e),
                }
            }
        }

        let response = self.engine.run_query(text, params).await.map_err(|e| {
            let error = classify(e);
            log::debug!("query failed: {}", error);
            error
        })?;

        let received = Instant::now();
        if debug {
            log::debug!("result received");
            log::debug!("query took: {}ms", received.duration_since(start).as_millis());
            if !response.column_names.is_empty() {
                log::debug!("columns: {}", response.column_names.join(", "));
            }
            if !response.rows.is_empty() {
                log::debug!("{} records found", response.rows.len());
            }
        }

        let columns: Arc<[String]> = response.column_names.into();
        let rows: Vec<ResultRow> = response
            .rows
            .iter()
            .map(|record| ResultRow::from_native(Arc::clone(&columns), record))
            .collect();

        if debug && !rows.is_empty() {
            log::debug!("mapping results took: {}ms", received.elapsed().as_millis());
        }

        Ok(rows)
    }

    /// Start a query builder bound to this database
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::attached(self.clone())
    }

    /// Start a query builder with ordering and paging applied
    pub fn query_builder_with(&self, params: BuilderParams) -> QueryBuilder {
        let mut builder = self.query_builder();
        builder.params(params);
        builder
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
