// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphBridge - Composable Cypher queries over embedded graph engines
//!
//! GraphBridge sits between application code and a graph engine that speaks
//! Cypher. It builds query text from clause fragments, runs it with bound
//! parameters, and hands back plain rows instead of engine handles.
//!
//! # Quick Start
//!
//! ```no_run
//! use graphbridge::{Database, OrderBy, Params};
//!
//! # async fn run(database: Database) -> graphbridge::Result<()> {
//! let mut query = database.query_builder();
//! query
//!     .match_pattern("(user:User)")
//!     .where_clause("user.name =~ {pattern}")
//!     .returns("user")
//!     .order_by(OrderBy::asc("user.name"))
//!     .skip_limit(20, 10);
//!
//! let mut params = Params::new();
//! params.insert("pattern".into(), "Ho.*".into());
//!
//! let total = query.get_count(&params).await?;
//! let page = query.execute(&params).await?;
//! println!("{} of {} users", page.len(), total);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code                      │
//! └─────────────────────────────────────────┘
//!                  │  QueryBuilder / Database::query
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  GraphBridge (this crate)               │
//! │  - builder   (clause composition)       │
//! │  - database  (query executor)           │
//! │  - mapper    (native → plain values)    │
//! │  - error     (engine error classifier)  │
//! │  - escape    (index query escaping)     │
//! └─────────────────────────────────────────┘
//!                  │  GraphEngine / BlockingGraphEngine
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  Graph engine (external)                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`builder`] - Query builder and clause inputs
//! - [`database`] - Query execution and result mapping
//! - [`engine`] - Engine interface and blocking adapter
//! - [`mapper`] - Native value mapping
//! - [`result`] - Result rows
//! - [`error`] - Error types and classification
//! - [`escape`] - Index query escaping and integer probing
//! - [`config`] - Executor configuration
//! - [`logging`] - Logger setup

pub mod builder;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod escape;
pub mod logging;
pub mod mapper;
pub mod result;

// Re-export main types for convenience
pub use builder::{BuilderParams, ClauseSet, Direction, Limit, OrderBy, QueryBuilder};
pub use config::DatabaseConfig;
pub use database::Database;
pub use engine::{
    AsyncEngine, BlockingGraphEngine, GraphEngine, NativeCollection, NativeEntity, NativeValue,
    Params, QueryResponse,
};
pub use error::{classify, EngineError, Error, Result, StructuredError};
pub use escape::{escape, escape_stars, is_long, parse_long};
pub use mapper::{map, MappedContainer, MappedValue};
pub use result::ResultRow;

/// GraphBridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
