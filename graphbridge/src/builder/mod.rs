// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query builder for composing Cypher statements from clause fragments
//!
//! A [`QueryBuilder`] collects fragments per clause and renders them in a fixed
//! clause order. Sub-queries hang off a node as continuations:
//!
//! - `WITH` continuation: a pipeline stage, rendered after `WITH <returns>`
//! - `UNION` continuation: an alternative, rendered after `UNION`
//!
//! Every continuation is owned by its parent and only points forward, so a
//! chain can never loop back on itself.
//!
//! # Examples
//!
//! ```no_run
//! use graphbridge::QueryBuilder;
//!
//! let mut query = QueryBuilder::new();
//! query
//!     .match_pattern("(person:Person)")
//!     .where_clause("person.name = \"Homer\"")
//!     .with_returns("person, count(person.name) as homers")
//!     .where_clause("homers > 1")
//!     .set("person.name = \"Homie\"")
//!     .returns("person.name");
//!
//! assert_eq!(
//!     query.render(),
//!     "MATCH (person:Person) WHERE person.name = \"Homer\" \
//!      WITH person, count(person.name) as homers \
//!      WHERE homers > 1 SET person.name = \"Homie\" RETURN person.name"
//! );
//! ```

pub mod clauses;
mod render;

pub use clauses::{
    BuilderParams, ClauseSet, Direction, IntoFragments, IntoOrdering, Limit, OrderBy,
};

use crate::database::Database;
use crate::engine::Params;
use crate::error::{Error, Result};
use crate::result::ResultRow;
use clauses::split_commas;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Fluent Cypher query builder
#[derive(Clone, Default)]
pub struct QueryBuilder {
    database: Option<Database>,
    start_points: BTreeMap<String, String>,
    clauses: ClauseSet,
    limit: Option<Limit>,
    counter: Option<String>,
    create: Option<String>,
    create_unique: Option<String>,
    params: Option<BuilderParams>,
    with: Option<Box<QueryBuilder>>,
    union: Option<Box<QueryBuilder>>,
}

impl QueryBuilder {
    /// Create a builder that is not attached to a database
    ///
    /// Such a builder can render queries; executing them fails with
    /// [`Error::Detached`].
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attached(database: Database) -> Self {
        Self {
            database: Some(database),
            ..Self::default()
        }
    }

    /// Add `START` points, e.g. `("u", "node:Users(\"name: Homer\")")`
    ///
    /// A later entry for the same identifier replaces the earlier one.
    pub fn start_at<I, K, V>(&mut self, points: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, expression) in points {
            self.start_points.insert(key.into(), expression.into());
        }
        self
    }

    /// Add `MATCH` patterns, comma-joined on render
    pub fn match_pattern(&mut self, patterns: impl IntoFragments) -> &mut Self {
        self.clauses.matches.extend(patterns.into_fragments());
        self
    }

    /// Add `OPTIONAL MATCH` patterns, each rendered as its own clause
    pub fn optional_match(&mut self, patterns: impl IntoFragments) -> &mut Self {
        self.clauses
            .optional_matches
            .extend(patterns.into_fragments());
        self
    }

    /// Add `WHERE` predicates, AND'ed together on render
    pub fn where_clause(&mut self, predicates: impl IntoFragments) -> &mut Self {
        self.clauses.wheres.extend(predicates.into_fragments());
        self
    }

    /// Add `DELETE` targets
    ///
    /// Comma separated strings are split into individual targets, so
    /// `"a, b"`, `["a", "b"]` and `vec!["a", "b"]` are equivalent.
    pub fn deletes(&mut self, targets: impl IntoFragments) -> &mut Self {
        self.clauses
            .deletes
            .extend(split_commas(targets.into_fragments()));
        self
    }

    /// Add `SET` assignments, e.g. `"n.name = 'Homer'"`
    pub fn set(&mut self, assignments: impl IntoFragments) -> &mut Self {
        self.clauses.sets.extend(assignments.into_fragments());
        self
    }

    /// Add `RETURN` expressions
    ///
    /// Comma separated strings are split into individual expressions.
    pub fn returns(&mut self, expressions: impl IntoFragments) -> &mut Self {
        self.clauses
            .returns
            .extend(split_commas(expressions.into_fragments()));
        self
    }

    /// Add `ORDER BY` specifiers
    ///
    /// ```no_run
    /// # use graphbridge::{QueryBuilder, OrderBy, Direction};
    /// let mut query = QueryBuilder::new();
    /// query.order_by(OrderBy::desc("person.name"));
    /// query.order_by([("person.age", Direction::Asc)]);
    /// query.order_by("person.id");
    /// ```
    pub fn order_by(&mut self, order: impl IntoOrdering) -> &mut Self {
        self.clauses.order_by.extend(order.into_ordering());
        self
    }

    /// Set the `CREATE` fragment
    pub fn create(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.create = Some(pattern.into());
        self
    }

    /// Set the `CREATE UNIQUE` fragment
    ///
    /// If a `CREATE` fragment is also set, only `CREATE` is rendered.
    pub fn create_unique(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.create_unique = Some(pattern.into());
        self
    }

    /// Override what the count query counts
    ///
    /// Needed when the returns use aggregates. With
    /// `returns("DISTINCT(u.surname) as surnames")` the default `COUNT(*)`
    /// would count users, while `count("DISTINCT(u.surname)")` counts the
    /// distinct surnames the query actually returns.
    pub fn count(&mut self, expression: impl Into<String>) -> &mut Self {
        self.counter = Some(expression.into());
        self
    }

    /// Limit the result to `count` rows
    pub fn limit(&mut self, count: u64) -> &mut Self {
        self.skip_limit(0, count)
    }

    /// Skip `skip` rows, then limit the result to `count` rows
    ///
    /// A zero `count` is ignored and leaves the current paging in place.
    pub fn skip_limit(&mut self, skip: u64, count: u64) -> &mut Self {
        if count == 0 {
            log::warn!("Ignoring limit 0 (skip {}), a limit must be positive", skip);
            return self;
        }
        self.limit = Some(Limit::new(skip, count));
        self
    }

    /// Apply bulk parameters (ordering and paging)
    ///
    /// The parameters are remembered and applied again to any fresh
    /// [`union`](Self::union) continuation.
    pub fn params(&mut self, params: BuilderParams) -> &mut Self {
        if !params.order_by.is_empty() {
            self.order_by(params.order_by.clone());
        }
        match (params.skip, params.limit) {
            (skip, Some(count)) => {
                self.skip_limit(skip.unwrap_or(0), count);
            }
            (Some(skip), None) => {
                log::warn!("Ignoring skip {} without a limit", skip);
            }
            (None, None) => {}
        }
        self.params = Some(params);
        self
    }

    /// Start a `WITH` pipeline stage and return it
    pub fn with(&mut self) -> &mut QueryBuilder {
        let child = self.fresh_child();
        self.with.insert(Box::new(child)).as_mut()
    }

    /// Pass `expressions` on via `WITH` and return the fresh next stage
    pub fn with_returns(&mut self, expressions: impl IntoFragments) -> &mut QueryBuilder {
        self.returns(expressions);
        self.with()
    }

    /// Attach an existing builder as the `WITH` stage and return it
    pub fn with_builder(&mut self, child: QueryBuilder) -> &mut QueryBuilder {
        self.with.insert(Box::new(child)).as_mut()
    }

    /// Start a `UNION` alternative and return it
    pub fn union(&mut self) -> &mut QueryBuilder {
        let mut child = self.fresh_child();
        if let Some(params) = self.params.clone() {
            child.params(params);
        }
        self.union.insert(Box::new(child)).as_mut()
    }

    /// Attach an existing builder as the `UNION` alternative and return it
    pub fn union_builder(&mut self, child: QueryBuilder) -> &mut QueryBuilder {
        self.union.insert(Box::new(child)).as_mut()
    }

    /// Render the query text
    pub fn render(&self) -> String {
        self.build(false)
    }

    /// Render the count variant of the query
    ///
    /// The outermost return branch becomes `RETURN COUNT(..) as count`, without
    /// create, delete, set, paging or union parts.
    pub fn render_count(&self) -> String {
        self.build(true)
    }

    /// Execute the query and return the mapped rows
    pub async fn execute(&self, params: &Params) -> Result<Vec<ResultRow>> {
        let database = self.database.as_ref().ok_or(Error::Detached)?;
        database.query(&self.render(), params).await
    }

    /// Count the rows the query would return, ignoring paging
    ///
    /// Answers without contacting the engine when the limit is exactly one row
    /// (the answer is 1) or when there is nothing to return (the answer is 0).
    pub async fn get_count(&self, params: &Params) -> Result<i64> {
        if matches!(self.limit, Some(Limit { count: 1, .. })) {
            return Ok(1);
        }
        if self.clauses.returns.is_empty() {
            return Ok(0);
        }

        let database = self.database.as_ref().ok_or(Error::Detached)?;
        let rows = database.query(&self.render_count(), params).await?;

        let row = rows
            .first()
            .ok_or_else(|| Error::InvalidCount("no rows returned".to_string()))?;
        let value = row
            .get("count")
            .ok_or_else(|| Error::InvalidCount("missing count column".to_string()))?;

        value
            .as_i64()
            .ok_or_else(|| Error::InvalidCount(format!("{:?}", value)))
    }

    /// Escape a token for an index-search expression, see [`crate::escape::escape`]
    pub fn escape(value: &str) -> Cow<'_, str> {
        crate::escape::escape(value)
    }

    /// Escape `*` characters, see [`crate::escape::escape_stars`]
    pub fn escape_stars(value: &str) -> Cow<'_, str> {
        crate::escape::escape_stars(value)
    }

    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    pub fn start_points(&self) -> &BTreeMap<String, String> {
        &self.start_points
    }

    pub fn paging(&self) -> Option<Limit> {
        self.limit
    }

    pub fn counter(&self) -> Option<&str> {
        self.counter.as_deref()
    }

    /// The `WITH` stage, if any
    pub fn with_continuation(&self) -> Option<&QueryBuilder> {
        self.with.as_deref()
    }

    /// The `UNION` alternative, if any
    pub fn union_continuation(&self) -> Option<&QueryBuilder> {
        self.union.as_deref()
    }

    /// The database this builder executes against, if attached
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    fn fresh_child(&self) -> QueryBuilder {
        QueryBuilder {
            database: self.database.clone(),
            ..QueryBuilder::default()
        }
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("attached", &self.database.is_some())
            .field("start_points", &self.start_points)
            .field("clauses", &self.clauses)
            .field("limit", &self.limit)
            .field("counter", &self.counter)
            .field("create", &self.create)
            .field("create_unique", &self.create_unique)
            .field("with", &self.with)
            .field("union", &self.union)
            .finish()
    }
}
