// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Clause inputs accepted by the query builder
//!
//! Mutators accept a single fragment, a list, an array or a slice. All of them
//! are normalized into a plain `Vec<String>` (or `Vec<OrderBy>`) before the
//! builder stores anything, so rendering only ever sees one shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can be turned into a sequence of clause fragments
pub trait IntoFragments {
    fn into_fragments(self) -> Vec<String>;
}

impl IntoFragments for &str {
    fn into_fragments(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoFragments for String {
    fn into_fragments(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoFragments for &String {
    fn into_fragments(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<T: IntoFragments> IntoFragments for Vec<T> {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().flat_map(IntoFragments::into_fragments).collect()
    }
}

impl<T: IntoFragments + Clone> IntoFragments for &[T] {
    fn into_fragments(self) -> Vec<String> {
        self.iter().cloned().flat_map(IntoFragments::into_fragments).collect()
    }
}

impl<T: IntoFragments, const N: usize> IntoFragments for [T; N] {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().flat_map(IntoFragments::into_fragments).collect()
    }
}

/// Split each fragment on commas and trim the parts, dropping empty ones
pub(crate) fn split_commas(fragments: Vec<String>) -> impl Iterator<Item = String> {
    fragments.into_iter().flat_map(|fragment| {
        fragment
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(alias = "asc", alias = "Asc", rename = "ASC")]
    Asc,
    #[serde(alias = "desc", alias = "Desc", rename = "DESC")]
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `ORDER BY` specifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
}

impl OrderBy {
    /// Ascending order on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: Some(Direction::Asc),
        }
    }

    /// Descending order on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: Some(Direction::Desc),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.dir.unwrap_or_default())
    }
}

impl From<&str> for OrderBy {
    fn from(field: &str) -> Self {
        Self {
            field: field.to_string(),
            dir: None,
        }
    }
}

impl From<String> for OrderBy {
    fn from(field: String) -> Self {
        Self { field, dir: None }
    }
}

impl<S: Into<String>> From<(S, Direction)> for OrderBy {
    fn from((field, dir): (S, Direction)) -> Self {
        Self {
            field: field.into(),
            dir: Some(dir),
        }
    }
}

/// Anything that can be turned into a sequence of order specifiers
pub trait IntoOrdering {
    fn into_ordering(self) -> Vec<OrderBy>;
}

impl IntoOrdering for OrderBy {
    fn into_ordering(self) -> Vec<OrderBy> {
        vec![self]
    }
}

impl IntoOrdering for &str {
    fn into_ordering(self) -> Vec<OrderBy> {
        vec![OrderBy::from(self)]
    }
}

impl IntoOrdering for String {
    fn into_ordering(self) -> Vec<OrderBy> {
        vec![OrderBy::from(self)]
    }
}

impl<S: Into<String>> IntoOrdering for (S, Direction) {
    fn into_ordering(self) -> Vec<OrderBy> {
        vec![OrderBy::from(self)]
    }
}

impl<T: IntoOrdering> IntoOrdering for Vec<T> {
    fn into_ordering(self) -> Vec<OrderBy> {
        self.into_iter().flat_map(IntoOrdering::into_ordering).collect()
    }
}

impl<T: IntoOrdering, const N: usize> IntoOrdering for [T; N] {
    fn into_ordering(self) -> Vec<OrderBy> {
        self.into_iter().flat_map(IntoOrdering::into_ordering).collect()
    }
}

/// The seven ordered fragment sequences of one builder node
///
/// Append order is kept verbatim; nothing is ever reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseSet {
    pub matches: Vec<String>,
    pub optional_matches: Vec<String>,
    pub wheres: Vec<String>,
    pub deletes: Vec<String>,
    pub sets: Vec<String>,
    pub returns: Vec<String>,
    pub order_by: Vec<OrderBy>,
}

/// Paging window: `SKIP skip LIMIT count`
///
/// The builder only stores windows with a positive `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub skip: u64,
    pub count: u64,
}

impl Limit {
    pub fn new(skip: u64, count: u64) -> Self {
        Self { skip, count }
    }
}

impl From<u64> for Limit {
    fn from(count: u64) -> Self {
        Self { skip: 0, count }
    }
}

impl From<(u64, u64)> for Limit {
    fn from((skip, count): (u64, u64)) -> Self {
        Self { skip, count }
    }
}

/// Bulk builder configuration, usually taken straight from a request
///
/// ```text
/// {"orderBy": [{"field": "u.name", "dir": "DESC"}], "skip": 20, "limit": 10}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl BuilderParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON value
    pub fn from_json(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_order_by(mut self, order: impl IntoOrdering) -> Self {
        self.order_by.extend(order.into_ordering());
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
