// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Mapped result rows

use crate::engine::NativeValue;
use crate::mapper::{map, MappedValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Single result row: return-column name to mapped value
///
/// Columns keep the order declared by the query. Rows of one result share the
/// column list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    columns: Arc<[String]>,
    values: Vec<MappedValue>,
}

impl ResultRow {
    /// Map one raw record against the shared column list
    ///
    /// Missing trailing values map to null; surplus values are dropped.
    pub fn from_native(columns: Arc<[String]>, record: &[NativeValue]) -> Self {
        let values = (0..columns.len())
            .map(|i| record.get(i).map(map).unwrap_or(MappedValue::Null))
            .collect();
        Self { columns, values }
    }

    /// Build a row from already mapped `(column, value)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, MappedValue)>,
        K: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<MappedValue>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self {
            columns: columns.into(),
            values,
        }
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&MappedValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Get a value by position
    pub fn get_at(&self, position: usize) -> Option<&MappedValue> {
        self.values.get(position)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappedValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Convert the row to a JSON object
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_json()))
            .collect();
        Value::Object(object)
    }

    /// Deserialize the row into `T` through its JSON form
    pub fn deserialize<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}
