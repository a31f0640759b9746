// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result mapping from native engine values to plain values
//!
//! [`map`] dispatches on the shape of a [`NativeValue`], in this order:
//!
//! 1. null stays null
//! 2. entity handles become [`MappedContainer`]s
//! 3. native bulk collections are copied out and mapped element-wise
//! 4. plain lists are mapped element-wise
//! 5. scalars pass through unchanged
//!
//! Unrecognized shapes are treated as already plain; mapping never fails.

pub mod container;

pub use container::MappedContainer;

use crate::engine::NativeValue;
use crate::escape::parse_long;
use serde_json::Value;

/// A plain value produced by the result mapper
#[derive(Debug, Clone, PartialEq)]
pub enum MappedValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Container(MappedContainer),
    List(Vec<MappedValue>),
}

impl MappedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, MappedValue::Null)
    }

    /// Borrow the container, if this is one
    pub fn as_container(&self) -> Option<&MappedContainer> {
        match self {
            MappedValue::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MappedValue]> {
        match self {
            MappedValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MappedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MappedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Interpret the value as a 64-bit integer
    ///
    /// Integers are returned as is, floats only when they have no fractional
    /// part and fit in 64 bits, and text only when it is a valid integer
    /// literal. Engines hand large counts back in any of these forms.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MappedValue::Integer(n) => Some(*n),
            MappedValue::Float(f) if f.fract() == 0.0 && in_i64_range(*f) => Some(*f as i64),
            MappedValue::String(s) => parse_long(s).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MappedValue::Integer(n) => Some(*n as f64),
            MappedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert to JSON, materializing container properties
    pub fn to_json(&self) -> Value {
        match self {
            MappedValue::Null => Value::Null,
            MappedValue::Boolean(b) => Value::Bool(*b),
            MappedValue::Integer(n) => Value::from(*n),
            MappedValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            MappedValue::String(s) => Value::String(s.clone()),
            MappedValue::Container(container) => container.to_json(),
            MappedValue::List(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
        }
    }
}

// `i64::MAX as f64` rounds up to 2^63, which is already out of range
fn in_i64_range(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Map a native value to a plain value
pub fn map(value: &NativeValue) -> MappedValue {
    match value {
        NativeValue::Null => MappedValue::Null,
        NativeValue::Entity(entity) => MappedValue::Container(MappedContainer::new(entity.clone())),
        NativeValue::Collection(collection) => {
            MappedValue::List(collection.to_vec().iter().map(map).collect())
        }
        NativeValue::List(items) => MappedValue::List(items.iter().map(map).collect()),
        NativeValue::Boolean(b) => MappedValue::Boolean(*b),
        NativeValue::Integer(n) => MappedValue::Integer(*n),
        NativeValue::Float(f) => MappedValue::Float(*f),
        NativeValue::String(s) => MappedValue::String(s.clone()),
    }
}
