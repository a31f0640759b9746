// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types and engine error classification
//!
//! Engine failures arrive as chained native error text. [`classify`] turns them
//! into a [`StructuredError`] so callers never have to look at the raw trace.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Errors returned by graphbridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// The engine rejected or failed the query
    #[error("Engine error: {0}")]
    Engine(#[from] StructuredError),

    /// The builder has no database to run against
    #[error("Query builder is not attached to a database")]
    Detached,

    /// A count query did not yield a usable integer
    #[error("Invalid count result: {0}")]
    InvalidCount(String),

    /// A text value was not a valid 64-bit integer literal
    #[error("Not an integer literal: {0:?}")]
    InvalidInteger(String),

    /// JSON (de)serialization failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for graphbridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Raw failure reported by the graph engine
///
/// `description` is the full text representation (usually a stack trace with
/// `Caused by:` lines). `message` is the engine's own short message, when it
/// exposes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    description: String,
    message: Option<String>,
}

impl EngineError {
    /// Create an engine error from its text representation
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            message: None,
        }
    }

    /// Attach the engine's own message accessor value
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Full text representation
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The engine's own message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl std::error::Error for EngineError {}

impl From<&str> for EngineError {
    fn from(description: &str) -> Self {
        EngineError::new(description)
    }
}

impl From<String> for EngineError {
    fn from(description: String) -> Self {
        EngineError::new(description)
    }
}

/// Normalized engine failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", display_structured(.class_name, .message))]
pub struct StructuredError {
    class_name: Option<String>,
    message: String,
    #[source]
    cause: EngineError,
}

fn display_structured(class_name: &Option<String>, message: &str) -> String {
    match class_name {
        Some(class_name) => format!("{}: {}", class_name, message),
        None => message.to_string(),
    }
}

impl StructuredError {
    /// Fully qualified class name of the innermost cause, when recognized
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Human readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw engine error this was derived from
    pub fn cause(&self) -> &EngineError {
        &self.cause
    }

    /// Check whether the innermost cause is of the given class
    pub fn instance_of(&self, class_name: &str) -> bool {
        self.class_name.as_deref() == Some(class_name)
    }
}

static CAUSED_BY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Caused by: ([\w.]*): (.*)").expect("static pattern compiles")
});

/// Classify a raw engine failure
///
/// Looks for the first `Caused by: <dotted.ClassName>: <message>` line in the
/// error text. Without one, the message falls back to the engine's own message
/// and then to the full text. Never fails.
pub fn classify(raw: impl Into<EngineError>) -> StructuredError {
    let cause = raw.into();

    if let Some(captures) = CAUSED_BY.captures(cause.description()) {
        let class_name = captures.get(1).map(|m| m.as_str().to_string());
        let message = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        log::debug!(
            "Classified engine error as {}",
            class_name.as_deref().unwrap_or("<anonymous>")
        );
        return StructuredError {
            class_name,
            message,
            cause,
        };
    }

    let message = cause
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| cause.description().to_string());

    StructuredError {
        class_name: None,
        message,
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_classify_caused_by() {
        let err = classify(
            "org.neo4j.graphdb.QueryExecutionException: wrapped\n\
             Caused by: java.lang.NullPointerException: boom",
        );
        assert_eq!(err.class_name(), Some("java.lang.NullPointerException"));
        assert_eq!(err.message(), "boom");
        assert!(err.instance_of("java.lang.NullPointerException"));
        assert!(!err.instance_of("java.lang.IllegalStateException"));
    }

    #[test]
    fn test_classify_first_cause_wins() {
        let err = classify("Caused by: a.First: one\nCaused by: b.Second: two");
        assert_eq!(err.class_name(), Some("a.First"));
        assert_eq!(err.message(), "one");
    }

    #[test]
    fn test_classify_plain_text() {
        let err = classify("plain failure");
        assert_eq!(err.class_name(), None);
        assert_eq!(err.message(), "plain failure");
        assert_eq!(err.cause().description(), "plain failure");
    }

    #[test]
    fn test_classify_prefers_engine_message() {
        let raw = EngineError::new("java.lang.RuntimeException: long trace\n\tat Foo.bar")
            .with_message("short");
        let err = classify(raw);
        assert_eq!(err.class_name(), None);
        assert_eq!(err.message(), "short");
    }

    #[test]
    fn test_classify_empty_input() {
        let err = classify("");
        assert_eq!(err.class_name(), None);
        assert_eq!(err.message(), "");
    }

    #[test]
    fn test_structured_error_display_and_source() {
        let err = classify("Caused by: java.io.IOException: disk full");
        assert_eq!(err.to_string(), "java.io.IOException: disk full");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("Caused by: java.io.IOException: disk full")
        );

        let plain = classify("nope");
        assert_eq!(plain.to_string(), "nope");
    }

    #[test]
    fn test_error_from_structured() {
        let err: Error = classify("boom").into();
        assert!(matches!(err, Error::Engine(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
