// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Escaping for index-search expressions and integer literal probing
//!
//! Index lookups in `START` clauses take Lucene-style query strings, e.g.
//! `node:Users("name: Homer")`. User supplied tokens have to be escaped before
//! they are spliced into such an expression.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static BOOLEAN_OPERATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(AND|OR|NOT)\b").expect("static pattern compiles"));

/// Characters with structural meaning in index queries
const STRUCTURAL: &[char] = &[
    '+', '-', '&', '!', '|', '(', ')', '{', '}', '[', ']', '^', '"', '~', '?', ':', '\\',
];

fn needs_structural_escape(s: &str) -> bool {
    s.chars().any(|c| STRUCTURAL.contains(&c))
}

/// Escape a token for inclusion in an index-search expression
///
/// Structural characters are backslash-escaped first, then the whole-word
/// boolean operators `AND`, `OR` and `NOT` (any case, case preserved). `*` is
/// left alone, see [`escape_stars`].
///
/// Whitespace (spaces, tabs, newlines) is left unescaped, so a multi-word
/// token stays a multi-word search. Callers that need a single term must
/// quote it or split it themselves.
///
/// ```text
/// a+b AND c  ->  a\+b \AND c
/// ```
pub fn escape(value: &str) -> Cow<'_, str> {
    let structural: Cow<'_, str> = if needs_structural_escape(value) {
        let mut escaped = String::with_capacity(value.len() + 8);
        for c in value.chars() {
            if STRUCTURAL.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    };

    if !BOOLEAN_OPERATORS.is_match(&structural) {
        return structural;
    }

    Cow::Owned(
        BOOLEAN_OPERATORS
            .replace_all(&structural, r"\$1")
            .into_owned(),
    )
}

/// Escape literal `*` characters for wildcard-capable index searches
pub fn escape_stars(value: &str) -> Cow<'_, str> {
    if !value.contains('*') {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace('*', r"\*"))
}

/// Parse a 64-bit signed integer literal
///
/// Accepts an optional leading `+` or `-` followed by ASCII digits, nothing
/// else (no whitespace, no underscores, no exponent).
pub fn parse_long(value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| Error::InvalidInteger(value.to_string()))
}

/// Check whether `value` is a valid 64-bit integer literal
pub fn is_long(value: &str) -> bool {
    parse_long(value).is_ok()
}
