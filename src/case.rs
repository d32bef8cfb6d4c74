// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key decamelization for request bodies and query strings
//!
//! Backends expect `snake_case` field names while callers build payloads with
//! `camelCase` keys. Keys made only of capitals, digits and underscores
//! (`ID`, `HTTP_PROXY`) are constants rather than words and are kept verbatim.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static! {
    static ref ALL_CAPS: Regex = Regex::new(r"^[A-Z0-9_]+$").unwrap();
}

/// True for keys that must not be split into words
pub fn is_all_caps(key: &str) -> bool {
    ALL_CAPS.is_match(key)
}

/// Convert a single `camelCase` identifier to `snake_case`
///
/// Every ASCII capital after the first character starts a new word.
pub fn decamelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// Decamelize a key unless it is an all-caps constant
pub fn decamelize_key(key: &str) -> String {
    if is_all_caps(key) {
        key.to_string()
    } else {
        decamelize(key)
    }
}

/// Recursively decamelize every object key in a JSON value
///
/// Arrays are walked so objects nested inside them are converted too.
/// Scalars pass through untouched.
pub fn decamelize_keys(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (decamelize_key(&k), decamelize_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(decamelize_keys).collect()),
        other => other,
    }
}
