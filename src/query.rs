// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Query string encoding with bracketed arrays

use std::collections::BTreeMap;

use crate::case::decamelize_key;
use crate::options::QueryValue;

/// Encode query parameters as a query string (without the leading `?`)
///
/// Keys are decamelized and emitted in sorted order. Multi-valued entries
/// become `key[]=a&key[]=b`, keeping the caller's value order. An empty
/// list contributes nothing.
pub fn encode_query(query: &BTreeMap<String, QueryValue>) -> String {
    let decamelized: BTreeMap<String, &QueryValue> = query
        .iter()
        .map(|(key, value)| (decamelize_key(key), value))
        .collect();

    let mut pairs = Vec::with_capacity(decamelized.len());
    for (key, value) in &decamelized {
        let key = urlencoding::encode(key);
        match value {
            QueryValue::One(v) => pairs.push(format!("{}={}", key, urlencoding::encode(v))),
            QueryValue::Many(values) => {
                for v in values {
                    pairs.push(format!("{}[]={}", key, urlencoding::encode(v)));
                }
            }
        }
    }
    pairs.join("&")
}
