//! Normalization of upstream list responses.
//!
//! Upstream services disagree on the shape of a list response. The records may
//! sit under `items`, `data`, or a key named after the resource, or the body
//! may be a bare array. The total may be reported as `total`, `totalItems`,
//! `total_items` or `count`, or not at all, in which case the list length is
//! the total.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::repository::errors::{RepositoryError, RepositoryResult};

const LIST_KEYS: [&str; 2] = ["items", "data"];
const TOTAL_KEYS: [&str; 4] = ["total", "totalItems", "total_items", "count"];

fn malformed(resource: &str, detail: &str) -> RepositoryError {
    RepositoryError::Unexpected(format!("Malformed {resource} response: {detail}"))
}

fn take_total(object: &Map<String, Value>) -> Option<usize> {
    TOTAL_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Extracts the record array and the total from any supported shape.
pub fn normalize_list(body: Value, resource: &str) -> RepositoryResult<(usize, Vec<Value>)> {
    match body {
        Value::Array(items) => Ok((items.len(), items)),
        Value::Object(mut object) => {
            let total = take_total(&object);
            let items = LIST_KEYS
                .iter()
                .copied()
                .chain(std::iter::once(resource))
                .find_map(|key| match object.remove(key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .ok_or_else(|| malformed(resource, "no record list"))?;
            Ok((total.unwrap_or(items.len()), items))
        }
        _ => Err(malformed(resource, "expected an object or an array")),
    }
}

/// [`normalize_list`] followed by typed decoding of every record.
pub fn decode_list<T: DeserializeOwned>(
    body: Value,
    resource: &str,
) -> RepositoryResult<(usize, Vec<T>)> {
    let (total, items) = normalize_list(body, resource)?;
    let items = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| malformed(resource, &e.to_string()))?;
    Ok((total, items))
}

/// Decodes a single record that may be wrapped under `data` or its own name.
pub fn unwrap_single<T: DeserializeOwned>(body: Value, name: &str) -> RepositoryResult<T> {
    let inner = match body {
        Value::Object(mut object) if object.len() == 1 => {
            match object.remove("data").or_else(|| object.remove(name)) {
                Some(inner @ Value::Object(_)) => inner,
                Some(other) => return Err(malformed(name, &format!("unexpected {other}"))),
                None => Value::Object(object),
            }
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| malformed(name, &e.to_string()))
}
