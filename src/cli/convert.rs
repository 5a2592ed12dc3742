//! gtoml Value -> JSON conversion

use rust_decimal::prelude::ToPrimitive;

use crate::{Document, Value};

/// Convert a gtoml Value to serde_json::Value
///
/// Table entries keep document order. Decimals that do not fit an `f64` are emitted as their text.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(d) => d
            .to_f64()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(d.to_string())),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Table(entries) => {
            let mut object = serde_json::Map::new();
            for (k, v) in entries {
                // First occurrence wins, as in the query engine
                if !object.contains_key(&k) {
                    object.insert(k, value_to_json(v));
                }
            }
            serde_json::Value::Object(object)
        }
    }
}

/// The whole document as a JSON object
pub fn document_to_json(document: &Document) -> serde_json::Value {
    value_to_json(document.to_value())
}
