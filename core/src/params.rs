//! Query and body parameters.
//!
//! # Design
//! Parameters are a tagged value type rather than arbitrary dynamic values,
//! so the builder can render a query string and serialize a JSON body
//! without inspecting types at runtime. `Params` is a `BTreeMap`: rendering
//! order is sorted by name and therefore deterministic.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Named parameters for a query string or a JSON body.
pub type Params = BTreeMap<String, ParamValue>;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ParamValue>),
    Map(Params),
}

impl ParamValue {
    /// JSON form of this value. `None` when the value has no JSON
    /// representation (a NaN or infinite float, at any depth).
    pub fn to_json(&self) -> Option<Value> {
        Some(match self {
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Int(n) => Value::Number((*n).into()),
            ParamValue::Float(f) => Value::Number(Number::from_f64(*f)?),
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Null => Value::Null,
            ParamValue::List(items) => {
                Value::Array(items.iter().map(ParamValue::to_json).collect::<Option<_>>()?)
            }
            ParamValue::Map(params) => Value::Object(params_to_json(params)?),
        })
    }

    /// Convert a JSON value. Numbers that fit an `i64` stay integers.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Int(i),
                None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::from_json).collect())
            }
            Value::Object(map) => ParamValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ParamValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Text used for this value inside a query string, before encoding.
    pub fn to_query_text(&self) -> String {
        match self {
            ParamValue::String(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Null => "null".to_string(),
            ParamValue::List(_) | ParamValue::Map(_) => match self.to_json() {
                Some(json) => json.to_string(),
                None => "null".to_string(),
            },
        }
    }
}

/// JSON object for a parameter mapping, or `None` if any value cannot be
/// represented in JSON.
pub fn params_to_json(params: &Params) -> Option<Map<String, Value>> {
    params
        .iter()
        .map(|(name, value)| Some((name.clone(), value.to_json()?)))
        .collect()
}

/// Turn a serializable parameter struct into `Params`.
///
/// Anything that does not serialize to a JSON object yields an empty map.
pub fn to_params<S: Serialize + ?Sized>(value: &S) -> Params {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .map(|(k, v)| (k, ParamValue::from_json(v)))
            .collect(),
        _ => Params::new(),
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        ParamValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Params> for ParamValue {
    fn from(value: Params) -> Self {
        ParamValue::Map(value)
    }
}
