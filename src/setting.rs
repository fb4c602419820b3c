use crate::request::CorsRequest;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type SettingCallbackFn = dyn Fn(&dyn CorsRequest) -> SettingValue + Send + Sync;

/// A raw configuration value, either configured directly or produced by a
/// per-request callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<SettingValue>),
    Map(IndexMap<String, SettingValue>),
}

/// Runtime type names used in settings diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    Callable,
}

impl SettingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Null => "null",
            SettingKind::Bool => "bool",
            SettingKind::Int => "int",
            SettingKind::Float => "float",
            SettingKind::String => "string",
            SettingKind::Array => "array",
            SettingKind::Object => "object",
            SettingKind::Callable => "callable",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Null => SettingKind::Null,
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Str(_) => SettingKind::String,
            SettingValue::List(_) => SettingKind::Array,
            SettingValue::Map(_) => SettingKind::Object,
        }
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            values
                .into_iter()
                .map(|value| SettingValue::Str(value.into()))
                .collect(),
        )
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(values: Vec<String>) -> Self {
        SettingValue::list(values)
    }
}

impl From<Vec<&str>> for SettingValue {
    fn from(values: Vec<&str>) -> Self {
        SettingValue::list(values)
    }
}

impl<const N: usize> From<[&str; N]> for SettingValue {
    fn from(values: [&str; N]) -> Self {
        SettingValue::list(values)
    }
}

impl From<serde_json::Value> for SettingValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SettingValue::Null,
            serde_json::Value::Bool(value) => SettingValue::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => SettingValue::Int(value),
                None => SettingValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(value) => SettingValue::Str(value),
            serde_json::Value::Array(values) => {
                SettingValue::List(values.into_iter().map(SettingValue::from).collect())
            }
            serde_json::Value::Object(entries) => SettingValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, SettingValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// A settings entry: a literal value or a callback evaluated per request.
#[derive(Clone)]
pub enum Setting {
    Literal(SettingValue),
    Dynamic(Arc<SettingCallbackFn>),
}

impl Setting {
    pub fn literal<V: Into<SettingValue>>(value: V) -> Self {
        Self::Literal(value.into())
    }

    pub fn dynamic<F>(callback: F) -> Self
    where
        F: Fn(&dyn CorsRequest) -> SettingValue + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(callback))
    }

    pub fn kind(&self) -> SettingKind {
        match self {
            Setting::Literal(value) => value.kind(),
            Setting::Dynamic(_) => SettingKind::Callable,
        }
    }

    /// Produces the value in effect for `request`, invoking the callback if any.
    pub fn value_for(&self, request: &dyn CorsRequest) -> SettingValue {
        match self {
            Setting::Literal(value) => value.clone(),
            Setting::Dynamic(callback) => callback(request),
        }
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Setting::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

macro_rules! literal_setting_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Setting {
                fn from(value: $source) -> Self {
                    Setting::Literal(value.into())
                }
            }
        )*
    };
}

literal_setting_from!(SettingValue, bool, i64, &str, String, Vec<String>, Vec<&str>);

impl<const N: usize> From<[&str; N]> for Setting {
    fn from(values: [&str; N]) -> Self {
        Setting::Literal(SettingValue::list(values))
    }
}

#[cfg(test)]
#[path = "setting_test.rs"]
mod setting_test;
