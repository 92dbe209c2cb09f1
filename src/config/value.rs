//! Scalar configuration values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A configuration scalar: integer, float, boolean or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ConfigValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "BOOLEAN",
            ConfigValue::Int(_) => "INTEGER",
            ConfigValue::Float(_) => "FLOAT",
            ConfigValue::String(_) => "STRING",
        }
    }

    /// Integers only. A float is never truncated into an integer parameter.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue { fn from(v: bool) -> Self { ConfigValue::Bool(v) } }
impl From<i32> for ConfigValue { fn from(v: i32) -> Self { ConfigValue::Int(v as i64) } }
impl From<i64> for ConfigValue { fn from(v: i64) -> Self { ConfigValue::Int(v) } }
impl From<usize> for ConfigValue { fn from(v: usize) -> Self { ConfigValue::Int(v as i64) } }
impl From<f64> for ConfigValue { fn from(v: f64) -> Self { ConfigValue::Float(v) } }
impl From<String> for ConfigValue { fn from(v: String) -> Self { ConfigValue::String(v) } }
impl From<&str> for ConfigValue { fn from(v: &str) -> Self { ConfigValue::String(v.to_owned()) } }

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Float(v) => write!(f, "{v}"),
            ConfigValue::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}
