use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ConversionError;

/// Converted placeholder values keyed by name, in pattern order.
pub type Params = IndexMap<String, ParamValue>;

/// Declared type of a `{name:type}` placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    Float,
    #[default]
    Str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamType {
    /// Unknown or missing tags fall back to `Str`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("int") => ParamType::Int,
            Some("float") => ParamType::Float,
            _ => ParamType::Str,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Str => "str",
        }
    }

    pub fn convert(self, raw: &str) -> Result<ParamValue, ConversionError> {
        let err = || ConversionError {
            value: raw.to_string(),
            expected: self,
        };
        match self {
            ParamType::Int => raw.parse().map(ParamValue::Int).map_err(|_| err()),
            ParamType::Float => raw.parse().map(ParamValue::Float).map_err(|_| err()),
            ParamType::Str => Ok(ParamValue::Str(raw.to_string())),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}
