use thiserror::Error;

use crate::ParamType;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("duplicate placeholder `{name}` in pattern {pattern}")]
    DuplicateParam { pattern: String, name: String },

    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown error tag: {0}")]
    UnknownErrorTag(String),
}

/// A captured segment that could not be converted to its declared type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert `{value}` to {expected}")]
pub struct ConversionError {
    pub value: String,
    pub expected: ParamType,
}
