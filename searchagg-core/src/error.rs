//! # Errors
//!
//! Every failure domain of the codec has its own error type:
//!
//! * [`BuildError`]: a builder was finalized without one of its required fields.
//! * [`VariantError`]: a variant was accessed or constructed with the wrong kind.
//! * [`RegistryError`]: a dispatch table was declared with two payloads claiming the same wire name.
//! * [`DecodeError`]: the input does not match the schema. It always carries the [`JsonPath`]
//!   of the offending value.
//! * [`EncodeError`]: a payload could not be turned back into JSON.
//! * [`CodecError`]: the top-level error returned by [`crate::codec::JsonCodec`].
use crate::path::JsonPath;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing required field '{field}' in '{object}'")]
    MissingField {
        object: &'static str,
        field: &'static str,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("Kind mismatch in '{family}': expected '{expected}', found '{found}'")]
    KindMismatch {
        family: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Discriminant '{wire}' is registered twice in '{family}'")]
    DuplicateDiscriminant {
        family: &'static str,
        wire: &'static str,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("Unknown discriminant '{wire}' for '{family}'")]
    UnknownDiscriminant { family: &'static str, wire: String },

    #[error("No discriminant key found for '{family}'")]
    MissingDiscriminant { family: &'static str },

    #[error("Found both '{first}' and '{second}' as discriminants for '{family}'")]
    MultipleDiscriminants {
        family: &'static str,
        first: String,
        second: String,
    },

    #[error("Expected a single-key object for '{family}', found {found} keys")]
    NotSingleKey { family: &'static str, found: usize },

    #[error("Unexpected field '{field}' in '{object}'")]
    UnexpectedField { object: &'static str, field: String },

    #[error("Expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value: '{0}'")]
    InvalidValue(String),

    #[error(transparent)]
    MissingField(#[from] BuildError),

    #[error("Typed key '{key}' has no '{separator}' separator")]
    InvalidTypedKey { key: String, separator: char },

    #[error("Aggregation tree is deeper than the configured limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// A decoding failure, located by the path of the offending value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("at '{path}': {kind}")]
pub struct DecodeError {
    pub path: JsonPath,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(path: JsonPath, kind: impl Into<DecodeErrorKind>) -> Self {
        Self {
            path,
            kind: kind.into(),
        }
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    #[error("Failed to map value to JSON: '{0}'")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("Malformed JSON input: '{0}'")]
    Syntax(#[source] serde_json::Error),

    #[error("Failed to decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode: {0}")]
    Encode(#[from] EncodeError),

    #[error("I/O error: '{0}'")]
    Io(#[from] std::io::Error),
}

/// Short name of a JSON value's type, used in [`DecodeErrorKind::InvalidType`] messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message_includes_path_and_family() {
        let err = DecodeError::new(
            JsonPath::root().key("aggregations").key("by_day"),
            DecodeErrorKind::UnknownDiscriminant {
                family: "aggregation",
                wire: "date_histgram".to_string(),
            },
        );

        assert_eq!(
            err.to_string(),
            "at '$.aggregations.by_day': Unknown discriminant 'date_histgram' for 'aggregation'"
        );
    }

    #[test]
    fn test_build_error_converts_into_decode_kind() {
        let err = DecodeError::new(
            JsonPath::root(),
            BuildError::MissingField {
                object: "NestedAggregation",
                field: "path",
            },
        );

        assert!(matches!(err.kind(), DecodeErrorKind::MissingField(_)));
        assert!(err.to_string().contains("'path'"));
    }
}
