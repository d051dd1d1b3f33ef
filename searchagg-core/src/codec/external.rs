//! Externally tagged variants: `{ "<discriminant>": <body> }`.
use crate::error::{DecodeError, DecodeErrorKind, EncodeError};
use crate::object::expect_object;
use crate::path::JsonPath;
use crate::variant::TaggedUnion;
use serde_json::{Map, Value};

/// Decodes a single-key object whose key selects the variant.
pub fn decode_variant<U: TaggedUnion>(value: &Value, path: &JsonPath) -> Result<U, DecodeError> {
    let members = expect_object(value, path)?;
    let mut entries = members.iter();

    match (entries.next(), entries.next()) {
        (Some((wire, body)), None) => U::dispatch_table().decode(wire, body, &path.key(wire)),
        _ => Err(DecodeError::new(
            path.clone(),
            DecodeErrorKind::NotSingleKey {
                family: U::FAMILY,
                found: members.len(),
            },
        )),
    }
}

pub fn encode_variant<U: TaggedUnion>(variant: &U) -> Result<Value, EncodeError> {
    let (wire, body) = U::dispatch_table().encode(variant)?;
    let mut out = Map::new();
    out.insert(wire.to_string(), body);
    Ok(Value::Object(out))
}
