//! Typed keys: `{ "<discriminant><separator><name>": <body>, ... }`.
//!
//! Search responses requested with `typed_keys` carry the kind of every aggregate in its map key,
//! because the body alone does not say which kind it is.
use crate::error::{DecodeError, DecodeErrorKind, EncodeError};
use crate::object::expect_object;
use crate::path::JsonPath;
use crate::value::JsonData;
use crate::variant::{Discriminant, TaggedUnion};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Splits `key` at the first `separator` into `(wire, name)`.
pub fn split_typed_key(key: &str, separator: char) -> Option<(&str, &str)> {
    key.split_once(separator)
}

/// Decodes a typed-keys object into an ordered name -> variant map.
///
/// Every key must carry a separator, and the kind before it must be registered.
pub fn decode_typed_keys<U: TaggedUnion>(
    value: &Value,
    path: &JsonPath,
    separator: char,
) -> Result<IndexMap<String, U>, DecodeError> {
    let mut out = IndexMap::new();
    for (key, body) in expect_object(value, path)? {
        let entry_path = path.key(key);
        let (wire, name) = split_typed_key(key, separator).ok_or_else(|| {
            DecodeError::new(
                entry_path.clone(),
                DecodeErrorKind::InvalidTypedKey {
                    key: key.clone(),
                    separator,
                },
            )
        })?;
        out.insert(name.to_string(), U::dispatch_table().decode(wire, body, &entry_path)?);
    }
    Ok(out)
}

/// Decodes the typed-key entries among captured fields, skipping every key without a separator.
///
/// Open response buckets mix plain fields (`doc_count`, `key`, ...) with typed sub-aggregates,
/// so only the keys that look typed are taken.
pub fn decode_typed_entries<U: TaggedUnion>(
    entries: &IndexMap<String, JsonData>,
    path: &JsonPath,
    separator: char,
) -> Result<IndexMap<String, U>, DecodeError> {
    let mut out = IndexMap::new();
    for (key, body) in entries {
        if let Some((wire, name)) = split_typed_key(key, separator) {
            let variant = U::dispatch_table().decode(wire, body.as_value(), &path.key(key))?;
            out.insert(name.to_string(), variant);
        }
    }
    Ok(out)
}

/// Encodes an ordered name -> variant map with typed keys.
pub fn encode_typed_keys<U: TaggedUnion>(
    variants: &IndexMap<String, U>,
    separator: char,
) -> Result<Value, EncodeError> {
    let mut out = Map::new();
    for (name, variant) in variants {
        let key = format!("{}{separator}{name}", variant.kind().wire_name());
        out.insert(key, variant.encode_body()?);
    }
    Ok(Value::Object(out))
}
