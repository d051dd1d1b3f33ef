//! # JSON Codec
//!
//! [`JsonCodec`] is the entry point for turning bytes into variants and trees, and back. It picks
//! the tagging convention for each call:
//!
//! 1. **Externally tagged** ([`JsonCodec::decode_variant`]): `{ "terms": { ... } }`, the sole key
//!    is the discriminant. Used for request-side families.
//! 2. **Flat node** ([`JsonCodec::decode_node`], [`JsonCodec::decode_node_map`]): the
//!    discriminant key sits next to the reserved `aggregations` / `meta` keys, and the tree recurses
//!    through `aggregations`.
//! 3. **Typed keys** ([`JsonCodec::decode_typed_keys`]): `{ "sterms#by_customer": { ... } }`, the
//!    kind is a prefix of the map key. Used for responses.
//!
//! Every entry point has a byte-slice form and a `std::io` form (`*_reader` / `*_writer`). The
//! byte stream is read whole before decoding starts.
//!
//! ## Example
//!
//! ```rust
//! use searchagg_core::codec::{CodecSettings, JsonCodec};
//! use searchagg_core::{json_object, tagged_union};
//!
//! json_object! {
//!     pub struct Circle {
//!         builder: CircleBuilder,
//!         fields {
//!             required radius: f64 = "radius",
//!         }
//!     }
//! }
//!
//! tagged_union! {
//!     pub enum Shape {
//!         kind: ShapeKind,
//!         family: "shape",
//!         unknown_fields: Reject,
//!         variants {
//!             Circle(Circle) = "circle",
//!         }
//!     }
//! }
//!
//! let codec = JsonCodec::new(CodecSettings::default().with_max_depth(16));
//! let shape: Shape = codec.decode_variant(br#"{"circle":{"radius":1.5}}"#).unwrap();
//! assert_eq!(codec.encode_variant(&shape).unwrap(), br#"{"circle":{"radius":1.5}}"#);
//! ```
pub mod external;
mod settings;
pub mod typed_keys;

pub use settings::CodecSettings;

use crate::error::{CodecError, EncodeError};
use crate::node::{self, Node};
use crate::path::JsonPath;
use crate::variant::TaggedUnion;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::io::{Read, Write};

/// Byte-level encoder/decoder for tagged unions and node trees.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    settings: CodecSettings,
}

impl JsonCodec {
    pub fn new(settings: CodecSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    pub fn decode_variant<U: TaggedUnion>(&self, bytes: &[u8]) -> Result<U, CodecError> {
        self.variant_from_value(&parse(bytes)?)
    }

    pub fn decode_variant_reader<U: TaggedUnion, R: Read>(&self, reader: R) -> Result<U, CodecError> {
        self.variant_from_value(&parse_reader(reader)?)
    }

    pub fn encode_variant<U: TaggedUnion>(&self, variant: &U) -> Result<Vec<u8>, CodecError> {
        self.render(&self.variant_to_value(variant)?)
    }

    pub fn encode_variant_writer<U: TaggedUnion, W: Write>(
        &self,
        variant: &U,
        writer: W,
    ) -> Result<(), CodecError> {
        self.render_into(writer, &self.variant_to_value(variant)?)
    }

    pub fn decode_node<U: TaggedUnion>(&self, bytes: &[u8]) -> Result<Node<U>, CodecError> {
        let document = parse(bytes)?;
        let decoded = self.node_from_value(&document);
        release(document);
        decoded
    }

    pub fn decode_node_reader<U: TaggedUnion, R: Read>(
        &self,
        reader: R,
    ) -> Result<Node<U>, CodecError> {
        let document = parse_reader(reader)?;
        let decoded = self.node_from_value(&document);
        release(document);
        decoded
    }

    pub fn encode_node<U: TaggedUnion>(&self, node: &Node<U>) -> Result<Vec<u8>, CodecError> {
        let document = self.node_to_value(node)?;
        let encoded = self.render(&document);
        release(document);
        encoded
    }

    pub fn encode_node_writer<U: TaggedUnion, W: Write>(
        &self,
        node: &Node<U>,
        writer: W,
    ) -> Result<(), CodecError> {
        let document = self.node_to_value(node)?;
        let encoded = self.render_into(writer, &document);
        release(document);
        encoded
    }

    pub fn decode_node_map<U: TaggedUnion>(
        &self,
        bytes: &[u8],
    ) -> Result<IndexMap<String, Node<U>>, CodecError> {
        let document = parse(bytes)?;
        let decoded = self.node_map_from_value(&document);
        release(document);
        decoded
    }

    pub fn decode_node_map_reader<U: TaggedUnion, R: Read>(
        &self,
        reader: R,
    ) -> Result<IndexMap<String, Node<U>>, CodecError> {
        let document = parse_reader(reader)?;
        let decoded = self.node_map_from_value(&document);
        release(document);
        decoded
    }

    pub fn encode_node_map<U: TaggedUnion>(
        &self,
        nodes: &IndexMap<String, Node<U>>,
    ) -> Result<Vec<u8>, CodecError> {
        let document = self.node_map_to_value(nodes)?;
        let encoded = self.render(&document);
        release(document);
        encoded
    }

    pub fn encode_node_map_writer<U: TaggedUnion, W: Write>(
        &self,
        nodes: &IndexMap<String, Node<U>>,
        writer: W,
    ) -> Result<(), CodecError> {
        let document = self.node_map_to_value(nodes)?;
        let encoded = self.render_into(writer, &document);
        release(document);
        encoded
    }

    pub fn decode_typed_keys<U: TaggedUnion>(
        &self,
        bytes: &[u8],
    ) -> Result<IndexMap<String, U>, CodecError> {
        self.typed_keys_from_value(&parse(bytes)?)
    }

    pub fn decode_typed_keys_reader<U: TaggedUnion, R: Read>(
        &self,
        reader: R,
    ) -> Result<IndexMap<String, U>, CodecError> {
        self.typed_keys_from_value(&parse_reader(reader)?)
    }

    pub fn encode_typed_keys<U: TaggedUnion>(
        &self,
        variants: &IndexMap<String, U>,
    ) -> Result<Vec<u8>, CodecError> {
        self.render(&self.typed_keys_to_value(variants)?)
    }

    pub fn encode_typed_keys_writer<U: TaggedUnion, W: Write>(
        &self,
        variants: &IndexMap<String, U>,
        writer: W,
    ) -> Result<(), CodecError> {
        self.render_into(writer, &self.typed_keys_to_value(variants)?)
    }

    fn variant_from_value<U: TaggedUnion>(&self, value: &Value) -> Result<U, CodecError> {
        let variant: U = external::decode_variant(value, &JsonPath::root())?;
        tracing::debug!(family = U::FAMILY, kind = %variant.kind(), "decoded variant");
        Ok(variant)
    }

    fn variant_to_value<U: TaggedUnion>(&self, variant: &U) -> Result<Value, EncodeError> {
        tracing::debug!(family = U::FAMILY, kind = %variant.kind(), "encoding variant");
        external::encode_variant(variant)
    }

    fn node_from_value<U: TaggedUnion>(&self, value: &Value) -> Result<Node<U>, CodecError> {
        let node: Node<U> =
            node::decode::decode_node(value, &JsonPath::root(), self.settings.max_depth)?;
        tracing::debug!(
            family = U::FAMILY,
            kind = %node.kind(),
            nodes = node.descendants().count(),
            "decoded node tree"
        );
        Ok(node)
    }

    fn node_to_value<U: TaggedUnion>(&self, node: &Node<U>) -> Result<Value, EncodeError> {
        tracing::debug!(
            family = U::FAMILY,
            kind = %node.kind(),
            nodes = node.descendants().count(),
            "encoding node tree"
        );
        node::encode::encode_node(node)
    }

    fn node_map_from_value<U: TaggedUnion>(
        &self,
        value: &Value,
    ) -> Result<IndexMap<String, Node<U>>, CodecError> {
        let nodes: IndexMap<String, Node<U>> =
            node::decode::decode_node_map(value, &JsonPath::root(), self.settings.max_depth)?;
        tracing::debug!(family = U::FAMILY, roots = nodes.len(), "decoded node map");
        Ok(nodes)
    }

    fn node_map_to_value<U: TaggedUnion>(
        &self,
        nodes: &IndexMap<String, Node<U>>,
    ) -> Result<Value, EncodeError> {
        tracing::debug!(family = U::FAMILY, roots = nodes.len(), "encoding node map");
        node::encode::encode_node_map(nodes)
    }

    fn typed_keys_from_value<U: TaggedUnion>(
        &self,
        value: &Value,
    ) -> Result<IndexMap<String, U>, CodecError> {
        let variants: IndexMap<String, U> = typed_keys::decode_typed_keys(
            value,
            &JsonPath::root(),
            self.settings.typed_keys_separator,
        )?;
        tracing::debug!(family = U::FAMILY, entries = variants.len(), "decoded typed keys");
        Ok(variants)
    }

    fn typed_keys_to_value<U: TaggedUnion>(
        &self,
        variants: &IndexMap<String, U>,
    ) -> Result<Value, EncodeError> {
        tracing::debug!(family = U::FAMILY, entries = variants.len(), "encoding typed keys");
        typed_keys::encode_typed_keys(variants, self.settings.typed_keys_separator)
    }

    fn render(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let bytes = if self.settings.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        bytes.map_err(|e| CodecError::Encode(EncodeError::Json(e)))
    }

    fn render_into<W: Write>(&self, writer: W, value: &Value) -> Result<(), CodecError> {
        let written = if self.settings.pretty {
            serde_json::to_writer_pretty(writer, value)
        } else {
            serde_json::to_writer(writer, value)
        };
        written.map_err(|e| {
            if e.is_io() {
                CodecError::Io(e.into())
            } else {
                CodecError::Encode(EncodeError::Json(e))
            }
        })
    }
}

fn parse(bytes: &[u8]) -> Result<Value, CodecError> {
    parse_document(serde_json::Deserializer::from_slice(bytes)).map_err(CodecError::Syntax)
}

fn parse_reader<R: Read>(reader: R) -> Result<Value, CodecError> {
    parse_document(serde_json::Deserializer::from_reader(reader)).map_err(|e| {
        if e.is_io() {
            CodecError::Io(e.into())
        } else {
            CodecError::Syntax(e)
        }
    })
}

/// Parses one whole document with no nesting limit. Depth is bounded by
/// [`CodecSettings::max_depth`] alone, and deep input grows the stack on the heap.
fn parse_document<'de, R: serde_json::de::Read<'de>>(
    mut deserializer: serde_json::Deserializer<R>,
) -> Result<Value, serde_json::Error> {
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Drops a parsed document level by level instead of through the recursive drop glue.
fn release(document: Value) {
    let mut stack = vec![document];
    while let Some(value) = stack.pop() {
        match value {
            Value::Array(items) => stack.extend(items),
            Value::Object(members) => stack.extend(members.into_iter().map(|(_, member)| member)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_is_a_syntax_error() {
        let err = parse(b"{\"terms\": ").unwrap_err();
        assert!(matches!(err, CodecError::Syntax(_)));
    }

    #[test]
    fn test_trailing_characters_are_a_syntax_error() {
        assert!(matches!(parse(b"{} {}"), Err(CodecError::Syntax(_))));
    }

    #[test]
    fn test_nesting_past_the_serde_json_default_limit() {
        let depth = 1_000;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let value = parse(text.as_bytes()).unwrap();

        let mut levels = 1;
        let mut current = &value;
        while let Some(inner) = current.as_array().and_then(|items| items.first()) {
            levels += 1;
            current = inner;
        }
        assert_eq!(levels, depth);
        release(value);
    }

    #[test]
    fn test_reader_io_failure_is_reported_as_io() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        let err = parse_reader(Broken).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn test_pretty_rendering() {
        let codec = JsonCodec::new(CodecSettings::default().with_pretty(true));
        let bytes = codec.render(&serde_json::json!({"a": 1})).unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 1\n}");
    }
}
