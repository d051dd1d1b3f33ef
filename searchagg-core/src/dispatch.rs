//! # Dispatch Tables
//!
//! A [`DispatchTable`] maps each wire discriminant of a family to the function that decodes the
//! matching payload body. Tables are built once, on first use, by [`crate::tagged_union!`] and are
//! read-only afterwards, so any number of decode calls may share them across threads.
use crate::error::{DecodeError, DecodeErrorKind, EncodeError, RegistryError};
use crate::path::JsonPath;
use crate::variant::{Discriminant, TaggedUnion};
use indexmap::IndexMap;
use serde_json::Value;

/// Decodes one payload body into a variant of `U`.
pub type Decoder<U> = fn(&Value, &JsonPath) -> Result<U, DecodeError>;

/// The wire string -> decoder registry of one family.
pub struct DispatchTable<U> {
    family: &'static str,
    decoders: IndexMap<&'static str, Decoder<U>>,
}

impl<U> DispatchTable<U> {
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            decoders: IndexMap::new(),
        }
    }

    /// Registers the decoder for `wire`. A wire string can only be claimed once.
    pub fn register(&mut self, wire: &'static str, decoder: Decoder<U>) -> Result<(), RegistryError> {
        if self.decoders.contains_key(wire) {
            return Err(RegistryError::DuplicateDiscriminant {
                family: self.family,
                wire,
            });
        }
        self.decoders.insert(wire, decoder);
        Ok(())
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn contains(&self, wire: &str) -> bool {
        self.decoders.contains_key(wire)
    }

    /// Registered wire strings, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl<U: TaggedUnion> DispatchTable<U> {
    /// Decodes `body` as the payload registered under `wire`.
    ///
    /// `path` is the location of the body itself, i.e. it already ends with the discriminant key.
    pub fn decode(&self, wire: &str, body: &Value, path: &JsonPath) -> Result<U, DecodeError> {
        let decoder = self.decoders.get(wire).ok_or_else(|| {
            DecodeError::new(
                path.clone(),
                DecodeErrorKind::UnknownDiscriminant {
                    family: self.family,
                    wire: wire.to_string(),
                },
            )
        })?;
        decoder(body, path)
    }

    /// Splits a variant into its wire discriminant and encoded body.
    pub fn encode(&self, variant: &U) -> Result<(&'static str, Value), EncodeError> {
        Ok((variant.kind().wire_name(), variant.encode_body()?))
    }
}
