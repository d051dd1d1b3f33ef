//! # Object Field Tables
//!
//! Payload bodies are plain JSON objects. Each payload type owns an [`ObjectDeserializer`]: a
//! table mapping every declared wire field name to a setter on the payload's builder. Decoding an
//! object walks its members once, routes each one through the table, then finalizes the builder,
//! so required-field validation is the same whether a value is built by hand or decoded.
//!
//! Members that match no declared name are rejected, unless the payload declares an open
//! unknown-field bucket. In that case they are captured verbatim as [`JsonData`]. Which payloads
//! are open is decided per shape, by the payload definition.
//!
//! [`crate::json_object!`] generates the struct, its builder, its field table, and the
//! [`JsonObject`], [`VariantBody`] and serde impls from a single field list.
use crate::builder::ObjectBuilder;
use crate::error::{DecodeError, DecodeErrorKind, EncodeError, json_type_name};
use crate::path::JsonPath;
use crate::value::JsonData;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Applies one decoded wire field to a builder.
pub type FieldSetter<B> = fn(&mut B, &Value, &JsonPath) -> Result<(), DecodeError>;

/// Receives a wire field that matched no declared name.
pub type UnknownFieldHandler<B> = fn(&mut B, String, JsonData);

/// A wire field name -> builder setter table for one payload type.
pub struct ObjectDeserializer<B> {
    object: &'static str,
    fields: IndexMap<&'static str, FieldSetter<B>>,
    unknown: Option<UnknownFieldHandler<B>>,
}

impl<B: ObjectBuilder> ObjectDeserializer<B> {
    /// Creates an empty, closed table for the object named `object`.
    pub fn new(object: &'static str) -> Self {
        Self {
            object,
            fields: IndexMap::new(),
            unknown: None,
        }
    }

    /// Declares a wire field. Declaring the same name twice keeps the last setter.
    pub fn add(&mut self, name: &'static str, setter: FieldSetter<B>) {
        self.fields.insert(name, setter);
    }

    /// Accepts `alias` as another wire name for the already declared field `name`.
    ///
    /// Returns `false` (and changes nothing) when `name` is not declared.
    pub fn alias(&mut self, alias: &'static str, name: &str) -> bool {
        match self.fields.get(name).copied() {
            Some(setter) => {
                self.fields.insert(alias, setter);
                true
            }
            None => false,
        }
    }

    /// Opens the object: undeclared fields are handed to `handler` instead of being rejected.
    pub fn capture_unknown(&mut self, handler: UnknownFieldHandler<B>) {
        self.unknown = Some(handler);
    }

    pub fn object(&self) -> &'static str {
        self.object
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn is_open(&self) -> bool {
        self.unknown.is_some()
    }

    /// Declared wire field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Decodes `value` into a finalized object.
    pub fn deserialize(&self, value: &Value, path: &JsonPath) -> Result<B::Output, DecodeError> {
        let members = expect_object(value, path)?;
        let mut builder = B::default();

        for (name, member) in members {
            let member_path = path.key(name);
            match (self.fields.get(name.as_str()), self.unknown) {
                (Some(setter), _) => setter(&mut builder, member, &member_path)?,
                (None, Some(capture)) => {
                    tracing::trace!(object = self.object, field = %name, "captured unknown field");
                    capture(&mut builder, name.clone(), JsonData::from(member.clone()));
                }
                (None, None) => {
                    return Err(DecodeError::new(
                        member_path,
                        DecodeErrorKind::UnexpectedField {
                            object: self.object,
                            field: name.clone(),
                        },
                    ));
                }
            }
        }

        builder
            .build()
            .map_err(|err| DecodeError::new(path.clone(), err))
    }
}

/// Borrows `value` as a JSON object, or fails with [`DecodeErrorKind::InvalidType`].
pub fn expect_object<'v>(
    value: &'v Value,
    path: &JsonPath,
) -> Result<&'v Map<String, Value>, DecodeError> {
    value.as_object().ok_or_else(|| {
        DecodeError::new(
            path.clone(),
            DecodeErrorKind::InvalidType {
                expected: "an object",
                found: json_type_name(value),
            },
        )
    })
}

/// A record type decoded through an [`ObjectDeserializer`] and encoded field by field.
pub trait JsonObject: Sized {
    type Builder: ObjectBuilder<Output = Self> + 'static;

    /// Type name used in error messages.
    const NAME: &'static str;

    fn deserializer() -> &'static ObjectDeserializer<Self::Builder>;

    /// Writes the declared (and captured) fields into `out`, in declaration order.
    fn serialize_fields(&self, out: &mut Map<String, Value>) -> Result<(), EncodeError>;

    fn decode(value: &Value, path: &JsonPath) -> Result<Self, DecodeError> {
        Self::deserializer().deserialize(value, path)
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let mut out = Map::new();
        self.serialize_fields(&mut out)?;
        Ok(Value::Object(out))
    }
}

/// The body of a tagged-union variant: whatever sits under (or next to) the discriminant.
///
/// Every [`JsonObject`] generated by [`crate::json_object!`] implements it. Payloads whose body is
/// not an object (an opaque query, a bare string) implement it by hand.
pub trait VariantBody: Sized {
    fn decode_body(body: &Value, path: &JsonPath) -> Result<Self, DecodeError>;

    fn encode_body(&self) -> Result<Value, EncodeError>;
}

/// Declares a payload record with its single-use builder and wire codec.
///
/// Each field is `required` or `optional`, has a Rust name, a type implementing serde's
/// `Serialize` + `DeserializeOwned`, and a wire name. Required fields are checked by `build()` in
/// the order they are listed. An optional `unknown_fields: <name>,` line opens the record: fields
/// that are not declared are captured into an ordered `<name>` map instead of being rejected.
///
/// ```rust
/// use searchagg_core::json_object;
/// use searchagg_core::object::JsonObject;
/// use searchagg_core::path::JsonPath;
///
/// json_object! {
///     /// A labelled point.
///     pub struct Point {
///         builder: PointBuilder,
///         unknown_fields: extra,
///         fields {
///             required x: f64 = "x",
///             required y: f64 = "y",
///             /// Display label.
///             optional label: String = "label",
///         }
///     }
/// }
///
/// let point = Point::decode(&serde_json::json!({"x": 1.0, "y": 2.0, "z": 3.0}), &JsonPath::root()).unwrap();
/// assert_eq!(*point.x(), 1.0);
/// assert_eq!(point.label(), None);
/// assert_eq!(point.extra().len(), 1);
///
/// let err = Point::builder().y(2.0).build().unwrap_err();
/// assert_eq!(err.to_string(), "Missing required field 'x' in 'Point'");
/// ```
#[macro_export]
macro_rules! json_object {
    (@field_ty required $ty:ty) => { $ty };
    (@field_ty optional $ty:ty) => { ::std::option::Option<$ty> };

    (@getter $(#[$fmeta:meta])* required $field:ident : $ty:ty) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> &$ty {
            &self.$field
        }
    };
    (@getter $(#[$fmeta:meta])* optional $field:ident : $ty:ty) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> ::std::option::Option<&$ty> {
            self.$field.as_ref()
        }
    };

    (@build required $value:ident, $name:ident, $wire:literal) => {
        $crate::builder::require($value, stringify!($name), $wire)?
    };
    (@build optional $value:ident, $name:ident, $wire:literal) => {
        $value
    };

    (@serialize required $out:ident, $wire:literal, $value:ident) => {
        $out.insert(::std::string::String::from($wire), $crate::value::to_json($value)?);
    };
    (@serialize optional $out:ident, $wire:literal, $value:ident) => {
        if let ::std::option::Option::Some(value) = $value {
            $out.insert(::std::string::String::from($wire), $crate::value::to_json(value)?);
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            builder: $builder:ident,
            $( unknown_fields: $extra:ident, )?
            fields {
                $(
                    $(#[$fmeta:meta])*
                    $presence:ident $field:ident : $ty:ty = $wire:literal
                ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( $field: $crate::json_object!(@field_ty $presence $ty), )*
            $( $extra: $crate::indexmap::IndexMap<::std::string::String, $crate::value::JsonData>, )?
        }

        #[doc = concat!("Single-use builder for [`", stringify!($name), "`].")]
        #[derive(Debug, Default)]
        $vis struct $builder {
            $( $field: ::std::option::Option<$ty>, )*
            $( $extra: $crate::indexmap::IndexMap<::std::string::String, $crate::value::JsonData>, )?
        }

        impl $name {
            pub fn builder() -> $builder {
                <$builder as ::std::default::Default>::default()
            }

            $( $crate::json_object!(@getter $(#[$fmeta])* $presence $field : $ty); )*

            $(
                /// Fields that were present on the wire but not declared.
                pub fn $extra(
                    &self,
                ) -> &$crate::indexmap::IndexMap<::std::string::String, $crate::value::JsonData> {
                    &self.$extra
                }
            )?
        }

        impl $builder {
            /// Validates required fields and produces the record.
            pub fn build(self) -> ::std::result::Result<$name, $crate::error::BuildError> {
                <Self as $crate::builder::ObjectBuilder>::build(self)
            }

            $(
                $(#[$fmeta])*
                pub fn $field(mut self, value: impl ::std::convert::Into<$ty>) -> Self {
                    self.$field = ::std::option::Option::Some(value.into());
                    self
                }
            )*

            $(
                /// Adds an undeclared field.
                pub fn $extra(
                    mut self,
                    key: impl ::std::convert::Into<::std::string::String>,
                    value: impl ::std::convert::Into<$crate::value::JsonData>,
                ) -> Self {
                    self.$extra.insert(key.into(), value.into());
                    self
                }
            )?
        }

        impl $crate::builder::ObjectBuilder for $builder {
            type Output = $name;

            fn build(self) -> ::std::result::Result<$name, $crate::error::BuildError> {
                let $builder { $( $field, )* $( $extra, )? } = self;
                ::std::result::Result::Ok($name {
                    $( $field: $crate::json_object!(@build $presence $field, $name, $wire), )*
                    $( $extra, )?
                })
            }
        }

        impl $crate::object::JsonObject for $name {
            type Builder = $builder;

            const NAME: &'static str = stringify!($name);

            fn deserializer() -> &'static $crate::object::ObjectDeserializer<$builder> {
                static DESERIALIZER: ::std::sync::LazyLock<$crate::object::ObjectDeserializer<$builder>> =
                    ::std::sync::LazyLock::new(|| {
                        #[allow(unused_mut)]
                        let mut op = $crate::object::ObjectDeserializer::new(stringify!($name));
                        $(
                            op.add($wire, |builder: &mut $builder, value, path| {
                                builder.$field =
                                    ::std::option::Option::Some($crate::value::from_json(value, path)?);
                                ::std::result::Result::Ok(())
                            });
                        )*
                        $(
                            op.capture_unknown(|builder: &mut $builder, key, value| {
                                builder.$extra.insert(key, value);
                            });
                        )?
                        op
                    });
                &DESERIALIZER
            }

            #[allow(unused_variables)]
            fn serialize_fields(
                &self,
                out: &mut $crate::serde_json::Map<::std::string::String, $crate::serde_json::Value>,
            ) -> ::std::result::Result<(), $crate::error::EncodeError> {
                let $name { $( $field, )* $( $extra, )? } = self;
                $( $crate::json_object!(@serialize $presence out, $wire, $field); )*
                $(
                    for (key, value) in $extra {
                        out.insert(key.clone(), value.clone().into());
                    }
                )?
                ::std::result::Result::Ok(())
            }
        }

        impl $crate::object::VariantBody for $name {
            fn decode_body(
                body: &$crate::serde_json::Value,
                path: &$crate::path::JsonPath,
            ) -> ::std::result::Result<Self, $crate::error::DecodeError> {
                <Self as $crate::object::JsonObject>::decode(body, path)
            }

            fn encode_body(
                &self,
            ) -> ::std::result::Result<$crate::serde_json::Value, $crate::error::EncodeError> {
                <Self as $crate::object::JsonObject>::encode(self)
            }
        }

        impl $crate::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                let value = <Self as $crate::object::JsonObject>::encode(self)
                    .map_err(<S::Error as $crate::serde::ser::Error>::custom)?;
                $crate::serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                let value =
                    <$crate::serde_json::Value as $crate::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::object::JsonObject>::decode(&value, &$crate::path::JsonPath::root())
                    .map_err(<D::Error as $crate::serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use serde_json::json;

    crate::json_object! {
        struct Interval {
            builder: IntervalBuilder,
            fields {
                required from: f64 = "from",
                required to: f64 = "to",
                optional key: String = "key",
            }
        }
    }

    crate::json_object! {
        struct Annotated {
            builder: AnnotatedBuilder,
            unknown_fields: extra,
            fields {
                optional note: String = "note",
            }
        }
    }

    #[test]
    fn test_decode_routes_fields_through_builder() {
        let interval =
            Interval::decode(&json!({"to": 5.0, "from": 1.0, "key": "low"}), &JsonPath::root())
                .unwrap();

        assert_eq!(*interval.from(), 1.0);
        assert_eq!(*interval.to(), 5.0);
        assert_eq!(interval.key().map(String::as_str), Some("low"));
    }

    #[test]
    fn test_encode_follows_declaration_order() {
        let interval = Interval::builder().key("low").to(5.0).from(1.0).build().unwrap();
        let encoded = serde_json::to_string(&interval.encode().unwrap()).unwrap();

        assert_eq!(encoded, r#"{"from":1.0,"to":5.0,"key":"low"}"#);
    }

    #[test]
    fn test_closed_object_rejects_unknown_field() {
        let path = JsonPath::root().key("range");
        let err = Interval::decode(&json!({"from": 1.0, "to": 2.0, "size": 3}), &path).unwrap_err();

        assert_eq!(err.path().to_string(), "$.range.size");
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::UnexpectedField {
                object: "Interval",
                field: "size".to_string()
            }
        );
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let err = Interval::decode(&json!({"to": 2.0}), &JsonPath::root()).unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorKind::MissingField(BuildError::MissingField {
                object: "Interval",
                field: "from"
            })
        );
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let err = Interval::decode(&json!([1, 2]), &JsonPath::root()).unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorKind::InvalidType {
                expected: "an object",
                found: "an array"
            }
        );
    }

    #[test]
    fn test_open_object_captures_and_replays_unknown_fields() {
        let input = json!({"note": "n", "a": 1, "b": {"c": [true]}});
        let annotated = Annotated::decode(&input, &JsonPath::root()).unwrap();

        assert_eq!(annotated.extra().len(), 2);
        assert_eq!(annotated.extra()["b"].as_value(), &json!({"c": [true]}));
        assert_eq!(annotated.encode().unwrap(), input);
    }

    #[test]
    fn test_table_introspection() {
        let table = Interval::deserializer();

        assert_eq!(table.object(), "Interval");
        assert!(!table.is_open());
        assert!(Annotated::deserializer().is_open());
        assert_eq!(table.field_names().collect::<Vec<_>>(), vec!["from", "to", "key"]);
    }
}
