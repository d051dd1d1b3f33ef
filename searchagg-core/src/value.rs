//! # Value Model
//!
//! Scalar and structured field representations shared by every payload:
//!
//! * [`JsonData`]: an opaque, untyped JSON value (metadata entries, query bodies, open buckets).
//! * [`NullableDouble`]: a number whose explicit `null` means "the sentinel `S`". Combined with
//!   `Option`, it keeps the three wire states apart:
//!
//! | wire              | field type                          | value                     |
//! |-------------------|-------------------------------------|---------------------------|
//! | key absent        | `Option<NullableDouble<S>>`         | `None`                    |
//! | `"min": null`     | `Option<NullableDouble<S>>`         | `Some(NullableDouble::Null)` |
//! | `"min": 4.5`      | `Option<NullableDouble<S>>`         | `Some(NullableDouble::Value(4.5))` |
//!
//! [`from_json`] and [`to_json`] bridge typed field values and `serde_json::Value`, attaching the
//! current [`JsonPath`] to any failure.
use crate::error::{DecodeError, DecodeErrorKind, EncodeError};
use crate::path::JsonPath;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// An opaque JSON value, kept exactly as it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonData(serde_json::Value);

impl JsonData {
    /// Converts any serializable value into `JsonData`.
    pub fn of<T: Serialize>(value: &T) -> Result<Self, EncodeError> {
        Ok(Self(serde_json::to_value(value)?))
    }

    /// Interprets this value as a typed `T`.
    pub fn to<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl From<serde_json::Value> for JsonData {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl From<JsonData> for serde_json::Value {
    fn from(data: JsonData) -> Self {
        data.0
    }
}

impl From<&str> for JsonData {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::from(value))
    }
}

impl From<String> for JsonData {
    fn from(value: String) -> Self {
        Self(serde_json::Value::from(value))
    }
}

impl From<i64> for JsonData {
    fn from(value: i64) -> Self {
        Self(serde_json::Value::from(value))
    }
}

impl From<f64> for JsonData {
    fn from(value: f64) -> Self {
        Self(serde_json::Value::from(value))
    }
}

impl From<bool> for JsonData {
    fn from(value: bool) -> Self {
        Self(serde_json::Value::from(value))
    }
}

/// The value a [`NullableDouble`] reads as when the wire carried an explicit `null`.
pub trait Sentinel {
    const VALUE: f64;
}

/// `null` reads as `f64::INFINITY`, e.g. the minimum of an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositiveInfinity;

/// `null` reads as `f64::NEG_INFINITY`, e.g. the maximum of an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NegativeInfinity;

/// `null` reads as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Zero;

impl Sentinel for PositiveInfinity {
    const VALUE: f64 = f64::INFINITY;
}

impl Sentinel for NegativeInfinity {
    const VALUE: f64 = f64::NEG_INFINITY;
}

impl Sentinel for Zero {
    const VALUE: f64 = 0.0;
}

/// A double whose explicit wire `null` stands for the sentinel `S`.
///
/// The `Null` state survives a round trip: it reads back as `S::VALUE` but is written as `null`,
/// never as the sentinel number.
pub enum NullableDouble<S> {
    Null(PhantomData<S>),
    Value(f64),
}

impl<S: Sentinel> NullableDouble<S> {
    pub fn null() -> Self {
        Self::Null(PhantomData)
    }

    pub fn value(value: f64) -> Self {
        Self::Value(value)
    }

    /// The effective number: the wire value, or the sentinel for an explicit `null`.
    pub fn get(&self) -> f64 {
        match self {
            Self::Null(_) => S::VALUE,
            Self::Value(value) => *value,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// The wire value, if one was present.
    pub fn as_option(&self) -> Option<f64> {
        match self {
            Self::Null(_) => None,
            Self::Value(value) => Some(*value),
        }
    }
}

impl<S> Clone for NullableDouble<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Null(_) => Self::Null(PhantomData),
            Self::Value(value) => Self::Value(*value),
        }
    }
}

impl<S> Copy for NullableDouble<S> {}

impl<S> PartialEq for NullableDouble<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null(_), Self::Null(_)) => true,
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl<S> fmt::Debug for NullableDouble<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null(_) => write!(f, "Null"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl<S: Sentinel> From<f64> for NullableDouble<S> {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl<S: Sentinel> From<Option<f64>> for NullableDouble<S> {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::null(),
        }
    }
}

impl<S> Serialize for NullableDouble<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Self::Null(_) => serializer.serialize_none(),
            Self::Value(value) if !value.is_finite() => Err(serde::ser::Error::custom(format!(
                "{value} has no JSON form, use NullableDouble::Null for the sentinel"
            ))),
            Self::Value(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de, S: Sentinel> Deserialize<'de> for NullableDouble<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.into())
    }
}

/// Decodes a typed field value, locating failures at `path`.
pub fn from_json<T: DeserializeOwned>(
    value: &serde_json::Value,
    path: &JsonPath,
) -> Result<T, DecodeError> {
    T::deserialize(value)
        .map_err(|e| DecodeError::new(path.clone(), DecodeErrorKind::InvalidValue(e.to_string())))
}

/// Encodes a typed field value.
///
/// A non-finite plain `f64` is written as `null`, as `serde_json` does. Use [`NullableDouble`]
/// for fields where that difference matters: it refuses non-finite values.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, EncodeError> {
    Ok(serde_json::to_value(value)?)
}
