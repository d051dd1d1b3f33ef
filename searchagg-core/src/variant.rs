//! # Tagged Unions
//!
//! A family of mutually exclusive payload shapes sharing one discriminant enumeration.
//!
//! * [`Discriminant`]: the kind enum, bijectively mapped to wire strings.
//! * [`TaggedUnion`]: the family itself, a Rust enum with one case per payload. The active kind
//!   is derived from the active case, so a variant can never disagree with its payload.
//! * [`VariantOf`]: implemented by each payload type; it self-reports the kind it stands for and
//!   provides the safe downcasts used by [`TaggedUnion::try_as`] and
//!   [`TaggedUnion::into_payload`].
//!
//! Families are normally declared with [`crate::tagged_union!`], which emits all of the above plus
//! the family's [`DispatchTable`].
use crate::dispatch::DispatchTable;
use crate::error::{EncodeError, VariantError};
use crate::object::VariantBody;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A kind identifier paired with its canonical wire string.
pub trait Discriminant: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// Every member of the family, in declaration order.
    const ALL: &'static [Self];

    fn wire_name(self) -> &'static str;

    fn from_wire(wire: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.wire_name() == wire)
    }
}

/// What the flat-object decoder does with a key that is neither reserved nor a registered
/// discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Closed family: the key is a decode error.
    Reject,
    /// Pass-through family: the key is kept in the node's unknown-field bucket.
    Capture,
}

/// A closed sum type whose members are selected by a [`Discriminant`].
pub trait TaggedUnion: Sized + Send + Sync + 'static {
    type Kind: Discriminant;

    /// Family name used in error messages.
    const FAMILY: &'static str;

    const UNKNOWN_FIELDS: UnknownFieldPolicy;

    fn kind(&self) -> Self::Kind;

    /// The family's read-only wire string -> decoder registry.
    fn dispatch_table() -> &'static DispatchTable<Self>;

    /// Serializes the active payload's body, without the discriminant.
    fn encode_body(&self) -> Result<serde_json::Value, EncodeError>;

    fn of<P: VariantOf<Self>>(payload: P) -> Self {
        payload.into()
    }

    /// Builds a variant from an explicitly supplied kind, cross-checking it against the kind the
    /// payload reports for itself.
    fn with_kind<P: VariantOf<Self>>(kind: Self::Kind, payload: P) -> Result<Self, VariantError> {
        if P::KIND != kind {
            return Err(VariantError::KindMismatch {
                family: Self::FAMILY,
                expected: kind.wire_name(),
                found: P::KIND.wire_name(),
            });
        }
        Ok(payload.into())
    }

    fn is_kind(&self, kind: Self::Kind) -> bool {
        self.kind() == kind
    }

    fn wire_name(&self) -> &'static str {
        self.kind().wire_name()
    }

    /// Borrows the payload as `P`, failing when another kind is active.
    fn try_as<P: VariantOf<Self>>(&self) -> Result<&P, VariantError> {
        P::from_ref(self).ok_or_else(|| VariantError::KindMismatch {
            family: Self::FAMILY,
            expected: P::KIND.wire_name(),
            found: self.wire_name(),
        })
    }

    /// Takes the payload out as `P`, handing the variant back when another kind is active.
    fn into_payload<P: VariantOf<Self>>(self) -> Result<P, Self> {
        P::from_union(self)
    }
}

/// A payload type belonging to the family `U`.
pub trait VariantOf<U: TaggedUnion>: VariantBody + Into<U> {
    /// The kind this payload represents.
    const KIND: U::Kind;

    fn from_ref(union: &U) -> Option<&Self>;

    fn from_union(union: U) -> Result<Self, U>;
}

/// Declares a tagged-union family.
///
/// Emits the kind enum (with its [`Discriminant`] impl), the union enum (with its
/// [`TaggedUnion`] impl and lazily built dispatch table), and a `From` / [`VariantOf`] impl per
/// payload. Payload types must implement [`VariantBody`], which [`crate::json_object!`] does.
///
/// A payload type can appear only once per family: the generated `From` impls would conflict.
///
/// ```rust
/// use searchagg_core::variant::{TaggedUnion, Discriminant};
/// use searchagg_core::{json_object, tagged_union};
///
/// json_object! {
///     pub struct Circle {
///         builder: CircleBuilder,
///         fields {
///             required radius: f64 = "radius",
///         }
///     }
/// }
///
/// tagged_union! {
///     pub enum Shape {
///         kind: ShapeKind,
///         family: "shape",
///         unknown_fields: Reject,
///         variants {
///             Circle(Circle) = "circle",
///         }
///     }
/// }
///
/// let shape = Shape::from(Circle::builder().radius(2.0).build().unwrap());
/// assert_eq!(shape.kind(), ShapeKind::Circle);
/// assert_eq!(ShapeKind::Circle.wire_name(), "circle");
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            kind: $kind:ident,
            family: $family:literal,
            unknown_fields: $policy:ident,
            variants {
                $( $(#[$vmeta:meta])* $variant:ident($payload:ty) = $wire:literal ),* $(,)?
            }
        }
    ) => {
        #[doc = concat!("Kinds of [`", stringify!($name), "`] variants.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $kind {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $crate::variant::Discriminant for $kind {
            const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            fn wire_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )*
                }
            }
        }

        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::variant::Discriminant::wire_name(*self))
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($payload), )*
        }

        impl $crate::variant::TaggedUnion for $name {
            type Kind = $kind;

            const FAMILY: &'static str = $family;

            const UNKNOWN_FIELDS: $crate::variant::UnknownFieldPolicy =
                $crate::variant::UnknownFieldPolicy::$policy;

            fn kind(&self) -> $kind {
                match self {
                    $( Self::$variant(_) => $kind::$variant, )*
                }
            }

            fn dispatch_table() -> &'static $crate::dispatch::DispatchTable<Self> {
                static TABLE: ::std::sync::LazyLock<$crate::dispatch::DispatchTable<$name>> =
                    ::std::sync::LazyLock::new(|| {
                        let mut table = $crate::dispatch::DispatchTable::<$name>::new($family);
                        $(
                            if let Err(err) = table.register($wire, |body, path| {
                                <$payload as $crate::object::VariantBody>::decode_body(body, path)
                                    .map($name::$variant)
                            }) {
                                panic!("{err}");
                            }
                        )*
                        table
                    });
                &TABLE
            }

            fn encode_body(
                &self,
            ) -> ::std::result::Result<$crate::serde_json::Value, $crate::error::EncodeError> {
                match self {
                    $( Self::$variant(payload) => $crate::object::VariantBody::encode_body(payload), )*
                }
            }
        }

        $(
            impl ::std::convert::From<$payload> for $name {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }

            impl $crate::variant::VariantOf<$name> for $payload {
                const KIND: $kind = $kind::$variant;

                #[allow(unreachable_patterns)]
                fn from_ref(union: &$name) -> ::std::option::Option<&Self> {
                    match union {
                        $name::$variant(payload) => ::std::option::Option::Some(payload),
                        _ => ::std::option::Option::None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn from_union(union: $name) -> ::std::result::Result<Self, $name> {
                    match union {
                        $name::$variant(payload) => ::std::result::Result::Ok(payload),
                        other => ::std::result::Result::Err(other),
                    }
                }
            }
        )*
    };
}
