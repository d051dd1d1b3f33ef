//! # Builders
//!
//! Every payload is constructed through a single-use builder: setters accumulate fields, and
//! [`ObjectBuilder::build`] validates the required ones and freezes the result.
//!
//! Builders are consumed by `build`, so a builder cannot be touched again once it has produced its
//! value. Reusing one is a compile error rather than a runtime failure:
//!
//! ```compile_fail
//! use searchagg_core::builder::{ObjectBuilder, require};
//! use searchagg_core::error::BuildError;
//!
//! #[derive(Default)]
//! struct NameBuilder {
//!     name: Option<String>,
//! }
//!
//! impl ObjectBuilder for NameBuilder {
//!     type Output = String;
//!
//!     fn build(self) -> Result<String, BuildError> {
//!         require(self.name, "Name", "name")
//!     }
//! }
//!
//! let builder = NameBuilder { name: Some("a".into()) };
//! let first = builder.build();
//! let second = builder.build(); // error[E0382]: use of moved value: `builder`
//! ```
//!
//! ## Required fields
//!
//! `build` checks required fields in declaration order and reports the first one that is missing,
//! so the same incomplete builder always fails with the same message.
use crate::error::BuildError;

/// A single-use accumulator that produces an immutable `Output`.
pub trait ObjectBuilder: Default {
    type Output;

    /// Validates the accumulated fields and produces the final value.
    fn build(self) -> Result<Self::Output, BuildError>;
}

/// Unwraps a required field, naming it in the error when it was never set.
pub fn require<T>(
    value: Option<T>,
    object: &'static str,
    field: &'static str,
) -> Result<T, BuildError> {
    value.ok_or(BuildError::MissingField { object, field })
}

/// Builds a value by applying `f` to a fresh builder.
///
/// ```rust
/// # use searchagg_core::builder::{ObjectBuilder, require, of};
/// # use searchagg_core::error::BuildError;
/// # #[derive(Default)]
/// # struct NameBuilder { name: Option<String> }
/// # impl NameBuilder {
/// #     fn name(mut self, v: &str) -> Self { self.name = Some(v.into()); self }
/// # }
/// # impl ObjectBuilder for NameBuilder {
/// #     type Output = String;
/// #     fn build(self) -> Result<String, BuildError> { require(self.name, "Name", "name") }
/// # }
/// let name = of(|b: NameBuilder| b.name("terms")).unwrap();
/// assert_eq!(name, "terms");
/// ```
pub fn of<B, F>(f: F) -> Result<B::Output, BuildError>
where
    B: ObjectBuilder,
    F: FnOnce(B) -> B,
{
    f(B::default()).build()
}
