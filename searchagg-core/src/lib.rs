//! # Searchagg Core
//!
//! `searchagg-core` is the polymorphic variant codec behind the `searchagg` aggregation types. It
//! transcodes "one of N known shapes" JSON values, selected by a discriminant string, to strongly
//! typed Rust enums and back, including recursive named trees of them.
//!
//! ## Key Components
//!
//! * **[`tagged_union!`]:** Declares a family: its kind enum, its union enum and the dispatch table
//!   mapping wire discriminants to payload decoders.
//! * **[`json_object!`]:** Declares a payload record together with its single-use builder and its
//!   field table. Records are closed unless they declare an unknown-field bucket.
//! * **[`Node`]:** A payload with named children, metadata and pass-through keys, decoded from
//!   and encoded to one flat JSON object per level, at any depth.
//! * **[`JsonCodec`]:** The byte-level entry point, configured by [`CodecSettings`].
//!
//! ## Errors
//!
//! Decoding failures are [`error::DecodeError`]s and always carry the [`path::JsonPath`] of the
//! offending value, e.g. `$.aggregations.by_day.date_histogram.interval`.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per top-level call, `trace` when unknown fields are
//! captured) and never installs a subscriber.
//!
//! ## Re-exports
//!
//! `indexmap`, `serde` and `serde_json` are re-exported for the generator macros and so that
//! consumers use compatible versions.
pub mod builder;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod node;
pub mod object;
pub mod path;
pub mod value;
pub mod variant;

pub use codec::{CodecSettings, JsonCodec};
pub use node::Node;

// Re-exports
pub use indexmap;
pub use serde;
pub use serde_json;
