//! # Searchagg
//!
//! Strongly typed search aggregations, on the wire format of OpenSearch-compatible engines.
//!
//! * **[`aggregation`]:** the request family. An [`Aggregation`] is one of the supported kinds
//!   (`terms`, `date_histogram`, `avg`, `bucket_script`, ...). An [`AggregationNode`] nests
//!   named sub-aggregations to any depth.
//! * **[`aggregate`]:** the response family. An [`Aggregate`] is one result, decoded from typed
//!   keys or from a flat node. Open buckets expose their sub-results on demand.
//! * **[`common`]:** union-typed field values such as [`common::BucketsPath`] and
//!   [`common::Script`].
//!
//! All encoding and decoding goes through [`searchagg_core`], which this crate re-exports.
//!
//! ```rust
//! use searchagg::JsonCodec;
//! use searchagg::aggregation::{AggregationKind, AggregationNode};
//!
//! let codec = JsonCodec::default();
//! let aggs = codec
//!     .decode_node_map::<searchagg::Aggregation>(br#"{
//!         "per_day": {
//!             "date_histogram": { "field": "ts", "calendar_interval": "day" },
//!             "aggs": { "revenue": { "sum": { "field": "amount" } } }
//!         }
//!     }"#)
//!     .unwrap();
//!
//! let per_day: &AggregationNode = &aggs["per_day"];
//! assert_eq!(per_day.kind(), AggregationKind::DateHistogram);
//! assert_eq!(per_day.child("revenue").unwrap().kind(), AggregationKind::Sum);
//! ```
pub mod aggregate;
pub mod aggregation;
pub mod common;

pub use aggregate::{Aggregate, AggregateKind, AggregateNode};
pub use aggregation::{Aggregation, AggregationKind, AggregationNode};

// Re-exports
pub use searchagg_core;
pub use searchagg_core::{CodecSettings, JsonCodec};
