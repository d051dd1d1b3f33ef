//! # Aggregation Results
//!
//! [`Aggregate`] is one aggregation result. Responses name it in one of two ways:
//!
//! * **Typed keys** (`?typed_keys=true`): the map key carries the kind, `"sterms#by_customer"`.
//!   Decode the whole `aggregations` object with
//!   [`JsonCodec::decode_typed_keys`](searchagg_core::codec::JsonCodec::decode_typed_keys).
//! * **Flat node**: the kind key sits next to `aggregations` and `meta` in an [`AggregateNode`].
//!
//! The family passes unknown keys through: a flat node key that is neither reserved nor a known
//! kind is kept in [`Node::unknown`] instead of failing, since engines add result fields over
//! time.
//!
//! ```rust
//! use searchagg::aggregate::{Aggregate, AggregateKind, AvgAggregate, SubAggregations, StringTermsAggregate};
//! use searchagg_core::codec::JsonCodec;
//! use searchagg_core::variant::TaggedUnion;
//!
//! let body = br#"{
//!     "sterms#by_customer": {
//!         "buckets": [ { "key": "acme", "doc_count": 3, "avg#avg_price": { "value": 12.5 } } ]
//!     }
//! }"#;
//!
//! let results = JsonCodec::default().decode_typed_keys::<Aggregate>(body).unwrap();
//! let terms = results["by_customer"].try_as::<StringTermsAggregate>().unwrap();
//! let bucket = terms.buckets().iter().next().unwrap();
//!
//! let subs = bucket.sub_aggregations().unwrap();
//! assert_eq!(subs["avg_price"].kind(), AggregateKind::Avg);
//! assert_eq!(subs["avg_price"].try_as::<AvgAggregate>().unwrap().value().map(|v| v.get()), Some(12.5));
//! ```
mod bucket;
mod metric;

pub use bucket::*;
pub use metric::*;

use searchagg_core::node::Node;
use searchagg_core::tagged_union;

tagged_union! {
    /// A single aggregation result.
    pub enum Aggregate {
        kind: AggregateKind,
        family: "aggregate",
        unknown_fields: Capture,
        variants {
            Avg(AvgAggregate) = "avg",
            BucketMetricValue(BucketMetricValueAggregate) = "bucket_metric_value",
            Cardinality(CardinalityAggregate) = "cardinality",
            DateHistogram(DateHistogramAggregate) = "date_histogram",
            Filter(FilterAggregate) = "filter",
            Global(GlobalAggregate) = "global",
            Histogram(HistogramAggregate) = "histogram",
            Lterms(LongTermsAggregate) = "lterms",
            Max(MaxAggregate) = "max",
            Min(MinAggregate) = "min",
            Missing(MissingAggregate) = "missing",
            Nested(NestedAggregate) = "nested",
            Range(RangeAggregate) = "range",
            SimpleValue(SimpleValueAggregate) = "simple_value",
            Sterms(StringTermsAggregate) = "sterms",
            Stats(StatsAggregate) = "stats",
            Sum(SumAggregate) = "sum",
            TopHits(TopHitsAggregate) = "top_hits",
            ValueCount(ValueCountAggregate) = "value_count",
        }
    }
}

/// An aggregation result with its named sub-results.
pub type AggregateNode = Node<Aggregate>;
