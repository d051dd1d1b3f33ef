//! # Aggregation Requests
//!
//! [`Aggregation`] is one aggregation request: exactly one of the payload shapes below, selected
//! by its wire kind. On its own it is externally tagged (`{"avg": {"field": "price"}}`). Inside a
//! search body every aggregation is an [`AggregationNode`], which adds named sub-aggregations and
//! metadata next to the kind key:
//!
//! ```rust
//! use searchagg::aggregation::{Aggregation, AggregationKind, AggregationNode, TermsAggregation};
//! use searchagg::aggregation::AverageAggregation;
//!
//! let by_customer = AggregationNode::builder()
//!     .payload(TermsAggregation::builder().field("customer").size(10).build().unwrap())
//!     .child(
//!         "avg_price",
//!         AggregationNode::new(AverageAggregation::builder().field("price").build().unwrap()),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(by_customer.kind(), AggregationKind::Terms);
//! assert_eq!(
//!     by_customer.to_json().unwrap(),
//!     serde_json::json!({
//!         "aggregations": { "avg_price": { "avg": { "field": "price" } } },
//!         "terms": { "field": "customer", "size": 10 }
//!     })
//! );
//! ```
//!
//! The family is closed: an unknown kind or an unexpected field is a decode error.
mod bucket;
mod metric;
mod pipeline;

pub use bucket::*;
pub use metric::*;
pub use pipeline::*;

use searchagg_core::node::Node;
use searchagg_core::tagged_union;

tagged_union! {
    /// A single aggregation request.
    pub enum Aggregation {
        kind: AggregationKind,
        family: "aggregation",
        unknown_fields: Reject,
        variants {
            Avg(AverageAggregation) = "avg",
            AvgBucket(AverageBucketAggregation) = "avg_bucket",
            BucketScript(BucketScriptAggregation) = "bucket_script",
            Cardinality(CardinalityAggregation) = "cardinality",
            DateHistogram(DateHistogramAggregation) = "date_histogram",
            Filter(FilterAggregation) = "filter",
            Filters(FiltersAggregation) = "filters",
            Global(GlobalAggregation) = "global",
            Histogram(HistogramAggregation) = "histogram",
            Max(MaxAggregation) = "max",
            MaxBucket(MaxBucketAggregation) = "max_bucket",
            Min(MinAggregation) = "min",
            MinBucket(MinBucketAggregation) = "min_bucket",
            Missing(MissingAggregation) = "missing",
            Nested(NestedAggregation) = "nested",
            Range(RangeAggregation) = "range",
            Stats(StatsAggregation) = "stats",
            Sum(SumAggregation) = "sum",
            SumBucket(SumBucketAggregation) = "sum_bucket",
            Terms(TermsAggregation) = "terms",
            TopHits(TopHitsAggregation) = "top_hits",
            ValueCount(ValueCountAggregation) = "value_count",
        }
    }
}

/// An aggregation request with its named sub-aggregations.
pub type AggregationNode = Node<Aggregation>;
