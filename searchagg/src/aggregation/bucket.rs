//! Bucket aggregations: split documents into buckets, each of which runs the child aggregations.
use crate::common::Script;
use searchagg_core::error::{DecodeError, EncodeError};
use searchagg_core::json_object;
use searchagg_core::object::VariantBody;
use searchagg_core::path::JsonPath;
use searchagg_core::value::JsonData;
use serde_json::Value;

json_object! {
    pub struct TermsAggregation {
        builder: TermsAggregationBuilder,
        fields {
            optional field: String = "field",
            optional size: i64 = "size",
            optional shard_size: i64 = "shard_size",
            optional min_doc_count: i64 = "min_doc_count",
            optional missing: JsonData = "missing",
            /// Sort order, e.g. `{"_count": "desc"}` or a list of such objects.
            optional order: JsonData = "order",
            optional include: JsonData = "include",
            optional exclude: JsonData = "exclude",
            optional script: Script = "script",
            optional execution_hint: String = "execution_hint",
            optional show_term_doc_count_error: bool = "show_term_doc_count_error",
            optional value_type: String = "value_type",
        }
    }
}

json_object! {
    pub struct HistogramAggregation {
        builder: HistogramAggregationBuilder,
        fields {
            optional field: String = "field",
            required interval: f64 = "interval",
            optional offset: f64 = "offset",
            optional min_doc_count: i64 = "min_doc_count",
            optional missing: f64 = "missing",
            optional extended_bounds: JsonData = "extended_bounds",
            optional keyed: bool = "keyed",
            optional order: JsonData = "order",
            optional format: String = "format",
            optional script: Script = "script",
        }
    }
}

json_object! {
    pub struct DateHistogramAggregation {
        builder: DateHistogramAggregationBuilder,
        fields {
            optional field: String = "field",
            /// Calendar-aware interval such as `month` or `1d`.
            optional calendar_interval: String = "calendar_interval",
            /// Fixed interval in SI units, e.g. `90m`.
            optional fixed_interval: String = "fixed_interval",
            optional format: String = "format",
            optional time_zone: String = "time_zone",
            optional offset: String = "offset",
            optional min_doc_count: i64 = "min_doc_count",
            optional missing: JsonData = "missing",
            optional extended_bounds: JsonData = "extended_bounds",
            optional keyed: bool = "keyed",
            optional order: JsonData = "order",
        }
    }
}

json_object! {
    /// One `[from, to)` range of a [`RangeAggregation`].
    pub struct AggregationRange {
        builder: AggregationRangeBuilder,
        fields {
            optional key: String = "key",
            optional from: f64 = "from",
            optional to: f64 = "to",
        }
    }
}

json_object! {
    pub struct RangeAggregation {
        builder: RangeAggregationBuilder,
        fields {
            optional field: String = "field",
            required ranges: Vec<AggregationRange> = "ranges",
            optional keyed: bool = "keyed",
            optional missing: JsonData = "missing",
            optional format: String = "format",
            optional script: Script = "script",
        }
    }
}

/// Narrows the bucket to the documents matching a query.
///
/// The body is the query itself, kept opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterAggregation {
    query: JsonData,
}

impl FilterAggregation {
    pub fn new(query: impl Into<JsonData>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &JsonData {
        &self.query
    }
}

impl VariantBody for FilterAggregation {
    fn decode_body(body: &Value, _path: &JsonPath) -> Result<Self, DecodeError> {
        Ok(Self::new(body.clone()))
    }

    fn encode_body(&self) -> Result<Value, EncodeError> {
        Ok(self.query.as_value().clone())
    }
}

json_object! {
    pub struct FiltersAggregation {
        builder: FiltersAggregationBuilder,
        fields {
            /// Named (`{"errors": {...}}`) or anonymous (`[{...}]`) filters.
            required filters: JsonData = "filters",
            optional other_bucket: bool = "other_bucket",
            optional other_bucket_key: String = "other_bucket_key",
            optional keyed: bool = "keyed",
        }
    }
}

json_object! {
    pub struct GlobalAggregation {
        builder: GlobalAggregationBuilder,
        fields {}
    }
}

json_object! {
    pub struct NestedAggregation {
        builder: NestedAggregationBuilder,
        fields {
            required path: String = "path",
        }
    }
}

json_object! {
    pub struct MissingAggregation {
        builder: MissingAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
        }
    }
}
