//! Bucket results.
//!
//! Buckets and single-bucket aggregates are open: besides their declared fields they carry the
//! results of their sub-aggregations, whose names are not known in advance. Those land in
//! `extra()` and are decoded on demand with [`SubAggregations::sub_aggregations`].
use super::Aggregate;
use crate::common::Buckets;
use indexmap::IndexMap;
use searchagg_core::codec::typed_keys;
use searchagg_core::error::DecodeError;
use searchagg_core::json_object;
use searchagg_core::path::JsonPath;
use searchagg_core::value::JsonData;

/// Typed-keys separator used by search responses.
pub const TYPED_KEYS_SEPARATOR: char = '#';

/// An open response object whose captured fields may hold typed-key sub-aggregates.
pub trait SubAggregations {
    /// Fields that are not declared by the bucket type.
    fn captured(&self) -> &IndexMap<String, JsonData>;

    /// Decodes the `kind#name` entries among the captured fields. Other captured fields are
    /// ignored. Errors are located relative to this object.
    fn sub_aggregations(&self) -> Result<IndexMap<String, Aggregate>, DecodeError> {
        self.sub_aggregations_at(&JsonPath::root())
    }

    /// Like [`SubAggregations::sub_aggregations`], with errors located below `path`, the position
    /// of this object in the response (`$["sterms#by_customer"].buckets[2]`).
    fn sub_aggregations_at(
        &self,
        path: &JsonPath,
    ) -> Result<IndexMap<String, Aggregate>, DecodeError> {
        Aggregate::sub_aggregations_at(self.captured(), path)
    }
}

macro_rules! impl_sub_aggregations {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SubAggregations for $ty {
                fn captured(&self) -> &IndexMap<String, JsonData> {
                    self.extra()
                }
            }
        )*
    };
}

impl Aggregate {
    /// Decodes the typed-key sub-aggregates among an open object's captured fields.
    pub fn sub_aggregations(
        captured: &IndexMap<String, JsonData>,
    ) -> Result<IndexMap<String, Aggregate>, DecodeError> {
        Self::sub_aggregations_at(captured, &JsonPath::root())
    }

    /// Decodes the typed-key sub-aggregates of the open object found at `path`.
    pub fn sub_aggregations_at(
        captured: &IndexMap<String, JsonData>,
        path: &JsonPath,
    ) -> Result<IndexMap<String, Aggregate>, DecodeError> {
        typed_keys::decode_typed_entries(captured, path, TYPED_KEYS_SEPARATOR)
    }
}

json_object! {
    pub struct StringTermsBucket {
        builder: StringTermsBucketBuilder,
        unknown_fields: extra,
        fields {
            required key: String = "key",
            required doc_count: i64 = "doc_count",
            optional doc_count_error_upper_bound: i64 = "doc_count_error_upper_bound",
        }
    }
}

json_object! {
    pub struct StringTermsAggregate {
        builder: StringTermsAggregateBuilder,
        fields {
            required buckets: Buckets<StringTermsBucket> = "buckets",
            optional doc_count_error_upper_bound: i64 = "doc_count_error_upper_bound",
            optional sum_other_doc_count: i64 = "sum_other_doc_count",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct LongTermsBucket {
        builder: LongTermsBucketBuilder,
        unknown_fields: extra,
        fields {
            required key: i64 = "key",
            optional key_as_string: String = "key_as_string",
            required doc_count: i64 = "doc_count",
            optional doc_count_error_upper_bound: i64 = "doc_count_error_upper_bound",
        }
    }
}

json_object! {
    pub struct LongTermsAggregate {
        builder: LongTermsAggregateBuilder,
        fields {
            required buckets: Buckets<LongTermsBucket> = "buckets",
            optional doc_count_error_upper_bound: i64 = "doc_count_error_upper_bound",
            optional sum_other_doc_count: i64 = "sum_other_doc_count",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct HistogramBucket {
        builder: HistogramBucketBuilder,
        unknown_fields: extra,
        fields {
            required key: f64 = "key",
            optional key_as_string: String = "key_as_string",
            required doc_count: i64 = "doc_count",
        }
    }
}

json_object! {
    pub struct HistogramAggregate {
        builder: HistogramAggregateBuilder,
        fields {
            required buckets: Buckets<HistogramBucket> = "buckets",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct DateHistogramBucket {
        builder: DateHistogramBucketBuilder,
        unknown_fields: extra,
        fields {
            /// Bucket start, in milliseconds since the epoch.
            required key: i64 = "key",
            optional key_as_string: String = "key_as_string",
            required doc_count: i64 = "doc_count",
        }
    }
}

json_object! {
    pub struct DateHistogramAggregate {
        builder: DateHistogramAggregateBuilder,
        fields {
            required buckets: Buckets<DateHistogramBucket> = "buckets",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct RangeBucket {
        builder: RangeBucketBuilder,
        unknown_fields: extra,
        fields {
            optional key: String = "key",
            optional from: f64 = "from",
            optional from_as_string: String = "from_as_string",
            optional to: f64 = "to",
            optional to_as_string: String = "to_as_string",
            required doc_count: i64 = "doc_count",
        }
    }
}

json_object! {
    pub struct RangeAggregate {
        builder: RangeAggregateBuilder,
        fields {
            required buckets: Buckets<RangeBucket> = "buckets",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct FilterAggregate {
        builder: FilterAggregateBuilder,
        unknown_fields: extra,
        fields {
            required doc_count: i64 = "doc_count",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct GlobalAggregate {
        builder: GlobalAggregateBuilder,
        unknown_fields: extra,
        fields {
            required doc_count: i64 = "doc_count",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct NestedAggregate {
        builder: NestedAggregateBuilder,
        unknown_fields: extra,
        fields {
            required doc_count: i64 = "doc_count",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct MissingAggregate {
        builder: MissingAggregateBuilder,
        unknown_fields: extra,
        fields {
            required doc_count: i64 = "doc_count",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

impl_sub_aggregations!(
    StringTermsBucket,
    LongTermsBucket,
    HistogramBucket,
    DateHistogramBucket,
    RangeBucket,
    FilterAggregate,
    GlobalAggregate,
    NestedAggregate,
    MissingAggregate,
);
