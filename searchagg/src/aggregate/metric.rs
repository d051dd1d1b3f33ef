//! Single- and multi-value metric results.
//!
//! Engines report the value of an empty metric as `null`. Each field declares what that `null`
//! reads as: `0` for averages and sums, `+inf` for minimums, `-inf` for maximums.
use indexmap::IndexMap;
use searchagg_core::json_object;
use searchagg_core::value::{JsonData, NegativeInfinity, NullableDouble, PositiveInfinity, Zero};

json_object! {
    pub struct AvgAggregate {
        builder: AvgAggregateBuilder,
        fields {
            optional value: NullableDouble<Zero> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct SumAggregate {
        builder: SumAggregateBuilder,
        fields {
            optional value: NullableDouble<Zero> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct MinAggregate {
        builder: MinAggregateBuilder,
        fields {
            optional value: NullableDouble<PositiveInfinity> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct MaxAggregate {
        builder: MaxAggregateBuilder,
        fields {
            optional value: NullableDouble<NegativeInfinity> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct ValueCountAggregate {
        builder: ValueCountAggregateBuilder,
        fields {
            optional value: NullableDouble<Zero> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct CardinalityAggregate {
        builder: CardinalityAggregateBuilder,
        fields {
            required value: i64 = "value",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct StatsAggregate {
        builder: StatsAggregateBuilder,
        fields {
            required count: i64 = "count",
            optional min: NullableDouble<PositiveInfinity> = "min",
            optional max: NullableDouble<NegativeInfinity> = "max",
            optional avg: NullableDouble<Zero> = "avg",
            optional sum: f64 = "sum",
            optional min_as_string: String = "min_as_string",
            optional max_as_string: String = "max_as_string",
            optional avg_as_string: String = "avg_as_string",
            optional sum_as_string: String = "sum_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    /// Output of `bucket_script` and other pipelines producing one number.
    pub struct SimpleValueAggregate {
        builder: SimpleValueAggregateBuilder,
        fields {
            optional value: NullableDouble<Zero> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    /// Output of `max_bucket` / `min_bucket`: the value and the keys of the buckets holding it.
    pub struct BucketMetricValueAggregate {
        builder: BucketMetricValueAggregateBuilder,
        fields {
            required keys: Vec<String> = "keys",
            optional value: NullableDouble<Zero> = "value",
            optional value_as_string: String = "value_as_string",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}

json_object! {
    pub struct TopHitsAggregate {
        builder: TopHitsAggregateBuilder,
        fields {
            required hits: JsonData = "hits",
            optional meta: IndexMap<String, JsonData> = "meta",
        }
    }
}
