//! Metric aggregations: compute a value over the documents of their bucket.
use crate::common::Script;
use searchagg_core::json_object;
use searchagg_core::value::JsonData;

json_object! {
    pub struct AverageAggregation {
        builder: AverageAggregationBuilder,
        fields {
            optional field: String = "field",
            /// Value used for documents without the field.
            optional missing: JsonData = "missing",
            optional script: Script = "script",
            optional format: String = "format",
        }
    }
}

json_object! {
    pub struct SumAggregation {
        builder: SumAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
            optional script: Script = "script",
            optional format: String = "format",
        }
    }
}

json_object! {
    pub struct MinAggregation {
        builder: MinAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
            optional script: Script = "script",
            optional format: String = "format",
        }
    }
}

json_object! {
    pub struct MaxAggregation {
        builder: MaxAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
            optional script: Script = "script",
            optional format: String = "format",
        }
    }
}

json_object! {
    pub struct StatsAggregation {
        builder: StatsAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
            optional script: Script = "script",
            optional format: String = "format",
        }
    }
}

json_object! {
    pub struct ValueCountAggregation {
        builder: ValueCountAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
            optional script: Script = "script",
        }
    }
}

json_object! {
    pub struct CardinalityAggregation {
        builder: CardinalityAggregationBuilder,
        fields {
            optional field: String = "field",
            optional missing: JsonData = "missing",
            optional script: Script = "script",
            /// Counts below this are expected to be close to exact.
            optional precision_threshold: i64 = "precision_threshold",
        }
    }
}

json_object! {
    pub struct TopHitsAggregation {
        builder: TopHitsAggregationBuilder,
        fields {
            optional from: i64 = "from",
            optional size: i64 = "size",
            optional sort: JsonData = "sort",
            optional source: JsonData = "_source",
            optional explain: bool = "explain",
            optional version: bool = "version",
        }
    }
}
