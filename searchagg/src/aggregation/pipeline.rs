//! Pipeline aggregations: compute over the output of sibling or parent aggregations.
use crate::common::{BucketsPath, GapPolicy, Script};
use searchagg_core::json_object;

json_object! {
    pub struct AverageBucketAggregation {
        builder: AverageBucketAggregationBuilder,
        fields {
            optional buckets_path: BucketsPath = "buckets_path",
            optional format: String = "format",
            optional gap_policy: GapPolicy = "gap_policy",
        }
    }
}

json_object! {
    pub struct MaxBucketAggregation {
        builder: MaxBucketAggregationBuilder,
        fields {
            optional buckets_path: BucketsPath = "buckets_path",
            optional format: String = "format",
            optional gap_policy: GapPolicy = "gap_policy",
        }
    }
}

json_object! {
    pub struct MinBucketAggregation {
        builder: MinBucketAggregationBuilder,
        fields {
            optional buckets_path: BucketsPath = "buckets_path",
            optional format: String = "format",
            optional gap_policy: GapPolicy = "gap_policy",
        }
    }
}

json_object! {
    pub struct SumBucketAggregation {
        builder: SumBucketAggregationBuilder,
        fields {
            optional buckets_path: BucketsPath = "buckets_path",
            optional format: String = "format",
            optional gap_policy: GapPolicy = "gap_policy",
        }
    }
}

json_object! {
    pub struct BucketScriptAggregation {
        builder: BucketScriptAggregationBuilder,
        fields {
            required buckets_path: BucketsPath = "buckets_path",
            required script: Script = "script",
            optional format: String = "format",
            optional gap_policy: GapPolicy = "gap_policy",
        }
    }
}
