use indexmap::IndexMap;
use searchagg::aggregate::*;
use searchagg::common::Buckets;
use searchagg_core::codec::JsonCodec;
use searchagg_core::error::DecodeErrorKind;
use searchagg_core::path::JsonPath;
use searchagg_core::value::NullableDouble;
use searchagg_core::variant::{Discriminant, TaggedUnion};
use serde_json::{Value, json};

/// A minimal valid body for every response kind.
fn valid_body(kind: AggregateKind) -> Value {
    match kind {
        AggregateKind::Avg
        | AggregateKind::Sum
        | AggregateKind::Min
        | AggregateKind::Max
        | AggregateKind::ValueCount
        | AggregateKind::SimpleValue => json!({"value": 1.5}),
        AggregateKind::Cardinality => json!({"value": 7}),
        AggregateKind::BucketMetricValue => json!({"keys": ["2024-01"], "value": 3.0}),
        AggregateKind::Stats => {
            json!({"count": 2, "min": 1.0, "max": 3.0, "avg": 2.0, "sum": 4.0})
        }
        AggregateKind::Sterms => json!({"buckets": [{"key": "a", "doc_count": 1}]}),
        AggregateKind::Lterms => json!({"buckets": [{"key": 4, "doc_count": 1}]}),
        AggregateKind::Histogram => json!({"buckets": [{"key": 10.0, "doc_count": 2}]}),
        AggregateKind::DateHistogram => {
            json!({"buckets": [{"key": 1704067200000i64, "key_as_string": "2024-01-01", "doc_count": 5}]})
        }
        AggregateKind::Range => json!({"buckets": [{"key": "*-10.0", "to": 10.0, "doc_count": 4}]}),
        AggregateKind::Filter
        | AggregateKind::Global
        | AggregateKind::Nested
        | AggregateKind::Missing => json!({"doc_count": 9}),
        AggregateKind::TopHits => json!({"hits": {"total": {"value": 1}, "hits": []}}),
    }
}

#[test]
fn test_every_kind_round_trips_through_typed_keys() {
    let codec = JsonCodec::default();
    let mut input = serde_json::Map::new();
    for kind in AggregateKind::ALL {
        input.insert(format!("{kind}#result_{kind}"), valid_body(*kind));
    }
    let input = Value::Object(input);

    let results: IndexMap<String, Aggregate> =
        codec.decode_typed_keys(input.to_string().as_bytes()).unwrap();

    assert_eq!(results.len(), AggregateKind::ALL.len());
    for kind in AggregateKind::ALL {
        assert_eq!(results[format!("result_{kind}").as_str()].kind(), *kind);
    }

    let encoded: Value = serde_json::from_slice(&codec.encode_typed_keys(&results).unwrap()).unwrap();
    assert_eq!(encoded, input);
}

#[test]
fn test_empty_metrics_read_as_their_sentinels_and_stay_null() {
    let body = br#"{
        "min#low": {"value": null},
        "max#high": {"value": null},
        "avg#mean": {"value": null},
        "stats#all": {"count": 0, "min": null, "max": null, "avg": null, "sum": 0.0}
    }"#;
    let codec = JsonCodec::default();

    let results = codec.decode_typed_keys::<Aggregate>(body).unwrap();

    let low = results["low"].try_as::<MinAggregate>().unwrap();
    let high = results["high"].try_as::<MaxAggregate>().unwrap();
    let mean = results["mean"].try_as::<AvgAggregate>().unwrap();
    let stats = results["all"].try_as::<StatsAggregate>().unwrap();

    assert_eq!(low.value().map(NullableDouble::get), Some(f64::INFINITY));
    assert_eq!(high.value().map(NullableDouble::get), Some(f64::NEG_INFINITY));
    assert_eq!(mean.value().map(NullableDouble::get), Some(0.0));
    assert_eq!(stats.min().map(NullableDouble::get), Some(f64::INFINITY));
    assert_eq!(stats.max().map(NullableDouble::get), Some(f64::NEG_INFINITY));

    let encoded: Value = serde_json::from_slice(&codec.encode_typed_keys(&results).unwrap()).unwrap();
    assert_eq!(encoded["min#low"], json!({"value": null}));
    assert_eq!(encoded["stats#all"]["max"], Value::Null);
}

#[test]
fn test_absent_metric_value_stays_absent() {
    let results = JsonCodec::default()
        .decode_typed_keys::<Aggregate>(br#"{"avg#mean": {}}"#)
        .unwrap();

    let mean = results["mean"].try_as::<AvgAggregate>().unwrap();
    assert_eq!(mean.value(), None);
    assert_eq!(
        JsonCodec::default().encode_typed_keys(&results).unwrap(),
        br#"{"avg#mean":{}}"#.to_vec()
    );
}

#[test]
fn test_bucket_sub_aggregations() {
    let body = br#"{
        "sterms#by_customer": {
            "doc_count_error_upper_bound": 0,
            "sum_other_doc_count": 0,
            "buckets": [
                {
                    "key": "acme",
                    "doc_count": 3,
                    "max#biggest": {"value": 40.0},
                    "filter#paid": {"doc_count": 2, "sum#revenue": {"value": 55.0}}
                }
            ]
        }
    }"#;

    let results = JsonCodec::default().decode_typed_keys::<Aggregate>(body).unwrap();
    let terms = results["by_customer"].try_as::<StringTermsAggregate>().unwrap();
    let bucket = terms.buckets().iter().next().unwrap();

    assert_eq!(bucket.key(), "acme");
    assert_eq!(bucket.extra().len(), 2);

    let subs = bucket.sub_aggregations().unwrap();
    assert_eq!(subs.keys().collect::<Vec<_>>(), vec!["biggest", "paid"]);

    let paid = subs["paid"].try_as::<FilterAggregate>().unwrap();
    assert_eq!(*paid.doc_count(), 2);
    let revenue = paid.sub_aggregations().unwrap();
    assert_eq!(revenue["revenue"].kind(), AggregateKind::Sum);
}

#[test]
fn test_untyped_fields_in_buckets_are_not_sub_aggregations() {
    let bucket = HistogramBucket::builder()
        .key(1.0)
        .doc_count(1)
        .extra("score", 0.5)
        .build()
        .unwrap();

    assert!(bucket.sub_aggregations().unwrap().is_empty());
}

#[test]
fn test_unknown_kind_in_sub_aggregation_is_an_error() {
    let bucket = GlobalAggregate::builder()
        .doc_count(1)
        .extra("t_digest_percentiles#p", json!({"values": {}}))
        .build()
        .unwrap();

    let err = bucket.sub_aggregations().unwrap_err();
    assert!(matches!(err.kind(), DecodeErrorKind::UnknownDiscriminant { .. }));
}

#[test]
fn test_sub_aggregation_errors_are_located_in_their_bucket() {
    let body = br#"{
        "sterms#by_customer": {
            "buckets": [
                {"key": "acme", "doc_count": 3, "avg#avg_price": {"value": 12.5}},
                {"key": "globex", "doc_count": 1, "avg#avg_price": {"value": "n/a"}}
            ]
        }
    }"#;

    let results = JsonCodec::default().decode_typed_keys::<Aggregate>(body).unwrap();
    let terms = results["by_customer"].try_as::<StringTermsAggregate>().unwrap();
    let buckets_path = JsonPath::root().key("sterms#by_customer").key("buckets");

    let mut errors = Vec::new();
    for (index, bucket) in terms.buckets().iter().enumerate() {
        if let Err(err) = bucket.sub_aggregations_at(&buckets_path.index(index)) {
            errors.push(err);
        }
    }

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].path().to_string(),
        r#"$["sterms#by_customer"].buckets[1]["avg#avg_price"].value"#
    );
    assert!(matches!(errors[0].kind(), DecodeErrorKind::InvalidValue(_)));
}

#[test]
fn test_keyed_buckets() {
    let body = json!({
        "buckets": {
            "cheap": {"to": 10.0, "doc_count": 4},
            "pricey": {"from": 10.0, "doc_count": 1}
        }
    });

    let results = JsonCodec::default()
        .decode_typed_keys::<Aggregate>(json!({"range#prices": body}).to_string().as_bytes())
        .unwrap();
    let range = results["prices"].try_as::<RangeAggregate>().unwrap();

    assert!(matches!(range.buckets(), Buckets::Keyed(_)));
    assert_eq!(range.buckets().len(), 2);
    assert_eq!(
        range.buckets().iter().map(|b| *b.doc_count()).collect::<Vec<_>>(),
        vec![4, 1]
    );
}

#[test]
fn test_flat_response_node_passes_unknown_keys_through() {
    let input = json!({
        "aggregations": {
            "per_type": {"sterms": {"buckets": []}}
        },
        "meta": {"dashboard": "sales"},
        "global": {"doc_count": 120},
        "took_ms": 3
    });

    let node = AggregateNode::from_json(&input).unwrap();

    assert_eq!(node.kind(), AggregateKind::Global);
    assert_eq!(node.unknown()["took_ms"].as_value(), &json!(3));
    assert_eq!(node.child("per_type").map(|n| n.kind()), Some(AggregateKind::Sterms));
    assert_eq!(node.to_json().unwrap(), input);
}
