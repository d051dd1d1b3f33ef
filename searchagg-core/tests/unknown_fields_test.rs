use searchagg_core::codec::JsonCodec;
use searchagg_core::node::Node;
use searchagg_core::object::JsonObject;
use searchagg_core::path::JsonPath;
use searchagg_core::value::NullableDouble;
use serde_json::{Value, json};
use shape::{Polygon, Shape};

mod shape;

#[test]
fn test_open_payload_captures_exactly_the_undeclared_fields() {
    let input = json!({
        "sides": 5,
        "vendor_rank": 0.75,
        "name": "pentagon",
        "min_angle": null,
        "tags": ["regular", {"source": "survey"}]
    });

    let polygon = Polygon::decode(&input, &JsonPath::root()).unwrap();

    assert_eq!(*polygon.sides(), 5);
    assert_eq!(polygon.name().map(String::as_str), Some("pentagon"));
    assert!(polygon.min_angle().is_some_and(NullableDouble::is_null));
    assert_eq!(polygon.min_angle().map(NullableDouble::get), Some(f64::INFINITY));
    assert_eq!(polygon.extra().keys().collect::<Vec<_>>(), vec!["vendor_rank", "tags"]);
    assert_eq!(polygon.extra()["vendor_rank"].as_value(), &json!(0.75));
    assert_eq!(
        polygon.extra()["tags"].as_value(),
        &json!(["regular", {"source": "survey"}])
    );

    assert_eq!(polygon.encode().unwrap(), input);
}

#[test]
fn test_captured_fields_are_written_after_declared_ones() {
    let polygon = Polygon::builder()
        .extra("vendor_rank", 0.75)
        .sides(3u32)
        .build()
        .unwrap();

    let bytes = JsonCodec::default()
        .encode_variant(&Shape::from(polygon))
        .unwrap();

    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"polygon":{"sides":3,"vendor_rank":0.75}}"#
    );
}

#[test]
fn test_open_payload_inside_a_tree() {
    let input = json!({
        "aggregations": {"p": {"polygon": {"sides": 4, "unit": "cm"}}},
        "group": {}
    });

    let node = Node::<Shape>::from_json(&input).unwrap();
    let polygon = node.child("p").and_then(|p| p.payload_as::<Polygon>()).unwrap();

    assert_eq!(polygon.extra()["unit"].as_value(), &Value::from("cm"));
    assert_eq!(node.to_json().unwrap(), input);
}
