use searchagg_core::builder::{ObjectBuilder, of};
use searchagg_core::error::BuildError;
use searchagg_core::node::Node;
use searchagg_core::value::NullableDouble;
use shape::{Rectangle, RectangleBuilder, Shape, circle};

mod shape;

#[test]
fn test_first_missing_required_field_is_reported() {
    let err = Rectangle::builder().build().unwrap_err();

    assert_eq!(
        err,
        BuildError::MissingField {
            object: "Rectangle",
            field: "width"
        }
    );
}

#[test]
fn test_later_missing_field_is_reported_once_earlier_ones_are_set() {
    let err = Rectangle::builder().width(2.0).build().unwrap_err();
    assert_eq!(err.to_string(), "Missing required field 'height' in 'Rectangle'");
}

#[test]
fn test_optional_sentinel_states_survive_the_builder() {
    let absent = Rectangle::builder().width(1.0).height(1.0).build().unwrap();
    let null = Rectangle::builder()
        .width(1.0)
        .height(1.0)
        .area_hint(NullableDouble::null())
        .build()
        .unwrap();
    let value = Rectangle::builder()
        .width(1.0)
        .height(1.0)
        .area_hint(4.0)
        .build()
        .unwrap();

    assert_eq!(absent.area_hint(), None);
    assert!(null.area_hint().is_some_and(NullableDouble::is_null));
    assert_eq!(null.area_hint().map(NullableDouble::get), Some(0.0));
    assert_eq!(value.area_hint().and_then(NullableDouble::as_option), Some(4.0));
}

#[test]
fn test_of_helper() {
    let rectangle = of(|b: RectangleBuilder| b.width(2.0).height(3.0)).unwrap();
    assert_eq!(*rectangle.height(), 3.0);
}

#[test]
fn test_builder_is_usable_through_the_trait() {
    fn finish<B: ObjectBuilder>(builder: B) -> Result<B::Output, BuildError> {
        builder.build()
    }

    assert!(finish(Rectangle::builder().width(1.0).height(1.0)).is_ok());
}

#[test]
fn test_node_builder_requires_payload() {
    let err = Node::<Shape>::builder()
        .child("a", Node::new(circle(1.0)))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        BuildError::MissingField {
            object: "shape",
            field: "payload"
        }
    );
}

#[test]
fn test_node_builder_last_child_with_same_name_wins() {
    let node = Node::<Shape>::builder()
        .payload(circle(0.0))
        .child("a", Node::new(circle(1.0)))
        .child("b", Node::new(circle(2.0)))
        .child("a", Node::new(circle(3.0)))
        .build()
        .unwrap();

    assert_eq!(node.children().keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(node.child("a"), Some(&Node::new(circle(3.0))));
}
