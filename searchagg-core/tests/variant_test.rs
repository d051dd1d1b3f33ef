use searchagg_core::dispatch::DispatchTable;
use searchagg_core::error::VariantError;
use searchagg_core::variant::{Discriminant, TaggedUnion, UnknownFieldPolicy};
use shape::{Circle, Group, Measure, Rectangle, Shape, ShapeKind, circle};

mod shape;

#[test]
fn test_kind_follows_payload() {
    let shape = Shape::of(circle(1.0));

    assert_eq!(shape.kind(), ShapeKind::Circle);
    assert_eq!(shape.wire_name(), "circle");
    assert!(shape.is_kind(ShapeKind::Circle));
    assert!(!shape.is_kind(ShapeKind::Rectangle));
}

#[test]
fn test_with_kind_rejects_mismatched_payload() {
    let err = Shape::with_kind(ShapeKind::Rectangle, circle(1.0)).unwrap_err();

    assert_eq!(
        err,
        VariantError::KindMismatch {
            family: "shape",
            expected: "rectangle",
            found: "circle"
        }
    );
}

#[test]
fn test_with_kind_accepts_matching_payload() {
    let shape = Shape::with_kind(ShapeKind::Circle, circle(1.0)).unwrap();
    assert_eq!(shape, Shape::Circle(circle(1.0)));
}

#[test]
fn test_try_as_active_kind() {
    let shape = Shape::from(circle(3.0));
    let payload = shape.try_as::<Circle>().unwrap();

    assert_eq!(*payload.radius(), 3.0);
}

#[test]
fn test_try_as_other_kind_fails() {
    let shape = Shape::from(circle(3.0));
    let err = shape.try_as::<Rectangle>().unwrap_err();

    assert_eq!(err.to_string(), "Kind mismatch in 'shape': expected 'rectangle', found 'circle'");
}

#[test]
fn test_into_payload_hands_back_variant_on_mismatch() {
    let shape = Shape::from(circle(3.0));
    let shape = shape.into_payload::<Group>().unwrap_err();
    let circle = shape.into_payload::<Circle>().unwrap();

    assert_eq!(*circle.radius(), 3.0);
}

#[test]
fn test_equality_is_structural() {
    let a = Shape::from(Circle::builder().radius(1.0).label("a").build().unwrap());
    let b = Shape::from(Circle::builder().label("a").radius(1.0).build().unwrap());
    let c = Shape::from(Circle::builder().radius(1.0).build().unwrap());

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_discriminants_map_both_ways() {
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::from_wire(kind.wire_name()), Some(*kind));
        assert_eq!(kind.to_string(), kind.wire_name());
    }
    assert_eq!(ShapeKind::from_wire("hexagon"), None);
}

#[test]
fn test_generated_dispatch_table() {
    let table: &DispatchTable<Shape> = Shape::dispatch_table();

    assert_eq!(table.family(), "shape");
    assert_eq!(
        table.kinds().collect::<Vec<_>>(),
        vec!["circle", "rectangle", "polygon", "group"]
    );
    assert!(std::ptr::eq(table, Shape::dispatch_table()));
}

#[test]
fn test_policy_is_declared_per_family() {
    assert_eq!(Shape::UNKNOWN_FIELDS, UnknownFieldPolicy::Reject);
    assert_eq!(Measure::UNKNOWN_FIELDS, UnknownFieldPolicy::Capture);
}
