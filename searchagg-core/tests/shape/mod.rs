//! A small fixture family exercising every generator feature: required and optional fields,
//! sentinel numbers, an open payload, a field-less payload, and a pass-through family.
#![allow(dead_code)]

use searchagg_core::node::Node;
use searchagg_core::value::{NullableDouble, PositiveInfinity, Zero};
use searchagg_core::{json_object, tagged_union};

json_object! {
    pub struct Circle {
        builder: CircleBuilder,
        fields {
            required radius: f64 = "radius",
            optional label: String = "label",
        }
    }
}

json_object! {
    pub struct Rectangle {
        builder: RectangleBuilder,
        fields {
            required width: f64 = "width",
            required height: f64 = "height",
            optional area_hint: NullableDouble<Zero> = "area_hint",
        }
    }
}

json_object! {
    /// Open: undeclared fields are kept in `extra`.
    pub struct Polygon {
        builder: PolygonBuilder,
        unknown_fields: extra,
        fields {
            required sides: u32 = "sides",
            optional name: String = "name",
            optional min_angle: NullableDouble<PositiveInfinity> = "min_angle",
        }
    }
}

json_object! {
    pub struct Group {
        builder: GroupBuilder,
        fields {}
    }
}

tagged_union! {
    pub enum Shape {
        kind: ShapeKind,
        family: "shape",
        unknown_fields: Reject,
        variants {
            Circle(Circle) = "circle",
            Rectangle(Rectangle) = "rectangle",
            Polygon(Polygon) = "polygon",
            Group(Group) = "group",
        }
    }
}

json_object! {
    pub struct Count {
        builder: CountBuilder,
        fields {
            required value: i64 = "value",
        }
    }
}

json_object! {
    pub struct Total {
        builder: TotalBuilder,
        fields {
            optional value: NullableDouble<Zero> = "value",
        }
    }
}

tagged_union! {
    /// A pass-through family: unrecognized node keys are captured, not rejected.
    pub enum Measure {
        kind: MeasureKind,
        family: "measure",
        unknown_fields: Capture,
        variants {
            Count(Count) = "count",
            Total(Total) = "total",
        }
    }
}

pub fn circle(radius: f64) -> Circle {
    Circle::builder().radius(radius).build().unwrap()
}

pub fn group() -> Group {
    Group::builder().build().unwrap()
}

/// A chain of `depth` nodes where level `n` holds one child named `level_{n + 1}`.
pub fn chain(depth: usize) -> Node<Shape> {
    let mut node = Node::new(circle(depth as f64));
    for level in (1..depth).rev() {
        node = Node::<Shape>::builder()
            .payload(group())
            .child(format!("level_{}", level + 1), node)
            .build()
            .unwrap();
    }
    node
}
