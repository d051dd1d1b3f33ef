//! Flat-object encoding of [`Node`] trees.
//!
//! Subtrees are encoded post-order from a heap stack. Finished child objects wait on an output
//! stack until their parent is closed, which pops exactly as many values as it has children.
use super::{AGGREGATIONS_KEY, META_KEY, Node};
use crate::error::EncodeError;
use crate::value::JsonData;
use crate::variant::TaggedUnion;
use indexmap::IndexMap;
use serde_json::{Map, Value};

enum Step<'n, U> {
    Open(&'n Node<U>),
    Close(&'n Node<U>),
}

/// Encodes `node` as a flat object: `aggregations`, then `meta`, then the discriminant and its
/// body, then any captured unknown keys.
pub fn encode_node<U: TaggedUnion>(node: &Node<U>) -> Result<Value, EncodeError> {
    let mut steps: Vec<Step<'_, U>> = node.children.values().rev().map(Step::Open).collect();
    let mut finished: Vec<Value> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Open(node) => {
                steps.push(Step::Close(node));
                steps.extend(node.children.values().rev().map(Step::Open));
            }
            Step::Close(node) => {
                let children = finished.split_off(finished.len() - node.children.len());
                finished.push(encode_level(node, children)?);
            }
        }
    }

    encode_level(node, finished)
}

/// Encodes a name -> node map, such as the top-level `aggs` of a search body.
pub fn encode_node_map<U: TaggedUnion>(
    nodes: &IndexMap<String, Node<U>>,
) -> Result<Value, EncodeError> {
    let mut out = Map::new();
    for (name, node) in nodes {
        out.insert(name.clone(), encode_node(node)?);
    }
    Ok(Value::Object(out))
}

/// Writes one level, given its already encoded children in order.
fn encode_level<U: TaggedUnion>(node: &Node<U>, children: Vec<Value>) -> Result<Value, EncodeError> {
    let mut out = Map::new();

    if !children.is_empty() {
        let named = node.children.keys().cloned().zip(children).collect();
        out.insert(AGGREGATIONS_KEY.to_string(), Value::Object(named));
    }

    if !node.meta.is_empty() {
        out.insert(META_KEY.to_string(), to_object(&node.meta));
    }

    let (wire, body) = U::dispatch_table().encode(&node.payload)?;
    out.insert(wire.to_string(), body);

    for (key, value) in &node.unknown {
        out.insert(key.clone(), value.as_value().clone());
    }

    Ok(Value::Object(out))
}

fn to_object(entries: &IndexMap<String, JsonData>) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(key, value)| (key.clone(), value.as_value().clone()))
            .collect(),
    )
}
