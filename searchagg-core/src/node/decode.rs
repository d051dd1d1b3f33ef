//! Flat-object decoding of [`Node`] trees.
//!
//! Each object level is split into the reserved keys, the single discriminant key and whatever is
//! left. Child objects are queued on a heap stack together with the arena index of their parent,
//! and the finished nodes are attached to their parents bottom-up once every level is decoded.
use super::{AGGREGATIONS_KEY, AGGS_ALIAS, Children, META_KEY, Node};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::object::expect_object;
use crate::path::JsonPath;
use crate::value::JsonData;
use crate::variant::{TaggedUnion, UnknownFieldPolicy};
use indexmap::IndexMap;
use serde_json::Value;

/// A child object waiting to be decoded.
struct Pending<'v> {
    name: String,
    value: &'v Value,
    path: JsonPath,
    parent: Option<usize>,
    depth: usize,
}

/// A decoded node waiting to be attached to its parent (`None` is the root).
struct Slot<U> {
    name: String,
    node: Node<U>,
    parent: Option<usize>,
}

/// The keys of one object level, sorted by role.
struct Level<'v> {
    discriminant: Option<(&'v str, &'v Value)>,
    children: IndexMap<&'v str, (&'v Value, JsonPath)>,
    meta: IndexMap<String, JsonData>,
    unknown: IndexMap<String, JsonData>,
}

/// Decodes the node object at `path`.
///
/// `max_depth` bounds the number of levels, counting the root as 1. `None` means unbounded.
pub fn decode_node<U: TaggedUnion>(
    value: &Value,
    path: &JsonPath,
    max_depth: Option<usize>,
) -> Result<Node<U>, DecodeError> {
    let (mut root, children) = decode_level::<U>(value, path, 1, max_depth)?;

    let mut pending = Vec::new();
    queue_children(&mut pending, children, None, 2);

    let mut arena: Vec<Slot<U>> = Vec::new();
    while let Some(Pending {
        name,
        value,
        path,
        parent,
        depth,
    }) = pending.pop()
    {
        let (node, children) = decode_level::<U>(value, &path, depth, max_depth)?;
        let index = arena.len();
        arena.push(Slot { name, node, parent });
        queue_children(&mut pending, children, Some(index), depth + 1);
    }

    // Children always sit above their parent in the arena, and siblings are in wire order, so
    // popping attaches every subtree complete and each sibling list reversed.
    while let Some(Slot {
        name,
        mut node,
        parent,
    }) = arena.pop()
    {
        node.children.reverse();
        let siblings = match parent {
            Some(index) => &mut arena[index].node.children,
            None => &mut root.children,
        };
        siblings.insert(name, node);
    }
    root.children.reverse();

    Ok(root)
}

/// Decodes a name -> node object, such as the top-level `aggs` of a search body.
pub fn decode_node_map<U: TaggedUnion>(
    value: &Value,
    path: &JsonPath,
    max_depth: Option<usize>,
) -> Result<IndexMap<String, Node<U>>, DecodeError> {
    expect_object(value, path)?
        .iter()
        .map(|(name, node)| Ok((name.clone(), decode_node(node, &path.key(name), max_depth)?)))
        .collect()
}

fn queue_children<'v>(
    pending: &mut Vec<Pending<'v>>,
    children: IndexMap<&'v str, (&'v Value, JsonPath)>,
    parent: Option<usize>,
    depth: usize,
) {
    // Reversed so the first child is decoded first.
    for (name, (value, path)) in children.into_iter().rev() {
        pending.push(Pending {
            name: name.to_string(),
            value,
            path,
            parent,
            depth,
        });
    }
}

/// Decodes one object level into a childless node plus its undecoded children.
#[allow(clippy::type_complexity)]
fn decode_level<'v, U: TaggedUnion>(
    value: &'v Value,
    path: &JsonPath,
    depth: usize,
    max_depth: Option<usize>,
) -> Result<(Node<U>, IndexMap<&'v str, (&'v Value, JsonPath)>), DecodeError> {
    if let Some(limit) = max_depth.filter(|limit| depth > *limit) {
        return Err(DecodeError::new(
            path.clone(),
            DecodeErrorKind::DepthLimitExceeded { limit },
        ));
    }

    let Level {
        discriminant,
        children,
        meta,
        unknown,
    } = partition::<U>(value, path)?;

    let (wire, body) = discriminant.ok_or_else(|| {
        DecodeError::new(
            path.clone(),
            DecodeErrorKind::MissingDiscriminant { family: U::FAMILY },
        )
    })?;
    let payload = U::dispatch_table().decode(wire, body, &path.key(wire))?;

    let node = Node {
        payload,
        children: Children::default(),
        meta,
        unknown,
    };
    Ok((node, children))
}

fn partition<'v, U: TaggedUnion>(value: &'v Value, path: &JsonPath) -> Result<Level<'v>, DecodeError> {
    let table = U::dispatch_table();
    let mut level = Level {
        discriminant: None,
        children: IndexMap::new(),
        meta: IndexMap::new(),
        unknown: IndexMap::new(),
    };

    for (key, member) in expect_object(value, path)? {
        let member_path = path.key(key);
        match key.as_str() {
            AGGREGATIONS_KEY | AGGS_ALIAS => {
                // Both spellings merge into one map. A repeated name keeps its first position and
                // its last value.
                for (name, child) in expect_object(member, &member_path)? {
                    let child_path = member_path.key(name);
                    level.children.insert(name.as_str(), (child, child_path));
                }
            }
            META_KEY => {
                level.meta = expect_object(member, &member_path)?
                    .iter()
                    .map(|(name, entry)| (name.clone(), JsonData::from(entry.clone())))
                    .collect();
            }
            wire if table.contains(wire) => {
                if let Some((first, _)) = level.discriminant {
                    return Err(DecodeError::new(
                        path.clone(),
                        DecodeErrorKind::MultipleDiscriminants {
                            family: U::FAMILY,
                            first: first.to_string(),
                            second: wire.to_string(),
                        },
                    ));
                }
                level.discriminant = Some((wire, member));
            }
            other => match U::UNKNOWN_FIELDS {
                UnknownFieldPolicy::Capture => {
                    tracing::trace!(family = U::FAMILY, key = other, "captured unknown key");
                    level
                        .unknown
                        .insert(other.to_string(), JsonData::from(member.clone()));
                }
                UnknownFieldPolicy::Reject => {
                    return Err(DecodeError::new(
                        member_path,
                        DecodeErrorKind::UnknownDiscriminant {
                            family: U::FAMILY,
                            wire: other.to_string(),
                        },
                    ));
                }
            },
        }
    }

    Ok(level)
}
