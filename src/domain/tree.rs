//! Menu tree model: nodes, forests and pure traversal.
//!
//! The forest is supplied fully materialized and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a menu node.
///
/// The menu endpoint delivers numeric ids, fixtures often use strings.
/// Both decode to the same textual identifier, so `7` and `"7"` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct NodeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

impl From<RawId> for NodeId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => NodeId(n.to_string()),
            RawId::Str(s) => NodeId(s),
        }
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A menu entry with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Display label (`menu_label_name` on the wire)
    #[serde(rename = "menu_label_name", alias = "label", default)]
    pub label: String,
    /// Ordered children; `null` and a missing field both mean none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<Node>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Node>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Node {
    /// Create a node without children.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order iteration over this node and all of its descendants.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![self],
        }
    }
}

/// Ids of `node` and every descendant, in pre-order.
///
/// The node's own id comes first, followed by each child's full descendant
/// list, children visited in their given order.
pub fn descendant_ids(node: &Node) -> Vec<NodeId> {
    node.iter().map(|n| n.id.clone()).collect()
}

/// Ordered sequence of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Node>,
}

impl Forest {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes across all roots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order iteration over every node, roots in order.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// First node in pre-order carrying `id`.
    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.iter().find(|n| &n.id == id)
    }
}

impl From<Vec<Node>> for Forest {
    fn from(roots: Vec<Node>) -> Self {
        Self::new(roots)
    }
}

/// Depth-first pre-order iterator, stack based so deep menus cannot overflow.
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new("a", "A").with_children(vec![
            Node::new("b", "B").with_children(vec![Node::new("d", "D"), Node::new("e", "E")]),
            Node::new("c", "C"),
        ])
    }

    fn ids(v: &[NodeId]) -> Vec<&str> {
        v.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn given_nested_node_when_descendant_ids_then_returns_preorder() {
        assert_eq!(ids(&descendant_ids(&sample())), ["a", "b", "d", "e", "c"]);
    }

    #[test]
    fn given_leaf_when_descendant_ids_then_returns_only_itself() {
        let leaf = Node::new("x", "X");
        assert_eq!(ids(&descendant_ids(&leaf)), ["x"]);
        assert!(leaf.is_leaf());
    }

    #[test]
    fn given_forest_when_iterating_then_visits_roots_in_order() {
        let forest = Forest::new(vec![sample(), Node::new("z", "Z")]);
        let visited: Vec<_> = forest.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(visited, ["a", "b", "d", "e", "c", "z"]);
        assert_eq!(forest.len(), 6);
    }

    #[test]
    fn given_forest_when_find_then_returns_nested_node() {
        let forest = Forest::new(vec![sample()]);
        let found = forest.find(&NodeId::from("e")).expect("e is in the forest");
        assert_eq!(found.label, "E");
        assert!(forest.find(&NodeId::from("missing")).is_none());
    }

    #[test]
    fn given_numeric_and_string_ids_when_decoding_then_ids_are_equal() {
        let numeric: Node = serde_json::from_str(r#"{"id": 7, "menu_label_name": "Seven"}"#).unwrap();
        let text: Node = serde_json::from_str(r#"{"id": "7", "label": "Seven"}"#).unwrap();
        assert_eq!(numeric.id, text.id);
        assert_eq!(numeric.label, text.label);
    }

    #[test]
    fn given_null_children_when_decoding_then_node_is_leaf() {
        let node: Node =
            serde_json::from_str(r#"{"id": 1, "menu_label_name": "One", "children": null}"#).unwrap();
        assert!(node.is_leaf());
    }

    #[test]
    fn given_node_when_serializing_then_uses_wire_names() {
        let json = serde_json::to_value(Node::new(3_i64, "Three")).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["menu_label_name"], "Three");
    }
}
