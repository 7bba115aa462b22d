use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::tree::{Forest, Node, NodeId};

/// Arena slot pointing back into the borrowed forest.
#[derive(Debug)]
pub struct ArenaNode<'a> {
    /// Menu node this slot indexes
    pub node: &'a Node,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
}

/// Arena-based index over a menu forest.
///
/// Answers the structural questions the presentation layer needs before it
/// can call into the selection engine: who is the parent of a node and which
/// nodes are its siblings. The forest itself is only borrowed.
#[derive(Debug)]
pub struct MenuArena<'a> {
    forest: &'a Forest,
    arena: Arena<ArenaNode<'a>>,
    by_id: HashMap<&'a NodeId, Index>,
}

impl<'a> MenuArena<'a> {
    /// Index every node of `forest`.
    ///
    /// Fails on duplicate ids because lookups by id would be ambiguous.
    #[instrument(level = "debug", skip(forest))]
    pub fn build(forest: &'a Forest) -> Result<Self, DomainError> {
        let mut index = Self {
            forest,
            arena: Arena::new(),
            by_id: HashMap::new(),
        };

        let mut stack: Vec<(&'a Node, Option<Index>)> =
            forest.roots().iter().rev().map(|n| (n, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            let idx = index.insert_node(node, parent)?;
            for child in node.children.iter().rev() {
                stack.push((child, Some(idx)));
            }
        }
        Ok(index)
    }

    fn insert_node(&mut self, node: &'a Node, parent: Option<Index>) -> Result<Index, DomainError> {
        if self.by_id.contains_key(&node.id) {
            return Err(DomainError::DuplicateId(node.id.clone()));
        }
        let idx = self.arena.insert(ArenaNode { node, parent });
        self.by_id.insert(&node.id, idx);
        Ok(idx)
    }

    pub fn forest(&self) -> &'a Forest {
        self.forest
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    fn slot(&self, id: &NodeId) -> Option<&ArenaNode<'a>> {
        self.by_id.get(id).and_then(|&idx| self.arena.get(idx))
    }

    /// Menu node carrying `id`.
    pub fn get(&self, id: &NodeId) -> Option<&'a Node> {
        self.slot(id).map(|slot| slot.node)
    }

    /// Parent of `id`; None for roots and unknown ids.
    pub fn parent_of(&self, id: &NodeId) -> Option<&'a Node> {
        let slot = self.slot(id)?;
        self.arena.get(slot.parent?).map(|p| p.node)
    }

    /// Nodes sharing the parent of `id`, `id` included.
    ///
    /// For a root these are the forest roots. None for unknown ids.
    pub fn siblings_of(&self, id: &NodeId) -> Option<&'a [Node]> {
        let slot = self.slot(id)?;
        match slot.parent.and_then(|p| self.arena.get(p)) {
            Some(parent) => Some(parent.node.children.as_slice()),
            None => Some(self.forest.roots()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_menu_when_built_then_parent_links_follow_nesting() {
        let forest = Forest::new(vec![Node::new("a", "A").with_children(vec![
            Node::new("b", "B").with_children(vec![Node::new("c", "C")]),
        ])]);
        let index = MenuArena::build(&forest).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.parent_of(&NodeId::from("c")).map(|n| n.id.as_str()), Some("b"));
        assert_eq!(index.parent_of(&NodeId::from("b")).map(|n| n.id.as_str()), Some("a"));
        assert!(index.parent_of(&NodeId::from("a")).is_none());
    }
}
