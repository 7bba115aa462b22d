//! Selection engine: the set of checked menu nodes and its two transitions.
//!
//! There are exactly two ways to change the selection and they are
//! deliberately not symmetric:
//!
//! - [`Selection::toggle_subtree`] cascades *down*: checking a node checks its
//!   whole subtree, unchecking it unchecks the whole subtree.
//! - [`Selection::toggle_child`] flips one node only and cascades *up* by at
//!   most one level, and only on uncheck: when no sibling remains checked the
//!   parent is unchecked too. Checking the last sibling never checks the parent.
//!
//! This asymmetry is intentional. It is surprising, so do not "fix" it into a
//! single recursive rule.

use std::collections::HashSet;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::tree::{descendant_ids, Forest, Node, NodeId};

/// Resulting checkbox state of the toggled node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Checked,
    Unchecked,
}

/// Outcome of [`Selection::toggle_child`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildToggle {
    pub state: Toggled,
    /// The parent was unchecked because no sibling remained checked
    pub parent_cleared: bool,
}

/// Set of checked node ids.
///
/// Starts empty and lives as long as the tree is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the checkbox of `id` is checked.
    pub fn is_checked(&self, id: &NodeId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Checked ids in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.selected.iter()
    }

    /// Checked ids sorted, for stable output.
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        self.selected.iter().cloned().sorted().collect()
    }

    /// Checked ids in the pre-order of `forest`; ids not in the forest are skipped.
    pub fn checked_in(&self, forest: &Forest) -> Vec<NodeId> {
        forest
            .iter()
            .filter(|n| self.is_checked(&n.id))
            .map(|n| n.id.clone())
            .unique()
            .collect()
    }

    /// Toggle a node's own checkbox, cascading over its whole subtree.
    ///
    /// If `node` is checked, the node and all of its descendants are removed
    /// from the selection regardless of their individual state. Otherwise the
    /// node and all descendants are added.
    #[instrument(level = "debug", skip(self, node), fields(id = %node.id))]
    pub fn toggle_subtree(&mut self, node: &Node) -> Toggled {
        let subtree = descendant_ids(node);
        if self.selected.contains(&node.id) {
            for id in &subtree {
                self.selected.remove(id);
            }
            debug!("unchecked {} ids", subtree.len());
            Toggled::Unchecked
        } else {
            let count = subtree.len();
            self.selected.extend(subtree);
            debug!("checked {} ids", count);
            Toggled::Checked
        }
    }

    /// Toggle a single descendant checkbox within its parent's context.
    ///
    /// Only `child_id` is flipped; its own descendants are untouched. After an
    /// uncheck, `parent_id` is removed as well when every node in `siblings`
    /// is unchecked. This bubbles exactly one level and never on check.
    /// A `None` parent marks a root, which has nothing to bubble into.
    ///
    /// The arguments are trusted: passing a child that does not belong to
    /// `parent_id`, or siblings that do not match the tree, is not detected.
    #[instrument(level = "debug", skip(self, siblings), fields(sibling_count = siblings.len()))]
    pub fn toggle_child(
        &mut self,
        child_id: &NodeId,
        parent_id: Option<&NodeId>,
        siblings: &[Node],
    ) -> ChildToggle {
        if !self.selected.remove(child_id) {
            self.selected.insert(child_id.clone());
            return ChildToggle {
                state: Toggled::Checked,
                parent_cleared: false,
            };
        }

        let all_unchecked = siblings.iter().all(|s| !self.selected.contains(&s.id));
        let parent_cleared = match parent_id {
            Some(parent) if all_unchecked => self.selected.remove(parent),
            _ => false,
        };
        if parent_cleared {
            debug!("last sibling unchecked, cleared parent");
        }
        ChildToggle {
            state: Toggled::Unchecked,
            parent_cleared,
        }
    }
}
