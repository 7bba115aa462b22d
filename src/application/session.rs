//! Checkbox session: one menu forest bound to one selection.
//!
//! The presentation layer reports checkbox events by node id. The session
//! resolves the structural context the selection engine expects (the node
//! itself, its parent and its siblings) from the menu index.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ChildToggle, Forest, MenuArena, NodeId, Selection, Toggled};

/// A checkbox interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleEvent {
    /// The node's own checkbox: cascades over its subtree
    Subtree(NodeId),
    /// The node toggled as a child of its parent: bubbles one level on uncheck
    Child(NodeId),
}

impl ToggleEvent {
    pub fn id(&self) -> &NodeId {
        match self {
            ToggleEvent::Subtree(id) | ToggleEvent::Child(id) => id,
        }
    }
}

impl FromStr for ToggleEvent {
    type Err = ApplicationError;

    /// Parse `subtree:<id>` / `child:<id>`, or the short forms `s:<id>` / `c:<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApplicationError::InvalidEvent {
            input: s.to_string(),
        };
        let (kind, id) = s.trim().split_once(':').ok_or_else(invalid)?;
        let id = id.trim();
        if id.is_empty() {
            return Err(invalid());
        }
        match kind.trim() {
            "subtree" | "s" => Ok(ToggleEvent::Subtree(NodeId::from(id))),
            "child" | "c" => Ok(ToggleEvent::Child(NodeId::from(id))),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ToggleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleEvent::Subtree(id) => write!(f, "subtree:{}", id),
            ToggleEvent::Child(id) => write!(f, "child:{}", id),
        }
    }
}

/// What an applied event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Subtree(Toggled),
    Child(ChildToggle),
}

impl Applied {
    pub fn state(&self) -> Toggled {
        match self {
            Applied::Subtree(state) => *state,
            Applied::Child(outcome) => outcome.state,
        }
    }
}

/// Selection state for one displayed menu.
#[derive(Debug)]
pub struct CheckboxSession<'a> {
    index: MenuArena<'a>,
    selection: Selection,
}

impl<'a> CheckboxSession<'a> {
    /// Start a session over `forest` with nothing checked.
    pub fn new(forest: &'a Forest) -> ApplicationResult<Self> {
        let index = MenuArena::build(forest)?;
        debug!("session over {} nodes", index.len());
        Ok(Self {
            index,
            selection: Selection::new(),
        })
    }

    pub fn forest(&self) -> &'a Forest {
        self.index.forest()
    }

    pub fn index(&self) -> &MenuArena<'a> {
        &self.index
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_checked(&self, id: &NodeId) -> bool {
        self.selection.is_checked(id)
    }

    /// Checked ids in menu order.
    pub fn checked_ids(&self) -> Vec<NodeId> {
        self.selection.checked_in(self.forest())
    }

    /// Apply one event. Events naming an id that is not in the menu are ignored.
    #[instrument(level = "debug", skip(self, event), fields(event = %event))]
    pub fn apply(&mut self, event: &ToggleEvent) -> Option<Applied> {
        let applied = match event {
            ToggleEvent::Subtree(id) => self.toggle_subtree(id).map(Applied::Subtree),
            ToggleEvent::Child(id) => self.toggle_child(id).map(Applied::Child),
        };
        if applied.is_none() {
            warn!("ignoring event for unknown node: {}", event.id());
        }
        applied
    }

    /// Apply events in order; returns how many hit a known node.
    pub fn apply_all<'e>(&mut self, events: impl IntoIterator<Item = &'e ToggleEvent>) -> usize {
        events
            .into_iter()
            .filter_map(|event| self.apply(event))
            .count()
    }

    pub fn toggle_subtree(&mut self, id: &NodeId) -> Option<Toggled> {
        let node = self.index.get(id)?;
        Some(self.selection.toggle_subtree(node))
    }

    pub fn toggle_child(&mut self, id: &NodeId) -> Option<ChildToggle> {
        let siblings = self.index.siblings_of(id)?;
        let parent = self.index.parent_of(id).map(|p| &p.id);
        Some(self.selection.toggle_child(id, parent, siblings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;
    use rstest::rstest;

    #[rstest]
    #[case("subtree:7", ToggleEvent::Subtree(NodeId::from("7")))]
    #[case("s:7", ToggleEvent::Subtree(NodeId::from("7")))]
    #[case("child:abc", ToggleEvent::Child(NodeId::from("abc")))]
    #[case(" c : abc ", ToggleEvent::Child(NodeId::from("abc")))]
    fn given_event_text_when_parsing_then_returns_event(
        #[case] input: &str,
        #[case] expected: ToggleEvent,
    ) {
        assert_eq!(input.parse::<ToggleEvent>().unwrap(), expected);
    }

    #[rstest]
    #[case("7")]
    #[case("subtree:")]
    #[case("toggle:7")]
    fn given_malformed_text_when_parsing_then_fails(#[case] input: &str) {
        let err = input.parse::<ToggleEvent>().unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidEvent { .. }));
    }

    #[test]
    fn given_event_when_displayed_then_parses_back() {
        let event = ToggleEvent::Child(NodeId::from("12"));
        assert_eq!(event.to_string().parse::<ToggleEvent>().unwrap(), event);
    }

    #[test]
    fn given_root_child_toggle_when_applied_then_uses_roots_as_siblings() {
        let forest = Forest::new(vec![Node::new("a", "A"), Node::new("b", "B")]);
        let mut session = CheckboxSession::new(&forest).unwrap();
        let applied = session.apply(&ToggleEvent::Child(NodeId::from("a")));
        assert_eq!(applied.map(|a| a.state()), Some(Toggled::Checked));
        assert_eq!(session.checked_ids(), vec![NodeId::from("a")]);
    }
}
