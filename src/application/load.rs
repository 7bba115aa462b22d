//! Display states around menu retrieval.

use std::fmt;

use crate::domain::Forest;

/// What the menu screen shows while and after the menu is fetched.
///
/// Only a `Loaded` menu ever reaches the selection engine. `E` is the fetch
/// error, kept whole so callers can still classify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<E = String> {
    Loading,
    Failed(E),
    Loaded(Forest),
}

impl<E> LoadState<E> {
    pub fn from_result(result: Result<Forest, E>) -> Self {
        match result {
            Ok(forest) => LoadState::Loaded(forest),
            Err(e) => LoadState::Failed(e),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

/// Placeholder text; a loaded menu is drawn by the renderer instead.
impl<E: fmt::Display> fmt::Display for LoadState<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Loading => write!(f, "Loading..."),
            LoadState::Failed(e) => write!(f, "Error: {}", e),
            LoadState::Loaded(forest) => write!(f, "Loaded {} menu entries", forest.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    #[test]
    fn given_failed_fetch_when_building_state_then_shows_error_text() {
        let state = LoadState::<&str>::from_result(Err("network response was not ok"));
        assert_eq!(state.to_string(), "Error: network response was not ok");
        assert!(state.is_failed());
    }

    #[test]
    fn given_loading_state_when_displayed_then_shows_placeholder() {
        let state: LoadState = LoadState::Loading;
        assert_eq!(state.to_string(), "Loading...");
        assert!(!state.is_failed());
    }

    #[test]
    fn given_forest_when_building_state_then_counts_entries() {
        let forest = Forest::new(vec![Node::new("a", "A").with_children(vec![Node::new("b", "B")])]);
        let state = LoadState::<String>::from_result(Ok(forest.clone()));
        assert_eq!(state, LoadState::Loaded(forest));
        assert_eq!(state.to_string(), "Loaded 2 menu entries");
    }
}
