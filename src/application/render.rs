//! Checkbox tree rendering.
//!
//! Draws each root as an indented tree; every line carries a checkbox marker
//! derived only from selection membership. There is no partial state.

use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::domain::{Forest, Node, Selection};

/// Checkbox markers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Markers {
    pub checked: String,
    pub unchecked: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            checked: "[x]".into(),
            unchecked: "[ ]".into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub markers: Markers,
    /// Append `(id)` to every label
    pub show_ids: bool,
    /// Heading printed above the tree
    pub title: Option<String>,
}

pub trait CheckboxTreeConvert {
    fn to_checkbox_tree(&self, selection: &Selection, opts: &RenderOptions) -> Tree<String>;
}

impl CheckboxTreeConvert for Node {
    fn to_checkbox_tree(&self, selection: &Selection, opts: &RenderOptions) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_checkbox_tree(selection, opts))
            .collect();
        Tree::new(checkbox_line(self, selection, opts)).with_leaves(leaves)
    }
}

fn checkbox_line(node: &Node, selection: &Selection, opts: &RenderOptions) -> String {
    let marker = if selection.is_checked(&node.id) {
        &opts.markers.checked
    } else {
        &opts.markers.unchecked
    };
    if opts.show_ids {
        format!("{} {} ({})", marker, node.label, node.id)
    } else {
        format!("{} {}", marker, node.label)
    }
}

/// Render the whole forest, roots in order.
pub fn render_forest(forest: &Forest, selection: &Selection, opts: &RenderOptions) -> String {
    let mut out = String::new();
    if let Some(title) = &opts.title {
        out.push_str(title);
        out.push('\n');
    }
    if forest.is_empty() {
        out.push_str("(empty menu)\n");
        return out;
    }
    for root in forest.roots() {
        // termtree's Display ends every line with a newline
        out.push_str(&root.to_checkbox_tree(selection, opts).to_string());
    }
    out
}
