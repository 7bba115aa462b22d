//! Properties of the selection engine over whole menus

use checktree::domain::{descendant_ids, Forest, MenuArena, Node, NodeId, Selection, Toggled};
use checktree::util::testing;
use rstest::{fixture, rstest};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

/// ```text
/// 1
/// ├── 2
/// └── 3
///     ├── 4
///     └── 5
/// 6
/// ├── 7
/// └── 8
/// 9
/// ```
#[fixture]
fn menu() -> Forest {
    Forest::new(vec![
        Node::new("1", "Dashboard").with_children(vec![
            Node::new("2", "Overview"),
            Node::new("3", "Reports").with_children(vec![Node::new("4", "Daily"), Node::new("5", "Monthly")]),
        ]),
        Node::new("6", "Settings").with_children(vec![Node::new("7", "Users"), Node::new("8", "Roles")]),
        Node::new("9", "Help"),
    ])
}

// ============================================================
// toggle_subtree
// ============================================================

#[rstest]
#[case("1")]
#[case("3")]
#[case("5")]
#[case("6")]
#[case("9")]
fn given_unchecked_menu_when_toggle_subtree_then_exactly_subtree_checked(
    menu: Forest,
    #[case] target: &str,
) {
    let node = menu.find(&id(target)).unwrap();
    let subtree = descendant_ids(node);
    let mut selection = Selection::new();

    assert_eq!(selection.toggle_subtree(node), Toggled::Checked);

    for n in menu.iter() {
        assert_eq!(
            selection.is_checked(&n.id),
            subtree.contains(&n.id),
            "node {} checked state",
            n.id
        );
    }
}

#[rstest]
#[case("1")]
#[case("3")]
#[case("9")]
fn given_any_selection_when_toggle_subtree_twice_then_selection_restored(
    menu: Forest,
    #[case] target: &str,
) {
    let mut selection = Selection::new();
    // unrelated prior state
    selection.toggle_subtree(menu.find(&id("6")).unwrap());
    let before = selection.clone();

    let node = menu.find(&id(target)).unwrap();
    selection.toggle_subtree(node);
    selection.toggle_subtree(node);

    assert_eq!(selection, before);
}

// ============================================================
// toggle_child
// ============================================================

#[rstest]
fn given_leaf_with_unchecked_siblings_when_toggled_on_and_off_then_parent_absent(menu: Forest) {
    let index = MenuArena::build(&menu).unwrap();
    let leaf = id("4");
    let parent = index.parent_of(&leaf).map(|p| &p.id);
    let siblings = index.siblings_of(&leaf).unwrap();
    let mut selection = Selection::new();

    selection.toggle_child(&leaf, parent, siblings);
    let outcome = selection.toggle_child(&leaf, parent, siblings);

    assert_eq!(outcome.state, Toggled::Unchecked);
    assert!(!selection.is_checked(&leaf));
    assert!(!selection.is_checked(&id("3")));
    assert!(selection.is_empty());
}

#[rstest]
fn given_all_other_siblings_checked_when_last_child_checked_then_parent_still_unchecked(menu: Forest) {
    let index = MenuArena::build(&menu).unwrap();
    let parent = id("6");
    let siblings = index.siblings_of(&id("7")).unwrap();
    let mut selection = Selection::new();

    selection.toggle_child(&id("7"), Some(&parent), siblings);
    let outcome = selection.toggle_child(&id("8"), Some(&parent), siblings);

    assert_eq!(outcome.state, Toggled::Checked);
    assert!(!outcome.parent_cleared);
    assert!(!selection.is_checked(&parent));
}

#[rstest]
fn given_checked_grandparent_when_last_grandchild_unchecked_then_only_parent_cleared(menu: Forest) {
    let index = MenuArena::build(&menu).unwrap();
    let mut selection = Selection::new();
    selection.toggle_subtree(menu.find(&id("1")).unwrap());

    let siblings = index.siblings_of(&id("4")).unwrap();
    selection.toggle_child(&id("4"), Some(&id("3")), siblings);
    let outcome = selection.toggle_child(&id("5"), Some(&id("3")), siblings);

    assert!(outcome.parent_cleared);
    assert!(!selection.is_checked(&id("3")));
    // one level only: the grandparent stays checked
    assert!(selection.is_checked(&id("1")));
    assert!(selection.is_checked(&id("2")));
}

#[test]
fn given_parent_with_two_children_when_scenario_runs_then_matches_expected_sets() {
    let a = Node::new("A", "A").with_children(vec![Node::new("B", "B"), Node::new("C", "C")]);
    let mut selection = Selection::new();

    selection.toggle_subtree(&a);
    assert_eq!(selection.sorted_ids(), vec![id("A"), id("B"), id("C")]);

    selection.toggle_child(&id("B"), Some(&id("A")), &a.children);
    assert_eq!(selection.sorted_ids(), vec![id("A"), id("C")]);

    selection.toggle_child(&id("C"), Some(&id("A")), &a.children);
    assert!(selection.sorted_ids().is_empty());
}

// ============================================================
// descendant_ids
// ============================================================

#[rstest]
fn given_every_node_when_descendant_ids_then_contains_self_once_and_all_reachable(menu: Forest) {
    for node in menu.iter() {
        let ids = descendant_ids(node);
        assert_eq!(ids[0], node.id);
        assert_eq!(ids.iter().filter(|i| **i == node.id).count(), 1);
        assert_eq!(ids.len(), node.iter().count());
    }
}

#[test]
fn given_deep_chain_when_descendant_ids_then_no_stack_overflow() {
    let mut node = Node::new("leaf", "leaf");
    for depth in 0..10_000_i64 {
        node = Node::new(depth, "level").with_children(vec![node]);
    }
    let ids = descendant_ids(&node);
    assert_eq!(ids.len(), 10_001);
    assert_eq!(ids.last(), Some(&id("leaf")));
    // recursive Drop of a deep tree would overflow the test thread stack
    std::mem::forget(node);
}

#[test]
fn given_empty_forest_when_querying_then_nothing_checked() {
    let forest = Forest::default();
    let selection = Selection::new();
    assert!(!selection.is_checked(&id("anything")));
    assert!(selection.checked_in(&forest).is_empty());
}
