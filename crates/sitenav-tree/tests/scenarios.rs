//! End-to-end resolution scenarios and properties over generated trees.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::Index;
use proptest::test_runner::Config;
use sitenav_tree::{
    ContentRegistry, ErrorKind, Leaf, NavNode, Policy, ResolvedSite, SidebarSource, resolve,
    resolve_source,
};

fn number_paths(node: &mut NavNode, counter: &mut usize) {
    match node {
        NavNode::Leaf(leaf) => {
            *counter += 1;
            leaf.path = format!("/p/{counter}");
        }
        NavNode::Group(group) => {
            for child in &mut group.children {
                number_paths(child, counter);
            }
        }
    }
}

/// Non-empty groups up to three levels deep; paths are filled in afterwards.
fn nav_node() -> impl Strategy<Value = NavNode> {
    let leaf = "[A-Z][a-z]{0,8}".prop_map(|label| NavNode::leaf(label, String::new()));
    leaf.prop_recursive(3, 48, 4, |inner| {
        ("[A-Z][a-z]{0,8}", prop::collection::vec(inner, 1..4))
            .prop_map(|(label, children)| NavNode::group(label, children))
    })
}

prop_compose! {
    /// A well-formed forest whose leaves carry distinct paths.
    fn nav_forest()(nodes in prop::collection::vec(nav_node(), 1..6)) -> Vec<NavNode> {
        let mut forest = nodes;
        let mut counter = 0;
        for node in &mut forest {
            number_paths(node, &mut counter);
        }
        forest
    }
}

fn preorder_leaves(forest: &[NavNode]) -> Vec<Leaf> {
    fn walk(node: &NavNode, out: &mut Vec<Leaf>) {
        match node {
            NavNode::Leaf(leaf) => out.push(leaf.clone()),
            NavNode::Group(group) => {
                for child in &group.children {
                    walk(child, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    for node in forest {
        walk(node, &mut out);
    }
    out
}

fn registry_for(forest: &[NavNode]) -> ContentRegistry {
    preorder_leaves(forest).into_iter().map(|leaf| leaf.path).collect()
}

fn sequence_leaves(site: &ResolvedSite) -> Vec<Leaf> {
    site.sequence().iter().map(|e| e.leaf.clone()).collect()
}

fn kinds(site: &ResolvedSite) -> Vec<ErrorKind> {
    site.errors().iter().map(|e| e.kind).collect()
}

#[test]
fn test_scenario_a_single_valid_leaf() {
    let tree = vec![NavNode::group(
        "Infra",
        vec![NavNode::leaf("Overview", "/infra/overview")],
    )];
    let registry: ContentRegistry = ["/infra/overview"].into_iter().collect();

    let site = resolve(&tree, &registry);

    assert!(site.errors().is_empty());
    assert_eq!(site.sequence().len(), 1);
    assert_eq!(site.sequence()[0].index, 0);
    assert_eq!(
        site.sequence()[0].leaf,
        Leaf {
            label: "Overview".to_owned(),
            path: "/infra/overview".to_owned(),
        }
    );
    assert!(site.passes(Policy::Strict));
}

#[test]
fn test_scenario_b_dangling_link() {
    let tree = vec![NavNode::group(
        "Infra",
        vec![
            NavNode::leaf("Overview", "/infra/overview"),
            NavNode::leaf("Setup", "/infra/setup"),
        ],
    )];
    let registry: ContentRegistry = ["/infra/overview"].into_iter().collect();

    let site = resolve(&tree, &registry);

    assert_eq!(kinds(&site), vec![ErrorKind::DanglingLink]);
    assert_eq!(site.errors()[0].subject, "/infra/setup");
    assert_eq!(site.sequence().len(), 2);
    assert!(!site.passes(Policy::Strict));
    assert!(site.passes(Policy::Lenient));
}

#[test]
fn test_scenario_c_empty_group() {
    let tree = vec![NavNode::group("Empty", Vec::new())];

    let site = resolve(&tree, &ContentRegistry::new());

    assert_eq!(kinds(&site), vec![ErrorKind::EmptyGroup]);
    assert_eq!(site.errors()[0].subject, "Empty");
    assert_eq!(site.forest(), &[NavNode::group("Empty", Vec::new())]);
    assert!(site.sequence().is_empty());
}

#[test]
fn test_scenario_d_duplicate_path() {
    let tree = vec![
        NavNode::leaf("About", "/about"),
        NavNode::group("More", vec![NavNode::leaf("About the CTF", "/about")]),
    ];
    let registry: ContentRegistry = ["/about"].into_iter().collect();

    let site = resolve(&tree, &registry);

    assert_eq!(kinds(&site), vec![ErrorKind::DuplicatePath]);
    assert_eq!(site.sequence().len(), 2);
    assert_eq!(site.sequence()[1].leaf.label, "About the CTF");
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn test_valid_generated_trees_have_no_errors(forest in nav_forest()) {
        let registry = registry_for(&forest);

        let site = resolve(&forest, &registry);

        prop_assert!(site.is_clean(), "{:?}", site.errors());
    }

    #[test]
    fn test_sequence_matches_preorder_for_generated_trees(forest in nav_forest()) {
        let leaf_count: usize = forest.iter().map(NavNode::leaf_count).sum();

        // Resolve against an empty registry: errors must not change the sequence.
        let site = resolve(&forest, &ContentRegistry::new());

        prop_assert_eq!(site.sequence().len(), leaf_count);
        prop_assert_eq!(sequence_leaves(&site), preorder_leaves(&forest));
        prop_assert!(site.sequence().iter().enumerate().all(|(i, e)| e.index == i));
    }

    #[test]
    fn test_resolution_is_idempotent(forest in nav_forest(), dropped in any::<Index>()) {
        // Drop one document so the error list is non-trivial.
        let paths: Vec<String> = registry_for(&forest).iter().map(str::to_owned).collect();
        let skip = dropped.index(paths.len());
        let registry: ContentRegistry = paths
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, path)| path.clone())
            .collect();

        let first = resolve(&forest, &registry);
        let second = resolve(&forest, &registry);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_one_duplicate_reported_for_second_occurrence(forest in nav_forest(), repeated in any::<Index>()) {
        let leaves = preorder_leaves(&forest);
        let position = repeated.index(leaves.len());
        let original = leaves[position].path.clone();
        let mut forest = forest;
        forest.push(NavNode::leaf("Again", original.to_uppercase() + "/"));
        let registry = registry_for(&forest);

        let site = resolve(&forest, &registry);

        let duplicates = site
            .errors()
            .iter()
            .filter(|e| e.kind == ErrorKind::DuplicatePath)
            .count();
        prop_assert_eq!(duplicates, 1);
        prop_assert_eq!(site.position(&original), Some(position));
    }
}

#[test]
fn test_self_referencing_fragment_terminates_with_one_cycle() {
    let yaml = r"
items:
  - label: Challenges
    children:
      - include: challenges
  - label: About
    path: /about
fragments:
  challenges:
    - label: Web
      path: /challenges/web
    - label: More
      children:
        - include: challenges
";
    let source: SidebarSource = serde_yaml::from_str(yaml).unwrap();
    let registry: ContentRegistry = ["/challenges/web", "/about"].into_iter().collect();

    let site = resolve_source(&source, &registry);

    assert_eq!(kinds(&site), vec![ErrorKind::CycleDetected]);
    assert_eq!(site.sequence().len(), 2);
    assert_eq!(site.sequence()[1].leaf.path, "/about");
}

#[test]
fn test_authored_source_matches_typed_forest() {
    let yaml = r"
items:
  - label: Infra
    children:
      - label: Overview
        path: /infra/overview
      - label: Setup
        path: /infra/setup
";
    let source: SidebarSource = serde_yaml::from_str(yaml).unwrap();
    let typed = vec![NavNode::group(
        "Infra",
        vec![
            NavNode::leaf("Overview", "/infra/overview"),
            NavNode::leaf("Setup", "/infra/setup"),
        ],
    )];
    let registry: ContentRegistry = ["/infra/overview", "/infra/setup"].into_iter().collect();

    assert_eq!(
        resolve_source(&source, &registry),
        resolve(&typed, &registry)
    );
}
