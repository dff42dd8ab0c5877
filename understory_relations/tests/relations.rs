// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for view filtering and edge normalization in `understory_relations`.

use understory_relations::{Item, ItemId, ItemKind, ViewMode, build_base_nodes};

fn ids(edges: &[ItemId]) -> Vec<&str> {
    edges.iter().map(ItemId::as_str).collect()
}

fn mixed_collection() -> Vec<Item> {
    vec![
        Item::new("landing", ItemKind::Frame).with_next(["signup", "button"]),
        Item::new("signup", ItemKind::Frame).with_next(["landing"]),
        Item::new("button", ItemKind::Component).with_next(["icon"]),
        Item::new("icon", ItemKind::Component),
        Item::new("flows", ItemKind::Group).with_children(["landing", "signup", "button"]),
    ]
}

#[test]
fn pages_view_drops_component_edges() {
    let graph = build_base_nodes(&mixed_collection(), ViewMode::Pages);

    assert_eq!(graph.len(), 3);
    assert!(graph.contains("landing"));
    assert!(graph.contains("flows"));
    assert!(!graph.contains("button"));

    assert_eq!(ids(&graph.get("landing").unwrap().next), ["signup"]);
    assert_eq!(ids(&graph.get("flows").unwrap().children), ["landing", "signup"]);
}

#[test]
fn components_view_keeps_groups() {
    let graph = build_base_nodes(&mixed_collection(), ViewMode::Components);

    let order: Vec<&str> = graph.ids().map(ItemId::as_str).collect();
    assert_eq!(order, ["button", "icon", "flows"]);
    assert_eq!(ids(&graph.get("button").unwrap().next), ["icon"]);
    assert_eq!(ids(&graph.get("flows").unwrap().children), ["button"]);
}

#[test]
fn all_view_is_unfiltered() {
    let graph = build_base_nodes(&mixed_collection(), ViewMode::All);
    assert_eq!(graph.len(), 5);
    assert_eq!(ids(&graph.get("landing").unwrap().next), ["signup", "button"]);
}

#[test]
fn duplicate_successors_and_cycles_are_kept() {
    let items = [
        Item::new("a", ItemKind::Frame).with_next(["b", "b"]),
        Item::new("b", ItemKind::Frame).with_next(["a"]),
        Item::new("c", ItemKind::Frame).with_children(["c"]),
    ];
    let graph = build_base_nodes(&items, ViewMode::Pages);

    assert_eq!(ids(&graph.get("a").unwrap().next), ["b", "b"]);
    assert_eq!(ids(&graph.get("b").unwrap().next), ["a"]);
    assert_eq!(ids(&graph.get("c").unwrap().children), ["c"]);
}

#[test]
fn malformed_and_unknown_edges_are_filtered() {
    let items = [
        Item::new("a", ItemKind::Frame).with_next(["", "ghost", "  ", "b"]),
        Item::new("b", ItemKind::Frame).with_children(["\t", "a"]),
        Item::new("", ItemKind::Frame),
    ];
    let graph = build_base_nodes(&items, ViewMode::All);

    assert_eq!(graph.len(), 2);
    assert_eq!(ids(&graph.get("a").unwrap().next), ["b"]);
    assert_eq!(ids(&graph.get("b").unwrap().children), ["a"]);
}

#[test]
fn every_edge_resolves_within_the_graph() {
    let items = mixed_collection();
    for mode in [ViewMode::Pages, ViewMode::Components, ViewMode::All] {
        let graph = build_base_nodes(&items, mode);
        for node in &graph {
            for target in node.next.iter().chain(&node.children) {
                assert!(
                    graph.contains(target.as_str()),
                    "{mode}: {} -> {target} escapes the view",
                    node.id
                );
            }
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn items_deserialize_from_index_json() {
    let json = r#"[
        {"id": "home", "kind": "frame", "next": ["about"], "tags": ["entry"]},
        {"id": "about", "kind": "frame", "title": "About us"},
        {"id": "nav", "kind": "group", "children": ["home", "about"]}
    ]"#;
    let items: Vec<Item> = serde_json::from_str(json).unwrap();

    assert_eq!(items[0].tags, ["entry"]);
    assert_eq!(items[1].display_name(), "About us");

    let graph = build_base_nodes(&items, ViewMode::Pages);
    assert_eq!(ids(&graph.get("nav").unwrap().children), ["home", "about"]);
}
