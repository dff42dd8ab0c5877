// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized, view-filtered relationship graph.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::id::ItemId;
use crate::item::{Item, ItemKind};
use crate::view_mode::ViewMode;

/// An [`Item`] normalized for one view.
///
/// `next` and `children` keep their input order (duplicates included) but only
/// reference ids that are present in the same [`BaseGraph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseNode {
    /// Stable identifier.
    pub id: ItemId,
    /// Artifact kind.
    pub kind: ItemKind,
    /// Sequencing successors within the view.
    pub next: Vec<ItemId>,
    /// Nested children within the view.
    pub children: Vec<ItemId>,
}

/// A directed graph of [`BaseNode`]s restricted to one [`ViewMode`].
///
/// Nodes are stored in input order and addressed by id. Iteration order is
/// stable, which keeps everything computed from the graph deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseGraph {
    nodes: Vec<BaseNode>,
    index: HashMap<ItemId, usize>,
}

impl BaseGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` is part of the graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the node for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BaseNode> {
        self.index.get(id).map(|&ix| &self.nodes[ix])
    }

    /// Returns the input-order position of `id`, if present.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Iterates nodes in input order.
    pub fn iter(&self) -> impl Iterator<Item = &BaseNode> + '_ {
        self.nodes.iter()
    }

    /// Iterates node ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Inserts a node, keeping the first occurrence of a repeated id.
    ///
    /// Edges are stored as given; use [`build_base_nodes`] to get edges that
    /// are guaranteed to resolve within the graph.
    ///
    /// Returns `false` if a node with the same id was already present.
    pub fn insert(&mut self, node: BaseNode) -> bool {
        if self.index.contains_key(node.id.as_str()) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }
}

impl<'a> IntoIterator for &'a BaseGraph {
    type Item = &'a BaseNode;
    type IntoIter = core::slice::Iter<'a, BaseNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Builds the normalized graph of `items` for `view_mode`.
///
/// The first pass keeps the items whose kind belongs to the view (the first
/// occurrence wins if an id repeats). The second pass re-derives `next` and
/// `children` from each kept item's raw edges, dropping blank entries and any
/// target outside the kept set.
///
/// This never fails: unresolved and malformed references are expected input.
#[must_use]
pub fn build_base_nodes(items: &[Item], view_mode: ViewMode) -> BaseGraph {
    let mut graph = BaseGraph::new();
    for item in items.iter().filter(|item| view_mode.includes(item.kind)) {
        if item.id.is_blank() {
            log::debug!("skipping item with blank id");
            continue;
        }
        graph.insert(BaseNode {
            id: item.id.clone(),
            kind: item.kind,
            next: Vec::new(),
            children: Vec::new(),
        });
    }

    let mut dropped = 0_usize;
    let mut resolve = |edges: &[ItemId], index: &HashMap<ItemId, usize>| -> Vec<ItemId> {
        edges
            .iter()
            .filter(|target| {
                let keep = !target.is_blank() && index.contains_key(target.as_str());
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .cloned()
            .collect()
    };

    let mut resolved = vec![false; graph.nodes.len()];
    for item in items {
        let Some(&ix) = graph.index.get(item.id.as_str()) else {
            continue;
        };
        // A repeated id only contributes the edges of its first occurrence.
        if resolved[ix] || graph.nodes[ix].kind != item.kind {
            continue;
        }
        resolved[ix] = true;
        let next = resolve(&item.next, &graph.index);
        let children = resolve(&item.children, &graph.index);
        let node = &mut graph.nodes[ix];
        node.next = next;
        node.children = children;
    }

    if dropped > 0 {
        log::debug!(
            "{view_mode} view: dropped {dropped} edges outside the view or malformed"
        );
    }
    graph
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::build_base_nodes;
    use crate::{Item, ItemId, ItemKind, ViewMode};

    #[test]
    fn empty_input_yields_empty_graph() {
        let graph = build_base_nodes(&[], ViewMode::All);
        assert!(graph.is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let items = [
            Item::new("c", ItemKind::Frame),
            Item::new("a", ItemKind::Frame),
            Item::new("b", ItemKind::Frame),
        ];
        let graph = build_base_nodes(&items, ViewMode::Pages);
        let ids: Vec<&str> = graph.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert_eq!(graph.position("b"), Some(2));
    }

    #[test]
    fn first_occurrence_of_repeated_id_wins() {
        let items = [
            Item::new("a", ItemKind::Frame).with_next(["b"]),
            Item::new("b", ItemKind::Frame),
            Item::new("a", ItemKind::Frame).with_next(["c"]),
            Item::new("c", ItemKind::Frame),
        ];
        let graph = build_base_nodes(&items, ViewMode::Pages);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get("a").unwrap().next, [ItemId::new("b")]);
    }
}
