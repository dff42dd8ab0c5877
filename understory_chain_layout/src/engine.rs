// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chain-and-grid layout pass.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use understory_relations::{BaseGraph, BaseNode, ItemId, ItemKind};

use crate::collapse::CollapseState;
use crate::options::{LayoutOptions, sanitize_size};
use crate::positions::{LayoutPositions, Teleport};

/// A run of ids linked by first-`next`-successor edges.
type Chain<'g> = SmallVec<[&'g ItemId; 8]>;

/// Computes canvas positions for every node of `graph`.
///
/// `measure` reports the size of an artifact; it is called exactly once per
/// canonically placed id. Negative or non-finite sizes are treated as zero.
///
/// The arrangement:
///
/// 1. Roots are the ids that are not a `next` target of any node.
/// 2. From each root, the first `next` successor is followed into a chain.
///    A chain stops at an id without successors, or when it reaches an id
///    already in the chain; that id is kept as the chain's last slot, where
///    it always becomes a teleport.
/// 3. Chains longer than one slot are laid out as rows, left to right, one row
///    per chain. Each canonically placed node has its `children` stacked
///    beneath it, and a row is as tall as its tallest column. Roots that are
///    the child of some node are left to that node.
/// 4. Isolated roots fill a wrapping grid below the chain rows.
/// 5. Ids that no root reaches are laid out last, as extra chain rows: first
///    the `next` successors of stacked children, then anything else (for
///    example a pure `next` cycle) in input order.
///
/// Every id is placed canonically at most once. Any further visit, whether
/// from fan-in, a `next` cycle or a `children` cycle, emits a [`Teleport`]
/// chip in its slot instead, and is not recursed into.
///
/// This never fails; an empty graph yields an empty [`LayoutPositions`]. The
/// result is a pure function of the inputs.
#[must_use]
pub fn compute_layout<F>(
    graph: &BaseGraph,
    measure: F,
    options: &LayoutOptions,
    collapse: &CollapseState,
) -> LayoutPositions
where
    F: FnMut(&ItemId, ItemKind) -> Size,
{
    if graph.is_empty() {
        return LayoutPositions::default();
    }
    let mut pass = LayoutPass {
        graph,
        measure,
        options: options.sanitized(),
        collapse,
        placed: HashSet::with_capacity(graph.len()),
        teleport_counts: HashMap::new(),
        hidden_candidates: HashMap::new(),
        pending: VecDeque::new(),
        row_y: 0.0,
        out: LayoutPositions::default(),
    };
    pass.run();
    pass.finish()
}

/// Follows first-`next` successors from `root`.
fn chain_from<'g>(graph: &'g BaseGraph, root: &'g ItemId) -> Chain<'g> {
    let mut chain = Chain::new();
    let mut seen: HashSet<&'g ItemId> = HashSet::new();
    chain.push(root);
    seen.insert(root);
    let mut current = root;
    while let Some(next) = graph.get(current.as_str()).and_then(|n| n.next.first()) {
        chain.push(next);
        if !seen.insert(next) {
            break;
        }
        current = next;
    }
    chain
}

struct LayoutPass<'g, F> {
    graph: &'g BaseGraph,
    measure: F,
    options: LayoutOptions,
    collapse: &'g CollapseState,
    /// Globally visited: ids with a canonical frame.
    placed: HashSet<&'g ItemId>,
    teleport_counts: HashMap<&'g ItemId, usize>,
    /// Ids skipped beneath a collapsed node, with that node.
    hidden_candidates: HashMap<&'g ItemId, &'g ItemId>,
    /// First `next` successors of canonically placed ids, in placement order.
    pending: VecDeque<&'g ItemId>,
    /// Top of the next row.
    row_y: f64,
    out: LayoutPositions,
}

impl<'g, F> LayoutPass<'g, F>
where
    F: FnMut(&ItemId, ItemKind) -> Size,
{
    fn run(&mut self) {
        let graph = self.graph;
        let next_targets: HashSet<&ItemId> = graph.iter().flat_map(|n| n.next.iter()).collect();
        let child_targets: HashSet<&ItemId> =
            graph.iter().flat_map(|n| n.children.iter()).collect();

        let (multi, single): (Vec<Chain<'g>>, Vec<Chain<'g>>) = graph
            .ids()
            .filter(|id| !next_targets.contains(id))
            .map(|root| chain_from(graph, root))
            .partition(|chain| chain.len() > 1);

        for chain in multi.iter().filter(|chain| !child_targets.contains(chain[0])) {
            self.layout_row(chain);
        }
        self.layout_grid(&single, &child_targets);
        self.layout_unreached(&child_targets);
    }

    /// Lays out the ids no root reached, as extra chain rows.
    ///
    /// The `next` successors of stacked children come first, in placement
    /// order. The remaining ids follow in input order: those that are nobody's
    /// child first, so that a parent reached this way still stacks its
    /// children, then whatever is left (`children` cycles with no way in).
    fn layout_unreached(&mut self, child_targets: &HashSet<&'g ItemId>) {
        let graph = self.graph;
        self.drain_pending();
        for id in graph.ids().filter(|id| !child_targets.contains(*id)) {
            self.layout_unreached_row(id);
        }
        for id in graph.ids() {
            self.layout_unreached_row(id);
        }
    }

    fn layout_unreached_row(&mut self, id: &'g ItemId) {
        if self.is_settled(id) {
            return;
        }
        log::trace!("{id} is not reachable from a root");
        self.layout_row(&chain_from(self.graph, id));
        self.drain_pending();
    }

    /// Lays out a row for every queued successor that is still unplaced.
    fn drain_pending(&mut self) {
        while let Some(head) = self.pending.pop_front() {
            if !self.is_settled(head) {
                self.layout_row(&chain_from(self.graph, head));
            }
        }
    }

    /// Returns `true` if `id` is placed or hidden beneath a collapsed node.
    fn is_settled(&self, id: &ItemId) -> bool {
        self.placed.contains(id) || self.hidden_candidates.contains_key(id)
    }

    fn finish(self) -> LayoutPositions {
        let Self {
            placed,
            hidden_candidates,
            mut out,
            ..
        } = self;
        for (id, ancestor) in hidden_candidates {
            if !placed.contains(id) {
                out.hidden.insert(id.clone(), ancestor.clone());
            }
        }
        log::debug!(
            "layout placed {} frames, {} teleports, {} hidden",
            out.frames.len(),
            out.teleports.len(),
            out.hidden.len()
        );
        out
    }

    /// Lays out one chain as a row at `row_y` and advances `row_y` past it.
    fn layout_row(&mut self, chain: &[&'g ItemId]) {
        let mut cursor_x = 0.0;
        let mut row_height: f64 = 0.0;
        for &id in chain {
            let column = self.place_slot(id, Point::new(cursor_x, self.row_y));
            cursor_x += column.width + self.options.horizontal_gap;
            row_height = row_height.max(column.height);
        }
        self.row_y += row_height + self.options.row_gap();
    }

    /// Lays out isolated roots in a grid of `grid_columns` cells per row.
    ///
    /// Roots that are already placed are skipped, as are roots that are the
    /// child of some node: those are stacked beneath their parent instead.
    fn layout_grid(&mut self, singles: &[Chain<'g>], child_targets: &HashSet<&ItemId>) {
        let columns = self.options.grid_columns;
        let mut cursor_x = 0.0;
        let mut row_height: f64 = 0.0;
        let mut in_row = 0;
        for chain in singles {
            let id = chain[0];
            if self.placed.contains(id) || child_targets.contains(id) {
                continue;
            }
            if in_row == columns {
                self.row_y += row_height + self.options.row_gap();
                cursor_x = 0.0;
                row_height = 0.0;
                in_row = 0;
            }
            let column = self.place_slot(id, Point::new(cursor_x, self.row_y));
            cursor_x += column.width + self.options.horizontal_gap;
            row_height = row_height.max(column.height);
            in_row += 1;
        }
        if in_row > 0 {
            self.row_y += row_height + self.options.row_gap();
        }
    }

    /// Places `id` at `origin`, or a teleport if it is already placed.
    ///
    /// Returns the extent of the column occupied at `origin`.
    fn place_slot(&mut self, id: &'g ItemId, origin: Point) -> Size {
        if self.placed.contains(id) {
            return self.emit_teleport(id, origin);
        }
        let mut path = HashSet::new();
        self.place_canonical(id, origin, &mut path)
    }

    fn place_canonical(
        &mut self,
        id: &'g ItemId,
        origin: Point,
        path: &mut HashSet<&'g ItemId>,
    ) -> Size {
        let graph = self.graph;
        let Some(node) = graph.get(id.as_str()) else {
            return Size::ZERO;
        };
        let size = sanitize_size((self.measure)(&node.id, node.kind));
        self.placed.insert(&node.id);
        self.out
            .frames
            .insert(node.id.clone(), Rect::from_origin_size(origin, size));
        self.out.frame_order.push(node.id.clone());
        if let Some(next) = node.next.first() {
            self.pending.push_back(next);
        }

        if node.children.is_empty() {
            return size;
        }
        if self.collapse.is_collapsed(node.id.as_str()) {
            self.hide_descendants(node);
            return size;
        }

        let stacked = self.layout_children(node, origin.x, origin.y + size.height, path);
        let column = Size::new(size.width.max(stacked.width), size.height + stacked.height);
        if node.kind == ItemKind::Group {
            let pad = self.options.group_padding;
            let header = self.options.group_header_size.height;
            let body = Rect::from_origin_size(origin, column);
            self.out.groups.insert(
                node.id.clone(),
                Rect::new(body.x0 - pad, body.y0 - pad - header, body.x1 + pad, body.y1 + pad),
            );
        }
        column
    }

    /// Stacks the children of `parent` below `parent_bottom` at `x`.
    ///
    /// A child is placed (and recursed into) if it is neither placed nor on
    /// the current DFS `path`; otherwise a teleport takes its slot. The path
    /// guards against `children` cycles, which `next` chains never see.
    ///
    /// Returns the width of the widest child column and the height consumed
    /// below `parent_bottom`.
    fn layout_children(
        &mut self,
        parent: &'g BaseNode,
        x: f64,
        parent_bottom: f64,
        path: &mut HashSet<&'g ItemId>,
    ) -> Size {
        let gap = self.options.vertical_gap;
        path.insert(&parent.id);
        let mut y = parent_bottom + gap;
        let mut bottom = parent_bottom;
        let mut width: f64 = 0.0;
        for child in &parent.children {
            let at = Point::new(x, y);
            let column = if !self.placed.contains(child) && !path.contains(child) {
                self.place_canonical(child, at, path)
            } else {
                self.emit_teleport(child, at)
            };
            width = width.max(column.width);
            bottom = y + column.height;
            y = bottom + gap;
        }
        path.remove(&parent.id);
        Size::new(width, bottom - parent_bottom)
    }

    fn emit_teleport(&mut self, target: &'g ItemId, origin: Point) -> Size {
        let count = self.teleport_counts.entry(target).or_insert(0);
        let key = format!("tp:{target}:{count}");
        *count += 1;
        let size = self.options.teleport_size();
        log::trace!("{key} stands in for {target} at {origin:?}");
        self.out
            .teleport_index
            .insert(key.clone(), self.out.teleports.len());
        self.out.teleports.push(Teleport {
            key,
            target: target.clone(),
            rect: Rect::from_origin_size(origin, size),
        });
        size
    }

    /// Records the descendants of a collapsed `node` that are not yet placed.
    fn hide_descendants(&mut self, node: &'g BaseNode) {
        let graph = self.graph;
        let mut stack: Vec<&'g ItemId> = node.children.iter().rev().collect();
        while let Some(id) = stack.pop() {
            if *id == node.id || self.placed.contains(id) || self.hidden_candidates.contains_key(id)
            {
                continue;
            }
            log::trace!("{id} hidden beneath collapsed {}", node.id);
            self.hidden_candidates.insert(id, &node.id);
            if let Some(child) = graph.get(id.as_str()) {
                stack.extend(child.children.iter().rev());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use understory_relations::{BaseGraph, Item, ItemKind, ViewMode, build_base_nodes};

    use super::chain_from;

    fn graph(items: &[Item]) -> BaseGraph {
        build_base_nodes(items, ViewMode::All)
    }

    fn chain_ids(graph: &BaseGraph, root: &str) -> alloc::vec::Vec<alloc::string::String> {
        let root = &graph.get(root).unwrap().id;
        chain_from(graph, root)
            .iter()
            .map(|id| alloc::string::String::from(id.as_str()))
            .collect()
    }

    #[test]
    fn chain_follows_first_successor_only() {
        let g = graph(&[
            Item::new("a", ItemKind::Frame).with_next(["b", "c"]),
            Item::new("b", ItemKind::Frame),
            Item::new("c", ItemKind::Frame),
        ]);
        assert_eq!(chain_ids(&g, "a"), ["a", "b"]);
    }

    #[test]
    fn chain_keeps_revisited_id_as_tail() {
        let g = graph(&[
            Item::new("r", ItemKind::Frame).with_next(["a"]),
            Item::new("a", ItemKind::Frame).with_next(["b"]),
            Item::new("b", ItemKind::Frame).with_next(["a"]),
        ]);
        assert_eq!(chain_ids(&g, "r"), ["r", "a", "b", "a"]);
    }

    #[test]
    fn self_loop_chain() {
        let g = graph(&[Item::new("a", ItemKind::Frame).with_next(["a"])]);
        assert_eq!(chain_ids(&g, "a"), ["a", "a"]);
    }
}
