// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use understory_canvas_view::{CanvasView, FocusOptions, PendingSettle, RenderTier, SettleOutcome};
use understory_chain_layout::{
    CollapseState, Density, LayoutOptions, LayoutPositions, Placement, PositionOverrides,
    compute_layout,
};
use understory_relations::{BaseGraph, Item, ItemId, ViewMode, build_base_nodes};

/// Natural size used for artifacts the host has not measured.
pub const DEFAULT_NATURAL_SIZE: Size = Size::new(320.0, 200.0);

/// An in-view box of the board, ready to render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleItem<'a> {
    /// The frame or teleport, with overrides applied.
    pub placement: Placement<'a>,
    /// How much detail to render it with.
    pub tier: RenderTier,
}

/// Artifacts, their layout, and the camera looking at them.
///
/// Inputs are set freely; each change marks the board dirty. The layout is
/// recomputed wholesale on [`commit`](Self::commit), and every query commits
/// first, so culling and focus never see positions older than the inputs.
#[derive(Debug)]
pub struct Board {
    items: Vec<Item>,
    view_mode: ViewMode,
    density: Density,
    natural_sizes: HashMap<ItemId, Size>,
    default_size: Size,
    collapse: CollapseState,
    overrides: PositionOverrides,
    options: LayoutOptions,
    focus_options: FocusOptions,
    graph: BaseGraph,
    positions: LayoutPositions,
    view: CanvasView,
    dirty: bool,
    revision: u64,
}

impl Board {
    /// Creates an empty board viewed through `container` (client coordinates).
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self {
            items: Vec::new(),
            view_mode: ViewMode::default(),
            density: Density::default(),
            natural_sizes: HashMap::new(),
            default_size: DEFAULT_NATURAL_SIZE,
            collapse: CollapseState::new(),
            overrides: PositionOverrides::new(),
            options: LayoutOptions::default(),
            focus_options: FocusOptions::default(),
            graph: BaseGraph::new(),
            positions: LayoutPositions::default(),
            view: CanvasView::new(container),
            dirty: false,
            revision: 0,
        }
    }

    /// Replaces the artifact collection.
    pub fn set_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Item>,
    {
        self.items.clear();
        self.items.extend(items);
        self.dirty = true;
    }

    /// Returns the artifact collection.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the active view mode.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches the view mode.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        if self.view_mode != view_mode {
            self.view_mode = view_mode;
            self.dirty = true;
        }
    }

    /// Returns the display density.
    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    /// Sets the display density all sizes are scaled by.
    pub fn set_density(&mut self, density: Density) {
        if self.density != density {
            self.density = density;
            self.dirty = true;
        }
    }

    /// Records the natural (density-independent) size measured for `id`.
    pub fn set_natural_size(&mut self, id: impl Into<ItemId>, size: Size) {
        let previous = self.natural_sizes.insert(id.into(), size);
        if previous != Some(size) {
            self.dirty = true;
        }
    }

    /// Sets the natural size used for artifacts without a measured size.
    pub fn set_default_size(&mut self, size: Size) {
        if self.default_size != size {
            self.default_size = size;
            self.dirty = true;
        }
    }

    /// Returns the collapse state.
    #[must_use]
    pub fn collapse(&self) -> &CollapseState {
        &self.collapse
    }

    /// Collapses or expands `id`. Returns `true` if the state changed.
    pub fn set_collapsed(&mut self, id: impl Into<ItemId>, collapsed: bool) -> bool {
        let changed = self.collapse.set_collapsed(id, collapsed);
        self.dirty |= changed;
        changed
    }

    /// Flips the collapsed state of `id`; returns the new state.
    pub fn toggle_collapsed(&mut self, id: impl Into<ItemId>) -> bool {
        self.dirty = true;
        self.collapse.toggle(id)
    }

    /// Returns the manual position overrides.
    #[must_use]
    pub fn overrides(&self) -> &PositionOverrides {
        &self.overrides
    }

    /// Pins `id` at `origin` (canvas space).
    pub fn set_override(&mut self, id: impl Into<ItemId>, origin: Point) {
        let previous = self.overrides.set(id, origin);
        if previous != Some(origin) {
            self.dirty = true;
        }
    }

    /// Releases a pinned position. Returns the removed origin, if any.
    pub fn clear_override(&mut self, id: &str) -> Option<Point> {
        let removed = self.overrides.remove(id);
        self.dirty |= removed.is_some();
        removed
    }

    /// Returns the layout options.
    #[must_use]
    pub fn layout_options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Sets the layout options.
    pub fn set_layout_options(&mut self, options: LayoutOptions) {
        if self.options != options {
            self.options = options;
            self.dirty = true;
        }
    }

    /// Returns the options used by [`focus`](Self::focus).
    #[must_use]
    pub fn focus_options(&self) -> &FocusOptions {
        &self.focus_options
    }

    /// Sets the options used by [`focus`](Self::focus).
    pub fn set_focus_options(&mut self, options: FocusOptions) {
        self.focus_options = options;
    }

    /// Returns `true` if inputs changed since the last commit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the layout revision, bumped by every commit that recomputed.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Rebuilds the graph and the layout if any input changed.
    ///
    /// Returns `true` if a new layout was computed.
    pub fn commit(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.graph = build_base_nodes(&self.items, self.view_mode);
        let density = self.density;
        let sizes = &self.natural_sizes;
        let fallback = self.default_size;
        self.positions = compute_layout(
            &self.graph,
            |id, _| density.apply(sizes.get(id).copied().unwrap_or(fallback)),
            &self.options,
            &self.collapse,
        );
        self.dirty = false;
        self.revision = self.revision.wrapping_add(1);
        log::trace!(
            "board revision {}: {} nodes, {} frames, {} teleports",
            self.revision,
            self.graph.len(),
            self.positions.frame_count(),
            self.positions.teleport_count()
        );
        true
    }

    /// Returns the graph of the active view, committing first.
    pub fn graph(&mut self) -> &BaseGraph {
        self.commit();
        &self.graph
    }

    /// Returns the current layout, committing first.
    pub fn positions(&mut self) -> &LayoutPositions {
        self.commit();
        &self.positions
    }

    /// Returns the effective rectangle of `id`, committing first.
    pub fn frame_rect(&mut self, id: &str) -> Option<Rect> {
        self.commit();
        self.positions.frame_rect_with(id, &self.overrides)
    }

    /// Returns the camera.
    #[must_use]
    pub fn view(&self) -> &CanvasView {
        &self.view
    }

    /// Returns the camera for direct manipulation (pan, zoom, transforms
    /// reported by the host).
    pub fn view_mut(&mut self) -> &mut CanvasView {
        &mut self.view
    }

    /// Iterates the frames and teleports in view through `container`.
    ///
    /// `container` becomes the camera's container. Boxes are yielded with the
    /// render tier recommended for the current scale, frames first.
    pub fn visible(&mut self, container: Rect) -> impl Iterator<Item = VisibleItem<'_>> + '_ {
        self.commit();
        self.view.set_container(container);
        let tier = self.view.render_tier();
        self.view
            .cull(
                self.positions
                    .placements(&self.overrides)
                    .map(|placement| (placement, placement.rect())),
            )
            .map(move |(placement, _)| VisibleItem { placement, tier })
    }

    /// Centers the artifact `id` in the view.
    ///
    /// Returns `None`, leaving the camera untouched, if `id` has no frame in
    /// the current view. Otherwise the returned token is for
    /// [`settle`](Self::settle).
    pub fn focus(&mut self, id: &str) -> Option<PendingSettle> {
        let Some(rect) = self.frame_rect(id) else {
            log::debug!("focus on {id:?} ignored: not placed in the current view");
            return None;
        };
        let container = self.view.container().size();
        Some(self.view.focus_on(rect, container, &self.focus_options))
    }

    /// Focuses the artifact a teleport chip points at.
    pub fn focus_teleport(&mut self, key: &str) -> Option<PendingSettle> {
        self.commit();
        let Some(target) = self.positions.teleport(key).map(|tp| tp.target.clone()) else {
            log::debug!("focus on teleport {key:?} ignored: no such teleport");
            return None;
        };
        self.focus(target.as_str())
    }

    /// Completes a focus move; see [`CanvasView::settle`].
    pub fn settle(&mut self, pending: PendingSettle, measured: Rect) -> SettleOutcome {
        self.view.settle(pending, measured)
    }

    /// Fits the whole layout into the view.
    pub fn fit_all(&mut self) {
        self.commit();
        let bounds = self.positions.bounds_with(&self.overrides);
        self.view.fit_rect(bounds);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use understory_relations::{Item, ItemKind};

    use super::Board;

    #[test]
    fn setters_mark_dirty_only_on_change() {
        let mut board = Board::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(!board.is_dirty());

        board.set_view_mode(board.view_mode());
        assert!(!board.is_dirty());

        board.set_items([Item::new("a", ItemKind::Frame)]);
        assert!(board.is_dirty());
        assert!(board.commit());
        assert!(!board.commit());
        assert_eq!(board.revision(), 1);

        assert!(!board.set_collapsed("a", false));
        assert!(!board.is_dirty());
        assert!(board.clear_override("a").is_none());
        assert!(!board.is_dirty());
    }
}
