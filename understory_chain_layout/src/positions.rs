// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout output: canonical frames, teleport chips, group bounds.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use understory_relations::ItemId;

/// A stand-in for an artifact that is canonically placed elsewhere.
///
/// Teleports are emitted for every repeat visit: fan-in (an artifact reached
/// from several chains or parents) and cycles. The rendering layer shows them
/// as small chips; activating one focuses [`target`](Self::target).
#[derive(Clone, Debug, PartialEq)]
pub struct Teleport {
    /// Key of the form `tp:<target>:<n>`, where `n` counts the teleports to
    /// the same target in emission order, starting at zero.
    pub key: String,
    /// Id of the canonically placed artifact.
    pub target: ItemId,
    /// Chip rectangle in canvas space.
    pub rect: Rect,
}

/// One visual box of a layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement<'a> {
    /// The canonical frame of an artifact.
    Frame {
        /// The placed artifact.
        id: &'a ItemId,
        /// Effective rectangle, overrides applied.
        rect: Rect,
    },
    /// A jump chip standing in for an artifact placed elsewhere.
    Teleport(&'a Teleport),
}

impl Placement<'_> {
    /// Returns the rectangle in canvas space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        match self {
            Self::Frame { rect, .. } => *rect,
            Self::Teleport(tp) => tp.rect,
        }
    }

    /// Returns the artifact this box shows: the frame's id, or the teleport's target.
    #[must_use]
    pub fn target(&self) -> &ItemId {
        match self {
            Self::Frame { id, .. } => id,
            Self::Teleport(tp) => &tp.target,
        }
    }
}

/// Caller-owned manual position overrides.
///
/// Overrides are read, never written, by position lookups and always take
/// precedence over computed positions. They move an artifact's origin and
/// keep its measured size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionOverrides {
    origins: HashMap<ItemId, Point>,
}

impl PositionOverrides {
    /// Creates an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins `id` to `origin`, returning the previous override.
    pub fn set(&mut self, id: impl Into<ItemId>, origin: Point) -> Option<Point> {
        self.origins.insert(id.into(), origin)
    }

    /// Removes the override for `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Point> {
        self.origins.remove(id)
    }

    /// Returns the override for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Point> {
        self.origins.get(id).copied()
    }

    /// Returns the number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns `true` if there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Removes all overrides.
    pub fn clear(&mut self) {
        self.origins.clear();
    }
}

/// Result of [`compute_layout`](crate::compute_layout).
///
/// A snapshot: it is recomputed wholesale whenever the graph, sizes, options
/// or collapse state change, and never patched in place.
///
/// With an empty collapse state every id of the input graph appears in
/// [`frames`](Self::frame) and/or as the target of a [`Teleport`]. Ids hidden
/// beneath collapsed nodes are listed in [`hidden`](Self::hidden) instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPositions {
    pub(crate) frames: HashMap<ItemId, Rect>,
    pub(crate) frame_order: Vec<ItemId>,
    pub(crate) groups: HashMap<ItemId, Rect>,
    pub(crate) teleports: Vec<Teleport>,
    pub(crate) teleport_index: HashMap<String, usize>,
    pub(crate) hidden: HashMap<ItemId, ItemId>,
}

impl LayoutPositions {
    /// Returns `true` if nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.teleports.is_empty()
    }

    /// Returns the canonical rectangle of `id`, ignoring overrides.
    #[must_use]
    pub fn frame(&self, id: &str) -> Option<Rect> {
        self.frames.get(id).copied()
    }

    /// Iterates canonical frames in placement order.
    pub fn frames(&self) -> impl Iterator<Item = (&ItemId, Rect)> + '_ {
        self.frame_order
            .iter()
            .filter_map(|id| self.frames.get(id).map(|&r| (id, r)))
    }

    /// Returns the number of canonical frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns the enclosing rectangle of group `id`, if it has placed children.
    #[must_use]
    pub fn group(&self, id: &str) -> Option<Rect> {
        self.groups.get(id).copied()
    }

    /// Iterates group rectangles in placement order.
    pub fn groups(&self) -> impl Iterator<Item = (&ItemId, Rect)> + '_ {
        self.frame_order
            .iter()
            .filter_map(|id| self.groups.get(id).map(|&r| (id, r)))
    }

    /// Iterates teleports in emission order.
    pub fn teleports(&self) -> impl Iterator<Item = &Teleport> + '_ {
        self.teleports.iter()
    }

    /// Returns the teleport with the given key.
    #[must_use]
    pub fn teleport(&self, key: &str) -> Option<&Teleport> {
        self.teleport_index.get(key).map(|&ix| &self.teleports[ix])
    }

    /// Iterates the teleports standing in for `target`.
    pub fn teleports_to<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Teleport> + 'a {
        self.teleports
            .iter()
            .filter(move |tp| tp.target.as_str() == target)
    }

    /// Returns the number of teleports.
    #[must_use]
    pub fn teleport_count(&self) -> usize {
        self.teleports.len()
    }

    /// Returns the collapsed ancestor hiding `id`, if `id` was not placed
    /// because of a collapsed node.
    #[must_use]
    pub fn hidden(&self, id: &str) -> Option<&ItemId> {
        self.hidden.get(id)
    }

    /// Returns the number of hidden ids.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Returns `true` if `id` is canonically placed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.frames.contains_key(id)
    }

    /// Returns the effective origin of `id`: the override if present,
    /// otherwise the canonical position.
    ///
    /// Returns `None` for ids without a canonical frame.
    #[must_use]
    pub fn origin_with(&self, id: &str, overrides: &PositionOverrides) -> Option<Point> {
        self.frame_rect_with(id, overrides).map(|r| r.origin())
    }

    /// Returns the effective rectangle of `id`: the canonical size at the
    /// overridden origin if an override exists, otherwise the canonical frame.
    #[must_use]
    pub fn frame_rect_with(&self, id: &str, overrides: &PositionOverrides) -> Option<Rect> {
        let rect = self.frame(id)?;
        Some(match overrides.get(id) {
            Some(origin) => Rect::from_origin_size(origin, rect.size()),
            None => rect,
        })
    }

    /// Iterates frames (overrides applied) then teleports, in placement order.
    pub fn placements<'a>(
        &'a self,
        overrides: &'a PositionOverrides,
    ) -> impl Iterator<Item = Placement<'a>> + 'a {
        let frames = self.frame_order.iter().filter_map(move |id| {
            self.frame_rect_with(id.as_str(), overrides)
                .map(|rect| Placement::Frame { id, rect })
        });
        frames.chain(self.teleports.iter().map(Placement::Teleport))
    }

    /// Returns the union of all frame, teleport and group rectangles.
    ///
    /// Returns [`Rect::ZERO`] when nothing was placed.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds_with(&PositionOverrides::default())
    }

    /// Like [`bounds`](Self::bounds), with overridden frames at their
    /// overridden positions.
    #[must_use]
    pub fn bounds_with(&self, overrides: &PositionOverrides) -> Rect {
        let frames = self
            .frame_order
            .iter()
            .filter_map(|id| self.frame_rect_with(id.as_str(), overrides));
        let teleports = self.teleports.iter().map(|tp| tp.rect);
        let groups = self.groups.values().copied();
        frames
            .chain(teleports)
            .chain(groups)
            .reduce(|acc, r| acc.union(r))
            .unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{LayoutPositions, Placement, PositionOverrides};

    fn sample() -> LayoutPositions {
        let mut out = LayoutPositions::default();
        out.frames.insert("a".into(), Rect::new(0.0, 0.0, 100.0, 50.0));
        out.frame_order.push("a".into());
        out
    }

    #[test]
    fn overrides_win_and_keep_size() {
        let positions = sample();
        let mut overrides = PositionOverrides::new();
        assert_eq!(
            positions.origin_with("a", &overrides),
            Some(Point::new(0.0, 0.0))
        );

        overrides.set("a", Point::new(500.0, 20.0));
        assert_eq!(
            positions.frame_rect_with("a", &overrides),
            Some(Rect::new(500.0, 20.0, 600.0, 70.0))
        );
        // The snapshot itself is untouched.
        assert_eq!(positions.frame("a"), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn override_without_frame_is_ignored() {
        let positions = sample();
        let mut overrides = PositionOverrides::new();
        overrides.set("ghost", Point::new(1.0, 1.0));
        assert_eq!(positions.origin_with("ghost", &overrides), None);
    }

    #[test]
    fn bounds_of_empty_layout_is_zero() {
        assert_eq!(LayoutPositions::default().bounds(), Rect::ZERO);
    }

    #[test]
    fn bounds_follow_overrides() {
        let positions = sample();
        let mut overrides = PositionOverrides::new();
        overrides.set("a", Point::new(-100.0, 0.0));
        assert_eq!(
            positions.bounds_with(&overrides),
            Rect::new(-100.0, 0.0, 0.0, 50.0)
        );
    }

    #[test]
    fn placements_apply_overrides() {
        let positions = sample();
        let mut overrides = PositionOverrides::new();
        overrides.set("a", Point::new(10.0, 10.0));
        let all: alloc::vec::Vec<Placement<'_>> = positions.placements(&overrides).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].target().as_str(), "a");
        assert_eq!(all[0].rect(), Rect::new(10.0, 10.0, 110.0, 60.0));
    }
}
