// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashSet;
use understory_relations::ItemId;

/// The set of collapsed artifacts.
///
/// A collapsed artifact is still placed, but its `children` are not stacked
/// beneath it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: HashSet<ItemId>,
}

impl CollapseState {
    /// Creates a state with nothing collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` is collapsed.
    #[must_use]
    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed.contains(id)
    }

    /// Collapses or expands `id`. Returns `true` if the state changed.
    pub fn set_collapsed(&mut self, id: impl Into<ItemId>, collapsed: bool) -> bool {
        let id = id.into();
        if collapsed {
            self.collapsed.insert(id)
        } else {
            self.collapsed.remove(id.as_str())
        }
    }

    /// Flips the state of `id`, returning the new state.
    pub fn toggle(&mut self, id: impl Into<ItemId>) -> bool {
        let id = id.into();
        if self.collapsed.remove(id.as_str()) {
            false
        } else {
            self.collapsed.insert(id);
            true
        }
    }

    /// Returns `true` if nothing is collapsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }

    /// Expands everything.
    pub fn clear(&mut self) {
        self.collapsed.clear();
    }
}

impl<I: Into<ItemId>> FromIterator<I> for CollapseState {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            collapsed: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CollapseState;

    #[test]
    fn toggle_flips() {
        let mut state = CollapseState::new();
        assert!(state.toggle("g"));
        assert!(state.is_collapsed("g"));
        assert!(!state.toggle("g"));
        assert!(state.is_empty());
    }

    #[test]
    fn set_collapsed_reports_changes() {
        let mut state = CollapseState::new();
        assert!(state.set_collapsed("g", true));
        assert!(!state.set_collapsed("g", true));
        assert!(state.set_collapsed("g", false));
        assert!(!state.set_collapsed("g", false));
    }
}
