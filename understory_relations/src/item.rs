// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data model: artifacts as reported by the indexer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::id::ItemId;

/// The kind of an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemKind {
    /// A page-like frame.
    Frame,
    /// A component-like frame.
    Component,
    /// A grouping artifact whose `children` are nested beneath it.
    Group,
}

impl ItemKind {
    /// Returns the lowercase name used when persisting this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Component => "component",
            Self::Group => "group",
        }
    }

    /// Returns `true` for the frame-like kinds ([`Frame`](Self::Frame) and
    /// [`Component`](Self::Component)).
    #[must_use]
    pub const fn is_frame_like(self) -> bool {
        matches!(self, Self::Frame | Self::Component)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frame" | "page" => Ok(Self::Frame),
            "component" => Ok(Self::Component),
            "group" => Ok(Self::Group),
            _ => Err(ParseKindError::new("item kind", s)),
        }
    }
}

/// Error returned when parsing an [`ItemKind`] or [`ViewMode`](crate::ViewMode)
/// from an unknown name.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseKindError {
    /// What was being parsed.
    pub expected: &'static str,
    /// The rejected input.
    pub found: String,
}

impl ParseKindError {
    pub(crate) fn new(expected: &'static str, found: &str) -> Self {
        Self {
            expected,
            found: String::from(found),
        }
    }
}

impl fmt::Debug for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParseKindError {{ expected: {:?}, found: {:?} }}",
            self.expected, self.found
        )
    }
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.expected, self.found)
    }
}

impl core::error::Error for ParseKindError {}

/// An artifact as reported by the external indexer.
///
/// Only `id`, `kind`, `next` and `children` drive positioning. `prev`,
/// `parent` and `related` are carried for connection-line rendering, and
/// `title` and `tags` for display; none of them affect layout.
///
/// Duplicate successors and cycles are legal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    /// Stable identifier.
    pub id: ItemId,
    /// Artifact kind.
    pub kind: ItemKind,
    /// Ordered sequencing successors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Vec<ItemId>,
    /// Ordered nested children.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ItemId>,
    /// Sequencing predecessors, used only by connection rendering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prev: Vec<ItemId>,
    /// Declared parents, used only by connection rendering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Vec<ItemId>,
    /// Loosely related artifacts, used only by connection rendering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub related: Vec<ItemId>,
    /// Free-form tags extracted from source comments.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Display identity; falls back to the id when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
}

impl Item {
    /// Creates an item with no relationships.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            next: Vec::new(),
            children: Vec::new(),
            prev: Vec::new(),
            parent: Vec::new(),
            related: Vec::new(),
            tags: Vec::new(),
            title: None,
        }
    }

    /// Replaces the `next` edges.
    #[must_use]
    pub fn with_next<I>(mut self, next: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        self.next = next.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the `children` edges.
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the display title, or the id when no title was given.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemKind};

    #[test]
    fn kind_names_round_trip() {
        for kind in [ItemKind::Frame, ItemKind::Component, ItemKind::Group] {
            assert_eq!(kind.as_str().parse::<ItemKind>(), Ok(kind));
        }
        assert_eq!("page".parse::<ItemKind>(), Ok(ItemKind::Frame));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = "widget".parse::<ItemKind>().unwrap_err();
        assert_eq!(err.found, "widget");
        assert_eq!(alloc::format!("{err}"), "unknown item kind \"widget\"");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let item = Item::new("checkout", ItemKind::Frame);
        assert_eq!(item.display_name(), "checkout");
        let item = item.with_title("Checkout page");
        assert_eq!(item.display_name(), "Checkout page");
    }
}
