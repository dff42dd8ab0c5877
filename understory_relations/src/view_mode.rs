// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use crate::item::{ItemKind, ParseKindError};

/// Which slice of the artifact collection a canvas shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewMode {
    /// Page-like frames and the groups that organize them.
    #[default]
    Pages,
    /// Component-like frames and the groups that organize them.
    Components,
    /// Every artifact, unfiltered.
    All,
}

impl ViewMode {
    /// Returns `true` if artifacts of `kind` are part of this view.
    ///
    /// Groups belong to every view.
    #[must_use]
    pub const fn includes(self, kind: ItemKind) -> bool {
        match (self, kind) {
            (Self::All, _) | (_, ItemKind::Group) => true,
            (Self::Pages, ItemKind::Frame) => true,
            (Self::Components, ItemKind::Component) => true,
            _ => false,
        }
    }

    /// Returns the lowercase name used when persisting this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Components => "components",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pages" => Ok(Self::Pages),
            "components" => Ok(Self::Components),
            "all" => Ok(Self::All),
            _ => Err(ParseKindError::new("view mode", s)),
        }
    }
}
