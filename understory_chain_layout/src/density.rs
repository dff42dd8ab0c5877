// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Display density setting that artifact sizes are derived from.
///
/// Hosts measure artifacts at their natural size and scale the result by the
/// density before handing it to the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Density {
    /// Small previews; more artifacts per screen.
    Compact,
    /// Natural size.
    #[default]
    Comfortable,
    /// Enlarged previews.
    Spacious,
}

impl Density {
    /// Returns the factor applied to natural sizes.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Compact => 0.75,
            Self::Comfortable => 1.0,
            Self::Spacious => 1.25,
        }
    }

    /// Scales a natural size by this density.
    #[must_use]
    pub fn apply(self, natural: Size) -> Size {
        natural * self.factor()
    }
}
