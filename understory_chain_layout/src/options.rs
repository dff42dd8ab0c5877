// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Spacing parameters for [`compute_layout`](crate::compute_layout).
///
/// All values are in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Gap between neighbouring slots of a chain row or grid row.
    pub horizontal_gap: f64,
    /// Gap between stacked children. Rows are separated by twice this value.
    pub vertical_gap: f64,
    /// Padding around the children of a group in [`LayoutPositions::groups`](crate::LayoutPositions::groups).
    pub group_padding: f64,
    /// Size of a group header, also used as the size of teleport chips.
    pub group_header_size: Size,
    /// Maximum number of cells per row in the grid of isolated artifacts.
    pub grid_columns: usize,
}

impl Default for LayoutOptions {
    /// - `horizontal_gap`: `48`
    /// - `vertical_gap`: `48`
    /// - `group_padding`: `24`
    /// - `group_header_size`: `160 x 40`
    /// - `grid_columns`: `6`
    fn default() -> Self {
        Self {
            horizontal_gap: 48.0,
            vertical_gap: 48.0,
            group_padding: 24.0,
            group_header_size: Size::new(160.0, 40.0),
            grid_columns: 6,
        }
    }
}

impl LayoutOptions {
    /// Returns the size of a teleport chip.
    #[must_use]
    pub fn teleport_size(&self) -> Size {
        self.group_header_size
    }

    /// Returns the gap between rows of chains and grid cells.
    #[must_use]
    pub fn row_gap(&self) -> f64 {
        self.vertical_gap * 2.0
    }

    /// Returns a copy with negative or non-finite spacing replaced by zero and
    /// at least one grid column.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            horizontal_gap: non_negative(self.horizontal_gap),
            vertical_gap: non_negative(self.vertical_gap),
            group_padding: non_negative(self.group_padding),
            group_header_size: sanitize_size(self.group_header_size),
            grid_columns: self.grid_columns.max(1),
        }
    }
}

/// Clamps negative and non-finite extents to zero.
#[must_use]
pub(crate) fn sanitize_size(size: Size) -> Size {
    Size::new(non_negative(size.width), non_negative(size.height))
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::LayoutOptions;

    #[test]
    fn sanitized_replaces_invalid_values() {
        let options = LayoutOptions {
            horizontal_gap: -4.0,
            vertical_gap: f64::NAN,
            group_padding: 8.0,
            group_header_size: Size::new(f64::INFINITY, 20.0),
            grid_columns: 0,
        }
        .sanitized();
        assert_eq!(options.horizontal_gap, 0.0);
        assert_eq!(options.vertical_gap, 0.0);
        assert_eq!(options.group_padding, 8.0);
        assert_eq!(options.group_header_size, Size::new(0.0, 20.0));
        assert_eq!(options.grid_columns, 1);
    }
}
