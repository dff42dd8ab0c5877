// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera moves that center an artifact in the container.

use kurbo::{Rect, Size, Vec2};

use crate::transform::Transform;

/// Corrections at or below this distance (in screen pixels, per axis) are
/// not applied by [`CanvasView::settle`](crate::CanvasView::settle).
pub const SETTLE_TOLERANCE_PX: f64 = 0.5;

/// Parameters for focus moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusOptions {
    /// Fraction of the container the focused artifact may occupy.
    pub padding: f64,
    /// Smallest scale a focus move may choose.
    pub min_scale: f64,
    /// Largest scale a focus move may choose.
    pub max_scale: f64,
}

impl Default for FocusOptions {
    /// `padding: 0.85`, scale limits `[0.1, 2.0]`.
    fn default() -> Self {
        Self {
            padding: 0.85,
            min_scale: 0.1,
            max_scale: 2.0,
        }
    }
}

impl FocusOptions {
    /// Returns a copy with the given scale limits.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }
}

/// Computes the transform that centers `target` (a canvas rectangle) in a
/// container of size `container`.
///
/// The scale is the largest that fits the target into `padding` of the
/// container without zooming in past `1`, then clamped to the option limits.
/// The translation is the unique one placing the target's center at the
/// container's center.
#[must_use]
pub fn focus_transform(target: Rect, container: Size, options: &FocusOptions) -> Transform {
    let padding = if options.padding > 0.0 && options.padding.is_finite() {
        options.padding
    } else {
        1.0
    };
    let fit = |available: f64, extent: f64| {
        if extent > 0.0 {
            available * padding / extent
        } else {
            f64::INFINITY
        }
    };
    let desired = fit(container.width, target.width())
        .min(fit(container.height, target.height()))
        .min(1.0);
    let (lo, hi) = if options.min_scale <= options.max_scale {
        (options.min_scale, options.max_scale)
    } else {
        (options.max_scale, options.min_scale)
    };
    let scale = desired.clamp(lo, hi);
    Transform::new(scale, centering_translate(target, container, scale))
}

/// Translation that puts the center of `target` at the center of `container`
/// under `scale`.
pub(crate) fn centering_translate(target: Rect, container: Size, scale: f64) -> Vec2 {
    let center = target.center();
    Vec2::new(
        container.width / 2.0 - center.x * scale,
        container.height / 2.0 - center.y * scale,
    )
}

/// Token for the second pass of a focus move.
///
/// Returned by [`CanvasView::focus_on`](crate::CanvasView::focus_on). Once the
/// host has painted the moved content (two frames later, in a browser-like
/// host), it measures where the artifact actually ended up and passes that to
/// [`CanvasView::settle`](crate::CanvasView::settle).
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct PendingSettle {
    pub(crate) version: u64,
    pub(crate) container: Size,
}

impl PendingSettle {
    /// Returns the camera-move version this token belongs to.
    pub fn version(self) -> u64 {
        self.version
    }

    /// Returns the container size the focus move centered within.
    pub fn container(self) -> Size {
        self.container
    }
}

/// Result of [`CanvasView::settle`](crate::CanvasView::settle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettleOutcome {
    /// A newer camera move superseded this one; nothing was changed.
    Stale,
    /// The artifact is centered within [`SETTLE_TOLERANCE_PX`]; nothing was changed.
    Converged,
    /// The transform was corrected to the contained value.
    Corrected(Transform),
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size, Vec2};

    use super::{FocusOptions, focus_transform};

    #[test]
    fn reference_focus_move() {
        let target = Rect::from_origin_size((100.0, 100.0), (200.0, 100.0));
        let t = focus_transform(target, Size::new(1000.0, 800.0), &FocusOptions::default());
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translate, Vec2::new(300.0, 250.0));
    }

    #[test]
    fn large_targets_zoom_out_within_limits() {
        let target = Rect::new(0.0, 0.0, 4000.0, 1000.0);
        let options = FocusOptions::default();
        let t = focus_transform(target, Size::new(1000.0, 800.0), &options);
        assert!((t.scale - 0.2125).abs() < 1e-12);

        let huge = Rect::new(0.0, 0.0, 1e6, 1e6);
        let t = focus_transform(huge, Size::new(1000.0, 800.0), &options);
        assert_eq!(t.scale, options.min_scale);
    }

    #[test]
    fn degenerate_targets_use_unit_scale() {
        let point = Rect::new(50.0, 50.0, 50.0, 50.0);
        let t = focus_transform(point, Size::new(100.0, 100.0), &FocusOptions::default());
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.translate, Vec2::ZERO);
    }

    #[test]
    fn swapped_limits_are_normalized() {
        let options = FocusOptions::default().with_scale_limits(3.0, 0.5);
        assert_eq!((options.min_scale, options.max_scale), (0.5, 3.0));
    }
}
