// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// Smallest scale a [`Transform`] will store.
///
/// Any attempt to store a scale `<= 0` is clamped to this value; every
/// coordinate conversion divides by the scale.
pub const MIN_SCALE_EPSILON: f64 = 1e-3;

/// Uniform pan + zoom applied to the canvas content.
///
/// The transform composes as "translate, then scale": a canvas point `p` is
/// drawn at `translate + p * scale`, relative to the container's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Zoom factor, always `> 0`.
    pub scale: f64,
    /// Offset of the canvas origin from the container origin, in screen pixels.
    pub translate: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Scale `1`, no translation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    /// Creates a transform, clamping a non-positive scale to [`MIN_SCALE_EPSILON`].
    #[must_use]
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self {
            scale: if scale > 0.0 { scale } else { MIN_SCALE_EPSILON },
            translate,
        }
    }

    /// Returns the canvas → container-relative screen mapping.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Maps a canvas point to screen space relative to the container origin.
    #[must_use]
    pub fn canvas_to_local(self, p: Point) -> Point {
        (p.to_vec2() * self.scale + self.translate).to_point()
    }

    /// Maps a point relative to the container origin back to canvas space.
    #[must_use]
    pub fn local_to_canvas(self, p: Point) -> Point {
        ((p.to_vec2() - self.translate) / self.scale).to_point()
    }

    /// Maps a canvas rectangle to screen space relative to the container origin.
    #[must_use]
    pub fn canvas_rect_to_local(self, r: Rect) -> Rect {
        Rect::from_points(
            self.canvas_to_local(r.origin()),
            self.canvas_to_local(Point::new(r.x1, r.y1)),
        )
    }

    /// Maps a rectangle relative to the container origin back to canvas space.
    #[must_use]
    pub fn local_rect_to_canvas(self, r: Rect) -> Rect {
        Rect::from_points(
            self.local_to_canvas(r.origin()),
            self.local_to_canvas(Point::new(r.x1, r.y1)),
        )
    }
}
