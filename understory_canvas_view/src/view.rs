// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::ViewConfig;
use crate::focus::{
    FocusOptions, PendingSettle, SETTLE_TOLERANCE_PX, SettleOutcome, centering_translate,
    focus_transform,
};
use crate::pan::PanGesture;
use crate::tier::{RenderTier, recommend_render_tier};
use crate::transform::{MIN_SCALE_EPSILON, Transform};

/// Camera over an infinite canvas.
///
/// `CanvasView` is the single owner of the canvas [`Transform`]. Writes are
/// last-write-wins: there is no cancellation of in-flight moves. Instead,
/// every camera move initiated here bumps a version, and deferred focus
/// corrections carrying an older version are discarded.
///
/// It can be used to:
/// - Convert points between screen (client) and canvas coordinates.
/// - Compute buffered visible bounds for culling.
/// - Recommend a render tier for the current zoom.
/// - Pan, zoom around an anchor, fit a rectangle, and focus an artifact.
#[derive(Clone, Debug)]
pub struct CanvasView {
    container: Rect,
    transform: Transform,
    config: ViewConfig,
    move_version: u64,
    pan: PanGesture,
    item_drag: bool,
}

impl CanvasView {
    /// Creates a view over `container` (in client coordinates) with the
    /// identity transform and default configuration.
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self::with_config(container, ViewConfig::default())
    }

    /// Creates a view with the given configuration.
    #[must_use]
    pub fn with_config(container: Rect, config: ViewConfig) -> Self {
        Self {
            container,
            transform: Transform::IDENTITY,
            config,
            move_version: 0,
            pan: PanGesture::default(),
            item_drag: false,
        }
    }

    /// Returns the container rectangle in client coordinates.
    #[must_use]
    pub fn container(&self) -> Rect {
        self.container
    }

    /// Sets the container rectangle, for example after a resize.
    ///
    /// The transform is unchanged.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the configuration for modification.
    pub fn config_mut(&mut self) -> &mut ViewConfig {
        &mut self.config
    }

    /// Returns the current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Returns the current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Stores a transform reported by the host (for example an external
    /// pan/zoom handler, or the host echoing a move back).
    ///
    /// A scale `<= 0` is clamped to [`MIN_SCALE_EPSILON`]. A non-finite scale
    /// or translation component keeps the previous value. This never fails.
    ///
    /// Returns the transform actually stored.
    pub fn set_transform(&mut self, scale: f64, translate_x: f64, translate_y: f64) -> Transform {
        let scale = if !scale.is_finite() {
            log::debug!("ignoring non-finite scale {scale}");
            self.transform.scale
        } else if scale <= 0.0 {
            log::debug!("clamping scale {scale} to {MIN_SCALE_EPSILON}");
            MIN_SCALE_EPSILON
        } else {
            scale
        };
        let keep = |value: f64, previous: f64| if value.is_finite() { value } else { previous };
        self.transform = Transform {
            scale,
            translate: Vec2::new(
                keep(translate_x, self.transform.translate.x),
                keep(translate_y, self.transform.translate.y),
            ),
        };
        self.transform
    }

    /// Converts a client-space pointer position into canvas space.
    ///
    /// `container` is the container rectangle in client space; the pointer
    /// is taken relative to its origin before the transform is inverted.
    #[must_use]
    pub fn screen_to_canvas(&self, client: Point, container: Rect) -> Point {
        let local = client - container.origin().to_vec2();
        self.transform.local_to_canvas(local)
    }

    /// Converts a canvas point to client space; the inverse of
    /// [`screen_to_canvas`](Self::screen_to_canvas).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point, container: Rect) -> Point {
        self.transform.canvas_to_local(canvas) + container.origin().to_vec2()
    }

    /// Returns the canvas rectangle visible through a `width` × `height`
    /// container, grown by `buffer` canvas units on every side.
    #[must_use]
    pub fn visible_bounds(&self, width: f64, height: f64, buffer: f64) -> Rect {
        let Transform { scale, translate } = self.transform;
        let left = -translate.x / scale - buffer;
        let top = -translate.y / scale - buffer;
        Rect::new(
            left,
            top,
            left + width / scale + 2.0 * buffer,
            top + height / scale + 2.0 * buffer,
        )
    }

    /// Visible bounds for the current container, using the configured buffer.
    #[must_use]
    pub fn visible_canvas_rect(&self) -> Rect {
        let size = self.container.size();
        self.visible_bounds(size.width, size.height, self.config.cull_buffer)
    }

    /// Retains the items whose canvas rectangle is in the current
    /// [`visible_canvas_rect`](Self::visible_canvas_rect).
    pub fn cull<K, I>(&self, items: I) -> impl Iterator<Item = (K, Rect)>
    where
        I: IntoIterator<Item = (K, Rect)>,
    {
        let bounds = self.visible_canvas_rect();
        items
            .into_iter()
            .filter(move |(_, rect)| is_in_view(*rect, bounds))
    }

    /// Recommends a render tier for the current scale.
    #[must_use]
    pub fn render_tier(&self) -> RenderTier {
        recommend_render_tier(self.transform.scale, self.config.low_fidelity_below)
    }

    /// Pans by a delta in screen pixels.
    ///
    /// This is a no-op while an artifact drag is active.
    pub fn pan_by(&mut self, delta: Vec2) {
        if self.item_drag || delta == Vec2::ZERO {
            return;
        }
        self.transform.translate += delta;
        self.move_version += 1;
    }

    /// Starts a pointer-drag pan at `pointer` (client space).
    ///
    /// Returns `false`, and does not start, while an artifact drag is active.
    pub fn begin_pan(&mut self, pointer: Point) -> bool {
        if self.item_drag {
            return false;
        }
        self.pan.begin(pointer, self.transform.translate);
        self.move_version += 1;
        true
    }

    /// Moves an active pointer-drag pan to `pointer`.
    pub fn update_pan(&mut self, pointer: Point) {
        if self.item_drag {
            return;
        }
        if let Some(translate) = self.pan.translate_for(pointer) {
            self.transform.translate = translate;
        }
    }

    /// Ends a pointer-drag pan.
    pub fn end_pan(&mut self) {
        self.pan.end();
    }

    /// Returns `true` while a pointer-drag pan is active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.is_active()
    }

    /// Marks the start of an artifact drag; panning is disabled until
    /// [`end_item_drag`](Self::end_item_drag). An active pan is ended.
    pub fn begin_item_drag(&mut self) {
        self.item_drag = true;
        self.pan.end();
    }

    /// Marks the end of an artifact drag.
    pub fn end_item_drag(&mut self) {
        self.item_drag = false;
    }

    /// Returns `true` while an artifact drag is active.
    #[must_use]
    pub fn is_item_dragging(&self) -> bool {
        self.item_drag
    }

    /// Zooms by `factor` around `anchor` (client space).
    ///
    /// The canvas point under the anchor stays under the anchor. The resulting
    /// scale is clamped to the configured limits.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old = self.transform.scale;
        let new = self.config.clamp_scale(old * factor);
        if (new - old).abs() < f64::EPSILON {
            return;
        }
        let local = anchor - self.container.origin().to_vec2();
        let canvas = self.transform.local_to_canvas(local);
        self.transform = Transform {
            scale: new,
            translate: local.to_vec2() - canvas.to_vec2() * new,
        };
        self.move_version += 1;
    }

    /// Fits `rect` (canvas space) into the container, centered, preserving
    /// aspect ratio, with the scale clamped to the configured limits.
    ///
    /// Empty rectangles and an empty container are ignored.
    pub fn fit_rect(&mut self, rect: Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let view = self.container.size();
        if view.width <= 0.0 || view.height <= 0.0 {
            return;
        }
        let sx = view.width / rect.width();
        let sy = view.height / rect.height();
        let scale = self.config.clamp_scale(sx.min(sy));
        self.transform = Transform {
            scale,
            translate: centering_translate(rect, view, scale),
        };
        self.move_version += 1;
    }

    /// Moves the camera to center `target` (canvas space) in a container of
    /// size `container`.
    ///
    /// This is the first pass of a focus move. The returned token must be
    /// passed to [`settle`](Self::settle) once the host has painted and can
    /// measure where the artifact actually landed. A later camera move
    /// supersedes the token.
    pub fn focus_on(
        &mut self,
        target: Rect,
        container: Size,
        options: &FocusOptions,
    ) -> PendingSettle {
        self.transform = focus_transform(target, container, options);
        self.move_version += 1;
        PendingSettle {
            version: self.move_version,
            container,
        }
    }

    /// Second pass of a focus move.
    ///
    /// `measured` is the artifact's actual on-screen rectangle, relative to
    /// the container origin, measured after the first pass was painted. The
    /// centering translation is recomputed from it at the current scale,
    /// within the container size given to [`focus_on`](Self::focus_on), and
    /// applied only if it differs from the current translation by more than
    /// [`SETTLE_TOLERANCE_PX`].
    pub fn settle(&mut self, pending: PendingSettle, measured: Rect) -> SettleOutcome {
        if pending.version != self.move_version {
            log::debug!(
                "dropping settle for move {} superseded by {}",
                pending.version,
                self.move_version
            );
            return SettleOutcome::Stale;
        }
        let current = self.transform;
        let actual = current.local_rect_to_canvas(measured);
        let translate = centering_translate(actual, pending.container, current.scale);
        let drift = translate - current.translate;
        if drift.x.abs() <= SETTLE_TOLERANCE_PX && drift.y.abs() <= SETTLE_TOLERANCE_PX {
            return SettleOutcome::Converged;
        }
        log::debug!("settle corrects focus by {drift:?}");
        self.transform.translate = translate;
        SettleOutcome::Corrected(self.transform)
    }

    /// Snapshot of the current view state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CanvasViewDebugInfo {
        CanvasViewDebugInfo {
            container: self.container,
            transform: self.transform,
            visible_canvas_rect: self.visible_canvas_rect(),
            render_tier: self.render_tier(),
            move_version: self.move_version,
            panning: self.pan.is_active(),
            item_dragging: self.item_drag,
        }
    }
}

/// Returns `true` if `item` intersects `bounds`. Touching edges count.
#[must_use]
pub fn is_in_view(item: Rect, bounds: Rect) -> bool {
    item.x0 <= bounds.x1 && item.x1 >= bounds.x0 && item.y0 <= bounds.y1 && item.y1 >= bounds.y0
}

/// Debug snapshot of a [`CanvasView`] state.
#[derive(Clone, Copy, Debug)]
pub struct CanvasViewDebugInfo {
    /// Container rectangle in client coordinates.
    pub container: Rect,
    /// Current transform.
    pub transform: Transform,
    /// Buffered canvas rectangle used for culling.
    pub visible_canvas_rect: Rect,
    /// Recommended render tier at the current scale.
    pub render_tier: RenderTier,
    /// Version of the latest camera move.
    pub move_version: u64,
    /// Whether a pointer-drag pan is active.
    pub panning: bool,
    /// Whether an artifact drag is active.
    pub item_dragging: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{CanvasView, is_in_view};

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let container = Rect::new(10.0, 20.0, 810.0, 620.0);
        let mut view = CanvasView::new(container);
        view.set_transform(0.8, 33.0, -12.0);

        let anchor = Point::new(300.0, 200.0);
        let before = view.screen_to_canvas(anchor, container);
        view.zoom_about(anchor, 2.0);
        let after = view.screen_to_canvas(anchor, container);

        assert!((view.scale() - 1.6).abs() < 1e-12);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut view = CanvasView::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        view.zoom_about(Point::ZERO, 1000.0);
        assert_eq!(view.scale(), view.config().max_scale);
        view.zoom_about(Point::ZERO, 1e-9);
        assert_eq!(view.scale(), view.config().min_scale);
        view.zoom_about(Point::ZERO, -2.0);
        assert_eq!(view.scale(), view.config().min_scale);
    }

    #[test]
    fn fit_rect_shows_whole_rect() {
        let container = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut view = CanvasView::new(container);
        let content = Rect::new(-50.0, -25.0, 50.0, 25.0);
        view.fit_rect(content);

        let visible = view.visible_bounds(200.0, 100.0, 0.0);
        assert!(visible.x0 <= content.x0 + 1e-9);
        assert!(visible.x1 >= content.x1 - 1e-9);
        assert!(visible.y0 <= content.y0 + 1e-9);
        assert!(visible.y1 >= content.y1 - 1e-9);
    }

    #[test]
    fn touching_edges_are_in_view() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(is_in_view(Rect::new(10.0, 10.0, 20.0, 20.0), bounds));
        assert!(!is_in_view(Rect::new(10.5, 0.0, 20.0, 5.0), bounds));
        assert!(is_in_view(Rect::new(-5.0, -5.0, 50.0, 50.0), bounds));
    }

    #[test]
    fn item_drag_disables_panning() {
        let mut view = CanvasView::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        view.begin_item_drag();
        view.pan_by(Vec2::new(10.0, 10.0));
        assert!(!view.begin_pan(Point::ZERO));
        assert_eq!(view.transform().translate, Vec2::ZERO);

        view.end_item_drag();
        view.pan_by(Vec2::new(10.0, 10.0));
        assert_eq!(view.transform().translate, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn item_drag_ends_active_pan() {
        let mut view = CanvasView::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(view.begin_pan(Point::new(5.0, 5.0)));
        view.begin_item_drag();
        assert!(!view.is_panning());
        view.update_pan(Point::new(50.0, 50.0));
        assert_eq!(view.transform().translate, Vec2::ZERO);
    }
}
