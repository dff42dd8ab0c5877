// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_canvas_view --heading-base-level=0

//! Understory Canvas View: a headless camera over an infinite canvas.
//!
//! [`CanvasView`] owns a uniform pan + zoom [`Transform`] and answers the
//! questions a canvas host asks every frame:
//!
//! - Where on the canvas is the pointer? ([`CanvasView::screen_to_canvas`])
//! - Which artifacts are worth rendering? ([`CanvasView::visible_bounds`],
//!   [`is_in_view`])
//! - How detailed should they be? ([`CanvasView::render_tier`])
//!
//! It also drives focus moves. Centering an artifact is done in two passes:
//! [`CanvasView::focus_on`] moves the camera using the artifact's computed
//! rectangle, and [`CanvasView::settle`] corrects any drift once the host has
//! measured where the artifact actually landed on screen. Every camera move
//! bumps a version, so a settle that arrives after the user has moved on is
//! dropped instead of yanking the view back.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_canvas_view::{CanvasView, FocusOptions, SettleOutcome};
//!
//! let container = Rect::new(0.0, 0.0, 1000.0, 800.0);
//! let mut view = CanvasView::new(container);
//!
//! let target = Rect::from_origin_size((100.0, 100.0), (200.0, 100.0));
//! let pending = view.focus_on(target, container.size(), &FocusOptions::default());
//! assert_eq!(view.transform().translate, Vec2::new(300.0, 250.0));
//!
//! // The host paints, then measures the artifact relative to the container.
//! let measured = Rect::from_origin_size((400.0, 350.0), (200.0, 100.0));
//! assert_eq!(view.settle(pending, measured), SettleOutcome::Converged);
//!
//! // Pointer positions map back onto the canvas.
//! let p = view.screen_to_canvas(Point::new(500.0, 400.0), container);
//! assert_eq!(p, Point::new(200.0, 150.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod focus;
mod pan;
mod tier;
mod transform;
mod view;

pub use config::ViewConfig;
pub use focus::{
    FocusOptions, PendingSettle, SETTLE_TOLERANCE_PX, SettleOutcome, focus_transform,
};
pub use pan::PanGesture;
pub use tier::{RenderTier, recommend_render_tier};
pub use transform::{MIN_SCALE_EPSILON, Transform};
pub use view::{CanvasView, CanvasViewDebugInfo, is_in_view};
