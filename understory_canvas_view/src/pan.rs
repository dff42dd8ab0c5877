// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-drag panning state.

use kurbo::{Point, Vec2};

/// Tracks a pointer-drag pan of the canvas.
///
/// The gesture remembers where the pointer went down and what the translation
/// was at that moment, so each move yields an absolute translation rather than
/// accumulating per-event deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanGesture {
    start: Option<(Point, Vec2)>,
}

impl PanGesture {
    /// Starts a pan with the pointer at `pointer` and the canvas at `translate`.
    pub fn begin(&mut self, pointer: Point, translate: Vec2) {
        self.start = Some((pointer, translate));
    }

    /// Returns the translation for the pointer at `pointer`, or `None` when
    /// no pan is active.
    #[must_use]
    pub fn translate_for(&self, pointer: Point) -> Option<Vec2> {
        self.start
            .map(|(start_pointer, start_translate)| start_translate + (pointer - start_pointer))
    }

    /// Ends the pan.
    pub fn end(&mut self) {
        self.start = None;
    }

    /// Returns `true` while a pan is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}
