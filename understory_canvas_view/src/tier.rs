// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How much effort to spend rendering an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderTier {
    /// A cheap placeholder (outline, title, thumbnail).
    Low,
    /// The full artifact payload.
    High,
}

/// Recommends a render tier for the given zoom `scale`.
///
/// Below `low_fidelity_below` the cheap tier is recommended regardless of
/// visibility: details are unreadable at that size anyway.
#[must_use]
pub fn recommend_render_tier(scale: f64, low_fidelity_below: f64) -> RenderTier {
    if scale < low_fidelity_below {
        RenderTier::Low
    } else {
        RenderTier::High
    }
}
