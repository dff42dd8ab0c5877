// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tunables for [`CanvasView`](crate::CanvasView).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Smallest scale reachable through [`zoom_about`](crate::CanvasView::zoom_about)
    /// and [`fit_rect`](crate::CanvasView::fit_rect).
    pub min_scale: f64,
    /// Largest scale reachable through [`zoom_about`](crate::CanvasView::zoom_about)
    /// and [`fit_rect`](crate::CanvasView::fit_rect).
    pub max_scale: f64,
    /// Below this scale the cheap render tier is recommended.
    pub low_fidelity_below: f64,
    /// Margin, in canvas units, added around the visible canvas rectangle
    /// when culling.
    pub cull_buffer: f64,
}

impl Default for ViewConfig {
    /// Scale limits `[0.05, 4.0]`, low fidelity below `0.4`, `200px` cull buffer.
    fn default() -> Self {
        Self {
            min_scale: 0.05,
            max_scale: 4.0,
            low_fidelity_below: 0.4,
            cull_buffer: 200.0,
        }
    }
}

impl ViewConfig {
    /// Sets the scale limits.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`, and
    /// the lower bound is kept positive.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale.max(crate::MIN_SCALE_EPSILON);
        self.max_scale = max_scale.max(self.min_scale);
    }

    pub(crate) fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale.max(self.min_scale))
    }
}

#[cfg(test)]
mod tests {
    use super::ViewConfig;
    use crate::MIN_SCALE_EPSILON;

    #[test]
    fn limits_are_normalized() {
        let mut config = ViewConfig::default();
        config.set_scale_limits(8.0, 0.5);
        assert_eq!((config.min_scale, config.max_scale), (0.5, 8.0));

        config.set_scale_limits(-1.0, -2.0);
        assert_eq!(config.min_scale, MIN_SCALE_EPSILON);
        assert_eq!(config.max_scale, MIN_SCALE_EPSILON);
    }
}
