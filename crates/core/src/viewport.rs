//! Viewport dimensions and the narrow/wide size classes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The rectangle particles live in, `[0, width] × [0, height]`.
///
/// Dimensions are normalized on construction: negative, NaN, and infinite
/// values become 0. A viewport with a zero dimension is empty and nothing
/// drawn into it can be visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
}

/// Coarse viewport classification used to pick the particle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Narrow,
    Wide,
}

fn normalize(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: normalize(width),
            height: normalize(height),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// `(width, height)` as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Whether `point` lies in the closed rectangle `[0, width] × [0, height]`.
    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// `Narrow` when the width is strictly below `breakpoint`.
    pub fn size_class(&self, breakpoint: f64) -> SizeClass {
        if self.width < breakpoint {
            SizeClass::Narrow
        } else {
            SizeClass::Wide
        }
    }
}
