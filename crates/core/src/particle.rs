//! A single drifting point.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::BackdropConfig;
use crate::viewport::Viewport;

/// One particle: where it is, how it moves, how big it is drawn.
///
/// Velocity and radius are fixed at creation. Only `position` changes, once
/// per [`Particle::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Samples a particle uniformly: position inside `viewport`, velocity
    /// components in `[-max_speed, max_speed)`, radius in `[radius_min, radius_max)`.
    ///
    /// Degenerate ranges (zero-width viewport axis, zero speed, equal radius
    /// bounds) yield the lower bound instead of panicking.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: &BackdropConfig) -> Self {
        let position = DVec2::new(
            sample(rng, 0.0, viewport.width()),
            sample(rng, 0.0, viewport.height()),
        );
        let velocity = DVec2::new(
            sample(rng, -config.max_speed, config.max_speed),
            sample(rng, -config.max_speed, config.max_speed),
        );
        let radius = sample(rng, config.radius_min, config.radius_max);
        Self::new(position, velocity, radius)
    }

    /// Moves by one velocity step, then wraps each axis to the opposite edge.
    pub fn advance(&mut self, viewport: Viewport) {
        self.position += self.velocity;
        self.position.x = wrap(self.position.x, viewport.width());
        self.position.y = wrap(self.position.y, viewport.height());
    }
}

/// Reset-to-opposite-edge wrap.
///
/// Below 0 jumps exactly to `extent`; above `extent` jumps exactly to 0.
/// The overflow is discarded, unlike a modulo wrap.
pub fn wrap(coord: f64, extent: f64) -> f64 {
    if coord < 0.0 {
        extent
    } else if coord > extent {
        0.0
    } else {
        coord
    }
}

/// Uniform in `[low, high)`, or `low` when the range is empty or its span overflows.
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low < high && (high - low).is_finite() {
        rng.gen_range(low..high)
    } else {
        low
    }
}
