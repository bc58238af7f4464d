//! Proximity links between particles.
//!
//! Every unordered pair of distinct particles closer than the link distance
//! gets one line whose alpha fades linearly from the maximum at distance 0
//! to nothing at the link distance. This is the O(n²) part of a frame, which
//! is why narrow viewports get fewer particles.

use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// A line to draw between particles `a` and `b` (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub alpha: f64,
}

/// Alpha of a link at `distance`, or `None` when no line is drawn.
///
/// `max_alpha * (1 - distance / threshold)` for `distance < threshold`. A
/// non-positive threshold links nothing.
pub fn link_alpha(distance: f64, threshold: f64, max_alpha: f64) -> Option<f64> {
    if threshold > 0.0 && distance < threshold {
        Some(max_alpha * (1.0 - distance / threshold))
    } else {
        None
    }
}

/// The link between two particles, if any. Symmetric in its arguments apart
/// from the stored indices.
pub fn link_between(
    (ia, a): (usize, &Particle),
    (ib, b): (usize, &Particle),
    threshold: f64,
    max_alpha: f64,
) -> Option<Link> {
    if ia == ib {
        return None;
    }
    let distance = a.position.distance(b.position);
    link_alpha(distance, threshold, max_alpha).map(|alpha| Link {
        a: ia.min(ib),
        b: ia.max(ib),
        distance,
        alpha,
    })
}

/// All links among `particles`, visiting each unordered pair once.
pub fn links(
    particles: &[Particle],
    threshold: f64,
    max_alpha: f64,
) -> impl Iterator<Item = Link> + '_ {
    particles.iter().enumerate().flat_map(move |(i, a)| {
        particles[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, b)| {
                link_between((i, a), (i + 1 + offset, b), threshold, max_alpha)
            })
    })
}
