//! The particle field: a fixed collection of particles advanced and drawn
//! once per frame.

use rand::Rng;
use tracing::debug;

use crate::config::BackdropConfig;
use crate::link::{links, Link};
use crate::particle::Particle;
use crate::surface::DrawSurface;
use crate::viewport::Viewport;

/// An ordered, fixed-size set of particles.
///
/// The count never changes after construction. Replacing the field (see
/// [`crate::Animator::reconfigure`]) is the only way to get a different count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Samples `count` particles inside `viewport`.
    ///
    /// An empty viewport yields an empty field, since nothing placed in it
    /// could ever be visible.
    pub fn create<R: Rng + ?Sized>(
        viewport: Viewport,
        count: usize,
        config: &BackdropConfig,
        rng: &mut R,
    ) -> Self {
        if viewport.is_empty() {
            debug!(count, "empty viewport, creating empty field");
            return Self::default();
        }
        let particles = (0..count)
            .map(|_| Particle::random(rng, viewport, config))
            .collect();
        debug!(
            count,
            width = viewport.width(),
            height = viewport.height(),
            "created particle field"
        );
        Self { particles }
    }

    /// Wraps an explicit particle list, e.g. a hand-built test scene.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Moves every particle one step and wraps it back into `viewport`.
    ///
    /// Afterwards every position lies in `[0, width] × [0, height]`.
    pub fn advance(&mut self, viewport: Viewport) {
        for particle in &mut self.particles {
            particle.advance(viewport);
        }
    }

    /// Links between particles currently closer than `config.link_distance`.
    pub fn links<'a>(&'a self, config: &BackdropConfig) -> impl Iterator<Item = Link> + 'a {
        links(&self.particles, config.link_distance, config.link_max_alpha)
    }

    /// Draws every particle, then every link. Does not clear the surface
    /// and does not mutate the field.
    pub fn render(&self, surface: &mut dyn DrawSurface, config: &BackdropConfig) {
        let fill = config.fill();
        for p in &self.particles {
            surface.fill_circle(p.position, p.radius, fill);
        }
        for link in self.links(config) {
            let from = self.particles[link.a].position;
            let to = self.particles[link.b].position;
            surface.line(from, to, config.link(link.alpha), config.link_width);
        }
    }
}
