//! Frame driver that owns a particle field and everything it depends on.
//!
//! A host's frame clock calls [`Animator::frame`] once per display frame and
//! [`Animator::resize`] whenever the window changes size. The animator keeps
//! the field, the viewport, the configuration, and the RNG used to refill
//! the field when the size class flips between narrow and wide.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::BackdropConfig;
use crate::field::ParticleField;
use crate::surface::DrawSurface;
use crate::viewport::{SizeClass, Viewport};

/// Owns one animated particle scene.
#[derive(Debug, Clone)]
pub struct Animator {
    field: ParticleField,
    viewport: Viewport,
    config: BackdropConfig,
    rng: SmallRng,
    frames: u64,
}

impl Animator {
    /// Creates an animator whose field size follows the viewport's size class.
    pub fn new(width: f64, height: f64, config: BackdropConfig, seed: u64) -> Self {
        let viewport = Viewport::new(width, height);
        let mut rng = SmallRng::seed_from_u64(seed);
        let count = config.particle_count_for(viewport.size_class(config.narrow_breakpoint));
        let field = ParticleField::create(viewport, count, &config, &mut rng);
        Self {
            field,
            viewport,
            config,
            rng,
            frames: 0,
        }
    }

    /// Uses an existing field as-is, e.g. a hand-built scene.
    pub fn with_field(
        field: ParticleField,
        width: f64,
        height: f64,
        config: BackdropConfig,
        seed: u64,
    ) -> Self {
        Self {
            field,
            viewport: Viewport::new(width, height),
            config,
            rng: SmallRng::seed_from_u64(seed),
            frames: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Frames drawn so far. Empty-viewport frames are not counted.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size_class(&self) -> SizeClass {
        self.viewport.size_class(self.config.narrow_breakpoint)
    }

    /// Runs one frame: clear, advance, render.
    ///
    /// With an empty viewport this is a no-op and issues no draw calls.
    pub fn frame(&mut self, surface: &mut dyn DrawSurface) {
        if self.viewport.is_empty() {
            return;
        }
        surface.clear();
        self.field.advance(self.viewport);
        self.field.render(surface, &self.config);
        self.frames += 1;
    }

    /// Handles a viewport size change.
    ///
    /// The surface is always resized. Crossing the narrow/wide breakpoint,
    /// or growing out of an empty viewport, rebuilds the field at the new
    /// class's count. Otherwise particles are left where they are, and any
    /// that now sit outside the smaller viewport re-enter through the
    /// ordinary wrap on the next [`Animator::frame`].
    pub fn resize(&mut self, width: f64, height: f64, surface: &mut dyn DrawSurface) {
        let previous = self.viewport;
        let old_class = self.size_class();
        self.viewport = Viewport::new(width, height);
        surface.resize(self.viewport);

        let new_class = self.size_class();
        let was_empty = previous.is_empty() && !self.viewport.is_empty();
        if new_class != old_class || was_empty {
            info!(
                ?old_class,
                ?new_class,
                width = self.viewport.width(),
                height = self.viewport.height(),
                "viewport size class changed, rebuilding particle field"
            );
            let count = self.config.particle_count_for(new_class);
            self.reconfigure(width, height, count);
        }
    }

    /// Discards the current field and samples `count` new particles in a
    /// `width × height` viewport.
    pub fn reconfigure(&mut self, width: f64, height: f64, count: usize) {
        self.viewport = Viewport::new(width, height);
        self.field = ParticleField::create(self.viewport, count, &self.config, &mut self.rng);
        info!(
            count = self.field.len(),
            width = self.viewport.width(),
            height = self.viewport.height(),
            "reconfigured particle field"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::surface::{DrawCommand, Recorder};
    use glam::DVec2;

    fn wide() -> Animator {
        Animator::new(1280.0, 720.0, BackdropConfig::default(), 42)
    }

    #[test]
    fn new_uses_wide_count_on_wide_viewport() {
        let a = wide();
        assert_eq!(a.size_class(), SizeClass::Wide);
        assert_eq!(a.field().len(), 50);
    }

    #[test]
    fn new_uses_narrow_count_below_breakpoint() {
        let a = Animator::new(400.0, 800.0, BackdropConfig::default(), 42);
        assert_eq!(a.size_class(), SizeClass::Narrow);
        assert_eq!(a.field().len(), 25);
    }

    #[test]
    fn frame_clears_then_draws() {
        let mut a = wide();
        let mut r = Recorder::new();
        a.frame(&mut r);
        assert_eq!(r.commands()[0], DrawCommand::Clear);
        assert_eq!(r.circles(), 50);
        assert_eq!(a.frames(), 1);
    }

    #[test]
    fn frame_advances_particles() {
        let field = ParticleField::from_particles(vec![Particle::new(
            DVec2::new(10.0, 10.0),
            DVec2::new(-1.0, 0.0),
            2.0,
        )]);
        let mut a = Animator::with_field(field, 800.0, 600.0, BackdropConfig::default(), 1);
        a.frame(&mut Recorder::new());
        assert_eq!(a.field().particles()[0].position, DVec2::new(9.0, 10.0));
    }

    #[test]
    fn frame_in_empty_viewport_draws_nothing() {
        let mut a = Animator::new(0.0, 0.0, BackdropConfig::default(), 1);
        let mut r = Recorder::new();
        a.frame(&mut r);
        assert!(r.commands().is_empty());
        assert_eq!(a.frames(), 0);
        assert!(a.field().is_empty());
    }

    #[test]
    fn frame_with_zero_particles_only_clears() {
        let config = BackdropConfig {
            particle_count: 0,
            ..BackdropConfig::default()
        };
        let mut a = Animator::new(1280.0, 720.0, config, 1);
        let mut r = Recorder::new();
        a.frame(&mut r);
        assert_eq!(r.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn resize_within_class_keeps_particles_in_place() {
        let mut a = wide();
        let before = a.field().clone();
        let mut r = Recorder::new();
        a.resize(1000.0, 500.0, &mut r);
        assert_eq!(a.field(), &before);
        assert_eq!(
            r.commands(),
            &[DrawCommand::Resize {
                viewport: Viewport::new(1000.0, 500.0)
            }]
        );
    }

    #[test]
    fn shrinking_resize_is_corrected_by_next_frame() {
        let field = ParticleField::from_particles(vec![
            Particle::new(DVec2::new(1200.0, 100.0), DVec2::new(-0.3, 0.0), 2.0),
            Particle::new(DVec2::new(100.0, 700.0), DVec2::new(0.0, 0.3), 2.0),
        ]);
        let mut a = Animator::with_field(field, 1280.0, 720.0, BackdropConfig::default(), 1);
        a.resize(900.0, 500.0, &mut Recorder::new());

        // Lazy policy: positions are untouched until the next step.
        assert_eq!(a.field().particles()[0].position, DVec2::new(1200.0, 100.0));
        assert!(!a.viewport().contains(a.field().particles()[0].position));

        a.frame(&mut Recorder::new());
        assert_eq!(a.field().particles()[0].position, DVec2::new(0.0, 100.0));
        assert_eq!(a.field().particles()[1].position, DVec2::new(100.0, 0.0));
        assert!(a
            .field()
            .particles()
            .iter()
            .all(|p| a.viewport().contains(p.position)));
    }

    #[test]
    fn resize_wide_to_narrow_rebuilds_with_narrow_count() {
        let mut a = wide();
        a.resize(500.0, 900.0, &mut Recorder::new());
        assert_eq!(a.size_class(), SizeClass::Narrow);
        assert_eq!(a.field().len(), 25);
        assert!(a
            .field()
            .particles()
            .iter()
            .all(|p| a.viewport().contains(p.position)));
    }

    #[test]
    fn resize_narrow_to_wide_rebuilds_with_wide_count() {
        let mut a = Animator::new(500.0, 900.0, BackdropConfig::default(), 3);
        a.resize(1024.0, 768.0, &mut Recorder::new());
        assert_eq!(a.field().len(), 50);
    }

    #[test]
    fn resize_out_of_empty_viewport_populates_field() {
        let mut a = Animator::new(0.0, 0.0, BackdropConfig::default(), 3);
        // 0 wide is narrow; 700 wide is still narrow but no longer empty.
        a.resize(700.0, 400.0, &mut Recorder::new());
        assert_eq!(a.field().len(), 25);
    }

    #[test]
    fn resize_to_empty_keeps_frames_silent() {
        let mut a = wide();
        a.resize(0.0, 0.0, &mut Recorder::new());
        let mut r = Recorder::new();
        a.frame(&mut r);
        assert!(r.commands().is_empty());
    }

    #[test]
    fn reconfigure_sets_exact_count_and_viewport() {
        let mut a = wide();
        a.reconfigure(300.0, 200.0, 7);
        assert_eq!(a.field().len(), 7);
        assert_eq!(a.viewport(), Viewport::new(300.0, 200.0));
        assert!(a
            .field()
            .particles()
            .iter()
            .all(|p| a.viewport().contains(p.position)));
    }

    #[test]
    fn reconfigure_to_zero_is_valid() {
        let mut a = wide();
        a.reconfigure(300.0, 200.0, 0);
        let mut r = Recorder::new();
        a.frame(&mut r);
        assert_eq!(r.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = wide();
        let mut b = wide();
        let mut ra = Recorder::new();
        let mut rb = Recorder::new();
        for _ in 0..20 {
            a.frame(&mut ra);
            b.frame(&mut rb);
        }
        assert_eq!(ra.commands(), rb.commands());
    }

    #[test]
    fn animator_drives_dyn_surface() {
        let mut a = wide();
        let mut r = Recorder::new();
        let surface: &mut dyn DrawSurface = &mut r;
        a.frame(surface);
        assert!(r.circles() > 0);
    }
}
