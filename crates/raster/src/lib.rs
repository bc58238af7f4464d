#![deny(unsafe_code)]
//! Offline rendering for particle-backdrop.
//!
//! [`Raster`] is a software [`DrawSurface`](backdrop_core::DrawSurface) over an
//! RGBA8 buffer, and [`render_scene`] runs a [`Scene`] into one. The CLI uses
//! both to write PNG snapshots without a browser.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::Raster;

use backdrop_core::{BackdropError, DrawSurface, Rgba, Scene};

/// Runs `scene.frames` frames into a fresh raster and returns the last one.
///
/// With zero frames the field is drawn in its initial state.
pub fn render_scene(scene: &Scene, background: Rgba) -> Result<Raster, BackdropError> {
    let mut raster = Raster::new(scene.width, scene.height, background)?;
    let mut animator = scene.animator()?;
    if scene.frames == 0 {
        raster.clear();
        animator.field().render(&mut raster, animator.config());
    }
    for _ in 0..scene.frames {
        animator.frame(&mut raster);
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::Rgb;
    use serde_json::json;

    fn transparent() -> Rgba {
        Rgb::new(0, 0, 0).with_alpha(0.0)
    }

    fn painted(raster: &Raster) -> usize {
        raster.pixels().chunks(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn render_scene_has_scene_dimensions() {
        let raster = render_scene(&Scene::new(64, 48, 1), transparent()).unwrap();
        assert_eq!((raster.width(), raster.height()), (64, 48));
    }

    #[test]
    fn render_scene_with_zero_frames_draws_initial_field() {
        let raster = render_scene(&Scene::new(200, 200, 1), transparent()).unwrap();
        assert!(painted(&raster) > 0);
    }

    #[test]
    fn render_scene_without_particles_is_background_only() {
        let mut scene = Scene::new(200, 200, 1);
        scene.config = json!({"particle_count": 0, "narrow_particle_count": 0});
        scene.frames = 3;
        let raster = render_scene(&scene, transparent()).unwrap();
        assert_eq!(painted(&raster), 0);
    }

    #[test]
    fn render_scene_is_deterministic() {
        let mut scene = Scene::new(120, 90, 5);
        scene.frames = 30;
        let a = render_scene(&scene, transparent()).unwrap();
        let b = render_scene(&scene, transparent()).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn render_scene_rejects_unaddressable_size() {
        let scene = Scene::new(u32::MAX, u32::MAX, 1);
        assert!(matches!(
            render_scene(&scene, transparent()),
            Err(BackdropError::InvalidDimensions)
        ));
    }

    #[test]
    fn render_scene_rejects_invalid_scene() {
        assert!(render_scene(&Scene::new(0, 10, 1), transparent()).is_err());
        let mut scene = Scene::new(10, 10, 1);
        scene.config = json!({"link_max_alpha": 2.0});
        assert!(render_scene(&scene, transparent()).is_err());
    }
}
