//! Reproducible description of a rendered background.
//!
//! A [`Scene`] captures everything needed to recreate a particular frame:
//! viewport size, RNG seed, how many frames to run, and config overrides.

use serde::{Deserialize, Serialize};

use crate::animator::Animator;
use crate::config::BackdropConfig;
use crate::error::BackdropError;

/// Viewport, seed, frame count, and config overrides for one render.
///
/// Two identical scenes run on the same build produce identical draw calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    #[serde(default)]
    pub frames: u64,
    /// Partial [`BackdropConfig`] as JSON; missing keys take defaults.
    #[serde(default = "empty_object")]
    pub config: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// A scene with default config and zero frames.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            frames: 0,
            config: empty_object(),
        }
    }

    /// Rejects zero dimensions and configs with out-of-range values.
    pub fn validate(&self) -> Result<(), BackdropError> {
        if self.width == 0 || self.height == 0 {
            return Err(BackdropError::InvalidDimensions);
        }
        self.backdrop_config().validate()
    }

    pub fn backdrop_config(&self) -> BackdropConfig {
        BackdropConfig::from_json(&self.config)
    }

    /// Builds the animator this scene describes, before any frame has run.
    pub fn animator(&self) -> Result<Animator, BackdropError> {
        self.validate()?;
        Ok(Animator::new(
            f64::from(self.width),
            f64::from(self.height),
            self.backdrop_config(),
            self.seed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Recorder;
    use serde_json::json;

    #[test]
    fn new_has_default_config_and_no_frames() {
        let s = Scene::new(1280, 720, 42);
        assert_eq!(s.frames, 0);
        assert_eq!(s.config, json!({}));
        assert_eq!(s.backdrop_config(), BackdropConfig::default());
    }

    #[test]
    fn json_round_trip_with_overrides() {
        let mut s = Scene::new(800, 600, 7);
        s.frames = 120;
        s.config = json!({"particle_count": 10, "link_color": "#ffffff"});
        let text = serde_json::to_string_pretty(&s).unwrap();
        let restored: Scene = serde_json::from_str(&text).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_frames_and_config_take_defaults() {
        let s: Scene = serde_json::from_str(r#"{"width": 10, "height": 20, "seed": 1}"#).unwrap();
        assert_eq!(s, Scene::new(10, 20, 1));
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        assert!(matches!(
            Scene::new(0, 600, 1).validate(),
            Err(BackdropError::InvalidDimensions)
        ));
        assert!(Scene::new(800, 0, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_config() {
        let mut s = Scene::new(800, 600, 1);
        s.config = json!({"fill_alpha": 3.0});
        assert!(matches!(
            s.validate(),
            Err(BackdropError::InvalidRange { .. })
        ));
    }

    #[test]
    fn animator_applies_config_overrides() {
        let mut s = Scene::new(1280, 720, 1);
        s.config = json!({"particle_count": 9});
        let a = s.animator().unwrap();
        assert_eq!(a.field().len(), 9);
    }

    #[test]
    fn identical_scenes_draw_identically() {
        let s = Scene::new(640, 480, 99);
        let mut a = s.animator().unwrap();
        let mut b = s.clone().animator().unwrap();
        let mut ra = Recorder::new();
        let mut rb = Recorder::new();
        for _ in 0..10 {
            a.frame(&mut ra);
            b.frame(&mut rb);
        }
        assert_eq!(ra.commands(), rb.commands());
    }
}
