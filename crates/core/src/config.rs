//! Tunable constants for the particle background.
//!
//! [`BackdropConfig`] bundles every number and color the animator uses.
//! [`Default`] reproduces the look of a personal portfolio site: 50 blue particles
//! (25 on narrow screens), linked when closer than 100 px.
//!
//! Parsing from JSON is lenient: a missing key or a value of the wrong type
//! falls back to the default for that key, so a host page can pass a partial
//! object. Range problems are reported separately by [`BackdropConfig::validate`].

use serde_json::{json, Value};
use tracing::warn;

use crate::color::{Rgb, Rgba};
use crate::error::BackdropError;
use crate::viewport::SizeClass;

const DEFAULT_PARTICLE_COUNT: usize = 50;
const DEFAULT_NARROW_PARTICLE_COUNT: usize = 25;
const DEFAULT_NARROW_BREAKPOINT: f64 = 768.0;
const DEFAULT_MAX_SPEED: f64 = 0.5;
const DEFAULT_RADIUS_MIN: f64 = 2.0;
const DEFAULT_RADIUS_MAX: f64 = 4.0;
const DEFAULT_LINK_DISTANCE: f64 = 100.0;
const DEFAULT_LINK_MAX_ALPHA: f64 = 50.0 / 255.0;
const DEFAULT_LINK_WIDTH: f64 = 0.5;
const DEFAULT_FILL_ALPHA: f64 = 100.0 / 255.0;
const DEFAULT_COLOR: Rgb = Rgb::new(59, 130, 246);

/// Every tunable of the particle background.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropConfig {
    /// Particles on wide viewports.
    pub particle_count: usize,
    /// Particles on viewports narrower than `narrow_breakpoint`.
    pub narrow_particle_count: usize,
    /// Width below which a viewport counts as narrow.
    pub narrow_breakpoint: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Pairs strictly closer than this are linked.
    pub link_distance: f64,
    /// Link alpha at distance 0; falls linearly to 0 at `link_distance`.
    pub link_max_alpha: f64,
    pub link_width: f64,
    pub fill_color: Rgb,
    pub fill_alpha: f64,
    pub link_color: Rgb,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            narrow_particle_count: DEFAULT_NARROW_PARTICLE_COUNT,
            narrow_breakpoint: DEFAULT_NARROW_BREAKPOINT,
            max_speed: DEFAULT_MAX_SPEED,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: DEFAULT_RADIUS_MAX,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_max_alpha: DEFAULT_LINK_MAX_ALPHA,
            link_width: DEFAULT_LINK_WIDTH,
            fill_color: DEFAULT_COLOR,
            fill_alpha: DEFAULT_FILL_ALPHA,
            link_color: DEFAULT_COLOR,
        }
    }
}

impl BackdropConfig {
    /// Reads a config from a JSON object, falling back to defaults per key.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            particle_count: param_usize(params, "particle_count", d.particle_count),
            narrow_particle_count: param_usize(
                params,
                "narrow_particle_count",
                d.narrow_particle_count,
            ),
            narrow_breakpoint: param_f64(params, "narrow_breakpoint", d.narrow_breakpoint),
            max_speed: param_f64(params, "max_speed", d.max_speed),
            radius_min: param_f64(params, "radius_min", d.radius_min),
            radius_max: param_f64(params, "radius_max", d.radius_max),
            link_distance: param_f64(params, "link_distance", d.link_distance),
            link_max_alpha: param_f64(params, "link_max_alpha", d.link_max_alpha),
            link_width: param_f64(params, "link_width", d.link_width),
            fill_color: param_color(params, "fill_color", d.fill_color),
            fill_alpha: param_f64(params, "fill_alpha", d.fill_alpha),
            link_color: param_color(params, "link_color", d.link_color),
        }
    }

    /// Checks that every range is ordered and every value is usable.
    pub fn validate(&self) -> Result<(), BackdropError> {
        check_range("narrow_breakpoint", self.narrow_breakpoint, 0.0, f64::MAX)?;
        // Velocities are drawn from [-max_speed, max_speed); the span must stay finite.
        check_range("max_speed", self.max_speed, 0.0, f64::MAX / 2.0)?;
        check_range("radius_min", self.radius_min, 0.0, self.radius_max)?;
        check_range("radius_max", self.radius_max, self.radius_min, f64::MAX)?;
        check_range("link_distance", self.link_distance, 0.0, f64::MAX)?;
        check_range("link_max_alpha", self.link_max_alpha, 0.0, 1.0)?;
        check_range("link_width", self.link_width, 0.0, f64::MAX)?;
        check_range("fill_alpha", self.fill_alpha, 0.0, 1.0)?;
        Ok(())
    }

    /// Target particle count for fields created in a viewport of `class`.
    pub fn particle_count_for(&self, class: SizeClass) -> usize {
        match class {
            SizeClass::Narrow => self.narrow_particle_count,
            SizeClass::Wide => self.particle_count,
        }
    }

    pub fn fill(&self) -> Rgba {
        self.fill_color.with_alpha(self.fill_alpha)
    }

    /// Link color with alpha set for a link of the given strength.
    pub fn link(&self, alpha: f64) -> Rgba {
        self.link_color.with_alpha(alpha)
    }

    /// Current values as a JSON object, readable by [`BackdropConfig::from_json`].
    pub fn params(&self) -> Value {
        json!({
            "particle_count": self.particle_count,
            "narrow_particle_count": self.narrow_particle_count,
            "narrow_breakpoint": self.narrow_breakpoint,
            "max_speed": self.max_speed,
            "radius_min": self.radius_min,
            "radius_max": self.radius_max,
            "link_distance": self.link_distance,
            "link_max_alpha": self.link_max_alpha,
            "link_width": self.link_width,
            "fill_color": self.fill_color.to_hex(),
            "fill_alpha": self.fill_alpha,
            "link_color": self.link_color.to_hex(),
        })
    }

    /// Schema describing every key: type, default, range, and description.
    pub fn param_schema() -> Value {
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "description": "Particles on wide viewports"
            },
            "narrow_particle_count": {
                "type": "integer",
                "default": DEFAULT_NARROW_PARTICLE_COUNT,
                "min": 0,
                "description": "Particles on viewports narrower than narrow_breakpoint"
            },
            "narrow_breakpoint": {
                "type": "number",
                "default": DEFAULT_NARROW_BREAKPOINT,
                "min": 0.0,
                "description": "Viewport width below which the narrow count applies"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "description": "Velocity components are drawn from [-max_speed, max_speed)"
            },
            "radius_min": {
                "type": "number",
                "default": DEFAULT_RADIUS_MIN,
                "min": 0.0,
                "description": "Smallest particle radius"
            },
            "radius_max": {
                "type": "number",
                "default": DEFAULT_RADIUS_MAX,
                "min": 0.0,
                "description": "Largest particle radius"
            },
            "link_distance": {
                "type": "number",
                "default": DEFAULT_LINK_DISTANCE,
                "min": 0.0,
                "description": "Particles closer than this are joined by a line"
            },
            "link_max_alpha": {
                "type": "number",
                "default": DEFAULT_LINK_MAX_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Line alpha at distance 0, fading linearly to 0 at link_distance"
            },
            "link_width": {
                "type": "number",
                "default": DEFAULT_LINK_WIDTH,
                "min": 0.0,
                "description": "Line stroke width"
            },
            "fill_color": {
                "type": "color",
                "default": DEFAULT_COLOR.to_hex(),
                "description": "Particle fill color as #rrggbb"
            },
            "fill_alpha": {
                "type": "number",
                "default": DEFAULT_FILL_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Particle fill alpha"
            },
            "link_color": {
                "type": "color",
                "default": DEFAULT_COLOR.to_hex(),
                "description": "Line color as #rrggbb"
            }
        })
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), BackdropError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(BackdropError::InvalidRange {
            name: name.to_owned(),
            min,
            max,
        })
    }
}

/// `params[name]` as `f64`; integers are accepted.
fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a non-negative integer.
fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as a `"#rrggbb"` color. Unparseable strings are logged and ignored.
fn param_color(params: &Value, name: &str, default: Rgb) -> Rgb {
    let Some(raw) = params.get(name).and_then(Value::as_str) else {
        return default;
    };
    match Rgb::from_hex(raw) {
        Ok(color) => color,
        Err(err) => {
            warn!(key = name, %err, "ignoring unparseable color");
            default
        }
    }
}
