#![deny(unsafe_code)]
//! Core types for the particle-backdrop animated background.
//!
//! Provides the [`Particle`] record, the [`ParticleField`] with its
//! `create`/`advance`/`render` cycle, proximity [`Link`]s, the
//! [`DrawSurface`] seam with a [`Recorder`] implementation, the
//! [`Animator`] frame driver, [`BackdropConfig`], [`Viewport`] size classes,
//! reproducible [`Scene`]s, and colors.

pub mod animator;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod link;
pub mod particle;
pub mod scene;
pub mod surface;
pub mod viewport;

pub use animator::Animator;
pub use color::{Rgb, Rgba};
pub use config::BackdropConfig;
pub use error::BackdropError;
pub use field::ParticleField;
pub use glam::DVec2;
pub use link::Link;
pub use particle::Particle;
pub use scene::Scene;
pub use surface::{DrawCommand, DrawSurface, Recorder};
pub use viewport::{SizeClass, Viewport};
