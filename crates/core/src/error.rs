//! Error types for the particle-backdrop core.
//!
//! The per-frame path (`advance`, `render`, `Animator::frame`) never fails.
//! These errors only surface at the edges: parsing configuration, loading
//! scenes, and writing snapshots.

use thiserror::Error;

/// Errors produced while configuring or exporting a particle field.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// A scene or snapshot was requested with a zero or unrepresentable size.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A numeric setting fell outside its allowed range, or a min/max pair was inverted.
    #[error("invalid range for '{name}': expected {min} <= value <= {max}")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// A file could not be read or written.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = BackdropError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = BackdropError::InvalidColor("bad hex".into()).to_string();
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_range_includes_name_and_bounds() {
        let err = BackdropError::InvalidRange {
            name: "link_max_alpha".into(),
            min: 0.0,
            max: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("link_max_alpha"), "missing name in: {msg}");
        assert!(msg.contains('0'), "missing min in: {msg}");
        assert!(msg.contains('1'), "missing max in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = BackdropError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn backdrop_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BackdropError>();
    }

    #[test]
    fn backdrop_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<BackdropError>();
    }
}
