//! CLI errors mapped to exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: scene or config rejected (bad dimensions, out-of-range values)
//! - 11: I/O error (reading a scene file, writing a PNG)
//! - 12: input error (malformed --config JSON, bad --background color)
//! - 13: serialization error

use backdrop_core::BackdropError;
use std::fmt;

/// Errors produced by CLI operations, each with its own exit code.
#[derive(Debug)]
pub enum CliError {
    /// The scene or config was rejected by the core.
    Config(BackdropError),
    /// A file could not be read or written.
    Io(String),
    /// A flag value could not be parsed.
    Input(String),
    /// JSON output failed.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<BackdropError> for CliError {
    fn from(e: BackdropError) -> Self {
        match e {
            BackdropError::Io(msg) => CliError::Io(msg),
            BackdropError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Config(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_exit_code_is_10() {
        assert_eq!(CliError::Config(BackdropError::InvalidDimensions).exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad json".into()).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn from_backdrop_io_routes_to_cli_io() {
        let err = CliError::from(BackdropError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn from_backdrop_color_routes_to_input() {
        let err = CliError::from(BackdropError::InvalidColor("#zz".into()));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn from_backdrop_range_routes_to_config() {
        let err = CliError::from(BackdropError::InvalidRange {
            name: "fill_alpha".into(),
            min: 0.0,
            max: 1.0,
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("fill_alpha"));
    }

    #[test]
    fn from_std_io_error_routes_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such scene");
        let err = CliError::from(io);
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("no such scene"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 13);
    }
}
