// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Geometry invariants that can be violated by callers (negative marker size,
//! inverted visibility range) are rejected here rather than clamped. Invariants
//! that the crate itself guarantees, such as the marker-space transform being
//! invertible, are never reported through this type: breaking them is a bug.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("SVG Error: {0}")]
    Svg(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// A box marker was given a negative width or height.
    #[error("Invalid marker size: {width} x {height}")]
    InvalidSize { width: f32, height: f32 },

    /// A visibility range whose start lies after its end.
    #[error("Invalid visibility range: {from}..={to}")]
    InvalidRange { from: usize, to: usize },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn invalid_size_mentions_both_dimensions() {
        let err = Error::InvalidSize {
            width: -4.0,
            height: 10.0,
        };
        let message = err.to_string();
        assert!(message.contains("-4"));
        assert!(message.contains("10"));
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn toml_parse_failure_becomes_config_error() {
        let parsed: std::result::Result<toml::Table, _> = toml::from_str("not = valid = toml");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
