#![forbid(unsafe_code)]

//! Tour error model.
//!
//! Target resolution, materialization, and the open/closed state machine do
//! not fail: a missing or stale target degrades to a step without a
//! highlight. The errors here come from the edges, where a host calls into
//! the exposed surface or loads configuration.

use std::fmt;

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    Io(std::io::Error),
    /// JSON did not match the configuration shape.
    Json(serde_json::Error),
    /// TOML did not match the configuration shape.
    #[cfg(feature = "toml-config")]
    Toml(toml::de::Error),
}

/// Errors raised by the exposed tour surface.
#[derive(Debug)]
pub enum TourError {
    /// The host invoked a method the component does not expose.
    UnknownMethod(String),
    /// The host read or wrote a field the component does not expose.
    UnknownField(String),
    /// A written value had the wrong JSON type.
    InvalidValue {
        /// Field that was written.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },
    /// Parameters were passed to a method that takes fewer.
    UnexpectedParams {
        /// Method that was invoked.
        method: &'static str,
        /// Number of parameters received.
        got: usize,
    },
    /// Configuration could not be loaded.
    Config(ConfigError),
}

/// Standard result type for tour APIs.
pub type Result<T> = std::result::Result<T, TourError>;

impl TourError {
    /// Whether the error stems from a host calling the exposed surface
    /// incorrectly, as opposed to bad configuration input.
    #[must_use]
    pub fn is_host_error(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Error type label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnknownMethod(_) => "unknown_method",
            Self::UnknownField(_) => "unknown_field",
            Self::InvalidValue { .. } => "invalid_value",
            Self::UnexpectedParams { .. } => "unexpected_params",
            Self::Config(_) => "config",
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O error: {err}"),
            Self::Json(err) => write!(f, "config JSON error: {err}"),
            #[cfg(feature = "toml-config")]
            Self::Toml(err) => write!(f, "config TOML error: {err}"),
        }
    }
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMethod(name) => write!(f, "unknown method: {name}"),
            Self::UnknownField(name) => write!(f, "unknown exposed field: {name}"),
            Self::InvalidValue { field, expected } => {
                write!(f, "invalid value for {field}: expected {expected}")
            }
            Self::UnexpectedParams { method, got } => {
                write!(f, "{method} takes no parameters, got {got}")
            }
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            #[cfg(feature = "toml-config")]
            Self::Toml(err) => Some(err),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(feature = "toml-config")]
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

impl From<ConfigError> for TourError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
