#![forbid(unsafe_code)]

//! Exposure layer: the data fields and methods a host application can reach.
//!
//! Values cross the boundary as `serde_json::Value`, the host's scripting
//! representation. Every exposed field is backed by one of the tour's
//! reactive cells, so a write here is indistinguishable from a write made
//! through the cell directly.
//!
//! | Field          | Cell           | JSON type |
//! |----------------|----------------|-----------|
//! | `value`        | `value`        | string    |
//! | `inputValue`   | `value`        | string    |
//! | `defaultValue` | `defaultValue` | string    |
//! | `open`         | `open`         | boolean   |
//! | `current`      | `current`      | number    |

use serde_json::Value;

use crate::error::{Result, TourError};
use crate::runtime::TourComp;

/// A parameter of an exposed method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamConfig {
    /// Parameter name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// An exposed, callable method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodConfig {
    /// Method name as the host calls it.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Accepted parameters.
    pub params: &'static [ParamConfig],
}

/// An exposed, named data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameConfig {
    /// Field name as the host reads it.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl NameConfig {
    /// Describe a field.
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// Surface a component registers with the host application.
pub trait Exposing {
    /// Callable methods.
    fn exposed_methods(&self) -> &'static [MethodConfig];

    /// Readable fields, in display order.
    fn exposing_configs(&self) -> &'static [NameConfig];

    /// Current value of a field.
    fn exposed_value(&self, name: &str) -> Option<Value>;

    /// Invoke a method.
    fn execute(&self, method: &str, params: &[Value]) -> Result<()>;

    /// Write a field.
    fn set_exposed(&self, name: &str, value: Value) -> Result<()>;

    /// All fields with their current values, in display order.
    fn exposing_values(&self) -> Vec<(&'static str, Value)> {
        self.exposing_configs()
            .iter()
            .filter_map(|cfg| self.exposed_value(cfg.name).map(|v| (cfg.name, v)))
            .collect()
    }
}

/// Method name of the start action.
pub const START_TOUR: &str = "startTour";

static TOUR_METHODS: [MethodConfig; 1] = [MethodConfig {
    name: START_TOUR,
    description: "Triggers the tour to start",
    params: &[],
}];

static TOUR_FIELDS: [NameConfig; 5] = [
    NameConfig::new("value", "The current value"),
    NameConfig::new("inputValue", "The value currently typed into the input"),
    NameConfig::new("defaultValue", "The initial value"),
    NameConfig::new("open", "Whether the tour is currently shown"),
    NameConfig::new("current", "Index of the step currently shown"),
];

fn expect_str(field: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(TourError::InvalidValue {
            field,
            expected: "string",
        }),
    }
}

impl Exposing for TourComp {
    fn exposed_methods(&self) -> &'static [MethodConfig] {
        &TOUR_METHODS
    }

    fn exposing_configs(&self) -> &'static [NameConfig] {
        &TOUR_FIELDS
    }

    fn exposed_value(&self, name: &str) -> Option<Value> {
        match name {
            "value" | "inputValue" => Some(Value::String(self.value_cell().get())),
            "defaultValue" => Some(Value::String(self.default_value_cell().get())),
            "open" => Some(Value::Bool(self.state().is_open())),
            "current" => Some(Value::from(self.current())),
            _ => None,
        }
    }

    fn execute(&self, method: &str, params: &[Value]) -> Result<()> {
        match method {
            START_TOUR => {
                if !params.is_empty() {
                    return Err(TourError::UnexpectedParams {
                        method: START_TOUR,
                        got: params.len(),
                    });
                }
                self.start_tour();
                Ok(())
            }
            other => {
                tracing::debug!(message = "tour.expose.unknown_method", method = other);
                Err(TourError::UnknownMethod(other.to_owned()))
            }
        }
    }

    fn set_exposed(&self, name: &str, value: Value) -> Result<()> {
        match name {
            "value" => self.value_cell().set(expect_str("value", value)?),
            "inputValue" => self.value_cell().set(expect_str("inputValue", value)?),
            "defaultValue" => self
                .default_value_cell()
                .set(expect_str("defaultValue", value)?),
            "open" => {
                let open = value.as_bool().ok_or(TourError::InvalidValue {
                    field: "open",
                    expected: "boolean",
                })?;
                self.set_open(open);
            }
            "current" => {
                let current = value
                    .as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or(TourError::InvalidValue {
                        field: "current",
                        expected: "non-negative integer",
                    })?;
                self.current_cell().set(current);
            }
            other => return Err(TourError::UnknownField(other.to_owned())),
        }
        Ok(())
    }
}
