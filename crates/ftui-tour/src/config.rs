#![forbid(unsafe_code)]

//! Tour configuration as data.
//!
//! A [`TourConfig`] holds exactly what the property panel edits: the step
//! list and the tour-wide options, with placement and type kept as the raw
//! author strings. It loads from JSON (and TOML with the `toml-config`
//! feature) and normalizes into runtime types on demand.
//!
//! ```json
//! {
//!   "steps": [{ "target": "btn1", "title": "<b>Hi</b>", "placement": "top" }],
//!   "options": { "disabledInteraction": true, "type": "primary" }
//! }
//! ```
//!
//! Every field has a default, so `{}` is a valid (empty) tour. Unknown option
//! strings are reported by [`TourConfig::validate`] and otherwise treated as
//! unset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::runtime::{DisplayOptions, TourComp};
use crate::step::{Placement, StepConfig, TourType};

/// Tour-wide options as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsConfig {
    /// Show the directional pointer.
    pub arrow: bool,
    /// Suppress pointer interaction with the target.
    pub disabled_interaction: bool,
    /// Dim the background.
    pub mask: bool,
    /// Default placement, or "" for unset.
    pub placement: String,
    /// Default visual variant, or "" for unset.
    #[serde(rename = "type")]
    pub tour_type: String,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            arrow: true,
            disabled_interaction: false,
            mask: true,
            placement: String::new(),
            tour_type: String::new(),
        }
    }
}

/// Complete authored tour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Steps, in display order.
    pub steps: Vec<StepConfig>,
    /// Tour-wide options.
    pub options: OptionsConfig,
}

impl TourConfig {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(ConfigError::from)
            .map_err(Into::into)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::from)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s)
            .map_err(ConfigError::from)
            .map_err(Into::into)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::from)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(ConfigError::from)
            .map_err(Into::into)
    }

    /// Authoring problems worth surfacing in an editor.
    ///
    /// None of these stop the tour from running; an empty list means the
    /// configuration is clean.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !is_known_placement(&self.options.placement) {
            problems.push(format!(
                "options.placement: unknown placement {:?}",
                self.options.placement
            ));
        }
        if !is_known_type(&self.options.tour_type) {
            problems.push(format!(
                "options.type: unknown type {:?}",
                self.options.tour_type
            ));
        }

        for (i, step) in self.steps.iter().enumerate() {
            if step.target.is_empty() {
                problems.push(format!("steps[{i}].target: no target element"));
            }
            if !is_known_placement(&step.placement) {
                problems.push(format!(
                    "steps[{i}].placement: unknown placement {:?}",
                    step.placement
                ));
            }
            if !is_known_type(&step.step_type) {
                problems.push(format!(
                    "steps[{i}].type: unknown type {:?}",
                    step.step_type
                ));
            }
        }

        problems
    }

    /// Normalized tour-wide options.
    #[must_use]
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            arrow: self.options.arrow,
            disabled_interaction: self.options.disabled_interaction,
            mask: self.options.mask,
            placement: Placement::parse(&self.options.placement),
            tour_type: TourType::parse(&self.options.tour_type),
        }
    }
}

fn is_known_placement(raw: &str) -> bool {
    raw.is_empty() || Placement::ALL.iter().any(|p| p.as_str() == raw)
}

fn is_known_type(raw: &str) -> bool {
    matches!(raw, "" | "default" | "primary")
}

impl TourComp {
    /// Build a closed tour from configuration.
    #[must_use]
    pub fn from_config(config: &TourConfig) -> Self {
        Self::new(config.steps.clone(), config.display_options())
    }
}
