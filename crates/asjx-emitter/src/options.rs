//! Emitter configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Module system the emitted JavaScript targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Definitions are assigned into the enclosing namespace object.
    #[default]
    Goog,
    /// One `define(...)` module per unit, registered through the runtime.
    Amd,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitOptions {
    pub module_format: ModuleFormat,
    /// Module id of the class runtime, listed after `exports` in AMD output.
    pub runtime_module: String,
    /// Factory parameter bound to the runtime module.
    pub runtime_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            module_format: ModuleFormat::Goog,
            runtime_module: "runtime/AS3".to_string(),
            runtime_name: "AS3".to_string(),
        }
    }
}

impl EmitOptions {
    pub fn goog() -> Self {
        EmitOptions::default()
    }

    pub fn amd() -> Self {
        EmitOptions {
            module_format: ModuleFormat::Amd,
            ..EmitOptions::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse emit options")
    }
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
