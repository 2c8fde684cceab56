//! Externs pass configuration.
//!
//! Loaded from a JSON file (camelCase keys):
//!
//! ```json
//! {
//!   "asRoot": "generated/as",
//!   "externs": ["svg.js"],
//!   "excludes": [
//!     { "class": "Window", "member": "focus", "reason": "conflicts" },
//!     { "class": "Arguments" }
//!   ]
//! }
//! ```

use crate::exclusion::{ExcludedMember, ExclusionPolicy};
use crate::reference::{ClassReference, MemberReference};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One `excludes` entry. No `member` means the whole class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludeEntry {
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ExcludeEntry {
    fn to_excluded(&self) -> ExcludedMember {
        ExcludedMember {
            class_name: self.class_name.clone(),
            member_name: self.member.clone(),
            reason: self.reason.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternsConfig {
    /// Output root for synthesized ActionScript declarations.
    #[serde(default)]
    pub as_root: Option<PathBuf>,
    /// Externs files, processed in order.
    #[serde(default)]
    pub externs: Vec<PathBuf>,
    #[serde(default)]
    pub excludes: Vec<ExcludeEntry>,
}

impl ExternsConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("failed to parse externs config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read externs config {}", path.display()))?;
        let config: ExternsConfig = serde_json::from_str(&source)
            .with_context(|| format!("failed to parse externs config {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            externs = config.externs.len(),
            excludes = config.excludes.len(),
            "loaded externs config"
        );
        Ok(config)
    }

    pub fn exclude_class(mut self, class_name: impl Into<String>) -> Self {
        self.excludes.push(ExcludeEntry {
            class_name: class_name.into(),
            member: None,
            reason: None,
        });
        self
    }

    pub fn exclude_member(
        mut self,
        class_name: impl Into<String>,
        member: impl Into<String>,
        reason: Option<&str>,
    ) -> Self {
        self.excludes.push(ExcludeEntry {
            class_name: class_name.into(),
            member: Some(member.into()),
            reason: reason.map(str::to_string),
        });
        self
    }
}

impl ExclusionPolicy for ExternsConfig {
    fn is_excluded_class(&self, class: &ClassReference) -> Option<ExcludedMember> {
        self.excludes
            .iter()
            .find(|entry| entry.member.is_none() && entry.class_name == class.qualified_name())
            .map(ExcludeEntry::to_excluded)
    }

    fn is_excluded_member(
        &self,
        class: &ClassReference,
        member: &MemberReference,
    ) -> Option<ExcludedMember> {
        self.excludes
            .iter()
            .find(|entry| {
                entry.class_name == class.qualified_name()
                    && entry.member.as_deref() == Some(member.name())
            })
            .map(ExcludeEntry::to_excluded)
    }
}
