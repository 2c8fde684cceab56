//! Exclusion policy: which classes and members are dropped from synthesized
//! declarations.

use crate::reference::{ClassReference, MemberReference};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A matched exclusion rule. `member_name` is `None` when the whole class is
/// excluded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedMember {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ExcludedMember {
    pub fn class(class_name: impl Into<String>) -> Self {
        ExcludedMember {
            class_name: class_name.into(),
            member_name: None,
            reason: None,
        }
    }

    pub fn member(class_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        ExcludedMember {
            class_name: class_name.into(),
            member_name: Some(member_name.into()),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// `Window.focus` or `Window` (plus the reason when one was given).
    pub fn describe(&self) -> String {
        let mut text = match &self.member_name {
            Some(member) => format!("{}.{}", self.class_name, member),
            None => self.class_name.clone(),
        };
        if let Some(reason) = &self.reason {
            text.push_str(" (");
            text.push_str(reason);
            text.push(')');
        }
        text
    }
}

impl fmt::Display for ExcludedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Decides whether a class or member is left out of the generated output.
pub trait ExclusionPolicy {
    fn is_excluded_class(&self, class: &ClassReference) -> Option<ExcludedMember>;

    fn is_excluded_member(
        &self,
        class: &ClassReference,
        member: &MemberReference,
    ) -> Option<ExcludedMember>;
}

/// Policy that keeps everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExclusions;

impl ExclusionPolicy for NoExclusions {
    fn is_excluded_class(&self, _class: &ClassReference) -> Option<ExcludedMember> {
        None
    }

    fn is_excluded_member(
        &self,
        _class: &ClassReference,
        _member: &MemberReference,
    ) -> Option<ExcludedMember> {
        None
    }
}
