//! Artifact type and shared metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of training artifact being assembled.
///
/// Chosen once per session on the first wizard step. Changing it resets
/// all block and week-plan state and re-derives the step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    /// One standalone workout
    Single,
    /// A seven-day plan with per-day block buckets
    Weekly,
    /// A four-to-six-week plan referencing weekly artifacts
    Monthly,
}

impl ArtifactType {
    /// Lowercase display/wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Name, schedule and template metadata shared by every artifact type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Display name of the artifact
    #[serde(default)]
    pub name: String,

    /// Scheduled date (ignored for templates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Scheduled start time, free-form "HH:MM"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Expected duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    /// Training location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Whether the artifact is saved for reuse rather than scheduled
    #[serde(default)]
    pub is_template: bool,
}

impl ArtifactMeta {
    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the scheduled date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Mark the artifact as a reusable template.
    #[must_use]
    pub fn as_template(mut self) -> Self {
        self.is_template = true;
        self
    }
}
