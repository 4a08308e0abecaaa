//! Step sequencing.
//!
//! The wizard shows a different ordered step list per artifact type:
//! monthly plans skip the block/exercise editors in favour of the weekly
//! builder, so they run four steps where single and weekly artifacts
//! run five.

use serde::{Deserialize, Serialize};

use crate::model::ArtifactType;

/// Identity of one wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Pick a template or start from scratch
    Template,
    /// Build the block list (single) or day buckets (weekly)
    Blocks,
    /// Fill blocks with exercises
    Exercises,
    /// Assign weekly workouts to the plan's weeks (monthly only)
    WeeklyBuilder,
    /// Name and schedule the artifact (single/weekly)
    Schedule,
    /// Name and schedule the plan (monthly)
    NameSchedule,
    /// Optionally assign athletes
    Athletes,
}

/// One entry of the active step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    /// Step identity, drives validation and sub-view selection
    pub id: StepId,
    /// Full title shown in the step header
    pub title: &'static str,
    /// Short label for the step indicator
    pub short_title: &'static str,
}

impl StepDescriptor {
    const fn new(id: StepId, title: &'static str, short_title: &'static str) -> Self {
        Self { id, title, short_title }
    }
}

/// Ordered step list for the given artifact type.
///
/// Pure and deterministic: four steps for monthly plans, five for
/// single and weekly artifacts.
pub fn sequence(artifact_type: ArtifactType) -> Vec<StepDescriptor> {
    match artifact_type {
        ArtifactType::Monthly => vec![
            StepDescriptor::new(StepId::Template, "Choose a Template", "Template"),
            StepDescriptor::new(StepId::WeeklyBuilder, "Build the Month", "Weeks"),
            StepDescriptor::new(StepId::NameSchedule, "Name & Schedule", "Name"),
            StepDescriptor::new(StepId::Athletes, "Assign Athletes", "Athletes"),
        ],
        ArtifactType::Single | ArtifactType::Weekly => vec![
            StepDescriptor::new(StepId::Template, "Choose a Template", "Template"),
            StepDescriptor::new(StepId::Blocks, "Build Blocks", "Blocks"),
            StepDescriptor::new(StepId::Exercises, "Add Exercises", "Exercises"),
            StepDescriptor::new(StepId::Schedule, "Name & Schedule", "Schedule"),
            StepDescriptor::new(StepId::Athletes, "Assign Athletes", "Athletes"),
        ],
    }
}
