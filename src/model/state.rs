//! Accumulated wizard state and its mutation operations.
//!
//! `WorkflowState` is the single source of truth for one open wizard
//! session. Step sub-views never touch it directly; they go through the
//! accessors exposed by the controller, which delegate to the
//! invariant-preserving operations defined here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::artifact::{ArtifactMeta, ArtifactType};
use super::block::Block;
use super::week::{CopyDayOutcome, DayBlocks, WeekPlanEntry, WeekPlanField, Weekday};
use crate::error::{WizardError, WizardResult};

/// Number of week rows a fresh monthly plan starts with.
const DEFAULT_PLAN_WEEKS: u32 = 4;

/// Block content of the artifact under construction.
///
/// Tagged by container shape so the validator and persistence mapper can
/// branch exhaustively instead of sniffing nested JSON at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockContainer {
    /// Flat ordered list, used by single workouts
    FlatList(Vec<Block>),
    /// Day-keyed buckets, used by weekly artifacts
    DayMap(DayBlocks),
}

impl BlockContainer {
    /// Empty container of the shape the given artifact type uses.
    ///
    /// Monthly plans carry no block content of their own; they get the
    /// flat shape, which simply stays empty.
    pub fn for_artifact(artifact_type: ArtifactType) -> Self {
        match artifact_type {
            ArtifactType::Weekly => Self::DayMap(DayBlocks::new()),
            ArtifactType::Single | ArtifactType::Monthly => Self::FlatList(Vec::new()),
        }
    }

    /// Total block count across the container.
    pub fn total_blocks(&self) -> usize {
        match self {
            Self::FlatList(blocks) => blocks.len(),
            Self::DayMap(days) => days.total_blocks(),
        }
    }

    /// Total exercise count across the container.
    pub fn total_exercises(&self) -> usize {
        match self {
            Self::FlatList(blocks) => blocks.iter().map(|b| b.exercises.len()).sum(),
            Self::DayMap(days) => days.total_exercises(),
        }
    }

    /// Whether any block holds at least one exercise.
    pub fn has_any_exercise(&self) -> bool {
        self.total_exercises() > 0
    }
}

/// Accumulated state of one wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Kind of artifact being assembled
    pub artifact_type: ArtifactType,

    /// Index of the step currently shown
    pub current_step: usize,

    /// Indices of steps that have passed validation at least once
    pub completed_steps: BTreeSet<usize>,

    /// Name, schedule and template metadata
    pub meta: ArtifactMeta,

    /// Block content (single/weekly shapes)
    pub blocks: BlockContainer,

    /// Week rows (monthly shape only)
    pub week_plan: Vec<WeekPlanEntry>,

    /// Athletes the artifact will be assigned to on save
    pub selected_athletes: BTreeSet<String>,

    /// Whether a template / start-from-scratch choice has been made
    pub template_chosen: bool,

    /// Id of the artifact being edited, `None` when creating
    pub edit_target: Option<String>,
}

impl WorkflowState {
    /// Fresh state for a new artifact of the given type.
    pub fn new(artifact_type: ArtifactType) -> Self {
        Self {
            artifact_type,
            current_step: 0,
            completed_steps: BTreeSet::new(),
            meta: ArtifactMeta::default(),
            blocks: BlockContainer::for_artifact(artifact_type),
            week_plan: Self::default_week_plan(artifact_type),
            selected_athletes: BTreeSet::new(),
            template_chosen: false,
            edit_target: None,
        }
    }

    fn default_week_plan(artifact_type: ArtifactType) -> Vec<WeekPlanEntry> {
        match artifact_type {
            ArtifactType::Monthly => (1..=DEFAULT_PLAN_WEEKS).map(WeekPlanEntry::new).collect(),
            ArtifactType::Single | ArtifactType::Weekly => Vec::new(),
        }
    }

    /// Switch the artifact type, discarding all block and week-plan
    /// content. Metadata and athlete selection survive; step completion
    /// does not.
    pub fn reset_for(&mut self, artifact_type: ArtifactType) {
        self.artifact_type = artifact_type;
        self.blocks = BlockContainer::for_artifact(artifact_type);
        self.week_plan = Self::default_week_plan(artifact_type);
        self.completed_steps.clear();
        self.template_chosen = false;
    }

    /// Replace block content in exactly one container bucket.
    ///
    /// `day` must be given iff the container is day-keyed: a weekly
    /// artifact addresses one day bucket, a single workout the flat
    /// list. Everything else in the container is untouched.
    pub fn replace_blocks(
        &mut self,
        day: Option<Weekday>,
        blocks: Vec<Block>,
    ) -> WizardResult<()> {
        match (&mut self.blocks, day) {
            (BlockContainer::FlatList(list), None) => {
                *list = blocks;
                Ok(())
            }
            (BlockContainer::DayMap(days), Some(day)) => {
                days.set_blocks(day, blocks);
                Ok(())
            }
            (BlockContainer::FlatList(_), Some(day)) => Err(WizardError::InvalidOperation(
                format!("cannot address day '{}' on a flat block list", day.name()),
            )),
            (BlockContainer::DayMap(_), None) => Err(WizardError::InvalidOperation(
                "weekly block updates must name a day".to_string(),
            )),
        }
    }

    /// Deep-duplicate one day's blocks into another, with fresh ids.
    pub fn copy_day(&mut self, from: Weekday, to: Weekday) -> WizardResult<CopyDayOutcome> {
        match &mut self.blocks {
            BlockContainer::DayMap(days) => Ok(days.copy_day(from, to)),
            BlockContainer::FlatList(_) => Err(WizardError::InvalidOperation(
                "day copy is only available for weekly artifacts".to_string(),
            )),
        }
    }

    /// Flip a day's rest flag, clearing its blocks when marking rest.
    pub fn toggle_rest_day(&mut self, day: Weekday) -> WizardResult<bool> {
        match &mut self.blocks {
            BlockContainer::DayMap(days) => Ok(days.toggle_rest(day)),
            BlockContainer::FlatList(_) => Err(WizardError::InvalidOperation(
                "rest days are only available for weekly artifacts".to_string(),
            )),
        }
    }

    /// Update one field of the week row matching `week_number`. Other
    /// rows are unaffected.
    pub fn update_week_entry(&mut self, week_number: u32, field: WeekPlanField) -> WizardResult<()> {
        let entry = self
            .week_plan
            .iter_mut()
            .find(|entry| entry.week_number == week_number)
            .ok_or_else(|| {
                WizardError::InvalidOperation(format!("no week {week_number} in the plan"))
            })?;

        match field {
            WeekPlanField::WorkoutId(id) => entry.workout_id = id,
            WeekPlanField::RestWeek(flag) => entry.is_rest_week = flag,
        }
        Ok(())
    }

    /// Append a new training week and return its week number.
    pub fn add_week(&mut self) -> u32 {
        let next = self.week_plan.iter().map(|entry| entry.week_number).max().unwrap_or(0) + 1;
        self.week_plan.push(WeekPlanEntry::new(next));
        next
    }

    /// Remove the week row matching `week_number`.
    ///
    /// Rejected when it would leave the plan without any weeks. The
    /// remaining rows are renumbered so week numbers stay contiguous
    /// from 1.
    pub fn remove_week(&mut self, week_number: u32) -> WizardResult<()> {
        if self.week_plan.len() <= 1 {
            return Err(WizardError::InvalidOperation(
                "a plan must keep at least one week".to_string(),
            ));
        }
        let position = self
            .week_plan
            .iter()
            .position(|entry| entry.week_number == week_number)
            .ok_or_else(|| {
                WizardError::InvalidOperation(format!("no week {week_number} in the plan"))
            })?;
        self.week_plan.remove(position);
        for (index, entry) in self.week_plan.iter_mut().enumerate() {
            entry.week_number = index as u32 + 1;
        }
        Ok(())
    }

    /// Week numbers of non-rest weeks that still have no workout
    /// assigned. Used by the builder-step validation message.
    pub fn unassigned_weeks(&self) -> Vec<u32> {
        self.week_plan
            .iter()
            .filter(|entry| !entry.is_rest_week && entry.workout_id.is_empty())
            .map(|entry| entry.week_number)
            .collect()
    }
}
