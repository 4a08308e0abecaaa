//! Workflow state machine.
//!
//! One `WorkflowController` owns one wizard session: the accumulated
//! [`WorkflowState`], the active step sequence, and the transition
//! rules. Step sub-views mutate state only through the accessors
//! exposed here.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{WizardError, WizardResult};
use crate::model::{
    ArtifactType, Block, CopyDayOutcome, WeekPlanField, Weekday, WorkflowState,
};
use crate::store::{TrainingStore, WorkoutRecord};

use super::events::{self, EventReceiver, EventSender, WizardEvent};
use super::loader;
use super::persist;
use super::steps::{sequence, StepDescriptor};
use super::validation::{check_step, StepCheck};

/// Drives one wizard session from first step to save.
pub struct WorkflowController {
    state: WorkflowState,
    steps: Vec<StepDescriptor>,
    store: Arc<dyn TrainingStore>,
    events: EventSender,
    saving: bool,
}

impl WorkflowController {
    /// Start a fresh session for a new artifact.
    ///
    /// Returns the controller and the receiving half of the session
    /// event channel; the host renders the notices arriving there.
    pub fn new(
        artifact_type: ArtifactType,
        store: Arc<dyn TrainingStore>,
    ) -> (Self, EventReceiver) {
        let (events, receiver) = events::channel();
        let controller = Self {
            state: WorkflowState::new(artifact_type),
            steps: sequence(artifact_type),
            store,
            events,
            saving: false,
        };
        (controller, receiver)
    }

    /// Start a session editing an existing artifact.
    ///
    /// A load failure is fatal: no controller is constructed, the
    /// wizard must not open half-populated.
    pub async fn for_edit(
        id: &str,
        store: Arc<dyn TrainingStore>,
    ) -> WizardResult<(Self, EventReceiver)> {
        let state = loader::load_for_edit(store.as_ref(), id).await?;
        let (events, receiver) = events::channel();
        let steps = sequence(state.artifact_type);
        Ok((Self { state, steps, store, events, saving: false }, receiver))
    }

    /// The accumulated session state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The active step sequence.
    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    /// The step currently shown.
    pub fn current_step(&self) -> &StepDescriptor {
        &self.steps[self.state.current_step]
    }

    /// Zero-based index of the current step.
    pub fn current_index(&self) -> usize {
        self.state.current_step
    }

    /// Whether the session sits on the terminal step.
    pub fn is_last_step(&self) -> bool {
        self.state.current_step + 1 == self.steps.len()
    }

    /// Whether a save is in flight. The host must disable the save
    /// action while this is true.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Switch the artifact type, re-deriving the step sequence.
    ///
    /// Block and week-plan content is discarded, the completed set is
    /// cleared and the cursor returns to the first step: the new
    /// sequence's gates all have to pass again, so a partially walked
    /// session can never land within reach of `save` for a type it was
    /// never validated against.
    pub fn set_artifact_type(&mut self, artifact_type: ArtifactType) {
        if artifact_type == self.state.artifact_type {
            return;
        }
        tracing::debug!(
            old = self.state.artifact_type.name(),
            new = artifact_type.name(),
            "artifact type changed"
        );
        self.state.reset_for(artifact_type);
        self.steps = sequence(artifact_type);
        self.state.current_step = 0;
    }

    /// Validate the current step and advance on success.
    ///
    /// On failure a [`WizardEvent::StepIncomplete`] notice is emitted
    /// and the cursor stays put. Returns whether the step advanced.
    pub fn next(&mut self) -> bool {
        let step = self.steps[self.state.current_step];
        match check_step(step.id, &self.state) {
            StepCheck::Complete => {
                self.state.completed_steps.insert(self.state.current_step);
                self.state.current_step =
                    (self.state.current_step + 1).min(self.steps.len() - 1);
                tracing::debug!(step = ?step.id, index = self.state.current_step, "advanced");
                true
            }
            StepCheck::Incomplete { message } => {
                tracing::debug!(step = ?step.id, %message, "step incomplete");
                let _ = self
                    .events
                    .send(WizardEvent::StepIncomplete { step: step.id, message });
                false
            }
        }
    }

    /// Go back one step. Never validated, clamped at the first step.
    pub fn previous(&mut self) {
        self.state.current_step = self.state.current_step.saturating_sub(1);
    }

    /// Jump to an arbitrary step via the step indicator.
    ///
    /// Permitted for any step at or before the cursor, and for a
    /// forward step whose immediate predecessor has been completed at
    /// some point. Anything else is a no-op. Returns whether the jump
    /// happened.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            return false;
        }
        let allowed = index <= self.state.current_step
            || self.state.completed_steps.contains(&(index - 1));
        if allowed {
            self.state.current_step = index;
        }
        allowed
    }

    /// Persist the accumulated state. Only invocable from the last
    /// step, and only while no other save is pending.
    ///
    /// The exclusive borrow already serializes calls on one controller;
    /// the pending guard additionally covers a `save` future dropped
    /// mid-flight, which leaves the session marked saving with the
    /// store call's outcome unknown.
    ///
    /// On success the session is done and the host navigates away; on
    /// failure the session stays on the last step with all state intact
    /// so the user can retry without re-entering anything.
    pub async fn save(&mut self) -> WizardResult<String> {
        if !self.is_last_step() {
            return Err(WizardError::InvalidOperation(
                "save is only available from the last step".to_string(),
            ));
        }
        if self.saving {
            return Err(WizardError::InvalidOperation("a save is already in flight".to_string()));
        }

        self.saving = true;
        let result = persist::save_artifact(self.store.as_ref(), &self.state, &self.events).await;
        self.saving = false;

        match result {
            Ok(id) => {
                let _ = self.events.send(WizardEvent::Saved { id: id.clone() });
                Ok(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "save failed");
                let _ = self.events.send(WizardEvent::SaveFailed { message: e.to_string() });
                Err(e)
            }
        }
    }

    /// Templates the template step can offer: the coach's reusable
    /// artifacts of the active kind. For monthly plans this lists the
    /// weekly templates the builder step references.
    pub async fn available_templates(&self, owner_id: &str) -> WizardResult<Vec<WorkoutRecord>> {
        let kind = match self.state.artifact_type {
            ArtifactType::Monthly => ArtifactType::Weekly,
            other => other,
        };
        self.store
            .list_workout_templates(owner_id, kind.name())
            .await
            .map_err(WizardError::TemplateFetch)
    }

    // ----- metadata accessors -------------------------------------------------

    /// Set the artifact name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.meta.name = name.into();
    }

    /// Set or clear the scheduled date.
    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.state.meta.date = date;
    }

    /// Set or clear the scheduled time.
    pub fn set_time(&mut self, time: Option<String>) {
        self.state.meta.time = time;
    }

    /// Set or clear the expected duration in minutes.
    pub fn set_duration(&mut self, minutes: Option<u32>) {
        self.state.meta.duration = minutes;
    }

    /// Set or clear the location.
    pub fn set_location(&mut self, location: Option<String>) {
        self.state.meta.location = location;
    }

    /// Mark whether the artifact is a reusable template.
    pub fn set_is_template(&mut self, is_template: bool) {
        self.state.meta.is_template = is_template;
    }

    /// Record that a template / start-from-scratch choice was made.
    pub fn choose_template(&mut self) {
        self.state.template_chosen = true;
    }

    /// Toggle one athlete in the assignment selection.
    pub fn toggle_athlete(&mut self, athlete_id: impl Into<String>) {
        let athlete_id = athlete_id.into();
        if !self.state.selected_athletes.remove(&athlete_id) {
            self.state.selected_athletes.insert(athlete_id);
        }
    }

    // ----- content accessors --------------------------------------------------

    /// Replace block content in one container bucket.
    pub fn replace_blocks(
        &mut self,
        day: Option<Weekday>,
        blocks: Vec<Block>,
    ) -> WizardResult<()> {
        self.state.replace_blocks(day, blocks)
    }

    /// Deep-duplicate one day's blocks into another.
    pub fn copy_day(&mut self, from: Weekday, to: Weekday) -> WizardResult<CopyDayOutcome> {
        self.state.copy_day(from, to)
    }

    /// Flip a day's rest flag.
    pub fn toggle_rest_day(&mut self, day: Weekday) -> WizardResult<bool> {
        self.state.toggle_rest_day(day)
    }

    /// Update one field of one week row.
    pub fn update_week_entry(
        &mut self,
        week_number: u32,
        field: WeekPlanField,
    ) -> WizardResult<()> {
        self.state.update_week_entry(week_number, field)
    }

    /// Append a new training week, returning its number.
    pub fn add_week(&mut self) -> u32 {
        self.state.add_week()
    }

    /// Remove one week row.
    pub fn remove_week(&mut self, week_number: u32) -> WizardResult<()> {
        self.state.remove_week(week_number)
    }
}
