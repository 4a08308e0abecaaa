//! Persistence mapping.
//!
//! Reduces the accumulated [`WorkflowState`] into one of three divergent
//! save payloads and drives the save call: create versus update is
//! decided purely by the presence of an edit-target id, and the two
//! secondary operations (template flagging, athlete assignment) are
//! best-effort — their failure is surfaced as a warning, never a
//! rollback of the already-committed artifact.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{WizardError, WizardResult};
use crate::model::{ArtifactType, BlockContainer, Exercise, WeekPlanEntry, WorkflowState};
use crate::store::TrainingStore;

use super::events::{EventSender, WizardEvent};

/// Persisted body of a single or weekly workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutBody {
    /// Display name
    pub name: String,

    /// Artifact kind, `single` or `weekly`
    #[serde(rename = "type")]
    pub kind: ArtifactType,

    /// Template taxonomy, mirrors `kind`
    pub template_type: ArtifactType,

    /// Scheduled date, null for templates
    pub date: Option<NaiveDate>,

    /// Scheduled time, null for templates
    pub time: Option<String>,

    /// Duration in minutes, null for templates
    pub duration: Option<u32>,

    /// Location, null for templates
    pub location: Option<String>,

    /// Whether the workout is a reusable template
    pub is_template: bool,

    /// Block content serialized as one JSON value: a flat block list
    /// for single workouts, the full day map for weekly ones
    pub blocks: serde_json::Value,

    /// Auto-generated content summary
    pub description: String,

    /// Flattened exercise list (single workouts only; weekly detail
    /// lives inside `blocks`)
    pub exercises: Vec<Exercise>,
}

/// Persisted body of a monthly training plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBody {
    /// Display name
    pub name: String,

    /// Auto-generated summary counting training weeks
    pub description: String,

    /// Calendar month the plan targets, 1-12
    pub month: u32,

    /// Calendar year the plan targets
    pub year: i32,

    /// Week rows; rest weeks carry an empty workout reference
    pub weeks: Vec<WeekPlanEntry>,
}

/// A payload ready for the backing store, tagged by collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SavePayload {
    /// Goes to the workouts collection
    Workout(WorkoutBody),
    /// Goes to the training-plans collection
    Plan(PlanBody),
}

impl SavePayload {
    /// Name of the collection this payload targets.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Workout(_) => "workouts",
            Self::Plan(_) => "training_plans",
        }
    }
}

/// Build the save payload for the accumulated state.
///
/// Pure apart from the "now" default for an unset monthly date.
pub fn build_payload(state: &WorkflowState) -> WizardResult<SavePayload> {
    match state.artifact_type {
        ArtifactType::Single | ArtifactType::Weekly => {
            Ok(SavePayload::Workout(build_workout_body(state)?))
        }
        ArtifactType::Monthly => Ok(SavePayload::Plan(build_plan_body(state))),
    }
}

fn build_workout_body(state: &WorkflowState) -> WizardResult<WorkoutBody> {
    let (blocks, description, exercises) = match &state.blocks {
        BlockContainer::FlatList(blocks) => {
            let flattened: Vec<Exercise> =
                blocks.iter().flat_map(|block| block.exercises.iter().cloned()).collect();
            let description =
                format!("{} blocks, {} exercises", blocks.len(), flattened.len());
            (serde_json::to_value(blocks)?, description, flattened)
        }
        BlockContainer::DayMap(days) => {
            let description =
                format!("{} blocks, {} exercises", days.total_blocks(), days.total_exercises());
            // Exercise detail lives inside the day map only.
            (serde_json::to_value(days)?, description, Vec::new())
        }
    };

    // Templates are reusable: they carry no concrete schedule.
    let meta = &state.meta;
    let (date, time, duration, location) = if meta.is_template {
        (None, None, None, None)
    } else {
        (meta.date, meta.time.clone(), meta.duration, meta.location.clone())
    };

    Ok(WorkoutBody {
        name: meta.name.clone(),
        kind: state.artifact_type,
        template_type: state.artifact_type,
        date,
        time,
        duration,
        location,
        is_template: meta.is_template,
        blocks,
        description,
        exercises,
    })
}

fn build_plan_body(state: &WorkflowState) -> PlanBody {
    // A rest week never persists a workout reference, even if one was
    // selected before the rest checkbox was ticked.
    let weeks: Vec<WeekPlanEntry> = state
        .week_plan
        .iter()
        .map(|entry| {
            let mut week = entry.clone();
            if week.is_rest_week {
                week.workout_id.clear();
            }
            week
        })
        .collect();

    let training_weeks = weeks.iter().filter(|week| !week.is_rest_week).count();
    let target = state.meta.date.unwrap_or_else(|| Local::now().date_naive());

    PlanBody {
        name: state.meta.name.clone(),
        description: format!("{}-week plan, {} training weeks", weeks.len(), training_weeks),
        month: target.month(),
        year: target.year(),
        weeks,
    }
}

/// Persist the accumulated state.
///
/// Creates or updates depending on the edit-target id, then runs the
/// best-effort secondary operations. Returns the id of the committed
/// artifact. Secondary failures emit [`WizardEvent::Warning`] and a
/// `warn` log but never fail the save.
pub async fn save_artifact(
    store: &dyn TrainingStore,
    state: &WorkflowState,
    events: &EventSender,
) -> WizardResult<String> {
    let payload = build_payload(state)?;
    tracing::debug!(collection = payload.collection(), "saving artifact");

    let id = match &payload {
        SavePayload::Workout(body) => match &state.edit_target {
            Some(id) => {
                store.update_workout(id, body).await.map_err(WizardError::Save)?;
                id.clone()
            }
            None => store.create_workout(body).await.map_err(WizardError::Save)?,
        },
        SavePayload::Plan(body) => {
            let id = match &state.edit_target {
                Some(id) => {
                    store.update_monthly_plan(id, body).await.map_err(WizardError::Save)?;
                    id.clone()
                }
                None => store.create_monthly_plan(body).await.map_err(WizardError::Save)?,
            };
            flag_referenced_templates(store, body, events).await;
            id
        }
    };

    assign_athletes(store, state, &id, events).await;

    Ok(id)
}

/// Flag every weekly workout a plan references as a reusable template so
/// it drops out of ordinary listing views.
async fn flag_referenced_templates(
    store: &dyn TrainingStore,
    body: &PlanBody,
    events: &EventSender,
) {
    for week in body.weeks.iter().filter(|week| !week.is_rest_week && !week.workout_id.is_empty())
    {
        if let Err(e) = store.mark_as_template(&week.workout_id, true).await {
            tracing::warn!(workout_id = %week.workout_id, error = %e, "template flagging failed");
            let _ = events.send(WizardEvent::Warning {
                message: format!("could not flag workout for week {} as a template", week.week_number),
            });
        }
    }
}

async fn assign_athletes(
    store: &dyn TrainingStore,
    state: &WorkflowState,
    artifact_id: &str,
    events: &EventSender,
) {
    if state.selected_athletes.is_empty() {
        return;
    }
    let athletes: Vec<String> = state.selected_athletes.iter().cloned().collect();

    let result = match state.artifact_type {
        ArtifactType::Monthly => {
            let start = state.meta.date.unwrap_or_else(|| Local::now().date_naive());
            store.assign_monthly_plan_to_athletes(artifact_id, &athletes, start).await
        }
        ArtifactType::Single | ArtifactType::Weekly => {
            store.assign_workout_to_athletes(artifact_id, &athletes).await
        }
    };

    if let Err(e) = result {
        tracing::warn!(artifact_id, error = %e, "athlete assignment failed");
        let _ = events.send(WizardEvent::Warning {
            message: format!("artifact saved, but assigning {} athletes failed", athletes.len()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockCategory, BlockFlow, DayBlocks, WeekPlanField, Weekday};

    fn single_state() -> WorkflowState {
        let mut state = WorkflowState::new(ArtifactType::Single);
        state.meta.name = "Leg Day".to_string();
        state
            .replace_blocks(
                None,
                vec![Block::new("Strength", BlockCategory::Main, BlockFlow::Sequential)
                    .with_exercise(Exercise::new("Back Squat"))],
            )
            .unwrap();
        state
    }

    #[test]
    fn test_single_payload_shape() {
        let payload = build_payload(&single_state()).unwrap();
        assert_eq!(payload.collection(), "workouts");

        let SavePayload::Workout(body) = payload else { panic!("expected workout payload") };
        assert_eq!(body.kind, ArtifactType::Single);
        assert_eq!(body.template_type, ArtifactType::Single);
        assert_eq!(body.exercises.len(), 1);
        assert_eq!(body.exercises[0].name, "Back Squat");
        assert_eq!(body.description, "1 blocks, 1 exercises");
        assert!(body.blocks.is_array());
        assert_eq!(body.blocks.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_template_nulls_schedule_fields() {
        let mut state = single_state();
        state.meta.date = NaiveDate::from_ymd_opt(2026, 3, 9);
        state.meta.time = Some("07:30".to_string());
        state.meta.duration = Some(60);
        state.meta.is_template = true;

        let SavePayload::Workout(body) = build_payload(&state).unwrap() else {
            panic!("expected workout payload")
        };
        assert!(body.is_template);
        assert!(body.date.is_none());
        assert!(body.time.is_none());
        assert!(body.duration.is_none());
        assert!(body.location.is_none());
    }

    #[test]
    fn test_weekly_payload_serializes_day_map() {
        let mut state = WorkflowState::new(ArtifactType::Weekly);
        state.meta.name = "Week A".to_string();
        state
            .replace_blocks(
                Some(Weekday::Monday),
                vec![Block::new("Strength", BlockCategory::Main, BlockFlow::Sequential)
                    .with_exercise(Exercise::new("Deadlift"))],
            )
            .unwrap();

        let SavePayload::Workout(body) = build_payload(&state).unwrap() else {
            panic!("expected workout payload")
        };
        assert_eq!(body.kind, ArtifactType::Weekly);
        // Weekly exercise detail lives inside the day map only, but the
        // summary counts content the same way single workouts do.
        assert!(body.exercises.is_empty());
        assert_eq!(body.description, "1 blocks, 1 exercises");
        let days: DayBlocks = serde_json::from_value(body.blocks).unwrap();
        assert_eq!(days.blocks(Weekday::Monday).len(), 1);
    }

    #[test]
    fn test_plan_payload_scrubs_rest_week_references() {
        let mut state = WorkflowState::new(ArtifactType::Monthly);
        state.meta.name = "March Block".to_string();
        state.meta.date = NaiveDate::from_ymd_opt(2026, 3, 1);
        for week in 1..=4 {
            state.update_week_entry(week, WeekPlanField::WorkoutId(format!("w-{week}"))).unwrap();
        }
        // Week 3 becomes a rest week after a workout had been picked.
        state.update_week_entry(3, WeekPlanField::RestWeek(true)).unwrap();

        let payload = build_payload(&state).unwrap();
        assert_eq!(payload.collection(), "training_plans");
        let SavePayload::Plan(body) = payload else { panic!("expected plan payload") };

        assert_eq!(body.month, 3);
        assert_eq!(body.year, 2026);
        assert_eq!(body.description, "4-week plan, 3 training weeks");
        assert!(body.weeks[2].is_rest_week);
        assert!(body.weeks[2].workout_id.is_empty());
        assert_eq!(body.weeks[1].workout_id, "w-2");
        // The in-memory state keeps the stale reference; only the
        // payload is scrubbed.
        assert_eq!(state.week_plan[2].workout_id, "w-3");
    }

    #[test]
    fn test_plan_payload_defaults_month_to_now() {
        let mut state = WorkflowState::new(ArtifactType::Monthly);
        state.meta.name = "Unscheduled".to_string();

        let SavePayload::Plan(body) = build_payload(&state).unwrap() else {
            panic!("expected plan payload")
        };
        let today = Local::now().date_naive();
        assert_eq!(body.month, today.month());
        assert_eq!(body.year, today.year());
    }
}
