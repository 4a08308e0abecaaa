//! Edit-mode loading.
//!
//! Inverse of the persistence mapper: given a persisted artifact id,
//! reconstructs a [`WorkflowState`] ready for the wizard. The id's
//! collection is unknown up front; the workouts collection is tried
//! first and the fallback to training plans keys on the store's explicit
//! [`StoreError::NotFound`] signal — any other failure is fatal and must
//! prevent the wizard from opening half-populated.

use crate::error::{WizardError, WizardResult};
use crate::model::{ArtifactType, BlockContainer, WeekPlanEntry, WorkflowState};
use crate::store::{PlanRecord, StoreError, TrainingStore, WorkoutRecord};

/// Load a persisted artifact into a fresh workflow state.
pub async fn load_for_edit(
    store: &dyn TrainingStore,
    id: &str,
) -> WizardResult<WorkflowState> {
    match store.get_workout_by_id(id).await {
        Ok(record) => from_workout(store, record).await,
        Err(StoreError::NotFound(_)) => match store.get_monthly_plan_by_id(id).await {
            Ok(record) => Ok(from_plan(record)),
            Err(StoreError::NotFound(_)) => Err(WizardError::NotFound(id.to_string())),
            Err(source) => Err(WizardError::Load { id: id.to_string(), source }),
        },
        Err(source) => Err(WizardError::Load { id: id.to_string(), source }),
    }
}

async fn from_workout(
    store: &dyn TrainingStore,
    record: WorkoutRecord,
) -> WizardResult<WorkflowState> {
    let WorkoutRecord { id, body } = record;

    let blocks = match body.kind {
        ArtifactType::Single => BlockContainer::FlatList(serde_json::from_value(body.blocks)?),
        ArtifactType::Weekly => BlockContainer::DayMap(serde_json::from_value(body.blocks)?),
        ArtifactType::Monthly => {
            return Err(WizardError::InvalidOperation(format!(
                "workout row '{id}' is stored with a monthly kind"
            )));
        }
    };

    let mut state = WorkflowState::new(body.kind);
    state.blocks = blocks;
    state.meta.name = body.name;
    state.meta.date = body.date;
    state.meta.time = body.time;
    state.meta.duration = body.duration;
    state.meta.location = body.location;
    state.meta.is_template = body.is_template;
    state.template_chosen = true;
    state.edit_target = Some(id.clone());

    // Templates are never assigned; skip the lookup entirely.
    if !state.meta.is_template {
        let assigned = store
            .get_athlete_assignments_for_workout(&id)
            .await
            .map_err(|source| WizardError::Load { id: id.clone(), source })?;
        state.selected_athletes = assigned.into_iter().collect();
    }

    tracing::debug!(id = %id, kind = state.artifact_type.name(), "loaded workout for editing");
    Ok(state)
}

fn from_plan(record: PlanRecord) -> WorkflowState {
    let PlanRecord { id, body } = record;

    let mut state = WorkflowState::new(ArtifactType::Monthly);
    state.meta.name = body.name;
    state.meta.date = chrono::NaiveDate::from_ymd_opt(body.year, body.month, 1);
    state.week_plan = body.weeks;
    if state.week_plan.is_empty() {
        state.week_plan.push(WeekPlanEntry::new(1));
    }
    state.template_chosen = true;
    state.edit_target = Some(id.clone());

    tracing::debug!(id = %id, "loaded monthly plan for editing");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockCategory, BlockFlow, Exercise};
    use crate::store::MemoryStore;
    use crate::wizard::{PlanBody, WorkoutBody};

    fn single_body(name: &str, is_template: bool) -> WorkoutBody {
        let block = Block::new("Strength", BlockCategory::Main, BlockFlow::Sequential)
            .with_exercise(Exercise::new("Back Squat"));
        WorkoutBody {
            name: name.to_string(),
            kind: ArtifactType::Single,
            template_type: ArtifactType::Single,
            date: None,
            time: None,
            duration: Some(60),
            location: None,
            is_template,
            blocks: serde_json::to_value(vec![block]).unwrap(),
            description: "1 blocks, 1 exercises".to_string(),
            exercises: Vec::new(),
        }
    }

    fn plan_body(name: &str) -> PlanBody {
        PlanBody {
            name: name.to_string(),
            description: "2-week plan, 1 training weeks".to_string(),
            month: 3,
            year: 2026,
            weeks: vec![
                WeekPlanEntry { week_number: 1, workout_id: "w-1".to_string(), is_rest_week: false },
                WeekPlanEntry { week_number: 2, workout_id: String::new(), is_rest_week: true },
            ],
        }
    }

    #[tokio::test]
    async fn test_load_single_workout() {
        let store = MemoryStore::new();
        let id = store.seed_workout("w-1", single_body("Leg Day", false)).await;
        store.assign_workout_to_athletes(&id, &["a-1".to_string()]).await.unwrap();

        let state = load_for_edit(&store, &id).await.unwrap();

        assert_eq!(state.artifact_type, ArtifactType::Single);
        assert_eq!(state.meta.name, "Leg Day");
        assert_eq!(state.edit_target.as_deref(), Some("w-1"));
        assert!(state.template_chosen);
        assert_eq!(state.blocks.total_blocks(), 1);
        assert_eq!(state.blocks.total_exercises(), 1);
        assert!(state.selected_athletes.contains("a-1"));
    }

    #[tokio::test]
    async fn test_load_falls_back_to_plan_collection() {
        let store = MemoryStore::new();
        let id = store.create_monthly_plan(&plan_body("March Block")).await.unwrap();

        let state = load_for_edit(&store, &id).await.unwrap();

        assert_eq!(state.artifact_type, ArtifactType::Monthly);
        assert_eq!(state.week_plan.len(), 2);
        assert!(state.week_plan[1].is_rest_week);
        assert_eq!(state.meta.date, chrono::NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = load_for_edit(&store, "missing").await.unwrap_err();
        assert!(matches!(err, WizardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_does_not_trigger_fallback() {
        let store = MemoryStore::new();
        store.create_monthly_plan(&plan_body("March Block")).await.unwrap();
        store.fail_op("get_workout_by_id").await;

        // The workout lookup fails with a backend error, not NotFound,
        // so the loader must abort instead of silently falling back.
        let err = load_for_edit(&store, "anything").await.unwrap_err();
        assert!(matches!(err, WizardError::Load { .. }));
    }

    #[tokio::test]
    async fn test_template_load_skips_assignment_lookup() {
        let store = MemoryStore::new();
        let id = store.seed_workout("t-1", single_body("Template", true)).await;
        store.fail_op("get_athlete_assignments_for_workout").await;

        let state = load_for_edit(&store, &id).await.unwrap();
        assert!(state.selected_athletes.is_empty());
    }
}
