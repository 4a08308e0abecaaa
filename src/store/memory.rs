//! In-memory store implementation.
//!
//! Backs the integration tests and doubles as an embedding fixture. The
//! fixture is single-tenant: `owner_id` filters are accepted but not
//! interpreted.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::wizard::{PlanBody, WorkoutBody};

use super::{PlanRecord, StoreError, StoreResult, TrainingStore, WorkoutRecord};

#[derive(Default)]
struct Inner {
    workouts: HashMap<String, WorkoutBody>,
    plans: HashMap<String, PlanBody>,
    workout_assignments: HashMap<String, Vec<String>>,
    plan_assignments: HashMap<String, (Vec<String>, NaiveDate)>,
    failures: HashSet<String>,
}

/// HashMap-backed [`TrainingStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the named operation to fail with a backend error until
    /// cleared. Used to exercise warning and retry paths in tests.
    pub async fn fail_op(&self, op: &str) {
        self.inner.write().await.failures.insert(op.to_string());
    }

    /// Clear a forced failure.
    pub async fn clear_failure(&self, op: &str) {
        self.inner.write().await.failures.remove(op);
    }

    /// Insert a workout row under a known id. Test seeding helper.
    pub async fn seed_workout(&self, id: impl Into<String>, body: WorkoutBody) -> String {
        let id = id.into();
        self.inner.write().await.workouts.insert(id.clone(), body);
        id
    }

    /// Athletes a plan was assigned to, with the start date.
    pub async fn plan_assignment(&self, plan_id: &str) -> Option<(Vec<String>, NaiveDate)> {
        self.inner.read().await.plan_assignments.get(plan_id).cloned()
    }

    async fn fail_if_configured(&self, op: &str) -> StoreResult<()> {
        if self.inner.read().await.failures.contains(op) {
            return Err(StoreError::Backend(format!("simulated failure in {op}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TrainingStore for MemoryStore {
    async fn list_workout_templates(
        &self,
        _owner_id: &str,
        template_kind: &str,
    ) -> StoreResult<Vec<WorkoutRecord>> {
        self.fail_if_configured("list_workout_templates").await?;
        let inner = self.inner.read().await;
        Ok(inner
            .workouts
            .iter()
            .filter(|(_, body)| body.is_template && body.template_type.name() == template_kind)
            .map(|(id, body)| WorkoutRecord { id: id.clone(), body: body.clone() })
            .collect())
    }

    async fn create_workout(&self, body: &WorkoutBody) -> StoreResult<String> {
        self.fail_if_configured("create_workout").await?;
        let id = Uuid::new_v4().to_string();
        self.inner.write().await.workouts.insert(id.clone(), body.clone());
        Ok(id)
    }

    async fn update_workout(&self, id: &str, body: &WorkoutBody) -> StoreResult<()> {
        self.fail_if_configured("update_workout").await?;
        let mut inner = self.inner.write().await;
        let row = inner
            .workouts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *row = body.clone();
        Ok(())
    }

    async fn get_all_workouts(&self) -> StoreResult<Vec<WorkoutRecord>> {
        self.fail_if_configured("get_all_workouts").await?;
        let inner = self.inner.read().await;
        Ok(inner
            .workouts
            .iter()
            .map(|(id, body)| WorkoutRecord { id: id.clone(), body: body.clone() })
            .collect())
    }

    async fn mark_as_template(&self, id: &str, flag: bool) -> StoreResult<()> {
        self.fail_if_configured("mark_as_template").await?;
        let mut inner = self.inner.write().await;
        let row = inner
            .workouts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        row.is_template = flag;
        Ok(())
    }

    async fn create_monthly_plan(&self, body: &PlanBody) -> StoreResult<String> {
        self.fail_if_configured("create_monthly_plan").await?;
        let id = Uuid::new_v4().to_string();
        self.inner.write().await.plans.insert(id.clone(), body.clone());
        Ok(id)
    }

    async fn update_monthly_plan(&self, id: &str, body: &PlanBody) -> StoreResult<()> {
        self.fail_if_configured("update_monthly_plan").await?;
        let mut inner = self.inner.write().await;
        let row =
            inner.plans.get_mut(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *row = body.clone();
        Ok(())
    }

    async fn assign_workout_to_athletes(
        &self,
        workout_id: &str,
        athlete_ids: &[String],
    ) -> StoreResult<()> {
        self.fail_if_configured("assign_workout_to_athletes").await?;
        let mut inner = self.inner.write().await;
        if !inner.workouts.contains_key(workout_id) {
            return Err(StoreError::NotFound(workout_id.to_string()));
        }
        inner.workout_assignments.insert(workout_id.to_string(), athlete_ids.to_vec());
        Ok(())
    }

    async fn assign_monthly_plan_to_athletes(
        &self,
        plan_id: &str,
        athlete_ids: &[String],
        start_date: NaiveDate,
    ) -> StoreResult<()> {
        self.fail_if_configured("assign_monthly_plan_to_athletes").await?;
        let mut inner = self.inner.write().await;
        if !inner.plans.contains_key(plan_id) {
            return Err(StoreError::NotFound(plan_id.to_string()));
        }
        inner.plan_assignments.insert(plan_id.to_string(), (athlete_ids.to_vec(), start_date));
        Ok(())
    }

    async fn get_workout_by_id(&self, id: &str) -> StoreResult<WorkoutRecord> {
        self.fail_if_configured("get_workout_by_id").await?;
        let inner = self.inner.read().await;
        inner
            .workouts
            .get(id)
            .map(|body| WorkoutRecord { id: id.to_string(), body: body.clone() })
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn get_monthly_plan_by_id(&self, id: &str) -> StoreResult<PlanRecord> {
        self.fail_if_configured("get_monthly_plan_by_id").await?;
        let inner = self.inner.read().await;
        inner
            .plans
            .get(id)
            .map(|body| PlanRecord { id: id.to_string(), body: body.clone() })
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn get_athlete_assignments_for_workout(
        &self,
        workout_id: &str,
    ) -> StoreResult<Vec<String>> {
        self.fail_if_configured("get_athlete_assignments_for_workout").await?;
        let inner = self.inner.read().await;
        Ok(inner.workout_assignments.get(workout_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArtifactType;

    fn workout_body(name: &str) -> WorkoutBody {
        WorkoutBody {
            name: name.to_string(),
            kind: ArtifactType::Single,
            template_type: ArtifactType::Single,
            date: None,
            time: None,
            duration: None,
            location: None,
            is_template: false,
            blocks: serde_json::json!([]),
            description: String::new(),
            exercises: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_workout() {
        let store = MemoryStore::new();
        let id = store.create_workout(&workout_body("Leg Day")).await.unwrap();

        let record = store.get_workout_by_id(&id).await.unwrap();
        assert_eq!(record.body.name, "Leg Day");
    }

    #[tokio::test]
    async fn test_missing_rows_report_not_found() {
        let store = MemoryStore::new();
        let err = store.get_workout_by_id("nope").await.unwrap_err();
        assert!(err.is_not_found());

        let err = store.update_workout("nope", &workout_body("x")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mark_as_template() {
        let store = MemoryStore::new();
        let id = store.create_workout(&workout_body("Week A")).await.unwrap();
        store.mark_as_template(&id, true).await.unwrap();

        let record = store.get_workout_by_id(&id).await.unwrap();
        assert!(record.body.is_template);
    }

    #[tokio::test]
    async fn test_forced_failures_are_backend_errors() {
        let store = MemoryStore::new();
        store.fail_op("create_workout").await;

        let err = store.create_workout(&workout_body("x")).await.unwrap_err();
        assert!(!err.is_not_found());

        store.clear_failure("create_workout").await;
        assert!(store.create_workout(&workout_body("x")).await.is_ok());
    }

    #[tokio::test]
    async fn test_template_listing_filters_by_kind_and_flag() {
        let store = MemoryStore::new();
        let mut weekly = workout_body("Week A");
        weekly.kind = ArtifactType::Weekly;
        weekly.template_type = ArtifactType::Weekly;
        weekly.is_template = true;
        store.seed_workout("w-1", weekly).await;
        store.seed_workout("w-2", workout_body("Not a template")).await;

        let templates = store.list_workout_templates("coach-1", "weekly").await.unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "w-1");
    }
}
