//! External store boundary.
//!
//! The wizard core never talks to a concrete backend. Everything it
//! needs from persistence is expressed by [`TrainingStore`], an async
//! trait the host implements over whatever transport it uses. The crate
//! ships [`MemoryStore`], a HashMap-backed implementation used by the
//! integration tests and useful as an embedding fixture.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::{PlanBody, WorkoutBody};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist. Kept distinct from every other
    /// failure: the edit loader's collection fallback keys on exactly
    /// this variant.
    #[error("row not found: {0}")]
    NotFound(String),

    /// Any other backend failure (transport, permissions, corruption).
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this is the explicit not-found signal.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A stored single/weekly workout row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Row id
    pub id: String,
    /// Persisted body
    pub body: WorkoutBody,
}

/// A stored monthly-plan row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Row id
    pub id: String,
    /// Persisted body
    pub body: PlanBody,
}

/// Persistence operations the wizard core consumes.
///
/// Create operations return the id of the new row; update operations
/// address an existing row and fail with [`StoreError::NotFound`] when
/// it does not exist.
#[async_trait]
pub trait TrainingStore: Send + Sync {
    /// Weekly templates a coach can reference from a monthly plan.
    async fn list_workout_templates(
        &self,
        owner_id: &str,
        template_kind: &str,
    ) -> StoreResult<Vec<WorkoutRecord>>;

    /// Create a single/weekly workout, returning its id.
    async fn create_workout(&self, body: &WorkoutBody) -> StoreResult<String>;

    /// Update an existing workout in place.
    async fn update_workout(&self, id: &str, body: &WorkoutBody) -> StoreResult<()>;

    /// All workout rows.
    async fn get_all_workouts(&self) -> StoreResult<Vec<WorkoutRecord>>;

    /// Set or clear a workout's reusable-template flag.
    async fn mark_as_template(&self, id: &str, flag: bool) -> StoreResult<()>;

    /// Create a monthly plan, returning its id.
    async fn create_monthly_plan(&self, body: &PlanBody) -> StoreResult<String>;

    /// Update an existing monthly plan in place.
    async fn update_monthly_plan(&self, id: &str, body: &PlanBody) -> StoreResult<()>;

    /// Assign a workout to the given athletes.
    async fn assign_workout_to_athletes(
        &self,
        workout_id: &str,
        athlete_ids: &[String],
    ) -> StoreResult<()>;

    /// Assign a monthly plan to the given athletes from a start date.
    async fn assign_monthly_plan_to_athletes(
        &self,
        plan_id: &str,
        athlete_ids: &[String],
        start_date: NaiveDate,
    ) -> StoreResult<()>;

    /// Fetch one workout row.
    async fn get_workout_by_id(&self, id: &str) -> StoreResult<WorkoutRecord>;

    /// Fetch one monthly-plan row.
    async fn get_monthly_plan_by_id(&self, id: &str) -> StoreResult<PlanRecord>;

    /// Athlete ids a workout is currently assigned to.
    async fn get_athlete_assignments_for_workout(
        &self,
        workout_id: &str,
    ) -> StoreResult<Vec<String>>;
}
