//! Data model for training artifacts.
//!
//! Three artifact shapes share one vocabulary:
//!
//! - **Single**: a flat, ordered list of [`Block`]s
//! - **Weekly**: seven [`DayBlocks`] buckets, one per weekday
//! - **Monthly**: a list of [`WeekPlanEntry`] rows referencing weekly
//!   artifacts
//!
//! [`WorkflowState`] accumulates everything one wizard session builds.

mod artifact;
mod block;
mod state;
mod week;

pub use artifact::{ArtifactMeta, ArtifactType};
pub use block::{Block, BlockCategory, BlockFlow, Exercise};
pub use state::{BlockContainer, WorkflowState};
pub use week::{CopyDayOutcome, DayBlocks, WeekPlanEntry, WeekPlanField, Weekday};
