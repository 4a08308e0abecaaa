//! Per-step completion predicates.
//!
//! Validation results are values, never errors: an incomplete step
//! blocks forward navigation and carries the user-facing message the
//! host should show, but the session stays fully recoverable.

use crate::model::{ArtifactType, BlockContainer, WorkflowState};

use super::steps::StepId;

/// Result of checking one step against the accumulated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCheck {
    /// The step's requirements are satisfied.
    Complete,
    /// Something is still missing; the message names what.
    Incomplete { message: String },
}

impl StepCheck {
    /// Whether the step passed.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    fn incomplete(message: impl Into<String>) -> Self {
        Self::Incomplete { message: message.into() }
    }
}

/// Check whether the given step is complete for the current state.
///
/// Pure: reads the state, mutates nothing.
pub fn check_step(step: StepId, state: &WorkflowState) -> StepCheck {
    match step {
        StepId::Template => check_template(state),
        StepId::Blocks => check_blocks(state),
        StepId::WeeklyBuilder => check_weekly_builder(state),
        StepId::Exercises => check_exercises(state),
        StepId::Schedule | StepId::NameSchedule => check_name(state),
        // Assignment is optional.
        StepId::Athletes => StepCheck::Complete,
    }
}

fn check_template(state: &WorkflowState) -> StepCheck {
    // Edit mode presumes the template choice already satisfied.
    if state.template_chosen || state.edit_target.is_some() {
        StepCheck::Complete
    } else {
        StepCheck::incomplete("choose a template or start from scratch")
    }
}

fn check_blocks(state: &WorkflowState) -> StepCheck {
    match &state.blocks {
        BlockContainer::FlatList(blocks) => {
            if blocks.is_empty() {
                StepCheck::incomplete("add at least one block to the workout")
            } else {
                StepCheck::Complete
            }
        }
        BlockContainer::DayMap(days) => {
            if days.populated_days().is_empty() {
                StepCheck::incomplete("add at least one block to a training day")
            } else {
                StepCheck::Complete
            }
        }
    }
}

fn check_weekly_builder(state: &WorkflowState) -> StepCheck {
    if state.artifact_type != ArtifactType::Monthly {
        return StepCheck::incomplete("the weekly builder only applies to monthly plans");
    }
    if !state.week_plan.iter().any(|entry| !entry.is_rest_week) {
        return StepCheck::incomplete("a plan needs at least one training week");
    }

    let unassigned = state.unassigned_weeks();
    match unassigned.as_slice() {
        [] => StepCheck::Complete,
        [week] => StepCheck::incomplete(format!("week {week} has no workout assigned")),
        weeks => {
            let listed =
                weeks.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            StepCheck::incomplete(format!("weeks {listed} have no workout assigned"))
        }
    }
}

fn check_exercises(state: &WorkflowState) -> StepCheck {
    if state.blocks.has_any_exercise() {
        StepCheck::Complete
    } else {
        StepCheck::incomplete("add at least one exercise to a block")
    }
}

fn check_name(state: &WorkflowState) -> StepCheck {
    if state.meta.name.trim().is_empty() {
        StepCheck::incomplete("give the artifact a name")
    } else {
        StepCheck::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockCategory, BlockFlow, Exercise, WeekPlanField, Weekday};

    fn block_with_exercise(name: &str) -> Block {
        Block::new(name, BlockCategory::Main, BlockFlow::Sequential)
            .with_exercise(Exercise::new("Back Squat"))
    }

    #[test]
    fn test_template_step() {
        let mut state = WorkflowState::new(ArtifactType::Single);
        assert!(!check_step(StepId::Template, &state).is_complete());

        state.template_chosen = true;
        assert!(check_step(StepId::Template, &state).is_complete());
    }

    #[test]
    fn test_template_step_presumed_in_edit_mode() {
        let mut state = WorkflowState::new(ArtifactType::Single);
        state.edit_target = Some("w-1".to_string());
        assert!(check_step(StepId::Template, &state).is_complete());
    }

    #[test]
    fn test_blocks_step_single() {
        let mut state = WorkflowState::new(ArtifactType::Single);
        assert!(!check_step(StepId::Blocks, &state).is_complete());

        state.replace_blocks(None, vec![block_with_exercise("A")]).unwrap();
        assert!(check_step(StepId::Blocks, &state).is_complete());
    }

    #[test]
    fn test_blocks_step_weekly() {
        let mut state = WorkflowState::new(ArtifactType::Weekly);
        assert!(!check_step(StepId::Blocks, &state).is_complete());

        state.replace_blocks(Some(Weekday::Thursday), vec![block_with_exercise("A")]).unwrap();
        assert!(check_step(StepId::Blocks, &state).is_complete());
    }

    #[test]
    fn test_weekly_builder_names_unassigned_week() {
        let mut state = WorkflowState::new(ArtifactType::Monthly);
        for week in 1..=3 {
            state.update_week_entry(week, WeekPlanField::WorkoutId(format!("w-{week}"))).unwrap();
        }

        let check = check_step(StepId::WeeklyBuilder, &state);
        match check {
            StepCheck::Incomplete { message } => assert!(message.contains("week 4")),
            StepCheck::Complete => panic!("expected incomplete"),
        }

        state.update_week_entry(4, WeekPlanField::RestWeek(true)).unwrap();
        assert!(check_step(StepId::WeeklyBuilder, &state).is_complete());
    }

    #[test]
    fn test_weekly_builder_rejects_all_rest() {
        let mut state = WorkflowState::new(ArtifactType::Monthly);
        for week in 1..=4 {
            state.update_week_entry(week, WeekPlanField::RestWeek(true)).unwrap();
        }
        assert!(!check_step(StepId::WeeklyBuilder, &state).is_complete());
    }

    #[test]
    fn test_exercises_step() {
        let mut state = WorkflowState::new(ArtifactType::Single);
        state
            .replace_blocks(None, vec![Block::new("Empty", BlockCategory::Main, BlockFlow::Sequential)])
            .unwrap();
        assert!(!check_step(StepId::Exercises, &state).is_complete());

        state.replace_blocks(None, vec![block_with_exercise("A")]).unwrap();
        assert!(check_step(StepId::Exercises, &state).is_complete());
    }

    #[test]
    fn test_name_steps() {
        let mut state = WorkflowState::new(ArtifactType::Single);
        assert!(!check_step(StepId::Schedule, &state).is_complete());

        state.meta.name = "  ".to_string();
        assert!(!check_step(StepId::Schedule, &state).is_complete());

        state.meta.name = "Leg Day".to_string();
        assert!(check_step(StepId::Schedule, &state).is_complete());
        assert!(check_step(StepId::NameSchedule, &state).is_complete());
    }

    #[test]
    fn test_athletes_step_always_complete() {
        let state = WorkflowState::new(ArtifactType::Weekly);
        assert!(check_step(StepId::Athletes, &state).is_complete());
    }
}
