//! Exercise and block data structures.
//!
//! A `Block` is a named, ordered group of exercises sharing a training
//! style (circuit, superset, ...). Blocks are owned exclusively by their
//! container — the flat list of a single workout or one day bucket of a
//! weekly plan — and are never shared between containers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Training purpose of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Warmup,
    Main,
    Accessory,
    Conditioning,
    Cooldown,
    Custom,
}

/// Execution style of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockFlow {
    Sequential,
    Circuit,
    Superset,
    Emom,
    Amrap,
}

/// A single exercise within a block.
///
/// Prescription fields (sets, reps, weight, ...) are free-form strings:
/// coaches write things like "3-5", "RPE 8" or "bodyweight" and the core
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier for this exercise
    pub id: String,

    /// Display name, e.g. "Back Squat"
    pub name: String,

    /// Free-form category label ("legs", "push", ...)
    #[serde(default)]
    pub category: String,

    /// Prescribed number of sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<String>,

    /// Prescribed repetitions per set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,

    /// Prescribed load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Prescribed distance (conditioning work)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,

    /// Rest between sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,

    /// Target rating of perceived exertion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<String>,

    /// Free-text coaching notes
    #[serde(default)]
    pub notes: String,
}

impl Exercise {
    /// Create a new exercise with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: String::new(),
            sets: None,
            reps: None,
            weight: None,
            distance: None,
            rest: None,
            rpe: None,
            notes: String::new(),
        }
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the prescribed sets.
    #[must_use]
    pub fn with_sets(mut self, sets: impl Into<String>) -> Self {
        self.sets = Some(sets.into());
        self
    }

    /// Set the prescribed reps.
    #[must_use]
    pub fn with_reps(mut self, reps: impl Into<String>) -> Self {
        self.reps = Some(reps.into());
        self
    }

    /// Set the prescribed weight.
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Set the target RPE.
    #[must_use]
    pub fn with_rpe(mut self, rpe: impl Into<String>) -> Self {
        self.rpe = Some(rpe.into());
        self
    }

    /// Set the coaching notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Deep copy with a freshly generated identifier.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4().to_string();
        copy
    }
}

/// A named, ordered group of exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier for this block
    pub id: String,

    /// Display name, e.g. "Strength A"
    pub name: String,

    /// Training purpose
    pub category: BlockCategory,

    /// Execution style
    pub flow: BlockFlow,

    /// Exercises in execution order
    pub exercises: Vec<Exercise>,

    /// Rest between exercises, in seconds
    #[serde(default)]
    pub rest_between_exercises: u32,

    /// Number of rounds (circuit/superset styles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,

    /// Time cap in minutes (EMOM/AMRAP styles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,

    /// Optional block description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Block {
    /// Create a new block with a fresh identifier and no exercises.
    pub fn new(name: impl Into<String>, category: BlockCategory, flow: BlockFlow) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            flow,
            exercises: Vec::new(),
            rest_between_exercises: 0,
            rounds: None,
            time_limit: None,
            description: None,
        }
    }

    /// Append an exercise.
    #[must_use]
    pub fn with_exercise(mut self, exercise: Exercise) -> Self {
        self.exercises.push(exercise);
        self
    }

    /// Set the rest between exercises, in seconds.
    #[must_use]
    pub fn with_rest(mut self, seconds: u32) -> Self {
        self.rest_between_exercises = seconds;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    /// Set the time cap in minutes.
    #[must_use]
    pub fn with_time_limit(mut self, minutes: u32) -> Self {
        self.time_limit = Some(minutes);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Deep copy with freshly generated identifiers for the block and
    /// every contained exercise.
    ///
    /// Copies must never alias the source's identifiers: a later edit to
    /// one copy would otherwise silently address the other.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4().to_string();
        copy.exercises = self.exercises.iter().map(Exercise::duplicate).collect();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_builder() {
        let ex = Exercise::new("Back Squat").with_sets("5").with_reps("3").with_rpe("8");
        assert_eq!(ex.name, "Back Squat");
        assert_eq!(ex.sets.as_deref(), Some("5"));
        assert_eq!(ex.reps.as_deref(), Some("3"));
        assert!(!ex.id.is_empty());
    }

    #[test]
    fn test_block_duplicate_regenerates_ids() {
        let block = Block::new("Strength A", BlockCategory::Main, BlockFlow::Sequential)
            .with_exercise(Exercise::new("Back Squat"))
            .with_exercise(Exercise::new("Front Squat"));

        let copy = block.duplicate();

        assert_ne!(copy.id, block.id);
        assert_eq!(copy.exercises.len(), 2);
        for (orig, dup) in block.exercises.iter().zip(&copy.exercises) {
            assert_ne!(orig.id, dup.id);
            assert_eq!(orig.name, dup.name);
        }
    }

    #[test]
    fn test_duplicate_does_not_alias() {
        let block = Block::new("Conditioning", BlockCategory::Conditioning, BlockFlow::Amrap)
            .with_exercise(Exercise::new("Burpees"));

        let mut copy = block.duplicate();
        copy.exercises[0].name = "Row".to_string();

        assert_eq!(block.exercises[0].name, "Burpees");
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = Block::new("Warmup", BlockCategory::Warmup, BlockFlow::Circuit)
            .with_rounds(3)
            .with_exercise(Exercise::new("Jumping Jacks").with_reps("20"));

        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(json.contains("\"warmup\""));
        assert!(json.contains("\"circuit\""));
    }
}
