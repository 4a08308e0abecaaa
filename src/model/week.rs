//! Weekly and monthly calendar structures.
//!
//! `DayBlocks` carries the per-day block buckets of a weekly artifact,
//! `WeekPlanEntry` one row of a monthly plan's week list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::block::Block;

/// Day of the week. Stable lowercase wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in calendar order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Lowercase display/wire name for this day.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

/// One day bucket: its blocks plus the rest-day flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct DayEntry {
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    is_rest: bool,
}

/// Outcome of a day-to-day copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDayOutcome {
    /// Blocks were duplicated into the target day.
    Copied { blocks: usize },
    /// The source day has nothing to copy. The host should show a notice.
    SourceEmpty,
    /// Source and target are the same day; nothing happens.
    SameDay,
}

/// Per-day block buckets for a weekly artifact.
///
/// All seven days are always present. A day marked as rest holds an
/// empty bucket: marking a day as rest atomically clears its blocks so a
/// rest day never retains stale content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayBlocks {
    days: BTreeMap<Weekday, DayEntry>,
}

impl Default for DayBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl DayBlocks {
    /// Create an empty week with all seven days present.
    pub fn new() -> Self {
        let days = Weekday::ALL.iter().map(|day| (*day, DayEntry::default())).collect();
        Self { days }
    }

    /// Blocks scheduled on the given day.
    pub fn blocks(&self, day: Weekday) -> &[Block] {
        match self.days.get(&day) {
            Some(entry) => &entry.blocks,
            None => &[],
        }
    }

    /// Whether the given day is marked as a rest day.
    pub fn is_rest(&self, day: Weekday) -> bool {
        self.days.get(&day).is_some_and(|entry| entry.is_rest)
    }

    /// Replace the block bucket of exactly one day. Other days are
    /// untouched.
    pub fn set_blocks(&mut self, day: Weekday, blocks: Vec<Block>) {
        self.days.entry(day).or_default().blocks = blocks;
    }

    /// Flip the rest flag of a day and return the new value.
    ///
    /// Transitioning from non-rest to rest clears the day's bucket.
    pub fn toggle_rest(&mut self, day: Weekday) -> bool {
        let entry = self.days.entry(day).or_default();
        entry.is_rest = !entry.is_rest;
        if entry.is_rest {
            entry.blocks.clear();
        }
        entry.is_rest
    }

    /// Deep-duplicate every block from one day into another.
    ///
    /// Every copied block and exercise receives a fresh identifier, and
    /// the target day's rest flag is cleared. Copying from an empty day
    /// or onto itself changes nothing; the outcome reports which.
    pub fn copy_day(&mut self, from: Weekday, to: Weekday) -> CopyDayOutcome {
        if from == to {
            return CopyDayOutcome::SameDay;
        }
        let copies: Vec<Block> = self.blocks(from).iter().map(Block::duplicate).collect();
        if copies.is_empty() {
            return CopyDayOutcome::SourceEmpty;
        }

        let count = copies.len();
        let target = self.days.entry(to).or_default();
        target.blocks = copies;
        target.is_rest = false;
        CopyDayOutcome::Copied { blocks: count }
    }

    /// Days that currently hold at least one block, in calendar order.
    pub fn populated_days(&self) -> Vec<Weekday> {
        Weekday::ALL.iter().copied().filter(|day| !self.blocks(*day).is_empty()).collect()
    }

    /// Total number of blocks across the week.
    pub fn total_blocks(&self) -> usize {
        Weekday::ALL.iter().map(|day| self.blocks(*day).len()).sum()
    }

    /// Total number of exercises across the week.
    pub fn total_exercises(&self) -> usize {
        Weekday::ALL
            .iter()
            .flat_map(|day| self.blocks(*day))
            .map(|block| block.exercises.len())
            .sum()
    }
}

/// One week row of a monthly plan.
///
/// `week_number` values are unique and contiguous from 1. The workout
/// reference is the empty string while unset; a rest week's reference is
/// ignored and scrubbed when the plan payload is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlanEntry {
    /// 1-based position of this week in the plan
    pub week_number: u32,

    /// Referenced weekly workout id, empty while unset
    #[serde(default)]
    pub workout_id: String,

    /// Whether this is a deload/rest week
    #[serde(default)]
    pub is_rest_week: bool,
}

impl WeekPlanEntry {
    /// Create an unassigned training week.
    pub fn new(week_number: u32) -> Self {
        Self { week_number, workout_id: String::new(), is_rest_week: false }
    }
}

/// Targeted update to a single week row.
#[derive(Debug, Clone, PartialEq)]
pub enum WeekPlanField {
    /// Assign (or clear) the referenced weekly workout.
    WorkoutId(String),
    /// Mark or unmark the week as rest.
    RestWeek(bool),
}
