//! Record stores for entries and goals.
pub mod disk;
pub mod memory;

use crate::core::{Entry, Goal, GoalRecord, GoalUpdate};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Append-only storage of daily entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Stores `entry` and returns its id.
    async fn save_entry(&self, entry: Entry) -> Result<String>;

    /// All entries, newest date first.
    async fn list_entries(&self) -> Result<Vec<Entry>>;
}

/// Storage of goals with a single active goal.
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Stores `goal` as the active goal, deactivating any previous one, and
    /// returns its id.
    async fn save_goal(&self, goal: Goal) -> Result<String>;

    async fn get_active_goal(&self) -> Result<Option<GoalRecord>>;

    /// Applies `update` to the goal with `id`. Fails if no such goal exists or
    /// the updated goal is invalid.
    async fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<()>;

    /// Every goal, active or archived, newest first.
    async fn list_goals(&self) -> Result<Vec<GoalRecord>>;
}

/// An entry together with its storage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EntryRecord {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub entry: Entry,
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Orders entries newest date first, latest recorded first within a date.
pub(crate) fn sort_newest_first(records: &mut [EntryRecord]) {
    records.sort_by(|a, b| {
        b.entry
            .date
            .cmp(&a.entry.date)
            .then_with(|| b.recorded_at.cmp(&a.recorded_at))
    });
}

pub(crate) fn sort_goals_newest_first(records: &mut [GoalRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
