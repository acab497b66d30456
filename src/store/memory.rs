use super::{
    EntryRecord, EntryStore, GoalStore, new_id, sort_goals_newest_first, sort_newest_first,
};
use crate::core::{Entry, Goal, GoalRecord, GoalUpdate};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory entry and goal store. Contents are lost when dropped.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Vec<EntryRecord>>>,
    goals: Arc<Mutex<Vec<GoalRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn save_entry(&self, entry: Entry) -> Result<String> {
        let id = new_id();
        let record = EntryRecord {
            id: id.clone(),
            recorded_at: Utc::now(),
            entry,
        };

        let mut entries = self.entries.lock().await;
        debug!("Entry PUT for id: {id}");
        entries.push(record);
        Ok(id)
    }

    async fn list_entries(&self) -> Result<Vec<Entry>> {
        let mut records = self.entries.lock().await.clone();
        sort_newest_first(&mut records);
        Ok(records.into_iter().map(|r| r.entry).collect())
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn save_goal(&self, goal: Goal) -> Result<String> {
        let id = new_id();
        let mut goals = self.goals.lock().await;
        for previous in goals.iter_mut().filter(|g| g.is_active) {
            debug!("Archiving goal {}", previous.id);
            previous.is_active = false;
        }
        goals.push(GoalRecord {
            id: id.clone(),
            goal,
            is_active: true,
            created_at: Utc::now(),
        });
        debug!("Goal PUT for id: {id}");
        Ok(id)
    }

    async fn get_active_goal(&self) -> Result<Option<GoalRecord>> {
        let goals = self.goals.lock().await;
        Ok(goals.iter().rev().find(|g| g.is_active).cloned())
    }

    async fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<()> {
        let mut goals = self.goals.lock().await;
        let record = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| anyhow!("Goal not found: {id}"))?;
        record.goal = record.goal.apply(&update)?;
        debug!("Goal UPDATE for id: {id}");
        Ok(())
    }

    async fn list_goals(&self) -> Result<Vec<GoalRecord>> {
        let mut goals = self.goals.lock().await.clone();
        goals.reverse();
        sort_goals_newest_first(&mut goals);
        Ok(goals)
    }
}
