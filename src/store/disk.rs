use super::{
    EntryRecord, EntryStore, GoalStore, new_id, sort_goals_newest_first, sort_newest_first,
};
use crate::core::{Entry, Goal, GoalRecord, GoalUpdate};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

const ENTRIES_PARTITION: &str = "entries";
const GOALS_PARTITION: &str = "goals";

/// Entry and goal store persisted in a fjall keyspace. Records are stored as
/// JSON keyed by id.
pub struct DiskStore {
    keyspace: Keyspace,
    entries: PartitionHandle,
    goals: PartitionHandle,
    // Serialises goal writes; archiving and insertion commit as one batch.
    goal_lock: Mutex<()>,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create store directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let entries =
            keyspace.open_partition(ENTRIES_PARTITION, PartitionCreateOptions::default())?;
        let goals = keyspace.open_partition(GOALS_PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened store at {}", path.display());

        Ok(Self {
            keyspace,
            entries,
            goals,
            goal_lock: Mutex::new(()),
        })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist store")
    }

    fn put_goal(&self, record: &GoalRecord) -> Result<()> {
        self.goals
            .insert(record.id.as_bytes(), serde_json::to_vec(record)?)?;
        Ok(())
    }
}

fn read_all<T: DeserializeOwned>(partition: &PartitionHandle) -> Result<Vec<T>> {
    partition
        .iter()
        .map(|item| -> Result<T> {
            let (_, value) = item?;
            serde_json::from_slice(&value).context("Failed to decode stored record")
        })
        .collect()
}

#[async_trait]
impl EntryStore for DiskStore {
    async fn save_entry(&self, entry: Entry) -> Result<String> {
        let id = new_id();
        let record = EntryRecord {
            id: id.clone(),
            recorded_at: Utc::now(),
            entry,
        };
        self.entries
            .insert(id.as_bytes(), serde_json::to_vec(&record)?)?;
        self.persist()?;
        debug!("Entry PUT for id: {id}");
        Ok(id)
    }

    async fn list_entries(&self) -> Result<Vec<Entry>> {
        let mut records: Vec<EntryRecord> = read_all(&self.entries)?;
        sort_newest_first(&mut records);
        debug!("Loaded {} entries", records.len());
        Ok(records.into_iter().map(|r| r.entry).collect())
    }
}

#[async_trait]
impl GoalStore for DiskStore {
    async fn save_goal(&self, goal: Goal) -> Result<String> {
        let _guard = self.goal_lock.lock().await;

        let mut batch = self.keyspace.batch();
        let previous: Vec<GoalRecord> = read_all(&self.goals)?;
        for mut record in previous.into_iter().filter(|g| g.is_active) {
            debug!("Archiving goal {}", record.id);
            record.is_active = false;
            batch.insert(&self.goals, record.id.as_bytes(), serde_json::to_vec(&record)?);
        }

        let record = GoalRecord {
            id: new_id(),
            goal,
            is_active: true,
            created_at: Utc::now(),
        };
        batch.insert(&self.goals, record.id.as_bytes(), serde_json::to_vec(&record)?);
        batch.commit().context("Failed to save goal")?;
        self.persist()?;
        debug!("Goal PUT for id: {}", record.id);
        Ok(record.id)
    }

    async fn get_active_goal(&self) -> Result<Option<GoalRecord>> {
        let mut goals: Vec<GoalRecord> = read_all(&self.goals)?;
        sort_goals_newest_first(&mut goals);
        Ok(goals.into_iter().find(|g| g.is_active))
    }

    async fn update_goal(&self, id: &str, update: GoalUpdate) -> Result<()> {
        let _guard = self.goal_lock.lock().await;

        let value = self
            .goals
            .get(id.as_bytes())?
            .ok_or_else(|| anyhow!("Goal not found: {id}"))?;
        let mut record: GoalRecord =
            serde_json::from_slice(&value).context("Failed to decode stored goal")?;
        record.goal = record.goal.apply(&update)?;
        self.put_goal(&record)?;
        self.persist()?;
        debug!("Goal UPDATE for id: {id}");
        Ok(())
    }

    async fn list_goals(&self) -> Result<Vec<GoalRecord>> {
        let mut goals: Vec<GoalRecord> = read_all(&self.goals)?;
        sort_goals_newest_first(&mut goals);
        Ok(goals)
    }
}
