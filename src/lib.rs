pub mod cli;
pub mod core;
pub mod store;

use crate::core::{GoalUpdate, config::AppConfig};
use crate::store::{DiskStore, EntryStore, GoalStore};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

const NO_GOAL_HINT: &str = "No active goal. Create one with `nestegg goal set`.";

pub enum AppCommand {
    Add {
        date: Option<NaiveDate>,
        income: Vec<(String, f64)>,
        expenses: Option<f64>,
    },
    Entries {
        limit: Option<usize>,
    },
    SetGoal(cli::goal::NewGoal),
    ShowGoal,
    EditGoal(GoalUpdate),
    GoalHistory,
    Status,
    Stats,
}

/// Loads the config, opens the on-disk store and runs `command` as of today,
/// printing its output.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("nestegg starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store_path = config.default_data_path()?.join("store");
    let store = DiskStore::open(&store_path)?;
    let today = Local::now().date_naive();

    let output = execute(command, &config, &store, today).await?;
    println!("{output}");
    Ok(())
}

/// Runs `command` against `store` as of `today` and returns the rendered output.
pub async fn execute<S>(
    command: AppCommand,
    config: &AppConfig,
    store: &S,
    today: NaiveDate,
) -> Result<String>
where
    S: EntryStore + GoalStore,
{
    match command {
        AppCommand::Add {
            date,
            income,
            expenses,
        } => {
            let date = date.unwrap_or(today);
            cli::add::run(store, date, today, &income, expenses, &config.currency).await
        }
        AppCommand::Entries { limit } => {
            let entries = store.list_entries().await?;
            let currency = match store.get_active_goal().await? {
                Some(record) => record.goal.currency,
                None => config.currency.clone(),
            };
            Ok(cli::entries::render(&entries, limit, &currency))
        }
        AppCommand::SetGoal(new_goal) => cli::goal::set(store, new_goal, &config.currency).await,
        AppCommand::ShowGoal => Ok(match store.get_active_goal().await? {
            Some(record) => cli::goal::render_details(&record, today),
            None => NO_GOAL_HINT.to_string(),
        }),
        AppCommand::EditGoal(update) => cli::goal::edit(store, update).await,
        AppCommand::GoalHistory => {
            let goals = store.list_goals().await?;
            Ok(cli::goal::render_history(&goals))
        }
        AppCommand::Status => {
            let Some(record) = store.get_active_goal().await? else {
                return Ok(NO_GOAL_HINT.to_string());
            };
            let entries = store.list_entries().await?;
            Ok(cli::status::Dashboard::build(&record, &entries, today).display())
        }
        AppCommand::Stats => {
            let Some(record) = store.get_active_goal().await? else {
                return Ok(NO_GOAL_HINT.to_string());
            };
            let entries = store.list_entries().await?;
            Ok(cli::stats::render(&record, &entries, &config.sources, today))
        }
    }
}
