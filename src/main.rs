use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use nestegg::cli::add::parse_income_arg;
use nestegg::cli::goal::NewGoal;
use nestegg::core::log::init_logging;
use nestegg::core::{Currency, GoalUpdate};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase log output (-v for progress, -vv for debug detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record income and expenses for a day
    Add {
        /// Date of the entry (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Income as SOURCE=AMOUNT, repeatable
        #[arg(short, long, value_parser = parse_income_arg)]
        income: Vec<(String, f64)>,
        /// Expenses for the day
        #[arg(short, long)]
        expenses: Option<f64>,
    },
    /// List recorded entries, newest first
    Entries {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Manage the savings goal
    #[command(subcommand)]
    Goal(GoalCommands),
    /// Display progress towards the active goal
    Status,
    /// Display weekly statistics for the active goal
    Stats,
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Create a new goal, archiving the current one
    Set(SetGoalArgs),
    /// Show the active goal
    Show,
    /// Change fields of the active goal
    Edit(EditGoalArgs),
    /// List all goals, including archived ones
    History,
}

#[derive(Args)]
struct SetGoalArgs {
    #[arg(long)]
    title: String,
    /// Amount to save
    #[arg(long)]
    target: f64,
    /// First day of the goal (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,
    /// Last day of the goal (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,
    /// Currency code, defaults to the configured currency
    #[arg(long)]
    currency_code: Option<String>,
    /// Currency symbol, defaults to the configured currency
    #[arg(long)]
    currency_symbol: Option<String>,
}

#[derive(Args)]
struct EditGoalArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    target: Option<f64>,
    #[arg(long)]
    start: Option<NaiveDate>,
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Currency code; requires --currency-symbol
    #[arg(long, requires = "currency_symbol")]
    currency_code: Option<String>,
    /// Currency symbol; requires --currency-code
    #[arg(long, requires = "currency_code")]
    currency_symbol: Option<String>,
}

impl From<Commands> for nestegg::AppCommand {
    fn from(cmd: Commands) -> nestegg::AppCommand {
        match cmd {
            Commands::Add {
                date,
                income,
                expenses,
            } => nestegg::AppCommand::Add {
                date,
                income,
                expenses,
            },
            Commands::Entries { limit } => nestegg::AppCommand::Entries { limit },
            Commands::Goal(GoalCommands::Set(args)) => nestegg::AppCommand::SetGoal(NewGoal {
                title: args.title,
                target_amount: args.target,
                start_date: args.start,
                end_date: args.end,
                currency_code: args.currency_code,
                currency_symbol: args.currency_symbol,
            }),
            Commands::Goal(GoalCommands::Show) => nestegg::AppCommand::ShowGoal,
            Commands::Goal(GoalCommands::Edit(args)) => {
                let currency = args
                    .currency_code
                    .zip(args.currency_symbol)
                    .map(|(code, symbol)| Currency { code, symbol });
                nestegg::AppCommand::EditGoal(GoalUpdate {
                    title: args.title,
                    target_amount: args.target,
                    start_date: args.start,
                    end_date: args.end,
                    currency,
                })
            }
            Commands::Goal(GoalCommands::History) => nestegg::AppCommand::GoalHistory,
            Commands::Status => nestegg::AppCommand::Status,
            Commands::Stats => nestegg::AppCommand::Stats,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => nestegg::cli::setup::setup_at_path(path),
            None => nestegg::cli::setup::setup(),
        },
        Some(cmd) => nestegg::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
