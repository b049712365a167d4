//! Gym Manager command-line reports
//!
//! Usage:
//! ```bash
//! # Dashboard for a trainer
//! gym-manager dashboard --trainer <USER_ID>
//!
//! # One client's billing status and body composition
//! gym-manager client --id <CLIENT_ID> --as-of 2024-06-10
//!
//! # Overdue clients only
//! gym-manager clients --trainer <USER_ID> --filter overdue
//!
//! # Client counts and the five longest-overdue clients
//! gym-manager stats --trainer <USER_ID>
//! gym-manager overdue --trainer <USER_ID> --limit 5
//!
//! # Daily revenue for March 2024
//! gym-manager revenue --trainer <USER_ID> --year 2024 --month 3
//! ```

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use gym_manager_backend::{
    config, db,
    error::ServiceError,
    services::{AssessmentService, BillingService, ReportService},
    state::AppState,
};
use gym_manager_shared::ClientFilter;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "gym-manager",
    version,
    about = "Gym client billing and body composition reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Client counts, revenue and the overdue roster
    Dashboard {
        /// Trainer (user) ID
        #[arg(long)]
        trainer: Uuid,

        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Assessment of a single client
    Client {
        /// Client ID
        #[arg(long)]
        id: Uuid,

        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Assessments of a trainer's clients
    Clients {
        /// Trainer (user) ID
        #[arg(long)]
        trainer: Uuid,

        /// all, current or overdue; anything else lists all clients
        #[arg(long)]
        filter: Option<String>,

        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Total, current and overdue client counts
    Stats {
        /// Trainer (user) ID
        #[arg(long)]
        trainer: Uuid,

        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Overdue clients, longest overdue first
    Overdue {
        /// Trainer (user) ID
        #[arg(long)]
        trainer: Uuid,

        /// Maximum entries, defaults to the configured roster limit
        #[arg(long)]
        limit: Option<usize>,

        /// Reference date, defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Revenue per month of a year, or per day of a month
    Revenue {
        /// Trainer (user) ID
        #[arg(long)]
        trainer: Uuid,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Month (1-12) for a daily breakdown
        #[arg(long)]
        month: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Gym Manager"
    );

    let db_pool = db::create_pool(&config.database).await?;
    db::health_check(&db_pool).await?;

    if config.database.run_migrations && !config::AppConfig::is_production() {
        db::run_migrations(&db_pool).await?;
    }

    let state = AppState::new(db_pool, config);

    match run(&state, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            error!(code = err.code(), "Command failed");
            anyhow::bail!("{}: {}", err.code(), err.public_message())
        }
    }
}

/// Execute a command and render its result as pretty JSON
async fn run(state: &AppState, command: Command) -> Result<String, ServiceError> {
    let settings = state.settings();
    let pool = state.db();

    match command {
        Command::Dashboard { trainer, as_of } => {
            let report = ReportService::dashboard(
                pool,
                trainer,
                reference_date(as_of),
                settings.overdue_policy,
                state.config().report.overdue_roster_limit,
            )
            .await?;
            to_json(&report)
        }
        Command::Client { id, as_of } => {
            let assessment =
                AssessmentService::assess_client(pool, id, reference_date(as_of), &settings).await?;
            to_json(&assessment)
        }
        Command::Clients {
            trainer,
            filter,
            as_of,
        } => {
            let filter = ClientFilter::parse_lenient(filter.as_deref());
            let clients = BillingService::list_clients(
                pool,
                trainer,
                filter,
                reference_date(as_of),
                &settings,
            )
            .await?;
            to_json(&clients)
        }
        Command::Stats { trainer, as_of } => {
            let stats = BillingService::statistics(
                pool,
                trainer,
                reference_date(as_of),
                settings.overdue_policy,
            )
            .await?;
            to_json(&stats)
        }
        Command::Overdue {
            trainer,
            limit,
            as_of,
        } => {
            let roster = BillingService::overdue_roster(
                pool,
                trainer,
                reference_date(as_of),
                settings.overdue_policy,
                limit.unwrap_or(state.config().report.overdue_roster_limit),
            )
            .await?;
            to_json(&roster)
        }
        Command::Revenue {
            trainer,
            year,
            month,
        } => {
            let series =
                ReportService::revenue(pool, trainer, reference_date(None), year, month).await?;
            to_json(&series)
        }
    }
}

fn reference_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ServiceError> {
    serde_json::to_string_pretty(value).map_err(|e| ServiceError::Internal(e.into()))
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout carries only the JSON report.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "gym_manager_backend=info,gym_manager=info".into()
        } else {
            "gym_manager_backend=debug,gym_manager=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
