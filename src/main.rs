mod alerts;
mod config;
mod notify;
mod scenario;
mod sessions;
mod telegram;
mod types;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use clap::builder::BoolishValueParser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::alerts::alert_pass::AlertPass;
use crate::alerts::state_store::StateStore;
use crate::config::AlertConfig;
use crate::scenario::delivery::Delivery;
use crate::scenario::scenario::Scenario;
use crate::sessions::schedule::Schedule;

/// Posts a message when an FX session is about to open or two sessions are
/// about to overlap. Meant to be run every few minutes by a scheduler.
#[derive(Debug, Clone, Parser)]
struct Args {
    /// Log alerts instead of sending them.
    #[arg(long, env = "DRY_RUN", value_parser = BoolishValueParser::new())]
    pub dry_run: bool,

    /// Send a single test message and exit.
    #[arg(long, env = "SEND_TEST_ALERT", value_parser = BoolishValueParser::new())]
    pub test_alert: bool,

    #[arg(long, env = "STATE_FILE", default_value = "state.json")]
    pub state_file: PathBuf,

    /// YAML session schedule; defaults to the built-in one.
    #[arg(long, env = "SESSION_SCHEDULE")]
    pub schedule: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("fx_session_alerts=info".parse()?),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = AlertConfig {
        delivery: Delivery::from_env(args.dry_run)?,
        state_file: args.state_file,
        schedule_path: args.schedule,
        send_test_alert: args.test_alert,
    };

    let schedule = Schedule::load(config.schedule_path.as_deref())?;
    info!(
        reference = %schedule.reference_timezone(),
        markets = schedule.markets().len(),
        overlaps = schedule.overlaps().len(),
        "schedule loaded"
    );

    let notifier = Scenario::notifier(&config.delivery)?;

    if config.send_test_alert {
        Scenario::send_test_alert(notifier.as_ref()).await;
        return Ok(());
    }

    let store = StateStore::new(&config.state_file);
    let outcome = AlertPass::new(&schedule, &store, notifier.as_ref())
        .run(Utc::now())
        .await?;

    info!(?outcome, state_file = %store.path().display(), "done");

    Ok(())
}
