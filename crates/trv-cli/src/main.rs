use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

use trv_adapters::host::{load_states_file, InMemoryHost};
use trv_app::card::ScheduleCard;
use trv_app::schedule_service::ScheduleService;
use trv_app::write_target::WriteTarget;
use trv_core::config::CardConfig;
use trv_core::schedule::Schedule;

#[derive(Parser)]
#[command(name = "trv-cli", about = "Inspect and apply TRV weekly schedules")]
struct Cli {
    /// JSON array of host entity states
    #[arg(long)]
    states: PathBuf,
    /// Card config, as a JSON file path or an inline JSON object
    #[arg(long)]
    config: String,
    /// Local wall-clock moment as YYYY-MM-DDTHH:MM (default: now)
    #[arg(long)]
    at: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print what the status card shows
    Status,
    /// Print the schedule as the device stores it
    Wire,
    /// Print the entity a schedule write would go to
    Resolve,
    /// Write a schedule and print the service calls issued
    Apply {
        /// Twelve-entry schedule string (default: the current schedule)
        #[arg(long)]
        wire: Option<String>,
    },
}

fn load_config(arg: &str) -> anyhow::Result<CardConfig> {
    let json = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        std::fs::read_to_string(arg).with_context(|| format!("reading config {arg}"))?
    };
    serde_json::from_str(&json).context("parsing card config")
}

fn moment(at: Option<&str>) -> anyhow::Result<NaiveDateTime> {
    match at {
        Some(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .with_context(|| format!("invalid --at value {s:?}")),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trv_app=info,trv_adapters=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let now = moment(cli.at.as_deref())?;
    let host = load_states_file(&cli.states)?;

    let mut card = ScheduleCard::new(config)?;
    let view = card
        .on_state_push(&host, now)
        .context("card unexpectedly in an edit session")?;
    let service = ScheduleService::new(host.clone(), host.clone());

    match cli.command {
        Command::Status => println!("{}", serde_json::to_string_pretty(&view)?),
        Command::Wire => println!("{}", card.schedule()),
        Command::Resolve => {
            let target = service.resolve(card.entity(), card.config().vendor_command)?;
            match target {
                WriteTarget::Text(id) => println!("text.set_value -> {id}"),
                WriteTarget::ClimateCommand(id) => {
                    println!("vendor send_command (climate.set_schedule fallback) -> {id}")
                }
            }
        }
        Command::Apply { wire } => {
            let schedule = match wire {
                Some(w) => match Schedule::from_wire(&w) {
                    Some(s) => s,
                    None => bail!("schedule string must contain exactly 12 entries"),
                },
                None => card.schedule().clone(),
            };
            apply(&service, &card, &schedule).await?;
        }
    }

    Ok(())
}

async fn apply(
    service: &ScheduleService<InMemoryHost, InMemoryHost>,
    card: &ScheduleCard,
    schedule: &Schedule,
) -> anyhow::Result<()> {
    let applied = service
        .apply(card.entity(), schedule, card.config().vendor_command)
        .await?;
    tracing::info!(write_target = %applied.target.entity_id(), "schedule written");
    println!("{}", serde_json::to_string_pretty(&service.caller().calls())?);
    Ok(())
}
