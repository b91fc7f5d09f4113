//! `session-schedule` command line entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use session_schedule::adapters::{HttpGraphQLClient, HttpGraphQLConfig};
use session_schedule::application::{
    GetSessionsByDayHandler, GetSessionsByDayQuery, GetSessionsByRoomHandler,
    GetSessionsByRoomQuery,
};
use session_schedule::config::{AppConfig, LogConfig};
use session_schedule::domain::foundation::{DayIndex, RoomId};
use session_schedule::domain::schedule::ScheduleError;
use session_schedule::ports::GraphQLClient;

#[derive(Debug, Parser)]
#[command(name = "session-schedule", version, about = "Print conference sessions from the CMS")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sessions held in one room on one day
    ByRoom {
        /// CMS record id of the room
        #[arg(long)]
        room: RoomId,

        /// Zero-based day index
        #[arg(long, default_value = "0")]
        day: DayIndex,
    },
    /// Every session on one day
    ByDay {
        /// Zero-based day index
        #[arg(long, default_value = "0")]
        day: DayIndex,
    },
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn log_failure(err: &ScheduleError) {
    if err.is_not_found() {
        tracing::warn!(code = %err.code(), "{}", err);
    } else {
        tracing::error!(code = %err.code(), "{}", err);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.log);

    let client: Arc<dyn GraphQLClient> = Arc::new(
        HttpGraphQLClient::new(HttpGraphQLConfig::from(&config.cms))
            .context("failed to build CMS client")?,
    );

    let output = match cli.command {
        Command::ByRoom { room, day } => {
            let handler = GetSessionsByRoomHandler::new(client);
            let result = handler
                .handle(GetSessionsByRoomQuery {
                    room_id: room,
                    day,
                })
                .await
                .inspect_err(log_failure)?;
            serde_json::to_string_pretty(&result)?
        }
        Command::ByDay { day } => {
            let handler = GetSessionsByDayHandler::new(client);
            let result = handler
                .handle(GetSessionsByDayQuery { day })
                .await
                .inspect_err(log_failure)?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{}", output);
    Ok(())
}
