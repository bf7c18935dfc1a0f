use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};

use huddle_db::{ConnectError, ConnectionDescriptor, Database};

const DEFAULT_DESCRIPTOR: &str = "connection.conf";

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huddle_apply=info,huddle_db=info".into()),
        )
        .init();

    let path = descriptor_path();

    // A missing descriptor is the one precondition with its own exit
    // code; everything past this point is a database failure.
    let descriptor = match ConnectionDescriptor::load(&path) {
        Ok(descriptor) => descriptor,
        Err(e @ ConnectError::MissingDescriptor(_)) => {
            error!("{e}; generate it before applying the schema");
            return ExitCode::from(1);
        }
        Err(e) => {
            error!("{:#}", anyhow::Error::new(e));
            return ExitCode::from(2);
        }
    };

    match run(&descriptor).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Descriptor path: first positional argument, else HUDDLE_CONNECTION_FILE,
/// else ./connection.conf.
fn descriptor_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HUDDLE_CONNECTION_FILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR))
}

async fn run(descriptor: &ConnectionDescriptor) -> anyhow::Result<()> {
    let db = Database::connect(descriptor)
        .await
        .context("could not open database connection")?;

    let applied = db.apply_schema().await.context("schema apply failed")?;
    info!(
        "Schema applied: {} statement(s) executed, {} skipped",
        applied.executed, applied.skipped
    );
    Ok(())
}
