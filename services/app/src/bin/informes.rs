//! services/app/src/bin/informes.rs

use app_lib::{
    bootstrap::{build_collaborators, build_shell},
    config::Config,
    error::AppError,
    shell::HELP,
};
use tokio::io::{stdin, stdout, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// One logical UI thread: input events and background completions interleave
// on the same executor thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(locale = ?config.locale, "Configuration loaded. Starting client...");

    // --- 2. Initialize Collaborators & Screens ---
    let collaborators = build_collaborators(&config)?;
    let mut shell = build_shell(&config, collaborators);

    // --- 3. Run the Read Loop ---
    let mut out = stdout();
    out.write_all(format!("{}\n", HELP).as_bytes()).await?;
    shell.run(BufReader::new(stdin()), out).await?;

    info!("Client stopped.");
    Ok(())
}
