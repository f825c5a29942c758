//! SmsVault daemon - serves the latest-SMS-backup HTTP endpoint.
//!
//! Configuration is read from the environment once at startup (deployment
//! mode, credentials path, optional credentials JSON); the listen address
//! comes from the command line.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use smsvault_common::Config;
use smsvault_server::{router, AppState};
use smsvault_storage::create_default_registry;

#[derive(Parser)]
#[command(name = "smsvaultd")]
#[command(about = "SmsVault - SMS backup retrieval service")]
#[command(version)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env();
    info!(
        "Starting in {:?} mode, credentials at {}",
        config.environment,
        config.credentials_path.display()
    );

    let registry = create_default_registry(&config);
    info!("Registered providers: {}", registry.providers().join(", "));

    let state = AppState::new(registry);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cli.listen))?;
    info!("Listening on http://{}", cli.listen);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
