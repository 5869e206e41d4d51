// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use spindle_config::{load as load_config, DiscogsSettings};
use spindle_discogs::{
    CancellationToken, Currency, DiscogsClient, DiscogsConfig, EntityType, ReleaseOptions,
    SearchOptions,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Look up releases, masters, artists and labels in the Discogs database.
#[derive(Parser, Debug)]
#[command(name = "spindle", version, about, propagate_version = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "SPINDLE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a release by ID
    Release {
        id: u64,
        /// Currency for marketplace prices (e.g. USD, EUR)
        #[arg(long)]
        currency: Option<Currency>,
    },
    /// Fetch a master release by ID
    Master { id: u64 },
    /// Fetch an artist by ID
    Artist { id: u64 },
    /// Fetch a label by ID
    Label { id: u64 },
    /// Search the database (needs a consumer key and secret)
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    query: String,
    /// release, master, artist or label
    #[arg(long = "type")]
    entity_type: Option<EntityType>,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

impl SearchArgs {
    fn into_options(self) -> SearchOptions {
        let mut options = SearchOptions::new(self.query);
        options.entity_type = self.entity_type;
        options.artist = self.artist;
        options.year = self.year;
        options.pagination.page = self.page;
        options.pagination.per_page = self.per_page;
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    let client = build_client(&config.discogs)?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.cancel();
    });

    let output = run(&client, &cancel, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(
    client: &DiscogsClient,
    cancel: &CancellationToken,
    command: Command,
) -> Result<serde_json::Value> {
    debug!(target: "cli", ?command, "running command");
    let output = match command {
        Command::Release { id, currency } => {
            let options = ReleaseOptions { currency };
            serde_json::to_value(client.release(cancel, id, &options).await?)?
        }
        Command::Master { id } => serde_json::to_value(client.master_release(cancel, id).await?)?,
        Command::Artist { id } => serde_json::to_value(client.artist(cancel, id).await?)?,
        Command::Label { id } => serde_json::to_value(client.label(cancel, id).await?)?,
        Command::Search(args) => {
            serde_json::to_value(client.search(cancel, &args.into_options()).await?)?
        }
    };
    debug!(
        target: "cli",
        remaining = client.tokens(),
        "request finished"
    );
    Ok(output)
}

fn client_config(settings: &DiscogsSettings) -> DiscogsConfig {
    DiscogsConfig {
        app_name: settings.app_name.clone(),
        consumer_key: settings.consumer_key.clone(),
        consumer_secret: settings.consumer_secret.clone(),
        access_token: settings.access_token.clone(),
        max_requests: settings.max_requests,
    }
}

fn build_client(settings: &DiscogsSettings) -> Result<DiscogsClient> {
    let client = DiscogsClient::builder(client_config(settings))
        .base_url(settings.base_url.as_str())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    Ok(client)
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let mut terminate =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(error) => {
                debug!(target: "cli", %error, "could not install SIGTERM handler");
                return std::future::pending().await;
            }
        };

    #[cfg(unix)]
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = terminate.recv() => {},
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_err() {
            return std::future::pending().await;
        }
    }

    info!(target: "cli", "shutdown signal received, cancelling request");
}
