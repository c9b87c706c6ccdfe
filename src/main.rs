use anyhow::{Context, Result};
use hostcrab::{Config, RecordSet, SharedConfig, SharedRecords};
use is_terminal::IsTerminal;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = config_init(std::env::args().nth(1))?;
    let records = RecordSet::try_from_file(&config.records_path)
        .await
        .with_context(|| format!("failed to load DNS records from {}", config.records_path))?;
    tracing::info!(
        "loaded {} record(s) from {}",
        records.len(),
        config.records_path
    );
    let records = Arc::new(SharedRecords::new(records));

    let dns_server = hostcrab::dns::new(config.clone(), records.clone())
        .await
        .with_context(|| format!("failed to bind UDP {}", config.dns_udp_bind_addr))?;
    tracing::info!("DNS listening on UDP {}", dns_server.local_addr()?);
    let dns_handle = tokio::spawn(dns_server.block_until_done());

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        res = dns_handle => {
            res.context("DNS server task failed")?;
        },
        res = reload_on_hangup(config.clone(), records) => {
            res?;
        },
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostcrab=info".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<SharedConfig> {
    match config_file {
        None => {
            tracing::debug!("no config file given, using defaults");
            Ok(Arc::new(Config::default()))
        }
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)
                .with_context(|| format!("failed to load config from {config_file}"))?;
            tracing::debug!("loaded config from {config_file}");
            Ok(Arc::new(config))
        }
    }
}

/// Reload the record file each time the process receives `SIGHUP`.
#[cfg(unix)]
async fn reload_on_hangup(config: SharedConfig, records: Arc<SharedRecords>) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangups = signal(SignalKind::hangup())?;
    while hangups.recv().await.is_some() {
        match records.reload_from(&config.records_path).await {
            Ok(count) => tracing::info!(
                "reloaded {count} record(s) from {}",
                config.records_path
            ),
            Err(err) => tracing::warn!(
                "failed to reload {}, still serving previous records: {err}",
                config.records_path
            ),
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn reload_on_hangup(_config: SharedConfig, _records: Arc<SharedRecords>) -> Result<()> {
    std::future::pending().await
}
