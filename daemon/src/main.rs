//! Energy daemon: entry point for serving the Energy ledger.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use energy_ledger::{EnergyConfig, EnergyLedger};
use energy_rpc::{RpcServer, RpcState};
use energy_store_lmdb::LmdbEnvironment;
use energy_utils::LogFormat;
use energy_verifier::RemoteVerifier;

#[derive(Parser)]
#[command(name = "energy-daemon", about = "Energy accrual and spend ledger daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "ENERGY_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the LMDB environment.
    #[arg(long, env = "ENERGY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Address for the HTTP server, e.g. "0.0.0.0:7077".
    #[arg(long, env = "ENERGY_LISTEN")]
    listen: Option<String>,

    /// Application id spend proofs are scoped to.
    #[arg(long, env = "ENERGY_APP_ID")]
    app_id: Option<String>,

    /// URL of the remote proof verification service.
    #[arg(long, env = "ENERGY_VERIFIER_URL")]
    verifier_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ENERGY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ENERGY_LOG_FORMAT")]
    log_format: Option<String>,
}

impl Cli {
    /// Layer CLI flags and env vars over the file (or default) config.
    fn into_config(self) -> anyhow::Result<EnergyConfig> {
        let base = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                EnergyConfig::from_toml_file(&path)
                    .with_context(|| format!("loading config file {path}"))?
            }
            None => EnergyConfig::default(),
        };
        Ok(EnergyConfig {
            data_dir: self.data_dir.unwrap_or(base.data_dir),
            listen_addr: self.listen.unwrap_or(base.listen_addr),
            app_id: self.app_id.unwrap_or(base.app_id),
            verifier_url: self.verifier_url.unwrap_or(base.verifier_url),
            log_level: self.log_level.unwrap_or(base.log_level),
            log_format: self.log_format.unwrap_or(base.log_format),
            ..base
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone();
    let config = cli.into_config()?;

    let format: LogFormat = config.log_format.parse()?;
    energy_utils::init_tracing(format, &config.log_level);
    if let Some(path) = config_path {
        tracing::info!("Loaded config from {}", path.display());
    }

    let env = LmdbEnvironment::open(&config.data_dir, config.map_size)
        .with_context(|| format!("opening LMDB at {}", config.data_dir.display()))?;
    // The blocking HTTP client owns its own runtime and must be built off
    // the async executor.
    let verifier_url = config.verifier_url.clone();
    let timeout = Duration::from_secs(config.verifier_timeout_secs);
    let verifier =
        tokio::task::spawn_blocking(move || RemoteVerifier::new(verifier_url, timeout)).await??;

    let ledger = EnergyLedger::new(
        Arc::new(env.identity_store()),
        Arc::new(verifier),
        config.action_context(),
        config.params.clone(),
    )?;
    tracing::info!(
        "Starting Energy ledger for {} (data: {}, verifier: {})",
        config.app_id,
        config.data_dir.display(),
        config.verifier_url,
    );

    let server = RpcServer::new(config.listen_addr.clone(), Arc::new(RpcState::new(ledger)));
    server
        .start_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, stopping server");
        })
        .await?;

    tracing::info!("Energy daemon stopped");
    Ok(())
}
