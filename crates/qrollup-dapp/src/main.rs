//! qrollup dapp entry point.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrollup_adapter_sim::SimulatorBackend;
use qrollup_dapp::{App, Config, Dispatcher, RollupClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("HTTP rollup_server url is {}", config.rollup_server);

    let rollup = RollupClient::new(&config.rollup_server, config.http_timeout())?;
    let backend = match config.seed {
        Some(seed) => SimulatorBackend::with_seed(seed),
        None => SimulatorBackend::new(),
    };
    info!(
        "Register of {} qubits, {} shots per measurement",
        config.num_qubits, config.shots
    );

    let dispatcher = Dispatcher::new(backend, config.num_qubits).with_shots(config.shots);
    let mut app = App::new(rollup, dispatcher).with_retry_delay(config.retry_delay());
    app.run().await;

    Ok(())
}
