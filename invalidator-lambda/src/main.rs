use crate::config::load_invalidator_config;
use crate::core::start_function;
use invalidator_config::shared::InvalidatorConfig;
use invalidator_telemetry::init_tracing;
use tracing::error;

mod config;
mod core;

fn main() -> anyhow::Result<()> {
    let config = load_invalidator_config()?;

    init_tracing(env!("CARGO_BIN_NAME"))?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(config))?;

    Ok(())
}

async fn async_main(config: InvalidatorConfig) -> anyhow::Result<()> {
    if let Err(err) = start_function(config).await {
        error!("the invalidation function stopped: {err}");

        return Err(err);
    }

    Ok(())
}
