use color_eyre::eyre;
use snapfeed_config::Configuration;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn boot() -> eyre::Result<()> {
    let config = Configuration::load()?;
    snapfeed_observability::initialise()?;

    let state = snapfeed::initialise_state(&config)?;
    let shutdown_signal = snapfeed::signal::shutdown();

    snapfeed::http::run(state, config.server, shutdown_signal).await
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(boot())
}
