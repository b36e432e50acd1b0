use crate::{consts::VERSION, signal, state::Zustand};
use axum::{routing::get, Router};
use snapfeed_config::server::Configuration as ServerConfiguration;
use snapfeed_error::{snapfeed_error, Error, ErrorType};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod extractor;
pub mod graphql;

#[allow(clippy::unused_async)]
async fn health() -> &'static str {
    VERSION
}

#[allow(clippy::unused_async)]
async fn not_found() -> Error {
    snapfeed_error!(type = ErrorType::NotFound, "no route matched")
}

pub fn create_router(state: Zustand, server_config: &ServerConfiguration) -> Router {
    Router::new()
        .merge(graphql::routes(state.clone(), server_config.graphiql))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[instrument(skip_all, fields(port = %server_config.port))]
pub async fn run(
    state: Zustand,
    server_config: ServerConfiguration,
    shutdown_signal: signal::Receiver,
) -> eyre::Result<()> {
    let router = create_router(state, &server_config);
    let listener = TcpListener::bind(("0.0.0.0", server_config.port)).await?;
    info!(address = %listener.local_addr()?, "listening for requests");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal.wait())
        .await?;

    Ok(())
}
