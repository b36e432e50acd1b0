#[macro_use]
extern crate tracing;

pub mod consts;
pub mod context;
pub mod http;
pub mod model;
pub mod service;
pub mod signal;
pub mod state;

use self::{
    consts::USER_AGENT,
    service::{auth::AuthService, post::PostService},
    state::{Service, Zustand},
};
use eyre::Context;
use snapfeed_config::{
    server::Configuration as ServerConfiguration, supabase::Configuration as SupabaseConfiguration,
    Configuration,
};
use snapfeed_http_client::{Client as HttpClient, ClientBuilder as HttpClientBuilder};
use snapfeed_supabase::Client as SupabaseClient;
use std::time::Duration;

/// Assemble the application state on top of an existing HTTP client
///
/// This is the place the single backend client of the process gets created.
pub fn prepare_state(
    config: &SupabaseConfiguration,
    http_client: HttpClient,
) -> eyre::Result<Zustand> {
    let supabase = SupabaseClient::new(http_client, &config.url, &config.key)
        .context("Failed to construct the Supabase client")?;

    let service = Service::builder()
        .auth(AuthService::builder().client(supabase.clone()).build())
        .post(PostService::builder().client(supabase.clone()).build())
        .build();

    Ok(Zustand { supabase, service })
}

/// HTTP client settings for talking to the backend
pub fn http_client_builder(config: &ServerConfiguration) -> eyre::Result<HttpClientBuilder> {
    let builder = HttpClient::builder()
        .user_agent(USER_AGENT)?
        .body_limit(config.backend_body_limit)
        .timeout(Duration::from_secs(config.request_timeout_secs));

    Ok(builder)
}

pub fn initialise_state(config: &Configuration) -> eyre::Result<Zustand> {
    let http_client = http_client_builder(&config.server)?
        .build()
        .context("Failed to build the HTTP client")?;

    prepare_state(&config.supabase, http_client)
}
