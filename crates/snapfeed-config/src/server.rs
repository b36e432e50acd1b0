use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Largest backend response body accepted, in bytes
    ///
    /// `listPosts` fetches the whole feed in one response, so this bounds the feed size.
    #[serde(default = "default_backend_body_limit")]
    pub backend_body_limit: usize,
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_backend_body_limit() -> usize {
    64 * 1024 * 1024
}

fn default_graphiql() -> bool {
    true
}
