pub mod server;
pub mod supabase;

use eyre::Context;
use std::env;

#[derive(Clone, Debug)]
pub struct Configuration {
    pub server: server::Configuration,
    pub supabase: supabase::Configuration,
}

impl Configuration {
    /// Load the configuration from the process environment
    ///
    /// A `.env` file in the working directory (or any of its parents) is loaded first, if present.
    /// Variables that are already set take precedence over the ones from the file.
    pub fn load() -> eyre::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::vars())
    }

    /// Build the configuration from an iterator of environment variables
    pub fn from_vars<I>(vars: I) -> eyre::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let server: server::Configuration = envy::prefixed("SERVER_")
            .from_iter(vars.iter().cloned())
            .context("Failed to parse the server configuration")?;

        let supabase: supabase::Configuration = envy::prefixed("SUPABASE_")
            .from_iter(vars)
            .context("SUPABASE_URL and SUPABASE_KEY must be set")?;
        supabase.validate()?;

        Ok(Self { server, supabase })
    }
}
