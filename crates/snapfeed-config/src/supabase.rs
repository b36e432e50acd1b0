use eyre::{bail, Context};
use serde::Deserialize;
use smol_str::SmolStr;
use std::fmt;
use url::Url;

/// Connection details of the Supabase project
#[derive(Clone, Deserialize)]
pub struct Configuration {
    /// Project URL (`SUPABASE_URL`)
    pub url: SmolStr,

    /// Project API key (`SUPABASE_KEY`)
    pub key: SmolStr,
}

impl Configuration {
    pub(crate) fn validate(&self) -> eyre::Result<()> {
        if self.url.trim().is_empty() {
            bail!("SUPABASE_URL must not be empty");
        }

        if self.key.trim().is_empty() {
            bail!("SUPABASE_KEY must not be empty");
        }

        Url::parse(&self.url).context("SUPABASE_URL is not a valid URL")?;

        Ok(())
    }
}

// The key is a secret. Keep it out of logs.
impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("url", &self.url)
            .field("key", &"[redacted]")
            .finish()
    }
}
