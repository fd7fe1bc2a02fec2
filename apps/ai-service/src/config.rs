use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at
/// startup. Fails fast if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source, so tests can
    /// supply values without mutating process-wide environment state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            openai_api_key: require(&lookup, "OPENAI_API_KEY")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
