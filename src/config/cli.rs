use super::{debug_enabled, ServiceConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

/// Printed instead of running when the credentials are missing.
pub const USAGE_LINES: [&str; 3] = [
    "Usage: off-brand-corrector USERNAME PASSWORD (DEBUG)",
    "Warning: with DEBUG at 0 the correction will be applied to the real OpenFoodFacts database.",
    "Warning: any other DEBUG value, or none, only prints the products to check.",
];

/// Last line of a run that went through the whole mapping.
pub const FINISHED_LINE: &str = "Ended";

/// Credentials are optional at the parser level so a short invocation
/// can print the usage block and exit cleanly.
#[derive(Clone, Parser)]
#[command(name = "off-brand-corrector")]
#[command(about = "Adds missing mother brands to Open Food Facts products")]
pub struct CliConfig {
    /// Catalog account name
    pub username: Option<String>,

    /// Catalog account password
    pub password: Option<String>,

    /// Any value other than 0 keeps debug mode (no writes) on
    pub debug: Option<String>,

    /// Positional arguments past DEBUG are ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Optional TOML file with service settings
    #[arg(long)]
    pub config: Option<String>,

    /// Override the catalog base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the pause after each committed update
    #[arg(long)]
    pub delay_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }

    pub fn debug_enabled(&self) -> bool {
        debug_enabled(self.debug.as_deref())
    }

    /// Load the service file (if any) and apply the command line overrides.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(delay) = self.delay_seconds {
            config = config.with_delay_seconds(delay);
        }

        config.validate()?;
        Ok(config)
    }
}
