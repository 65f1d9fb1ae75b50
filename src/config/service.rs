use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CorrectorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://world.openfoodfacts.org";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_DELAY_SECONDS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = concat!("off-brand-corrector/", env!("CARGO_PKG_VERSION"));

/// Catalog service settings, optionally read from a TOML file.
///
/// ```toml
/// [service]
/// base_url = "http://world.openfoodfacts.org"
/// timeout_seconds = 30
/// user_agent = "off-brand-corrector/0.1"
///
/// [throttle]
/// delay_seconds = 60
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub throttle: ThrottleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleSection {
    /// Pause after each committed update.
    pub delay_seconds: u64,
}

impl Default for ThrottleSection {
    fn default() -> Self {
        Self {
            delay_seconds: DEFAULT_DELAY_SECONDS,
        }
    }
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CorrectorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CorrectorError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.service.base_url = base_url.into();
        self
    }

    pub fn with_delay_seconds(mut self, delay_seconds: u64) -> Self {
        self.throttle.delay_seconds = delay_seconds;
        self
    }
}

impl ConfigProvider for ServiceConfig {
    fn base_url(&self) -> &str {
        self.service.base_url.trim_end_matches('/')
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.service.user_agent
    }

    fn update_delay(&self) -> Duration {
        Duration::from_secs(self.throttle.delay_seconds)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.base_url", &self.service.base_url)?;
        validate_range("service.timeout_seconds", self.service.timeout_seconds, 1, 600)?;
        validate_non_empty_string("service.user_agent", &self.service.user_agent)?;
        validate_range("throttle.delay_seconds", self.throttle.delay_seconds, 0, 3600)?;
        Ok(())
    }
}
