use std::time::Duration;

pub mod loader;
pub mod validator;

pub use loader::{expand_env_vars, load_api_config};
pub use validator::validate_api_config;

pub const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable";
pub const TOKEN_ENV_VAR: &str = "IEX_TOKEN";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how issue reports are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub recipient: String,
    pub subject: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recipient: "support@example.com".to_string(),
            subject: "Report a problem in app".to_string(),
        }
    }
}

/// Connection settings for the market-data API, passed explicitly into the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub name: String,
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    pub report: ReportConfig,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: "IEX Cloud".to_string(),
            base_url: base_url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            report: ReportConfig::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config;

impl Config {
    /// IEX Cloud defaults; the token is read from `IEX_TOKEN` when set.
    pub fn builtin() -> ApiConfig {
        let token = std::env::var(TOKEN_ENV_VAR).unwrap_or_default();
        ApiConfig::new(DEFAULT_BASE_URL, token)
    }
}
