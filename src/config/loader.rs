use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::{AppError, Context, Result};

use super::{validator, ApiConfig, ReportConfig, DEFAULT_TIMEOUT};

/// Load an API definition from JSON, expanding `${VAR}` placeholders from the environment.
pub fn load_api_config(path: &Path) -> Result<ApiConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read API config JSON at {}", path.display()))?;

    let raw: RawApiConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse API config JSON at {}", path.display()))?;

    let config = raw.into_api_config()?;
    validator::validate_api_config(&config)?;

    Ok(config)
}

#[derive(Debug, Deserialize)]
struct RawApiConfig {
    #[serde(default = "default_name")]
    name: String,
    base_url: String,
    token: String,
    #[serde(default)]
    timeout_ms: Option<u64>,
    #[serde(default)]
    report: Option<RawReportConfig>,
}

fn default_name() -> String {
    "IEX Cloud".to_string()
}

impl RawApiConfig {
    fn into_api_config(self) -> Result<ApiConfig> {
        let token = expand_env_vars(&self.token)?;
        let base_url = expand_env_vars(&self.base_url)?;
        let timeout = self
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);
        let report = self
            .report
            .map(RawReportConfig::into_report)
            .unwrap_or_default();

        Ok(ApiConfig {
            name: self.name,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
            report,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawReportConfig {
    recipient: String,
    #[serde(default)]
    subject: Option<String>,
}

impl RawReportConfig {
    fn into_report(self) -> ReportConfig {
        let defaults = ReportConfig::default();
        ReportConfig {
            recipient: self.recipient,
            subject: self.subject.unwrap_or(defaults.subject),
        }
    }
}

/// Replace each `${VAR}` in a config value with the variable from the environment.
pub fn expand_env_vars(value: &str) -> Result<String> {
    expand_placeholders(value, |name| std::env::var(name).ok())
}

fn expand_placeholders<F>(value: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        expanded.push_str(&rest[..open]);
        let tail = &rest[open + 2..];
        let close = tail
            .find('}')
            .ok_or_else(|| AppError::message("Unterminated `${` placeholder in config value"))?;

        let name = tail[..close].trim();
        if name.is_empty() {
            return Err(AppError::message("Empty `${}` placeholder in config value"));
        }
        let resolved = lookup(name).ok_or_else(|| {
            AppError::message(format!(
                "Environment variable {name} referenced by config is not set"
            ))
        })?;

        expanded.push_str(&resolved);
        rest = &tail[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}
