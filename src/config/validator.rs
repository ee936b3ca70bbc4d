use reqwest::Url;

use crate::error::{AppError, Result};

use super::ApiConfig;

/// Reject configurations that could never produce a valid request.
pub fn validate_api_config(config: &ApiConfig) -> Result<()> {
    let url = Url::parse(&config.base_url).map_err(|err| {
        AppError::message(format!("base_url `{}` is not a valid URL: {err}", config.base_url))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::message(format!(
            "base_url must use http or https, found `{}`",
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() {
        return Err(AppError::message(format!(
            "base_url `{}` cannot carry path segments",
            config.base_url
        )));
    }

    if url.query().is_some() {
        return Err(AppError::message(
            "base_url must not carry a query string; the token is appended per request",
        ));
    }

    if config.token.trim().is_empty() {
        return Err(AppError::message(
            "API token is empty; set IEX_TOKEN or pass --token",
        ));
    }

    if config.timeout.is_zero() {
        return Err(AppError::message("timeout_ms must be greater than zero"));
    }

    if !config.report.recipient.contains('@') {
        return Err(AppError::message(format!(
            "report recipient `{}` is not an e-mail address",
            config.report.recipient
        )));
    }

    Ok(())
}
