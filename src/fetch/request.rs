use std::fmt;

use reqwest::Url;

use crate::config::ApiConfig;
use crate::error::{FetchError, FetchResult};

/// Which endpoint a request targets, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    CompanyList,
    Quote,
    Logo,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::CompanyList => "company list",
            ResourceKind::Quote => "quote",
            ResourceKind::Logo => "logo",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A request variant together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    CompanyList,
    Quote { symbol: String },
    Logo { symbol: String },
}

impl Resource {
    pub fn quote(symbol: impl Into<String>) -> Self {
        Resource::Quote {
            symbol: symbol.into(),
        }
    }

    pub fn logo(symbol: impl Into<String>) -> Self {
        Resource::Logo {
            symbol: symbol.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::CompanyList => ResourceKind::CompanyList,
            Resource::Quote { .. } => ResourceKind::Quote,
            Resource::Logo { .. } => ResourceKind::Logo,
        }
    }
}

/// Build the endpoint URL for `resource`. Pure; the token always lands in the `token` query pair.
pub fn build_url(config: &ApiConfig, resource: &Resource) -> FetchResult<Url> {
    let mut url = Url::parse(&config.base_url).map_err(|err| {
        FetchError::invalid_request(format!("invalid base URL `{}`: {err}", config.base_url))
    })?;

    let segments: Vec<&str> = match resource {
        Resource::CompanyList => vec!["stock", "market", "list", "mostactive"],
        Resource::Quote { symbol } => vec!["stock", require_symbol(symbol)?, "quote"],
        Resource::Logo { symbol } => vec!["stock", require_symbol(symbol)?, "logo"],
    };

    url.path_segments_mut()
        .map_err(|_| {
            FetchError::invalid_request(format!(
                "base URL `{}` cannot carry path segments",
                config.base_url
            ))
        })?
        .pop_if_empty()
        .extend(segments);

    url.query_pairs_mut().append_pair("token", &config.token);

    Ok(url)
}

/// URL without its query, safe to log.
pub fn redacted(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}

fn require_symbol(symbol: &str) -> FetchResult<&str> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        Err(FetchError::invalid_request("ticker symbol must not be empty"))
    } else {
        Ok(trimmed)
    }
}
