use serde::{Deserialize, Serialize};

/// Entry of the most-active list. Identity is the ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub symbol: String,
    pub company_name: String,
}

/// Snapshot of a company's latest price and price change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub company_name: String,
    pub symbol: String,
    pub latest_price: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoRef {
    pub url: String,
}

/// Order companies by display name, case-sensitive.
pub fn sort_by_name(companies: &mut [Company]) {
    companies.sort_by(|a, b| a.company_name.cmp(&b.company_name));
}
