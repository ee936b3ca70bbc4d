use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{FetchResult, Result};
use crate::records::{Company, LogoRef, Quote};

use super::decode::{check_status, decode_body};
use super::request::{build_url, redacted, Resource};
use super::transport::{HttpTransport, ReqwestTransport};

/// Typed fetch-decode pipeline: one attempt per call, no retries.
pub struct Fetcher<C = ReqwestTransport> {
    config: ApiConfig,
    transport: C,
}

impl Fetcher<ReqwestTransport> {
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<C: HttpTransport> Fetcher<C> {
    pub fn new(config: ApiConfig, transport: C) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Fetch `resource` and decode it as `T`. Either a complete value or an error, never a partial record.
    pub async fn fetch<T: DeserializeOwned>(&self, resource: &Resource) -> FetchResult<T> {
        let url = build_url(&self.config, resource)?;
        debug!("GET {} ({})", redacted(&url), resource.kind());

        let outcome = async {
            let response = self.transport.get(&url).await?;
            check_status(&response)?;
            decode_body::<T>(&response.body)
        }
        .await;

        if let Err(err) = &outcome {
            warn!("{} request failed: {}", resource.kind(), err);
        }
        outcome
    }

    pub async fn companies(&self) -> FetchResult<Vec<Company>> {
        self.fetch(&Resource::CompanyList).await
    }

    pub async fn quote(&self, symbol: &str) -> FetchResult<Quote> {
        self.fetch(&Resource::quote(symbol)).await
    }

    pub async fn logo(&self, symbol: &str) -> FetchResult<LogoRef> {
        self.fetch(&Resource::logo(symbol)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::stub::ScriptedTransport;

    fn fetcher(transport: ScriptedTransport) -> Fetcher<ScriptedTransport> {
        Fetcher::new(ApiConfig::new("http://stub.test", "sk_test"), transport)
    }

    #[tokio::test]
    async fn decodes_quote_on_200() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "/stock/AAPL/quote",
            200,
            r#"{"companyName":"Apple Inc.","symbol":"AAPL","latestPrice":150.0,"change":-2.5}"#,
        );
        let fetcher = fetcher(transport);

        let quote = fetcher.quote("AAPL").await.unwrap();
        assert_eq!(quote.company_name, "Apple Inc.");
        assert!((quote.latest_price - 150.0).abs() < 1e-9);
        assert!((quote.change + 2.5).abs() < 1e-9);
        assert_eq!(
            fetcher.transport().requests(),
            vec!["http://stub.test/stock/AAPL/quote?token=sk_test".to_string()]
        );
    }

    #[tokio::test]
    async fn non_200_is_transport_error() {
        let transport = ScriptedTransport::new();
        transport.respond("/stock/AAPL/quote", 404, "Unknown symbol");
        let err = fetcher(transport).quote("AAPL").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn connectivity_failure_is_transport_error() {
        let transport = ScriptedTransport::new();
        transport.fail("/stock/market/list/mostactive", "connection failed");
        let err = fetcher(transport).companies().await.unwrap_err();
        assert_eq!(err, FetchError::Transport("connection failed".to_string()));
    }

    #[tokio::test]
    async fn partial_quote_is_decode_error() {
        let transport = ScriptedTransport::new();
        transport.respond("/stock/AAPL/quote", 200, r#"{"symbol":"AAPL"}"#);
        let err = fetcher(transport).quote("AAPL").await.unwrap_err();
        match err {
            FetchError::Decode { detail } => assert!(detail.contains("missing field")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_request_never_hits_transport() {
        let fetcher = fetcher(ScriptedTransport::new());
        let err = fetcher.logo("").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
        assert!(fetcher.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn decodes_company_list_in_response_order() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "/stock/market/list/mostactive",
            200,
            r#"[{"symbol":"MSFT","companyName":"Microsoft Corp."},{"symbol":"AAPL","companyName":"Apple Inc."}]"#,
        );
        let companies = fetcher(transport).companies().await.unwrap();
        let symbols: Vec<&str> = companies.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, ["MSFT", "AAPL"]);
    }
}
