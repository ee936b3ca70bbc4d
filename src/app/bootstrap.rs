use std::sync::Arc;

use log::info;
use tokio::io::BufReader;

use crate::cli::{Cli, Commands};
use crate::config::{load_api_config, validate_api_config, ApiConfig, Config};
use crate::error::{AppError, Context, Result};
use crate::fetch::{Fetcher, HttpTransport, ResourceKind};
use crate::records::sort_by_name;
use crate::ui::{interactive, ConsolePresenter};

use super::alert::Failure;
use super::controller::SelectionController;
use super::presenter::{Presenter, QuoteView};

/// Entry point used by `main`: resolve settings, then dispatch the subcommand.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    info!("using {} at {}", config.name, config.base_url);
    let fetcher = Fetcher::from_config(config)?;

    match cli.command() {
        Commands::Companies => {
            show_companies(&fetcher, &mut ConsolePresenter::stdout()).await
        }
        Commands::Quote { symbol } => {
            show_quote(&fetcher, &symbol, &mut ConsolePresenter::stdout()).await
        }
        Commands::Interactive => {
            let mut controller =
                SelectionController::new(Arc::new(fetcher), ConsolePresenter::stdout());
            interactive::run(&mut controller, BufReader::new(tokio::io::stdin())).await
        }
    }
}

/// Settings file (or built-in defaults) with command-line overrides applied, then validated.
pub fn resolve_config(cli: &Cli) -> Result<ApiConfig> {
    let mut config = match &cli.config {
        Some(path) => load_api_config(path)
            .with_context(|| format!("Failed to load API settings from {}", path.display()))?,
        None => Config::builtin(),
    };

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.trim_end_matches('/'));
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token.trim());
    }

    validate_api_config(&config)?;
    Ok(config)
}

pub async fn show_companies<C, P>(fetcher: &Fetcher<C>, presenter: &mut P) -> Result<()>
where
    C: HttpTransport,
    P: Presenter,
{
    match fetcher.companies().await {
        Ok(mut companies) => {
            sort_by_name(&mut companies);
            presenter.companies_loaded(&companies);
            Ok(())
        }
        Err(err) => {
            presenter.alert(&Failure::new(ResourceKind::CompanyList, err.clone()).alert());
            Err(AppError::Fetch(err))
        }
    }
}

/// Quote and logo are requested together; only a missing quote fails the command.
pub async fn show_quote<C, P>(fetcher: &Fetcher<C>, symbol: &str, presenter: &mut P) -> Result<()>
where
    C: HttpTransport,
    P: Presenter,
{
    let symbol = symbol.trim().to_uppercase();
    let (quote, logo) = tokio::join!(fetcher.quote(&symbol), fetcher.logo(&symbol));

    let outcome = match quote {
        Ok(quote) => {
            presenter.quote_ready(&QuoteView::from(&quote));
            Ok(())
        }
        Err(err) => {
            presenter.alert(&Failure::new(ResourceKind::Quote, err.clone()).alert());
            Err(AppError::Fetch(err))
        }
    };

    match logo {
        Ok(logo) => presenter.logo_ready(&logo),
        Err(err) => {
            presenter.alert(&Failure::new(ResourceKind::Logo, err).alert());
            presenter.logo_fallback();
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    use crate::fetch::stub::ScriptedTransport;

    fn fetcher(transport: ScriptedTransport) -> Fetcher<ScriptedTransport> {
        Fetcher::new(ApiConfig::new("http://stub.test", "sk_test"), transport)
    }

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn flags_override_settings_file() {
        let dir = std::env::temp_dir().join(format!("stocks_cli_bootstrap_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("api.json");
        fs::write(
            &path,
            r#"{"name":"Local","base_url":"http://localhost:9000/v1","token":"from_file","timeout_ms":500}"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "stocks",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://localhost:9001/v2/",
            "--token",
            "from_flag",
            "companies",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.name, "Local");
        assert_eq!(config.base_url, "http://localhost:9001/v2");
        assert_eq!(config.token, "from_flag");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn blank_token_is_rejected() {
        let cli = Cli::parse_from(["stocks", "--token", "  ", "companies"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[tokio::test]
    async fn companies_are_printed_sorted() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "/stock/market/list/mostactive",
            200,
            r#"[{"symbol":"MSFT","companyName":"Microsoft Corp."},{"symbol":"AAPL","companyName":"Apple Inc."}]"#,
        );
        let mut presenter = ConsolePresenter::new(Vec::new());
        show_companies(&fetcher(transport), &mut presenter).await.unwrap();

        let text = output(presenter);
        let apple = text.find("Apple Inc.").unwrap();
        let microsoft = text.find("Microsoft Corp.").unwrap();
        assert!(apple < microsoft);
    }

    #[tokio::test]
    async fn quote_survives_missing_logo() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "/stock/AAPL/quote",
            200,
            r#"{"companyName":"Apple Inc.","symbol":"AAPL","latestPrice":150.0,"change":1.0}"#,
        );
        transport.fail("/stock/AAPL/logo", "connection reset");
        let mut presenter = ConsolePresenter::new(Vec::new());
        show_quote(&fetcher(transport), "aapl", &mut presenter).await.unwrap();

        let text = output(presenter);
        assert!(text.contains("Apple Inc. (AAPL)  price 150.00"));
        assert!(text.contains("Company logo is not available"));
        assert!(text.contains("logo (default image)"));
    }

    #[tokio::test]
    async fn unknown_quote_fails_the_command() {
        let transport = ScriptedTransport::new();
        let mut presenter = ConsolePresenter::new(Vec::new());
        let err = show_quote(&fetcher(transport), "NOPE", &mut presenter)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Fetch(_)));
        assert!(output(presenter).contains("Company quotes missing"));
    }
}
