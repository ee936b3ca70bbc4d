use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::alert::Resolution;
use crate::app::controller::SelectionController;
use crate::app::presenter::Presenter;
use crate::error::{AppError, Result};
use crate::fetch::HttpTransport;

use super::console::ConsolePresenter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Zero-based row in the company list.
    SelectRow(usize),
    SelectSymbol(String),
    Retry,
    ReloadCompanies,
    Report,
    List,
    Help,
    Exit,
    Empty,
    Unknown(String),
}

/// Single-letter shortcuts are lowercase only, so an uppercase `R` or `C` selects that ticker.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if let Some(symbol) = input
        .strip_prefix("s ")
        .or_else(|| input.strip_prefix("select "))
    {
        return symbol_command(symbol.trim());
    }

    match input {
        "r" => return Command::Retry,
        "c" => return Command::ReloadCompanies,
        "l" => return Command::List,
        "h" | "?" => return Command::Help,
        "q" => return Command::Exit,
        _ => {}
    }

    match input.to_lowercase().as_str() {
        "" => Command::Empty,
        "retry" => Command::Retry,
        "reload" => Command::ReloadCompanies,
        "report" => Command::Report,
        "list" | "ls" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Exit,
        _ => match input.parse::<usize>() {
            Ok(0) => Command::Unknown(input.to_string()),
            Ok(row) => Command::SelectRow(row - 1),
            Err(_) => symbol_command(input),
        },
    }
}

fn symbol_command(text: &str) -> Command {
    let is_ticker = !text.is_empty()
        && text
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-'));
    if is_ticker {
        Command::SelectSymbol(text.to_uppercase())
    } else {
        Command::Unknown(text.to_string())
    }
}

/// Drive the controller from line input until `exit` or end of input.
pub async fn run<R, W, C>(
    controller: &mut SelectionController<ConsolePresenter<W>, C>,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    C: HttpTransport + 'static,
{
    let mut lines = input.lines();

    controller.load_company_list();
    controller.settle().await;
    controller.presenter_mut().print_help();

    loop {
        controller.presenter_mut().prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = match parse_command(&line) {
            Command::Empty => Ok(()),
            Command::Exit => break,
            Command::Help => {
                controller.presenter_mut().print_help();
                Ok(())
            }
            Command::List => {
                let companies = controller.state().companies().to_vec();
                controller.presenter_mut().companies_loaded(&companies);
                Ok(())
            }
            Command::SelectRow(row) => controller.select_row(row),
            Command::SelectSymbol(symbol) => controller.select_company(&symbol),
            Command::ReloadCompanies => controller.retry(Resolution::ReloadCompanies),
            Command::Retry => retry_last(controller),
            Command::Report => {
                match controller.issue_report() {
                    Some(report) => controller.presenter_mut().print_report(&report),
                    None => controller.presenter_mut().note("Nothing to report."),
                }
                Ok(())
            }
            Command::Unknown(text) => Err(AppError::message(format!(
                "Unknown command `{text}`. Type `help` for the list."
            ))),
        };

        if let Err(err) = outcome {
            controller.presenter_mut().note(&err.to_string());
        }
        controller.settle().await;
    }

    Ok(())
}

fn retry_last<W, C>(controller: &mut SelectionController<ConsolePresenter<W>, C>) -> Result<()>
where
    W: Write,
    C: HttpTransport + 'static,
{
    let Some(resolution) = controller
        .state()
        .last_error()
        .map(|failure| failure.alert().resolution)
    else {
        controller.presenter_mut().note("Nothing to retry.");
        return Ok(());
    };

    if resolution == Resolution::Report {
        if let Some(report) = controller.issue_report() {
            controller.presenter_mut().print_report(&report);
        }
        return Ok(());
    }

    controller.retry(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::ApiConfig;
    use crate::fetch::stub::ScriptedTransport;
    use crate::fetch::Fetcher;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(" 2 "), Command::SelectRow(1));
        assert_eq!(parse_command("0"), Command::Unknown("0".to_string()));
        assert_eq!(parse_command("msft"), Command::SelectSymbol("MSFT".to_string()));
        assert_eq!(parse_command("BRK.B"), Command::SelectSymbol("BRK.B".to_string()));
        assert_eq!(parse_command("r"), Command::Retry);
        assert_eq!(parse_command("RETRY"), Command::Retry);
        assert_eq!(parse_command("reload"), Command::ReloadCompanies);
        assert_eq!(parse_command("exit"), Command::Exit);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("a b"), Command::Unknown("a b".to_string()));
    }

    #[test]
    fn uppercase_letters_select_single_letter_tickers() {
        for ticker in ["R", "C", "L", "H", "Q"] {
            assert_eq!(parse_command(ticker), Command::SelectSymbol(ticker.to_string()));
        }
        assert_eq!(parse_command("s q"), Command::SelectSymbol("Q".to_string()));
        assert_eq!(parse_command("select r"), Command::SelectSymbol("R".to_string()));
        assert_eq!(parse_command("q"), Command::Exit);
    }

    #[tokio::test]
    async fn retry_on_invalid_data_prints_report() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "/stock/market/list/mostactive",
            200,
            r#"[{"symbol":"MSFT","companyName":"Microsoft Corp."},{"symbol":"AAPL","companyName":"Apple Inc."}]"#,
        );
        transport.respond(
            "/stock/AAPL/quote",
            200,
            r#"{"companyName":"Apple Inc.","symbol":"AAPL","latestPrice":150.0,"change":0.0}"#,
        );
        transport.respond("/stock/AAPL/logo", 200, r#"{"url":"https://logos.test/AAPL.png"}"#);
        transport.respond("/stock/MSFT/quote", 200, r#"{"symbol":"MSFT"}"#);
        transport.respond("/stock/MSFT/logo", 200, r#"{"url":"https://logos.test/MSFT.png"}"#);

        let fetcher = Fetcher::new(ApiConfig::new("http://stub.test", "sk_test"), transport);
        let mut controller =
            SelectionController::new(Arc::new(fetcher), ConsolePresenter::new(Vec::new()));

        let input: &[u8] = b"2\nr\nGOOG\nexit\n";
        run(&mut controller, input).await.unwrap();

        assert_eq!(controller.state().selected_symbol(), Some("MSFT"));
        let text = output_of(controller);
        assert!(text.contains("Microsoft Corp. (MSFT)"));
        assert!(text.contains("Issue report draft"));
        assert!(text.contains("Resource: quote"));
        assert!(text.contains("GOOG"));
    }

    #[tokio::test]
    async fn output_shows_quote_alert_and_report() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "/stock/market/list/mostactive",
            200,
            r#"[{"symbol":"AAPL","companyName":"Apple Inc."}]"#,
        );
        transport.respond(
            "/stock/AAPL/quote",
            200,
            r#"{"companyName":"Apple Inc.","symbol":"AAPL","latestPrice":150.0,"change":0.0}"#,
        );
        transport.respond("/stock/AAPL/logo", 200, r#"{"link":"nope"}"#);

        let fetcher = Fetcher::new(ApiConfig::new("http://stub.test", "sk_test"), transport);
        let mut controller =
            SelectionController::new(Arc::new(fetcher), ConsolePresenter::new(Vec::new()));

        let input: &[u8] = b"report\n";
        run(&mut controller, input).await.unwrap();

        let text = output_of(controller);
        assert!(text.contains("price 150.00  change 0.00"));
        assert!(text.contains("Invalid data: Please report this issue"));
        assert!(text.contains("Subject: Report a problem in app"));
        assert!(text.contains("missing field `url`"));
    }

    fn output_of(
        controller: SelectionController<ConsolePresenter<Vec<u8>>, ScriptedTransport>,
    ) -> String {
        String::from_utf8(controller.into_presenter().into_inner()).unwrap()
    }
}
