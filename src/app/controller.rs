use std::future::Future;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::{AppError, FetchResult, Result};
use crate::fetch::{Fetcher, HttpTransport, ReqwestTransport, ResourceKind};
use crate::records::{Company, LogoRef, Quote};
use crate::report::IssueReport;

use super::alert::{Failure, Resolution};
use super::presenter::{Presenter, QuoteView};
use super::state::SelectionState;

/// Result of a spawned fetch, routed back to the controller before it touches state.
#[derive(Debug)]
enum Completion {
    Companies {
        ticket: u64,
        result: FetchResult<Vec<Company>>,
    },
    Quote {
        ticket: u64,
        symbol: String,
        result: FetchResult<Quote>,
    },
    Logo {
        ticket: u64,
        symbol: String,
        result: FetchResult<LogoRef>,
    },
}

/// What happened to a completion taken off the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// Superseded by a newer request for the same resource.
    Discarded,
}

#[derive(Debug, Default)]
struct Tickets {
    next: u64,
    list: u64,
    quote: u64,
    logo: u64,
}

impl Tickets {
    fn issue(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Orchestrates company-list, quote and logo fetches for one selection at a time.
///
/// Fetches run as tokio tasks; their results come back over a channel and are applied
/// only inside [`process_next`](Self::process_next), so the controller is the sole writer
/// of [`SelectionState`]. A result is applied only when its ticket is still the latest
/// for that resource and, for quote and logo, its symbol is still selected.
pub struct SelectionController<P, C = ReqwestTransport> {
    fetcher: Arc<Fetcher<C>>,
    presenter: P,
    state: SelectionState,
    tickets: Tickets,
    in_flight: usize,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl<P, C> SelectionController<P, C>
where
    P: Presenter,
    C: HttpTransport + 'static,
{
    pub fn new(fetcher: Arc<Fetcher<C>>, presenter: P) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            presenter,
            state: SelectionState::default(),
            tickets: Tickets::default(),
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Start loading the most-active list. On success the first row is selected.
    pub fn load_company_list(&mut self) {
        let ticket = self.tickets.issue();
        self.tickets.list = ticket;
        self.state.begin_list_load();

        let fetcher = Arc::clone(&self.fetcher);
        self.spawn(async move {
            Completion::Companies {
                ticket,
                result: fetcher.companies().await,
            }
        });
    }

    /// Select `symbol` from the current list and fetch its quote and logo concurrently.
    pub fn select_company(&mut self, symbol: &str) -> Result<()> {
        let company = self
            .state
            .company(symbol)
            .cloned()
            .ok_or_else(|| AppError::UnknownSymbol(symbol.to_string()))?;
        self.begin_selection(company);
        Ok(())
    }

    /// Picker-style selection by list position.
    pub fn select_row(&mut self, row: usize) -> Result<()> {
        let company = self.state.companies().get(row).cloned().ok_or_else(|| {
            AppError::message(format!(
                "row {} is out of range ({} companies)",
                row,
                self.state.companies().len()
            ))
        })?;
        self.begin_selection(company);
        Ok(())
    }

    /// Re-run the operation an alert offered. `Report` issues no request.
    pub fn retry(&mut self, resolution: Resolution) -> Result<()> {
        match resolution {
            Resolution::ReloadCompanies => self.load_company_list(),
            Resolution::ReloadQuote => {
                let company = self.require_selection()?;
                self.begin_selection(company);
            }
            Resolution::ReloadLogo => {
                let company = self.require_selection()?;
                self.state.begin_logo();
                self.spawn_logo(company.symbol);
            }
            Resolution::Report => {}
        }
        Ok(())
    }

    /// Draft a report for the most recent failure.
    pub fn issue_report(&self) -> Option<IssueReport> {
        self.state
            .last_error()
            .map(|failure| IssueReport::compose(&self.fetcher.config().report, failure))
    }

    /// Wait for one completion and apply it. `None` when nothing is in flight.
    pub async fn process_next(&mut self) -> Option<Delivery> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply(completion))
    }

    /// Apply completions until the list load and current selection have settled.
    pub async fn settle(&mut self) {
        while self.state.phase().is_busy() {
            if self.process_next().await.is_none() {
                break;
            }
        }
    }

    fn require_selection(&self) -> Result<Company> {
        self.state
            .selected_company()
            .cloned()
            .ok_or_else(|| AppError::message("no company selected"))
    }

    fn begin_selection(&mut self, company: Company) {
        info!("selecting {} ({})", company.symbol, company.company_name);
        self.state.select(company.symbol.clone());
        self.presenter.selection_started(&company);
        self.spawn_quote(company.symbol.clone());
        self.spawn_logo(company.symbol);
    }

    fn spawn_quote(&mut self, symbol: String) {
        let ticket = self.tickets.issue();
        self.tickets.quote = ticket;
        let fetcher = Arc::clone(&self.fetcher);
        self.spawn(async move {
            let result = fetcher.quote(&symbol).await;
            Completion::Quote {
                ticket,
                symbol,
                result,
            }
        });
    }

    fn spawn_logo(&mut self, symbol: String) {
        let ticket = self.tickets.issue();
        self.tickets.logo = ticket;
        let fetcher = Arc::clone(&self.fetcher);
        self.spawn(async move {
            let result = fetcher.logo(&symbol).await;
            Completion::Logo {
                ticket,
                symbol,
                result,
            }
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            // The receiver lives as long as the controller.
            let _ = tx.send(task.await);
        });
    }

    fn is_current(&self, ticket: u64, latest: u64, symbol: Option<&str>) -> bool {
        ticket == latest
            && symbol.map_or(true, |symbol| self.state.selected_symbol() == Some(symbol))
    }

    fn apply(&mut self, completion: Completion) -> Delivery {
        match completion {
            Completion::Companies { ticket, result } => {
                if !self.is_current(ticket, self.tickets.list, None) {
                    debug!("discarding superseded company list");
                    return Delivery::Discarded;
                }
                match result {
                    Ok(companies) => {
                        self.state.replace_companies(companies);
                        self.presenter.companies_loaded(self.state.companies());
                        match self.state.companies().first().cloned() {
                            Some(first) => self.begin_selection(first),
                            None => warn!("company list is empty; nothing to select"),
                        }
                    }
                    Err(err) => {
                        let failure = Failure::new(ResourceKind::CompanyList, err);
                        self.report(&failure);
                        self.state.list_failed(failure);
                    }
                }
            }
            Completion::Quote {
                ticket,
                symbol,
                result,
            } => {
                if !self.is_current(ticket, self.tickets.quote, Some(symbol.as_str())) {
                    debug!("discarding stale quote for {symbol}");
                    return Delivery::Discarded;
                }
                match result {
                    Ok(quote) => {
                        self.presenter.quote_ready(&QuoteView::from(&quote));
                        self.state.set_quote(quote);
                    }
                    Err(err) => {
                        let failure = Failure::new(ResourceKind::Quote, err);
                        self.report(&failure);
                        self.state.quote_failed(failure);
                    }
                }
            }
            Completion::Logo {
                ticket,
                symbol,
                result,
            } => {
                if !self.is_current(ticket, self.tickets.logo, Some(symbol.as_str())) {
                    debug!("discarding stale logo for {symbol}");
                    return Delivery::Discarded;
                }
                match result {
                    Ok(logo) => {
                        self.presenter.logo_ready(&logo);
                        self.state.set_logo(logo);
                    }
                    Err(err) => {
                        let failure = Failure::new(ResourceKind::Logo, err);
                        self.presenter.logo_fallback();
                        self.report(&failure);
                        self.state.logo_failed(failure);
                    }
                }
            }
        }
        Delivery::Applied
    }

    fn report(&mut self, failure: &Failure) {
        warn!("{} unavailable: {}", failure.resource, failure.error);
        self.presenter.alert(&failure.alert());
    }
}
