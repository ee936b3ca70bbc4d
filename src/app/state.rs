use crate::records::{sort_by_name, Company, LogoRef, Quote};

use super::alert::Failure;

/// Progress of one outstanding resource fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    pub fn is_loading(self) -> bool {
        matches!(self, FetchStatus::Loading)
    }
}

/// Where the controller is in its list-load / selection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ListLoading,
    ListLoaded,
    Selecting { quote_loading: bool, logo_loading: bool },
    Settled,
}

impl Phase {
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::ListLoading | Phase::Selecting { .. })
    }
}

/// Data owned by the selection controller. Read-only outside `crate::app`.
#[derive(Debug, Default)]
pub struct SelectionState {
    companies: Vec<Company>,
    selected_symbol: Option<String>,
    last_quote: Option<Quote>,
    last_logo: Option<LogoRef>,
    last_error: Option<Failure>,
    list_status: FetchStatus,
    quote_status: FetchStatus,
    logo_status: FetchStatus,
}

impl SelectionState {
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn company(&self, symbol: &str) -> Option<&Company> {
        self.companies.iter().find(|company| company.symbol == symbol)
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected_symbol.as_deref()
    }

    pub fn selected_company(&self) -> Option<&Company> {
        self.selected_symbol().and_then(|symbol| self.company(symbol))
    }

    pub fn last_quote(&self) -> Option<&Quote> {
        self.last_quote.as_ref()
    }

    pub fn last_logo(&self) -> Option<&LogoRef> {
        self.last_logo.as_ref()
    }

    pub fn last_error(&self) -> Option<&Failure> {
        self.last_error.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.list_status.is_loading() {
            return Phase::ListLoading;
        }

        match &self.selected_symbol {
            None if self.list_status == FetchStatus::Succeeded => Phase::ListLoaded,
            None => Phase::Idle,
            Some(_) if self.quote_status.is_loading() || self.logo_status.is_loading() => {
                Phase::Selecting {
                    quote_loading: self.quote_status.is_loading(),
                    logo_loading: self.logo_status.is_loading(),
                }
            }
            Some(_) => Phase::Settled,
        }
    }

    pub(super) fn begin_list_load(&mut self) {
        self.list_status = FetchStatus::Loading;
    }

    /// Replace the list wholesale, sorted by name. The previous selection and its
    /// quote and logo are dropped.
    pub(super) fn replace_companies(&mut self, mut companies: Vec<Company>) {
        sort_by_name(&mut companies);
        self.companies = companies;
        self.selected_symbol = None;
        self.last_quote = None;
        self.last_logo = None;
        self.quote_status = FetchStatus::Idle;
        self.logo_status = FetchStatus::Idle;
        self.list_status = FetchStatus::Succeeded;
    }

    pub(super) fn list_failed(&mut self, failure: Failure) {
        self.list_status = FetchStatus::Failed;
        self.last_error = Some(failure);
    }

    pub(super) fn select(&mut self, symbol: String) {
        self.selected_symbol = Some(symbol);
        self.quote_status = FetchStatus::Loading;
        self.logo_status = FetchStatus::Loading;
    }

    pub(super) fn begin_logo(&mut self) {
        self.logo_status = FetchStatus::Loading;
    }

    pub(super) fn set_quote(&mut self, quote: Quote) {
        self.last_quote = Some(quote);
        self.quote_status = FetchStatus::Succeeded;
    }

    pub(super) fn quote_failed(&mut self, failure: Failure) {
        self.quote_status = FetchStatus::Failed;
        self.last_error = Some(failure);
    }

    pub(super) fn set_logo(&mut self, logo: LogoRef) {
        self.last_logo = Some(logo);
        self.logo_status = FetchStatus::Succeeded;
    }

    pub(super) fn logo_failed(&mut self, failure: Failure) {
        self.logo_status = FetchStatus::Failed;
        self.last_error = Some(failure);
    }
}
