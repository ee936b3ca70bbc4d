use crate::error::FetchError;
use crate::fetch::ResourceKind;

const CHECK_CONNECTION: &str = "Check your internet connection";
const PLEASE_REPORT: &str = "Please report this issue";

/// What went wrong, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CompaniesUnavailable,
    QuoteUnavailable,
    LogoUnavailable,
    InvalidDataReported,
}

/// Follow-up the user can trigger from an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ReloadCompanies,
    /// Re-request both quote and logo for the current selection.
    ReloadQuote,
    ReloadLogo,
    Report,
}

impl Resolution {
    pub fn label(self) -> &'static str {
        match self {
            Resolution::ReloadCompanies => "reload company list",
            Resolution::ReloadQuote => "reload quote",
            Resolution::ReloadLogo => "reload logo",
            Resolution::Report => "report issue",
        }
    }
}

/// A fetch failure tagged with the resource that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub resource: ResourceKind,
    pub error: FetchError,
}

impl Failure {
    pub fn new(resource: ResourceKind, error: FetchError) -> Self {
        let kind = if error.is_decode() {
            ErrorKind::InvalidDataReported
        } else {
            match resource {
                ResourceKind::CompanyList => ErrorKind::CompaniesUnavailable,
                ResourceKind::Quote => ErrorKind::QuoteUnavailable,
                ResourceKind::Logo => ErrorKind::LogoUnavailable,
            }
        };
        Self {
            kind,
            resource,
            error,
        }
    }

    pub fn alert(&self) -> Alert {
        let (title, message, resolution) = match self.kind {
            ErrorKind::CompaniesUnavailable => (
                "List of companies is not available",
                CHECK_CONNECTION,
                Resolution::ReloadCompanies,
            ),
            ErrorKind::QuoteUnavailable => (
                "Company quotes missing",
                CHECK_CONNECTION,
                Resolution::ReloadQuote,
            ),
            ErrorKind::LogoUnavailable => (
                "Company logo is not available",
                CHECK_CONNECTION,
                Resolution::ReloadLogo,
            ),
            // Malformed data is reported, never reloaded.
            ErrorKind::InvalidDataReported => ("Invalid data", PLEASE_REPORT, Resolution::Report),
        };

        Alert {
            kind: self.kind,
            resource: self.resource,
            title: title.to_string(),
            message: message.to_string(),
            resolution,
            detail: self.error.diagnostic(),
        }
    }
}

/// User-facing notification derived from a [`Failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: ErrorKind,
    pub resource: ResourceKind,
    pub title: String,
    pub message: String,
    pub resolution: Resolution,
    pub detail: String,
}
