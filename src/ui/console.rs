use std::fmt;
use std::io::{self, Stdout, Write};

use crossterm::style::{style, Stylize};
use log::warn;

use crate::app::alert::Alert;
use crate::app::presenter::{Presenter, QuoteView};
use crate::records::{Company, LogoRef};
use crate::report::IssueReport;
use crate::utils::fit_to_width;

use super::styles::{trend_color, ACCENT, ALERT};

const NAME_COLUMN: usize = 36;

/// Line-oriented presenter writing to a terminal (or any writer).
pub struct ConsolePresenter<W: Write = Stdout> {
    out: W,
}

impl ConsolePresenter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn note(&mut self, message: &str) {
        self.emit(format_args!("{message}"));
    }

    pub fn prompt(&mut self) {
        let result = write!(self.out, "{} ", "stocks>".with(ACCENT)).and_then(|_| self.out.flush());
        if let Err(err) = result {
            warn!("failed to write prompt: {err}");
        }
    }

    pub fn print_report(&mut self, report: &IssueReport) {
        self.emit(format_args!("{}", "Issue report draft".bold()));
        self.emit(format_args!("{report}"));
    }

    pub fn print_help(&mut self) {
        self.emit(format_args!(
            "Commands: <row>, <SYMBOL> or s <symbol> select, r retry, c reload companies, \
             l list, report, h help, q exit"
        ));
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!("failed to write to console: {err}");
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn companies_loaded(&mut self, companies: &[Company]) {
        if companies.is_empty() {
            self.emit(format_args!("No companies available."));
            return;
        }

        self.emit(format_args!("{}", "Most active companies".with(ACCENT).bold()));
        for (row, company) in companies.iter().enumerate() {
            self.emit(format_args!(
                "{:>3}  {}  {}",
                row + 1,
                fit_to_width(&company.company_name, NAME_COLUMN),
                company.symbol
            ));
        }
    }

    fn selection_started(&mut self, company: &Company) {
        self.emit(format_args!(
            "{} {} ({})",
            "▶".with(ACCENT),
            company.company_name,
            company.symbol
        ));
    }

    fn quote_ready(&mut self, quote: &QuoteView) {
        let change = match trend_color(quote.trend) {
            Some(color) => style(&quote.change).with(color).to_string(),
            None => quote.change.clone(),
        };
        self.emit(format_args!(
            "  {} ({})  price {}  change {}",
            quote.company_name, quote.symbol, quote.price, change
        ));
    }

    fn logo_ready(&mut self, logo: &LogoRef) {
        self.emit(format_args!("  logo {}", logo.url));
    }

    fn logo_fallback(&mut self) {
        self.emit(format_args!("  logo (default image)"));
    }

    fn alert(&mut self, alert: &Alert) {
        self.emit(format_args!(
            "{} {}: {}  [r: {}]",
            "!".with(ALERT).bold(),
            alert.title,
            alert.message,
            alert.resolution.label()
        ));
    }
}
