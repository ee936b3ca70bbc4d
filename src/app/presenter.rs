use crate::records::{Company, LogoRef, Quote};

use super::alert::Alert;

/// Display intent derived from the sign of a price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Trend::Positive
        } else if change < 0.0 {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }
}

/// Quote fields rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub company_name: String,
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub trend: Trend,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        Self {
            company_name: quote.company_name.clone(),
            symbol: quote.symbol.clone(),
            price: format!("{:.2}", quote.latest_price),
            change: format!("{:.2}", quote.change),
            trend: Trend::from_change(quote.change),
        }
    }
}

/// Presentation collaborator notified by the selection controller.
pub trait Presenter {
    fn companies_loaded(&mut self, companies: &[Company]);

    /// A new selection began: clear the previous quote and show the default logo.
    fn selection_started(&mut self, company: &Company);

    fn quote_ready(&mut self, quote: &QuoteView);

    /// Load and show the image at `logo.url`.
    fn logo_ready(&mut self, logo: &LogoRef);

    /// Logo could not be fetched; keep the placeholder image.
    fn logo_fallback(&mut self);

    fn alert(&mut self, alert: &Alert);
}
