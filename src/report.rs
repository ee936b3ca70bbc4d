use std::fmt;

use crate::app::alert::Failure;
use crate::config::ReportConfig;
use crate::utils::current_human_timestamp;

/// Outbound problem report. Composed here, delivered by someone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl IssueReport {
    pub fn compose(config: &ReportConfig, failure: &Failure) -> Self {
        let body = format!(
            "Error: {}\nResource: {}\nReported at: {}",
            failure.error.diagnostic(),
            failure.resource,
            current_human_timestamp()
        );

        Self {
            recipient: config.recipient.clone(),
            subject: config.subject.clone(),
            body,
        }
    }
}

impl fmt::Display for IssueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To: {}", self.recipient)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}
