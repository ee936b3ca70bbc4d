use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("symbol `{0}` is not in the current company list")]
    UnknownSymbol(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}

/// Failure of a single fetch-decode attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Inputs could not form a request; never reaches the network.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Connectivity problem, timeout, or any status other than 200.
    #[error("transport error: {0}")]
    Transport(String),
    /// Body arrived but does not match the expected shape.
    #[error("invalid data: {detail}")]
    Decode { detail: String },
}

impl FetchError {
    pub fn invalid_request<T: Into<String>>(msg: T) -> Self {
        FetchError::InvalidRequest(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        FetchError::Transport(msg.into())
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode { .. })
    }

    /// Text attached to issue reports.
    pub fn diagnostic(&self) -> String {
        match self {
            FetchError::Decode { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
