use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can go wrong in one fetch-and-render cycle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("forecast request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("forecast request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed forecast payload: {0}")]
    Parse(String),

    #[error("malformed city entry: {0}")]
    City(String),

    #[error("no eligible forecast period for {0}")]
    NoData(NaiveDate),

    #[error("failed to read city list: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Connectivity-class failures (DNS, refused connections, timeouts) are
    /// suppressed by the applet instead of being shown as an error signal;
    /// the next poll is the retry.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Error::Fetch(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
