//! Error types for the engine and its collaborators.

use thiserror::Error;

/// Computation errors raised by the deterministic core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// A reference price of exactly zero makes the percentage change undefined.
    #[error("reference price at history index {index} is zero")]
    ZeroReferencePrice { index: usize },

    #[error("price at history index {index} is not a finite number")]
    NonFinitePrice { index: usize },
}

/// Failures fetching quotes from a market-data provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("unsupported token: {0}")]
    UnsupportedToken(String),

    #[error("price provider returned status {0}")]
    Status(u16),

    #[error("no price data for {0} in provider response")]
    MissingData(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures obtaining an AI opinion.
#[derive(Error, Debug)]
pub enum AnalystError {
    #[error("analyst API key is not configured")]
    MissingApiKey,

    #[error("analyst API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("analyst returned an empty reply")]
    EmptyReply,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures reading or writing the JSON data files.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can make a single token's analysis fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Analyst(#[from] AnalystError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
