//! Per-token analysis pipeline driven by the runtime.

pub mod context;
pub mod handlers;
pub mod types;

pub use context::JobContext;
pub use handlers::analyze_token;
pub use types::TokenAnalysis;
