//! Shared data models spanning the engine and host layers.

pub mod earning;
pub mod price;
pub mod run;
pub mod signal;

pub use earning::{EarningEntry, EarningsSummary};
pub use price::{PriceChangeSet, PriceObservation, PriceQuote, PriceSnapshot};
pub use run::{AgentRun, RunStatus};
pub use signal::{AiAnalysis, AiOpinion, SignalClass, SignalDecision, SignalRecord};
