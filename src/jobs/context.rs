//! Job context for dependency injection

use crate::db::JsonStore;
use crate::services::analyst::MarketAnalyst;
use crate::services::market_data::PriceProvider;
use crate::signals::engine::SignalEngine;
use std::sync::Arc;

/// Collaborators shared by every token analysis.
///
/// The provider and analyst are trait objects so tests can swap in
/// deterministic stubs.
pub struct JobContext {
    pub price_provider: Arc<dyn PriceProvider>,
    pub analyst: Arc<dyn MarketAnalyst>,
    pub store: Arc<JsonStore>,
    pub engine: SignalEngine,
}

impl JobContext {
    pub fn new(
        price_provider: Arc<dyn PriceProvider>,
        analyst: Arc<dyn MarketAnalyst>,
        store: Arc<JsonStore>,
        engine: SignalEngine,
    ) -> Self {
        Self {
            price_provider,
            analyst,
            store,
            engine,
        }
    }
}
