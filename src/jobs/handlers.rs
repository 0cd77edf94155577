//! Token analysis handler
//!
//! fetch price -> persist -> reload history -> score -> ask analyst ->
//! reconcile -> persist signal

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::indicators::momentum::extract_price_history;
use crate::jobs::context::JobContext;
use crate::jobs::types::TokenAnalysis;
use crate::models::{PriceSnapshot, SignalRecord};
use crate::signals::reconcile::SignalReconciler;

/// Recent prices shown to the analyst.
pub const ANALYST_HISTORY_POINTS: usize = 10;

/// Run the full pipeline for one token and persist the resulting signal.
pub async fn analyze_token(ctx: &JobContext, token: &str) -> Result<TokenAnalysis, PipelineError> {
    debug!(token = %token, "analyze_token: starting analysis for {}", token);

    let quote = ctx.price_provider.fetch_price(token).await?;
    let price = quote.price_usd;
    ctx.store.append_price(quote.into_observation(Utc::now())).await?;

    let history = ctx.store.price_history(token).await?;
    let (changes, mechanical) = ctx.engine.evaluate(&history)?;

    debug!(
        token = %token,
        history_len = history.len(),
        signal = %mechanical.signal_class,
        confidence = mechanical.confidence,
        "analyze_token: mechanical signal for {} is {} ({}%)",
        token,
        mechanical.signal_class,
        mechanical.confidence
    );

    let snapshot = PriceSnapshot {
        token: token.to_string(),
        current_price: price,
        change_1h: changes.change_1h,
        change_6h: changes.change_6h,
        change_24h: changes.change_24h,
        price_history: extract_price_history(&history, ANALYST_HISTORY_POINTS),
    };
    let analysis = ctx.analyst.analyze(&snapshot).await?;

    let decision = SignalReconciler::reconcile(&mechanical, &analysis.opinion);
    if !SignalReconciler::agrees(&mechanical, &analysis.opinion) {
        warn!(
            token = %token,
            mechanical = %mechanical.signal_class,
            ai = %analysis.opinion.signal_class,
            confidence = decision.confidence,
            "analyze_token: {} signal divergence, logic says {} and analyst says {}; keeping {} at {}%",
            token,
            mechanical.signal_class,
            analysis.opinion.signal_class,
            decision.signal_class,
            decision.confidence
        );
    }

    let record = SignalRecord::new(token, price, &changes, &decision, analysis.report);
    ctx.store.append_signal(record.clone()).await?;

    info!(
        token = %token,
        price = price,
        signal = %record.signal,
        confidence = record.confidence,
        "analyze_token: {} complete - ${:.2} | {} | confidence {}%",
        token,
        price,
        record.signal,
        record.confidence
    );

    Ok(TokenAnalysis {
        record,
        mechanical,
        ai_opinion: analysis.opinion,
    })
}
