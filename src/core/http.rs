//! HTTP read API using Axum
//!
//! Serves the latest persisted signals. Payment verification happens in a
//! gate in front of this service; paid routes log each call they serve to the
//! earnings ledger once their response is ready.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::AgentConfig;
use crate::db::JsonStore;
use crate::error::StoreError;
use crate::models::{AgentRun, EarningsSummary, SignalClass, SignalRecord};

/// Signals shown in a report's trend section.
pub const REPORT_TREND_LEN: usize = 5;

/// USDC charged per call by the payment gate, per paid route.
pub const SIGNAL_PRICE_USDC: f64 = 0.05;
pub const REPORT_PRICE_USDC: f64 = 0.10;
pub const WATCHLIST_PRICE_USDC: f64 = 0.03;

/// Header carrying the base64 JSON payment the gate verified.
pub const PAYMENT_HEADER: &str = "x-payment";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AgentConfig>,
    pub store: Arc<JsonStore>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(config: Arc<AgentConfig>, store: Arc<JsonStore>) -> Self {
        Self {
            config,
            store,
            start_time: Arc::new(Instant::now()),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn internal(e: StoreError) -> ApiError {
    error!(error = %e, "storage read failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "storage unavailable", "details": e.to_string() })),
    )
}

/// Normalize a path token and make sure it is tracked.
fn tracked_token(state: &AppState, raw: &str) -> Result<String, ApiError> {
    let token = raw.trim().to_uppercase();
    if state.config.is_tracked(&token) {
        Ok(token)
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!("unsupported token: {}", token),
                "supported": state.config.tokens,
            })),
        ))
    }
}

fn not_found(message: &str, token: Option<&str>) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": message,
            "token": token,
            "note": "signals are generated on a schedule, check back soon",
        })),
    )
}

#[derive(Debug, Deserialize)]
struct PaymentHeader {
    payload: Option<PaymentPayload>,
}

#[derive(Debug, Deserialize)]
struct PaymentPayload {
    authorization: Option<PaymentAuthorization>,
}

#[derive(Debug, Deserialize)]
struct PaymentAuthorization {
    from: Option<String>,
}

/// Payer address from the payment header, `unknown` when absent or unreadable.
pub fn caller_address(headers: &HeaderMap) -> String {
    headers
        .get(PAYMENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| BASE64_STANDARD.decode(raw.trim()).ok())
        .and_then(|bytes| serde_json::from_slice::<PaymentHeader>(&bytes).ok())
        .and_then(|payment| payment.payload?.authorization?.from)
        .filter(|from| !from.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Ledger failures are logged and never fail the paid response.
async fn log_earning(state: &AppState, headers: &HeaderMap, endpoint: &str, amount_usdc: f64) {
    let caller = caller_address(headers);
    if let Err(e) = state.store.record_earning(endpoint, amount_usdc, &caller).await {
        error!(endpoint = %endpoint, error = %e, "failed to log earning for {}", endpoint);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalResponse {
    pub token: String,
    pub signal: SignalClass,
    pub confidence: u8,
    pub price_at_signal: f64,
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
    pub current_price: f64,
    pub current_change_24h: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub signal: SignalClass,
    pub confidence: u8,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub token: String,
    pub signal: SignalClass,
    pub confidence: u8,
    pub price_at_signal: f64,
    pub rationale: String,
    pub ai_report: String,
    pub current_price: Option<f64>,
    pub signal_trend: Vec<TrendPoint>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistResponse {
    pub signals: Vec<SignalResponse>,
    pub generated_at: DateTime<Utc>,
}

async fn signal_response(state: &AppState, record: SignalRecord) -> Result<SignalResponse, ApiError> {
    let latest = state.store.latest_price(&record.token).await.map_err(internal)?;
    Ok(SignalResponse {
        current_price: latest.as_ref().map(|p| p.price_usd).unwrap_or(record.price_at_signal),
        current_change_24h: latest.and_then(|p| p.provider_change_24h),
        token: record.token,
        signal: record.signal,
        confidence: record.confidence,
        price_at_signal: record.price_at_signal,
        change_1h: record.change_1h,
        change_6h: record.change_6h,
        change_24h: record.change_24h,
        generated_at: record.timestamp,
    })
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let storage = state.store.health_check().await.map_err(internal)?;
    let last_run = state.store.last_run().await.map_err(internal)?;
    Ok(Json(json!({
        "status": "healthy",
        "service": "tollgate-signal-agent",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "storage": storage,
        "last_run": last_run,
        "timestamp": Utc::now(),
    })))
}

/// Latest signal for a token
async fn get_signal(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> ApiResult<SignalResponse> {
    let token = tracked_token(&state, &token)?;
    let record = state
        .store
        .latest_signal(&token)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("no signal available yet", Some(token.as_str())))?;

    let response = signal_response(&state, record).await?;
    log_earning(&state, &headers, &format!("/signal/{}", token), SIGNAL_PRICE_USDC).await;
    info!(token = %token, signal = %response.signal, "served signal for {}", token);
    Ok(Json(response))
}

/// Latest signal with its rationale, AI narrative and recent trend
async fn get_report(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> ApiResult<ReportResponse> {
    let token = tracked_token(&state, &token)?;
    let history = state.store.signal_history(&token).await.map_err(internal)?;
    let Some(record) = history.first().cloned() else {
        return Err(not_found("no report available yet", Some(token.as_str())));
    };
    let current_price = state
        .store
        .latest_price(&token)
        .await
        .map_err(internal)?
        .map(|p| p.price_usd);

    let signal_trend = history
        .iter()
        .take(REPORT_TREND_LEN)
        .map(|s| TrendPoint {
            signal: s.signal,
            confidence: s.confidence,
            timestamp: s.timestamp,
        })
        .collect();

    log_earning(&state, &headers, &format!("/report/{}", token), REPORT_PRICE_USDC).await;
    Ok(Json(ReportResponse {
        token: record.token,
        signal: record.signal,
        confidence: record.confidence,
        price_at_signal: record.price_at_signal,
        rationale: record.rationale,
        ai_report: record.ai_report,
        current_price,
        signal_trend,
        generated_at: record.timestamp,
    }))
}

/// Latest signal of every tracked token
async fn get_watchlist(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<WatchlistResponse> {
    let records = state.store.latest_signals().await.map_err(internal)?;
    if records.is_empty() {
        return Err(not_found("no signals available yet", None));
    }

    let mut signals = Vec::with_capacity(records.len());
    for record in records {
        signals.push(signal_response(&state, record).await?);
    }
    log_earning(&state, &headers, "/watchlist", WATCHLIST_PRICE_USDC).await;

    Ok(Json(WatchlistResponse {
        signals,
        generated_at: Utc::now(),
    }))
}

async fn list_runs(State(state): State<AppState>) -> ApiResult<Vec<AgentRun>> {
    Ok(Json(state.store.runs().await.map_err(internal)?))
}

/// Earnings ledger for the dashboard
async fn get_earnings(State(state): State<AppState>) -> ApiResult<EarningsSummary> {
    Ok(Json(state.store.earnings().await.map_err(internal)?))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/signal/{token}", get(get_signal))
        .route("/report/{token}", get(get_report))
        .route("/watchlist", get(get_watchlist))
        .route("/runs", get(list_runs))
        .route("/earnings", get(get_earnings))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
