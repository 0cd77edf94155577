//! AI opinion collaborator.
//!
//! [`MarketAnalyst`] is the seam the pipeline depends on; [`ChatAnalyst`]
//! talks to a chat-completions API and parses its structured reply.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::AnalystConfig;
use crate::error::AnalystError;
use crate::models::{AiAnalysis, AiOpinion, PriceSnapshot, SignalClass};

pub const DEFAULT_AI_CONFIDENCE: u8 = 50;

const SYSTEM_PROMPT: &str = "You are a professional crypto market analyst. \
You analyze token price data and produce clear, concise market intelligence reports. \
Structure every answer as: current trend assessment (one sentence), key price movement \
observations (two to three sentences), signal recommendation with reasoning (one to two \
sentences). Keep the response under 150 words. No disclaimers.";

#[async_trait]
pub trait MarketAnalyst: Send + Sync {
    /// Produce an opinion and narrative report for the snapshot.
    async fn analyze(&self, snapshot: &PriceSnapshot) -> Result<AiAnalysis, AnalystError>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatAnalyst {
    client: reqwest::Client,
    config: AnalystConfig,
}

impl ChatAnalyst {
    pub fn new(config: AnalystConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: AnalystConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    async fn complete(&self, prompt: &str) -> Result<String, AnalystError> {
        let api_key = self.config.api_key.as_deref().ok_or(AnalystError::MissingApiKey)?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "temperature": 0.2
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalystError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AnalystError::EmptyReply)
    }
}

#[async_trait]
impl MarketAnalyst for ChatAnalyst {
    async fn analyze(&self, snapshot: &PriceSnapshot) -> Result<AiAnalysis, AnalystError> {
        let raw = self.complete(&build_prompt(snapshot)).await?;
        let analysis = parse_analysis(&raw);
        debug!(
            token = %snapshot.token,
            signal = %analysis.opinion.signal_class,
            confidence = analysis.opinion.confidence,
            "ChatAnalyst: {} analysis parsed",
            snapshot.token
        );
        Ok(analysis)
    }
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// User prompt asking for a REPORT / SIGNAL / CONFIDENCE formatted reply.
pub fn build_prompt(snapshot: &PriceSnapshot) -> String {
    let history = snapshot
        .price_history
        .iter()
        .map(|p| format!("USD {:.2}", p))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the following {token} price data and provide a market signal.\n\n\
         Current price: USD {price:.2}\n\
         1-hour change: {c1}%\n\
         6-hour change: {c6}%\n\
         24-hour change: {c24}%\n\
         Recent price history (oldest to newest): {history}\n\n\
         Format your response exactly like this:\n\
         REPORT:\n[your analysis here]\nSIGNAL: BUY\nCONFIDENCE: 75\n",
        token = snapshot.token,
        price = snapshot.current_price,
        c1 = signed(snapshot.change_1h),
        c6 = signed(snapshot.change_6h),
        c24 = signed(snapshot.change_24h),
        history = history,
    )
}

/// Parse a `REPORT: ... SIGNAL: X CONFIDENCE: N` reply.
///
/// Tolerates markdown bold around labels and values. The signal value only
/// has to start with BUY, HOLD or SELL. Missing signal reads as HOLD, missing
/// confidence as 50, and a reply without `REPORT:` is used whole as the report.
pub fn parse_analysis(raw: &str) -> AiAnalysis {
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    let lower = raw.to_ascii_lowercase();

    let report = match lower.find("report:") {
        Some(start) => {
            let body_start = start + "report:".len();
            let body_end = lower[body_start..]
                .find("signal:")
                .map(|offset| body_start + offset)
                .unwrap_or(raw.len());
            raw[body_start..body_end]
                .trim_end_matches(|c: char| c == '*' || c.is_whitespace())
                .replace("**", "")
                .trim()
                .to_string()
        }
        None => raw.trim().to_string(),
    };

    let signal_class = values_after(raw, &lower, "signal:")
        .find_map(signal_prefix)
        .unwrap_or(SignalClass::Hold);

    let confidence = values_after(raw, &lower, "confidence:")
        .find_map(|value| {
            let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u64>().ok()
        })
        .map(|c| c.min(100) as u8)
        .unwrap_or(DEFAULT_AI_CONFIDENCE);

    AiAnalysis {
        opinion: AiOpinion {
            signal_class,
            confidence,
        },
        report,
    }
}

/// Class whose name starts `value`, so `BUYING` reads as BUY.
fn signal_prefix(value: &str) -> Option<SignalClass> {
    [SignalClass::Buy, SignalClass::Hold, SignalClass::Sell]
        .into_iter()
        .find(|class| {
            let name = class.as_str().as_bytes();
            value
                .as_bytes()
                .get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
        })
}

/// Text following each occurrence of `label`, with whitespace and `*` skipped.
fn values_after<'a>(raw: &'a str, lower: &'a str, label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    lower.match_indices(label).map(move |(index, _)| {
        raw[index + label.len()..].trim_start_matches(|c: char| c == '*' || c.is_whitespace())
    })
}
