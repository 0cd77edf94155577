//! Reconciliation of the mechanical signal with an AI opinion.
//!
//! The mechanical class always wins. Disagreement only lowers confidence;
//! agreement averages both confidences under a 95 cap.

use crate::common::math::round_half_up;
use crate::models::{AiOpinion, SignalDecision};

pub const DISAGREEMENT_FACTOR: f64 = 0.75;
pub const AGREEMENT_CAP: u8 = 95;

pub struct SignalReconciler;

impl SignalReconciler {
    /// Whether both sides recommend the same class.
    pub fn agrees(mechanical: &SignalDecision, ai: &AiOpinion) -> bool {
        mechanical.signal_class == ai.signal_class
    }

    /// Final confidence for a mechanical decision given the AI opinion.
    pub fn reconciled_confidence(mechanical: &SignalDecision, ai: &AiOpinion) -> u8 {
        let confidence = if Self::agrees(mechanical, ai) {
            let average = (mechanical.confidence as f64 + ai.confidence as f64) / 2.0;
            round_half_up(average).min(AGREEMENT_CAP as f64)
        } else {
            round_half_up(mechanical.confidence as f64 * DISAGREEMENT_FACTOR)
        };
        confidence.clamp(0.0, 100.0) as u8
    }

    /// Produce the final decision. Only the confidence changes; class,
    /// rationale and factors are carried over from the mechanical decision.
    pub fn reconcile(mechanical: &SignalDecision, ai: &AiOpinion) -> SignalDecision {
        SignalDecision {
            confidence: Self::reconciled_confidence(mechanical, ai),
            ..mechanical.clone()
        }
    }
}
