//! Unit tests for signal reconciliation

use tollgate::models::{AiOpinion, SignalClass, SignalDecision};
use tollgate::signals::reconcile::SignalReconciler;

fn mechanical(signal_class: SignalClass, confidence: u8) -> SignalDecision {
    SignalDecision {
        signal_class,
        confidence,
        rationale: "Score: 4 (positive=bullish, negative=bearish)".to_string(),
        factors: vec!["positive 6h trend (+2.5%)".to_string()],
    }
}

fn ai(signal_class: SignalClass, confidence: u8) -> AiOpinion {
    AiOpinion {
        signal_class,
        confidence,
    }
}

#[test]
fn test_agreement_averages_confidence() {
    let decision = SignalReconciler::reconcile(&mechanical(SignalClass::Buy, 70), &ai(SignalClass::Buy, 80));
    assert_eq!(decision.signal_class, SignalClass::Buy);
    assert_eq!(decision.confidence, 75);
}

#[test]
fn test_agreement_rounds_half_up_and_caps() {
    let m = mechanical(SignalClass::Buy, 70);
    assert_eq!(SignalReconciler::reconciled_confidence(&m, &ai(SignalClass::Buy, 81)), 76);

    let strong = mechanical(SignalClass::Sell, 90);
    assert_eq!(SignalReconciler::reconciled_confidence(&strong, &ai(SignalClass::Sell, 100)), 95);
}

#[test]
fn test_disagreement_keeps_mechanical_class() {
    let decision = SignalReconciler::reconcile(&mechanical(SignalClass::Buy, 80), &ai(SignalClass::Sell, 60));
    assert_eq!(decision.signal_class, SignalClass::Buy);
    assert_eq!(decision.confidence, 60);
}

#[test]
fn test_disagreement_rounding() {
    let m = mechanical(SignalClass::Hold, 30);
    assert_eq!(SignalReconciler::reconciled_confidence(&m, &ai(SignalClass::Buy, 90)), 23);

    let m = mechanical(SignalClass::Hold, 55);
    assert_eq!(SignalReconciler::reconciled_confidence(&m, &ai(SignalClass::Sell, 10)), 41);
}

#[test]
fn test_rationale_and_factors_carry_over() {
    let m = mechanical(SignalClass::Buy, 70);
    let decision = SignalReconciler::reconcile(&m, &ai(SignalClass::Hold, 50));
    assert_eq!(decision.rationale, m.rationale);
    assert_eq!(decision.factors, m.factors);
    assert!(!SignalReconciler::agrees(&m, &ai(SignalClass::Hold, 50)));
}
