//! Pattern matcher over the intent table
//!
//! Substring containment against every row's trigger list; the row with the
//! highest configured confidence wins.

use serde::{Deserialize, Serialize};

use crate::intent::catalog::IntentCatalog;
use crate::intent::entities;
use crate::types::{Entities, Intent};

/// Confidence assigned to the `general_question` fallback
pub const FALLBACK_CONFIDENCE: f32 = 0.6;

/// A successful table match (transient, not persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMatch {
    /// Matched intent
    pub intent: Intent,
    /// The intent's configured confidence
    pub confidence: f32,
    /// Facts extracted from the message
    pub entities: Entities,
    /// Whether the intent must be completed by the external LLM
    pub needs_completion: bool,
}

/// Find the best table match for a normalized message.
///
/// An intent matches when any of its trigger substrings is contained in the
/// message. Among matching intents the highest configured confidence wins;
/// equal confidences resolve to the EARLIEST table row (the scan compares
/// with strict `>`). Callers that care about tie behavior must therefore
/// care about table order.
///
/// Returns `None` when no trigger is contained in the message.
pub fn best_match(normalized: &str, catalog: &IntentCatalog) -> Option<IntentMatch> {
    let mut best = None;
    let mut highest = 0.0f32;

    for spec in catalog.specs() {
        let hit = spec
            .triggers
            .iter()
            .any(|trigger| normalized.contains(trigger.as_str()));
        if hit && spec.confidence > highest {
            highest = spec.confidence;
            best = Some(spec);
        }
    }

    best.map(|spec| IntentMatch {
        intent: spec.intent,
        confidence: spec.confidence,
        entities: entities::extract(normalized),
        needs_completion: spec.needs_completion,
    })
}

/// Like [`best_match`], but falls back to `general_question` when nothing
/// matches: moderate confidence, no entities, external completion required.
pub fn match_or_default(normalized: &str, catalog: &IntentCatalog) -> IntentMatch {
    best_match(normalized, catalog).unwrap_or(IntentMatch {
        intent: Intent::GeneralQuestion,
        confidence: FALLBACK_CONFIDENCE,
        entities: Entities::default(),
        needs_completion: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::catalog::IntentSpec;
    use crate::types::normalize_message;

    #[test]
    fn test_trigger_containment() {
        let catalog = IntentCatalog::builtin();
        let m = best_match(&normalize_message("بكام الخدمة؟"), &catalog).unwrap();
        assert_eq!(m.intent, Intent::PricingInquiry);
        assert_eq!(m.confidence, 0.9);
    }

    #[test]
    fn test_highest_confidence_wins_over_table_order() {
        // "احجز موعد عاجل" hits booking (0.95) and urgent (0.95)... keep it
        // unambiguous: pricing (0.9) vs booking (0.95) in one message.
        let catalog = IntentCatalog::builtin();
        let m = best_match(&normalize_message("عايز أحجز وبكام التكلفة"), &catalog).unwrap();
        assert_eq!(m.intent, Intent::BookingRequest);
        assert_eq!(m.confidence, 0.95);
    }

    #[test]
    fn test_tie_goes_to_earliest_row() {
        // booking_request (0.95) precedes urgent_support (0.95).
        let catalog = IntentCatalog::builtin();
        let m = best_match(&normalize_message("احجز موعد ضروري"), &catalog).unwrap();
        assert_eq!(m.intent, Intent::BookingRequest);
    }

    #[test]
    fn test_no_match_returns_none() {
        let catalog = IntentCatalog::builtin();
        assert!(best_match("كلام لا يطابق اي شيء", &catalog).is_none());
    }

    #[test]
    fn test_default_fallback() {
        let catalog = IntentCatalog::builtin();
        let m = match_or_default("كلام لا يطابق اي شيء", &catalog);
        assert_eq!(m.intent, Intent::GeneralQuestion);
        assert_eq!(m.confidence, FALLBACK_CONFIDENCE);
        assert!(m.needs_completion);
        assert!(m.entities.is_empty());
    }

    #[test]
    fn test_match_carries_entities() {
        let catalog = IntentCatalog::builtin();
        let m = best_match(&normalize_message("بكام بوت الماسنجر؟"), &catalog).unwrap();
        assert_eq!(m.intent, Intent::PricingInquiry);
        assert!(m.entities.service.is_some());
    }

    #[test]
    fn test_custom_table_order_breaks_ties() {
        let mk = |intent, trigger: &str| IntentSpec {
            intent,
            triggers: vec![trigger.to_string()],
            confidence: 0.9,
            needs_completion: false,
        };
        let forward = IntentCatalog::new(vec![
            mk(Intent::Greet, "اهلا"),
            mk(Intent::Thanks, "شكرا"),
        ]);
        let reversed = IntentCatalog::new(vec![
            mk(Intent::Thanks, "شكرا"),
            mk(Intent::Greet, "اهلا"),
        ]);

        let msg = "اهلا شكرا";
        assert_eq!(best_match(msg, &forward).unwrap().intent, Intent::Greet);
        assert_eq!(best_match(msg, &reversed).unwrap().intent, Intent::Thanks);
    }
}
