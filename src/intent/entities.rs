//! Entity extraction from chat messages
//!
//! Lightweight keyword extraction for:
//! - Service category (messenger bot, marketing, design, ...)
//! - Urgency level (ordinal tiers)
//! - Location mention
//!
//! ## Invariants
//!
//! - Extraction never panics on any input
//! - Empty/whitespace input returns empty entities
//! - Service patterns are checked in a fixed order; first match wins
//!
//! Regex patterns are compiled once and reused.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{Entities, ServiceKind, UrgencyLevel};

/// Service patterns, checked in order; first match wins.
///
/// The bare "بوت" keyword sits in the messenger group, so a plain "بوت"
/// resolves to messenger rather than whatsapp.
static SERVICE_PATTERNS: Lazy<Vec<(ServiceKind, Regex)>> = Lazy::new(|| {
    vec![
        (
            ServiceKind::MessengerBot,
            Regex::new(r"(ماسنجر|messenger|بوت)").expect("valid regex"),
        ),
        (
            ServiceKind::WhatsappBot,
            Regex::new(r"(واتساب|whatsapp)").expect("valid regex"),
        ),
        (
            ServiceKind::Marketing,
            Regex::new(r"(تسويق|إعلانات|اعلانات|marketing|ads)").expect("valid regex"),
        ),
        (
            ServiceKind::Design,
            Regex::new(r"(تصميم|جرافيك|design|graphic)").expect("valid regex"),
        ),
        (
            ServiceKind::Video,
            Regex::new(r"(فيديو|مونتاج|video|editing)").expect("valid regex"),
        ),
        (
            ServiceKind::Photography,
            Regex::new(r"(تصوير|فوتوغرافي|photography|photo)").expect("valid regex"),
        ),
    ]
});

/// Urgency tiers, strongest first
static URGENCY_PATTERNS: Lazy<Vec<(UrgencyLevel, Regex)>> = Lazy::new(|| {
    vec![
        (
            UrgencyLevel::Critical,
            Regex::new(r"(فوري|فورا|فورًا|حالا|حالًا|طوارئ|emergency)").expect("valid regex"),
        ),
        (
            UrgencyLevel::High,
            Regex::new(r"(عاجل|ضروري|urgent)").expect("valid regex"),
        ),
        (
            UrgencyLevel::Medium,
            Regex::new(r"(مهم|important)").expect("valid regex"),
        ),
    ]
});

static LOCATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(مصر|السعودية|الخليج|egypt|saudi|gulf)").expect("valid regex"));

/// Extract entities from a normalized message.
///
/// Never panics. Empty input returns empty entities.
pub fn extract(normalized: &str) -> Entities {
    let text = normalized.trim();
    if text.is_empty() {
        return Entities::default();
    }

    let service = SERVICE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(kind, _)| *kind);

    let urgency = URGENCY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(level, _)| *level);

    let location = LOCATION_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string());

    let entities = Entities {
        service,
        urgency,
        location,
    };

    if !entities.is_empty() {
        debug!(service = ?entities.service, urgency = ?entities.urgency, "entities extracted");
    }

    entities
}

/// True when the message mentions any concrete service keyword.
///
/// Used by the ambiguity guard: a service keyword suppresses the
/// interrogative-word classification.
pub fn mentions_service(normalized: &str) -> bool {
    SERVICE_PATTERNS
        .iter()
        .any(|(_, pattern)| pattern.is_match(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_service() {
        let entities = extract("عايز بوت ماسنجر لصفحتي");
        assert_eq!(entities.service, Some(ServiceKind::MessengerBot));
    }

    #[test]
    fn test_whatsapp_without_bot_keyword() {
        let entities = extract("تكامل مع واتساب");
        assert_eq!(entities.service, Some(ServiceKind::WhatsappBot));
    }

    #[test]
    fn test_bare_bot_resolves_to_messenger() {
        // Fixed pattern order: "بوت" belongs to the messenger group.
        let entities = extract("عايز بوت");
        assert_eq!(entities.service, Some(ServiceKind::MessengerBot));
    }

    #[test]
    fn test_urgency_tiers() {
        assert_eq!(extract("محتاج رد فوري").urgency, Some(UrgencyLevel::Critical));
        assert_eq!(extract("الموضوع عاجل").urgency, Some(UrgencyLevel::High));
        assert_eq!(extract("موضوع مهم").urgency, Some(UrgencyLevel::Medium));
        assert_eq!(extract("مرحبا").urgency, None);
    }

    #[test]
    fn test_strongest_urgency_wins() {
        let entities = extract("مهم وعاجل وفوري");
        assert_eq!(entities.urgency, Some(UrgencyLevel::Critical));
    }

    #[test]
    fn test_location_keeps_matched_substring() {
        let entities = extract("هل بتشتغلوا في مصر؟");
        assert_eq!(entities.location.as_deref(), Some("مصر"));
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
    }

    #[test]
    fn test_mentions_service() {
        assert!(mentions_service("ايه سعر التصميم"));
        assert!(!mentions_service("ايه"));
    }

    #[test]
    fn test_never_panics_on_bad_input() {
        let long = "ب".repeat(10_000);
        for input in ["", "   ", "\0\0", "🎉🎊", &long, "ﷺ", "a\u{0301}"] {
            let _ = extract(input);
        }
    }
}
