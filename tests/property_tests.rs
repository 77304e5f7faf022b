//! Property-based tests for masar
//!
//! These tests verify invariants that must hold for all inputs:
//! - Routing never panics and always yields a usable result
//! - Normalization is idempotent
//! - Similarity scores stay bounded and symmetric
//! - Bounded operations stay bounded
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

// ============================================================================
// ROUTING TESTS
// ============================================================================

mod routing_tests {
    use super::*;
    use std::sync::Arc;

    use masar::memory::ConversationStore;
    use masar::router::IntentRouter;
    use masar::types::ChatMessage;

    fn router() -> IntentRouter {
        IntentRouter::new(Arc::new(ConversationStore::default()))
    }

    proptest! {
        /// Invariant: routing never panics on any message
        #[test]
        fn never_panics(message in ".*") {
            let _ = router().detect_intent(&message, &[], None);
        }

        /// Invariant: routing never panics with a session and history
        #[test]
        fn never_panics_with_session(
            message in "\\PC{0,120}",
            prior in "\\PC{0,120}",
        ) {
            let history = vec![ChatMessage::user(prior)];
            let _ = router().detect_intent(&message, &history, Some("prop-session"));
        }

        /// Invariant: confidence stays in (0, 1]
        #[test]
        fn confidence_bounded(message in "\\PC{0,120}") {
            let result = router().detect_intent(&message, &[], None);
            prop_assert!(result.confidence > 0.0 && result.confidence <= 1.0);
        }

        /// Invariant: a result not forwarded for completion carries a response
        #[test]
        fn canned_results_have_responses(message in "\\PC{0,120}") {
            let result = router().detect_intent(&message, &[], None);
            if !result.needs_completion {
                prop_assert!(result.response.is_some());
            }
        }

        /// Invariant: messages that normalize to at most 2 characters are
        /// always ambiguous (lowercasing can expand some characters, so the
        /// bound is stated on the normalized form)
        #[test]
        fn tiny_messages_are_ambiguous(message in "\\PC{0,2}") {
            let result = router().detect_intent(&message, &[], None);
            if masar::types::normalize_message(&message).chars().count() <= 2 {
                prop_assert_eq!(result.intent, masar::types::Intent::Ambiguous);
            }
        }
    }
}

// ============================================================================
// NORMALIZATION TESTS
// ============================================================================

mod normalize_tests {
    use super::*;
    use masar::types::normalize_message;

    proptest! {
        /// Invariant: normalize_message never panics on any input
        #[test]
        fn never_panics(s in ".*") {
            let _ = normalize_message(&s);
        }

        /// Invariant: normalization is idempotent
        #[test]
        fn idempotent(s in "\\PC{0,100}") {
            let once = normalize_message(&s);
            let twice = normalize_message(&once);
            prop_assert_eq!(once, twice);
        }

        /// Invariant: no boundary whitespace in normalized output
        #[test]
        fn no_boundary_whitespace(s in "\\PC{0,100}") {
            let normalized = normalize_message(&s);
            prop_assert_eq!(normalized.trim(), normalized.as_str());
        }
    }
}

// ============================================================================
// SIMILARITY TESTS
// ============================================================================

mod similarity_tests {
    use super::*;
    use masar::intent::jaccard_similarity;

    proptest! {
        /// Invariant: similarity stays in [0, 1]
        #[test]
        fn bounded(a in "\\PC{0,80}", b in "\\PC{0,80}") {
            let sim = jaccard_similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&sim));
        }

        /// Invariant: similarity is symmetric
        #[test]
        fn symmetric(a in "\\PC{0,80}", b in "\\PC{0,80}") {
            prop_assert_eq!(jaccard_similarity(&a, &b), jaccard_similarity(&b, &a));
        }

        /// Invariant: a text is maximally similar to itself
        #[test]
        fn self_similarity(a in "\\PC{0,80}") {
            prop_assert_eq!(jaccard_similarity(&a, &a), 1.0);
        }
    }
}

// ============================================================================
// CHUNKING TESTS
// ============================================================================

mod chunking_tests {
    use super::*;
    use masar::knowledge::chunk_text;

    proptest! {
        /// Invariant: chunking never panics
        #[test]
        fn never_panics(text in ".*", max in 0usize..600) {
            let _ = chunk_text(&text, max);
        }

        /// Invariant: no chunk exceeds the cap, no chunk is empty
        #[test]
        fn chunks_bounded_and_nonempty(text in "\\PC{0,800}", max in 1usize..200) {
            for chunk in chunk_text(&text, max) {
                prop_assert!(!chunk.trim().is_empty());
                prop_assert!(chunk.chars().count() <= max);
            }
        }
    }
}

// ============================================================================
// RATE LIMITER TESTS
// ============================================================================

mod limiter_tests {
    use super::*;
    use chrono::Utc;
    use masar::limiter::{RateLimiter, RateLimiterConfig};

    proptest! {
        /// Invariant: within one window, at most max_requests are admitted
        #[test]
        fn never_over_admits(max_requests in 1u32..50, attempts in 1usize..200) {
            let limiter = RateLimiter::new(RateLimiterConfig {
                max_requests,
                window_secs: 60,
                max_tracked_keys: 16,
            }).unwrap();

            let now = Utc::now();
            let admitted = (0..attempts)
                .filter(|_| limiter.check_at("client", now).is_allowed())
                .count();
            prop_assert!(admitted <= max_requests as usize);
        }
    }
}

// ============================================================================
// MEMORY STORE TESTS
// ============================================================================

mod store_tests {
    use super::*;
    use masar::memory::{ConversationStore, StoreConfig};

    proptest! {
        /// Invariant: the recent-message list never exceeds its bound
        #[test]
        fn recents_bounded(
            messages in proptest::collection::vec("\\PC{1,40}", 1..30),
            bound in 1usize..8,
        ) {
            let store = ConversationStore::new(StoreConfig {
                max_recent_messages: bound,
                ..Default::default()
            }).unwrap();

            for message in &messages {
                store.update("prop-session", message);
            }

            let record = store.get("prop-session").unwrap();
            prop_assert!(record.recent_messages.len() <= bound);
            prop_assert_eq!(record.message_count as usize, messages.len());
        }

        /// Invariant: once frozen, the summary survives any later update
        #[test]
        fn summary_is_frozen(suffixes in proptest::collection::vec("\\PC{1,40}", 1..10)) {
            let store = ConversationStore::new(StoreConfig {
                summary_threshold: 3,
                ..Default::default()
            }).unwrap();

            store.update("prop-session", "عايز بوت ماسنجر");
            store.update("prop-session", "والتكلفة مهمة");
            let frozen = store
                .update("prop-session", "كلمنا بكرة")
                .conversation_summary
                .unwrap();

            for suffix in &suffixes {
                let record = store.update("prop-session", suffix);
                prop_assert_eq!(record.conversation_summary.as_deref(), Some(frozen.as_str()));
            }
        }
    }
}
