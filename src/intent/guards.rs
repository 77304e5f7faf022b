//! Ambiguity and repetition guards
//!
//! Two independent pre-checks that can short-circuit routing before the
//! pattern matcher gets a say:
//!
//! - **Ambiguous**: the message is too short or too noisy to act on.
//! - **Repeated**: the message restates one of the user's recent messages.
//!
//! Both operate on normalized text and never panic.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::intent::entities;
use crate::types::{ChatMessage, ChatRole, normalize_message};

/// Fixed noise literals treated as ambiguous regardless of length
const NOISE_LITERALS: &[&str] = &["مم", "نن", "خغ", "للل", "سقلم"];

/// Interrogative words that ask for clarification without naming a subject
const INTERROGATIVE_WORDS: &[&str] = &["ايه", "إيه", "يعني", "ازاي", "إزاي", "مش فاهم", "مش واضح"];

/// Messages made of symbols only: no Arabic letter, word character, or space
static SYMBOLS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Arabic}\w\s]+$").expect("valid regex"));

/// Subject keywords that suppress the interrogative classification.
///
/// An interrogative word next to a concrete subject ("ايه الخدمات") is a
/// real question, not noise.
static SUBJECT_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(خدمات|سعر|اسعار|أسعار|تكلفة|حجز)").expect("valid regex"));

/// True when the whole message is one character repeated 3+ times ("ههههه")
fn is_repeated_char_run(text: &str) -> bool {
    let mut chars = text.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Classify a normalized message as ambiguous.
///
/// True when the message is at most 2 characters, a repeated-character run,
/// symbols only, a known noise literal, or an interrogative word with no
/// concrete service/subject keyword alongside it.
pub fn is_ambiguous(normalized: &str) -> bool {
    if normalized.chars().count() <= 2 {
        return true;
    }
    if is_repeated_char_run(normalized) {
        return true;
    }
    if SYMBOLS_ONLY.is_match(normalized) {
        return true;
    }
    if NOISE_LITERALS.contains(&normalized) {
        return true;
    }

    if INTERROGATIVE_WORDS.iter().any(|w| normalized.contains(w)) {
        let has_subject =
            entities::mentions_service(normalized) || SUBJECT_KEYWORDS.is_match(normalized);
        if !has_subject {
            return true;
        }
    }

    false
}

/// Classify a normalized message as a repetition of recent user input.
///
/// Compares against the last `recent_window` user messages in `history`:
/// exact equality after normalization, or word-set Jaccard similarity
/// strictly above `jaccard_threshold`.
pub fn is_repeated(
    normalized: &str,
    history: &[ChatMessage],
    recent_window: usize,
    jaccard_threshold: f32,
) -> bool {
    if history.is_empty() {
        return false;
    }

    let recent: Vec<String> = history
        .iter()
        .filter(|m| m.role == ChatRole::User)
        .map(|m| normalize_message(&m.content))
        .collect();

    recent
        .iter()
        .rev()
        .take(recent_window)
        .any(|r| r.as_str() == normalized || jaccard_similarity(r, normalized) > jaccard_threshold)
}

/// Word-set Jaccard similarity between two texts.
///
/// Symmetric, in [0, 1]. Two texts with identical word sets score 1.0;
/// two empty texts are considered identical.
pub fn jaccard_similarity(a: &str, b: &str) -> f32 {
    use std::collections::HashSet;

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = words_a.intersection(&words_b).count();

    intersection as f32 / union as f32
}
