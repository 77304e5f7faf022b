//! Conversation history shaping
//!
//! Bounds the history handed to the guards and, by the host layer, to the
//! external LLM: keep only the most recent messages, truncate long ones,
//! and drop to a harder floor when the token estimate still overflows.

use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Approximation used for budgeting: one token per 4 characters
const CHARS_PER_TOKEN: usize = 4;

/// Configuration for history shaping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Messages kept from the end of the history (default: 3)
    pub max_messages: usize,
    /// Character cap per message before truncation (default: 200)
    pub max_message_chars: usize,
    /// Token budget for the shaped history (default: 1000)
    pub max_tokens: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_messages: 3,
            max_message_chars: 200,
            max_tokens: 1000,
        }
    }
}

/// Rough token count for a set of messages: ceil(chars / 4) each
pub fn estimate_tokens(messages: &[ChatMessage]) -> usize {
    messages
        .iter()
        .map(|m| (m.content.chars().count() + CHARS_PER_TOKEN - 1) / CHARS_PER_TOKEN)
        .sum()
}

/// Shape a history for downstream use.
///
/// Keeps the last `max_messages`, truncates each content to
/// `max_message_chars` (char-boundary safe, "..." suffix), and when the
/// token estimate still exceeds `max_tokens` keeps only the last 2.
pub fn shape_history(history: &[ChatMessage], config: &ContextConfig) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(config.max_messages);
    let mut shaped: Vec<ChatMessage> = history[start..]
        .iter()
        .map(|m| truncate_message(m, config.max_message_chars))
        .collect();

    if estimate_tokens(&shaped) > config.max_tokens {
        let drop = shaped.len().saturating_sub(2);
        shaped.drain(..drop);
    }

    shaped
}

fn truncate_message(message: &ChatMessage, max_chars: usize) -> ChatMessage {
    if message.content.chars().count() <= max_chars {
        return message.clone();
    }

    let byte_end = message
        .content
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(message.content.len());

    ChatMessage {
        role: message.role,
        content: format!("{}...", &message.content[..byte_end]),
    }
}
