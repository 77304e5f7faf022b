//! Message routing decision chain
//!
//! Combines the guards, the pattern matcher, and the conversation memory
//! store into a single routing decision: answer with canned text, or
//! forward to the external LLM with context.
//!
//! The decision path is pure computation plus one store write; it never
//! fails and never panics for any input. A missing session id simply
//! disables the memory-aware behavior.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::context::{self, ContextConfig};
use crate::error::{MasarError, Result};
use crate::intent::catalog::IntentCatalog;
use crate::intent::matcher::IntentMatch;
use crate::intent::{guards, matcher, responses};
use crate::memory::ConversationStore;
use crate::types::{normalize_message, ChatMessage, Entities, Intent, IntentResult};

/// Configuration for the routing decision chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Matches above this confidence answer with canned text outright (default: 0.8)
    pub direct_threshold: f32,
    /// Matches above this confidence still answer with canned text (default: 0.6)
    pub canned_threshold: f32,
    /// Word-set similarity above this counts as repetition (default: 0.8)
    pub jaccard_threshold: f32,
    /// User messages considered by the repetition guard (default: 3)
    pub recent_window: usize,
    /// Confidence reported for ambiguous classifications (default: 0.7)
    pub ambiguous_confidence: f32,
    /// Confidence reported for repetition classifications (default: 0.8)
    pub repeated_confidence: f32,
    /// Confidence reported for memory-based followups (default: 0.75)
    pub followup_confidence: f32,
    /// History shaping applied before the repetition guard
    pub context: ContextConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            direct_threshold: 0.8,
            canned_threshold: 0.6,
            jaccard_threshold: 0.8,
            recent_window: 3,
            ambiguous_confidence: 0.7,
            repeated_confidence: 0.8,
            followup_confidence: 0.75,
            context: ContextConfig::default(),
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("direct_threshold", self.direct_threshold),
            ("canned_threshold", self.canned_threshold),
            ("ambiguous_confidence", self.ambiguous_confidence),
            ("repeated_confidence", self.repeated_confidence),
            ("followup_confidence", self.followup_confidence),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(MasarError::Config(format!(
                    "{} {} outside (0, 1]",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.jaccard_threshold) {
            return Err(MasarError::Config(format!(
                "jaccard_threshold {} outside [0, 1]",
                self.jaccard_threshold
            )));
        }
        if self.direct_threshold < self.canned_threshold {
            return Err(MasarError::Config(
                "direct_threshold must not be below canned_threshold".to_string(),
            ));
        }
        if self.recent_window == 0 {
            return Err(MasarError::Config(
                "recent_window must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// The routing engine consumed by chat route handlers
pub struct IntentRouter {
    catalog: IntentCatalog,
    store: Arc<ConversationStore>,
    config: RouterConfig,
}

impl IntentRouter {
    /// Router over the built-in catalog with default thresholds
    pub fn new(store: Arc<ConversationStore>) -> Self {
        Self {
            catalog: IntentCatalog::builtin(),
            store,
            config: RouterConfig::default(),
        }
    }

    /// Router with a custom catalog and configuration, both validated
    pub fn with_config(
        catalog: IntentCatalog,
        store: Arc<ConversationStore>,
        config: RouterConfig,
    ) -> Result<Self> {
        catalog.validate()?;
        config.validate()?;
        Ok(Self {
            catalog,
            store,
            config,
        })
    }

    /// The store backing memory-aware routing
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Route a message, using the wall clock for memory bookkeeping
    pub fn detect_intent(
        &self,
        message: &str,
        history: &[ChatMessage],
        session_id: Option<&str>,
    ) -> IntentResult {
        self.detect_intent_at(message, history, session_id, Utc::now())
    }

    /// Route a message at an explicit instant.
    ///
    /// Decision order, first applicable wins:
    /// 1. ambiguity guard: canned clarification
    /// 2. repetition guard: canned redirection
    /// 3. match above `direct_threshold`: canned response
    /// 4. match flagged for completion: forwarded to the LLM
    /// 5. match above `canned_threshold`: canned response
    /// 6. session memory holds a service: canned followup
    /// 7. generic fallback, forwarded to the LLM
    #[instrument(skip(self, message, history), fields(history_len = history.len()))]
    pub fn detect_intent_at(
        &self,
        message: &str,
        history: &[ChatMessage],
        session_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> IntentResult {
        let normalized = normalize_message(message);
        let shaped = context::shape_history(history, &self.config.context);

        let memory = session_id.map(|sid| self.store.update_at(sid, &normalized, now));

        if guards::is_ambiguous(&normalized) {
            debug!("message classified ambiguous");
            return self.guard_result(Intent::Ambiguous, self.config.ambiguous_confidence, &normalized);
        }

        if guards::is_repeated(
            &normalized,
            &shaped,
            self.config.recent_window,
            self.config.jaccard_threshold,
        ) {
            debug!("message classified repeated");
            return self.guard_result(Intent::Repeated, self.config.repeated_confidence, &normalized);
        }

        if let Some(matched) = matcher::best_match(&normalized, &self.catalog) {
            debug!(intent = %matched.intent, confidence = matched.confidence, "table match");

            if matched.confidence > self.config.direct_threshold {
                return canned(matched, &normalized);
            }
            if matched.needs_completion {
                return IntentResult {
                    intent: matched.intent,
                    confidence: matched.confidence,
                    entities: matched.entities,
                    needs_completion: true,
                    response: None,
                };
            }
            if matched.confidence > self.config.canned_threshold {
                return canned(matched, &normalized);
            }
        }

        if let Some(service) = memory.as_ref().and_then(|m| m.current_service) {
            debug!(service = %service, "memory-based followup");
            return IntentResult {
                intent: Intent::ContextFollowup,
                confidence: self.config.followup_confidence,
                entities: Entities {
                    service: Some(service),
                    ..Entities::default()
                },
                needs_completion: false,
                response: Some(responses::followup_response(service, &normalized)),
            };
        }

        IntentResult {
            intent: Intent::GeneralQuestion,
            confidence: matcher::FALLBACK_CONFIDENCE,
            entities: Entities::default(),
            needs_completion: true,
            response: Some(responses::response_for(Intent::GeneralQuestion, &normalized)),
        }
    }

    fn guard_result(&self, intent: Intent, confidence: f32, seed: &str) -> IntentResult {
        IntentResult {
            intent,
            confidence,
            entities: Entities::default(),
            needs_completion: false,
            response: Some(responses::response_for(intent, seed)),
        }
    }
}

fn canned(matched: IntentMatch, seed: &str) -> IntentResult {
    let response = responses::response_for(matched.intent, seed);
    IntentResult {
        intent: matched.intent,
        confidence: matched.confidence,
        entities: matched.entities,
        needs_completion: false,
        response: Some(response),
    }
}
