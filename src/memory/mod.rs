//! Conversation memory store
//!
//! A process-wide, explicitly owned store of small per-session records used
//! to bias routing decisions across turns. Records are created on first
//! message, mutated on every update, and evicted lazily: every write sweeps
//! the whole map and drops entries older than the TTL. No background task.
//!
//! ## Invariants
//!
//! - One record per session id, overwritten in place
//! - Tags are recomputed from the latest message only; urgency never
//!   downgrades within a session
//! - The summary is composed once, when the message count crosses the
//!   threshold, and is frozen afterwards
//! - Concurrent updates to the same session are last-write-wins
//!
//! All state is in memory; a process restart discards it.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MasarError, Result};
use crate::intent::entities;
use crate::types::{ServiceKind, UrgencyLevel};

/// Default record TTL: 24 hours
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Default message count at which the summary is frozen
pub const DEFAULT_SUMMARY_THRESHOLD: u32 = 10;

/// Per-session record, serialized for the widget's memory panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMemory {
    /// Opaque session identifier
    pub session_id: String,
    /// Most recent message texts, oldest first, bounded
    pub recent_messages: Vec<String>,
    /// Last service the user asked about
    pub current_service: Option<ServiceKind>,
    /// Highest urgency seen this session
    pub urgency_level: UrgencyLevel,
    /// One-shot summary, frozen once set
    pub conversation_summary: Option<String>,
    /// Total messages seen this session
    pub message_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Configuration for the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Seconds a record survives without an update (default: 24h)
    pub ttl_secs: i64,
    /// Message count that freezes the summary (default: 10)
    pub summary_threshold: u32,
    /// Bound on the recent-message list (default: 10)
    pub max_recent_messages: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            summary_threshold: DEFAULT_SUMMARY_THRESHOLD,
            max_recent_messages: 10,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ttl_secs <= 0 {
            return Err(MasarError::Config(
                "ttl_secs must be greater than 0".to_string(),
            ));
        }
        if self.summary_threshold == 0 {
            return Err(MasarError::Config(
                "summary_threshold must be greater than 0".to_string(),
            ));
        }
        if self.max_recent_messages == 0 {
            return Err(MasarError::Config(
                "max_recent_messages must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Store counters
#[derive(Debug, Default)]
struct StoreStats {
    updates: AtomicU64,
    evictions: AtomicU64,
    summaries_frozen: AtomicU64,
}

/// Snapshot of store counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatsSnapshot {
    pub entries: usize,
    pub updates: u64,
    pub evictions: u64,
    pub summaries_frozen: u64,
}

/// Injectable conversation memory store
pub struct ConversationStore {
    entries: DashMap<String, ConversationMemory>,
    config: StoreConfig,
    stats: StoreStats,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            config: StoreConfig::default(),
            stats: StoreStats::default(),
        }
    }
}

impl ConversationStore {
    /// Build a store with a validated configuration
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: DashMap::new(),
            config,
            stats: StoreStats::default(),
        })
    }

    /// Record a message for a session, using the wall clock
    pub fn update(&self, session_id: &str, message: &str) -> ConversationMemory {
        self.update_at(session_id, message, Utc::now())
    }

    /// Record a message for a session at an explicit instant.
    ///
    /// Sweeps expired records first, then creates or mutates the session's
    /// record: appends to the bounded recent list, recomputes tags from
    /// this message only, bumps the counter, and freezes the summary when
    /// the threshold is crossed. Returns a snapshot of the updated record.
    pub fn update_at(
        &self,
        session_id: &str,
        message: &str,
        now: DateTime<Utc>,
    ) -> ConversationMemory {
        self.evict_expired_at(now);

        let mut entry = self
            .entries
            .entry(session_id.to_string())
            .or_insert_with(|| ConversationMemory {
                session_id: session_id.to_string(),
                recent_messages: Vec::new(),
                current_service: None,
                urgency_level: UrgencyLevel::Low,
                conversation_summary: None,
                message_count: 0,
                created_at: now,
                updated_at: now,
            });

        let record = entry.value_mut();
        record.message_count += 1;
        record.recent_messages.push(message.to_string());
        if record.recent_messages.len() > self.config.max_recent_messages {
            let overflow = record.recent_messages.len() - self.config.max_recent_messages;
            record.recent_messages.drain(..overflow);
        }

        let extracted = entities::extract(message);
        if let Some(service) = extracted.service {
            record.current_service = Some(service);
        }
        if let Some(urgency) = extracted.urgency {
            if urgency > record.urgency_level {
                record.urgency_level = urgency;
            }
        }

        if record.conversation_summary.is_none()
            && record.message_count >= self.config.summary_threshold
        {
            record.conversation_summary = Some(compose_summary(record));
            self.stats.summaries_frozen.fetch_add(1, Ordering::Relaxed);
            debug!(session_id, "conversation summary frozen");
        }

        record.updated_at = now;
        self.stats.updates.fetch_add(1, Ordering::Relaxed);

        record.clone()
    }

    /// Current record for a session, if any
    pub fn get(&self, session_id: &str) -> Option<ConversationMemory> {
        self.entries.get(session_id).map(|r| r.value().clone())
    }

    /// Drop all records older than the TTL relative to `now`.
    ///
    /// O(n) over the whole map; called from every update.
    pub fn evict_expired_at(&self, now: DateTime<Utc>) {
        let ttl = Duration::seconds(self.config.ttl_secs);
        let mut removed = 0u64;
        self.entries.retain(|_, record| {
            let keep = now - record.updated_at <= ttl;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
            debug!(removed, "evicted expired conversation records");
        }
    }

    /// Drop all records older than the TTL, using the wall clock
    pub fn evict_expired(&self) {
        self.evict_expired_at(Utc::now());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counter snapshot
    pub fn stats(&self) -> StoreStatsSnapshot {
        StoreStatsSnapshot {
            entries: self.entries.len(),
            updates: self.stats.updates.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            summaries_frozen: self.stats.summaries_frozen.load(Ordering::Relaxed),
        }
    }
}

/// Compose the one-shot summary from the record's tags, not its text
fn compose_summary(record: &ConversationMemory) -> String {
    let mut parts = Vec::new();
    match record.current_service {
        Some(service) => parts.push(format!("العميل مهتم بخدمة {}", service.label_ar())),
        None => parts.push("استفسار عام بدون خدمة محددة".to_string()),
    }
    parts.push(format!("مستوى الأولوية: {}", record.urgency_level.label_ar()));
    parts.push(format!("عدد الرسائل: {}", record.message_count));
    parts.join("؛ ")
}
