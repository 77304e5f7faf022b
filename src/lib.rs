//! Masar - heuristic intent routing for an Arabic chatbot widget
//!
//! Decides, per chat message, whether to answer with canned Arabic text or
//! forward to an external LLM with context: an ordered intent table with
//! substring matching, ambiguity/repetition guards, keyword entity
//! extraction, and a per-session conversation memory store with
//! sweep-on-write eviction.

pub mod context;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod limiter;
pub mod memory;
pub mod router;
pub mod types;

pub use error::{MasarError, Result};
pub use intent::{IntentCatalog, IntentMatch, IntentSpec};
pub use limiter::{RateDecision, RateLimiter, RateLimiterConfig};
pub use memory::{ConversationMemory, ConversationStore, StoreConfig};
pub use router::{IntentRouter, RouterConfig};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
