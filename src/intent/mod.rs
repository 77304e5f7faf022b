//! Intent detection building blocks
//!
//! Provides:
//! - The ordered intent decision table (catalog)
//! - Substring pattern matching with confidence ranking (matcher)
//! - Ambiguity and repetition guards (guards)
//! - Keyword entity extraction (entities)
//! - Canned Arabic response catalog (responses)

pub mod catalog;
pub mod entities;
pub mod guards;
pub mod matcher;
pub mod responses;

pub use catalog::{IntentCatalog, IntentSpec};
pub use guards::{is_ambiguous, is_repeated, jaccard_similarity};
pub use matcher::{best_match, match_or_default, IntentMatch, FALLBACK_CONFIDENCE};
pub use responses::{followup_response, response_for};
