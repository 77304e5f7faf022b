//! Core types shared across the routing layer
//!
//! Wire-facing types serialize to the JSON shape the chat widget consumes:
//! camelCase result fields, snake_case intent labels, and `service_type` /
//! `urgency_level` entity keys.

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Message written by the end user
    User,
    /// Message produced by the bot
    Assistant,
    /// Prompt-level instruction, never shown to the user
    System,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
            ChatRole::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            "system" => Ok(ChatRole::System),
            _ => Err(format!("Unknown chat role: {}", s)),
        }
    }
}

/// A single message in a conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Build a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    /// Build a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// Closed set of intent categories the router can produce
///
/// The first nine are concrete catalog intents with trigger tables; the
/// last four are synthesized by the guards and the router's fallback steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greet,
    Goodbye,
    Thanks,
    BookingRequest,
    PricingInquiry,
    ServiceInquiry,
    UrgentSupport,
    HumorResponse,
    OutOfScope,
    /// Message too short or noisy to act on
    Ambiguous,
    /// Message repeats one of the user's recent messages
    Repeated,
    /// No trigger matched but session memory holds a prior service
    ContextFollowup,
    /// Generic fallback, forwarded for external completion
    GeneralQuestion,
}

impl Intent {
    /// Wire label, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greet => "greet",
            Intent::Goodbye => "goodbye",
            Intent::Thanks => "thanks",
            Intent::BookingRequest => "booking_request",
            Intent::PricingInquiry => "pricing_inquiry",
            Intent::ServiceInquiry => "service_inquiry",
            Intent::UrgentSupport => "urgent_support",
            Intent::HumorResponse => "humor_response",
            Intent::OutOfScope => "out_of_scope",
            Intent::Ambiguous => "ambiguous",
            Intent::Repeated => "repeated",
            Intent::ContextFollowup => "context_followup",
            Intent::GeneralQuestion => "general_question",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "greet" => Ok(Intent::Greet),
            "goodbye" => Ok(Intent::Goodbye),
            "thanks" => Ok(Intent::Thanks),
            "booking_request" => Ok(Intent::BookingRequest),
            "pricing_inquiry" => Ok(Intent::PricingInquiry),
            "service_inquiry" => Ok(Intent::ServiceInquiry),
            "urgent_support" => Ok(Intent::UrgentSupport),
            "humor_response" => Ok(Intent::HumorResponse),
            "out_of_scope" => Ok(Intent::OutOfScope),
            "ambiguous" => Ok(Intent::Ambiguous),
            "repeated" => Ok(Intent::Repeated),
            "context_followup" => Ok(Intent::ContextFollowup),
            "general_question" => Ok(Intent::GeneralQuestion),
            _ => Err(format!("Unknown intent: {}", s)),
        }
    }
}

/// Service categories a message can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    MessengerBot,
    WhatsappBot,
    Marketing,
    Design,
    Video,
    Photography,
}

impl ServiceKind {
    /// Wire label, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::MessengerBot => "messenger_bot",
            ServiceKind::WhatsappBot => "whatsapp_bot",
            ServiceKind::Marketing => "marketing",
            ServiceKind::Design => "design",
            ServiceKind::Video => "video",
            ServiceKind::Photography => "photography",
        }
    }

    /// Arabic display label, used in templated responses and summaries
    pub fn label_ar(&self) -> &'static str {
        match self {
            ServiceKind::MessengerBot => "بوت الماسنجر",
            ServiceKind::WhatsappBot => "بوت واتساب",
            ServiceKind::Marketing => "التسويق الإلكتروني",
            ServiceKind::Design => "التصميم الجرافيكي",
            ServiceKind::Video => "الميديا والمونتاج",
            ServiceKind::Photography => "التصوير الفوتوغرافي",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "messenger_bot" => Ok(ServiceKind::MessengerBot),
            "whatsapp_bot" => Ok(ServiceKind::WhatsappBot),
            "marketing" => Ok(ServiceKind::Marketing),
            "design" => Ok(ServiceKind::Design),
            "video" => Ok(ServiceKind::Video),
            "photography" => Ok(ServiceKind::Photography),
            _ => Err(format!("Unknown service kind: {}", s)),
        }
    }
}

/// Urgency level extracted from a message, ordinal
///
/// Within a session the level is monotonic: an update can only escalate it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// Arabic display label, used in conversation summaries
    pub fn label_ar(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "منخفض",
            UrgencyLevel::Medium => "متوسط",
            UrgencyLevel::High => "مرتفع",
            UrgencyLevel::Critical => "حرج",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyLevel::Low => write!(f, "low"),
            UrgencyLevel::Medium => write!(f, "medium"),
            UrgencyLevel::High => write!(f, "high"),
            UrgencyLevel::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(UrgencyLevel::Low),
            "medium" => Ok(UrgencyLevel::Medium),
            "high" => Ok(UrgencyLevel::High),
            "critical" => Ok(UrgencyLevel::Critical),
            _ => Err(format!("Unknown urgency level: {}", s)),
        }
    }
}

/// Structured facts extracted from a single message
///
/// Closed tagged model: each fact has its own typed slot rather than an
/// open string-keyed map. Wire keys match the widget contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    /// Detected service category
    #[serde(rename = "service_type", skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceKind>,
    /// Detected urgency level
    #[serde(rename = "urgency_level", skip_serializing_if = "Option::is_none")]
    pub urgency: Option<UrgencyLevel>,
    /// Matched location substring, as found in the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Entities {
    /// True when no fact was extracted
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.urgency.is_none() && self.location.is_none()
    }
}

/// Routing decision for a single message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResult {
    /// Detected intent category
    pub intent: Intent,
    /// Fixed confidence configured for the intent, used only for ranking
    pub confidence: f32,
    /// Facts extracted from the message
    pub entities: Entities,
    /// True when the message must be forwarded to the external LLM
    pub needs_completion: bool,
    /// Canned response text, absent when the LLM will answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Normalize a raw message for matching: trim and Unicode-lowercase.
///
/// Idempotent. Arabic text is unaffected by lowercasing; mixed Latin
/// triggers ("thx", "lol") rely on it.
pub fn normalize_message(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Generate an opaque server-side session id
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
