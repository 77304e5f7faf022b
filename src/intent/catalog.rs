//! Intent decision table
//!
//! An ordered table of intent specs: literal trigger substrings, a fixed
//! confidence used only for ranking, and a flag marking whether the intent
//! must be completed by the external LLM. Table order matters: it is the
//! tie-breaker the matcher relies on.

use serde::{Deserialize, Serialize};

use crate::error::{MasarError, Result};
use crate::types::Intent;

/// One row of the decision table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSpec {
    /// Intent this row produces
    pub intent: Intent,
    /// Literal substrings that trigger the intent
    pub triggers: Vec<String>,
    /// Fixed confidence, (0, 1]
    pub confidence: f32,
    /// Forward to the external LLM instead of answering with canned text
    pub needs_completion: bool,
}

impl IntentSpec {
    fn new(intent: Intent, confidence: f32, triggers: &[&str]) -> Self {
        Self {
            intent,
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            confidence,
            needs_completion: false,
        }
    }
}

/// Ordered intent table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentCatalog {
    specs: Vec<IntentSpec>,
}

impl Default for IntentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IntentCatalog {
    /// The production table for the Arabic chatbot widget
    pub fn builtin() -> Self {
        Self {
            specs: vec![
                IntentSpec::new(
                    Intent::Greet,
                    0.9,
                    &[
                        "مرحبا",
                        "أهلاً",
                        "السلام عليكم",
                        "سلام عليكم",
                        "أهلاً وسهلاً",
                        "مرحباً",
                        "اهلا",
                        "اهلا!",
                        "هلا",
                        "هلا والله",
                    ],
                ),
                IntentSpec::new(
                    Intent::Goodbye,
                    0.9,
                    &[
                        "مع السلامة",
                        "وداعا",
                        "وداعاً",
                        "باي",
                        "في أمان الله",
                        "الله معاك",
                        "نشوفك",
                    ],
                ),
                IntentSpec::new(
                    Intent::Thanks,
                    0.9,
                    &[
                        "شكرا",
                        "شكراً",
                        "مشكور",
                        "متشكر",
                        "متشكرة",
                        "thx",
                        "thanks",
                        "شكرا لك",
                        "شكراً لك",
                    ],
                ),
                IntentSpec::new(
                    Intent::BookingRequest,
                    0.95,
                    &[
                        "عايز أحجز",
                        "محتاج حجز",
                        "أريد حجز",
                        "احجز لي",
                        "احجز ليا",
                        "احجز موعد",
                        "احجز استشارة",
                        "احجز جلسة",
                        "احجز خدمة",
                        "احجز معكم",
                    ],
                ),
                IntentSpec::new(
                    Intent::PricingInquiry,
                    0.9,
                    &[
                        "بكم",
                        "بكام",
                        "السعر",
                        "التكلفة",
                        "بيكلف كام",
                        "يعملوا كام",
                        "السعر كام",
                        "التكلفة كام",
                        "بكم الخدمة",
                        "بكم المشروع",
                    ],
                ),
                IntentSpec::new(
                    Intent::ServiceInquiry,
                    0.9,
                    &[
                        "إيه الخدمات",
                        "ما هي الخدمات",
                        "ايه الخدمات",
                        "الخدمات إيه",
                        "ما الخدمات",
                        "ايه بتعملوا",
                        "إيه بتعملوا",
                        "ما بتعملوا",
                        "الخدمات المتاحة",
                        "ايه متاح",
                    ],
                ),
                IntentSpec::new(
                    Intent::UrgentSupport,
                    0.95,
                    &[
                        "عاجل",
                        "ضروري",
                        "مشكلة",
                        "مشكله",
                        "مشكلة عاجلة",
                        "مشكله عاجله",
                        "عايز حل فوري",
                        "محتاج مساعدة عاجلة",
                        "مساعدة فورية",
                    ],
                ),
                IntentSpec::new(
                    Intent::HumorResponse,
                    0.8,
                    &[
                        "هزار",
                        "نكتة",
                        "نكت",
                        "بهزر",
                        "بهزار",
                        "هههه",
                        "lol",
                        "حلبؤه",
                        "حلبؤة",
                        "مزح",
                    ],
                ),
                IntentSpec::new(
                    Intent::OutOfScope,
                    0.9,
                    &[
                        "طيران",
                        "سفر",
                        "سياحة",
                        "مطعم",
                        "فندق",
                        "شراء",
                        "بيع",
                        "استثمار",
                        "عقارات",
                        "سيارات",
                    ],
                ),
            ],
        }
    }

    /// Build a custom table; rows keep the given order
    pub fn new(specs: Vec<IntentSpec>) -> Self {
        Self { specs }
    }

    /// Rows in table order
    pub fn specs(&self) -> &[IntentSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Reject rows that can never match or would break ranking
    pub fn validate(&self) -> Result<()> {
        for spec in &self.specs {
            if spec.triggers.is_empty() {
                return Err(MasarError::InvalidInput(format!(
                    "intent {} has no triggers",
                    spec.intent
                )));
            }
            if spec.triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(MasarError::InvalidInput(format!(
                    "intent {} has an empty trigger",
                    spec.intent
                )));
            }
            if !(spec.confidence > 0.0 && spec.confidence <= 1.0) {
                return Err(MasarError::InvalidInput(format!(
                    "intent {} confidence {} outside (0, 1]",
                    spec.intent, spec.confidence
                )));
            }
        }
        Ok(())
    }
}
