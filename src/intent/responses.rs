//! Canned Arabic responses per intent
//!
//! Multi-variant intents pick a variant deterministically from a hash of
//! the normalized message, so routing stays a pure function of its inputs
//! and fixture tests can lock outputs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::types::{Intent, ServiceKind};

const GREET: &[&str] = &[
    "أهلاً وسهلاً! كيف أقدر أساعدك اليوم؟ 😊",
    "مرحباً! نورتنا، إيه اللي محتاجه؟ 👋",
    "أهلاً بيك! تحت أمرك، تسأل عن إيه؟ 🌟",
];

const GOODBYE: &[&str] = &[
    "في حفظ الله! موجود لو احتجت أي حاجة 🙏",
    "مع السلامة — بالتوفيق! 🌟",
    "سعيد بخدمتك! نشوفك على خير 👋",
];

const THANKS: &[&str] = &[
    "العفو! لو حابب نكمل بخطوة عملية قولي 💬",
    "على الرحب! تحب أحجز لك استشارة سريعة؟",
    "تحت أمرك دائمًا — أي استفسار تاني؟",
];

const HUMOR: &[&str] = &[
    "ضحكتني 😂 بس خلينا ننجز! تحب نبدأ بخدمة معينة؟",
    "تمام الهزار! 😄 طيب قولي عايز توصل لإيه ونظبطها لك.",
    "هايل! نخلي الهزار فاصل لطيف ونكمل شغلنا 😉 محتاج إيه بالظبط؟",
];

const AMBIGUOUS: &[&str] = &[
    "تمام 👌، ممكن توضّح أكتر؟ تحب تعرف الأسعار ولا التفاصيل الفنية؟",
    "حلو! قصدك على الخدمة نفسها ولا التكلفة والمدة؟",
    "خليني أفهمك صح، إنت عايز تعرف إيه بالضبط؟",
];

const BOOKING: &str = "ممتاز! سجلت طلبك للحجز. فريقنا هيوصل لك خلال ساعة 👨‍💼\n\nتواصل معنا عبر واتساب: +20 106 616 1454";

const PRICING: &str = "بالنسبة للتكلفة، نحدد أولاً:\n- نوع الذكاء المطلوب\n- عدد السيناريوهات\n- التكاملات الإضافية\n\nاحجز استشارة: /book أو واتساب: +20 106 616 1454";

const SERVICES: &str = "خدماتنا الرئيسية:\n🤖 بوت ماسنجر ذكي\n📱 تسويق إلكتروني\n🎬 ميديا ومونتاج\n🎨 تصميم جرافيك\n📸 تصوير فوتوغرافي\n🧠 حلول الذكاء الاصطناعي";

const URGENT: &str = "فهمت إن الموضوع عاجل! هنتواصل معاك فوراً عبر واتساب: +20 106 616 1454 🚨";

const OUT_OF_SCOPE: &str = "عذراً، هذا خارج نطاق خدماتنا. لكن أقدر أساعدك في:\n- حلول الذكاء الاصطناعي\n- التسويق الإلكتروني\n- التصميم والمونتاج";

const REPEATED: &str = "خلينا في المفيد يا بطل 🙏 لو مهتم بخدمة معينة قولي عليها، وأنا أساعدك فورًا.";

const GENERAL: &str = "أرى إن سؤالك يحتاج تفصيل أكثر. سأستخدم الذكاء الاصطناعي لإعطائك إجابة شاملة...";

const UNKNOWN: &str = "عذراً، لم أفهم طلبك. هل يمكنك إعادة صياغته؟";

/// Canned response text for an intent.
///
/// `seed` is the normalized message; it only influences which variant of a
/// multi-variant response is returned.
pub fn response_for(intent: Intent, seed: &str) -> String {
    match intent {
        Intent::Greet => pick(GREET, seed).to_string(),
        Intent::Goodbye => pick(GOODBYE, seed).to_string(),
        Intent::Thanks => pick(THANKS, seed).to_string(),
        Intent::BookingRequest => BOOKING.to_string(),
        Intent::PricingInquiry => PRICING.to_string(),
        Intent::ServiceInquiry => SERVICES.to_string(),
        Intent::UrgentSupport => URGENT.to_string(),
        Intent::HumorResponse => pick(HUMOR, seed).to_string(),
        Intent::OutOfScope => OUT_OF_SCOPE.to_string(),
        Intent::Ambiguous => pick(AMBIGUOUS, seed).to_string(),
        Intent::Repeated => REPEATED.to_string(),
        Intent::GeneralQuestion => GENERAL.to_string(),
        Intent::ContextFollowup => UNKNOWN.to_string(),
    }
}

/// Templated followup referencing the service remembered for the session
pub fn followup_response(service: ServiceKind, seed: &str) -> String {
    let variants = [
        format!(
            "لسه معاك في موضوع {} 👌 تحب نكمل في التفاصيل ولا الأسعار؟",
            service.label_ar()
        ),
        format!(
            "بالنسبة لـ{} اللي سألت عنها، تحب أحجز لك استشارة سريعة؟",
            service.label_ar()
        ),
    ];
    variants[seed_index(seed, variants.len())].clone()
}

fn pick<'a>(variants: &[&'a str], seed: &str) -> &'a str {
    variants[seed_index(seed, variants.len())]
}

/// Stable variant index from the message text
fn seed_index(seed: &str, len: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    (hasher.finish() % len as u64) as usize
}
