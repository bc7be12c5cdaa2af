//! Emotional-signal detection and the matching empathetic replies.

use std::sync::LazyLock;

use kiosk_core::{Emotion, Product};

use crate::keywords::KeywordSet;

static FRUSTRATION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "frustrat*",
        "annoy*",
        "ridiculous",
        "stupid",
        "terrible",
        "awful",
        "worst",
        "horrible",
        "disappoint*",
        "upset",
        "angry",
        "mad",
        "furious",
        "unacceptable",
        "pathetic",
        "third time",
        "second time",
        "again and again",
        "keep asking",
        "still waiting",
    ])
});

static URGENCY: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "urgent*",
        "asap",
        "immediately",
        "right now",
        "now",
        "today",
        "quickly",
        "fast",
        "hurry",
        "rush*",
    ])
});

static HESITATION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "not sure",
        "unsure",
        "doubt*",
        "hesitant",
        "thinking about it",
        "maybe",
        "hmm*",
        "dunno",
        "don't know",
    ])
});

static BUDGET_CONCERN: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "too expensive",
        "can't afford",
        "cannot afford",
        "out of budget",
        "pricey",
        "too much",
        "cheaper alternative*",
    ])
});

/// Priority order: anger is addressed before urgency, urgency before doubt.
const PRIORITY: [Emotion; 4] = [
    Emotion::Frustration,
    Emotion::Urgency,
    Emotion::Hesitation,
    Emotion::BudgetConcern,
];

fn keywords(emotion: Emotion) -> &'static KeywordSet {
    match emotion {
        Emotion::Frustration => &FRUSTRATION,
        Emotion::Urgency => &URGENCY,
        Emotion::Hesitation => &HESITATION,
        Emotion::BudgetConcern => &BUDGET_CONCERN,
    }
}

/// Reports at most one emotion per message.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionClassifier;

impl EmotionClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Option<Emotion> {
        PRIORITY
            .into_iter()
            .find(|emotion| keywords(*emotion).matches(text))
    }
}

/// Reply for an emotional message, mentioning the remembered product if any.
pub fn empathetic_response(
    emotion: Emotion,
    product: Option<&Product>,
    support_handle: &str,
) -> String {
    match emotion {
        Emotion::Frustration => {
            let about = product
                .map(|p| format!(" about the {}", p.name))
                .unwrap_or_default();
            format!(
                "I'm really sorry for the frustration. That is not the experience we want you to have. 😔\n\n\
                 Our support team at {} will put your case first and sort it out.\n\n\
                 Is there anything I can clear up{} right now?",
                support_handle, about
            )
        }
        Emotion::Urgency => {
            let stock = match product {
                Some(p) => format!("The {} is in stock and ready to ship today.", p.name),
                None => "Everything in the catalog is in stock and ready to ship.".to_string(),
            };
            format!(
                "Understood, you need this fast! ⚡\n\n{}\n\n\
                 🚀 Express options:\n\
                 • Same-day delivery in selected areas\n\
                 • Express shipping in 2-3 business days\n\
                 • Priority handling for urgent orders\n\n\
                 Message {} with \"URGENT\" and your order jumps the queue.",
                stock, support_handle
            )
        }
        Emotion::Hesitation => {
            let about = product
                .map(|p| format!(" about the {}", p.name))
                .unwrap_or_default();
            format!(
                "That's completely fair, you should feel confident before buying. 🤔\n\n\
                 A few things that might help you decide{}:\n\n\
                 ✅ 30-day money-back guarantee\n\
                 ✅ 1-year warranty included\n\
                 ✅ Free returns if it isn't right\n\n\
                 What's holding you back? Ask me anything.",
                about
            )
        }
        Emotion::BudgetConcern => {
            let subject = match product {
                Some(p) => format!("the {} (${})", p.name, p.price),
                None => "this".to_string(),
            };
            format!(
                "Budget matters, I get it. 💰\n\n\
                 Here are some options for {}:\n\n\
                 1️⃣ Type \"cheapest\" to see our most affordable picks\n\
                 2️⃣ Type \"bundles\" for multi-product savings\n\
                 3️⃣ Ask {} about flexible payment plans\n\n\
                 Want me to suggest something cheaper?",
                subject, support_handle
            )
        }
    }
}
