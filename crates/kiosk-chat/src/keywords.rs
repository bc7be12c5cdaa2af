//! Keyword tables and intent classification.
//!
//! Each table compiles to one case-insensitive regex matched on word
//! boundaries, so "hi" does not fire inside "this". A trailing `*` marks a
//! stem: `thank*` matches "thanks" and "thankful". Multi-word entries
//! tolerate any run of whitespace between words.

use std::sync::LazyLock;

use kiosk_core::{Category, Intent};
use regex::Regex;

// =============================================================================
// KeywordSet
// =============================================================================

/// A compiled, ordered keyword list.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    regex: Regex,
}

impl KeywordSet {
    pub fn new(words: &[&str]) -> Self {
        let alts: Vec<String> = words
            .iter()
            .map(|w| {
                let (stem, open) = match w.strip_suffix('*') {
                    Some(stem) => (stem, true),
                    None => (*w, false),
                };
                let body = stem
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+");
                if open {
                    format!(r"{}\w*", body)
                } else {
                    body
                }
            })
            .collect();
        let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alts.join("|")))
            .expect("keyword tables are static and valid");
        Self { regex }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

// =============================================================================
// Conversation-level tables (strategy steps 1-4)
// =============================================================================

pub static GREETING: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "hi",
        "hello",
        "hey",
        "hiya",
        "greetings",
        "good morning",
        "good afternoon",
        "good evening",
        "start",
    ])
});

pub static FAREWELL: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["bye", "goodbye", "see you", "see ya", "exit", "quit"])
});

pub static THANKS: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["thank*", "appreciate*", "thx", "ty"]));

pub static HELP: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["help", "what can you do", "commands"])
});

/// Exact commands that restart the conversation.
const RESET_COMMANDS: &[&str] = &["/start", "/reset", "reset", "start over"];

/// `lowered` must already be trimmed and lower-cased.
pub fn is_reset_command(lowered: &str) -> bool {
    RESET_COMMANDS.contains(&lowered)
}

// =============================================================================
// Meta requests (strategy step 5)
// =============================================================================

/// Requests about catalog subsets rather than one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaRequest {
    Browse,
    Cheapest,
    Compare,
    Bundle,
    /// Shipping, returns or warranty question. See [`FaqTopic`].
    Faq,
}

impl MetaRequest {
    /// Checked in this order; first match wins.
    pub const ORDER: [MetaRequest; 5] = [
        MetaRequest::Browse,
        MetaRequest::Cheapest,
        MetaRequest::Compare,
        MetaRequest::Bundle,
        MetaRequest::Faq,
    ];

    pub fn intent(&self) -> Intent {
        match self {
            MetaRequest::Browse => Intent::CatalogBrowse,
            MetaRequest::Cheapest => Intent::Cheapest,
            MetaRequest::Compare => Intent::Compare,
            MetaRequest::Bundle => Intent::Bundle,
            MetaRequest::Faq => Intent::Faq,
        }
    }

    fn keywords(&self) -> &'static KeywordSet {
        match self {
            MetaRequest::Browse => &BROWSE,
            MetaRequest::Cheapest => &CHEAPEST,
            MetaRequest::Compare => &COMPARE_REQUEST,
            MetaRequest::Bundle => &BUNDLE,
            MetaRequest::Faq => &FAQ,
        }
    }
}

static BROWSE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "all products",
        "show all",
        "full catalog",
        "catalog*",
        "list",
        "lists",
        "what else",
        "other products",
        "more products",
        "categor*",
        "what do you sell",
    ])
});

static CHEAPEST: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "cheap*",
        "affordable",
        "budget*",
        "least expensive",
        "lowest price*",
    ])
});

static COMPARE_REQUEST: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["compare*", "vs", "versus", "difference between"]));

static BUNDLE: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["bundle*", "combo*", "package deal*"]));

static FAQ: LazyLock<KeywordSet> = LazyLock::new(|| {
    let words: Vec<&str> = FaqTopic::ORDER
        .iter()
        .flat_map(|topic| topic.words().iter().copied())
        .collect();
    KeywordSet::new(&words)
});

pub fn classify_meta(text: &str) -> Option<MetaRequest> {
    MetaRequest::ORDER
        .into_iter()
        .find(|meta| meta.keywords().matches(text))
}

/// Store policy a [`MetaRequest::Faq`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqTopic {
    Shipping,
    Returns,
    Warranty,
}

impl FaqTopic {
    pub const ORDER: [FaqTopic; 3] = [FaqTopic::Shipping, FaqTopic::Returns, FaqTopic::Warranty];

    fn words(&self) -> &'static [&'static str] {
        match self {
            FaqTopic::Shipping => &["ship", "ships", "shipping", "shipped", "deliver*", "track my order"],
            FaqTopic::Returns => &["return*", "refund*", "exchange*", "money back"],
            FaqTopic::Warranty => &["warrant*", "guarantee*"],
        }
    }

    fn keywords(&self) -> &'static KeywordSet {
        static SETS: LazyLock<[KeywordSet; 3]> =
            LazyLock::new(|| FaqTopic::ORDER.map(|topic| KeywordSet::new(topic.words())));
        &SETS[*self as usize]
    }
}

pub fn classify_faq(text: &str) -> Option<FaqTopic> {
    FaqTopic::ORDER
        .into_iter()
        .find(|topic| topic.keywords().matches(text))
}

// =============================================================================
// Category and use-case browsing (strategy step 5, no product named)
// =============================================================================

/// Words that name a whole category. Product aliases are deliberately
/// absent: a named product goes to entity detection instead.
fn category_words(category: Category) -> &'static [&'static str] {
    match category {
        Category::SmartHome => &["smart home", "home devices"],
        Category::Audio => &["audio", "speakers"],
        Category::Wearables => &["wearable*"],
        Category::Power => &["power charging", "power & charging", "chargers", "power products"],
        Category::Productivity => &["productivity", "office gear"],
        Category::Entertainment => &["entertainment", "cameras"],
    }
}

static CATEGORY_SETS: LazyLock<Vec<(Category, KeywordSet)>> = LazyLock::new(|| {
    Category::ALL
        .into_iter()
        .map(|c| (c, KeywordSet::new(category_words(c))))
        .collect()
});

/// First category named outright in `text`, in [`Category::ALL`] order.
pub fn classify_category(text: &str) -> Option<Category> {
    CATEGORY_SETS
        .iter()
        .find(|(_, set)| set.matches(text))
        .map(|(c, _)| *c)
}

/// What the shopper wants the gear for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    Fitness,
    HomeAutomation,
    Entertainment,
    RemoteWork,
    Travel,
}

impl UseCase {
    /// Checked in this order; first match wins.
    pub const ORDER: [UseCase; 5] = [
        UseCase::Fitness,
        UseCase::HomeAutomation,
        UseCase::Entertainment,
        UseCase::RemoteWork,
        UseCase::Travel,
    ];

    fn words(&self) -> &'static [&'static str] {
        match self {
            UseCase::Fitness => &[
                "fitness",
                "workout*",
                "gym",
                "exercis*",
                "running",
                "cardio",
                "athlete*",
                "heart rate",
                "calories",
            ],
            UseCase::HomeAutomation => &[
                "automate",
                "automation",
                "control lights",
                "voice control",
                "home security",
                "protect my home",
                "protect home",
            ],
            UseCase::Entertainment => &["gaming", "game*", "movie*", "party", "parties", "streaming"],
            UseCase::RemoteWork => &[
                "work from home",
                "remote work",
                "wfh",
                "home office",
                "desk setup",
                "ergonomic*",
                "typing",
            ],
            UseCase::Travel => &[
                "travel*",
                "trip*",
                "vacation*",
                "camping",
                "adventure*",
                "backpack*",
                "on the go",
            ],
        }
    }

    fn keywords(&self) -> &'static KeywordSet {
        static SETS: LazyLock<[KeywordSet; 5]> =
            LazyLock::new(|| UseCase::ORDER.map(|u| KeywordSet::new(u.words())));
        &SETS[*self as usize]
    }
}

pub fn classify_use_case(text: &str) -> Option<UseCase> {
    UseCase::ORDER.into_iter().find(|u| u.keywords().matches(text))
}

// =============================================================================
// Qualifiers (strategy steps 6 and 8)
// =============================================================================

/// Secondary intent about a specific product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Price,
    Buy,
    Spec,
    Compare,
    Affirmative,
    Negative,
    Interest,
}

impl Qualifier {
    /// Checked in this order; first match wins.
    pub const ORDER: [Qualifier; 7] = [
        Qualifier::Price,
        Qualifier::Buy,
        Qualifier::Spec,
        Qualifier::Compare,
        Qualifier::Affirmative,
        Qualifier::Negative,
        Qualifier::Interest,
    ];

    /// Qualifiers that refine a freshly detected product.
    pub const PRODUCT: [Qualifier; 4] = [
        Qualifier::Price,
        Qualifier::Buy,
        Qualifier::Spec,
        Qualifier::Compare,
    ];

    pub fn intent(&self) -> Intent {
        match self {
            Qualifier::Price => Intent::PriceInquiry,
            Qualifier::Buy => Intent::BuyIntent,
            Qualifier::Spec => Intent::SpecInquiry,
            Qualifier::Compare => Intent::Compare,
            Qualifier::Affirmative => Intent::Affirmative,
            Qualifier::Negative => Intent::Negative,
            Qualifier::Interest => Intent::Continuation,
        }
    }

    fn keywords(&self) -> &'static KeywordSet {
        match self {
            Qualifier::Price => &PRICE,
            Qualifier::Buy => &BUY,
            Qualifier::Spec => &SPEC,
            Qualifier::Compare => &ALTERNATIVES,
            Qualifier::Affirmative => &AFFIRMATIVE,
            Qualifier::Negative => &NEGATIVE,
            Qualifier::Interest => &INTEREST,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.keywords().matches(text)
    }
}

static PRICE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["price*", "cost*", "how much", "expensive"])
});

static BUY: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "buy*",
        "purchas*",
        "order*",
        "get it",
        "take it",
        "checkout",
    ])
});

static SPEC: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "spec*",
        "feature*",
        "detail*",
        "info*",
        "tell me more",
        "what can it do",
    ])
});

static ALTERNATIVES: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["difference", "better", "alternative*", "similar", "other options"])
});

static AFFIRMATIVE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["yes", "yeah", "yep", "sure", "ok", "okay", "interested", "sounds good"])
});

static NEGATIVE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["no", "nah", "nope", "not interested", "maybe later"])
});

static INTEREST: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "cool",
        "nice",
        "awesome",
        "good",
        "great",
        "love it",
        "like it",
        "perfect",
        "exactly",
        "that works",
    ])
});

/// First qualifier of `candidates` that matches, in the order given.
pub fn classify_qualifier(text: &str, candidates: &[Qualifier]) -> Option<Qualifier> {
    candidates.iter().copied().find(|q| q.matches(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- KeywordSet ----

    #[test]
    fn test_word_boundary() {
        let set = KeywordSet::new(&["hi"]);
        assert!(set.matches("hi"));
        assert!(set.matches("Hi there!"));
        assert!(!set.matches("this is it"));
        assert!(!set.matches("chips"));
    }

    #[test]
    fn test_stem_entries() {
        let set = KeywordSet::new(&["thank*"]);
        assert!(set.matches("thanks a lot"));
        assert!(set.matches("Thank you"));
        assert!(set.matches("so thankful"));
        assert!(!set.matches("unthankful"));
    }

    #[test]
    fn test_phrase_whitespace() {
        let set = KeywordSet::new(&["how much"]);
        assert!(set.matches("how   much is it"));
        assert!(set.matches("HOW MUCH"));
        assert!(!set.matches("however much"));
    }

    #[test]
    fn test_special_characters_escaped() {
        let set = KeywordSet::new(&["c++", "don't know"]);
        assert!(set.matches("i don't know"));
        assert!(!set.matches("c"));
    }

    // ---- tables ----

    #[test]
    fn test_reset_commands_exact() {
        assert!(is_reset_command("/start"));
        assert!(is_reset_command("start over"));
        assert!(!is_reset_command("please reset my password"));
    }

    #[test]
    fn test_greeting_farewell_thanks_help() {
        assert!(GREETING.matches("hello"));
        assert!(GREETING.matches("good morning"));
        assert!(FAREWELL.matches("ok bye"));
        assert!(!FAREWELL.matches("maybe later"));
        assert!(THANKS.matches("ty!"));
        assert!(HELP.matches("what can you do?"));
    }

    #[test]
    fn test_help_leaves_other_options_to_alternatives() {
        assert!(!HELP.matches("any other options"));
        assert_eq!(
            classify_qualifier("any other options", &Qualifier::ORDER),
            Some(Qualifier::Compare)
        );
    }

    // ---- meta ----

    #[test]
    fn test_classify_meta_order() {
        assert_eq!(classify_meta("show me all products"), Some(MetaRequest::Browse));
        assert_eq!(classify_meta("cheapest speaker"), Some(MetaRequest::Cheapest));
        // Browse is checked before cheapest.
        assert_eq!(
            classify_meta("cheap stuff in the catalog"),
            Some(MetaRequest::Browse)
        );
        assert_eq!(
            classify_meta("compare earbuds vs headphones"),
            Some(MetaRequest::Compare)
        );
        assert_eq!(classify_meta("any bundles?"), Some(MetaRequest::Bundle));
        assert_eq!(
            classify_meta("what's your shipping policy"),
            Some(MetaRequest::Faq)
        );
        assert_eq!(classify_meta("tell me about the drone"), None);
    }

    #[test]
    fn test_every_entity_exclusion_has_a_meta_request() {
        for phrase in crate::entity::EXCLUSIONS {
            assert!(classify_meta(phrase).is_some(), "{} reaches no handler", phrase);
        }
        assert_eq!(classify_meta("anything cheaper?"), Some(MetaRequest::Cheapest));
        assert_eq!(classify_meta("budgeting for a gift"), Some(MetaRequest::Cheapest));
        assert_eq!(classify_meta("which category"), Some(MetaRequest::Browse));
        assert_eq!(
            classify_meta("give me a list of speakers"),
            Some(MetaRequest::Browse)
        );
        assert_eq!(classify_meta("listen to this"), None);
    }

    #[test]
    fn test_classify_faq_topics() {
        assert_eq!(classify_faq("do you ship abroad"), Some(FaqTopic::Shipping));
        assert_eq!(classify_faq("how long is delivery"), Some(FaqTopic::Shipping));
        assert_eq!(classify_faq("can I return it"), Some(FaqTopic::Returns));
        assert_eq!(classify_faq("do you have a warranty"), Some(FaqTopic::Warranty));
        assert_eq!(classify_faq("is there a guarantee"), Some(FaqTopic::Warranty));
        assert_eq!(classify_faq("relationship advice"), None);
    }

    #[test]
    fn test_classify_category_whole_words() {
        assert_eq!(classify_category("show me audio products"), Some(Category::Audio));
        assert_eq!(classify_category("wearables"), Some(Category::Wearables));
        assert_eq!(classify_category("power charging"), Some(Category::Power));
        assert_eq!(classify_category("what cameras do you have"), Some(Category::Entertainment));
        assert_eq!(classify_category("does it work at home"), None);
        assert_eq!(classify_category("is it powerful"), None);
    }

    #[test]
    fn test_classify_use_case() {
        assert_eq!(
            classify_use_case("i need gear for my fitness workouts"),
            Some(UseCase::Fitness)
        );
        assert_eq!(
            classify_use_case("i want to automate my lights"),
            Some(UseCase::HomeAutomation)
        );
        assert_eq!(classify_use_case("movie night ideas"), Some(UseCase::Entertainment));
        assert_eq!(classify_use_case("my home office desk setup"), Some(UseCase::RemoteWork));
        assert_eq!(classify_use_case("going camping next week"), Some(UseCase::Travel));
        assert_eq!(classify_use_case("tell me about the drone"), None);
    }

    #[test]
    fn test_meta_intents() {
        assert_eq!(MetaRequest::Browse.intent(), Intent::CatalogBrowse);
        assert_eq!(MetaRequest::Bundle.intent(), Intent::Bundle);
        assert_eq!(MetaRequest::Faq.intent(), Intent::Faq);
    }

    // ---- qualifiers ----

    #[test]
    fn test_classify_qualifier_first_match_wins() {
        // "price" is checked before "buy".
        assert_eq!(
            classify_qualifier("what's the price if I buy two", &Qualifier::ORDER),
            Some(Qualifier::Price)
        );
        assert_eq!(
            classify_qualifier("I want to order it", &Qualifier::ORDER),
            Some(Qualifier::Buy)
        );
        assert_eq!(
            classify_qualifier("tell me more", &Qualifier::ORDER),
            Some(Qualifier::Spec)
        );
        assert_eq!(
            classify_qualifier("is there anything better", &Qualifier::ORDER),
            Some(Qualifier::Compare)
        );
        assert_eq!(
            classify_qualifier("yes please", &Qualifier::ORDER),
            Some(Qualifier::Affirmative)
        );
        assert_eq!(
            classify_qualifier("nah", &Qualifier::ORDER),
            Some(Qualifier::Negative)
        );
        assert_eq!(
            classify_qualifier("that looks awesome", &Qualifier::ORDER),
            Some(Qualifier::Interest)
        );
        assert_eq!(classify_qualifier("hmm", &Qualifier::ORDER), None);
    }

    #[test]
    fn test_product_qualifiers_skip_conversational() {
        assert_eq!(classify_qualifier("yes the drone", &Qualifier::PRODUCT), None);
        assert_eq!(
            classify_qualifier("drone specs", &Qualifier::PRODUCT),
            Some(Qualifier::Spec)
        );
    }

    #[test]
    fn test_no_does_not_match_inside_words() {
        assert!(!Qualifier::Negative.matches("I know"));
        assert!(!Qualifier::Negative.matches("nothing"));
        assert!(Qualifier::Negative.matches("no thanks"));
    }

    #[test]
    fn test_qualifier_intents() {
        assert_eq!(Qualifier::Price.intent(), Intent::PriceInquiry);
        assert_eq!(Qualifier::Interest.intent(), Intent::Continuation);
    }
}
