//! The dialogue resolver.
//!
//! Each turn walks [`STRATEGY_CHAIN`] in order and the first strategy that
//! produces a reply wins. The only state is the user's
//! [`ConversationRecord`], which is locked for the whole turn so duplicate
//! deliveries for one user resolve one after the other.

use std::sync::Arc;

use kiosk_core::config::{DialogConfig, VagueFollowup};
use kiosk_core::{
    Catalog, Category, Emotion, Intent, KioskConfig, Product, Reply, StrategyKind, Turn, UserId,
};
use tracing::debug;

use crate::emotion::{empathetic_response, EmotionClassifier};
use crate::enhancer::ResponseEnhancer;
use crate::entity::EntityResolver;
use crate::error::ChatError;
use crate::formatters;
use crate::keywords::{
    classify_category, classify_faq, classify_meta, classify_qualifier, classify_use_case,
    is_reset_command, MetaRequest, Qualifier, FAREWELL, GREETING, HELP, THANKS,
};
use crate::memory::{lock_record, ConversationMemory, ConversationRecord};
use crate::random::{choose, RandomSource};

/// Number of products listed for an unscoped "cheapest" request.
const CHEAPEST_OVERALL_COUNT: usize = 5;

// =============================================================================
// Strategy chain
// =============================================================================

/// Per-turn working state handed to each strategy.
struct TurnState<'a> {
    text: &'a str,
    lowered: String,
    word_count: usize,
    emotion: Option<Emotion>,
    record: &'a mut ConversationRecord,
    cleared: bool,
}

impl TurnState<'_> {
    fn clear(&mut self) {
        self.record.reset();
        self.cleared = true;
    }
}

/// What a strategy produced.
struct Resolution {
    text: String,
    product: Option<String>,
    intent: Intent,
}

impl Resolution {
    fn new(text: String, intent: Intent) -> Self {
        Self {
            text,
            product: None,
            intent,
        }
    }

    fn about(mut self, product: &Product) -> Self {
        self.product = Some(product.name.clone());
        self
    }
}

type Handler = fn(&DialogResolver, &mut TurnState<'_>) -> Option<Resolution>;

/// One rule of the resolution chain.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub kind: StrategyKind,
    handler: Handler,
}

/// The resolution rules in evaluation order. `Default` always fires.
pub const STRATEGY_CHAIN: [Strategy; 9] = [
    Strategy {
        kind: StrategyKind::GreetingOverride,
        handler: DialogResolver::greeting_override,
    },
    Strategy {
        kind: StrategyKind::Farewell,
        handler: DialogResolver::farewell,
    },
    Strategy {
        kind: StrategyKind::Thanks,
        handler: DialogResolver::thanks,
    },
    Strategy {
        kind: StrategyKind::Help,
        handler: DialogResolver::help,
    },
    Strategy {
        kind: StrategyKind::CategoryRequest,
        handler: DialogResolver::category_request,
    },
    Strategy {
        kind: StrategyKind::EntityDetection,
        handler: DialogResolver::entity_detection,
    },
    Strategy {
        kind: StrategyKind::EmotionOverride,
        handler: DialogResolver::emotion_override,
    },
    Strategy {
        kind: StrategyKind::Continuation,
        handler: DialogResolver::continuation,
    },
    Strategy {
        kind: StrategyKind::Default,
        handler: DialogResolver::default_menu,
    },
];

/// Strategy kinds in evaluation order.
pub fn strategy_order() -> Vec<StrategyKind> {
    STRATEGY_CHAIN.iter().map(|s| s.kind).collect()
}

// =============================================================================
// DialogResolver
// =============================================================================

/// Resolves one user message at a time against the catalog and the user's
/// conversation memory.
pub struct DialogResolver {
    catalog: Arc<Catalog>,
    memory: Arc<ConversationMemory>,
    entities: EntityResolver,
    emotions: EmotionClassifier,
    enhancer: ResponseEnhancer,
    random: Arc<dyn RandomSource>,
    dialog: DialogConfig,
    assistant_name: String,
    support_handle: String,
}

impl DialogResolver {
    pub fn new(
        config: &KioskConfig,
        catalog: Arc<Catalog>,
        memory: Arc<ConversationMemory>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            entities: EntityResolver::new(Arc::clone(&catalog)),
            emotions: EmotionClassifier::new(),
            enhancer: ResponseEnhancer::new(config.enhancer.clone(), Arc::clone(&random)),
            catalog,
            memory,
            random,
            dialog: config.dialog.clone(),
            assistant_name: config.general.assistant_name.clone(),
            support_handle: config.general.support_handle.clone(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn memory(&self) -> &Arc<ConversationMemory> {
        &self.memory
    }

    /// Resolve one message.
    ///
    /// Only a memory failure is an error; unrecognised input always ends in
    /// the default menu.
    pub fn resolve_turn(&self, user_id: UserId, text: &str) -> Result<Reply, ChatError> {
        let text = truncate_chars(text, self.dialog.max_message_chars);
        let lowered = text.trim().to_lowercase();

        if lowered.is_empty() {
            debug!(user_id, "empty message, default menu");
            return Ok(Reply {
                text: formatters::default_menu(&self.catalog),
                product_context: None,
                intent: Intent::Unclassified,
                emotion: None,
                strategy: StrategyKind::Default,
                context_cleared: false,
            });
        }

        let handle = self.memory.handle(user_id)?;
        let mut record = lock_record(&handle)?;

        let mut state = TurnState {
            text,
            word_count: lowered.split_whitespace().count(),
            emotion: self.emotions.classify(&lowered),
            lowered,
            record: &mut record,
            cleared: false,
        };

        let (kind, resolution) = STRATEGY_CHAIN
            .iter()
            .find_map(|s| (s.handler)(self, &mut state).map(|r| (s.kind, r)))
            .unwrap_or_else(|| {
                (
                    StrategyKind::Default,
                    Resolution::new(formatters::default_menu(&self.catalog), Intent::Unclassified),
                )
            });

        if !state.cleared {
            state.record.push_turn(Turn::new(
                text,
                &resolution.text,
                resolution.intent,
                resolution.product.as_deref(),
            ));
        }

        debug!(
            user_id,
            strategy = ?kind,
            intent = %resolution.intent,
            emotion = ?state.emotion,
            product = ?resolution.product,
            cleared = state.cleared,
            "turn resolved"
        );

        Ok(Reply {
            text: resolution.text,
            product_context: resolution.product,
            intent: resolution.intent,
            emotion: state.emotion,
            strategy: kind,
            context_cleared: state.cleared,
        })
    }

    // -------------------------------------------------------------------------
    // Strategies
    // -------------------------------------------------------------------------

    fn greeting_override(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        let bare_greeting = state.word_count <= self.dialog.greeting_max_words
            && GREETING.matches(&state.lowered);
        if !bare_greeting && !is_reset_command(&state.lowered) {
            return None;
        }
        state.clear();
        Some(Resolution::new(
            formatters::greeting(&self.assistant_name, &self.catalog),
            Intent::Greeting,
        ))
    }

    fn farewell(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        if !FAREWELL.matches(&state.lowered) {
            return None;
        }
        state.clear();
        Some(Resolution::new(
            formatters::farewell(&self.assistant_name),
            Intent::Farewell,
        ))
    }

    fn thanks(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        THANKS
            .matches(&state.lowered)
            .then(|| Resolution::new(formatters::thanks(), Intent::Thanks))
    }

    fn help(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        HELP.matches(&state.lowered)
            .then(|| Resolution::new(formatters::help(&self.assistant_name), Intent::Help))
    }

    fn category_request(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        let Some(meta) = classify_meta(&state.lowered) else {
            return self.open_request(state);
        };
        let resolution = match meta {
            MetaRequest::Browse => {
                let text = match classify_category(&state.lowered) {
                    Some(category) => formatters::category_listing(&self.catalog, category),
                    None => formatters::catalog_browse(&self.catalog),
                };
                Resolution::new(text, meta.intent())
            }
            MetaRequest::Faq => {
                let topic = classify_faq(&state.lowered)?;
                let resolution = Resolution::new(
                    formatters::faq(topic, &self.support_handle),
                    meta.intent(),
                );
                match self.entities.resolve(state.text) {
                    Some(product) => {
                        state.record.set_last_product(product);
                        resolution.about(product)
                    }
                    None => resolution,
                }
            }
            MetaRequest::Cheapest => self.cheapest(state),
            MetaRequest::Compare => self.compare(state),
            MetaRequest::Bundle => {
                let category = self.requested_category(&state.lowered);
                let mut offers = self.catalog.bundles(category);
                if offers.is_empty() {
                    offers = self.catalog.bundles(None);
                }
                Resolution::new(formatters::bundles(&self.catalog, &offers), meta.intent())
            }
        };
        Some(resolution)
    }

    /// A use case or a bare category name, when no product is named.
    fn open_request(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        if self.entities.resolve(state.text).is_some() {
            return None;
        }
        if let Some(use_case) = classify_use_case(&state.lowered) {
            if let Some(text) = formatters::use_case_recommendation(&self.catalog, use_case) {
                return Some(Resolution::new(text, Intent::Recommendation));
            }
        }
        let category = classify_category(&state.lowered)?;
        Some(Resolution::new(
            formatters::category_listing(&self.catalog, category),
            Intent::CatalogBrowse,
        ))
    }

    fn entity_detection(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        let product = self.entities.resolve(state.text)?;
        state.record.set_last_product(product);

        let resolution = match classify_qualifier(&state.lowered, &Qualifier::PRODUCT) {
            Some(qualifier) => Resolution::new(self.qualified(qualifier, product), qualifier.intent()),
            None => Resolution::new(self.pitch(product), Intent::Unclassified),
        };
        Some(resolution.about(product))
    }

    fn emotion_override(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        let emotion = state.emotion?;
        let product = state
            .record
            .last_product()
            .and_then(|name| self.catalog.product(name));
        let resolution = Resolution::new(
            empathetic_response(emotion, product, &self.support_handle),
            Intent::Unclassified,
        );
        Some(match product {
            Some(p) => resolution.about(p),
            None => resolution,
        })
    }

    fn continuation(&self, state: &mut TurnState<'_>) -> Option<Resolution> {
        let name = state.record.last_product()?;
        let Some(product) = self.catalog.product(name) else {
            // Context that no longer resolves is dropped rather than quoted.
            state.clear();
            return None;
        };

        if let Some(qualifier) = classify_qualifier(&state.lowered, &Qualifier::ORDER) {
            let text = self.qualified(qualifier, product);
            return Some(Resolution::new(text, qualifier.intent()).about(product));
        }

        let vague = state.word_count <= self.dialog.vague_max_words;
        if vague && self.dialog.vague_followup == VagueFollowup::RepeatPitch {
            return Some(Resolution::new(self.pitch(product), Intent::Continuation).about(product));
        }

        state.clear();
        None
    }

    fn default_menu(&self, _state: &mut TurnState<'_>) -> Option<Resolution> {
        Some(Resolution::new(
            formatters::default_menu(&self.catalog),
            Intent::Unclassified,
        ))
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// A named category, else the category of the first product mentioned.
    fn requested_category(&self, lowered: &str) -> Option<Category> {
        Category::detect(lowered).or_else(|| {
            self.catalog
                .mentioned_products(lowered)
                .first()
                .map(|p| p.category)
        })
    }

    fn cheapest(&self, state: &mut TurnState<'_>) -> Resolution {
        let scoped = self
            .requested_category(&state.lowered)
            .and_then(|c| self.catalog.cheapest(Some(c), 1).first().map(|p| (c, *p)));

        match scoped {
            Some((category, product)) => {
                state.record.set_last_product(product);
                Resolution::new(formatters::cheapest_in(category, product), Intent::Cheapest)
                    .about(product)
            }
            None => Resolution::new(
                formatters::cheapest_overall(&self.catalog.cheapest(None, CHEAPEST_OVERALL_COUNT)),
                Intent::Cheapest,
            ),
        }
    }

    fn compare(&self, state: &mut TurnState<'_>) -> Resolution {
        let mentioned = self.catalog.mentioned_products(&state.lowered);
        let remembered = state
            .record
            .last_product()
            .and_then(|name| self.catalog.product(name));

        let pair = match (mentioned.as_slice(), remembered) {
            ([first, second, ..], _) => Some((*first, *second)),
            ([only], Some(last)) if only.name != last.name => Some((last, *only)),
            _ => None,
        };

        let text = match pair {
            Some((a, b)) => formatters::compare_pair(a, b),
            None => formatters::compare_prompt(),
        };
        Resolution::new(text, Intent::Compare)
    }

    fn qualified(&self, qualifier: Qualifier, product: &Product) -> String {
        match qualifier {
            Qualifier::Price => formatters::price_quote(product, &self.support_handle),
            Qualifier::Buy => formatters::purchase(product, &self.support_handle),
            Qualifier::Spec => formatters::spec_sheet(product),
            Qualifier::Compare => formatters::alternatives(&self.catalog, product),
            Qualifier::Affirmative => formatters::affirmative(product),
            Qualifier::Negative => formatters::negative(),
            Qualifier::Interest => self.pitch(product),
        }
    }

    /// A random pitch variant with persuasive copy appended.
    fn pitch(&self, product: &Product) -> String {
        let variants = self.catalog.lookup_responses(&product.name);
        match choose(self.random.as_ref(), variants) {
            Some(base) => self.enhancer.enhance(base, product.price),
            None => formatters::generic_pitch(product),
        }
    }
}

/// At most `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn resolver_with(config: KioskConfig) -> DialogResolver {
        let memory = Arc::new(ConversationMemory::new(
            config.memory.effective_history_limit(),
        ));
        DialogResolver::new(
            &config,
            Arc::new(Catalog::builtin()),
            memory,
            Arc::new(ScriptedRandom::fixed(0, false)),
        )
    }

    fn resolver() -> DialogResolver {
        resolver_with(KioskConfig::default())
    }

    fn last_product(resolver: &DialogResolver, user_id: UserId) -> Option<String> {
        resolver
            .memory()
            .get(user_id)
            .unwrap()
            .last_product()
            .map(str::to_string)
    }

    // ---- chain shape ----

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            strategy_order(),
            vec![
                StrategyKind::GreetingOverride,
                StrategyKind::Farewell,
                StrategyKind::Thanks,
                StrategyKind::Help,
                StrategyKind::CategoryRequest,
                StrategyKind::EntityDetection,
                StrategyKind::EmotionOverride,
                StrategyKind::Continuation,
                StrategyKind::Default,
            ]
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    // ---- steps 1-4 ----

    #[test]
    fn test_greeting_only_when_short() {
        let r = resolver();
        assert_eq!(
            r.resolve_turn(1, "hello there").unwrap().strategy,
            StrategyKind::GreetingOverride
        );
        let reply = r.resolve_turn(1, "hi, tell me about the drone").unwrap();
        assert_eq!(reply.strategy, StrategyKind::EntityDetection);
    }

    #[test]
    fn test_reset_command_clears() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the drone").unwrap();
        let reply = r.resolve_turn(1, "/reset").unwrap();
        assert_eq!(reply.strategy, StrategyKind::GreetingOverride);
        assert_eq!(reply.intent, Intent::Greeting);
        assert!(last_product(&r, 1).is_none());
    }

    #[test]
    fn test_farewell_clears_memory() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the drone").unwrap();
        let reply = r.resolve_turn(1, "ok bye now").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Farewell);
        assert!(reply.text.contains("Alex"));
        assert!(reply.context_cleared);
        let record = r.memory().get(1).unwrap();
        assert!(!record.has_context());
        assert_eq!(record.history_len(), 0);
    }

    #[test]
    fn test_context_cleared_flag() {
        let r = resolver();
        assert!(!r.resolve_turn(1, "tell me about the drone").unwrap().context_cleared);
        assert!(!r.resolve_turn(1, "thanks").unwrap().context_cleared);
        assert!(r.resolve_turn(1, "hi").unwrap().context_cleared);
        assert!(!r.resolve_turn(1, "   ").unwrap().context_cleared);
    }

    #[test]
    fn test_thanks_keeps_context() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the drone").unwrap();
        let reply = r.resolve_turn(1, "thanks a lot").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Thanks);
        assert_eq!(last_product(&r, 1).as_deref(), Some("Mini Drone X2"));
    }

    #[test]
    fn test_help() {
        let reply = resolver().resolve_turn(1, "what can you do").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Help);
        assert_eq!(reply.intent, Intent::Help);
    }

    // ---- step 5 ----

    #[test]
    fn test_cheapest_with_category_sets_context() {
        let r = resolver();
        let reply = r.resolve_turn(1, "what's the cheapest audio thing").unwrap();
        assert_eq!(reply.strategy, StrategyKind::CategoryRequest);
        assert_eq!(reply.intent, Intent::Cheapest);
        assert_eq!(reply.product_context.as_deref(), Some("Bluetooth Speaker Mini"));
        assert_eq!(last_product(&r, 1).as_deref(), Some("Bluetooth Speaker Mini"));
    }

    #[test]
    fn test_cheapest_category_from_product_mention() {
        let reply = resolver().resolve_turn(1, "cheapest headphones").unwrap();
        assert_eq!(reply.product_context.as_deref(), Some("Bluetooth Speaker Mini"));
    }

    #[test]
    fn test_cheapest_overall() {
        let r = resolver();
        let reply = r.resolve_turn(1, "show me something cheap").unwrap();
        assert!(reply.product_context.is_none());
        assert!(reply.text.contains("1. Bluetooth Speaker Mini $29"));
        assert!(last_product(&r, 1).is_none());
    }

    #[test]
    fn test_compare_two_products() {
        let reply = resolver()
            .resolve_turn(1, "compare earbuds vs headphones")
            .unwrap();
        assert_eq!(reply.strategy, StrategyKind::CategoryRequest);
        assert_eq!(reply.intent, Intent::Compare);
        assert!(reply.text.contains("Wireless Earbuds Pro"));
        assert!(reply.text.contains("Noise-Cancelling Headphones"));
    }

    #[test]
    fn test_compare_with_remembered_product() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the smartwatch").unwrap();
        let reply = r.resolve_turn(1, "compare it with the fitness band pro").unwrap();
        assert!(reply.text.contains("Smartwatch X $59"));
        assert!(reply.text.contains("Fitness Band Pro $120"));
    }

    #[test]
    fn test_compare_prompt_without_products() {
        let reply = resolver().resolve_turn(1, "can you compare stuff").unwrap();
        assert!(reply.text.contains("Popular matchups"));
    }

    #[test]
    fn test_bundles_for_category() {
        let reply = resolver().resolve_turn(1, "any audio bundles?").unwrap();
        assert_eq!(reply.intent, Intent::Bundle);
        assert!(reply.text.contains("Audio Trio"));
        assert!(!reply.text.contains("Workspace Kit"));
    }

    #[test]
    fn test_category_browse_by_name() {
        let reply = resolver().resolve_turn(1, "show me audio products").unwrap();
        assert_eq!(reply.strategy, StrategyKind::CategoryRequest);
        assert_eq!(reply.intent, Intent::CatalogBrowse);
        assert!(reply.text.starts_with("Audio (3 items"));
        assert!(reply.text.contains("Noise-Cancelling Headphones $180"));
        assert!(reply.text.contains("Audio Trio"));

        let reply = resolver().resolve_turn(1, "wearables").unwrap();
        assert_eq!(reply.intent, Intent::CatalogBrowse);
        assert!(reply.text.contains("Fitness Band Pro $120"));
        assert!(!reply.text.contains("Audio Trio"));
    }

    #[test]
    fn test_list_request_scoped_to_category() {
        let reply = resolver().resolve_turn(1, "give me a list of speakers").unwrap();
        assert_eq!(reply.strategy, StrategyKind::CategoryRequest);
        assert_eq!(reply.intent, Intent::CatalogBrowse);
        assert!(reply.text.starts_with("Audio (3 items"));
        assert!(reply.product_context.is_none());
    }

    #[test]
    fn test_browse_with_product_mention_lists_everything() {
        let reply = resolver()
            .resolve_turn(1, "show me all products like the smartwatch")
            .unwrap();
        assert_eq!(reply.intent, Intent::CatalogBrowse);
        assert!(reply.text.contains("Smartwatch X"));
        assert!(reply.text.contains("Mini Drone X2"));
    }

    #[test]
    fn test_store_policy_questions() {
        let r = resolver();
        let reply = r.resolve_turn(1, "what's your shipping policy").unwrap();
        assert_eq!(reply.strategy, StrategyKind::CategoryRequest);
        assert_eq!(reply.intent, Intent::Faq);
        assert!(reply.text.contains("Free shipping on orders over $100"));

        let reply = r.resolve_turn(1, "do you have a warranty").unwrap();
        assert_eq!(reply.intent, Intent::Faq);
        assert!(reply.text.contains("1-year warranty"));
        assert!(reply.product_context.is_none());
    }

    #[test]
    fn test_policy_question_about_product_keeps_it() {
        let r = resolver();
        let reply = r.resolve_turn(1, "can I return the drone").unwrap();
        assert_eq!(reply.intent, Intent::Faq);
        assert_eq!(reply.product_context.as_deref(), Some("Mini Drone X2"));
        assert_eq!(last_product(&r, 1).as_deref(), Some("Mini Drone X2"));
    }

    #[test]
    fn test_use_case_recommendation() {
        let r = resolver();
        let reply = r
            .resolve_turn(1, "I need gear for my fitness workouts")
            .unwrap();
        assert_eq!(reply.strategy, StrategyKind::CategoryRequest);
        assert_eq!(reply.intent, Intent::Recommendation);
        assert!(reply.text.contains("Fitness Tracker Band $35"));
        assert!(reply.text.contains("Fitness Duo"));
        assert!(last_product(&r, 1).is_none());
    }

    #[test]
    fn test_use_case_with_product_goes_to_entity() {
        let reply = resolver()
            .resolve_turn(1, "is the smartwatch good for the gym")
            .unwrap();
        assert_eq!(reply.strategy, StrategyKind::EntityDetection);
        assert_eq!(reply.product_context.as_deref(), Some("Smartwatch X"));
    }

    // ---- step 6 ----

    #[test]
    fn test_entity_with_price_qualifier() {
        let r = resolver();
        let reply = r.resolve_turn(1, "how much is the drone").unwrap();
        assert_eq!(reply.strategy, StrategyKind::EntityDetection);
        assert_eq!(reply.intent, Intent::PriceInquiry);
        assert!(reply.text.contains("The Mini Drone X2 costs $250."));
    }

    #[test]
    fn test_entity_with_buy_qualifier() {
        let reply = resolver().resolve_turn(1, "I want to buy the vr headset").unwrap();
        assert_eq!(reply.intent, Intent::BuyIntent);
        assert!(reply.text.contains("@Store_help_bot"));
    }

    #[test]
    fn test_entity_ignores_conversational_qualifiers() {
        let reply = resolver().resolve_turn(1, "yes the thermostat").unwrap();
        assert_eq!(reply.intent, Intent::Unclassified);
        assert_eq!(reply.product_context.as_deref(), Some("Smart Thermostat"));
    }

    // ---- steps 7-9 ----

    #[test]
    fn test_emotion_without_context() {
        let reply = resolver().resolve_turn(1, "I need this asap").unwrap();
        assert_eq!(reply.strategy, StrategyKind::EmotionOverride);
        assert_eq!(reply.emotion, Some(Emotion::Urgency));
        assert!(reply.product_context.is_none());
    }

    #[test]
    fn test_continuation_qualifiers() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the projector").unwrap();
        let reply = r.resolve_turn(1, "what are the specs").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Continuation);
        assert_eq!(reply.intent, Intent::SpecInquiry);
        assert!(reply.text.contains("Portable Projector Pro specs"));

        let reply = r.resolve_turn(1, "yes").unwrap();
        assert_eq!(reply.intent, Intent::Affirmative);
        let reply = r.resolve_turn(1, "anything better?").unwrap();
        assert_eq!(reply.intent, Intent::Compare);
        assert!(reply.text.contains("VR Headset Max"));
    }

    #[test]
    fn test_other_options_follow_remembered_product() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the drone").unwrap();
        let reply = r.resolve_turn(1, "any other options").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Continuation);
        assert_eq!(reply.intent, Intent::Compare);
        assert_eq!(reply.product_context.as_deref(), Some("Mini Drone X2"));
    }

    #[test]
    fn test_vague_followup_falls_through_and_clears() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the projector").unwrap();
        let reply = r.resolve_turn(1, "whatever dude").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Default);
        assert!(last_product(&r, 1).is_none());
    }

    #[test]
    fn test_vague_followup_repeat_pitch_option() {
        let mut config = KioskConfig::default();
        config.dialog.vague_followup = VagueFollowup::RepeatPitch;
        let r = resolver_with(config);
        r.resolve_turn(1, "tell me about the projector").unwrap();
        let reply = r.resolve_turn(1, "whatever dude").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Continuation);
        assert_eq!(reply.intent, Intent::Continuation);
        assert!(reply
            .text
            .starts_with(&r.catalog().lookup_responses("Portable Projector Pro")[0]));
        assert_eq!(last_product(&r, 1).as_deref(), Some("Portable Projector Pro"));
    }

    #[test]
    fn test_long_unmatched_followup_clears() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the projector").unwrap();
        let reply = r.resolve_turn(1, "what is the weather like over there").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Default);
        assert!(last_product(&r, 1).is_none());
    }

    #[test]
    fn test_empty_input_is_default_and_untouched() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the drone").unwrap();
        let reply = r.resolve_turn(1, "   ").unwrap();
        assert_eq!(reply.strategy, StrategyKind::Default);
        let record = r.memory().get(1).unwrap();
        assert_eq!(record.last_product(), Some("Mini Drone X2"));
        assert_eq!(record.history_len(), 1);
    }

    #[test]
    fn test_history_appended_per_turn() {
        let r = resolver();
        r.resolve_turn(1, "tell me about the drone").unwrap();
        r.resolve_turn(1, "how much").unwrap();
        r.resolve_turn(1, "thanks").unwrap();
        let record = r.memory().get(1).unwrap();
        let intents: Vec<Intent> = record.history().map(|t| t.intent).collect();
        assert_eq!(
            intents,
            vec![Intent::Unclassified, Intent::PriceInquiry, Intent::Thanks]
        );
        assert_eq!(
            record.history().next().unwrap().product.as_deref(),
            Some("Mini Drone X2")
        );
    }

    #[test]
    fn test_long_message_truncated() {
        let mut config = KioskConfig::default();
        config.dialog.max_message_chars = 10;
        let r = resolver_with(config);
        // The product name lies past the cut-off.
        let reply = r
            .resolve_turn(1, "please could you tell me about the drone")
            .unwrap();
        assert_eq!(reply.strategy, StrategyKind::Default);
        let record = r.memory().get(1).unwrap();
        assert_eq!(record.history().next().unwrap().user_text, "please cou");
    }
}
