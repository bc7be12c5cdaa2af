//! Rule-based dialogue engine for the Kiosk shop assistant.
//!
//! Resolves free-text shopper messages against a fixed product catalog
//! and a short per-user conversation memory.

pub mod emotion;
pub mod enhancer;
pub mod entity;
pub mod error;
pub mod formatters;
pub mod keywords;
pub mod memory;
pub mod random;
pub mod resolver;

pub use emotion::EmotionClassifier;
pub use enhancer::{PriceTier, ResponseEnhancer};
pub use entity::EntityResolver;
pub use error::ChatError;
pub use keywords::{KeywordSet, MetaRequest, Qualifier};
pub use memory::{ConversationMemory, ConversationRecord};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use resolver::{strategy_order, DialogResolver, Strategy, STRATEGY_CHAIN};
