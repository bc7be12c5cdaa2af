//! Domain types shared across Kiosk crates.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{KioskError, Result};

/// Opaque, stable identifier of a shopper (e.g. a messenger chat id).
pub type UserId = i64;

// =============================================================================
// Classification results
// =============================================================================

/// Purpose of a single user turn. Derived per turn, never persisted as state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    Thanks,
    Help,
    PriceInquiry,
    BuyIntent,
    SpecInquiry,
    Compare,
    Bundle,
    Cheapest,
    CatalogBrowse,
    /// Shipping, returns or warranty question.
    Faq,
    /// Products and bundles suggested for a use case such as travel.
    Recommendation,
    Affirmative,
    Negative,
    Continuation,
    Unclassified,
}

impl Intent {
    pub const ALL: [Intent; 17] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::Thanks,
        Intent::Help,
        Intent::PriceInquiry,
        Intent::BuyIntent,
        Intent::SpecInquiry,
        Intent::Compare,
        Intent::Bundle,
        Intent::Cheapest,
        Intent::CatalogBrowse,
        Intent::Faq,
        Intent::Recommendation,
        Intent::Affirmative,
        Intent::Negative,
        Intent::Continuation,
        Intent::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::Thanks => "thanks",
            Intent::Help => "help",
            Intent::PriceInquiry => "price_inquiry",
            Intent::BuyIntent => "buy_intent",
            Intent::SpecInquiry => "spec_inquiry",
            Intent::Compare => "compare",
            Intent::Bundle => "bundle",
            Intent::Cheapest => "cheapest",
            Intent::CatalogBrowse => "catalog_browse",
            Intent::Faq => "faq",
            Intent::Recommendation => "recommendation",
            Intent::Affirmative => "affirmative",
            Intent::Negative => "negative",
            Intent::Continuation => "continuation",
            Intent::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = KioskError;

    fn from_str(s: &str) -> Result<Self> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| KioskError::Serialization(format!("unknown intent: {}", s)))
    }
}

/// Emotional signal detected in a turn. At most one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Frustration,
    Urgency,
    Hesitation,
    BudgetConcern,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Frustration => "frustration",
            Emotion::Urgency => "urgency",
            Emotion::Hesitation => "hesitation",
            Emotion::BudgetConcern => "budget_concern",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule of the resolution chain that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    GreetingOverride,
    Farewell,
    Thanks,
    Help,
    CategoryRequest,
    EntityDetection,
    EmotionOverride,
    Continuation,
    Default,
}

// =============================================================================
// Conversation data
// =============================================================================

/// One resolved exchange kept in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub user_text: String,
    pub reply: String,
    pub intent: Intent,
    /// Canonical name of the product the turn was about, if any.
    pub product: Option<String>,
    /// Epoch seconds.
    pub timestamp: i64,
}

impl Turn {
    pub fn new(user_text: &str, reply: &str, intent: Intent, product: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_text: user_text.to_string(),
            reply: reply.to_string(),
            intent,
            product: product.map(str::to_string),
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Engine output for one turn.
///
/// `text` and `product_context` are the transport-facing contract; the
/// remaining fields are diagnostics callers may log or ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub product_context: Option<String>,
    pub intent: Intent,
    pub emotion: Option<Emotion>,
    pub strategy: StrategyKind,
    /// The turn wiped the user's record (greeting, farewell, or a
    /// follow-up that dropped stale context).
    pub context_cleared: bool,
}

/// Prior turns supplied by an external store when a user's record is first
/// created. Returned oldest first, and never reaching back past a turn that
/// cleared the conversation.
pub trait HistorySource: Send + Sync {
    fn load_recent(&self, user_id: UserId, limit: usize) -> Result<Vec<Turn>>;
}
