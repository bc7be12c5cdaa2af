//! Persuasive copy appended to product replies.
//!
//! Purely cosmetic: nothing here reads or writes conversation memory, and
//! the chosen lines never feed back into classification.

use std::sync::Arc;

use kiosk_core::config::EnhancerConfig;

use crate::random::{choose, RandomSource};

/// Price band used to pick copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    /// Above the premium threshold.
    Premium,
    /// Above the mid threshold, up to premium.
    Mid,
    /// At or below the mid threshold.
    Light,
}

const PREMIUM_URGENCY: &[&str] = &[
    "🔥 Limited stock: only a few units left at this price!",
    "⚡ High demand on this one, don't wait too long!",
    "🎯 Premium pick. These rarely stay on the shelf.",
];

const MID_URGENCY: &[&str] = &[
    "🔥 Popular choice, stock is moving fast!",
    "⏰ Trending right now, grab it while it's available.",
    "💫 In demand. Order soon to secure yours.",
];

const LIGHT_URGENCY: &str = "🔥 Popular choice, stock is moving fast!";

const BUDGET_PROOF: &[&str] = &[
    "⭐ Rated 4.8/5 by more than 2,000 customers.",
    "🔥 Bestseller: over 5,000 sold this month.",
    "💯 95% of buyers would recommend it to a friend.",
];

const MID_PROOF: &[&str] = &[
    "⭐ Customer favourite, rated 4.7/5.",
    "🏆 Top rated in its category.",
    "💬 \"Best purchase I've made this year.\"",
];

const PREMIUM_PROOF: &[&str] = &[
    "💎 The professionals' choice.",
    "🏅 Award-winning design and performance.",
    "⭐ Featured in the big tech reviews.",
];

/// Appends urgency and social-proof lines chosen by price tier.
pub struct ResponseEnhancer {
    config: EnhancerConfig,
    random: Arc<dyn RandomSource>,
}

impl ResponseEnhancer {
    pub fn new(config: EnhancerConfig, random: Arc<dyn RandomSource>) -> Self {
        Self { config, random }
    }

    pub fn tier(&self, price: u32) -> PriceTier {
        if price > self.config.premium_threshold {
            PriceTier::Premium
        } else if price > self.config.mid_threshold {
            PriceTier::Mid
        } else {
            PriceTier::Light
        }
    }

    /// `response` followed by an optional social-proof line and the tier's
    /// urgency line (which budget items only get some of the time).
    pub fn enhance(&self, response: &str, price: u32) -> String {
        let mut enhanced = response.to_string();
        if !self.config.enabled {
            return enhanced;
        }

        if self.random.chance(self.config.social_proof_probability) {
            if let Some(line) = choose(self.random.as_ref(), social_proof_lines(price)) {
                enhanced.push_str("\n\n");
                enhanced.push_str(line);
            }
        }

        if let Some(line) = self.urgency_line(price) {
            enhanced.push_str("\n\n");
            enhanced.push_str(line);
        }
        enhanced
    }

    fn urgency_line(&self, price: u32) -> Option<&'static str> {
        match self.tier(price) {
            PriceTier::Premium => choose(self.random.as_ref(), PREMIUM_URGENCY).copied(),
            PriceTier::Mid => choose(self.random.as_ref(), MID_URGENCY).copied(),
            PriceTier::Light => self
                .random
                .chance(self.config.light_tier_probability)
                .then_some(LIGHT_URGENCY),
        }
    }
}

// Fixed tiers for quoted copy. These follow the store's price bands rather
// than the configurable enhancer thresholds.

fn social_proof_lines(price: u32) -> &'static [&'static str] {
    if price < 50 {
        BUDGET_PROOF
    } else if price < 200 {
        MID_PROOF
    } else {
        PREMIUM_PROOF
    }
}

/// Scarcity line shown with a price quote.
pub fn scarcity_line(price: u32) -> &'static str {
    if price > 300 {
        "🔥 Limited availability at this price. Premium items like this sell out quickly."
    } else if price > 100 {
        "💰 Best value in its category and a favourite with smart shoppers."
    } else {
        "⭐ Unbeatable price, with thousands of happy customers."
    }
}

/// Value statement shown under a spec sheet.
pub fn value_proposition(price: u32) -> &'static str {
    if price > 400 {
        "✨ A premium investment: lasting quality plus warranty protection."
    } else if price > 150 {
        "💰 A smart purchase: great quality at a fair price."
    } else {
        "🎁 Affordable excellence that won't break the bank."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn enhancer(pick: usize, chance: bool) -> ResponseEnhancer {
        ResponseEnhancer::new(
            EnhancerConfig::default(),
            Arc::new(ScriptedRandom::fixed(pick, chance)),
        )
    }

    #[test]
    fn test_tier_boundaries() {
        let e = enhancer(0, true);
        assert_eq!(e.tier(401), PriceTier::Premium);
        assert_eq!(e.tier(400), PriceTier::Mid);
        assert_eq!(e.tier(151), PriceTier::Mid);
        assert_eq!(e.tier(150), PriceTier::Light);
        assert_eq!(e.tier(1), PriceTier::Light);
    }

    #[test]
    fn test_premium_always_gets_urgency() {
        let text = enhancer(1, false).enhance("Base.", 850);
        assert_eq!(text, format!("Base.\n\n{}", PREMIUM_URGENCY[1]));
    }

    #[test]
    fn test_mid_tier_with_social_proof() {
        let text = enhancer(0, true).enhance("Base.", 210);
        assert_eq!(
            text,
            format!("Base.\n\n{}\n\n{}", PREMIUM_PROOF[0], MID_URGENCY[0])
        );
    }

    #[test]
    fn test_light_tier_is_probabilistic() {
        assert_eq!(enhancer(0, false).enhance("Base.", 29), "Base.");
        let text = enhancer(2, true).enhance("Base.", 29);
        assert_eq!(
            text,
            format!("Base.\n\n{}\n\n{}", BUDGET_PROOF[2], LIGHT_URGENCY)
        );
    }

    #[test]
    fn test_disabled_returns_input() {
        let config = EnhancerConfig {
            enabled: false,
            ..EnhancerConfig::default()
        };
        let e = ResponseEnhancer::new(config, Arc::new(ScriptedRandom::fixed(0, true)));
        assert_eq!(e.enhance("Base.", 999), "Base.");
    }

    #[test]
    fn test_custom_thresholds() {
        let config = EnhancerConfig {
            premium_threshold: 100,
            mid_threshold: 50,
            ..EnhancerConfig::default()
        };
        let e = ResponseEnhancer::new(config, Arc::new(ScriptedRandom::fixed(0, false)));
        assert_eq!(e.tier(120), PriceTier::Premium);
        assert_eq!(e.tier(60), PriceTier::Mid);
    }

    #[test]
    fn test_enhance_preserves_base_prefix() {
        let text = enhancer(0, true).enhance("The drone flies.", 250);
        assert!(text.starts_with("The drone flies."));
    }

    #[test]
    fn test_scarcity_and_value_tiers() {
        assert!(scarcity_line(450).contains("Limited availability"));
        assert!(scarcity_line(180).contains("Best value"));
        assert!(scarcity_line(59).contains("Unbeatable"));
        assert!(value_proposition(480).contains("premium investment"));
        assert!(value_proposition(220).contains("smart purchase"));
        assert!(value_proposition(99).contains("Affordable"));
    }
}
