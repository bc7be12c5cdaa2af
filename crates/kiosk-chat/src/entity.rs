//! Product mention detection.

use std::sync::Arc;

use kiosk_core::{Catalog, Product};

/// Phrases that mark a category-level request. Text containing any of them
/// never resolves to a single product.
pub const EXCLUSIONS: &[&str] = &[
    "bundle",
    "category",
    "categories",
    "all products",
    "catalog",
    "cheapest",
    "cheap",
    "affordable",
    "budget",
    "least expensive",
    "lowest price",
];

/// Maps free text to at most one catalog product.
///
/// Aliases are matched as plain substrings of the lower-cased text. The
/// longest matching alias wins; equal lengths go to the earlier table entry.
#[derive(Debug, Clone)]
pub struct EntityResolver {
    catalog: Arc<Catalog>,
}

impl EntityResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, text: &str) -> Option<&Product> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() || is_excluded(&normalized) {
            return None;
        }

        let mut best: Option<(&str, &Product)> = None;
        for (alias, product) in self.catalog.aliases() {
            if !normalized.contains(alias) {
                continue;
            }
            // Strictly longer replaces; ties keep the earlier entry.
            if best.map_or(true, |(current, _)| alias.len() > current.len()) {
                best = Some((alias, product));
            }
        }
        best.map(|(_, product)| product)
    }
}

fn is_excluded(normalized: &str) -> bool {
    EXCLUSIONS.iter().any(|phrase| normalized.contains(phrase))
}
