//! Read-only product catalog.
//!
//! Lookups are exact and case-sensitive on the canonical product name. The
//! keyword alias table is kept in declaration order (product order, then
//! alias order within a product) because entity resolution breaks
//! equal-length ties by that order.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog_data;
use crate::config::{expand_home, CatalogConfig};
use crate::error::{KioskError, Result};

// =============================================================================
// Category
// =============================================================================

/// Product category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SmartHome,
    Audio,
    Wearables,
    Power,
    Productivity,
    Entertainment,
}

impl Category {
    /// Order in which category words are checked in free text.
    pub const ALL: [Category; 6] = [
        Category::Audio,
        Category::SmartHome,
        Category::Wearables,
        Category::Power,
        Category::Productivity,
        Category::Entertainment,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::SmartHome => "Smart Home",
            Category::Audio => "Audio",
            Category::Wearables => "Wearables",
            Category::Power => "Power & Charging",
            Category::Productivity => "Productivity",
            Category::Entertainment => "Cameras & Entertainment",
        }
    }

    /// Words that name the category in a shopper's message.
    pub fn trigger_words(&self) -> &'static [&'static str] {
        match self {
            Category::SmartHome => &["smart home", "home"],
            Category::Audio => &["audio"],
            Category::Wearables => &["wearable", "fitness", "tracker"],
            Category::Power => &["power", "charging", "charger"],
            Category::Productivity => &["productivity", "work", "office"],
            Category::Entertainment => &["entertainment", "camera", "vr", "drone", "projector"],
        }
    }

    /// First category whose trigger word occurs in `lowered`.
    pub fn detect(lowered: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.trigger_words().iter().any(|w| lowered.contains(w)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Product / Bundle
// =============================================================================

/// A purchasable product. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: u32,
    pub category: Category,
    pub spec: String,
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A precomputed multi-product offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
    pub products: Vec<String>,
    pub price: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
    #[serde(default)]
    bundles: Vec<Bundle>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Static registry of products, aliases and bundle offers.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_name: HashMap<String, usize>,
    /// Lower-cased alias and the index of the product it maps to.
    aliases: Vec<(String, usize)>,
    bundles: Vec<Bundle>,
}

impl Catalog {
    /// The store's built-in product table.
    pub fn builtin() -> Self {
        let (products, bundles) = catalog_data::builtin();
        // The built-in table is covered by tests; a failure here is a code bug.
        Self::new(products, bundles).expect("built-in catalog must validate")
    }

    /// Build and validate a catalog.
    pub fn new(products: Vec<Product>, bundles: Vec<Bundle>) -> Result<Self> {
        if products.is_empty() {
            return Err(KioskError::Catalog("catalog has no products".to_string()));
        }

        let mut by_name = HashMap::with_capacity(products.len());
        let mut aliases = Vec::new();
        let mut seen_aliases: HashMap<String, String> = HashMap::new();

        for (idx, product) in products.iter().enumerate() {
            if product.name.trim().is_empty() {
                return Err(KioskError::Catalog(format!("product #{} has no name", idx)));
            }
            if product.price == 0 {
                return Err(KioskError::Catalog(format!(
                    "product '{}' must have a positive price",
                    product.name
                )));
            }
            if by_name.insert(product.name.clone(), idx).is_some() {
                return Err(KioskError::Catalog(format!(
                    "duplicate product name '{}'",
                    product.name
                )));
            }
            for alias in &product.aliases {
                let lowered = alias.trim().to_lowercase();
                if lowered.is_empty() {
                    continue;
                }
                if let Some(owner) = seen_aliases.get(&lowered) {
                    if owner != &product.name {
                        return Err(KioskError::Catalog(format!(
                            "alias '{}' maps to both '{}' and '{}'",
                            lowered, owner, product.name
                        )));
                    }
                    continue;
                }
                seen_aliases.insert(lowered.clone(), product.name.clone());
                aliases.push((lowered, idx));
            }
        }

        for bundle in &bundles {
            if bundle.products.len() < 2 {
                return Err(KioskError::Catalog(format!(
                    "bundle '{}' needs at least two products",
                    bundle.name
                )));
            }
            if bundle.price == 0 {
                return Err(KioskError::Catalog(format!(
                    "bundle '{}' must have a positive price",
                    bundle.name
                )));
            }
            if let Some(missing) = bundle.products.iter().find(|p| !by_name.contains_key(*p)) {
                return Err(KioskError::Catalog(format!(
                    "bundle '{}' references unknown product '{}'",
                    bundle.name, missing
                )));
            }
        }

        Ok(Self {
            products,
            by_name,
            aliases,
            bundles,
        })
    }

    /// Parse a catalog from TOML (`[[products]]` and optional `[[bundles]]`).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| KioskError::Catalog(e.to_string()))?;
        Self::new(file.products, file.bundles)
    }

    /// Read and parse a catalog file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        info!(
            products = catalog.len(),
            bundles = catalog.bundles.len(),
            "Catalog loaded from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Load the configured catalog, or the built-in one when no path is set.
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::from_toml_file(&expand_home(path)),
            None => Ok(Self::builtin()),
        }
    }

    // -----------------------------------------------------------------
    // Exact-key lookups
    // -----------------------------------------------------------------

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.by_name.get(name).map(|&idx| &self.products[idx])
    }

    pub fn lookup_price(&self, name: &str) -> Option<u32> {
        self.product(name).map(|p| p.price)
    }

    pub fn lookup_category(&self, name: &str) -> Option<Category> {
        self.product(name).map(|p| p.category)
    }

    pub fn lookup_spec(&self, name: &str) -> Option<&str> {
        self.product(name).map(|p| p.spec.as_str())
    }

    /// Response variants for a product; empty when the name is unknown.
    pub fn lookup_responses(&self, name: &str) -> &[String] {
        self.product(name)
            .map(|p| p.responses.as_slice())
            .unwrap_or(&[])
    }

    pub fn all_names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }

    // -----------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Alias table in declaration order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.aliases
            .iter()
            .map(|(alias, idx)| (alias.as_str(), &self.products[*idx]))
    }

    /// Products of a category, cheapest first.
    pub fn products_in(&self, category: Category) -> Vec<&Product> {
        let mut found: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.category == category)
            .collect();
        found.sort_by_key(|p| p.price);
        found
    }

    /// Categories that have at least one product, in display order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.products.iter().any(|p| p.category == *c))
            .collect()
    }

    /// The `n` cheapest products, optionally within one category.
    pub fn cheapest(&self, category: Option<Category>, n: usize) -> Vec<&Product> {
        let mut found: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect();
        found.sort_by_key(|p| p.price);
        found.truncate(n);
        found
    }

    /// Bundle offers, optionally only those tagged with `category`.
    pub fn bundles(&self, category: Option<Category>) -> Vec<&Bundle> {
        self.bundles
            .iter()
            .filter(|b| category.is_none() || b.category == category)
            .collect()
    }

    /// Bundle by exact name.
    pub fn bundle(&self, name: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.name == name)
    }

    /// Sum of the member prices of a bundle.
    pub fn regular_price(&self, bundle: &Bundle) -> u32 {
        bundle
            .products
            .iter()
            .filter_map(|name| self.lookup_price(name))
            .sum()
    }

    /// Every distinct product named in `text`, longest alias first.
    ///
    /// Once an alias is matched its span is masked, so "fitness band pro"
    /// does not also report the product behind "fitness band".
    pub fn mentioned_products(&self, text: &str) -> Vec<&Product> {
        let mut masked = text.to_lowercase();
        let mut ordered: Vec<&(String, usize)> = self.aliases.iter().collect();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut found: Vec<&Product> = Vec::new();
        for (alias, idx) in ordered {
            if !masked.contains(alias.as_str()) {
                continue;
            }
            masked = masked.replace(alias.as_str(), &" ".repeat(alias.len()));
            let product = &self.products[*idx];
            if !found.iter().any(|p| p.name == product.name) {
                found.push(product);
            }
        }
        found
    }
}
