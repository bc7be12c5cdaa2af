//! Reply text for fixed messages, catalog listings and product qualifiers.
//!
//! Everything here is a pure function of its arguments. Random copy and
//! memory updates happen in the resolver.

use std::fmt::Write;

use kiosk_core::{Bundle, Catalog, Category, Product};

use crate::enhancer::{scarcity_line, value_proposition};
use crate::keywords::{FaqTopic, UseCase};

const COMPARE_SUGGESTIONS: &[(&str, &str)] = &[
    ("Wireless Earbuds Pro", "Noise-Cancelling Headphones"),
    ("Smartwatch X", "Fitness Band Pro"),
    ("Smart Security Camera", "Smart Doorbell Cam"),
    ("Power Bank 20000mAh", "Portable Solar Charger"),
];

// =============================================================================
// Fixed messages
// =============================================================================

pub fn greeting(assistant_name: &str, catalog: &Catalog) -> String {
    format!(
        "Hey there! 👋 I'm {}, your personal tech shopper.\n\n\
         Here's what we carry:\n{}\n\
         Tell me what you're looking for, or ask for the cheapest option in any category!",
        assistant_name,
        category_lines(catalog)
    )
}

pub fn farewell(assistant_name: &str) -> String {
    format!(
        "Goodbye! 👋 Great chatting with you. I'm {}, and I'm here whenever you need the perfect gadget.",
        assistant_name
    )
}

pub fn thanks() -> String {
    "You're very welcome! 😊 Happy to help anytime.".to_string()
}

pub fn help(assistant_name: &str) -> String {
    format!(
        "I'm {}, and here's how I can help:\n\n\
         • 📱 Product details, specs and prices\n\
         • 💰 The cheapest picks in any category\n\
         • 🎁 Bundle deals that save you money\n\
         • 🔍 Side-by-side comparisons\n\
         • 🛒 Guidance through your purchase\n\n\
         Try: \"tell me about the 4K camera\", \"cheapest audio\", \
         \"compare earbuds and headphones\" or \"show me bundles\".",
        assistant_name
    )
}

/// Shown when nothing else applies.
pub fn default_menu(catalog: &Catalog) -> String {
    format!(
        "I'd love to help you find something! Here are our categories:\n{}\n\
         Name a product, or say \"all products\", \"cheapest\" or \"bundles\".",
        category_lines(catalog)
    )
}

/// Used when a product has no pitch variants.
pub fn generic_pitch(product: &Product) -> String {
    format!("I can tell you more about the {} if you'd like! 😊", product.name)
}

fn category_lines(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let _ = writeln!(out, "• {}", category.display_name());
    }
    out
}

// =============================================================================
// Catalog listings
// =============================================================================

/// All products grouped by category, with each category's price range.
pub fn catalog_browse(catalog: &Catalog) -> String {
    let mut out = String::from("🛍️ Here's everything we carry:\n");
    for category in catalog.categories() {
        let products = catalog.products_in(category);
        let (Some(low), Some(high)) = (products.first(), products.last()) else {
            continue;
        };
        let _ = write!(out, "\n{} (${}-${})\n", category.display_name(), low.price, high.price);
        for p in &products {
            let _ = writeln!(out, "• {} ${}", p.name, p.price);
        }
    }
    out.push_str("\nWhich one catches your eye?");
    out
}

/// The cheapest product of one category.
pub fn cheapest_in(category: Category, product: &Product) -> String {
    format!(
        "💰 The most affordable pick in {} is the {} at just ${}.\n\n{}\n\nWant the specs or ready to order?",
        category.display_name(),
        product.name,
        product.price,
        product.spec
    )
}

/// The cheapest products across the whole catalog.
pub fn cheapest_overall(products: &[&Product]) -> String {
    let mut out = String::from("💰 Our most affordable products:\n\n");
    for (i, p) in products.iter().enumerate() {
        let _ = writeln!(out, "{}. {} ${}", i + 1, p.name, p.price);
    }
    out.push_str("\nAsk for \"cheapest audio\" or any other category to narrow it down.");
    out
}

/// Side-by-side comparison of two products.
pub fn compare_pair(first: &Product, second: &Product) -> String {
    let (cheaper, pricier) = if first.price <= second.price {
        (first, second)
    } else {
        (second, first)
    };
    let mut out = String::from("🔍 Side by side:\n\n");
    for p in [first, second] {
        let _ = write!(out, "{} ${}\n{}\n\n", p.name, p.price, p.spec);
    }
    if cheaper.price == pricier.price {
        let _ = write!(out, "Both cost the same, so it comes down to features.");
    } else {
        let _ = write!(
            out,
            "The {} is ${} cheaper. Pick the {} if those extra features matter to you.",
            cheaper.name,
            pricier.price - cheaper.price,
            pricier.name
        );
    }
    out
}

/// Shown when a comparison was asked for but fewer than two products are known.
pub fn compare_prompt() -> String {
    let mut out = String::from("I can compare any two products! Popular matchups:\n\n");
    for (a, b) in COMPARE_SUGGESTIONS {
        let _ = writeln!(out, "• {} vs {}", a, b);
    }
    out.push_str("\nWhich two should I put side by side? 🤔");
    out
}

/// Bundle offers with their savings.
pub fn bundles(catalog: &Catalog, offers: &[&Bundle]) -> String {
    if offers.is_empty() {
        return "We don't have bundle deals running right now, but I can point you to the best single picks!"
            .to_string();
    }
    let mut out = String::from("🎁 Bundle deals:\n");
    for bundle in offers {
        write_bundle(&mut out, catalog, bundle);
    }
    out.push_str("\nInterested in one of these?");
    out
}

fn write_bundle(out: &mut String, catalog: &Catalog, bundle: &Bundle) {
    let regular = catalog.regular_price(bundle);
    let _ = write!(out, "\n{} ${}", bundle.name, bundle.price);
    if regular > bundle.price {
        let _ = write!(out, " (save ${})", regular - bundle.price);
    }
    out.push('\n');
    for name in &bundle.products {
        let _ = writeln!(out, "  • {}", name);
    }
}

/// Every product of one category with its spec line, then its bundles.
pub fn category_listing(catalog: &Catalog, category: Category) -> String {
    let products = catalog.products_in(category);
    let (Some(low), Some(high)) = (products.first(), products.last()) else {
        return format!(
            "We don't carry any {} products right now. Here's what we do have:\n{}",
            category.display_name(),
            category_lines(catalog)
        );
    };

    let mut out = format!(
        "{} ({} items, ${}-${}):\n",
        category.display_name(),
        products.len(),
        low.price,
        high.price
    );
    for p in &products {
        let _ = write!(out, "\n• {} ${}\n  {}\n", p.name, p.price, p.spec);
    }
    let offers = catalog.bundles(Some(category));
    if !offers.is_empty() {
        out.push_str("\n🎁 Save with a bundle:\n");
        for bundle in offers {
            write_bundle(&mut out, catalog, bundle);
        }
    }
    out.push_str("\nWhich one interests you?");
    out
}

// =============================================================================
// Store policies
// =============================================================================

pub fn faq(topic: FaqTopic, support_handle: &str) -> String {
    match topic {
        FaqTopic::Shipping => format!(
            "📦 Shipping:\n\n\
             ✅ Free shipping on orders over $100\n\
             ✅ Standard delivery in 3-5 business days\n\
             ✅ Express delivery in 2-3 business days (+$15)\n\
             ✅ Tracking link sent with every order\n\
             ✅ We ship worldwide 🌍\n\n\
             Questions about an order? Message {}.",
            support_handle
        ),
        FaqTopic::Returns => format!(
            "↩️ Returns:\n\n\
             ✅ 30-day money-back guarantee\n\
             ✅ Free returns on defective items\n\
             ✅ Easy exchanges for another product\n\n\
             To start a return, message {} with your order number.",
            support_handle
        ),
        FaqTopic::Warranty => format!(
            "🛡️ Warranty:\n\n\
             ✅ 1-year warranty on every product\n\
             ✅ 30-day money-back guarantee on top\n\
             ✅ Free repair or replacement for covered faults\n\n\
             For a warranty claim, message {}.",
            support_handle
        ),
    }
}

// =============================================================================
// Use-case recommendations
// =============================================================================

struct UseCasePicks {
    title: &'static str,
    products: &'static [&'static str],
    bundles: &'static [&'static str],
}

fn use_case_picks(use_case: UseCase) -> UseCasePicks {
    match use_case {
        UseCase::Fitness => UseCasePicks {
            title: "💪 Fitness & health tracking",
            products: &[
                "Fitness Tracker Band",
                "Smartwatch X",
                "Fitness Band Pro",
                "Wireless Earbuds Pro",
            ],
            bundles: &["Fitness Duo", "Audio Trio"],
        },
        UseCase::HomeAutomation => UseCasePicks {
            title: "🏠 Smart home automation",
            products: &[
                "Smart LED Strip Lights",
                "Smart Light Bulb (4-Pack)",
                "Smart Doorbell Cam",
                "Smart Security Camera",
                "Smart Thermostat",
                "Smart Home Hub",
            ],
            bundles: &["Lighting Starter", "Home Security Set"],
        },
        UseCase::Entertainment => UseCasePicks {
            title: "🎮 Entertainment & gaming",
            products: &[
                "Bluetooth Speaker Mini",
                "Smart LED Strip Lights",
                "Portable Projector Pro",
                "VR Headset Max",
                "Noise-Cancelling Headphones",
            ],
            bundles: &["Movie Night"],
        },
        UseCase::RemoteWork => UseCasePicks {
            title: "💼 Work from home",
            products: &[
                "Wireless Charging Pad",
                "Laptop Stand Pro",
                "Foldable Wireless Keyboard",
                "Noise-Cancelling Headphones",
            ],
            bundles: &["Workspace Kit"],
        },
        UseCase::Travel => UseCasePicks {
            title: "✈️ Travel & adventure",
            products: &[
                "Wireless Earbuds Pro",
                "Portable Solar Charger",
                "Power Bank 20000mAh",
                "Mini Drone X2",
                "4K Action Camera",
            ],
            bundles: &["Power Trio"],
        },
    }
}

/// Products and bundles suited to `use_case`. `None` when the catalog holds
/// none of them.
pub fn use_case_recommendation(catalog: &Catalog, use_case: UseCase) -> Option<String> {
    let picks = use_case_picks(use_case);
    let products: Vec<&Product> = picks
        .products
        .iter()
        .filter_map(|name| catalog.product(name))
        .collect();
    if products.is_empty() {
        return None;
    }

    let mut out = format!("{}: here's what I'd pick.\n\n", picks.title);
    for p in &products {
        let _ = writeln!(out, "• {} ${}", p.name, p.price);
    }
    let offers: Vec<&Bundle> = picks
        .bundles
        .iter()
        .filter_map(|name| catalog.bundle(name))
        .collect();
    if !offers.is_empty() {
        out.push_str("\n🎁 Recommended bundles:\n");
        for bundle in offers {
            write_bundle(&mut out, catalog, bundle);
        }
    }
    out.push_str("\nWant details on any of these?");
    Some(out)
}

// =============================================================================
// Product qualifiers
// =============================================================================

pub fn price_quote(product: &Product, support_handle: &str) -> String {
    format!(
        "💰 The {} costs ${}.\n\n{}\n\n\
         ✅ Free shipping on orders over $100\n\
         ✅ 30-day money-back guarantee\n\
         ✅ 1-year warranty\n\n\
         Ready to order? Message {}!",
        product.name,
        product.price,
        scarcity_line(product.price),
        support_handle
    )
}

pub fn purchase(product: &Product, support_handle: &str) -> String {
    let mut out = format!(
        "Great choice! The {} is a fantastic pick. 🎉\n\n\
         Here's what you get:\n\
         ✅ 30-day money-back guarantee\n\
         ✅ 1-year warranty\n\
         ✅ Delivery in 3-5 business days\n\
         ✅ Secure checkout\n",
        product.name
    );
    if product.price > 200 {
        out.push_str("\n🔥 Good timing, stock is limited.\n");
    }
    let _ = write!(
        out,
        "\n📞 To complete your order, message {} and mention the {}.",
        support_handle, product.name
    );
    out
}

pub fn spec_sheet(product: &Product) -> String {
    format!(
        "📋 {} specs:\n\n{}\n\n💰 Price: ${}\n\n{}\n\nWant to know more or ready to buy? 🛒",
        product.name,
        product.spec,
        product.price,
        value_proposition(product.price)
    )
}

/// Other products of the same category, cheapest first.
pub fn alternatives(catalog: &Catalog, product: &Product) -> String {
    let others: Vec<&Product> = catalog
        .products_in(product.category)
        .into_iter()
        .filter(|p| p.name != product.name)
        .collect();
    if others.is_empty() {
        return format!(
            "The {} is the only {} product we carry right now, so it's the best in its class!",
            product.name,
            product.category.display_name()
        );
    }
    let mut out = format!(
        "Here's how the {} (${}) stacks up against other {} picks:\n\n",
        product.name,
        product.price,
        product.category.display_name()
    );
    for p in others {
        let _ = writeln!(out, "• {} ${}: {}", p.name, p.price, p.spec);
    }
    out.push_str("\nSay \"compare\" with two names for a side-by-side.");
    out
}

pub fn affirmative(product: &Product) -> String {
    format!(
        "Awesome! The {} is a solid choice! 🎉\n\nWant the price, the specs, or ready to buy?",
        product.name
    )
}

pub fn negative() -> String {
    "No worries! 😊 Anything else you'd like to know, or shall we look at other products?"
        .to_string()
}
