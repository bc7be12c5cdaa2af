//! Built-in product table shipped with the assistant.

use crate::catalog::{Bundle, Category, Product};

struct ProductRow {
    name: &'static str,
    price: u32,
    category: Category,
    spec: &'static str,
    responses: [&'static str; 4],
    aliases: &'static [&'static str],
}

struct BundleRow {
    name: &'static str,
    category: Category,
    products: &'static [&'static str],
    price: u32,
}

const PRODUCTS: &[ProductRow] = &[
    ProductRow {
        name: "Smartwatch X",
        price: 59,
        category: Category::Wearables,
        spec: "Tracks steps, sleep, and heart rate with a bright OLED display and 5-day battery.",
        responses: [
            "The Smartwatch X is a pocket fitness coach for your wrist. Steps, sleep and heart rate, all tracked without you thinking about it. 💪",
            "Serious about training? Live heart rate and sleep insights on the Smartwatch X make progress easy to see. ⌚",
            "Clean display, multi-day battery, and notifications straight from your phone. Do you care more about style or performance?",
            "It pairs with your phone in seconds so you can glance at messages instead of digging for your phone. Great for busy days! 📱",
        ],
        aliases: &["smartwatch", "smart watch", "watch"],
    },
    ProductRow {
        name: "Bluetooth Speaker Mini",
        price: 29,
        category: Category::Audio,
        spec: "Compact speaker with crisp sound, deep bass, and 12-hour battery life.",
        responses: [
            "The Bluetooth Speaker Mini punches well above its size: crisp highs, real bass and 12 hours of music. 🔊",
            "Beach day, house party or just your desk, this little speaker keeps up. 🎉",
            "Small but loud. Are you after portability or raw volume?",
            "It connects in seconds and the battery outlasts speakers twice its size. 🔋",
        ],
        aliases: &["speaker", "bluetooth speaker"],
    },
    ProductRow {
        name: "Wireless Earbuds Pro",
        price: 79,
        category: Category::Audio,
        spec: "Noise-cancelling earbuds with waterproof design and 24-hour total playtime.",
        responses: [
            "Wireless Earbuds Pro bring studio-quality sound and shut the outside world out. 🎧",
            "Waterproof and they stay put through a full workout. Want to hear about battery life?",
            "Made for the daily commute: no wires, no tangles, no stress. 🚇",
            "The noise cancelling is excellent and the case tops them up fast. ⚡",
        ],
        aliases: &["earbuds", "wireless earbuds"],
    },
    ProductRow {
        name: "Power Bank 20000mAh",
        price: 300,
        category: Category::Power,
        spec: "Fast-charging dual-port power bank that keeps devices powered for days.",
        responses: [
            "The Power Bank 20000mAh keeps everything alive for days: two ports, fast charging, built tough. 🔋",
            "That is roughly four full phone charges before it needs a top-up itself. 📱",
            "A travel essential. It handles tablets as happily as phones. ✈️",
            "Camping trip or a long day out, charge two devices at once and forget about sockets. 🏕️",
        ],
        aliases: &["power bank", "powerbank", "portable charger"],
    },
    ProductRow {
        name: "Smart Home Hub",
        price: 450,
        category: Category::SmartHome,
        spec: "Connects and controls all your smart home devices in one sleek hub.",
        responses: [
            "The Smart Home Hub puts lights, music and security behind a single tap. 🏠",
            "It works with Alexa, Google Home and most smart devices you already own.",
            "Building a new setup or upgrading the one you have? The hub handles both.",
            "Voice control everything from the couch, from the lights to the heating. ☕",
        ],
        aliases: &["smart home hub", "home hub", "hub"],
    },
    ProductRow {
        name: "4K Action Camera",
        price: 850,
        category: Category::Entertainment,
        spec: "Waterproof 4K camera with ultra-stable video and 120° wide-angle lens.",
        responses: [
            "The 4K Action Camera captures your adventures in stunning detail, even at full speed. 📹",
            "Stabilised footage and a waterproof housing. Is it for sports or for travel? 🌊",
            "A vlogger's favourite: crisp footage and mounts for everything. 🎥",
            "Helmet, bike or surfboard, the wide-angle lens gets the whole scene in. 🏄",
        ],
        aliases: &["action camera", "4k camera", "camera"],
    },
    ProductRow {
        name: "Fitness Tracker Band",
        price: 35,
        category: Category::Wearables,
        spec: "Monitors heart rate, sleep, calories, and daily steps with real-time syncing.",
        responses: [
            "The Fitness Tracker Band is the easiest way to start tracking steps, sleep and calories. 🏃",
            "Light enough to forget you're wearing it, and it syncs to your phone in real time.",
            "A great first tracker. Are you focused on sleep or on activity?",
            "Heart rate around the clock and a battery that goes the distance. ❤️",
        ],
        aliases: &["fitness band", "fitness tracker", "tracker band"],
    },
    ProductRow {
        name: "Smart LED Strip Lights",
        price: 49,
        category: Category::SmartHome,
        spec: "16 million colors, voice control, music sync, and app-controlled mood lighting.",
        responses: [
            "Smart LED Strip Lights turn any room into a mood. 16 million colours at your fingertips. 🌈",
            "They sync to your music, which makes movie nights and parties something else. 🎶",
            "Stick them behind the TV, under the bed or along the desk. Where would they go?",
            "Control them from your phone or by voice, and set schedules so they fade on at sunset. 🌅",
        ],
        aliases: &["led strip", "led lights", "strip lights"],
    },
    ProductRow {
        name: "Portable Projector Pro",
        price: 320,
        category: Category::Entertainment,
        spec: "Pocket-sized projector with HDMI, wireless casting, and 120-inch display capability.",
        responses: [
            "The Portable Projector Pro turns any wall into a 120-inch cinema. 🎬",
            "Cast straight from your phone or plug in over HDMI. Backyard movie night sorted. 🍿",
            "It fits in a bag, so the big screen comes with you.",
            "Gaming, films or presentations, it handles all three without fuss. 🎮",
        ],
        aliases: &["projector", "portable projector"],
    },
    ProductRow {
        name: "Smart Security Camera",
        price: 210,
        category: Category::SmartHome,
        spec: "1080p live feed with night vision, motion alerts, and two-way audio.",
        responses: [
            "The Smart Security Camera keeps watch day and night with a clear 1080p feed. 🔒",
            "Motion alerts go straight to your phone, and two-way audio lets you talk back.",
            "Night vision means you still see everything after dark. Indoor or outdoor use? 🌙",
            "Setup takes minutes and you can check in from anywhere. 📲",
        ],
        aliases: &["security camera", "security cam"],
    },
    ProductRow {
        name: "Wireless Charging Pad",
        price: 45,
        category: Category::Power,
        spec: "15W fast wireless charger with LED indicator, auto-shutoff, and case-friendly design.",
        responses: [
            "The Wireless Charging Pad gives you 15W fast charging without fiddling with cables. ⚡",
            "Put your phone down, it charges. It even works through most cases.",
            "Perfect for the nightstand: a soft indicator light and automatic shutoff when full. 🌙",
            "A small upgrade that tidies every desk. 🧹",
        ],
        aliases: &["charging pad", "wireless charger"],
    },
    ProductRow {
        name: "Noise-Cancelling Headphones",
        price: 180,
        category: Category::Audio,
        spec: "Active noise cancellation with 30-hour battery and premium comfort.",
        responses: [
            "Noise-Cancelling Headphones give you silence on demand and 30 hours of play. 🎧",
            "Flights, open offices and noisy trains simply disappear. ✈️",
            "Soft cushions and a light frame keep them comfortable for hours.",
            "Rich, balanced sound and cancellation you can tune to the room. 🎶",
        ],
        aliases: &["headphones", "noise cancelling"],
    },
    ProductRow {
        name: "Smart Thermostat",
        price: 220,
        category: Category::SmartHome,
        spec: "AI-powered temperature control with energy-saving schedules and remote access.",
        responses: [
            "The Smart Thermostat learns your routine and keeps every room just right. 🌡️",
            "Energy-saving schedules pay it back on your bills over time. 💰",
            "Adjust the heating from your phone before you even get home.",
            "It takes a few minutes to install and works with most heating systems. 🔧",
        ],
        aliases: &["thermostat"],
    },
    ProductRow {
        name: "Smart Light Bulb (4-Pack)",
        price: 99,
        category: Category::SmartHome,
        spec: "16 million colors, voice control, scheduling, and energy-efficient LED bulbs.",
        responses: [
            "The Smart Light Bulb 4-pack is the easiest way into smart lighting. 💡",
            "Change colours, dim by voice or set wake-up schedules.",
            "Efficient LEDs that still give you 16 million colours to play with. 🌈",
            "Screw them in, open the app, done. No hub needed to get started.",
        ],
        aliases: &["light bulb", "smart bulb"],
    },
    ProductRow {
        name: "Mini Drone X2",
        price: 250,
        category: Category::Entertainment,
        spec: "HD camera, gesture control, obstacle avoidance, and foldable compact design.",
        responses: [
            "The Mini Drone X2 folds to pocket size and films in HD. 🚁",
            "Gesture control and obstacle avoidance make it a friendly first drone.",
            "Aerial shots of your trips without the bulk of a pro rig. 🏞️",
            "Quick to launch and easy to fly. Have you flown a drone before?",
        ],
        aliases: &["drone", "mini drone"],
    },
    ProductRow {
        name: "Laptop Stand Pro",
        price: 75,
        category: Category::Productivity,
        spec: "Ergonomic aluminum stand with 6-level height adjustment and cooling design.",
        responses: [
            "The Laptop Stand Pro lifts your screen to eye level and your neck will thank you. 💻",
            "Six height settings and an open aluminium frame that keeps the laptop cool.",
            "Solid enough for the office, light enough for the bag.",
            "A small change that makes long work sessions noticeably easier. 🧘",
        ],
        aliases: &["laptop stand"],
    },
    ProductRow {
        name: "Foldable Wireless Keyboard",
        price: 89,
        category: Category::Productivity,
        spec: "Full-size keyboard that folds to pocket size with Bluetooth connectivity.",
        responses: [
            "The Foldable Wireless Keyboard gives you full-size typing that folds into a pocket. ⌨️",
            "Pair it with a tablet or phone and you have a travel workstation.",
            "Quiet keys and long battery life. Do you type a lot on the go?",
            "It switches between devices with one press. 🔄",
        ],
        aliases: &["keyboard", "wireless keyboard"],
    },
    ProductRow {
        name: "Smart Doorbell Cam",
        price: 190,
        category: Category::SmartHome,
        spec: "1080p video doorbell with motion detection, two-way talk, and cloud storage.",
        responses: [
            "The Smart Doorbell Cam shows you who's at the door from anywhere. 🚪",
            "Motion detection and cloud clips mean no missed deliveries. 📦",
            "Talk to visitors through your phone, even when you're out.",
            "Clear 1080p video day and night. Is it for a house or an apartment?",
        ],
        aliases: &["doorbell", "doorbell cam"],
    },
    ProductRow {
        name: "VR Headset Max",
        price: 480,
        category: Category::Entertainment,
        spec: "Immersive VR experience with 4K display, spatial audio, and wireless freedom.",
        responses: [
            "The VR Headset Max drops you straight into other worlds with a 4K display. 🥽",
            "Spatial audio and no cables, so you move freely while you play.",
            "Games, fitness and virtual travel all live in one headset. 🎮",
            "Comfortable enough for long sessions. Have you tried VR before?",
        ],
        aliases: &["vr headset", "vr", "virtual reality"],
    },
    ProductRow {
        name: "Portable Solar Charger",
        price: 99,
        category: Category::Power,
        spec: "20W solar panel with dual USB ports and weather-resistant foldable design.",
        responses: [
            "The Portable Solar Charger turns sunshine into phone battery. ☀️",
            "It folds flat, shrugs off the weather and charges two devices at once.",
            "Ideal for camping and hiking where sockets don't exist. 🏕️",
            "Clip it to a backpack and charge while you walk. 🎒",
        ],
        aliases: &["solar charger", "solar"],
    },
    ProductRow {
        name: "Fitness Band Pro",
        price: 120,
        category: Category::Wearables,
        spec: "Advanced fitness tracking with GPS, heart rate, sleep analysis, and 14-day battery.",
        responses: [
            "The Fitness Band Pro adds built-in GPS to serious health tracking. 🏃",
            "Two weeks of battery means you rarely take it off.",
            "Detailed sleep analysis shows you how well you actually recover. 😴",
            "Runs, rides and swims all get mapped and logged. Which do you do most?",
        ],
        aliases: &["fitness band pro", "advanced fitness"],
    },
];

const BUNDLES: &[BundleRow] = &[
    BundleRow {
        name: "Audio Trio",
        category: Category::Audio,
        products: &[
            "Bluetooth Speaker Mini",
            "Wireless Earbuds Pro",
            "Noise-Cancelling Headphones",
        ],
        price: 268,
    },
    BundleRow {
        name: "Lighting Starter",
        category: Category::SmartHome,
        products: &["Smart LED Strip Lights", "Smart Light Bulb (4-Pack)"],
        price: 129,
    },
    BundleRow {
        name: "Home Security Set",
        category: Category::SmartHome,
        products: &["Smart Doorbell Cam", "Smart Security Camera"],
        price: 360,
    },
    BundleRow {
        name: "Fitness Duo",
        category: Category::Wearables,
        products: &["Fitness Tracker Band", "Smartwatch X"],
        price: 79,
    },
    BundleRow {
        name: "Power Trio",
        category: Category::Power,
        products: &[
            "Wireless Charging Pad",
            "Portable Solar Charger",
            "Power Bank 20000mAh",
        ],
        price: 409,
    },
    BundleRow {
        name: "Workspace Kit",
        category: Category::Productivity,
        products: &["Laptop Stand Pro", "Foldable Wireless Keyboard"],
        price: 144,
    },
    BundleRow {
        name: "Movie Night",
        category: Category::Entertainment,
        products: &[
            "Portable Projector Pro",
            "Bluetooth Speaker Mini",
            "Smart LED Strip Lights",
        ],
        price: 349,
    },
];

/// Owned products and bundles for [`Catalog::builtin`](crate::Catalog::builtin).
pub(crate) fn builtin() -> (Vec<Product>, Vec<Bundle>) {
    let products = PRODUCTS
        .iter()
        .map(|row| Product {
            name: row.name.to_string(),
            price: row.price,
            category: row.category,
            spec: row.spec.to_string(),
            responses: row.responses.iter().map(|r| r.to_string()).collect(),
            aliases: row.aliases.iter().map(|a| a.to_string()).collect(),
        })
        .collect();

    let bundles = BUNDLES
        .iter()
        .map(|row| Bundle {
            name: row.name.to_string(),
            category: Some(row.category),
            products: row.products.iter().map(|p| p.to_string()).collect(),
            price: row.price,
        })
        .collect();

    (products, bundles)
}
