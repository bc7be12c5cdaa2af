use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KioskError, Result};

/// Bounds on the per-user history length, whatever the config says.
pub const MIN_HISTORY_LIMIT: usize = 5;
pub const MAX_HISTORY_LIMIT: usize = 10;

/// Top-level configuration for the Kiosk assistant.
///
/// Loaded from `~/.kiosk/config.toml` by default. Every section falls back
/// to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub enhancer: EnhancerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl KioskConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KioskConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KioskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Full path of the turn-log database.
    pub fn db_path(&self) -> PathBuf {
        expand_home(&self.general.data_dir).join(&self.storage.db_file)
    }
}

/// General assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the turn log.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Name the assistant introduces itself with.
    pub assistant_name: String,
    /// Support contact quoted in purchase and apology copy.
    pub support_handle: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.kiosk/data".to_string(),
            log_level: "info".to_string(),
            assistant_name: "Alex".to_string(),
            support_handle: "@Store_help_bot".to_string(),
        }
    }
}

/// Per-user conversation memory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Maximum number of turns kept per user; oldest are dropped first.
    pub history_limit: usize,
    /// Seed a new record's history from the turn log.
    pub warm_start: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            warm_start: false,
        }
    }
}

impl MemoryConfig {
    /// History bound actually enforced, clamped to
    /// `MIN_HISTORY_LIMIT..=MAX_HISTORY_LIMIT`.
    pub fn effective_history_limit(&self) -> usize {
        self.history_limit.clamp(MIN_HISTORY_LIMIT, MAX_HISTORY_LIMIT)
    }
}

/// What a short, unqualified follow-up does when a product is remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VagueFollowup {
    /// Clear the memory and fall through to the default menu.
    #[default]
    FallThrough,
    /// Repeat the remembered product's pitch.
    RepeatPitch,
}

/// Dialogue resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// A greeting with at most this many words resets the conversation.
    pub greeting_max_words: usize,
    /// Follow-ups with at most this many words count as vague.
    pub vague_max_words: usize,
    /// Behaviour for vague follow-ups with product context.
    pub vague_followup: VagueFollowup,
    /// Longer messages are truncated to this many characters.
    pub max_message_chars: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            greeting_max_words: 2,
            vague_max_words: 2,
            vague_followup: VagueFollowup::FallThrough,
            max_message_chars: 2000,
        }
    }
}

/// Persuasive copy appended to product pitches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Whether any copy is appended at all.
    pub enabled: bool,
    /// Prices strictly above this get strong scarcity copy.
    pub premium_threshold: u32,
    /// Prices strictly above this (and up to premium) get moderate copy.
    pub mid_threshold: u32,
    /// Chance that budget-tier products get an urgency line.
    pub light_tier_probability: f64,
    /// Chance that a social-proof line is added before the urgency line.
    pub social_proof_probability: f64,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            premium_threshold: 400,
            mid_threshold: 150,
            light_tier_probability: 0.5,
            social_proof_probability: 0.7,
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Optional TOML catalog file. The built-in table is used when unset.
    pub path: Option<String>,
}

/// Turn-log persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Record every resolved turn in SQLite.
    pub enabled: bool,
    /// Database file name inside `general.data_dir`.
    pub db_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            db_file: "kiosk.db".to_string(),
        }
    }
}

/// Expand a leading `~/` against `$HOME` (or `%USERPROFILE%`).
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"));
        if let Ok(home) = home {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
