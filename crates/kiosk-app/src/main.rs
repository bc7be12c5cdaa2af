//! Kiosk binary - composition root.
//!
//! 1. Load configuration from TOML
//! 2. Load the catalog (built-in or from file)
//! 3. Open the turn log unless storage is disabled
//! 4. Build the dialogue resolver
//! 5. Chat over stdin/stdout until EOF or `:quit`

mod cli;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use kiosk_chat::{
    ChatError, ConversationMemory, DialogResolver, RandomSource, SeededRandom, ThreadRandom,
};
use kiosk_core::types::{Turn, UserId};
use kiosk_core::{Catalog, KioskConfig};
use kiosk_storage::{Database, TurnLog};

use cli::CliArgs;

/// Open the turn log, or `None` when storage is off or unavailable.
fn open_turn_log(config: &KioskConfig, no_store: bool) -> Option<TurnLog> {
    if no_store || !config.storage.enabled {
        tracing::info!("Turn log disabled");
        return None;
    }
    let db_path = config.db_path();
    match Database::new(&db_path) {
        Ok(db) => {
            tracing::info!(path = %db_path.display(), "Turn log opened");
            Some(TurnLog::new(Arc::new(db)))
        }
        Err(e) => {
            tracing::warn!(path = %db_path.display(), error = %e, "Turn log unavailable, continuing without it");
            None
        }
    }
}

/// Handle a `:` command. Returns false when the session should end.
fn run_command(
    command: &str,
    user_id: UserId,
    resolver: &DialogResolver,
    log: Option<&TurnLog>,
) -> Result<bool, ChatError> {
    match command {
        ":quit" | ":q" => Ok(false),
        ":forget" => {
            resolver.memory().clear(user_id)?;
            if let Some(log) = log {
                log.purge_user(user_id)?;
            }
            println!("(conversation forgotten)");
            Ok(true)
        }
        other => {
            println!("(unknown command {}; try :quit or :forget)", other);
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = KioskConfig::load_or_default(&config_file);

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting kiosk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Catalog.
    let catalog = Arc::new(Catalog::load(&config.catalog)?);
    tracing::info!(products = catalog.len(), "Catalog loaded");

    // Turn log and memory.
    let turn_log = open_turn_log(&config, args.no_store);
    let mut memory = ConversationMemory::new(config.memory.effective_history_limit());
    if config.memory.warm_start {
        if let Some(ref log) = turn_log {
            memory = memory.with_history_source(Arc::new(log.clone()));
            tracing::info!("History warm start enabled");
        }
    }

    let random: Arc<dyn RandomSource> = match args.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };

    let resolver = DialogResolver::new(&config, catalog, Arc::new(memory), random);
    let user_id = args.user_id;
    let name = config.general.assistant_name.clone();

    println!("{} is ready. Say hi! (:quit to leave, :forget to start fresh)", name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.starts_with(':') {
            match run_command(input, user_id, &resolver, turn_log.as_ref()) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    eprintln!("error: {}", e);
                    continue;
                }
            }
        }

        let reply = match resolver.resolve_turn(user_id, input) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Turn failed");
                eprintln!("Sorry, I couldn't process that right now. Please try again.");
                continue;
            }
        };

        println!("\n{}: {}\n", name, reply.text);

        if let Some(ref log) = turn_log {
            let turn = Turn::new(input, &reply.text, reply.intent, reply.product_context.as_deref());
            let recorded = if reply.context_cleared {
                log.record_clear(user_id, &turn)
            } else {
                log.record_turn(user_id, &turn)
            };
            if let Err(e) = recorded {
                tracing::warn!(user_id, error = %e, "Failed to record turn");
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}
