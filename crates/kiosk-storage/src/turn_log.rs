//! Append-only log of resolved turns, keyed by user.

use std::sync::Arc;

use rusqlite::params;
use tracing::{debug, warn};
use uuid::Uuid;

use kiosk_core::error::KioskError;
use kiosk_core::types::{HistorySource, Intent, Turn, UserId};

use crate::db::Database;

/// SQLite-backed turn log. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TurnLog {
    db: Arc<Database>,
}

impl TurnLog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append one turn for `user_id`.
    pub fn record_turn(&self, user_id: UserId, turn: &Turn) -> Result<(), KioskError> {
        self.insert(user_id, turn, false)
    }

    /// Append a turn that wiped the conversation. Warm starts never reach
    /// back past it.
    pub fn record_clear(&self, user_id: UserId, turn: &Turn) -> Result<(), KioskError> {
        self.insert(user_id, turn, true)
    }

    fn insert(&self, user_id: UserId, turn: &Turn, cleared: bool) -> Result<(), KioskError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO turns (id, user_id, user_text, reply_text, intent, product, created_at, cleared)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    turn.id.to_string(),
                    user_id,
                    turn.user_text,
                    turn.reply,
                    turn.intent.as_str(),
                    turn.product,
                    turn.timestamp,
                    cleared,
                ],
            )
            .map_err(|e| KioskError::Storage(format!("Failed to record turn: {}", e)))?;
            Ok(())
        })?;
        debug!(user_id, intent = %turn.intent, cleared, "turn recorded");
        Ok(())
    }

    /// The most recent `limit` turns for `user_id` after their last clearing
    /// turn, oldest first.
    pub fn load_recent(&self, user_id: UserId, limit: usize) -> Result<Vec<Turn>, KioskError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut turns = self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, user_text, reply_text, intent, product, created_at
                     FROM turns
                     WHERE user_id = ?1
                       AND seq > COALESCE(
                           (SELECT MAX(seq) FROM turns WHERE user_id = ?1 AND cleared = 1), 0)
                     ORDER BY seq DESC LIMIT ?2",
                )
                .map_err(|e| KioskError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(params![user_id, limit], |row| Ok(row_to_turn(row)))
                .map_err(|e| KioskError::Storage(e.to_string()))?;

            let mut turns = Vec::new();
            for row in rows {
                turns.push(row.map_err(|e| KioskError::Storage(e.to_string()))??);
            }
            Ok(turns)
        })?;

        turns.reverse();
        Ok(turns)
    }

    /// Delete every logged turn of `user_id`. Returns the number removed.
    pub fn purge_user(&self, user_id: UserId) -> Result<usize, KioskError> {
        let removed = self.db.with_conn(|conn| {
            conn.execute("DELETE FROM turns WHERE user_id = ?1", params![user_id])
                .map_err(|e| KioskError::Storage(format!("Failed to purge turns: {}", e)))
        })?;
        if removed > 0 {
            warn!(user_id, removed, "turn log purged");
        }
        Ok(removed)
    }

    /// Number of logged turns for `user_id`.
    pub fn count(&self, user_id: UserId) -> Result<u64, KioskError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM turns WHERE user_id = ?1",
                params![user_id],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n as u64)
            .map_err(|e| KioskError::Storage(e.to_string()))
        })
    }
}

impl HistorySource for TurnLog {
    fn load_recent(&self, user_id: UserId, limit: usize) -> kiosk_core::Result<Vec<Turn>> {
        TurnLog::load_recent(self, user_id, limit)
    }
}

fn row_to_turn(row: &rusqlite::Row) -> Result<Turn, KioskError> {
    let id_str: String = row.get(0).map_err(|e| KioskError::Storage(e.to_string()))?;
    let intent_str: String = row.get(3).map_err(|e| KioskError::Storage(e.to_string()))?;

    Ok(Turn {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| KioskError::Storage(format!("Invalid turn id {}: {}", id_str, e)))?,
        user_text: row.get(1).map_err(|e| KioskError::Storage(e.to_string()))?,
        reply: row.get(2).map_err(|e| KioskError::Storage(e.to_string()))?,
        intent: intent_str.parse::<Intent>()?,
        product: row.get(4).map_err(|e| KioskError::Storage(e.to_string()))?,
        timestamp: row.get(5).map_err(|e| KioskError::Storage(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> TurnLog {
        TurnLog::new(Arc::new(Database::in_memory().unwrap()))
    }

    fn turn(text: &str, intent: Intent, product: Option<&str>) -> Turn {
        Turn::new(text, "reply", intent, product)
    }

    // ---- record / load ----

    #[test]
    fn test_record_and_load_round_trip() {
        let log = log();
        let original = turn("how much", Intent::PriceInquiry, Some("Smartwatch X"));
        log.record_turn(7, &original).unwrap();

        let loaded = log.load_recent(7, 10).unwrap();
        assert_eq!(loaded, vec![original]);
    }

    #[test]
    fn test_load_recent_is_oldest_first_and_bounded() {
        let log = log();
        for i in 0..5 {
            log.record_turn(1, &turn(&format!("msg {}", i), Intent::Unclassified, None))
                .unwrap();
        }

        let loaded = log.load_recent(1, 3).unwrap();
        let texts: Vec<&str> = loaded.iter().map(|t| t.user_text.as_str()).collect();
        assert_eq!(texts, vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn test_load_recent_stops_at_clearing_turn() {
        let log = log();
        log.record_turn(1, &turn("tell me about the drone", Intent::Unclassified, Some("Mini Drone X2")))
            .unwrap();
        log.record_clear(1, &turn("bye", Intent::Farewell, None)).unwrap();
        log.record_turn(1, &turn("how much", Intent::Unclassified, None)).unwrap();
        log.record_turn(2, &turn("hello", Intent::Unclassified, None)).unwrap();

        let texts: Vec<String> = log
            .load_recent(1, 10)
            .unwrap()
            .into_iter()
            .map(|t| t.user_text)
            .collect();
        assert_eq!(texts, vec!["how much".to_string()]);
        assert_eq!(log.count(1).unwrap(), 3);
        assert_eq!(log.load_recent(2, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_clearing_turn_as_latest_leaves_nothing() {
        let log = log();
        log.record_turn(1, &turn("tell me about the drone", Intent::Unclassified, None))
            .unwrap();
        log.record_clear(1, &turn("hi", Intent::Greeting, None)).unwrap();
        assert!(log.load_recent(1, 10).unwrap().is_empty());
    }

    #[test]
    fn test_load_recent_zero_limit() {
        let log = log();
        log.record_turn(1, &turn("hi", Intent::Greeting, None)).unwrap();
        assert!(log.load_recent(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let log = log();
        log.record_turn(1, &turn("hi", Intent::Greeting, None)).unwrap();
        log.record_turn(2, &turn("bye", Intent::Farewell, None)).unwrap();

        let first = log.load_recent(1, 10).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].intent, Intent::Greeting);
        assert!(log.load_recent(3, 10).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_intent_is_an_error() {
        let log = log();
        log.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO turns (id, user_id, user_text, reply_text, intent, product, created_at)
                     VALUES (?1, 1, 'x', 'y', 'haggling', NULL, 0)",
                    params![Uuid::new_v4().to_string()],
                )
                .map_err(|e| KioskError::Storage(e.to_string()))
            })
            .unwrap();
        assert!(log.load_recent(1, 10).is_err());
    }

    // ---- purge / count ----

    #[test]
    fn test_purge_user() {
        let log = log();
        log.record_turn(1, &turn("hi", Intent::Greeting, None)).unwrap();
        log.record_turn(1, &turn("thanks", Intent::Thanks, None)).unwrap();
        log.record_turn(2, &turn("hi", Intent::Greeting, None)).unwrap();

        assert_eq!(log.purge_user(1).unwrap(), 2);
        assert_eq!(log.count(1).unwrap(), 0);
        assert_eq!(log.count(2).unwrap(), 1);
        assert_eq!(log.purge_user(1).unwrap(), 0);
    }

    // ---- history source ----

    #[test]
    fn test_history_source_impl() {
        let log = log();
        log.record_turn(5, &turn("tell me about the drone", Intent::Unclassified, Some("Mini Drone X2")))
            .unwrap();

        let source: &dyn HistorySource = &log;
        let turns = source.load_recent(5, 10).unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].product.as_deref(), Some("Mini Drone X2"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.db");
        {
            let log = TurnLog::new(Arc::new(Database::new(&path).unwrap()));
            log.record_turn(9, &turn("hello", Intent::Greeting, None)).unwrap();
        }
        let log = TurnLog::new(Arc::new(Database::new(&path).unwrap()));
        assert_eq!(log.count(9).unwrap(), 1);
    }
}
