//! Kiosk storage crate: SQLite turn log.
//!
//! Best-effort durability for conversations. Every resolved turn can be
//! appended to a WAL-mode SQLite database, and the log doubles as the
//! history source used to warm-start a user's conversation memory.

pub mod db;
pub mod migrations;
pub mod turn_log;

pub use db::Database;
pub use turn_log::TurnLog;
