//! Per-user conversation memory.
//!
//! One [`ConversationRecord`] per user id, held behind its own lock. The
//! outer map lock is only taken to look up or insert a record, so turns for
//! different users never wait on each other. Record creation is atomic: two
//! concurrent first messages from the same user end up sharing one record.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use kiosk_core::{HistorySource, Product, Turn, UserId};
use tracing::{debug, warn};

use crate::error::ChatError;

// =============================================================================
// ConversationRecord
// =============================================================================

/// Mutable conversation state for a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRecord {
    user_id: UserId,
    last_product: Option<String>,
    history: VecDeque<Turn>,
    history_limit: usize,
}

impl ConversationRecord {
    pub fn new(user_id: UserId, history_limit: usize) -> Self {
        Self {
            user_id,
            last_product: None,
            history: VecDeque::with_capacity(history_limit),
            history_limit: history_limit.max(1),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Canonical name of the product under discussion.
    pub fn last_product(&self) -> Option<&str> {
        self.last_product.as_deref()
    }

    pub fn has_context(&self) -> bool {
        self.last_product.is_some()
    }

    /// Only catalog products can become context, so the name always resolves.
    pub fn set_last_product(&mut self, product: &Product) {
        self.last_product = Some(product.name.clone());
    }

    /// Append a turn, dropping the oldest once the bound is exceeded.
    pub fn push_turn(&mut self, turn: Turn) {
        self.history.push_back(turn);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    /// Turns oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Turn> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget the product and the history. The record itself stays.
    pub fn reset(&mut self) {
        self.last_product = None;
        self.history.clear();
    }
}

// =============================================================================
// ConversationMemory
// =============================================================================

pub type RecordHandle = Arc<Mutex<ConversationRecord>>;

/// Keyed store of conversation records.
pub struct ConversationMemory {
    records: Mutex<HashMap<UserId, RecordHandle>>,
    history_limit: usize,
    history_source: Option<Arc<dyn HistorySource>>,
}

impl ConversationMemory {
    pub fn new(history_limit: usize) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            history_limit: history_limit.max(1),
            history_source: None,
        }
    }

    /// Seed new records' history from `source` on first access.
    pub fn with_history_source(mut self, source: Arc<dyn HistorySource>) -> Self {
        self.history_source = Some(source);
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Get-or-create the shared handle for a user's record.
    ///
    /// The history source is read outside the map lock. If two callers race
    /// on the first access, both may read the source but only the first
    /// insert is kept.
    pub fn handle(&self, user_id: UserId) -> Result<RecordHandle, ChatError> {
        if let Some(handle) = self.lock_records()?.get(&user_id) {
            return Ok(Arc::clone(handle));
        }

        let record = self.fresh_record(user_id)?;
        let mut records = self.lock_records()?;
        let handle = records
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(record)));
        Ok(Arc::clone(handle))
    }

    /// Snapshot of a user's record, creating an empty one on first access.
    pub fn get(&self, user_id: UserId) -> Result<ConversationRecord, ChatError> {
        let handle = self.handle(user_id)?;
        let record = lock_record(&handle)?;
        Ok(record.clone())
    }

    pub fn set_last_product(&self, user_id: UserId, product: &Product) -> Result<(), ChatError> {
        let handle = self.handle(user_id)?;
        lock_record(&handle)?.set_last_product(product);
        Ok(())
    }

    pub fn append_history(&self, user_id: UserId, turn: Turn) -> Result<(), ChatError> {
        let handle = self.handle(user_id)?;
        lock_record(&handle)?.push_turn(turn);
        Ok(())
    }

    /// Reset a user's record. Unknown users are left alone.
    pub fn clear(&self, user_id: UserId) -> Result<(), ChatError> {
        let handle = self.lock_records()?.get(&user_id).cloned();
        if let Some(handle) = handle {
            lock_record(&handle)?.reset();
            debug!(user_id, "conversation cleared");
        }
        Ok(())
    }

    pub fn has_context(&self, user_id: UserId) -> Result<bool, ChatError> {
        let handle = self.handle(user_id)?;
        let record = lock_record(&handle)?;
        Ok(record.has_context())
    }

    /// Number of users with a record.
    pub fn len(&self) -> Result<usize, ChatError> {
        Ok(self.lock_records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ChatError> {
        Ok(self.len()? == 0)
    }

    fn fresh_record(&self, user_id: UserId) -> Result<ConversationRecord, ChatError> {
        let mut record = ConversationRecord::new(user_id, self.history_limit);
        if let Some(source) = &self.history_source {
            let turns = source
                .load_recent(user_id, self.history_limit)
                .map_err(|e| {
                    warn!(user_id, error = %e, "history warm start failed");
                    ChatError::MemoryUnavailable(e.to_string())
                })?;
            debug!(user_id, turns = turns.len(), "history warm start");
            for turn in turns {
                record.push_turn(turn);
            }
        }
        Ok(record)
    }

    fn lock_records(&self) -> Result<MutexGuard<'_, HashMap<UserId, RecordHandle>>, ChatError> {
        self.records
            .lock()
            .map_err(|e| ChatError::MemoryUnavailable(format!("record map lock poisoned: {}", e)))
    }
}

/// Lock one record for a read-modify-write.
pub fn lock_record(handle: &RecordHandle) -> Result<MutexGuard<'_, ConversationRecord>, ChatError> {
    handle
        .lock()
        .map_err(|e| ChatError::MemoryUnavailable(format!("record lock poisoned: {}", e)))
}
