//! Per-chat photo counters.
//!
//! Each chat owns a [`SessionCounter`] that walks 1..=max_batch and decides
//! which column the next photo goes to. Counters live only in memory.

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::types::ChatId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::cell::Column;

/// What happened when the counter moved past a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// More photos fit in this batch
    Continue,
    /// The batch just filled up; the counter is back at 1
    BatchComplete,
}

/// Position of the next photo within the current batch.
///
/// Invariant: `1 <= current() <= max_batch()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCounter {
    value: u32,
    max_batch: u32,
}

impl SessionCounter {
    /// New counter at position 1. A zero batch size is treated as 1.
    pub fn new(max_batch: u32) -> Self {
        Self {
            value: 1,
            max_batch: max_batch.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.value
    }

    pub fn max_batch(&self) -> u32 {
        self.max_batch
    }

    pub fn reset(&mut self) {
        self.value = 1;
    }

    /// Column for the photo at the current position
    pub fn next_column(&self) -> Column {
        Column::for_position(self.value)
    }

    /// Moves past the current photo, wrapping to 1 after the last slot.
    pub fn advance(&mut self) -> Advance {
        self.value += 1;
        if self.value > self.max_batch {
            self.reset();
            Advance::BatchComplete
        } else {
            Advance::Continue
        }
    }
}

/// Counters for every chat the bot has seen since startup.
///
/// A chat's counter sits behind its own async mutex so one chat's photos are
/// numbered one at a time while other chats proceed independently.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<ChatId, Arc<Mutex<SessionCounter>>>>,
    max_batch: u32,
}

impl SessionStore {
    pub fn new(max_batch: u32) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_batch,
        }
    }

    pub fn max_batch(&self) -> u32 {
        self.max_batch
    }

    fn entry(&self, chat_id: ChatId) -> Arc<Mutex<SessionCounter>> {
        // Clone the Arc out so the shard lock is released before any await.
        self.sessions
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(SessionCounter::new(self.max_batch))))
            .value()
            .clone()
    }

    /// Locks the chat's counter, creating it at 1 on first use.
    pub async fn lock(&self, chat_id: ChatId) -> OwnedMutexGuard<SessionCounter> {
        self.entry(chat_id).lock_owned().await
    }

    /// Sets the chat's counter back to 1 (the /start command).
    pub async fn reset(&self, chat_id: ChatId) {
        self.lock(chat_id).await.reset();
        log::info!("Session counter reset for chat {}", chat_id);
    }

    /// Current position for the chat (1 for chats never seen)
    pub async fn current(&self, chat_id: ChatId) -> u32 {
        self.lock(chat_id).await.current()
    }

    /// Number of chats with a counter
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_one() {
        let counter = SessionCounter::new(21);
        assert_eq!(counter.current(), 1);
        assert_eq!(counter.next_column(), Column::C);
    }

    #[test]
    fn test_counter_alternates_columns() {
        let mut counter = SessionCounter::new(21);
        let mut columns = Vec::new();
        for _ in 0..4 {
            columns.push(counter.next_column());
            counter.advance();
        }
        assert_eq!(columns, vec![Column::C, Column::D, Column::C, Column::D]);
        assert_eq!(counter.current(), 5);
    }

    #[test]
    fn test_counter_wraps_after_max() {
        let mut counter = SessionCounter::new(21);
        for _ in 0..20 {
            assert_eq!(counter.advance(), Advance::Continue);
        }
        assert_eq!(counter.current(), 21);
        assert_eq!(counter.advance(), Advance::BatchComplete);
        assert_eq!(counter.current(), 1);
    }

    #[test]
    fn test_counter_stays_in_range() {
        let mut counter = SessionCounter::new(3);
        for _ in 0..50 {
            counter.advance();
            assert!((1..=3).contains(&counter.current()));
        }
    }

    #[test]
    fn test_reset_from_any_value() {
        let mut counter = SessionCounter::new(21);
        for _ in 0..13 {
            counter.advance();
        }
        counter.reset();
        assert_eq!(counter.current(), 1);
    }

    #[test]
    fn test_zero_batch_is_one() {
        let mut counter = SessionCounter::new(0);
        assert_eq!(counter.max_batch(), 1);
        assert_eq!(counter.advance(), Advance::BatchComplete);
        assert_eq!(counter.current(), 1);
    }

    #[tokio::test]
    async fn test_store_isolates_chats() {
        let store = SessionStore::new(21);
        store.lock(ChatId(1)).await.advance();
        store.lock(ChatId(1)).await.advance();

        assert_eq!(store.current(ChatId(1)).await, 3);
        assert_eq!(store.current(ChatId(2)).await, 1);
        assert_eq!(store.len(), 2);

        store.reset(ChatId(1)).await;
        assert_eq!(store.current(ChatId(1)).await, 1);
    }

    #[tokio::test]
    async fn test_store_serializes_same_chat() {
        let store = SessionStore::new(21);
        let guard = store.lock(ChatId(7)).await;

        let contender = {
            let store = store.clone();
            tokio::spawn(async move {
                store.lock(ChatId(7)).await.advance();
            })
        };

        tokio::task::yield_now().await;
        assert!(!contender.is_finished());
        drop(guard);
        contender.await.unwrap();

        assert_eq!(store.current(ChatId(7)).await, 2);
    }
}
