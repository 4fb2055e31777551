//! In-memory implementation of `NotificationSink`.
//!
//! `InMemoryNotifier` keeps every notice in a `Vec` behind an
//! `Arc<Mutex<_>>`. Clones share the same log, so a session can record
//! notices while the caller holding another clone inspects or dismisses them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use medicall_contracts::notice::{Notice, NoticeVariant};
use medicall_core::{clock::SystemClock, traits::{Clock, NotificationSink}};

use crate::event::{NoticeEvent, NoticeLog};

// ── Internal mutable state ────────────────────────────────────────────────────

struct NotifierState {
    /// All notices recorded so far, in append order.
    events: Vec<NoticeEvent>,

    /// The next sequence number to assign.
    sequence: u64,
}

// ── Public notifier ───────────────────────────────────────────────────────────

/// An append-only, in-memory toast log.
#[derive(Clone)]
pub struct InMemoryNotifier {
    session: String,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<NotifierState>>,
}

impl InMemoryNotifier {
    pub fn new(session: impl Into<String>) -> Self {
        Self::with_clock(session, Arc::new(SystemClock))
    }

    /// A notifier that timestamps notices from `clock`.
    pub fn with_clock(session: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session: session.into(),
            clock,
            state: Arc::new(Mutex::new(NotifierState {
                events: Vec::new(),
                sequence: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NotifierState> {
        // A poisoned lock still holds a consistent log: every push completes
        // before the guard is released.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark the notice with `sequence` as dismissed.
    ///
    /// Returns false if no such notice exists or it was already dismissed.
    pub fn dismiss(&self, sequence: u64) -> bool {
        let mut state = self.lock();
        match state.events.iter_mut().find(|e| e.sequence == sequence) {
            Some(event) if !event.dismissed => {
                event.dismissed = true;
                debug!(session = %self.session, sequence, "notice dismissed");
                true
            }
            _ => false,
        }
    }

    /// Snapshot of every recorded notice.
    pub fn events(&self) -> Vec<NoticeEvent> {
        self.lock().events.clone()
    }

    /// The most recently recorded notice.
    pub fn last(&self) -> Option<NoticeEvent> {
        self.lock().events.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export the whole log for this session.
    pub fn export_log(&self) -> NoticeLog {
        NoticeLog {
            session: self.session.clone(),
            events: self.events(),
            exported_at: self.clock.now(),
        }
    }

    /// The exported log as pretty-printed JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export_log())
    }
}

// ── NotificationSink impl ─────────────────────────────────────────────────────

impl NotificationSink for InMemoryNotifier {
    fn notify(&self, notice: Notice) -> u64 {
        let created_at = self.clock.now();
        let mut state = self.lock();
        let sequence = state.sequence;

        match notice.variant {
            NoticeVariant::Destructive => info!(
                session = %self.session,
                sequence,
                title = %notice.title,
                description = %notice.description,
                "destructive notice"
            ),
            NoticeVariant::Default => debug!(
                session = %self.session,
                sequence,
                title = %notice.title,
                "notice"
            ),
        }

        state.events.push(NoticeEvent {
            sequence,
            notice,
            dismissed: false,
            created_at,
        });
        state.sequence += 1;
        sequence
    }
}
