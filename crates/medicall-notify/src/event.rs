//! Recorded notification types.
//!
//! `NoticeEvent` is one toast as it was shown: the `Notice` content plus its
//! position in the session's log and whether the user has dismissed it.
//! `NoticeLog` is the exported, serializable form of a whole session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medicall_contracts::notice::{Notice, NoticeVariant};

/// A single recorded notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeEvent {
    /// Monotonically increasing position in the log, starting at 0.
    pub sequence: u64,

    #[serde(flatten)]
    pub notice: Notice,

    /// Set once the user closes the toast. Dismissed events stay in the log.
    #[serde(default)]
    pub dismissed: bool,

    pub created_at: DateTime<Utc>,
}

impl NoticeEvent {
    pub fn is_destructive(&self) -> bool {
        self.notice.variant == NoticeVariant::Destructive
    }
}

/// All notifications recorded for one session, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeLog {
    pub session: String,
    pub events: Vec<NoticeEvent>,
    pub exported_at: DateTime<Utc>,
}

impl NoticeLog {
    /// Events the user has not dismissed.
    pub fn active(&self) -> impl Iterator<Item = &NoticeEvent> {
        self.events.iter().filter(|e| !e.dismissed)
    }

    /// The most recent event with the given title, if any.
    pub fn last_titled(&self, title: &str) -> Option<&NoticeEvent> {
        self.events.iter().rev().find(|e| e.notice.title == title)
    }
}
