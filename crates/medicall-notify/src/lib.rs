//! # medicall-notify
//!
//! Append-only, toast-style notification log for MEDICALL sessions.
//!
//! ## Overview
//!
//! Every user-visible outcome of a session (item added, cart cleared,
//! checkout blocked, a simulated service failing) is recorded as a
//! `NoticeEvent` with a sequence number and timestamp. Notices can be
//! dismissed but never removed, so the exported log is a complete record of
//! what the user was told.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medicall_notify::InMemoryNotifier;
//! use medicall_core::traits::NotificationSink;
//!
//! let notifier = InMemoryNotifier::new("session-1");
//! let seq = notifier.notify(Notice::info("Cart Cleared", "All items removed."));
//! notifier.dismiss(seq);
//! let log = notifier.export_log();
//! ```

pub mod event;
pub mod memory;

pub use event::{NoticeEvent, NoticeLog};
pub use memory::InMemoryNotifier;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use chrono::{Duration, TimeZone, Utc};

    use medicall_contracts::notice::{Notice, NoticeVariant};
    use medicall_core::{clock::FixedClock, traits::NotificationSink};

    use super::{InMemoryNotifier, NoticeLog};

    /// Sequence numbers start at 0 and increase by one per notice.
    #[test]
    fn test_sequence_is_monotonic() {
        let notifier = InMemoryNotifier::new("seq");
        let a = notifier.notify(Notice::info("Added to Cart!", "Gauze Pads added."));
        let b = notifier.notify(Notice::info("Item Removed", "Gauze Pads removed."));
        let c = notifier.notify(Notice::destructive("Cart is Empty", "Add items first."));

        assert_eq!((a, b, c), (0, 1, 2));
        let sequences: Vec<u64> = notifier.events().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    /// Variants are recorded as given.
    #[test]
    fn test_variant_is_preserved() {
        let notifier = InMemoryNotifier::new("variant");
        notifier.notify(Notice::destructive("Error", "Could not load products."));

        let last = notifier.last().unwrap();
        assert_eq!(last.notice.variant, NoticeVariant::Destructive);
        assert!(last.is_destructive());
        assert!(!last.dismissed);
    }

    /// Dismissing marks the event but keeps it in the log; a second dismiss
    /// and an unknown sequence both report false.
    #[test]
    fn test_dismiss() {
        let notifier = InMemoryNotifier::new("dismiss");
        let seq = notifier.notify(Notice::info("Order Placed!", "Order MEDICALL-1 placed."));
        notifier.notify(Notice::info("Cart Cleared", "All items removed."));

        assert!(notifier.dismiss(seq));
        assert!(!notifier.dismiss(seq));
        assert!(!notifier.dismiss(99));

        let log = notifier.export_log();
        assert_eq!(log.events.len(), 2);
        assert!(log.events[0].dismissed);
        assert_eq!(log.active().count(), 1);
    }

    /// Clones share one log.
    #[test]
    fn test_clones_share_state() {
        let notifier = InMemoryNotifier::new("shared");
        let clone = notifier.clone();

        clone.notify(Notice::info("Added to Cart!", "x"));

        assert_eq!(notifier.len(), 1);
        assert!(notifier.dismiss(0));
        assert!(clone.events()[0].dismissed);
    }

    /// Timestamps come from the configured clock.
    #[test]
    fn test_created_at_uses_clock() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let notifier = InMemoryNotifier::with_clock("clock", clock.clone());

        notifier.notify(Notice::info("first", ""));
        clock.advance(Duration::seconds(30));
        notifier.notify(Notice::info("second", ""));

        let events = notifier.events();
        assert_eq!(events[0].created_at, start);
        assert_eq!(events[1].created_at, start + Duration::seconds(30));
    }

    /// Concurrent writers never reuse a sequence number.
    #[test]
    fn test_concurrent_notify() {
        let notifier = InMemoryNotifier::new("threads");
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let n = notifier.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        n.notify(Notice::info(format!("t{t}"), format!("{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut sequences: Vec<u64> = notifier.events().iter().map(|e| e.sequence).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (0..100).collect::<Vec<u64>>());
    }

    /// The exported JSON flattens the notice fields into each event.
    #[test]
    fn test_export_json() {
        let notifier = InMemoryNotifier::new("json");
        notifier.notify(Notice::destructive("Cart is Empty", "Add items first."));

        let json = notifier.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let event = &value["events"][0];

        assert_eq!(value["session"], "json");
        assert_eq!(event["title"], "Cart is Empty");
        assert_eq!(event["variant"], "destructive");
        assert_eq!(event["sequence"], 0);

        let parsed: NoticeLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.last_titled("Cart is Empty").unwrap().sequence, 0);
    }
}
