//! Notification feed derivation: self-filtering, deduplication, unread
//! counting, and recency bucketing.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::types::Notification;

// ---------------------------------------------------------------------------
// Feed snapshot
// ---------------------------------------------------------------------------

/// Notifications prepared for feed display, with a derived unread counter.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub visible: Vec<Notification>,
    pub unread_count: usize,
}

impl Feed {
    /// Flip one notification's read flag.
    ///
    /// Idempotent: the counter is decremented only on an unread→read flip;
    /// marking an already-read (or missing) notification is a no-op.
    /// Returns `true` if a flip happened.
    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(notification) = self.visible.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if notification.is_read {
            return false;
        }
        notification.is_read = true;
        // Saturating: a hand-built feed with an inconsistent counter must
        // not panic on underflow.
        self.unread_count = self.unread_count.saturating_sub(1);
        true
    }
}

/// Build a feed snapshot from raw notifications.
///
/// Drops self-authored notifications (a user must never see their own
/// notification echoed back) and duplicates by id (first occurrence wins).
pub fn ingest(notifications: Vec<Notification>, self_user_id: &str) -> Feed {
    let mut seen = HashSet::new();
    let visible: Vec<Notification> = notifications
        .into_iter()
        .filter(|n| n.created_by != self_user_id)
        .filter(|n| seen.insert(n.id.clone()))
        .collect();
    let unread_count = visible.iter().filter(|n| !n.is_read).count();
    Feed {
        visible,
        unread_count,
    }
}

// ---------------------------------------------------------------------------
// Recency bucketing
// ---------------------------------------------------------------------------

/// Named recency partition of the feed, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    Older,
}

impl Bucket {
    /// Fixed iteration order for grouped display.
    pub const ORDER: [Self; 5] = [
        Self::Today,
        Self::Yesterday,
        Self::LastWeek,
        Self::LastMonth,
        Self::Older,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::LastWeek => "Last 7 days",
            Self::LastMonth => "Last 30 days",
            Self::Older => "Older",
        }
    }

    /// Bucket for a creation timestamp, by calendar-day distance from `now`
    /// (not 24h windows). Future-dated timestamps clamp to `Today`.
    fn for_timestamp(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = (now.date_naive() - created_at.date_naive()).num_days();
        match days {
            i64::MIN..=0 => Self::Today,
            1 => Self::Yesterday,
            2..=7 => Self::LastWeek,
            8..=30 => Self::LastMonth,
            _ => Self::Older,
        }
    }
}

/// Partition notifications into recency buckets relative to `now`.
///
/// Buckets iterate in `Bucket::ORDER` regardless of input order; empty
/// buckets are omitted; within a bucket, notifications are newest-first.
pub fn group(
    notifications: &[Notification],
    now: DateTime<Utc>,
) -> IndexMap<Bucket, Vec<Notification>> {
    let mut sorted: Vec<&Notification> = notifications.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut grouped = IndexMap::new();
    for bucket in Bucket::ORDER {
        let members: Vec<Notification> = sorted
            .iter()
            .filter(|n| Bucket::for_timestamp(n.created_at, now) == bucket)
            .map(|n| (*n).clone())
            .collect();
        if !members.is_empty() {
            grouped.insert(bucket, members);
        }
    }
    grouped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
