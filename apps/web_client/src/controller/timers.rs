//! Deferred actions: notification expiry and the post-download close.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    HideError { serial: u64 },
    RemoveNotice { id: u64 },
    FinishDownload { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub error_dismiss: Duration,
    pub success_dismiss: Duration,
    pub close_after_download: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            error_dismiss: Duration::from_millis(5000),
            success_dismiss: Duration::from_millis(3000),
            close_after_download: Duration::from_millis(1500),
        }
    }
}

/// Ordered by deadline; ties fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Instant, u64), Deferred>,
    seq: u64,
}

impl TimerQueue {
    pub fn schedule(&mut self, at: Instant, action: Deferred) {
        self.seq += 1;
        self.entries.insert((at, self.seq), action);
    }

    pub fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let mut due = Vec::new();
        while let Some(entry) = self.entries.first_entry() {
            if entry.key().0 > now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
