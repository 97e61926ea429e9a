#![forbid(unsafe_code)]

//! Typed pause/snapshot tracking.
//!
//! Pausing freezes what readers observe for a chosen set of fields while
//! the live values keep changing underneath. Each concrete screen defines
//! a closed key enum for the fields it wants frozen and owns one
//! [`PauseTracker`]; the panel's pause toggle reaches the tracker through
//! [`PanelContent::on_pause_changed`](crate::PanelContent::on_pause_changed).
//!
//! The tracker assumes single-writer semantics: mutations and pause
//! transitions come from the thread that owns the screen's state. It does
//! not add its own locking.
//!
//! Entering pause is the moment to refresh snapshots, in this order:
//!
//! ```
//! use panekit_panel::PauseTracker;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash)]
//! enum Field { Downloaded }
//!
//! let mut tracker: PauseTracker<Field, u64> = PauseTracker::new();
//! tracker.track(Field::Downloaded, 10);
//!
//! // when the panel reports a transition into pause:
//! tracker.capture(Field::Downloaded, 42);
//! tracker.set_paused(true);
//! assert_eq!(tracker.get(Field::Downloaded, &99), Some(&42));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

/// Snapshot buffer for a closed set of tracked fields.
#[derive(Debug, Clone)]
pub struct PauseTracker<K, V> {
    paused: bool,
    since: Option<Instant>,
    buffer: HashMap<K, V>,
}

impl<K: Copy + Eq + Hash, V: Clone> PauseTracker<K, V> {
    /// Create an empty, unpaused tracker.
    pub fn new() -> Self {
        Self {
            paused: false,
            since: None,
            buffer: HashMap::new(),
        }
    }

    /// Begin tracking a field, snapshotting its current value immediately.
    pub fn track(&mut self, key: K, current: V) {
        self.buffer.insert(key, current);
    }

    /// Whether a field is tracked.
    pub fn is_tracked(&self, key: K) -> bool {
        self.buffer.contains_key(&key)
    }

    /// Refresh a tracked field's snapshot. No-op for untracked fields.
    pub fn capture(&mut self, key: K, current: V) {
        if let Some(slot) = self.buffer.get_mut(&key) {
            *slot = current;
        }
    }

    /// Toggle the pause flag, recording the instant of pause on entry.
    ///
    /// Returns whether a transition occurred. Callers refresh snapshots
    /// with [`capture`](Self::capture) before pausing so readers see the
    /// values from the moment pause began.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if paused == self.paused {
            return false;
        }
        if paused {
            self.since = Some(Instant::now());
        }
        self.paused = paused;
        true
    }

    /// Whether reads are currently frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// When pause last began. `None` if never paused.
    pub fn pause_time(&self) -> Option<Instant> {
        self.since
    }

    /// Read a field through the pause discipline.
    ///
    /// Untracked fields read as `None`. Tracked fields read the snapshot
    /// while paused and the caller-supplied live value otherwise.
    pub fn get<'a>(&'a self, key: K, live: &'a V) -> Option<&'a V> {
        if !self.is_tracked(key) {
            None
        } else if self.paused {
            self.buffer.get(&key)
        } else {
            Some(live)
        }
    }
}

impl<K: Copy + Eq + Hash, V: Clone> Default for PauseTracker<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
