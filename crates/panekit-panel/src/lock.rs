#![forbid(unsafe_code)]

//! The global draw lock.
//!
//! The terminal layer is not safe for concurrent access, and concurrency
//! bugs there produce especially sinister glitches. Every panel redraw
//! therefore runs under one shared, reentrant lock. The lock is
//! constructed once by the embedding program and injected into every
//! panel; it is a value you pass around, not a hidden global.
//!
//! The lock also carries the modal-input-capture flag. While a panel runs
//! a blocking text field it owns the terminal's full attention without
//! holding the draw lock itself; redraws are suppressed by this explicit
//! flag instead (checked at every redraw entry point). Only one capture
//! guard is expected to be alive at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

#[derive(Debug)]
struct LockState {
    mutex: ReentrantMutex<()>,
    input_captured: AtomicBool,
}

/// Shared handle to the process-wide draw lock.
///
/// Clones refer to the same underlying lock.
#[derive(Debug, Clone)]
pub struct DrawLock {
    state: Arc<LockState>,
}

/// RAII guard for exclusive terminal drawing rights.
///
/// Dropping the guard releases the lock, so it is released on every exit
/// path out of a redraw, including a panicking draw callback.
#[must_use]
pub struct DrawGuard<'a> {
    _guard: ReentrantMutexGuard<'a, ()>,
}

/// RAII guard marking a modal input session.
///
/// While alive, every `redraw` call in the process is a silent no-op.
#[must_use]
pub struct InputCaptureGuard {
    state: Arc<LockState>,
}

impl Drop for InputCaptureGuard {
    fn drop(&mut self) {
        self.state.input_captured.store(false, Ordering::Release);
    }
}

impl DrawLock {
    /// Create a fresh lock. Call once per terminal session and clone the
    /// handle into each panel.
    pub fn new() -> Self {
        Self {
            state: Arc::new(LockState {
                mutex: ReentrantMutex::new(()),
                input_captured: AtomicBool::new(false),
            }),
        }
    }

    /// Acquire the lock, waiting as long as it takes.
    pub fn acquire(&self) -> DrawGuard<'_> {
        DrawGuard {
            _guard: self.state.mutex.lock(),
        }
    }

    /// Acquire the lock only if it is immediately available.
    ///
    /// `None` is not an error: the caller simply skips this redraw cycle
    /// and tries again on the next one.
    pub fn try_acquire(&self) -> Option<DrawGuard<'_>> {
        self.state
            .mutex
            .try_lock()
            .map(|guard| DrawGuard { _guard: guard })
    }

    /// Mark the terminal as owned by a modal input session.
    pub fn capture_input(&self) -> InputCaptureGuard {
        self.state.input_captured.store(true, Ordering::Release);
        InputCaptureGuard {
            state: Arc::clone(&self.state),
        }
    }

    /// True while a modal input session is running.
    pub fn is_input_captured(&self) -> bool {
        self.state.input_captured.load(Ordering::Acquire)
    }
}

impl Default for DrawLock {
    fn default() -> Self {
        Self::new()
    }
}
