use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Counts the sessions a gateway has open.
///
/// Sessions are only ever handed out as [`SessionGuard`]s, so the count drops
/// back on every exit path: normal return, `?` propagation, a timed-out
/// future being dropped, or a panic unwinding through the handler.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    open: Arc<AtomicUsize>,
    acquired: Arc<AtomicU64>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> SessionGuard {
        let id = self.acquired.fetch_add(1, Ordering::Relaxed) + 1;
        let open = self.open.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(session = id, open, "session acquired");

        SessionGuard {
            id,
            open: Arc::clone(&self.open),
        }
    }

    /// Sessions currently held.
    pub fn open(&self) -> usize {
        self.open.load(Ordering::Acquire)
    }

    /// Sessions handed out since startup.
    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::Relaxed)
    }
}

/// A live session. Released on drop.
#[derive(Debug)]
pub struct SessionGuard {
    id: u64,
    open: Arc<AtomicUsize>,
}

impl SessionGuard {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let open = self.open.fetch_sub(1, Ordering::AcqRel) - 1;
        debug!(session = self.id, open, "session released");
    }
}
