//! Tick source driven by hand, for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::Timestamp;
use crate::ports::{Tick, TickHandle, TickSink, TickSource};

#[derive(Default)]
struct Slot {
    current: Option<(u64, TickSink)>,
    starts: usize,
}

/// Delivers ticks only when `fire` is called.
///
/// Cloning shares the same slot, so a test can keep one clone and hand
/// the other to the runtime.
#[derive(Clone, Default)]
pub struct ManualTickSource {
    slot: Arc<Mutex<Slot>>,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Sends one tick stamped `at`. Returns false if no run is active.
    pub fn fire(&self, at: Timestamp) -> bool {
        match &self.slot().current {
            Some((generation, sink)) => sink
                .send(Tick {
                    generation: *generation,
                    at,
                })
                .is_ok(),
            None => false,
        }
    }

    /// True while a run is started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.slot().current.is_some()
    }

    /// Generation of the active run.
    pub fn generation(&self) -> Option<u64> {
        self.slot().current.as_ref().map(|(g, _)| *g)
    }

    /// How many runs have been started so far.
    pub fn starts(&self) -> usize {
        self.slot().starts
    }
}

impl TickSource for ManualTickSource {
    fn start(&self, generation: u64, sink: TickSink) -> TickHandle {
        {
            let mut slot = self.slot();
            slot.current = Some((generation, sink));
            slot.starts += 1;
        }

        let shared = Arc::clone(&self.slot);
        TickHandle::new(move || {
            let mut slot = shared.lock().unwrap_or_else(|p| p.into_inner());
            // A newer run may already own the slot.
            if matches!(slot.current, Some((g, _)) if g == generation) {
                slot.current = None;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn fire_delivers_only_while_started() {
        let source = ManualTickSource::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(!source.fire(Timestamp::from_unix_secs(1)));

        let handle = source.start(3, tx);
        assert!(source.fire(Timestamp::from_unix_secs(2)));
        assert_eq!(
            rx.recv().await.unwrap(),
            Tick {
                generation: 3,
                at: Timestamp::from_unix_secs(2)
            }
        );

        handle.stop();
        assert!(!source.is_running());
        assert!(!source.fire(Timestamp::from_unix_secs(3)));
    }

    #[test]
    fn stopping_stale_handle_keeps_newer_run() {
        let source = ManualTickSource::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let old = source.start(1, tx.clone());
        let _new = source.start(2, tx);
        old.stop();

        assert_eq!(source.generation(), Some(2));
        assert_eq!(source.starts(), 2);
    }
}
