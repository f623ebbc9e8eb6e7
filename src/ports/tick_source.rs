//! Tick source port - the once-per-second heartbeat of a running session.
//!
//! A tick source is started when a session begins running and stopped when
//! it pauses or ends. Each run is tagged with a generation number so the
//! consumer can discard ticks that were already queued when it stopped.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::domain::foundation::Timestamp;

/// Period of every tick source.
///
/// The session charges at least one whole second per tick and truncates
/// sub-second remainders, so the countdown only keeps pace with wall time
/// when ticks arrive once per second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation the emitting run was started with.
    pub generation: u64,
    /// Wall-clock time the tick was produced.
    pub at: Timestamp,
}

/// Where ticks are delivered.
pub type TickSink = mpsc::UnboundedSender<Tick>;

/// Stops a running tick source when stopped or dropped.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn stop(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Port for starting heartbeats.
pub trait TickSource: Send + Sync {
    /// Begin delivering ticks tagged with `generation` into `sink` until
    /// the returned handle is stopped or dropped.
    fn start(&self, generation: u64, sink: TickSink) -> TickHandle;
}
