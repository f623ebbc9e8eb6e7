//! Tokio interval tick source.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

use crate::ports::{Clock, Tick, TickHandle, TickSink, TickSource, TICK_PERIOD};

/// Emits a tick every second, stamped with the clock's time.
///
/// The first tick fires one period after `start`. Missed ticks are
/// skipped rather than bursted; the session catches up from timestamps.
pub struct IntervalTickSource {
    period: Duration,
    clock: Arc<dyn Clock>,
}

impl IntervalTickSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_period(TICK_PERIOD, clock)
    }

    fn with_period(period: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { period, clock }
    }
}

impl TickSource for IntervalTickSource {
    fn start(&self, generation: u64, sink: TickSink) -> TickHandle {
        let period = self.period;
        let clock = Arc::clone(&self.clock);

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let tick = Tick {
                    generation,
                    at: clock.now(),
                };
                trace!(generation, "Tick");
                if sink.send(tick).is_err() {
                    // Receiver gone; nobody is cooking any more.
                    break;
                }
            }
        });

        TickHandle::new(move || task.abort())
    }
}
