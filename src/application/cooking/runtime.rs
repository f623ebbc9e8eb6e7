//! The task that owns the cooking session.
//!
//! `SessionRuntime::spawn` moves a `SessionController` into one tokio task.
//! User commands arrive over a bounded channel and ticks over an unbounded
//! one; the task applies them one at a time, publishes the resulting events
//! and broadcasts the new state. Nothing else ever touches the controller.
//!
//! The tick source runs only while the session is running. Each start gets
//! a fresh generation number, and ticks from an older generation that were
//! already queued when the source was stopped are dropped on arrival. A
//! tick stamped before the session's baseline was last moved (by a command
//! served ahead of it) is dropped as well.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use super::handle::{SessionCommand, SessionHandle};
use crate::domain::foundation::{CommandMetadata, EventEnvelope, RecipeId};
use crate::domain::session::{SessionController, SessionError, SessionState, Transition};
use crate::ports::{
    Clock, EventPublisher, RecipeRepository, Tick, TickHandle, TickSink, TickSource,
};

/// Pending user commands before senders wait.
const COMMAND_BUFFER: usize = 32;

/// Dependencies of the session runtime.
pub struct SessionRuntime {
    repository: Arc<dyn RecipeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    tick_source: Arc<dyn TickSource>,
}

impl SessionRuntime {
    pub fn new(
        repository: Arc<dyn RecipeRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        tick_source: Arc<dyn TickSource>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            clock,
            tick_source,
        }
    }

    /// Spawns the runtime task on the current tokio runtime.
    pub fn spawn(self) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState::NoSession);

        let actor = SessionActor::new(self, tick_tx, state_tx);
        tokio::spawn(actor.run(command_rx, tick_rx));

        SessionHandle::new(command_tx, state_rx)
    }
}

struct SessionActor {
    controller: SessionController,
    repository: Arc<dyn RecipeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    tick_source: Arc<dyn TickSource>,
    tick_sink: TickSink,
    generation: u64,
    ticker: Option<TickHandle>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionActor {
    fn new(
        runtime: SessionRuntime,
        tick_sink: TickSink,
        state_tx: watch::Sender<SessionState>,
    ) -> Self {
        Self {
            controller: SessionController::new(),
            repository: runtime.repository,
            event_publisher: runtime.event_publisher,
            clock: runtime.clock,
            tick_source: runtime.tick_source,
            tick_sink,
            generation: 0,
            ticker: None,
            state_tx,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut ticks: mpsc::UnboundedReceiver<Tick>,
    ) {
        info!("Session runtime started");

        loop {
            tokio::select! {
                // User input wins over a tick that is ready at the same time.
                biased;

                command = commands.recv() => match command {
                    Some(SessionCommand::Shutdown { reply }) => {
                        self.stop_ticker();
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },

                Some(tick) = ticks.recv() => self.handle_tick(tick).await,
            }
        }

        self.stop_ticker();
        info!("Session runtime stopped");
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        debug!(command = command.name(), "Session command");
        let now = self.clock.now();

        match command {
            SessionCommand::Start { recipe_id, reply } => {
                let result = self.start(recipe_id).await;
                let _ = reply.send(result);
            }
            SessionCommand::Pause { reply } => {
                let transition = self.controller.pause(now);
                self.apply(transition, "pause").await;
                let _ = reply.send(self.controller.state().clone());
            }
            SessionCommand::Resume { reply } => {
                let transition = self.controller.resume(now);
                self.apply(transition, "resume").await;
                let _ = reply.send(self.controller.state().clone());
            }
            SessionCommand::EndStep { reply } => {
                let transition = self.controller.end_step(now);
                self.apply(transition, "end_step").await;
                let _ = reply.send(self.controller.state().clone());
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(self.controller.state().clone());
            }
            // Handled by the run loop.
            SessionCommand::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    async fn start(&mut self, recipe_id: RecipeId) -> Result<SessionState, SessionError> {
        // Conflict is reported before the lookup, even for unknown ids.
        if let Some(active) = self.controller.active() {
            warn!(
                requested = %recipe_id,
                active = %active.recipe_id(),
                "Start rejected, session already active"
            );
            return Err(SessionError::conflict(active.recipe_id().clone()));
        }

        let recipe = self
            .repository
            .find_by_id(&recipe_id)
            .await?
            .ok_or_else(|| SessionError::recipe_not_found(recipe_id.clone()))?;

        let transition = self.controller.start(Arc::new(recipe), self.clock.now())?;
        self.apply(transition, "start").await;
        Ok(self.controller.state().clone())
    }

    async fn handle_tick(&mut self, tick: Tick) {
        if tick.generation != self.generation || self.ticker.is_none() {
            debug!(
                tick_generation = tick.generation,
                current_generation = self.generation,
                "Discarding stale tick"
            );
            return;
        }

        let baseline = self
            .controller
            .active()
            .and_then(|active| active.progress().last_tick_at);
        if let Some(baseline) = baseline {
            if tick.at.is_before(&baseline) {
                debug!(
                    tick_at = %tick.at.as_datetime(),
                    baseline = %baseline.as_datetime(),
                    "Discarding tick older than baseline"
                );
                return;
            }
        }

        let transition = self.controller.tick(tick.at);
        self.apply(transition, "tick").await;
    }

    /// Publishes events, syncs the tick source and broadcasts the state.
    async fn apply(&mut self, transition: Transition, source: &str) {
        let Transition { state, events } = transition;

        if !events.is_empty() {
            let metadata = CommandMetadata::new().with_source(format!("runtime.{}", source));
            let envelopes: Vec<EventEnvelope> = events
                .iter()
                .filter_map(|event| match event.to_envelope() {
                    Ok(envelope) => Some(metadata.stamp(envelope)),
                    Err(e) => {
                        error!(
                            recipe_id = %event.recipe_id(),
                            error = %e,
                            "Failed to serialize session event"
                        );
                        None
                    }
                })
                .collect();

            // State has already moved on; a failed publish is reported, not undone.
            if let Err(e) = self.event_publisher.publish_all(envelopes).await {
                warn!(error = %e, source, "Failed to publish session events");
            }
        }

        self.sync_ticker(state.is_running());

        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    fn sync_ticker(&mut self, running: bool) {
        match (running, self.ticker.is_some()) {
            (true, false) => {
                self.generation += 1;
                let handle = self
                    .tick_source
                    .start(self.generation, self.tick_sink.clone());
                debug!(generation = self.generation, "Tick source started");
                self.ticker = Some(handle);
            }
            (false, true) => self.stop_ticker(),
            _ => {}
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.stop();
            debug!(generation = self.generation, "Tick source stopped");
        }
    }
}
