//! Client side of the session runtime.

use tokio::sync::{mpsc, oneshot, watch};

use crate::domain::foundation::RecipeId;
use crate::domain::session::{SessionError, SessionState};

/// Requests understood by the runtime task.
pub(crate) enum SessionCommand {
    Start {
        recipe_id: RecipeId,
        reply: oneshot::Sender<Result<SessionState, SessionError>>,
    },
    Pause {
        reply: oneshot::Sender<SessionState>,
    },
    Resume {
        reply: oneshot::Sender<SessionState>,
    },
    EndStep {
        reply: oneshot::Sender<SessionState>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionState>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

impl SessionCommand {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            SessionCommand::Start { .. } => "start",
            SessionCommand::Pause { .. } => "pause",
            SessionCommand::Resume { .. } => "resume",
            SessionCommand::EndStep { .. } => "end_step",
            SessionCommand::Snapshot { .. } => "snapshot",
            SessionCommand::Shutdown { .. } => "shutdown",
        }
    }
}

/// Cloneable handle to a running session runtime.
///
/// Every method returns the session state as it stood right after the
/// command was applied. Once the runtime has stopped, every call fails
/// with `SessionError::RuntimeUnavailable`.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<SessionCommand>,
        state: watch::Receiver<SessionState>,
    ) -> Self {
        Self { commands, state }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SessionError::RuntimeUnavailable)?;
        response.await.map_err(|_| SessionError::RuntimeUnavailable)
    }

    /// Starts cooking the stored recipe `recipe_id`.
    ///
    /// # Errors
    ///
    /// - `SessionError::Conflict` if a session is already active
    /// - `SessionError::RecipeNotFound` if no such recipe is stored
    pub async fn start(&self, recipe_id: RecipeId) -> Result<SessionState, SessionError> {
        self.request(|reply| SessionCommand::Start { recipe_id, reply })
            .await?
    }

    pub async fn pause(&self) -> Result<SessionState, SessionError> {
        self.request(|reply| SessionCommand::Pause { reply }).await
    }

    pub async fn resume(&self) -> Result<SessionState, SessionError> {
        self.request(|reply| SessionCommand::Resume { reply }).await
    }

    pub async fn end_step(&self) -> Result<SessionState, SessionError> {
        self.request(|reply| SessionCommand::EndStep { reply }).await
    }

    /// Current state, ordered after every command sent before it.
    pub async fn snapshot(&self) -> Result<SessionState, SessionError> {
        self.request(|reply| SessionCommand::Snapshot { reply }).await
    }

    /// Last state the runtime broadcast, without a round trip.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change, ticks included.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Stops the runtime and its tick source.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Shutdown { reply }).await
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.commands.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_runtime_is_unavailable() {
        let (commands, receiver) = mpsc::channel(1);
        let (_state_tx, state) = watch::channel(SessionState::NoSession);
        drop(receiver);
        let handle = SessionHandle::new(commands, state);

        assert_eq!(handle.pause().await, Err(SessionError::RuntimeUnavailable));
        assert_eq!(
            handle.start(RecipeId::new("demo-1").unwrap()).await,
            Err(SessionError::RuntimeUnavailable)
        );
    }

    #[tokio::test]
    async fn dropped_reply_is_unavailable() {
        let (commands, mut receiver) = mpsc::channel(1);
        let (_state_tx, state) = watch::channel(SessionState::NoSession);
        let handle = SessionHandle::new(commands, state);

        tokio::spawn(async move {
            // Accept the request but never answer it.
            let command = receiver.recv().await;
            drop(command);
        });

        assert_eq!(handle.snapshot().await, Err(SessionError::RuntimeUnavailable));
    }

    #[test]
    fn current_reads_last_broadcast() {
        let (commands, _receiver) = mpsc::channel(1);
        let (_state_tx, state) = watch::channel(SessionState::NoSession);
        let handle = SessionHandle::new(commands, state);
        assert_eq!(handle.current(), SessionState::NoSession);
    }
}
