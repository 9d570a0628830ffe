//! Background Autosave Processor
//!
//! Persists the outline after the editor goes quiet:
//! - Every scheduled outline replaces the pending one (last write wins)
//! - Each schedule restarts the idle timer; the save happens once the
//!   debounce window passes without new edits
//! - `flush()` writes pending state immediately, `shutdown()` flushes and stops
//!
//! ## Event-Driven Model
//!
//! The task sleeps on its command channel while nothing is pending, so an idle
//! session costs nothing. Rapid edits (dragging a chapter through a long list,
//! typing) collapse into a single write.

use crate::db::OutlineStore;
use crate::models::Outline;
use crate::services::error::AutosaveError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

enum AutosaveCommand {
    Schedule(Outline),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable handle for scheduling saves
///
/// Held by the session; scheduling never blocks the caller.
#[derive(Clone)]
pub struct AutosaveHandle {
    command_tx: mpsc::UnboundedSender<AutosaveCommand>,
}

impl AutosaveHandle {
    /// Queue `outline` for saving, replacing anything still pending
    pub fn schedule(&self, outline: Outline) {
        if self
            .command_tx
            .send(AutosaveCommand::Schedule(outline))
            .is_err()
        {
            tracing::warn!("Autosave processor has shut down, save dropped");
        }
    }

    /// Write any pending outline now and wait for the write to finish
    pub async fn flush(&self) -> Result<(), AutosaveError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.command_tx
            .send(AutosaveCommand::Flush(ack_tx))
            .map_err(|_| AutosaveError::ProcessorStopped)?;
        ack_rx.await.map_err(|_| AutosaveError::ProcessorStopped)
    }
}

/// Debounced, last-write-wins persistence task
pub struct AutosaveProcessor {
    handle: AutosaveHandle,
    task: JoinHandle<()>,
}

impl AutosaveProcessor {
    /// Spawn the background task on the current tokio runtime
    ///
    /// # Arguments
    /// * `store` - Destination for saved outlines
    /// * `debounce` - Quiet period after the last schedule before writing
    pub fn spawn(store: Arc<dyn OutlineStore>, debounce: Duration) -> Self {
        tracing::info!(
            "Autosave processor starting (debounce {}ms)",
            debounce.as_millis()
        );

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Self::run(store, debounce, command_rx));

        Self {
            handle: AutosaveHandle { command_tx },
            task,
        }
    }

    pub fn handle(&self) -> AutosaveHandle {
        self.handle.clone()
    }

    /// Flush pending work and stop the task
    pub async fn shutdown(self) -> Result<(), AutosaveError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self
            .handle
            .command_tx
            .send(AutosaveCommand::Shutdown(ack_tx))
            .is_ok()
        {
            let _ = ack_rx.await;
        }
        self.task.await.map_err(|e| AutosaveError::TaskFailed(e.to_string()))
    }

    async fn run(
        store: Arc<dyn OutlineStore>,
        debounce: Duration,
        mut command_rx: mpsc::UnboundedReceiver<AutosaveCommand>,
    ) {
        let mut pending: Option<Outline> = None;

        loop {
            let command = if pending.is_some() {
                tokio::select! {
                    biased; // New edits restart the idle timer

                    command = command_rx.recv() => command,

                    _ = tokio::time::sleep(debounce) => {
                        Self::write(&store, pending.take()).await;
                        continue;
                    }
                }
            } else {
                command_rx.recv().await
            };

            match command {
                Some(AutosaveCommand::Schedule(outline)) => {
                    if pending.replace(outline).is_some() {
                        tracing::trace!("Autosave superseded pending outline");
                    }
                }
                Some(AutosaveCommand::Flush(ack)) => {
                    Self::write(&store, pending.take()).await;
                    let _ = ack.send(());
                }
                Some(AutosaveCommand::Shutdown(ack)) => {
                    Self::write(&store, pending.take()).await;
                    let _ = ack.send(());
                    tracing::info!("Autosave processor shutting down");
                    break;
                }
                None => {
                    // Every handle dropped
                    Self::write(&store, pending.take()).await;
                    break;
                }
            }
        }
    }

    async fn write(store: &Arc<dyn OutlineStore>, outline: Option<Outline>) {
        let Some(outline) = outline else {
            return;
        };
        match store.save(&outline).await {
            Ok(()) => tracing::debug!("Autosaved {} outline nodes", outline.len()),
            Err(e) => tracing::warn!("Autosave failed: {}", e),
        }
    }
}
