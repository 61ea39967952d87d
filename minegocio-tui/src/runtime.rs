//! Effect execution.
//!
//! [`Runtime`] runs each effect on its own tokio task and reports back over the
//! event channel, so all state mutation stays on the UI task. [`run_inline`]
//! executes effects on the current task until none remain.

use crate::commands::{execute, Command};
use crate::events::TuiEvent;
use crate::state::{ClientesState, Effect};
use minegocio_core::ClientesApi;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct Runtime {
    api: Arc<dyn ClientesApi>,
    sender: mpsc::Sender<TuiEvent>,
}

impl Runtime {
    pub fn new(api: Arc<dyn ClientesApi>, sender: mpsc::Sender<TuiEvent>) -> Self {
        Self { api, sender }
    }

    /// Drain and spawn every pending effect of `state`.
    pub fn dispatch(&self, state: &mut ClientesState) {
        for effect in state.take_effects() {
            self.spawn(effect);
        }
    }

    fn spawn(&self, effect: Effect) {
        match effect {
            Effect::Call(command) => self.spawn_call(command),
            Effect::ExpireNotification { generation, after } => {
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = sender.send(TuiEvent::NotificationExpired(generation)).await;
                });
            }
        }
    }

    fn spawn_call(&self, command: Command) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        let action = command.label();
        tokio::spawn(async move {
            let task = tokio::spawn(async move { execute(api.as_ref(), command).await });
            let event = match task.await {
                Ok(outcome) => TuiEvent::Outcome(Box::new(outcome)),
                Err(err) => {
                    tracing::error!(action, error = %err, "call task failed");
                    TuiEvent::TaskFailed {
                        action,
                        message: err.to_string(),
                    }
                }
            };
            let _ = sender.send(event).await;
        });
    }
}

/// Execute queued calls on the current task, applying each outcome before the
/// next one runs, until the state queues no more calls. Notification expiries
/// are dropped so the last message stays observable. Returns the number of
/// calls executed.
pub async fn run_inline(state: &mut ClientesState, api: &dyn ClientesApi) -> usize {
    let mut executed = 0;
    while state.has_pending_effects() {
        for effect in state.take_effects() {
            if let Effect::Call(command) = effect {
                let outcome = execute(api, command).await;
                state.apply(outcome);
                executed += 1;
            }
        }
    }
    executed
}
