//! Controller layer: console events, reducer state transitions, and command orchestration.

pub mod commands;
pub mod events;
pub mod orchestration;
pub mod reducer;

use anyhow::{Context, Result};
use client_core::{ExecutorError, InFlightGuard, OperationExecutor, Transport};
use shared::error::InputError;
use tracing::{info, warn};

use crate::{prompt::Confirmer, state::AppState};
use commands::Command;
use events::ConsoleEvent;
use orchestration::{plan, Intent};
use reducer::reduce;

/// What happened to one dispatched intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The request went out; `ok` mirrors the HTTP outcome.
    Completed { ok: bool },
    /// Local validation failed; nothing was sent.
    Rejected,
    /// The operator declined the confirmation prompt, or it could not be read.
    Declined,
    /// Another operation still holds the in-flight token.
    Busy { active: String },
}

pub struct Controller<T, C> {
    state: AppState,
    executor: OperationExecutor<T>,
    confirmer: C,
}

impl<T: Transport, C: Confirmer> Controller<T, C> {
    pub fn new(state: AppState, transport: T, confirmer: C) -> Self {
        Self::with_guard(state, transport, confirmer, InFlightGuard::new())
    }

    pub fn with_guard(state: AppState, transport: T, confirmer: C, guard: InFlightGuard) -> Self {
        Self {
            state,
            executor: OperationExecutor::with_guard(transport, guard),
            confirmer,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Local edits that never touch the network.
    pub fn apply(&mut self, event: ConsoleEvent) {
        reduce(&mut self.state, event);
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Result<Dispatch> {
        let command = match plan(&self.state, &intent) {
            Ok(command) => command,
            Err(error) => {
                reduce(
                    &mut self.state,
                    ConsoleEvent::Rejected {
                        title: intent.title().to_string(),
                        error,
                    },
                );
                return Ok(Dispatch::Rejected);
            }
        };

        if let Some(prompt) = command.confirmation() {
            match self.confirmer.confirm(&prompt) {
                Ok(true) => {}
                Ok(false) => {
                    info!(command = %command.label(), "operation declined by operator");
                    return Ok(Dispatch::Declined);
                }
                // An unanswerable prompt counts as "no"; the session keeps going.
                Err(error) => {
                    warn!(
                        command = %command.label(),
                        error = %format!("{error:#}"),
                        "confirmation unavailable"
                    );
                    reduce(
                        &mut self.state,
                        ConsoleEvent::Rejected {
                            title: command.label(),
                            error: InputError::ConfirmationUnavailable,
                        },
                    );
                    return Ok(Dispatch::Declined);
                }
            }
        }

        let chain_files = command == Command::CheckConnection;
        let dispatch = self.run(command).await?;
        if chain_files && dispatch == (Dispatch::Completed { ok: true }) {
            return self.run(Command::LoadFiles).await;
        }
        Ok(dispatch)
    }

    async fn run(&mut self, command: Command) -> Result<Dispatch> {
        let request = command
            .request(&self.state)
            .with_context(|| format!("failed to encode request for {}", command.label()))?;
        let pending = match self.executor.begin(request) {
            Ok(pending) => pending,
            Err(ExecutorError::Busy { active }) => {
                warn!(
                    %active,
                    command = %command.label(),
                    "operation refused while another is in flight"
                );
                return Ok(Dispatch::Busy { active });
            }
        };

        reduce(
            &mut self.state,
            ConsoleEvent::OperationStarted {
                label: pending.label().to_string(),
            },
        );
        let outcome = pending.run().await;
        let ok = outcome.result.ok;
        reduce(
            &mut self.state,
            ConsoleEvent::OperationFinished { command, outcome },
        );
        Ok(Dispatch::Completed { ok })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
