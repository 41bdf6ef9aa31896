//! Engine: the poll loop tying the review API to the chat

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api_client::ReviewApi;
use crate::notifier::Notifier;
use crate::response::check_response;
use crate::state::{MessageKind, PollState};
use crate::status::{parse_status, NO_NEW_HOMEWORKS};

/// Failure streak length that earns a warning in the log
const FAILURE_STREAK_WARNING: u32 = 5;

/// What happened to a cycle's message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Send attempted but the chat rejected it; only logged
    Failed,
    /// Same text as the last message of its kind
    Suppressed,
}

/// Outcome of a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub kind: MessageKind,
    pub message: String,
    pub delivery: Delivery,
}

/// The engine polls the review API and forwards status changes
pub struct Engine {
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn Notifier>,
    state: PollState,
    retry_period: Duration,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("notifier", &self.notifier)
            .field("state", &self.state)
            .field("retry_period", &self.retry_period)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        notifier: Arc<dyn Notifier>,
        state: PollState,
        retry_period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            state,
            retry_period,
            cancel,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll until the cancellation token is triggered.
    ///
    /// Cancellation is only observed between cycles.
    pub async fn run(&mut self) {
        loop {
            let report = self.poll_once().await;
            tracing::debug!(
                "Cycle finished: kind={:?}, delivery={:?}, cursor={}",
                report.kind,
                report.delivery,
                self.state.cursor
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch, validate, format and notify cycle
    pub async fn poll_once(&mut self) -> CycleReport {
        let (kind, message) = match self.check_updates().await {
            Ok(message) => (MessageKind::Status, message),
            Err(e) => {
                tracing::error!("Poll cycle failed: {}", e);
                (MessageKind::Error, format!("Сбой в работе программы: {}", e))
            }
        };

        let streak = self.state.record_cycle(kind);
        if streak == FAILURE_STREAK_WARNING {
            tracing::warn!("Review API has failed {} cycles in a row", streak);
        }

        let delivery = self.deliver(kind, &message).await;
        CycleReport {
            kind,
            message,
            delivery,
        }
    }

    async fn check_updates(&mut self) -> crate::Result<String> {
        let body = self.api.fetch(self.state.cursor).await?;
        let response = check_response(&body)?;
        self.state.advance_cursor(response.current_date);

        match response.homeworks.first() {
            None => Ok(NO_NEW_HOMEWORKS.to_string()),
            Some(latest) => parse_status(latest),
        }
    }

    async fn deliver(&mut self, kind: MessageKind, message: &str) -> Delivery {
        if self.state.is_duplicate(kind, message) {
            tracing::debug!("Duplicate message suppressed: {}", message);
            return Delivery::Suppressed;
        }

        // Remembered before sending: a failed delivery is not retried either.
        self.state.remember(kind, message);
        send_message(self.notifier.as_ref(), message).await
    }
}

/// Send a message, containing any delivery failure in the log.
///
/// The poll loop never treats a failed send as a poll failure, so the error
/// stops here.
pub async fn send_message(notifier: &dyn Notifier, message: &str) -> Delivery {
    match notifier.notify(message).await {
        Ok(()) => {
            tracing::info!("Sent message via '{}': {}", notifier.type_name(), message);
            Delivery::Sent
        }
        Err(e) => {
            tracing::error!(
                "Failed to send message via '{}': {}",
                notifier.type_name(),
                e
            );
            Delivery::Failed
        }
    }
}
