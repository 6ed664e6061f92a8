//! Email outbox worker
//!
//! Rows written by request handlers are delivered here, outside the request.
//! The worker wakes on `ServerState::notify_outbox` and on a periodic tick.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::db::repository::OutboxRepository;
use crate::services::mailer::EmailMessage;
use crate::services::notification::NotificationService;

/// Attempts before a row is marked `failed`
pub const MAX_ATTEMPTS: u32 = 5;

const BATCH_SIZE: usize = 50;

pub struct OutboxWorker {
    state: ServerState,
    shutdown: CancellationToken,
}

impl OutboxWorker {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    pub async fn run(self) {
        let period = Duration::from_secs(self.state.config.outbox_poll_secs.max(1));
        let mut ticker = tokio::time::interval(period);
        let notify = self.state.outbox_notify.clone();
        tracing::info!(poll_secs = period.as_secs(), "Email outbox worker started");

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = notify.notified() => {}
                _ = ticker.tick() => {}
            }
            drain_once(&self.state).await;
        }

        tracing::info!("Email outbox worker stopped");
    }
}

/// Deliver one batch of pending rows; returns how many were sent
pub async fn drain_once(state: &ServerState) -> usize {
    let repo = OutboxRepository::new(state.get_db());
    let pending = match repo.pending(BATCH_SIZE).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read email outbox");
            return 0;
        }
    };

    let notifications = NotificationService::new(state.clone());
    let mut sent = 0;
    for row in pending {
        let attempts = row.attempts + 1;
        let outcome = match notifications.settings(row.tenant_id.as_deref()).await {
            Ok(Some(settings)) => {
                let message = EmailMessage {
                    to: row.recipient.clone(),
                    subject: row.subject.clone(),
                    body: row.body.clone(),
                };
                state
                    .mailer
                    .send(&settings, &message)
                    .await
                    .map_err(|e| e.to_string())
            }
            Ok(None) => Err("Email is not configured".to_string()),
            Err(e) => Err(e.to_string()),
        };

        let stored = match outcome {
            Ok(()) => {
                sent += 1;
                repo.mark_sent(&row.id).await
            }
            Err(error) => {
                let give_up = attempts >= MAX_ATTEMPTS;
                tracing::warn!(
                    outbox_id = %row.id,
                    attempts,
                    give_up,
                    error = %error,
                    "Outbox delivery failed"
                );
                repo.record_failure(&row.id, attempts, &error, give_up).await
            }
        };
        if let Err(e) = stored {
            tracing::error!(outbox_id = %row.id, error = %e, "Failed to update outbox row");
        }
    }
    sent
}
