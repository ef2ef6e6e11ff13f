//! Notification fan-out: tell the counter-party about each state change
//!
//! Fan-out runs after the commit has durably succeeded, so nothing here is
//! allowed to fail the reorder. Every dispatch is independent: one
//! recipient's unreachable inbox never prevents delivery attempts to the
//! others. Outcomes are collected with a settle-all policy and logged for
//! operational visibility only.

use async_trait::async_trait;
use board_types::{Actor, PartyId, WorkItem, WorkItemId, WorkState};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use thiserror::Error;

// ── Notification ─────────────────────────────────────────────────────

/// A single cross-party notification about one state change
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The counter-party being told
    pub recipient: PartyId,
    pub item_id: WorkItemId,
    pub from: WorkState,
    pub to: WorkState,
    /// Who caused the change
    pub actor: PartyId,
}

/// A genuine transition from the last successful commit, carried with the
/// pre-commit snapshot so the counter-party slots can be resolved
#[derive(Clone, Debug)]
pub struct ChangeNotice {
    pub item: WorkItem,
    pub from: WorkState,
    pub to: WorkState,
}

/// Failure to deliver one notification
#[derive(Debug, Error)]
#[error("{0}")]
pub struct NotifyError(pub String);

/// What happened to one change's notification attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationOutcome {
    Delivered {
        item_id: WorkItemId,
        recipient: PartyId,
    },
    Failed {
        item_id: WorkItemId,
        recipient: PartyId,
        reason: String,
    },
    /// The counter-party slot is unset (e.g. an unassigned project)
    Skipped { item_id: WorkItemId },
}

// ── Sink ─────────────────────────────────────────────────────────────

/// The delivery seam: email, push, whatever the host application wires in
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

// ── Fan-out ──────────────────────────────────────────────────────────

/// Settle-all dispatcher over a [`NotificationSink`]
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Dispatch one notification per change and wait for all of them to
    /// settle. Never returns an error; individual failures only affect
    /// their own outcome record.
    pub async fn notify_all(
        &self,
        actor: &Actor,
        changes: &[ChangeNotice],
    ) -> Vec<NotificationOutcome> {
        let dispatches = changes.iter().map(|change| {
            let sink = Arc::clone(&self.sink);
            let actor_id = actor.id.clone();
            async move {
                let Some(recipient) = change.item.counter_party(&actor_id).cloned() else {
                    return NotificationOutcome::Skipped {
                        item_id: change.item.id.clone(),
                    };
                };
                let notification = Notification {
                    recipient: recipient.clone(),
                    item_id: change.item.id.clone(),
                    from: change.from,
                    to: change.to,
                    actor: actor_id,
                };
                match sink.send(&notification).await {
                    Ok(()) => NotificationOutcome::Delivered {
                        item_id: notification.item_id,
                        recipient,
                    },
                    Err(err) => NotificationOutcome::Failed {
                        item_id: notification.item_id,
                        recipient,
                        reason: err.to_string(),
                    },
                }
            }
        });

        let outcomes = join_all(dispatches).await;

        for outcome in &outcomes {
            if let NotificationOutcome::Failed {
                item_id,
                recipient,
                reason,
            } = outcome
            {
                tracing::warn!(
                    item_id = %item_id,
                    recipient = %recipient,
                    reason = %reason,
                    "Notification delivery failed"
                );
            }
        }

        outcomes
    }
}

// ── Test sinks ───────────────────────────────────────────────────────

/// In-memory sink that records every delivered notification
#[derive(Default)]
pub struct MemorySink {
    sent: RwLock<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.read().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent
            .write()
            .map_err(|_| NotifyError("sent lock poisoned".to_string()))?
            .push(notification.clone());
        Ok(())
    }
}

/// Sink that fails for a chosen set of recipients and records the rest
#[derive(Default)]
pub struct FlakySink {
    inner: MemorySink,
    fail_for: HashSet<PartyId>,
}

impl FlakySink {
    pub fn failing_for(recipients: impl IntoIterator<Item = PartyId>) -> Self {
        Self {
            inner: MemorySink::new(),
            fail_for: recipients.into_iter().collect(),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.inner.sent()
    }
}

#[async_trait]
impl NotificationSink for FlakySink {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.fail_for.contains(&notification.recipient) {
            return Err(NotifyError(format!(
                "recipient {} unreachable",
                notification.recipient
            )));
        }
        self.inner.send(notification).await
    }
}
