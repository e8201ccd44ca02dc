//! Coordination of remote round trips and their reconciliation into the
//! domain store.
//!
//! Every fetch follows the same three-phase discipline: loading on, perform
//! the request, commit or record an error, loading off — unconditionally.
//! Read failures leave the previous snapshot intact; write failures are
//! recorded AND re-raised so caller-side retry/alert logic can react.
//! Overlapping operations are tolerated last-write-wins; there is no
//! queuing, coalescing, or cancellation.

use anyhow::{Context, Result};

use crate::api::{
    self, ApiClient, ApiError, FeedbackForm, MutationOutcome, NotificationQuery, RepairForm,
};
use crate::feed::{self, Feed};
use crate::session::{Session, SessionStore};
use crate::store::RepairDomainStore;
use crate::types::{Feedback, RepairStatus, Role};

/// Tri-state result of a targeted mutation, with the backend's message for
/// toast rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    pub outcome: MutationOutcome,
    pub message: Option<String>,
}

pub struct SyncOrchestrator {
    client: ApiClient,
    store: RepairDomainStore,
    session_store: SessionStore,
    session: Option<Session>,
}

impl SyncOrchestrator {
    pub fn new(client: ApiClient, session_store: SessionStore) -> Self {
        Self {
            client,
            store: RepairDomainStore::default(),
            session_store,
            session: None,
        }
    }

    /// Read access to the canonical state.
    pub fn store(&self) -> &RepairDomainStore {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Exchange credentials for a session; token and profile are persisted
    /// together as one record.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let (token, user) = api::auth::login(&self.client, username, password)
            .await
            .context("logging in")?;
        let session = Session { token, user };
        self.client.set_token(Some(session.token.clone()));
        self.session_store
            .save(&session)
            .context("persisting session")?;
        self.store.users.set_one(session.user.clone());
        self.session = Some(session);
        tracing::debug!("sync: session established");
        Ok(())
    }

    /// Restore a persisted session, validating its token against the
    /// backend. Returns `false` when no usable session exists; a rejected
    /// token clears the stale record.
    pub async fn restore_session(&mut self) -> Result<bool> {
        let Some(saved) = self.session_store.load().context("loading session")? else {
            return Ok(false);
        };
        self.client.set_token(Some(saved.token.clone()));
        match api::auth::validate(&self.client).await {
            Ok(user) => {
                let session = Session {
                    token: saved.token,
                    user,
                };
                self.store.users.set_one(session.user.clone());
                self.session = Some(session);
                tracing::debug!("sync: session restored");
                Ok(true)
            }
            Err(ApiError::Backend(message)) => {
                tracing::debug!("sync: stored token rejected: {message}");
                self.client.set_token(None);
                self.session_store.clear().context("clearing session")?;
                Ok(false)
            }
            Err(e) => Err(e).context("validating stored token"),
        }
    }

    /// Drop the session: persisted record, client token, and in-memory
    /// state, as one logical unit.
    pub fn logout(&mut self) -> Result<()> {
        self.session_store.clear().context("clearing session")?;
        self.client.set_token(None);
        self.session = None;
        tracing::debug!("sync: logged out");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read-only hydration
    // -----------------------------------------------------------------------

    pub async fn fetch_repairs(&mut self) {
        self.store.repairs.set_loading(true);
        let result = api::repairs::list(&self.client).await;
        self.store.repairs.set_loading(false);
        match result {
            Ok(repairs) => {
                tracing::debug!("sync: repairs fetched, count={}", repairs.len());
                self.store.repairs.set_all(repairs);
            }
            Err(e) => {
                tracing::debug!("sync: fetch_repairs error: {e}");
                self.store.repairs.set_error(Some(e.to_string()));
            }
        }
    }

    pub async fn fetch_repair_by_id(&mut self, id: &str) {
        self.store.repairs.set_loading(true);
        let result = api::repairs::detail(&self.client, id).await;
        self.store.repairs.set_loading(false);
        match result {
            Ok(repair) => {
                tracing::debug!("sync: repair {id} fetched");
                self.store.repairs.set_one(repair);
            }
            Err(e) => {
                tracing::debug!("sync: fetch_repair_by_id {id} error: {e}");
                self.store.repairs.set_error(Some(e.to_string()));
            }
        }
    }

    pub async fn fetch_areas(&mut self) {
        self.store.areas.set_loading(true);
        let result = api::areas::catalog(&self.client).await;
        self.store.areas.set_loading(false);
        match result {
            Ok(catalog) => self.store.areas.set(catalog),
            Err(e) => {
                tracing::debug!("sync: fetch_areas error: {e}");
                self.store.areas.set_error(Some(e.to_string()));
            }
        }
    }

    /// Hydrate the notification collection for the active session's user.
    pub async fn fetch_notifications(&mut self) {
        let Some(session) = self.session.as_ref() else {
            self.store
                .notifications
                .set_error(Some("no active session".to_owned()));
            return;
        };
        let query = NotificationQuery::for_user(&session.user.id, Some(session.user.role.clone()));

        self.store.notifications.set_loading(true);
        let result = api::notifications::list(&self.client, &query).await;
        self.store.notifications.set_loading(false);
        match result {
            Ok((notifications, advisory_unread)) => {
                tracing::debug!(
                    "sync: notifications fetched, count={} advisory_unread={advisory_unread:?}",
                    notifications.len()
                );
                self.store.notifications.set_all(notifications);
            }
            Err(e) => {
                tracing::debug!("sync: fetch_notifications error: {e}");
                self.store.notifications.set_error(Some(e.to_string()));
            }
        }
    }

    /// Derive the visible feed for the active user from the current
    /// notification snapshot.
    pub fn feed(&self) -> Feed {
        let self_id = self
            .session
            .as_ref()
            .map(|s| s.user.id.as_str())
            .unwrap_or_default();
        feed::ingest(self.store.notifications.items().to_vec(), self_id)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// File a new repair request.
    ///
    /// The list is treated as non-incrementally-updatable: a successful
    /// write invalidates the cached collection in favor of a full refetch.
    /// Failure is recorded in the store AND re-raised.
    pub async fn submit_repair(&mut self, form: &RepairForm) -> Result<(), ApiError> {
        self.store.repairs.set_loading(true);
        let result = api::repairs::submit(&self.client, form).await;
        self.store.repairs.set_loading(false);
        match result {
            Ok(()) => {
                tracing::debug!("sync: repair submitted, refreshing list");
                self.fetch_repairs().await;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("sync: submit_repair error: {e}");
                self.store.repairs.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Record end-user feedback on a completed ticket.
    ///
    /// Scoped to one ticket, so on success the local copy is patched
    /// optimistically instead of refetching the whole list.
    pub async fn submit_feedback(&mut self, form: &FeedbackForm) -> Result<(), ApiError> {
        self.store.repairs.set_loading(true);
        let result = api::repairs::submit_feedback(&self.client, form).await;
        self.store.repairs.set_loading(false);
        match result {
            Ok(()) => {
                self.store.repairs.update(&form.repair_id, |repair| {
                    repair.has_feedback = true;
                    repair.feedback = Some(Feedback {
                        rating: form.rating,
                        comment: form.comment.clone(),
                    });
                });
                Ok(())
            }
            Err(e) => {
                tracing::debug!("sync: submit_feedback error: {e}");
                self.store.repairs.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Move a ticket to a new status.
    ///
    /// A `Warning` outcome is not a hard failure: the backend partially
    /// accepted the change, so the store is still patched.
    pub async fn update_repair_status(
        &mut self,
        id: &str,
        new_status: RepairStatus,
    ) -> Result<MutationResult, ApiError> {
        // The lifecycle is monotonic forward; only admins may correct a
        // status backwards. Rejected locally, before the round trip.
        let is_admin = self
            .session
            .as_ref()
            .is_some_and(|s| s.user.role == Role::Admin);
        if !is_admin
            && let Some(current) = self.store.repairs.get(id)
            && !current.status.can_transition_to(&new_status)
        {
            return Ok(MutationResult {
                outcome: MutationOutcome::Error,
                message: Some(format!(
                    "cannot move ticket from {} to {}",
                    current.status.as_str(),
                    new_status.as_str()
                )),
            });
        }

        self.store.repairs.set_loading(true);
        let result = api::repairs::update_status(&self.client, id, &new_status).await;
        self.store.repairs.set_loading(false);
        match result {
            Ok(reply) => {
                let outcome = reply.outcome();
                if matches!(outcome, MutationOutcome::Success | MutationOutcome::Warning) {
                    self.store.repairs.update(id, |repair| {
                        repair.status = new_status.clone();
                    });
                }
                Ok(MutationResult {
                    outcome,
                    message: reply.message,
                })
            }
            Err(e) => {
                tracing::debug!("sync: update_repair_status {id} error: {e}");
                self.store.repairs.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Set or correct a ticket's scheduled process date.
    pub async fn update_repair_process_date(
        &mut self,
        id: &str,
        date: &str,
        time: &str,
    ) -> Result<MutationResult, ApiError> {
        self.store.repairs.set_loading(true);
        let result = api::repairs::update_process_date(&self.client, id, date, time).await;
        self.store.repairs.set_loading(false);
        match result {
            Ok(reply) => {
                let outcome = reply.outcome();
                if matches!(outcome, MutationOutcome::Success | MutationOutcome::Warning) {
                    self.store.repairs.update(id, |repair| {
                        repair.process_date = Some(date.to_owned());
                        repair.process_time = Some(time.to_owned());
                    });
                }
                Ok(MutationResult {
                    outcome,
                    message: reply.message,
                })
            }
            Err(e) => {
                tracing::debug!("sync: update_repair_process_date {id} error: {e}");
                self.store.repairs.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Mark one notification read on the backend, then patch the local
    /// copy. No local change happens on failure.
    pub async fn mark_notification_read(&mut self, id: &str) -> Result<(), ApiError> {
        api::notifications::mark_read(&self.client, id).await?;
        self.store.notifications.update(id, |n| n.is_read = true);
        Ok(())
    }
}
