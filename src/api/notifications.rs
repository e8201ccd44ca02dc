//! Notification endpoints: filtered list fetch and remote mark-as-read.

use crate::types::{Notification, Role};

use super::client::ApiClient;
use super::wire::{ApiError, FlagEnvelope, MutationOutcome, MutationReply};

/// Query parameters for the notification list endpoint.
#[derive(Debug, Clone)]
pub struct NotificationQuery {
    /// Owner whose feed is requested.
    pub user_id: String,
    /// Role scoping (admins see agency-wide traffic).
    pub role: Option<Role>,
    /// Restrict to unread notifications only.
    pub unread_only: bool,
}

impl NotificationQuery {
    pub fn for_user(user_id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            unread_only: false,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("user_id", self.user_id.clone())];
        if let Some(ref role) = self.role {
            params.push(("role", role.as_str().to_owned()));
        }
        if self.unread_only {
            params.push(("is_read", "0".to_owned()));
        }
        params
    }
}

/// Fetch the notification feed. Returns the raw notifications plus the
/// backend's advisory unread count (the aggregator derives its own).
pub async fn list(
    client: &ApiClient,
    query: &NotificationQuery,
) -> Result<(Vec<Notification>, Option<u32>), ApiError> {
    let envelope: FlagEnvelope<Vec<Notification>> =
        client.get_query("notifications", &query.params()).await?;
    envelope.into_data("notifications")
}

/// Mark a single notification as read on the backend.
pub async fn mark_read(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let reply: MutationReply = client
        .post_json(&format!("notifications/{id}/read"), &serde_json::json!({}))
        .await?;
    match reply.outcome() {
        MutationOutcome::Success | MutationOutcome::Warning => Ok(()),
        MutationOutcome::Error => Err(ApiError::Backend(
            reply
                .message
                .unwrap_or_else(|| "failed to mark notification read".to_owned()),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_include_role_and_read_state() {
        let query = NotificationQuery {
            user_id: "u1".to_owned(),
            role: Some(Role::Admin),
            unread_only: true,
        };
        assert_eq!(
            query.params(),
            vec![
                ("user_id", "u1".to_owned()),
                ("role", "admin".to_owned()),
                ("is_read", "0".to_owned()),
            ]
        );
    }

    #[test]
    fn params_minimal() {
        let query = NotificationQuery::for_user("u2", None);
        assert_eq!(query.params(), vec![("user_id", "u2".to_owned())]);
    }
}
