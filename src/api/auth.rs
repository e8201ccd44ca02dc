//! Authentication endpoints: credential login and token-validated restore.

use serde::Deserialize;
use serde_json::json;

use crate::types::User;

use super::client::ApiClient;
use super::wire::{ApiError, StatusEnvelope};

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    user: User,
}

/// Exchange credentials for a session token and the user's profile.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<(String, User), ApiError> {
    let envelope: StatusEnvelope<LoginData> = client
        .post_json("login", &json!({ "username": username, "password": password }))
        .await?;
    let data = envelope.into_data("session")?;
    Ok((data.token, data.user))
}

/// Validate the client's current token and return the fresh profile.
///
/// Expects the token to already be installed on the client.
pub async fn validate(client: &ApiClient) -> Result<User, ApiError> {
    let envelope: StatusEnvelope<User> = client.get("me").await?;
    envelope.into_data("profile")
}
