//! Login and logout.

use super::types::{AuthGrant, LoginRequest, LogoutRequest, Role};
use super::{LOGIN_PATH, LOGOUT_PATH, require};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Log in with phone number and password, persisting the returned grant.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for blank credentials, the backend's
/// error for rejected logins (including 401, which leaves any stored session
/// untouched), or a session error if the grant cannot be stored.
pub async fn login(client: &ApiClient, phone_number: &str, password: &str, role: Role) -> Result<AuthGrant, ApiError> {
    require(&[("phone_number", phone_number), ("password", password)])?;
    let request = LoginRequest { phone_number: phone_number.trim().to_owned(), password: password.to_owned(), role };
    let grant: AuthGrant = client.post_credentials(LOGIN_PATH, &request).await?;
    persist_grant(client, &grant)?;
    tracing::info!(%role, "logged in");
    Ok(grant)
}

/// Tell the backend to revoke the tokens, then clear the local session.
///
/// The backend call is best effort: its failure is logged and the session is
/// cleared regardless.
///
/// # Errors
///
/// Returns a session error only if the local session cannot be cleared.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    let session = client.session();
    let body = LogoutRequest {
        refresh: session.refresh_token().ok().flatten(),
        access: session.access_token().ok().flatten(),
    };
    match client.post::<serde_json::Value>(LOGOUT_PATH, &body).await {
        Ok(_) => tracing::debug!("backend logout accepted"),
        Err(error) => tracing::warn!(%error, "backend logout failed; clearing local session anyway"),
    }
    session.clear()?;
    tracing::info!("logged out");
    Ok(())
}

/// Store tokens and identity snapshots from a login or registration response.
pub(crate) fn persist_grant(client: &ApiClient, grant: &AuthGrant) -> Result<(), ApiError> {
    client
        .session()
        .persist(grant.tokens.as_ref(), grant.user.as_ref(), grant.company.as_ref())?;
    Ok(())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
