//! Supervisor accounts.

use serde_json::Value;

use super::types::{Supervisor, SupervisorProfileUpdate, SupervisorRegistration};
use super::{SUPERVISOR_CREATE_PATH, SUPERVISOR_LIST_PATH, SUPERVISOR_PROFILE_PATH, require};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Create a supervisor under `registration.company`.
///
/// # Errors
///
/// Returns a validation error for blank credentials, or the backend's error.
pub async fn create(client: &ApiClient, registration: &SupervisorRegistration) -> Result<Value, ApiError> {
    require(&[
        ("phone_number", registration.phone_number.as_str()),
        ("password", registration.password.as_str()),
    ])?;
    let created: Value = client.post(SUPERVISOR_CREATE_PATH, registration).await?;
    tracing::info!(company = registration.company, "supervisor created");
    Ok(created)
}

/// Every supervisor visible to the caller.
///
/// # Errors
///
/// Returns the backend's error.
pub async fn list(client: &ApiClient) -> Result<Vec<Supervisor>, ApiError> {
    client.get(SUPERVISOR_LIST_PATH).await
}

/// Supervisors belonging to `company_id`.
///
/// The list endpoint takes no company filter, so rows are filtered here.
///
/// # Errors
///
/// Returns the backend's error.
pub async fn list_for_company(client: &ApiClient, company_id: u64) -> Result<Vec<Supervisor>, ApiError> {
    let mut supervisors = list(client).await?;
    supervisors.retain(|supervisor| supervisor.company == company_id);
    Ok(supervisors)
}

/// The logged-in supervisor's own profile.
///
/// # Errors
///
/// Returns the backend's error.
pub async fn profile(client: &ApiClient) -> Result<Value, ApiError> {
    client.get(SUPERVISOR_PROFILE_PATH).await
}

/// # Errors
///
/// Returns the backend's error.
pub async fn update_profile(client: &ApiClient, update: &SupervisorProfileUpdate) -> Result<Value, ApiError> {
    client.patch(SUPERVISOR_PROFILE_PATH, update).await
}

#[cfg(test)]
#[path = "supervisor_test.rs"]
mod tests;
