//! Collector registration, listing, and approval.

use serde_json::Value;

use super::types::{Approval, ApprovalRequest, Collector, CollectorRegistration};
use super::{COLLECTOR_LIST_PATH, COLLECTOR_REGISTER_PATH, collector_approval_endpoint, collector_company_endpoint, require};
use crate::client::ApiClient;
use crate::error::ApiError;

impl CollectorRegistration {
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming every blank required field.
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("phone_number", self.phone_number.as_str()),
            ("password", self.password.as_str()),
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("vehicle_number", self.vehicle_number.as_str()),
            ("vehicle_type", self.vehicle_type.as_str()),
            ("daily_wage_or_incentive_rate", self.daily_wage_or_incentive_rate.as_str()),
        ])
    }
}

/// Register a collector. New collectors start inactive until approved.
///
/// # Errors
///
/// Returns a validation error before sending, or the backend's error.
pub async fn register(client: &ApiClient, registration: &CollectorRegistration) -> Result<Value, ApiError> {
    registration.validate()?;
    let created: Value = client.post(COLLECTOR_REGISTER_PATH, registration).await?;
    tracing::info!(vehicle = %registration.vehicle_number, "collector registered");
    Ok(created)
}

/// # Errors
///
/// Returns the backend's error.
pub async fn list(client: &ApiClient) -> Result<Vec<Collector>, ApiError> {
    client.get(COLLECTOR_LIST_PATH).await
}

/// Collectors employed by `company_id`.
///
/// # Errors
///
/// Returns the backend's error.
pub async fn for_company(client: &ApiClient, company_id: u64) -> Result<Vec<Collector>, ApiError> {
    client.get(&collector_company_endpoint(company_id)).await
}

/// Collectors still waiting for approval (`is_active == false`).
///
/// # Errors
///
/// Returns the backend's error.
pub async fn pending_approval(client: &ApiClient) -> Result<Vec<Collector>, ApiError> {
    let mut collectors = list(client).await?;
    collectors.retain(|collector| !collector.is_active);
    Ok(collectors)
}

/// Approve or reject a collector.
///
/// # Errors
///
/// Returns the backend's error.
pub async fn set_approval(client: &ApiClient, collector_id: u64, action: Approval) -> Result<Value, ApiError> {
    let outcome: Value = client
        .post(&collector_approval_endpoint(collector_id), &ApprovalRequest { action })
        .await?;
    tracing::info!(collector_id, ?action, "collector approval recorded");
    Ok(outcome)
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
