//! Scheduled pickup requests.

use serde_json::Value;

use super::types::{AssignRequest, ScheduledRequest};
use super::{PENDING_REQUESTS_PATH, assign_request_endpoint};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Pickups not yet assigned to a collector.
///
/// # Errors
///
/// Returns the backend's error.
pub async fn list_pending(client: &ApiClient) -> Result<Vec<ScheduledRequest>, ApiError> {
    client.get(PENDING_REQUESTS_PATH).await
}

/// Assign pickup `request_id` to `collector_id`.
///
/// # Errors
///
/// Returns the backend's error, e.g. when the request was already assigned.
pub async fn assign(client: &ApiClient, request_id: u64, collector_id: u64) -> Result<Value, ApiError> {
    let outcome: Value = client
        .post(&assign_request_endpoint(request_id), &AssignRequest { collector: collector_id })
        .await?;
    tracing::info!(request_id, collector_id, "pickup assigned");
    Ok(outcome)
}

#[cfg(test)]
#[path = "scheduled_test.rs"]
mod tests;
