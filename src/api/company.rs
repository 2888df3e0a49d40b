//! Company registration and profile.

use serde_json::Value;

use super::auth::persist_grant;
use super::types::{AuthGrant, CompanyProfile, CompanyProfileUpdate, CompanyRegistration};
use super::{COMPANY_PROFILE_PATH, COMPANY_REGISTER_PATH, require};
use crate::client::ApiClient;
use crate::error::ApiError;

impl CompanyRegistration {
    /// Check the fields the registration form marks as required.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming every missing field.
    pub fn validate(&self) -> Result<(), ApiError> {
        require(&[
            ("company_name", self.company_name.as_str()),
            ("profile_photo", self.profile_photo.as_str()),
            ("phone_number", self.phone_number.as_str()),
            ("password", self.password.as_str()),
            ("gst_number", self.gst_number.as_str()),
            ("opening_time", self.opening_time.as_str()),
            ("closing_time", self.closing_time.as_str()),
        ])?;
        if self.complaint_resolution_sla.is_none() {
            return Err(ApiError::Validation(
                "please fill in all required fields: complaint_resolution_sla".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Register a company and its owner account, persisting the returned grant.
///
/// # Errors
///
/// Returns a validation error before sending, or the backend's error.
pub async fn register(client: &ApiClient, registration: &CompanyRegistration) -> Result<AuthGrant, ApiError> {
    registration.validate()?;
    let grant: AuthGrant = client.post_credentials(COMPANY_REGISTER_PATH, registration).await?;
    persist_grant(client, &grant)?;
    tracing::info!(company = %registration.company_name, "company registered");
    Ok(grant)
}

/// Fetch the logged-in company's profile.
///
/// # Errors
///
/// Returns the backend's error (404 when the account has no company).
pub async fn profile(client: &ApiClient) -> Result<CompanyProfile, ApiError> {
    client.get(COMPANY_PROFILE_PATH).await
}

/// Apply `update` over the current profile and `PUT` the merged record.
///
/// # Errors
///
/// Returns the backend's error from either the fetch or the update.
pub async fn update_profile(client: &ApiClient, update: &CompanyProfileUpdate) -> Result<CompanyProfile, ApiError> {
    let current: Value = client.get(COMPANY_PROFILE_PATH).await?;
    let merged = merge_update(current, update)?;
    client.put(COMPANY_PROFILE_PATH, &merged).await
}

fn merge_update(current: Value, update: &CompanyProfileUpdate) -> Result<Value, ApiError> {
    let Value::Object(mut record) = current else {
        return Err(ApiError::Decode("company profile is not a JSON object".to_owned()));
    };
    let Value::Object(changes) =
        serde_json::to_value(update).map_err(|e| ApiError::Validation(e.to_string()))?
    else {
        return Ok(Value::Object(record));
    };
    record.extend(changes);
    Ok(Value::Object(record))
}

#[cfg(test)]
#[path = "company_test.rs"]
mod tests;
