//! Typed wrappers for the backend's REST endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each submodule covers one backend resource and goes through
//! [`crate::ApiClient`], so token injection and error normalization happen in
//! exactly one place. Client-side validation mirrors the console forms and
//! fails with [`ApiError::Validation`] before any request is sent.

pub mod auth;
pub mod collector;
pub mod company;
pub mod scheduled;
pub mod supervisor;
pub mod types;

use crate::error::ApiError;

pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const LOGOUT_PATH: &str = "/api/auth/logout/";
pub const COMPANY_REGISTER_PATH: &str = "/api/company/register/";
pub const COMPANY_PROFILE_PATH: &str = "/api/company/profile/";
pub const SUPERVISOR_CREATE_PATH: &str = "/api/supervisor/create/";
pub const SUPERVISOR_LIST_PATH: &str = "/api/supervisor/list/";
pub const SUPERVISOR_PROFILE_PATH: &str = "/api/supervisor/profile/";
pub const COLLECTOR_REGISTER_PATH: &str = "/api/collector/register/";
pub const COLLECTOR_LIST_PATH: &str = "/api/collector/list/";
pub const PENDING_REQUESTS_PATH: &str = "/api/scheduled-requests/list_pending/";

fn collector_company_endpoint(company_id: u64) -> String {
    format!("/api/collector/company/{company_id}/")
}

fn collector_approval_endpoint(collector_id: u64) -> String {
    format!("/api/collector/{collector_id}/approval/")
}

fn assign_request_endpoint(request_id: u64) -> String {
    format!("/api/scheduled-requests/{request_id}/assign/")
}

/// Split a comma-separated form value into trimmed, non-empty items.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Fail with the names of every required field that is blank.
fn require(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "please fill in all required fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
