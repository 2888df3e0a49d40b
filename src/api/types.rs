//! Wire types for backend requests and responses.
//!
//! Response structs default missing fields so a backend that omits optional
//! columns still decodes; nullable columns are `Option`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::Tokens;

// =============================================================================
// AUTH
// =============================================================================

/// Console role selected at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Supervisor,
    Admin,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "supervisor" => Ok(Self::Supervisor),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other} (expected supervisor or admin)")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
    pub role: Role,
}

/// Login and registration response: tokens plus identity snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthGrant {
    #[serde(default)]
    pub tokens: Option<Tokens>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub company: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LogoutRequest {
    pub refresh: Option<String>,
    pub access: Option<String>,
}

// =============================================================================
// COMPANY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lower = raw.trim().to_ascii_lowercase();
        let day = match lower.get(..3).unwrap_or_default() {
            "mon" => Self::Monday,
            "tue" => Self::Tuesday,
            "wed" => Self::Wednesday,
            "thu" => Self::Thursday,
            "fri" => Self::Friday,
            "sat" => Self::Saturday,
            "sun" => Self::Sunday,
            _ => return Err(format!("unknown weekday: {raw}")),
        };
        Ok(day)
    }
}

/// Opening days, serialized as `{ "monday": true, ... }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl WorkingDays {
    #[must_use]
    pub fn all() -> Self {
        Self::only(&Weekday::ALL)
    }

    #[must_use]
    pub fn only(days: &[Weekday]) -> Self {
        let mut working = Self::default();
        for day in days {
            working.set(*day, true);
        }
        working
    }

    pub fn set(&mut self, day: Weekday, open: bool) {
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *slot = open;
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyRegistration {
    pub company_name: String,
    /// Logo URL.
    pub profile_photo: String,
    pub phone_number: String,
    pub password: String,
    pub gst_number: String,
    /// Hours allowed to resolve a complaint.
    pub complaint_resolution_sla: Option<u32>,
    pub working_days: WorkingDays,
    pub opening_time: String,
    pub closing_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    pub operational_cities: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub price_min: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub price_max: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub id: u64,
    pub username: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    pub address: Option<String>,
    pub is_verified: bool,
    pub company_name: String,
    pub gst_number: String,
    pub weighing_system: Option<String>,
    pub working_days: WorkingDays,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub incentive_per_100_percent_route: Option<String>,
    pub complaint_resolution_sla: Option<u32>,
    pub total_producers: u64,
    pub total_collectors: u64,
    /// A list of city names or a backend-defined mapping.
    pub operational_cities: Value,
}

/// Fields an owner may edit; unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complaint_resolution_sla: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_days: Option<WorkingDays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_cities: Option<Vec<String>>,
}

// =============================================================================
// SUPERVISOR
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct SupervisorRegistration {
    pub phone_number: String,
    pub password: String,
    pub company: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub assigned_areas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supervisor {
    pub id: Option<u64>,
    pub username: String,
    pub phone_number: String,
    pub company: u64,
    pub company_username: String,
    pub assigned_areas: Vec<String>,
    pub team_size: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SupervisorProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

// =============================================================================
// COLLECTOR
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectorRegistration {
    pub phone_number: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub daily_wage_or_incentive_rate: String,
    pub assigned_area_zone: String,
    pub employment_type: String,
    pub is_private_collector: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collector {
    pub id: Option<u64>,
    pub username: String,
    pub phone_number: String,
    pub company_name: Option<String>,
    pub is_private_collector: bool,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub assigned_area_zone: Option<String>,
    pub daily_wage_or_incentive_rate: Option<String>,
    pub average_rating: Option<String>,
    pub total_collections: Option<u64>,
    /// `false` until the collector has been approved.
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approval {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ApprovalRequest {
    pub action: Approval,
}

// =============================================================================
// SCHEDULED REQUESTS
// =============================================================================

/// A pickup job awaiting assignment to a collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledRequest {
    pub id: u64,
    pub address_line1: String,
    pub city: String,
    pub waste_type: String,
    pub pickup_date: String,
    pub pickup_time_slot: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AssignRequest {
    pub collector: u64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
