//! Console routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client never navigates. Callers map outcomes to a [`Route`] here
//! so every surface applies the same unauthenticated redirect.

use std::fmt;
use std::str::FromStr;

use crate::api::types::Role;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    RegisterCompany,
    SupervisorDashboard,
    SupervisorTasks,
    SupervisorCollectors,
    AdminDashboard,
    RegisterSupervisor,
    RegisterCollector,
    CompanyProfile,
    SupervisorList,
    CollectorList,
    CollectorApproval,
    AssignCollector,
}

impl Route {
    pub const ALL: [Self; 14] = [
        Self::Home,
        Self::Login,
        Self::RegisterCompany,
        Self::SupervisorDashboard,
        Self::SupervisorTasks,
        Self::SupervisorCollectors,
        Self::AdminDashboard,
        Self::RegisterSupervisor,
        Self::RegisterCollector,
        Self::CompanyProfile,
        Self::SupervisorList,
        Self::CollectorList,
        Self::CollectorApproval,
        Self::AssignCollector,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::RegisterCompany => "/register-company",
            Self::SupervisorDashboard => "/supervisor/dashboard",
            Self::SupervisorTasks => "/supervisor/tasks",
            Self::SupervisorCollectors => "/supervisor/collectors",
            Self::AdminDashboard => "/admin/dashboard",
            Self::RegisterSupervisor => "/supervisor/register/supervisor",
            Self::RegisterCollector => "/supervisor/register/collector",
            Self::CompanyProfile => "/company/profile",
            Self::SupervisorList => "/supervisors/list",
            Self::CollectorList => "/collectors/list",
            Self::CollectorApproval => "/collectors/approval",
            Self::AssignCollector => "/assign/collector",
        }
    }

    /// Parse a path, ignoring any query string and a trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Landing page after a successful login.
    #[must_use]
    pub fn after_login(role: Role) -> Self {
        match role {
            Role::Supervisor => Self::SupervisorDashboard,
            Role::Admin => Self::AdminDashboard,
        }
    }

    /// Pages reachable without a session.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::RegisterCompany)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_path(raw.trim()).ok_or_else(|| format!("unknown route: {raw}"))
    }
}

/// Where to send the user after `error`, if anywhere.
#[must_use]
pub fn redirect_for(error: &ApiError) -> Option<Route> {
    match error {
        ApiError::Unauthenticated => Some(Route::Login),
        _ => None,
    }
}

/// Redirect for opening `route` with or without a session.
#[must_use]
pub fn guard(route: Route, authenticated: bool) -> Option<Route> {
    (!authenticated && !route.is_public()).then_some(Route::Login)
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
