//! Access Gate: pure decision function over a resolved identity.
//!
//! Role is self-declared at signup, so a wrong-role visit to a dashboard is a
//! navigation error and is answered with a redirect to the visitor's own
//! dashboard, not a 403. Command surfaces cannot be redirected and deny
//! instead.

use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::Role;

pub const AUTH_PATH: &str = "/auth";
pub const CANDIDATE_DASHBOARD_PATH: &str = "/candidate-dashboard";
pub const EMPLOYER_DASHBOARD_PATH: &str = "/employer-dashboard";
/// Neutral landing page for users whose profile has no usable role.
pub const ROLE_NOT_SET_PATH: &str = "/role-not-set";

/// Resolved (user id, role, profile id) triple for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
    pub profile_id: Option<Uuid>,
    /// Read-only profile fields carried for view headers.
    pub display_name: String,
    pub company_name: Option<String>,
}

/// What an allowed request is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Candidate { profile_id: Uuid },
    Employer { profile_id: Uuid },
    /// Authenticated, but without a usable role.
    Pending { user_id: Uuid },
}

impl Identity {
    /// A known role without a profile id cannot be scoped, so it is treated
    /// the same as an unresolved role.
    pub fn principal(&self) -> Principal {
        match (self.role, self.profile_id) {
            (Role::Candidate, Some(profile_id)) => Principal::Candidate { profile_id },
            (Role::Employer, Some(profile_id)) => Principal::Employer { profile_id },
            _ => Principal::Pending {
                user_id: self.user_id,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Role-neutral entry point; always redirects to the role's home.
    Hub,
    CandidateDashboard,
    EmployerDashboard,
    /// Employer commands on job postings.
    JobManagement,
    /// Candidate commands that create applications.
    ApplicationSubmission,
    /// First-time role selection for an authenticated user.
    ProfileSetup,
}

impl Surface {
    fn is_navigable(self) -> bool {
        matches!(
            self,
            Surface::Hub | Surface::CandidateDashboard | Surface::EmployerDashboard
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    AuthenticationMissing,
    AuthorizationMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Principal),
    Redirect(&'static str),
    Deny(DenyReason),
}

/// Dashboard a principal lands on.
pub fn home_path(principal: Principal) -> &'static str {
    match principal {
        Principal::Candidate { .. } => CANDIDATE_DASHBOARD_PATH,
        Principal::Employer { .. } => EMPLOYER_DASHBOARD_PATH,
        Principal::Pending { .. } => ROLE_NOT_SET_PATH,
    }
}

pub fn resolve(identity: Option<&Identity>, surface: Surface) -> Decision {
    let Some(identity) = identity else {
        return if surface.is_navigable() {
            Decision::Redirect(AUTH_PATH)
        } else {
            Decision::Deny(DenyReason::AuthenticationMissing)
        };
    };

    let principal = identity.principal();
    match (surface, principal) {
        (Surface::Hub, p) => Decision::Redirect(home_path(p)),

        (Surface::CandidateDashboard, Principal::Candidate { .. })
        | (Surface::EmployerDashboard, Principal::Employer { .. }) => Decision::Allow(principal),
        (Surface::CandidateDashboard | Surface::EmployerDashboard, p) => {
            Decision::Redirect(home_path(p))
        }

        (Surface::JobManagement, Principal::Employer { .. })
        | (Surface::ApplicationSubmission, Principal::Candidate { .. })
        | (Surface::ProfileSetup, Principal::Pending { .. }) => Decision::Allow(principal),
        (Surface::JobManagement | Surface::ApplicationSubmission | Surface::ProfileSetup, _) => {
            Decision::Deny(DenyReason::AuthorizationMismatch)
        }
    }
}

impl Decision {
    /// Splits an allowed principal from the response a refused request gets.
    pub fn into_principal(self) -> Result<Principal, Response> {
        match self {
            Decision::Allow(principal) => Ok(principal),
            Decision::Redirect(path) => Err(Redirect::to(path).into_response()),
            Decision::Deny(DenyReason::AuthenticationMissing) => {
                Err(AppError::Unauthorized.into_response())
            }
            Decision::Deny(DenyReason::AuthorizationMismatch) => Err(AppError::Forbidden(
                "This action is not available for your role".to_string(),
            )
            .into_response()),
        }
    }
}
