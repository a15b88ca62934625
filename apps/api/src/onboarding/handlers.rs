//! Axum route handlers for signup checks and role selection.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::access::gate::{self, home_path, Principal, Surface};
use crate::access::session::{bearer_token, resolve_identity};
use crate::errors::AppError;
use crate::models::profile::Role;
use crate::onboarding::validation::{
    build_profile, validate_signup, ProfileSetupRequest, SignupForm,
};
use crate::state::AppState;
use crate::store::IdentityStore;

#[derive(Debug, Serialize)]
pub struct ProfileCreatedResponse {
    pub profile_id: Uuid,
    pub role: Role,
    pub redirect_to: &'static str,
}

/// POST /api/v1/signup/validate
///
/// Checks a signup form before the client hands credentials to the identity
/// provider. 204 when valid.
pub async fn handle_validate_signup(Json(form): Json<SignupForm>) -> Result<StatusCode, AppError> {
    validate_signup(&form)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profiles
///
/// Creates the profile for an authenticated user that has no usable role yet.
pub async fn handle_create_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ProfileSetupRequest>,
) -> Result<Response, AppError> {
    let identity = resolve_identity(state.store.as_ref(), bearer_token(&headers)).await;
    let user_id = match gate::resolve(identity.as_ref(), Surface::ProfileSetup).into_principal() {
        Ok(Principal::Pending { user_id }) => user_id,
        Ok(_) => return Err(AppError::Conflict("Profile already set up".to_string())),
        Err(response) => return Ok(response),
    };

    let new_profile = build_profile(user_id, &req)?;
    let row = state.store.create_profile(new_profile).await?;
    let role = row.role();
    let redirect_to = match role {
        Role::Candidate => home_path(Principal::Candidate { profile_id: row.id }),
        Role::Employer => home_path(Principal::Employer { profile_id: row.id }),
        Role::Unresolved => home_path(Principal::Pending { user_id }),
    };

    info!("User {user_id} completed profile setup as {}", role.as_str());
    Ok((
        StatusCode::CREATED,
        Json(ProfileCreatedResponse {
            profile_id: row.id,
            role,
            redirect_to,
        }),
    )
        .into_response())
}
