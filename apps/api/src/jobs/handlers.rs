//! Axum route handlers for job commands.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::access::gate::{self, Principal, Surface};
use crate::access::session::{bearer_token, resolve_identity};
use crate::errors::AppError;
use crate::jobs::commands::{apply_to_job, archive_job};
use crate::state::AppState;

/// POST /api/v1/jobs/:id/archive
pub async fn handle_archive_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let identity = resolve_identity(state.store.as_ref(), bearer_token(&headers)).await;
    let decision = gate::resolve(identity.as_ref(), Surface::JobManagement);
    let employer_id = match decision.into_principal() {
        Ok(Principal::Employer { profile_id }) => profile_id,
        Ok(_) => return Err(AppError::Forbidden("Only employers can archive jobs".to_string())),
        Err(response) => return Ok(response),
    };

    let archived = archive_job(state.store.as_ref(), employer_id, job_id).await?;
    Ok(Json(archived).into_response())
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let identity = resolve_identity(state.store.as_ref(), bearer_token(&headers)).await;
    let candidate_id =
        match gate::resolve(identity.as_ref(), Surface::ApplicationSubmission).into_principal() {
            Ok(Principal::Candidate { profile_id }) => profile_id,
            Ok(_) => {
                return Err(AppError::Forbidden(
                    "Only candidates can apply to jobs".to_string(),
                ))
            }
            Err(response) => return Ok(response),
        };

    let card = apply_to_job(state.store.as_ref(), candidate_id, job_id).await?;
    Ok((StatusCode::CREATED, Json(card)).into_response())
}
