//! Axum route handlers for the Dashboard API.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::access::gate::Surface;
use crate::access::session::bearer_token;
use crate::dashboard::composer::{compose_dashboard, ComposeContext, DashboardOutcome};
use crate::state::AppState;

async fn serve(state: &AppState, headers: &HeaderMap, surface: Surface) -> Response {
    let ctx = ComposeContext {
        public_base_url: &state.config.public_base_url,
        now: Utc::now(),
    };

    match compose_dashboard(state.store.as_ref(), bearer_token(headers), surface, &ctx).await {
        DashboardOutcome::Candidate(composed) => Json(composed).into_response(),
        DashboardOutcome::Employer(composed) => Json(composed).into_response(),
        DashboardOutcome::Refused(decision) => match decision.into_principal() {
            Err(response) => response,
            // Refused never carries an Allow.
            Ok(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        },
    }
}

/// GET /api/v1/dashboard
///
/// Role-neutral entry point. Always redirects: to the caller's dashboard, to
/// `/role-not-set`, or to `/auth` without a session.
pub async fn handle_dashboard_hub(State(state): State<AppState>, headers: HeaderMap) -> Response {
    serve(&state, &headers, Surface::Hub).await
}

/// GET /api/v1/dashboard/candidate
pub async fn handle_candidate_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    serve(&state, &headers, Surface::CandidateDashboard).await
}

/// GET /api/v1/dashboard/employer
pub async fn handle_employer_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    serve(&state, &headers, Surface::EmployerDashboard).await
}
