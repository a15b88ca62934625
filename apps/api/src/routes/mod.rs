pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::jobs::handlers as jobs;
use crate::onboarding::handlers as onboarding;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboards
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard_hub))
        .route(
            "/api/v1/dashboard/candidate",
            get(dashboard::handle_candidate_dashboard),
        )
        .route(
            "/api/v1/dashboard/employer",
            get(dashboard::handle_employer_dashboard),
        )
        // Job commands
        .route("/api/v1/jobs/:id/archive", post(jobs::handle_archive_job))
        .route("/api/v1/jobs/:id/applications", post(jobs::handle_apply))
        // Onboarding
        .route(
            "/api/v1/signup/validate",
            post(onboarding::handle_validate_signup),
        )
        .route("/api/v1/profiles", post(onboarding::handle_create_profile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::models::job::JobStatus;
    use crate::store::memory::MemoryStore;

    fn app(store: Arc<MemoryStore>) -> Router {
        build_router(AppState {
            store,
            config: Config {
                database_url: "postgres://unused".to_string(),
                db_max_connections: 1,
                public_base_url: "https://hire.example.com".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        })
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(get("/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_no_session_redirects_to_auth() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(get("/api/v1/dashboard/employer", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/auth");
    }

    #[tokio::test]
    async fn test_hub_redirects_by_role() {
        let store = Arc::new(MemoryStore::new());
        store.add_user("cand", Some("candidate"), None);
        store.add_user("pending", None, None);

        let response = app(store.clone())
            .oneshot(get("/api/v1/dashboard", Some("cand")))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/candidate-dashboard");

        let response = app(store)
            .oneshot(get("/api/v1/dashboard", Some("pending")))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/role-not-set");
    }

    #[tokio::test]
    async fn test_employer_dashboard_json() {
        let store = Arc::new(MemoryStore::new());
        let employer = store.add_user("emp", Some("employer"), Some("Acme"));
        store.add_job(employer, "Rust Engineer", JobStatus::Active, Utc::now());

        let response = app(store)
            .oneshot(get("/api/v1/dashboard/employer", Some("emp")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["company_name"], "Acme");
        assert_eq!(body["stats"]["active_jobs"], 1);
        assert!(body["stats"]["pending_review"].is_null());
        assert_eq!(body["warnings"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_apply_then_duplicate_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let employer = store.add_user("emp", Some("employer"), Some("Acme"));
        store.add_user("cand", Some("candidate"), None);
        let job = store.add_job(employer, "Rust Engineer", JobStatus::Active, Utc::now());
        let uri = format!("/api/v1/jobs/{job}/applications");

        let response = app(store.clone())
            .oneshot(post_json(&uri, Some("cand"), "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app(store)
            .oneshot(post_json(&uri, Some("cand"), "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_candidate_cannot_archive() {
        let store = Arc::new(MemoryStore::new());
        let employer = store.add_user("emp", Some("employer"), None);
        store.add_user("cand", Some("candidate"), None);
        let job = store.add_job(employer, "Rust Engineer", JobStatus::Active, Utc::now());

        let response = app(store.clone())
            .oneshot(post_json(&format!("/api/v1/jobs/{job}/archive"), Some("cand"), "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(store.job_status(job).as_deref(), Some("active"));
    }

    #[tokio::test]
    async fn test_profile_setup_for_pending_user() {
        let store = Arc::new(MemoryStore::new());
        store.add_session("fresh", uuid::Uuid::new_v4());

        let response = app(store.clone())
            .oneshot(post_json(
                "/api/v1/profiles",
                Some("fresh"),
                r#"{"role":"employer","first_name":"Grace","company_name":"Acme"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["redirect_to"], "/employer-dashboard");

        let response = app(store)
            .oneshot(get("/api/v1/dashboard", Some("fresh")))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/employer-dashboard");
    }

    #[tokio::test]
    async fn test_profile_setup_recovers_user_without_role() {
        let store = Arc::new(MemoryStore::new());
        store.add_user("norole", None, None);

        let response = app(store.clone())
            .oneshot(get("/api/v1/dashboard", Some("norole")))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/role-not-set");

        let response = app(store.clone())
            .oneshot(post_json("/api/v1/profiles", Some("norole"), r#"{"role":"candidate"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["redirect_to"], "/candidate-dashboard");

        let response = app(store.clone())
            .oneshot(get("/api/v1/dashboard", Some("norole")))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/candidate-dashboard");

        let response = app(store)
            .oneshot(post_json("/api/v1/profiles", Some("norole"), r#"{"role":"employer"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_signup_validation_rejects_mismatch() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(post_json(
                "/api/v1/signup/validate",
                None,
                r#"{"email":"a@b.c","password":"x","confirm_password":"y","role":"candidate"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
