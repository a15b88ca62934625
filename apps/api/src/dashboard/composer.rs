//! Dashboard Composer: identity → gate → role-specific view.
//!
//! Every call builds its view from a fresh store snapshot. Store reads are the
//! only suspension points; a dropped request future discards everything it
//! fetched. Fetch failures degrade to empty collections and are reported as
//! warnings on the view.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::gate::{self, Decision, Identity, Principal, Surface};
use crate::access::session::resolve_identity;
use crate::dashboard::aggregation::{aggregate, recent_activity, RECENT_ACTIVITY_LIMIT};
use crate::dashboard::views::{
    build_available_jobs, build_job_cards, ActivityItem, ApplicationCard,
    CandidateDashboardView, Composed, DashboardWarning, EmployerDashboardView, FetchSource,
};
use crate::models::application::{ApplicationFilter, ApplicationRow};
use crate::models::job::{JobFilter, JobPosting, JobStatus};
use crate::store::{ApplicationStore, IdentityStore, JobStore, StoreError};

/// Request-scoped inputs that are not read from the store.
#[derive(Debug, Clone)]
pub struct ComposeContext<'a> {
    pub public_base_url: &'a str,
    pub now: DateTime<Utc>,
}

#[derive(Debug)]
pub enum DashboardOutcome {
    Candidate(Composed<CandidateDashboardView>),
    Employer(Composed<EmployerDashboardView>),
    /// The gate did not allow the surface; carries its redirect or deny.
    Refused(Decision),
}

/// Full orchestration for a dashboard surface: resolves the session token,
/// consults the gate, then composes the view the principal is allowed to see.
pub async fn compose_dashboard<S>(
    store: &S,
    token: Option<&str>,
    surface: Surface,
    ctx: &ComposeContext<'_>,
) -> DashboardOutcome
where
    S: IdentityStore + JobStore + ApplicationStore + ?Sized,
{
    let identity = resolve_identity(store, token).await;

    match gate::resolve(identity.as_ref(), surface) {
        Decision::Allow(Principal::Candidate { profile_id }) => {
            // Allow implies a resolved identity.
            let Some(identity) = identity.as_ref() else {
                return DashboardOutcome::Refused(Decision::Redirect(gate::AUTH_PATH));
            };
            DashboardOutcome::Candidate(
                compose_candidate_dashboard(store, identity, profile_id).await,
            )
        }
        Decision::Allow(Principal::Employer { profile_id }) => {
            let Some(identity) = identity.as_ref() else {
                return DashboardOutcome::Refused(Decision::Redirect(gate::AUTH_PATH));
            };
            DashboardOutcome::Employer(
                compose_employer_dashboard(store, identity, profile_id, ctx).await,
            )
        }
        other => DashboardOutcome::Refused(other),
    }
}

fn degrade<T>(
    result: Result<Vec<T>, StoreError>,
    source: FetchSource,
    warnings: &mut Vec<DashboardWarning>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("Dashboard fetch of {source:?} failed: {e}");
            warnings.push(DashboardWarning {
                source,
                message: match source {
                    FetchSource::Jobs => "Failed to load jobs".to_string(),
                    FetchSource::Applications => "Failed to load applications".to_string(),
                },
            });
            Vec::new()
        }
    }
}

/// Candidate view: own applications with pipeline positions, plus every active
/// job across all employers. Both lists are newest first regardless of the
/// order the store returns.
pub async fn compose_candidate_dashboard<S>(
    store: &S,
    identity: &Identity,
    candidate_id: Uuid,
) -> Composed<CandidateDashboardView>
where
    S: JobStore + ApplicationStore + ?Sized,
{
    let mut warnings = Vec::new();

    let mut applications: Vec<ApplicationRow> = degrade(
        store
            .list_applications(&ApplicationFilter {
                candidate_id: Some(candidate_id),
                employer_id: None,
            })
            .await,
        FetchSource::Applications,
        &mut warnings,
    );
    applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut jobs: Vec<JobPosting> = degrade(
        store
            .list_jobs(&JobFilter {
                employer_id: None,
                status: Some(JobStatus::Active),
            })
            .await,
        FetchSource::Jobs,
        &mut warnings,
    );
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    info!(
        "Composed candidate dashboard for {candidate_id}: {} applications, {} open jobs",
        applications.len(),
        jobs.len()
    );

    Composed {
        view: CandidateDashboardView {
            display_name: identity.display_name.clone(),
            applications: applications.iter().map(ApplicationCard::from_row).collect(),
            available_jobs: build_available_jobs(&jobs, &applications),
        },
        warnings,
    }
}

/// Employer view: statistics, job cards and recent activity, all scoped to
/// jobs owned by `employer_id`.
pub async fn compose_employer_dashboard<S>(
    store: &S,
    identity: &Identity,
    employer_id: Uuid,
    ctx: &ComposeContext<'_>,
) -> Composed<EmployerDashboardView>
where
    S: JobStore + ApplicationStore + ?Sized,
{
    let mut warnings = Vec::new();

    let jobs: Vec<JobPosting> = degrade(
        store
            .list_jobs(&JobFilter {
                employer_id: Some(employer_id),
                status: None,
            })
            .await,
        FetchSource::Jobs,
        &mut warnings,
    );

    let applications: Vec<ApplicationRow> = degrade(
        store
            .list_applications(&ApplicationFilter {
                candidate_id: None,
                employer_id: Some(employer_id),
            })
            .await,
        FetchSource::Applications,
        &mut warnings,
    );

    let stats = aggregate(employer_id, &applications, &jobs, ctx.now);
    let job_cards = build_job_cards(&jobs, &stats.per_job, ctx.public_base_url);
    let recent = recent_activity(&applications, RECENT_ACTIVITY_LIMIT)
        .into_iter()
        .map(ActivityItem::from_row)
        .collect();

    info!(
        "Composed employer dashboard for {employer_id}: {} active jobs, {} applications",
        stats.active_jobs, stats.total_candidates
    );

    Composed {
        view: EmployerDashboardView {
            company_name: identity.company_name.clone(),
            display_name: identity.display_name.clone(),
            stats,
            jobs: job_cards,
            recent_activity: recent,
        },
        warnings,
    }
}
