use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::dashboard::views::ApplicationCard;
use crate::errors::AppError;
use crate::models::application::{ApplicationFilter, ApplicationRow};
use crate::models::job::{JobPosting, JobStatus};
use crate::store::{ApplicationStore, JobStore};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArchiveResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
}

/// Archives a job owned by `employer_id`. Archiving an archived job succeeds
/// without change; there is no way back to active.
pub async fn archive_job<S>(
    store: &S,
    employer_id: Uuid,
    job_id: Uuid,
) -> Result<ArchiveResponse, AppError>
where
    S: JobStore + ?Sized,
{
    if !store.archive_job(job_id, employer_id).await? {
        // Foreign jobs are indistinguishable from missing ones.
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    info!("Employer {employer_id} archived job {job_id}");
    Ok(ArchiveResponse {
        job_id,
        status: JobStatus::Archived,
    })
}

/// Checks whether `candidate_id` may apply to `job_id`, given the job (if it
/// exists) and the candidate's existing applications.
pub fn check_can_apply(
    job: Option<&JobPosting>,
    existing: &[ApplicationRow],
    candidate_id: Uuid,
    job_id: Uuid,
) -> Result<(), AppError> {
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    if !job.is_active() {
        return Err(AppError::Validation(
            "This job is no longer accepting applications".to_string(),
        ));
    }

    if existing
        .iter()
        .any(|a| a.candidate_id == candidate_id && a.job_id == job_id)
    {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    Ok(())
}

/// Creates an application for an active job. At most one application exists
/// per (candidate, job); the store's unique index backs this check. The store
/// re-checks the job status on insert, so a job archived after the check below
/// is still refused.
pub async fn apply_to_job<S>(
    store: &S,
    candidate_id: Uuid,
    job_id: Uuid,
) -> Result<ApplicationCard, AppError>
where
    S: JobStore + ApplicationStore + ?Sized,
{
    let job = store.get_job(job_id).await?;
    let existing = store
        .list_applications(&ApplicationFilter {
            candidate_id: Some(candidate_id),
            employer_id: None,
        })
        .await?;

    check_can_apply(job.as_ref(), &existing, candidate_id, job_id)?;

    let row = store.create_application(candidate_id, job_id).await?;
    Ok(ApplicationCard::from_row(&row))
}
