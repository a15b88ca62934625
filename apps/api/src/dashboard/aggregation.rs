//! Aggregation Engine: employer statistics from raw application records.
//!
//! Pure and recomputed on every request: the same inputs and the same `now`
//! always produce the same output.
//!
//! Counting policy:
//! - `total_candidates` counts applications, not distinct candidates.
//! - Applications on archived jobs still count toward the global totals, but
//!   archived jobs get no per-job rollup and never count as active.
//! - "New" means `created_at` within `[now - 7 days, now]`, both ends inclusive.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::ApplicationRow;
use crate::models::job::JobPosting;

pub const NEW_APPLICANT_WINDOW_DAYS: i64 = 7;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// A count over a trailing window of days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatDelta {
    pub count: usize,
    pub window_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRollup {
    pub job_id: Uuid,
    pub total_applicants: usize,
    pub new_applicants: StatDelta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_jobs: usize,
    pub total_candidates: usize,
    pub new_applicants: StatDelta,
    /// Not computed yet: always `None`, serialized as `null`.
    pub pending_review: Option<usize>,
    /// One entry per active job, in input order.
    pub per_job: Vec<JobRollup>,
}

fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(NEW_APPLICANT_WINDOW_DAYS)
}

pub fn is_new_applicant(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    created_at >= window_start(now) && created_at <= now
}

fn delta<'a>(apps: impl Iterator<Item = &'a ApplicationRow>, now: DateTime<Utc>) -> StatDelta {
    StatDelta {
        count: apps.filter(|a| is_new_applicant(a.created_at, now)).count(),
        window_days: NEW_APPLICANT_WINDOW_DAYS,
    }
}

fn applications_for<'a>(
    visible: &'a [&'a ApplicationRow],
    job_id: Uuid,
) -> impl Iterator<Item = &'a ApplicationRow> + 'a {
    visible.iter().copied().filter(move |a| a.job_id == job_id)
}

/// Computes global and per-job statistics for `employer_id`.
///
/// Jobs owned by other employers, and applications to those jobs, are ignored.
pub fn aggregate(
    employer_id: Uuid,
    applications: &[ApplicationRow],
    jobs: &[JobPosting],
    now: DateTime<Utc>,
) -> DashboardStats {
    let owned: Vec<&JobPosting> = jobs.iter().filter(|j| j.employer_id == employer_id).collect();
    let owned_ids: HashSet<Uuid> = owned.iter().map(|j| j.id).collect();

    let visible: Vec<&ApplicationRow> = applications
        .iter()
        .filter(|a| owned_ids.contains(&a.job_id))
        .collect();

    let active: Vec<&JobPosting> = owned.into_iter().filter(|j| j.is_active()).collect();

    let per_job = active
        .iter()
        .map(|job| JobRollup {
            job_id: job.id,
            total_applicants: applications_for(&visible, job.id).count(),
            new_applicants: delta(applications_for(&visible, job.id), now),
        })
        .collect();

    DashboardStats {
        active_jobs: active.len(),
        total_candidates: visible.len(),
        new_applicants: delta(visible.iter().copied(), now),
        pending_review: None,
        per_job,
    }
}

/// The `limit` most recent applications, newest first.
pub fn recent_activity(applications: &[ApplicationRow], limit: usize) -> Vec<&ApplicationRow> {
    let mut sorted: Vec<&ApplicationRow> = applications.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}
