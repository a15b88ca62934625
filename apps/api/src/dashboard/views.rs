//! View-models handed to the presentation layer. Built fresh per request.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::dashboard::aggregation::{DashboardStats, JobRollup, StatDelta};
use crate::models::application::ApplicationRow;
use crate::models::job::JobPosting;
use crate::models::profile::initials;
use crate::pipeline::actions::{next_action, NextAction};
use crate::pipeline::stages::{stage_of, status_label, StagePosition};

const UNKNOWN_CANDIDATE: &str = "Unknown candidate";
const UNKNOWN_JOB: &str = "Unknown job";

/// Which store fetch a warning refers to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchSource {
    Jobs,
    Applications,
}

/// Non-fatal data-fetch failure surfaced next to a degraded view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardWarning {
    pub source: FetchSource,
    pub message: String,
}

/// A view plus any warnings raised while building it.
#[derive(Debug, Clone, Serialize)]
pub struct Composed<T> {
    #[serde(flatten)]
    pub view: T,
    pub warnings: Vec<DashboardWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationCard {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub status: String,
    pub status_label: String,
    pub position: StagePosition,
    pub ai_score: Option<u8>,
    pub next_action: Option<NextAction>,
}

impl ApplicationCard {
    pub fn from_row(row: &ApplicationRow) -> Self {
        Self {
            application_id: row.id,
            job_id: row.job_id,
            job_title: row.job_title.clone().unwrap_or_else(|| UNKNOWN_JOB.to_string()),
            company_name: row.company_name.clone(),
            applied_at: row.created_at,
            status: row.status.clone(),
            status_label: status_label(&row.status),
            position: stage_of(&row.status),
            ai_score: row.display_ai_score(),
            next_action: next_action(row),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableJob {
    pub job_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub already_applied: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateDashboardView {
    pub display_name: String,
    pub applications: Vec<ApplicationCard>,
    pub available_jobs: Vec<AvailableJob>,
}

pub fn build_available_jobs(
    jobs: &[JobPosting],
    applications: &[ApplicationRow],
) -> Vec<AvailableJob> {
    let applied: HashSet<Uuid> = applications.iter().map(|a| a.job_id).collect();
    jobs.iter()
        .filter(|j| j.is_active())
        .map(|j| AvailableJob {
            job_id: j.id,
            title: j.title.clone(),
            location: j.location.clone(),
            posted_at: j.created_at,
            already_applied: applied.contains(&j.id),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Employer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct JobCard {
    pub job_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub total_applicants: usize,
    pub new_applicants: StatDelta,
    pub share_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub initials: String,
    pub job_title: String,
    pub applied_at: DateTime<Utc>,
}

impl ActivityItem {
    pub fn from_row(row: &ApplicationRow) -> Self {
        let name = row.candidate_name();
        let candidate_name = if name.is_empty() {
            UNKNOWN_CANDIDATE.to_string()
        } else {
            name
        };
        Self {
            application_id: row.id,
            candidate_id: row.candidate_id,
            initials: initials(&candidate_name),
            candidate_name,
            job_title: row.job_title.clone().unwrap_or_else(|| UNKNOWN_JOB.to_string()),
            applied_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployerDashboardView {
    pub company_name: Option<String>,
    pub display_name: String,
    pub stats: DashboardStats,
    pub jobs: Vec<JobCard>,
    pub recent_activity: Vec<ActivityItem>,
}

pub fn share_url(public_base_url: &str, job_id: Uuid) -> String {
    format!("{}/jobs/{}", public_base_url.trim_end_matches('/'), job_id)
}

/// Pairs each rollup with its job posting. Rollups without a matching job are
/// skipped.
pub fn build_job_cards(
    jobs: &[JobPosting],
    rollups: &[JobRollup],
    public_base_url: &str,
) -> Vec<JobCard> {
    rollups
        .iter()
        .filter_map(|rollup| {
            let job = jobs.iter().find(|j| j.id == rollup.job_id)?;
            Some(JobCard {
                job_id: job.id,
                title: job.title.clone(),
                location: job.location.clone(),
                posted_at: job.created_at,
                total_applicants: rollup.total_applicants,
                new_applicants: rollup.new_applicants,
                share_url: share_url(public_base_url, job.id),
            })
        })
        .collect()
}
