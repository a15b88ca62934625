use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Archived,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    /// Only an exact `active` status counts; anything else is treated as
    /// archived so it can never inflate active-job counts.
    pub fn status(&self) -> JobStatus {
        if self.status == JobStatus::Active.as_str() {
            JobStatus::Active
        } else {
            JobStatus::Archived
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == JobStatus::Active
    }
}

/// Filter for `JobStore::list_jobs`. `None` fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub employer_id: Option<Uuid>,
    pub status: Option<JobStatus>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobPosting) -> bool {
        self.employer_id.map_or(true, |id| job.employer_id == id)
            && self.status.map_or(true, |s| job.status() == s)
    }
}
