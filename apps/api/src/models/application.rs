use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::profile::display_name;

/// An application joined with read-only fields from its job posting and the
/// candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub ai_score: Option<f64>,
    /// Set by the interview subsystem once an AI interview can be started.
    pub interview_ready: bool,
    pub job_title: Option<String>,
    pub employer_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub candidate_first_name: Option<String>,
    pub candidate_last_name: Option<String>,
}

impl ApplicationRow {
    pub fn candidate_name(&self) -> String {
        display_name(
            self.candidate_first_name.as_deref(),
            self.candidate_last_name.as_deref(),
        )
    }

    /// Score rounded to a whole number; values outside 0–100 are dropped.
    pub fn display_ai_score(&self) -> Option<u8> {
        self.ai_score
            .filter(|s| (0.0..=100.0).contains(s))
            .map(|s| s.round() as u8)
    }
}

/// Filter for `ApplicationStore::list_applications`. The employer constraint
/// is applied through the owning job.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub candidate_id: Option<Uuid>,
    pub employer_id: Option<Uuid>,
}
