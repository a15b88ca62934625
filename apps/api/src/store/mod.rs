//! Store boundary: identity/profile, job and application collaborators.
//!
//! The dashboard core only talks to these traits. `PgStore` is the default
//! backend; `AppState` carries it as `Arc<dyn RecruitStore>`.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{ApplicationFilter, ApplicationRow};
use crate::models::job::{JobFilter, JobPosting};
use crate::models::profile::{NewProfile, ProfileRow};

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(String),
}

/// An unexpired session, as returned by the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: Uuid,
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn get_session(&self, token: &str) -> Result<Option<SessionRecord>, StoreError>;

    async fn get_profile_by_user_id(&self, user_id: Uuid)
        -> Result<Option<ProfileRow>, StoreError>;

    /// Creates the user's profile, or assigns the role on an existing profile
    /// whose stored role is missing or unrecognized. Fails with
    /// `StoreError::Duplicate` if the user already has a usable role.
    async fn create_profile(&self, profile: NewProfile) -> Result<ProfileRow, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobPosting>, StoreError>;

    /// Sets the job to archived when it is owned by `employer_id`.
    /// Returns `false` when no owned job matched. Never re-activates a job.
    async fn archive_job(&self, job_id: Uuid, employer_id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Results are ordered newest first.
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRow>, StoreError>;

    /// Fails with `StoreError::Duplicate` if the (candidate, job) pair exists
    /// and with `StoreError::Rejected` unless the job is active at insert time.
    async fn create_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplicationRow, StoreError>;
}

/// Everything a request handler needs from the backing store.
pub trait RecruitStore: IdentityStore + JobStore + ApplicationStore {}

impl<T> RecruitStore for T where T: IdentityStore + JobStore + ApplicationStore {}
