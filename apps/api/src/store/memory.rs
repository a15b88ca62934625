//! In-memory store used by tests. Fetches can be switched to fail so the
//! degrade-to-empty paths can be exercised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::application::{ApplicationFilter, ApplicationRow};
use crate::models::job::{JobFilter, JobPosting, JobStatus};
use crate::models::profile::{NewProfile, ProfileRow, Role};
use crate::store::{ApplicationStore, IdentityStore, JobStore, SessionRecord, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<Vec<(String, Uuid)>>,
    profiles: Mutex<Vec<ProfileRow>>,
    jobs: Mutex<Vec<JobPosting>>,
    applications: Mutex<Vec<ApplicationRow>>,
    fail_profiles: AtomicBool,
    fail_jobs: AtomicBool,
    fail_applications: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_profiles(&self) {
        self.fail_profiles.store(true, Ordering::SeqCst);
    }

    pub fn fail_jobs(&self) {
        self.fail_jobs.store(true, Ordering::SeqCst);
    }

    pub fn fail_applications(&self) {
        self.fail_applications.store(true, Ordering::SeqCst);
    }

    pub fn add_session(&self, token: &str, user_id: Uuid) {
        self.sessions
            .lock()
            .unwrap()
            .push((token.to_string(), user_id));
    }

    /// Adds a session and a profile with the given stored role.
    /// Returns the profile id.
    pub fn add_user(&self, token: &str, role: Option<&str>, company: Option<&str>) -> Uuid {
        let user_id = Uuid::new_v4();
        self.add_session(token, user_id);
        let profile = ProfileRow {
            id: Uuid::new_v4(),
            user_id,
            role: role.map(str::to_string),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            company_name: company.map(str::to_string),
            created_at: Utc::now(),
        };
        let id = profile.id;
        self.profiles.lock().unwrap().push(profile);
        id
    }

    pub fn add_job(
        &self,
        employer_id: Uuid,
        title: &str,
        status: JobStatus,
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let job = JobPosting {
            id: Uuid::new_v4(),
            employer_id,
            title: title.to_string(),
            location: Some("Remote".to_string()),
            status: status.as_str().to_string(),
            created_at,
        };
        let id = job.id;
        self.jobs.lock().unwrap().push(job);
        id
    }

    pub fn add_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        status: &str,
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let mut row = self.joined(candidate_id, job_id, created_at);
        row.status = status.to_string();
        let id = row.id;
        self.applications.lock().unwrap().push(row);
        id
    }

    pub fn set_interview_ready(&self, application_id: Uuid) {
        for app in self.applications.lock().unwrap().iter_mut() {
            if app.id == application_id {
                app.interview_ready = true;
            }
        }
    }

    pub fn job_status(&self, job_id: Uuid) -> Option<String> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == job_id)
            .map(|j| j.status.clone())
    }

    fn joined(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> ApplicationRow {
        let job = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == job_id)
            .cloned();
        let profiles = self.profiles.lock().unwrap();
        let employer = job
            .as_ref()
            .and_then(|j| profiles.iter().find(|p| p.id == j.employer_id));
        let candidate = profiles.iter().find(|p| p.id == candidate_id);

        ApplicationRow {
            id: Uuid::new_v4(),
            candidate_id,
            job_id,
            status: "submitted".to_string(),
            created_at,
            ai_score: None,
            interview_ready: false,
            job_title: job.as_ref().map(|j| j.title.clone()),
            employer_id: job.as_ref().map(|j| j.employer_id),
            company_name: employer.and_then(|p| p.company_name.clone()),
            candidate_first_name: candidate.and_then(|p| p.first_name.clone()),
            candidate_last_name: candidate.and_then(|p| p.last_name.clone()),
        }
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            tracing::debug!("Simulating {what} fetch failure");
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn get_session(&self, token: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, user_id)| SessionRecord { user_id: *user_id }))
    }

    async fn get_profile_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileRow>, StoreError> {
        Self::check(&self.fail_profiles, "profile")?;
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<ProfileRow, StoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(existing) = profiles.iter_mut().find(|p| p.user_id == profile.user_id) {
            if existing.role() != Role::Unresolved {
                return Err(StoreError::Duplicate(format!(
                    "User {} already has a profile",
                    profile.user_id
                )));
            }
            existing.role = Some(profile.role.as_str().to_string());
            existing.first_name = profile.first_name.or(existing.first_name.take());
            existing.last_name = profile.last_name.or(existing.last_name.take());
            existing.company_name = profile.company_name;
            return Ok(existing.clone());
        }
        let row = ProfileRow {
            id: Uuid::new_v4(),
            user_id: profile.user_id,
            role: match profile.role {
                Role::Unresolved => None,
                role => Some(role.as_str().to_string()),
            },
            first_name: profile.first_name,
            last_name: profile.last_name,
            company_name: profile.company_name,
            created_at: Utc::now(),
        };
        profiles.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        Self::check(&self.fail_jobs, "jobs")?;
        let mut jobs: Vec<JobPosting> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobPosting>, StoreError> {
        Self::check(&self.fail_jobs, "jobs")?;
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == job_id)
            .cloned())
    }

    async fn archive_job(&self, job_id: Uuid, employer_id: Uuid) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs
            .iter_mut()
            .find(|j| j.id == job_id && j.employer_id == employer_id)
        {
            Some(job) => {
                job.status = JobStatus::Archived.as_str().to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRow>, StoreError> {
        Self::check(&self.fail_applications, "applications")?;
        let mut rows: Vec<ApplicationRow> = self
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter.candidate_id.map_or(true, |id| a.candidate_id == id))
            .filter(|a| filter.employer_id.map_or(true, |id| a.employer_id == Some(id)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplicationRow, StoreError> {
        let exists = self
            .applications
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.candidate_id == candidate_id && a.job_id == job_id);
        if exists {
            return Err(StoreError::Duplicate(
                "You have already applied to this job".to_string(),
            ));
        }
        let active = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .any(|j| j.id == job_id && j.is_active());
        if !active {
            return Err(StoreError::Rejected(
                "This job is no longer accepting applications".to_string(),
            ));
        }
        let row = self.joined(candidate_id, job_id, Utc::now());
        self.applications.lock().unwrap().push(row.clone());
        Ok(row)
    }
}
