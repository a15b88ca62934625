use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::application::{ApplicationFilter, ApplicationRow};
use crate::models::job::{JobFilter, JobPosting, JobStatus};
use crate::models::profile::{NewProfile, ProfileRow};
use crate::store::{ApplicationStore, IdentityStore, JobStore, SessionRecord, StoreError};

const UNIQUE_VIOLATION: &str = "23505";

const APPLICATION_SELECT: &str = r#"
    SELECT a.id, a.candidate_id, a.job_id, a.status, a.created_at, a.ai_score,
           a.interview_ready,
           j.title AS job_title,
           j.employer_id AS employer_id,
           e.company_name AS company_name,
           c.first_name AS candidate_first_name,
           c.last_name AS candidate_last_name
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    LEFT JOIN profiles e ON e.id = j.employer_id
    LEFT JOIN profiles c ON c.id = a.candidate_id
"#;

/// PostgreSQL-backed implementation of all store traits.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[async_trait]
impl IdentityStore for PgStore {
    async fn get_session(&self, token: &str) -> Result<Option<SessionRecord>, StoreError> {
        let user_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id.map(|user_id| SessionRecord { user_id }))
    }

    async fn get_profile_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<ProfileRow, StoreError> {
        // The conflict branch only fires for rows without a usable role, so an
        // existing candidate or employer returns no row.
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (user_id, role, first_name, last_name, company_name)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET role = EXCLUDED.role,
                first_name = COALESCE(EXCLUDED.first_name, profiles.first_name),
                last_name = COALESCE(EXCLUDED.last_name, profiles.last_name),
                company_name = EXCLUDED.company_name
            WHERE profiles.role IS NULL OR profiles.role NOT IN ('candidate', 'employer')
            RETURNING *
            "#,
        )
        .bind(profile.user_id)
        .bind(profile.role.as_str())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.company_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            StoreError::Duplicate(format!("User {} already has a profile", profile.user_id))
        })?;

        info!("Created {} profile {} for user {}", profile.role.as_str(), row.id, row.user_id);
        Ok(row)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        let jobs = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT id, employer_id, title, location, status, created_at
            FROM jobs
            WHERE ($1::uuid IS NULL OR employer_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.employer_id)
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        debug!("Listed {} jobs", jobs.len());
        Ok(jobs)
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobPosting>, StoreError> {
        Ok(sqlx::query_as::<_, JobPosting>(
            "SELECT id, employer_id, title, location, status, created_at FROM jobs WHERE id = $1",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn archive_job(&self, job_id: Uuid, employer_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE jobs SET status = $1 WHERE id = $2 AND employer_id = $3")
            .bind(JobStatus::Archived.as_str())
            .bind(job_id)
            .bind(employer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRow>, StoreError> {
        let sql = format!(
            r#"{APPLICATION_SELECT}
            WHERE ($1::uuid IS NULL OR a.candidate_id = $1)
              AND ($2::uuid IS NULL OR j.employer_id = $2)
            ORDER BY a.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(filter.candidate_id)
            .bind(filter.employer_id)
            .fetch_all(&self.pool)
            .await?;

        debug!("Listed {} applications", rows.len());
        Ok(rows)
    }

    async fn create_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<ApplicationRow, StoreError> {
        // Status is checked in the same statement so a concurrent archive
        // cannot slip in between the check and the insert.
        let id: Option<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO applications (candidate_id, job_id)
            SELECT $1, id FROM jobs WHERE id = $2 AND status = $3
            RETURNING id
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .bind(JobStatus::Active.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Duplicate("You have already applied to this job".to_string())
            } else {
                StoreError::Database(e)
            }
        })?;
        let id = id.ok_or_else(|| {
            StoreError::Rejected("This job is no longer accepting applications".to_string())
        })?;

        let sql = format!("{APPLICATION_SELECT} WHERE a.id = $1");
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Application {id} not found")))?;

        info!("Candidate {candidate_id} applied to job {job_id} (application {id})");
        Ok(row)
    }
}
