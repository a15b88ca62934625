use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Dashboard role of an authenticated user.
///
/// `Unresolved` covers a missing profile as well as a profile whose stored
/// role is not one of the two known values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Employer,
    Unresolved,
}

impl Role {
    /// Parses the raw `profiles.role` column. Matching is exact: stored roles
    /// are written by this service in lowercase.
    pub fn from_stored(raw: Option<&str>) -> Role {
        match raw {
            Some("candidate") => Role::Candidate,
            Some("employer") => Role::Employer,
            _ => Role::Unresolved,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
            Role::Unresolved => "unresolved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn role(&self) -> Role {
        Role::from_stored(self.role.as_deref())
    }

    /// `first last`, skipping blank parts. Empty when neither name is set.
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Joins optional first/last names into a single trimmed display name.
pub fn display_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Up to two upper-cased initials taken from the leading words of `name`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Fields for a new profile row. The user id comes from the session.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}
