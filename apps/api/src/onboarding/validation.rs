use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{NewProfile, Role};

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSetupRequest {
    pub role: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

/// Accepts only the two self-selectable roles.
fn parse_role(raw: &str) -> Result<Role, AppError> {
    match Role::from_stored(Some(raw.trim())) {
        Role::Unresolved => Err(AppError::Validation(
            "Role must be either 'candidate' or 'employer'".to_string(),
        )),
        role => Ok(role),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Employers must name their company; candidates never carry one.
fn company_for(role: Role, company_name: Option<&str>) -> Result<Option<String>, AppError> {
    match (role, non_blank(company_name)) {
        (Role::Employer, None) => Err(AppError::Validation(
            "Company name is required for employer accounts".to_string(),
        )),
        (Role::Employer, company) => Ok(company),
        _ => Ok(None),
    }
}

/// Validates a signup form before credentials are handed to the identity
/// provider. Returns the selected role.
pub fn validate_signup(form: &SignupForm) -> Result<Role, AppError> {
    if form.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if form.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    if form.password != form.confirm_password {
        return Err(AppError::Validation(
            "Passwords don't match. Please make sure your passwords match.".to_string(),
        ));
    }

    let role = parse_role(&form.role)?;
    company_for(role, form.company_name.as_deref())?;
    Ok(role)
}

/// Turns a role-selection request into the profile row to create.
pub fn build_profile(user_id: Uuid, req: &ProfileSetupRequest) -> Result<NewProfile, AppError> {
    let role = parse_role(&req.role)?;
    Ok(NewProfile {
        user_id,
        role,
        first_name: non_blank(req.first_name.as_deref()),
        last_name: non_blank(req.last_name.as_deref()),
        company_name: company_for(role, req.company_name.as_deref())?,
    })
}
