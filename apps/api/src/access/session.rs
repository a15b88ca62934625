use axum::http::{header, HeaderMap};
use tracing::{debug, warn};

use crate::access::gate::Identity;
use crate::models::profile::Role;
use crate::store::IdentityStore;

/// Extracts the session token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the request's identity: session first, then the profile keyed by
/// the session's user id. The two lookups are sequential because the profile
/// is keyed by the id the session yields.
///
/// Returns `None` ("no session") when there is no token, the token is unknown
/// or expired, or either lookup fails. A session without a usable profile
/// resolves to `Role::Unresolved` with no profile id, so nothing can be scoped
/// to a profile whose role is unknown.
pub async fn resolve_identity<S>(store: &S, token: Option<&str>) -> Option<Identity>
where
    S: IdentityStore + ?Sized,
{
    let token = token?;

    let session = match store.get_session(token).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            debug!("Session token not found or expired");
            return None;
        }
        Err(e) => {
            warn!("Session lookup failed: {e}");
            return None;
        }
    };

    let profile = match store.get_profile_by_user_id(session.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Profile lookup failed for user {}: {e}", session.user_id);
            return None;
        }
    };

    let identity = match profile {
        Some(profile) => Identity {
            user_id: session.user_id,
            role: profile.role(),
            profile_id: (profile.role() != Role::Unresolved).then_some(profile.id),
            display_name: profile.display_name(),
            company_name: profile.company_name.clone(),
        },
        None => Identity {
            user_id: session.user_id,
            role: Role::Unresolved,
            profile_id: None,
            display_name: String::new(),
            company_name: None,
        },
    };

    debug!(
        "Resolved user {} as {}",
        identity.user_id,
        identity.role.as_str()
    );
    Some(identity)
}
