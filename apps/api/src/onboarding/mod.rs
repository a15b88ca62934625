// Onboarding: signup form checks and first-time role selection. Credentials
// themselves live with the external identity provider.

pub mod handlers;
pub mod validation;
