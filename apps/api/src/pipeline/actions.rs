use serde::Serialize;
use uuid::Uuid;

use crate::models::application::ApplicationRow;

/// Affordance a candidate view offers for an application.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextAction {
    StartInterview { application_id: Uuid },
}

/// True only when the interview subsystem has flagged the application as
/// ready for its AI interview.
pub fn has_pending_action(application: &ApplicationRow) -> bool {
    application.interview_ready
}

pub fn next_action(application: &ApplicationRow) -> Option<NextAction> {
    has_pending_action(application).then_some(NextAction::StartInterview {
        application_id: application.id,
    })
}
